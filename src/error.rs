use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Archive not found: {path}")]
    ArchiveNotFound { path: String },

    #[error("Invalid or corrupt archive {path}: {source}")]
    InvalidArchive {
        path: String,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Extraction failed at {path}: {source}")]
    Extraction {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("Not a directory: {path}")]
    NotADirectory { path: String },

    #[error("Failed to walk directory {path}: {source}")]
    FileSystem {
        path: String,
        #[source]
        source: walkdir::Error,
    },

    #[error("Output directory does not exist: {path}")]
    OutputDirectoryMissing { path: String },

    #[error("Failed to write spreadsheet {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Pipeline stage an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Extraction,
    FileSystem,
    Write,
    Config,
    Io,
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::ArchiveNotFound { .. }
            | CatalogError::InvalidArchive { .. }
            | CatalogError::Extraction { .. } => ErrorKind::Extraction,
            CatalogError::DirectoryNotFound { .. }
            | CatalogError::NotADirectory { .. }
            | CatalogError::FileSystem { .. } => ErrorKind::FileSystem,
            CatalogError::OutputDirectoryMissing { .. } | CatalogError::Write { .. } => {
                ErrorKind::Write
            }
            CatalogError::Config { .. } => ErrorKind::Config,
            CatalogError::Io(_) => ErrorKind::Io,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::Io => 1,
            ErrorKind::Config => 2,
            ErrorKind::Extraction => 3,
            ErrorKind::FileSystem => 4,
            ErrorKind::Write => 5,
        }
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for CatalogError {
    fn user_message(&self) -> String {
        match self {
            CatalogError::ArchiveNotFound { path } => {
                format!("Archive not found: {}", path)
            }
            CatalogError::InvalidArchive { path, source } => {
                format!("Could not read archive {}: {}", path, source)
            }
            CatalogError::Extraction { path, source } => {
                format!("Failed to extract into {}: {}", path, source)
            }
            CatalogError::DirectoryNotFound { path } => {
                format!("Directory not found: {}", path)
            }
            CatalogError::NotADirectory { path } => {
                format!("Expected a directory but found a file: {}", path)
            }
            CatalogError::FileSystem { path, source } => {
                format!("Failed to read directory tree under {}: {}", path, source)
            }
            CatalogError::OutputDirectoryMissing { path } => {
                format!("Spreadsheet directory does not exist: {}", path)
            }
            CatalogError::Write { path, source } => {
                format!("Failed to write spreadsheet {}: {}", path, source)
            }
            CatalogError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            CatalogError::ArchiveNotFound { .. } => Some(
                "Check the [archive] path in your configuration file, or generate one with --generate-config.".to_string()
            ),
            CatalogError::InvalidArchive { .. } => Some(
                "Make sure the file is a complete, uncorrupted zip archive.".to_string()
            ),
            CatalogError::Extraction { .. } => Some(
                "Ensure you have write permissions for the extraction directory.".to_string()
            ),
            CatalogError::FileSystem { .. } => Some(
                "Ensure the extracted files are readable and contain no symbolic link loops.".to_string()
            ),
            CatalogError::OutputDirectoryMissing { .. } => Some(
                "Create the directory first or point [output] spreadsheet at an existing directory.".to_string()
            ),
            CatalogError::Write { .. } => Some(
                "Close the spreadsheet if it is open in another program and check write permissions.".to_string()
            ),
            CatalogError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all required fields are present.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for CatalogError {
    fn from(error: toml::de::Error) -> Self {
        CatalogError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_friendly_messages() {
        let error = CatalogError::ArchiveNotFound {
            path: "zip_folder/images.zip".to_string(),
        };
        assert!(error.user_message().contains("Archive not found"));
        assert!(error.suggestion().is_some());
    }

    #[test]
    fn test_error_kinds() {
        let missing = CatalogError::ArchiveNotFound {
            path: "a.zip".to_string(),
        };
        assert_eq!(missing.kind(), ErrorKind::Extraction);
        assert_eq!(missing.exit_code(), 3);

        let dir = CatalogError::DirectoryNotFound {
            path: "out".to_string(),
        };
        assert_eq!(dir.kind(), ErrorKind::FileSystem);
        assert_eq!(dir.exit_code(), 4);

        let file = CatalogError::NotADirectory {
            path: "out/file.txt".to_string(),
        };
        assert_eq!(file.kind(), ErrorKind::FileSystem);
        assert_eq!(file.exit_code(), 4);
        assert_eq!(file.to_string(), "Not a directory: out/file.txt");

        let write = CatalogError::OutputDirectoryMissing {
            path: "missing".to_string(),
        };
        assert_eq!(write.kind(), ErrorKind::Write);
        assert_eq!(write.exit_code(), 5);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let error = CatalogError::from(io_error);
        assert_eq!(error.kind(), ErrorKind::Io);
        assert_eq!(error.exit_code(), 1);
        assert!(error.suggestion().is_none());
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_error = toml::from_str::<toml::Value>("not = = valid").unwrap_err();
        let error = CatalogError::from(toml_error);
        assert_eq!(error.kind(), ErrorKind::Config);
    }
}
