use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Characters Excel refuses in worksheet names.
const INVALID_SHEET_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];
const MAX_SHEET_NAME_LEN: usize = 31;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub archive: ArchiveConfig,
    pub output: OutputConfig,
    pub walk: WalkConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ArchiveConfig {
    pub path: PathBuf,
    pub extraction_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub spreadsheet: PathBuf,
    pub sheet_name: String,
    pub bold_header: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct WalkConfig {
    /// Resolve symbolic links instead of listing them as files.
    pub follow_links: bool,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("zip_folder/images.zip"),
            // Kept apart from the archive's own directory so the walk never sees the archive
            extraction_dir: PathBuf::from("zip_folder/extracted_files"),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            spreadsheet: PathBuf::from("zip_folder/images_name.xlsx"),
            sheet_name: "Products".to_string(),
            bold_header: true,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(CatalogError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| CatalogError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["zipcatalog.toml", ".zipcatalog.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| CatalogError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| CatalogError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.archive.path.as_os_str().is_empty() {
            return Err(CatalogError::Config {
                message: "Archive path must not be empty".to_string(),
            });
        }

        if self.archive.extraction_dir.as_os_str().is_empty() {
            return Err(CatalogError::Config {
                message: "Extraction directory must not be empty".to_string(),
            });
        }

        if self.output.spreadsheet.as_os_str().is_empty() {
            return Err(CatalogError::Config {
                message: "Spreadsheet path must not be empty".to_string(),
            });
        }

        let extraction_dir = &self.archive.extraction_dir;
        if is_within(&self.archive.path, extraction_dir) {
            return Err(CatalogError::Config {
                message: format!(
                    "Archive {} must not be inside the extraction directory {}",
                    self.archive.path.display(),
                    extraction_dir.display()
                ),
            });
        }

        if is_within(&self.output.spreadsheet, extraction_dir) {
            return Err(CatalogError::Config {
                message: format!(
                    "Spreadsheet {} must not be inside the extraction directory {}",
                    self.output.spreadsheet.display(),
                    extraction_dir.display()
                ),
            });
        }

        validate_sheet_name(&self.output.sheet_name)?;

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

fn validate_sheet_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(CatalogError::Config {
            message: "Sheet name must not be empty".to_string(),
        });
    }

    if name.chars().count() > MAX_SHEET_NAME_LEN {
        return Err(CatalogError::Config {
            message: format!(
                "Sheet name '{}' is longer than {} characters",
                name, MAX_SHEET_NAME_LEN
            ),
        });
    }

    if let Some(c) = name.chars().find(|c| INVALID_SHEET_CHARS.contains(c)) {
        return Err(CatalogError::Config {
            message: format!("Sheet name '{}' contains invalid character '{}'", name, c),
        });
    }

    Ok(())
}

/// Whether `path` lies at any depth below `dir`.
///
/// Relative and absolute paths are not resolved against each other, so a mixed
/// pair is never considered nested.
fn is_within(path: &Path, dir: &Path) -> bool {
    if path.is_absolute() != dir.is_absolute() {
        return false;
    }
    normalize(path).starts_with(normalize(dir))
}

/// Drops `.` components so `dir`, `./dir` and `dir/.` compare equal.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
