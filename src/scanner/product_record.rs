use serde::{Deserialize, Serialize};
use std::path::Path;

/// A file's base name split at its last dot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub name: String,
    /// Includes the leading dot, or is empty.
    pub extension: String,
}

impl ProductRecord {
    pub fn new<N: Into<String>, E: Into<String>>(name: N, extension: E) -> Self {
        Self {
            name: name.into(),
            extension: extension.into(),
        }
    }

    /// Splits the final component of `path` on its last `.`.
    ///
    /// Follows [`Path::file_stem`] and [`Path::extension`]: a name whose only dot is
    /// the leading one (`.gitignore`) has no extension, and a trailing dot (`notes.`)
    /// yields the extension `"."`. Paths without a final component (`/`, `..`) give
    /// an empty record. Non-UTF-8 names are converted lossily.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let extension = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        Self { name, extension }
    }

    pub fn file_name(&self) -> String {
        format!("{}{}", self.name, self.extension)
    }

    pub fn has_extension(&self) -> bool {
        !self.extension.is_empty()
    }
}

/// Maps each path to its record, keeping input order.
pub fn extract_product_names_and_extensions<P: AsRef<Path>>(paths: &[P]) -> Vec<ProductRecord> {
    paths.iter().map(ProductRecord::from_path).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_simple_file() {
        let record = ProductRecord::from_path("zip_folder/extracted_files/photos/cat.png");
        assert_eq!(record, ProductRecord::new("cat", ".png"));
    }

    #[test]
    fn test_no_extension() {
        let record = ProductRecord::from_path("archive");
        assert_eq!(record, ProductRecord::new("archive", ""));
        assert!(!record.has_extension());
    }

    #[test]
    fn test_only_last_dot_splits() {
        let record = ProductRecord::from_path("backups/archive.tar.gz");
        assert_eq!(record, ProductRecord::new("archive.tar", ".gz"));
    }

    #[test]
    fn test_leading_dot_is_part_of_name() {
        assert_eq!(
            ProductRecord::from_path("dir/.hidden"),
            ProductRecord::new(".hidden", "")
        );
        assert_eq!(
            ProductRecord::from_path("dir/.config.toml"),
            ProductRecord::new(".config", ".toml")
        );
    }

    #[test]
    fn test_trailing_dot() {
        assert_eq!(
            ProductRecord::from_path("notes."),
            ProductRecord::new("notes", ".")
        );
    }

    #[test]
    fn test_path_without_file_name() {
        assert_eq!(ProductRecord::from_path("/"), ProductRecord::new("", ""));
    }

    #[test]
    fn test_name_and_extension_rebuild_file_name() {
        let paths = [
            "cat.png",
            "a/b/c/dog.JPG",
            "archive",
            "archive.tar.gz",
            ".hidden",
            ".config.toml",
            "notes.",
            "a..b",
            "spaced name.jpeg",
            "ünïcødé.webp",
        ];

        for path in &paths {
            let record = ProductRecord::from_path(path);
            let expected = Path::new(path).file_name().unwrap().to_string_lossy();
            assert_eq!(record.file_name(), expected, "round trip for {}", path);
        }
    }

    #[test]
    fn test_extract_preserves_order() {
        let paths = vec![
            PathBuf::from("photos/cat.png"),
            PathBuf::from("photos/sub/dog.jpg"),
            PathBuf::from("photos/cat.png"),
        ];

        let records = extract_product_names_and_extensions(&paths);

        assert_eq!(
            records,
            vec![
                ProductRecord::new("cat", ".png"),
                ProductRecord::new("dog", ".jpg"),
                ProductRecord::new("cat", ".png"),
            ]
        );
    }

    #[test]
    fn test_extract_empty_input() {
        let paths: Vec<PathBuf> = Vec::new();
        assert!(extract_product_names_and_extensions(&paths).is_empty());
    }
}
