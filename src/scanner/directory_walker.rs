use crate::config::WalkConfig;
use crate::error::{CatalogError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Lists every non-directory entry below a root, depth first.
///
/// Sibling order is whatever the OS directory listing yields. With `follow_links`
/// off (the default) a symbolic link is never descended into and is reported as a
/// file entry, whatever it points to.
pub struct DirectoryWalker {
    follow_links: bool,
}

impl DirectoryWalker {
    pub fn new(config: &WalkConfig) -> Self {
        Self {
            follow_links: config.follow_links,
        }
    }

    pub fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    pub fn walk<P: AsRef<Path>>(&self, root: P) -> Result<Vec<PathBuf>> {
        let root_path = root.as_ref();

        if !root_path.exists() {
            return Err(CatalogError::DirectoryNotFound {
                path: root_path.display().to_string(),
            });
        }

        if !root_path.is_dir() {
            return Err(CatalogError::NotADirectory {
                path: root_path.display().to_string(),
            });
        }

        let mut files = Vec::new();

        let walker = WalkDir::new(root_path)
            .min_depth(1)
            .follow_links(self.follow_links);

        for entry in walker {
            // A single unreadable directory fails the whole walk
            let entry = entry.map_err(|source| {
                let path = source.path().unwrap_or(root_path).display().to_string();
                CatalogError::FileSystem { path, source }
            })?;

            if entry.file_type().is_dir() {
                log::trace!("Entering {}", entry.path().display());
                continue;
            }

            files.push(entry.into_path());
        }

        log::debug!(
            "Found {} files under {}",
            files.len(),
            root_path.display()
        );

        Ok(files)
    }
}

impl Default for DirectoryWalker {
    fn default() -> Self {
        Self::new(&WalkConfig::default())
    }
}
