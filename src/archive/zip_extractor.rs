use crate::error::{CatalogError, Result};
use std::fs;
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};
use zip::ZipArchive;

#[derive(Debug, Clone)]
pub struct ExtractionProgress {
    pub entries_total: usize,
    pub entries_processed: usize,
    pub files_written: usize,
    pub directories_created: usize,
    pub bytes_written: u64,
    pub current_entry: Option<String>,
    pub skipped_entries: Vec<String>,
    pub start_time: Instant,
}

impl ExtractionProgress {
    pub fn new(entries_total: usize) -> Self {
        Self {
            entries_total,
            entries_processed: 0,
            files_written: 0,
            directories_created: 0,
            bytes_written: 0,
            current_entry: None,
            skipped_entries: Vec::new(),
            start_time: Instant::now(),
        }
    }

    fn begin_entry(&mut self, name: String) {
        self.entries_processed += 1;
        self.current_entry = Some(name);
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn is_complete(&self) -> bool {
        self.entries_processed == self.entries_total
    }
}

/// Unpacks a zip archive into a target directory, preserving its internal layout.
pub struct ArchiveExtractor {
    progress_callback: Option<Box<dyn Fn(&ExtractionProgress) + Send + Sync>>,
}

impl ArchiveExtractor {
    pub fn new() -> Self {
        Self {
            progress_callback: None,
        }
    }

    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ExtractionProgress) + Send + Sync + 'static,
    {
        self.progress_callback = Some(Box::new(callback));
        self
    }

    /// Extracts every entry of `archive_path` below `target_dir`.
    ///
    /// The archive is opened and its central directory read before `target_dir` is
    /// created, so a missing or unreadable archive leaves the filesystem untouched.
    /// Existing files in `target_dir` that the archive does not name are left alone.
    /// Entries whose names would land outside `target_dir` are skipped and recorded
    /// in [`ExtractionProgress::skipped_entries`].
    pub fn extract<P, Q>(&self, archive_path: P, target_dir: Q) -> Result<ExtractionProgress>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let archive_path = archive_path.as_ref();
        let target_dir = target_dir.as_ref();

        let file = fs::File::open(archive_path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => CatalogError::ArchiveNotFound {
                path: archive_path.display().to_string(),
            },
            _ => CatalogError::Extraction {
                path: archive_path.display().to_string(),
                source: e,
            },
        })?;

        let mut archive = ZipArchive::new(file).map_err(|e| CatalogError::InvalidArchive {
            path: archive_path.display().to_string(),
            source: e,
        })?;

        fs::create_dir_all(target_dir).map_err(|e| CatalogError::Extraction {
            path: target_dir.display().to_string(),
            source: e,
        })?;

        let mut progress = ExtractionProgress::new(archive.len());
        log::debug!(
            "Extracting {} entries from {} into {}",
            archive.len(),
            archive_path.display(),
            target_dir.display()
        );

        for index in 0..archive.len() {
            let mut entry = archive
                .by_index(index)
                .map_err(|e| CatalogError::InvalidArchive {
                    path: archive_path.display().to_string(),
                    source: e,
                })?;

            progress.begin_entry(entry.name().to_string());
            self.report(&progress);

            let relative_path = match entry.enclosed_name() {
                Some(path) => path,
                None => {
                    log::warn!("Skipping archive entry with unsafe path: {}", entry.name());
                    progress.skipped_entries.push(entry.name().to_string());
                    continue;
                }
            };

            let output_path = target_dir.join(&relative_path);
            let write_error = |source: io::Error| CatalogError::Extraction {
                path: output_path.display().to_string(),
                source,
            };

            if entry.is_dir() {
                fs::create_dir_all(&output_path).map_err(write_error)?;
                progress.directories_created += 1;
                continue;
            }

            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent).map_err(write_error)?;
            }

            let mut outfile = fs::File::create(&output_path).map_err(write_error)?;
            let bytes = io::copy(&mut entry, &mut outfile).map_err(write_error)?;

            progress.files_written += 1;
            progress.bytes_written += bytes;
            log::trace!("Extracted {} ({} bytes)", relative_path.display(), bytes);
        }

        progress.current_entry = None;
        self.report(&progress);

        Ok(progress)
    }

    fn report(&self, progress: &ExtractionProgress) {
        if let Some(ref callback) = self.progress_callback {
            callback(progress);
        }
    }
}

impl Default for ArchiveExtractor {
    fn default() -> Self {
        Self::new()
    }
}
