pub mod archive;
pub mod cli;
pub mod config;
pub mod error;
pub mod scanner;
pub mod spreadsheet;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{ArchiveConfig, Config, OutputConfig, WalkConfig};
pub use error::{CatalogError, ErrorKind, Result, UserFriendlyError};

// Core functionality re-exports
pub use archive::{ArchiveExtractor, ExtractionProgress};
pub use scanner::{extract_product_names_and_extensions, DirectoryWalker, ProductRecord};
pub use spreadsheet::{CatalogReport, SpreadsheetWriter};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::task;

/// Runs the extract → walk → parse → write pipeline for one archive.
pub struct ZipCatalog {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl ZipCatalog {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet && output_mode == OutputMode::Human);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(config, output_mode, cli_args.verbose, cli_args.quiet))
    }

    /// Runs every stage in order, stopping at the first error.
    pub async fn run(&self) -> Result<CatalogReport> {
        let start_time = Instant::now();
        self.config.validate()?;

        // Step 1: Extract archive
        let extraction = self.extract_archive().await?;
        self.output_formatter.success("Archive extracted successfully");

        for entry in &extraction.skipped_entries {
            self.output_formatter
                .warning(&format!("Skipped unsafe archive entry: {}", entry));
        }

        // Step 2: Walk extracted tree
        let files = self.collect_files()?;
        self.output_formatter
            .info(&format!("Found {} files", files.len()));

        // Step 3: Split names and extensions
        let records = extract_product_names_and_extensions(&files);

        // Step 4: Write spreadsheet
        self.write_spreadsheet(&records)?;
        self.output_formatter.success(&format!(
            "Product names and extensions saved to {}",
            self.config.output.spreadsheet.display()
        ));

        Ok(CatalogReport::new(
            &self.config,
            &extraction,
            &records,
            start_time.elapsed(),
        ))
    }

    async fn extract_archive(&self) -> Result<ExtractionProgress> {
        self.output_formatter.start_operation("Extracting archive");

        let extraction_bar = self.progress_manager.create_extraction_progress();
        let extractor = {
            let pb = extraction_bar.clone();
            ArchiveExtractor::new().with_progress(move |progress: &ExtractionProgress| {
                ui::progress::update_extraction_progress(&pb, progress);
            })
        };

        let archive_path = self.config.archive.path.clone();
        let target_dir = self.config.archive.extraction_dir.clone();
        let joined = task::spawn_blocking(move || extractor.extract(&archive_path, &target_dir))
            .await
            .map_err(|e| CatalogError::Extraction {
                path: self.config.archive.path.display().to_string(),
                source: std::io::Error::other(e),
            })?;

        let extraction = match joined {
            Ok(extraction) => extraction,
            Err(e) => {
                extraction_bar.abandon();
                return Err(e);
            }
        };

        ui::progress::finish_progress_with_summary(
            &extraction_bar,
            &format!("Extracted {} files", extraction.files_written),
            extraction.elapsed(),
        );

        Ok(extraction)
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        self.output_formatter.start_operation("Scanning extracted files");

        let spinner = self.progress_manager.create_spinner("Walking directory tree");
        let walker = DirectoryWalker::new(&self.config.walk);
        let result = walker.walk(&self.config.archive.extraction_dir);
        spinner.finish_and_clear();

        result
    }

    fn write_spreadsheet(&self, records: &[ProductRecord]) -> Result<()> {
        self.output_formatter.start_operation("Writing spreadsheet");
        self.output_formatter.debug(&format!(
            "Writing {} records to sheet '{}'",
            records.len(),
            self.config.output.sheet_name
        ));

        SpreadsheetWriter::new(&self.config.output).write(records, &self.config.output.spreadsheet)
    }

    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    pub fn progress_manager(&self) -> &ProgressManager {
        &self.progress_manager
    }

    pub fn handle_error(&self, error: &CatalogError) {
        self.progress_manager.clear();
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Runs the pipeline with the given configuration and no console output.
pub async fn catalog_archive(config: Config) -> Result<CatalogReport> {
    ZipCatalog::new(config, OutputMode::Plain, 0, true).run().await
}

pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::zip_extractor::tests::write_zip;
    use crate::spreadsheet::xlsx_writer::tests::read_rows;
    use std::fs;
    use tempfile::TempDir;

    fn test_config(root: &Path) -> Config {
        let mut config = Config::default();
        config.archive.path = root.join("zip_folder").join("images.zip");
        config.archive.extraction_dir = root.join("zip_folder").join("extracted_files");
        config.output.spreadsheet = root.join("zip_folder").join("images_name.xlsx");
        config
    }

    #[tokio::test]
    async fn test_full_pipeline() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(temp_dir.path());
        fs::create_dir_all(config.archive.path.parent().unwrap()).unwrap();
        write_zip(
            &config.archive.path,
            &[("photos/cat.png", "cat"), ("photos/sub/dog.jpg", "dog")],
        );

        let report = catalog_archive(config.clone()).await.unwrap();

        assert_eq!(report.files_extracted, 2);
        assert_eq!(report.record_count, 2);
        assert_eq!(report.records_by_extension.get(".png"), Some(&1));

        let rows = read_rows(&config.output.spreadsheet, "Products");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["Product Name", "Extension"]);

        // Sibling order follows the OS listing
        let mut data: Vec<Vec<String>> = rows[1..].to_vec();
        data.sort();
        assert_eq!(data, vec![vec!["cat", ".png"], vec!["dog", ".jpg"]]);
    }

    #[tokio::test]
    async fn test_record_count_matches_extracted_files() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(temp_dir.path());
        fs::create_dir_all(config.archive.path.parent().unwrap()).unwrap();
        write_zip(
            &config.archive.path,
            &[
                ("a.png", "a"),
                ("nested/b.jpg", "b"),
                ("nested/deeper/c.gif", "c"),
                ("nested/deeper/README", "d"),
            ],
        );

        let report = catalog_archive(config.clone()).await.unwrap();

        assert_eq!(report.files_extracted, 4);
        assert_eq!(report.record_count, 4);
        assert_eq!(read_rows(&config.output.spreadsheet, "Products").len(), 5);
    }

    #[tokio::test]
    async fn test_missing_archive_produces_no_output() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(temp_dir.path());
        fs::create_dir_all(config.archive.path.parent().unwrap()).unwrap();

        let error = catalog_archive(config.clone()).await.unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Extraction);
        assert!(matches!(error, CatalogError::ArchiveNotFound { .. }));
        assert!(!config.archive.extraction_dir.exists());
        assert!(!config.output.spreadsheet.exists());
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected_before_extraction() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = test_config(temp_dir.path());
        config.archive.extraction_dir = temp_dir.path().join("zip_folder");

        let error = catalog_archive(config).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Config);
    }

    #[tokio::test]
    async fn test_ancestor_extraction_dir_is_rejected_before_extraction() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = test_config(temp_dir.path());
        fs::create_dir_all(config.archive.path.parent().unwrap()).unwrap();
        write_zip(&config.archive.path, &[("cat.png", "cat")]);
        config.archive.extraction_dir = temp_dir.path().to_path_buf();
        config.output.spreadsheet = temp_dir.path().join("out.xlsx");

        let error = catalog_archive(config).await.unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Config);
        assert!(!temp_dir.path().join("cat.png").exists());
        assert!(!temp_dir.path().join("out.xlsx").exists());
    }

    #[tokio::test]
    async fn test_write_failure_after_extraction() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = test_config(temp_dir.path());
        config.output.spreadsheet = temp_dir.path().join("missing").join("out.xlsx");
        fs::create_dir_all(config.archive.path.parent().unwrap()).unwrap();
        write_zip(&config.archive.path, &[("cat.png", "cat")]);

        let error = catalog_archive(config.clone()).await.unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Write);
        assert!(config.archive.extraction_dir.join("cat.png").exists());
    }

    #[test]
    fn test_sample_config_generation() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("sample.toml");

        ZipCatalog::generate_sample_config(&config_path).unwrap();

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[archive]"));
        assert!(content.contains("images.zip"));
    }

    #[test]
    fn test_progress_disabled_outside_human_mode() {
        let catalog = ZipCatalog::new(Config::default(), OutputMode::Json, 0, false);
        assert!(!catalog.progress_manager().is_enabled());

        let quiet = ZipCatalog::new(Config::default(), OutputMode::Human, 0, true);
        assert!(!quiet.progress_manager().is_enabled());
    }

    #[test]
    fn test_version_info() {
        assert!(!version_info().is_empty());
    }
}
