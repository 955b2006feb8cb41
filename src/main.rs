use clap::Parser;
use std::process;
use zipcatalog::{CatalogError, Cli, OutputFormatter, OutputMode, UserFriendlyError, ZipCatalog};

#[tokio::main]
async fn main() {
    let exit_code = run().await;
    process::exit(exit_code);
}

async fn run() -> i32 {
    let cli = Cli::parse();
    setup_logging(cli.verbosity_level());

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let catalog = match ZipCatalog::from_cli(&cli) {
        Ok(catalog) => catalog,
        Err(e) => {
            print_startup_error(&e);
            return e.exit_code();
        }
    };

    if cli.dry_run {
        return handle_dry_run(&catalog);
    }

    match catalog.run().await {
        Ok(report) => {
            catalog.output_formatter().print_catalog_report(&report);
            0
        }
        Err(e) => {
            catalog.handle_error(&e);
            e.exit_code()
        }
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli.generated_config_path();

    match ZipCatalog::generate_sample_config(&config_path) {
        Ok(()) => {
            println!(
                "Generated sample configuration file: {}",
                config_path.display()
            );
            println!("\nTo use this configuration:");
            println!("  zipcatalog --config {}", config_path.display());
            println!("\nEdit the file to point at your archive and output locations.");
            0
        }
        Err(e) => {
            eprintln!(
                "Failed to generate configuration file: {}",
                e.user_message()
            );
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            e.exit_code()
        }
    }
}

fn handle_dry_run(catalog: &ZipCatalog) -> i32 {
    let formatter = catalog.output_formatter();
    let config = catalog.config();

    formatter.print_header("Dry run - no files will be touched");

    println!("  Archive:            {}", config.archive.path.display());
    println!(
        "  Extraction dir:     {}",
        config.archive.extraction_dir.display()
    );
    println!("  Spreadsheet:        {}", config.output.spreadsheet.display());
    println!("  Sheet name:         {}", config.output.sheet_name);
    println!("  Follow symlinks:    {}", config.walk.follow_links);

    formatter.print_separator();

    if !config.archive.path.is_file() {
        let error = CatalogError::ArchiveNotFound {
            path: config.archive.path.display().to_string(),
        };
        formatter.print_user_friendly_error(&error);
        return error.exit_code();
    }

    if config.archive.extraction_dir.exists() {
        formatter.warning(&format!(
            "Extraction directory {} already exists; existing files would be kept",
            config.archive.extraction_dir.display()
        ));
    }

    if config.output.spreadsheet.exists() {
        formatter.warning(&format!(
            "Spreadsheet {} would be overwritten",
            config.output.spreadsheet.display()
        ));
    }

    formatter.success("Dry run completed successfully");
    0
}

fn print_startup_error(error: &CatalogError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}

/// `RUST_LOG` wins over the level derived from `-v`.
fn setup_logging(verbosity: u8) {
    let default_filter = match verbosity {
        0 => "zipcatalog=warn",
        1 => "zipcatalog=info",
        2 => "zipcatalog=debug",
        _ => "zipcatalog=trace",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use zipcatalog::Config;

    #[test]
    fn test_generate_config_command() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");
        let config_arg = config_path.to_string_lossy().to_string();

        let cli = Cli::parse_from(["zipcatalog", "--generate-config", "--config", config_arg.as_str()]);

        assert_eq!(handle_generate_config(&cli), 0);
        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[archive]"));
    }

    #[test]
    fn test_dry_run_missing_archive() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.archive.path = temp_dir.path().join("in").join("missing.zip");
        config.archive.extraction_dir = temp_dir.path().join("out");

        let catalog = ZipCatalog::new(config, OutputMode::Plain, 0, true);
        assert_eq!(handle_dry_run(&catalog), 3);
        assert!(!temp_dir.path().join("out").exists());
    }

    #[test]
    fn test_dry_run_with_archive() {
        let temp_dir = TempDir::new().unwrap();
        let archive = temp_dir.path().join("images.zip");
        fs::write(&archive, b"PK").unwrap();

        let mut config = Config::default();
        config.archive.path = archive;
        config.archive.extraction_dir = temp_dir.path().join("out");
        config.output.spreadsheet = temp_dir.path().join("out.xlsx");

        let catalog = ZipCatalog::new(config, OutputMode::Plain, 0, true);
        assert_eq!(handle_dry_run(&catalog), 0);
        assert!(!temp_dir.path().join("out").exists());
        assert!(!temp_dir.path().join("out.xlsx").exists());
    }
}
