use crate::config::Config;
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_FILE: &str = "zipcatalog.toml";

#[derive(Parser, Debug)]
#[command(name = "zipcatalog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract a zip archive and catalog its files into a spreadsheet")]
#[command(
    long_about = "ZipCatalog extracts a zip archive, walks the extracted files and writes each \
                  file's name and extension to an xlsx spreadsheet. Paths are read from a TOML \
                  configuration file; without one the built-in defaults under zip_folder/ are used."
)]
#[command(after_help = "EXAMPLES:\n  \
    zipcatalog\n  \
    zipcatalog --config photos.toml --verbose\n  \
    zipcatalog --generate-config --config photos.toml\n  \
    zipcatalog --dry-run --output-format plain")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (show what would be done without executing)
    #[arg(long, help = "Validate configuration and show the plan without touching any files")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let config = Config::load_with_defaults(self.config.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    /// Where `--generate-config` writes its sample file.
    pub fn generated_config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
