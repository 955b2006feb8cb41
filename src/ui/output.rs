use crate::error::{CatalogError, UserFriendlyError};
use crate::spreadsheet::CatalogReport;
use crate::ui::progress::format_duration;
use console::{style, Emoji, Term};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

// Emojis with text fallbacks
static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static PACKAGE: Emoji = Emoji("📦 ", "> ");
static SPARKLES: Emoji = Emoji("✨ ", "* ");

pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stdout().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn success(&self, message: &str) {
        self.emit(MessageType::Success, message);
    }

    pub fn error(&self, message: &str) {
        self.emit(MessageType::Error, message);
    }

    pub fn warning(&self, message: &str) {
        self.emit(MessageType::Warning, message);
    }

    pub fn info(&self, message: &str) {
        self.emit(MessageType::Info, message);
    }

    pub fn debug(&self, message: &str) {
        self.emit(MessageType::Debug, message);
    }

    pub fn start_operation(&self, operation: &str) {
        self.emit(MessageType::Operation, operation);
    }

    pub fn print_user_friendly_error(&self, error: &CatalogError) {
        self.error(&error.user_message());

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    eprintln!();
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(&format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    self.print_json_object(&serde_json::json!({
                        "type": "suggestion",
                        "message": suggestion
                    }));
                }
                OutputMode::Plain => {
                    eprintln!("SUGGESTION: {}", suggestion);
                }
            }
        }
    }

    pub fn print_catalog_report(&self, report: &CatalogReport) {
        match self.mode {
            OutputMode::Human => {
                if !self.quiet {
                    self.print_human_report(report);
                }
            }
            OutputMode::Json => {
                let json_output =
                    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string());
                println!("{}", json_output);
            }
            OutputMode::Plain => {
                if !self.quiet {
                    self.print_plain_report(report);
                }
            }
        }
    }

    pub fn print_header(&self, title: &str) {
        if self.quiet || self.mode == OutputMode::Json {
            return;
        }

        if self.use_colors {
            println!("\n{} {}\n", SPARKLES, style(title).bold().cyan());
        } else {
            println!("=== {} ===", title);
        }
    }

    pub fn print_separator(&self) {
        if self.quiet || self.mode == OutputMode::Json {
            return;
        }

        if self.use_colors {
            println!("{}", style("─".repeat(60)).dim());
        } else {
            println!("{}", "-".repeat(60));
        }
    }

    fn should_show(&self, msg_type: MessageType) -> bool {
        match msg_type.min_verbosity() {
            None => true,
            Some(level) => !self.quiet && self.verbose_level >= level,
        }
    }

    fn emit(&self, msg_type: MessageType, message: &str) {
        if !self.should_show(msg_type) {
            return;
        }

        let line = match self.mode {
            OutputMode::Json => return self.print_json_message(msg_type.label(), message),
            OutputMode::Plain => format!("{}: {}", msg_type.plain_prefix(), message),
            OutputMode::Human if self.use_colors => self.styled(msg_type, message),
            OutputMode::Human => format!("{} {}", msg_type.symbol(), message),
        };

        if msg_type == MessageType::Error {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }

    fn styled(&self, msg_type: MessageType, message: &str) -> String {
        match msg_type {
            MessageType::Success => format!("{}{}", CHECKMARK, style(message).green().bold()),
            MessageType::Error => format!("{}{}", CROSS, style(message).red().bold()),
            MessageType::Warning => format!("{}{}", WARNING, style(message).yellow().bold()),
            MessageType::Info => format!("{}{}", INFO, style(message).cyan()),
            MessageType::Debug => format!("  {}", style(message).dim()),
            MessageType::Operation => format!("{}{}", PACKAGE, style(message).bold()),
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }

    fn print_human_report(&self, report: &CatalogReport) {
        self.print_header("Catalog Report");

        let highlight = |value: String| {
            if self.use_colors {
                style(value).cyan().bold().to_string()
            } else {
                value
            }
        };

        println!("  Archive:         {}", report.archive);
        println!("  Extracted to:    {}", report.extraction_dir);
        println!(
            "  Spreadsheet:     {} (sheet '{}')",
            report.spreadsheet, report.sheet_name
        );
        println!("  Files extracted: {}", highlight(report.files_extracted.to_string()));
        println!("  Records written: {}", highlight(report.record_count.to_string()));
        println!("  Time taken:      {}", highlight(format_duration(report.duration)));

        if !report.records_by_extension.is_empty() {
            println!();
            println!("Records by extension:");
            let mut extensions: Vec<_> = report.records_by_extension.iter().collect();
            extensions.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

            for (ext, count) in extensions {
                let display_ext = if ext == "no_extension" {
                    "no extension"
                } else {
                    ext
                };
                println!("  {}: {}", display_ext, count);
            }
        }

        if !report.entries_skipped.is_empty() {
            println!();
            println!("Skipped archive entries:");
            for entry in &report.entries_skipped {
                println!("  - {}", entry);
            }
        }

        self.print_separator();
    }

    fn print_plain_report(&self, report: &CatalogReport) {
        println!("REPORT: Catalog completed");
        println!("Archive: {}", report.archive);
        println!("Spreadsheet: {}", report.spreadsheet);
        println!("Files extracted: {}", report.files_extracted);
        println!("Records: {}", report.record_count);
        println!("Duration: {:?}", report.duration);

        if !report.entries_skipped.is_empty() {
            println!("Skipped entries: {}", report.entries_skipped.len());
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum MessageType {
    Success,
    Error,
    Warning,
    Info,
    Debug,
    Operation,
}

impl MessageType {
    /// `None` means the message is shown even in quiet mode.
    fn min_verbosity(self) -> Option<u8> {
        match self {
            MessageType::Error => None,
            MessageType::Success | MessageType::Warning | MessageType::Operation => Some(0),
            MessageType::Info => Some(1),
            MessageType::Debug => Some(2),
        }
    }

    fn label(self) -> &'static str {
        match self {
            MessageType::Success => "success",
            MessageType::Error => "error",
            MessageType::Warning => "warning",
            MessageType::Info => "info",
            MessageType::Debug => "debug",
            MessageType::Operation => "operation_start",
        }
    }

    fn plain_prefix(self) -> &'static str {
        match self {
            MessageType::Success => "SUCCESS",
            MessageType::Error => "ERROR",
            MessageType::Warning => "WARNING",
            MessageType::Info => "INFO",
            MessageType::Debug => "DEBUG",
            MessageType::Operation => "STARTING",
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            MessageType::Success => "✓",
            MessageType::Error => "✗",
            MessageType::Warning => "!",
            MessageType::Info => "i",
            MessageType::Debug => "  DEBUG:",
            MessageType::Operation => ">",
        }
    }
}
