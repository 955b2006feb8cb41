use crate::archive::ExtractionProgress;
use crate::config::Config;
use crate::scanner::ProductRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

const NO_EXTENSION: &str = "no_extension";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogReport {
    pub archive: String,
    pub extraction_dir: String,
    pub spreadsheet: String,
    pub sheet_name: String,
    pub files_extracted: usize,
    pub entries_skipped: Vec<String>,
    pub record_count: usize,
    pub records_by_extension: BTreeMap<String, usize>,
    pub duration: Duration,
    pub generated_at: DateTime<Utc>,
}

impl CatalogReport {
    pub fn new(
        config: &Config,
        extraction: &ExtractionProgress,
        records: &[ProductRecord],
        duration: Duration,
    ) -> Self {
        Self {
            archive: config.archive.path.display().to_string(),
            extraction_dir: config.archive.extraction_dir.display().to_string(),
            spreadsheet: config.output.spreadsheet.display().to_string(),
            sheet_name: config.output.sheet_name.clone(),
            files_extracted: extraction.files_written,
            entries_skipped: extraction.skipped_entries.clone(),
            record_count: records.len(),
            records_by_extension: count_by_extension(records),
            duration,
            generated_at: Utc::now(),
        }
    }
}

pub fn count_by_extension(records: &[ProductRecord]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        let key = if record.has_extension() {
            record.extension.to_lowercase()
        } else {
            NO_EXTENSION.to_string()
        };
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_by_extension() {
        let records = vec![
            ProductRecord::new("cat", ".png"),
            ProductRecord::new("dog", ".PNG"),
            ProductRecord::new("fox", ".jpg"),
            ProductRecord::new("README", ""),
        ];

        let counts = count_by_extension(&records);
        assert_eq!(counts.get(".png"), Some(&2));
        assert_eq!(counts.get(".jpg"), Some(&1));
        assert_eq!(counts.get(NO_EXTENSION), Some(&1));
    }

    #[test]
    fn test_report_from_run() {
        let config = Config::default();
        let mut extraction = ExtractionProgress::new(3);
        extraction.files_written = 2;
        extraction.skipped_entries.push("../evil".to_string());
        let records = vec![
            ProductRecord::new("cat", ".png"),
            ProductRecord::new("dog", ".jpg"),
        ];

        let report = CatalogReport::new(&config, &extraction, &records, Duration::from_millis(5));

        assert_eq!(report.record_count, 2);
        assert_eq!(report.files_extracted, 2);
        assert_eq!(report.entries_skipped.len(), 1);
        assert_eq!(report.sheet_name, "Products");

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"record_count\":2"));
    }
}
