use crate::config::OutputConfig;
use crate::error::{CatalogError, Result};
use crate::scanner::ProductRecord;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::path::Path;

pub const HEADER: [&str; 2] = ["Product Name", "Extension"];

/// Writes product records to a single-sheet xlsx workbook.
pub struct SpreadsheetWriter {
    sheet_name: String,
    bold_header: bool,
}

impl SpreadsheetWriter {
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            sheet_name: config.sheet_name.clone(),
            bold_header: config.bold_header,
        }
    }

    pub fn with_sheet_name<S: Into<String>>(mut self, name: S) -> Self {
        self.sheet_name = name.into();
        self
    }

    /// Writes the header row and one row per record, replacing any file at `destination`.
    pub fn write<P: AsRef<Path>>(&self, records: &[ProductRecord], destination: P) -> Result<()> {
        let destination = destination.as_ref();

        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                return Err(CatalogError::OutputDirectoryMissing {
                    path: parent.display().to_string(),
                });
            }
        }

        let mut workbook = self
            .build_workbook(records)
            .map_err(|source| write_error(destination, source))?;

        workbook
            .save(destination)
            .map_err(|source| write_error(destination, source))?;

        log::debug!(
            "Wrote {} rows to sheet '{}' in {}",
            records.len() + 1,
            self.sheet_name,
            destination.display()
        );

        Ok(())
    }

    fn build_workbook(&self, records: &[ProductRecord]) -> std::result::Result<Workbook, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.sheet_name)?;

        let header_format = if self.bold_header {
            Format::new().set_bold()
        } else {
            Format::new()
        };

        for (col, title) in (0u16..).zip(HEADER) {
            worksheet.write_string_with_format(0, col, title, &header_format)?;
        }

        // Excel drops empty strings, so a missing extension becomes a formatted blank cell.
        let blank_format = Format::new().set_num_format("@");

        for (index, record) in records.iter().enumerate() {
            let row = u32::try_from(index + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
            worksheet.write_string(row, 0, &record.name)?;
            if record.extension.is_empty() {
                worksheet.write_blank(row, 1, &blank_format)?;
            } else {
                worksheet.write_string(row, 1, &record.extension)?;
            }
        }

        worksheet.autofit();

        Ok(workbook)
    }
}

impl Default for SpreadsheetWriter {
    fn default() -> Self {
        Self::new(&OutputConfig::default())
    }
}

fn write_error(destination: &Path, source: XlsxError) -> CatalogError {
    CatalogError::Write {
        path: destination.display().to_string(),
        source,
    }
}
