pub mod catalog_report;
pub mod xlsx_writer;

pub use catalog_report::CatalogReport;
pub use xlsx_writer::{SpreadsheetWriter, HEADER};
