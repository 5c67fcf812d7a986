pub mod document;

pub use document::{Report, ReportRow, REPORT_FILE_NAME};
