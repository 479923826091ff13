//! Error types for the excelreport library

use thiserror::Error;

/// Result type alias for excelreport operations
pub type Result<T> = std::result::Result<T, ExportError>;

/// Main error type for all export operations
#[derive(Error, Debug)]
pub enum ExportError {
    /// The record type declares no exportable columns and therefore cannot
    /// be exported. Raised at schema-resolution time, before any row is read.
    #[error("Type '{type_name}' is not a valid export type: it declares no exportable columns")]
    InvalidExportType { type_name: &'static str },

    /// The batch exceeds the configured maximum row count. Raised after size
    /// validation, before any workbook is created.
    #[error(
        "Export rejected: {row_count} rows exceeds the maximum of {maximum}. \
         Please filter the data to reduce the number of rows and try again"
    )]
    ExportRejected { row_count: usize, maximum: usize },

    /// The spreadsheet engine could not produce the output stream
    #[error("Failed to serialize workbook: {0}")]
    Serialization(String),
}

impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ExportError::Serialization(err.to_string())
    }
}
