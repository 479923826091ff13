//! # excelreport
//!
//! A declarative, schema-driven XLSX export library.
//!
//! Record types declare their columns once (display name, semantic data
//! type, format, order); the library resolves and caches the schema per
//! type, formats every value according to its declared type, gates the run
//! by row count, and hands back the finished workbook as a byte buffer --
//! ready to stream as an HTTP download or write to disk.
//!
//! ## Features
//!
//! - **Declarative columns**: one column table per record type, sorted and
//!   cached on first use
//! - **Typed cells**: numbers and dates are written as native cell values
//!   with the format applied as a number format, so sorting and formulas
//!   keep working in the generated sheet
//! - **Graceful degradation**: a mismatched value renders as plain text
//!   instead of failing the export
//! - **Size gates**: configurable warning and rejection thresholds on the
//!   batch row count
//! - **Presentation pass**: header styling, frozen header row, auto-filter,
//!   content-sized columns with an optional width clamp
//!
//! ## Quick Start
//!
//! ```rust
//! use excelreport::{
//!     CellData, Column, ExcelDataType, ExcelReportWriter, ExportOptions, ExportRow,
//! };
//! use chrono::{DateTime, Utc};
//!
//! struct Document {
//!     title: String,
//!     size_kb: f64,
//!     exported_at: Option<DateTime<Utc>>,
//! }
//!
//! impl ExportRow for Document {
//!     fn columns() -> Vec<Column<Self>> {
//!         vec![
//!             Column::new("Title", ExcelDataType::String, |r: &Document| {
//!                 CellData::from(r.title.clone())
//!             })
//!             .order(1),
//!             Column::new("Size (KB)", ExcelDataType::Number, |r: &Document| {
//!                 CellData::from(r.size_kb)
//!             })
//!             .order(2),
//!         ]
//!     }
//!
//!     fn exported_at_mut(&mut self) -> &mut Option<DateTime<Utc>> {
//!         &mut self.exported_at
//!     }
//! }
//!
//! # fn main() -> excelreport::Result<()> {
//! let documents = vec![
//!     Document { title: "Annual report".into(), size_kb: 482.0, exported_at: None },
//!     Document { title: "Meeting notes".into(), size_kb: 12.5, exported_at: None },
//! ];
//!
//! let writer = ExcelReportWriter::new(ExportOptions::new().with_sheet_name("Documents"));
//! let bytes = writer.generate(documents)?;
//! // `bytes` is a complete .xlsx file
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod export;
pub mod format;
pub mod options;
pub mod row;
pub mod schema;
pub mod types;
pub mod validate;

pub use error::{ExportError, Result};
pub use export::ExcelReportWriter;
pub use format::{classify, render_display, CellWrite};
pub use options::{ExportOptions, FormatDefaults};
pub use row::{ExportRow, RowValidation};
pub use schema::{clear_schema_cache, schema_of, Column, Schema};
pub use types::{CellData, ExcelDataType};
pub use validate::{check_row_count, SizeCheck};
