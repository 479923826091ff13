//! The exportable record contract
//!
//! Any type that wants to be exported implements [`ExportRow`]: it declares
//! its columns, carries a reserved "exported at" slot, and gets two lifecycle
//! hooks. `prepare_for_export` runs on every record exactly once before any
//! cell is read; `validate_for_export` is available for callers that want
//! pre-export gating but is not invoked by the export pipeline itself.

use crate::schema::Column;
use chrono::{DateTime, Utc};

/// Outcome of a record's self-validation
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowValidation {
    /// Whether the record may be exported
    pub is_valid: bool,
    /// Reason for rejection, when invalid
    pub message: Option<String>,
}

impl RowValidation {
    /// A passing validation
    pub fn valid() -> Self {
        RowValidation {
            is_valid: true,
            message: None,
        }
    }

    /// A failing validation with a caller-facing reason
    pub fn invalid(message: impl Into<String>) -> Self {
        RowValidation {
            is_valid: false,
            message: Some(message.into()),
        }
    }
}

/// Contract every exportable record type satisfies
///
/// # Examples
///
/// ```
/// use excelreport::{CellData, Column, ExcelDataType, ExportRow};
/// use chrono::{DateTime, Utc};
///
/// struct Invoice {
///     customer: String,
///     amount: f64,
///     exported_at: Option<DateTime<Utc>>,
/// }
///
/// impl ExportRow for Invoice {
///     fn columns() -> Vec<Column<Self>> {
///         vec![
///             Column::new("Customer", ExcelDataType::String, |r: &Invoice| {
///                 CellData::from(r.customer.clone())
///             })
///             .order(1),
///             Column::new("Amount", ExcelDataType::Currency, |r: &Invoice| {
///                 CellData::from(r.amount)
///             })
///             .order(2),
///         ]
///     }
///
///     fn exported_at_mut(&mut self) -> &mut Option<DateTime<Utc>> {
///         &mut self.exported_at
///     }
/// }
/// ```
pub trait ExportRow: Sized + 'static {
    /// Declare the column table for this type.
    ///
    /// Order and tie-breaking, format defaulting, and filtering of
    /// non-exportable columns are handled by the schema layer; declarations
    /// may appear in any order here.
    fn columns() -> Vec<Column<Self>>;

    /// The reserved "exported at" slot present on every exportable type.
    ///
    /// The default [`prepare_for_export`](ExportRow::prepare_for_export)
    /// stamps it. It only appears in the sheet if the type declares it as a
    /// column (see [`Column::exported_at`]).
    fn exported_at_mut(&mut self) -> &mut Option<DateTime<Utc>>;

    /// Hook invoked on every record, in input order, before any cell is
    /// read. The default stamps the current time into the exported-at slot.
    fn prepare_for_export(&mut self) {
        *self.exported_at_mut() = Some(Utc::now());
    }

    /// Self-validation hook. Always valid by default; override to add domain
    /// checks. The export pipeline does not call this — callers wanting
    /// pre-export gating invoke it explicitly.
    fn validate_for_export(&self) -> RowValidation {
        RowValidation::valid()
    }
}
