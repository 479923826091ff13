//! Core value and data-type definitions for exportable fields

use chrono::NaiveDateTime;
use std::fmt;

/// Semantic data type of an exportable column
///
/// This is a closed set: the value formatter dispatches on it with an
/// exhaustive match, so every variant has a defined rendering and a defined
/// native cell representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExcelDataType {
    /// Plain text (default)
    String,
    /// Numeric value with thousand separator (#,##0.00)
    Number,
    /// Calendar date or timestamp (yyyy-mm-dd)
    Date,
    /// Monetary amount ($#,##0.00)
    Currency,
    /// Fractional value shown as a percentage (0.00%)
    Percentage,
    /// Two-state value rendered as a label pair (Yes/No)
    Boolean,
    /// URL written as a clickable link
    Hyperlink,
}

impl ExcelDataType {
    /// Default format string assigned when a column declaration omits one.
    ///
    /// Non-empty for every type that carries a format; `String` and
    /// `Hyperlink` have no format of their own.
    pub fn default_format(&self) -> &'static str {
        match self {
            ExcelDataType::String => "",
            ExcelDataType::Number => "#,##0.00",
            ExcelDataType::Date => "yyyy-mm-dd",
            ExcelDataType::Currency => "$#,##0.00",
            ExcelDataType::Percentage => "0.00%",
            ExcelDataType::Boolean => "Yes/No",
            ExcelDataType::Hyperlink => "",
        }
    }
}

/// Raw value read from one field of an exportable record
///
/// Column accessors produce `CellData`; the value formatter decides how each
/// value is rendered and what the target cell stores based on the column's
/// declared [`ExcelDataType`].
#[derive(Debug, Clone, PartialEq)]
pub enum CellData {
    /// Missing value, written as an empty cell regardless of declared type
    Empty,
    /// Text value
    Text(String),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// Date/time value
    DateTime(NaiveDateTime),
}

impl CellData {
    /// Default string form, used whenever a value does not match its
    /// column's declared data type
    pub fn as_string(&self) -> String {
        match self {
            CellData::Empty => String::new(),
            CellData::Text(s) => s.clone(),
            CellData::Int(i) => i.to_string(),
            CellData::Float(f) => f.to_string(),
            CellData::Bool(b) => b.to_string(),
            CellData::DateTime(d) => d.to_string(),
        }
    }

    /// Check if the value is missing
    pub fn is_empty(&self) -> bool {
        matches!(self, CellData::Empty)
    }

    /// Numeric view of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellData::Int(i) => Some(*i as f64),
            CellData::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl fmt::Display for CellData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

impl From<&str> for CellData {
    fn from(s: &str) -> Self {
        CellData::Text(s.to_string())
    }
}

impl From<String> for CellData {
    fn from(s: String) -> Self {
        CellData::Text(s)
    }
}

impl From<i64> for CellData {
    fn from(i: i64) -> Self {
        CellData::Int(i)
    }
}

impl From<i32> for CellData {
    fn from(i: i32) -> Self {
        CellData::Int(i as i64)
    }
}

impl From<f64> for CellData {
    fn from(f: f64) -> Self {
        CellData::Float(f)
    }
}

impl From<bool> for CellData {
    fn from(b: bool) -> Self {
        CellData::Bool(b)
    }
}

impl From<NaiveDateTime> for CellData {
    fn from(d: NaiveDateTime) -> Self {
        CellData::DateTime(d)
    }
}

impl From<chrono::DateTime<chrono::Utc>> for CellData {
    fn from(d: chrono::DateTime<chrono::Utc>) -> Self {
        CellData::DateTime(d.naive_utc())
    }
}

impl<T: Into<CellData>> From<Option<T>> for CellData {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => CellData::Empty,
        }
    }
}
