//! Per-export configuration
//!
//! [`ExportOptions`] is an immutable value object describing one export run.
//! Every field has a documented default so callers may omit it entirely.

use crate::types::ExcelDataType;

/// Default format patterns applied to columns that declare none
///
/// The built-in table matches [`ExcelDataType::default_format`]; callers may
/// swap individual entries to change the fallback for a whole export run
/// without touching column declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormatDefaults {
    /// Fallback for `Date` columns (`yyyy-mm-dd`)
    pub date: String,
    /// Fallback for `Number` columns (`#,##0.00`)
    pub number: String,
    /// Fallback for `Currency` columns (`$#,##0.00`)
    pub currency: String,
    /// Fallback for `Percentage` columns (`0.00%`)
    pub percentage: String,
    /// Fallback label pair for `Boolean` columns (`Yes/No`)
    pub boolean: String,
}

impl Default for FormatDefaults {
    fn default() -> Self {
        FormatDefaults {
            date: ExcelDataType::Date.default_format().to_string(),
            number: ExcelDataType::Number.default_format().to_string(),
            currency: ExcelDataType::Currency.default_format().to_string(),
            percentage: ExcelDataType::Percentage.default_format().to_string(),
            boolean: ExcelDataType::Boolean.default_format().to_string(),
        }
    }
}

impl FormatDefaults {
    /// The fallback pattern for a data type. `String` and `Hyperlink` carry
    /// no format and return an empty pattern.
    pub fn for_type(&self, data_type: ExcelDataType) -> &str {
        match data_type {
            ExcelDataType::String | ExcelDataType::Hyperlink => "",
            ExcelDataType::Number => &self.number,
            ExcelDataType::Date => &self.date,
            ExcelDataType::Currency => &self.currency,
            ExcelDataType::Percentage => &self.percentage,
            ExcelDataType::Boolean => &self.boolean,
        }
    }
}

/// Configuration for one export run
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExportOptions {
    /// Worksheet name (default `"Sheet1"`)
    pub sheet_name: String,
    /// Emit a header row at row 1 (default `true`)
    pub include_header: bool,
    /// Size columns to their content (default `true`)
    pub auto_fit_columns: bool,
    /// Style the header row bold/colored/centered (default `true`)
    pub apply_header_formatting: bool,
    /// Header fill color as RGB (default `0x4472C4`)
    pub header_background: u32,
    /// Header font color as RGB (default `0xFFFFFF`)
    pub header_foreground: u32,
    /// Freeze panes below the header row (default `true`)
    pub freeze_header_row: bool,
    /// Apply an auto-filter across header and data (default `true`)
    pub enable_filters: bool,
    /// Clamp auto-fitted column widths, in characters (default `None`)
    pub max_column_width: Option<f64>,
    /// Per-type fallback formats for columns that declare none
    pub format_defaults: FormatDefaults,
    /// Row count above which the export validates with a warning
    /// (default `10_000`)
    pub warning_row_count: usize,
    /// Row count above which the export is rejected (default `100_000`)
    pub maximum_row_count: usize,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            sheet_name: "Sheet1".to_string(),
            include_header: true,
            auto_fit_columns: true,
            apply_header_formatting: true,
            header_background: 0x4472C4,
            header_foreground: 0xFFFFFF,
            freeze_header_row: true,
            enable_filters: true,
            max_column_width: None,
            format_defaults: FormatDefaults::default(),
            warning_row_count: 10_000,
            maximum_row_count: 100_000,
        }
    }
}

impl ExportOptions {
    /// Options with every documented default
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the worksheet name
    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }

    /// Enable or disable the header row
    pub fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Enable or disable content-based column sizing
    pub fn with_auto_fit(mut self, auto_fit: bool) -> Self {
        self.auto_fit_columns = auto_fit;
        self
    }

    /// Enable or disable header styling
    pub fn with_header_formatting(mut self, apply: bool) -> Self {
        self.apply_header_formatting = apply;
        self
    }

    /// Set the header fill and font colors (RGB)
    pub fn with_header_colors(mut self, background: u32, foreground: u32) -> Self {
        self.header_background = background;
        self.header_foreground = foreground;
        self
    }

    /// Enable or disable freezing the header row
    pub fn with_frozen_header(mut self, freeze: bool) -> Self {
        self.freeze_header_row = freeze;
        self
    }

    /// Enable or disable the auto-filter
    pub fn with_filters(mut self, enable: bool) -> Self {
        self.enable_filters = enable;
        self
    }

    /// Clamp auto-fitted column widths
    pub fn with_max_column_width(mut self, width: f64) -> Self {
        self.max_column_width = Some(width);
        self
    }

    /// Replace the per-type fallback formats
    pub fn with_format_defaults(mut self, defaults: FormatDefaults) -> Self {
        self.format_defaults = defaults;
        self
    }

    /// Set the warning and maximum row-count thresholds
    pub fn with_row_limits(mut self, warning: usize, maximum: usize) -> Self {
        self.warning_row_count = warning;
        self.maximum_row_count = maximum;
        self
    }
}
