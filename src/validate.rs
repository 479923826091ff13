//! Size-based validation gate
//!
//! A pure function over the candidate row count and the configured
//! thresholds. The export pipeline refuses to proceed when the outcome is
//! invalid; the warning tier is surfaced so callers can decide whether a
//! large (potentially slow) export should go ahead.

use crate::options::ExportOptions;

/// Outcome of the size gate for one candidate batch
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SizeCheck {
    /// Whether the batch may be exported at all
    pub is_valid: bool,
    /// Whether the batch is large enough to warrant a caller prompt
    pub has_warning: bool,
    /// Number of rows in the candidate batch
    pub row_count: usize,
    /// Caller-facing explanation for the rejection or warning tier
    pub message: Option<String>,
}

impl SizeCheck {
    /// A clean pass with no warning
    fn ok(row_count: usize) -> Self {
        SizeCheck {
            is_valid: true,
            has_warning: false,
            row_count,
            message: None,
        }
    }
}

/// Gate a candidate batch by row count.
///
/// Rules, in order:
/// 1. above `maximum_row_count` — invalid; the message names the actual and
///    allowed counts and tells the caller to filter the data;
/// 2. above `warning_row_count` — valid with a warning about slow
///    generation; the caller decides whether to proceed;
/// 3. otherwise — valid, no warning, no message.
pub fn check_row_count(row_count: usize, options: &ExportOptions) -> SizeCheck {
    if row_count > options.maximum_row_count {
        return SizeCheck {
            is_valid: false,
            has_warning: false,
            row_count,
            message: Some(format!(
                "The export contains {} rows, which exceeds the maximum of {}. \
                 Please filter the data to reduce the number of rows",
                row_count, options.maximum_row_count
            )),
        };
    }

    if row_count > options.warning_row_count {
        return SizeCheck {
            is_valid: true,
            has_warning: true,
            row_count,
            message: Some(format!(
                "The export contains {} rows, which is above {} and may be slow \
                 to generate. Consider filtering the data before proceeding",
                row_count, options.warning_row_count
            )),
        };
    }

    SizeCheck::ok(row_count)
}
