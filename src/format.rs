//! Value formatting
//!
//! Turns a raw [`CellData`] into what the target cell needs: a rendered
//! display string and a native-cell classification. Dispatch is an
//! exhaustive match on the column's [`ExcelDataType`], so every semantic
//! type has a defined rendering.
//!
//! A value that does not match its column's declared type never fails the
//! export: it degrades to its default string form and the cell is written as
//! plain text. Missing values render as empty cells regardless of declared
//! type.

use crate::types::{CellData, ExcelDataType};
use chrono::NaiveDateTime;
use std::fmt::Write as _;
use tracing::debug;

/// Native-cell classification of one value
///
/// Tells the orchestrator what to store in the cell so that numbers stay
/// numbers (sortable, usable in formulas) and the format string is applied
/// as the cell's number format rather than baked into the text.
#[derive(Debug, Clone, PartialEq)]
pub enum CellWrite {
    /// Write nothing
    Empty,
    /// Plain text
    Text(String),
    /// True numeric cell with a number format
    Number { value: f64, format: String },
    /// Native date/time cell with a number format
    Date { value: NaiveDateTime, format: String },
    /// Clickable link; the string is both visible text and target
    Hyperlink(String),
}

/// Render the display string for a value under its column's declared type
/// and effective format pattern.
pub fn render_display(value: &CellData, data_type: ExcelDataType, format: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    match data_type {
        ExcelDataType::Date => match value {
            CellData::DateTime(dt) => render_date(*dt, format)
                .unwrap_or_else(|| degrade(value, data_type)),
            _ => degrade(value, data_type),
        },
        ExcelDataType::Number | ExcelDataType::Currency | ExcelDataType::Percentage => {
            match value.as_f64() {
                Some(n) => render_number(n, format),
                None => degrade(value, data_type),
            }
        }
        ExcelDataType::Boolean => match value {
            CellData::Bool(b) => bool_label(*b, format).to_string(),
            _ => degrade(value, data_type),
        },
        ExcelDataType::Hyperlink => value.as_string(),
        ExcelDataType::String => value.as_string(),
    }
}

/// Classify a value for native-cell placement.
pub fn classify(value: &CellData, data_type: ExcelDataType, format: &str) -> CellWrite {
    if value.is_empty() {
        return CellWrite::Empty;
    }

    match data_type {
        ExcelDataType::Date => match value {
            CellData::DateTime(dt) => CellWrite::Date {
                value: *dt,
                format: format.to_string(),
            },
            _ => CellWrite::Text(degrade(value, data_type)),
        },
        ExcelDataType::Number | ExcelDataType::Currency | ExcelDataType::Percentage => {
            match value.as_f64() {
                Some(n) => CellWrite::Number {
                    value: n,
                    format: format.to_string(),
                },
                None => CellWrite::Text(degrade(value, data_type)),
            }
        }
        ExcelDataType::Boolean => match value {
            CellData::Bool(b) => CellWrite::Text(bool_label(*b, format).to_string()),
            _ => CellWrite::Text(degrade(value, data_type)),
        },
        ExcelDataType::Hyperlink => {
            let target = value.as_string();
            if target.is_empty() {
                CellWrite::Empty
            } else {
                CellWrite::Hyperlink(target)
            }
        }
        ExcelDataType::String => CellWrite::Text(value.as_string()),
    }
}

/// Fall back to the value's default string form on a type mismatch.
fn degrade(value: &CellData, data_type: ExcelDataType) -> String {
    let rendered = value.as_string();
    debug!(
        ?data_type,
        value = rendered.as_str(),
        "cell value does not match its declared type, rendered as plain text"
    );
    rendered
}

/// Render a date through an Excel-style pattern. `None` when the pattern
/// translates to something chrono cannot format.
fn render_date(value: NaiveDateTime, pattern: &str) -> Option<String> {
    let strftime = date_pattern_to_strftime(pattern);
    let mut out = String::new();
    write!(out, "{}", value.format(&strftime)).ok()?;
    Some(out)
}

/// Translate an Excel-style date pattern (`yyyy-mm-dd hh:mm:ss`) to a
/// strftime pattern. `m` runs count as minutes when they follow an hour
/// token, months otherwise.
fn date_pattern_to_strftime(pattern: &str) -> String {
    let mut out = String::new();
    let chars: Vec<char> = pattern.chars().collect();
    let mut i = 0;
    let mut after_hours = false;

    while i < chars.len() {
        let ch = chars[i];
        let mut run = 1;
        while i + run < chars.len() && chars[i + run] == ch {
            run += 1;
        }

        match ch {
            'y' | 'Y' => {
                out.push_str(if run >= 4 { "%Y" } else { "%y" });
                after_hours = false;
            }
            'm' | 'M' => {
                if after_hours {
                    out.push_str("%M");
                } else {
                    out.push_str("%m");
                }
            }
            'd' | 'D' => {
                out.push_str("%d");
                after_hours = false;
            }
            'h' | 'H' => {
                out.push_str("%H");
                after_hours = true;
            }
            's' | 'S' => out.push_str("%S"),
            '%' => out.push_str("%%"),
            other => {
                for _ in 0..run {
                    out.push(other);
                }
            }
        }
        i += run;
    }

    out
}

/// Two-state label from a `True/False`-style pattern. Malformed patterns
/// fall back to `Yes`/`No`.
fn bool_label(value: bool, pattern: &str) -> &str {
    let mut parts = pattern.splitn(2, '/');
    match (parts.next(), parts.next()) {
        (Some(yes), Some(no)) if !yes.is_empty() && !no.is_empty() => {
            if value {
                yes
            } else {
                no
            }
        }
        _ => {
            if value {
                "Yes"
            } else {
                "No"
            }
        }
    }
}

/// Shape parsed out of a numeric pattern like `$#,##0.00` or `0.00%`
struct NumberPattern {
    prefix: String,
    suffix: String,
    decimals: usize,
    grouped: bool,
    percent: bool,
}

fn parse_number_pattern(pattern: &str) -> Option<NumberPattern> {
    let is_digit_char = |c: char| matches!(c, '#' | '0' | ',' | '.');
    let first = pattern.find(is_digit_char)?;
    let last = pattern.rfind(is_digit_char)?;

    let core = &pattern[first..=last];
    let decimals = core
        .rsplit_once('.')
        .map(|(_, frac)| frac.chars().filter(|c| matches!(c, '#' | '0')).count())
        .unwrap_or(0);

    Some(NumberPattern {
        prefix: pattern[..first].to_string(),
        suffix: pattern[last + 1..].to_string(),
        decimals,
        grouped: core.contains(','),
        percent: pattern[last + 1..].contains('%'),
    })
}

/// Render a numeric value through a numeric pattern. Patterns with no
/// numeric placeholders fall back to the plain value.
fn render_number(value: f64, pattern: &str) -> String {
    let Some(shape) = parse_number_pattern(pattern) else {
        return value.to_string();
    };

    let scaled = if shape.percent { value * 100.0 } else { value };
    let body = format!("{:.*}", shape.decimals, scaled.abs());
    let (int_part, frac_part) = match body.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (body, None),
    };

    let mut out = String::new();
    if scaled < 0.0 {
        out.push('-');
    }
    out.push_str(&shape.prefix);
    if shape.grouped {
        out.push_str(&group_thousands(&int_part));
    } else {
        out.push_str(&int_part);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(&frac);
    }
    out.push_str(&shape.suffix);
    out
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(14, 30, 5)
            .unwrap()
    }

    #[test]
    fn test_date_rendering() {
        let value = CellData::DateTime(dt(2026, 3, 7));
        assert_eq!(
            render_display(&value, ExcelDataType::Date, "yyyy-mm-dd"),
            "2026-03-07"
        );
        assert_eq!(
            render_display(&value, ExcelDataType::Date, "yyyy-mm-dd hh:mm:ss"),
            "2026-03-07 14:30:05"
        );
        assert_eq!(
            render_display(&value, ExcelDataType::Date, "dd/mm/yyyy"),
            "07/03/2026"
        );
    }

    #[test]
    fn test_date_mismatch_degrades() {
        let value = CellData::Text("not a date".to_string());
        assert_eq!(
            render_display(&value, ExcelDataType::Date, "yyyy-mm-dd"),
            "not a date"
        );
        assert_eq!(
            classify(&value, ExcelDataType::Date, "yyyy-mm-dd"),
            CellWrite::Text("not a date".to_string())
        );
    }

    #[test]
    fn test_currency_rendering() {
        let value = CellData::Float(1234.5);
        assert_eq!(
            render_display(&value, ExcelDataType::Currency, "$#,##0.00"),
            "$1,234.50"
        );
        assert_eq!(
            render_display(&CellData::Float(-1234.5), ExcelDataType::Currency, "$#,##0.00"),
            "-$1,234.50"
        );
    }

    #[test]
    fn test_number_rendering() {
        assert_eq!(
            render_display(&CellData::Int(1000000), ExcelDataType::Number, "#,##0.00"),
            "1,000,000.00"
        );
        assert_eq!(
            render_display(&CellData::Float(3.14159), ExcelDataType::Number, "0.00"),
            "3.14"
        );
    }

    #[test]
    fn test_percentage_rendering_scales() {
        assert_eq!(
            render_display(&CellData::Float(0.1575), ExcelDataType::Percentage, "0.00%"),
            "15.75%"
        );
    }

    #[test]
    fn test_numeric_mismatch_degrades() {
        let value = CellData::Text("n/a".to_string());
        assert_eq!(
            render_display(&value, ExcelDataType::Number, "#,##0.00"),
            "n/a"
        );
    }

    #[test]
    fn test_boolean_labels() {
        let yes = CellData::Bool(true);
        let no = CellData::Bool(false);
        assert_eq!(render_display(&yes, ExcelDataType::Boolean, "Yes/No"), "Yes");
        assert_eq!(render_display(&no, ExcelDataType::Boolean, "Yes/No"), "No");
        assert_eq!(
            render_display(&yes, ExcelDataType::Boolean, "Active/Inactive"),
            "Active"
        );
        // Malformed pattern falls back to Yes/No
        assert_eq!(render_display(&no, ExcelDataType::Boolean, ""), "No");
    }

    #[test]
    fn test_boolean_mismatch_degrades() {
        assert_eq!(
            render_display(&CellData::Int(1), ExcelDataType::Boolean, "Yes/No"),
            "1"
        );
    }

    #[test]
    fn test_empty_is_empty_for_every_type() {
        for data_type in [
            ExcelDataType::String,
            ExcelDataType::Number,
            ExcelDataType::Date,
            ExcelDataType::Currency,
            ExcelDataType::Percentage,
            ExcelDataType::Boolean,
            ExcelDataType::Hyperlink,
        ] {
            assert_eq!(render_display(&CellData::Empty, data_type, ""), "");
            assert_eq!(classify(&CellData::Empty, data_type, ""), CellWrite::Empty);
        }
    }

    #[test]
    fn test_classify_numbers_stay_native() {
        let write = classify(&CellData::Int(42), ExcelDataType::Currency, "$#,##0.00");
        assert_eq!(
            write,
            CellWrite::Number {
                value: 42.0,
                format: "$#,##0.00".to_string()
            }
        );
    }

    #[test]
    fn test_classify_hyperlink() {
        let value = CellData::Text("https://example.com/doc/42".to_string());
        assert_eq!(
            classify(&value, ExcelDataType::Hyperlink, ""),
            CellWrite::Hyperlink("https://example.com/doc/42".to_string())
        );
        assert_eq!(
            classify(&CellData::Text(String::new()), ExcelDataType::Hyperlink, ""),
            CellWrite::Empty
        );
    }

    #[test]
    fn test_pattern_translation() {
        assert_eq!(date_pattern_to_strftime("yyyy-mm-dd"), "%Y-%m-%d");
        assert_eq!(
            date_pattern_to_strftime("yyyy-mm-dd hh:mm:ss"),
            "%Y-%m-%d %H:%M:%S"
        );
        assert_eq!(date_pattern_to_strftime("dd.mm.yy"), "%d.%m.%y");
    }
}
