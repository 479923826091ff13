//! Export orchestration
//!
//! [`ExcelReportWriter`] sequences a full export run: pre-export hooks,
//! schema resolution, the size gate, header and row emission, the
//! presentation pass, and binary serialization. Everything created during a
//! run (workbook, formats, buffer) is scoped to that call.
//!
//! # Examples
//!
//! ```
//! use excelreport::{CellData, Column, ExcelDataType, ExcelReportWriter, ExportRow};
//! use chrono::{DateTime, Utc};
//!
//! struct Payment {
//!     reference: String,
//!     amount: f64,
//!     exported_at: Option<DateTime<Utc>>,
//! }
//!
//! impl ExportRow for Payment {
//!     fn columns() -> Vec<Column<Self>> {
//!         vec![
//!             Column::new("Reference", ExcelDataType::String, |r: &Payment| {
//!                 CellData::from(r.reference.clone())
//!             })
//!             .order(1),
//!             Column::new("Amount", ExcelDataType::Currency, |r: &Payment| {
//!                 CellData::from(r.amount)
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
//! let rows = vec![Payment {
//!     reference: "INV-001".to_string(),
//!     amount: 1250.0,
//!     exported_at: None,
//! }];
//!
//! let bytes = ExcelReportWriter::default().generate(rows)?;
//! assert_eq!(&bytes[0..2], b"PK");
//! # Ok(())
//! # }
//! ```

use crate::error::{ExportError, Result};
use crate::format::{classify, render_display, CellWrite};
use crate::options::ExportOptions;
use crate::row::ExportRow;
use crate::schema::{schema_of, Schema};
use crate::validate::{check_row_count, SizeCheck};
use rust_xlsxwriter::{
    Format, FormatAlign, FormatUnderline, Url, Workbook, Worksheet,
};
use tracing::debug;

// XLSX limit for a column width in character units.
const MAX_XLSX_COLUMN_WIDTH: f64 = 255.0;
const COLUMN_PADDING: f64 = 2.0;

/// Top-level export entry point, configured once per set of options
#[derive(Debug, Clone, Default)]
pub struct ExcelReportWriter {
    options: ExportOptions,
}

impl ExcelReportWriter {
    /// Writer with the given options
    pub fn new(options: ExportOptions) -> Self {
        ExcelReportWriter { options }
    }

    /// The active options
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Run a full export and return the XLSX bytes.
    ///
    /// # Errors
    ///
    /// - [`ExportError::InvalidExportType`] when `T` declares no exportable
    ///   columns;
    /// - [`ExportError::ExportRejected`] when the batch exceeds the maximum
    ///   row count (no workbook is created);
    /// - [`ExportError::Serialization`] when the spreadsheet engine fails.
    pub fn generate<T: ExportRow>(&self, rows: Vec<T>) -> Result<Vec<u8>> {
        self.generate_with_check(rows).map(|(bytes, _)| bytes)
    }

    /// Like [`generate`](Self::generate), but also returns the size-gate
    /// outcome so callers can surface the warning tier for large batches.
    pub fn generate_with_check<T: ExportRow>(
        &self,
        mut rows: Vec<T>,
    ) -> Result<(Vec<u8>, SizeCheck)> {
        for row in rows.iter_mut() {
            row.prepare_for_export();
        }

        let schema = schema_of::<T>()?;

        let check = check_row_count(rows.len(), &self.options);
        if !check.is_valid {
            return Err(ExportError::ExportRejected {
                row_count: rows.len(),
                maximum: self.options.maximum_row_count,
            });
        }

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.options.sheet_name)?;

        let mut widths = vec![0usize; schema.len()];

        let mut next_row: u32 = 0;
        let header_written = self.options.include_header;
        if header_written {
            self.write_header(worksheet, &schema, &mut widths)?;
            next_row = 1;
        }

        let link_format = Format::new()
            .set_underline(FormatUnderline::Single)
            .set_font_color(0x0000FF);

        for record in &rows {
            self.write_record(worksheet, &schema, record, next_row, &link_format, &mut widths)?;
            next_row += 1;
        }

        self.apply_presentation(worksheet, &schema, rows.len(), header_written, &widths)?;

        let buffer = workbook.save_to_buffer()?;
        debug!(
            rows = rows.len(),
            columns = schema.len(),
            bytes = buffer.len(),
            sheet = self.options.sheet_name.as_str(),
            "export generated"
        );

        Ok((buffer, check))
    }

    fn write_header<T: ExportRow>(
        &self,
        worksheet: &mut Worksheet,
        schema: &Schema<T>,
        widths: &mut [usize],
    ) -> Result<()> {
        let header_format = Format::new()
            .set_bold()
            .set_align(FormatAlign::Center)
            .set_background_color(self.options.header_background)
            .set_font_color(self.options.header_foreground);

        for (idx, column) in schema.columns().iter().enumerate() {
            let col = idx as u16;
            if self.options.apply_header_formatting {
                worksheet.write_string_with_format(0, col, &column.display_name, &header_format)?;
            } else {
                worksheet.write_string(0, col, &column.display_name)?;
            }
            widths[idx] = widths[idx].max(column.display_name.chars().count());
        }

        Ok(())
    }

    fn write_record<T: ExportRow>(
        &self,
        worksheet: &mut Worksheet,
        schema: &Schema<T>,
        record: &T,
        row: u32,
        link_format: &Format,
        widths: &mut [usize],
    ) -> Result<()> {
        for (idx, column) in schema.columns().iter().enumerate() {
            let col = idx as u16;
            let value = column.value_of(record);
            let format = column.effective_format(&self.options.format_defaults);

            widths[idx] = widths[idx].max(
                render_display(&value, column.data_type, format)
                    .chars()
                    .count(),
            );

            match classify(&value, column.data_type, format) {
                CellWrite::Empty => {}
                CellWrite::Text(text) => {
                    worksheet.write_string(row, col, &text)?;
                }
                CellWrite::Number { value, format } => {
                    let cell_format = Format::new().set_num_format(&format);
                    worksheet.write_number_with_format(row, col, value, &cell_format)?;
                }
                CellWrite::Date { value, format } => {
                    let cell_format = Format::new().set_num_format(&format);
                    worksheet.write_datetime_with_format(row, col, &value, &cell_format)?;
                }
                CellWrite::Hyperlink(target) => {
                    let url = Url::new(target.clone()).set_text(target);
                    worksheet.write_url_with_format(row, col, url, link_format)?;
                }
            }
        }

        Ok(())
    }

    fn write_column_widths(&self, worksheet: &mut Worksheet, widths: &[usize]) -> Result<()> {
        for (idx, chars) in widths.iter().enumerate() {
            let mut width = *chars as f64 + COLUMN_PADDING;
            if let Some(max) = self.options.max_column_width {
                width = width.min(max);
            }
            width = width.min(MAX_XLSX_COLUMN_WIDTH);
            worksheet.set_column_width(idx as u16, width)?;
        }
        Ok(())
    }

    fn apply_presentation<T: ExportRow>(
        &self,
        worksheet: &mut Worksheet,
        schema: &Schema<T>,
        data_rows: usize,
        header_written: bool,
        widths: &[usize],
    ) -> Result<()> {
        if self.options.auto_fit_columns {
            self.write_column_widths(worksheet, widths)?;
        }

        if self.options.freeze_header_row && header_written {
            worksheet.set_freeze_panes(1, 0)?;
        }

        if self.options.enable_filters && data_rows > 0 {
            let first_row = 0;
            let last_row = if header_written {
                data_rows as u32
            } else {
                data_rows as u32 - 1
            };
            let last_col = schema.len() as u16 - 1;
            worksheet.autofilter(first_row, 0, last_row, last_col)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Column;
    use crate::types::{CellData, ExcelDataType};
    use chrono::{DateTime, Utc};

    struct Shipment {
        tracking: String,
        weight_kg: f64,
        exported_at: Option<DateTime<Utc>>,
    }

    impl ExportRow for Shipment {
        fn columns() -> Vec<Column<Self>> {
            vec![
                Column::new("Tracking", ExcelDataType::String, |r: &Shipment| {
                    CellData::from(r.tracking.clone())
                })
                .order(1),
                Column::new("Weight (kg)", ExcelDataType::Number, |r: &Shipment| {
                    CellData::from(r.weight_kg)
                })
                .order(2),
            ]
        }

        fn exported_at_mut(&mut self) -> &mut Option<DateTime<Utc>> {
            &mut self.exported_at
        }
    }

    fn shipments(count: usize) -> Vec<Shipment> {
        (0..count)
            .map(|i| Shipment {
                tracking: format!("TRK-{i:04}"),
                weight_kg: i as f64 * 0.5,
                exported_at: None,
            })
            .collect()
    }

    #[test]
    fn test_generate_produces_xlsx_bytes() {
        let bytes = ExcelReportWriter::default().generate(shipments(3)).unwrap();
        assert!(bytes.len() > 100);
        assert_eq!(&bytes[0..2], b"PK");
    }

    #[test]
    fn test_empty_batch_is_fine() {
        let bytes = ExcelReportWriter::default().generate(shipments(0)).unwrap();
        assert_eq!(&bytes[0..2], b"PK");
    }

    #[test]
    fn test_oversized_batch_is_rejected() {
        let writer = ExcelReportWriter::new(ExportOptions::new().with_row_limits(10, 20));
        let err = writer.generate(shipments(25)).unwrap_err();
        match err {
            ExportError::ExportRejected { row_count, maximum } => {
                assert_eq!(row_count, 25);
                assert_eq!(maximum, 20);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_warning_tier_still_generates() {
        let writer = ExcelReportWriter::new(ExportOptions::new().with_row_limits(10, 20));
        let (bytes, check) = writer.generate_with_check(shipments(15)).unwrap();
        assert_eq!(&bytes[0..2], b"PK");
        assert!(check.is_valid);
        assert!(check.has_warning);
        assert_eq!(check.row_count, 15);
    }

    #[test]
    fn test_custom_sheet_name_and_no_header() {
        let writer = ExcelReportWriter::new(
            ExportOptions::new()
                .with_sheet_name("Shipments")
                .with_header(false)
                .with_filters(false)
                .with_frozen_header(false),
        );
        let bytes = writer.generate(shipments(2)).unwrap();
        assert_eq!(&bytes[0..2], b"PK");
    }
}
