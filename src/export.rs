//! Spreadsheet export of daily history
//!
//! Writes one worksheet with a header row followed by one row per trading
//! day. Prices and volume are stored as numbers; the daily variation is
//! stored as a fraction with a `0.00%` number format so the spreadsheet
//! application renders it as a percentage.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::{Format, Workbook};
use tracing::{debug, info};

use crate::error::ReportError;
use crate::models::TimeSeriesRow;
use crate::reports::daily_changes;
use crate::utils::{sanitize_name, sheet_name};

/// MIME type of the exported document
pub const XLSX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Header row of the exported sheet. "Price" holds the close.
pub const EXPORT_COLUMNS: [&str; 7] = [
    "Date",
    "Price",
    "High",
    "Low",
    "Open",
    "Variation (%)",
    "Volume",
];

pub const DEFAULT_COLUMN_WIDTH: f64 = 15.0;

const VARIATION_COL: u16 = 5;

/// Writes history rows to an in-memory xlsx document
#[derive(Debug, Clone)]
pub struct SpreadsheetExporter {
    column_width: f64,
}

impl Default for SpreadsheetExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl SpreadsheetExporter {
    pub fn new() -> Self {
        Self {
            column_width: DEFAULT_COLUMN_WIDTH,
        }
    }

    pub fn with_column_width(column_width: f64) -> Self {
        Self { column_width }
    }

    /// Serialize `rows` into xlsx bytes on a sheet named after `sheet_label`
    pub fn export(&self, rows: &[TimeSeriesRow], sheet_label: &str) -> Result<Vec<u8>, ReportError> {
        if rows.is_empty() {
            return Err(ReportError::empty());
        }

        let name = sheet_name(sheet_label);
        info!("Exporting {} rows to sheet '{}'", rows.len(), name);

        let mut workbook = Workbook::new();
        let percent = Format::new().set_num_format("0.00%");

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&name)?;

        for (col, header) in EXPORT_COLUMNS.iter().enumerate() {
            worksheet.write_string(0, col as u16, *header)?;
            worksheet.set_column_width(col as u16, self.column_width)?;
        }

        for (idx, (row, change)) in rows.iter().zip(daily_changes(rows)).enumerate() {
            let r = idx as u32 + 1;

            worksheet.write_string(r, 0, row.date.format("%Y-%m-%d").to_string())?;
            worksheet.write_number(r, 1, to_cell(row.close)?)?;
            worksheet.write_number(r, 2, to_cell(row.high)?)?;
            worksheet.write_number(r, 3, to_cell(row.low)?)?;
            worksheet.write_number(r, 4, to_cell(row.open)?)?;
            // First row has no prior close: the cell stays blank
            if let Some(pct) = change {
                let fraction = pct / Decimal::ONE_HUNDRED;
                worksheet.write_number_with_format(r, VARIATION_COL, to_cell(fraction)?, &percent)?;
            }
            worksheet.write_number(r, 6, to_cell(row.volume)?)?;
        }

        let bytes = workbook.save_to_buffer()?;
        debug!("Workbook serialized: {} bytes", bytes.len());
        Ok(bytes)
    }
}

fn to_cell(value: Decimal) -> Result<f64, ReportError> {
    value
        .to_f64()
        .ok_or_else(|| ReportError::Workbook(format!("value {} is not representable", value)))
}

/// Export with the default column width
pub fn export_xlsx(rows: &[TimeSeriesRow], sheet_label: &str) -> Result<Vec<u8>, ReportError> {
    SpreadsheetExporter::new().export(rows, sheet_label)
}

/// File name for a download: `{asset}_{start}_{end}.xlsx`, sanitized
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use finview::export::export_file_name;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
/// assert_eq!(
///     export_file_name("EUR/USD", start, end),
///     "EUR_USD_2024-01-01_2024-06-30.xlsx"
/// );
/// ```
pub fn export_file_name(asset_display_name: &str, start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "{}.xlsx",
        sanitize_name(&format!("{}_{}_{}", asset_display_name, start, end))
    )
}
