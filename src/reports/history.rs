use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::error::ReportError;
use crate::models::{DisplayPolicy, TimeSeriesRow};
use crate::reports::variation::{daily_changes, period_change_pct};
use crate::utils::{format_percent, format_price, format_volume};

/// Column names of the on-screen history table, Date excluded
pub const DISPLAY_COLUMNS: [&str; 6] = ["Open", "High", "Low", "Close", "Variation (%)", "Volume"];

/// Headline figures shown above the history table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMetrics {
    pub latest_close: Decimal,
    pub latest_close_display: String,
    /// None when the first close of the period is zero
    pub period_change_pct: Option<Decimal>,
    pub period_change_display: String,
    pub latest_volume: String,
}

/// One formatted day of history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub date: NaiveDate,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub variation: String,
    pub volume: String,
}

impl DisplayRow {
    /// Column name -> display string, in `DISPLAY_COLUMNS` order.
    /// The date is the row label and is not part of the mapping.
    pub fn columns(&self) -> [(&'static str, &str); 6] {
        [
            (DISPLAY_COLUMNS[0], self.open.as_str()),
            (DISPLAY_COLUMNS[1], self.high.as_str()),
            (DISPLAY_COLUMNS[2], self.low.as_str()),
            (DISPLAY_COLUMNS[3], self.close.as_str()),
            (DISPLAY_COLUMNS[4], self.variation.as_str()),
            (DISPLAY_COLUMNS[5], self.volume.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryReport {
    pub metrics: ReportMetrics,
    pub table: Vec<DisplayRow>,
}

/// Build the metrics and the formatted history table for `rows`.
///
/// A zero first close does not fail the report: the period change is shown
/// as "N/A".
pub fn format_report(
    rows: &[TimeSeriesRow],
    policy: &DisplayPolicy,
) -> Result<HistoryReport, ReportError> {
    let last = rows.last().ok_or_else(ReportError::empty)?;

    let period_change = match period_change_pct(rows) {
        Ok(pct) => Some(pct),
        Err(ReportError::DivisionUndefined) => {
            debug!("First close is zero, period change reported as N/A");
            None
        }
        Err(err) => return Err(err),
    };

    let metrics = ReportMetrics {
        latest_close: last.close,
        latest_close_display: format_price(last.close, policy),
        period_change_pct: period_change,
        period_change_display: format_percent(period_change),
        latest_volume: format_volume(last.volume),
    };

    let table = rows
        .iter()
        .zip(daily_changes(rows))
        .map(|(row, change)| DisplayRow {
            date: row.date,
            open: format_price(row.open, policy),
            high: format_price(row.high, policy),
            low: format_price(row.low, policy),
            close: format_price(row.close, policy),
            variation: format_percent(change),
            volume: format_volume(row.volume),
        })
        .collect();

    Ok(HistoryReport { metrics, table })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AssetClass;
    use crate::utils::round_display;
    use rust_decimal_macros::dec;

    fn row(day: u32, open: Decimal, close: Decimal, volume: Decimal) -> TimeSeriesRow {
        TimeSeriesRow::new(
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open,
            open.max(close) + dec!(1),
            open.min(close) - dec!(1),
            close,
            volume,
        )
    }

    fn sample_rows() -> Vec<TimeSeriesRow> {
        vec![
            row(1, dec!(98.5), dec!(100), dec!(1500)),
            row(2, dec!(100), dec!(110), dec!(2500000)),
            row(3, dec!(110), dec!(104.5), dec!(999)),
            row(4, dec!(104.5), dec!(107.3333), dec!(3100000000)),
        ]
    }

    #[test]
    fn test_round_trip_scenario() {
        let rows = vec![
            row(1, dec!(100), dec!(100), dec!(10)),
            row(2, dec!(100), dec!(110), dec!(10)),
        ];
        let report = format_report(&rows, &DisplayPolicy::dollars()).unwrap();

        assert_eq!(report.metrics.period_change_pct, Some(dec!(10)));
        assert_eq!(report.metrics.period_change_display, "10.00%");
        assert_eq!(report.table[1].variation, "10.00%");
    }

    #[test]
    fn test_table_shape() {
        let rows = sample_rows();
        let report = format_report(&rows, &DisplayPolicy::dollars()).unwrap();

        assert_eq!(report.table.len(), rows.len());
        assert_eq!(report.table[0].variation, "N/A");
        assert!(report.table[1..].iter().all(|r| r.variation != "N/A"));
        let dates: Vec<NaiveDate> = report.table.iter().map(|r| r.date).collect();
        let expected: Vec<NaiveDate> = rows.iter().map(|r| r.date).collect();
        assert_eq!(dates, expected);
    }

    #[test]
    fn test_variation_matches_rounded_change() {
        let rows = sample_rows();
        let report = format_report(&rows, &DisplayPolicy::dollars()).unwrap();

        for i in 1..rows.len() {
            let pct = (rows[i].close - rows[i - 1].close) / rows[i - 1].close * dec!(100);
            let expected = format!("{:.2}%", round_display(pct, 2));
            assert_eq!(report.table[i].variation, expected);
        }
        assert_eq!(report.table[2].variation, "-5.00%");
    }

    #[test]
    fn test_metrics() {
        let report = format_report(&sample_rows(), &DisplayPolicy::dollars()).unwrap();

        assert_eq!(report.metrics.latest_close, dec!(107.3333));
        assert_eq!(report.metrics.latest_close_display, "$107.33");
        assert_eq!(report.metrics.period_change_display, "7.33%");
        assert_eq!(report.metrics.latest_volume, "3.10 G");
    }

    #[test]
    fn test_all_policies() {
        let rows = sample_rows();
        let cases = [
            (AssetClass::Crypto, "$107.33"),
            (AssetClass::Stock, "$107.33"),
            (AssetClass::Resource, "$107.33"),
            (AssetClass::Currency, "107.3333"),
            (AssetClass::Index, "107.33 pts"),
        ];

        for (class, expected_close) in cases {
            let report = format_report(&rows, &class.display_policy()).unwrap();
            assert_eq!(report.table[3].close, expected_close, "{:?}", class);
            assert_eq!(report.metrics.latest_close_display, expected_close);
            // Variation and volume do not depend on the policy
            assert_eq!(report.table[1].variation, "10.00%");
            assert_eq!(report.table[1].volume, "2.50 M");
        }
    }

    #[test]
    fn test_columns_mapping_excludes_date() {
        let report = format_report(&sample_rows(), &DisplayPolicy::index_points()).unwrap();
        let columns = report.table[0].columns();

        let names: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, DISPLAY_COLUMNS.to_vec());
        assert_eq!(columns[0], ("Open", "98.50 pts"));
        assert_eq!(columns[4], ("Variation (%)", "N/A"));
        assert_eq!(columns[5], ("Volume", "1.50 k"));
    }

    #[test]
    fn test_empty_rows() {
        assert_eq!(
            format_report(&[], &DisplayPolicy::dollars()),
            Err(ReportError::empty())
        );
    }

    #[test]
    fn test_zero_first_close_reports_na() {
        let rows = vec![
            row(1, dec!(1), dec!(0), dec!(5)),
            row(2, dec!(1), dec!(2), dec!(5)),
        ];
        let report = format_report(&rows, &DisplayPolicy::dollars()).unwrap();

        assert_eq!(report.metrics.period_change_pct, None);
        assert_eq!(report.metrics.period_change_display, "N/A");
        assert_eq!(report.table.len(), 2);
    }
}
