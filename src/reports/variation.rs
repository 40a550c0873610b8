//! Close-to-close percentage changes shared by the on-screen report and the
//! spreadsheet export.

use rust_decimal::Decimal;

use crate::error::ReportError;
use crate::models::TimeSeriesRow;

/// `(current - previous) / previous * 100`, or None when `previous` is zero
pub fn pct_change(previous: Decimal, current: Decimal) -> Option<Decimal> {
    (current - previous)
        .checked_div(previous)?
        .checked_mul(Decimal::ONE_HUNDRED)
}

/// Daily change of each row against the prior row's close.
///
/// Always the same length as `rows`; the first entry is None since there is
/// no prior close.
pub fn daily_changes(rows: &[TimeSeriesRow]) -> Vec<Option<Decimal>> {
    let mut changes = Vec::with_capacity(rows.len());
    let mut previous: Option<Decimal> = None;

    for row in rows {
        changes.push(previous.and_then(|prev| pct_change(prev, row.close)));
        previous = Some(row.close);
    }

    changes
}

/// Change from the first to the last close of the period
pub fn period_change_pct(rows: &[TimeSeriesRow]) -> Result<Decimal, ReportError> {
    let (first, last) = match (rows.first(), rows.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(ReportError::empty()),
    };

    if first.close.is_zero() {
        return Err(ReportError::DivisionUndefined);
    }

    pct_change(first.close, last.close).ok_or(ReportError::DivisionUndefined)
}
