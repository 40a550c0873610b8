//! One asset/date-range selection turned into everything the front end shows:
//! metrics, the history table, and the downloadable workbook.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::catalog::Asset;
use crate::config::AppConfig;
use crate::error::{DatasetContext, ReportError};
use crate::export::{export_file_name, SpreadsheetExporter};
use crate::models::{AssetClass, DateRange};
use crate::pricing::MarketDataProvider;
use crate::reports::{format_report, HistoryReport};

/// What the user picked
#[derive(Debug, Clone)]
pub struct Selection {
    pub class: AssetClass,
    pub asset: Asset,
    pub range: DateRange,
}

impl Selection {
    fn context(&self) -> DatasetContext {
        DatasetContext::new(self.asset.symbol, self.range)
    }
}

/// Rendered result of a selection
#[derive(Debug, Clone, Serialize)]
pub struct AssetView {
    pub class: AssetClass,
    pub asset: Asset,
    pub range: DateRange,
    pub report: HistoryReport,
    #[serde(skip)]
    pub workbook: Vec<u8>,
    pub file_name: String,
}

/// Fetch, format and export one selection.
///
/// Nothing is cached; every call starts from the provider.
pub async fn load_view<P: MarketDataProvider>(
    provider: &P,
    selection: &Selection,
    config: &AppConfig,
) -> Result<AssetView, ReportError> {
    let context = selection.context();

    if selection.range.is_empty() {
        warn!("Empty date range {} for {}", selection.range, selection.asset.symbol);
        return Err(ReportError::empty().with_context(context));
    }

    let rows = match provider
        .fetch_daily(selection.asset.symbol, &selection.range)
        .await
    {
        Ok(rows) => rows,
        Err(err) => {
            warn!("Fetching {} failed: {}", context, err);
            debug!("Provider error chain: {:?}", err);
            return Err(ReportError::ProviderFailure {
                context,
                reason: err.to_string(),
            });
        }
    };

    if rows.is_empty() {
        warn!("No rows returned for {}", context);
        return Err(ReportError::empty().with_context(context));
    }

    let report = format_report(&rows, &selection.class.display_policy())
        .map_err(|e| e.with_context(context.clone()))?;

    let workbook = SpreadsheetExporter::with_column_width(config.column_width)
        .export(&rows, selection.asset.name)
        .map_err(|e| e.with_context(context.clone()))?;

    let file_name = export_file_name(
        selection.asset.name,
        selection.range.start,
        selection.range.end,
    );

    info!(
        "Built view for {}: {} rows, {} byte workbook",
        context,
        rows.len(),
        workbook.len()
    );

    Ok(AssetView {
        class: selection.class,
        asset: selection.asset,
        range: selection.range,
        report,
        workbook,
        file_name,
    })
}

/// Message shown to the user for a failed selection
pub fn user_message(err: &ReportError, asset_name: &str) -> String {
    match err {
        ReportError::EmptyDataset { .. } => format!(
            "No data available for {} in the selected period. Try another date range.",
            asset_name
        ),
        ReportError::DivisionUndefined => format!(
            "The period change for {} cannot be computed: the first close is zero.",
            asset_name
        ),
        ReportError::ProviderFailure { reason, .. } => format!(
            "Could not retrieve data for {}: {}",
            asset_name, reason
        ),
        ReportError::Workbook(reason) => format!(
            "Could not build the spreadsheet for {}: {}",
            asset_name, reason
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        )
    }

    #[test]
    fn test_user_messages_name_the_asset() {
        let context = DatasetContext::new("BTC-USD", range());
        let errors = [
            ReportError::empty().with_context(context.clone()),
            ReportError::DivisionUndefined,
            ReportError::ProviderFailure {
                context,
                reason: "timeout".to_string(),
            },
            ReportError::Workbook("bad sheet".to_string()),
        ];

        for err in &errors {
            assert!(user_message(err, "Bitcoin").contains("Bitcoin"));
        }
        assert!(user_message(&errors[0], "Bitcoin").starts_with("No data available"));
        assert!(user_message(&errors[2], "Bitcoin").ends_with("timeout"));
    }
}
