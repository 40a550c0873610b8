//! Error handling for finview
//!
//! Defines the report error taxonomy surfaced to users and establishes a
//! unified Result type using anyhow for context chaining at the I/O edges.

use std::fmt;

use thiserror::Error;

use crate::models::DateRange;

/// Which symbol and date range a failure refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetContext {
    pub symbol: String,
    pub range: DateRange,
}

impl DatasetContext {
    pub fn new(symbol: impl Into<String>, range: DateRange) -> Self {
        Self {
            symbol: symbol.into(),
            range,
        }
    }
}

impl fmt::Display for DatasetContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} over {}", self.symbol, self.range)
    }
}

fn describe(context: &Option<DatasetContext>) -> String {
    context
        .as_ref()
        .map(|c| format!(" for {}", c))
        .unwrap_or_default()
}

/// Errors produced while building a report or spreadsheet
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReportError {
    /// No rows for the requested symbol/range
    #[error("no data available{}", describe(.context))]
    EmptyDataset { context: Option<DatasetContext> },

    /// First close of the period is zero
    #[error("period change undefined: first close is zero")]
    DivisionUndefined,

    /// Opaque upstream fetch error (full chain goes to the log)
    #[error("market data provider failed for {context}: {reason}")]
    ProviderFailure {
        context: DatasetContext,
        reason: String,
    },

    #[error("spreadsheet error: {0}")]
    Workbook(String),
}

impl ReportError {
    /// Empty dataset raised by the pure core, which does not know the symbol
    pub fn empty() -> Self {
        ReportError::EmptyDataset { context: None }
    }

    /// Attach symbol and range to an error raised without them
    pub fn with_context(self, context: DatasetContext) -> Self {
        match self {
            ReportError::EmptyDataset { context: None } => ReportError::EmptyDataset {
                context: Some(context),
            },
            other => other,
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for ReportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ReportError::Workbook(err.to_string())
    }
}

/// Result type alias for operations at the I/O edges
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        )
    }

    #[test]
    fn test_empty_dataset_message_without_context() {
        assert_eq!(ReportError::empty().to_string(), "no data available");
    }

    #[test]
    fn test_with_context_fills_empty_dataset() {
        let err = ReportError::empty().with_context(DatasetContext::new("BTC-USD", range()));
        assert_eq!(
            err.to_string(),
            "no data available for BTC-USD over 2024-01-01..2024-02-01"
        );
    }

    #[test]
    fn test_with_context_keeps_other_kinds() {
        let err = ReportError::DivisionUndefined.with_context(DatasetContext::new("X", range()));
        assert_eq!(err, ReportError::DivisionUndefined);
    }

    #[test]
    fn test_provider_failure_formatting() {
        let err = ReportError::ProviderFailure {
            context: DatasetContext::new("^GSPC", range()),
            reason: "HTTP 503".to_string(),
        };
        assert!(err.to_string().starts_with("market data provider failed for ^GSPC"));
        assert!(err.to_string().ends_with("HTTP 503"));
    }

    #[test]
    fn test_anyhow_context_chains_errors() {
        use anyhow::Context;
        let result: Result<()> = Err(anyhow::anyhow!("original error")).context("failed to fetch");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("failed to fetch"));
        assert!(format!("{:?}", err).contains("original error"));
    }
}
