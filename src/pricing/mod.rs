// Pricing module - market data providers for daily history

pub mod yahoo;

use anyhow::Result;

use crate::models::{DateRange, TimeSeriesRow};

pub use yahoo::YahooProvider;

/// Source of daily OHLCV history.
///
/// Implementations return rows ascending by date, one per trading day inside
/// the half-open `range`. Zero rows is a valid answer (holidays, delisted or
/// unknown symbols); the caller decides how to surface it.
#[allow(async_fn_in_trait)]
pub trait MarketDataProvider {
    async fn fetch_daily(&self, symbol: &str, range: &DateRange) -> Result<Vec<TimeSeriesRow>>;
}
