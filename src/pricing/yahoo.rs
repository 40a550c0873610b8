use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Days, NaiveDate};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::models::{DateRange, TimeSeriesRow};
use crate::pricing::MarketDataProvider;

const YAHOO_CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Yahoo Finance chart response
#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: ChartData,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    result: Option<Vec<ChartResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: Meta,
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Meta {
    /// Exchange offset from UTC in seconds; bars are stamped at exchange open
    #[serde(rename = "gmtoffset")]
    gmt_offset: Option<i64>,
    #[allow(dead_code)]
    symbol: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Debug, Default, Deserialize)]
struct Quote {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: Option<String>,
}

/// Daily history from the Yahoo Finance chart API
pub struct YahooProvider {
    client: Client,
}

impl YahooProvider {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client })
    }
}

impl MarketDataProvider for YahooProvider {
    async fn fetch_daily(&self, symbol: &str, range: &DateRange) -> Result<Vec<TimeSeriesRow>> {
        info!("Fetching daily history for {} over {}", symbol, range);

        // Exchanges east of UTC stamp their bars on the previous UTC day, so
        // the request starts one day early and rows are filtered afterwards.
        let padded_start = range
            .start
            .checked_sub_days(Days::new(1))
            .unwrap_or(range.start);

        let url = format!(
            "{}/{}?period1={}&period2={}&interval=1d",
            YAHOO_CHART_URL,
            encode_symbol(symbol),
            midnight_utc(padded_start)?,
            midnight_utc(range.end)?
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to send request to Yahoo Finance")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read Yahoo Finance response")?;

        // Error payloads come with a 4xx status but still carry a description
        match parse_chart_response(&body, range) {
            Ok(rows) if status.is_success() => {
                debug!("Fetched {} daily rows for {}", rows.len(), symbol);
                Ok(rows)
            }
            Ok(_) => Err(anyhow!("Yahoo Finance returned error status: {}", status)),
            Err(err) if status.is_success() => Err(err),
            Err(err) => Err(err.context(format!("Yahoo Finance returned error status: {}", status))),
        }
    }
}

fn midnight_utc(date: NaiveDate) -> Result<i64> {
    Ok(date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow!("Invalid date {}", date))?
        .and_utc()
        .timestamp())
}

fn encode_symbol(symbol: &str) -> String {
    symbol.replace('^', "%5E")
}

fn value_at(series: &[Option<f64>], i: usize) -> Option<Decimal> {
    series
        .get(i)
        .copied()
        .flatten()
        .and_then(Decimal::from_f64_retain)
}

/// Turn a chart API payload into rows inside `range`.
///
/// Bars missing any of open/high/low/close are skipped; a missing volume
/// counts as zero. When the feed repeats a date, the later bar wins.
pub fn parse_chart_response(body: &str, range: &DateRange) -> Result<Vec<TimeSeriesRow>> {
    let data: YahooChartResponse =
        serde_json::from_str(body).context("Failed to parse Yahoo Finance response")?;

    if let Some(error) = data.chart.error {
        bail!(
            "Yahoo Finance API error: {} - {}",
            error.code,
            error.description.unwrap_or_default()
        );
    }

    let result = data
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| anyhow!("No data returned from Yahoo Finance"))?;

    // No trading days in the requested window
    let Some(timestamps) = result.timestamp else {
        return Ok(Vec::new());
    };

    let offset = result.meta.gmt_offset.unwrap_or(0);
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

    let opens = quote.open.unwrap_or_default();
    let highs = quote.high.unwrap_or_default();
    let lows = quote.low.unwrap_or_default();
    let closes = quote.close.unwrap_or_default();
    let volumes = quote.volume.unwrap_or_default();

    let mut by_date: BTreeMap<NaiveDate, TimeSeriesRow> = BTreeMap::new();

    for (i, &timestamp) in timestamps.iter().enumerate() {
        let date = DateTime::from_timestamp(timestamp + offset, 0)
            .ok_or_else(|| anyhow!("Invalid timestamp {}", timestamp))?
            .date_naive();

        if !range.contains(date) {
            continue;
        }

        let (Some(open), Some(high), Some(low), Some(close)) = (
            value_at(&opens, i),
            value_at(&highs, i),
            value_at(&lows, i),
            value_at(&closes, i),
        ) else {
            debug!("Skipping {}: incomplete prices", date);
            continue;
        };

        let volume = value_at(&volumes, i).unwrap_or(Decimal::ZERO);
        by_date.insert(date, TimeSeriesRow::new(date, open, high, low, close, volume));
    }

    Ok(by_date.into_values().collect())
}
