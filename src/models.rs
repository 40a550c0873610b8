use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One trading day of OHLCV data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSeriesRow {
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

impl TimeSeriesRow {
    pub fn new(
        date: NaiveDate,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: Decimal,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// Half-open calendar range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The `days` calendar days ending at `end` (exclusive)
    pub fn trailing_days(end: NaiveDate, days: u64) -> Self {
        let start = end.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }

    /// True when no calendar day falls inside the range
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Where the unit marker goes around a rendered price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceAffix {
    None,
    Prefix(&'static str),
    Suffix(&'static str),
}

/// Per asset-class presentation rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayPolicy {
    pub price_precision: u32,
    pub affix: PriceAffix,
}

impl DisplayPolicy {
    /// "$1234.50"
    pub const fn dollars() -> Self {
        Self {
            price_precision: 2,
            affix: PriceAffix::Prefix("$"),
        }
    }

    /// "1.0845"
    pub const fn currency_pair() -> Self {
        Self {
            price_precision: 4,
            affix: PriceAffix::None,
        }
    }

    /// "4780.25 pts"
    pub const fn index_points() -> Self {
        Self {
            price_precision: 2,
            affix: PriceAffix::Suffix(" pts"),
        }
    }

    pub fn affix_is_prefix(&self) -> bool {
        matches!(self.affix, PriceAffix::Prefix(_))
    }
}

/// Asset classes offered by the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    Crypto,
    Stock,
    Currency,
    Resource,
    Index,
}

impl AssetClass {
    pub const ALL: [AssetClass; 5] = [
        AssetClass::Crypto,
        AssetClass::Stock,
        AssetClass::Currency,
        AssetClass::Resource,
        AssetClass::Index,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetClass::Crypto => "crypto",
            AssetClass::Stock => "stock",
            AssetClass::Currency => "currency",
            AssetClass::Resource => "resource",
            AssetClass::Index => "index",
        }
    }

    /// Human label used in listings
    pub fn label(&self) -> &'static str {
        match self {
            AssetClass::Crypto => "Crypto",
            AssetClass::Stock => "Stocks",
            AssetClass::Currency => "Currencies",
            AssetClass::Resource => "Resources",
            AssetClass::Index => "Indices",
        }
    }

    /// Static class -> presentation mapping
    pub fn display_policy(&self) -> DisplayPolicy {
        match self {
            AssetClass::Currency => DisplayPolicy::currency_pair(),
            AssetClass::Index => DisplayPolicy::index_points(),
            AssetClass::Crypto | AssetClass::Stock | AssetClass::Resource => {
                DisplayPolicy::dollars()
            }
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "crypto" | "cryptos" | "cryptocurrency" => Ok(AssetClass::Crypto),
            "stock" | "stocks" | "equity" | "equities" => Ok(AssetClass::Stock),
            "currency" | "currencies" | "fx" | "forex" => Ok(AssetClass::Currency),
            "resource" | "resources" | "commodity" | "commodities" => Ok(AssetClass::Resource),
            "index" | "indices" | "indexes" => Ok(AssetClass::Index),
            other => Err(format!(
                "unknown asset class '{}' (expected crypto, stock, currency, resource or index)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_policy_per_class() {
        assert_eq!(
            AssetClass::Currency.display_policy(),
            DisplayPolicy::currency_pair()
        );
        assert_eq!(AssetClass::Index.display_policy().affix, PriceAffix::Suffix(" pts"));
        for class in [AssetClass::Crypto, AssetClass::Stock, AssetClass::Resource] {
            let policy = class.display_policy();
            assert_eq!(policy.price_precision, 2);
            assert!(policy.affix_is_prefix());
        }
    }

    #[test]
    fn test_asset_class_parsing() {
        assert_eq!("Stocks".parse::<AssetClass>(), Ok(AssetClass::Stock));
        assert_eq!("FX".parse::<AssetClass>(), Ok(AssetClass::Currency));
        assert_eq!(" indices ".parse::<AssetClass>(), Ok(AssetClass::Index));
        assert!("bonds".parse::<AssetClass>().is_err());
        for class in AssetClass::ALL {
            assert_eq!(class.as_str().parse::<AssetClass>(), Ok(class));
        }
    }

    #[test]
    fn test_date_range_is_half_open() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 3));
        assert!(range.contains(date(2024, 1, 1)));
        assert!(range.contains(date(2024, 1, 2)));
        assert!(!range.contains(date(2024, 1, 3)));
        assert!(!range.is_empty());
        assert!(DateRange::new(date(2024, 1, 3), date(2024, 1, 3)).is_empty());
    }

    #[test]
    fn test_trailing_days() {
        let range = DateRange::trailing_days(date(2025, 1, 1), 365);
        assert_eq!(range.start, date(2024, 1, 2));
        assert_eq!(range.to_string(), "2024-01-02..2025-01-01");
    }
}
