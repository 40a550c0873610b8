//! Static asset catalogs
//!
//! Display name -> ticker symbol tables for every asset class, built once per
//! process and shared read-only. Stocks are grouped by sector and indices by
//! country; the other classes are flat.

use anyhow::{anyhow, Result};
use itertools::Itertools;
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::models::AssetClass;

type Group = (&'static str, &'static [(&'static str, &'static str)]);

const CRYPTO: &[(&str, &str)] = &[
    ("Bitcoin", "BTC-USD"),
    ("Ethereum", "ETH-USD"),
    ("Binance Coin", "BNB-USD"),
    ("Solana", "SOL-USD"),
    ("XRP", "XRP-USD"),
    ("Cardano", "ADA-USD"),
    ("Dogecoin", "DOGE-USD"),
    ("Polkadot", "DOT-USD"),
];

const CURRENCIES: &[(&str, &str)] = &[
    ("EUR/USD", "EURUSD=X"),
    ("GBP/USD", "GBPUSD=X"),
    ("USD/JPY", "USDJPY=X"),
    ("USD/CAD", "USDCAD=X"),
    ("AUD/USD", "AUDUSD=X"),
    ("USD/CHF", "USDCHF=X"),
    ("NZD/USD", "NZDUSD=X"),
    ("EUR/GBP", "EURGBP=X"),
];

const RESOURCES: &[(&str, &str)] = &[
    ("Gold", "GC=F"),
    ("Silver", "SI=F"),
    ("Crude Oil", "CL=F"),
    ("Natural Gas", "NG=F"),
    ("Copper", "HG=F"),
    ("Wheat", "ZW=F"),
    ("Corn", "ZC=F"),
];

const STOCK_SECTORS: &[Group] = &[
    (
        "Tech",
        &[
            ("Apple", "AAPL"),
            ("Microsoft", "MSFT"),
            ("Google", "GOOGL"),
            ("Amazon", "AMZN"),
            ("Tesla", "TSLA"),
            ("Meta", "META"),
            ("NVIDIA", "NVDA"),
            ("Adobe", "ADBE"),
            ("Intel", "INTC"),
            ("IBM", "IBM"),
            ("Cisco", "CSCO"),
            ("Oracle", "ORCL"),
            ("Salesforce", "CRM"),
            ("AMD", "AMD"),
            ("PayPal", "PYPL"),
        ],
    ),
    (
        "Banks & Finance",
        &[
            ("JPMorgan Chase", "JPM"),
            ("Bank of America", "BAC"),
            ("Wells Fargo", "WFC"),
            ("Goldman Sachs", "GS"),
            ("Morgan Stanley", "MS"),
            ("Visa", "V"),
            ("Mastercard", "MA"),
            ("American Express", "AXP"),
        ],
    ),
    (
        "Consumer",
        &[
            ("Walmart", "WMT"),
            ("Coca-Cola", "KO"),
            ("PepsiCo", "PEP"),
            ("McDonald's", "MCD"),
            ("Nike", "NKE"),
            ("Disney", "DIS"),
            ("Home Depot", "HD"),
            ("Starbucks", "SBUX"),
            ("Procter & Gamble", "PG"),
            ("Netflix", "NFLX"),
        ],
    ),
    (
        "Health & Pharma",
        &[
            ("Johnson & Johnson", "JNJ"),
            ("Pfizer", "PFE"),
            ("Merck", "MRK"),
            ("UnitedHealth", "UNH"),
            ("Abbott Labs", "ABT"),
            ("Eli Lilly", "LLY"),
            ("Amgen", "AMGN"),
            ("Bristol-Myers Squibb", "BMY"),
        ],
    ),
    (
        "Energy",
        &[
            ("Exxon Mobil", "XOM"),
            ("Chevron", "CVX"),
            ("ConocoPhillips", "COP"),
            ("Shell", "SHEL"),
            ("BP", "BP"),
        ],
    ),
    (
        "Automotive",
        &[
            ("Ford", "F"),
            ("General Motors", "GM"),
            ("Toyota", "TM"),
            ("Honda", "HMC"),
            ("Volkswagen", "VWAGY"),
        ],
    ),
    (
        "Telecom",
        &[
            ("AT&T", "T"),
            ("Verizon", "VZ"),
            ("T-Mobile", "TMUS"),
            ("Comcast", "CMCSA"),
        ],
    ),
];

const INDEX_COUNTRIES: &[Group] = &[
    (
        "United States",
        &[
            ("S&P 500", "^GSPC"),
            ("NASDAQ Composite", "^IXIC"),
            ("Dow Jones", "^DJI"),
            ("Russell 2000", "^RUT"),
        ],
    ),
    ("France", &[("CAC 40", "^FCHI")]),
    ("Germany", &[("DAX", "^GDAXI")]),
    ("United Kingdom", &[("FTSE 100", "^FTSE")]),
    ("Japan", &[("Nikkei 225", "^N225")]),
    ("Hong Kong", &[("Hang Seng", "^HSI")]),
    ("Australia", &[("ASX 200", "^AXJO")]),
    ("Spain", &[("IBEX 35", "^IBEX")]),
    ("Italy", &[("FTSE MIB", "FTSEMIB.MI")]),
    ("South Korea", &[("KOSPI", "^KS11")]),
    ("Canada", &[("TSX Composite", "^GSPTSE")]),
];

static CRYPTO_CATALOG: Lazy<AssetCatalog> =
    Lazy::new(|| AssetCatalog::flat(AssetClass::Crypto, CRYPTO));
static STOCK_CATALOG: Lazy<AssetCatalog> =
    Lazy::new(|| AssetCatalog::grouped(AssetClass::Stock, STOCK_SECTORS));
static CURRENCY_CATALOG: Lazy<AssetCatalog> =
    Lazy::new(|| AssetCatalog::flat(AssetClass::Currency, CURRENCIES));
static RESOURCE_CATALOG: Lazy<AssetCatalog> =
    Lazy::new(|| AssetCatalog::flat(AssetClass::Resource, RESOURCES));
static INDEX_CATALOG: Lazy<AssetCatalog> =
    Lazy::new(|| AssetCatalog::grouped(AssetClass::Index, INDEX_COUNTRIES));

/// A selectable instrument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Asset {
    pub name: &'static str,
    pub symbol: &'static str,
    /// Sector for stocks, country for indices
    pub group: Option<&'static str>,
}

/// All instruments of one asset class, in declaration order
#[derive(Debug)]
pub struct AssetCatalog {
    class: AssetClass,
    groups: Vec<&'static str>,
    assets: Vec<Asset>,
}

impl AssetCatalog {
    fn flat(class: AssetClass, entries: &'static [(&'static str, &'static str)]) -> Self {
        let assets = entries
            .iter()
            .map(|&(name, symbol)| Asset {
                name,
                symbol,
                group: None,
            })
            .collect();

        Self {
            class,
            groups: Vec::new(),
            assets,
        }
    }

    fn grouped(class: AssetClass, groups: &'static [Group]) -> Self {
        let assets = groups
            .iter()
            .flat_map(|&(group, entries)| {
                entries.iter().map(move |&(name, symbol)| Asset {
                    name,
                    symbol,
                    group: Some(group),
                })
            })
            .collect();

        Self {
            class,
            groups: groups.iter().map(|(group, _)| *group).collect(),
            assets,
        }
    }

    pub fn class(&self) -> AssetClass {
        self.class
    }

    /// Sector or country names; empty for flat catalogs
    pub fn groups(&self) -> &[&'static str] {
        &self.groups
    }

    /// Every asset, or only those of `group` (case-insensitive)
    pub fn assets(&self, group: Option<&str>) -> Result<Vec<Asset>> {
        let Some(wanted) = group else {
            return Ok(self.assets.clone());
        };

        if self.groups.is_empty() {
            return Err(anyhow!("{} assets are not grouped", self.class.label()));
        }

        let group = self
            .groups
            .iter()
            .find(|g| g.eq_ignore_ascii_case(wanted.trim()))
            .ok_or_else(|| {
                anyhow!(
                    "Unknown group '{}' for {}. Valid groups: {}",
                    wanted,
                    self.class.label(),
                    self.groups.iter().join(", ")
                )
            })?;

        Ok(self
            .assets
            .iter()
            .filter(|a| a.group == Some(*group))
            .copied()
            .collect())
    }

    /// Look up an asset by display name or ticker symbol (case-insensitive)
    pub fn resolve(&self, name_or_symbol: &str) -> Result<Asset> {
        let wanted = name_or_symbol.trim();
        self.assets
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(wanted))
            .or_else(|| {
                self.assets
                    .iter()
                    .find(|a| a.symbol.eq_ignore_ascii_case(wanted))
            })
            .copied()
            .ok_or_else(|| {
                anyhow!(
                    "Unknown {} asset '{}'. Run `finview list {}` to see available assets",
                    self.class.as_str(),
                    wanted,
                    self.class.as_str()
                )
            })
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

/// Catalog of one asset class
pub fn catalog(class: AssetClass) -> &'static AssetCatalog {
    match class {
        AssetClass::Crypto => &*CRYPTO_CATALOG,
        AssetClass::Stock => &*STOCK_CATALOG,
        AssetClass::Currency => &*CURRENCY_CATALOG,
        AssetClass::Resource => &*RESOURCE_CATALOG,
        AssetClass::Index => &*INDEX_CATALOG,
    }
}
