use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::models::AssetClass;

pub mod formatters;

#[derive(Parser)]
#[command(name = "finview")]
#[command(version, about = "Historical market data viewer with spreadsheet export")]
#[command(
    long_about = "Browse daily history for cryptocurrencies, stocks, currency pairs, resources and indices: key metrics, a formatted history table, and an .xlsx export of the selected period."
)]
pub struct Cli {
    /// Disable colorized/ANSI output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Output results in JSON format
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List asset classes, or the assets of one class
    List {
        /// crypto, stock, currency, resource or index
        class: Option<AssetClass>,

        /// Only assets of this sector (stocks) or country (indices)
        #[arg(short, long)]
        group: Option<String>,
    },

    /// List the sectors or countries of an asset class
    Groups {
        class: AssetClass,
    },

    /// Show key metrics and daily history for an asset
    Show {
        /// crypto, stock, currency, resource or index
        class: AssetClass,

        /// Asset display name or ticker symbol (e.g., Bitcoin, AAPL, "EUR/USD")
        asset: String,

        /// Start date, inclusive (YYYY-MM-DD)
        #[arg(short, long)]
        from: Option<NaiveDate>,

        /// End date, exclusive (YYYY-MM-DD); defaults to today
        #[arg(short, long)]
        to: Option<NaiveDate>,

        /// Write the history to an .xlsx file
        #[arg(short, long)]
        export: bool,

        /// Directory for the exported file (overrides the config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Inspect an exported Excel file
    Inspect {
        /// Path to the .xlsx file
        file: PathBuf,

        /// Show full data rows, not just dimensions
        #[arg(short, long)]
        full: bool,
    },
}
