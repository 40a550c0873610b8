//! Finview - historical market data viewer
//!
//! This library turns daily OHLCV history into a formatted report (key
//! metrics plus a per-day table) and an .xlsx export, for cryptocurrencies,
//! stocks, currency pairs, resources and indices.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod export;
pub mod models;
pub mod pricing;
pub mod reports;
pub mod utils;
pub mod viewer;
