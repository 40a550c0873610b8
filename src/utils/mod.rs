//! Utility functions for formatting and naming
//!
//! This module provides centralized formatting utilities for consistent
//! display of prices, percentages and volumes, plus the name sanitizer
//! shared by spreadsheet sheet names and exported file names.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{DisplayPolicy, PriceAffix};

/// Maximum sheet name length accepted by the xlsx format
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Sheet name used when a label sanitizes to nothing
pub const DEFAULT_SHEET_NAME: &str = "Data";

static UNSAFE_NAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\\/*?:"<>|=]"#).expect("static regex is valid"));

/// Round half away from zero to `dp` digits.
///
/// Every displayed number goes through this exactly once, right before
/// rendering.
pub fn round_display(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Render with exactly `dp` fractional digits.
///
/// # Examples
/// ```
/// use finview::utils::format_fixed;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_fixed(dec!(1.005), 2), "1.01");
/// assert_eq!(format_fixed(dec!(3), 4), "3.0000");
/// ```
pub fn format_fixed(value: Decimal, dp: u32) -> String {
    format!("{:.*}", dp as usize, round_display(value, dp))
}

/// Core price formatting function with full control over output.
///
/// # Arguments
/// * `value` - The price to format
/// * `policy` - Precision and unit marker of the asset class
/// * `width` - Minimum width for padding (0 for no padding, right-aligned)
///
/// # Examples
/// ```
/// use finview::models::DisplayPolicy;
/// use finview::utils::format_price_with_width;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(
///     format_price_with_width(dec!(4780.254), &DisplayPolicy::index_points(), 0),
///     "4780.25 pts"
/// );
/// assert_eq!(
///     format_price_with_width(dec!(12), &DisplayPolicy::dollars(), 10),
///     "    $12.00"
/// );
/// ```
pub fn format_price_with_width(value: Decimal, policy: &DisplayPolicy, width: usize) -> String {
    let number = format_fixed(value, policy.price_precision);

    let result = match policy.affix {
        PriceAffix::None => number,
        PriceAffix::Prefix(symbol) => format!("{}{}", symbol, number),
        PriceAffix::Suffix(symbol) => format!("{}{}", number, symbol),
    };

    if width > 0 && result.len() < width {
        format!("{:>width$}", result, width = width)
    } else {
        result
    }
}

// ============ Convenience functions ============

/// Format a price per the display policy: "$1234.56", "1.0845", "4780.25 pts"
///
/// # Examples
/// ```
/// use finview::models::DisplayPolicy;
/// use finview::utils::format_price;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_price(dec!(1.08449), &DisplayPolicy::currency_pair()), "1.0845");
/// ```
pub fn format_price(value: Decimal, policy: &DisplayPolicy) -> String {
    format_price_with_width(value, policy, 0)
}

/// Format a percentage with 2 decimals and a "%" suffix, or "N/A" when absent
///
/// # Examples
/// ```
/// use finview::utils::format_percent;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_percent(Some(dec!(10))), "10.00%");
/// assert_eq!(format_percent(None), "N/A");
/// ```
pub fn format_percent(pct: Option<Decimal>) -> String {
    match pct {
        Some(value) => format!("{}%", format_fixed(value, 2)),
        None => "N/A".to_string(),
    }
}

/// Scale a volume to the largest of k/M/G not exceeding it
///
/// # Examples
/// ```
/// use finview::utils::format_volume;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_volume(dec!(999)), "999.00");
/// assert_eq!(format_volume(dec!(1500)), "1.50 k");
/// assert_eq!(format_volume(dec!(2500000000)), "2.50 G");
/// ```
pub fn format_volume(volume: Decimal) -> String {
    let units = [
        (Decimal::from(1_000_000_000u64), "G"),
        (Decimal::from(1_000_000u64), "M"),
        (Decimal::from(1_000u64), "k"),
    ];

    for (scale, unit) in units {
        if volume >= scale {
            return format!("{} {}", format_fixed(volume / scale, 2), unit);
        }
    }

    format_fixed(volume, 2)
}

/// Replace characters that are unsafe in file and sheet names with `_`
///
/// # Examples
/// ```
/// use finview::utils::sanitize_name;
///
/// assert_eq!(sanitize_name("EUR/USD"), "EUR_USD");
/// assert_eq!(sanitize_name("GC=F"), "GC_F");
/// ```
pub fn sanitize_name(text: &str) -> String {
    UNSAFE_NAME_CHARS.replace_all(text, "_").into_owned()
}

/// Sanitized label truncated to the 31 character sheet name limit
pub fn sheet_name(label: &str) -> String {
    let clean: String = sanitize_name(label)
        .chars()
        .take(MAX_SHEET_NAME_LEN)
        .collect();

    if clean.trim().is_empty() {
        DEFAULT_SHEET_NAME.to_string()
    } else {
        clean
    }
}
