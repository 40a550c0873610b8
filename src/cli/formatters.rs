//! Output formatting module for CLI display
//!
//! This module handles all terminal output formatting, separating
//! the concerns of data calculation from presentation.

use colored::Colorize;
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::Path;
use tabled::{
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

use crate::catalog::Asset;
use crate::export::XLSX_MIME_TYPE;
use crate::models::AssetClass;
use crate::viewer::AssetView;

fn colorize_change(text: &str, value: Option<Decimal>) -> String {
    match value {
        Some(v) if v > Decimal::ZERO => text.green().to_string(),
        Some(v) if v < Decimal::ZERO => text.red().to_string(),
        _ => text.to_string(),
    }
}

fn colorize_variation(text: &str) -> String {
    if text.starts_with('-') {
        text.red().to_string()
    } else if text == "N/A" || text == "0.00%" {
        text.to_string()
    } else {
        text.green().to_string()
    }
}

/// Format an asset view (metrics + history) for terminal output
pub fn format_view_table(view: &AssetView) -> String {
    let mut output = String::new();
    let metrics = &view.report.metrics;

    output.push_str(&format!(
        "\n{} {} ({}) {} → {}\n",
        "📈".cyan().bold(),
        view.asset.name.bold(),
        view.asset.symbol,
        view.range.start,
        view.range.end
    ));

    output.push_str(&format!("\n{} Key metrics", "━".repeat(60).bright_black()));
    output.push_str(&format!(
        "\n{:<22} {}",
        "Closing price:".bold(),
        metrics.latest_close_display
    ));
    output.push_str(&format!(
        "\n{:<22} {}",
        "Variation:".bold(),
        colorize_change(&metrics.period_change_display, metrics.period_change_pct)
    ));
    output.push_str(&format!(
        "\n{:<22} {}\n\n",
        "Volume (last day):".bold(),
        metrics.latest_volume
    ));

    #[derive(Tabled)]
    struct HistoryRow {
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Open")]
        open: String,
        #[tabled(rename = "High")]
        high: String,
        #[tabled(rename = "Low")]
        low: String,
        #[tabled(rename = "Close")]
        close: String,
        #[tabled(rename = "Variation (%)")]
        variation: String,
        #[tabled(rename = "Volume")]
        volume: String,
    }

    let rows: Vec<HistoryRow> = view
        .report
        .table
        .iter()
        .map(|r| HistoryRow {
            date: r.date.format("%Y-%m-%d").to_string(),
            open: r.open.clone(),
            high: r.high.clone(),
            low: r.low.clone(),
            close: r.close.clone(),
            variation: colorize_variation(&r.variation),
            volume: r.volume.clone(),
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::modern());
    // Right-align everything except the date
    table.modify(Columns::new(1..), Alignment::right());

    output.push_str(&table.to_string());
    output.push_str(&format!("\n{} trading days\n", rows.len()));

    output
}

/// Format an asset view for JSON output
pub fn format_view_json(view: &AssetView, export_path: Option<&Path>) -> String {
    #[derive(Serialize)]
    struct JsonView<'a> {
        #[serde(flatten)]
        view: &'a AssetView,
        export_path: Option<String>,
        mime_type: &'static str,
    }

    let json = JsonView {
        view,
        export_path: export_path.map(|p| p.display().to_string()),
        mime_type: XLSX_MIME_TYPE,
    };

    serde_json::to_string_pretty(&json)
        .unwrap_or_else(|e| format!(r#"{{"error": "JSON serialization failed: {}"}}"#, e))
}

/// Confirmation line after writing a workbook
pub fn format_export_saved(path: &Path, bytes: usize) -> String {
    format!(
        "{} Saved {} ({} bytes, {})\n",
        "✓".green().bold(),
        path.display().to_string().bold(),
        bytes,
        XLSX_MIME_TYPE
    )
}

/// Format the list of asset classes
pub fn format_class_list(json: bool) -> String {
    #[derive(Serialize, Tabled)]
    struct ClassRow {
        #[tabled(rename = "Class")]
        class: &'static str,
        #[tabled(rename = "Label")]
        label: &'static str,
        #[tabled(rename = "Assets")]
        assets: usize,
        #[tabled(rename = "Price format")]
        format: &'static str,
    }

    let rows: Vec<ClassRow> = AssetClass::ALL
        .iter()
        .map(|class| ClassRow {
            class: class.as_str(),
            label: class.label(),
            assets: crate::catalog::catalog(*class).len(),
            format: match class {
                AssetClass::Currency => "1.2345",
                AssetClass::Index => "1234.56 pts",
                _ => "$1234.56",
            },
        })
        .collect();

    if json {
        return serde_json::to_string_pretty(&rows)
            .unwrap_or_else(|e| format!(r#"{{"error": "JSON serialization failed: {}"}}"#, e));
    }

    let mut table = Table::new(&rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// Format the assets of one class
pub fn format_asset_list(class: AssetClass, assets: &[Asset], json: bool) -> String {
    if json {
        return serde_json::to_string_pretty(assets)
            .unwrap_or_else(|e| format!(r#"{{"error": "JSON serialization failed: {}"}}"#, e));
    }

    #[derive(Tabled)]
    struct AssetRow {
        #[tabled(rename = "Name")]
        name: &'static str,
        #[tabled(rename = "Symbol")]
        symbol: &'static str,
        #[tabled(rename = "Group")]
        group: &'static str,
    }

    let rows: Vec<AssetRow> = assets
        .iter()
        .map(|a| AssetRow {
            name: a.name,
            symbol: a.symbol,
            group: a.group.unwrap_or("-"),
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::rounded());

    format!(
        "\n{} {} ({})\n\n{}\n",
        "📋".cyan().bold(),
        class.label().bold(),
        rows.len(),
        table
    )
}

/// Format the sector/country names of one class
pub fn format_group_list(class: AssetClass, groups: &[&'static str], json: bool) -> String {
    if json {
        return serde_json::to_string_pretty(groups)
            .unwrap_or_else(|e| format!(r#"{{"error": "JSON serialization failed: {}"}}"#, e));
    }

    if groups.is_empty() {
        return format!(
            "{} {} assets are not grouped\n",
            "ℹ".blue().bold(),
            class.label()
        );
    }

    let mut output = format!("\n{} {} groups\n\n", "📋".cyan().bold(), class.label().bold());
    for group in groups {
        output.push_str(&format!("  • {}\n", group));
    }
    output
}
