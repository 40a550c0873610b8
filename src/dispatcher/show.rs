use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::catalog::catalog;
use crate::cli::formatters::{format_export_saved, format_view_json, format_view_table};
use crate::config::AppConfig;
use crate::models::{AssetClass, DateRange};
use crate::pricing::YahooProvider;
use crate::viewer::{load_view, user_message, AssetView, Selection};

pub struct ShowRequest {
    pub class: AssetClass,
    pub asset: String,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub export: bool,
    pub output: Option<PathBuf>,
}

pub async fn dispatch_show(request: ShowRequest, config: &AppConfig, json_output: bool) -> Result<()> {
    let asset = catalog(request.class).resolve(&request.asset)?;
    let today = Local::now().date_naive();
    let range = resolve_range(request.from, request.to, config.default_range_days, today);

    let selection = Selection {
        class: request.class,
        asset,
        range,
    };

    let provider = YahooProvider::new(config)?;
    let spinner = fetch_spinner(json_output, format!("Fetching {} ({})", asset.name, range));
    let result = load_view(&provider, &selection, config).await;
    spinner.finish_and_clear();

    let view = match result {
        Ok(view) => view,
        Err(err) => {
            let message = user_message(&err, asset.name);
            return Err(anyhow::Error::new(err).context(message));
        }
    };

    let export_path = if request.export {
        let dir = request.output.as_deref().or(config.output_dir.as_deref());
        Some(write_workbook(&view, dir)?)
    } else {
        None
    };

    if json_output {
        println!("{}", format_view_json(&view, export_path.as_deref()));
    } else {
        print!("{}", format_view_table(&view));
        if let Some(path) = &export_path {
            print!("{}", format_export_saved(path, view.workbook.len()));
        }
    }

    Ok(())
}

/// Half-open range from optional CLI dates; the end defaults to `today`
/// and the start to `default_days` before the end.
pub fn resolve_range(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    default_days: u64,
    today: NaiveDate,
) -> DateRange {
    let end = to.unwrap_or(today);
    match from {
        Some(start) => DateRange::new(start, end),
        None => DateRange::trailing_days(end, default_days),
    }
}

fn write_workbook(view: &AssetView, dir: Option<&Path>) -> Result<PathBuf> {
    let dir = dir.unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {:?}", dir))?;

    let path = dir.join(&view.file_name);
    std::fs::write(&path, &view.workbook)
        .with_context(|| format!("Failed to write workbook {:?}", path))?;

    info!("Wrote {} bytes to {:?}", view.workbook.len(), path);
    Ok(path)
}

fn fetch_spinner(hidden: bool, message: String) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn resolve_range_defaults_to_trailing_year() {
        let range = resolve_range(None, None, 365, date(2025, 3, 1));
        assert_eq!(range, DateRange::new(date(2024, 3, 1), date(2025, 3, 1)));
    }

    #[test]
    fn resolve_range_keeps_explicit_dates() {
        let range = resolve_range(Some(date(2024, 1, 1)), Some(date(2024, 2, 1)), 365, date(2025, 3, 1));
        assert_eq!(range, DateRange::new(date(2024, 1, 1), date(2024, 2, 1)));
    }

    #[test]
    fn resolve_range_window_ends_at_explicit_end() {
        let range = resolve_range(None, Some(date(2024, 2, 1)), 31, date(2025, 3, 1));
        assert_eq!(range.start, date(2024, 1, 1));
    }

    #[test]
    fn resolve_range_may_be_empty() {
        let range = resolve_range(Some(date(2024, 5, 1)), Some(date(2024, 1, 1)), 365, date(2025, 3, 1));
        assert!(range.is_empty());
    }
}
