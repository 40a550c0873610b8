// Reports module - history table formatting and shared variation math

pub mod history;
pub mod variation;

pub use history::{format_report, DisplayRow, HistoryReport, ReportMetrics, DISPLAY_COLUMNS};
pub use variation::{daily_changes, pct_change, period_change_pct};
