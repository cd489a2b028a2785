//! Statistics for completed Pomodoro work phases: history, running totals,
//! windowed counts and CSV export.

mod aggregator;
pub mod export;
mod history;

pub use aggregator::{StatsAggregator, HISTORY_KEY, STATS_KEY};
pub use export::{parse_csv, render_csv, CSV_HEADER};
pub use history::{HistoryRecord, StatsReport, StatsSummary, TagCount};
