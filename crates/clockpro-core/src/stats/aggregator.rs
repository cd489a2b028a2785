//! Pomodoro statistics aggregation.
//!
//! The aggregator is the only owner of the history and the running summary.
//! Every recorded work phase is applied to both in memory before anything is
//! persisted, so the summary equals a fold over the history even when the
//! store write fails.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use chrono::{Days, Local, NaiveDate, NaiveDateTime, Timelike};
use tracing::{info, warn};

use super::export;
use super::history::{HistoryRecord, StatsReport, StatsSummary};
use crate::error::Result;
use crate::storage::{SettingsStore, SettingsStoreExt};

pub const HISTORY_KEY: &str = "pomodoro_history";
pub const STATS_KEY: &str = "stats";

/// Days before today included in the weekly window (inclusive cutoff).
const WEEK_WINDOW_DAYS: u64 = 7;

pub struct StatsAggregator<S: SettingsStore> {
    store: Arc<S>,
    focus_minutes: u64,
    history: Vec<HistoryRecord>,
    summary: StatsSummary,
}

impl<S: SettingsStore> StatsAggregator<S> {
    /// Load history and summary from `store`. Each completed work phase adds
    /// `focus_minutes` to the focus total.
    ///
    /// A missing or malformed summary is rebuilt from the history. Malformed
    /// history records are skipped one by one; the rest are kept.
    pub fn new(store: Arc<S>, focus_minutes: u64) -> Self {
        let history: Vec<HistoryRecord> = store.get_each(HISTORY_KEY);
        let summary = store
            .get_or::<Option<StatsSummary>>(STATS_KEY, None)
            .unwrap_or_else(|| StatsSummary::from_history(&history, focus_minutes));
        Self {
            store,
            focus_minutes,
            history,
            summary,
        }
    }

    pub fn history(&self) -> &[HistoryRecord] {
        &self.history
    }

    pub fn summary(&self) -> &StatsSummary {
        &self.summary
    }

    pub fn focus_minutes(&self) -> u64 {
        self.focus_minutes
    }

    /// Record a completed work phase stamped with the current local time.
    ///
    /// The tag is trimmed before it is stored and counted, so `" code "` and
    /// `"code"` are the same tag. A tag that trims to nothing is recorded as
    /// untagged.
    ///
    /// # Errors
    /// Returns the persistence error if the store write fails. The record is
    /// kept in memory regardless.
    pub fn record_completed_work_phase(&mut self, tag: Option<&str>) -> Result<HistoryRecord> {
        self.record_at(tag, Local::now().naive_local())
    }

    /// Record a completed work phase at an explicit local time.
    ///
    /// # Errors
    /// See [`StatsAggregator::record_completed_work_phase`].
    pub fn record_at(&mut self, tag: Option<&str>, now: NaiveDateTime) -> Result<HistoryRecord> {
        let tag = tag.map(str::trim).filter(|t| !t.is_empty());
        let record = HistoryRecord {
            date: now.date(),
            tag: tag.map(String::from),
            timestamp: truncate_to_micros(now),
        };
        self.history.push(record.clone());
        self.summary.apply(tag, self.focus_minutes);
        info!(
            tag = ?record.tag,
            total = self.summary.total_completed_work_phases,
            "pomodoro recorded"
        );
        self.save()?;
        Ok(record)
    }

    pub fn count_on_date(&self, date: NaiveDate) -> usize {
        self.history.iter().filter(|r| r.date == date).count()
    }

    /// Records on or after `date`, compared by calendar date only.
    pub fn count_since(&self, date: NaiveDate) -> usize {
        self.history.iter().filter(|r| r.date >= date).count()
    }

    pub fn today_count(&self) -> usize {
        self.count_on_date(today())
    }

    pub fn week_count(&self) -> usize {
        self.week_count_at(today())
    }

    /// Records from `today - 7 days` through `today`.
    pub fn week_count_at(&self, today: NaiveDate) -> usize {
        let cutoff = today
            .checked_sub_days(Days::new(WEEK_WINDOW_DAYS))
            .unwrap_or(NaiveDate::MIN);
        self.count_since(cutoff)
    }

    pub fn report(&self) -> StatsReport {
        self.report_at(today())
    }

    pub fn report_at(&self, today: NaiveDate) -> StatsReport {
        StatsReport::build(
            &self.summary,
            self.count_on_date(today),
            self.week_count_at(today),
        )
    }

    /// Write the flat CSV export to `sink`.
    ///
    /// # Errors
    /// Returns [`crate::CoreError::Io`] if the sink rejects the write.
    pub fn export_flat<W: Write>(&self, sink: W) -> Result<()> {
        export::write_csv(&self.history, sink)
    }

    /// Write the flat CSV export to `path`, all or nothing.
    ///
    /// # Errors
    /// Returns [`crate::CoreError::Io`] if any step fails; the target file is
    /// left as it was.
    pub fn export_to_file(&self, path: &Path) -> Result<()> {
        export::write_csv_file(&self.history, path).inspect_err(|e| {
            warn!(path = %path.display(), error = %e, "stats export failed");
        })
    }

    fn save(&self) -> Result<()> {
        self.store.put(HISTORY_KEY, &self.history)?;
        self.store.put(STATS_KEY, &self.summary)
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn truncate_to_micros(t: NaiveDateTime) -> NaiveDateTime {
    let nanos = t.nanosecond() / 1_000 * 1_000;
    t.with_nanosecond(nanos).unwrap_or(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use serde_json::json;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn aggregator() -> StatsAggregator<MemoryStore> {
        StatsAggregator::new(Arc::new(MemoryStore::new()), 25)
    }

    #[test]
    fn records_update_totals_and_tags() {
        let mut stats = aggregator();
        for _ in 0..3 {
            stats.record_completed_work_phase(Some("code")).unwrap();
        }
        stats.record_completed_work_phase(None).unwrap();

        let s = stats.summary();
        assert_eq!(s.total_completed_work_phases, 4);
        assert_eq!(s.total_focus_minutes, 100);
        assert_eq!(s.counts_by_tag.get("code"), Some(&3));
        assert_eq!(stats.today_count(), 4);
    }

    #[test]
    fn blank_tag_counts_as_untagged() {
        let mut stats = aggregator();
        let r = stats.record_at(Some("  "), at(2024, 1, 1, 9)).unwrap();
        assert_eq!(r.tag, None);
        assert!(stats.summary().counts_by_tag.is_empty());
    }

    #[test]
    fn count_since_compares_dates_not_times() {
        let mut stats = aggregator();
        stats.record_at(None, at(2024, 1, 10, 0)).unwrap();
        stats.record_at(None, at(2024, 1, 10, 23)).unwrap();
        stats.record_at(None, at(2024, 1, 9, 23)).unwrap();
        let cutoff = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert_eq!(stats.count_since(cutoff), 2);
        assert_eq!(stats.count_on_date(cutoff), 2);
    }

    #[test]
    fn week_window_includes_cutoff_day() {
        let mut stats = aggregator();
        stats.record_at(None, at(2024, 1, 3, 12)).unwrap();
        stats.record_at(None, at(2024, 1, 2, 12)).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert_eq!(stats.week_count_at(today), 1);
    }

    #[test]
    fn state_survives_reload() {
        let store = Arc::new(MemoryStore::new());
        let mut stats = StatsAggregator::new(store.clone(), 25);
        stats.record_at(Some("read"), at(2024, 2, 1, 8)).unwrap();

        let reloaded = StatsAggregator::new(store, 25);
        assert_eq!(reloaded.history(), stats.history());
        assert_eq!(reloaded.summary(), stats.summary());
    }

    #[test]
    fn missing_summary_is_rebuilt_from_history() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(
                HISTORY_KEY,
                json!([
                    {"date": "2024-01-01", "tag": "a", "timestamp": "2024-01-01T09:00:00"},
                    {"date": "2024-01-02", "tag": null, "timestamp": "2024-01-02T09:00:00"}
                ]),
            )
            .unwrap();
        store.set(STATS_KEY, json!("garbage")).unwrap();

        let stats = StatsAggregator::new(store, 25);
        assert_eq!(stats.summary().total_completed_work_phases, 2);
        assert_eq!(stats.summary().total_focus_minutes, 50);
    }

    #[test]
    fn malformed_record_does_not_erase_history() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(
                HISTORY_KEY,
                json!([
                    {"date": "2024-01-01", "tag": "a", "timestamp": "2024-01-01T09:00:00"},
                    {"date": "2024-01-02", "tag": null, "timestamp": ""}
                ]),
            )
            .unwrap();

        let mut stats = StatsAggregator::new(store.clone(), 25);
        assert_eq!(stats.history().len(), 1);
        stats.record_at(Some("b"), at(2024, 1, 3, 9)).unwrap();

        let saved: Vec<HistoryRecord> = store.get_or(HISTORY_KEY, Vec::new());
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].tag.as_deref(), Some("a"));
        assert_eq!(stats.summary().total_completed_work_phases, 2);
    }

    #[test]
    fn tags_are_trimmed_before_counting() {
        let mut stats = aggregator();
        let r = stats.record_at(Some(" code "), at(2024, 1, 1, 9)).unwrap();
        stats.record_at(Some("code"), at(2024, 1, 1, 10)).unwrap();
        assert_eq!(r.tag.as_deref(), Some("code"));
        assert_eq!(stats.summary().counts_by_tag.get("code"), Some(&2));
    }

    #[test]
    fn export_writes_header_and_rows() {
        let mut stats = aggregator();
        stats.record_at(Some("x"), at(2024, 4, 1, 9)).unwrap();
        let mut buf = Vec::new();
        stats.export_flat(&mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "date,tag,timestamp\n2024-04-01,x,2024-04-01T09:00:00.000000\n"
        );
    }

    #[test]
    fn failing_sink_reports_io_error() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk full"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }
        let stats = aggregator();
        assert!(matches!(
            stats.export_flat(Broken),
            Err(crate::error::CoreError::Io(_))
        ));
    }

    #[test]
    fn report_reflects_window_counts() {
        let mut stats = aggregator();
        stats.record_at(Some("a"), at(2024, 6, 10, 9)).unwrap();
        stats.record_at(Some("a"), at(2024, 6, 5, 9)).unwrap();
        let r = stats.report_at(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
        assert_eq!(r.today, 1);
        assert_eq!(r.last_7_days, 2);
        assert_eq!(r.total_completed_work_phases, 2);
    }
}
