use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One completed Pomodoro work phase. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub date: NaiveDate,
    #[serde(default)]
    pub tag: Option<String>,
    pub timestamp: NaiveDateTime,
}

/// Running totals kept beside the history. Field names on disk match the
/// settings layout used by earlier versions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSummary {
    #[serde(rename = "total_pomodoros", default)]
    pub total_completed_work_phases: u64,
    #[serde(rename = "total_minutes", default)]
    pub total_focus_minutes: u64,
    #[serde(rename = "sessions_by_tag", default)]
    pub counts_by_tag: BTreeMap<String, u64>,
}

impl StatsSummary {
    /// Apply one completed work phase.
    pub fn apply(&mut self, tag: Option<&str>, focus_minutes: u64) {
        self.total_completed_work_phases += 1;
        self.total_focus_minutes += focus_minutes;
        if let Some(tag) = tag {
            *self.counts_by_tag.entry(tag.to_string()).or_insert(0) += 1;
        }
    }

    /// The summary an empty summary reaches after applying every record.
    pub fn from_history(history: &[HistoryRecord], focus_minutes: u64) -> Self {
        history.iter().fold(Self::default(), |mut acc, r| {
            acc.apply(r.tag.as_deref(), focus_minutes);
            acc
        })
    }
}

/// Display-ready statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    pub total_completed_work_phases: u64,
    pub total_focus_hours: f64,
    pub today: usize,
    pub last_7_days: usize,
    pub avg_per_day: f64,
    /// Highest count first; ties by tag name.
    pub by_tag: Vec<TagCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: u64,
}

impl StatsReport {
    pub(crate) fn build(summary: &StatsSummary, today: usize, last_7_days: usize) -> Self {
        let mut by_tag: Vec<TagCount> = summary
            .counts_by_tag
            .iter()
            .map(|(tag, &count)| TagCount {
                tag: tag.clone(),
                count,
            })
            .collect();
        by_tag.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));

        Self {
            total_completed_work_phases: summary.total_completed_work_phases,
            total_focus_hours: summary.total_focus_minutes as f64 / 60.0,
            today,
            last_7_days,
            avg_per_day: last_7_days as f64 / 7.0,
            by_tag,
        }
    }
}
