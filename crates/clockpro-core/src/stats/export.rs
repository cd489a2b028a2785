//! Flat CSV export of the Pomodoro history.
//!
//! Layout is fixed: a `date,tag,timestamp` header, then one line per record
//! with a missing tag written as an empty field. Values are not quoted, so a
//! tag containing a comma produces an extra column.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};

use super::history::HistoryRecord;
use crate::error::{Result, ValidationError};

pub const CSV_HEADER: &str = "date,tag,timestamp";
const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Render the whole export in memory.
pub fn render_csv(history: &[HistoryRecord]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + history.len() * 48);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for r in history {
        out.push_str(&format!(
            "{},{},{}\n",
            r.date.format(DATE_FORMAT),
            r.tag.as_deref().unwrap_or(""),
            r.timestamp.format(TIMESTAMP_FORMAT)
        ));
    }
    out
}

/// Write the export to `sink` in a single `write_all`.
///
/// # Errors
/// Returns the sink's I/O error.
pub fn write_csv<W: Write>(history: &[HistoryRecord], mut sink: W) -> Result<()> {
    sink.write_all(render_csv(history).as_bytes())?;
    sink.flush()?;
    Ok(())
}

/// Write the export to `path` atomically: a sibling temp file is written,
/// synced and renamed over the target. On failure the target is untouched.
///
/// # Errors
/// Returns the I/O error from any step.
pub fn write_csv_file(history: &[HistoryRecord], path: &Path) -> Result<()> {
    let tmp = temp_sibling(path);
    let result = (|| -> Result<()> {
        let mut file = File::create(&tmp)?;
        file.write_all(render_csv(history).as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp, path)?;
        Ok(())
    })();
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "export.csv".into());
    path.with_file_name(format!(".{name}.tmp"))
}

/// Parse an export produced by [`render_csv`]. Empty tag fields read back
/// as `None`.
///
/// # Errors
/// Returns a validation error naming the first bad line.
pub fn parse_csv(input: &str) -> Result<Vec<HistoryRecord>> {
    let mut lines = input.lines();
    match lines.next() {
        Some(CSV_HEADER) => {}
        other => {
            return Err(ValidationError::InvalidValue {
                field: "csv header".into(),
                message: format!("expected '{CSV_HEADER}', got {other:?}"),
            }
            .into())
        }
    }

    lines
        .enumerate()
        .filter(|(_, line)| !line.is_empty())
        .map(|(i, line)| parse_line(line).ok_or_else(|| bad_line(i + 2, line)))
        .collect()
}

fn parse_line(line: &str) -> Option<HistoryRecord> {
    let mut fields = line.splitn(3, ',');
    let date = NaiveDate::parse_from_str(fields.next()?, DATE_FORMAT).ok()?;
    let tag = fields.next()?;
    let timestamp = NaiveDateTime::parse_from_str(fields.next()?, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
    Some(HistoryRecord {
        date,
        tag: (!tag.is_empty()).then(|| tag.to_string()),
        timestamp,
    })
}

fn bad_line(line_no: usize, line: &str) -> crate::error::CoreError {
    ValidationError::InvalidValue {
        field: format!("csv line {line_no}"),
        message: format!("cannot parse '{line}'"),
    }
    .into()
}
