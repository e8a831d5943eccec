//! JSON export of a full crawl response.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};

/// Export file name: `crawler_results_<keyword>_<timestamp>.json`.
///
/// The timestamp is the ISO-8601 UTC instant with millisecond precision,
/// with `:` and `.` replaced by `-`. Path separators in the keyword become
/// `_` so the file always lands in the export directory.
pub(crate) fn export_filename(keyword: &str, now: DateTime<Utc>) -> String {
    let timestamp = now
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    let keyword = keyword.replace(['/', '\\'], "_");
    format!("crawler_results_{keyword}_{timestamp}.json")
}

/// Writes `body` pretty-printed into `dir` and returns the file path.
///
/// # Errors
///
/// Returns an error if the body cannot be serialized or the file cannot be
/// written.
pub(crate) fn write_export(
    dir: &Path,
    keyword: &str,
    body: &serde_json::Value,
    now: DateTime<Utc>,
) -> anyhow::Result<PathBuf> {
    let path = dir.join(export_filename(keyword, now));
    let json = serde_json::to_string_pretty(body).context("failed to serialize export")?;
    std::fs::write(&path, json)
        .with_context(|| format!("failed to write export to {}", path.display()))?;
    tracing::info!(path = %path.display(), "crawl results exported");
    Ok(path)
}
