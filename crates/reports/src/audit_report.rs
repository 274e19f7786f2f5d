//! Audit log report and file export

use crate::error::{ReportError, ReportResult};
use crate::exporters::{ReportData, ReportExporter};
use chrono::NaiveDateTime;
use gatelog_core::DecisionEvent;
use std::fs;
use std::path::{Path, PathBuf};

/// Column names of the export, in order
pub const AUDIT_LOG_HEADERS: [&str; 7] = [
    "timestamp",
    "user_id",
    "name",
    "type",
    "decision",
    "reason",
    "flag",
];

/// One exported row; `flag` is empty when the event carries none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLogRow {
    pub timestamp: String,
    pub user_id: String,
    pub name: String,
    pub category: String,
    pub decision: String,
    pub reason: String,
    pub flag: String,
}

impl From<&DecisionEvent> for AuditLogRow {
    fn from(event: &DecisionEvent) -> Self {
        Self {
            timestamp: event.timestamp_string(),
            user_id: event.identity_id.clone(),
            name: event.display_name.clone(),
            category: event.category.clone(),
            decision: event.decision.to_string(),
            reason: event.reason.clone(),
            flag: event.flag.clone().unwrap_or_default(),
        }
    }
}

/// Audit log report data
#[derive(Debug, Clone)]
pub struct AuditLogReport {
    pub rows: Vec<AuditLogRow>,
}

impl AuditLogReport {
    pub fn from_events(events: &[DecisionEvent]) -> Self {
        Self {
            rows: events.iter().map(AuditLogRow::from).collect(),
        }
    }
}

impl ReportData for AuditLogReport {
    fn headers(&self) -> Vec<String> {
        AUDIT_LOG_HEADERS.iter().map(|h| h.to_string()).collect()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|r| {
                vec![
                    r.timestamp.clone(),
                    r.user_id.clone(),
                    r.name.clone(),
                    r.category.clone(),
                    r.decision.clone(),
                    r.reason.clone(),
                    r.flag.clone(),
                ]
            })
            .collect()
    }
}

/// What an export call did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Empty input; no file was created
    NothingToExport,
    Written { path: PathBuf, rows: usize },
}

/// `access_logs_YYYYMMDD_HHMMSS.<ext>` from local wall-clock time
pub fn export_file_name(local_now: NaiveDateTime, extension: &str) -> String {
    format!(
        "access_logs_{}.{}",
        local_now.format("%Y%m%d_%H%M%S"),
        extension
    )
}

/// Write `events` to a new timestamped file in `dir`.
///
/// The directory is created if missing. A file with the same name (same
/// second) is overwritten.
pub fn export_audit_log(
    events: &[DecisionEvent],
    dir: &Path,
    exporter: &dyn ReportExporter,
    local_now: NaiveDateTime,
) -> ReportResult<ExportOutcome> {
    if events.is_empty() {
        return Ok(ExportOutcome::NothingToExport);
    }

    let report = AuditLogReport::from_events(events);
    let content = exporter.export(&report)?;

    fs::create_dir_all(dir).map_err(|source| ReportError::Write {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(export_file_name(local_now, exporter.extension()));
    fs::write(&path, content).map_err(|source| ReportError::Write {
        path: path.clone(),
        source,
    })?;

    let rows = report.rows.len();
    tracing::info!(path = %path.display(), rows, "Audit log exported");
    Ok(ExportOutcome::Written { path, rows })
}
