//! Report exporters - CSV, JSON
//!
//! This module provides different export formats for reports.

use crate::error::ReportResult;

/// Trait for exporting reports to different formats
pub trait ReportExporter {
    /// Export to the target format
    fn export(&self, report: &dyn ReportData) -> ReportResult<String>;

    /// Get the file extension for this format
    fn extension(&self) -> &'static str;
}

/// Trait for data that can be exported
pub trait ReportData {
    /// Get column headers
    fn headers(&self) -> Vec<String>;

    /// Get data rows
    fn rows(&self) -> Vec<Vec<String>>;
}

// ============================================================================
// CSV Exporter
// ============================================================================

/// CSV format exporter: header row first, CRLF line endings
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

impl CsvExporter {
    pub fn new() -> Self {
        Self
    }
}

impl ReportExporter for CsvExporter {
    fn export(&self, report: &dyn ReportData) -> ReportResult<String> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::CRLF)
            .from_writer(Vec::new());

        writer.write_record(report.headers())?;

        for row in report.rows() {
            writer.write_record(&row)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))?;
        Ok(String::from_utf8(bytes)?)
    }

    fn extension(&self) -> &'static str {
        "csv"
    }
}

// ============================================================================
// JSON Exporter
// ============================================================================

/// JSON format exporter: a pretty-printed array with one object per row,
/// keyed by header.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl JsonExporter {
    pub fn new() -> Self {
        Self
    }
}

impl ReportExporter for JsonExporter {
    fn export(&self, report: &dyn ReportData) -> ReportResult<String> {
        let headers = report.headers();

        let json_rows: Vec<serde_json::Value> = report
            .rows()
            .into_iter()
            .map(|row| {
                let mut obj = serde_json::Map::new();
                for (i, header) in headers.iter().enumerate() {
                    let value = row.get(i).cloned().unwrap_or_default();
                    obj.insert(header.clone(), serde_json::Value::String(value));
                }
                serde_json::Value::Object(obj)
            })
            .collect();

        Ok(serde_json::to_string_pretty(&json_rows)?)
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}
