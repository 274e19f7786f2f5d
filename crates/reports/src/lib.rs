//! # Gatelog Reports
//!
//! Report generation for the audit log.
//!
//! ## Exporters
//!
//! - [`CsvExporter`] - CSV via the `csv` crate, header row first
//! - [`JsonExporter`] - pretty-printed JSON array of row objects
//!
//! ## Reports
//!
//! - [`AuditLogReport`] - one row per decision event
//!
//! ## Example
//!
//! ```rust,ignore
//! use gatelog_reports::{export_audit_log, CsvExporter, ExportOutcome};
//!
//! match export_audit_log(session.events(), &export_dir, &CsvExporter::new(), clock.local_now())? {
//!     ExportOutcome::NothingToExport => println!("No logs to export."),
//!     ExportOutcome::Written { path, .. } => println!("Logs exported to {}", path.display()),
//! }
//! ```

pub mod audit_report;
pub mod error;
pub mod exporters;

pub use audit_report::{export_audit_log, export_file_name, AuditLogReport, AuditLogRow, ExportOutcome};
pub use error::{ReportError, ReportResult};
pub use exporters::{CsvExporter, JsonExporter, ReportData, ReportExporter};
