//! Audit log viewing and export

use anyhow::Result;
use gatelog_business::{LogView, SessionController};
use gatelog_core::{Clock, DecisionEvent};
use gatelog_persistence::AccessStore;
use gatelog_reports::{export_audit_log, ExportOutcome, ReportExporter};
use std::path::Path;

use crate::terminal::Terminal;

/// Menu filter answer to a view; anything unrecognized shows everything
pub fn parse_view(choice: &str, id: impl FnOnce() -> std::io::Result<String>) -> std::io::Result<LogView> {
    let view = match choice.trim().to_lowercase().as_str() {
        "id" => LogView::Identity(id()?),
        "denied" => LogView::Denied,
        "flagged" => LogView::Flagged,
        _ => LogView::All,
    };
    Ok(view)
}

/// Print the events in `view`, one line each. Returns how many were shown.
pub fn show_logs<S, C, T>(
    session: &SessionController<S, C>,
    term: &mut T,
    view: &LogView,
) -> Result<usize>
where
    S: AccessStore,
    C: Clock,
    T: Terminal,
{
    if session.events().is_empty() {
        term.display("No logs yet.")?;
        return Ok(0);
    }

    let events = session.view(view);
    for event in &events {
        term.display(&event.to_string())?;
    }
    tracing::debug!(view = %view.label(), shown = events.len(), "Logs listed");
    Ok(events.len())
}

pub fn prompt_logs<S, C, T>(session: &SessionController<S, C>, term: &mut T) -> Result<()>
where
    S: AccessStore,
    C: Clock,
    T: Terminal,
{
    term.display("\n--- Access logs ---")?;
    if session.events().is_empty() {
        term.display("No logs yet.")?;
        return Ok(());
    }

    let choice = term.prompt("Filter? (all/id/denied) [all]: ")?;
    let view = parse_view(&choice, || term.prompt("Enter ID to filter: "))?;
    show_logs(session, term, &view)?;
    Ok(())
}

/// Export the events in `view` to a timestamped file under `dir`
pub fn export<S, C, T>(
    session: &SessionController<S, C>,
    term: &mut T,
    dir: &Path,
    exporter: &dyn ReportExporter,
    view: &LogView,
) -> Result<ExportOutcome>
where
    S: AccessStore,
    C: Clock,
    T: Terminal,
{
    let events: Vec<DecisionEvent> = session.view(view).into_iter().cloned().collect();
    let outcome = export_audit_log(&events, dir, exporter, session.clock().local_now())?;

    match &outcome {
        ExportOutcome::NothingToExport => term.display("No logs to export.")?,
        ExportOutcome::Written { path, .. } => {
            term.display(&format!("Logs exported to {}", path.display()))?
        }
    }
    Ok(outcome)
}
