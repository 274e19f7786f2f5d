//! Interactive menu loop
//!
//! One action per iteration; every mutating action is persisted by the
//! session before the next prompt. Closing input ends the loop cleanly.

use anyhow::Result;
use gatelog_business::{LogView, SessionController};
use gatelog_core::Clock;
use gatelog_persistence::AccessStore;
use gatelog_reports::CsvExporter;
use std::io;
use std::path::Path;

use crate::commands::{access, identity, logs};
use crate::terminal::Terminal;

const BANNER: &str = "\n==============================\n \
                      Access Control & Ops Logger \n\
                      ==============================\n\
                      1) Register person/vehicle\n\
                      2) Request access (grant/deny)\n\
                      3) View registered users\n\
                      4) View access logs\n\
                      5) Export logs to CSV\n\
                      6) Exit";

/// Menu choices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Register,
    RequestAccess,
    ViewUsers,
    ViewLogs,
    Export,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Register),
            "2" => Some(Self::RequestAccess),
            "3" => Some(Self::ViewUsers),
            "4" => Some(Self::ViewLogs),
            "5" => Some(Self::Export),
            "6" => Some(Self::Exit),
            _ => None,
        }
    }
}

fn is_end_of_input(err: &anyhow::Error) -> bool {
    err.downcast_ref::<io::Error>()
        .is_some_and(|e| e.kind() == io::ErrorKind::UnexpectedEof)
}

/// Run until the operator exits or input closes
pub fn run<S, C, T>(
    session: &mut SessionController<S, C>,
    term: &mut T,
    export_dir: &Path,
) -> Result<()>
where
    S: AccessStore,
    C: Clock,
    T: Terminal,
{
    loop {
        term.display(BANNER)?;

        let input = match term.prompt("Choose an option: ") {
            Ok(input) => input,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                tracing::debug!("Input closed, leaving menu");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let Some(choice) = MenuChoice::parse(&input) else {
            term.display("Invalid option. Try again.")?;
            continue;
        };

        let result = match choice {
            MenuChoice::Register => identity::prompt_register(session, term),
            MenuChoice::RequestAccess => access::prompt_request(session, term),
            MenuChoice::ViewUsers => identity::list_users(session, term),
            MenuChoice::ViewLogs => logs::prompt_logs(session, term),
            MenuChoice::Export => {
                term.display("")?;
                logs::export(session, term, export_dir, &CsvExporter::new(), &LogView::All)
                    .map(|_| ())
            }
            MenuChoice::Exit => {
                term.display("Goodbye.")?;
                return Ok(());
            }
        };

        if let Err(e) = result {
            if is_end_of_input(&e) {
                return Ok(());
            }
            // The session already rolled back; report and keep the loop alive.
            tracing::debug!(error = %e, ?choice, "Menu action failed");
            term.display(&format!("Error: {:#}", e))?;
        }

        match term.pause() {
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(()),
            other => other?,
        }
    }
}
