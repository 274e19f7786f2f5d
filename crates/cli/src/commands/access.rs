//! Access requests

use anyhow::Result;
use gatelog_business::{AccessOutcome, SessionController};
use gatelog_core::Clock;
use gatelog_persistence::AccessStore;

use crate::terminal::Terminal;

pub const FLAG_NOTICE: &str = "⚠️ Flag raised: repeated denied attempts.";

/// Decide, record and print the decision (flag notice first)
pub fn request<S, C, T>(
    session: &mut SessionController<S, C>,
    term: &mut T,
    id: &str,
) -> Result<AccessOutcome>
where
    S: AccessStore,
    C: Clock,
    T: Terminal,
{
    let outcome = session.request_access(id)?;

    if outcome.flag_raised {
        term.display(FLAG_NOTICE)?;
    }
    term.display(&format!(
        "Decision: {} | Reason: {}",
        outcome.decision(),
        outcome.reason()
    ))?;

    Ok(outcome)
}

pub fn prompt_request<S, C, T>(session: &mut SessionController<S, C>, term: &mut T) -> Result<()>
where
    S: AccessStore,
    C: Clock,
    T: Terminal,
{
    term.display("\n--- Access request ---")?;
    let id = term.prompt("Enter ID: ")?;
    request(session, term, &id)?;
    Ok(())
}
