//! Status overview

use anyhow::Result;
use gatelog_business::{GatelogConfig, SessionController};
use gatelog_core::Clock;
use gatelog_persistence::AccessStore;

use crate::terminal::Terminal;

pub fn show_status<S, C, T>(
    session: &SessionController<S, C>,
    term: &mut T,
    config: &GatelogConfig,
) -> Result<()>
where
    S: AccessStore,
    C: Clock,
    T: Terminal,
{
    let policy = session.policy();

    term.display("📊 Gatelog Status")?;
    term.display(&format!("   Data directory:   {}", config.data_dir.display()))?;
    term.display(&format!("   Export directory: {}", config.export_dir.display()))?;
    term.display(&format!("   Identities:       {}", session.identities().len()))?;
    term.display(&format!(
        "   Contractor hours: {}",
        policy.contractor_hours_label()
    ))?;
    term.display(&format!("   Flag rule:        {}", policy.repeated_deny_flag()))?;
    term.display("")?;
    term.display(&session.summary().summary_text())?;
    Ok(())
}
