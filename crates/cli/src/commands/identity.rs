//! Identity registration and listing

use anyhow::Result;
use gatelog_business::{BusinessError, SessionController};
use gatelog_core::{normalize_id, Clock, CoreError, Identity, IdentityCategory};
use gatelog_persistence::AccessStore;

use crate::terminal::Terminal;

/// Register and report the result.
///
/// Returns `None` when the ID was rejected (empty or taken); storage
/// failures are errors.
pub fn register<S, C, T>(
    session: &mut SessionController<S, C>,
    term: &mut T,
    id: &str,
    name: &str,
    category: IdentityCategory,
) -> Result<Option<Identity>>
where
    S: AccessStore,
    C: Clock,
    T: Terminal,
{
    match session.register(id, name, category) {
        Ok(identity) => {
            term.display(&format!(
                "Registered: {} ({})",
                identity.id, identity.display_name
            ))?;
            Ok(Some(identity))
        }
        Err(BusinessError::Core(CoreError::EmptyIdentifier)) => {
            term.display("ID cannot be empty.")?;
            Ok(None)
        }
        Err(BusinessError::Core(CoreError::DuplicateIdentifier(_))) => {
            term.display("That ID already exists.")?;
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Interactive registration: ID first, name and type only if the ID is free
pub fn prompt_register<S, C, T>(session: &mut SessionController<S, C>, term: &mut T) -> Result<()>
where
    S: AccessStore,
    C: Clock,
    T: Terminal,
{
    term.display("\n--- Register person/vehicle ---")?;
    let id = term.prompt("Create an ID (e.g. A123): ")?;

    if normalize_id(&id).is_empty() {
        term.display("ID cannot be empty.")?;
        return Ok(());
    }
    if session.find(&id).is_some() {
        term.display("That ID already exists.")?;
        return Ok(());
    }

    let name = term.prompt("Name (person/vehicle label): ")?;
    let category = IdentityCategory::parse(&term.prompt("Type (person/vehicle/contractor): ")?);

    register(session, term, &id, &name, category)?;
    Ok(())
}

pub fn list_users<S, C, T>(session: &SessionController<S, C>, term: &mut T) -> Result<()>
where
    S: AccessStore,
    C: Clock,
    T: Terminal,
{
    term.display("\n--- Registered users ---")?;
    if session.identities().is_empty() {
        term.display("No users registered yet.")?;
        return Ok(());
    }

    for identity in session.identities() {
        term.display(&format!("- {}", identity))?;
    }
    Ok(())
}
