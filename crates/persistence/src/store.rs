//! Persistence provider contract
//!
//! Two ordered collections, each loaded whole and saved as a full replace.

use crate::error::PersistenceResult;
use gatelog_core::{DecisionEvent, Identity};

/// Storage for the identity directory and the audit log.
///
/// `load_*` returns an empty sequence when nothing was stored yet. `save_*`
/// replaces the stored collection and must be durable before returning.
pub trait AccessStore {
    fn load_identities(&mut self) -> PersistenceResult<Vec<Identity>>;

    fn save_identities(&mut self, identities: &[Identity]) -> PersistenceResult<()>;

    fn load_events(&mut self) -> PersistenceResult<Vec<DecisionEvent>>;

    fn save_events(&mut self, events: &[DecisionEvent]) -> PersistenceResult<()>;
}
