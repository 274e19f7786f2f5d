//! In-memory store
//!
//! Same contract as [`crate::JsonFileStore`] without touching disk. Saves can
//! be made to fail on demand, which is how the rollback paths get tested.

use crate::error::{PersistenceError, PersistenceResult};
use crate::store::AccessStore;
use gatelog_core::{DecisionEvent, Identity};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    identities: Vec<Identity>,
    events: Vec<DecisionEvent>,
    fail_saves: bool,
    save_count: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent save fail (or succeed again)
    pub fn set_fail_saves(&mut self, fail: bool) {
        self.fail_saves = fail;
    }

    pub fn identities(&self) -> &[Identity] {
        &self.identities
    }

    pub fn events(&self) -> &[DecisionEvent] {
        &self.events
    }

    /// Number of successful saves (either collection)
    pub fn save_count(&self) -> usize {
        self.save_count
    }

    fn check_writable(&self) -> PersistenceResult<()> {
        if self.fail_saves {
            return Err(PersistenceError::Unavailable(
                "memory store is failing saves".to_string(),
            ));
        }
        Ok(())
    }
}

impl AccessStore for MemoryStore {
    fn load_identities(&mut self) -> PersistenceResult<Vec<Identity>> {
        Ok(self.identities.clone())
    }

    fn save_identities(&mut self, identities: &[Identity]) -> PersistenceResult<()> {
        self.check_writable()?;
        self.identities = identities.to_vec();
        self.save_count += 1;
        Ok(())
    }

    fn load_events(&mut self) -> PersistenceResult<Vec<DecisionEvent>> {
        Ok(self.events.clone())
    }

    fn save_events(&mut self, events: &[DecisionEvent]) -> PersistenceResult<()> {
        self.check_writable()?;
        self.events = events.to_vec();
        self.save_count += 1;
        Ok(())
    }
}
