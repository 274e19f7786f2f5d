//! Identity Directory - registered identities in registration order
//!
//! IDs are normalized (trim + uppercase) on the way in, both for
//! registration and lookup, so uniqueness is case-insensitive.

use chrono::{DateTime, Utc};
use gatelog_core::{normalize_id, CoreError, CoreResult, Identity, IdentityCategory};

#[derive(Debug, Clone, Default)]
pub struct IdentityDirectory {
    identities: Vec<Identity>,
}

impl IdentityDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a loaded collection, keeping its order
    pub fn from_identities(identities: Vec<Identity>) -> Self {
        Self { identities }
    }

    /// Register a new identity.
    ///
    /// Blank IDs and IDs already present (case-insensitive) are rejected
    /// without touching the directory.
    pub fn register(
        &mut self,
        id: &str,
        display_name: &str,
        category: IdentityCategory,
        created_at: DateTime<Utc>,
    ) -> CoreResult<&Identity> {
        let id = normalize_id(id);
        if id.is_empty() {
            return Err(CoreError::EmptyIdentifier);
        }
        if self.find(&id).is_some() {
            return Err(CoreError::DuplicateIdentifier(id));
        }

        self.identities
            .push(Identity::new(&id, display_name, category, created_at));
        Ok(&self.identities[self.identities.len() - 1])
    }

    /// Look up by ID (normalized the same way as registration)
    pub fn find(&self, id: &str) -> Option<&Identity> {
        let id = normalize_id(id);
        self.identities.iter().find(|i| i.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub fn list_all(&self) -> &[Identity] {
        &self.identities
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    /// Undo the most recent registration whose save failed
    pub(crate) fn discard_last(&mut self) -> Option<Identity> {
        self.identities.pop()
    }
}
