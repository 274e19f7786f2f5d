//! Session Controller - one operator action at a time
//!
//! Each action runs to completion: look up, decide, append, persist. Both
//! collections are written after every mutating action. If storage fails,
//! the in-memory change is rolled back and the error is returned, so memory
//! never runs ahead of what the next load would see.

use crate::audit::{AuditLog, AuditSummary, LogView};
use crate::directory::IdentityDirectory;
use crate::error::BusinessResult;
use gatelog_core::{
    normalize_id, AccessPolicy, Clock, Decision, DecisionEvent, Identity, IdentityCategory,
};
use gatelog_persistence::AccessStore;

/// Result of one access request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessOutcome {
    /// The event as appended (flag included)
    pub event: DecisionEvent,
    pub flag_raised: bool,
}

impl AccessOutcome {
    pub fn decision(&self) -> Decision {
        self.event.decision
    }

    pub fn reason(&self) -> &str {
        &self.event.reason
    }
}

/// Which collection an action changed; it is saved last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Changed {
    Identities,
    Events,
}

pub struct SessionController<S, C> {
    store: S,
    clock: C,
    policy: AccessPolicy,
    directory: IdentityDirectory,
    log: AuditLog,
}

impl<S: AccessStore, C: Clock> SessionController<S, C> {
    /// Load both collections once and take ownership of the store
    pub fn open(mut store: S, clock: C, policy: AccessPolicy) -> BusinessResult<Self> {
        policy.validate()?;
        let identities = store.load_identities()?;
        let events = store.load_events()?;
        tracing::debug!(
            identities = identities.len(),
            events = events.len(),
            "Session state loaded"
        );

        Ok(Self {
            store,
            clock,
            policy,
            directory: IdentityDirectory::from_identities(identities),
            log: AuditLog::from_events(events),
        })
    }

    /// Register an identity and persist.
    ///
    /// Empty and duplicate IDs fail with a `CoreError` and change nothing.
    pub fn register(
        &mut self,
        id: &str,
        display_name: &str,
        category: IdentityCategory,
    ) -> BusinessResult<Identity> {
        let created_at = self.clock.now_utc();
        let identity = self
            .directory
            .register(id, display_name, category, created_at)?
            .clone();

        if let Err(e) = self.persist(Changed::Identities) {
            self.directory.discard_last();
            tracing::warn!(id = %identity.id, error = %e, "Registration rolled back");
            return Err(e);
        }

        tracing::info!(id = %identity.id, category = %identity.category, "Identity registered");
        Ok(identity)
    }

    /// Decide an access request, record it and persist.
    ///
    /// An unregistered ID is not an error: it is recorded as DENY
    /// "Unknown ID".
    pub fn request_access(&mut self, id: &str) -> BusinessResult<AccessOutcome> {
        let identity_id = normalize_id(id);
        let hour = self.clock.local_hour();
        let timestamp = self.clock.now_utc();

        let identity = self.directory.find(&identity_id);
        let verdict = self.policy.decide(identity, hour);
        let event = DecisionEvent::new(
            timestamp,
            &identity_id,
            identity,
            verdict.decision,
            &verdict.reason,
        );

        let event = self.log.record(event, &self.policy).clone();
        let flag_raised = event.is_flagged();

        if let Err(e) = self.persist(Changed::Events) {
            self.log.discard_last();
            tracing::warn!(identity_id = %identity_id, error = %e, "Access request rolled back");
            return Err(e);
        }

        tracing::info!(
            identity_id = %event.identity_id,
            decision = %event.decision,
            reason = %event.reason,
            hour,
            "Access decided"
        );

        Ok(AccessOutcome { event, flag_raised })
    }

    /// Write both collections, the changed one last.
    ///
    /// Each save is a full atomic replace, so a failure on the changed
    /// collection leaves its old contents on disk.
    fn persist(&mut self, changed: Changed) -> BusinessResult<()> {
        match changed {
            Changed::Identities => {
                self.store.save_events(self.log.events())?;
                self.store.save_identities(self.directory.list_all())?;
            }
            Changed::Events => {
                self.store.save_identities(self.directory.list_all())?;
                self.store.save_events(self.log.events())?;
            }
        }
        Ok(())
    }

    pub fn find(&self, id: &str) -> Option<&Identity> {
        self.directory.find(id)
    }

    pub fn identities(&self) -> &[Identity] {
        self.directory.list_all()
    }

    pub fn events(&self) -> &[DecisionEvent] {
        self.log.events()
    }

    pub fn view(&self, view: &LogView) -> Vec<&DecisionEvent> {
        self.log.view(view)
    }

    pub fn summary(&self) -> AuditSummary {
        self.log.summary()
    }

    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
