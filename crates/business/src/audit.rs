//! Audit Log - append-only decision events
//!
//! Events are kept in request order. The only mutation after append is the
//! one-time repeated-deny flag, set on the event just appended and before it
//! is persisted.

use gatelog_core::{count_recent_denies, normalize_id, AccessPolicy, Decision, DecisionEvent};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct AuditLog {
    events: Vec<DecisionEvent>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a loaded collection. Flags are taken as stored, never
    /// recomputed.
    pub fn from_events(events: Vec<DecisionEvent>) -> Self {
        Self { events }
    }

    /// Append as given: no checks, flag left untouched
    pub fn append(&mut self, event: DecisionEvent) {
        self.events.push(event);
    }

    /// Append and apply the repeated-deny rule to the new event.
    ///
    /// The new event counts toward its own window. Returns the event as
    /// stored, flag included.
    pub fn record(&mut self, mut event: DecisionEvent, policy: &AccessPolicy) -> &DecisionEvent {
        event.flag = None;
        let is_deny = event.decision.is_deny();
        self.append(event);
        let idx = self.events.len() - 1;

        if is_deny {
            let identity_id = &self.events[idx].identity_id;
            let denies = count_recent_denies(&self.events, identity_id, policy.deny_window);
            if policy.is_repeated_deny(denies) {
                tracing::info!(
                    identity_id = %identity_id,
                    denies,
                    window = policy.deny_window,
                    "Flag raised: repeated denied attempts"
                );
                self.events[idx].flag = Some(policy.repeated_deny_flag());
            }
        }

        &self.events[idx]
    }

    pub fn events(&self) -> &[DecisionEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Lazily filter, preserving log order
    pub fn filter<'a, 'f>(
        &'a self,
        filter: &'f EventFilter,
    ) -> impl Iterator<Item = &'a DecisionEvent> + 'f
    where
        'a: 'f,
    {
        self.events.iter().filter(move |e| filter.matches(e))
    }

    /// Materialize one of the operator views
    pub fn view(&self, view: &LogView) -> Vec<&DecisionEvent> {
        let filter = view.to_filter();
        self.filter(&filter).collect()
    }

    pub fn summary(&self) -> AuditSummary {
        AuditSummary::from_events(&self.events)
    }

    /// Undo the most recent append whose save failed
    pub(crate) fn discard_last(&mut self) -> Option<DecisionEvent> {
        self.events.pop()
    }
}

/// Event Filter - lọc events theo điều kiện
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Lọc theo identity ID (normalized)
    pub identity_id: Option<String>,
    /// Lọc theo decision
    pub decision: Option<Decision>,
    /// Chỉ lấy events có flag
    pub only_flagged: bool,
}

impl EventFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identity(mut self, identity_id: &str) -> Self {
        self.identity_id = Some(normalize_id(identity_id));
        self
    }

    pub fn decision(mut self, decision: Decision) -> Self {
        self.decision = Some(decision);
        self
    }

    pub fn flagged_only(mut self) -> Self {
        self.only_flagged = true;
        self
    }

    /// Kiểm tra event có match filter không
    pub fn matches(&self, event: &DecisionEvent) -> bool {
        if let Some(ref id) = self.identity_id {
            if event.identity_id != *id {
                return false;
            }
        }

        if let Some(decision) = self.decision {
            if event.decision != decision {
                return false;
            }
        }

        if self.only_flagged && !event.is_flagged() {
            return false;
        }

        true
    }
}

/// Operator-facing views over the audit log
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogView {
    #[default]
    All,
    Identity(String),
    Denied,
    Flagged,
}

impl LogView {
    pub fn to_filter(&self) -> EventFilter {
        match self {
            LogView::All => EventFilter::new(),
            LogView::Identity(id) => EventFilter::new().identity(id),
            LogView::Denied => EventFilter::new().decision(Decision::Deny),
            LogView::Flagged => EventFilter::new().flagged_only(),
        }
    }

    pub fn label(&self) -> String {
        match self {
            LogView::All => "all".to_string(),
            LogView::Identity(id) => format!("id {}", normalize_id(id)),
            LogView::Denied => "denied".to_string(),
            LogView::Flagged => "flagged".to_string(),
        }
    }
}

/// Totals over the audit log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditSummary {
    pub total: usize,
    pub grants: usize,
    pub denies: usize,
    pub flagged: usize,
    /// Deny count per identity, sorted by ID
    pub denies_by_identity: BTreeMap<String, usize>,
}

impl AuditSummary {
    pub fn from_events(events: &[DecisionEvent]) -> Self {
        let mut summary = Self {
            total: events.len(),
            ..Self::default()
        };

        for event in events {
            match event.decision {
                Decision::Grant => summary.grants += 1,
                Decision::Deny => {
                    summary.denies += 1;
                    *summary
                        .denies_by_identity
                        .entry(event.identity_id.clone())
                        .or_insert(0) += 1;
                }
            }
            if event.is_flagged() {
                summary.flagged += 1;
            }
        }

        summary
    }

    pub fn summary_text(&self) -> String {
        format!(
            "Audit Summary:\n\
             - Total events: {}\n\
             - Granted: {}\n\
             - Denied: {} ({:.1}%)\n\
             - Flagged: {}",
            self.total,
            self.grants,
            self.denies,
            (self.denies as f64 / self.total.max(1) as f64) * 100.0,
            self.flagged
        )
    }
}
