//! Decision Engine - luật grant/deny thuần
//!
//! Rules:
//! - Unknown ID: DENY "Unknown ID"
//! - contractor: GRANT only inside `[start, end)` local hours
//! - person / vehicle / other: GRANT "Valid ID"
//!
//! Everything here is a pure function of its inputs; the caller supplies the
//! hour.

use crate::error::{CoreError, CoreResult};
use crate::event::{Decision, DecisionEvent};
use crate::identity::Identity;
use serde::{Deserialize, Serialize};

/// Kết quả của decision engine: (decision, reason)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub decision: Decision,
    pub reason: String,
}

impl Verdict {
    pub fn grant(reason: impl Into<String>) -> Self {
        Self {
            decision: Decision::Grant,
            reason: reason.into(),
        }
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            decision: Decision::Deny,
            reason: reason.into(),
        }
    }

    pub fn is_grant(&self) -> bool {
        self.decision == Decision::Grant
    }
}

/// Access policy with tunable contractor hours and repeated-deny detection.
///
/// Every field has a serde default, so a partial config block only overrides
/// what it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPolicy {
    /// Contractor window start (inclusive)
    #[serde(default = "default_contractor_start_hour")]
    pub contractor_start_hour: u32,

    /// Contractor window end (exclusive)
    #[serde(default = "default_contractor_end_hour")]
    pub contractor_end_hour: u32,

    /// Trailing per-identity window for repeated-deny detection
    #[serde(default = "default_deny_window")]
    pub deny_window: usize,

    /// Denies inside the window that raise the flag
    #[serde(default = "default_deny_threshold")]
    pub deny_threshold: usize,
}

fn default_contractor_start_hour() -> u32 {
    6
}

fn default_contractor_end_hour() -> u32 {
    20
}

fn default_deny_window() -> usize {
    5
}

fn default_deny_threshold() -> usize {
    3
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self {
            contractor_start_hour: default_contractor_start_hour(),
            contractor_end_hour: default_contractor_end_hour(),
            deny_window: default_deny_window(),
            deny_threshold: default_deny_threshold(),
        }
    }
}

pub const UNKNOWN_ID_REASON: &str = "Unknown ID";
pub const VALID_ID_REASON: &str = "Valid ID";

impl AccessPolicy {
    /// Check the policy is internally consistent
    pub fn validate(&self) -> CoreResult<()> {
        if self.contractor_start_hour > 23 || self.contractor_end_hour > 24 {
            return Err(CoreError::InvalidPolicy(format!(
                "contractor hours out of range: {}-{}",
                self.contractor_start_hour, self.contractor_end_hour
            )));
        }
        if self.contractor_start_hour >= self.contractor_end_hour {
            return Err(CoreError::InvalidPolicy(format!(
                "contractor start hour {} must be before end hour {}",
                self.contractor_start_hour, self.contractor_end_hour
            )));
        }
        if self.deny_window == 0 {
            return Err(CoreError::InvalidPolicy(
                "deny window must be at least 1".to_string(),
            ));
        }
        if self.deny_threshold == 0 || self.deny_threshold > self.deny_window {
            return Err(CoreError::InvalidPolicy(format!(
                "deny threshold {} must be within 1..={}",
                self.deny_threshold, self.deny_window
            )));
        }
        Ok(())
    }

    /// `(06:00–20:00)` with the default hours
    pub fn contractor_hours_label(&self) -> String {
        format!(
            "({:02}:00–{:02}:00)",
            self.contractor_start_hour, self.contractor_end_hour
        )
    }

    /// `Repeated denies (3+ of last 5)` with the default window
    pub fn repeated_deny_flag(&self) -> String {
        format!(
            "Repeated denies ({}+ of last {})",
            self.deny_threshold, self.deny_window
        )
    }

    pub fn within_contractor_hours(&self, hour: u32) -> bool {
        self.contractor_start_hour <= hour && hour < self.contractor_end_hour
    }

    /// Decide access for an identity (or its absence) at a local hour.
    pub fn decide(&self, identity: Option<&Identity>, hour: u32) -> Verdict {
        let Some(identity) = identity else {
            return Verdict::deny(UNKNOWN_ID_REASON);
        };

        if identity.category.is_time_restricted() {
            let label = self.contractor_hours_label();
            if self.within_contractor_hours(hour) {
                return Verdict::grant(format!("Contractor within permitted hours {}", label));
            }
            return Verdict::deny(format!("Contractor outside permitted hours {}", label));
        }

        Verdict::grant(VALID_ID_REASON)
    }

    /// Whether `count` denies in the trailing window reach the flag threshold
    pub fn is_repeated_deny(&self, count: usize) -> bool {
        count >= self.deny_threshold
    }
}

/// Decide with the default policy.
pub fn decide_access(identity: Option<&Identity>, current_hour: u32) -> Verdict {
    AccessPolicy::default().decide(identity, current_hour)
}

/// Count DENY outcomes among the last `window` events of one identity.
///
/// The window is taken over that identity's own events (in log order), not
/// over the trailing events of the whole log.
pub fn count_recent_denies(events: &[DecisionEvent], identity_id: &str, window: usize) -> usize {
    events
        .iter()
        .rev()
        .filter(|e| e.identity_id == identity_id)
        .take(window)
        .filter(|e| e.decision.is_deny())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::IdentityCategory;
    use chrono::{TimeZone, Utc};

    fn identity(category: IdentityCategory) -> Identity {
        let created = Utc.with_ymd_and_hms(2026, 1, 25, 8, 0, 0).unwrap();
        Identity::new("A123", "Alice", category, created)
    }

    fn event(id: &str, decision: Decision) -> DecisionEvent {
        let ts = Utc.with_ymd_and_hms(2026, 1, 25, 8, 0, 0).unwrap();
        DecisionEvent::new(ts, id, None, decision, "test")
    }

    #[test]
    fn test_unknown_id_always_denied() {
        for hour in 0..24 {
            assert_eq!(decide_access(None, hour), Verdict::deny("Unknown ID"));
        }
    }

    #[test]
    fn test_non_contractors_always_granted() {
        for category in [
            IdentityCategory::Person,
            IdentityCategory::Vehicle,
            IdentityCategory::Other,
        ] {
            let who = identity(category);
            for hour in 0..24 {
                assert_eq!(decide_access(Some(&who), hour), Verdict::grant("Valid ID"));
            }
        }
    }

    #[test]
    fn test_contractor_hours() {
        let contractor = identity(IdentityCategory::Contractor);
        for hour in 0..24 {
            let verdict = decide_access(Some(&contractor), hour);
            if (6..20).contains(&hour) {
                assert_eq!(
                    verdict,
                    Verdict::grant("Contractor within permitted hours (06:00–20:00)")
                );
            } else {
                assert_eq!(
                    verdict,
                    Verdict::deny("Contractor outside permitted hours (06:00–20:00)")
                );
            }
        }
    }

    #[test]
    fn test_contractor_boundaries() {
        let contractor = identity(IdentityCategory::Contractor);
        assert!(!decide_access(Some(&contractor), 5).is_grant());
        assert!(decide_access(Some(&contractor), 6).is_grant());
        assert!(decide_access(Some(&contractor), 19).is_grant());
        assert!(!decide_access(Some(&contractor), 20).is_grant());
    }

    #[test]
    fn test_custom_contractor_hours() {
        let policy = AccessPolicy {
            contractor_start_hour: 8,
            contractor_end_hour: 17,
            ..AccessPolicy::default()
        };
        let contractor = identity(IdentityCategory::Contractor);

        assert_eq!(
            policy.decide(Some(&contractor), 7),
            Verdict::deny("Contractor outside permitted hours (08:00–17:00)")
        );
        assert!(policy.decide(Some(&contractor), 8).is_grant());
    }

    #[test]
    fn test_policy_validation() {
        assert!(AccessPolicy::default().validate().is_ok());

        let inverted = AccessPolicy {
            contractor_start_hour: 20,
            contractor_end_hour: 6,
            ..AccessPolicy::default()
        };
        assert!(inverted.validate().is_err());

        let threshold_too_big = AccessPolicy {
            deny_threshold: 6,
            ..AccessPolicy::default()
        };
        assert!(threshold_too_big.validate().is_err());

        let empty_window = AccessPolicy {
            deny_window: 0,
            ..AccessPolicy::default()
        };
        assert!(empty_window.validate().is_err());
    }

    #[test]
    fn test_policy_partial_json() {
        let policy: AccessPolicy = serde_json::from_str(r#"{ "deny_window": 10 }"#).unwrap();
        assert_eq!(policy.deny_window, 10);
        assert_eq!(policy.deny_threshold, 3);
        assert_eq!(policy.contractor_start_hour, 6);
    }

    #[test]
    fn test_default_flag_text() {
        assert_eq!(
            AccessPolicy::default().repeated_deny_flag(),
            "Repeated denies (3+ of last 5)"
        );
    }

    #[test]
    fn test_count_recent_denies_per_identity_window() {
        // A's last 5 events are D D G D D; the interleaved B events must not
        // push A's older denies out of the window.
        let events = vec![
            event("A", Decision::Deny),
            event("B", Decision::Grant),
            event("A", Decision::Deny),
            event("B", Decision::Grant),
            event("B", Decision::Grant),
            event("A", Decision::Grant),
            event("B", Decision::Deny),
            event("A", Decision::Deny),
            event("A", Decision::Deny),
        ];

        assert_eq!(count_recent_denies(&events, "A", 5), 4);
        assert_eq!(count_recent_denies(&events, "B", 5), 1);
        assert_eq!(count_recent_denies(&events, "A", 2), 2);
        assert_eq!(count_recent_denies(&events, "C", 5), 0);
    }

    #[test]
    fn test_count_recent_denies_drops_old_events() {
        let mut events = vec![event("A", Decision::Deny); 3];
        events.extend(vec![event("A", Decision::Grant); 5]);

        assert_eq!(count_recent_denies(&events, "A", 5), 0);
        assert_eq!(count_recent_denies(&events, "A", 8), 3);
    }
}
