//! # Event Module
//!
//! Định nghĩa Decision và DecisionEvent - một dòng trong audit log.
//! Events là immutable sau khi được persist; chỉ `flag` được gắn một lần lúc tạo.

use crate::identity::Identity;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kết quả của một yêu cầu truy cập.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Decision {
    Grant,
    Deny,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Grant => "GRANT",
            Decision::Deny => "DENY",
        }
    }

    pub fn is_deny(&self) -> bool {
        matches!(self, Decision::Deny)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Một sự kiện quyết định trong audit log.
///
/// `display_name` and `category` are copied from the identity at request
/// time (both empty for an unknown ID), so the log stays readable even if the
/// directory changes later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionEvent {
    /// Thời điểm yêu cầu (UTC)
    pub timestamp: DateTime<Utc>,
    /// ID được yêu cầu (đã chuẩn hóa, có thể không tồn tại trong directory)
    #[serde(alias = "user_id")]
    pub identity_id: String,
    #[serde(alias = "name", default)]
    pub display_name: String,
    #[serde(alias = "type", default)]
    pub category: String,
    pub decision: Decision,
    /// Lý do dạng human-readable
    pub reason: String,
    /// Cờ cảnh báo (ví dụ: deny lặp lại)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
}

impl DecisionEvent {
    /// Tạo event cho một identity đã biết hoặc chưa biết
    pub fn new(
        timestamp: DateTime<Utc>,
        identity_id: &str,
        identity: Option<&Identity>,
        decision: Decision,
        reason: &str,
    ) -> Self {
        Self {
            timestamp,
            identity_id: identity_id.to_string(),
            display_name: identity.map(|i| i.display_name.clone()).unwrap_or_default(),
            category: identity
                .map(|i| i.category.as_str().to_string())
                .unwrap_or_default(),
            decision,
            reason: reason.to_string(),
            flag: None,
        }
    }

    pub fn with_flag(mut self, flag: &str) -> Self {
        self.flag = Some(flag.to_string());
        self
    }

    pub fn is_flagged(&self) -> bool {
        self.flag.is_some()
    }

    /// Timestamp dạng `2026-01-25T10:00:00+00:00` (dùng cho hiển thị và export)
    pub fn timestamp_string(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, false)
    }
}

impl fmt::Display for DecisionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {}",
            self.timestamp_string(),
            self.identity_id,
            self.decision,
            self.reason
        )?;
        if let Some(ref flag) = self.flag {
            write!(f, " | FLAG: {}", flag)?;
        }
        Ok(())
    }
}
