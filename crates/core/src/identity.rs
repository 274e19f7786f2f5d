//! # Identity Module
//!
//! Định nghĩa IdentityCategory và Identity cho những gì được phép đi qua cổng.
//! - Person: người
//! - Vehicle: xe
//! - Contractor: nhà thầu, chỉ được vào trong khung giờ cho phép
//! - Other: mọi loại khác

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Chuẩn hóa ID: trim + uppercase.
///
/// Registration and lookup must both go through this so that `a1` and `A1`
/// name the same identity.
pub fn normalize_id(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Loại danh tính.
///
/// Parsing never fails: blank input means [`IdentityCategory::Person`] and
/// anything unrecognized collapses into [`IdentityCategory::Other`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum IdentityCategory {
    #[default]
    Person,
    Vehicle,
    /// Chỉ được GRANT trong khung giờ contractor
    Contractor,
    Other,
}

impl IdentityCategory {
    /// Trả về code string (lowercase) để lưu trữ và export
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentityCategory::Person => "person",
            IdentityCategory::Vehicle => "vehicle",
            IdentityCategory::Contractor => "contractor",
            IdentityCategory::Other => "other",
        }
    }

    /// Parse từ string, case-insensitive
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "" | "person" => IdentityCategory::Person,
            "vehicle" => IdentityCategory::Vehicle,
            "contractor" => IdentityCategory::Contractor,
            _ => IdentityCategory::Other,
        }
    }

    /// Kiểm tra có bị giới hạn theo giờ không
    pub fn is_time_restricted(&self) -> bool {
        matches!(self, IdentityCategory::Contractor)
    }
}

impl From<String> for IdentityCategory {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl fmt::Display for IdentityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Một danh tính đã đăng ký.
///
/// Created once by registration and never mutated afterwards. The `name` and
/// `type` aliases let older data files load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// ID đã chuẩn hóa (uppercase)
    pub id: String,
    /// Tên hiển thị (người hoặc nhãn xe)
    #[serde(alias = "name", default)]
    pub display_name: String,
    /// Loại danh tính
    #[serde(alias = "type", default)]
    pub category: IdentityCategory,
    /// Thời gian đăng ký (UTC)
    pub created_at: DateTime<Utc>,
}

impl Identity {
    /// Tạo Identity mới; ID được chuẩn hóa
    pub fn new(
        id: &str,
        display_name: &str,
        category: IdentityCategory,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: normalize_id(id),
            display_name: display_name.trim().to_string(),
            category,
            created_at,
        }
    }

    /// Kiểm tra ID có khớp không (so sánh sau khi chuẩn hóa)
    pub fn matches_id(&self, raw_id: &str) -> bool {
        self.id == normalize_id(raw_id)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | created {}",
            self.id,
            self.display_name,
            self.category,
            self.created_at
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, false)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 25, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_category_str() {
        assert_eq!(IdentityCategory::Contractor.as_str(), "contractor");
        assert_eq!(IdentityCategory::parse("CONTRACTOR"), IdentityCategory::Contractor);
        assert_eq!(IdentityCategory::parse("  Vehicle "), IdentityCategory::Vehicle);
        assert_eq!(IdentityCategory::parse(""), IdentityCategory::Person);
        assert_eq!(IdentityCategory::parse("drone"), IdentityCategory::Other);
        assert_eq!(IdentityCategory::default(), IdentityCategory::Person);
    }

    #[test]
    fn test_time_restriction() {
        assert!(IdentityCategory::Contractor.is_time_restricted());
        assert!(!IdentityCategory::Person.is_time_restricted());
        assert!(!IdentityCategory::Vehicle.is_time_restricted());
        assert!(!IdentityCategory::Other.is_time_restricted());
    }

    #[test]
    fn test_normalize_id() {
        assert_eq!(normalize_id(" a123 "), "A123");
        assert_eq!(normalize_id("   "), "");
    }

    #[test]
    fn test_identity_creation() {
        let alice = Identity::new("a123", " Alice ", IdentityCategory::Contractor, created());
        assert_eq!(alice.id, "A123");
        assert_eq!(alice.display_name, "Alice");
        assert!(alice.matches_id("A123"));
        assert!(alice.matches_id("a123"));
        assert!(!alice.matches_id("A124"));
    }

    #[test]
    fn test_identity_json_field_names() {
        let truck = Identity::new("T-9", "Truck 9", IdentityCategory::Vehicle, created());
        let json = serde_json::to_string(&truck).unwrap();

        assert!(json.contains("\"display_name\":\"Truck 9\""));
        assert!(json.contains("\"category\":\"vehicle\""));
        assert!(json.contains("\"created_at\":\"2026-01-25T09:30:00Z\""));
    }

    #[test]
    fn test_identity_loads_legacy_record() {
        let json = r#"{
            "id": "B7",
            "name": "Bob",
            "type": "CONTRACTOR",
            "created_at": "2026-01-25T09:30:00+00:00"
        }"#;
        let bob: Identity = serde_json::from_str(json).unwrap();

        assert_eq!(bob.display_name, "Bob");
        assert_eq!(bob.category, IdentityCategory::Contractor);
        assert_eq!(bob.created_at, created());
    }

    #[test]
    fn test_identity_blank_category_defaults_to_person() {
        let json = r#"{"id":"C1","display_name":"Cy","category":"","created_at":"2026-01-25T09:30:00Z"}"#;
        let cy: Identity = serde_json::from_str(json).unwrap();
        assert_eq!(cy.category, IdentityCategory::Person);

        let json = r#"{"id":"C2","display_name":"Cat","created_at":"2026-01-25T09:30:00Z"}"#;
        let cat: Identity = serde_json::from_str(json).unwrap();
        assert_eq!(cat.category, IdentityCategory::Person);
    }

    #[test]
    fn test_identity_display() {
        let alice = Identity::new("A123", "Alice", IdentityCategory::Person, created());
        assert_eq!(
            alice.to_string(),
            "A123 | Alice | person | created 2026-01-25T09:30:00+00:00"
        );
    }
}
