//! # Gatelog Core
//!
//! Domain types và các luật quyết định thuần (pure) cho Gatelog.
//!
//! - [`Identity`] / [`IdentityCategory`] - danh tính đã đăng ký
//! - [`DecisionEvent`] / [`Decision`] - một bản ghi trong audit log
//! - [`AccessPolicy`] / [`decide_access`] - luật grant/deny theo giờ
//! - [`count_recent_denies`] - đếm deny trong cửa sổ trailing theo từng ID
//! - [`Clock`] - nguồn thời gian được inject, không đọc trực tiếp `now()`

pub mod clock;
pub mod decision;
pub mod error;
pub mod event;
pub mod identity;

pub use clock::{Clock, FixedClock, SystemClock};
pub use decision::{count_recent_denies, decide_access, AccessPolicy, Verdict};
pub use error::{CoreError, CoreResult};
pub use event::{Decision, DecisionEvent};
pub use identity::{normalize_id, Identity, IdentityCategory};
