//! # Gatelog Business
//!
//! Business logic layer - identity directory, audit log with repeated-deny
//! flagging, and the session controller that ties them to storage.

pub mod audit;
pub mod config;
pub mod directory;
pub mod error;
pub mod session;

pub use audit::{AuditLog, AuditSummary, EventFilter, LogView};
pub use config::GatelogConfig;
pub use directory::IdentityDirectory;
pub use error::{BusinessError, BusinessResult};
pub use session::{AccessOutcome, SessionController};
