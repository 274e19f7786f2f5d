//! Command handlers, shared by subcommands and the interactive menu

pub mod access;
pub mod identity;
pub mod logs;
pub mod status;

use gatelog_business::SessionController;
use gatelog_core::SystemClock;
use gatelog_persistence::JsonFileStore;

/// The session the binary runs against
pub type Session = SessionController<JsonFileStore, SystemClock>;
