//! # Gatelog Persistence
//!
//! Persistence provider cho Gatelog - hai collections (identities, events),
//! mỗi collection là một JSON array được thay thế toàn bộ khi save.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                    AccessStore                       │
//! │  ┌──────────────────────┐   ┌─────────────────────┐  │
//! │  │    JsonFileStore     │   │     MemoryStore     │  │
//! │  │ users.json logs.json │   │  (tests, failures)  │  │
//! │  └──────────────────────┘   └─────────────────────┘  │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gatelog_persistence::{AccessStore, JsonFileStore};
//!
//! let mut store = JsonFileStore::open("data")?;
//! let identities = store.load_identities()?;
//! store.save_events(&events)?;
//! ```

pub mod error;
pub mod json;
pub mod memory;
pub mod store;

pub use error::{PersistenceError, PersistenceResult};
pub use json::{JsonArrayFile, JsonFileStore, EVENTS_FILE, IDENTITIES_FILE};
pub use memory::MemoryStore;
pub use store::AccessStore;
