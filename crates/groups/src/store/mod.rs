//! The client-side read model.
//!
//! [`EntityStore`], [`SelectionTracker`] and [`LoadingFlags`] are owned by a
//! single [`GroupCache`]; [`SyncState`] shares that cache between the
//! mutation coordinator, the event bridge and presentation code.

pub mod entity_store;
pub mod flags;
pub mod selection;
pub mod state;

pub use entity_store::EntityStore;
pub use flags::{LoadingFlag, LoadingFlags, LoadingGuard};
pub use selection::SelectionTracker;
pub use state::{CacheSnapshot, GroupCache, SyncState};
