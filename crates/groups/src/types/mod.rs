//! Shared types for the group sync layer.
//!
//! Error definitions, push-topic names and payloads, and the request bodies
//! submitted to the remote service.

pub mod errors;
pub mod events;
pub mod requests;

pub use errors::{GatewayError, GatewayResult, SyncError, SyncResult};
pub use events::*;
pub use requests::*;

// Identities are opaque strings minted by the service
pub type GroupId = String;
pub type MessageId = String;
pub type UserId = String;
