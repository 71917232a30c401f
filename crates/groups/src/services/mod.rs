//! Service layer for the group sync core.
//!
//! The [`MutationCoordinator`] runs each user-initiated operation as one
//! request/response cycle against a [`RequestGateway`] followed by a cache
//! update, reporting outcomes to a [`NotificationSink`].

pub mod coordinator;
pub mod gateway;
pub mod notifier;

pub use coordinator::MutationCoordinator;
pub use gateway::RequestGateway;
pub use notifier::{NotificationSink, Notice, NoticeLevel, RecordingNotifier, TracingNotifier};
