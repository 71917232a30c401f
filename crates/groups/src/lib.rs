//! # Switchboard Groups Crate
//!
//! Client-side cache of the groups a session belongs to, kept consistent
//! across three sources of change: request/response calls against the
//! Switchboard API, locally initiated mutations, and push events delivered
//! over the real-time channel.
//!
//! ## Architecture
//!
//! - **Entities**: `Group` and `Message` payloads as the service sends them
//! - **Store**: the entity store, selection tracker and loading flags behind
//!   one shared [`SyncState`]
//! - **Services**: the [`MutationCoordinator`] plus the gateway and
//!   notification contracts it talks to
//! - **Realtime**: the channel contract and the [`EventBridge`] that binds
//!   push topics to cache mutations
//! - **Types**: errors, topics, push payloads and request bodies
//!
//! ## Usage
//!
//! ```rust,ignore
//! use switchboard_groups::{EventBridge, MutationCoordinator, SyncState};
//!
//! let state = SyncState::new();
//! let coordinator = MutationCoordinator::new(gateway, state.clone(), notifier.clone());
//! let bridge = EventBridge::new(state.clone(), notifier);
//!
//! bridge.subscribe(Some(channel.as_ref()));
//! coordinator.list_groups().await;
//! ```

pub mod entities;
pub mod realtime;
pub mod services;
pub mod store;
pub mod types;

pub use entities::{Group, Message};
pub use realtime::{ChannelFrame, EventBridge, EventHandler, LocalChannel, RealtimeChannel};
pub use services::{
    MutationCoordinator, NotificationSink, Notice, NoticeLevel, RecordingNotifier,
    RequestGateway, TracingNotifier,
};
pub use store::{
    CacheSnapshot, EntityStore, GroupCache, LoadingFlag, LoadingFlags, LoadingGuard,
    SelectionTracker, SyncState,
};
pub use types::{
    AddMembersRequest, GatewayError, GatewayResult, GroupId, GroupPatch, MessageId, NewGroup,
    SendMessageRequest, SyncError, SyncResult, Topic, UserId,
};
