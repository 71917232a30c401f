//! Real-time channel contract and the push-event bridge.

pub mod bridge;
pub mod channel;

pub use bridge::EventBridge;
pub use channel::{ChannelFrame, EventHandler, LocalChannel, RealtimeChannel};
