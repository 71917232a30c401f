//! Real-time channel contract and an in-process implementation.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, trace};

/// Callback bound to one topic
pub type EventHandler = Arc<dyn Fn(Value) + Send + Sync>;

/// Topic-based push channel.
///
/// Binding is last-writer-wins per topic name: `on` for a topic that already
/// has a handler replaces it rather than adding a second one.
pub trait RealtimeChannel: Send + Sync {
    fn on(&self, topic: &str, handler: EventHandler);

    fn off(&self, topic: &str);
}

/// A payload addressed to a topic, as queued for delivery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelFrame {
    pub topic: String,
    pub payload: Value,
}

impl ChannelFrame {
    pub fn new(topic: impl Into<String>, payload: Value) -> Self {
        Self {
            topic: topic.into(),
            payload,
        }
    }
}

/// In-process channel delivering frames to bound handlers.
///
/// Hosts that own the network connection decode incoming frames and either
/// call [`LocalChannel::emit`] directly or feed a queue drained by
/// [`LocalChannel::pump`].
#[derive(Default)]
pub struct LocalChannel {
    handlers: RwLock<HashMap<String, EventHandler>>,
}

impl LocalChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `payload` to the handler bound to `topic`.
    ///
    /// Returns `false` when nothing is bound. The handler runs outside the
    /// channel's lock so it may rebind topics.
    pub fn emit(&self, topic: &str, payload: Value) -> bool {
        let handler = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(topic)
            .cloned();

        match handler {
            Some(handler) => {
                trace!(topic, "delivering frame");
                handler(payload);
                true
            }
            None => {
                debug!(topic, "no handler bound, frame dropped");
                false
            }
        }
    }

    /// Drain `frames` into bound handlers until every sender is gone.
    ///
    /// Returns the number of frames that reached a handler.
    pub async fn pump(&self, mut frames: mpsc::Receiver<ChannelFrame>) -> usize {
        let mut delivered = 0;
        while let Some(frame) = frames.recv().await {
            if self.emit(&frame.topic, frame.payload) {
                delivered += 1;
            }
        }
        debug!(delivered, "frame queue closed");
        delivered
    }

    pub fn is_bound(&self, topic: &str) -> bool {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(topic)
    }

    /// Bound topic names, sorted
    pub fn bound_topics(&self) -> Vec<String> {
        let mut topics: Vec<String> = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        topics.sort();
        topics
    }
}

impl RealtimeChannel for LocalChannel {
    fn on(&self, topic: &str, handler: EventHandler) {
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(topic.to_string(), handler);
    }

    fn off(&self, topic: &str) {
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(topic);
    }
}

impl fmt::Debug for LocalChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalChannel")
            .field("topics", &self.bound_topics())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, EventHandler) {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        let handler: EventHandler = Arc::new(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        (count, handler)
    }

    #[test]
    fn test_last_bind_wins() {
        let channel = LocalChannel::new();
        let (first, first_handler) = counter();
        let (second, second_handler) = counter();

        channel.on("group-updated", first_handler);
        channel.on("group-updated", second_handler);
        assert!(channel.emit("group-updated", json!({})));

        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_off_unbinds() {
        let channel = LocalChannel::new();
        let (count, handler) = counter();
        channel.on("group-deleted", handler);
        channel.off("group-deleted");
        channel.off("never-bound");

        assert!(!channel.emit("group-deleted", json!("g1")));
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(channel.bound_topics().is_empty());
    }

    #[tokio::test]
    async fn test_pump_delivers_until_closed() {
        let channel = LocalChannel::new();
        let (count, handler) = counter();
        channel.on("added-to-group", handler);

        let (tx, rx) = mpsc::channel(4);
        tx.send(ChannelFrame::new("added-to-group", json!({ "id": "g1" })))
            .await
            .unwrap();
        tx.send(ChannelFrame::new("typing", json!({}))).await.unwrap();
        drop(tx);

        assert_eq!(channel.pump(rx).await, 1);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
