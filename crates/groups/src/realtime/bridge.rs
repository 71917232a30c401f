//! Binds push topics to cache mutations.
//!
//! The bridge moves between two states, unsubscribed and subscribed. Going
//! from subscribed to subscribed again first unbinds the earlier handlers, so
//! each topic has at most one live binding.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use tracing::{debug, info, warn};

use super::{EventHandler, RealtimeChannel};
use crate::services::NotificationSink;
use crate::store::SyncState;
use crate::types::{GroupEvent, SyncError, SyncResult, Topic};

/// Subscribes the session cache to the real-time channel
pub struct EventBridge {
    applier: EventApplier,
    bound: Mutex<Vec<Topic>>,
}

impl EventBridge {
    pub fn new(state: SyncState, notifier: Arc<dyn NotificationSink>) -> Self {
        Self {
            applier: EventApplier { state, notifier },
            bound: Mutex::new(Vec::new()),
        }
    }

    /// Bind a handler for every topic in [`Topic::ALL`].
    ///
    /// Without a channel this is a no-op. If the bridge is already
    /// subscribed, the previous bindings are removed before rebinding.
    pub fn subscribe(&self, channel: Option<&dyn RealtimeChannel>) {
        let Some(channel) = channel else {
            debug!("no realtime channel, skipping subscribe");
            return;
        };

        let mut bound = self.bound();
        if !bound.is_empty() {
            debug!("already subscribed, dropping previous bindings");
            unbind_all(channel, &mut bound);
        }

        for topic in Topic::ALL {
            let applier = self.applier.clone();
            let handler: EventHandler = Arc::new(move |payload| {
                if let Err(error) = applier.handle(topic, payload) {
                    warn!(%error, "push event dropped");
                }
            });
            channel.on(topic.as_str(), handler);
            bound.push(topic);
        }

        info!(topics = bound.len(), "subscribed to group events");
    }

    /// Unbind all six topics. Safe to call when not subscribed.
    pub fn unsubscribe(&self, channel: Option<&dyn RealtimeChannel>) {
        let Some(channel) = channel else {
            debug!("no realtime channel, skipping unsubscribe");
            return;
        };

        let mut bound = self.bound();
        let was_subscribed = !bound.is_empty();
        unbind_all(channel, &mut bound);

        if was_subscribed {
            info!("unsubscribed from group events");
        }
    }

    pub fn is_subscribed(&self) -> bool {
        !self.bound().is_empty()
    }

    pub fn subscribed_topics(&self) -> Vec<Topic> {
        self.bound().clone()
    }

    /// Decode and apply a payload delivered on `topic`.
    pub fn handle(&self, topic: Topic, payload: Value) -> SyncResult<()> {
        self.applier.handle(topic, payload)
    }

    /// Apply an already decoded event.
    pub fn apply(&self, event: GroupEvent) {
        self.applier.apply(event);
    }

    fn bound(&self) -> MutexGuard<'_, Vec<Topic>> {
        self.bound.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn unbind_all(channel: &dyn RealtimeChannel, bound: &mut Vec<Topic>) {
    for topic in Topic::ALL {
        channel.off(topic.as_str());
    }
    bound.clear();
}

/// The state each bound handler captures
#[derive(Clone)]
struct EventApplier {
    state: SyncState,
    notifier: Arc<dyn NotificationSink>,
}

impl EventApplier {
    fn handle(&self, topic: Topic, payload: Value) -> SyncResult<()> {
        let event =
            GroupEvent::decode(topic, payload).map_err(|source| SyncError::payload(topic, source))?;
        self.apply(event);
        Ok(())
    }

    fn apply(&self, event: GroupEvent) {
        let topic = event.topic();
        debug!(%topic, group_id = %event.group_id(), "applying push event");

        match event {
            GroupEvent::NewMessage(event) => {
                let appended = self
                    .state
                    .write(|cache| cache.append_message_if_selected(&event.group_id, event.message));
                if !appended {
                    debug!(group_id = %event.group_id, "message for inactive group dropped");
                }
            }
            GroupEvent::AddedToGroup(group) => {
                let name = group.name.clone();
                self.state.write(|cache| cache.upsert_group(group));
                self.notifier.info(&format!("You were added to {name}"));
            }
            GroupEvent::RemovedFromGroup(event) => {
                if self.state.write(|cache| cache.remove_group(&event.group_id)) {
                    self.notifier.info("You were removed from a group");
                }
            }
            GroupEvent::GroupUpdated(group) => {
                self.state.write(|cache| cache.upsert_group(group));
            }
            GroupEvent::GroupDeleted(group_id) => {
                if self.state.write(|cache| cache.remove_group(&group_id)) {
                    self.notifier.info("A group you belonged to was deleted");
                }
            }
            GroupEvent::MemberLeft(event) => {
                debug!(group_id = %event.group_id, user_id = %event.user_id, "member left");
                self.state.write(|cache| cache.upsert_group(event.group));
            }
        }
    }
}
