//! Push topics and the payloads delivered on them.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{GroupId, UserId};
use crate::entities::{Group, Message};

/// Named topic on the real-time channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topic {
    /// A message was posted to a group
    NewMessageInGroup,
    /// The session user was added to a group
    AddedToGroup,
    /// The session user was removed from a group
    RemovedFromGroup,
    /// A group's attributes or membership changed
    GroupUpdated,
    /// A group was deleted
    GroupDeleted,
    /// Another member left a group
    MemberLeftGroup,
}

impl Topic {
    /// The fixed subscription set bound by the event bridge
    pub const ALL: [Topic; 6] = [
        Topic::NewMessageInGroup,
        Topic::AddedToGroup,
        Topic::RemovedFromGroup,
        Topic::GroupUpdated,
        Topic::GroupDeleted,
        Topic::MemberLeftGroup,
    ];

    /// Wire name of the topic
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::NewMessageInGroup => "new-message-in-group",
            Topic::AddedToGroup => "added-to-group",
            Topic::RemovedFromGroup => "removed-from-group",
            Topic::GroupUpdated => "group-updated",
            Topic::GroupDeleted => "group-deleted",
            Topic::MemberLeftGroup => "member-left-group",
        }
    }

    /// Resolve a wire name back to a topic
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|topic| topic.as_str() == name)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of `new-message-in-group`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessageEvent {
    pub message: Message,
    pub group_id: GroupId,
}

/// Payload of `removed-from-group`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovedFromGroupEvent {
    pub group_id: GroupId,
}

/// Payload of `member-left-group`.
///
/// `group` is the canonical post-departure state supplied by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberLeftEvent {
    pub group_id: GroupId,
    pub user_id: UserId,
    pub group: Group,
}

/// Decoded push event, one variant per topic
#[derive(Debug, Clone, PartialEq)]
pub enum GroupEvent {
    NewMessage(NewMessageEvent),
    AddedToGroup(Group),
    RemovedFromGroup(RemovedFromGroupEvent),
    GroupUpdated(Group),
    GroupDeleted(GroupId),
    MemberLeft(MemberLeftEvent),
}

impl GroupEvent {
    /// Decode the raw payload delivered on `topic`
    pub fn decode(topic: Topic, payload: serde_json::Value) -> Result<Self, serde_json::Error> {
        let event = match topic {
            Topic::NewMessageInGroup => GroupEvent::NewMessage(serde_json::from_value(payload)?),
            Topic::AddedToGroup => GroupEvent::AddedToGroup(serde_json::from_value(payload)?),
            Topic::RemovedFromGroup => {
                GroupEvent::RemovedFromGroup(serde_json::from_value(payload)?)
            }
            Topic::GroupUpdated => GroupEvent::GroupUpdated(serde_json::from_value(payload)?),
            Topic::GroupDeleted => GroupEvent::GroupDeleted(serde_json::from_value(payload)?),
            Topic::MemberLeftGroup => GroupEvent::MemberLeft(serde_json::from_value(payload)?),
        };
        Ok(event)
    }

    /// Topic this event was delivered on
    pub fn topic(&self) -> Topic {
        match self {
            GroupEvent::NewMessage(_) => Topic::NewMessageInGroup,
            GroupEvent::AddedToGroup(_) => Topic::AddedToGroup,
            GroupEvent::RemovedFromGroup(_) => Topic::RemovedFromGroup,
            GroupEvent::GroupUpdated(_) => Topic::GroupUpdated,
            GroupEvent::GroupDeleted(_) => Topic::GroupDeleted,
            GroupEvent::MemberLeft(_) => Topic::MemberLeftGroup,
        }
    }

    /// Group the event is about
    pub fn group_id(&self) -> &str {
        match self {
            GroupEvent::NewMessage(event) => &event.group_id,
            GroupEvent::AddedToGroup(group) | GroupEvent::GroupUpdated(group) => &group.id,
            GroupEvent::RemovedFromGroup(event) => &event.group_id,
            GroupEvent::GroupDeleted(group_id) => group_id,
            GroupEvent::MemberLeft(event) => &event.group_id,
        }
    }
}
