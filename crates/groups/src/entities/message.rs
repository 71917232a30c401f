use serde::{Deserialize, Serialize};

use crate::types::{GroupId, MessageId, UserId};

/// A message in a group's stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Opaque unique identity
    #[serde(alias = "_id")]
    pub id: MessageId,
    /// Owning group
    #[serde(alias = "group")]
    pub group_id: GroupId,
    /// Sending user
    #[serde(default)]
    pub sender: UserId,
    /// Message body
    #[serde(default)]
    pub content: String,
    /// Creation timestamp as sent by the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Service-defined attributes
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Message {
    pub fn new(
        id: impl Into<MessageId>,
        group_id: impl Into<GroupId>,
        sender: impl Into<UserId>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            group_id: group_id.into(),
            sender: sender.into(),
            content: content.into(),
            created_at: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Check whether this message belongs to the given group
    pub fn belongs_to(&self, group_id: &str) -> bool {
        self.group_id == group_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_wire_names() {
        let message: Message = serde_json::from_value(json!({
            "_id": "m1",
            "group": "g1",
            "sender": "u1",
            "content": "hi",
            "createdAt": "2024-05-01T10:00:00Z",
        }))
        .unwrap();

        assert_eq!(message.id, "m1");
        assert!(message.belongs_to("g1"));
        assert_eq!(message.created_at.as_deref(), Some("2024-05-01T10:00:00Z"));

        let encoded = serde_json::to_value(&message).unwrap();
        assert_eq!(encoded["groupId"], json!("g1"));
    }
}
