use serde::{Deserialize, Serialize};

use crate::types::{GroupId, UserId};

/// A membership-scoped group as the service describes it.
///
/// Attributes the client does not interpret are kept in `extra` so the
/// payload survives a round trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Opaque unique identity
    #[serde(alias = "_id")]
    pub id: GroupId,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Member identities in service order
    #[serde(default)]
    pub members: Vec<UserId>,
    /// Service-defined attributes
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Group {
    /// Create a group with no members
    pub fn new(id: impl Into<GroupId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            members: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }

    /// Replace the member list
    pub fn with_members<I, S>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<UserId>,
    {
        self.members = members.into_iter().map(Into::into).collect();
        self
    }

    /// Check whether a user is a member
    pub fn has_member(&self, user_id: &str) -> bool {
        self.members.iter().any(|member| member == user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_group_accepts_underscore_id() {
        let group: Group = serde_json::from_value(json!({
            "_id": "g1",
            "name": "A",
            "members": ["u1"],
        }))
        .unwrap();

        assert_eq!(group.id, "g1");
        assert!(group.has_member("u1"));
        assert!(!group.has_member("u2"));
    }

    #[test]
    fn test_group_keeps_unknown_attributes() {
        let payload = json!({
            "id": "g1",
            "name": "A",
            "members": [],
            "admin": "u1",
            "avatar": { "url": "https://cdn.example/a.png" },
        });

        let group: Group = serde_json::from_value(payload.clone()).unwrap();
        assert_eq!(group.extra.get("admin"), Some(&json!("u1")));
        assert_eq!(serde_json::to_value(&group).unwrap(), payload);
    }

    #[test]
    fn test_group_defaults_missing_fields() {
        let group: Group = serde_json::from_value(json!({ "id": "g1" })).unwrap();
        assert_eq!(group, Group::new("g1", ""));
    }
}
