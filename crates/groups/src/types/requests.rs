//! Request bodies submitted to the remote service.

use serde::{Deserialize, Serialize};

use super::UserId;

/// Request to create a new group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewGroup {
    /// Display name
    pub name: String,
    /// Initial members besides the creator
    #[serde(default)]
    pub members: Vec<UserId>,
    /// Additional service-defined attributes
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl NewGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_members<I, S>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<UserId>,
    {
        self.members = members.into_iter().map(Into::into).collect();
        self
    }
}

/// Partial update of a group; absent fields are left to the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl GroupPatch {
    /// Patch that renames the group
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Request to add members to a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddMembersRequest {
    pub members: Vec<UserId>,
}

/// Request to post a message to a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_patch_omits_unset_fields() {
        let body = serde_json::to_value(GroupPatch::default()).unwrap();
        assert_eq!(body, json!({}));

        let body = serde_json::to_value(GroupPatch::rename("Ops")).unwrap();
        assert_eq!(body, json!({ "name": "Ops" }));
    }

    #[test]
    fn test_new_group_body() {
        let body = serde_json::to_value(NewGroup::new("Ops").with_members(["u1", "u2"])).unwrap();
        assert_eq!(body, json!({ "name": "Ops", "members": ["u1", "u2"] }));
    }
}
