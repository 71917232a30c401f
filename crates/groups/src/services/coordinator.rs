//! Confirmation-based group operations.
//!
//! Every operation has the same shape: raise its loading flag if it has one,
//! make one remote call, and only once the call succeeds apply a
//! deterministic cache update. A failed call is reported to the notification
//! sink and leaves the cache untouched. Nothing is retried here.

use std::future::Future;
use std::sync::Arc;

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::{NotificationSink, RequestGateway};
use crate::entities::{Group, Message};
use crate::store::{LoadingFlag, SyncState};
use crate::types::{
    AddMembersRequest, GatewayError, GatewayResult, GroupPatch, NewGroup, SendMessageRequest,
    UserId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    ListGroups,
    GetGroup,
    CreateGroup,
    UpdateGroup,
    DeleteGroup,
    AddMembers,
    RemoveMember,
    LeaveGroup,
    ListMessages,
    SendMessage,
}

impl Operation {
    fn name(self) -> &'static str {
        match self {
            Operation::ListGroups => "list_groups",
            Operation::GetGroup => "get_group",
            Operation::CreateGroup => "create_group",
            Operation::UpdateGroup => "update_group",
            Operation::DeleteGroup => "delete_group",
            Operation::AddMembers => "add_members",
            Operation::RemoveMember => "remove_member",
            Operation::LeaveGroup => "leave_group",
            Operation::ListMessages => "list_messages",
            Operation::SendMessage => "send_message",
        }
    }

    /// Reported when the service gives no message of its own
    fn failure_text(self) -> &'static str {
        match self {
            Operation::ListGroups => "Failed to fetch groups",
            Operation::GetGroup => "Failed to fetch group",
            Operation::CreateGroup => "Failed to create group",
            Operation::UpdateGroup => "Failed to update group",
            Operation::DeleteGroup => "Failed to delete group",
            Operation::AddMembers => "Failed to add members",
            Operation::RemoveMember => "Failed to remove member",
            Operation::LeaveGroup => "Failed to leave group",
            Operation::ListMessages => "Failed to fetch messages",
            Operation::SendMessage => "Failed to send message",
        }
    }

    fn success_text(self) -> Option<&'static str> {
        match self {
            Operation::CreateGroup => Some("Group created successfully"),
            Operation::UpdateGroup => Some("Group updated successfully"),
            Operation::DeleteGroup => Some("Group deleted successfully"),
            Operation::AddMembers => Some("Members added successfully"),
            Operation::RemoveMember => Some("Member removed successfully"),
            Operation::LeaveGroup => Some("You left the group"),
            Operation::ListGroups
            | Operation::GetGroup
            | Operation::ListMessages
            | Operation::SendMessage => None,
        }
    }
}

fn group_path(id: &str) -> String {
    format!("/groups/{id}")
}

/// Runs group operations against the remote service and applies their
/// confirmed results to the shared cache.
pub struct MutationCoordinator {
    gateway: Arc<dyn RequestGateway>,
    state: SyncState,
    notifier: Arc<dyn NotificationSink>,
}

impl MutationCoordinator {
    pub fn new(
        gateway: Arc<dyn RequestGateway>,
        state: SyncState,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            gateway,
            state,
            notifier,
        }
    }

    pub fn state(&self) -> &SyncState {
        &self.state
    }

    /// Fetch every group of the session and replace the collection with it.
    pub async fn list_groups(&self) -> bool {
        let _loading = self.state.begin(LoadingFlag::Groups);
        let op = Operation::ListGroups;

        let Some(groups) = self.call::<Vec<Group>, _>(op, self.gateway.get("/groups")).await else {
            return false;
        };

        debug!(count = groups.len(), "group list replaced");
        self.state.write(|cache| cache.replace_groups(groups));
        true
    }

    /// Fetch one group without touching the cache.
    pub async fn get_group(&self, id: &str) -> Option<Group> {
        let op = Operation::GetGroup;
        self.call(op, self.gateway.get(&group_path(id))).await
    }

    pub async fn create_group(&self, new_group: NewGroup) -> Option<Group> {
        let _loading = self.state.begin(LoadingFlag::Create);
        let op = Operation::CreateGroup;

        let body = self.encode(op, &new_group)?;
        let group: Group = self.call(op, self.gateway.post("/groups", body)).await?;

        debug!(group_id = %group.id, "group created");
        // a push for the same group may have landed first
        self.state.write(|cache| cache.upsert_group(group.clone()));
        self.report_success(op);
        Some(group)
    }

    /// Submit `patch` and store the canonical group the service returns.
    pub async fn update_group(&self, id: &str, patch: GroupPatch) -> Option<Group> {
        let op = Operation::UpdateGroup;

        let body = self.encode(op, &patch)?;
        let group: Group = self.call(op, self.gateway.put(&group_path(id), body)).await?;

        debug!(group_id = %group.id, "group updated");
        self.state.write(|cache| cache.upsert_group(group.clone()));
        self.report_success(op);
        Some(group)
    }

    pub async fn delete_group(&self, id: &str) -> bool {
        let op = Operation::DeleteGroup;

        if self
            .call::<IgnoredAny, _>(op, self.gateway.delete(&group_path(id)))
            .await
            .is_none()
        {
            return false;
        }

        debug!(group_id = %id, "group deleted");
        self.state.write(|cache| cache.remove_group(id));
        self.report_success(op);
        true
    }

    pub async fn add_members(&self, id: &str, members: Vec<UserId>) -> Option<Group> {
        let op = Operation::AddMembers;

        let body = self.encode(op, &AddMembersRequest { members })?;
        let path = format!("{}/members", group_path(id));
        let group: Group = self.call(op, self.gateway.post(&path, body)).await?;

        debug!(group_id = %group.id, members = group.members.len(), "members added");
        self.state.write(|cache| cache.upsert_group(group.clone()));
        self.report_success(op);
        Some(group)
    }

    pub async fn remove_member(&self, id: &str, member_id: &str) -> Option<Group> {
        let op = Operation::RemoveMember;

        let path = format!("{}/members/{member_id}", group_path(id));
        let group: Group = self.call(op, self.gateway.delete(&path)).await?;

        debug!(group_id = %group.id, member_id, "member removed");
        self.state.write(|cache| cache.upsert_group(group.clone()));
        self.report_success(op);
        Some(group)
    }

    pub async fn leave_group(&self, id: &str) -> bool {
        let op = Operation::LeaveGroup;

        let path = format!("{}/leave", group_path(id));
        let body = Value::Object(serde_json::Map::new());
        if self
            .call::<IgnoredAny, _>(op, self.gateway.post(&path, body))
            .await
            .is_none()
        {
            return false;
        }

        debug!(group_id = %id, "left group");
        self.state.write(|cache| cache.remove_group(id));
        self.report_success(op);
        true
    }

    /// Load the message stream of `id`, replacing whatever stream was loaded.
    ///
    /// Callers invoke this when the active group changes.
    pub async fn list_messages(&self, id: &str) -> bool {
        let _loading = self.state.begin(LoadingFlag::Messages);
        let op = Operation::ListMessages;

        let path = format!("{}/messages", group_path(id));
        let Some(messages) = self.call::<Vec<Message>, _>(op, self.gateway.get(&path)).await
        else {
            return false;
        };

        debug!(group_id = %id, count = messages.len(), "message stream replaced");
        self.state.write(|cache| cache.set_messages(messages));
        true
    }

    /// Post a message and append the service's copy to the end of the stream.
    ///
    /// Concurrent sends land in the order their calls complete.
    pub async fn send_message(&self, id: &str, content: impl Into<String>) -> Option<Message> {
        let op = Operation::SendMessage;

        let body = self.encode(
            op,
            &SendMessageRequest {
                content: content.into(),
            },
        )?;
        let path = format!("{}/messages", group_path(id));
        let message: Message = self.call(op, self.gateway.post(&path, body)).await?;

        debug!(group_id = %id, message_id = %message.id, "message sent");
        self.state.write(|cache| cache.append_message(message.clone()));
        Some(message)
    }

    async fn call<T, F>(&self, op: Operation, request: F) -> Option<T>
    where
        T: DeserializeOwned,
        F: Future<Output = GatewayResult<Value>>,
    {
        let result = request
            .await
            .and_then(|payload| serde_json::from_value(payload).map_err(GatewayError::from));

        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.report_failure(op, &error);
                None
            }
        }
    }

    fn encode<B: Serialize>(&self, op: Operation, body: &B) -> Option<Value> {
        match serde_json::to_value(body) {
            Ok(value) => Some(value),
            Err(error) => {
                self.report_failure(op, &GatewayError::from(error));
                None
            }
        }
    }

    fn report_failure(&self, op: Operation, error: &GatewayError) {
        warn!(operation = op.name(), %error, "remote call failed");
        self.notifier
            .error(error.user_message().unwrap_or(op.failure_text()));
    }

    fn report_success(&self, op: Operation) {
        if let Some(text) = op.success_text() {
            self.notifier.success(text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_operation_has_failure_text() {
        let ops = [
            Operation::ListGroups,
            Operation::GetGroup,
            Operation::CreateGroup,
            Operation::UpdateGroup,
            Operation::DeleteGroup,
            Operation::AddMembers,
            Operation::RemoveMember,
            Operation::LeaveGroup,
            Operation::ListMessages,
            Operation::SendMessage,
        ];

        for op in ops {
            assert!(op.failure_text().starts_with("Failed to"), "{}", op.name());
        }
        assert!(Operation::ListGroups.success_text().is_none());
        assert!(Operation::CreateGroup.success_text().is_some());
    }

    #[test]
    fn test_group_path() {
        assert_eq!(group_path("g1"), "/groups/g1");
    }
}
