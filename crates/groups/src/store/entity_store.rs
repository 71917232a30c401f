//! Keyed group collection plus the active group's message stream.

use crate::entities::{Group, Message};

/// In-memory collection of groups in insertion order, and the message
/// stream of at most one active group.
///
/// Every operation is total: removing an absent id is a no-op and upserting
/// an absent id appends it.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    groups: Vec<Group>,
    messages: Vec<Message>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups in insertion order
    pub fn list(&self) -> &[Group] {
        &self.groups
    }

    pub fn get(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|group| group.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Replace the stored entity with the same id, or append.
    ///
    /// The incoming group replaces the stored one wholesale; no fields are
    /// merged.
    pub fn upsert(&mut self, group: Group) {
        match self.groups.iter_mut().find(|existing| existing.id == group.id) {
            Some(existing) => *existing = group,
            None => self.groups.push(group),
        }
    }

    /// Remove the group with this id. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.groups.len();
        self.groups.retain(|group| group.id != id);
        self.groups.len() != before
    }

    /// Replace the whole group collection.
    ///
    /// Later duplicates in `groups` win, keeping the first occurrence's
    /// position, so ids stay unique even if the service repeats one.
    pub fn replace_all(&mut self, groups: Vec<Group>) {
        self.groups.clear();
        for group in groups {
            self.upsert(group);
        }
    }

    /// Messages of the active group in stream order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Replace the message stream wholesale
    pub fn set_messages(&mut self, messages: Vec<Message>) {
        self.messages = messages;
    }

    /// Append after every message currently in the stream
    pub fn append_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn clear(&mut self) {
        self.groups.clear();
        self.messages.clear();
    }
}
