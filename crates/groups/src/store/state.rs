//! Shared session state and the reconciliation entry points.

use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;
use tracing::debug;

use super::{EntityStore, LoadingFlag, LoadingFlags, LoadingGuard, SelectionTracker};
use crate::entities::{Group, Message};

/// Store, selection and flags for one session.
///
/// Mutations from the coordinator and the event bridge go through the
/// methods below, each of which leaves the selection consistent with the
/// store before returning.
#[derive(Debug, Default)]
pub struct GroupCache {
    store: EntityStore,
    selection: SelectionTracker,
    pub(crate) flags: LoadingFlags,
}

impl GroupCache {
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    pub fn flags(&self) -> LoadingFlags {
        self.flags
    }

    /// Replace the whole collection; groups missing from `groups` are dropped.
    ///
    /// A selection that survives is refreshed, one that was dropped is cleared.
    pub(crate) fn replace_groups(&mut self, groups: Vec<Group>) {
        self.store.replace_all(groups);

        let Some(id) = self.selection.current_id().map(str::to_owned) else {
            return;
        };
        match self.store.get(&id).cloned() {
            Some(fresh) => {
                self.selection.refresh(&fresh);
            }
            None => {
                self.selection.clear_if(&id);
                debug!(group_id = %id, "selected group no longer listed, selection cleared");
            }
        }
    }

    /// Upsert and re-derive the selection.
    pub(crate) fn upsert_group(&mut self, group: Group) {
        if self.selection.refresh(&group) {
            debug!(group_id = %group.id, "selected group refreshed");
        }
        self.store.upsert(group);
    }

    /// Remove and clear the selection if it pointed at `id`.
    pub(crate) fn remove_group(&mut self, id: &str) -> bool {
        let removed = self.store.remove(id);
        if self.selection.clear_if(id) {
            debug!(group_id = %id, "selection cleared");
        }
        removed
    }

    pub(crate) fn set_messages(&mut self, messages: Vec<Message>) {
        self.store.set_messages(messages);
    }

    pub(crate) fn append_message(&mut self, message: Message) {
        self.store.append_message(message);
    }

    /// Append only if `group_id` is the selected group.
    pub(crate) fn append_message_if_selected(&mut self, group_id: &str, message: Message) -> bool {
        if self.selection.is_selected(group_id) {
            self.store.append_message(message);
            true
        } else {
            false
        }
    }

    fn clear(&mut self) {
        self.store.clear();
        self.selection.select(None);
        self.flags = LoadingFlags::default();
    }
}

/// Point-in-time copy of the read model for presentation code
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheSnapshot {
    pub groups: Vec<Group>,
    pub messages: Vec<Message>,
    pub selected: Option<Group>,
    pub flags: LoadingFlags,
}

/// Handle to the session's [`GroupCache`].
///
/// Clones share the same cache. Every access takes one coarse lock and runs
/// to completion, so a coordinator continuation and an event handler never
/// interleave inside a mutation.
#[derive(Debug, Clone, Default)]
pub struct SyncState {
    inner: Arc<RwLock<GroupCache>>,
}

impl SyncState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` against the cache under the read lock
    pub fn read<R>(&self, f: impl FnOnce(&GroupCache) -> R) -> R {
        // a poisoned cache is still consistent
        let cache = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&cache)
    }

    pub(crate) fn write<R>(&self, f: impl FnOnce(&mut GroupCache) -> R) -> R {
        let mut cache = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut cache)
    }

    /// Raise `flag` until the returned guard is dropped
    pub fn begin(&self, flag: LoadingFlag) -> LoadingGuard {
        LoadingGuard::raise(self, flag)
    }

    pub fn groups(&self) -> Vec<Group> {
        self.read(|cache| cache.store.list().to_vec())
    }

    pub fn group(&self, id: &str) -> Option<Group> {
        self.read(|cache| cache.store.get(id).cloned())
    }

    pub fn messages(&self) -> Vec<Message> {
        self.read(|cache| cache.store.messages().to_vec())
    }

    pub fn selected(&self) -> Option<Group> {
        self.read(|cache| cache.selection.current().cloned())
    }

    pub fn flags(&self) -> LoadingFlags {
        self.read(|cache| cache.flags)
    }

    /// Select a group, or clear the selection with `None`
    pub fn select(&self, group: Option<Group>) {
        self.write(|cache| cache.selection.select(group));
    }

    pub fn snapshot(&self) -> CacheSnapshot {
        self.read(|cache| CacheSnapshot {
            groups: cache.store.list().to_vec(),
            messages: cache.store.messages().to_vec(),
            selected: cache.selection.current().cloned(),
            flags: cache.flags,
        })
    }

    /// Drop everything; used when the session ends
    pub fn clear(&self) {
        self.write(GroupCache::clear);
    }
}
