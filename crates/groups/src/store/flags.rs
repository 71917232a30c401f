//! Busy indicators per operation class.

use serde::Serialize;

use super::state::SyncState;

/// Operation class with its own busy indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingFlag {
    /// Group list fetch
    Groups,
    /// Message stream fetch
    Messages,
    /// Group creation
    Create,
}

/// Independent boolean registers read by presentation code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadingFlags {
    pub groups_loading: bool,
    pub messages_loading: bool,
    pub create_in_flight: bool,
}

impl LoadingFlags {
    pub fn get(&self, flag: LoadingFlag) -> bool {
        match flag {
            LoadingFlag::Groups => self.groups_loading,
            LoadingFlag::Messages => self.messages_loading,
            LoadingFlag::Create => self.create_in_flight,
        }
    }

    pub fn set(&mut self, flag: LoadingFlag, value: bool) {
        match flag {
            LoadingFlag::Groups => self.groups_loading = value,
            LoadingFlag::Messages => self.messages_loading = value,
            LoadingFlag::Create => self.create_in_flight = value,
        }
    }
}

/// Holds a flag raised until dropped.
///
/// Dropping clears the flag whether the operation succeeded, failed, or its
/// future was dropped mid-flight.
#[must_use = "the flag is cleared as soon as the guard is dropped"]
pub struct LoadingGuard {
    state: SyncState,
    flag: LoadingFlag,
}

impl LoadingGuard {
    pub(crate) fn raise(state: &SyncState, flag: LoadingFlag) -> Self {
        state.write(|cache| cache.flags.set(flag, true));
        Self {
            state: state.clone(),
            flag,
        }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        let flag = self.flag;
        self.state.write(|cache| cache.flags.set(flag, false));
    }
}
