//! The single selected group.

use crate::entities::Group;

/// Tracks which group, if any, is selected.
///
/// The tracker does not watch the store on its own. Every path that mutates
/// the store calls [`SelectionTracker::refresh`] or
/// [`SelectionTracker::clear_if`] before it returns, so the held value is
/// never older than the store's entry for the same id.
#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    current: Option<Group>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, group: Option<Group>) {
        self.current = group;
    }

    pub fn current(&self) -> Option<&Group> {
        self.current.as_ref()
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current.as_ref().map(|group| group.id.as_str())
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.current_id() == Some(id)
    }

    /// Swap in the post-mutation entity if it is the selected one.
    pub fn refresh(&mut self, group: &Group) -> bool {
        match self.current.as_mut() {
            Some(current) if current.id == group.id => {
                *current = group.clone();
                true
            }
            _ => false,
        }
    }

    /// Drop the selection if it points at `id`.
    pub fn clear_if(&mut self, id: &str) -> bool {
        if self.is_selected(id) {
            self.current = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_only_touches_matching_id() {
        let mut tracker = SelectionTracker::new();
        tracker.select(Some(Group::new("g1", "A")));

        assert!(!tracker.refresh(&Group::new("g2", "B")));
        assert_eq!(tracker.current().unwrap().name, "A");

        assert!(tracker.refresh(&Group::new("g1", "A2")));
        assert_eq!(tracker.current().unwrap().name, "A2");
    }

    #[test]
    fn test_clear_if() {
        let mut tracker = SelectionTracker::new();
        assert!(!tracker.clear_if("g1"));

        tracker.select(Some(Group::new("g1", "A")));
        assert!(!tracker.clear_if("g2"));
        assert!(tracker.is_selected("g1"));
        assert!(tracker.clear_if("g1"));
        assert!(tracker.current().is_none());
    }
}
