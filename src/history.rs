//! Bounded undo/redo over whole snapshots.
//!
//! Every mutation pushes a full copy of the state; undo and redo move a
//! cursor over the stored entries. Pushing while the cursor sits in the
//! middle of the stack truncates everything after it, so a redo branch is
//! discarded the moment a new edit lands.

use log::debug;

#[derive(Debug, Clone)]
struct HistoryEntry<T> {
    data: T,
    label: String,
}

/// Snapshot history with a fixed capacity. The oldest entry is evicted once
/// the bound is reached; the initial state counts as an entry.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: Vec<HistoryEntry<T>>,
    current: usize,
    max_entries: usize,
}

impl<T: Clone> History<T> {
    pub fn new(initial: T, max_entries: usize) -> Self {
        Self {
            entries: vec![HistoryEntry {
                data: initial,
                label: "initial".to_string(),
            }],
            current: 0,
            max_entries: max_entries.max(1),
        }
    }

    /// Record a new state. Entries past the cursor are dropped first.
    pub fn push_state(&mut self, data: T, label: &str) {
        self.entries.truncate(self.current + 1);
        self.entries.push(HistoryEntry {
            data,
            label: label.to_string(),
        });
        if self.entries.len() > self.max_entries {
            self.entries.remove(0);
        } else {
            self.current += 1;
        }
        debug!("history: push '{label}' ({} entries)", self.entries.len());
    }

    /// Step back one entry, returning the state to restore.
    pub fn undo(&mut self) -> Option<&T> {
        if self.current == 0 {
            return None;
        }
        self.current -= 1;
        Some(&self.entries[self.current].data)
    }

    /// Step forward one entry, returning the state to restore.
    pub fn redo(&mut self) -> Option<&T> {
        if self.current + 1 >= self.entries.len() {
            return None;
        }
        self.current += 1;
        Some(&self.entries[self.current].data)
    }

    pub fn can_undo(&self) -> bool {
        self.current > 0
    }

    pub fn can_redo(&self) -> bool {
        self.current + 1 < self.entries.len()
    }

    /// The state at the cursor.
    pub fn current(&self) -> &T {
        &self.entries[self.current].data
    }

    /// Label of the entry at the cursor.
    pub fn current_label(&self) -> &str {
        &self.entries[self.current].label
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop everything but the current state.
    pub fn clear(&mut self) {
        let kept = self.entries.swap_remove(self.current);
        self.entries.clear();
        self.entries.push(kept);
        self.current = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undo_then_redo_round_trips() {
        let mut history = History::new(0, 50);
        history.push_state(1, "one");
        history.push_state(2, "two");
        assert_eq!(history.undo(), Some(&1));
        assert_eq!(history.undo(), Some(&0));
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), Some(&1));
        assert_eq!(history.redo(), Some(&2));
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn push_after_undo_discards_the_redo_branch() {
        let mut history = History::new(0, 50);
        history.push_state(1, "one");
        history.push_state(2, "two");
        history.undo();
        history.push_state(9, "nine");
        assert!(!history.can_redo());
        assert_eq!(history.current(), &9);
        assert_eq!(history.undo(), Some(&1));
    }

    #[test]
    fn oldest_entry_is_evicted_at_the_bound() {
        let mut history = History::new(0, 3);
        history.push_state(1, "one");
        history.push_state(2, "two");
        history.push_state(3, "three");
        assert_eq!(history.len(), 3);
        assert_eq!(history.current(), &3);
        // Undoing to the bottom now lands on 1, not the evicted 0.
        history.undo();
        assert_eq!(history.undo(), Some(&1));
        assert_eq!(history.undo(), None);
    }

    #[test]
    fn labels_track_the_cursor() {
        let mut history = History::new(0, 50);
        history.push_state(1, "add person");
        assert_eq!(history.current_label(), "add person");
        history.undo();
        assert_eq!(history.current_label(), "initial");
    }

    #[test]
    fn clear_keeps_only_the_current_state() {
        let mut history = History::new(0, 50);
        history.push_state(1, "one");
        history.push_state(2, "two");
        history.undo();
        history.clear();
        assert_eq!(history.len(), 1);
        assert_eq!(history.current(), &1);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }
}
