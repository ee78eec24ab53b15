//! Snapshot-based undo/redo history.

use std::collections::VecDeque;

/// Whether undo and redo are currently available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryStatus {
    pub can_undo: bool,
    pub can_redo: bool,
}

/// Undo/redo over full surface snapshots.
///
/// The snapshot matching what is on the surface is held as `current`;
/// the undo stack holds the states before it, oldest first, and never
/// grows past `max_history`. At most `max_history + 1` snapshots are
/// retained: `current` plus `max_history` undo entries, which allows
/// exactly `max_history` consecutive undos. The initial state is retained
/// until enough newer states push it out.
#[derive(Debug, Clone)]
pub struct History<T> {
    current: T,
    undo_stack: VecDeque<T>,
    redo_stack: Vec<T>,
    max_history: usize,
}

impl<T: Clone> History<T> {
    /// Start a history whose current state is `initial`.
    pub fn new(initial: T, max_history: usize) -> Self {
        Self {
            current: initial,
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_history,
        }
    }

    /// Record a new state after a drawing operation.
    ///
    /// Clears the redo stack and evicts the oldest state when the undo
    /// stack is over capacity.
    pub fn save_state(&mut self, snapshot: T) {
        let previous = std::mem::replace(&mut self.current, snapshot);
        self.undo_stack.push_back(previous);

        while self.undo_stack.len() > self.max_history {
            self.undo_stack.pop_front();
            log::debug!("History full, evicted oldest snapshot");
        }

        self.redo_stack.clear();
    }

    /// Step back one state. Returns the snapshot to restore, or `None`
    /// when only the oldest retained state is left.
    pub fn undo(&mut self) -> Option<&T> {
        let previous = self.undo_stack.pop_back()?;
        let current = std::mem::replace(&mut self.current, previous);
        self.redo_stack.push(current);
        Some(&self.current)
    }

    /// Step forward one undone state. Returns the snapshot to restore, or
    /// `None` when nothing has been undone.
    pub fn redo(&mut self) -> Option<&T> {
        let next = self.redo_stack.pop()?;
        let current = std::mem::replace(&mut self.current, next);
        self.undo_stack.push_back(current);
        Some(&self.current)
    }

    /// The snapshot matching the committed surface.
    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn status(&self) -> HistoryStatus {
        HistoryStatus {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }

    /// Number of states that can be undone.
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of states that can be redone.
    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_history(&self) -> usize {
        self.max_history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_history_has_nothing_to_undo() {
        let mut history = History::new(0, 10);
        assert_eq!(history.status(), HistoryStatus::default());
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert_eq!(*history.current(), 0);
    }

    #[test]
    fn test_undo_all_returns_to_initial() {
        let max = 10;
        for n in 0..=max {
            let mut history = History::new(0, max);
            for i in 1..=n {
                history.save_state(i);
            }
            for _ in 0..n {
                assert!(history.undo().is_some());
            }
            assert_eq!(*history.current(), 0, "after {n} draws");
            assert!(!history.can_undo());
        }
    }

    #[test]
    fn test_undo_then_redo_restores_state() {
        let mut history = History::new(vec![0u8], 10);
        history.save_state(vec![1]);
        history.save_state(vec![1, 2]);

        assert_eq!(history.undo(), Some(&vec![1]));
        assert!(history.can_redo());
        assert_eq!(history.redo(), Some(&vec![1, 2]));
        assert!(!history.can_redo());
        assert_eq!(history.current(), &vec![1, 2]);
    }

    #[test]
    fn test_save_after_undo_clears_redo() {
        let mut history = History::new(0, 10);
        history.save_state(1);
        history.save_state(2);
        history.undo();
        history.undo();
        assert_eq!(history.redo_len(), 2);

        history.save_state(3);
        assert!(!history.can_redo());
        assert!(history.redo().is_none());
        assert_eq!(*history.current(), 3);
    }

    #[test]
    fn test_eviction_keeps_newest() {
        let max = 5;
        let mut history = History::new(0, max);
        for i in 1..=20 {
            history.save_state(i);
            assert!(history.undo_len() <= max);
        }
        assert_eq!(history.undo_len(), max);

        let mut seen = Vec::new();
        while let Some(&state) = history.undo() {
            seen.push(state);
        }
        assert_eq!(seen, vec![19, 18, 17, 16, 15]);
    }

    #[test]
    fn test_zero_capacity_disables_undo() {
        let mut history = History::new(0, 0);
        history.save_state(1);
        assert!(!history.can_undo());
        assert_eq!(*history.current(), 1);
    }
}
