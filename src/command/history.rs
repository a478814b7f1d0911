use std::collections::VecDeque;

use crate::canvas::Snapshot;

pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Bounded, linear undo/redo log of canvas snapshots.
///
/// The log is never empty: it starts with the snapshot of the fresh canvas and
/// `cursor` always indexes the snapshot matching the live canvas. Committing
/// after an undo discards the redo branch.
#[derive(Debug, Clone)]
pub struct SnapshotHistory {
    entries: VecDeque<Snapshot>,
    cursor: usize,
    capacity: usize,
}

impl SnapshotHistory {
    /// Creates a history holding only `initial`. Capacity is raised to at least 1.
    pub fn new(initial: Snapshot, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut entries = VecDeque::with_capacity(capacity);
        entries.push_back(initial);
        Self {
            entries,
            cursor: 0,
            capacity,
        }
    }

    /// Append a snapshot, dropping any redo entries and evicting the oldest when full
    pub fn commit(&mut self, snapshot: Snapshot) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push_back(snapshot);

        while self.entries.len() > self.capacity {
            self.entries.pop_front();
            log::debug!("History full, evicted oldest snapshot");
        }
        self.cursor = self.entries.len() - 1;
        log::debug!("Committed snapshot {} of {}", self.cursor + 1, self.entries.len());
    }

    /// Step back one snapshot. Returns `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor).cloned()
    }

    /// Step forward one snapshot. Returns `None` at the newest entry.
    pub fn redo(&mut self) -> Option<Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor).cloned()
    }

    /// Check if there is an older snapshot to go back to
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Check if there is a newer snapshot to go forward to
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Number of stored snapshots
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no snapshot is stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the snapshot matching the canvas
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Maximum number of stored snapshots
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot the cursor points at
    pub fn current(&self) -> Option<&Snapshot> {
        self.entries.get(self.cursor)
    }

    /// Forget everything and start over from `initial`
    pub fn reset(&mut self, initial: Snapshot) {
        self.entries.clear();
        self.entries.push_back(initial);
        self.cursor = 0;
    }
}
