//! # Undo/Redo History
//!
//! Linear history of whole-tree snapshots.
//!
//! ## Design
//!
//! - Every committed edit appends an immutable snapshot and moves the cursor to it
//! - Undo/redo only move the cursor; they never re-run a mutation and cannot fail
//! - Committing from a rewound cursor discards everything after it
//! - Unbounded by default; an optional cap on undo levels drops the oldest snapshots
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = History::new(seed_tree);
//! history.commit(next_tree);
//!
//! history.undo();
//! assert_eq!(history.current(), &seed_tree);
//!
//! history.redo();
//! ```

use storefront_model::LayoutTree;
use tracing::debug;

/// One immutable snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub tree: LayoutTree,

    /// Optional label of the edit that produced this snapshot
    pub description: Option<String>,
}

/// Undo/redo history for one editing session
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,

    cursor: usize,

    /// Maximum number of undo levels kept (0 = unlimited)
    max_undo_levels: usize,
}

impl History {
    /// Seed an unbounded history with the loaded tree
    pub fn new(seed: LayoutTree) -> Self {
        Self::with_max_undo_levels(seed, 0)
    }

    /// Seed a history that keeps at most `max_undo_levels` undo steps (0 = unlimited)
    pub fn with_max_undo_levels(seed: LayoutTree, max_undo_levels: usize) -> Self {
        Self {
            entries: vec![HistoryEntry {
                tree: seed,
                description: None,
            }],
            cursor: 0,
            max_undo_levels,
        }
    }

    /// Commit a new snapshot, discarding any redo entries
    pub fn commit(&mut self, tree: LayoutTree) {
        self.push(HistoryEntry {
            tree,
            description: None,
        });
    }

    pub fn commit_with_description(&mut self, tree: LayoutTree, description: impl Into<String>) {
        self.push(HistoryEntry {
            tree,
            description: Some(description.into()),
        });
    }

    fn push(&mut self, entry: HistoryEntry) {
        let discarded = self.entries.len() - self.cursor - 1;
        self.entries.truncate(self.cursor + 1);
        self.entries.push(entry);

        if self.max_undo_levels > 0 && self.entries.len() > self.max_undo_levels + 1 {
            let excess = self.entries.len() - self.max_undo_levels - 1;
            self.entries.drain(..excess);
        }

        self.cursor = self.entries.len() - 1;
        debug!(cursor = self.cursor, discarded, "Committed history entry");
    }

    /// Step back one snapshot. Returns false at the start of history.
    pub fn undo(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }

        self.cursor -= 1;
        debug!(cursor = self.cursor, "Undo");
        true
    }

    /// Step forward one snapshot. Returns false at the tip.
    pub fn redo(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }

        self.cursor += 1;
        debug!(cursor = self.cursor, "Redo");
        true
    }

    /// The live tree
    pub fn current(&self) -> &LayoutTree {
        &self.entries[self.cursor].tree
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn undo_levels(&self) -> usize {
        self.cursor
    }

    pub fn redo_levels(&self) -> usize {
        self.entries.len() - self.cursor - 1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Label of the edit the next undo would revert
    pub fn undo_description(&self) -> Option<&str> {
        if self.can_undo() {
            self.entries[self.cursor].description.as_deref()
        } else {
            None
        }
    }

    /// Label of the edit the next redo would reapply
    pub fn redo_description(&self) -> Option<&str> {
        self.entries
            .get(self.cursor + 1)
            .and_then(|entry| entry.description.as_deref())
    }

    /// Drop all history and start over from `tree`
    pub fn reset(&mut self, tree: LayoutTree) {
        self.entries = vec![HistoryEntry {
            tree,
            description: None,
        }];
        self.cursor = 0;
    }
}
