//! # Undo/Redo History
//!
//! Snapshot history over whole documents.
//!
//! ## Design
//!
//! - `past` holds prior states, oldest first
//! - `present` is always defined
//! - `future` holds undone states, nearest redo first
//! - A direct edit ([`History::update`]) clears `future`: no branching redo
//! - Snapshots are shared (`Arc`), so undo/redo never copy a tree
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = History::new(Document::default());
//! history.update(next_tree);
//! history.undo();
//! history.redo();
//! ```

use blockcraft_document::Document;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::debug;

/// Shared, immutable document snapshot
pub type Snapshot = Arc<Document>;

#[derive(Debug, Clone)]
pub struct History {
    past: Vec<Snapshot>,
    present: Snapshot,
    future: VecDeque<Snapshot>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,
}

impl History {
    /// Create a history with default max levels (100)
    pub fn new(initial: Document) -> Self {
        Self::with_max_levels(initial, 100)
    }

    pub fn with_max_levels(initial: Document, max_levels: usize) -> Self {
        Self {
            past: Vec::new(),
            present: Arc::new(initial),
            future: VecDeque::new(),
            max_levels,
        }
    }

    pub fn present(&self) -> &Document {
        &self.present
    }

    pub fn snapshot(&self) -> Snapshot {
        Arc::clone(&self.present)
    }

    /// Prior states, oldest first
    pub fn past(&self) -> impl Iterator<Item = &Document> {
        self.past.iter().map(|s| s.as_ref())
    }

    /// Undone states, nearest redo first
    pub fn future(&self) -> impl Iterator<Item = &Document> {
        self.future.iter().map(|s| s.as_ref())
    }

    /// Commit `next` as the new present. Always succeeds.
    pub fn update(&mut self, next: Document) {
        let previous = std::mem::replace(&mut self.present, Arc::new(next));
        self.past.push(previous);

        if self.max_levels > 0 && self.past.len() > self.max_levels {
            let overflow = self.past.len() - self.max_levels;
            self.past.drain(..overflow);
        }

        self.future.clear();
    }

    /// Step back. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push_front(current);
        debug!(past = self.past.len(), future = self.future.len(), "Undo");
        true
    }

    /// Step forward. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, next);
        self.past.push(current);
        debug!(past = self.past.len(), future = self.future.len(), "Redo");
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.past.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.future.len()
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    /// Start over from `document` with empty past and future
    pub fn reset(&mut self, document: Document) {
        self.past.clear();
        self.future.clear();
        self.present = Arc::new(document);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockcraft_document::BlockNode;

    fn doc(ids: &[&str]) -> Document {
        Document::new(ids.iter().map(|id| BlockNode::new(*id, "core/paragraph")).collect())
    }

    fn states(iter: impl Iterator<Item = Document>) -> Vec<Document> {
        iter.collect()
    }

    #[test]
    fn test_history_creation() {
        let history = History::new(Document::default());
        assert_eq!(history.undo_levels(), 0);
        assert_eq!(history.redo_levels(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(history.present().is_empty());
    }

    #[test]
    fn test_insert_insert_undo_redo_scenario() {
        let mut history = History::new(doc(&[]));

        history.update(doc(&["A"]));
        assert_eq!(states(history.past().cloned()), vec![doc(&[])]);
        assert_eq!(history.present(), &doc(&["A"]));

        history.update(doc(&["A", "B"]));
        assert_eq!(states(history.past().cloned()), vec![doc(&[]), doc(&["A"])]);
        assert_eq!(history.present(), &doc(&["A", "B"]));

        assert!(history.undo());
        assert_eq!(history.present(), &doc(&["A"]));
        assert_eq!(states(history.future().cloned()), vec![doc(&["A", "B"])]);

        assert!(history.redo());
        assert_eq!(history.present(), &doc(&["A", "B"]));
        assert_eq!(history.redo_levels(), 0);
    }

    #[test]
    fn test_future_is_nearest_first() {
        let mut history = History::new(doc(&[]));
        history.update(doc(&["A"]));
        history.update(doc(&["A", "B"]));
        history.undo();
        history.undo();

        assert_eq!(
            states(history.future().cloned()),
            vec![doc(&["A"]), doc(&["A", "B"])]
        );
    }

    #[test]
    fn test_noop_at_edges() {
        let mut history = History::new(doc(&["A"]));
        assert!(!history.undo());
        assert!(!history.redo());
        assert_eq!(history.present(), &doc(&["A"]));
    }

    #[test]
    fn test_new_update_clears_redo() {
        let mut history = History::new(doc(&[]));
        history.update(doc(&["A"]));
        history.undo();
        assert!(history.can_redo());

        history.update(doc(&["B"]));
        assert!(!history.can_redo());
        assert_eq!(history.undo_levels(), 1);
    }

    #[test]
    fn test_max_levels_enforced() {
        let mut history = History::with_max_levels(doc(&[]), 2);
        for id in ["A", "B", "C"] {
            history.update(doc(&[id]));
        }

        assert_eq!(history.undo_levels(), 2);
        history.undo();
        history.undo();
        assert_eq!(history.present(), &doc(&["A"]));
        assert!(!history.can_undo());
    }

    #[test]
    fn test_undo_shares_snapshots() {
        let mut history = History::new(doc(&[]));
        history.update(doc(&["A"]));
        let before = history.snapshot();
        history.update(doc(&["A", "B"]));
        history.undo();
        assert!(Arc::ptr_eq(&before, &history.snapshot()));
    }
}
