use serde_json::Value;

/// Snapshot-based undo/redo stack.
///
/// Every mutation is copy-on-write, so the pre-mutation document is
/// already a complete snapshot and undo is a straight value swap.
pub struct UndoStack {
    /// Pre-edit snapshots, oldest first.
    stack: Vec<Value>,
    /// Snapshots undone and available for redo.
    redo_stack: Vec<Value>,
    /// Maximum number of undo levels.
    max_size: usize,
}

impl UndoStack {
    pub fn new() -> Self {
        Self {
            stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size: 100,
        }
    }

    /// Records the document as it was before a mutation.
    pub fn push(&mut self, snapshot: Value) {
        self.stack.push(snapshot);
        // New edits invalidate the redo history.
        self.redo_stack.clear();
        if self.stack.len() > self.max_size {
            self.stack.remove(0);
        }
    }

    /// Swaps the current document for the previous snapshot. Returns the
    /// restored document, or `None` when there is nothing to undo.
    pub fn undo(&mut self, current: &Value) -> Option<Value> {
        let restored = self.stack.pop()?;
        self.redo_stack.push(current.clone());
        Some(restored)
    }

    /// Swaps the current document for the last undone snapshot.
    pub fn redo(&mut self, current: &Value) -> Option<Value> {
        let restored = self.redo_stack.pop()?;
        self.stack.push(current.clone());
        Some(restored)
    }

    pub fn can_undo(&self) -> bool {
        !self.stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_undo_restores_snapshot() {
        let mut undo = UndoStack::new();
        let before = json!({"a": 1});
        let after = json!({"a": 2});
        undo.push(before.clone());
        assert!(undo.can_undo());

        let restored = undo.undo(&after).unwrap();
        assert_eq!(restored, before);
        assert!(undo.can_redo());

        let redone = undo.redo(&restored).unwrap();
        assert_eq!(redone, after);
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut undo = UndoStack::new();
        undo.push(json!(1));
        let _ = undo.undo(&json!(2));
        assert!(undo.can_redo());
        undo.push(json!(3));
        assert!(!undo.can_redo());
    }

    #[test]
    fn test_empty_stack_returns_none() {
        let mut undo = UndoStack::new();
        assert!(undo.undo(&json!(null)).is_none());
        assert!(undo.redo(&json!(null)).is_none());
    }

    #[test]
    fn test_max_size_drops_oldest() {
        let mut undo = UndoStack::new();
        for i in 0..150 {
            undo.push(json!(i));
        }
        assert_eq!(undo.stack.len(), 100);
        assert_eq!(undo.stack.first(), Some(&json!(50)));
    }
}
