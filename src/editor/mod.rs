pub mod collapse;
pub mod undo;

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde_json::Value;
use thiserror::Error;

use crate::document::{mutate, ChildKind, DocState, Document, MutateError, NodePath, Stats};

pub use collapse::CollapseSet;
pub use undo::UndoStack;

/// Host-supplied save hook. When present, "save" hands the current
/// document to the host instead of writing a file.
pub type SaveHook = Box<dyn FnMut(&Value) -> Result<()>>;

/// Where a save ended up.
#[derive(Debug, PartialEq, Eq)]
pub enum SaveTarget {
    /// Handed to the host's save hook.
    Hook,
    /// Written to a file.
    File(PathBuf),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("document is read-only")]
    ReadOnly,
    #[error(transparent)]
    Mutate(#[from] MutateError),
    #[error("invalid JSON: {0}")]
    Parse(String),
}

/// One editing session: the document, its UI state, and edit history.
///
/// Every mutating entry point goes through [`Editor::apply`], which
/// snapshots the pre-edit document for undo and installs the new value.
/// No-op mutations (stale paths) leave the history untouched.
pub struct Editor {
    document: Document,
    collapse: CollapseSet,
    undo: UndoStack,
    read_only: bool,
    on_save: Option<SaveHook>,
}

impl Editor {
    /// Editor over a blank `{}` document.
    pub fn new() -> Self {
        Self::with_document(Document::new())
    }

    pub fn with_document(document: Document) -> Self {
        Self {
            document,
            collapse: CollapseSet::new(),
            undo: UndoStack::new(),
            read_only: false,
            on_save: None,
        }
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn set_on_save(&mut self, hook: SaveHook) {
        self.on_save = Some(hook);
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn value(&self) -> &Value {
        self.document.value()
    }

    pub fn collapse(&self) -> &CollapseSet {
        &self.collapse
    }

    pub fn state(&self) -> DocState {
        self.document.state()
    }

    pub fn stats(&self) -> Stats {
        self.document.stats()
    }

    /// Collapse toggling is view state, allowed even when read-only.
    pub fn toggle_collapse(&mut self, path: &NodePath) {
        self.collapse.toggle(path);
    }

    fn guard(&self) -> Result<(), EditError> {
        if self.read_only {
            Err(EditError::ReadOnly)
        } else {
            Ok(())
        }
    }

    /// Installs a mutated document, snapshotting the old one for undo.
    /// Skipped entirely when the mutation turned out to be a no-op.
    fn apply(&mut self, next: Value) {
        if next != *self.document.value() {
            self.undo.push(self.document.value().clone());
            self.document.replace(next);
        }
    }

    pub fn set_value(&mut self, path: &NodePath, new_value: Value) -> Result<(), EditError> {
        self.guard()?;
        self.apply(mutate::set_value(self.document.value(), path, new_value));
        Ok(())
    }

    /// Commits freshly typed scalar text, re-inferring its type.
    pub fn set_scalar_text(&mut self, path: &NodePath, text: &str) -> Result<(), EditError> {
        self.set_value(path, mutate::coerce_scalar(text))
    }

    pub fn delete(&mut self, path: &NodePath) -> Result<(), EditError> {
        self.guard()?;
        self.apply(mutate::delete_at(self.document.value(), path));
        // Stale collapse entries under the deleted subtree must not
        // re-appear if a new node later reuses the same path.
        self.collapse.prune_prefix(path);
        Ok(())
    }

    pub fn insert_child(&mut self, path: &NodePath, kind: ChildKind) -> Result<(), EditError> {
        self.guard()?;
        self.apply(mutate::insert_child(self.document.value(), path, kind));
        Ok(())
    }

    pub fn rename_key(
        &mut self,
        parent_path: &NodePath,
        old_key: &str,
        new_key: &str,
    ) -> Result<(), EditError> {
        self.guard()?;
        let next = mutate::rename_key(self.document.value(), parent_path, old_key, new_key)?;
        self.apply(next);
        Ok(())
    }

    /// Replaces the whole document (import, create-object/array actions).
    pub fn replace_document(&mut self, new_value: Value) -> Result<(), EditError> {
        self.guard()?;
        self.apply(new_value);
        self.collapse.clear();
        Ok(())
    }

    /// Resets to a blank `{}` document. Undoable like any other edit.
    pub fn clear(&mut self) -> Result<(), EditError> {
        self.replace_document(Value::Object(serde_json::Map::new()))
    }

    /// Parses `text` and replaces the document via
    /// [`Document::import_str`]. On a parse failure the document and
    /// collapse set are left exactly as they were.
    pub fn import_str(&mut self, text: &str) -> Result<(), EditError> {
        self.guard()?;
        let before = self.document.value().clone();
        self.document
            .import_str(text)
            .map_err(|e| EditError::Parse(e.to_string()))?;
        if *self.document.value() != before {
            self.undo.push(before);
        }
        self.collapse.clear();
        Ok(())
    }

    /// Saves the document: host hook first, then the source file, then a
    /// timestamped export as the last resort.
    pub fn save(&mut self) -> Result<SaveTarget> {
        if let Some(hook) = self.on_save.as_mut() {
            hook(self.document.value())?;
            return Ok(SaveTarget::Hook);
        }
        if self.document.path().is_some() {
            self.document.save()?;
            let path = self.document.path().cloned().unwrap_or_default();
            return Ok(SaveTarget::File(path));
        }
        let path = self.document.export_timestamped(Path::new("."))?;
        Ok(SaveTarget::File(path))
    }

    pub fn save_as(&mut self, path: &str) -> Result<SaveTarget> {
        self.document.save_as(path)?;
        Ok(SaveTarget::File(PathBuf::from(path)))
    }

    pub fn undo(&mut self) -> bool {
        if let Some(restored) = self.undo.undo(self.document.value()) {
            self.document.replace(restored);
            true
        } else {
            false
        }
    }

    pub fn redo(&mut self) -> bool {
        if let Some(restored) = self.undo.redo(self.document.value()) {
            self.document.replace(restored);
            true
        } else {
            false
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn editor_with(value: Value) -> Editor {
        Editor::with_document(Document::from_value(value))
    }

    #[test]
    fn test_delete_prunes_collapse_entries() {
        let mut editor = editor_with(json!({"a": {"b": {"c": 1}}, "ab": {}}));
        let a = NodePath::root().child_key("a");
        let a_b = a.child_key("b");
        let ab = NodePath::root().child_key("ab");
        editor.toggle_collapse(&a_b);
        editor.toggle_collapse(&ab);

        editor.delete(&a).unwrap();
        assert_eq!(*editor.value(), json!({"ab": {}}));
        assert!(!editor.collapse().is_collapsed(&a_b));
        assert!(editor.collapse().is_collapsed(&ab));
    }

    #[test]
    fn test_read_only_blocks_mutations() {
        let mut editor = editor_with(json!({"a": 1}));
        editor.set_read_only(true);
        let path = NodePath::root().child_key("a");
        assert_eq!(editor.set_value(&path, json!(2)), Err(EditError::ReadOnly));
        assert_eq!(editor.delete(&path), Err(EditError::ReadOnly));
        assert_eq!(
            editor.insert_child(&NodePath::root(), ChildKind::Null),
            Err(EditError::ReadOnly)
        );
        assert_eq!(editor.clear(), Err(EditError::ReadOnly));
        assert_eq!(*editor.value(), json!({"a": 1}));
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut editor = editor_with(json!({"a": 1}));
        let path = NodePath::root().child_key("a");
        editor.set_value(&path, json!(2)).unwrap();
        editor.set_value(&path, json!(3)).unwrap();

        assert!(editor.undo());
        assert_eq!(*editor.value(), json!({"a": 2}));
        assert!(editor.undo());
        assert_eq!(*editor.value(), json!({"a": 1}));
        assert!(!editor.undo());

        assert!(editor.redo());
        assert_eq!(*editor.value(), json!({"a": 2}));
    }

    #[test]
    fn test_noop_edit_adds_no_history() {
        let mut editor = editor_with(json!({"a": 1}));
        let stale = NodePath::root().child_key("gone").child_key("leaf");
        editor.set_value(&stale, json!(9)).unwrap();
        assert!(!editor.undo());
    }

    #[test]
    fn test_rename_collision_keeps_document() {
        let mut editor = editor_with(json!({"a": 1, "c": 2}));
        let err = editor.rename_key(&NodePath::root(), "a", "c").unwrap_err();
        assert_eq!(err, EditError::Mutate(MutateError::KeyExists("c".to_string())));
        assert_eq!(*editor.value(), json!({"a": 1, "c": 2}));
        assert!(!editor.undo());
    }

    #[test]
    fn test_import_clears_collapse() {
        let mut editor = editor_with(json!({"a": {"b": 1}}));
        editor.toggle_collapse(&NodePath::root().child_key("a"));
        editor.import_str(r#"{"x": 1}"#).unwrap();
        assert_eq!(*editor.value(), json!({"x": 1}));
        assert!(editor.collapse().is_empty());
    }

    #[test]
    fn test_import_is_undoable_and_marks_modified() {
        let mut editor = editor_with(json!({"a": 1}));
        editor.import_str(r#"{"x": 1}"#).unwrap();
        assert!(editor.document().is_modified());
        assert!(editor.undo());
        assert_eq!(*editor.value(), json!({"a": 1}));
    }

    #[test]
    fn test_import_failure_keeps_everything() {
        let mut editor = editor_with(json!({"a": {"b": 1}}));
        let a = NodePath::root().child_key("a");
        editor.toggle_collapse(&a);
        assert!(editor.import_str("{not valid json").is_err());
        assert_eq!(*editor.value(), json!({"a": {"b": 1}}));
        assert!(editor.collapse().is_collapsed(&a));
    }

    #[test]
    fn test_save_prefers_hook() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let seen: Rc<RefCell<Option<Value>>> = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        let mut editor = editor_with(json!({"a": 1}));
        editor.set_on_save(Box::new(move |doc| {
            *sink.borrow_mut() = Some(doc.clone());
            Ok(())
        }));

        assert_eq!(editor.save().unwrap(), SaveTarget::Hook);
        assert_eq!(seen.borrow().clone(), Some(json!({"a": 1})));
    }

    #[test]
    fn test_clear_resets_to_empty_object() {
        let mut editor = editor_with(json!([1, 2]));
        editor.clear().unwrap();
        assert_eq!(*editor.value(), json!({}));
        assert!(editor.undo());
        assert_eq!(*editor.value(), json!([1, 2]));
    }
}
