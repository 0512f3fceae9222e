pub mod document;
pub mod editor;
pub mod mode;
pub mod ui;

pub use document::{ChildKind, DocState, Document, MutateError, NodeKind, NodePath, Stats};
pub use editor::{CollapseSet, EditError, Editor, SaveTarget, UndoStack};
