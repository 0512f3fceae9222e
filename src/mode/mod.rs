use anyhow::Result;
use crossterm::event::KeyEvent;

pub mod command;
pub mod edit;
pub mod normal;
pub mod rename;

use crate::document::NodePath;
use crate::editor::Editor;
use crate::ui::{Row, Viewport};

pub use command::CommandMode;
pub use edit::EditMode;
pub use normal::NormalMode;
pub use rename::RenameMode;

/// Editor mode states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    /// Editing a scalar value's text.
    Edit,
    /// Editing an object key.
    Rename,
    Command,
}

impl Mode {
    /// Returns a display string for the mode
    pub fn display(&self) -> &str {
        match self {
            Mode::Normal => "",
            Mode::Edit => "-- EDIT --",
            Mode::Rename => "-- RENAME --",
            Mode::Command => "-- COMMAND --",
        }
    }
}

/// Context passed to mode handlers. `rows` is the flattened tree of the
/// current document snapshot; `cursor` indexes into it.
pub struct EditorContext<'a> {
    pub editor: &'a mut Editor,
    pub rows: &'a [Row],
    pub cursor: &'a mut usize,
    pub viewport: &'a mut Viewport,
}

impl EditorContext<'_> {
    pub fn selected(&self) -> Option<&Row> {
        self.rows.get(*self.cursor)
    }
}

/// Result of handling an input event
#[derive(Debug)]
pub enum InputResult {
    /// Input was handled, continue
    Handled,
    /// Request mode change
    ModeSwitch(Mode),
    /// Start editing the scalar at `path`, seeded with its current text
    BeginEdit { path: NodePath, text: String },
    /// Start renaming `old_key` inside the object at `parent`
    BeginRename { parent: NodePath, old_key: String },
    /// Request quit
    Quit,
    /// Input not handled, pass to next handler
    NotHandled,
    /// Display a message to the user
    Message(String),
}

/// Trait for mode-specific input handlers
pub trait ModeHandler {
    fn handle_key(&mut self, key: KeyEvent, ctx: EditorContext) -> Result<InputResult>;
}
