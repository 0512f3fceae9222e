use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{EditorContext, InputResult, Mode, ModeHandler};
use crate::document::NodePath;

/// Rename mode handler - line-edits an object key.
///
/// A collision with an existing sibling key is reported and leaves the
/// document unchanged; the mode stays active so the user can fix the name.
pub struct RenameMode {
    /// Path of the object containing the key
    parent: NodePath,
    /// Key as it currently exists
    old_key: String,
    /// New key being typed
    pub buffer: String,
}

impl RenameMode {
    pub fn new() -> Self {
        Self {
            parent: NodePath::root(),
            old_key: String::new(),
            buffer: String::new(),
        }
    }

    /// Arms the mode, seeding the buffer with the current key.
    pub fn begin(&mut self, parent: NodePath, old_key: String) {
        self.buffer = old_key.clone();
        self.parent = parent;
        self.old_key = old_key;
    }
}

impl ModeHandler for RenameMode {
    fn handle_key(&mut self, key: KeyEvent, ctx: EditorContext) -> Result<InputResult> {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => {
                self.buffer.clear();
                Ok(InputResult::ModeSwitch(Mode::Normal))
            }

            (KeyCode::Enter, _) => {
                match ctx.editor.rename_key(&self.parent, &self.old_key, &self.buffer) {
                    Ok(()) => {
                        self.buffer.clear();
                        Ok(InputResult::ModeSwitch(Mode::Normal))
                    }
                    Err(e) => Ok(InputResult::Message(e.to_string())),
                }
            }

            (KeyCode::Backspace, _) => {
                self.buffer.pop();
                Ok(InputResult::Handled)
            }

            (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
                self.buffer.push(c);
                Ok(InputResult::Handled)
            }

            _ => Ok(InputResult::NotHandled),
        }
    }
}

impl Default for RenameMode {
    fn default() -> Self {
        Self::new()
    }
}
