use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{EditorContext, InputResult, Mode, ModeHandler};
use crate::document::NodePath;

/// Edit mode handler - line-edits a scalar's text representation.
///
/// Commit re-infers the type of the typed text (null/bool/number/string),
/// so malformed numeric input is stored as a string rather than rejected;
/// intermediate states like `-` stay editable.
pub struct EditMode {
    /// Path of the scalar being edited
    path: NodePath,
    /// Text being typed
    pub buffer: String,
}

impl EditMode {
    pub fn new() -> Self {
        Self {
            path: NodePath::root(),
            buffer: String::new(),
        }
    }

    /// Arms the mode with a target path and its current text.
    pub fn begin(&mut self, path: NodePath, text: String) {
        self.path = path;
        self.buffer = text;
    }
}

impl ModeHandler for EditMode {
    fn handle_key(&mut self, key: KeyEvent, ctx: EditorContext) -> Result<InputResult> {
        match (key.code, key.modifiers) {
            // Cancel without touching the document
            (KeyCode::Esc, _) => {
                self.buffer.clear();
                Ok(InputResult::ModeSwitch(Mode::Normal))
            }

            // Commit
            (KeyCode::Enter, _) => {
                let text = std::mem::take(&mut self.buffer);
                match ctx.editor.set_scalar_text(&self.path, &text) {
                    Ok(()) => Ok(InputResult::ModeSwitch(Mode::Normal)),
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

impl Default for EditMode {
    fn default() -> Self {
        Self::new()
    }
}
