use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use serde_json::Value;

use super::{EditorContext, InputResult, Mode, ModeHandler};
use crate::document::path::resolve;
use crate::document::{ChildKind, DocState, Segment};

/// Normal mode handler - navigation and node commands
pub struct NormalMode;

impl NormalMode {
    pub fn new() -> Self {
        Self
    }

    fn move_cursor(ctx: &mut EditorContext, delta: isize) {
        if ctx.rows.is_empty() {
            *ctx.cursor = 0;
            return;
        }
        let max = ctx.rows.len() - 1;
        let next = ctx.cursor.saturating_add_signed(delta).min(max);
        *ctx.cursor = next;
    }

    /// Seeds the edit buffer from the selected scalar. Strings edit as
    /// their raw text; other scalars edit as their JSON form.
    fn begin_scalar_edit(ctx: &EditorContext) -> InputResult {
        let Some(row) = ctx.selected() else {
            return InputResult::Handled;
        };
        if row.is_container() {
            return InputResult::Message("select a scalar to edit its value".to_string());
        }
        let text = match resolve(ctx.editor.value(), &row.path).value {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => return InputResult::Handled,
        };
        InputResult::BeginEdit {
            path: row.path.clone(),
            text,
        }
    }

    fn begin_rename(ctx: &EditorContext) -> InputResult {
        let Some(row) = ctx.selected() else {
            return InputResult::Handled;
        };
        match row.path.split_last() {
            Some((parent, Segment::Key(old_key))) => InputResult::BeginRename {
                parent,
                old_key: old_key.clone(),
            },
            Some((_, Segment::Index(_))) => {
                InputResult::Message("array elements have no key to rename".to_string())
            }
            None => InputResult::Message("the root has no key to rename".to_string()),
        }
    }

    fn delete_selected(ctx: &mut EditorContext) -> InputResult {
        let Some(row) = ctx.selected() else {
            return InputResult::Handled;
        };
        if row.path.is_root() {
            return InputResult::Message("cannot delete the root".to_string());
        }
        let path = row.path.clone();
        match ctx.editor.delete(&path) {
            Ok(()) => InputResult::Handled,
            Err(e) => InputResult::Message(e.to_string()),
        }
    }

    /// `a` is a two-key sequence: the second key picks the child kind.
    fn add_child(ctx: &mut EditorContext) -> Result<InputResult> {
        let Some(row) = ctx.selected() else {
            return Ok(InputResult::Handled);
        };
        if !row.is_container() {
            return Ok(InputResult::Message(
                "select an object or array to add into".to_string(),
            ));
        }
        let path = row.path.clone();

        // Two-key sequence: wait briefly for the kind key.
        if event::poll(Duration::from_millis(1000))? {
            if let Event::Key(next_key) = event::read()? {
                let kind = match next_key.code {
                    KeyCode::Char('s') => Some(ChildKind::String),
                    KeyCode::Char('n') => Some(ChildKind::Number),
                    KeyCode::Char('b') => Some(ChildKind::Bool),
                    KeyCode::Char('u') => Some(ChildKind::Null),
                    KeyCode::Char('o') => Some(ChildKind::Object),
                    KeyCode::Char('a') => Some(ChildKind::Array),
                    _ => None,
                };
                match kind {
                    Some(kind) => {
                        return Ok(match ctx.editor.insert_child(&path, kind) {
                            Ok(()) => InputResult::Handled,
                            Err(e) => InputResult::Message(e.to_string()),
                        });
                    }
                    None => {
                        return Ok(InputResult::Message(
                            "add: s=string n=number b=bool u=null o=object a=array".to_string(),
                        ));
                    }
                }
            }
        }
        Ok(InputResult::Message(
            "add: s=string n=number b=bool u=null o=object a=array".to_string(),
        ))
    }
}

impl ModeHandler for NormalMode {
    fn handle_key(&mut self, key: KeyEvent, mut ctx: EditorContext) -> Result<InputResult> {
        // Empty-state call-to-actions replace the whole document.
        if ctx.editor.state() == DocState::Empty {
            match key.code {
                KeyCode::Char('o') => {
                    return Ok(match ctx.editor.replace_document(serde_json::json!({})) {
                        Ok(()) => InputResult::Message("created empty object".to_string()),
                        Err(e) => InputResult::Message(e.to_string()),
                    });
                }
                KeyCode::Char('a') => {
                    return Ok(match ctx.editor.replace_document(serde_json::json!([])) {
                        Ok(()) => InputResult::Message("created empty array".to_string()),
                        Err(e) => InputResult::Message(e.to_string()),
                    });
                }
                _ => {}
            }
        }

        match (key.code, key.modifiers) {
            // Quit (modified check lives in command mode's :q as well)
            (KeyCode::Char('q'), KeyModifiers::NONE) => {
                if ctx.editor.document().is_modified() {
                    Ok(InputResult::Message(
                        "unsaved changes (use :q! to discard, :wq to save)".to_string(),
                    ))
                } else {
                    Ok(InputResult::Quit)
                }
            }

            // Row navigation
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                Self::move_cursor(&mut ctx, 1);
                Ok(InputResult::Handled)
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                Self::move_cursor(&mut ctx, -1);
                Ok(InputResult::Handled)
            }
            (KeyCode::Char('d'), KeyModifiers::CONTROL) | (KeyCode::PageDown, _) => {
                let half = (ctx.viewport.height / 2) as isize;
                Self::move_cursor(&mut ctx, half);
                Ok(InputResult::Handled)
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) | (KeyCode::PageUp, _) => {
                let half = (ctx.viewport.height / 2) as isize;
                Self::move_cursor(&mut ctx, -half);
                Ok(InputResult::Handled)
            }
            (KeyCode::Char('g'), KeyModifiers::NONE) => {
                *ctx.cursor = 0;
                Ok(InputResult::Handled)
            }
            (KeyCode::Char('G'), _) => {
                *ctx.cursor = ctx.rows.len().saturating_sub(1);
                Ok(InputResult::Handled)
            }

            // Collapse/expand the selected container
            (KeyCode::Tab, _) | (KeyCode::Enter, _) => {
                if let Some(row) = ctx.selected() {
                    if row.is_container() {
                        let path = row.path.clone();
                        ctx.editor.toggle_collapse(&path);
                    }
                }
                Ok(InputResult::Handled)
            }

            // Node commands
            (KeyCode::Char('d'), KeyModifiers::NONE) => Ok(Self::delete_selected(&mut ctx)),
            (KeyCode::Char('a'), KeyModifiers::NONE) => Self::add_child(&mut ctx),
            (KeyCode::Char('i'), KeyModifiers::NONE) | (KeyCode::Char('e'), KeyModifiers::NONE) => {
                Ok(Self::begin_scalar_edit(&ctx))
            }
            (KeyCode::Char('r'), KeyModifiers::NONE) => Ok(Self::begin_rename(&ctx)),

            // Undo/Redo
            (KeyCode::Char('u'), KeyModifiers::NONE) => {
                if ctx.editor.undo() {
                    Ok(InputResult::Handled)
                } else {
                    Ok(InputResult::Message("nothing to undo".to_string()))
                }
            }
            (KeyCode::Char('r'), KeyModifiers::CONTROL) => {
                if ctx.editor.redo() {
                    Ok(InputResult::Handled)
                } else {
                    Ok(InputResult::Message("nothing to redo".to_string()))
                }
            }

            // Command mode
            (KeyCode::Char(':'), _) => Ok(InputResult::ModeSwitch(Mode::Command)),

            _ => Ok(InputResult::NotHandled),
        }
    }
}

impl Default for NormalMode {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::editor::Editor;
    use crate::ui::{flatten, Viewport};
    use serde_json::json;

    fn cursor_after(code: KeyCode, start: usize, height: usize) -> usize {
        let mut editor = Editor::with_document(Document::from_value(json!({
            "items": [0, 1, 2, 3, 4, 5, 6, 7, 8, 9]
        })));
        let rows = flatten(editor.value(), editor.collapse());
        let mut cursor = start;
        let mut viewport = Viewport::new(0, height);
        let ctx = EditorContext {
            editor: &mut editor,
            rows: &rows,
            cursor: &mut cursor,
            viewport: &mut viewport,
        };
        NormalMode::new().handle_key(KeyEvent::from(code), ctx).unwrap();
        cursor
    }

    #[test]
    fn test_half_page_moves_by_half_viewport_height() {
        assert_eq!(cursor_after(KeyCode::PageDown, 0, 8), 4);
        assert_eq!(cursor_after(KeyCode::PageUp, 6, 8), 2);
    }

    #[test]
    fn test_half_page_clamps_at_edges() {
        // 12 rows total (root, "items", ten elements).
        assert_eq!(cursor_after(KeyCode::PageDown, 10, 20), 11);
        assert_eq!(cursor_after(KeyCode::PageUp, 1, 20), 0);
    }
}
