use std::fs;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{EditorContext, InputResult, Mode, ModeHandler};
use crate::editor::SaveTarget;

/// Command mode handler - ex-style commands
pub struct CommandMode {
    /// Current command being typed
    pub command_line: String,
}

impl CommandMode {
    pub fn new() -> Self {
        Self {
            command_line: String::new(),
        }
    }

    fn save(ctx: &mut EditorContext) -> InputResult {
        match ctx.editor.save() {
            Ok(SaveTarget::Hook) => InputResult::Message("saved".to_string()),
            Ok(SaveTarget::File(path)) => {
                InputResult::Message(format!("saved to {}", path.display()))
            }
            Err(e) => InputResult::Message(format!("save failed: {}", e)),
        }
    }

    fn import(ctx: &mut EditorContext, filename: &str) -> InputResult {
        let text = match fs::read_to_string(filename) {
            Ok(text) => text,
            Err(e) => return InputResult::Message(format!("cannot read {}: {}", filename, e)),
        };
        match ctx.editor.import_str(&text) {
            Ok(()) => {
                *ctx.cursor = 0;
                InputResult::Message(format!("imported {}", filename))
            }
            Err(e) => InputResult::Message(e.to_string()),
        }
    }

    /// Execute a command
    fn execute_command(&mut self, cmd: &str, ctx: &mut EditorContext) -> Result<InputResult> {
        let cmd = cmd.trim();

        if let Some(filename) = cmd.strip_prefix("w ").or_else(|| cmd.strip_prefix("write ")) {
            let filename = filename.trim();
            return Ok(match ctx.editor.save_as(filename) {
                Ok(SaveTarget::File(path)) => {
                    InputResult::Message(format!("saved to {}", path.display()))
                }
                Ok(SaveTarget::Hook) => InputResult::Message("saved".to_string()),
                Err(e) => InputResult::Message(format!("save failed: {}", e)),
            });
        }

        if let Some(filename) = cmd.strip_prefix("e ").or_else(|| cmd.strip_prefix("edit ")) {
            return Ok(Self::import(ctx, filename.trim()));
        }

        match cmd {
            "q" | "quit" => {
                if ctx.editor.document().is_modified() {
                    return Ok(InputResult::Message(
                        "No write since last change (use :q! to override)".to_string(),
                    ));
                }
                Ok(InputResult::Quit)
            }
            "w" | "write" => Ok(Self::save(ctx)),
            "wq" | "x" => {
                // Save and quit
                match Self::save(ctx) {
                    InputResult::Message(msg) if msg.starts_with("save failed") => {
                        Ok(InputResult::Message(msg))
                    }
                    _ => Ok(InputResult::Quit),
                }
            }
            "q!" => {
                // Force quit without saving
                Ok(InputResult::Quit)
            }
            "clear" => {
                *ctx.cursor = 0;
                Ok(match ctx.editor.clear() {
                    Ok(()) => InputResult::ModeSwitch(Mode::Normal),
                    Err(e) => InputResult::Message(e.to_string()),
                })
            }
            "" => {
                // Empty command, just return to normal
                Ok(InputResult::ModeSwitch(Mode::Normal))
            }
            _ => {
                // Unknown command
                Ok(InputResult::Message(format!("Unknown command: {}", cmd)))
            }
        }
    }
}

impl ModeHandler for CommandMode {
    fn handle_key(&mut self, key: KeyEvent, mut ctx: EditorContext) -> Result<InputResult> {
        match (key.code, key.modifiers) {
            // Escape - cancel command mode
            (KeyCode::Esc, _) => {
                self.command_line.clear();
                Ok(InputResult::ModeSwitch(Mode::Normal))
            }

            // Enter - execute command
            (KeyCode::Enter, _) => {
                let cmd = self.command_line.clone();
                self.command_line.clear();
                self.execute_command(&cmd, &mut ctx)
            }

            // Backspace - delete character
            (KeyCode::Backspace, _) => {
                self.command_line.pop();
                if self.command_line.is_empty() {
                    // If command line becomes empty, return to normal mode
                    Ok(InputResult::ModeSwitch(Mode::Normal))
                } else {
                    Ok(InputResult::Handled)
                }
            }

            // Type character
            (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
                self.command_line.push(c);
                Ok(InputResult::Handled)
            }

            _ => Ok(InputResult::NotHandled),
        }
    }
}

impl Default for CommandMode {
    fn default() -> Self {
        Self::new()
    }
}
