pub mod mutate;
pub mod path;
pub mod stats;

#[cfg(test)]
mod tests;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde_json::Value;

pub use mutate::{ChildKind, MutateError};
pub use path::{NodePath, Segment};
pub use stats::Stats;

/// Tagged view of a value's type, matched on instead of inspecting the
/// value ad hoc at every render site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Object,
    Array,
    String,
    Number,
    Bool,
    Null,
}

impl NodeKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => NodeKind::Object,
            Value::Array(_) => NodeKind::Array,
            Value::String(_) => NodeKind::String,
            Value::Number(_) => NodeKind::Number,
            Value::Bool(_) => NodeKind::Bool,
            Value::Null => NodeKind::Null,
        }
    }

    pub fn is_container(self) -> bool {
        matches!(self, NodeKind::Object | NodeKind::Array)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Object => write!(f, "Object"),
            NodeKind::Array => write!(f, "Array"),
            NodeKind::String => write!(f, "String"),
            NodeKind::Number => write!(f, "Number"),
            NodeKind::Bool => write!(f, "Bool"),
            NodeKind::Null => write!(f, "Null"),
        }
    }
}

/// Whole-editor rendering state, determined structurally from the current
/// document on every render, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocState {
    /// Empty object or array root: show the create-object/array actions.
    Empty,
    /// Scalar root: structurally unusable, show a persistent error.
    InvalidRoot,
    /// Normal recursive tree.
    Tree,
}

/// The JSON value being edited, plus its file identity.
pub struct Document {
    value: Value,
    path: Option<PathBuf>,
    modified: bool,
}

impl Document {
    /// A blank document: empty object, no file.
    pub fn new() -> Self {
        Self::from_value(Value::Object(serde_json::Map::new()))
    }

    pub fn from_value(value: Value) -> Self {
        Self {
            value,
            path: None,
            modified: false,
        }
    }

    pub fn load_file(path: &str) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&text)?;
        Ok(Self {
            value,
            path: Some(PathBuf::from(path)),
            modified: false,
        })
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Installs a new document value (the output of a mutation).
    pub fn replace(&mut self, value: Value) {
        self.value = value;
        self.modified = true;
    }

    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn state(&self) -> DocState {
        match &self.value {
            Value::Object(map) if map.is_empty() => DocState::Empty,
            Value::Array(items) if items.is_empty() => DocState::Empty,
            Value::Object(_) | Value::Array(_) => DocState::Tree,
            _ => DocState::InvalidRoot,
        }
    }

    pub fn stats(&self) -> Stats {
        Stats::compute(&self.value)
    }

    /// Parses `text` as JSON and replaces the document on success. On a
    /// parse failure the current value is left untouched and the error is
    /// returned for the caller to surface.
    pub fn import_str(&mut self, text: &str) -> Result<(), serde_json::Error> {
        let value: Value = serde_json::from_str(text)?;
        self.value = value;
        self.modified = true;
        Ok(())
    }

    pub fn to_pretty(&self) -> String {
        // 2-space indent is serde_json's pretty default.
        serde_json::to_string_pretty(&self.value).unwrap_or_default()
    }

    pub fn to_compact(&self) -> String {
        self.value.to_string()
    }

    pub fn save(&mut self) -> Result<()> {
        let path = self
            .path
            .clone()
            .ok_or_else(|| anyhow::anyhow!("no file name"))?;
        self.write_to(&path)
    }

    pub fn save_as(&mut self, path: &str) -> Result<()> {
        let path = PathBuf::from(path);
        self.write_to(&path)?;
        self.path = Some(path);
        Ok(())
    }

    /// Fallback save when the document has no file identity and no host
    /// save hook: a timestamped file under `dir`.
    pub fn export_timestamped(&mut self, dir: &Path) -> Result<PathBuf> {
        let name = format!("jed-{}.json", chrono::Local::now().format("%Y%m%d-%H%M%S"));
        let path = dir.join(name);
        self.write_to(&path)?;
        Ok(path)
    }

    fn write_to(&mut self, path: &Path) -> Result<()> {
        let mut text = self.to_pretty();
        text.push('\n');
        fs::write(path, text)?;
        self.modified = false;
        Ok(())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
