use serde_json::{Map, Value};
use thiserror::Error;

use super::path::{resolve_node_mut, resolve_parent_mut, NodePath, Segment};

/// Errors a mutation can report to the user. Everything else in this
/// module degrades to a no-op instead of failing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MutateError {
    #[error("key '{0}' already exists")]
    KeyExists(String),
}

/// Kind of child value to insert into a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildKind {
    String,
    Number,
    Bool,
    Null,
    Object,
    Array,
}

impl ChildKind {
    /// Default value for a freshly inserted child of this kind.
    pub fn default_value(self) -> Value {
        match self {
            ChildKind::String => Value::String(String::new()),
            ChildKind::Number => Value::from(0),
            ChildKind::Bool => Value::Bool(true),
            ChildKind::Null => Value::Null,
            ChildKind::Object => Value::Object(Map::new()),
            ChildKind::Array => Value::Array(Vec::new()),
        }
    }
}

// Every operation below is copy-on-write: clone the input, mutate the
// clone, return it. The caller's document is never touched, so a render
// snapshot taken before the call stays valid.

/// Sets the value at `path`. The root path replaces the whole document.
/// Unresolvable parents make this a no-op.
pub fn set_value(doc: &Value, path: &NodePath, new_value: Value) -> Value {
    if path.is_root() {
        return new_value;
    }
    let mut next = doc.clone();
    if let Some((parent, segment)) = resolve_parent_mut(&mut next, path) {
        match (parent, segment) {
            (Value::Object(map), Segment::Key(key)) => {
                map.insert(key, new_value);
            }
            (Value::Array(items), Segment::Index(index)) => {
                if index < items.len() {
                    items[index] = new_value;
                }
            }
            _ => {}
        }
    }
    next
}

/// Removes the node at `path`. Array removal shifts later siblings down,
/// so every sibling path after the removed index is stale for the rest of
/// the render pass. The root and unresolvable paths are no-ops. Pruning
/// collapse-set entries under the deleted path is the caller's duty.
pub fn delete_at(doc: &Value, path: &NodePath) -> Value {
    let mut next = doc.clone();
    if let Some((parent, segment)) = resolve_parent_mut(&mut next, path) {
        match (parent, segment) {
            (Value::Object(map), Segment::Key(key)) => {
                map.shift_remove(&key);
            }
            (Value::Array(items), Segment::Index(index)) => {
                if index < items.len() {
                    items.remove(index);
                }
            }
            _ => {}
        }
    }
    next
}

/// Synthesizes an object key that does not collide with existing ones:
/// `new_key`, then `new_key_1`, `new_key_2`, ...
fn fresh_key(map: &Map<String, Value>) -> String {
    if !map.contains_key("new_key") {
        return "new_key".to_string();
    }
    let mut n = 1usize;
    loop {
        let candidate = format!("new_key_{}", n);
        if !map.contains_key(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Inserts a new child into the container at `path`: arrays append, objects
/// get the value under a synthesized unique key. No-op if `path` does not
/// resolve to a container.
pub fn insert_child(doc: &Value, path: &NodePath, kind: ChildKind) -> Value {
    let mut next = doc.clone();
    if let Some(node) = resolve_node_mut(&mut next, path) {
        match node {
            Value::Object(map) => {
                let key = fresh_key(map);
                map.insert(key, kind.default_value());
            }
            Value::Array(items) => {
                items.push(kind.default_value());
            }
            _ => {}
        }
    }
    next
}

/// Renames an object key, preserving the insertion order of every other
/// key and keeping the renamed entry in its original position.
///
/// Empty/whitespace or unchanged new keys are no-ops. A collision with an
/// existing sibling is reported and leaves the document untouched; a
/// vanished old key (stale-rename race) is a silent no-op. The rebuild
/// happens through the node itself, so a rename on the document root
/// replaces the root map directly.
pub fn rename_key(
    doc: &Value,
    parent_path: &NodePath,
    old_key: &str,
    new_key: &str,
) -> Result<Value, MutateError> {
    let new_key = new_key.trim();
    if new_key.is_empty() || new_key == old_key {
        return Ok(doc.clone());
    }
    let mut next = doc.clone();
    if let Some(Value::Object(map)) = resolve_node_mut(&mut next, parent_path) {
        if !map.contains_key(old_key) {
            return Ok(next);
        }
        if map.contains_key(new_key) {
            return Err(MutateError::KeyExists(new_key.to_string()));
        }
        let mut rebuilt = Map::new();
        for (key, value) in map.iter() {
            if key == old_key {
                rebuilt.insert(new_key.to_string(), value.clone());
            } else {
                rebuilt.insert(key.clone(), value.clone());
            }
        }
        *map = rebuilt;
    }
    Ok(next)
}

/// Re-infers the intended type of freshly typed scalar text.
///
/// `null`/`true`/`false` become their literals, text that parses fully as
/// a finite number becomes a number, everything else stays a verbatim
/// string (so a phone-number-like string is never silently numerified and
/// intermediate states like `-` remain editable).
pub fn coerce_scalar(text: &str) -> Value {
    match text {
        "null" => return Value::Null,
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(n) = text.parse::<i64>() {
        return Value::from(n);
    }
    if let Ok(f) = text.parse::<f64>() {
        if f.is_finite() {
            if let Some(n) = serde_json::Number::from_f64(f) {
                return Value::Number(n);
            }
        }
    }
    Value::String(text.to_string())
}
