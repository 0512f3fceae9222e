use std::fmt;

use serde_json::Value;

/// One step into a container: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(k) => write!(f, ".{}", k),
            Segment::Index(i) => write!(f, "[{}]", i),
        }
    }
}

/// Address of one node in a document: `root`, `root.a`, `root.a[2].b`, ...
///
/// Paths are derived during each render pass and are only valid against the
/// document snapshot they were computed from. Array deletes shift sibling
/// indices, so a path must never be cached across mutations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodePath {
    segments: Vec<Segment>,
}

impl NodePath {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Path of an object member under this one.
    pub fn child_key(&self, key: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Key(key.to_string()));
        Self { segments }
    }

    /// Path of an array element under this one.
    pub fn child_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Index(index));
        Self { segments }
    }

    /// Splits into (parent path, last segment). `None` for the root.
    pub fn split_last(&self) -> Option<(NodePath, &Segment)> {
        let (last, rest) = self.segments.split_last()?;
        Some((
            NodePath {
                segments: rest.to_vec(),
            },
            last,
        ))
    }

    /// Segment-wise prefix test. `root.a` is NOT a prefix of `root.ab`.
    pub fn starts_with(&self, prefix: &NodePath) -> bool {
        self.segments.len() >= prefix.segments.len()
            && self.segments[..prefix.segments.len()] == prefix.segments[..]
    }

    /// Parses a path string of the form `root.a[2].b`.
    ///
    /// Returns `None` for anything that is not well-formed; callers treat
    /// that exactly like a path that fails to resolve (a no-op), so a
    /// malformed path can never raise an error.
    pub fn parse(text: &str) -> Option<Self> {
        let rest = text.strip_prefix("root")?;
        let mut segments = Vec::new();
        let mut chars = rest.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '.' => {
                    let mut key = String::new();
                    while let Some(&c) = chars.peek() {
                        if c == '.' || c == '[' {
                            break;
                        }
                        key.push(c);
                        chars.next();
                    }
                    if key.is_empty() {
                        return None;
                    }
                    segments.push(Segment::Key(key));
                }
                '[' => {
                    let mut digits = String::new();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        if c == ']' {
                            closed = true;
                            break;
                        }
                        digits.push(c);
                    }
                    if !closed {
                        return None;
                    }
                    let index = digits.parse::<usize>().ok()?;
                    segments.push(Segment::Index(index));
                }
                // Trailing garbage right after "root" (e.g. "rooty").
                _ => return None,
            }
        }
        Some(Self { segments })
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "root")?;
        for seg in &self.segments {
            write!(f, "{}", seg)?;
        }
        Ok(())
    }
}

/// Result of resolving a path against a document snapshot.
///
/// `parent` is the containing value of the addressed node and `key` the
/// final segment. The root has neither. When an intermediate segment is
/// missing the resolution degrades to `value: None, parent: None` instead
/// of failing, because stale paths are a normal consequence of UI races
/// (deleting a node whose ancestor was just removed). Callers must check
/// `parent` before writing.
#[derive(Debug, Default)]
pub struct Resolution<'a> {
    pub value: Option<&'a Value>,
    pub parent: Option<&'a Value>,
    pub key: Option<Segment>,
}

/// Looks up one segment inside a container. Type mismatches resolve to `None`.
fn step<'a>(value: &'a Value, segment: &Segment) -> Option<&'a Value> {
    match (value, segment) {
        (Value::Object(map), Segment::Key(k)) => map.get(k),
        (Value::Array(items), Segment::Index(i)) => items.get(*i),
        _ => None,
    }
}

fn step_mut<'a>(value: &'a mut Value, segment: &Segment) -> Option<&'a mut Value> {
    match (value, segment) {
        (Value::Object(map), Segment::Key(k)) => map.get_mut(k),
        (Value::Array(items), Segment::Index(i)) => items.get_mut(*i),
        _ => None,
    }
}

/// Resolves `path` against `doc` with tolerant-failure semantics.
pub fn resolve<'a>(doc: &'a Value, path: &NodePath) -> Resolution<'a> {
    let Some((parent_path, last)) = path.split_last() else {
        return Resolution {
            value: Some(doc),
            parent: None,
            key: None,
        };
    };

    let mut parent = doc;
    for segment in parent_path.segments() {
        match step(parent, segment) {
            Some(next) => parent = next,
            None => {
                return Resolution {
                    value: None,
                    parent: None,
                    key: Some(last.clone()),
                }
            }
        }
    }

    Resolution {
        value: step(parent, last),
        parent: Some(parent),
        key: Some(last.clone()),
    }
}

/// Mutable resolution of the node itself. `root` yields the document.
pub fn resolve_node_mut<'a>(doc: &'a mut Value, path: &NodePath) -> Option<&'a mut Value> {
    let mut current = doc;
    for segment in path.segments() {
        current = step_mut(current, segment)?;
    }
    Some(current)
}

/// Mutable resolution of the containing parent plus the final segment.
/// `None` for the root (it has no container) and for unresolvable paths.
pub fn resolve_parent_mut<'a>(
    doc: &'a mut Value,
    path: &NodePath,
) -> Option<(&'a mut Value, Segment)> {
    let (parent_path, last) = path.split_last()?;
    let last = last.clone();
    let parent = resolve_node_mut(doc, &parent_path)?;
    Some((parent, last))
}
