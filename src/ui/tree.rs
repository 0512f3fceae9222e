use serde_json::Value;

use crate::document::{NodeKind, NodePath};
use crate::editor::CollapseSet;

/// One visible line of the tree view.
///
/// Rows (and the paths inside them) are recomputed from the document on
/// every render pass, so they always reflect current structure. They must
/// not be cached across mutations: deleting an array element shifts every
/// later sibling's path.
#[derive(Debug, Clone)]
pub struct Row {
    pub path: NodePath,
    pub depth: usize,
    /// Object key or `[index]` label; `None` for the root.
    pub label: Option<String>,
    pub kind: NodeKind,
    /// `{n}`/`[n]` badge for containers, JSON text for scalars.
    pub summary: String,
    pub collapsed: bool,
}

impl Row {
    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }
}

fn summary_of(value: &Value) -> String {
    match value {
        Value::Object(map) => format!("{{{}}}", map.len()),
        Value::Array(items) => format!("[{}]", items.len()),
        scalar => scalar.to_string(),
    }
}

/// Flattens the document into visible rows, honoring the collapse set.
/// Collapsed containers still get their own row; their children do not.
pub fn flatten(doc: &Value, collapse: &CollapseSet) -> Vec<Row> {
    let mut rows = Vec::new();
    walk(doc, NodePath::root(), None, collapse, &mut rows);
    rows
}

fn walk(
    value: &Value,
    path: NodePath,
    label: Option<String>,
    collapse: &CollapseSet,
    rows: &mut Vec<Row>,
) {
    let kind = NodeKind::of(value);
    let collapsed = kind.is_container() && collapse.is_collapsed(&path);
    rows.push(Row {
        path: path.clone(),
        depth: path.depth(),
        label,
        kind,
        summary: summary_of(value),
        collapsed,
    });
    if collapsed {
        return;
    }
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                walk(child, path.child_key(key), Some(key.clone()), collapse, rows);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                walk(
                    child,
                    path.child_index(index),
                    Some(format!("[{}]", index)),
                    collapse,
                    rows,
                );
            }
        }
        _ => {}
    }
}
