use serde_json::Value;

/// Aggregate counts over a document, recomputed on every change.
///
/// `chars` is the length of the compact serialization; the preview pane
/// renders the pretty form, but the counted policy is the compact one so
/// the number is stable across display settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub nodes: usize,
    pub objects: usize,
    pub arrays: usize,
    pub chars: usize,
}

impl Stats {
    pub fn compute(doc: &Value) -> Self {
        let mut stats = Stats {
            chars: doc.to_string().len(),
            ..Stats::default()
        };
        stats.visit(doc);
        stats
    }

    fn visit(&mut self, value: &Value) {
        self.nodes += 1;
        match value {
            Value::Object(map) => {
                self.objects += 1;
                for child in map.values() {
                    self.visit(child);
                }
            }
            Value::Array(items) => {
                self.arrays += 1;
                for child in items {
                    self.visit(child);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_counts_every_value_once() {
        let doc = json!({"a": {"b": 1, "c": 2}});
        let stats = Stats::compute(&doc);
        assert_eq!(stats.nodes, 4);
        assert_eq!(stats.objects, 2);
        assert_eq!(stats.arrays, 0);
        assert_eq!(stats.chars, doc.to_string().len());
    }

    #[test]
    fn test_nulls_count_as_one_node() {
        let doc = json!([null, null]);
        let stats = Stats::compute(&doc);
        assert_eq!(stats.nodes, 3);
        assert_eq!(stats.arrays, 1);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let doc = json!({"a": [1, {"b": true}], "c": "x"});
        assert_eq!(Stats::compute(&doc), Stats::compute(&doc));
    }

    #[test]
    fn test_delete_drops_node_count() {
        use crate::document::mutate::delete_at;
        use crate::document::path::NodePath;

        let doc = json!({"a": {"b": 1, "c": 2}});
        assert_eq!(Stats::compute(&doc).nodes, 4);
        let path = NodePath::root().child_key("a").child_key("b");
        let next = delete_at(&doc, &path);
        assert_eq!(next, json!({"a": {"c": 2}}));
        assert_eq!(Stats::compute(&next).nodes, 3);
    }
}
