use std::collections::HashSet;

use crate::document::NodePath;

/// UI-only set of paths whose subtree is currently hidden.
///
/// Entries under a deleted subtree must be pruned, otherwise a later node
/// that reuses the same path would come back collapsed for no reason.
#[derive(Debug, Default)]
pub struct CollapseSet {
    paths: HashSet<NodePath>,
}

impl CollapseSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_collapsed(&self, path: &NodePath) -> bool {
        self.paths.contains(path)
    }

    pub fn toggle(&mut self, path: &NodePath) {
        if !self.paths.remove(path) {
            self.paths.insert(path.clone());
        }
    }

    /// Removes every entry that has `prefix` as a segment-wise prefix,
    /// including `prefix` itself.
    pub fn prune_prefix(&mut self, prefix: &NodePath) {
        self.paths.retain(|p| !p.starts_with(prefix));
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut set = CollapseSet::new();
        let path = NodePath::root().child_key("a");
        assert!(!set.is_collapsed(&path));
        set.toggle(&path);
        assert!(set.is_collapsed(&path));
        set.toggle(&path);
        assert!(!set.is_collapsed(&path));
    }

    #[test]
    fn test_prune_prefix_removes_subtree_entries() {
        let mut set = CollapseSet::new();
        let a = NodePath::root().child_key("a");
        let a_b = a.child_key("b");
        let ab = NodePath::root().child_key("ab");
        set.toggle(&a);
        set.toggle(&a_b);
        set.toggle(&ab);

        set.prune_prefix(&a);
        assert!(!set.is_collapsed(&a));
        assert!(!set.is_collapsed(&a_b));
        // "root.ab" is not under "root.a" and must survive.
        assert!(set.is_collapsed(&ab));
    }
}
