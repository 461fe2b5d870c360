use std::collections::HashSet;

use log::warn;

use crate::config::LayoutConfig;
use crate::ir::DependencyGraph;

/// One node of the expanded dependency hierarchy. The same namespace may
/// appear as several independent `HierarchyNode` instances when it is
/// reachable through more than one branch (diamond sharing); collapsing
/// those duplicates is the dedup pass's job, not this one's.
#[derive(Debug, Clone)]
pub struct HierarchyNode {
    pub namespace: String,
    pub original_level: Option<u32>,
    /// Empty for leaves.
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    fn leaf(namespace: &str, original_level: Option<u32>) -> Self {
        Self {
            namespace: namespace.to_string(),
            original_level,
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of distinct namespaces in this subtree, root included.
    pub fn distinct_namespaces(&self) -> usize {
        let mut seen = HashSet::new();
        self.collect_namespaces(&mut seen);
        seen.len()
    }

    fn collect_namespaces<'a>(&'a self, seen: &mut HashSet<&'a str>) {
        seen.insert(self.namespace.as_str());
        for child in &self.children {
            child.collect_namespaces(seen);
        }
    }
}

/// Expand the directed graph into a tree rooted at `root_namespace`.
///
/// Depth-first from each of the root's direct references. The visited set
/// is path-local: each branch recurses with its own copy, so a namespace
/// reached via two different branches is expanded twice, while a namespace
/// reachable from itself along one path is cut exactly on that path. A
/// root with no record yields a childless root node.
pub fn hierarchize(
    root_namespace: &str,
    graph: &DependencyGraph,
    config: &LayoutConfig,
) -> HierarchyNode {
    let root_level = graph.get(root_namespace).map(|record| record.level);
    let mut root = HierarchyNode::leaf(root_namespace, root_level);
    if !graph.contains(root_namespace) {
        return root;
    }

    let mut path_visited = HashSet::new();
    path_visited.insert(root_namespace.to_string());
    for reference in graph.references_of(root_namespace) {
        if let Some(child) = expand(reference, graph, &path_visited, 1, config) {
            root.children.push(child);
        }
    }
    root
}

fn expand(
    namespace: &str,
    graph: &DependencyGraph,
    path_visited: &HashSet<String>,
    depth: u32,
    config: &LayoutConfig,
) -> Option<HierarchyNode> {
    // Cycle: this namespace is already on the active path.
    if path_visited.contains(namespace) {
        return None;
    }
    // Dangling reference: no record, no node.
    let record = graph.get(namespace)?;

    if depth >= config.max_depth {
        warn!(
            "max depth {} reached at {}, truncating branch",
            config.max_depth, namespace
        );
        return Some(HierarchyNode::leaf(namespace, Some(record.level)));
    }

    // Copy per branch so sibling branches do not see each other's visits.
    let mut branch_visited = path_visited.clone();
    branch_visited.insert(namespace.to_string());

    let mut node = HierarchyNode::leaf(namespace, Some(record.level));
    for reference in &record.references {
        if let Some(child) = expand(reference, graph, &branch_visited, depth + 1, config) {
            node.children.push(child);
        }
    }
    Some(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::DependencyRecord;

    fn record(namespace: &str, level: u32, references: &[&str]) -> DependencyRecord {
        DependencyRecord {
            namespace: namespace.to_string(),
            level,
            references: references.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn diamond_is_duplicated_not_shared() {
        let graph = DependencyGraph::from_records(&[
            record("R", 0, &["A", "B"]),
            record("A", 1, &["Shared"]),
            record("B", 1, &["Shared"]),
            record("Shared", 2, &[]),
        ]);
        let tree = hierarchize("R", &graph, &LayoutConfig::default());
        assert_eq!(tree.children.len(), 2);
        for branch in &tree.children {
            assert_eq!(branch.children.len(), 1);
            assert_eq!(branch.children[0].namespace, "Shared");
        }
    }

    #[test]
    fn two_node_cycle_terminates() {
        let graph = DependencyGraph::from_records(&[
            record("A", 0, &["B"]),
            record("B", 1, &["A"]),
        ]);
        let tree = hierarchize("A", &graph, &LayoutConfig::default());
        assert_eq!(tree.children.len(), 1);
        let b = &tree.children[0];
        assert_eq!(b.namespace, "B");
        assert!(b.is_leaf(), "back-reference to the root must be pruned");
    }

    #[test]
    fn self_reference_is_pruned() {
        let graph = DependencyGraph::from_records(&[record("A", 0, &["A"])]);
        let tree = hierarchize("A", &graph, &LayoutConfig::default());
        assert!(tree.children.is_empty());
    }

    #[test]
    fn depth_cap_emits_leaf() {
        let mut records = Vec::new();
        for i in 0..12u32 {
            let refs: Vec<String> = if i < 11 {
                vec![format!("N{}", i + 1)]
            } else {
                Vec::new()
            };
            records.push(DependencyRecord {
                namespace: format!("N{i}"),
                level: i,
                references: refs,
            });
        }
        let graph = DependencyGraph::from_records(&records);
        let tree = hierarchize("N0", &graph, &LayoutConfig::default());

        let mut depth = 0;
        let mut node = &tree;
        while let Some(child) = node.children.first() {
            node = child;
            depth += 1;
        }
        assert_eq!(depth, 10);
        assert!(node.is_leaf());
    }

    #[test]
    fn missing_root_yields_empty_tree() {
        let graph = DependencyGraph::from_records(&[]);
        let tree = hierarchize("ghost.Root", &graph, &LayoutConfig::default());
        assert_eq!(tree.namespace, "ghost.Root");
        assert!(tree.children.is_empty());
    }
}
