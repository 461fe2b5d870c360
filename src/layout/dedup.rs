use std::collections::BTreeMap;

use log::warn;

use crate::config::SizeProfile;
use crate::hierarchy::HierarchyNode;

use super::{abbreviate_namespace, LayoutChild, LayoutNode, LayoutTree};

/// Collapse the (possibly branch-duplicated) hierarchy into a registry of
/// canonical nodes plus reference children.
///
/// A namespace is registered *before* its children are built, so the first
/// branch that reaches it becomes canonical and every later reach, sibling
/// branches included, degrades into a reference. An in-flight cycle
/// re-entering a node therefore resolves as already-registered instead of
/// recursing.
pub(super) fn build_layout_tree(
    hierarchy: &HierarchyNode,
    profile: &SizeProfile,
    max_nodes: usize,
) -> LayoutTree {
    let mut builder = DedupLayoutBuilder {
        registry: BTreeMap::new(),
        profile,
        max_nodes,
        truncated: false,
    };
    builder.register(hierarchy, true);
    LayoutTree {
        root: hierarchy.namespace.clone(),
        nodes: builder.registry,
    }
}

struct DedupLayoutBuilder<'a> {
    registry: BTreeMap<String, LayoutNode>,
    profile: &'a SizeProfile,
    max_nodes: usize,
    truncated: bool,
}

impl DedupLayoutBuilder<'_> {
    /// Register `node` as canonical and descend. Returns false when the
    /// node-count cap rejects the registration.
    fn register(&mut self, node: &HierarchyNode, is_root: bool) -> bool {
        if self.registry.len() >= self.max_nodes {
            if !self.truncated {
                warn!(
                    "node cap {} reached at {}, dropping further nodes",
                    self.max_nodes, node.namespace
                );
                self.truncated = true;
            }
            return false;
        }
        let level = if is_root {
            node.original_level.unwrap_or(0)
        } else {
            node.original_level.unwrap_or(1)
        };
        self.registry.insert(
            node.namespace.clone(),
            LayoutNode {
                namespace: node.namespace.clone(),
                label: abbreviate_namespace(&node.namespace),
                level,
                x: 0.0,
                y: 0.0,
                width: self.profile.node_width,
                height: self.profile.node_height,
                is_root,
                children: Vec::new(),
            },
        );
        let children = self.build_children(&node.children);
        if let Some(entry) = self.registry.get_mut(&node.namespace) {
            entry.children = children;
        }
        true
    }

    fn build_children(&mut self, hierarchy_children: &[HierarchyNode]) -> Vec<LayoutChild> {
        let mut children = Vec::new();
        for child in hierarchy_children {
            if self.registry.contains_key(&child.namespace) {
                children.push(LayoutChild::Reference(child.namespace.clone()));
            } else if self.register(child, false) {
                children.push(LayoutChild::Node(child.namespace.clone()));
            }
        }
        children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::hierarchy::hierarchize;
    use crate::ir::{DependencyGraph, DependencyRecord};

    fn record(namespace: &str, level: u32, references: &[&str]) -> DependencyRecord {
        DependencyRecord {
            namespace: namespace.to_string(),
            level,
            references: references.iter().map(|r| r.to_string()).collect(),
        }
    }

    fn diamond() -> HierarchyNode {
        let graph = DependencyGraph::from_records(&[
            record("R", 0, &["A", "B"]),
            record("A", 1, &["Shared"]),
            record("B", 1, &["Shared"]),
            record("Shared", 2, &[]),
        ]);
        hierarchize("R", &graph, &LayoutConfig::default())
    }

    #[test]
    fn diamond_collapses_to_one_canonical_node() {
        let tree = build_layout_tree(&diamond(), &SizeProfile::normal(), 100);
        assert_eq!(tree.canonical_count(), 4);

        let references: Vec<_> = tree
            .nodes
            .values()
            .flat_map(|node| node.children.iter())
            .filter(|child| child.is_reference())
            .collect();
        assert_eq!(references.len(), 1);
        assert_eq!(references[0].namespace(), "Shared");
    }

    #[test]
    fn first_branch_wins_canonical_status() {
        let tree = build_layout_tree(&diamond(), &SizeProfile::normal(), 100);
        let a = tree.get("A").unwrap();
        let b = tree.get("B").unwrap();
        assert_eq!(a.children, vec![LayoutChild::Node("Shared".to_string())]);
        assert_eq!(
            b.children,
            vec![LayoutChild::Reference("Shared".to_string())]
        );
    }

    #[test]
    fn node_cap_stops_registration() {
        let graph = DependencyGraph::from_records(&[
            record("R", 0, &["A", "B", "C", "D"]),
            record("A", 1, &[]),
            record("B", 1, &[]),
            record("C", 1, &[]),
            record("D", 1, &[]),
        ]);
        let hierarchy = hierarchize("R", &graph, &LayoutConfig::default());
        let tree = build_layout_tree(&hierarchy, &SizeProfile::normal(), 3);
        assert_eq!(tree.canonical_count(), 3);
        assert_eq!(tree.get("R").unwrap().children.len(), 2);
    }
}
