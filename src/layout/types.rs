use std::collections::BTreeMap;

use serde::Serialize;

/// Child slot of a canonical node. Ownership is explicit in the variant:
/// `Node` is the canonical instance drawn under this parent, `Reference`
/// is a back-reference key into the registry for a namespace that was
/// already drawn elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LayoutChild {
    Node(String),
    Reference(String),
}

impl LayoutChild {
    pub fn namespace(&self) -> &str {
        match self {
            LayoutChild::Node(ns) | LayoutChild::Reference(ns) => ns,
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, LayoutChild::Reference(_))
    }
}

/// The one drawn box for a namespace in a given render.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutNode {
    pub namespace: String,
    /// Display label, abbreviated for deeply qualified namespaces.
    pub label: String,
    pub level: u32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub is_root: bool,
    pub children: Vec<LayoutChild>,
}

impl LayoutNode {
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Deduplicated layout tree: exactly one canonical node per distinct
/// namespace, keyed by namespace so reference children resolve by lookup
/// instead of pointer aliasing.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LayoutTree {
    pub root: String,
    pub nodes: BTreeMap<String, LayoutNode>,
}

impl LayoutTree {
    pub fn get(&self, namespace: &str) -> Option<&LayoutNode> {
        self.nodes.get(namespace)
    }

    pub fn canonical_count(&self) -> usize {
        self.nodes.len()
    }
}

/// A routed parent-to-child connection. Reference targets have already
/// been redirected to their canonical node; `stagger` is a vertical
/// offset for parallel horizontal connections, zero otherwise.
#[derive(Debug, Clone, Serialize)]
pub struct Connection {
    pub from: String,
    pub to: String,
    pub from_x: f32,
    pub from_y: f32,
    pub to_x: f32,
    pub to_y: f32,
    pub stagger: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SizeMode {
    Normal,
    Compact,
}

/// Final geometry handed to the drawing surface.
#[derive(Debug, Clone, Serialize)]
pub struct DiagramLayout {
    pub tree: LayoutTree,
    pub connections: Vec<Connection>,
    pub width: f32,
    pub height: f32,
    pub size_mode: SizeMode,
}
