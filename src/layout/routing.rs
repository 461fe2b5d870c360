use super::{Connection, LayoutNode, LayoutTree};

/// Vertical spacing between parallel horizontal connections (pixels).
const STAGGER_SPACING: f32 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeSide {
    Top,
    Bottom,
    Left,
    Right,
}

/// Endpoint side selection for one source-target pair, checked in fixed
/// priority order on the center-to-center vector. Downward connections
/// always win because downward is the dominant visual flow of the tree;
/// upward wins over sideways only when the vertical component dominates.
fn edge_sides(source: &LayoutNode, target: &LayoutNode) -> (EdgeSide, EdgeSide) {
    let (from_cx, from_cy) = source.center();
    let (to_cx, to_cy) = target.center();
    let dx = to_cx - from_cx;
    let dy = to_cy - from_cy;

    if dy > 0.0 {
        (EdgeSide::Bottom, EdgeSide::Top)
    } else if dy < 0.0 && dy.abs() > dx.abs() {
        (EdgeSide::Top, EdgeSide::Bottom)
    } else if dx > 0.0 {
        (EdgeSide::Right, EdgeSide::Left)
    } else {
        (EdgeSide::Left, EdgeSide::Right)
    }
}

fn side_point(node: &LayoutNode, side: EdgeSide) -> (f32, f32) {
    match side {
        EdgeSide::Top => (node.x + node.width / 2.0, node.y),
        EdgeSide::Bottom => (node.x + node.width / 2.0, node.y + node.height),
        EdgeSide::Left => (node.x, node.y + node.height / 2.0),
        EdgeSide::Right => (node.x + node.width, node.y + node.height / 2.0),
    }
}

fn is_horizontal(side: EdgeSide) -> bool {
    matches!(side, EdgeSide::Left | EdgeSide::Right)
}

fn in_bounds(node: &LayoutNode, canvas_width: f32, canvas_height: f32) -> bool {
    node.x >= 0.0
        && node.y >= 0.0
        && node.x + node.width <= canvas_width
        && node.y + node.height <= canvas_height
}

/// Evenly spaced vertical offsets centered on zero, one per horizontal
/// connection, in supplied order. A single connection gets no offset.
fn stagger_offsets(count: usize) -> Vec<f32> {
    if count <= 1 {
        return vec![0.0; count];
    }
    let mid = (count as f32 - 1.0) / 2.0;
    (0..count)
        .map(|idx| (idx as f32 - mid) * STAGGER_SPACING)
        .collect()
}

/// Route every parent-to-child connection in the tree. Reference children
/// are redirected to their canonical target before routing so arrows
/// always terminate at the one drawn box for that namespace; targets that
/// fall outside the canvas are dropped.
pub(super) fn route_connections(
    tree: &LayoutTree,
    canvas_width: f32,
    canvas_height: f32,
) -> Vec<Connection> {
    let mut connections = Vec::new();
    for source in tree.nodes.values() {
        connections.extend(route_node(source, tree, canvas_width, canvas_height));
    }
    connections
}

fn route_node(
    source: &LayoutNode,
    tree: &LayoutTree,
    canvas_width: f32,
    canvas_height: f32,
) -> Vec<Connection> {
    let mut routed = Vec::new();
    let mut horizontal_indices = Vec::new();

    for child in &source.children {
        // Reference or not, the lookup lands on the canonical node.
        let Some(target) = tree.get(child.namespace()) else {
            continue;
        };
        if !in_bounds(target, canvas_width, canvas_height) {
            continue;
        }
        let (from_side, to_side) = edge_sides(source, target);
        let (from_x, from_y) = side_point(source, from_side);
        let (to_x, to_y) = side_point(target, to_side);
        if is_horizontal(from_side) {
            horizontal_indices.push(routed.len());
        }
        routed.push(Connection {
            from: source.namespace.clone(),
            to: target.namespace.clone(),
            from_x,
            from_y,
            to_x,
            to_y,
            stagger: 0.0,
        });
    }

    if horizontal_indices.len() > 1 {
        let offsets = stagger_offsets(horizontal_indices.len());
        for (slot, idx) in horizontal_indices.into_iter().enumerate() {
            routed[idx].stagger = offsets[slot];
        }
    }
    routed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutChild;

    fn node_at(namespace: &str, x: f32, y: f32, children: Vec<LayoutChild>) -> LayoutNode {
        LayoutNode {
            namespace: namespace.to_string(),
            label: namespace.to_string(),
            level: 0,
            x,
            y,
            width: 100.0,
            height: 40.0,
            is_root: false,
            children,
        }
    }

    fn tree_of(nodes: Vec<LayoutNode>) -> LayoutTree {
        let mut tree = LayoutTree {
            root: nodes[0].namespace.clone(),
            nodes: Default::default(),
        };
        for node in nodes {
            tree.nodes.insert(node.namespace.clone(), node);
        }
        tree
    }

    #[test]
    fn downward_wins_even_with_sideways_offset() {
        let tree = tree_of(vec![
            node_at("S", 0.0, 0.0, vec![LayoutChild::Node("T".to_string())]),
            node_at("T", 30.0, 100.0, Vec::new()),
        ]);
        let connections = route_connections(&tree, 1000.0, 1000.0);
        assert_eq!(connections.len(), 1);
        let c = &connections[0];
        // bottom-center of S to top-center of T
        assert_eq!((c.from_x, c.from_y), (50.0, 40.0));
        assert_eq!((c.to_x, c.to_y), (80.0, 100.0));
    }

    #[test]
    fn upward_dominant_uses_top_to_bottom() {
        let tree = tree_of(vec![
            node_at("S", 0.0, 200.0, vec![LayoutChild::Node("T".to_string())]),
            node_at("T", 10.0, 0.0, Vec::new()),
        ]);
        let connections = route_connections(&tree, 1000.0, 1000.0);
        let c = &connections[0];
        assert_eq!((c.from_x, c.from_y), (50.0, 200.0));
        assert_eq!((c.to_x, c.to_y), (60.0, 40.0));
    }

    #[test]
    fn horizontal_siblings_get_symmetric_staggers() {
        let children = vec![
            LayoutChild::Node("T1".to_string()),
            LayoutChild::Node("T2".to_string()),
            LayoutChild::Node("T3".to_string()),
        ];
        let tree = tree_of(vec![
            node_at("S", 0.0, 0.0, children),
            node_at("T1", 300.0, 0.0, Vec::new()),
            node_at("T2", 450.0, 0.0, Vec::new()),
            node_at("T3", 600.0, 0.0, Vec::new()),
        ]);
        let connections = route_connections(&tree, 1000.0, 1000.0);
        let staggers: Vec<f32> = connections.iter().map(|c| c.stagger).collect();
        assert_eq!(staggers.len(), 3);
        let sum: f32 = staggers.iter().sum();
        assert!(sum.abs() < 1e-6, "staggers must be centered on zero");
        assert!(staggers.iter().any(|s| *s < 0.0));
        assert!(staggers.iter().any(|s| *s > 0.0));
        let mut sorted = staggers.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        sorted.dedup();
        assert_eq!(sorted.len(), 3, "staggers must be distinct");
    }

    #[test]
    fn single_horizontal_sibling_has_no_stagger() {
        let tree = tree_of(vec![
            node_at("S", 0.0, 0.0, vec![LayoutChild::Node("T".to_string())]),
            node_at("T", 300.0, 0.0, Vec::new()),
        ]);
        let connections = route_connections(&tree, 1000.0, 1000.0);
        assert_eq!(connections[0].stagger, 0.0);
    }

    #[test]
    fn vertical_targets_never_stagger() {
        let children = vec![
            LayoutChild::Node("T1".to_string()),
            LayoutChild::Node("T2".to_string()),
        ];
        let tree = tree_of(vec![
            node_at("S", 200.0, 0.0, children),
            node_at("T1", 0.0, 100.0, Vec::new()),
            node_at("T2", 400.0, 100.0, Vec::new()),
        ]);
        let connections = route_connections(&tree, 1000.0, 1000.0);
        assert!(connections.iter().all(|c| c.stagger == 0.0));
    }

    #[test]
    fn out_of_bounds_target_is_dropped() {
        let tree = tree_of(vec![
            node_at("S", 0.0, 0.0, vec![LayoutChild::Node("T".to_string())]),
            node_at("T", 2000.0, 100.0, Vec::new()),
        ]);
        let connections = route_connections(&tree, 1000.0, 1000.0);
        assert!(connections.is_empty());
    }
}
