mod dedup;
mod error;
mod position;
mod routing;
pub(crate) mod types;

pub use error::LayoutError;
pub use types::*;

use crate::config::LayoutConfig;
use crate::hierarchy::hierarchize;
use crate::ir::{DependencyGraph, DependencyRecord};

/// Namespaces with more than this many dot-separated segments are
/// abbreviated to their last two for display.
const LABEL_SEGMENTS: usize = 2;

/// Full render pipeline: expand the flat records into a hierarchy, collapse
/// duplicates into canonical nodes, assign level-band coordinates, route
/// connections. The root is the record discovered at level 0; without one
/// the result is an empty diagram at minimum canvas size.
pub fn compute_layout(
    records: &[DependencyRecord],
    config: &LayoutConfig,
) -> Result<DiagramLayout, LayoutError> {
    let graph = DependencyGraph::from_records(records);
    let Some(root) = graph.root() else {
        return Ok(DiagramLayout {
            tree: LayoutTree::default(),
            connections: Vec::new(),
            width: config.min_canvas_width,
            height: config.min_canvas_height,
            size_mode: SizeMode::Normal,
        });
    };
    let root_namespace = root.namespace.clone();

    let hierarchy = hierarchize(&root_namespace, &graph, config);

    let size_mode = if hierarchy.distinct_namespaces() > config.complex_tree_threshold {
        SizeMode::Compact
    } else {
        SizeMode::Normal
    };
    let profile = match size_mode {
        SizeMode::Normal => &config.normal,
        SizeMode::Compact => &config.compact,
    };

    let mut tree = dedup::build_layout_tree(&hierarchy, profile, config.max_nodes_per_diagram);
    let (width, height) = position::position(&mut tree, profile, config)?;
    let connections = routing::route_connections(&tree, width, height);

    Ok(DiagramLayout {
        tree,
        connections,
        width,
        height,
        size_mode,
    })
}

/// Last two dot-separated segments of a deeply qualified namespace.
pub(crate) fn abbreviate_namespace(namespace: &str) -> String {
    let segments: Vec<&str> = namespace.split('.').collect();
    if segments.len() > LABEL_SEGMENTS {
        segments[segments.len() - LABEL_SEGMENTS..].join(".")
    } else {
        namespace.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abbreviates_deeply_qualified_namespaces() {
        assert_eq!(
            abbreviate_namespace("com.example.core.Service"),
            "core.Service"
        );
        assert_eq!(abbreviate_namespace("core.Service"), "core.Service");
        assert_eq!(abbreviate_namespace("Service"), "Service");
    }
}
