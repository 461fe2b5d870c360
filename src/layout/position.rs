use std::collections::BTreeMap;

use crate::config::{LayoutConfig, SizeProfile};

use super::{LayoutError, LayoutTree};

/// Assign per-level band coordinates to every canonical node and return
/// the canvas extent. Reference children borrow their target's position
/// at draw time and are not positioned here.
pub(super) fn position(
    tree: &mut LayoutTree,
    profile: &SizeProfile,
    config: &LayoutConfig,
) -> Result<(f32, f32), LayoutError> {
    let padding = profile.canvas_padding;

    let mut levels: BTreeMap<u32, Vec<String>> = BTreeMap::new();
    for node in tree.nodes.values() {
        levels
            .entry(node.level)
            .or_default()
            .push(node.namespace.clone());
    }

    let mut max_x = 0.0f32;
    let mut max_y = 0.0f32;
    for (level, namespaces) in &levels {
        let y = padding + *level as f32 * (profile.node_height + profile.level_gap);
        for (idx, namespace) in namespaces.iter().enumerate() {
            let x = padding + idx as f32 * (profile.node_width + profile.horizontal_gap);
            if let Some(node) = tree.nodes.get_mut(namespace) {
                node.x = x;
                node.y = y;
                max_x = max_x.max(x + node.width);
                max_y = max_y.max(y + node.height);
            }
        }
    }

    let raw_width = if tree.nodes.is_empty() {
        0.0
    } else {
        max_x + padding
    };
    let raw_height = if tree.nodes.is_empty() {
        0.0
    } else {
        max_y + padding
    };

    let width = raw_width.max(config.min_canvas_width);
    let height = raw_height.max(config.min_canvas_height);
    if width <= 0.0
        || height <= 0.0
        || raw_width > config.max_canvas_width
        || raw_height > config.max_canvas_height
    {
        return Err(LayoutError::UnrenderableSize {
            width: raw_width,
            height: raw_height,
        });
    }
    Ok((width, height))
}
