use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::theme::Theme;

/// Node box and spacing profile. Which profile applies is a discrete
/// choice resolved once per render from the distinct-node count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizeProfile {
    pub node_width: f32,
    pub node_height: f32,
    pub level_gap: f32,
    pub horizontal_gap: f32,
    pub font_size: f32,
    pub canvas_padding: f32,
}

impl SizeProfile {
    pub fn normal() -> Self {
        Self {
            node_width: 160.0,
            node_height: 48.0,
            level_gap: 60.0,
            horizontal_gap: 40.0,
            font_size: 13.0,
            canvas_padding: 24.0,
        }
    }

    pub fn compact() -> Self {
        Self {
            node_width: 120.0,
            node_height: 36.0,
            level_gap: 40.0,
            horizontal_gap: 24.0,
            font_size: 10.0,
            canvas_padding: 16.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Branch expansion stops at this depth; the node at the cap becomes a leaf.
    pub max_depth: u32,
    /// No further canonical nodes are registered past this count.
    pub max_nodes_per_diagram: usize,
    /// Distinct-node count above which the compact profile is selected.
    pub complex_tree_threshold: usize,
    pub normal: SizeProfile,
    pub compact: SizeProfile,
    pub min_canvas_width: f32,
    pub min_canvas_height: f32,
    pub max_canvas_width: f32,
    pub max_canvas_height: f32,
    pub label_line_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_depth: 10,
            max_nodes_per_diagram: 100,
            complex_tree_threshold: 30,
            normal: SizeProfile::normal(),
            compact: SizeProfile::compact(),
            min_canvas_width: 400.0,
            min_canvas_height: 300.0,
            max_canvas_width: 8000.0,
            max_canvas_height: 8000.0,
            label_line_height: 1.2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

/// Partial on-disk representation; every field optional so a config file
/// can override a single knob.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    max_depth: Option<u32>,
    max_nodes_per_diagram: Option<usize>,
    complex_tree_threshold: Option<usize>,
    normal_size_profile: Option<SizeProfile>,
    compact_size_profile: Option<SizeProfile>,
    min_canvas_width: Option<f32>,
    min_canvas_height: Option<f32>,
    max_canvas_width: Option<f32>,
    max_canvas_height: Option<f32>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = json5::from_str(&contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "modern" {
            config.theme = Theme::modern();
        } else if theme_name == "base" || theme_name == "default" || theme_name == "mermaid" {
            config.theme = Theme::mermaid_default();
        }
    }
    if let Some(v) = parsed.max_depth {
        config.layout.max_depth = v;
    }
    if let Some(v) = parsed.max_nodes_per_diagram {
        config.layout.max_nodes_per_diagram = v;
    }
    if let Some(v) = parsed.complex_tree_threshold {
        config.layout.complex_tree_threshold = v;
    }
    if let Some(v) = parsed.normal_size_profile {
        config.layout.normal = v;
    }
    if let Some(v) = parsed.compact_size_profile {
        config.layout.compact = v;
    }
    if let Some(v) = parsed.min_canvas_width {
        config.layout.min_canvas_width = v;
    }
    if let Some(v) = parsed.min_canvas_height {
        config.layout.min_canvas_height = v;
    }
    if let Some(v) = parsed.max_canvas_width {
        config.layout.max_canvas_width = v;
    }
    if let Some(v) = parsed.max_canvas_height {
        config.layout.max_canvas_height = v;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_caps() {
        let config = LayoutConfig::default();
        assert_eq!(config.max_depth, 10);
        assert_eq!(config.max_nodes_per_diagram, 100);
    }

    #[test]
    fn config_file_overrides_single_knob() {
        let parsed: ConfigFile = json5::from_str("{ maxDepth: 4 }").unwrap();
        assert_eq!(parsed.max_depth, Some(4));
        assert!(parsed.max_nodes_per_diagram.is_none());
    }
}
