use std::path::Path;

use anyhow::Result;

use crate::config::{LayoutConfig, SizeProfile};
#[cfg(feature = "png")]
use crate::config::RenderConfig;
use crate::layout::{DiagramLayout, SizeMode};
use crate::text_metrics;
use crate::theme::Theme;

/// Horizontal padding kept between a label and its node border.
const LABEL_PAD_X: f32 = 8.0;
const NODE_CORNER_RADIUS: f32 = 6.0;

pub fn render_svg(layout: &DiagramLayout, theme: &Theme, config: &LayoutConfig) -> String {
    let profile = profile_for(layout.size_mode, config);
    let width = layout.width;
    let height = layout.height;
    let mut svg = String::new();

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    svg.push_str("<defs>");
    svg.push_str(&format!(
        "<marker id=\"arrow\" viewBox=\"0 0 10 10\" refX=\"10\" refY=\"5\" markerWidth=\"6\" markerHeight=\"6\" orient=\"auto-start-reverse\"><path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"{}\"/></marker>",
        theme.line_color
    ));
    svg.push_str("</defs>");

    for connection in &layout.connections {
        let from_y = connection.from_y + connection.stagger;
        let to_y = connection.to_y + connection.stagger;
        svg.push_str(&format!(
            "<path d=\"M {:.2} {:.2} L {:.2} {:.2}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1.4\" marker-end=\"url(#arrow)\"/>",
            connection.from_x, from_y, connection.to_x, to_y, theme.line_color
        ));
    }

    for node in layout.tree.nodes.values() {
        let (fill, text_color) = if node.is_root {
            (theme.root_fill.as_str(), theme.root_text_color.as_str())
        } else {
            (theme.node_fill.as_str(), theme.node_text_color.as_str())
        };
        svg.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{NODE_CORNER_RADIUS}\" ry=\"{NODE_CORNER_RADIUS}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1.4\"/>",
            node.x, node.y, node.width, node.height, fill, theme.node_border_color
        ));

        let label = text_metrics::fit_label(
            &node.label,
            node.width - LABEL_PAD_X * 2.0,
            profile.font_size,
            &theme.font_family,
        );
        let center_x = node.x + node.width / 2.0;
        let baseline_y = node.y + node.height / 2.0 + profile.font_size / 3.0;
        svg.push_str(&format!(
            "<text x=\"{center_x:.2}\" y=\"{baseline_y:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            theme.font_family,
            profile.font_size,
            text_color,
            escape_xml(&label)
        ));
    }

    svg.push_str("</svg>");
    svg
}

fn profile_for(mode: SizeMode, config: &LayoutConfig) -> &SizeProfile {
    match mode {
        SizeMode::Normal => &config.normal,
        SizeMode::Compact => &config.compact,
    }
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = "Inter".to_string();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .unwrap_or(usvg::Size::from_wh(800.0, 600.0).unwrap());

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::ir::DependencyRecord;
    use crate::layout::compute_layout;

    fn record(namespace: &str, level: u32, references: &[&str]) -> DependencyRecord {
        DependencyRecord {
            namespace: namespace.to_string(),
            level,
            references: references.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn render_svg_basic() {
        let records = [
            record("app.Main", 0, &["app.Service"]),
            record("app.Service", 1, &[]),
        ];
        let config = LayoutConfig::default();
        let layout = compute_layout(&records, &config).unwrap();
        let svg = render_svg(&layout, &Theme::modern(), &config);
        assert!(svg.contains("<svg"));
        assert!(svg.contains("app.Main"));
        assert!(svg.contains("marker-end"));
    }
}
