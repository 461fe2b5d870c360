use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;

use crate::layout::{DiagramLayout, LayoutChild, SizeMode};

/// Flat JSON view of a positioned diagram, for downstream report writers
/// and for inspecting layouts without rendering them.
#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub root: String,
    pub width: f32,
    pub height: f32,
    pub size_mode: SizeMode,
    pub nodes: Vec<NodeDump>,
    pub connections: Vec<ConnectionDump>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub namespace: String,
    pub label: String,
    pub level: u32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub is_root: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ConnectionDump {
    pub from: String,
    pub to: String,
    pub points: [[f32; 2]; 2],
    pub stagger: f32,
}

impl LayoutDump {
    pub fn from_layout(layout: &DiagramLayout) -> Self {
        let nodes = layout
            .tree
            .nodes
            .values()
            .map(|node| {
                let mut children = Vec::new();
                let mut references = Vec::new();
                for child in &node.children {
                    match child {
                        LayoutChild::Node(ns) => children.push(ns.clone()),
                        LayoutChild::Reference(ns) => references.push(ns.clone()),
                    }
                }
                NodeDump {
                    namespace: node.namespace.clone(),
                    label: node.label.clone(),
                    level: node.level,
                    x: node.x,
                    y: node.y,
                    width: node.width,
                    height: node.height,
                    is_root: node.is_root,
                    children,
                    references,
                }
            })
            .collect();
        let connections = layout
            .connections
            .iter()
            .map(|connection| ConnectionDump {
                from: connection.from.clone(),
                to: connection.to.clone(),
                points: [
                    [connection.from_x, connection.from_y],
                    [connection.to_x, connection.to_y],
                ],
                stagger: connection.stagger,
            })
            .collect();
        Self {
            root: layout.tree.root.clone(),
            width: layout.width,
            height: layout.height,
            size_mode: layout.size_mode,
            nodes,
            connections,
        }
    }

    pub fn write_json(&self, path: &Path) -> anyhow::Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }
}
