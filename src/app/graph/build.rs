use std::collections::HashMap;

use eframe::egui::pos2;
use tracing::warn;

use crate::repo::CommitGraph;

use super::super::render_utils::{edge_stroke_color, node_fill_color};
use super::super::viewport::GraphBounds;
use super::super::{RenderEdge, RenderGraph, RenderNode, ViewScratch};

/// Flattens the loaded graph into draw order: nodes sorted by layout level
/// then id (so iteration, drawing, and hit-test tie-breaks are deterministic),
/// edges resolved to node indices. Edges with a missing endpoint are skipped
/// and counted rather than dropped silently or aborting the build.
pub(in crate::app) fn build_render_graph(graph: &CommitGraph) -> RenderGraph {
    let mut ordered = graph.nodes.values().collect::<Vec<_>>();
    ordered.sort_by(|a, b| {
        a.position
            .level
            .cmp(&b.position.level)
            .then_with(|| a.id.cmp(&b.id))
    });

    let nodes = ordered
        .iter()
        .map(|node| RenderNode {
            id: node.id.clone(),
            label: node.label.clone(),
            graph_pos: pos2(node.position.x, node.position.y),
            fill: node_fill_color(&node.kind),
        })
        .collect::<Vec<_>>();

    let mut index_by_id = HashMap::with_capacity(nodes.len());
    for (index, node) in nodes.iter().enumerate() {
        index_by_id.insert(node.id.clone(), index);
    }

    let mut edges = Vec::with_capacity(graph.edges.len());
    let mut skipped_edges = 0usize;
    for edge in &graph.edges {
        match (index_by_id.get(&edge.source), index_by_id.get(&edge.target)) {
            (Some(&source), Some(&target)) => edges.push(RenderEdge {
                source,
                target,
                color: edge_stroke_color(edge.kind),
            }),
            _ => {
                skipped_edges += 1;
                warn!(
                    source = edge.source.as_str(),
                    target = edge.target.as_str(),
                    "skipping edge with missing endpoint"
                );
            }
        }
    }

    let bounds = GraphBounds::from_points(nodes.iter().map(|node| node.graph_pos));

    RenderGraph {
        nodes,
        edges,
        index_by_id,
        bounds,
        skipped_edges,
        view_scratch: ViewScratch {
            screen_positions: Vec::new(),
            screen_radii: Vec::new(),
        },
    }
}
