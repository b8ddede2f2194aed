use std::collections::HashMap;
use std::fs;

use anyhow::{Context, Result, anyhow, bail};
use tracing::info;

use super::graph::{
    CommitGraph, EdgeKind, GraphEdge, GraphNode, GraphStatistics, NodeKind, RawPosition,
};
use super::parse::{RawNode, parse_graph_document};

pub fn load_commit_graph(path: &str) -> Result<CommitGraph> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read commit graph document {path}"))?;

    let graph = graph_from_document(&raw, path)
        .with_context(|| format!("failed to load commit graph from {path}"))?;

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded commit graph"
    );

    Ok(graph)
}

fn graph_from_document(raw: &str, source_path: &str) -> Result<CommitGraph> {
    let document = parse_graph_document(raw)?;

    let mut nodes = HashMap::with_capacity(document.nodes.len());
    for raw_node in &document.nodes {
        if raw_node.id.is_empty() {
            bail!("graph document contains a node with an empty id");
        }

        let kind = node_kind(raw_node)?;
        let position = document
            .layout
            .get(&raw_node.id)
            .copied()
            .or(raw_node.position)
            .ok_or_else(|| anyhow!("node {} has no layout position", raw_node.id))?;

        let label = if raw_node.label.is_empty() {
            raw_node.id.clone()
        } else {
            raw_node.label.clone()
        };

        let previous = nodes.insert(
            raw_node.id.clone(),
            GraphNode {
                id: raw_node.id.clone(),
                label,
                kind,
                position: RawPosition {
                    x: position.x,
                    y: position.y,
                    level: position.level,
                },
            },
        );
        if previous.is_some() {
            bail!("duplicate node id {} in graph document", raw_node.id);
        }
    }

    // Edges referencing unknown nodes stay in the model; the renderer skips
    // and counts them instead of dropping them here.
    let edges = document
        .edges
        .iter()
        .map(|raw_edge| GraphEdge {
            source: raw_edge.source.clone(),
            target: raw_edge.target.clone(),
            kind: edge_kind(&raw_edge.kind),
        })
        .collect::<Vec<_>>();

    let statistics = match document.statistics {
        Some(raw) => GraphStatistics {
            total_commits: raw.total_commits,
            total_file_changes: raw.total_file_changes,
            unique_files: raw.unique_files,
            average_files_per_commit: raw.average_files_per_commit,
        },
        None => GraphStatistics::derive(&nodes),
    };

    Ok(CommitGraph {
        source_path: source_path.to_string(),
        nodes,
        edges,
        statistics,
    })
}

fn node_kind(raw: &RawNode) -> Result<NodeKind> {
    let metadata = &raw.metadata;
    match raw.kind.as_str() {
        "commit" => Ok(NodeKind::Commit {
            sha: metadata.sha.clone().unwrap_or_default(),
            message: metadata.message.clone().unwrap_or_default(),
            author: metadata.author.clone().unwrap_or_default(),
            timestamp: metadata.timestamp.clone().unwrap_or_default(),
        }),
        "file" => Ok(NodeKind::File {
            file_path: metadata.file_path.clone().unwrap_or_default(),
            change_type: metadata.change_type.clone().unwrap_or_default(),
            additions: metadata.additions.unwrap_or(0),
            deletions: metadata.deletions.unwrap_or(0),
            commit_sha: metadata.commit_sha.clone(),
        }),
        other => Err(anyhow!(
            "unsupported node kind {other:?} for node {}",
            raw.id
        )),
    }
}

fn edge_kind(raw: &str) -> EdgeKind {
    match raw {
        "commit_parent" => EdgeKind::CommitParent,
        "commit_to_file" => EdgeKind::CommitToFile,
        "file_evolution" => EdgeKind::FileEvolution,
        _ => EdgeKind::Other,
    }
}
