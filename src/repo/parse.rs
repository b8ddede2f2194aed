use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawGraphDocument {
    #[serde(default)]
    pub(super) nodes: Vec<RawNode>,
    #[serde(default)]
    pub(super) edges: Vec<RawEdge>,
    #[serde(default)]
    pub(super) layout: HashMap<String, RawLayoutEntry>,
    #[serde(default)]
    pub(super) statistics: Option<RawStatistics>,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawNode {
    pub(super) id: String,
    #[serde(rename = "type")]
    pub(super) kind: String,
    #[serde(default)]
    pub(super) label: String,
    #[serde(default)]
    pub(super) metadata: RawNodeMetadata,
    // Older exports inline the position on the node instead of the layout map.
    #[serde(default)]
    pub(super) position: Option<RawLayoutEntry>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub(super) struct RawNodeMetadata {
    #[serde(default)]
    pub(super) sha: Option<String>,
    #[serde(default)]
    pub(super) message: Option<String>,
    #[serde(default)]
    pub(super) author: Option<String>,
    #[serde(default)]
    pub(super) timestamp: Option<String>,
    #[serde(default)]
    pub(super) file_path: Option<String>,
    #[serde(default)]
    pub(super) change_type: Option<String>,
    #[serde(default)]
    pub(super) additions: Option<u64>,
    #[serde(default)]
    pub(super) deletions: Option<u64>,
    #[serde(default)]
    pub(super) commit_sha: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawEdge {
    pub(super) source: String,
    pub(super) target: String,
    #[serde(rename = "type", default)]
    pub(super) kind: String,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub(super) struct RawLayoutEntry {
    #[serde(default)]
    pub(super) x: f32,
    #[serde(default)]
    pub(super) y: f32,
    #[serde(default)]
    pub(super) level: i32,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub(super) struct RawStatistics {
    #[serde(default)]
    pub(super) total_commits: usize,
    #[serde(default)]
    pub(super) total_file_changes: usize,
    #[serde(default)]
    pub(super) unique_files: usize,
    #[serde(default)]
    pub(super) average_files_per_commit: f64,
}

pub(super) fn parse_graph_document(raw: &str) -> Result<RawGraphDocument> {
    serde_json::from_str(raw).context("invalid commit graph JSON")
}
