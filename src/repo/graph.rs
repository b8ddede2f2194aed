use std::collections::{HashMap, HashSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeKind {
    CommitParent,
    CommitToFile,
    FileEvolution,
    Other,
}

impl EdgeKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::CommitParent => "Parent commit",
            Self::CommitToFile => "Commit touches file",
            Self::FileEvolution => "File evolution",
            Self::Other => "Other",
        }
    }
}

/// Per-kind metadata, closed: every field a node of that kind can carry is
/// listed here, and unknown kinds are rejected at load time.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Commit {
        sha: String,
        message: String,
        author: String,
        timestamp: String,
    },
    File {
        file_path: String,
        change_type: String,
        additions: u64,
        deletions: u64,
        commit_sha: Option<String>,
    },
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Commit { .. } => "commit",
            Self::File { .. } => "file",
        }
    }
}

/// Layout coordinates in graph space, assigned by the external pipeline.
/// The viewer only ever reads these.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawPosition {
    pub x: f32,
    pub y: f32,
    pub level: i32,
}

#[derive(Clone, Debug)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    pub position: RawPosition,
}

#[derive(Clone, Debug)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GraphStatistics {
    pub total_commits: usize,
    pub total_file_changes: usize,
    pub unique_files: usize,
    pub average_files_per_commit: f64,
}

impl GraphStatistics {
    pub fn derive(nodes: &HashMap<String, GraphNode>) -> Self {
        let mut total_commits = 0usize;
        let mut total_file_changes = 0usize;
        let mut file_paths = HashSet::new();

        for node in nodes.values() {
            match &node.kind {
                NodeKind::Commit { .. } => total_commits += 1,
                NodeKind::File { file_path, .. } => {
                    total_file_changes += 1;
                    file_paths.insert(file_path.as_str());
                }
            }
        }

        let average_files_per_commit = if total_commits > 0 {
            total_file_changes as f64 / total_commits as f64
        } else {
            0.0
        };

        Self {
            total_commits,
            total_file_changes,
            unique_files: file_paths.len(),
            average_files_per_commit,
        }
    }
}

#[derive(Clone, Debug)]
pub struct CommitGraph {
    pub source_path: String,
    pub nodes: HashMap<String, GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub statistics: GraphStatistics,
}

impl CommitGraph {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit_node(id: &str) -> GraphNode {
        GraphNode {
            id: id.to_string(),
            label: id.to_string(),
            kind: NodeKind::Commit {
                sha: id.to_string(),
                message: String::new(),
                author: String::new(),
                timestamp: String::new(),
            },
            position: RawPosition {
                x: 0.0,
                y: 0.0,
                level: 0,
            },
        }
    }

    fn file_node(id: &str, path: &str) -> GraphNode {
        GraphNode {
            id: id.to_string(),
            label: path.to_string(),
            kind: NodeKind::File {
                file_path: path.to_string(),
                change_type: "modified".to_string(),
                additions: 1,
                deletions: 0,
                commit_sha: None,
            },
            position: RawPosition {
                x: 300.0,
                y: 0.0,
                level: 1,
            },
        }
    }

    #[test]
    fn statistics_count_kinds_and_distinct_paths() {
        let mut nodes = HashMap::new();
        nodes.insert("c1".to_string(), commit_node("c1"));
        nodes.insert("c2".to_string(), commit_node("c2"));
        nodes.insert("f1".to_string(), file_node("f1", "src/lib.rs"));
        nodes.insert("f2".to_string(), file_node("f2", "src/lib.rs"));
        nodes.insert("f3".to_string(), file_node("f3", "README.md"));

        let statistics = GraphStatistics::derive(&nodes);
        assert_eq!(statistics.total_commits, 2);
        assert_eq!(statistics.total_file_changes, 3);
        assert_eq!(statistics.unique_files, 2);
        assert!((statistics.average_files_per_commit - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn statistics_of_empty_graph_are_zero() {
        let statistics = GraphStatistics::derive(&HashMap::new());
        assert_eq!(statistics, GraphStatistics::default());
    }
}
