mod graph;
mod load;
mod parse;

pub use graph::{
    CommitGraph, EdgeKind, GraphEdge, GraphNode, GraphStatistics, NodeKind, RawPosition,
};
pub use load::load_commit_graph;
