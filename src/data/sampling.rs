//! Random node sampling for graph analysis

use crate::graph::algorithms::induce_subgraph;
use crate::graph::CompressedGraph;
use log;
use rand::rngs::StdRng;
use rand::seq::index;
use thiserror::Error;

/// Errors raised when a sampling request is invalid
#[derive(Debug, Error)]
pub enum SampleError {
    #[error("sample ratio must be within [0.0, 1.0], got {0}")]
    InvalidRatio(f64),
}

/// Random node sample of a graph
///
/// Selects `floor(node_count * ratio)` nodes uniformly without replacement
/// and returns their induced subgraph. A ratio of 1.0 keeps every node and
/// a ratio of 0.0 yields an empty graph.
pub fn sample_graph(
    graph: &CompressedGraph,
    ratio: f64,
    rng: &mut StdRng,
) -> Result<CompressedGraph, SampleError> {
    if !(0.0..=1.0).contains(&ratio) {
        return Err(SampleError::InvalidRatio(ratio));
    }

    let target = (graph.node_count as f64 * ratio).floor() as usize;
    log::info!(
        "Sampling {} of {} nodes (ratio {})",
        target,
        graph.node_count,
        ratio
    );

    let selected: Vec<u32> = if target >= graph.node_count {
        (0..graph.node_count as u32).collect()
    } else {
        let mut nodes: Vec<u32> = index::sample(rng, graph.node_count, target)
            .iter()
            .map(|i| i as u32)
            .collect();
        nodes.sort_unstable();
        nodes
    };

    let sampled = induce_subgraph(graph, &selected);
    log::info!(
        "Sampled graph has {} nodes and {} edges",
        sampled.node_count,
        sampled.edge_count()
    );

    Ok(sampled)
}
