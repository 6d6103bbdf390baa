//! Degree-centrality ranking

use crate::graph::CompressedGraph;
use itertools::Itertools;
use log;
use serde::Serialize;

/// A node together with its degree-centrality score
#[derive(Debug, Clone, Serialize)]
pub struct RankedNode {
    /// Internal node index
    pub node: u32,

    /// Original ID from the input file
    pub id: u64,

    /// Total degree divided by (node_count - 1)
    pub centrality: f64,
}

/// Degree centrality of every node: degree(v) / (N - 1)
///
/// Graphs with one node score it 1.0, matching the usual convention for
/// the degenerate denominator.
pub fn degree_centrality(graph: &CompressedGraph) -> Vec<f64> {
    let node_count = graph.node_count;
    if node_count == 0 {
        return Vec::new();
    }
    if node_count == 1 {
        return vec![1.0];
    }

    let scale = 1.0 / (node_count as f64 - 1.0);
    (0..node_count)
        .map(|node| graph.degree(node) as f64 * scale)
        .collect()
}

/// Top `count` nodes by degree centrality
///
/// Sorted by score descending; equal scores order by ascending original ID
/// so rankings are stable across runs.
pub fn top_nodes(graph: &CompressedGraph, count: usize) -> Vec<RankedNode> {
    log::info!("Ranking nodes by degree centrality");

    let scores = degree_centrality(graph);
    scores
        .iter()
        .enumerate()
        .map(|(node, &centrality)| RankedNode {
            node: node as u32,
            id: graph.node_ids[node],
            centrality,
        })
        .sorted_by(|a, b| b.centrality.total_cmp(&a.centrality).then(a.id.cmp(&b.id)))
        .take(count)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    #[test]
    fn scores_scale_by_node_count() {
        // 1 -> 2 -> 3: degrees 1, 2, 1
        let mut builder = GraphBuilder::with_capacity(3);
        builder.add_edge(1, 2);
        builder.add_edge(2, 3);
        let graph = builder.build();

        let scores = degree_centrality(&graph);
        assert_eq!(scores, vec![0.5, 1.0, 0.5]);
    }

    #[test]
    fn single_node_scores_one() {
        let mut builder = GraphBuilder::with_capacity(1);
        builder.get_or_create_node(42);
        let graph = builder.build();

        assert_eq!(degree_centrality(&graph), vec![1.0]);
    }

    #[test]
    fn empty_graph_has_no_scores() {
        let graph = GraphBuilder::with_capacity(0).build();
        assert!(degree_centrality(&graph).is_empty());
        assert!(top_nodes(&graph, 10).is_empty());
    }

    #[test]
    fn ranking_breaks_ties_by_ascending_id() {
        // 20 and 30 tie on degree 2, 10 and 40 tie on degree 1.
        // 30 is interned before 20, so the tie-break must look at IDs.
        let mut builder = GraphBuilder::with_capacity(4);
        builder.add_edge(30, 20);
        builder.add_edge(10, 20);
        builder.add_edge(30, 40);
        let graph = builder.build();

        let ranked = top_nodes(&graph, 10);
        let ids: Vec<u64> = ranked.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![20, 30, 10, 40]);
        assert!((ranked[0].centrality - 2.0 / 3.0).abs() < 1e-12);
        assert!((ranked[2].centrality - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn equal_degree_graph_ties_every_node() {
        // 4-cycle 5 -> 1 -> 3 -> 2 -> 5: every node has degree 2
        let mut builder = GraphBuilder::with_capacity(4);
        builder.add_edge(5, 1);
        builder.add_edge(1, 3);
        builder.add_edge(3, 2);
        builder.add_edge(2, 5);
        let graph = builder.build();

        let ranked = top_nodes(&graph, 10);
        let ids: Vec<u64> = ranked.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 5]);
        for node in &ranked {
            assert!((node.centrality - 2.0 / 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn ranking_is_truncated_to_count() {
        let mut builder = GraphBuilder::with_capacity(5);
        builder.add_edge(1, 2);
        builder.add_edge(2, 3);
        builder.add_edge(3, 4);
        builder.add_edge(4, 5);
        let graph = builder.build();

        assert_eq!(top_nodes(&graph, 2).len(), 2);
        assert_eq!(top_nodes(&graph, 100).len(), 5);
    }
}
