//! Cross-community edge statistics

use crate::community::Partition;
use crate::graph::CompressedGraph;
use log;
use serde::Serialize;

/// Tally of directed edges crossing community boundaries
#[derive(Debug, Clone, Serialize)]
pub struct CrossCommunityStats {
    /// Directed edges whose endpoints lie in different communities
    pub cross_edges: usize,

    /// Directed edges whose endpoints share a community
    pub intra_edges: usize,

    /// All directed edges examined
    pub total_edges: usize,

    /// Share of cross-community edges, in percent
    pub cross_edge_percentage: f64,
}

/// Count the edges that cross community boundaries
///
/// An endpoint missing from the partition counts as its own unmatched
/// community, so edges touching uncovered nodes are always cross-community.
pub fn analyze_cross_community_edges(
    graph: &CompressedGraph,
    partition: &Partition,
) -> CrossCommunityStats {
    log::info!("Analyzing cross-community edges");

    let total_edges = graph.edge_count();
    let mut cross_edges = 0usize;
    let mut processed = 0usize;

    for node in 0..graph.node_count {
        let source = partition.community_of(node as u32);
        for &target in graph.outgoing_edges(node) {
            let is_cross = match (source, partition.community_of(target)) {
                (Some(a), Some(b)) => a != b,
                _ => true,
            };
            if is_cross {
                cross_edges += 1;
            }

            processed += 1;
            if processed % 100_000 == 0 {
                log::debug!(
                    "Processed {}/{} edges, {} cross-community so far",
                    processed,
                    total_edges,
                    cross_edges
                );
            }
        }
    }

    let intra_edges = total_edges - cross_edges;
    let cross_edge_percentage = if total_edges == 0 {
        0.0
    } else {
        100.0 * cross_edges as f64 / total_edges as f64
    };

    log::info!(
        "Cross-community edges: {} of {} ({:.2}%)",
        cross_edges,
        total_edges,
        cross_edge_percentage
    );

    CrossCommunityStats {
        cross_edges,
        intra_edges,
        total_edges,
        cross_edge_percentage,
    }
}
