//! Community detection using Louvain modularity optimization

use crate::community::{renumber, Partition};
use crate::graph::algorithms::undirected_projection;
use crate::graph::CompressedGraph;
use log;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::BTreeMap;

/// Weighted undirected working graph for one Louvain level
///
/// Adjacency rows never contain the node itself; edge weight folded inside
/// a community during aggregation is tracked as a self-loop instead.
struct WeightedGraph {
    adjacency: Vec<Vec<(u32, f64)>>,
    self_loops: Vec<f64>,
}

impl WeightedGraph {
    /// Weight-1 working graph from an undirected projection
    fn from_projection(projection: &CompressedGraph) -> Self {
        let adjacency = (0..projection.node_count)
            .map(|node| {
                projection
                    .outgoing_edges(node)
                    .iter()
                    .map(|&target| (target, 1.0))
                    .collect()
            })
            .collect();

        Self {
            adjacency,
            self_loops: vec![0.0; projection.node_count],
        }
    }

    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Total edge weight m, counting each undirected edge once
    fn total_weight(&self) -> f64 {
        let paired: f64 = self
            .adjacency
            .iter()
            .flat_map(|row| row.iter().map(|&(_, weight)| weight))
            .sum();
        paired / 2.0 + self.self_loops.iter().sum::<f64>()
    }

    /// Weighted degree of a node, with the self-loop counted twice
    fn weighted_degree(&self, node: usize) -> f64 {
        let adjacent: f64 = self.adjacency[node].iter().map(|&(_, weight)| weight).sum();
        adjacent + 2.0 * self.self_loops[node]
    }
}

/// Local-move phase: greedily reassign nodes while modularity improves
///
/// Returns per-node community labels and whether any move happened. Nodes
/// are visited in an order shuffled from `rng`.
fn one_level(graph: &WeightedGraph, total_weight: f64, rng: &mut StdRng) -> (Vec<u32>, bool) {
    let node_count = graph.node_count();
    let mut community: Vec<u32> = (0..node_count as u32).collect();
    let degree: Vec<f64> = (0..node_count)
        .map(|node| graph.weighted_degree(node))
        .collect();
    let mut community_total = degree.clone();

    let mut order: Vec<usize> = (0..node_count).collect();
    order.shuffle(rng);

    let mut improved = false;
    loop {
        let mut moves = 0usize;
        for &node in &order {
            let current = community[node];

            // Edge weight from this node to each adjacent community.
            // BTreeMap keeps candidate order deterministic for a fixed seed.
            let mut link_weights: BTreeMap<u32, f64> = BTreeMap::new();
            for &(neighbor, weight) in &graph.adjacency[node] {
                *link_weights
                    .entry(community[neighbor as usize])
                    .or_insert(0.0) += weight;
            }

            // Evaluate candidates with the node lifted out of its community
            community_total[current as usize] -= degree[node];

            let current_links = link_weights.get(&current).copied().unwrap_or(0.0);
            let mut best = current;
            let mut best_gain = current_links
                - degree[node] * community_total[current as usize] / (2.0 * total_weight);

            for (&candidate, &links) in &link_weights {
                if candidate == current {
                    continue;
                }
                let gain = links
                    - degree[node] * community_total[candidate as usize] / (2.0 * total_weight);
                if gain > best_gain {
                    best_gain = gain;
                    best = candidate;
                }
            }

            community_total[best as usize] += degree[node];
            if best != current {
                community[node] = best;
                moves += 1;
                improved = true;
            }
        }

        if moves == 0 {
            break;
        }
    }

    (community, improved)
}

/// Collapse each community into a single node
///
/// Intra-community edge weight folds into the merged node's self-loop, so
/// the total edge weight is preserved across levels.
fn aggregate(graph: &WeightedGraph, labels: &[u32], community_count: usize) -> WeightedGraph {
    let mut merged: Vec<BTreeMap<u32, f64>> = vec![BTreeMap::new(); community_count];
    let mut self_loops = vec![0.0; community_count];

    for node in 0..graph.node_count() {
        let source = labels[node];
        self_loops[source as usize] += graph.self_loops[node];

        for &(neighbor, weight) in &graph.adjacency[node] {
            let target = labels[neighbor as usize];
            if source == target {
                // The same undirected edge appears in both rows; fold it once
                if node < neighbor as usize {
                    self_loops[source as usize] += weight;
                }
            } else {
                *merged[source as usize].entry(target).or_insert(0.0) += weight;
            }
        }
    }

    WeightedGraph {
        adjacency: merged
            .into_iter()
            .map(|row| row.into_iter().collect())
            .collect(),
        self_loops,
    }
}

/// Detect communities with the Louvain method
///
/// Edge direction is ignored: the graph's undirected projection is
/// partitioned. Node visit order comes from `rng`, so a fixed seed gives a
/// reproducible partition. An edgeless graph leaves every node in its own
/// community.
pub fn detect_communities(graph: &CompressedGraph, rng: &mut StdRng) -> Partition {
    log::info!("Detecting communities with the Louvain method");

    let projection = undirected_projection(graph);
    let node_count = projection.node_count;
    if node_count == 0 {
        return Partition::new(Vec::new());
    }

    let mut working = WeightedGraph::from_projection(&projection);
    let total_weight = working.total_weight();
    if total_weight == 0.0 {
        return Partition::new((0..node_count as u32).collect());
    }

    let mut assignment: Vec<u32> = (0..node_count as u32).collect();
    loop {
        let (mut labels, improved) = one_level(&working, total_weight, rng);
        if !improved {
            break;
        }

        let community_count = renumber(&mut labels);
        for slot in assignment.iter_mut() {
            *slot = labels[*slot as usize];
        }

        // Every community is still a singleton: aggregating cannot merge more
        if community_count == working.node_count() {
            break;
        }
        working = aggregate(&working, &labels, community_count);
    }

    let partition = Partition::new(assignment);
    log::info!(
        "Community detection found {} communities",
        partition.community_count()
    );
    partition
}
