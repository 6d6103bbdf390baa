//! Independent-cascade spread simulation

use crate::graph::CompressedGraph;
use log;
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::{BTreeSet, HashSet};
use thiserror::Error;

/// Errors raised when a simulation request is invalid
#[derive(Debug, Error)]
pub enum SpreadError {
    #[error("spread probability must be within [0.0, 1.0], got {0}")]
    InvalidProbability(f64),

    #[error("seed node {0} is out of range for a graph with {1} nodes")]
    SeedOutOfRange(u32, usize),
}

/// Parameters of one cascade run
#[derive(Debug, Clone, Copy)]
pub struct SpreadConfig {
    /// Activation probability for each adjacency trial
    pub probability: f64,

    /// Maximum number of cascade steps
    pub max_steps: usize,
}

impl Default for SpreadConfig {
    fn default() -> Self {
        Self {
            probability: 0.1,
            max_steps: 5,
        }
    }
}

/// Simulate an independent cascade from the given seed nodes
///
/// Seeds start active. Each step, every frontier node runs one Bernoulli
/// trial per outgoing adjacency whose target was inactive at the start of
/// the step; targets activated by at least one successful trial form the
/// next frontier. Activation is permanent. The returned history holds the
/// cumulative active count before any step and after each executed step,
/// and the cascade stops early once a step begins with an empty frontier.
///
/// A trial is drawn for every qualifying adjacency, including adjacencies
/// whose target was already activated earlier in the same step, so the
/// number of RNG draws depends only on the step-start state.
pub fn simulate_spread(
    graph: &CompressedGraph,
    seed_nodes: &[u32],
    config: &SpreadConfig,
    rng: &mut StdRng,
) -> Result<Vec<usize>, SpreadError> {
    if !(0.0..=1.0).contains(&config.probability) {
        return Err(SpreadError::InvalidProbability(config.probability));
    }
    for &seed in seed_nodes {
        if seed as usize >= graph.node_count {
            return Err(SpreadError::SeedOutOfRange(seed, graph.node_count));
        }
    }

    // Distinct seeds, ascending: the frontier order fixes the RNG draw order
    let seeds: BTreeSet<u32> = seed_nodes.iter().copied().collect();
    let mut active: HashSet<u32> = seeds.iter().copied().collect();
    let mut frontier: Vec<u32> = seeds.into_iter().collect();
    let mut active_counts = vec![active.len()];

    for step in 1..=config.max_steps {
        if frontier.is_empty() {
            break;
        }

        let mut newly_active: BTreeSet<u32> = BTreeSet::new();
        for &node in &frontier {
            for &neighbor in graph.outgoing_edges(node as usize) {
                if active.contains(&neighbor) {
                    continue;
                }
                if rng.gen::<f64>() < config.probability {
                    newly_active.insert(neighbor);
                }
            }
        }

        frontier = newly_active.into_iter().collect();
        active.extend(frontier.iter().copied());
        active_counts.push(active.len());

        log::info!(
            "Step {}/{}: {} newly activated, {} total active",
            step,
            config.max_steps,
            frontier.len(),
            active.len()
        );
    }

    Ok(active_counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use rand::SeedableRng;

    fn four_cycle() -> CompressedGraph {
        // 1 -> 2 -> 3 -> 4 -> 1
        let mut builder = GraphBuilder::with_capacity(4);
        builder.add_edge(1, 2);
        builder.add_edge(2, 3);
        builder.add_edge(3, 4);
        builder.add_edge(4, 1);
        builder.build()
    }

    fn config(probability: f64, max_steps: usize) -> SpreadConfig {
        SpreadConfig {
            probability,
            max_steps,
        }
    }

    #[test]
    fn certain_spread_walks_the_cycle() {
        let graph = four_cycle();
        let mut rng = StdRng::seed_from_u64(1);

        // One hop per step; step 4 activates nobody and records the plateau,
        // step 5 starts with an empty frontier and stops
        let counts = simulate_spread(&graph, &[0], &config(1.0, 5), &mut rng).unwrap();
        assert_eq!(counts, vec![1, 2, 3, 4, 4]);
    }

    #[test]
    fn zero_probability_spreads_nowhere() {
        let graph = four_cycle();
        let mut rng = StdRng::seed_from_u64(1);

        // The first step stalls and is recorded, then the cascade stops
        let counts = simulate_spread(&graph, &[0, 2], &config(0.0, 5), &mut rng).unwrap();
        assert_eq!(counts, vec![2, 2]);
    }

    #[test]
    fn duplicate_seeds_collapse() {
        let graph = four_cycle();
        let mut rng = StdRng::seed_from_u64(1);

        let counts = simulate_spread(&graph, &[2, 2, 2], &config(0.0, 3), &mut rng).unwrap();
        assert_eq!(counts[0], 1);
    }

    #[test]
    fn empty_seed_list_records_only_the_start() {
        let graph = four_cycle();
        let mut rng = StdRng::seed_from_u64(1);

        let counts = simulate_spread(&graph, &[], &config(1.0, 5), &mut rng).unwrap();
        assert_eq!(counts, vec![0]);
    }

    #[test]
    fn zero_steps_records_only_the_start() {
        let graph = four_cycle();
        let mut rng = StdRng::seed_from_u64(1);

        let counts = simulate_spread(&graph, &[0, 1], &config(1.0, 0), &mut rng).unwrap();
        assert_eq!(counts, vec![2]);
    }

    #[test]
    fn isolated_seed_stalls_immediately() {
        let mut builder = GraphBuilder::with_capacity(2);
        builder.add_edge(1, 2);
        builder.get_or_create_node(3);
        let graph = builder.build();
        let mut rng = StdRng::seed_from_u64(1);

        // node 3 (index 2) has no outgoing edges
        let counts = simulate_spread(&graph, &[2], &config(1.0, 5), &mut rng).unwrap();
        assert_eq!(counts, vec![1, 1]);
    }

    #[test]
    fn star_center_reaches_leaves_in_one_step() {
        let mut builder = GraphBuilder::with_capacity(4);
        builder.add_edge(1, 2);
        builder.add_edge(1, 3);
        builder.add_edge(1, 4);
        let graph = builder.build();
        let mut rng = StdRng::seed_from_u64(1);

        let counts = simulate_spread(&graph, &[0], &config(1.0, 5), &mut rng).unwrap();
        assert_eq!(counts, vec![1, 4, 4]);
    }

    #[test]
    fn history_is_monotone_and_bounded() {
        let graph = four_cycle();
        let mut rng = StdRng::seed_from_u64(77);

        let counts = simulate_spread(&graph, &[0], &config(0.5, 5), &mut rng).unwrap();
        assert!(counts.len() <= 6);
        assert_eq!(counts[0], 1);
        for window in counts.windows(2) {
            assert!(window[0] <= window[1]);
        }
        assert!(*counts.last().unwrap() <= graph.node_count);
    }

    #[test]
    fn same_seed_reproduces_the_cascade() {
        let graph = four_cycle();
        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);

        let a = simulate_spread(&graph, &[0], &config(0.5, 5), &mut rng_a).unwrap();
        let b = simulate_spread(&graph, &[0], &config(0.5, 5), &mut rng_b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_probability_is_rejected() {
        let graph = four_cycle();
        let mut rng = StdRng::seed_from_u64(1);

        assert!(simulate_spread(&graph, &[0], &config(-0.1, 5), &mut rng).is_err());
        assert!(simulate_spread(&graph, &[0], &config(1.5, 5), &mut rng).is_err());
        assert!(simulate_spread(&graph, &[0], &config(f64::NAN, 5), &mut rng).is_err());
    }

    #[test]
    fn out_of_range_seed_is_rejected() {
        let graph = four_cycle();
        let mut rng = StdRng::seed_from_u64(1);

        let result = simulate_spread(&graph, &[9], &config(0.5, 5), &mut rng);
        assert!(matches!(result, Err(SpreadError::SeedOutOfRange(9, 4))));
    }
}
