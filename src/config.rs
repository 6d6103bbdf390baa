//! Configuration management for the graph spread analyzer

use serde::Serialize;

/// Default configuration for the graph spread analyzer
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Maximum number of edges ingested from the input file
    pub max_edges: usize,

    /// Fraction of nodes kept when sampling the loaded graph
    pub sample_ratio: f64,

    /// Seed-set sizes compared in the spread simulations
    pub seed_sizes: Vec<usize>,

    /// Per-adjacency activation probability for the cascade
    pub spread_probability: f64,

    /// Maximum number of cascade steps per simulation
    pub max_steps: usize,

    /// Number of nodes sampled for the clustering-coefficient estimate
    pub clustering_sample: usize,

    /// Largest-component size up to which the exact diameter is computed
    pub diameter_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_edges: 5_000_000,
            sample_ratio: 0.5,
            seed_sizes: vec![1, 3, 5, 10],
            spread_probability: 0.1,
            max_steps: 5,
            clustering_sample: 10_000,
            diameter_limit: 10_000,
        }
    }
}
