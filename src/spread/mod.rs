//! Information-spread simulation module

pub mod simulation;

pub use simulation::{simulate_spread, SpreadConfig, SpreadError};

use serde::Serialize;

/// One simulated cascade and the activation curve it produced
#[derive(Debug, Clone, Serialize)]
pub struct SpreadScenario {
    /// Human-readable label for the seed selection
    pub label: String,

    /// Original IDs of the seed nodes
    pub seed_ids: Vec<u64>,

    /// Cumulative active-node counts, starting with the seeds themselves
    pub active_counts: Vec<usize>,
}
