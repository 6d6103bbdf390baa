//! Core library functions for the graph spread analyzer

pub mod centrality;
pub mod community;
pub mod config;
pub mod data;
pub mod graph;
pub mod spread;
pub mod storage;
pub mod viz;

pub use anyhow::{Result, anyhow};
