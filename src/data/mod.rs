//! Data loading and sampling module

pub mod edgelist;
pub mod sampling;
