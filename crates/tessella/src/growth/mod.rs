//! Growth analysis: how many tiles sit at each graph distance from the origin.
//!
//! Purpose
//! - Group nodes into growth classes such that the number of descendants at
//!   every depth only depends on the class, then count layers exactly with
//!   big integers, find a linear recurrence for the counts and estimate the
//!   exponential growth rate.
//!
//! Why this design
//! - The analyzer only sees an `Explorer` (root, neighbors in cyclic order,
//!   a kind per node), so it runs on `graph::TileMap` and on toy lattices in
//!   tests alike.
//! - Each non-root node gets exactly one designated parent: the first
//!   neighbor one level closer, scanning from the start of its minimal
//!   rotation. The claimed neighbors of a node are its children.
//! - Classes are keyed by nested rotation-invariant codes of growing radius.
//!   A radius is accepted once the class counts reproduce the BFS layers up
//!   to `GrowthCfg::verify_nodes` nodes; otherwise the radius grows.
//! - Graphs whose BFS runs out within `GrowthCfg::finite_probe` nodes are
//!   analyzed node by node, so the counts are exact on spheres.
//!
//! Code cross-refs: `graph::TileMap::cell_step`, `symbol::Tiling::orbit`.

mod analyzer;
mod bignum;
mod explorer;
mod recurrence;

pub use analyzer::GrowthAnalyzer;
pub use bignum::{BigCount, Underflow};
pub use explorer::Explorer;
pub use recurrence::Recurrence;

use thiserror::Error;

use crate::graph::GraphError;

/// Growth analyzer knobs.
#[derive(Clone, Copy, Debug)]
pub struct GrowthCfg {
    /// Largest number of distinct samples before giving up.
    pub sample_limit: usize,
    /// BFS budget that decides whether the graph is treated as finite.
    pub finite_probe: usize,
    /// Recurrence orders tried are `1..max_order`.
    pub max_order: usize,
    /// Starting levels tried per order are `0..max_start`.
    pub max_start: usize,
    pub power_iterations: usize,
    /// Stop verifying class counts against BFS once this many nodes agree.
    pub verify_nodes: usize,
    /// Largest code radius tried.
    pub max_radius: usize,
    /// Levels counted exactly by `approx_descendants` before extrapolating.
    pub exact_levels: usize,
}

impl Default for GrowthCfg {
    fn default() -> Self {
        Self {
            sample_limit: 4000,
            finite_probe: 4096,
            max_order: 25,
            max_start: 1000,
            power_iterations: 2000,
            verify_nodes: 3000,
            max_radius: 6,
            exact_levels: 1000,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum GrowthError {
    #[error("more than {limit} distinct growth samples")]
    TooManySamples { limit: usize },
    #[error("class counts disagree with BFS for every code radius up to {max_radius}")]
    Unverified { max_radius: usize },
    #[error(transparent)]
    Graph(#[from] GraphError),
}

#[cfg(test)]
mod tests;
