//! Lazy graph engine over an Archimedean tiling.
//!
//! Purpose
//! - Materialize tiles on demand. `TileMap::create_step(node, d)` returns the
//!   neighbor across local edge `d`, creating it only if no existing node sits
//!   at the same place.
//! - Keep one consistent graph: paths that meet geometrically meet in the
//!   arena too.
//!
//! Why this design
//! - Nodes live in a flat arena addressed by `NodeId`; all links are indices.
//! - Dedup goes through coarse anchor buckets (`model::Anchor`): a candidate
//!   must agree with an existing node both at its center and at one probe
//!   point, which separates rotations of the same tile.
//! - Buckets hold node ids; matching reads the live transforms. Every
//!   successful match blends the two global transforms toward each other and
//!   renormalizes, so floating-point drift cannot pile up along long paths.
//! - The arena always holds the face+vertex structure graph. `Variation`
//!   picks which of its nodes are cells (`is_cell`, `cell_degree`,
//!   `cell_step`): faces, vertices, or both.
//!
//! Code cross-refs: `symbol::Tiling::{make_match, regroup}`, `solver::solve`,
//! `transform::{stabilize, edge_move}`, `growth::Explorer`.

mod map;
mod types;

pub use map::TileMap;
pub use types::{Link, Node, NodeId};

use thiserror::Error;

use crate::solver::SolveError;
use crate::symbol::TilingError;

/// Graph engine knobs.
#[derive(Clone, Copy, Debug)]
pub struct GraphCfg {
    /// Tolerance on `Model::gap` for two placements to count as the same node.
    pub match_eps: f64,
    /// Fraction by which matched transforms are blended toward each other.
    pub stabilize_step: f64,
    /// Upper bound on `create_step` calls that do real work.
    pub step_limit: usize,
}

impl Default for GraphCfg {
    fn default() -> Self {
        Self {
            match_eps: 1e-4,
            stabilize_step: 0.25,
            step_limit: 1_000_000,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum GraphError {
    #[error(transparent)]
    Tiling(#[from] TilingError),
    #[error(transparent)]
    Solve(#[from] SolveError),
    #[error("step limit of {limit} exceeded; generation marked buggy")]
    StepLimit { limit: usize },
    #[error("edge {index} of node {node} is already linked elsewhere")]
    Inconsistent { node: usize, index: usize },
}

#[cfg(test)]
mod tests;
