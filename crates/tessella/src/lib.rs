//! Lazy Archimedean tessellations and their growth.
//!
//! Pipeline
//! - `symbol`: vertex configuration text to slot adjacency and orbit tables.
//! - `solver`: edge length, radii and corner angles in the tiling's geometry.
//! - `graph`: the tiling as a lazily materialized, deduplicated node graph.
//! - `growth`: growth classes, exact layer counts, recurrences, growth rate.
//!
//! `model` and `transform` are the geometric substrate shared by the last
//! three stages.
//!
//! API Policy
//! - No stable public API yet; `api` is the curated surface for callers in
//!   this workspace.

pub mod api;
mod cfg;
pub mod graph;
pub mod growth;
pub mod model;
pub mod solver;
pub mod symbol;
pub mod transform;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use transform::{Mat3, Vec3};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::graph::{GraphCfg, NodeId, TileMap};
    pub use crate::growth::{GrowthAnalyzer, GrowthCfg};
    pub use crate::symbol::{Tiling, Variation};
    pub use crate::transform::{Mat3, Vec3};
}
