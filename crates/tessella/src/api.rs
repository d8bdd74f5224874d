//! Curated internal API (UNSTABLE).
//!
//! Important
//! - Not a public API. A convenience surface for the CLI, benches and demos
//!   in this workspace; breaking changes are allowed.

// Symbols and tilings
pub use crate::symbol::{
    catalog, Category, Sample, SlotRef, Support, Tiling, TilingError, Variation, WorldSize,
};
// Geometry
pub use crate::model::{Anchor, Geometry, Model};
pub use crate::solver::{solve, Solution, SolveError};
// Lazy graph
pub use crate::graph::{GraphCfg, GraphError, Link, NodeId, TileMap};
// Growth
pub use crate::growth::{
    BigCount, Explorer, GrowthAnalyzer, GrowthCfg, GrowthError, Recurrence, Underflow,
};
