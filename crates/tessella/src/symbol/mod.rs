//! Symbol parser and combinatorial tiling builder.
//!
//! Purpose
//! - Turn a vertex-configuration string such as `"(4,6,8)"` or
//!   `"(3,3,3,3,6) (1,2)(0,4)(3)"` into a validated `Tiling`: per-slot
//!   adjacency lists over the augmented slot space `0..2N+2` and the orbit
//!   (tilegroup) tables that tell which slots are interchangeable.
//!
//! Why this design
//! - Parsing never fails; every structural problem is reported by the builder
//!   as a `TilingError` value, checked in a fixed order.
//! - Orbits are kept refinable: the graph engine feeds newly discovered
//!   matches back through `make_match` + `regroup` when it finds more
//!   symmetry than the symbol declared.
//!
//! Code cross-refs: `solver::solve`, `graph::TileMap`, `growth::Explorer`.

mod build;
mod catalog;
mod parse;
mod props;
mod types;

pub use catalog::{catalog, Category, Sample};
pub use props::{Support, Variation, WorldSize};
pub use types::{SlotFlags, SlotRef, Tiling, TilingError};
