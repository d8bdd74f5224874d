//! Geometry models: one strategy per ambient geometry.
//!
//! Purpose
//! - Isolate the spherical / Euclidean / hyperbolic formulas behind `Model`
//!   so that the solver and the graph engine select a model once and never
//!   branch on the geometry in their inner loops.
//! - Provide the anchor keys used to bucket node centers for dedup.
//!
//! Conventions
//! - Points are homogeneous 3-vectors with the center at `(0, 0, 1)`.
//! - `push(d)` translates the center by distance `d` along +x.
//! - `gap(p, q)` is a cheap monotone stand-in for squared distance; dedup
//!   compares it against `GraphCfg::match_eps`.
//!
//! Code cross-refs: `transform::{spin, stabilize}`, `solver::solve`,
//! `graph::TileMap::create_step`.

mod euclid;
mod hyperbolic;
mod sphere;

pub use euclid::Euclid;
pub use hyperbolic::Hyperbolic;
pub use sphere::Sphere;

use crate::cfg::FLAT_EPS;
use crate::transform::{Mat3, Vec3};

/// Ambient geometry class of a tiling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Geometry {
    Spherical,
    Euclidean,
    Hyperbolic,
}

impl Geometry {
    /// Classify by the Euclidean angle sum `Σ (d-2)/d` of a vertex configuration.
    pub fn classify(angle_sum: f64) -> Self {
        if angle_sum < 2.0 - FLAT_EPS {
            Self::Spherical
        } else if angle_sum > 2.0 + FLAT_EPS {
            Self::Hyperbolic
        } else {
            Self::Euclidean
        }
    }

    /// The strategy object for this geometry.
    pub fn model(self) -> &'static dyn Model {
        match self {
            Self::Spherical => &Sphere,
            Self::Euclidean => &Euclid,
            Self::Hyperbolic => &Hyperbolic,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Spherical => "spherical",
            Self::Euclidean => "euclidean",
            Self::Hyperbolic => "hyperbolic",
        }
    }
}

/// Coarse bucket key for node centers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// The sphere is small enough for a single bucket.
    Whole,
    /// Unit lattice cell containing the point.
    Cell { x: i64, y: i64 },
    /// Polar band grid: ring of width `BAND`, sector of roughly `BAND` arc length.
    Band { ring: u32, sector: u64 },
}

/// Per-geometry formulas used by the solver and the graph engine.
pub trait Model {
    fn geometry(&self) -> Geometry;

    /// Translation of the center by `d` along +x.
    fn push(&self, d: f64) -> Mat3;

    /// Distance from the center.
    fn dist0(&self, p: &Vec3) -> f64;

    fn dist(&self, p: &Vec3, q: &Vec3) -> f64;

    /// Midpoint of the segment `pq`.
    fn mid(&self, p: &Vec3, q: &Vec3) -> Vec3;

    /// Monotone proxy of squared distance, used for tolerance checks.
    fn gap(&self, p: &Vec3, q: &Vec3) -> f64;

    /// Project a drifted matrix back onto the isometry group.
    fn renormalize(&self, t: &Mat3) -> Mat3;

    /// Inverse of an isometry.
    fn inverse(&self, t: &Mat3) -> Mat3;

    fn anchor(&self, p: &Vec3) -> Anchor;

    /// The anchor of `p` plus every bucket that may hold a point near `p`.
    fn near_anchors(&self, p: &Vec3) -> Vec<Anchor>;

    /// Upper end of the edge length search.
    fn edge_bound(&self) -> f64;

    /// Upper end of the circumradius search.
    fn radius_bound(&self) -> f64;
}
