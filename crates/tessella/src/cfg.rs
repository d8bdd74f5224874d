//! Structural constants (internal).
//!
//! Policy
//! - Knobs a caller may reasonably turn live in `GraphCfg` and `GrowthCfg`.
//!   The values here encode the tiling grammar limits and the numeric
//!   recipe of the solver; changing them changes which tilings exist.

/// Largest supported face degree.
pub(crate) const MAX_EDGE: usize = 14;
/// Largest number of faces around one vertex.
pub(crate) const MAX_FACES: usize = MAX_EDGE / 2;
/// Half-width of the band around angle sum 2 that counts as Euclidean.
pub(crate) const FLAT_EPS: f64 = 1e-6;

/// Iterations of both the outer (edge length) and inner (circumradius) bisection.
pub(crate) const BISECT_STEPS: usize = 100;
/// Chord shortfall that marks a face as unable to reach the candidate edge.
pub(crate) const CHORD_SLACK: f64 = 1e-3;
/// Added to the angle total for every face that cannot reach the candidate edge.
pub(crate) const SHORT_FACE_PENALTY: f64 = 100.0;
/// Largest accepted `|Σα - π|` after the edge length search.
pub(crate) const CONVERGENCE_EPS: f64 = 1e-6;
/// Upper end of the edge length search per geometry.
pub(crate) const SPHERE_EDGE_MAX: f64 = std::f64::consts::PI;
pub(crate) const HYPERBOLIC_EDGE_MAX: f64 = 10.0;
/// Euclidean tilings are scale free; the search runs one step on `[0, 1]`.
pub(crate) const EUCLIDEAN_EDGE_MAX: f64 = 1.0;
/// Upper end of the circumradius search outside the sphere.
pub(crate) const RADIUS_MAX: f64 = 10.0;

/// Radial width of one ring of the hyperbolic anchor grid.
pub(crate) const BAND: f64 = 0.5;
/// Distance of the probe point that tells rotations apart.
pub(crate) const PROBE_DIST: f64 = 1.0;
/// Origin placement `push(a)·spin(b)·push(c)`; keeps node centers off bucket borders.
pub(crate) const ORIGIN_PUSH_OUTER: f64 = 0.01241;
pub(crate) const ORIGIN_SPIN: f64 = 1.4117;
pub(crate) const ORIGIN_PUSH_INNER: f64 = 0.1241;

/// Limb base of `BigCount`.
pub(crate) const LIMB_BASE: u32 = 1_000_000_000;
/// Decimal digits per limb.
pub(crate) const LIMB_DIGITS: usize = 9;
/// Pivot threshold of the recurrence fit.
pub(crate) const PIVOT_EPS: f64 = 1e-6;
/// A recurrence fit is abandoned at this order once terms reach this size.
pub(crate) const RECURRENCE_CAP: u64 = 1_000_000_000;
/// Terms checked exactly beyond the fitted window.
pub(crate) const RECURRENCE_TAIL: usize = 100;
/// Weight of the previous estimate in the power iteration.
pub(crate) const GROWTH_DAMPING: f64 = 0.1;
