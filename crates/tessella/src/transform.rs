//! Transform algebra: homogeneous 3×3 isometries.
//!
//! Purpose
//! - One matrix type for all three geometries. Points are homogeneous
//!   3-vectors; the model center is `C0 = (0, 0, 1)`.
//! - Composition is always `ancestor ∘ local`. Global transforms are built by
//!   right-multiplying local edge moves onto the parent's transform.
//!
//! Drift control
//! - `renormalize` lives on `Model` because the target manifold differs per
//!   geometry (O(3), E(2), O(2,1)).
//! - `stabilize` blends two transforms that describe the same point and
//!   projects the result back onto the manifold.
//!
//! Code cross-refs: `model::Model`, `graph::TileMap::create_step`.

use nalgebra::{Matrix3, Vector3};

use crate::model::Model;

pub type Mat3 = Matrix3<f64>;
pub type Vec3 = Vector3<f64>;

/// Model center.
#[inline]
pub fn c0() -> Vec3 {
    Vec3::new(0.0, 0.0, 1.0)
}

/// Rotation by `a` radians around the model center.
#[inline]
pub fn spin(a: f64) -> Mat3 {
    let (s, c) = a.sin_cos();
    Mat3::new(c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0)
}

/// `ancestor ∘ local`.
#[inline]
pub fn compose(ancestor: &Mat3, local: &Mat3) -> Mat3 {
    ancestor * local
}

/// Image of the model center under `t`.
#[inline]
pub fn center(t: &Mat3) -> Vec3 {
    t * c0()
}

/// Entrywise `(1 - s)·t + s·x`. Leaves the isometry manifold; callers renormalize.
#[inline]
pub fn blend(t: &Mat3, x: &Mat3, s: f64) -> Mat3 {
    t * (1.0 - s) + x * s
}

/// Move `t` a fraction `step` toward `x` and project back onto the isometries.
pub fn stabilize(model: &dyn Model, t: &Mat3, x: &Mat3, step: f64) -> Mat3 {
    model.renormalize(&blend(t, x, step))
}

/// Local move across one boundary edge: turn to the edge, walk out, turn back.
///
/// `out` is the (cumulative angle, radius) entry of the leaving slot and
/// `back_angle` the cumulative angle of the entering slot on the other side.
pub fn edge_move(model: &dyn Model, out: (f64, f64), back_angle: f64) -> Mat3 {
    spin(-out.0) * model.push(out.1) * spin(std::f64::consts::PI + back_angle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Geometry;
    use std::f64::consts::PI;

    #[test]
    fn spin_composes_additively() {
        let a = spin(0.3) * spin(0.9);
        let b = spin(1.2);
        assert!((a - b).norm() < 1e-12);
        assert!((spin(2.0 * PI) - Mat3::identity()).norm() < 1e-12);
    }

    #[test]
    fn stabilize_keeps_isometry_and_moves_partway() {
        for geometry in [
            Geometry::Spherical,
            Geometry::Euclidean,
            Geometry::Hyperbolic,
        ] {
            let m = geometry.model();
            let t = m.push(0.4) * spin(0.2);
            let x = m.push(0.4001) * spin(0.2002);
            let s = stabilize(m, &t, &x, 0.25);
            // Still an isometry: inverse round-trips.
            assert!((m.inverse(&s) * s - Mat3::identity()).norm() < 1e-9);
            let d_t = m.dist(&center(&s), &center(&t));
            let d_x = m.dist(&center(&s), &center(&x));
            assert!(d_t < d_x, "{geometry:?}: {d_t} vs {d_x}");
        }
    }

    #[test]
    fn edge_move_walks_one_radius() {
        let m = Geometry::Hyperbolic.model();
        let t = edge_move(m, (0.7, 0.55), 1.1);
        assert!((m.dist0(&center(&t)) - 0.55).abs() < 1e-12);
    }
}
