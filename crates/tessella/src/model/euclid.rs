//! Euclidean plane model (affine matrices with bottom row `(0, 0, 1)`).

use nalgebra::Vector2;

use super::{Anchor, Geometry, Model};
use crate::cfg::{EUCLIDEAN_EDGE_MAX, RADIUS_MAX};
use crate::transform::{Mat3, Vec3};

#[derive(Clone, Copy, Debug, Default)]
pub struct Euclid;

impl Model for Euclid {
    fn geometry(&self) -> Geometry {
        Geometry::Euclidean
    }

    fn push(&self, d: f64) -> Mat3 {
        Mat3::new(1.0, 0.0, d, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0)
    }

    fn dist0(&self, p: &Vec3) -> f64 {
        p.x.hypot(p.y)
    }

    fn dist(&self, p: &Vec3, q: &Vec3) -> f64 {
        (p.x - q.x).hypot(p.y - q.y)
    }

    fn mid(&self, p: &Vec3, q: &Vec3) -> Vec3 {
        (p + q) * 0.5
    }

    fn gap(&self, p: &Vec3, q: &Vec3) -> f64 {
        let (dx, dy) = (p.x - q.x, p.y - q.y);
        dx * dx + dy * dy
    }

    fn renormalize(&self, t: &Mat3) -> Mat3 {
        let a = Vector2::new(t[(0, 0)], t[(1, 0)]).normalize();
        let b = Vector2::new(t[(0, 1)], t[(1, 1)]);
        let b = (b - a * a.dot(&b)).normalize();
        Mat3::new(
            a.x,
            b.x,
            t[(0, 2)],
            a.y,
            b.y,
            t[(1, 2)],
            0.0,
            0.0,
            1.0,
        )
    }

    fn inverse(&self, t: &Mat3) -> Mat3 {
        let r = t.fixed_view::<2, 2>(0, 0).transpose();
        let u = -(r * Vector2::new(t[(0, 2)], t[(1, 2)]));
        Mat3::new(
            r[(0, 0)],
            r[(0, 1)],
            u.x,
            r[(1, 0)],
            r[(1, 1)],
            u.y,
            0.0,
            0.0,
            1.0,
        )
    }

    fn anchor(&self, p: &Vec3) -> Anchor {
        Anchor::Cell {
            x: p.x.floor() as i64,
            y: p.y.floor() as i64,
        }
    }

    fn near_anchors(&self, p: &Vec3) -> Vec<Anchor> {
        let (x, y) = (p.x.floor() as i64, p.y.floor() as i64);
        let mut out = Vec::with_capacity(9);
        for dx in -1..=1 {
            for dy in -1..=1 {
                out.push(Anchor::Cell {
                    x: x + dx,
                    y: y + dy,
                });
            }
        }
        out
    }

    fn edge_bound(&self) -> f64 {
        EUCLIDEAN_EDGE_MAX
    }

    fn radius_bound(&self) -> f64 {
        RADIUS_MAX
    }
}
