//! Hyperboloid model `x² + y² - z² = -1, z > 0`.
//!
//! Anchors use a polar band grid: rings of width `BAND` around the origin,
//! each cut into sectors of roughly `BAND` arc length at the inner rim. The
//! grid is fixed, so two paths reaching the same point land in the same or an
//! adjacent cell no matter how deep generation goes.

use std::f64::consts::TAU;

use super::{Anchor, Geometry, Model};
use crate::cfg::{BAND, HYPERBOLIC_EDGE_MAX, RADIUS_MAX};
use crate::transform::{Mat3, Vec3};

#[derive(Clone, Copy, Debug, Default)]
pub struct Hyperbolic;

/// Minkowski form `p·q` with signature (+, +, -).
#[inline]
pub(crate) fn mink(p: &Vec3, q: &Vec3) -> f64 {
    p.x * q.x + p.y * q.y - p.z * q.z
}

/// Sector counts saturate here; rings this far out are beyond float precision anyway.
const MAX_SECTORS: u64 = 1 << 40;

fn sectors(ring: u32) -> u64 {
    if ring == 0 {
        return 1;
    }
    let circumference = TAU * (ring as f64 * BAND).sinh();
    ((circumference / BAND).ceil() as u64).clamp(1, MAX_SECTORS)
}

impl Hyperbolic {
    fn polar(&self, p: &Vec3) -> (u32, f64) {
        let r = self.dist0(p);
        let theta = p.y.atan2(p.x).rem_euclid(TAU);
        ((r / BAND).floor() as u32, theta)
    }

    fn sector_of(ring: u32, theta: f64) -> u64 {
        let s = sectors(ring);
        ((theta / TAU * s as f64).floor() as u64) % s
    }
}

impl Model for Hyperbolic {
    fn geometry(&self) -> Geometry {
        Geometry::Hyperbolic
    }

    fn push(&self, d: f64) -> Mat3 {
        let (c, s) = (d.cosh(), d.sinh());
        Mat3::new(c, 0.0, s, 0.0, 1.0, 0.0, s, 0.0, c)
    }

    fn dist0(&self, p: &Vec3) -> f64 {
        p.x.hypot(p.y).asinh()
    }

    fn dist(&self, p: &Vec3, q: &Vec3) -> f64 {
        let d = p - q;
        2.0 * (mink(&d, &d).max(0.0).sqrt() / 2.0).asinh()
    }

    fn mid(&self, p: &Vec3, q: &Vec3) -> Vec3 {
        let s = p + q;
        s / (-mink(&s, &s)).sqrt()
    }

    fn gap(&self, p: &Vec3, q: &Vec3) -> f64 {
        let d = self.dist(p, q);
        d * d
    }

    fn renormalize(&self, t: &Mat3) -> Mat3 {
        // Time-like column first, then the two space-like columns.
        let c2 = t.column(2).into_owned();
        let c2 = c2 / (-mink(&c2, &c2)).sqrt();
        let c0 = t.column(0).into_owned();
        let c0 = c0 + c2 * mink(&c0, &c2);
        let c0 = c0 / mink(&c0, &c0).sqrt();
        let c1 = t.column(1).into_owned();
        let c1 = c1 + c2 * mink(&c1, &c2);
        let c1 = c1 - c0 * mink(&c1, &c0);
        let c1 = c1 / mink(&c1, &c1).sqrt();
        Mat3::from_columns(&[c0, c1, c2])
    }

    fn inverse(&self, t: &Mat3) -> Mat3 {
        // J·Tᵀ·J with J = diag(1, 1, -1).
        let mut r = t.transpose();
        r[(0, 2)] = -r[(0, 2)];
        r[(1, 2)] = -r[(1, 2)];
        r[(2, 0)] = -r[(2, 0)];
        r[(2, 1)] = -r[(2, 1)];
        r
    }

    fn anchor(&self, p: &Vec3) -> Anchor {
        let (ring, theta) = self.polar(p);
        Anchor::Band {
            ring,
            sector: Self::sector_of(ring, theta),
        }
    }

    fn near_anchors(&self, p: &Vec3) -> Vec<Anchor> {
        let (ring, theta) = self.polar(p);
        let mut out = Vec::with_capacity(9);
        for rr in ring.saturating_sub(1)..=ring.saturating_add(1) {
            let s = sectors(rr);
            let base = Self::sector_of(rr, theta);
            for ds in [s - 1, 0, 1] {
                let a = Anchor::Band {
                    ring: rr,
                    sector: (base + ds) % s,
                };
                if !out.contains(&a) {
                    out.push(a);
                }
            }
        }
        out
    }

    fn edge_bound(&self) -> f64 {
        HYPERBOLIC_EDGE_MAX
    }

    fn radius_bound(&self) -> f64 {
        RADIUS_MAX
    }
}
