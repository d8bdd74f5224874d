//! Unit sphere model.

use std::f64::consts::FRAC_PI_2;

use super::{Anchor, Geometry, Model};
use crate::cfg::SPHERE_EDGE_MAX;
use crate::transform::{Mat3, Vec3};

#[derive(Clone, Copy, Debug, Default)]
pub struct Sphere;

impl Model for Sphere {
    fn geometry(&self) -> Geometry {
        Geometry::Spherical
    }

    fn push(&self, d: f64) -> Mat3 {
        let (s, c) = d.sin_cos();
        Mat3::new(c, 0.0, s, 0.0, 1.0, 0.0, -s, 0.0, c)
    }

    fn dist0(&self, p: &Vec3) -> f64 {
        p.x.hypot(p.y).atan2(p.z)
    }

    fn dist(&self, p: &Vec3, q: &Vec3) -> f64 {
        p.cross(q).norm().atan2(p.dot(q))
    }

    fn mid(&self, p: &Vec3, q: &Vec3) -> Vec3 {
        (p + q).normalize()
    }

    fn gap(&self, p: &Vec3, q: &Vec3) -> f64 {
        (p - q).norm_squared()
    }

    fn renormalize(&self, t: &Mat3) -> Mat3 {
        let mut cols = [
            t.column(0).into_owned(),
            t.column(1).into_owned(),
            t.column(2).into_owned(),
        ];
        for i in 0..3 {
            for j in 0..i {
                let cj = cols[j];
                let d = cols[i].dot(&cj);
                cols[i] -= cj * d;
            }
            cols[i] = cols[i].normalize();
        }
        Mat3::from_columns(&cols)
    }

    fn inverse(&self, t: &Mat3) -> Mat3 {
        t.transpose()
    }

    fn anchor(&self, _p: &Vec3) -> Anchor {
        Anchor::Whole
    }

    fn near_anchors(&self, _p: &Vec3) -> Vec<Anchor> {
        vec![Anchor::Whole]
    }

    fn edge_bound(&self) -> f64 {
        SPHERE_EDGE_MAX
    }

    fn radius_bound(&self) -> f64 {
        FRAC_PI_2
    }
}
