//! Geometric solver: edge length, per-face radii and corner angles, Placement Table.
//!
//! - General tilings: nested bisection. The outer search picks a common edge
//!   length; for each face an inner search finds the circumradius whose
//!   regular polygon has that edge, which fixes the corner angle at the
//!   shared vertex. The angles around a vertex must sum to a half turn
//!   (each corner is split in two by the edge bisector).
//! - Dihedra and hosohedra have closed forms and skip the search.
//!
//! References
//! - Code cross-refs: `model::Model::{push, dist, mid}`, `transform::spin`,
//!   `graph::TileMap::new` (consumer of `Solution::placement`).

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use thiserror::Error;
use tracing::{debug, warn};

use crate::cfg::{BISECT_STEPS, CHORD_SLACK, CONVERGENCE_EPS, SHORT_FACE_PENALTY};
use crate::model::{Geometry, Model};
use crate::symbol::Tiling;
use crate::transform::{c0, spin};

#[derive(Clone, Debug, PartialEq, Error)]
pub enum SolveError {
    #[error("edge length search did not converge (residual {residual:e})")]
    NonConvergent { residual: f64 },
}

/// Output of the solver.
#[derive(Clone, Debug)]
pub struct Solution {
    pub geometry: Geometry,
    pub edge_length: f64,
    /// Per raw face.
    pub circumradius: Vec<f64>,
    pub inradius: Vec<f64>,
    /// Half of the interior angle each face contributes at the shared vertex.
    pub corner_angle: Vec<f64>,
    /// Per augmented slot: (cumulative angle, radius) for every local edge.
    pub placement: Vec<Vec<(f64, f64)>>,
    /// `Σ corner_angle - π` at the chosen edge length.
    pub residual: f64,
}

impl Solution {
    /// Characteristic length used to size drawings; the edge length outside degenerate cases.
    pub fn scale(&self, tiling: &Tiling) -> f64 {
        match (tiling.real_faces(), tiling.n()) {
            (0, 2) => FRAC_PI_2,
            (2, _) => FRAC_PI_2,
            (0, n) => TAU / n as f64,
            _ => self.edge_length,
        }
    }
}

/// Per-face (circumradius, inradius, corner angle) for a candidate edge length.
fn fit_face(model: &dyn Model, degree: usize, edge: f64) -> (f64, f64, f64, bool) {
    let (mut lo, mut hi) = (0.0, model.radius_bound());
    let (mut cr, mut inr, mut chord) = (0.0, 0.0, 0.0);
    for _ in 0..BISECT_STEPS {
        cr = (lo + hi) / 2.0;
        let p1 = model.push(cr) * c0();
        let p2 = spin(TAU / degree as f64) * p1;
        inr = model.dist0(&model.mid(&p1, &p2));
        chord = model.dist(&p1, &p2);
        if chord > edge {
            hi = cr;
        } else {
            lo = cr;
        }
    }
    let short = chord < edge - CHORD_SLACK;
    let h = model.push(edge / 2.0) * spin(FRAC_PI_2) * model.push(inr) * c0();
    let alpha = h.y.abs().atan2(h.x);
    (cr, inr, alpha, short)
}

/// Solve the geometry of a validated tiling.
pub fn solve(tiling: &Tiling) -> Result<Solution, SolveError> {
    let geometry = tiling.geometry();
    let model = geometry.model();
    let faces = tiling.faces();
    let n = faces.len();
    let mut cr = vec![0.0; n];
    let mut inr = vec![0.0; n];
    let mut al = vec![0.0; n];
    let mut residual = 0.0;

    let edge = if tiling.real_faces() == 2 {
        // Dihedron: two hemispheres, digons as lunes between them.
        for i in 0..n {
            if faces[i] == 2 {
                cr[i] = PI / tiling.real_face_type() as f64;
            } else {
                al[i] = FRAC_PI_2;
                cr[i] = FRAC_PI_2;
                inr[i] = FRAC_PI_2;
            }
        }
        TAU / tiling.real_face_type() as f64
    } else if tiling.real_faces() == 0 {
        // Hosohedron: all lunes meet at the poles.
        al.fill(PI / n as f64);
        cr.fill(FRAC_PI_2);
        PI
    } else {
        let (mut lo, mut hi) = (0.0, model.edge_bound());
        let mut edge = 0.0;
        for _ in 0..BISECT_STEPS {
            edge = (lo + hi) / 2.0;
            let mut total = 0.0;
            for i in 0..n {
                let (c, r, a, short) = fit_face(model, faces[i], edge);
                cr[i] = c;
                inr[i] = r;
                al[i] = a;
                if short {
                    total += SHORT_FACE_PENALTY;
                }
                total += a;
            }
            residual = total - PI;
            if (geometry == Geometry::Spherical) ^ (total > PI) {
                lo = edge;
            } else {
                hi = edge;
            }
            if geometry == Geometry::Euclidean {
                break;
            }
        }
        edge
    };

    if residual.abs() > CONVERGENCE_EPS {
        warn!(symbol = tiling.symbol(), residual, "edge length search did not converge");
        return Err(SolveError::NonConvergent { residual });
    }

    let placement = placement_table(faces, &cr, &al, edge);
    debug!(symbol = tiling.symbol(), edge, "solved");
    Ok(Solution {
        geometry,
        edge_length: edge,
        circumradius: cr,
        inradius: inr,
        corner_angle: al,
        placement,
        residual,
    })
}

/// Per-slot increments, turned into exclusive prefix sums.
fn placement_table(faces: &[usize], cr: &[f64], al: &[f64], edge: f64) -> Vec<Vec<(f64, f64)>> {
    let n = faces.len();
    let mut rows: Vec<Vec<(f64, f64)>> = Vec::with_capacity(2 * n + 2);
    for i in 0..n {
        let row = vec![(TAU / faces[i] as f64, cr[i]); faces[i]];
        rows.push(row.clone());
        rows.push(row);
    }
    let mut vertex = Vec::with_capacity(2 * n);
    let mut mirrored = Vec::with_capacity(2 * n);
    for k in 0..n {
        vertex.push((al[k], cr[k]));
        vertex.push((al[(k + 1) % n], edge));
        let back = n - 1 - k;
        mirrored.push((al[back], edge));
        mirrored.push((al[back], cr[back]));
    }
    rows.push(vertex);
    rows.push(mirrored);

    for row in &mut rows {
        let mut acc = 0.0;
        for entry in row.iter_mut() {
            let step = entry.0;
            entry.0 = acc;
            acc += step;
        }
    }
    rows
}

#[cfg(test)]
mod tests;
