//! Linear recurrence discovery for layer counts.
//!
//! Candidate coefficients come from a floating-point solve of the first
//! `order` equations at a given start; only an exact big integer check over
//! a long window accepts them.

use std::fmt;

use crate::cfg::{PIVOT_EPS, RECURRENCE_CAP, RECURRENCE_TAIL};

use super::bignum::BigCount;
use super::GrowthCfg;

/// `a(n) = Σ_t coefficients[t] · a(n - t - 1)` for all `n ≥ valid_from`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recurrence {
    pub coefficients: Vec<i64>,
    pub valid_from: usize,
}

impl Recurrence {
    pub fn order(&self) -> usize {
        self.coefficients.len()
    }

    /// Exact check of the recurrence at `n` against the sequence `term`.
    pub fn holds_at<F: FnMut(usize) -> BigCount>(&self, n: usize, term: &mut F) -> bool {
        if n < self.order() {
            return false;
        }
        let mut parts: Vec<(i64, usize)> = self
            .coefficients
            .iter()
            .enumerate()
            .map(|(t, &c)| (c, n - t - 1))
            .collect();
        // Positive terms first, so an underflow means a negative total.
        parts.sort_by(|a, b| b.0.cmp(&a.0));
        let mut acc = BigCount::zero();
        for (c, at) in parts {
            if c != 0 && acc.add_mul(&term(at), c).is_err() {
                return false;
            }
        }
        acc == term(n)
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a(n) =")?;
        let mut first = true;
        for (t, &c) in self.coefficients.iter().enumerate() {
            if c == 0 {
                continue;
            }
            let sign = match (first, c < 0) {
                (true, false) => " ",
                (true, true) => " -",
                (false, false) => " + ",
                (false, true) => " - ",
            };
            let mag = c.unsigned_abs();
            let factor = if mag == 1 { String::new() } else { mag.to_string() };
            write!(f, "{sign}{factor}a(n-{})", t + 1)?;
            first = false;
        }
        if first {
            write!(f, " 0")?;
        }
        write!(f, " for n >= {}", self.valid_from)
    }
}

enum Fit {
    /// Terms grew past the cap; try the next order.
    Abort,
    Skip,
    Found(Recurrence),
}

fn fit<F: FnMut(usize) -> BigCount>(term: &mut F, order: usize, start: usize) -> Fit {
    if term(start + 2 * order + 5) >= BigCount::from(RECURRENCE_CAP) {
        return Fit::Abort;
    }
    let mut m: Vec<Vec<f64>> = (0..order)
        .map(|i| (0..=order).map(|j| term(start + i + j).approx()).collect())
        .collect();
    for k in 0..order {
        let Some(p) = (k..order).find(|&r| m[r][k].abs() >= PIVOT_EPS) else {
            return Fit::Skip;
        };
        m.swap(k, p);
        let inv = 1.0 / m[k][k];
        for x in &mut m[k][k..] {
            *x *= inv;
        }
        let pivot = m[k].clone();
        for row in &mut m[k + 1..] {
            let c = -row[k];
            for (x, y) in row[k..].iter_mut().zip(&pivot[k..]) {
                *x += y * c;
            }
        }
    }
    for k in (0..order).rev() {
        for l in (0..k).rev() {
            m[l][order] -= m[l][k] * m[k][order];
        }
    }
    let rec = Recurrence {
        coefficients: (0..order)
            .map(|i| (m[order - 1 - i][order] + 0.5).floor() as i64)
            .collect(),
        valid_from: start + order,
    };
    for n in start + order..start + 2 * order + RECURRENCE_TAIL {
        if !rec.holds_at(n, term) {
            return Fit::Skip;
        }
    }
    Fit::Found(rec)
}

/// Smallest order, then earliest start, whose fit verifies exactly.
pub(crate) fn find<F: FnMut(usize) -> BigCount>(term: &mut F, cfg: &GrowthCfg) -> Option<Recurrence> {
    for order in 1..cfg.max_order {
        for start in 0..cfg.max_start {
            match fit(term, order, start) {
                Fit::Abort => break,
                Fit::Skip => {}
                Fit::Found(rec) => return Some(rec),
            }
        }
    }
    None
}
