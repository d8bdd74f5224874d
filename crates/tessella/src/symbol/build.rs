//! Tiling builder: validation, augmented adjacency table, orbit refinement.
//!
//! Orbits are found by fixed-point refinement over a `(2N+2)²` match table.
//! `matches[a][b] = Some(k)` says edge `i` of slot `a` behaves like edge
//! `i + k` of slot `b`, modulo the common period of the two slots. Each new
//! constraint either records an offset or shrinks the period to the gcd of
//! the disagreement. The tables are tiny, so the quartic closure is fine.

use tracing::debug;

use crate::cfg::{MAX_EDGE, MAX_FACES};
use crate::model::Geometry;

use super::parse::{read_symbol, RawSymbol};
use super::types::{SlotFlags, SlotRef, Tiling, TilingError};

/// Non-negative gcd; `gcd(0, 0) == 0`.
pub(crate) fn gcd(x: i64, y: i64) -> i64 {
    let (mut x, mut y) = (x, y);
    while x != 0 {
        let r = y % x;
        y = x;
        x = r;
    }
    y.abs()
}

impl Tiling {
    /// Read and build a tiling from its configuration string.
    pub fn parse(symbol: &str) -> Result<Self, TilingError> {
        Self::from_raw(read_symbol(symbol))
    }

    fn from_raw(raw: RawSymbol) -> Result<Self, TilingError> {
        let faces = raw.faces;
        let n = faces.len();
        validate(&faces)?;
        if let Some(index) = raw.out_of_range {
            return Err(TilingError::SlotOutOfRange { index, faces: n });
        }

        let real: Vec<usize> = faces.iter().copied().filter(|&f| f > 2).collect();
        let angle_sum: f64 = faces.iter().map(|&f| (f as f64 - 2.0) / f as f64).sum();
        let m = 2 * n + 2;
        let mut t = Tiling {
            symbol: raw.canonical,
            have_symmetry: raw.invert.iter().any(|&b| b),
            invert: raw.invert,
            link: raw.link,
            slot_flags: raw.flags,
            have_line: raw.have_line,
            have_ph: raw.have_ph,
            real_faces: real.len(),
            real_face_type: real.iter().sum::<usize>() / 2,
            angle_sum,
            geometry: Geometry::classify(angle_sum),
            adjacent: vec![Vec::new(); m],
            matches: (0..m)
                .map(|i| (0..m).map(|j| (i == j).then_some(0)).collect())
                .collect(),
            periods: (0..m)
                .map(|i| if i < 2 * n { faces[i / 2] as i64 } else { n as i64 })
                .collect(),
            tilegroup: vec![None; m],
            groupoffset: vec![0; m],
            tilegroups: 0,
            flags: vec![SlotFlags::default(); m],
            mismatches: 0,
            faces,
        };
        t.prepare();
        if t.mismatches > 0 {
            return Err(TilingError::MismatchedPolygons {
                count: t.mismatches,
            });
        }
        debug!(
            symbol = %t.symbol,
            geometry = t.geometry.name(),
            orbits = t.tilegroups,
            "tiling built"
        );
        Ok(t)
    }

    /// Build the adjacency table and apply the local consistency constraints.
    fn prepare(&mut self) {
        let n = self.n();
        let m = self.slots();
        let two_n = 2 * n;

        // Faces: walk the corners, tracking mirror parity.
        let mut returns = Vec::new();
        for i in 0..n {
            let mut at = i;
            let mut inv = false;
            for _ in 0..self.faces[i] {
                let index = if inv {
                    (2 * at + two_n - 2) % two_n
                } else {
                    2 * at
                };
                self.adjacent[2 * i].push(SlotRef::new(two_n + inv as usize, index));
                if self.invert[at] {
                    inv = !inv;
                }
                at = self.link[at];
                at = if inv { (at + 1) % n } else { (at + n - 1) % n };
            }
            if !inv {
                returns.push((2 * i, 2 * at));
            }
        }
        // Vertex figure: face, then the vertex across the following edge.
        for i in 0..n {
            self.adjacent[two_n].push(SlotRef::new(2 * i, 0));
            let ai = (i + 1) % n;
            let index = (2 * self.link[ai] + two_n - 1) % two_n;
            self.adjacent[two_n].push(SlotRef::new(two_n + self.invert[ai] as usize, index));
        }
        // Mirrored slots are the reversed lists with parity flipped.
        for d in (0..=two_n).step_by(2) {
            let mirrored: Vec<SlotRef> = self.adjacent[d]
                .iter()
                .rev()
                .map(|r| SlotRef::new(r.slot ^ 1, r.index))
                .collect();
            self.adjacent[d + 1] = mirrored;
        }
        for d in 0..m {
            for i in 0..self.adjacent[d].len() {
                let r = self.adjacent[d][i];
                if r.slot & 1 == 1 {
                    self.adjacent[d][i].index = self.adjacent[r.slot].len() - 1 - r.index;
                }
            }
        }

        for (a, b) in returns {
            self.make_match(a, 0, b, 0);
        }
        // Back-references.
        for i in 0..m {
            for j in 0..self.adjacent[i].len() {
                let p = self.adjacent[i][j];
                let q = self.adjacent[p.slot][p.index];
                self.make_match(i, j as i64, q.slot, q.index as i64);
            }
        }
        // Boundary triangles close up.
        for i in 0..m {
            for j in 0..self.adjacent[i].len() {
                let mut at = SlotRef::new(i, j);
                for _ in 0..3 {
                    at = self.adjacent[at.slot][at.index];
                    at.index = (at.index + 1) % self.adjacent[at.slot].len();
                }
                self.make_match(i, j as i64, at.slot, at.index as i64);
            }
        }
        // Face-vertex-face-vertex walks.
        for i in 0..two_n {
            for j in 0..self.adjacent[i].len() {
                let mut at = SlotRef::new(i, j);
                for delta in [1, 2, 1, 2] {
                    at = self.get_adj(at, delta);
                }
                self.make_match(i, j as i64, at.slot, at.index as i64);
            }
        }
        self.regroup();
    }

    /// Record that edge `i` of slot `a` corresponds to edge `j` of slot `b`.
    ///
    /// Returns whether the match table or a period changed. Slots of different
    /// degree count as a mismatch.
    pub(crate) fn make_match(&mut self, a: usize, i: i64, b: usize, j: i64) -> bool {
        if self.adjacent[a].len() != self.adjacent[b].len() {
            self.mismatches += 1;
        }
        match self.matches[a][b] {
            None => {
                self.matches[a][b] = Some(j - i);
                self.matches[b][a] = Some(i - j);
                true
            }
            Some(old) => {
                let g = gcd(old - (j - i), self.periods[a]);
                let changed = g != self.periods[a] || g != self.periods[b];
                self.periods[a] = g;
                self.periods[b] = g;
                changed
            }
        }
    }

    /// Close the match relation transitively, then assign orbits and flags.
    pub(crate) fn regroup(&mut self) {
        let m = self.slots();
        for _ in 0..m {
            for i in 0..m {
                for j in 0..m {
                    let Some(mij) = self.matches[i][j] else {
                        continue;
                    };
                    for k in 0..m {
                        let Some(mjk) = self.matches[j][k] else {
                            continue;
                        };
                        let g = gcd(self.periods[i], self.periods[j]);
                        self.make_match(i, 0, k, mij + mjk);
                        self.make_match(i, 0, k, mij + mjk + g);
                    }
                }
            }
        }

        self.tilegroup = vec![None; m];
        self.groupoffset = vec![0; m];
        self.tilegroups = 0;
        let stride = if self.have_symmetry { 1 } else { 2 };
        for i in (0..m).step_by(stride) {
            if self.tilegroup[i].is_some() {
                continue;
            }
            self.periods[i] = self.periods[i].abs();
            let period = self.periods[i];
            for j in 0..m {
                if let Some(mij) = self.matches[i][j] {
                    self.tilegroup[j] = Some(self.tilegroups);
                    self.groupoffset[j] = if period != 0 { mij.rem_euclid(period) } else { mij };
                }
            }
            self.tilegroups += 1;
        }
        self.assign_flags();
    }

    fn assign_flags(&mut self) {
        let m = self.slots();
        for i in 0..m {
            let mut f = SlotFlags::default();
            for j in 0..m {
                if self.tilegroup[i] != self.tilegroup[j] {
                    continue;
                }
                let raw = self.slot_flags[j / 2];
                f = f.union(raw);
                if j % 2 == 1 && raw.semiline {
                    f.line = true;
                }
            }
            if !self.have_ph && self.tilegroup[i] == Some(0) {
                f.pseudo_vertex = true;
            }
            self.flags[i] = f;
        }
    }

    /// Whether two (slot, edge) positions are equivalent under the orbit tables.
    pub fn equivalent(&self, a: SlotRef, b: SlotRef) -> bool {
        let Some(ga) = self.tilegroup[a.slot] else {
            return true;
        };
        if self.tilegroup[b.slot] != Some(ga) {
            return false;
        }
        let root = (0..self.slots())
            .find(|&k| self.tilegroup[k] == Some(ga))
            .unwrap_or(a.slot);
        let period = self.periods[root];
        let d = (a.index as i64 - self.groupoffset[a.slot]) - (b.index as i64 - self.groupoffset[b.slot]);
        if period != 0 {
            d.rem_euclid(period) == 0
        } else {
            d == 0
        }
    }
}

/// Structural checks, in the fixed reporting order.
fn validate(faces: &[usize]) -> Result<(), TilingError> {
    let n = faces.len();
    if faces.iter().any(|&f| f > MAX_EDGE) {
        return Err(TilingError::TooManyEdges);
    }
    if n > MAX_FACES {
        return Err(TilingError::TooManyFaces);
    }
    if n < 2 {
        return Err(TilingError::NotEnoughFaces);
    }
    if faces.iter().any(|&f| f < 2) {
        return Err(TilingError::NotEnoughEdges);
    }
    let real: Vec<usize> = faces.iter().copied().filter(|&f| f > 2).collect();
    if !real.is_empty() {
        let adjacent_digons = (0..n).any(|i| faces[i] == 2 && faces[(i + 1) % n] == 2);
        if adjacent_digons {
            return Err(TilingError::AdjacentDigons);
        }
    }
    if real.len() == 2 {
        let shared = real.iter().sum::<usize>() / 2;
        if real.iter().any(|&f| f != shared) {
            return Err(TilingError::InconsistentDihedron);
        }
    }
    Ok(())
}
