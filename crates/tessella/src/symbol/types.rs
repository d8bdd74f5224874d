//! Data types for the tiling builder.
//!
//! Kept separate from `build` so the graph engine can name them without
//! pulling in the construction code.

use thiserror::Error;

use crate::model::Geometry;

/// Decoration bits attached to a slot in the symbol and inherited by its orbit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SlotFlags {
    /// `L`: the slot lies on a line pattern.
    pub line: bool,
    /// `l`: one orientation of the slot lies on a line pattern.
    pub semiline: bool,
    /// `H`: pseudo-vertex marker.
    pub pseudo_vertex: bool,
}

impl SlotFlags {
    pub fn union(self, other: Self) -> Self {
        Self {
            line: self.line || other.line,
            semiline: self.semiline || other.semiline,
            pseudo_vertex: self.pseudo_vertex || other.pseudo_vertex,
        }
    }

    pub fn is_empty(self) -> bool {
        !(self.line || self.semiline || self.pseudo_vertex)
    }
}

/// One entry of an adjacency list: augmented slot plus the local edge index on that slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotRef {
    pub slot: usize,
    pub index: usize,
}

impl SlotRef {
    pub fn new(slot: usize, index: usize) -> Self {
        Self { slot, index }
    }
}

/// Reasons a configuration string does not describe a buildable tiling.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TilingError {
    #[error("too many edges")]
    TooManyEdges,
    #[error("too many faces")]
    TooManyFaces,
    #[error("not enough faces")]
    NotEnoughFaces,
    #[error("not enough edges")]
    NotEnoughEdges,
    #[error("not implemented: adjacent digons")]
    AdjacentDigons,
    #[error("polygons match incorrectly: dihedron faces differ")]
    InconsistentDihedron,
    #[error("polygons match incorrectly ({count} conflicts)")]
    MismatchedPolygons { count: usize },
    #[error("slot {index} out of range for {faces} faces")]
    SlotOutOfRange { index: usize, faces: usize },
}

impl TilingError {
    /// Number of problems behind this error. Only adjacency conflicts count more than one.
    pub fn count(&self) -> usize {
        match self {
            Self::MismatchedPolygons { count } => *count,
            _ => 1,
        }
    }
}

/// Validated vertex configuration with its augmented adjacency and orbit tables.
///
/// Slot layout: `2i` is face `i`, `2i+1` the same face seen mirrored, `2N` the
/// vertex figure and `2N+1` the mirrored vertex figure.
#[derive(Clone, Debug)]
pub struct Tiling {
    pub(crate) symbol: String,
    pub(crate) faces: Vec<usize>,
    pub(crate) invert: Vec<bool>,
    pub(crate) link: Vec<usize>,
    /// Flags per raw slot, plus one trailing entry for the vertex figure.
    pub(crate) slot_flags: Vec<SlotFlags>,
    pub(crate) have_line: bool,
    pub(crate) have_ph: bool,
    pub(crate) have_symmetry: bool,
    pub(crate) real_faces: usize,
    pub(crate) real_face_type: usize,
    pub(crate) angle_sum: f64,
    pub(crate) geometry: Geometry,
    pub(crate) adjacent: Vec<Vec<SlotRef>>,
    pub(crate) matches: Vec<Vec<Option<i64>>>,
    pub(crate) periods: Vec<i64>,
    pub(crate) tilegroup: Vec<Option<usize>>,
    pub(crate) groupoffset: Vec<i64>,
    pub(crate) tilegroups: usize,
    pub(crate) flags: Vec<SlotFlags>,
    pub(crate) mismatches: usize,
}

impl Tiling {
    /// Canonical source text (after shorthand expansion).
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Number of faces around a vertex.
    pub fn n(&self) -> usize {
        self.faces.len()
    }

    /// Size of the augmented slot space, `2N + 2`.
    pub fn slots(&self) -> usize {
        2 * self.faces.len() + 2
    }

    pub fn faces(&self) -> &[usize] {
        &self.faces
    }

    pub fn inverted(&self, i: usize) -> bool {
        self.invert[i]
    }

    pub fn link(&self, i: usize) -> usize {
        self.link[i]
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// `Σ (d-2)/d` over the faces.
    pub fn angle_sum(&self) -> f64 {
        self.angle_sum
    }

    pub fn real_faces(&self) -> usize {
        self.real_faces
    }

    pub fn real_face_type(&self) -> usize {
        self.real_face_type
    }

    pub fn have_line(&self) -> bool {
        self.have_line
    }

    pub fn have_ph(&self) -> bool {
        self.have_ph
    }

    pub fn have_symmetry(&self) -> bool {
        self.have_symmetry
    }

    /// Number of edges of an augmented slot.
    pub fn degree(&self, slot: usize) -> usize {
        self.adjacent[slot].len()
    }

    pub fn adjacency(&self, slot: usize) -> &[SlotRef] {
        &self.adjacent[slot]
    }

    /// Adjacency entry `index + delta` of `slot`, taken cyclically.
    pub fn get_adj(&self, at: SlotRef, delta: usize) -> SlotRef {
        let list = &self.adjacent[at.slot];
        list[(at.index + delta) % list.len()]
    }

    /// Orbit of an augmented slot; `None` for slots no orbit scan reached.
    pub fn orbit(&self, slot: usize) -> Option<usize> {
        self.tilegroup[slot]
    }

    pub fn orbit_count(&self) -> usize {
        self.tilegroups
    }

    pub fn orbit_offset(&self, slot: usize) -> i64 {
        self.groupoffset[slot]
    }

    pub fn period(&self, slot: usize) -> i64 {
        self.periods[slot]
    }

    pub fn flags(&self, slot: usize) -> SlotFlags {
        self.flags[slot]
    }

    /// Whether an augmented slot is one of the two vertex-figure slots.
    pub fn is_vertex_slot(&self, slot: usize) -> bool {
        slot >= 2 * self.faces.len()
    }

    /// Raw face index of an augmented face slot.
    pub fn face_of(&self, slot: usize) -> usize {
        slot / 2
    }
}

impl std::fmt::Display for Tiling {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.symbol)
    }
}
