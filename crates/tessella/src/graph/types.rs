//! Node arena types.

/// Handle of a materialized node (index into the arena, in creation order).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// One side of an edge: the node on the other side and the local index there.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Link {
    pub node: NodeId,
    pub index: usize,
}

/// One materialized tile.
///
/// Generation order is the arena order of `NodeId`s: a node was created after
/// every node with a smaller id.
#[derive(Clone, Debug)]
pub struct Node {
    /// Augmented slot of the tiling this node instantiates.
    pub slot: usize,
    /// Rotation of the slot's adjacency list: local edge `d` is slot edge `parent_index + d`.
    pub parent_index: usize,
    pub(crate) moves: Vec<Option<Link>>,
    /// Construction distance from the origin.
    pub dist: usize,
}

impl Node {
    pub(crate) fn new(slot: usize, parent_index: usize, degree: usize, dist: usize) -> Self {
        Self {
            slot,
            parent_index,
            moves: vec![None; degree],
            dist,
        }
    }

    pub fn degree(&self) -> usize {
        self.moves.len()
    }

    /// Materialized link across local edge `d`, if any.
    pub fn link(&self, d: usize) -> Option<Link> {
        self.moves[d % self.moves.len()]
    }
}
