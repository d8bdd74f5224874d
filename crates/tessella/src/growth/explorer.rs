use std::hash::Hash;

use crate::graph::{NodeId, TileMap};

use super::GrowthError;

/// Read access to a locally finite graph with a cyclic order at every node.
pub trait Explorer {
    type Node: Copy + Eq + Hash;

    fn root(&self) -> Self::Node;

    /// Neighbors of `v` in cyclic order; may materialize them.
    fn neighbors(&mut self, v: Self::Node) -> Result<Vec<Self::Node>, GrowthError>;

    /// Symmetry class of `v`. Nodes of equal kind look alike locally.
    fn kind(&self, v: Self::Node) -> usize;
}

impl Explorer for TileMap {
    type Node = NodeId;

    fn root(&self) -> NodeId {
        self.origin()
    }

    /// Neighboring cells of the map's variation.
    fn neighbors(&mut self, v: NodeId) -> Result<Vec<NodeId>, GrowthError> {
        let n = self.cell_degree(v);
        let mut out = Vec::with_capacity(n);
        for d in 0..n {
            out.push(self.cell_step(v, d)?);
        }
        Ok(out)
    }

    /// The orbit of the node's slot; slots without an orbit share one kind.
    fn kind(&self, v: NodeId) -> usize {
        self.orbit_of(v).unwrap_or(usize::MAX)
    }
}
