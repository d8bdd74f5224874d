//! `TileMap`: the context object owning the arena, transforms and anchor buckets.

use std::collections::HashMap;
use std::f64::consts::PI;

use rand::Rng;
use tracing::{debug, warn};

use crate::cfg::{ORIGIN_PUSH_INNER, ORIGIN_PUSH_OUTER, ORIGIN_SPIN, PROBE_DIST};
use crate::model::{Anchor, Model};
use crate::solver::{solve, Solution};
use crate::symbol::{SlotRef, Tiling, Variation};
use crate::transform::{center, edge_move, spin, stabilize, Mat3};

use super::types::{Link, Node, NodeId};
use super::{GraphCfg, GraphError};

/// Lazily generated tiling graph.
pub struct TileMap {
    tiling: Tiling,
    solution: Solution,
    model: &'static dyn Model,
    variation: Variation,
    cfg: GraphCfg,
    nodes: Vec<Node>,
    transforms: Vec<Mat3>,
    /// Nodes keyed by the anchor they were registered under; matches read the live transform.
    buckets: HashMap<Anchor, Vec<NodeId>>,
    cells: usize,
    origin: NodeId,
    steps: usize,
    buggy: bool,
}

impl TileMap {
    /// Solve the geometry and place the origin.
    pub fn new(tiling: Tiling, variation: Variation, cfg: GraphCfg) -> Result<Self, GraphError> {
        let solution = solve(&tiling)?;
        let model = tiling.geometry().model();
        let n = tiling.n();
        let (slot, parent_index) = match variation {
            Variation::Dual => (2 * n, 1),
            Variation::Pure | Variation::Bitruncated => (0, 0),
        };
        let origin_tr =
            model.push(ORIGIN_PUSH_OUTER) * spin(ORIGIN_SPIN) * model.push(ORIGIN_PUSH_INNER);
        let mut map = Self {
            nodes: Vec::new(),
            transforms: Vec::new(),
            buckets: HashMap::new(),
            cells: 0,
            origin: NodeId(0),
            steps: 0,
            buggy: false,
            tiling,
            solution,
            model,
            variation,
            cfg,
        };
        let o = map.new_node(slot, parent_index, 0, origin_tr);
        map.register(o);
        map.origin = o;

        let two_n = 2 * n;
        if map.tiling.real_faces() == 0 && variation == Variation::Dual {
            // Hosohedron seen from a pole: the two poles share every edge.
            let adj = map.get_adj(o, 0);
            let other = map.build_child(o, 0, adj);
            for s in 1..two_n {
                map.link(o, s, other, s);
            }
        } else if map.tiling.real_faces() == 0 {
            let o0 = map.create_step(o, 0)?;
            let o1 = map.create_step(o, 1)?;
            for s in (1..two_n).step_by(2) {
                map.link(o0, s, o1, two_n - s);
            }
            for s in (2..two_n).step_by(2) {
                let adj = map.get_adj(o0, s);
                let lune = map.build_child(o0, s, adj);
                map.link(lune, 1, o1, two_n - s);
            }
            map.link(o1, 1, o0, two_n - 1);
        } else if map.neighbor_count(o) == 2 {
            let a = map.create_step(o, 0)?;
            let b = map.create_step(o, 1)?;
            map.link(a, 1, b, two_n - 1);
            map.link(b, 1, a, two_n - 1);
        }
        debug!(
            symbol = map.tiling.symbol(),
            variation = variation.name(),
            nodes = map.nodes.len(),
            cells = map.cells,
            "tile map ready"
        );
        Ok(map)
    }

    /// Parse, build and place in one go.
    pub fn from_symbol(symbol: &str, variation: Variation, cfg: GraphCfg) -> Result<Self, GraphError> {
        Self::new(Tiling::parse(symbol)?, variation, cfg)
    }

    pub fn tiling(&self) -> &Tiling {
        &self.tiling
    }

    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    pub fn model(&self) -> &'static dyn Model {
        self.model
    }

    pub fn variation(&self) -> Variation {
        self.variation
    }

    pub fn cfg(&self) -> GraphCfg {
        self.cfg
    }

    pub fn origin(&self) -> NodeId {
        self.origin
    }

    /// Number of materialized cells of the chosen variation.
    pub fn len(&self) -> usize {
        self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells == 0
    }

    /// Number of materialized structure nodes, faces and vertices alike.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, h: NodeId) -> &Node {
        &self.nodes[h.0]
    }

    /// Global transform of a node.
    pub fn transform(&self, h: NodeId) -> &Mat3 {
        &self.transforms[h.0]
    }

    pub fn neighbor_count(&self, h: NodeId) -> usize {
        self.nodes[h.0].degree()
    }

    /// Augmented slot the node instantiates.
    pub fn type_id(&self, h: NodeId) -> usize {
        self.nodes[h.0].slot
    }

    pub fn orbit_of(&self, h: NodeId) -> Option<usize> {
        self.tiling.orbit(self.nodes[h.0].slot)
    }

    pub fn is_vertex(&self, h: NodeId) -> bool {
        self.tiling.is_vertex_slot(self.nodes[h.0].slot)
    }

    /// Whether `h` is a cell of the chosen variation: faces for `Pure`,
    /// vertices for `Dual`, both for `Bitruncated`.
    pub fn is_cell(&self, h: NodeId) -> bool {
        self.slot_is_cell(self.nodes[h.0].slot)
    }

    fn slot_is_cell(&self, slot: usize) -> bool {
        match self.variation {
            Variation::Bitruncated => true,
            Variation::Pure => !self.tiling.is_vertex_slot(slot),
            Variation::Dual => self.tiling.is_vertex_slot(slot),
        }
    }

    /// Number of cell edges around `h`.
    ///
    /// A vertex alternates faces and vertices around itself, so its dual
    /// cell has half as many edges as its structure node.
    pub fn cell_degree(&self, h: NodeId) -> usize {
        match self.variation {
            Variation::Dual => self.neighbor_count(h) / 2,
            Variation::Pure | Variation::Bitruncated => self.neighbor_count(h),
        }
    }

    /// Neighbor cell across cell edge `i` of `h`, materializing as needed.
    ///
    /// `Bitruncated` cells are the structure nodes themselves. A `Dual` cell
    /// edge is the structure edge toward the next vertex. A `Pure` cell edge
    /// runs between structure corners `i - 1` and `i`; the face across it is
    /// two steps back around the corner vertex.
    pub fn cell_step(&mut self, h: NodeId, i: usize) -> Result<NodeId, GraphError> {
        match self.variation {
            Variation::Bitruncated => self.create_step(h, i),
            Variation::Dual => {
                let off = usize::from(!self.tiling.is_vertex_slot(self.get_adj(h, 0).slot));
                self.create_step(h, 2 * i + off)
            }
            Variation::Pure => {
                let d = self.shift(h, i, -1);
                let v = self.create_step(h, d)?;
                let back = match self.nodes[h.0].link(d) {
                    Some(l) => l.index,
                    None => return Err(GraphError::Inconsistent { node: h.0, index: d }),
                };
                let j = self.shift(v, back, -2);
                self.create_step(v, j)
            }
        }
    }

    /// Placement Table entry (cumulative angle, radius) of local edge `d`.
    pub fn placement(&self, h: NodeId, d: usize) -> (f64, f64) {
        let node = &self.nodes[h.0];
        let row = &self.solution.placement[node.slot];
        row[(node.parent_index + d) % row.len()]
    }

    /// Materialized neighbor across local edge `d`, without creating anything.
    pub fn neighbor(&self, h: NodeId, d: usize) -> Option<Link> {
        self.nodes[h.0].link(d)
    }

    /// Set once the step limit was hit; the graph may be incomplete from then on.
    pub fn is_buggy(&self) -> bool {
        self.buggy
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    fn fix(&self, h: NodeId, d: usize) -> usize {
        d % self.neighbor_count(h)
    }

    fn shift(&self, h: NodeId, d: usize, delta: isize) -> usize {
        let deg = self.neighbor_count(h) as isize;
        (d as isize + delta).rem_euclid(deg) as usize
    }

    /// Tiling adjacency entry behind local edge `d`.
    fn get_adj(&self, h: NodeId, d: usize) -> SlotRef {
        let node = &self.nodes[h.0];
        let list = self.tiling.adjacency(node.slot);
        list[(node.parent_index + d) % list.len()]
    }

    fn tri_of(&self, r: SlotRef) -> (f64, f64) {
        let row = &self.solution.placement[r.slot];
        row[r.index % row.len()]
    }

    fn new_node(&mut self, slot: usize, parent_index: usize, dist: usize, tr: Mat3) -> NodeId {
        let id = NodeId(self.nodes.len());
        if self.slot_is_cell(slot) {
            self.cells += 1;
        }
        self.nodes
            .push(Node::new(slot, parent_index, self.tiling.degree(slot), dist));
        self.transforms.push(tr);
        id
    }

    /// Raw symmetric link; overwrites whatever was there.
    fn link(&mut self, a: NodeId, da: usize, b: NodeId, db: usize) {
        let da = self.fix(a, da);
        let db = self.fix(b, db);
        self.nodes[a.0].moves[da] = Some(Link { node: b, index: db });
        self.nodes[b.0].moves[db] = Some(Link { node: a, index: da });
    }

    /// New node of type `adj` across local edge `d` of `h`; its edge 0 points back.
    fn build_child(&mut self, h: NodeId, d: usize, adj: SlotRef) -> NodeId {
        let out = self.placement(h, d);
        let back = self.tri_of(adj).0;
        let tr = self
            .model
            .renormalize(&(self.transforms[h.0] * edge_move(self.model, out, back)));
        let dist = self.nodes[h.0].dist + 1;
        let child = self.new_node(adj.slot, adj.index, dist, tr);
        self.link(child, 0, h, d);
        child
    }

    fn register(&mut self, h: NodeId) {
        let key = self.model.anchor(&center(&self.transforms[h.0]));
        self.buckets.entry(key).or_default().push(h);
    }

    /// Whether edge `d` (or its neighbor in direction `delta`) leads to a digon.
    fn skip_digons(&self, h: NodeId, d: usize, delta: isize) -> bool {
        let here = self.get_adj(h, d).slot;
        let next = self.get_adj(h, self.shift(h, d, delta)).slot;
        self.tiling.degree(here) == 2 || self.tiling.degree(next) == 2
    }

    /// Digons are never reached through the dedup search; create them beside a fresh link.
    fn connect_digons_too(&mut self, a: NodeId, da: usize, b: NodeId, db: usize) {
        if !self.skip_digons(a, da, -1) {
            return;
        }
        let da = self.shift(a, da, -1);
        let db = self.shift(b, db, 1);
        let adj = self.get_adj(a, da);
        let lune = self.build_child(a, da, adj);
        self.link(lune, 1, b, db);
        let da = self.shift(a, da, -1);
        let db = self.shift(b, db, 1);
        self.link(a, da, b, db);
    }

    /// Existing node matching a candidate placement `base` (edge midpoint frame).
    fn find_match(&self, base: &Mat3) -> Option<(NodeId, usize)> {
        let p = center(base);
        let probe = self.model.push(PROBE_DIST);
        for key in self.model.near_anchors(&p) {
            let Some(entries) = self.buckets.get(&key) else {
                continue;
            };
            for &h2 in entries {
                let t2 = &self.transforms[h2.0];
                if self.model.gap(&center(t2), &p) >= self.cfg.match_eps {
                    continue;
                }
                let far = center(&(t2 * probe));
                for d2 in 0..self.neighbor_count(h2) {
                    let back = self.placement(h2, d2).0;
                    let t1 = base * spin(PI + back);
                    if self.model.gap(&center(&(t1 * probe)), &far) < self.cfg.match_eps {
                        return Some((h2, d2));
                    }
                }
            }
        }
        None
    }

    /// Neighbor across local edge `d`, materializing it if needed.
    pub fn create_step(&mut self, h: NodeId, d: usize) -> Result<NodeId, GraphError> {
        if let Some(l) = self.nodes[h.0].link(d) {
            return Ok(l.node);
        }
        self.steps += 1;
        if self.steps > self.cfg.step_limit {
            if !self.buggy {
                warn!(limit = self.cfg.step_limit, nodes = self.nodes.len(), "step limit hit");
            }
            self.buggy = true;
            return Err(GraphError::StepLimit {
                limit: self.cfg.step_limit,
            });
        }

        let mut hi = self.fix(h, d);
        for _ in 0..self.neighbor_count(h) {
            if !self.skip_digons(h, hi, 1) {
                break;
            }
            hi = self.shift(h, hi, 1);
        }
        let t1 = self.placement(h, hi);
        let base = self.transforms[h.0] * spin(-t1.0) * self.model.push(t1.1);

        if let Some((h2, d2)) = self.find_match(&base) {
            let mut hs = d2;
            for _ in 0..self.neighbor_count(h2) {
                if !self.skip_digons(h2, hs, -1) {
                    break;
                }
                hs = self.shift(h2, hs, -1);
            }
            self.connect_nodes(h, hi, h2, hs)?;

            // Blend both frames toward agreement, starting from their current values.
            let back = self.placement(h2, d2).0;
            let toward_h =
                self.transforms[h2.0] * spin(-PI - back) * self.model.push(-t1.1) * spin(t1.0);
            let toward_h2 = base * spin(PI + back);
            let step = self.cfg.stabilize_step;
            self.transforms[h.0] = stabilize(self.model, &self.transforms[h.0], &toward_h, step);
            self.transforms[h2.0] = stabilize(self.model, &self.transforms[h2.0], &toward_h2, step);
            self.connect_digons_too(h, hi, h2, hs);
        } else {
            let adj = self.get_adj(h, hi);
            let child = self.build_child(h, hi, adj);
            self.register(child);
            self.connect_digons_too(h, hi, child, 0);
        }
        match self.nodes[h.0].link(d) {
            Some(l) => Ok(l.node),
            None => Err(GraphError::Inconsistent {
                node: h.0,
                index: self.fix(h, d),
            }),
        }
    }

    /// Link edge `da` of `a` with edge `db` of `b`.
    ///
    /// Idempotent. If either edge is already linked elsewhere the graph is
    /// inconsistent. A link between slots the builder put in different orbits
    /// teaches the tiling a new symmetry and regroups it.
    pub fn connect_nodes(&mut self, a: NodeId, da: usize, b: NodeId, db: usize) -> Result<(), GraphError> {
        let da = self.fix(a, da);
        let db = self.fix(b, db);
        let want = Link { node: b, index: db };
        match (self.nodes[a.0].link(da), self.nodes[b.0].link(db)) {
            (Some(l), _) if l == want => return Ok(()),
            (Some(_), _) => return Err(GraphError::Inconsistent { node: a.0, index: da }),
            (None, Some(_)) => return Err(GraphError::Inconsistent { node: b.0, index: db }),
            (None, None) => {}
        }
        self.link(a, da, b, db);
        let p = self.get_adj(a, da);
        let nb = &self.nodes[b.0];
        let (slot_b, pidx_b) = (nb.slot, nb.parent_index);
        if self.tiling.orbit(p.slot) != self.tiling.orbit(slot_b) {
            debug!(from = p.slot, to = slot_b, "merging orbits");
            self.tiling
                .make_match(p.slot, p.index as i64, slot_b, (db + pidx_b) as i64);
            self.tiling.regroup();
        }
        Ok(())
    }

    /// Isometry taking the frame of `h` to the frame of its neighbor across edge `d`.
    pub fn adjcell_matrix(&mut self, h: NodeId, d: usize) -> Result<Mat3, GraphError> {
        let nb = self.create_step(h, d)?;
        let back = match self.nodes[h.0].link(d) {
            Some(l) => l.index,
            None => {
                return Err(GraphError::Inconsistent {
                    node: h.0,
                    index: self.fix(h, d),
                })
            }
        };
        let out = self.placement(h, d);
        Ok(edge_move(self.model, out, self.placement(nb, back).0))
    }

    /// Position of `b` in the frame of `a`.
    pub fn relative_matrix(&self, a: NodeId, b: NodeId) -> Mat3 {
        self.model.inverse(&self.transforms[a.0]) * self.transforms[b.0]
    }

    /// Re-express `at` (given in the frame of `h`) relative to the node nearest to it.
    ///
    /// Hops to whichever neighbor brings `at·C0` closer to the frame center
    /// until no neighbor does.
    pub fn rebase(&mut self, h: NodeId, at: &Mat3) -> Result<(NodeId, Mat3), GraphError> {
        let mut cur = h;
        let mut at = *at;
        loop {
            let mut best = self.model.dist0(&center(&at));
            let mut next = None;
            for d in 0..self.neighbor_count(cur) {
                let step = self.adjcell_matrix(cur, d)?;
                let cand = self.model.inverse(&step) * at;
                let dd = self.model.dist0(&center(&cand));
                if dd < best - 1e-9 {
                    best = dd;
                    next = Some((self.create_step(cur, d)?, cand));
                }
            }
            match next {
                Some((nb, cand)) => {
                    cur = nb;
                    at = self.model.renormalize(&cand);
                }
                None => return Ok((cur, at)),
            }
        }
    }

    /// Walk `steps` uniformly random cell edges from `start`.
    pub fn random_walk<R: Rng>(&mut self, start: NodeId, steps: usize, rng: &mut R) -> Result<NodeId, GraphError> {
        let mut cur = start;
        for _ in 0..steps {
            let d = rng.gen_range(0..self.cell_degree(cur));
            cur = self.cell_step(cur, d)?;
        }
        Ok(cur)
    }

    /// Sizes of BFS layers of cells around the origin, materializing as needed.
    pub fn bfs_layers(&mut self, radius: usize) -> Result<Vec<usize>, GraphError> {
        let mut seen = vec![false; self.nodes.len()];
        let mark = |seen: &mut Vec<bool>, h: NodeId| -> bool {
            if h.0 >= seen.len() {
                seen.resize(h.0 + 1, false);
            }
            !std::mem::replace(&mut seen[h.0], true)
        };
        mark(&mut seen, self.origin);
        let mut frontier = vec![self.origin];
        let mut layers = vec![1];
        for _ in 0..radius {
            let mut next = Vec::new();
            for &h in &frontier {
                for d in 0..self.cell_degree(h) {
                    let nb = self.cell_step(h, d)?;
                    if mark(&mut seen, nb) {
                        next.push(nb);
                    }
                }
            }
            layers.push(next.len());
            frontier = next;
        }
        Ok(layers)
    }

    /// Verify that every link is mirrored and joins slots of matching orbits.
    pub fn check_links(&self) -> Result<(), GraphError> {
        for (i, node) in self.nodes.iter().enumerate() {
            let h = NodeId(i);
            for d in 0..node.degree() {
                let Some(l) = node.link(d) else {
                    continue;
                };
                let back = self.nodes[l.node.0].link(l.index);
                let orbit_ok =
                    self.tiling.orbit(self.get_adj(h, d).slot) == self.orbit_of(l.node);
                if back != Some(Link { node: h, index: d }) || !orbit_ok {
                    return Err(GraphError::Inconsistent { node: i, index: d });
                }
            }
        }
        Ok(())
    }
}
