//! Growth classes and descendant counts.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::cfg::GROWTH_DAMPING;

use super::bignum::BigCount;
use super::explorer::Explorer;
use super::recurrence::{self, Recurrence};
use super::{GrowthCfg, GrowthError};

/// Minimal cyclic rotation and the offset it starts at (earliest on ties).
pub(crate) fn min_rotation<T: Ord + Clone>(seq: &[T]) -> (Vec<T>, usize) {
    let n = seq.len();
    let mut best: Vec<T> = seq.to_vec();
    let mut offset = 0;
    for r in 1..n {
        let rot: Vec<T> = seq[r..].iter().chain(&seq[..r]).cloned().collect();
        if rot < best {
            best = rot;
            offset = r;
        }
    }
    (best, offset)
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum CodeKey {
    Leaf(usize),
    /// Kind, depth, and per neighbor (distance delta, claimed, code).
    Nested(usize, usize, Vec<(isize, bool, usize)>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum SampleKey<N> {
    Node(N),
    Code(usize),
}

/// BFS state plus the code tables of one radius attempt.
struct Classifier<'e, E: Explorer> {
    ex: &'e mut E,
    radius: usize,
    limit: usize,
    finite: bool,
    dist: HashMap<E::Node, usize>,
    layers: Vec<Vec<E::Node>>,
    adj: HashMap<E::Node, Vec<E::Node>>,
    parents: HashMap<E::Node, Option<E::Node>>,
    claims: HashMap<E::Node, Vec<bool>>,
    codes: HashMap<CodeKey, usize>,
    memo: HashMap<(E::Node, usize), (usize, usize)>,
    sample_ids: HashMap<SampleKey<E::Node>, usize>,
    samples: Vec<E::Node>,
}

impl<'e, E: Explorer> Classifier<'e, E> {
    fn new(ex: &'e mut E, radius: usize, cfg: &GrowthCfg) -> Result<Self, GrowthError> {
        let root = ex.root();
        let mut c = Self {
            ex,
            radius,
            limit: cfg.sample_limit,
            finite: false,
            dist: HashMap::from([(root, 0)]),
            layers: vec![vec![root]],
            adj: HashMap::new(),
            parents: HashMap::new(),
            claims: HashMap::new(),
            codes: HashMap::new(),
            memo: HashMap::new(),
            sample_ids: HashMap::new(),
            samples: Vec::new(),
        };
        while c.frontier_open() && c.dist.len() <= cfg.finite_probe {
            c.ensure(c.layers.len())?;
        }
        c.finite = !c.frontier_open();
        Ok(c)
    }

    fn frontier_open(&self) -> bool {
        self.layers.last().is_some_and(|l| !l.is_empty())
    }

    fn neighbors(&mut self, v: E::Node) -> Result<Vec<E::Node>, GrowthError> {
        if let Some(ns) = self.adj.get(&v) {
            return Ok(ns.clone());
        }
        let ns = self.ex.neighbors(v)?;
        self.adj.insert(v, ns.clone());
        Ok(ns)
    }

    /// Extend BFS until layer `d` exists or the graph is exhausted.
    fn ensure(&mut self, d: usize) -> Result<(), GrowthError> {
        while self.layers.len() <= d && self.frontier_open() {
            let k = self.layers.len() - 1;
            let frontier = self.layers[k].clone();
            let mut next = Vec::new();
            for v in frontier {
                for w in self.neighbors(v)? {
                    if !self.dist.contains_key(&w) {
                        self.dist.insert(w, k + 1);
                        next.push(w);
                    }
                }
            }
            self.layers.push(next);
        }
        Ok(())
    }

    fn delta(&self, w: E::Node, d: usize) -> isize {
        self.dist[&w] as isize - d as isize
    }

    /// Minimal rotation of `[(kind, Δdist)]` over the neighbors of `v`.
    fn local(&mut self, v: E::Node) -> Result<(Vec<(usize, isize)>, usize), GrowthError> {
        let d = self.dist[&v];
        self.ensure(d + 1)?;
        let ring: Vec<(usize, isize)> = self
            .neighbors(v)?
            .into_iter()
            .map(|w| (self.ex.kind(w), self.delta(w, d)))
            .collect();
        Ok(min_rotation(&ring))
    }

    fn parent_of(&mut self, w: E::Node) -> Result<Option<E::Node>, GrowthError> {
        if let Some(&p) = self.parents.get(&w) {
            return Ok(p);
        }
        let d = self.dist[&w];
        let mut parent = None;
        if d > 0 {
            let (_, off) = self.local(w)?;
            let ns = self.neighbors(w)?;
            let n = ns.len();
            parent = (0..n)
                .map(|k| ns[(off + k) % n])
                .find(|x| self.dist[x] + 1 == d);
        }
        self.parents.insert(w, parent);
        Ok(parent)
    }

    /// Per neighbor of `v`: whether `v` is its designated parent.
    fn claimed(&mut self, v: E::Node) -> Result<Vec<bool>, GrowthError> {
        if let Some(c) = self.claims.get(&v) {
            return Ok(c.clone());
        }
        let d = self.dist[&v];
        self.ensure(d + 2)?;
        let ns = self.neighbors(v)?;
        let mut seen = HashSet::new();
        let mut out = Vec::with_capacity(ns.len());
        for w in ns {
            let ok = self.dist[&w] == d + 1 && !seen.contains(&w) && self.parent_of(w)? == Some(v);
            if ok {
                seen.insert(w);
            }
            out.push(ok);
        }
        self.claims.insert(v, out.clone());
        Ok(out)
    }

    fn intern(&mut self, key: CodeKey) -> usize {
        let next = self.codes.len();
        *self.codes.entry(key).or_insert(next)
    }

    /// Code of `v` at depth `j` and the rotation offset it was read at.
    fn code(&mut self, v: E::Node, j: usize) -> Result<(usize, usize), GrowthError> {
        if let Some(&c) = self.memo.get(&(v, j)) {
            return Ok(c);
        }
        let kind = self.ex.kind(v);
        let out = if j == 0 {
            (self.intern(CodeKey::Leaf(kind)), 0)
        } else {
            let d = self.dist[&v];
            let ns = self.neighbors(v)?;
            let claimed = self.claimed(v)?;
            let mut ring = Vec::with_capacity(ns.len());
            for (k, &w) in ns.iter().enumerate() {
                let sub = self.code(w, j - 1)?.0;
                ring.push((self.delta(w, d), claimed[k], sub));
            }
            let (ring, off) = min_rotation(&ring);
            (self.intern(CodeKey::Nested(kind, j, ring)), off)
        };
        self.memo.insert((v, j), out);
        Ok(out)
    }

    fn sample_id(&mut self, v: E::Node) -> Result<usize, GrowthError> {
        let key = if self.finite {
            SampleKey::Node(v)
        } else {
            SampleKey::Code(self.code(v, self.radius)?.0)
        };
        if let Some(&id) = self.sample_ids.get(&key) {
            return Ok(id);
        }
        if self.samples.len() >= self.limit {
            return Err(GrowthError::TooManySamples { limit: self.limit });
        }
        let id = self.samples.len();
        self.sample_ids.insert(key, id);
        self.samples.push(v);
        Ok(id)
    }

    fn child_list(&mut self, v: E::Node) -> Result<Vec<usize>, GrowthError> {
        let off = if self.finite { 0 } else { self.code(v, self.radius)?.1 };
        let ns = self.neighbors(v)?;
        let claimed = self.claimed(v)?;
        let n = ns.len();
        let mut out = Vec::new();
        for k in 0..n {
            let i = (off + k) % n;
            if claimed[i] {
                out.push(self.sample_id(ns[i])?);
            }
        }
        Ok(out)
    }

    /// Children lists per sample, followed by the disk class.
    fn preliminary(&mut self) -> Result<Vec<Vec<usize>>, GrowthError> {
        let root = self.ex.root();
        self.sample_id(root)?;
        let mut children = Vec::new();
        let mut i = 0;
        while i < self.samples.len() {
            let v = self.samples[i];
            children.push(self.child_list(v)?);
            i += 1;
        }
        let disk = children.len();
        let mut disk_children = children[0].clone();
        disk_children.push(disk);
        children.push(disk_children);
        Ok(children)
    }
}

/// Growth classes of one explored graph with memoized descendant counts.
#[derive(Clone, Debug)]
pub struct GrowthAnalyzer {
    cfg: GrowthCfg,
    radius: usize,
    finite: bool,
    verified_levels: usize,
    children: Vec<Vec<usize>>,
    root: usize,
    disk: usize,
    desc: Vec<Vec<BigCount>>,
}

impl GrowthAnalyzer {
    /// Classify the graph behind `ex`, growing the code radius until the
    /// class counts match BFS.
    pub fn new<E: Explorer>(ex: &mut E, cfg: GrowthCfg) -> Result<Self, GrowthError> {
        for radius in 1..=cfg.max_radius {
            let mut cls = Classifier::new(&mut *ex, radius, &cfg)?;
            let children = cls.preliminary()?;
            let disk = children.len() - 1;
            let mut an = Self {
                cfg,
                radius,
                finite: cls.finite,
                verified_levels: 0,
                children,
                root: 0,
                disk,
                desc: Vec::new(),
            };
            an.reduce();
            match an.verify(&mut cls)? {
                Some(levels) => {
                    an.verified_levels = levels;
                    debug!(
                        radius,
                        classes = an.children.len(),
                        finite = an.finite,
                        levels,
                        "growth classes verified"
                    );
                    return Ok(an);
                }
                None => debug!(radius, "class counts disagree with BFS; growing radius"),
            }
        }
        warn!(max_radius = cfg.max_radius, "no code radius reproduced the BFS layers");
        Err(GrowthError::Unverified {
            max_radius: cfg.max_radius,
        })
    }

    /// Coarsest partition in which equal classes have equal children lists.
    fn reduce(&mut self) {
        let n = self.children.len();
        let mut grouping = vec![0usize; n];
        let mut groups = 1;
        loop {
            let mut keys: Vec<(Vec<usize>, usize)> = self
                .children
                .iter()
                .enumerate()
                .map(|(i, ch)| (ch.iter().map(|&j| grouping[j]).collect(), i))
                .collect();
            keys.sort();
            let mut count = 0;
            for idx in 0..n {
                if idx == 0 || keys[idx].0 != keys[idx - 1].0 {
                    count += 1;
                }
                grouping[keys[idx].1] = count - 1;
            }
            if count == groups {
                break;
            }
            groups = count;
        }

        // Renumber by first sample.
        let mut first = vec![usize::MAX; groups];
        for (i, &g) in grouping.iter().enumerate() {
            if first[g] == usize::MAX {
                first[g] = i;
            }
        }
        let mut order: Vec<usize> = (0..groups).collect();
        order.sort_by_key(|&g| first[g]);
        let mut rank = vec![0; groups];
        for (r, &g) in order.iter().enumerate() {
            rank[g] = r;
        }
        for g in grouping.iter_mut() {
            *g = rank[*g];
        }
        let mut rep = vec![0; groups];
        for (i, &g) in grouping.iter().enumerate() {
            rep[g] = i;
        }
        self.children = rep
            .iter()
            .map(|&i| self.children[i].iter().map(|&j| grouping[j]).collect())
            .collect();
        self.root = grouping[self.root];
        self.disk = grouping[self.disk];
        self.desc.clear();
    }

    /// Number of leading BFS layers reproduced, or `None` on a mismatch.
    fn verify<E: Explorer>(&mut self, cls: &mut Classifier<'_, E>) -> Result<Option<usize>, GrowthError> {
        let mut n = 0;
        let mut total = 0;
        loop {
            cls.ensure(n)?;
            let Some(layer) = cls.layers.get(n) else {
                return Ok(Some(n));
            };
            let size = layer.len();
            if self.descendants(n) != BigCount::from(size as u64) {
                return Ok(None);
            }
            total += size;
            if total > self.cfg.verify_nodes || size == 0 {
                return Ok(Some(n + 1));
            }
            n += 1;
        }
    }

    fn fill(&mut self, level: usize) {
        while self.desc.len() <= level {
            let row = match self.desc.last() {
                None => vec![BigCount::one(); self.children.len()],
                Some(prev) => self
                    .children
                    .iter()
                    .map(|ch| {
                        let mut sum = BigCount::zero();
                        for &j in ch {
                            sum += &prev[j];
                        }
                        sum
                    })
                    .collect(),
            };
            self.desc.push(row);
        }
    }

    /// Nodes at distance `level` from the root.
    pub fn descendants(&mut self, level: usize) -> BigCount {
        self.descendants_of(level, self.root)
    }

    /// Descendants at depth `level` of a node of class `class`.
    pub fn descendants_of(&mut self, level: usize, class: usize) -> BigCount {
        self.fill(level);
        self.desc[level][class].clone()
    }

    /// Natural log of the layer size at `level`.
    ///
    /// Exact up to `GrowthCfg::exact_levels`; further layers multiply the
    /// last exact one by `growth_rate` per level. Empty layers give `-inf`.
    pub fn log_approx_descendants(&mut self, level: usize) -> f64 {
        let exact = level.min(self.cfg.exact_levels);
        let base = self.descendants(exact).log_approx();
        if exact == level || base == f64::NEG_INFINITY {
            return base;
        }
        base + (level - exact) as f64 * self.growth_rate().ln()
    }

    /// Layer size at `level` as a float; see `log_approx_descendants`.
    pub fn approx_descendants(&mut self, level: usize) -> f64 {
        if level <= self.cfg.exact_levels {
            return self.descendants(level).approx();
        }
        self.log_approx_descendants(level).exp()
    }

    /// Nodes within distance `level` of the root.
    pub fn ball_size(&mut self, level: usize) -> BigCount {
        self.descendants_of(level, self.disk)
    }

    /// Linear recurrence satisfied by the layer counts, if one verifies.
    ///
    /// Finite graphs end in zero layers and report `None`.
    pub fn find_recurrence(&mut self) -> Option<Recurrence> {
        if self.finite {
            return None;
        }
        let cfg = self.cfg;
        let root = self.root;
        recurrence::find(&mut |n| self.descendants_of(n, root), &cfg)
    }

    /// Dominant eigenvalue of the children matrix by damped power iteration.
    pub fn growth_rate(&self) -> f64 {
        let n = self.children.len();
        let mut e = vec![1.0; n];
        let mut total = 0.0;
        for _ in 0..self.cfg.power_iterations {
            let next: Vec<f64> = self
                .children
                .iter()
                .map(|ch| ch.iter().map(|&j| e[j]).sum())
                .collect();
            total = next.iter().sum();
            if total == 0.0 {
                return 0.0;
            }
            for (ei, ni) in e.iter_mut().zip(&next) {
                *ei = GROWTH_DAMPING * *ei + (1.0 - GROWTH_DAMPING) * ni / total;
            }
        }
        total
    }

    pub fn class_count(&self) -> usize {
        self.children.len()
    }

    pub fn children(&self, class: usize) -> &[usize] {
        &self.children[class]
    }

    pub fn root_class(&self) -> usize {
        self.root
    }

    pub fn disk_class(&self) -> usize {
        self.disk
    }

    /// Code radius that passed verification.
    pub fn radius(&self) -> usize {
        self.radius
    }

    pub fn is_finite(&self) -> bool {
        self.finite
    }

    /// Leading BFS layers the class counts were checked against.
    pub fn verified_levels(&self) -> usize {
        self.verified_levels
    }
}
