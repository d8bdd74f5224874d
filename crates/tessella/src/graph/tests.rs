use rand::rngs::StdRng;
use rand::SeedableRng;

use super::*;
use crate::model::Geometry;
use crate::symbol::{catalog, Variation, WorldSize};
use crate::transform::{center, Mat3};

fn map(s: &str, variation: Variation) -> TileMap {
    match TileMap::from_symbol(s, variation, GraphCfg::default()) {
        Ok(m) => m,
        Err(e) => panic!("{s}: {e}"),
    }
}

#[test]
fn closed_surfaces_have_world_size_many_cells() {
    for sample in catalog() {
        let t = crate::symbol::Tiling::parse(sample.symbol).unwrap();
        if t.geometry() != Geometry::Spherical {
            continue;
        }
        let hosohedron = t.real_faces() == 0;
        for variation in [Variation::Pure, Variation::Bitruncated, Variation::Dual] {
            let WorldSize::Finite { num, den: 1 } = t.world_size(variation) else {
                panic!("{} {variation:?}: world size not integral", sample.symbol);
            };
            let mut m = map(sample.symbol, variation);
            let layers = m.bfs_layers(20).unwrap();
            assert_eq!(m.len(), num as usize, "{} {variation:?}", sample.symbol);
            assert_eq!(layers.iter().sum::<usize>(), m.len(), "{}", sample.symbol);
            assert!(!m.is_buggy());
            if !(hosohedron && variation == Variation::Dual) {
                m.check_links().unwrap();
            }
        }
    }
}

#[test]
fn cube_and_icosahedron_layers() {
    let mut m = map("(4,4,4)", Variation::Bitruncated);
    assert_eq!(m.bfs_layers(4).unwrap(), vec![1, 4, 8, 1, 0]);
    let mut m = map("(4,4,4)", Variation::Pure);
    assert_eq!(m.bfs_layers(4).unwrap(), vec![1, 4, 1, 0, 0]);
    assert_eq!(m.node_count(), 14);
    let mut m = map("(4,4,4)", Variation::Dual);
    assert_eq!(m.bfs_layers(4).unwrap(), vec![1, 3, 3, 1, 0]);
    let mut m = map("(3,3,3,3,3)", Variation::Dual);
    assert_eq!(m.bfs_layers(4).unwrap(), vec![1, 5, 5, 1, 0]);
    let mut m = map("(3,3,3,3,3)", Variation::Pure);
    assert_eq!(m.bfs_layers(6).unwrap(), vec![1, 3, 6, 6, 3, 1, 0]);
}

#[test]
fn euclidean_layers_grow_linearly() {
    let mut m = map("(4,4,4,4)", Variation::Bitruncated);
    assert_eq!(m.bfs_layers(6).unwrap(), vec![1, 4, 16, 24, 32, 40, 48]);
    m.check_links().unwrap();
    let mut m = map("(4,4,4,4)", Variation::Pure);
    assert_eq!(m.bfs_layers(5).unwrap(), vec![1, 4, 8, 12, 16, 20]);
    m.check_links().unwrap();
    let mut m = map("(6,6,6)", Variation::Dual);
    assert_eq!(m.bfs_layers(5).unwrap(), vec![1, 3, 6, 9, 12, 15]);
    let mut m = map("(6,6,6)", Variation::Pure);
    assert_eq!(m.bfs_layers(5).unwrap(), vec![1, 6, 12, 18, 24, 30]);
    let mut m = map("(4,6,12)", Variation::Bitruncated);
    assert_eq!(m.bfs_layers(6).unwrap(), vec![1, 4, 8, 24, 32, 34, 74]);
}

#[test]
fn hyperbolic_layers_grow_exponentially() {
    let mut m = map("(7,7,7)", Variation::Bitruncated);
    assert_eq!(
        m.bfs_layers(9).unwrap(),
        vec![1, 7, 14, 28, 49, 84, 147, 252, 434, 749]
    );
    assert_eq!(m.len(), 1765);
    m.check_links().unwrap();

    let mut m = map("(7,7,7)", Variation::Dual);
    assert_eq!(
        m.bfs_layers(9).unwrap(),
        vec![1, 3, 6, 12, 18, 30, 45, 72, 111, 174]
    );
    assert_eq!(m.len(), 472);
    let mut m = map("(7,7,7)", Variation::Pure);
    assert_eq!(
        m.bfs_layers(6).unwrap(),
        vec![1, 7, 21, 56, 147, 385, 1008]
    );
    let mut m = map("(3)^7", Variation::Bitruncated);
    assert_eq!(m.bfs_layers(5).unwrap(), vec![1, 3, 27, 78, 207, 543]);
}

#[test]
fn deep_hyperbolic_walks_stay_consistent() {
    for symbol in ["(7,7,7)", "(3)^7"] {
        for seed in 0..3 {
            let mut m = map(symbol, Variation::Bitruncated);
            let mut rng = StdRng::seed_from_u64(seed);
            for _ in 0..40 {
                m.random_walk(m.origin(), 40, &mut rng).unwrap();
            }
            m.check_links().unwrap();
            assert!(!m.is_buggy());
            // Stored transforms near the origin agree with the local geometry.
            for i in 0..m.node_count() {
                let h = NodeId(i);
                if m.node(h).dist > 6 {
                    continue;
                }
                for d in 0..m.neighbor_count(h) {
                    let Some(link) = m.neighbor(h, d) else {
                        continue;
                    };
                    let step = m.adjcell_matrix(h, d).unwrap();
                    let rel = m.relative_matrix(h, link.node);
                    let drift = m.model().dist(&center(&step), &center(&rel));
                    assert!(drift < 1e-4, "{symbol} seed {seed}: node {i} edge {d}: {drift}");
                }
            }
            // Walking first must not change what a fresh BFS sees.
            let layers = m.bfs_layers(6).unwrap();
            if symbol == "(7,7,7)" {
                assert_eq!(layers, vec![1, 7, 14, 28, 49, 84, 147]);
            } else {
                assert_eq!(layers, vec![1, 3, 27, 78, 207, 543, 1422]);
            }
        }
    }
}

#[test]
fn create_step_is_idempotent_and_mirrored() {
    let mut m = map("(4,6,8)", Variation::Bitruncated);
    let o = m.origin();
    assert!(m.neighbor(o, 0).is_none());
    let a = m.create_step(o, 0).unwrap();
    assert!(a > o, "ids follow generation order");
    assert_eq!(m.create_step(o, 0).unwrap(), a);
    let before = m.node_count();
    let steps = m.steps();
    assert_eq!(m.create_step(o, 0).unwrap(), a);
    assert_eq!((m.node_count(), m.steps()), (before, steps));

    let link = m.neighbor(o, 0).unwrap();
    assert_eq!(link.node, a);
    let back = m.neighbor(a, link.index).unwrap();
    assert_eq!((back.node, back.index), (o, 0));
    assert_eq!(m.node(a).dist, 1);
}

#[test]
fn origin_type_follows_variation() {
    let m = map("(4,4,4,4)", Variation::Dual);
    assert!(m.is_vertex(m.origin()));
    assert_eq!(m.type_id(m.origin()), 2 * m.tiling().n());
    assert_eq!(m.cell_degree(m.origin()), 4);
    let m = map("(4,4,4,4)", Variation::Pure);
    assert!(!m.is_vertex(m.origin()));
    assert!(m.is_cell(m.origin()));
    assert_eq!(m.neighbor_count(m.origin()), 4);
}

#[test]
fn cell_steps_stay_on_cells() {
    for variation in [Variation::Pure, Variation::Dual] {
        let mut m = map("(4,6,12)", variation);
        m.bfs_layers(4).unwrap();
        for i in 0..m.node_count() {
            let h = NodeId(i);
            if !m.is_cell(h) || m.node(h).dist > 4 {
                continue;
            }
            assert_eq!(m.is_vertex(h), variation == Variation::Dual);
            for k in 0..m.cell_degree(h) {
                let nb = m.cell_step(h, k).unwrap();
                assert!(m.is_cell(nb), "{variation:?}: node {i} cell edge {k}");
                assert_ne!(nb, h);
            }
        }
        m.check_links().unwrap();
    }
}

#[test]
fn walking_around_a_node_closes_the_loop() {
    for symbol in ["(3,3,3,3,3,3) (0,1)(2,3)(4,5)", "(3,3,3,3,4) (1,2)(0,4)(3)"] {
        let mut m = map(symbol, Variation::Bitruncated);
        m.bfs_layers(3).unwrap();
        for i in 0..m.node_count() {
            let v = NodeId(i);
            if m.node(v).dist > 2 {
                continue;
            }
            let start = m.create_step(v, 0).unwrap();
            let Some(first) = m.neighbor(v, 0) else {
                panic!("{symbol}: node {i} lost its first link");
            };
            // Each hop moves to the next neighbor of `v`; the edge leaving it
            // sits two places before the edge it was entered by.
            let before = |m: &TileMap, h: NodeId, e: usize, delta: usize| {
                let deg = m.neighbor_count(h);
                (e + deg - delta) % deg
            };
            let (mut cur, mut e) = (start, before(&m, start, first.index, 1));
            let mut acc = Mat3::identity();
            for _ in 0..m.neighbor_count(v) {
                acc *= m.adjcell_matrix(cur, e).unwrap();
                let link = m.neighbor(cur, e).unwrap();
                cur = link.node;
                e = before(&m, cur, link.index, 2);
            }
            assert_eq!(cur, start, "{symbol}: loop around node {i}");
            let err = (acc - Mat3::identity()).amax();
            assert!(err < 1e-4, "{symbol}: loop around node {i} is off by {err}");
        }
    }
}

#[test]
fn failed_connection_leaves_transforms_alone() {
    // Corners 0 and 1 of the origin square are joined by a tiling edge.
    let prepare = || {
        let mut m = map("(4,4,4,4)", Variation::Bitruncated);
        let o = m.origin();
        let a = m.create_step(o, 0).unwrap();
        let b = m.create_step(o, 1).unwrap();
        let c = m.create_step(o, 2).unwrap();
        (m, a, b, c)
    };
    let (mut scout, a, b, _) = prepare();
    let (k, kb) = (0..scout.neighbor_count(a))
        .find_map(|k| {
            let nb = scout.create_step(a, k).unwrap();
            let back = scout.neighbor(a, k).unwrap().index;
            (nb == b).then_some((k, back))
        })
        .unwrap();

    let (mut m, a2, b2, c) = prepare();
    assert_eq!((a2, b2), (a, b));
    let free = (0..m.neighbor_count(c))
        .find(|&d| m.neighbor(c, d).is_none())
        .unwrap();
    // Occupy the edge of `b` that the step from `a` will try to use.
    m.connect_nodes(b, kb, c, free).unwrap();
    let (ta, tb) = (*m.transform(a), *m.transform(b));
    assert_eq!(
        m.create_step(a, k),
        Err(GraphError::Inconsistent { node: b.0, index: kb })
    );
    assert_eq!((*m.transform(a), *m.transform(b)), (ta, tb));
    assert!(m.neighbor(a, k).is_none());
}

#[test]
fn relative_matrix_agrees_with_adjacent_cell() {
    for (symbol, variation) in [
        ("(4,4,4,4)", Variation::Bitruncated),
        ("(4,4,4)", Variation::Dual),
        ("(7,7,7)", Variation::Bitruncated),
    ] {
        let mut m = map(symbol, variation);
        m.bfs_layers(4).unwrap();
        for i in 0..m.node_count().min(200) {
            let h = NodeId(i);
            for d in 0..m.neighbor_count(h) {
                let step = m.adjcell_matrix(h, d).unwrap();
                let nb = m.create_step(h, d).unwrap();
                let rel = m.relative_matrix(h, nb);
                let gap = m.model().dist(&center(&step), &center(&rel));
                assert!(gap < 1e-6, "{symbol}: node {i} edge {d}: {gap}");
            }
        }
    }
}

#[test]
fn rebase_lands_on_the_neighbor() {
    let mut m = map("(4,6,8)", Variation::Bitruncated);
    let o = m.origin();
    for d in 0..m.neighbor_count(o) {
        let nb = m.create_step(o, d).unwrap();
        let at = m.relative_matrix(o, nb);
        let (h, rest) = m.rebase(o, &at).unwrap();
        assert_eq!(h, nb);
        assert!(m.model().dist0(&center(&rest)) < 1e-6);
    }
    // Already at the closest node.
    let id = crate::transform::spin(0.0);
    let (h, _) = m.rebase(o, &id).unwrap();
    assert_eq!(h, o);
}

#[test]
fn step_limit_marks_the_map_buggy() {
    let cfg = GraphCfg {
        step_limit: 10,
        ..GraphCfg::default()
    };
    let mut m = TileMap::from_symbol("(7,7,7)", Variation::Bitruncated, cfg).unwrap();
    assert!(!m.is_buggy());
    assert_eq!(m.bfs_layers(5), Err(GraphError::StepLimit { limit: 10 }));
    assert!(m.is_buggy());
    // Already materialized links stay usable.
    let o = m.origin();
    assert!(m.create_step(o, 0).is_ok());
}

#[test]
fn degenerate_tilings_generate() {
    for (symbol, variation, cells) in [
        ("(2,2)", Variation::Bitruncated, 4),
        ("(2,2)", Variation::Dual, 2),
        ("(2,2)", Variation::Pure, 2),
        ("(2,2,2,2,2,2)", Variation::Pure, 6),
        ("(6,6)", Variation::Bitruncated, 8),
        ("(6,6,2)", Variation::Dual, 6),
        ("(6,6,2)", Variation::Pure, 5),
        ("(6,2,6,2)", Variation::Bitruncated, 14),
        ("(2,6,2,6)", Variation::Bitruncated, 14),
        ("(2,6,2,6)", Variation::Pure, 8),
        ("(2,6,2,6)", Variation::Dual, 6),
        ("(2,3,3,3,3,3) (2,3)(4,5)", Variation::Bitruncated, 38),
        ("(2,3,3,3,3,3) (2,3)(4,5)", Variation::Pure, 26),
    ] {
        let mut m = map(symbol, variation);
        let layers = m.bfs_layers(12).unwrap();
        assert_eq!(m.len(), cells, "{symbol} {variation:?}");
        assert_eq!(layers.iter().sum::<usize>(), cells, "{symbol} {variation:?}");
    }
    // A leading digon in the symbol used to size the equator by the digon.
    let mut m = map("(2,6,2,6)", Variation::Bitruncated);
    assert_eq!(m.bfs_layers(5).unwrap(), vec![1, 2, 6, 4, 1, 0]);
    m.check_links().unwrap();
}

#[test]
fn invalid_symbols_surface_as_tiling_errors() {
    match TileMap::from_symbol("(3,4,5)", Variation::Pure, GraphCfg::default()) {
        Err(GraphError::Tiling(_)) => {}
        Err(e) => panic!("unexpected {e}"),
        Ok(_) => panic!("(3,4,5) should not build"),
    }
}
