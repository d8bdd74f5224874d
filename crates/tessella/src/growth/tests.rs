use proptest::prelude::*;

use super::analyzer::min_rotation;
use super::*;
use crate::graph::{GraphCfg, TileMap};
use crate::symbol::Variation;

/// Triangular lattice in axial coordinates; one kind.
struct Lattice;

impl Explorer for Lattice {
    type Node = (i64, i64);

    fn root(&self) -> (i64, i64) {
        (0, 0)
    }

    fn neighbors(&mut self, (x, y): (i64, i64)) -> Result<Vec<(i64, i64)>, GrowthError> {
        const DIRS: [(i64, i64); 6] = [(1, 0), (0, 1), (-1, 1), (-1, 0), (0, -1), (1, -1)];
        Ok(DIRS.iter().map(|(dx, dy)| (x + dx, y + dy)).collect())
    }

    fn kind(&self, _: (i64, i64)) -> usize {
        0
    }
}

/// Cycle of `n` nodes.
struct Ring(usize);

impl Explorer for Ring {
    type Node = usize;

    fn root(&self) -> usize {
        0
    }

    fn neighbors(&mut self, v: usize) -> Result<Vec<usize>, GrowthError> {
        Ok(vec![(v + 1) % self.0, (v + self.0 - 1) % self.0])
    }

    fn kind(&self, _: usize) -> usize {
        0
    }
}

fn analyze(symbol: &str) -> GrowthAnalyzer {
    analyze_cells(symbol, Variation::Bitruncated, GrowthCfg::default())
}

fn analyze_cells(symbol: &str, variation: Variation, cfg: GrowthCfg) -> GrowthAnalyzer {
    let mut map = TileMap::from_symbol(symbol, variation, GraphCfg::default()).unwrap();
    match GrowthAnalyzer::new(&mut map, cfg) {
        Ok(a) => a,
        Err(e) => panic!("{symbol} {variation:?}: {e}"),
    }
}

fn counts(a: &mut GrowthAnalyzer, levels: usize) -> Vec<String> {
    (0..levels).map(|n| a.descendants(n).to_string()).collect()
}

fn rec(coefficients: &[i64], valid_from: usize) -> Option<Recurrence> {
    Some(Recurrence {
        coefficients: coefficients.to_vec(),
        valid_from,
    })
}

#[test]
fn lattice_layers_and_recurrence() {
    let mut a = GrowthAnalyzer::new(&mut Lattice, GrowthCfg::default()).unwrap();
    assert!(!a.is_finite());
    assert_eq!(a.radius(), 1);
    assert_eq!(counts(&mut a, 6), ["1", "6", "12", "18", "24", "30"]);
    assert_eq!(a.find_recurrence(), rec(&[2, -1], 3));
    assert!((a.growth_rate() - 1.0).abs() < 0.01);
    assert_eq!(a.ball_size(3).to_string(), "37");
}

#[test]
fn ring_is_finite_and_exact() {
    let mut a = GrowthAnalyzer::new(&mut Ring(10), GrowthCfg::default()).unwrap();
    assert!(a.is_finite());
    assert_eq!(counts(&mut a, 7), ["1", "2", "2", "2", "2", "1", "0"]);
    assert_eq!(a.ball_size(10).to_string(), "10");
    assert_eq!(a.find_recurrence(), None);
}

#[test]
fn descendants_follow_children() {
    let mut a = analyze("(7,7,7)");
    assert_eq!(a.descendants(0), BigCount::one());
    for c in 0..a.class_count() {
        for n in 0..12 {
            let mut sum = BigCount::zero();
            for &child in a.children(c).to_vec().iter() {
                sum += &a.descendants_of(n, child);
            }
            assert_eq!(a.descendants_of(n + 1, c), sum, "class {c} level {n}");
        }
    }
}

#[test]
fn ball_is_running_sum_of_layers() {
    let mut a = analyze("(3)^7");
    let mut total = BigCount::zero();
    for n in 0..15 {
        total += &a.descendants(n);
        assert_eq!(a.ball_size(n), total);
    }
}

#[test]
fn square_grid() {
    let mut a = analyze("(4,4,4,4)");
    assert_eq!(
        counts(&mut a, 8),
        ["1", "4", "16", "24", "32", "40", "48", "56"]
    );
    assert_eq!(a.find_recurrence(), rec(&[2, -1], 4));
}

#[test]
fn heptagonal_growth() {
    let mut a = analyze("(7,7,7)");
    assert_eq!(
        counts(&mut a, 10),
        ["1", "7", "14", "28", "49", "84", "147", "252", "434", "749"]
    );
    let r = a.find_recurrence();
    assert_eq!(r, rec(&[1, 1, 1, -1], 5));
    assert!((a.growth_rate() - 1.72208).abs() < 1e-4, "{}", a.growth_rate());
    if let Some(r) = r {
        let mut term = |n| a.descendants(n);
        for n in 5..300 {
            assert!(r.holds_at(n, &mut term), "n = {n}");
        }
    }
}

#[test]
fn approximate_counts_extrapolate_past_the_exact_levels() {
    let cfg = GrowthCfg {
        exact_levels: 50,
        ..GrowthCfg::default()
    };
    let mut a = analyze_cells("(7,7,7)", Variation::Bitruncated, cfg);
    for n in 0..200 {
        let exact = a.descendants(n).approx();
        let approx = a.approx_descendants(n);
        assert!((approx - exact).abs() <= 1e-6 * exact, "n = {n}: {approx} vs {exact}");
    }
    assert_eq!(a.approx_descendants(3), 28.0);
    let log = a.log_approx_descendants(400);
    assert!((log - a.descendants(400).log_approx()).abs() < 1e-6, "{log}");

    let mut a = analyze_cells("(4,4,4)", Variation::Bitruncated, cfg);
    assert_eq!(a.approx_descendants(80), 0.0);
}

#[test]
fn pure_and_dual_maps_grow_by_cells() {
    let mut a = analyze_cells("(7,7,7)", Variation::Pure, GrowthCfg::default());
    assert_eq!(
        counts(&mut a, 8),
        ["1", "7", "21", "56", "147", "385", "1008", "2639"]
    );
    assert_eq!(a.find_recurrence(), rec(&[3, -1], 3));

    let mut a = analyze_cells("(7,7,7)", Variation::Dual, GrowthCfg::default());
    assert_eq!(
        counts(&mut a, 10),
        ["1", "3", "6", "12", "18", "30", "45", "72", "111", "174"]
    );
    assert_eq!(a.find_recurrence(), rec(&[1, 1, -1, 1, 1, -1], 7));
    assert!((a.growth_rate() - 1.55603).abs() < 1e-4, "{}", a.growth_rate());

    let mut a = analyze_cells("(4,4,4)", Variation::Pure, GrowthCfg::default());
    assert!(a.is_finite());
    assert_eq!(counts(&mut a, 4), ["1", "4", "1", "0"]);
}

#[test]
fn more_hyperbolic_recurrences() {
    let mut a = analyze("(3)^7");
    assert_eq!(a.find_recurrence(), rec(&[3, -1], 3));
    assert!((a.growth_rate() - 2.618034).abs() < 1e-4);

    let mut a = analyze("(4)^6");
    assert_eq!(a.find_recurrence(), rec(&[4, -1], 4));
    assert!((a.growth_rate() - 3.732051).abs() < 1e-4);

    let mut a = analyze("(5,5,5,5)");
    assert_eq!(a.find_recurrence(), rec(&[2, 0, 2, -1], 5));
    assert!((a.growth_rate() - 2.29663).abs() < 1e-4);
}

#[test]
fn semiregular_tilings_need_a_wider_code() {
    let mut a = analyze("(4,6,12)");
    assert!(a.radius() > 1 && a.radius() <= 3, "radius {}", a.radius());
    assert_eq!(
        counts(&mut a, 10),
        ["1", "4", "8", "24", "32", "34", "74", "78", "60", "118"]
    );
    assert_eq!(a.find_recurrence(), rec(&[0, 0, 2, 0, 0, -1], 11));

    let mut a = analyze("(3,12,12)");
    assert_eq!(a.find_recurrence(), rec(&[0, 2, 0, -1], 9));
}

#[test]
fn spheres_count_every_node() {
    let mut a = analyze("(4,4,4)");
    assert!(a.is_finite());
    assert_eq!(counts(&mut a, 5), ["1", "4", "8", "1", "0"]);
    assert_eq!(a.ball_size(10).to_string(), "14");
    assert_eq!(a.find_recurrence(), None);

    let mut a = analyze("(3,3,3,3,3)");
    assert_eq!(counts(&mut a, 6), ["1", "3", "15", "12", "1", "0"]);
}

#[test]
fn sample_limit_is_reported() {
    let cfg = GrowthCfg {
        sample_limit: 3,
        ..GrowthCfg::default()
    };
    let mut map = TileMap::from_symbol("(4,6,8)", Variation::Bitruncated, GraphCfg::default()).unwrap();
    assert_eq!(
        GrowthAnalyzer::new(&mut map, cfg).unwrap_err(),
        GrowthError::TooManySamples { limit: 3 }
    );
}

#[test]
fn graph_errors_pass_through() {
    let graph = GraphCfg {
        step_limit: 5,
        ..GraphCfg::default()
    };
    let mut map = TileMap::from_symbol("(7,7,7)", Variation::Bitruncated, graph).unwrap();
    match GrowthAnalyzer::new(&mut map, GrowthCfg::default()) {
        Err(GrowthError::Graph(_)) => assert!(map.is_buggy()),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn recurrence_display() {
    let r = Recurrence {
        coefficients: vec![2, 0, -1],
        valid_from: 4,
    };
    assert_eq!(r.to_string(), "a(n) = 2a(n-1) - a(n-3) for n >= 4");
    let r = Recurrence {
        coefficients: vec![-3],
        valid_from: 0,
    };
    assert_eq!(r.to_string(), "a(n) = -3a(n-1) for n >= 0");
}

#[test]
fn minimal_rotation_prefers_the_earliest_offset() {
    assert_eq!(min_rotation(&[3, 1, 2, 1, 2]), (vec![1, 2, 1, 2, 3], 1));
    assert_eq!(min_rotation(&[1, 1]), (vec![1, 1], 0));
    assert_eq!(min_rotation::<u8>(&[]), (vec![], 0));
}

#[test]
fn big_count_formatting() {
    let big = BigCount::from(1_000_000_000_000_000_000u64);
    assert_eq!(big.to_string(), "1000000000000000000");
    assert_eq!(big.to_string_limited(5), "1 000000000 000000000");
    let mut huge = big.clone();
    for _ in 0..2 {
        let copy = huge.clone();
        huge.add_mul(&copy, 999_999_999).unwrap();
    }
    // 10^36
    assert_eq!(huge.limb_count(), 5);
    assert_eq!(huge.to_string_limited(5), "1 000000000 (27 more digits)");
    assert!((huge.log_approx() - 36.0 * 10f64.ln()).abs() < 1e-9);
    assert_eq!(BigCount::zero().to_string_limited(3), "0");
}

#[test]
fn big_count_underflow_leaves_value() {
    let mut a = BigCount::from(5);
    assert_eq!(a.sub(&BigCount::from(6)), Err(Underflow));
    assert_eq!(a, BigCount::from(5));
    let mut z = BigCount::zero();
    assert_eq!(z.decr(), Err(Underflow));
    let mut b = BigCount::from(1_000_000_000);
    b.decr().unwrap();
    assert_eq!(b, BigCount::from(999_999_999));
    b.incr();
    assert_eq!(b.limb_count(), 2);
}

proptest! {
    #[test]
    fn big_count_matches_u128(a in any::<u64>(), b in any::<u64>(), f in -1000i64..1000) {
        let (ba, bb) = (BigCount::from(a), BigCount::from(b));
        let mut sum = ba.clone();
        sum += &bb;
        prop_assert_eq!(sum.to_string(), (a as u128 + b as u128).to_string());
        prop_assert_eq!(ba.cmp(&bb), a.cmp(&b));

        let mut m = ba.clone();
        let want = a as i128 + b as i128 * f as i128;
        let got = m.add_mul(&bb, f);
        if want < 0 {
            prop_assert_eq!(got, Err(Underflow));
            prop_assert_eq!(&m, &ba);
        } else {
            prop_assert!(got.is_ok());
            prop_assert_eq!(m.to_string(), want.to_string());
        }

        let rel = (ba.approx() - a as f64).abs() / (a as f64).max(1.0);
        prop_assert!(rel < 1e-12);
    }

    #[test]
    fn incr_decr_round_trip(a in 0u64..u64::MAX) {
        let mut x = BigCount::from(a);
        x.incr();
        prop_assert_eq!(x.to_string(), (a as u128 + 1).to_string());
        x.decr().unwrap();
        prop_assert_eq!(x, BigCount::from(a));
    }
}
