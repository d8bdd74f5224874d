use super::*;
use crate::symbol::catalog;

fn solved(s: &str) -> (Tiling, Solution) {
    let t = Tiling::parse(s).unwrap();
    let sol = solve(&t).unwrap();
    (t, sol)
}

#[test]
fn cube_closed_form() {
    let (_, s) = solved("(4,4,4)");
    assert!((s.edge_length - (1.0f64 / 3.0).acos()).abs() < 1e-9);
    assert!((s.circumradius[0] - 2f64.sqrt().atan()).abs() < 1e-9);
    assert!((s.corner_angle[0] - PI / 3.0).abs() < 1e-9);
}

#[test]
fn icosahedron_closed_form() {
    let (_, s) = solved("(3,3,3,3,3)");
    assert!((s.edge_length - 2f64.atan()).abs() < 1e-9);
}

#[test]
fn square_grid_is_scaled_to_half_unit_edges() {
    let (_, s) = solved("(4,4,4,4)");
    assert!((s.edge_length - 0.5).abs() < 1e-12);
    assert!((s.circumradius[0] - 2f64.sqrt() / 4.0).abs() < 1e-9);
    assert!((s.inradius[0] - 0.25).abs() < 1e-9);
    assert!((s.corner_angle[0] - PI / 4.0).abs() < 1e-9);
}

#[test]
fn heptagonal_closed_form() {
    let (_, s) = solved("(7,7,7)");
    let expect = 2.0 * ((PI / 7.0).cos() / (PI / 3.0).sin()).acosh();
    assert!((s.edge_length - expect).abs() < 1e-9, "{}", s.edge_length);
    assert!((s.corner_angle[1] - PI / 3.0).abs() < 1e-9);
}

#[test]
fn more_hyperbolic_edges() {
    let (_, s) = solved("(3)^7");
    assert!((s.edge_length - 1.0905497).abs() < 1e-6);
    let (_, s) = solved("(5,5,5,5)");
    assert!((s.edge_length - 1.0612751).abs() < 1e-6);
}

#[test]
fn degenerate_closed_forms() {
    let (_, s) = solved("(6,6)");
    assert!((s.edge_length - PI / 3.0).abs() < 1e-12);
    assert_eq!(s.corner_angle, vec![FRAC_PI_2; 2]);

    // A leading digon must not set the equator length.
    let (_, s) = solved("(2,6,2,6)");
    assert!((s.edge_length - PI / 3.0).abs() < 1e-12, "{}", s.edge_length);

    let (t, s) = solved("(6,6,2)");
    assert!((s.circumradius[2] - PI / 6.0).abs() < 1e-12);
    assert_eq!(s.corner_angle[2], 0.0);
    assert_eq!(s.scale(&t), FRAC_PI_2);

    let (t, s) = solved("(2,2)");
    assert_eq!(s.edge_length, PI);
    assert_eq!(s.corner_angle, vec![FRAC_PI_2; 2]);
    assert_eq!(s.scale(&t), FRAC_PI_2);

    let (t, s) = solved("(2,2,2,2,2,2)");
    assert!((s.corner_angle[0] - PI / 6.0).abs() < 1e-12);
    assert_eq!(s.inradius, vec![0.0; 6]);
    assert!((s.scale(&t) - PI / 3.0).abs() < 1e-12);
}

#[test]
fn corner_angles_sum_to_half_turn() {
    for sample in catalog() {
        let (_, s) = solved(sample.symbol);
        let total: f64 = s.corner_angle.iter().sum();
        assert!((total - PI).abs() < 1e-6, "{}: {total}", sample.symbol);
        assert!(s.residual.abs() < 1e-6);
    }
}

#[test]
fn placement_rows_make_a_full_turn() {
    for sample in catalog() {
        let (t, s) = solved(sample.symbol);
        assert_eq!(s.placement.len(), t.slots());
        let n = t.n();
        for (slot, row) in s.placement.iter().enumerate() {
            assert_eq!(row.len(), t.degree(slot), "{} slot {slot}", sample.symbol);
            assert_eq!(row[0].0, 0.0);
            assert!(row.windows(2).all(|w| w[0].0 <= w[1].0));
            let last_step = if slot < 2 * n {
                TAU / t.faces()[slot / 2] as f64
            } else {
                s.corner_angle[0]
            };
            let turn = row[row.len() - 1].0 + last_step;
            assert!((turn - TAU).abs() < 1e-6, "{} slot {slot}: {turn}", sample.symbol);
        }
    }
}

#[test]
fn vertex_rows_alternate_face_centers_and_edges() {
    let (t, s) = solved("(4,6,8)");
    let row = &s.placement[2 * t.n()];
    for k in 0..t.n() {
        assert_eq!(row[2 * k].1, s.circumradius[k]);
        assert_eq!(row[2 * k + 1].1, s.edge_length);
    }
}
