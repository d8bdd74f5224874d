//! Random walks on a hyperbolic tiling.
//!
//! Purpose
//! - Show how far seeded random walks get from the origin and how many nodes
//!   the lazy map materializes on the way.
//! - Check that dedup keeps the graph consistent after many walks.
//!
//! Run with `cargo run --release -p tessella --example random_walk -- "(7,3)" 200`.

use rand::{rngs::StdRng, SeedableRng};
use tessella::api::{GraphCfg, TileMap, Variation};
use tessella::transform::center;

fn main() {
    let mut args = std::env::args().skip(1);
    let symbol = args.next().unwrap_or_else(|| "(7,3)".to_string());
    let walks: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(100);

    let mut map = TileMap::from_symbol(&symbol, Variation::Bitruncated, GraphCfg::default())
        .expect("symbol should build");
    let mut rng = StdRng::seed_from_u64(2024);
    let mut far = 0.0f64;
    for _ in 0..walks {
        let o = map.origin();
        let end = map.random_walk(o, 30, &mut rng).expect("walk within step limit");
        let d = map.model().dist0(&center(map.transform(end)));
        far = far.max(d);
    }
    map.check_links().expect("links stay mirrored");
    println!(
        "symbol={} walks={walks} cells={} nodes={} steps={} farthest={far:.3}",
        map.tiling().symbol(),
        map.len(),
        map.node_count(),
        map.steps()
    );
}
