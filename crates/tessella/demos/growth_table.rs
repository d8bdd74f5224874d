//! Growth table for the hyperbolic catalog samples.
//!
//! Prints one line per tiling: code radius, class count, the first layer
//! counts, the recurrence found, the growth rate and the order of magnitude
//! of layer 2000. Tilings whose
//! classification fails are reported and skipped.
//!
//! Run with `cargo run --release -p tessella --example growth_table`.

use std::time::Instant;

use tessella::api::{catalog, Category, GraphCfg, GrowthAnalyzer, GrowthCfg, TileMap, Variation};

fn main() {
    for sample in catalog() {
        if !matches!(
            sample.category,
            Category::HyperbolicRegular | Category::HyperbolicSemiregular
        ) {
            continue;
        }
        let start = Instant::now();
        let mut map = match TileMap::from_symbol(sample.symbol, Variation::Bitruncated, GraphCfg::default()) {
            Ok(m) => m,
            Err(e) => {
                println!("{:<40} error: {e}", sample.symbol);
                continue;
            }
        };
        let mut an = match GrowthAnalyzer::new(&mut map, GrowthCfg::default()) {
            Ok(a) => a,
            Err(e) => {
                println!("{:<40} error: {e}", sample.symbol);
                continue;
            }
        };
        let layers: Vec<String> = (0..8).map(|n| an.descendants(n).to_string()).collect();
        let rec = an
            .find_recurrence()
            .map(|r| r.to_string())
            .unwrap_or_else(|| "none".to_string());
        let far = an.log_approx_descendants(2000) / std::f64::consts::LN_10;
        println!(
            "{:<40} radius={} classes={:<4} layers=[{}] growth={:.5} layer2000~1e{far:.1} rec: {rec} ({:.1} ms)",
            sample.symbol,
            an.radius(),
            an.class_count(),
            layers.join(", "),
            an.growth_rate(),
            start.elapsed().as_secs_f64() * 1e3,
        );
    }
}
