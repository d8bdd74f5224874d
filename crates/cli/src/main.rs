use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tessella::api::{
    catalog, solve, GraphCfg, GrowthAnalyzer, GrowthCfg, Recurrence, TileMap, Tiling, Variation,
};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

use provenance::Payload;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Inspect, expand and measure Archimedean tilings")]
struct Cmd {
    /// Write the JSON result here (plus a provenance sidecar) instead of stdout
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Parse a vertex configuration and print its derived properties
    Parse { symbol: String },
    /// Materialize BFS layers around the origin
    Expand {
        symbol: String,
        #[arg(long, default_value_t = 6)]
        radius: usize,
        #[arg(long, default_value = "bitruncated")]
        variation: Variation,
        #[arg(long)]
        step_limit: Option<usize>,
    },
    /// Growth classes, exact layer counts, recurrence and growth rate
    Growth {
        symbol: String,
        #[arg(long, default_value_t = 20)]
        levels: usize,
        #[arg(long, default_value = "bitruncated")]
        variation: Variation,
        /// Longest printed count before digits are summarized
        #[arg(long, default_value_t = 60)]
        max_digits: usize,
    },
    /// List the built-in sample tilings
    Catalog,
    /// Print a small provenance JSON block
    Report,
}

#[derive(Serialize, Debug)]
struct WorldSizes {
    pure: String,
    bitruncated: String,
    dual: String,
}

#[derive(Serialize, Debug)]
struct ParseReport {
    symbol: String,
    geometry: &'static str,
    angle_sum: f64,
    faces: Vec<usize>,
    slots: usize,
    orbits: usize,
    periods: Vec<Option<i64>>,
    edge_length: f64,
    world_size: WorldSizes,
    chessboard: bool,
    threecolor: String,
    threecolor_bitruncated: String,
    football: String,
}

#[derive(Serialize)]
struct ExpandReport {
    symbol: String,
    variation: &'static str,
    layers: Vec<usize>,
    cells: usize,
    nodes: usize,
    steps: usize,
}

#[derive(Serialize)]
struct RecurrenceReport {
    coefficients: Vec<i64>,
    valid_from: usize,
    text: String,
}

impl From<Recurrence> for RecurrenceReport {
    fn from(r: Recurrence) -> Self {
        Self {
            text: r.to_string(),
            coefficients: r.coefficients,
            valid_from: r.valid_from,
        }
    }
}

#[derive(Serialize)]
struct GrowthReport {
    symbol: String,
    radius: usize,
    classes: usize,
    finite: bool,
    verified_levels: usize,
    descendants: Vec<String>,
    recurrence: Option<RecurrenceReport>,
    growth_rate: f64,
}

#[derive(Serialize)]
struct CatalogEntry {
    symbol: &'static str,
    category: &'static str,
    geometry: &'static str,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let (payload, value) = match cmd.action {
        Action::Parse { symbol } => (
            Payload::new("parse", json!({ "symbol": symbol })),
            serde_json::to_value(parse_report(&symbol)?)?,
        ),
        Action::Expand {
            symbol,
            radius,
            variation,
            step_limit,
        } => (
            Payload::new(
                "expand",
                json!({ "symbol": symbol, "radius": radius, "variation": variation.name(), "step_limit": step_limit }),
            ),
            serde_json::to_value(expand(&symbol, radius, variation, step_limit)?)?,
        ),
        Action::Growth {
            symbol,
            levels,
            variation,
            max_digits,
        } => (
            Payload::new(
                "growth",
                json!({ "symbol": symbol, "levels": levels, "variation": variation.name() }),
            ),
            serde_json::to_value(growth(&symbol, levels, variation, max_digits)?)?,
        ),
        Action::Catalog => (
            Payload::new("catalog", json!({})),
            serde_json::to_value(catalog_entries()?)?,
        ),
        Action::Report => {
            let payload = Payload::new("report", json!({}));
            let value = provenance::block(&payload, &[]);
            (payload, value)
        }
    };
    emit(cmd.out.as_deref(), &payload, &value)
}

fn emit(out: Option<&Path>, payload: &Payload, value: &Value) -> Result<()> {
    let Some(out) = out else {
        println!("{}", serde_json::to_string_pretty(value)?);
        return Ok(());
    };
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    std::fs::write(out, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", out.display()))?;
    let sidecar = provenance::write_sidecar(out, payload)?;
    tracing::info!(out = %out.display(), sidecar = %sidecar.display(), "wrote");
    Ok(())
}

fn parse_tiling(symbol: &str) -> Result<Tiling> {
    Tiling::parse(symbol).with_context(|| format!("parsing {symbol:?}"))
}

fn parse_report(symbol: &str) -> Result<ParseReport> {
    let t = parse_tiling(symbol)?;
    let sol = solve(&t).with_context(|| format!("solving {symbol:?}"))?;
    let periods = (0..t.orbit_count())
        .map(|o| (0..t.slots()).find(|&s| t.orbit(s) == Some(o)).map(|s| t.period(s)))
        .collect();
    Ok(ParseReport {
        symbol: t.symbol().to_string(),
        geometry: t.geometry().name(),
        angle_sum: t.angle_sum(),
        faces: t.faces().to_vec(),
        slots: t.slots(),
        orbits: t.orbit_count(),
        periods,
        edge_length: sol.edge_length,
        world_size: WorldSizes {
            pure: t.world_size(Variation::Pure).to_string(),
            bitruncated: t.world_size(Variation::Bitruncated).to_string(),
            dual: t.world_size(Variation::Dual).to_string(),
        },
        chessboard: t.support_chessboard(),
        threecolor: format!("{:?}", t.support_threecolor()).to_lowercase(),
        threecolor_bitruncated: format!("{:?}", t.support_threecolor_bitruncated()).to_lowercase(),
        football: format!("{:?}", t.support_football()).to_lowercase(),
    })
}

fn expand(symbol: &str, radius: usize, variation: Variation, step_limit: Option<usize>) -> Result<ExpandReport> {
    let mut cfg = GraphCfg::default();
    if let Some(limit) = step_limit {
        cfg.step_limit = limit;
    }
    let mut map = TileMap::new(parse_tiling(symbol)?, variation, cfg)
        .with_context(|| format!("placing {symbol:?}"))?;
    let layers = map
        .bfs_layers(radius)
        .with_context(|| format!("expanding {symbol:?} to radius {radius}"))?;
    tracing::info!(symbol, radius, cells = map.len(), nodes = map.node_count(), "expanded");
    Ok(ExpandReport {
        symbol: map.tiling().symbol().to_string(),
        variation: variation.name(),
        layers,
        cells: map.len(),
        nodes: map.node_count(),
        steps: map.steps(),
    })
}

fn growth(symbol: &str, levels: usize, variation: Variation, max_digits: usize) -> Result<GrowthReport> {
    let mut map = TileMap::new(parse_tiling(symbol)?, variation, GraphCfg::default())
        .with_context(|| format!("placing {symbol:?}"))?;
    let mut an = GrowthAnalyzer::new(&mut map, GrowthCfg::default())
        .with_context(|| format!("classifying {symbol:?}"))?;
    let descendants = (0..levels)
        .map(|n| an.descendants(n).to_string_limited(max_digits))
        .collect();
    let recurrence = an.find_recurrence();
    tracing::info!(symbol, classes = an.class_count(), found = recurrence.is_some(), "growth");
    Ok(GrowthReport {
        symbol: map.tiling().symbol().to_string(),
        radius: an.radius(),
        classes: an.class_count(),
        finite: an.is_finite(),
        verified_levels: an.verified_levels(),
        descendants,
        recurrence: recurrence.map(RecurrenceReport::from),
        growth_rate: an.growth_rate(),
    })
}

fn catalog_entries() -> Result<Vec<CatalogEntry>> {
    catalog()
        .iter()
        .map(|s| {
            let t = parse_tiling(s.symbol)?;
            Ok(CatalogEntry {
                symbol: s.symbol,
                category: s.category.name(),
                geometry: t.geometry().name(),
            })
        })
        .collect()
}
