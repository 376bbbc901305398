//! poincare CLI - hyperbolic tiling generator
//!
//! Builds {p,q} tilings of the Poincaré disk and writes them as SVG.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use poincare_kernel_geom::Circle;
use poincare_kernel_math::Point2;
use poincare_kernel_tessellate::{Tessellation, TessellationStats, TilingParams};
use poincare_render::{write_svg, RenderStyle};
use serde::Deserialize;
use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "poincare")]
#[command(about = "Regular {p,q} tilings of the Poincaré disk", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a tiling and write it as SVG
    Generate {
        #[command(flatten)]
        tiling: TilingArgs,
        /// Canvas width and height in pixels
        #[arg(long, default_value_t = 800.0)]
        size: f64,
        /// Output file, or `-` for stdout
        #[arg(short, long, default_value = "tiling.svg")]
        output: PathBuf,
        /// TOML file with `[tiling]` and `[style]` tables
        #[arg(long)]
        config: Option<PathBuf>,
        /// Draw the dual graph
        #[arg(long)]
        dual: bool,
        /// Pan by a pointer drag of DX,DY pixels (repeatable, applied before spins)
        #[arg(long, value_name = "DX,DY", value_parser = parse_drag, allow_hyphen_values = true)]
        drag: Vec<(f64, f64)>,
        /// Rotate by a vertical pointer drag of DY pixels (repeatable)
        #[arg(long, value_name = "DY", allow_hyphen_values = true)]
        spin: Vec<f64>,
    },
    /// Print vertex, tile and edge counts of a tiling
    Info {
        #[command(flatten)]
        tiling: TilingArgs,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// Tiling flags; unset values fall back to the config file, then defaults.
#[derive(clap::Args, Debug, Clone, Copy, Default)]
struct TilingArgs {
    /// Sides per polygon
    #[arg(short)]
    p: Option<usize>,
    /// Polygons meeting at each vertex
    #[arg(short)]
    q: Option<usize>,
    /// Number of levels to expand
    #[arg(short = 'l', long = "levels")]
    levels: Option<usize>,
}

impl TilingArgs {
    fn overlay(&self, base: TilingParams) -> TilingParams {
        TilingParams {
            p: self.p.unwrap_or(base.p),
            q: self.q.unwrap_or(base.q),
            max_level: self.levels.unwrap_or(base.max_level),
        }
    }
}

/// Contents of a `--config` file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    tiling: TilingParams,
    style: RenderStyle,
}

impl Config {
    fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
    }
}

fn parse_drag(s: &str) -> std::result::Result<(f64, f64), String> {
    let (dx, dy) = s
        .split_once(',')
        .ok_or_else(|| format!("expected DX,DY, got `{s}`"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid number `{v}`: {e}"))
    };
    Ok((parse(dx)?, parse(dy)?))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "poincare=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            tiling,
            size,
            output,
            config,
            dual,
            drag,
            spin,
        } => {
            let config = match config {
                Some(path) => Config::load(&path)?,
                None => Config::default(),
            };
            let params = tiling.overlay(config.tiling);
            let mut style = config.style;
            style.show_dual |= dual;
            generate(&params, size, &style, &drag, &spin, &output)?;
        }
        Commands::Info { tiling, json } => {
            show_info(&tiling.overlay(TilingParams::default()), json)?;
        }
    }

    Ok(())
}

fn build(params: &TilingParams, size: f64) -> Result<Tessellation> {
    if !size.is_finite() || size <= 0.0 {
        anyhow::bail!("canvas size must be positive, got {size}");
    }
    params.validate()?;

    let half = size / 2.0;
    let mut tess = Tessellation::new(Circle::new(Point2::new(half, half), half));
    tess.tessellate_with(params)?;
    Ok(tess)
}

fn generate(
    params: &TilingParams,
    size: f64,
    style: &RenderStyle,
    drags: &[(f64, f64)],
    spins: &[f64],
    output: &Path,
) -> Result<()> {
    let mut tess = build(params, size)?;

    let center = tess.disk().center;
    for &(dx, dy) in drags {
        debug!(dx, dy, "drag");
        tess.move_by(Point2::new(center.x + dx, center.y + dy), center);
    }
    for &dy in spins {
        debug!(dy, "spin");
        tess.rotate_by(Point2::new(center.x, center.y + dy), center);
    }

    if output.as_os_str() == "-" {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        write_svg(&tess, style, &mut lock)?;
        lock.flush()?;
    } else {
        let file = fs::File::create(output)
            .with_context(|| format!("failed to create {}", output.display()))?;
        let mut writer = io::BufWriter::new(file);
        write_svg(&tess, style, &mut writer)?;
        writer.flush()?;
        info!(path = %output.display(), polygons = tess.polygon_count(), "wrote svg");
    }
    Ok(())
}

fn show_info(params: &TilingParams, json: bool) -> Result<()> {
    let tess = build(params, 2.0)?;
    print!("{}", format_info(params, &tess.stats(), json)?);
    Ok(())
}

fn format_info(params: &TilingParams, stats: &TessellationStats, json: bool) -> Result<String> {
    if json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(stats)?));
    }

    let mut out = String::new();
    writeln!(out, "{{{},{}}} tiling, {} levels", params.p, params.q, params.max_level)?;
    writeln!(out, "  Vertices: {}", stats.points)?;
    writeln!(out, "  Polygons: {}", stats.polygons)?;
    writeln!(out, "  Edges: {}", stats.edges)?;
    writeln!(out, "  Dual edges: {}", stats.dual_edges)?;
    writeln!(out, "  Deepest level: {}", stats.max_level)?;
    Ok(out)
}
