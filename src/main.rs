//! Tower dungeon generator CLI
//!
//! Generates one dungeon and prints it as ASCII (or summary JSON), with an
//! optional A* path overlay.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

use tower_dungeon::logging::{self, LogLevel, TracingConfig};
use tower_dungeon::visualization::render_with_path;
use tower_dungeon::{load_settings, Dungeon, GenerationSettings, Vertex};

/// Procedural dungeon generator
#[derive(Parser, Debug)]
#[command(name = "tower-dungeon")]
#[command(author, version, about = "Generate a seeded 2D dungeon", long_about = None)]
struct Args {
    /// Settings file (.ron or .json); defaults apply when omitted
    #[arg(short = 's', long = "settings")]
    settings: Option<PathBuf>,

    /// Seed override (0 picks a time-derived seed)
    #[arg(long = "seed")]
    seed: Option<u64>,

    /// Print the summary JSON instead of the ASCII map
    #[arg(long = "json")]
    json: bool,

    /// Overlay the path between two points
    #[arg(
        long = "path",
        num_args = 4,
        value_names = ["SX", "SY", "GX", "GY"],
        allow_negative_numbers = true
    )]
    path: Option<Vec<f32>>,

    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_tracing(&TracingConfig::with_level(LogLevel::from_verbosity(
        args.verbose,
    )));

    let mut settings = match &args.settings {
        Some(path) => load_settings(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => GenerationSettings::default(),
    };
    if let Some(seed) = args.seed {
        settings = settings.with_seed(seed);
    }
    let settings = settings.with_resolved_seed();

    let dungeon = Dungeon::generate(&settings).context("dungeon generation failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&dungeon.summary())?);
        return Ok(());
    }

    let path = match args.path.as_deref() {
        Some(&[sx, sy, gx, gy]) => {
            let path = dungeon.find_path(Vertex::new(sx, sy), Vertex::new(gx, gy));
            if path.is_empty() {
                info!("no path between ({sx}, {sy}) and ({gx}, {gy})");
            }
            path
        }
        Some(other) => bail!("--path expects 4 values, got {}", other.len()),
        None => Vec::new(),
    };

    println!(
        "{}",
        render_with_path(dungeon.grid(), &path, Some(dungeon.spawn()))
    );
    println!();
    println!("seed:        {}", settings.seed);
    println!("rooms:       {}", dungeon.rooms().len());
    println!("connectors:  {}", dungeon.edges().len());
    if !path.is_empty() {
        println!("path steps:  {}", path.len());
    }
    println!("fingerprint: {}", dungeon.fingerprint());
    Ok(())
}
