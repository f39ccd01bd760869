//! lumen CLI - trace optical scenes from the command line
//!
//! Loads a declarative scene description (JSON), runs the ray tracer,
//! and emits the traced polylines with per-segment colors as JSON for a
//! downstream renderer.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lumen_scene::{SceneDoc, World};
use lumen_trace::TraceStats;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lumen")]
#[command(about = "2D geometric optics ray tracer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Trace a scene and emit ray polylines as JSON
    Trace {
        /// Path to a scene .json file
        scene: PathBuf,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Display information about a scene file
    Info {
        /// Path to a scene .json file
        scene: PathBuf,
    },
}

/// One traced ray in renderer-facing form.
#[derive(Serialize)]
struct TracedRay {
    /// Ordered polyline vertices as `[x, y]` pairs.
    path: Vec<[f64; 2]>,
    /// Per-segment RGBA colors (intensity in alpha), one per segment.
    colors: Vec<lumen_trace::Color>,
    /// Secondary-ray generation index; 0 for primaries.
    generation: usize,
}

#[derive(Serialize)]
struct TraceOutput {
    rays: Vec<TracedRay>,
    stats: TraceStats,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Trace { scene, output } => {
            let mut world = load_world(&scene)?;
            world.tick();

            let out = TraceOutput {
                rays: world
                    .rays()
                    .iter()
                    .map(|ray| TracedRay {
                        path: ray.path().iter().map(|p| [p.x, p.y]).collect(),
                        colors: ray.segment_colors().to_vec(),
                        generation: ray.generation(),
                    })
                    .collect(),
                stats: world.stats(),
            };
            let json = serde_json::to_string_pretty(&out)?;

            match output {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    log::info!("wrote trace to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        Commands::Info { scene } => {
            let mut world = load_world(&scene)?;
            let stats = world.tick().stats;
            println!("elements:    {}", world.element_count());
            println!("sources:     {}", world.source_count());
            println!("rays traced: {}", stats.ray_count);
            println!("bounces:     {}", stats.total_bounces);
            println!("generations: {}", stats.generations);
        }
    }

    Ok(())
}

fn load_world(path: &PathBuf) -> Result<World> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let doc = SceneDoc::from_json(&json)
        .with_context(|| format!("failed to parse scene {}", path.display()))?;
    let world = World::from_doc(&doc).context("failed to build scene")?;
    Ok(world)
}
