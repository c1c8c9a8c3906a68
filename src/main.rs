use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;

use nodeflow::{Command, LayoutConfig, Pipeline, seed};

/// Headless driver: seed a diagram, optionally replay a gesture script,
/// relax the layout for a number of ticks, and print the render snapshot as
/// JSON. Rendering and live input belong to whatever host embeds the core.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Seed diagram as JSON ({"nodes": [...], "links": [...]}); the built-in
    /// sample is used when omitted.
    #[arg(long)]
    seed: Option<PathBuf>,

    /// Gesture script as a JSON array of commands, applied before the ticks.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Number of simulation ticks to run.
    #[arg(long, default_value_t = 300)]
    ticks: u32,

    /// Elapsed time per tick in 60 Hz frames.
    #[arg(long, default_value_t = 1.0)]
    delta: f64,

    /// Viewport height the input/output anchor rows are derived from.
    #[arg(long, default_value_t = 600.0)]
    viewport_height: f64,

    /// Pretty-print the snapshot JSON.
    #[arg(long)]
    pretty: bool,
}

// Delta validation happens here, at the driver boundary; the engine only
// defends against what slips through.
fn validated_delta(delta: f64) -> Result<f64> {
    if !delta.is_finite() || delta <= 0.0 {
        bail!("--delta must be a positive finite number, got {delta}");
    }
    Ok(delta.min(10.0))
}

fn main() -> Result<()> {
    let args = Args::parse();
    let delta = validated_delta(args.delta)?;

    let (nodes, links) = match &args.seed {
        Some(path) => seed::load_seed(path)?,
        None => seed::sample(),
    };

    let mut pipeline = Pipeline::new(
        nodes,
        links,
        LayoutConfig::for_viewport(args.viewport_height),
    );

    if let Some(script_path) = &args.script {
        let raw = fs::read_to_string(script_path)
            .with_context(|| format!("failed to read gesture script {}", script_path.display()))?;
        let commands: Vec<Command> = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse gesture script {}", script_path.display()))?;
        pipeline.apply_all(commands);
    }

    for _ in 0..args.ticks {
        pipeline.tick(delta);
    }

    let snapshot = pipeline.snapshot();
    let rendered = if args.pretty {
        serde_json::to_string_pretty(&snapshot)?
    } else {
        serde_json::to_string(&snapshot)?
    };
    println!("{rendered}");

    Ok(())
}
