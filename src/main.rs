use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rivergen::config::Params;
use rivergen::export::{self, Progress, Silent, Spinner};
use rivergen::render;

/// Generate a random river channel with depth and current fields.
#[derive(Parser)]
#[command(name = "rivergen")]
struct Cli {
    /// Number of straight/arc segments making up the river
    #[arg(short, long)]
    segments: Option<usize>,

    /// Spread of the deepest point around its meander
    #[arg(short, long)]
    variance: Option<f64>,

    /// Maximum current velocity [m/s]
    #[arg(long)]
    velocity: Option<f64>,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// JSON file with parameter overrides
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Parent folder for timestamped runs
    #[arg(short, long, default_value = "gen")]
    out_dir: PathBuf,

    /// Skip depth.png and speed.png
    #[arg(long)]
    no_preview: bool,

    /// No progress spinner
    #[arg(short, long)]
    quiet: bool,
}

fn save_png(path: PathBuf, preview: Option<(Vec<u8>, usize, usize)>) -> Result<()> {
    let Some((rgba, w, h)) = preview else {
        return Ok(());
    };
    image::save_buffer(&path, &rgba, w as u32, h as u32, image::ColorType::Rgba8)
        .with_context(|| format!("failed to save {}", path.display()))?;
    info!("saved {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut params = match &cli.config {
        Some(path) => Params::from_json_file(path)
            .with_context(|| format!("failed to read config {}", path.display()))?,
        None => Params::default(),
    };
    if let Some(n) = cli.segments {
        params.segments = n;
    }
    if let Some(v) = cli.variance {
        params.depth_variance = v;
    }
    if let Some(v) = cli.velocity {
        params.max_velocity = v;
    }

    info!(
        seed = cli.seed,
        segments = params.segments,
        variance = params.depth_variance,
        velocity = params.max_velocity,
        "generating river"
    );

    let (river, timings) = rivergen::generate(cli.seed, &params)?;
    let assembled = river.assemble()?;

    for t in &timings {
        info!("  {:20} {:8.1} ms", t.name, t.ms);
    }

    let dir = export::create_run_dir(&cli.out_dir, &export::timestamp_name())
        .context("failed to create output folder")?;

    let mut progress: Box<dyn Progress> = if cli.quiet {
        Box::new(Silent)
    } else {
        Box::new(Spinner::default())
    };
    export::write_run(&dir, &assembled, &river.segments, progress.as_mut())?;

    if !cli.no_preview {
        save_png(dir.join("depth.png"), render::render_depth(&river.depth, params.max_depth))?;
        save_png(dir.join("speed.png"), render::render_speed(&river.currents, params.max_velocity))?;
    }

    info!(points = assembled.len(), "wrote {}", dir.display());
    println!("{}", dir.display());
    Ok(())
}
