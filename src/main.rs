//! INKBOTS - CLI Entry Point
//!
//! Autonomous drawing bots with render-then-sense steering.

use clap::{Parser, Subcommand};
use inkbots::bot::SpawnOverrides;
use inkbots::surface::PixelRect;
use inkbots::{Config, World};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "inkbots")]
#[command(version)]
#[command(about = "Autonomous drawing bots: wander, pair and mill policies on a shared canvas")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation and export the canvas
    Run {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,

        /// Steering policy to spawn (wander, pair, mill)
        #[arg(long, default_value = "pair")]
        scenario: String,

        /// Number of spawn groups (a pair group is 2 bots, a mill group is mill.count)
        #[arg(short, long, default_value = "1")]
        groups: usize,

        /// Number of ticks to simulate (0 = run until all ink is spent)
        #[arg(short, long, default_value = "0")]
        steps: u64,

        /// Raster resolution in pixels per world unit
        #[arg(long, default_value = "12.0")]
        scale: f32,

        /// Output directory for the canvas and stats
        #[arg(short, long, default_value = "output")]
        output: PathBuf,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Quiet mode (minimal output)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Generate default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            scenario,
            groups,
            steps,
            scale,
            output,
            seed,
            quiet,
        } => run_simulation(config, scenario, groups, steps, scale, output, seed, quiet),

        Commands::Init { output } => generate_config(output),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_simulation(
    config_path: PathBuf,
    scenario: String,
    groups: usize,
    steps: u64,
    scale: f32,
    output: PathBuf,
    seed: Option<u64>,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Load or create config
    let config = if config_path.exists() {
        println!("Loading config from: {:?}", config_path);
        Config::from_file(&config_path)?
    } else {
        println!("Using default configuration");
        Config::default()
    };

    // RUST_LOG still wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.log_level.as_str()),
    )
    .init();

    std::fs::create_dir_all(&output)?;

    let mut world = if let Some(s) = seed {
        println!("Using seed: {}", s);
        World::new_with_seed(config.clone(), scale, s)
    } else {
        World::new(config.clone(), scale)
    };

    for _ in 0..groups {
        world
            .spawn_by_name(&scenario, &SpawnOverrides::default())
            .ok_or_else(|| format!("unknown policy: {}", scenario))?;
    }

    println!("Starting simulation");
    println!("  Policy: {} x{} group(s), {} bot(s)", scenario, groups, world.bots.len());
    println!(
        "  Canvas: {}x{} px ({}x{} units at {} px/unit)",
        world.surface.width(),
        world.surface.height(),
        config.world.width,
        config.world.height,
        scale
    );
    println!("  Seed: {}", world.seed());
    println!();

    let start = Instant::now();
    let stats_interval = config.logging.stats_interval;
    let mut tick = 0u64;

    // steps == 0 means run until the last bot runs dry
    while (steps == 0 || tick < steps) && world.active() > 0 {
        world.tick();
        tick += 1;

        if !quiet && tick % stats_interval == 0 {
            println!("{}", world.stats.summary());
        }
    }

    let elapsed = start.elapsed();
    let ticks_per_sec = world.time as f64 / elapsed.as_secs_f64();

    println!();
    println!("=== Simulation Complete ===");
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    println!("Ticks: {}", world.time);
    println!("Speed: {:.1} ticks/s", ticks_per_sec);
    println!("Active bots: {}/{}", world.active(), world.bots.len());

    // Export the canvas
    let canvas_path = output.join("canvas.png");
    save_canvas(&world, &canvas_path)?;
    println!("Canvas: {:?}", canvas_path);

    // Save stats history
    let stats_path = output.join("stats_history.json");
    world
        .stats_history
        .save(stats_path.to_str().ok_or("invalid output path")?)?;
    println!("Stats history: {:?}", stats_path);

    Ok(())
}

fn save_canvas(world: &World, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let (w, h) = (world.surface.width(), world.surface.height());
    let rgba = world.surface.sample_region(PixelRect { x: 0, y: 0, w, h });
    let img = image::RgbaImage::from_raw(w, h, rgba).ok_or("canvas buffer size mismatch")?;
    img.save(path)?;
    Ok(())
}

fn generate_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::default();
    config.save(&output)?;
    println!("Default configuration written to: {:?}", output);
    Ok(())
}
