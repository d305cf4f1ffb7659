//! # Delve Main Entry Point
//!
//! Generates a dungeon and runs the turn loop headlessly: key tokens are
//! read from stdin one per line, and after every completed turn the map and
//! recent messages are printed to stdout. Logs go to stderr.

use clap::Parser;
use delve::{
    parse_key_token, render_frame, DelveConfig, DelveResult, Engine, GenerationConfig, Generator,
    InputEvent, MessagePanel, RoomCorridorGenerator, TextDisplay, TurnOutcome,
};
use log::{info, warn};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Command line arguments for Delve.
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(about = "A turn-based dungeon crawler driven by key names on stdin")]
#[command(version)]
struct Args {
    /// Random seed for dungeon generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Field-of-view radius in cells
    #[arg(long)]
    fov_radius: Option<u32>,

    /// Number of room placement attempts
    #[arg(long)]
    max_rooms: Option<u32>,

    /// Map width in tiles
    #[arg(long)]
    map_width: Option<u32>,

    /// Map height in tiles
    #[arg(long)]
    map_height: Option<u32>,

    /// Log filter (error, warn, info, debug, trace, or env_logger syntax)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Color output with ANSI escapes
    #[arg(long)]
    color: bool,

    /// Do not print frames
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    /// Builds the effective configuration: file values, then CLI overrides.
    fn resolve_config(&self) -> DelveResult<DelveConfig> {
        let mut config = match &self.config {
            Some(path) => DelveConfig::load(path)?,
            None => DelveConfig::default(),
        };

        let generation: &mut GenerationConfig = &mut config.generation;
        if let Some(seed) = self.seed {
            generation.seed = seed;
        }
        if let Some(max_rooms) = self.max_rooms {
            generation.max_rooms = max_rooms;
        }
        if let Some(width) = self.map_width {
            generation.map_width = width;
        }
        if let Some(height) = self.map_height {
            generation.map_height = height;
        }
        if let Some(radius) = self.fov_radius {
            config.engine.fov_radius = radius;
        }

        if config.generation.max_rooms == 0 {
            warn!("max_rooms is 0; no room can be placed");
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> DelveResult<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .parse_filters(&args.log_level)
        .target(env_logger::Target::Stderr)
        .init();

    info!("Starting Delve v{}", delve::VERSION);

    let config = args.resolve_config()?;
    run(&args, config)
}

/// Generates the dungeon and drives the engine from stdin.
fn run(args: &Args, config: DelveConfig) -> DelveResult<()> {
    info!("Generating dungeon with seed: {}", config.generation.seed);

    let generator = RoomCorridorGenerator::new();
    let mut rng = delve::generation::utils::create_rng(&config.generation);
    let dungeon = generator.generate(&config.generation, &mut rng)?;

    let mut engine = Engine::new(dungeon, config.engine)?;
    let display = if args.color {
        TextDisplay::with_color()
    } else {
        TextDisplay::new()
    };
    let panel = MessagePanel::new(5, config.generation.map_width as usize);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if !args.quiet {
        write!(out, "{}", render_frame(&engine, &display, &panel))?;
        out.flush()?;
    }

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match engine.handle_event(&parse_key_token(&line))? {
            TurnOutcome::Quit => {
                info!("Goodbye after {} turns", engine.turn_number());
                return Ok(());
            }
            TurnOutcome::Ignored => {}
            TurnOutcome::Completed => {
                if !args.quiet {
                    writeln!(out)?;
                    write!(out, "{}", render_frame(&engine, &display, &panel))?;
                    out.flush()?;
                }
            }
        }
    }

    // end of input closes the session like a window close
    engine.handle_event(&InputEvent::Quit)?;
    info!("Input closed after {} turns", engine.turn_number());
    Ok(())
}
