//! Tether reel simulation CLI.
//!
//! Provides three modes of operation:
//! - `run`: Simulate the drop-catch scene headless and print reel statistics
//! - `config`: Print the default configuration as TOML
//! - `info`: Print the spool geometry a configuration implies

mod scenario;

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use clap::{Parser, Subcommand};
use rapier2d::na::Point2;
use tether_core::prelude::*;
use tether_physics::prelude::*;

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

/// Motorized tether reel simulation.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the drop-catch scene and print reel statistics.
    Run {
        /// TOML configuration file (defaults to the drop-catch tuning).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of frames to simulate.
        #[arg(short, long, default_value_t = 600)]
        ticks: u64,

        /// Write every reel step to this JSON file.
        #[arg(short, long)]
        record: Option<PathBuf>,
    },

    /// Print the default configuration as TOML.
    Config,

    /// Print spool geometry derived from a configuration.
    Info {
        /// TOML configuration file (defaults to the drop-catch tuning).
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn load_config(path: Option<&Path>) -> Result<TetherConfig, ConfigError> {
    match path {
        Some(path) => TetherConfig::from_file(path),
        None => Ok(scenario::default_config()),
    }
}

// ---------------------------------------------------------------------------
// Mode implementations
// ---------------------------------------------------------------------------

fn run_scene(config: &TetherConfig, ticks: u64, record: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let recorder = record.map(|_| TrajectoryRecorder::new());
    let (mut app, scene) = scenario::build_app(config, recorder.clone())?;
    app.add_plugins(LogPlugin::default());
    app.finish();
    app.cleanup();

    info!(
        "tether: running {ticks} frames at {:.0} Hz on rapier2d",
        config.sim.hz()
    );

    for _ in 0..ticks {
        app.update();
        if app.world().resource::<ReelFault>().is_set() {
            break;
        }
    }

    let world = app.world();
    let stats = world.resource::<ReelStats>();
    let context = world.resource::<RapierContext>();
    let phone = Point2::from(*context.rigid_body_set[scene.phone].translation());

    println!("frames:     {}", stats.ticks);
    match stats.engaged_at {
        Some(tick) => println!("engaged:    frame {tick}"),
        None => println!("engaged:    never"),
    }
    println!("max length: {:.1}", stats.max_used_length);
    println!("peak force: {:.1}", stats.peak_force);
    println!("phone:      ({:.1}, {:.1})", phone.x, phone.y);

    if let (Some(path), Some(recorder)) = (record, recorder) {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &recorder.samples())?;
        println!("recorded {} samples to {}", recorder.len(), path.display());
    }

    if let Some(err) = &world.resource::<ReelFault>().0 {
        return Err(TetherError::from(err.clone()).into());
    }
    Ok(())
}

fn print_config() -> Result<(), Box<dyn Error>> {
    print!("{}", toml::to_string_pretty(&scenario::default_config())?);
    Ok(())
}

fn print_info(config: &TetherConfig) {
    let reel = Reel::new(&config.reel);

    println!("tether v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("spool:");
    println!("  core radius      {:.3}", config.reel.inner_radius());
    println!("  full radius      {:.3}", reel.cur_radius());
    println!("motor:");
    println!("  no-load speed    {:.3} rev/s", config.reel.max_hz());
    println!("  stall line force {:.5}", reel.unloaded_force());
    println!("  no-load line     {:.3} per s", reel.unloaded_speed());
    println!("reactive:");
    println!("  engage distance  {:.1}", config.reactive.engage_distance);
    println!("  force multiplier {:.1}", config.reactive.force_multiplier);
    println!("sim:");
    println!("  rate             {:.1} Hz", config.sim.hz());
    println!("  linear damping   {:.4}", config.sim.linear_damping());
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result: Result<(), Box<dyn Error>> = match cli.command {
        Some(Commands::Run {
            config,
            ticks,
            record,
        }) => load_config(config.as_deref())
            .map_err(Into::into)
            .and_then(|config| run_scene(&config, ticks, record.as_deref())),
        Some(Commands::Config) => print_config(),
        Some(Commands::Info { config }) => load_config(config.as_deref())
            .map(|config| print_info(&config))
            .map_err(Into::into),
        None => run_scene(&scenario::default_config(), 600, None),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
