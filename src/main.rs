// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "camera-coordinator")]
#[command(about = "Gesture, popup and capture coordination for a camera screen")]
#[command(version = camera_coordinator::constants::app_info::version())]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drive a scripted session against the virtual camera
    Simulate {
        /// Fail the first capture with this backend message
        #[arg(long)]
        fail_capture: Option<String>,

        /// Capture latency of the virtual camera in milliseconds
        #[arg(long, default_value = "120")]
        latency_ms: u64,

        /// Config file to use instead of the user config
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the snapshot after every step as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration
    Config {
        /// Write the defaults to the user config path
        #[arg(long)]
        write_default: bool,
    },

    /// Print the logical zoom mapping for a device range
    MapZoom {
        #[arg(long, default_value = "1.0")]
        min: f64,

        #[arg(long, default_value = "2.0")]
        neutral: f64,

        #[arg(long, default_value = "16.0")]
        max: f64,

        /// Number of rows in the table
        #[arg(short, long, default_value = "16")]
        steps: usize,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=camera_coordinator=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            fail_capture,
            latency_ms,
            config,
            json,
        } => cli::simulate(fail_capture, latency_ms, config, json),
        Commands::Config { write_default } => cli::print_config(write_default),
        Commands::MapZoom {
            min,
            neutral,
            max,
            steps,
        } => cli::map_zoom(min, neutral, max, steps),
    }
}
