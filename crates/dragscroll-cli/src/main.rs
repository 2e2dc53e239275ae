use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::task::LocalSet;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dragscroll_core::{AppConfig, EasingType, MouseButton};

mod commands;

#[derive(Parser)]
#[command(name = "dragscroll")]
#[command(author, version, about = "Drag-to-scroll with momentum and rubber-band edges")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Read configuration from this file instead of the default location
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSON pointer trace against a virtual container
    Simulate {
        /// Trace file: a JSON array of {at_ms, kind, ...} entries
        #[arg(short = 't', long)]
        trace: PathBuf,
        /// Content size as WIDTHxHEIGHT
        #[arg(long, value_parser = commands::parse_size)]
        content: Option<(f64, f64)>,
        /// Viewport size as WIDTHxHEIGHT
        #[arg(long, value_parser = commands::parse_size)]
        viewport: Option<(f64, f64)>,
        /// Number of child elements
        #[arg(long)]
        children: Option<usize>,
        /// Enable the rubber-band effect
        #[arg(long)]
        rubber_band: bool,
        /// Button that starts a drag (left, middle, right)
        #[arg(long)]
        button: Option<MouseButton>,
    },
    /// Print the rubber-band displacement curve and the snap-back that follows
    Curve {
        /// Viewport size along the dragged axis
        #[arg(long)]
        size: Option<f64>,
        /// Largest pointer travel past the edge
        #[arg(long)]
        max_delta: Option<f64>,
        /// Travel between rows
        #[arg(long)]
        step: Option<f64>,
        /// Snap-back easing (none, linear, cubic, quintic, ease-out)
        #[arg(long)]
        easing: Option<EasingType>,
    },
    /// Show the effective configuration
    Config {
        /// Print the configuration file path only
        #[arg(long)]
        path: bool,
        /// Write the effective configuration to the default path if none exists
        #[arg(long, conflicts_with = "path")]
        init: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    match cli.command {
        Commands::Simulate {
            trace,
            content,
            viewport,
            children,
            rubber_band,
            button,
        } => {
            let options = commands::simulate::Options {
                trace,
                content,
                viewport,
                children,
                rubber_band,
                button,
            };
            // Controller timers are spawned with spawn_local
            LocalSet::new()
                .run_until(commands::simulate::run(&config, options))
                .await
        }
        Commands::Curve {
            size,
            max_delta,
            step,
            easing,
        } => commands::curve::run(&config, size, max_delta, step, easing),
        Commands::Config { path, init } => commands::config::run(&config, path, init),
    }
}
