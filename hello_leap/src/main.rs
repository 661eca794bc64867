//! hello_leap: interactive entry point.

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hello_leap::app::{run, Source};
use hello_leap::session::{Config, MAX_TRAILS};
use sketch_core::DEFAULT_CAPACITY;

#[derive(Parser, Debug)]
#[command(name = "hello_leap", version, about = "Draw and record LeapMotion fingertip trails")]
struct Args {
    /// Window width in pixels.
    #[arg(long, default_value_t = 1024)]
    width: usize,

    /// Window height in pixels.
    #[arg(long, default_value_t = 768)]
    height: usize,

    /// Frames kept in the trail history.
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,

    /// Number of tracks drawn as trails.
    #[arg(long, default_value_t = MAX_TRAILS)]
    trails: usize,

    /// Read a real LeapMotion controller instead of simulating one.
    #[cfg(feature = "leap")]
    #[arg(long)]
    leap: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let cfg = Config {
        width:      args.width,
        height:     args.height,
        capacity:   args.capacity,
        max_trails: args.trails,
    };

    #[cfg(feature = "leap")]
    let source = if args.leap { Source::Leap } else { Source::Simulated };
    #[cfg(not(feature = "leap"))]
    let source = Source::Simulated;

    #[cfg(not(feature = "leap"))]
    tracing::info!("mouse simulation (build with --features leap for hardware)");

    run(cfg, source).context("hello_leap failed")
}
