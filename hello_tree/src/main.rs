//! hello_tree: interactive entry point.

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hello_tree::Config;

#[derive(Parser, Debug)]
#[command(name = "hello_tree", version, about = "Draw a labelled tree with nested transforms")]
struct Args {
    /// Window width in pixels.
    #[arg(long, default_value_t = 1024)]
    width: usize,

    /// Window height in pixels.
    #[arg(long, default_value_t = 768)]
    height: usize,

    /// Angle between sibling branches, in degrees.
    #[arg(long, default_value_t = 30.0)]
    angle: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let cfg = Config { width: args.width, height: args.height, angle: args.angle };

    hello_tree::run(cfg).context("hello_tree failed")
}
