//! spacefilling_cam: interactive entry point.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use spacefilling_cam::sketch::DEFAULT_STEP;
use spacefilling_cam::{source, Config};

#[derive(Parser, Debug)]
#[command(name = "spacefilling_cam", version, about = "Draw an image as a space-filling curve")]
struct Args {
    /// Window width in pixels.
    #[arg(long, default_value_t = 1024)]
    width: usize,

    /// Window height in pixels.
    #[arg(long, default_value_t = 768)]
    height: usize,

    /// Input image; a test pattern is used when omitted.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Path step in image pixels (4 to 32).
    #[arg(long, default_value_t = DEFAULT_STEP)]
    step: f64,

    /// Walk this command string (`f`, `l`, `r`) instead of the serpentine
    /// scan, e.g. "ffrfrff".
    #[arg(long)]
    path: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let image = match &args.image {
        Some(path) => source::load_image(path)
            .with_context(|| format!("failed to load image {}", path.display()))?,
        None => {
            tracing::info!("no --image given, using the test pattern");
            source::test_pattern()
        }
    };

    let path = args
        .path
        .as_deref()
        .map(sketch_core::parse_path)
        .transpose()
        .context("invalid --path")?;

    let cfg = Config { width: args.width, height: args.height, step: args.step, path };
    spacefilling_cam::run(cfg, image).context("spacefilling_cam failed")
}
