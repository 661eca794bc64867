//! # spacefilling_cam
//!
//! An image-based space-filling curve.  A turtle walks a serpentine path over
//! a 320×240 input image and draws each step in the colour under it; the
//! result is scaled to fit the window.
//!
//! The input is a still image (`--image`) or, without one, a generated test
//! pattern.
//!
//! ## Keys
//!
//! | Key | Action |
//! |---|---|
//! | `t` | Toggle path transparency |
//! | `Space` | Swap between the path and the input image |
//! | `d` | Show the path and toggle the input image under it |
//! | `c` | Toggle square stroke caps |
//! | `f` | Toggle fat strokes |
//! | `-` | Coarser path |
//! | `+` | Finer path |

pub mod display;
pub mod sketch;
pub mod source;

pub use display::Display;
pub use sketch::{CamSketch, Config};

/// Open a window and run the sketch over `image` until it closes.
pub fn run(cfg: Config, image: image::RgbImage) -> Result<(), sketch_canvas::CanvasError> {
    tracing::info!(step = cfg.step, "starting spacefilling_cam");
    let mut window = sketch_canvas::SketchWindow::new("Space Filling Cam", cfg.width, cfg.height)?;
    let mut sketch = CamSketch::new(&cfg, image);
    sketch_canvas::run(&mut window, &mut sketch)
}
