//! # hello_tree
//!
//! A nested list drawn as a tree with nested transforms.  The root sits at a
//! movable centre and grows toward the mouse; the mouse distance sets the
//! branch length.  Leaf labels stay upright unless text rotation is on.
//!
//! ## Input
//!
//! | Input | Action |
//! |---|---|
//! | mouse move | Aim and size the tree |
//! | mouse held | Ease the root toward the mouse |
//! | any key | Toggle text rotation |

pub mod sketch;
pub mod tree;

pub use sketch::{Config, LeafMark, TreeSketch};
pub use tree::Tree;

/// Open a window and run the tree sketch until it closes.
pub fn run(cfg: Config) -> Result<(), sketch_canvas::CanvasError> {
    tracing::info!(width = cfg.width, height = cfg.height, angle = cfg.angle, "starting hello_tree");
    let mut window = sketch_canvas::SketchWindow::new("Hello Tree", cfg.width, cfg.height)?;
    let mut sketch = TreeSketch::new(&cfg);
    sketch_canvas::run(&mut window, &mut sketch)
}
