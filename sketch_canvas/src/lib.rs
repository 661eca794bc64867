//! # sketch_canvas
//!
//! A small software canvas for the sketches, plus the `minifb` window that
//! shows it.
//!
//! Shapes are drawn through a [`kurbo::Affine`] that maps local coordinates to
//! the screen, normally the current transform of a
//! [`sketch_core::TransformStack`].  Pixels live in a packed `0xAARRGGBB`
//! buffer that `minifb` can present directly.
//!
//! A sketch implements [`Sketch`] and hands itself to [`run`], which drives
//! the per-frame `draw` callback, typed-key and resize events at ~60 fps.

pub mod app;
pub mod canvas;
pub mod color;
pub mod font;
pub mod window;

pub use app::{run, Input, Sketch};
pub use canvas::{Align, Canvas, StrokeCap, StrokeStyle};
pub use color::Rgba;
pub use window::{CanvasError, SketchWindow};
