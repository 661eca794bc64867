//! # sketch_core
//!
//! The small pieces of logic the sketches share:
//!
//! * [`CurveRecorder`]: a bounded, multi-track history of per-frame points.
//!   Each animation tick opens a frame, writes any number of tracks, and
//!   commits the whole frame at once.  Replaying a track yields one entry per
//!   frame, with `None` marking frames where the track was not observed.
//! * [`TransformStack`]: the current 2D affine transform with push/pop
//!   scoping and `screen_x` / `screen_y` back-projection into root space.
//! * [`Turtle`]: walks a command path (`f l r u d`) and emits coloured
//!   strokes sampled from a [`ColorGrid`].
//!
//! ## Quick start
//!
//! ```rust
//! use sketch_core::{CurveRecorder, Point3, TransformStack, AngleMode};
//!
//! let mut rec = CurveRecorder::new();
//! rec.begin_record().unwrap();
//! rec.add_point(Point3::new(10.0, 20.0, 0.0), 0).unwrap();
//! rec.end_record().unwrap();
//! assert_eq!(rec.curve(0), vec![Some(Point3::new(10.0, 20.0, 0.0))]);
//!
//! let mut m = TransformStack::new();
//! m.angle_mode(AngleMode::Degrees);
//! m.translate(10.0, 0.0);
//! m.rotate(90.0);
//! assert!((m.screen_x(0.0, 0.0) - 10.0).abs() < 1e-9);
//! ```

pub mod error;
pub mod recorder;
pub mod transform;
pub mod turtle;

pub use error::{PathError, RecordError, TransformError};
pub use recorder::{CurveRecorder, Frame, Point3, DEFAULT_CAPACITY};
pub use transform::{Angle, AngleMode, TransformStack};
pub use turtle::{
    parse_path, serpentine_path, ColorGrid, Rgb, Step, Stroke, TestPattern, Turtle,
};

// Re-exported so downstream crates agree on one affine type.
pub use kurbo::{Affine, Point};
