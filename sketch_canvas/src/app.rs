//! Per-frame callback loop shared by every sketch.

use kurbo::Point;

use crate::canvas::Canvas;
use crate::window::{CanvasError, SketchWindow};

/// Input snapshot handed to each callback.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Input {
    /// Last known mouse position in canvas pixels.
    pub mouse:         Point,
    pub mouse_pressed: bool,
    /// Frames drawn so far.
    pub frame_count:   u64,
}

/// A sketch reacts to frames, typed keys and window resizes.
pub trait Sketch {
    /// Draw one frame.
    fn draw(&mut self, canvas: &mut Canvas, input: &Input);

    /// A character was typed.
    fn key_typed(&mut self, _key: char, _input: &Input) {}

    /// The canvas changed size; it has already been cleared.
    fn resized(&mut self, _width: usize, _height: usize) {}
}

/// Run `sketch` until the window closes.
pub fn run<S: Sketch>(window: &mut SketchWindow, sketch: &mut S) -> Result<(), CanvasError> {
    let mut input = Input::default();

    while window.is_open() {
        if let Some((w, h)) = window.sync_size() {
            tracing::debug!(w, h, "canvas resized");
            sketch.resized(w, h);
        }

        if let Some(mouse) = window.mouse() {
            input.mouse = mouse;
        }
        input.mouse_pressed = window.mouse_pressed();

        for key in window.typed_keys() {
            sketch.key_typed(key, &input);
        }

        sketch.draw(window.canvas_mut(), &input);
        window.present()?;
        input.frame_count += 1;
    }

    tracing::info!(frames = input.frame_count, "window closed");
    Ok(())
}
