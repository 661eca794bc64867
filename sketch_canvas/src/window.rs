//! `minifb` window that presents a [`Canvas`].

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use kurbo::Point;
use minifb::{InputCallback, MouseButton, MouseMode, Window, WindowOptions};

use crate::canvas::Canvas;

#[derive(thiserror::Error, Debug)]
pub enum CanvasError {
    #[error("failed to open window: {0}")]
    Window(String),

    #[error("failed to present frame: {0}")]
    Present(String),
}

/// Forwards typed characters from the window's input callback.
struct CharForwarder {
    tx: Sender<char>,
}

impl InputCallback for CharForwarder {
    fn add_char(&mut self, uni_char: u32) {
        if let Some(c) = char::from_u32(uni_char) {
            let _ = self.tx.send(c);
        }
    }
}

pub struct SketchWindow {
    window: Window,
    canvas: Canvas,
    typed:  Receiver<char>,
}

impl SketchWindow {
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, CanvasError> {
        let mut window = Window::new(
            title,
            width,
            height,
            WindowOptions {
                resize: true,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| CanvasError::Window(e.to_string()))?;

        window.limit_update_rate(Some(Duration::from_millis(16))); // ~60fps

        let (tx, typed) = mpsc::channel();
        window.set_input_callback(Box::new(CharForwarder { tx }));

        tracing::info!(title, width, height, "window opened");

        Ok(SketchWindow {
            window,
            canvas: Canvas::new(width, height),
            typed,
        })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    /// Match the canvas to the window's current size.  Returns the new size
    /// when it changed.
    pub fn sync_size(&mut self) -> Option<(usize, usize)> {
        let (w, h) = self.window.get_size();
        if w == 0 || h == 0 || (w, h) == (self.canvas.width(), self.canvas.height()) {
            return None;
        }
        self.canvas.resize(w, h);
        Some((w, h))
    }

    /// Mouse position in canvas pixels, clamped to the window.
    pub fn mouse(&self) -> Option<Point> {
        self.window
            .get_mouse_pos(MouseMode::Clamp)
            .map(|(x, y)| Point::new(x as f64, y as f64))
    }

    pub fn mouse_pressed(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    /// Characters typed since the last call.
    pub fn typed_keys(&self) -> Vec<char> {
        self.typed.try_iter().collect()
    }

    pub fn present(&mut self) -> Result<(), CanvasError> {
        let (w, h) = (self.canvas.width(), self.canvas.height());
        self.window
            .update_with_buffer(self.canvas.buffer(), w, h)
            .map_err(|e| CanvasError::Present(e.to_string()))
    }
}
