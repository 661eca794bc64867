//! The space-filling sketch: a turtle walks a serpentine path over the input
//! image and draws every step in the colour under its start.

use image::RgbImage;
use sketch_canvas::{Canvas, Input, Rgba, Sketch, StrokeCap, StrokeStyle};
use sketch_core::{serpentine_path, Step, Turtle, TransformStack};

use crate::display::Display;

pub const DEFAULT_STEP: f64 = 16.0;
pub const MIN_STEP: f64 = 4.0;
pub const MAX_STEP: f64 = 32.0;

/// Opacity of the debug image drawn under the path.
const DEBUG_ALPHA: u8 = 127;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub width:  usize,
    pub height: usize,
    /// Path step in image pixels, clamped to `MIN_STEP..=MAX_STEP`.
    pub step:   f64,
    /// Walked instead of the serpentine scan when set.
    pub path:   Option<Vec<Step>>,
}

impl Default for Config {
    fn default() -> Self {
        Config { width: 1024, height: 768, step: DEFAULT_STEP, path: None }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// CamSketch
// ════════════════════════════════════════════════════════════════════════════

pub struct CamSketch {
    image:   RgbImage,
    path:    Vec<Step>,
    custom:  Option<Vec<Step>>,
    turtle:  Turtle,
    m:       TransformStack,
    display: Display,

    step:    f64,
    opacity: u8,
    show:    bool,
    debug:   bool,
    corners: bool,
    fat:     bool,

    strokes: usize,
}

impl CamSketch {
    pub fn new(cfg: &Config, image: RgbImage) -> Self {
        let step = cfg.step.clamp(MIN_STEP, MAX_STEP);
        if step != cfg.step {
            tracing::warn!(requested = cfg.step, step, "step clamped");
        }
        let mut sketch = CamSketch {
            image,
            path: Vec::new(),
            custom: cfg.path.clone(),
            turtle: Turtle::new(step),
            m: TransformStack::new(),
            display: Display::fit(0.0, 0.0, 0.0, 0.0),
            step,
            opacity: 255,
            show: true,
            debug: false,
            corners: false,
            fat: false,
            strokes: 0,
        };
        sketch.update_display(cfg.width, cfg.height);
        sketch
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn opacity(&self) -> u8 {
        self.opacity
    }

    pub fn display(&self) -> Display {
        self.display
    }

    pub fn path(&self) -> &[Step] {
        &self.path
    }

    /// `(show, debug)`
    pub fn visibility(&self) -> (bool, bool) {
        (self.show, self.debug)
    }

    /// Strokes drawn in the last frame.
    pub fn strokes(&self) -> usize {
        self.strokes
    }

    fn update_display(&mut self, width: usize, height: usize) {
        let (iw, ih) = self.image.dimensions();
        self.display = Display::fit(width as f64, height as f64, iw as f64, ih as f64);
        self.rebuild_path();
    }

    fn rebuild_path(&mut self) {
        let (iw, ih) = self.image.dimensions();
        self.path = match &self.custom {
            Some(steps) => steps.clone(),
            None => serpentine_path(iw, ih, self.step),
        };
        self.turtle.set_step(self.step);
        tracing::debug!(step = self.step, steps = self.path.len(), "path rebuilt");
    }

    fn set_step(&mut self, step: f64) {
        if step != self.step {
            self.step = step;
            self.rebuild_path();
        }
        tracing::info!(step = self.step, "path step");
    }

    pub fn handle_key(&mut self, key: char) {
        match key {
            // flip the top bit of the opacity
            't' => {
                self.opacity ^= 128;
                tracing::info!(opacity = self.opacity, "path opacity");
            }
            ' ' => {
                self.show = !self.show;
                self.debug = !self.show;
                tracing::info!(show = self.show, debug = self.debug, "view toggled");
            }
            'd' => {
                self.show = true;
                self.debug = !self.debug;
                tracing::info!(debug = self.debug, "debug overlay");
            }
            'c' => {
                self.corners = !self.corners;
                tracing::info!(corners = self.corners, "stroke caps");
            }
            'f' => {
                self.fat = !self.fat;
                tracing::info!(fat = self.fat, "fat strokes");
            }
            '-' => self.set_step((self.step * 2.0).min(MAX_STEP)),
            '+' => self.set_step((self.step / 2.0).max(MIN_STEP)),
            _ => {}
        }
    }

    /// Stroke style for one sampled colour.  Weights are in image pixels and
    /// scale with the zoom.
    fn style(&self, color: Rgba) -> StrokeStyle {
        let weight = if self.fat { self.step / 2.0 } else { 1.0 };
        let cap = if self.corners { StrokeCap::Project } else { StrokeCap::Round };
        StrokeStyle::new(color, weight * self.display.zoom).cap(cap)
    }
}

impl Sketch for CamSketch {
    fn draw(&mut self, canvas: &mut Canvas, _input: &Input) {
        canvas.background(Rgba::BLACK);

        self.m.reset();
        self.m.push();

        // scale to fit
        self.m.translate(self.display.tx, self.display.ty);
        self.m.scale_uniform(self.display.zoom);
        let t = self.m.get();

        if self.debug {
            canvas.image(t, &self.image, DEBUG_ALPHA);
        }

        let mut strokes = 0;
        if self.show {
            let half = self.step / 2.0;
            let base = self.style(Rgba::BLACK);
            let opacity = self.opacity;
            self.turtle.reset(half, half);
            self.turtle.walk(&self.path, &self.image, |s| {
                let style = StrokeStyle { color: Rgba::from(s.color).with_alpha(opacity), ..base };
                canvas.line(t, s.from, s.to, style);
                strokes += 1;
            });
        }
        self.strokes = strokes;

        if let Err(e) = self.m.pop() {
            tracing::warn!(error = %e, "path drawing");
        }
    }

    fn key_typed(&mut self, key: char, _input: &Input) {
        self.handle_key(key);
    }

    fn resized(&mut self, width: usize, height: usize) {
        self.update_display(width, height);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::test_pattern;
    use sketch_core::ColorGrid;

    const BLACK: u32 = 0xFF000000;

    // 320×240 image shown 1:1 at (16, 16)
    fn sketch() -> (CamSketch, Canvas) {
        let cfg = Config { width: 352, height: 272, ..Config::default() };
        (CamSketch::new(&cfg, test_pattern()), Canvas::new(352, 272))
    }

    fn frame(s: &mut CamSketch, canvas: &mut Canvas) {
        s.draw(canvas, &Input::default());
    }

    #[test]
    fn walks_whole_path_each_frame() {
        let (mut s, mut canvas) = sketch();
        frame(&mut s, &mut canvas);
        // 15 rows of 19 forwards, 14 row changes
        assert_eq!(s.strokes(), 15 * 19 + 14);
        frame(&mut s, &mut canvas);
        assert_eq!(s.strokes(), 15 * 19 + 14);
        assert_eq!(s.m.depth(), 0);
    }

    #[test]
    fn first_stroke_takes_colour_under_its_start() {
        let (mut s, mut canvas) = sketch();
        frame(&mut s, &mut canvas);
        // local (8, 8) → (24, 8) is screen (24, 24) → (40, 24)
        let expect = Rgba::from(test_pattern().pixel(8, 8)).to_argb();
        assert_eq!(canvas.pixel(30, 24), Some(expect));
        assert_eq!(canvas.pixel(30, 27), Some(BLACK));
    }

    #[test]
    fn fat_strokes_are_half_a_step_wide() {
        let (mut s, mut canvas) = sketch();
        s.handle_key('f');
        frame(&mut s, &mut canvas);
        assert_ne!(canvas.pixel(30, 27), Some(BLACK));
        assert_eq!(canvas.pixel(30, 29), Some(BLACK));
    }

    #[test]
    fn step_keys_rebuild_and_clamp() {
        let (mut s, _) = sketch();
        s.handle_key('-');
        assert_eq!(s.step(), 32.0);
        // 7 rows of 9, 6 row changes
        assert_eq!(s.path().len(), 7 * 9 + 6 * 3);
        s.handle_key('-');
        assert_eq!(s.step(), 32.0);

        for _ in 0..5 {
            s.handle_key('+');
        }
        assert_eq!(s.step(), 4.0);
        assert_eq!(s.path(), serpentine_path(320, 240, 4.0).as_slice());
    }

    #[test]
    fn view_toggles() {
        let (mut s, mut canvas) = sketch();
        s.handle_key(' ');
        assert_eq!(s.visibility(), (false, true));
        frame(&mut s, &mut canvas);
        assert_eq!(s.strokes(), 0);
        // debug image visible, border still black
        assert_ne!(canvas.pixel(100, 100), Some(BLACK));
        assert_eq!(canvas.pixel(5, 5), Some(BLACK));

        s.handle_key(' ');
        assert_eq!(s.visibility(), (true, false));
        s.handle_key('d');
        assert_eq!(s.visibility(), (true, true));
        s.handle_key('d');
        assert_eq!(s.visibility(), (true, false));
    }

    #[test]
    fn opacity_flips_top_bit() {
        let (mut s, mut canvas) = sketch();
        s.handle_key('t');
        assert_eq!(s.opacity(), 127);
        frame(&mut s, &mut canvas);
        let full = Rgba::from(test_pattern().pixel(8, 8)).to_argb();
        assert_ne!(canvas.pixel(30, 24), Some(full));
        s.handle_key('t');
        assert_eq!(s.opacity(), 255);
    }

    #[test]
    fn resize_refits() {
        let (mut s, _) = sketch();
        s.resized(672, 1000);
        let d = s.display();
        assert_eq!((d.zoom, d.tx, d.ty), (2.0, 16.0, 260.0));
    }

    #[test]
    fn out_of_range_step_is_clamped() {
        let cfg = Config { width: 352, height: 272, step: 100.0, path: None };
        let s = CamSketch::new(&cfg, test_pattern());
        assert_eq!(s.step(), MAX_STEP);
    }

    #[test]
    fn custom_path_replaces_scan_and_keeps_step_length() {
        let cfg = Config {
            width: 352,
            height: 272,
            path: Some(sketch_core::parse_path("ff r f").unwrap()),
            ..Config::default()
        };
        let mut s = CamSketch::new(&cfg, test_pattern());
        let mut canvas = Canvas::new(352, 272);
        frame(&mut s, &mut canvas);
        assert_eq!(s.strokes(), 3);

        s.handle_key('-');
        assert_eq!(s.path().len(), 4);
        assert_eq!(s.turtle.step(), 32.0);
    }
}
