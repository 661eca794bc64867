//! Turtle walker for image-driven line drawings.
//!
//! A path is a sequence of [`Step`]s.  The turtle starts facing +x; `Forward`
//! moves one step length along the heading and, if the pen is down, emits a
//! [`Stroke`] coloured by whatever the [`ColorGrid`] holds under the start of
//! the move.

use std::f64::consts::{FRAC_PI_2, TAU};

use kurbo::Point;

use crate::error::PathError;

// ════════════════════════════════════════════════════════════════════════════
// Colour grids
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }
}

/// Anything the turtle can sample colours from.
pub trait ColorGrid {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Colour of the pixel at integer coordinates inside the grid.
    fn pixel(&self, x: u32, y: u32) -> Rgb;

    /// Colour under the real-valued position `(x, y)`, rounded to the nearest
    /// pixel and clamped to the grid.  Empty grids sample as black.
    fn rgb_at(&self, x: f64, y: f64) -> Rgb {
        let (w, h) = (self.width(), self.height());
        if w == 0 || h == 0 {
            return Rgb::default();
        }
        let clamp = |v: f64, max: u32| -> u32 {
            if v.is_nan() {
                0
            } else {
                v.round().clamp(0.0, (max - 1) as f64) as u32
            }
        };
        self.pixel(clamp(x, w), clamp(y, h))
    }
}

impl ColorGrid for image::RgbImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn pixel(&self, x: u32, y: u32) -> Rgb {
        let image::Rgb([r, g, b]) = *self.get_pixel(x, y);
        Rgb { r, g, b }
    }
}

/// Procedural stand-in for a camera or photo: a diagonal colour sweep with a
/// soft radial highlight.  Deterministic, so it doubles as a test fixture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TestPattern {
    pub width:  u32,
    pub height: u32,
}

impl TestPattern {
    pub fn new(width: u32, height: u32) -> Self {
        TestPattern { width, height }
    }

    /// Render the pattern into an image buffer.
    pub fn to_image(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| {
            let Rgb { r, g, b } = self.pixel(x, y);
            image::Rgb([r, g, b])
        })
    }
}

impl ColorGrid for TestPattern {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel(&self, x: u32, y: u32) -> Rgb {
        let w = self.width.max(1) as f64;
        let h = self.height.max(1) as f64;
        let u = x as f64 / w;
        let v = y as f64 / h;
        let dx = u - 0.5;
        let dy = v - 0.5;
        let glow = (1.0 - (dx * dx + dy * dy).sqrt() * 2.0).max(0.0);
        let to_u8 = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgb {
            r: to_u8(u * 0.8 + glow * 0.2),
            g: to_u8(glow),
            b: to_u8(v * 0.8 + glow * 0.2),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Steps & paths
// ════════════════════════════════════════════════════════════════════════════

/// One turtle command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Forward,
    Left,
    Right,
    PenUp,
    PenDown,
}

impl Step {
    pub fn from_char(c: char) -> Option<Step> {
        match c {
            'f' => Some(Step::Forward),
            'l' => Some(Step::Left),
            'r' => Some(Step::Right),
            'u' => Some(Step::PenUp),
            'd' => Some(Step::PenDown),
            _ => None,
        }
    }
}

/// Parse a command string such as `"ff rfr ff"`.  Whitespace is skipped;
/// error offsets count characters from the start of `s`.
pub fn parse_path(s: &str) -> Result<Vec<Step>, PathError> {
    s.chars()
        .enumerate()
        .filter(|(_, c)| !c.is_whitespace())
        .map(|(offset, c)| Step::from_char(c).ok_or(PathError::UnknownCommand { found: c, offset }))
        .collect()
}

/// Boustrophedon scan covering a `width × height` image in cells of size
/// `step`: each row runs `width / step - 1` forwards, then turns down into the
/// next row (`r f r` after even rows, `l f l` after odd ones).
pub fn serpentine_path(width: u32, height: u32, step: f64) -> Vec<Step> {
    if step <= 0.0 {
        return Vec::new();
    }
    let rows = (height as f64 / step).floor().max(0.0) as usize;
    let cols = (width as f64 / step - 1.0).floor().max(0.0) as usize;

    let mut path = Vec::with_capacity(rows * (cols + 3));
    for row in 0..rows {
        path.extend(std::iter::repeat(Step::Forward).take(cols));
        if row + 1 < rows {
            let turn = if row % 2 == 0 { Step::Right } else { Step::Left };
            path.extend([turn, Step::Forward, turn]);
        }
    }
    path
}

// ════════════════════════════════════════════════════════════════════════════
// Turtle
// ════════════════════════════════════════════════════════════════════════════

/// A pen-down move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub from:  Point,
    pub to:    Point,
    pub color: Rgb,
}

#[derive(Clone, Debug)]
pub struct Turtle {
    pos:      Point,
    dir:      f64,
    turn:     f64,
    step:     f64,
    pen_down: bool,
}

impl Turtle {
    /// A turtle at the origin taking steps of length `step`, turning by a
    /// quarter turn.
    pub fn new(step: f64) -> Self {
        Turtle {
            pos:      Point::ORIGIN,
            dir:      0.0,
            turn:     FRAC_PI_2,
            step,
            pen_down: true,
        }
    }

    /// Move to `(x, y)` (truncated to whole pixels), face +x, pen down.
    pub fn reset(&mut self, x: f64, y: f64) {
        self.pos = Point::new(x.trunc(), y.trunc());
        self.dir = 0.0;
        self.pen_down = true;
    }

    pub fn set_step(&mut self, step: f64) {
        self.step = step;
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn position(&self) -> Point {
        self.pos
    }

    /// Heading in radians, always in `[0, 2π)`.
    pub fn heading(&self) -> f64 {
        self.dir
    }

    pub fn is_pen_down(&self) -> bool {
        self.pen_down
    }

    /// Run every step of `path`, handing each stroke to `sink`.
    pub fn walk<G, F>(&mut self, path: &[Step], grid: &G, mut sink: F)
    where
        G: ColorGrid + ?Sized,
        F: FnMut(Stroke),
    {
        for &step in path {
            if let Some(stroke) = self.cmd(step, grid) {
                sink(stroke);
            }
        }
    }

    /// Execute one step.  Returns the stroke drawn, if any.
    pub fn cmd<G: ColorGrid + ?Sized>(&mut self, step: Step, grid: &G) -> Option<Stroke> {
        match step {
            Step::PenUp => self.pen_down = false,
            Step::PenDown => self.pen_down = true,
            Step::Left => self.dir = (self.dir + TAU - self.turn) % TAU,
            Step::Right => self.dir = (self.dir + self.turn) % TAU,
            Step::Forward => {
                let from = self.pos;
                let to = Point::new(
                    from.x + self.step * self.dir.cos(),
                    from.y + self.step * self.dir.sin(),
                );
                self.pos = to;
                if self.pen_down {
                    return Some(Stroke { from, to, color: grid.rgb_at(from.x, from.y) });
                }
            }
        }
        None
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    struct Solid(Rgb);

    impl ColorGrid for Solid {
        fn width(&self) -> u32 { 4 }
        fn height(&self) -> u32 { 4 }
        fn pixel(&self, _x: u32, _y: u32) -> Rgb { self.0 }
    }

    #[test]
    fn parse_roundtrips_known_commands() {
        let steps = parse_path("flrud").unwrap();
        assert_eq!(
            steps,
            vec![Step::Forward, Step::Left, Step::Right, Step::PenUp, Step::PenDown]
        );
    }

    #[test]
    fn parse_skips_whitespace() {
        assert_eq!(parse_path(" f\tf\nr ").unwrap(), vec![Step::Forward, Step::Forward, Step::Right]);
        assert_eq!(
            parse_path("ff rx"),
            Err(PathError::UnknownCommand { found: 'x', offset: 4 })
        );
    }

    #[test]
    fn parse_reports_offset_of_bad_command() {
        assert_eq!(
            parse_path("ffx"),
            Err(PathError::UnknownCommand { found: 'x', offset: 2 })
        );
    }

    #[test]
    fn serpentine_small_grid() {
        // 64×48 in 16px cells: 3 rows of 3 forwards
        let steps = serpentine_path(64, 48, 16.0);
        assert_eq!(steps, parse_path("fffrfrffflflfff").unwrap());
    }

    #[test]
    fn serpentine_degenerate_sizes() {
        assert!(serpentine_path(64, 8, 16.0).is_empty());
        assert!(serpentine_path(64, 64, 0.0).is_empty());
        // one column wide: only the row changes remain
        assert_eq!(serpentine_path(16, 32, 16.0), parse_path("rfr").unwrap());
    }

    #[test]
    fn serpentine_walk_stays_in_cell_centres() {
        let d = 16.0;
        let grid = TestPattern::new(320, 240);
        let mut t = Turtle::new(d);
        t.reset(d / 2.0, d / 2.0);
        let mut n = 0;
        t.walk(&serpentine_path(320, 240, d), &grid, |s| {
            n += 1;
            assert!(s.to.x > 0.0 && s.to.x < 320.0);
            assert!(s.to.y > 0.0 && s.to.y < 240.0);
        });
        // 15 rows × 19 forwards + 14 connecting forwards
        assert_eq!(n, 15 * 19 + 14);
    }

    #[test]
    fn reset_truncates_and_faces_east() {
        let mut t = Turtle::new(1.0);
        t.cmd(Step::Right, &Solid(Rgb::default()));
        t.cmd(Step::PenUp, &Solid(Rgb::default()));
        t.reset(7.9, 3.2);
        assert_eq!(t.position(), Point::new(7.0, 3.0));
        assert_eq!(t.heading(), 0.0);
        assert!(t.is_pen_down());
    }

    #[test]
    fn turning_wraps_heading() {
        let g = Solid(Rgb::default());
        let mut t = Turtle::new(1.0);
        t.cmd(Step::Left, &g);
        assert!((t.heading() - 3.0 * FRAC_PI_2).abs() < 1e-12);
        for _ in 0..4 {
            t.cmd(Step::Right, &g);
        }
        assert!(t.heading() >= 0.0 && t.heading() < TAU);
    }

    #[test]
    fn forward_samples_start_point() {
        let red = Rgb::new(255, 0, 0);
        let mut t = Turtle::new(10.0);
        let s = t.cmd(Step::Forward, &Solid(red)).unwrap();
        assert_eq!(s.from, Point::ORIGIN);
        assert!((s.to.x - 10.0).abs() < 1e-12);
        assert_eq!(s.color, red);
    }

    #[test]
    fn pen_up_moves_without_drawing() {
        let g = Solid(Rgb::default());
        let mut t = Turtle::new(5.0);
        let mut strokes = Vec::new();
        t.walk(&parse_path("ufdf").unwrap(), &g, |s| strokes.push(s));
        assert_eq!(strokes.len(), 1);
        assert!((strokes[0].from.x - 5.0).abs() < 1e-12);
    }

    #[test]
    fn rgb_at_clamps_outside_grid() {
        let img = TestPattern::new(8, 8).to_image();
        assert_eq!(img.rgb_at(-5.0, -5.0), img.pixel(0, 0));
        assert_eq!(img.rgb_at(100.0, 3.0), img.pixel(7, 3));
        assert_eq!(TestPattern::new(0, 0).rgb_at(1.0, 1.0), Rgb::default());
    }
}
