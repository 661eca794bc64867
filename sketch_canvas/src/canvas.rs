//! Software canvas: a packed ARGB framebuffer with a few shape primitives.
//!
//! Every shape takes the local→screen [`Affine`] to draw through.  Pixel
//! coverage is tested at pixel centres; there is no anti-aliasing.

use kurbo::{Affine, Point, Vec2};

use sketch_core::ColorGrid;

use crate::color::Rgba;
use crate::font;

/// How the ends of a thick line are finished.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StrokeCap {
    /// Half-disc past each endpoint.
    #[default]
    Round,
    /// Square extending half the weight past each endpoint.
    Project,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    pub color:  Rgba,
    pub weight: f64,
    pub cap:    StrokeCap,
}

impl StrokeStyle {
    pub fn new(color: Rgba, weight: f64) -> Self {
        StrokeStyle { color, weight, cap: StrokeCap::Round }
    }

    pub fn cap(self, cap: StrokeCap) -> Self {
        StrokeStyle { cap, ..self }
    }
}

/// Horizontal anchoring of text relative to its position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
}

pub struct Canvas {
    width:  usize,
    height: usize,
    buf:    Vec<u32>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Canvas { width, height, buf: vec![0xFF000000; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn buffer(&self) -> &[u32] {
        &self.buf
    }

    /// Resize, clearing to black.  No-op when the size is unchanged.
    pub fn resize(&mut self, width: usize, height: usize) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.buf = vec![0xFF000000; width * height];
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.buf[y * self.width + x])
    }

    /// Paint the whole canvas.  A translucent colour fades the previous frame
    /// instead of replacing it.
    pub fn background(&mut self, color: Rgba) {
        if color.a == 255 {
            self.buf.fill(color.to_argb());
        } else {
            for px in &mut self.buf {
                *px = color.over(*px);
            }
        }
    }

    /// Blend `color` into one pixel; coordinates outside the canvas are ignored.
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Rgba) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.buf[idx] = color.over(self.buf[idx]);
    }

    // ── Lines ─────────────────────────────────────────────────────────────

    /// Line from `a` to `b` in local coordinates.  The weight is in screen
    /// pixels.
    pub fn line(&mut self, t: Affine, a: Point, b: Point, style: StrokeStyle) {
        let (a, b) = (t * a, t * b);
        if style.weight <= 1.0 {
            self.thin_line(a, b, style.color);
        } else {
            self.thick_line(a, b, style);
        }
    }

    /// Connected segments through `points`, all drawn through `t`.
    pub fn polyline(&mut self, t: Affine, points: &[Point], style: StrokeStyle) {
        if let [single] = points {
            self.line(t, *single, *single, style);
        }
        for pair in points.windows(2) {
            self.line(t, pair[0], pair[1], style);
        }
    }

    fn thin_line(&mut self, a: Point, b: Point, color: Rgba) {
        let d = b - a;
        let steps = d.x.abs().max(d.y.abs()).ceil().max(1.0) as usize;
        let mut last = None;
        for i in 0..=steps {
            let p = a.lerp(b, i as f64 / steps as f64);
            let px = (p.x.floor() as i64, p.y.floor() as i64);
            if last != Some(px) {
                self.blend_pixel(px.0, px.1, color);
                last = Some(px);
            }
        }
    }

    fn thick_line(&mut self, a: Point, b: Point, style: StrokeStyle) {
        let half = style.weight / 2.0;
        let d = b - a;
        let len = d.hypot();
        let dir = if len > 0.0 { d / len } else { Vec2::new(1.0, 0.0) };

        let pad = half * std::f64::consts::SQRT_2 + 1.0;
        let min = Point::new(a.x.min(b.x) - pad, a.y.min(b.y) - pad);
        let max = Point::new(a.x.max(b.x) + pad, a.y.max(b.y) + pad);
        let (x0, x1) = (min.x.floor().max(0.0) as i64, max.x.ceil().min(self.width as f64) as i64);
        let (y0, y1) = (min.y.floor().max(0.0) as i64, max.y.ceil().min(self.height as f64) as i64);

        for py in y0..y1 {
            for px in x0..x1 {
                let c = Point::new(px as f64 + 0.5, py as f64 + 0.5);
                let rel = c - a;
                let along = rel.dot(dir);
                let across = rel.cross(dir).abs();
                let inside = match style.cap {
                    StrokeCap::Project => {
                        along >= -half && along <= len + half && across <= half
                    }
                    StrokeCap::Round => {
                        let t = along.clamp(0.0, len);
                        (c - (a + dir * t)).hypot() <= half
                    }
                };
                if inside {
                    self.blend_pixel(px, py, style.color);
                }
            }
        }
    }

    // ── Ellipses ──────────────────────────────────────────────────────────

    /// Ellipse with diameters `w × h` centred on the local point `center`.
    /// The diameters are scaled by the transform's average scale factor.
    pub fn ellipse(
        &mut self,
        t: Affine,
        center: Point,
        w: f64,
        h: f64,
        fill: Option<Rgba>,
        outline: Option<StrokeStyle>,
    ) {
        let c = t * center;
        let k = t.determinant().abs().sqrt();
        let (rx, ry) = ((w * k / 2.0).abs(), (h * k / 2.0).abs());
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        let ow = outline.map_or(0.0, |o| o.weight.max(1.0));
        let (ox, oy) = (rx + ow / 2.0, ry + ow / 2.0);
        let (ix, iy) = ((rx - ow / 2.0).max(0.0), (ry - ow / 2.0).max(0.0));

        let x0 = (c.x - ox).floor().max(0.0) as i64;
        let x1 = (c.x + ox).ceil().min(self.width as f64) as i64;
        let y0 = (c.y - oy).floor().max(0.0) as i64;
        let y1 = (c.y + oy).ceil().min(self.height as f64) as i64;

        let within = |dx: f64, dy: f64, a: f64, b: f64| {
            a > 0.0 && b > 0.0 && (dx / a).powi(2) + (dy / b).powi(2) <= 1.0
        };

        for py in y0..y1 {
            for px in x0..x1 {
                let dx = px as f64 + 0.5 - c.x;
                let dy = py as f64 + 0.5 - c.y;
                if let Some(o) = outline {
                    if within(dx, dy, ox, oy) && !within(dx, dy, ix, iy) {
                        self.blend_pixel(px, py, o.color);
                        continue;
                    }
                }
                if let Some(f) = fill {
                    if within(dx, dy, rx, ry) {
                        self.blend_pixel(px, py, f);
                    }
                }
            }
        }
    }

    // ── Images ────────────────────────────────────────────────────────────

    /// Draw `grid` with its top-left corner at the local origin, one local
    /// unit per grid pixel, every pixel composited with opacity `alpha`.
    /// Screen pixels are inverse-mapped into the grid (nearest neighbour).
    pub fn image<G: ColorGrid + ?Sized>(&mut self, t: Affine, grid: &G, alpha: u8) {
        let (gw, gh) = (grid.width() as f64, grid.height() as f64);
        if gw == 0.0 || gh == 0.0 || t.determinant() == 0.0 {
            return;
        }
        let bounds = t.transform_rect_bbox(kurbo::Rect::new(0.0, 0.0, gw, gh));
        let x0 = bounds.x0.floor().max(0.0) as i64;
        let x1 = bounds.x1.ceil().min(self.width as f64) as i64;
        let y0 = bounds.y0.floor().max(0.0) as i64;
        let y1 = bounds.y1.ceil().min(self.height as f64) as i64;

        let inv = t.inverse();
        for py in y0..y1 {
            for px in x0..x1 {
                let local = inv * Point::new(px as f64 + 0.5, py as f64 + 0.5);
                if local.x < 0.0 || local.y < 0.0 || local.x >= gw || local.y >= gh {
                    continue;
                }
                let c = grid.pixel(local.x as u32, local.y as u32);
                self.blend_pixel(px, py, Rgba::from(c).with_alpha(alpha));
            }
        }
    }

    // ── Text ──────────────────────────────────────────────────────────────

    /// Bitmap text whose baseline-left (or baseline-centre) sits at the local
    /// point `pos`.  `size` is the cap height in local units; glyphs follow
    /// the transform, so rotated frames give rotated text.
    pub fn text(&mut self, t: Affine, text: &str, pos: Point, size: f64, color: Rgba, align: Align) {
        let cell = (size / font::GLYPH_H as f64).max(0.5);
        let width = font::text_cells(text) as f64 * cell;
        let left = match align {
            Align::Left => pos.x,
            Align::Center => pos.x - width / 2.0,
        };
        let top = pos.y - size;

        // sub-samples per cell so scaled-up glyphs come out solid
        let k = t.determinant().abs().sqrt();
        let n = (cell * k).ceil().max(1.0) as usize;

        for (i, ch) in text.chars().enumerate() {
            let gx = left + (i * font::ADVANCE) as f64 * cell;
            for (col, row) in font::cells(ch) {
                let cx = gx + col as f64 * cell;
                let cy = top + row as f64 * cell;
                for sy in 0..n {
                    for sx in 0..n {
                        let local = Point::new(
                            cx + (sx as f64 + 0.5) * cell / n as f64,
                            cy + (sy as f64 + 0.5) * cell / n as f64,
                        );
                        let p = t * local;
                        self.blend_pixel(p.x.floor() as i64, p.y.floor() as i64, color);
                    }
                }
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
