//! The tree sketch.
//!
//! The tree grows from a root that follows the mouse and points toward it.
//! It is drawn in layers (branches, then joints, then leaves) so leaves sit on
//! top of everything.  Leaf labels are drawn upright by default: the label's
//! local anchor is projected to the screen with `screen_x`/`screen_y`, then
//! drawn with the transform escaped to the root frame.

use sketch_canvas::{Align, Canvas, Input, Rgba, Sketch, StrokeStyle};
use sketch_core::{AngleMode, Point, TransformStack};

use crate::tree::Tree;

const BRANCH:      Rgba = Rgba::rgb(100, 150, 100);
const TWIG:        Rgba = Rgba::rgb(100, 200, 100);
const LEAF_FILL:   Rgba = Rgba::rgb(200, 255, 200);
const LEAF_STROKE: Rgba = Rgba::rgb(100, 255, 100);
/// Translucent white; the previous frames show through as motion blur.
const FADE:        Rgba = Rgba::new(255, 255, 255, 100);

/// Each nesting level is this much shorter than its parent.
const SHRINK: f64 = 0.85;
const LAYERS: usize = 4;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub width:  usize,
    pub height: usize,
    /// Angle between sibling branches, in degrees.
    pub angle:  f64,
}

impl Default for Config {
    fn default() -> Self {
        Config { width: 1024, height: 768, angle: 30.0 }
    }
}

/// Where a leaf label ended up, in screen pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct LeafMark {
    pub label:  String,
    /// Screen position of the leaf centre.
    pub center: Point,
}

// ════════════════════════════════════════════════════════════════════════════
// TreeSketch
// ════════════════════════════════════════════════════════════════════════════

pub struct TreeSketch {
    tree:          Vec<Tree>,
    m:             TransformStack,
    center:        Point,
    angle:         f64,
    text_rotation: bool,
    marks:         Vec<LeafMark>,
}

impl TreeSketch {
    pub fn new(cfg: &Config) -> Self {
        let mut m = TransformStack::new();
        m.angle_mode(AngleMode::Degrees);
        TreeSketch {
            tree: Vec::new(),
            m,
            center: Point::new(cfg.width as f64 / 2.0, cfg.height as f64 / 2.0),
            angle: cfg.angle,
            text_rotation: false,
            marks: Vec::new(),
        }
        .with_tree(Tree::sample())
    }

    pub fn with_tree(mut self, tree: Vec<Tree>) -> Self {
        self.tree = tree;
        tracing::debug!(leaves = self.leaf_count(), depth = self.depth(), "tree loaded");
        self
    }

    /// Leaves in the whole tree; one label is drawn per leaf.
    pub fn leaf_count(&self) -> usize {
        self.tree.iter().map(Tree::leaf_count).sum()
    }

    /// Branch levels below the root.
    pub fn depth(&self) -> usize {
        self.tree.iter().map(Tree::depth).max().unwrap_or(0)
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn text_rotation(&self) -> bool {
        self.text_rotation
    }

    pub fn transform(&self) -> &TransformStack {
        &self.m
    }

    /// Leaves drawn in the last frame.
    pub fn marks(&self) -> &[LeafMark] {
        &self.marks
    }
}

impl Sketch for TreeSketch {
    fn draw(&mut self, canvas: &mut Canvas, input: &Input) {
        let mouse = input.mouse;

        // tree size follows the mouse distance from the root
        let d = mouse.distance(self.center);
        let leaf_size = d / 10.0;

        if input.mouse_pressed {
            self.center = self.center.lerp(mouse, 0.1);
        }

        canvas.background(FADE);

        self.m.reset();
        self.m.push();
        self.m.translate(self.center.x, self.center.y);
        let toward = (mouse.y - self.center.y).atan2(mouse.x - self.center.x).to_degrees();
        self.m.rotate(toward - 90.0);

        let mut painter = Painter {
            m: &mut self.m,
            canvas,
            leaf_size,
            joint_size: leaf_size / 4.0,
            text_size: leaf_size * 0.75,
            text_rotation: self.text_rotation,
            marks: Vec::new(),
        };
        for layer in 0..LAYERS {
            painter.draw_tree(&self.tree, d / 3.0, self.angle, layer);
        }
        self.marks = painter.marks;

        if self.m.pop().is_err() || self.m.depth() != 0 {
            tracing::warn!(depth = self.m.depth(), "unbalanced transform stack");
        }
    }

    /// Any key toggles text rotation.
    fn key_typed(&mut self, _key: char, _input: &Input) {
        self.text_rotation = !self.text_rotation;
        tracing::info!(text_rotation = self.text_rotation, "text rotation toggled");
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Painter: one frame's recursive drawing
// ════════════════════════════════════════════════════════════════════════════

struct Painter<'a> {
    m:             &'a mut TransformStack,
    canvas:        &'a mut Canvas,
    leaf_size:     f64,
    joint_size:    f64,
    text_size:     f64,
    text_rotation: bool,
    marks:         Vec<LeafMark>,
}

impl Painter<'_> {
    fn pop(&mut self) {
        if let Err(e) = self.m.pop() {
            tracing::warn!(error = %e, "tree drawing");
        }
    }

    /// Fan the branches out symmetrically around the local +y axis, `a`
    /// degrees apart, each `d` long.
    fn draw_tree(&mut self, tree: &[Tree], d: f64, a: f64, layer: usize) {
        self.m.push();

        let n = tree.len();
        self.m.rotate(a * n.saturating_sub(1) as f64 / 2.0);

        for branch in tree {
            match branch {
                Tree::Branch(children) => {
                    match layer {
                        0 => self.stem(d, StrokeStyle::new(BRANCH, 2.0)),
                        1 => self.joint(0.0, d),
                        _ => {}
                    }
                    self.m.push();
                    self.m.translate(0.0, d);
                    self.draw_tree(children, d * SHRINK, a, layer);
                    self.pop();
                }
                Tree::Leaf(value) => match layer {
                    0 => self.stem(d, StrokeStyle::new(TWIG, 1.0)),
                    2 => self.leaf(&value.to_string(), 0.0, d),
                    _ => {}
                },
            }
            self.m.rotate(-a);
        }

        self.pop();
    }

    fn stem(&mut self, d: f64, style: StrokeStyle) {
        self.canvas.line(self.m.get(), Point::ORIGIN, Point::new(0.0, d), style);
    }

    fn joint(&mut self, x: f64, y: f64) {
        let s = self.joint_size;
        self.canvas.ellipse(self.m.get(), Point::new(x, y), s, s, Some(BRANCH), None);
    }

    fn leaf(&mut self, label: &str, x: f64, y: f64) {
        let s = self.leaf_size;
        self.canvas.ellipse(
            self.m.get(),
            Point::new(x, y),
            s,
            s,
            Some(LEAF_FILL),
            Some(StrokeStyle::new(LEAF_STROKE, 1.0)),
        );
        self.marks.push(LeafMark { label: label.to_string(), center: self.m.screen(x, y) });
        self.label(label, x, y, -s / 5.0, s / 4.0);
    }

    /// Text at `(x, y)` offset by `(dx, dy)`.  Without text rotation the
    /// offset is applied in screen space so the label stays upright.
    fn label(&mut self, text: &str, x: f64, y: f64, dx: f64, dy: f64) {
        let size = self.text_size;
        if self.text_rotation {
            let t = self.m.get();
            self.canvas.text(t, text, Point::new(x + dx, y + dy), size, Rgba::BLACK, Align::Left);
        } else {
            let x0 = self.m.screen_x(x, y);
            let y0 = self.m.screen_y(x, y);
            self.m.push();
            self.m.set(None);
            let t = self.m.get();
            self.canvas.text(t, text, Point::new(x0 + dx, y0 + dy), size, Rgba::BLACK, Align::Left);
            self.pop();
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
