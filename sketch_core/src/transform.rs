//! Scoped 2D affine transform with screen back-projection.
//!
//! [`TransformStack`] mirrors the push/pop transform state of a drawing
//! context.  Every rotate/translate/scale is post-multiplied into the current
//! transform, so operations compose in the order they are issued: the last
//! call is applied to local coordinates first.
//!
//! Because the stack owns the transform, a sketch can ask where a local point
//! ends up on screen ([`TransformStack::screen_x`], [`TransformStack::screen_y`])
//! and then draw screen-aligned content there after escaping to the root
//! frame with [`TransformStack::set`].

use kurbo::{Affine, Point};

use crate::error::TransformError;

// ════════════════════════════════════════════════════════════════════════════
// Angles
// ════════════════════════════════════════════════════════════════════════════

/// How [`TransformStack::rotate`] interprets its argument.
///
/// The mode belongs to the stack instance and is not saved by `push`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AngleMode {
    #[default]
    Radians,
    Degrees,
}

/// An angle with its unit attached, for callers that don't want to depend on
/// the stack's mode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Angle {
    Radians(f64),
    Degrees(f64),
}

impl Angle {
    pub fn to_radians(self) -> f64 {
        match self {
            Angle::Radians(r) => r,
            Angle::Degrees(d) => d.to_radians(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// TransformStack
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, Default)]
pub struct TransformStack {
    current: Affine,
    saved:   Vec<Affine>,
    mode:    AngleMode,
}

impl TransformStack {
    /// Identity transform, nothing saved, angles in radians.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn angle_mode(&mut self, mode: AngleMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> AngleMode {
        self.mode
    }

    /// Rotate about the local origin.  `angle` is read in the current
    /// [`AngleMode`].
    pub fn rotate(&mut self, angle: f64) {
        let angle = match self.mode {
            AngleMode::Radians => Angle::Radians(angle),
            AngleMode::Degrees => Angle::Degrees(angle),
        };
        self.rotate_by(angle);
    }

    /// Rotate by an angle whose unit is explicit.
    pub fn rotate_by(&mut self, angle: Angle) {
        self.apply(Affine::rotate(angle.to_radians()));
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.apply(Affine::translate((dx, dy)));
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.apply(Affine::scale_non_uniform(sx, sy));
    }

    pub fn scale_uniform(&mut self, s: f64) {
        self.apply(Affine::scale(s));
    }

    /// Post-multiply an arbitrary local transform.
    pub fn apply(&mut self, local: Affine) {
        self.current = self.current * local;
    }

    /// Save a snapshot of the current transform.
    pub fn push(&mut self) {
        self.saved.push(self.current);
    }

    /// Restore the most recent snapshot and return it.
    pub fn pop(&mut self) -> Result<Affine, TransformError> {
        let restored = self.saved.pop().ok_or(TransformError::StackUnderflow)?;
        self.current = restored;
        Ok(restored)
    }

    /// Number of snapshots currently saved.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// The current transform.
    pub fn get(&self) -> Affine {
        self.current
    }

    /// Replace the current transform; `None` means identity.  Saved snapshots
    /// are left alone, so a surrounding `push`/`pop` still restores the local
    /// frame afterwards.
    pub fn set(&mut self, transform: Option<Affine>) {
        self.current = transform.unwrap_or(Affine::IDENTITY);
    }

    /// Identity transform and no saved snapshots.  The angle mode is kept.
    pub fn reset(&mut self) {
        self.current = Affine::IDENTITY;
        self.saved.clear();
    }

    /// Root-space x of the local point `(x, y)`.
    pub fn screen_x(&self, x: f64, y: f64) -> f64 {
        let [a, _, c, _, e, _] = self.current.as_coeffs();
        a * x + c * y + e
    }

    /// Root-space y of the local point `(x, y)`.
    pub fn screen_y(&self, x: f64, y: f64) -> f64 {
        let [_, b, _, d, _, f] = self.current.as_coeffs();
        b * x + d * y + f
    }

    /// Root-space position of the local point `(x, y)`.
    pub fn screen(&self, x: f64, y: f64) -> Point {
        Point::new(self.screen_x(x, y), self.screen_y(x, y))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn starts_at_identity() {
        let m = TransformStack::new();
        assert_eq!(m.get(), Affine::IDENTITY);
        assert_eq!(m.depth(), 0);
        assert_eq!(m.mode(), AngleMode::Radians);
    }

    #[test]
    fn degrees_are_converted() {
        let mut deg = TransformStack::new();
        deg.angle_mode(AngleMode::Degrees);
        deg.rotate(90.0);

        let mut rad = TransformStack::new();
        rad.rotate(std::f64::consts::FRAC_PI_2);

        assert!(close(deg.screen_x(1.0, 0.0), rad.screen_x(1.0, 0.0)));
        assert!(close(deg.screen_y(1.0, 0.0), 1.0));
    }

    #[test]
    fn explicit_unit_ignores_mode() {
        let mut m = TransformStack::new();
        m.angle_mode(AngleMode::Degrees);
        m.rotate_by(Angle::Radians(std::f64::consts::PI));
        assert!(close(m.screen_x(1.0, 0.0), -1.0));
    }

    #[test]
    fn mode_survives_pop() {
        let mut m = TransformStack::new();
        m.push();
        m.angle_mode(AngleMode::Degrees);
        m.pop().unwrap();
        assert_eq!(m.mode(), AngleMode::Degrees);
    }

    #[test]
    fn pop_on_empty_stack_is_an_error() {
        let mut m = TransformStack::new();
        m.translate(3.0, 4.0);
        assert_eq!(m.pop(), Err(TransformError::StackUnderflow));
        assert!(close(m.screen_x(0.0, 0.0), 3.0));
    }

    #[test]
    fn push_saves_by_value() {
        let mut m = TransformStack::new();
        m.translate(5.0, 0.0);
        m.push();
        m.scale(2.0, 2.0);
        m.rotate(1.0);
        let restored = m.pop().unwrap();
        assert_eq!(restored, Affine::translate((5.0, 0.0)));
        assert_eq!(m.get(), restored);
    }

    #[test]
    fn set_none_escapes_to_root_inside_scope() {
        let mut m = TransformStack::new();
        m.translate(100.0, 50.0);
        m.rotate(0.3);
        let local = m.get();

        m.push();
        m.set(None);
        assert_eq!(m.get(), Affine::IDENTITY);
        m.pop().unwrap();

        assert_eq!(m.get(), local);
    }

    #[test]
    fn set_some_replaces_wholesale() {
        let mut m = TransformStack::new();
        m.rotate(2.0);
        let target = Affine::translate((1.0, 2.0)) * Affine::scale(3.0);
        m.set(Some(target));
        assert_eq!(m.get(), target);
    }

    #[test]
    fn scale_then_translate_scales_the_offset() {
        let mut m = TransformStack::new();
        m.scale(2.0, 3.0);
        m.translate(1.0, 1.0);
        let p = m.screen(0.0, 0.0);
        assert!(close(p.x, 2.0) && close(p.y, 3.0));
    }

    #[test]
    fn reset_clears_stack_but_not_mode() {
        let mut m = TransformStack::new();
        m.angle_mode(AngleMode::Degrees);
        m.push();
        m.push();
        m.translate(1.0, 1.0);
        m.reset();
        assert_eq!(m.depth(), 0);
        assert_eq!(m.get(), Affine::IDENTITY);
        assert_eq!(m.mode(), AngleMode::Degrees);
    }
}
