//! Pointer-driven tilt for the hero card
//!
//! Pointer position inside the card maps linearly to two rotation targets;
//! scroll position maps to a bounded, repeating vertical drift. All three
//! are smoothed through springs before being rendered as a CSS transform.

use glam::Vec2;

use crate::consts::*;
use crate::{clamp01, wrap_positive};

use super::spring::Spring;

/// Map a pointer position within a box of `size` to rotation targets
/// (degrees). Center of the box yields (0, 0); corners yield the extremes.
pub fn rotation_for_pointer(local: Vec2, size: Vec2) -> (f32, f32) {
    if size.x <= 0.0 || size.y <= 0.0 {
        return (0.0, 0.0);
    }
    let px = clamp01(local.x / size.x);
    let py = clamp01(local.y / size.y);
    let rotate_x = (0.5 - py) * TILT_MAX_X_DEG;
    let rotate_y = (px - 0.5) * TILT_MAX_Y_DEG;
    (rotate_x, rotate_y)
}

/// Map a scroll position to the drift offset (px). Periodic in
/// `DRIFT_PERIOD_PX`, so the drift stays bounded no matter how far the page
/// scrolls.
pub fn drift_for_scroll(scroll_y: f32) -> f32 {
    wrap_positive(scroll_y, DRIFT_PERIOD_PX) / DRIFT_SCALE
}

/// Smoothed tilt state for one card element
#[derive(Debug, Clone)]
pub struct TiltState {
    rotate_x: Spring,
    rotate_y: Spring,
    offset_y: Spring,
    target_x: f32,
    target_y: f32,
    target_offset: f32,
}

impl Default for TiltState {
    fn default() -> Self {
        Self::new()
    }
}

impl TiltState {
    pub fn new() -> Self {
        Self {
            rotate_x: Spring::new(TILT_STIFFNESS, TILT_DAMPING),
            rotate_y: Spring::new(TILT_STIFFNESS, TILT_DAMPING),
            offset_y: Spring::new(TILT_STIFFNESS, TILT_DAMPING),
            target_x: 0.0,
            target_y: 0.0,
            target_offset: 0.0,
        }
    }

    /// Pointer moved to `local` within a card of `size`
    pub fn pointer_moved(&mut self, local: Vec2, size: Vec2) {
        let (rx, ry) = rotation_for_pointer(local, size);
        self.target_x = rx;
        self.target_y = ry;
    }

    /// Pointer left the card: both rotations return to rest
    pub fn pointer_left(&mut self) {
        self.target_x = 0.0;
        self.target_y = 0.0;
    }

    /// Page scrolled to `scroll_y`
    pub fn scrolled(&mut self, scroll_y: f32) {
        self.target_offset = drift_for_scroll(scroll_y);
    }

    /// Current rotation targets (degrees), before smoothing
    pub fn targets(&self) -> (f32, f32) {
        (self.target_x, self.target_y)
    }

    /// Advance the springs by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        self.rotate_x.step(self.target_x, dt);
        self.rotate_y.step(self.target_y, dt);
        self.offset_y.step(self.target_offset, dt);
    }

    /// Current smoothed (rotate_x, rotate_y, offset_y)
    pub fn current(&self) -> (f32, f32, f32) {
        (
            self.rotate_x.value(),
            self.rotate_y.value(),
            self.offset_y.value(),
        )
    }

    /// True once the card has come to rest at its targets
    pub fn settled(&self) -> bool {
        const EPS: f32 = 0.005;
        self.rotate_x.settled(self.target_x, EPS)
            && self.rotate_y.settled(self.target_y, EPS)
            && self.offset_y.settled(self.target_offset, EPS)
    }

    /// CSS transform string for the card element
    pub fn css_transform(&self) -> String {
        let (rx, ry, ty) = self.current();
        format!(
            "perspective({TILT_PERSPECTIVE_PX}px) rotateX({rx:.3}deg) rotateY({ry:.3}deg) translateY({ty:.3}px)"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: Vec2 = Vec2::new(420.0, 260.0);

    #[test]
    fn test_center_yields_zero_rotation() {
        let (rx, ry) = rotation_for_pointer(Vec2::new(210.0, 130.0), SIZE);
        assert_eq!(rx, 0.0);
        assert_eq!(ry, 0.0);
    }

    #[test]
    fn test_corners_yield_extremes() {
        // Top-left: pointer above center tilts the card back (+x), left of
        // center tilts it left (-y)
        let (rx, ry) = rotation_for_pointer(Vec2::ZERO, SIZE);
        assert!((rx - TILT_MAX_X_DEG / 2.0).abs() < 1e-4);
        assert!((ry + TILT_MAX_Y_DEG / 2.0).abs() < 1e-4);

        // Bottom-right is the mirror image
        let (rx, ry) = rotation_for_pointer(SIZE, SIZE);
        assert!((rx + TILT_MAX_X_DEG / 2.0).abs() < 1e-4);
        assert!((ry - TILT_MAX_Y_DEG / 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_pointer_outside_box_is_clamped() {
        let (rx, ry) = rotation_for_pointer(Vec2::new(-50.0, 9999.0), SIZE);
        assert!((rx + TILT_MAX_X_DEG / 2.0).abs() < 1e-4);
        assert!((ry + TILT_MAX_Y_DEG / 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_box() {
        let (rx, ry) = rotation_for_pointer(Vec2::new(10.0, 10.0), Vec2::ZERO);
        assert_eq!((rx, ry), (0.0, 0.0));
    }

    #[test]
    fn test_pointer_leave_resets_targets() {
        let mut tilt = TiltState::new();
        tilt.pointer_moved(Vec2::new(400.0, 20.0), SIZE);
        let (tx, ty) = tilt.targets();
        assert!(tx != 0.0 && ty != 0.0);

        tilt.pointer_left();
        assert_eq!(tilt.targets(), (0.0, 0.0));

        // And the smoothed values follow back to rest
        for _ in 0..240 {
            tilt.step(1.0 / 60.0);
        }
        assert!(tilt.settled());
        let (rx, ry, _) = tilt.current();
        assert!(rx.abs() < 0.01 && ry.abs() < 0.01);
    }

    #[test]
    fn test_drift_is_periodic_and_bounded() {
        assert_eq!(drift_for_scroll(0.0), 0.0);
        assert_eq!(drift_for_scroll(50.0), 5.0);
        // One full period later the drift repeats
        assert_eq!(drift_for_scroll(50.0), drift_for_scroll(250.0));
        // Bounded regardless of scroll depth
        for y in [0.0_f32, 123.0, 1999.0, 100_000.0] {
            let d = drift_for_scroll(y);
            assert!((0.0..DRIFT_PERIOD_PX / DRIFT_SCALE).contains(&d));
        }
    }

    #[test]
    fn test_css_transform_shape() {
        let mut tilt = TiltState::new();
        tilt.scrolled(50.0);
        for _ in 0..240 {
            tilt.step(1.0 / 60.0);
        }
        let css = tilt.css_transform();
        assert!(css.starts_with("perspective(1200px)"));
        assert!(css.contains("rotateX(0.000deg)"));
        assert!(css.contains("translateY(5.000px)"));
    }
}
