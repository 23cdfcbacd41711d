//! Geometry kernel: rotation matrices, boxes and oriented boxes
//!
//! Angles in this module are radians. Actors store degrees and convert at the
//! call site.

use glam::{Mat2, Vec2};
use serde::{Deserialize, Serialize};

/// Standard 2x2 counter-clockwise rotation (clockwise on a y-down screen)
#[inline]
pub fn rotation(angle: f32) -> Mat2 {
    let (sin, cos) = angle.sin_cos();
    Mat2::from_cols(Vec2::new(cos, sin), Vec2::new(-sin, cos))
}

/// Rotate a point about the origin
#[inline]
pub fn rotate(point: Vec2, angle: f32) -> Vec2 {
    rotation(angle) * point
}

/// Map a nose-up sprite-local offset into world space around `center`.
///
/// Sprites are authored pointing up while facings are measured from +x, so the
/// rotation applied is always `facing + 90°`.
#[inline]
pub fn sprite_to_world(center: Vec2, facing_deg: f32, local: Vec2) -> Vec2 {
    center + rotate(local, (facing_deg + 90.0).to_radians())
}

/// Axis-aligned rectangle, top-left origin, y down
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// True when the rectangle has no area (sprites without a hit box)
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn translated(&self, by: Vec2) -> Self {
        Self::new(self.x + by.x, self.y + by.y, self.width, self.height)
    }

    /// Point-in-box test, strictly inside all four edges.
    /// Points on an edge do not count, so an empty rectangle never contains anything.
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        self.left() < point.x && point.x < self.right() && self.top() < point.y && point.y < self.bottom()
    }

    /// Inclusive containment of another rectangle (used for metadata validation)
    pub fn encloses(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.right() <= self.right()
            && other.top() >= self.top()
            && other.bottom() <= self.bottom()
    }
}

/// The four corners of a rectangle rotated about its own center
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotatedRect {
    pub top_left: Vec2,
    pub top_right: Vec2,
    pub bottom_left: Vec2,
    pub bottom_right: Vec2,
}

impl RotatedRect {
    pub fn new(rect: &Rect, angle: f32) -> Self {
        let center = rect.center();
        let m = rotation(angle);
        let corner = |x: f32, y: f32| center + m * (Vec2::new(x, y) - center);
        Self {
            top_left: corner(rect.left(), rect.top()),
            top_right: corner(rect.right(), rect.top()),
            bottom_left: corner(rect.left(), rect.bottom()),
            bottom_right: corner(rect.right(), rect.bottom()),
        }
    }

    pub fn translated(&self, by: Vec2) -> Self {
        Self {
            top_left: self.top_left + by,
            top_right: self.top_right + by,
            bottom_left: self.bottom_left + by,
            bottom_right: self.bottom_right + by,
        }
    }

    pub fn corners(&self) -> [Vec2; 4] {
        [self.top_left, self.top_right, self.bottom_left, self.bottom_right]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_rotation_quarter_turn() {
        assert!(approx(rotate(Vec2::X, FRAC_PI_2), Vec2::Y));
        assert!(approx(rotate(Vec2::Y, FRAC_PI_2), -Vec2::X));
    }

    #[test]
    fn test_rotation_identity_and_half_turn() {
        let p = Vec2::new(3.0, -2.0);
        assert!(approx(rotate(p, 0.0), p));
        assert!(approx(rotate(p, PI), -p));
    }

    #[test]
    fn test_sprite_to_world_nose_up_convention() {
        // Nose is at local (0, -1). Facing 0° (east) must put it to the east.
        let nose = sprite_to_world(Vec2::new(10.0, 10.0), 0.0, Vec2::new(0.0, -1.0));
        assert!(approx(nose, Vec2::new(11.0, 10.0)));
        // Facing 90° (down on screen) puts it below.
        let nose = sprite_to_world(Vec2::ZERO, 90.0, Vec2::new(0.0, -1.0));
        assert!(approx(nose, Vec2::new(0.0, 1.0)));
    }

    #[test]
    fn test_rect_contains_is_strict() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Vec2::new(5.0, 5.0)));
        assert!(!r.contains(Vec2::new(0.0, 5.0)));
        assert!(!r.contains(Vec2::new(5.0, 10.0)));
        assert!(!r.contains(Vec2::new(11.0, 5.0)));
    }

    #[test]
    fn test_empty_rect_contains_nothing() {
        let r = Rect::default();
        assert!(r.is_empty());
        assert!(!r.contains(Vec2::ZERO));
    }

    #[test]
    fn test_rotated_rect_quarter_turn_swaps_extent() {
        let rect = Rect::new(0.0, 0.0, 20.0, 10.0);
        let rotated = RotatedRect::new(&rect, FRAC_PI_2);
        // Center stays put, width and height trade places
        let xs = rotated.corners().map(|c| c.x);
        let ys = rotated.corners().map(|c| c.y);
        let span = |v: [f32; 4]| v.iter().cloned().fold(f32::MIN, f32::max) - v.iter().cloned().fold(f32::MAX, f32::min);
        assert!((span(xs) - 10.0).abs() < 1e-4);
        assert!((span(ys) - 20.0).abs() < 1e-4);
        let mid = rotated.corners().iter().copied().sum::<Vec2>() / 4.0;
        assert!(approx(mid, rect.center()));
    }

    #[test]
    fn test_rotated_rect_translate() {
        let rotated = RotatedRect::new(&Rect::new(0.0, 0.0, 2.0, 2.0), 0.0).translated(Vec2::new(5.0, 1.0));
        assert!(approx(rotated.top_left, Vec2::new(5.0, 1.0)));
        assert!(approx(rotated.bottom_right, Vec2::new(7.0, 3.0)));
    }
}
