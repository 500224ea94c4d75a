//! Axis-aligned rectangles and screen-space helpers
//!
//! Screen coordinates: origin top-left, X grows right, Y grows down.
//! A [`Rect`] is stored as center + half extents since every entity moves by
//! its center.

use glam::Vec2;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Rect {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half_extents: size * 0.5,
        }
    }

    /// The visible screen, `(0, 0)` to `(width, height)`
    pub fn screen(width: f32, height: f32) -> Self {
        Self::from_center(Vec2::new(width, height) * 0.5, Vec2::new(width, height))
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.half_extents.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.half_extents.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.half_extents.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.half_extents.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.half_extents.x * 2.0
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.half_extents.y * 2.0
    }

    /// Strict overlap test; rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// True once the box lies entirely outside `area` on any side
    pub fn fully_outside(&self, area: &Rect) -> bool {
        self.right() < area.left()
            || self.left() > area.right()
            || self.bottom() < area.top()
            || self.top() > area.bottom()
    }
}

/// Half extents of the axis-aligned box around a `size` rectangle rotated by
/// `angle_deg`
pub fn rotated_half_extents(size: Vec2, angle_deg: f32) -> Vec2 {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    Vec2::new(size.x * cos + size.y * sin, size.x * sin + size.y * cos) * 0.5
}

/// Horizontal wrap: a box fully past one side re-enters flush with the other.
///
/// Returns the corrected center x.
pub fn wrap_horizontal(bounds: &Rect, screen: &Rect) -> f32 {
    if bounds.left() > screen.right() {
        screen.left() - bounds.half_extents.x
    } else if bounds.right() < screen.left() {
        screen.right() + bounds.half_extents.x
    } else {
        bounds.center.x
    }
}

/// Vertical counterpart of [`wrap_horizontal`]
pub fn wrap_vertical(bounds: &Rect, screen: &Rect) -> f32 {
    if bounds.top() > screen.bottom() {
        screen.top() - bounds.half_extents.y
    } else if bounds.bottom() < screen.top() {
        screen.bottom() + bounds.half_extents.y
    } else {
        bounds.center.y
    }
}

/// Circle-circle overlap (touching is not a hit)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    a.distance_squared(b) < reach * reach
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = Rect::from_center(Vec2::new(10.0, 20.0), Vec2::new(4.0, 10.0));
        assert_eq!(r.left(), 8.0);
        assert_eq!(r.right(), 12.0);
        assert_eq!(r.top(), 15.0);
        assert_eq!(r.bottom(), 25.0);
        assert_eq!(r.width(), 4.0);
        assert_eq!(r.height(), 10.0);
    }

    #[test]
    fn test_intersects_is_strict() {
        let a = Rect::from_center(Vec2::new(0.0, 0.0), Vec2::splat(10.0));
        let overlapping = Rect::from_center(Vec2::new(9.0, 0.0), Vec2::splat(10.0));
        let touching = Rect::from_center(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        assert!(a.intersects(&overlapping));
        assert!(!a.intersects(&touching));
    }

    #[test]
    fn test_fully_outside() {
        let screen = Rect::screen(100.0, 100.0);
        let touching_edge = Rect::from_center(Vec2::new(-2.0, 50.0), Vec2::splat(4.0));
        let gone = Rect::from_center(Vec2::new(-2.1, 50.0), Vec2::splat(4.0));
        assert!(!touching_edge.fully_outside(&screen));
        assert!(gone.fully_outside(&screen));
    }

    #[test]
    fn test_rotated_half_extents() {
        let size = Vec2::new(4.0, 10.0);
        let upright = rotated_half_extents(size, 0.0);
        assert!((upright - Vec2::new(2.0, 5.0)).length() < 1e-5);

        let sideways = rotated_half_extents(size, 90.0);
        assert!((sideways - Vec2::new(5.0, 2.0)).length() < 1e-5);

        // A square at 45 degrees grows by sqrt(2)
        let diamond = rotated_half_extents(Vec2::splat(20.0), 45.0);
        assert!((diamond.x - 10.0 * std::f32::consts::SQRT_2).abs() < 1e-4);
    }

    #[test]
    fn test_wrap_horizontal() {
        let screen = Rect::screen(100.0, 50.0);

        let off_left = Rect::from_center(Vec2::new(-6.0, 10.0), Vec2::splat(10.0));
        let x = wrap_horizontal(&off_left, &screen);
        assert_eq!(x - 5.0, 100.0, "left edge lands on the right screen edge");

        let off_right = Rect::from_center(Vec2::new(106.0, 10.0), Vec2::splat(10.0));
        let x = wrap_horizontal(&off_right, &screen);
        assert_eq!(x + 5.0, 0.0, "right edge lands on the left screen edge");

        let partly_visible = Rect::from_center(Vec2::new(-4.0, 10.0), Vec2::splat(10.0));
        assert_eq!(wrap_horizontal(&partly_visible, &screen), -4.0);
    }

    #[test]
    fn test_wrap_vertical() {
        let screen = Rect::screen(100.0, 50.0);
        let below = Rect::from_center(Vec2::new(10.0, 56.0), Vec2::splat(10.0));
        assert_eq!(wrap_vertical(&below, &screen), -5.0);
        let above = Rect::from_center(Vec2::new(10.0, -6.0), Vec2::splat(10.0));
        assert_eq!(wrap_vertical(&above, &screen), 55.0);
    }

    #[test]
    fn test_circles_overlap() {
        assert!(circles_overlap(Vec2::ZERO, 5.0, Vec2::new(9.0, 0.0), 5.0));
        assert!(!circles_overlap(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0));
        assert!(circles_overlap(Vec2::ZERO, 5.0, Vec2::new(0.0, -9.9), 5.0));
    }
}
