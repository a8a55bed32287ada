//! Visibility seam between the core and whatever draws it

use plat2d_math::{Rect, Vec2};

/// What the camera currently shows
///
/// Enemies off screen skip their update entirely, and weapon rays stop when
/// they leave the view.
pub trait Viewport {
    /// True if any part of `rect` is visible, edges included
    fn sees(&self, rect: &Rect) -> bool;

    /// True if `point` is visible
    fn contains(&self, point: Vec2) -> bool;
}

/// A viewport that sees everything
///
/// Weapon rays are still capped by their configured maximum length.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unbounded;

impl Viewport for Unbounded {
    fn sees(&self, _rect: &Rect) -> bool {
        true
    }

    fn contains(&self, _point: Vec2) -> bool {
        true
    }
}

/// A rectangular camera view in world coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewRect(pub Rect);

impl ViewRect {
    /// View of `w` by `h` centered on `focus`
    pub fn centered(focus: Vec2, w: f32, h: f32) -> Self {
        Self(Rect::from_center(focus, w, h))
    }
}

impl Viewport for ViewRect {
    fn sees(&self, rect: &Rect) -> bool {
        rect.right() >= self.0.left()
            && rect.bottom() >= self.0.top()
            && rect.left() <= self.0.right()
            && rect.top() <= self.0.bottom()
    }

    fn contains(&self, point: Vec2) -> bool {
        point.x >= self.0.left()
            && point.x <= self.0.right()
            && point.y >= self.0.top()
            && point.y <= self.0.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbounded_sees_everything() {
        assert!(Unbounded.sees(&Rect::new(1e6, 1e6, 1.0, 1.0)));
        assert!(Unbounded.contains(Vec2::new(-1e6, 0.0)));
    }

    #[test]
    fn test_view_rect() {
        let view = ViewRect::centered(Vec2::new(100.0, 100.0), 200.0, 100.0);
        assert!(view.sees(&Rect::new(190.0, 90.0, 20.0, 20.0)));
        assert!(!view.sees(&Rect::new(200.5, 90.0, 20.0, 20.0)));
    }

    #[test]
    fn test_view_rect_sees_touching_edges() {
        let view = ViewRect::centered(Vec2::new(100.0, 100.0), 200.0, 100.0);
        // x in [0, 200], y in [50, 150]
        assert!(view.sees(&Rect::new(200.0, 90.0, 20.0, 20.0)));
        assert!(view.sees(&Rect::new(-20.0, 90.0, 20.0, 20.0)));
        assert!(view.sees(&Rect::new(90.0, 150.0, 20.0, 20.0)));
        assert!(view.sees(&Rect::new(90.0, 30.0, 20.0, 20.0)));
        assert!(!view.sees(&Rect::new(90.0, 150.5, 20.0, 20.0)));
    }

    #[test]
    fn test_view_rect_contains_border() {
        let view = ViewRect::centered(Vec2::new(100.0, 100.0), 200.0, 100.0);
        // Point test includes the border
        assert!(view.contains(Vec2::new(0.0, 50.0)));
        assert!(!view.contains(Vec2::new(200.5, 100.0)));
    }
}
