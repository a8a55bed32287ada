//! Rectangle and line segment primitives
//!
//! These are plain values. Bodies derive them from their current
//! position and size whenever they are needed.

use crate::Vec2;

/// An axis-aligned rectangle with its origin at the top-left corner
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    /// Create a new rectangle from its top-left corner and size
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Create a rectangle centered at a point
    #[inline]
    pub fn from_center(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Get the center of the rectangle
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Translate the rectangle by a delta
    pub fn translated(&self, delta: Vec2) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.w, self.h)
    }

    /// The four edges as segments
    pub fn edges(&self) -> RectEdges {
        RectEdges {
            left: Segment::new(Vec2::new(self.x, self.y), Vec2::new(self.x, self.bottom())),
            right: Segment::new(
                Vec2::new(self.right(), self.y),
                Vec2::new(self.right(), self.bottom()),
            ),
            top: Segment::new(Vec2::new(self.x, self.y), Vec2::new(self.right(), self.y)),
            bottom: Segment::new(
                Vec2::new(self.x, self.bottom()),
                Vec2::new(self.right(), self.bottom()),
            ),
        }
    }

    /// The corners as a polygon, wound top-left, bottom-left, bottom-right, top-right
    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.x, self.y),
            Vec2::new(self.x, self.bottom()),
            Vec2::new(self.right(), self.bottom()),
            Vec2::new(self.right(), self.y),
        ]
    }
}

/// The edges of a [`Rect`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectEdges {
    pub left: Segment,
    pub right: Segment,
    pub top: Segment,
    pub bottom: Segment,
}

impl RectEdges {
    /// Iterate over the edges in left, right, top, bottom order
    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        [&self.left, &self.right, &self.top, &self.bottom].into_iter()
    }
}

/// A line segment between two endpoints
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

impl Segment {
    /// Create a segment between two points
    #[inline]
    pub const fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    /// Create a segment from raw coordinates
    #[inline]
    pub const fn from_coords(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::new(Vec2::new(x1, y1), Vec2::new(x2, y2))
    }

    /// Translate both endpoints by a delta
    pub fn translated(&self, delta: Vec2) -> Self {
        Self::new(self.a + delta, self.b + delta)
    }

    /// Segment length
    pub fn length(&self) -> f32 {
        self.a.distance(self.b)
    }
}
