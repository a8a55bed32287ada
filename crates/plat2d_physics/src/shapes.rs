//! Level collider shapes
//!
//! Static geometry a body resolves against. Colliders are built once when a
//! level loads and never change afterwards.

use plat2d_math::{Rect, Segment, Vec2};

use crate::collision::CollisionGroup;

/// A solid rectangle, positioned by its center
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Block {
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
    /// Whether the top edge can be grabbed as a ledge
    pub has_top: bool,
}

impl Block {
    pub fn new(center: Vec2, width: f32, height: f32, has_top: bool) -> Self {
        Self {
            center,
            width,
            height,
            has_top,
        }
    }

    pub fn hit_box(&self) -> Rect {
        Rect::from_center(self.center, self.width, self.height)
    }
}

/// A slope, reduced to the diagonal of its bounding rectangle
///
/// The signs of `width` and `height` pick the diagonal: the hypotenuse runs
/// from `center - size / 2` to `center + size / 2`. When `a.y < b.y` the
/// solid part lies below the line (a floor); otherwise above (a ceiling).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Slope {
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
    /// Kept from the level description; slopes are never grabbed
    pub has_top: bool,
}

impl Slope {
    pub fn new(center: Vec2, width: f32, height: f32, has_top: bool) -> Self {
        Self {
            center,
            width,
            height,
            has_top,
        }
    }

    pub fn hypotenuse(&self) -> Segment {
        let half = Vec2::new(self.width / 2.0, self.height / 2.0);
        Segment::new(self.center - half, self.center + half)
    }

    /// Solid triangle between the hypotenuse and the vertical through `a`
    pub fn area(&self) -> [Vec2; 3] {
        let hypo = self.hypotenuse();
        [hypo.a, Vec2::new(hypo.a.x, hypo.b.y), hypo.b]
    }

    /// True if the solid side lies below the hypotenuse
    pub fn is_floor(&self) -> bool {
        let hypo = self.hypotenuse();
        hypo.a.y < hypo.b.y
    }
}

/// A thin line that only catches bodies falling onto it
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rope {
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Rope {
    pub fn new(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            center,
            width,
            height,
        }
    }

    /// The line bodies land on
    pub fn floor(&self) -> Segment {
        let half = Vec2::new(self.width / 2.0, self.height / 2.0);
        Segment::new(self.center - half, self.center + half)
    }
}

/// A horizontal walkable surface that can be passed from below
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OneWay {
    pub center: Vec2,
    pub width: f32,
}

impl OneWay {
    pub fn new(center: Vec2, width: f32) -> Self {
        Self { center, width }
    }

    pub fn floor(&self) -> Segment {
        let half = self.width / 2.0;
        Segment::from_coords(self.center.x - half, self.center.y, self.center.x + half, self.center.y)
    }
}

/// Any level collider
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Collider {
    Block(Block),
    Slope(Slope),
    Rope(Rope),
    OneWay(OneWay),
}

/// Outline geometry for debug drawing
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outline {
    Rect(Rect),
    Line(Segment),
}

impl Collider {
    /// The group this collider is resolved in
    pub fn group(&self) -> CollisionGroup {
        match self {
            Collider::Block(_) => CollisionGroup::BLOCK,
            Collider::Slope(_) => CollisionGroup::SLOPE,
            Collider::Rope(_) => CollisionGroup::ROPE,
            Collider::OneWay(_) => CollisionGroup::ONE_WAY,
        }
    }

    /// Short name for logs
    pub fn kind_name(&self) -> &'static str {
        match self {
            Collider::Block(_) => "block",
            Collider::Slope(_) => "slope",
            Collider::Rope(_) => "rope",
            Collider::OneWay(_) => "one-way",
        }
    }

    /// Box used for body-stacking checks (blocks only)
    pub fn hit_box(&self) -> Option<Rect> {
        match self {
            Collider::Block(block) => Some(block.hit_box()),
            _ => None,
        }
    }

    /// True if `point` lies inside the collider's solid area
    ///
    /// Ropes and one-way platforms have no area.
    pub fn contains_point(&self, point: Vec2) -> bool {
        let result = match self {
            Collider::Block(block) => plat2d_math::point_in_polygon(point, &block.hit_box().corners()),
            Collider::Slope(slope) => plat2d_math::point_in_polygon(point, &slope.area()),
            Collider::Rope(_) | Collider::OneWay(_) => return false,
        };
        matches!(result, Ok(true))
    }

    /// Geometry to draw for this collider
    pub fn outline(&self) -> Outline {
        match self {
            Collider::Block(block) => Outline::Rect(block.hit_box()),
            Collider::Slope(slope) => Outline::Line(slope.hypotenuse()),
            Collider::Rope(rope) => Outline::Line(rope.floor()),
            Collider::OneWay(one_way) => Outline::Line(one_way.floor()),
        }
    }
}

impl From<Block> for Collider {
    fn from(block: Block) -> Self {
        Collider::Block(block)
    }
}

impl From<Slope> for Collider {
    fn from(slope: Slope) -> Self {
        Collider::Slope(slope)
    }
}

impl From<Rope> for Collider {
    fn from(rope: Rope) -> Self {
        Collider::Rope(rope)
    }
}

impl From<OneWay> for Collider {
    fn from(one_way: OneWay) -> Self {
        Collider::OneWay(one_way)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_hit_box() {
        let block = Block::new(Vec2::new(100.0, 162.0), 100.0, 76.0, true);
        assert_eq!(block.hit_box(), Rect::new(50.0, 124.0, 100.0, 76.0));
    }

    #[test]
    fn test_slope_hypotenuse_direction() {
        // Rising to the right: low end bottom-left, high end top-right
        let rising = Slope::new(Vec2::new(0.0, 0.0), -20.0, 10.0, false);
        let hypo = rising.hypotenuse();
        assert_eq!(hypo.a, Vec2::new(10.0, -5.0));
        assert_eq!(hypo.b, Vec2::new(-10.0, 5.0));
        assert!(rising.is_floor());

        let ceiling = Slope::new(Vec2::new(0.0, 0.0), -20.0, -10.0, false);
        assert!(!ceiling.is_floor());
    }

    #[test]
    fn test_slope_area_is_solid_side() {
        let slope = Slope::new(Vec2::new(0.0, 0.0), -20.0, 10.0, false);
        let collider = Collider::from(slope);
        // Under the high end
        assert!(collider.contains_point(Vec2::new(8.0, 3.0)));
        // Above the low end
        assert!(!collider.contains_point(Vec2::new(-8.0, -3.0)));
    }

    #[test]
    fn test_rope_floor_with_zero_height() {
        let rope = Rope::new(Vec2::new(50.0, 10.0), 100.0, 0.0);
        assert_eq!(rope.floor(), Segment::from_coords(0.0, 10.0, 100.0, 10.0));
    }

    #[test]
    fn test_one_way_floor() {
        let platform = OneWay::new(Vec2::new(10.0, 5.0), 8.0);
        assert_eq!(platform.floor(), Segment::from_coords(6.0, 5.0, 14.0, 5.0));
    }

    #[test]
    fn test_groups() {
        assert_eq!(Collider::from(Block::new(Vec2::ZERO, 1.0, 1.0, true)).group(), CollisionGroup::BLOCK);
        assert_eq!(Collider::from(Rope::new(Vec2::ZERO, 1.0, 1.0)).group(), CollisionGroup::ROPE);
        assert_eq!(Collider::from(OneWay::new(Vec2::ZERO, 1.0)).group(), CollisionGroup::ONE_WAY);
    }

    #[test]
    fn test_thin_colliders_have_no_area() {
        let rope = Collider::from(Rope::new(Vec2::ZERO, 10.0, 10.0));
        assert!(!rope.contains_point(Vec2::ZERO));
        assert!(rope.hit_box().is_none());
        assert!(matches!(rope.outline(), Outline::Line(_)));
    }
}
