//! Moving body types for platformer physics

use bitflags::bitflags;
use plat2d_math::{Rect, Segment, Vec2};
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

// Define generational key type for bodies
new_key_type! {
    /// Key to a body in the physics world
    ///
    /// Uses generational indexing so a key held for a removed body returns
    /// None instead of pointing at whatever reused the slot.
    pub struct BodyKey;
}

bitflags! {
    /// Per-body state flags
    ///
    /// `GROUNDED`, `ON_SLOPE` and `BLOCKED` describe the current frame only:
    /// integration clears them and resolution sets them again.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct BodyFlags: u16 {
        const JUMPING = 1 << 0;
        const FALLING = 1 << 1;
        const CROUCHING = 1 << 2;
        /// Supported from below this frame
        const GROUNDED = 1 << 3;
        /// Support came from a slope or rope rather than a flat block
        const ON_SLOPE = 1 << 4;
        /// Hanging from a ledge; integration freezes the body
        const ON_LEDGE = 1 << 5;
        const ATTACKING = 1 << 6;
        /// Horizontal motion was stopped by a side collision this frame
        const BLOCKED = 1 << 7;
        const DEAD = 1 << 8;
        const DYING = 1 << 9;
        /// Flags owned by a single frame's resolution
        const FRAME_CONTACTS = Self::GROUNDED.bits() | Self::ON_SLOPE.bits() | Self::BLOCKED.bits();
    }
}

/// Horizontal facing direction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Unit x direction for this facing
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    /// The opposite facing
    pub fn flipped(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }
}

/// A body's center-crossing probe lines
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitLines {
    /// Horizontal line through the center, spanning the body's width
    pub hori: Segment,
    /// Vertical line through the center, spanning the body's height
    pub vert: Segment,
}

/// A moving, physics-simulated body
///
/// `position` is the center of the body. Everything geometric about the
/// body (hit box, area, probe lines) is derived from the current position
/// and size on every call, since width and height change at runtime.
#[derive(Clone, Debug)]
pub struct Body {
    /// Label for logs and lookups ("player", "slime", ...)
    pub label: String,
    /// Center position (y grows downward)
    pub position: Vec2,
    /// Center position at the start of the last integration step
    pub previous: Vec2,
    pub width: f32,
    pub height: f32,
    /// Velocity in units per frame
    pub velocity: Vec2,
    /// Acceleration accumulated for the next integration step
    pub acceleration: Vec2,
    /// Carried for callers; resolution ignores it
    pub mass: f32,
    pub facing: Facing,
    pub flags: BodyFlags,
}

impl Body {
    /// Create a body centered at `position`
    pub fn new(label: impl Into<String>, position: Vec2, width: f32, height: f32) -> Self {
        Self {
            label: label.into(),
            position,
            previous: position,
            width,
            height,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            mass: 1.0,
            facing: Facing::Right,
            flags: BodyFlags::empty(),
        }
    }

    /// Set the velocity of this body
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the mass of this body
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    /// Set the facing of this body
    pub fn with_facing(mut self, facing: Facing) -> Self {
        self.facing = facing;
        self
    }

    /// Set initial flags
    pub fn with_flags(mut self, flags: BodyFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Move the body, also resetting its previous position
    pub fn teleport(&mut self, position: Vec2) {
        self.position = position;
        self.previous = position;
    }

    /// Axis-aligned box around the body
    pub fn hit_box(&self) -> Rect {
        Rect::from_center(self.position, self.width, self.height)
    }

    /// The hit box as a polygon, for point containment tests
    pub fn area(&self) -> [Vec2; 4] {
        self.hit_box().corners()
    }

    /// Horizontal and vertical probe lines through the center
    pub fn hit_lines(&self) -> HitLines {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        let Vec2 { x, y } = self.position;
        HitLines {
            hori: Segment::from_coords(x - half_w, y, x + half_w, y),
            vert: Segment::from_coords(x, y - half_h, x, y + half_h),
        }
    }

    /// Offset from the current position back to the previous one
    ///
    /// Adding this to any derived shape gives that shape as it was last frame.
    pub fn displacement(&self) -> Vec2 {
        self.previous - self.position
    }

    /// y coordinate of the body's feet
    pub fn foot(&self) -> f32 {
        self.position.y + self.height / 2.0
    }

    /// True if `point` lies inside the body's area
    pub fn contains_point(&self, point: Vec2) -> bool {
        matches!(plat2d_math::point_in_polygon(point, &self.area()), Ok(true))
    }

    /// Advance one frame of damped Euler integration
    ///
    /// Records the previous position, applies acceleration and damping,
    /// freezes the body if it hangs from a ledge, moves it, then clears the
    /// per-frame contact flags and the accumulated acceleration.
    pub fn integrate(&mut self, damping: f32) {
        self.previous = self.position;
        self.velocity += self.acceleration;
        self.velocity *= damping;
        if self.flags.contains(BodyFlags::ON_LEDGE) {
            self.velocity = Vec2::ZERO;
        }
        self.position += self.velocity;
        self.flags.remove(BodyFlags::FRAME_CONTACTS);
        self.acceleration = Vec2::ZERO;
    }

    /// Clamp horizontal speed to `max`, keeping direction
    pub fn clamp_speed(&mut self, max: f32) {
        if self.velocity.x.abs() > max {
            self.velocity.x = max.copysign(self.velocity.x);
        }
    }

    /// Recompute FALLING: not grounded, not jumping and not hanging
    pub fn update_falling(&mut self) {
        let supported = self
            .flags
            .intersects(BodyFlags::GROUNDED | BodyFlags::JUMPING | BodyFlags::ON_LEDGE);
        self.flags.set(BodyFlags::FALLING, !supported);
    }

    /// Face the direction of horizontal travel (unchanged when still)
    pub fn face_velocity(&mut self) {
        if self.velocity.x < 0.0 {
            self.facing = Facing::Left;
        } else if self.velocity.x > 0.0 {
            self.facing = Facing::Right;
        }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.flags.contains(BodyFlags::DEAD)
    }
}
