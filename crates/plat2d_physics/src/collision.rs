//! Collision resolution against level colliders
//!
//! Each collider kind moves an overlapping body out of itself and sets the
//! contact flags character logic reads (grounded, on-slope, on-ledge,
//! blocked). Resolution only ever moves the body being resolved; colliders
//! and other bodies are read-only here.
//!
//! Most corrections are unit-step loops along one axis. Every loop is capped
//! at [`ResolveContext::max_steps`] and reports [`ResolveError::DidNotConverge`]
//! instead of spinning forever.

use bitflags::bitflags;
use log::debug;
use plat2d_math::{boxes_overlap, intersect, segment_intersects_box, Rect, Vec2};
use thiserror::Error;

use crate::body::{Body, BodyFlags};
use crate::shapes::{Block, Collider, OneWay, Rope, Slope};

/// Default vertical slack for the ledge-grab stacking check
pub const LEDGE_STACK_MARGIN: f32 = 8.0;

/// Default cap on unit-step correction loops
pub const DEFAULT_MAX_CORRECTION_STEPS: u32 = 512;

bitflags! {
    /// Collision groups select which colliders a resolution pass visits
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CollisionGroup: u8 {
        const BLOCK = 1 << 0;
        const SLOPE = 1 << 1;
        const ONE_WAY = 1 << 2;
        const ROPE = 1 << 3;
        const ALL = Self::BLOCK.bits() | Self::SLOPE.bits() | Self::ONE_WAY.bits() | Self::ROPE.bits();
    }
}

impl CollisionGroup {
    /// Passes a character runs each frame, in order
    ///
    /// Ropes ride along with slopes. Slope and one-way passes set GROUNDED
    /// and ON_SLOPE, which the block pass then reads.
    pub const RESOLUTION_PASSES: [CollisionGroup; 3] = [
        CollisionGroup::SLOPE.union(CollisionGroup::ROPE),
        CollisionGroup::ONE_WAY,
        CollisionGroup::BLOCK,
    ];
}

/// Error from a correction that could not separate a body from a collider
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A unit-step loop hit its cap; the body keeps its last position
    #[error("{collider} correction did not converge after {steps} steps")]
    DidNotConverge { collider: &'static str, steps: u32 },
}

/// Everything a resolution call reads besides the body and the collider
#[derive(Clone, Copy, Debug)]
pub struct ResolveContext<'a> {
    /// Boxes of other bodies and of all blocks, for the ledge stacking check
    pub obstacles: &'a [Rect],
    /// Cap on unit-step correction loops
    pub max_steps: u32,
    /// A grab fails if an overlapping box's top is more than this far above
    /// the body's horizontal probe
    pub ledge_stack_margin: f32,
}

impl Default for ResolveContext<'_> {
    fn default() -> Self {
        Self {
            obstacles: &[],
            max_steps: DEFAULT_MAX_CORRECTION_STEPS,
            ledge_stack_margin: LEDGE_STACK_MARGIN,
        }
    }
}

/// How a correction loop ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Nudge {
    /// The touching condition no longer holds
    Cleared,
    /// The bail-out condition fired first
    Bailed,
}

/// Step `body` by `step` until `touching` stops holding
///
/// `bail` is checked before each step; when it fires the loop stops where it is.
fn nudge_until_clear(
    body: &mut Body,
    step: Vec2,
    max_steps: u32,
    collider: &'static str,
    touching: impl Fn(&Body) -> bool,
    bail: impl Fn(&Body) -> bool,
) -> Result<Nudge, ResolveError> {
    let mut steps = 0;
    while touching(body) {
        if bail(body) {
            return Ok(Nudge::Bailed);
        }
        if steps >= max_steps {
            return Err(ResolveError::DidNotConverge { collider, steps });
        }
        body.position += step;
        steps += 1;
    }
    Ok(Nudge::Cleared)
}

fn never(_: &Body) -> bool {
    false
}

impl Collider {
    /// Resolve a body against this collider
    pub fn resolve(&self, body: &mut Body, ctx: &ResolveContext<'_>) -> Result<(), ResolveError> {
        match self {
            Collider::Block(block) => block.resolve(body, ctx),
            Collider::Slope(slope) => slope.resolve(body, ctx),
            Collider::Rope(rope) => rope.resolve(body, ctx),
            Collider::OneWay(one_way) => one_way.resolve(body, ctx),
        }
    }
}

impl Block {
    /// True on the frame a falling body's horizontal probe first reaches
    /// this block's top edge
    pub fn was_grabbed_by(&self, body: &Body, ctx: &ResolveContext<'_>) -> bool {
        if !self.has_top {
            return false;
        }
        if body.flags.intersects(BodyFlags::GROUNDED | BodyFlags::ON_SLOPE) {
            return false;
        }

        let block_box = self.hit_box();
        let hori = body.hit_lines().hori;
        let prev = hori.translated(body.displacement());
        if !segment_intersects_box(&hori, &block_box) || segment_intersects_box(&prev, &block_box) {
            return false;
        }

        if body.flags.contains(BodyFlags::CROUCHING) || body.previous.y > body.position.y {
            return false;
        }

        // Something stacked beside or on top of the ledge blocks the grab
        let body_box = body.hit_box();
        !ctx.obstacles
            .iter()
            .any(|other| boxes_overlap(&body_box, other) && hori.a.y - ctx.ledge_stack_margin > other.y)
    }

    pub fn resolve(&self, body: &mut Body, ctx: &ResolveContext<'_>) -> Result<(), ResolveError> {
        let block_box = self.hit_box();
        if !boxes_overlap(&body.hit_box(), &block_box) {
            return Ok(());
        }

        if self.was_grabbed_by(body, ctx) {
            debug!("{} grabbed ledge at ({}, {})", body.label, block_box.x, block_box.y);
            body.flags.insert(BodyFlags::ON_LEDGE);
        }

        if body.flags.contains(BodyFlags::ON_SLOPE)
            && segment_intersects_box(&body.hit_lines().hori, &block_box)
        {
            let step = if body.position.x > self.center.x { Vec2::X } else { -Vec2::X };
            nudge_until_clear(
                body,
                step,
                ctx.max_steps,
                "block",
                |b| segment_intersects_box(&b.hit_lines().hori, &block_box),
                never,
            )?;
            if !boxes_overlap(&body.hit_box(), &block_box) {
                return Ok(());
            }
        }

        let body_box = body.hit_box();
        let overlap_x = if body_box.x < block_box.x {
            body_box.right() - block_box.left()
        } else {
            block_box.right() - body_box.left()
        };
        let overlap_y = if body_box.y < block_box.y {
            body_box.bottom() - block_box.top()
        } else {
            block_box.bottom() - body_box.top()
        };
        // Axis choice works on whole units so sub-unit jitter can't flip it
        let overlap_x = (overlap_x.floor() + 1.0).abs();
        let overlap_y = (overlap_y.floor() + 1.0).abs();

        if overlap_y < overlap_x {
            if body.position.y < self.center.y {
                body.position.y = block_box.top() - body.height / 2.0;
                body.flags.insert(BodyFlags::GROUNDED);
            } else if body.position.y > self.center.y {
                body.position.y = block_box.bottom() + body.height / 2.0;
                body.flags.remove(BodyFlags::JUMPING);
            }
        } else if overlap_x < overlap_y {
            if body.flags.contains(BodyFlags::ON_SLOPE) {
                return Ok(());
            }
            // Feet were already above the top last frame: this is a landing
            if body.previous.y + body.height / 2.0 <= block_box.top() {
                return Ok(());
            }

            body.flags.insert(BodyFlags::BLOCKED);
            if body.position.x < self.center.x {
                body.position.x = block_box.left() - body.width / 2.0;
            } else if body.position.x > self.center.x {
                body.position.x = block_box.right() + body.width / 2.0;
            }
        }
        Ok(())
    }
}

impl Slope {
    pub fn resolve(&self, body: &mut Body, ctx: &ResolveContext<'_>) -> Result<(), ResolveError> {
        let hypo = self.hypotenuse();
        let vert_touching = |b: &Body| intersect(&b.hit_lines().vert, &hypo);

        if hypo.a.y < hypo.b.y {
            if vert_touching(body) {
                body.flags.insert(BodyFlags::GROUNDED | BodyFlags::ON_SLOPE);
                // Crouching bodies slide down the slope instead of standing on it
                let step = if !body.flags.contains(BodyFlags::CROUCHING) {
                    -Vec2::Y
                } else if hypo.a.x > hypo.b.x {
                    -Vec2::X
                } else {
                    Vec2::X
                };
                nudge_until_clear(body, step, ctx.max_steps, "slope", vert_touching, never)?;
                return Ok(());
            }
        } else if vert_touching(body) && body.velocity.y < 0.0 {
            // Head bump on the underside
            body.flags.remove(BodyFlags::JUMPING);
            nudge_until_clear(body, Vec2::Y, ctx.max_steps, "slope", vert_touching, never)?;
        }

        let hori_touching = |b: &Body| intersect(&b.hit_lines().hori, &hypo);
        if hori_touching(body) {
            if hypo.a.y > hypo.b.y {
                body.flags.remove(BodyFlags::JUMPING);
            }
            // Past the leading edge on the downhill side: nothing to block
            let outcome = if hypo.a.x < hypo.b.x {
                nudge_until_clear(body, Vec2::X, ctx.max_steps, "slope", hori_touching, |b| {
                    b.position.x < hypo.a.x
                })?
            } else {
                nudge_until_clear(body, -Vec2::X, ctx.max_steps, "slope", hori_touching, |b| {
                    b.position.x > hypo.a.x
                })?
            };
            if outcome == Nudge::Cleared {
                body.flags.insert(BodyFlags::BLOCKED);
            }
        }
        Ok(())
    }
}

impl Rope {
    pub fn resolve(&self, body: &mut Body, ctx: &ResolveContext<'_>) -> Result<(), ResolveError> {
        let floor = self.floor();
        let vert = body.hit_lines().vert;
        if !intersect(&floor, &vert) {
            return Ok(());
        }

        let prev = vert.translated(body.displacement());
        let falling_onto = !intersect(&floor, &prev) && body.position.y > body.previous.y + 1.0;
        // Crouching drops through unless already standing
        let may_hold = !body.flags.contains(BodyFlags::CROUCHING) || body.flags.contains(BodyFlags::GROUNDED);

        if falling_onto && may_hold {
            body.flags.insert(BodyFlags::GROUNDED | BodyFlags::ON_SLOPE);
            nudge_until_clear(
                body,
                -Vec2::Y,
                ctx.max_steps,
                "rope",
                |b| intersect(&b.hit_lines().vert, &floor),
                never,
            )?;
        }
        Ok(())
    }
}

impl OneWay {
    pub fn resolve(&self, body: &mut Body, ctx: &ResolveContext<'_>) -> Result<(), ResolveError> {
        let floor = self.floor();
        let hit_box = body.hit_box();
        if !segment_intersects_box(&floor, &hit_box) {
            return Ok(());
        }

        let prev = hit_box.translated(Vec2::new(0.0, body.displacement().y));
        if !segment_intersects_box(&floor, &prev) && body.position.y > body.previous.y + 1.0 {
            body.flags.insert(BodyFlags::GROUNDED);
            nudge_until_clear(
                body,
                -Vec2::Y,
                ctx.max_steps,
                "one-way",
                |b| segment_intersects_box(&floor, &b.hit_box()),
                never,
            )?;
        }
        Ok(())
    }
}
