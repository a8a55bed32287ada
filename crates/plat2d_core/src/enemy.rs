//! Patrolling slimes
//!
//! Green slimes walk until something blocks them, then turn around. Blue
//! slimes also turn around at ledges, probing the ground in front of their
//! feet every frame.

use log::debug;
use plat2d_math::Vec2;
use plat2d_physics::{Body, BodyFlags, BodyKey, Facing, PhysicsWorld};
use serde::{Deserialize, Serialize};

use crate::behavior::{FrameContext, Update};

/// Slime tuning
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlimeConfig {
    /// Patrol acceleration per frame
    pub speed: f32,
    pub max_speed: f32,
    /// How far below the feet the edge probe looks
    pub edge_lookahead: f32,
    /// A drop deeper than this counts as a ledge
    pub edge_threshold: f32,
}

impl Default for SlimeConfig {
    fn default() -> Self {
        Self {
            speed: 0.5,
            max_speed: 2.0,
            edge_lookahead: 10.0,
            edge_threshold: 4.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlimeKind {
    Green,
    Blue,
}

/// Patrol state; the sign of `speed` is the patrol direction
#[derive(Clone, Debug, PartialEq)]
pub struct SlimeState {
    pub speed: f32,
    pub max_speed: f32,
}

impl SlimeState {
    pub fn new(config: &SlimeConfig) -> Self {
        Self {
            speed: config.speed,
            max_speed: config.max_speed,
        }
    }

    /// One patrol frame; does nothing while the slime is off screen
    pub fn update(
        &mut self,
        key: BodyKey,
        physics: &mut PhysicsWorld,
        ctx: &FrameContext<'_>,
        kind: SlimeKind,
    ) -> Update {
        let mut update = Update::default();
        let dying = match physics.get_body_mut(key) {
            Some(body) if ctx.viewport.sees(&body.hit_box()) => {
                body.face_velocity();
                body.clamp_speed(self.max_speed);
                body.acceleration.y += ctx.gravity;
                body.flags.contains(BodyFlags::DYING)
            }
            _ => return update,
        };

        if !dying {
            update.unconverged = physics.step_body(key);
        }

        let at_ledge = kind == SlimeKind::Blue
            && edge_scan(physics, key, ctx.slime.edge_lookahead)
                .is_some_and(|drop| drop > ctx.slime.edge_threshold);

        if let Some(body) = physics.get_body_mut(key) {
            body.flags.remove(BodyFlags::ON_LEDGE);
            if at_ledge && body.flags.contains(BodyFlags::GROUNDED) {
                body.flags.insert(BodyFlags::BLOCKED);
            }
            if body.flags.contains(BodyFlags::BLOCKED) {
                self.speed = -self.speed;
            }
            body.velocity.x += self.speed;
            body.clamp_speed(self.max_speed);
            body.update_falling();
        }
        update
    }
}

/// Depth of free space below the front foot, probing at most `lookahead`
///
/// Walks a point down one unit at a time from the foot line on the facing
/// side until it lands inside another body or solid level geometry. A
/// result of 1 means ground right at the feet. Returns `None` if the body
/// is gone.
pub fn edge_scan(physics: &PhysicsWorld, key: BodyKey, lookahead: f32) -> Option<f32> {
    let body = physics.get_body(key)?;
    let foot = body.foot();
    let x = match body.facing {
        Facing::Left => body.position.x - body.width / 2.0,
        Facing::Right => body.position.x + body.width / 2.0,
    };

    let mut point = Vec2::new(x, foot);
    while point.y <= foot + lookahead {
        let hit = physics.solid_at(point, Some(key));
        point.y += 1.0;
        if hit {
            break;
        }
    }
    Some(point.y - foot)
}

/// A weapon hit: slimes die at once
pub fn take_hit(body: &mut Body) {
    if !body.is_dead() {
        debug!("{} killed at ({}, {})", body.label, body.position.x, body.position.y);
    }
    body.flags.insert(BodyFlags::DEAD);
}
