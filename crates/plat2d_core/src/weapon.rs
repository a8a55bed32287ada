//! Hit-scan weapon
//!
//! The ray is marched one unit at a time from the holder's muzzle. It stops
//! at the first step whose tip is inside another body, inside solid level
//! geometry, or outside the view. Bodies at that final tip are hit either way.

use plat2d_math::{Segment, Vec2};
use plat2d_physics::{Body, BodyKey, Facing, PhysicsWorld};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::viewport::Viewport;

/// Weapon tuning
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    /// Rounds per minute; the cool-down is `rpm / 6` milliseconds
    pub rpm: f32,
    /// Maximum vertical drift per unit of ray travel, either way
    pub spread: f32,
    /// Ray length cap, in steps
    pub max_ray_length: u32,
    /// Seed for the spread generator
    pub seed: u64,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            rpm: 600.0,
            spread: 0.01,
            max_ray_length: 2048,
            seed: 0,
        }
    }
}

/// One fired ray, kept for whoever draws it
#[derive(Clone, Debug, PartialEq)]
pub struct Shot {
    pub shooter: BodyKey,
    pub ray: Segment,
    /// Every body the tip was inside when the ray stopped
    pub hits: Vec<BodyKey>,
}

/// A hit-scan gun
#[derive(Clone, Debug, PartialEq)]
pub struct Weapon {
    pub rpm: f32,
    pub spread: f32,
    pub max_ray_length: u32,
    /// Milliseconds since the last shot
    pub timer: f32,
    /// Shots fired so far
    pub shots_fired: u32,
}

impl Weapon {
    pub fn new(config: &WeaponConfig) -> Self {
        let mut weapon = Self {
            rpm: config.rpm,
            spread: config.spread,
            max_ray_length: config.max_ray_length,
            timer: 0.0,
            shots_fired: 0,
        };
        weapon.holster();
        weapon
    }

    /// Milliseconds between shots
    pub fn cooldown(&self) -> f32 {
        self.rpm / 6.0
    }

    /// Not firing: arm the timer so the next trigger pull fires at once
    pub fn holster(&mut self) {
        self.timer = self.cooldown();
    }

    /// Advance the timer; true when a shot is due
    pub fn ready(&mut self, dt_ms: f32) -> bool {
        self.timer += dt_ms;
        self.timer >= self.cooldown()
    }

    /// Fire from `shooter`, if the cool-down allows
    ///
    /// Hit bodies are only reported here; applying damage is up to the caller.
    pub fn trigger<R: Rng>(
        &mut self,
        shooter: BodyKey,
        physics: &PhysicsWorld,
        viewport: &dyn Viewport,
        rng: &mut R,
        dt_ms: f32,
    ) -> Option<Shot> {
        if !self.ready(dt_ms) {
            return None;
        }
        let holder = physics.get_body(shooter)?;
        let margin = if self.spread > 0.0 {
            rng.gen_range(-self.spread..=self.spread)
        } else {
            0.0
        };
        let shot = self.cast(shooter, holder, margin, physics, viewport);
        self.shots_fired += 1;
        self.timer = 0.0;
        Some(shot)
    }

    /// March a ray from the holder's muzzle
    fn cast(
        &self,
        shooter: BodyKey,
        holder: &Body,
        margin: f32,
        physics: &PhysicsWorld,
        viewport: &dyn Viewport,
    ) -> Shot {
        let origin = muzzle(holder);
        let step = Vec2::new(holder.facing.sign(), margin);
        let mut tip = origin;
        let mut hits = Vec::new();

        for _ in 0..self.max_ray_length {
            tip += step;
            // Bodies at the last step count even when it leaves the view
            let in_view = viewport.contains(tip);
            hits = physics.bodies_containing(tip, Some(shooter));
            if !in_view || !hits.is_empty() || physics.colliders().iter().any(|c| c.contains_point(tip)) {
                break;
            }
        }

        Shot {
            shooter,
            ray: Segment::new(origin, tip),
            hits,
        }
    }
}

/// Where rays start: the front edge, slightly above center when facing right
pub fn muzzle(holder: &Body) -> Vec2 {
    match holder.facing {
        Facing::Right => Vec2::new(
            holder.position.x + holder.width / 2.0,
            holder.position.y - holder.height * 0.1,
        ),
        Facing::Left => Vec2::new(holder.position.x - holder.width / 2.0, holder.position.y),
    }
}
