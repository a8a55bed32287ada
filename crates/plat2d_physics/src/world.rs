//! Physics world and per-body simulation

use crate::body::{Body, BodyKey};
use crate::collision::{CollisionGroup, ResolveContext, ResolveError, DEFAULT_MAX_CORRECTION_STEPS, LEDGE_STACK_MARGIN};
use crate::shapes::Collider;
use log::warn;
use plat2d_math::{Rect, Vec2};
use slotmap::SlotMap;

/// Configuration for the physics simulation
#[derive(Clone, Debug, PartialEq)]
pub struct PhysicsConfig {
    /// Velocity multiplier applied every frame
    pub damping: f32,
    /// Cap on unit-step correction loops
    pub max_correction_steps: u32,
    /// Vertical slack for the ledge-grab stacking check
    pub ledge_stack_margin: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            damping: 0.9,
            max_correction_steps: DEFAULT_MAX_CORRECTION_STEPS,
            ledge_stack_margin: LEDGE_STACK_MARGIN,
        }
    }
}

impl PhysicsConfig {
    /// Create a new physics config with the given damping
    pub fn new(damping: f32) -> Self {
        Self {
            damping,
            ..Default::default()
        }
    }
}

/// Index of a collider in the world
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColliderId(pub usize);

/// The physics world: moving bodies plus static level colliders
pub struct PhysicsWorld {
    /// All bodies in the world (using generational keys)
    bodies: SlotMap<BodyKey, Body>,
    /// Level geometry, fixed after load
    colliders: Vec<Collider>,
    /// Physics configuration
    pub config: PhysicsConfig,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    /// Create a new physics world with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a new physics world with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        Self {
            bodies: SlotMap::with_key(),
            colliders: Vec::new(),
            config,
        }
    }

    /// Add a level collider and return its index
    pub fn add_collider(&mut self, collider: impl Into<Collider>) -> ColliderId {
        self.colliders.push(collider.into());
        ColliderId(self.colliders.len() - 1)
    }

    /// Get immutable access to level colliders
    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    /// Add a body to the world and return its key
    pub fn add_body(&mut self, body: Body) -> BodyKey {
        self.bodies.insert(body)
    }

    /// Remove a body from the world and return it
    pub fn remove_body(&mut self, key: BodyKey) -> Option<Body> {
        self.bodies.remove(key)
    }

    /// Get an immutable reference to a body by key
    pub fn get_body(&self, key: BodyKey) -> Option<&Body> {
        self.bodies.get(key)
    }

    /// Get a mutable reference to a body by key
    pub fn get_body_mut(&mut self, key: BodyKey) -> Option<&mut Body> {
        self.bodies.get_mut(key)
    }

    /// Get the number of bodies in the world
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Iterate over all bodies with their keys
    pub fn bodies(&self) -> impl Iterator<Item = (BodyKey, &Body)> + '_ {
        self.bodies.iter()
    }

    /// Advance one body by a frame of damped integration
    pub fn integrate(&mut self, key: BodyKey) {
        let damping = self.config.damping;
        if let Some(body) = self.bodies.get_mut(key) {
            body.integrate(damping);
        }
    }

    /// Resolve one body against every collider, pass by pass
    ///
    /// A collider whose correction does not converge leaves the body where
    /// the loop stopped; the remaining colliders are still resolved. Every
    /// such failure is logged and returned.
    pub fn resolve(&mut self, key: BodyKey) -> Vec<ResolveError> {
        let obstacles = self.obstacles_for(key);
        let ctx = ResolveContext {
            obstacles: &obstacles,
            max_steps: self.config.max_correction_steps,
            ledge_stack_margin: self.config.ledge_stack_margin,
        };

        let Some(body) = self.bodies.get_mut(key) else {
            return Vec::new();
        };

        let mut errors = Vec::new();
        for pass in CollisionGroup::RESOLUTION_PASSES {
            for collider in self.colliders.iter().filter(|c| pass.contains(c.group())) {
                if let Err(err) = collider.resolve(body, &ctx) {
                    warn!("{}: {}", body.label, err);
                    errors.push(err);
                }
            }
        }
        errors
    }

    /// Integrate then resolve one body
    pub fn step_body(&mut self, key: BodyKey) -> Vec<ResolveError> {
        self.integrate(key);
        self.resolve(key)
    }

    /// Boxes a ledge grab must not be stacked under: every other body and
    /// every block
    fn obstacles_for(&self, key: BodyKey) -> Vec<Rect> {
        self.bodies
            .iter()
            .filter(|(other, _)| *other != key)
            .map(|(_, body)| body.hit_box())
            .chain(self.colliders.iter().filter_map(Collider::hit_box))
            .collect()
    }

    /// Keys of bodies whose area contains `point`
    pub fn bodies_containing(&self, point: Vec2, exclude: Option<BodyKey>) -> Vec<BodyKey> {
        self.bodies
            .iter()
            .filter(|(key, body)| Some(*key) != exclude && body.contains_point(point))
            .map(|(key, _)| key)
            .collect()
    }

    /// True if `point` is inside another body, a block or a slope
    pub fn solid_at(&self, point: Vec2, exclude: Option<BodyKey>) -> bool {
        self.bodies
            .iter()
            .any(|(key, body)| Some(key) != exclude && body.contains_point(point))
            || self.colliders.iter().any(|c| c.contains_point(point))
    }

    /// Remove every body flagged DEAD and return them
    pub fn reap_dead(&mut self) -> Vec<(BodyKey, Body)> {
        let dead: Vec<BodyKey> = self
            .bodies
            .iter()
            .filter(|(_, body)| body.is_dead())
            .map(|(key, _)| key)
            .collect();

        dead.into_iter()
            .filter_map(|key| self.bodies.remove(key).map(|body| (key, body)))
            .collect()
    }
}
