//! Platformer physics for plat2d
//!
//! This crate provides the moving-body side of the platformer core:
//! - Bodies with per-frame contact flags
//! - Level colliders (blocks, slopes, ropes, one-way platforms)
//! - Per-collider resolution rules
//! - A world that integrates and resolves bodies one at a time

pub mod body;
pub mod collision;
pub mod shapes;
pub mod world;

// Re-export commonly used types
pub use body::{Body, BodyFlags, BodyKey, Facing, HitLines};
pub use collision::{CollisionGroup, ResolveContext, ResolveError, DEFAULT_MAX_CORRECTION_STEPS, LEDGE_STACK_MARGIN};
pub use shapes::{Block, Collider, OneWay, Outline, Rope, Slope};
pub use world::{ColliderId, PhysicsConfig, PhysicsWorld};
