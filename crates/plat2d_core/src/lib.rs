//! Core types for the plat2d platformer
//!
//! This crate drives bodies frame by frame on top of `plat2d_physics`:
//!
//! - [`Blueprint`] - Named trait bundle a body is spawned from
//! - [`Behavior`] - Player or slime logic attached to a body
//! - [`FrameInput`] - Control intent and buttons for one frame
//! - [`Viewport`] - What the camera sees, for culling and ray length
//! - [`Weapon`] - Hit-scan gun with spread and fire rate
//! - [`GameWorld`] - Bodies, behaviours and the per-frame driver

mod behavior;
mod blueprint;
mod control;
mod enemy;
mod player;
mod viewport;
mod weapon;
mod world;

pub use behavior::{Behavior, FrameContext, Update};
pub use blueprint::{
    spawn, spawn_standing, Blueprint, BlueprintError, BodyOptions, SpawnConfig, StandingOptions, TraitKind, TILE_SIZE,
};
pub use control::{Buttons, ControlIntent, FrameInput, InputConfig};
pub use enemy::{edge_scan, take_hit, SlimeConfig, SlimeKind, SlimeState};
pub use player::{Jump, PlayerConfig, PlayerState};
pub use viewport::{Unbounded, ViewRect, Viewport};
pub use weapon::{muzzle, Shot, Weapon, WeaponConfig};
pub use world::{Actor, FrameReport, GameWorld, WorldConfig};

// Re-export commonly used types from plat2d_math for convenience
pub use plat2d_math::{Rect, Segment, Vec2};

// Re-export physics types for convenient access through plat2d_core
pub use plat2d_physics::{
    Block, Body, BodyFlags, BodyKey, Collider, ColliderId, Facing, OneWay, PhysicsConfig, PhysicsWorld, ResolveError,
    Rope, Slope,
};
