//! Game world: bodies, their behaviours and the per-frame driver

use log::{debug, info};
use plat2d_physics::{Body, BodyKey, Collider, ColliderId, PhysicsConfig, PhysicsWorld, ResolveError};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::behavior::{Behavior, FrameContext};
use crate::blueprint::{self, Blueprint, BlueprintError, BodyOptions, SpawnConfig, StandingOptions, TILE_SIZE};
use crate::control::{FrameInput, InputConfig};
use crate::enemy::{take_hit, SlimeConfig};
use crate::player::PlayerConfig;
use crate::viewport::Viewport;
use crate::weapon::{Shot, WeaponConfig};

/// Everything the world needs to run frames
#[derive(Clone, Debug, PartialEq)]
pub struct WorldConfig {
    pub physics: PhysicsConfig,
    /// Downward acceleration added every frame
    pub gravity: f32,
    pub tile_size: f32,
    pub player: PlayerConfig,
    pub slime: SlimeConfig,
    pub input: InputConfig,
    pub weapon: WeaponConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            gravity: 1.4,
            tile_size: TILE_SIZE,
            player: PlayerConfig::default(),
            slime: SlimeConfig::default(),
            input: InputConfig::default(),
            weapon: WeaponConfig::default(),
        }
    }
}

/// A body with the behaviour that drives it
#[derive(Clone, Debug, PartialEq)]
pub struct Actor {
    pub key: BodyKey,
    pub behavior: Behavior,
}

/// What happened during one frame
#[derive(Clone, Debug, Default)]
pub struct FrameReport {
    /// Rays fired this frame, for whoever draws them
    pub shots: Vec<Shot>,
    /// Bodies reaped at the end of the frame
    pub removed: Vec<(BodyKey, Body)>,
    /// Corrections that hit the step cap
    pub unconverged: Vec<(BodyKey, ResolveError)>,
}

/// The simulation: physics plus one behaviour per spawned body
pub struct GameWorld {
    physics: PhysicsWorld,
    /// In spawn order; updated back to front
    actors: Vec<Actor>,
    config: WorldConfig,
    rng: StdRng,
}

impl Default for GameWorld {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}

impl GameWorld {
    pub fn new(config: WorldConfig) -> Self {
        Self {
            physics: PhysicsWorld::with_config(config.physics.clone()),
            actors: Vec::new(),
            rng: StdRng::seed_from_u64(config.weapon.seed),
            config,
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Add level geometry
    pub fn add_collider(&mut self, collider: impl Into<Collider>) -> ColliderId {
        self.physics.add_collider(collider)
    }

    fn spawn_config(&self) -> SpawnConfig<'_> {
        SpawnConfig {
            tile_size: self.config.tile_size,
            player: &self.config.player,
            slime: &self.config.slime,
            weapon: &self.config.weapon,
        }
    }

    /// Build a body from a blueprint and start driving it
    pub fn spawn(&mut self, blueprint: &Blueprint, options: BodyOptions) -> Result<BodyKey, BlueprintError> {
        let (body, behavior) = blueprint::spawn(blueprint, options, &self.spawn_config())?;
        Ok(self.insert(body, behavior))
    }

    /// Like [`GameWorld::spawn`], placing the body's feet on the ground line
    pub fn spawn_standing(&mut self, blueprint: &Blueprint, standing: StandingOptions) -> Result<BodyKey, BlueprintError> {
        let (body, behavior) = blueprint::spawn_standing(blueprint, standing, &self.spawn_config())?;
        Ok(self.insert(body, behavior))
    }

    fn insert(&mut self, body: Body, behavior: Behavior) -> BodyKey {
        debug!(
            "spawned {} '{}' at ({}, {})",
            behavior.name(),
            body.label,
            body.position.x,
            body.position.y
        );
        let key = self.physics.add_body(body);
        self.actors.push(Actor { key, behavior });
        key
    }

    pub fn body(&self, key: BodyKey) -> Option<&Body> {
        self.physics.get_body(key)
    }

    pub fn body_mut(&mut self, key: BodyKey) -> Option<&mut Body> {
        self.physics.get_body_mut(key)
    }

    pub fn behavior(&self, key: BodyKey) -> Option<&Behavior> {
        self.actors.iter().find(|a| a.key == key).map(|a| &a.behavior)
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    /// Key of the first player body, if one is alive
    pub fn player(&self) -> Option<BodyKey> {
        self.actors.iter().find(|a| a.behavior.is_player()).map(|a| a.key)
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.physics
    }

    /// Run one frame
    ///
    /// Actors update in reverse spawn order, so a player spawned after the
    /// level's enemies moves first. Bodies already dead are skipped. Weapon
    /// hits kill their targets at once; everything dead is reaped at the end.
    pub fn step(&mut self, input: &FrameInput, viewport: &dyn Viewport, dt_ms: f32) -> FrameReport {
        let mut report = FrameReport::default();
        let ctx = FrameContext {
            input,
            viewport,
            dt_ms,
            gravity: self.config.gravity,
            input_config: &self.config.input,
            player: &self.config.player,
            slime: &self.config.slime,
        };

        for i in (0..self.actors.len()).rev() {
            let key = self.actors[i].key;
            if self.physics.get_body(key).map_or(true, Body::is_dead) {
                continue;
            }

            let update = self.actors[i].behavior.update(key, &mut self.physics, &ctx, &mut self.rng);
            report.unconverged.extend(update.unconverged.into_iter().map(|err| (key, err)));

            if let Some(shot) = update.shot {
                for &hit in &shot.hits {
                    let killable = self.actors.iter().any(|a| a.key == hit && a.behavior.takes_hits());
                    if let (true, Some(target)) = (killable, self.physics.get_body_mut(hit)) {
                        take_hit(target);
                    }
                }
                report.shots.push(shot);
            }
        }

        report.removed = self.physics.reap_dead();
        if !report.removed.is_empty() {
            self.actors
                .retain(|a| !report.removed.iter().any(|(key, _)| *key == a.key));
            info!(
                "reaped {} bodies, {} remain",
                report.removed.len(),
                self.physics.body_count()
            );
        }
        report
    }
}
