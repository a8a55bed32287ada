//! Body blueprints
//!
//! A blueprint names the traits a body is built from. Spawning walks the
//! traits in order. Each one fills in only what is still unset, then runs
//! its initializer, so explicit [`BodyOptions`] win over the blueprint's own
//! fields, which win over trait defaults.

use std::collections::HashSet;

use plat2d_math::Vec2;
use plat2d_physics::{Body, Facing};
use thiserror::Error;

use crate::behavior::Behavior;
use crate::enemy::{SlimeConfig, SlimeState};
use crate::player::{PlayerConfig, PlayerState};
use crate::weapon::WeaponConfig;

/// Default tile edge length in world units
pub const TILE_SIZE: f32 = 48.0;

/// A capability a body can be built from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TraitKind {
    /// Integration state: velocity, acceleration, mass
    RigidBody,
    /// Size and derived hit geometry
    Collider,
    Player,
    GreenSlime,
    BlueSlime,
}

impl TraitKind {
    /// True for traits that attach a behaviour
    pub fn is_behavior(self) -> bool {
        matches!(self, TraitKind::Player | TraitKind::GreenSlime | TraitKind::BlueSlime)
    }
}

/// Errors from composing a blueprint
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlueprintError {
    #[error("blueprint '{blueprint}' is missing the {missing:?} trait")]
    MissingTrait { blueprint: String, missing: TraitKind },
    #[error("blueprint '{blueprint}' has conflicting behaviours {first:?} and {second:?}")]
    ConflictingBehavior {
        blueprint: String,
        first: TraitKind,
        second: TraitKind,
    },
    #[error("blueprint '{blueprint}' lists {duplicate:?} more than once")]
    DuplicateTrait { blueprint: String, duplicate: TraitKind },
}

/// A named recipe for a body
#[derive(Clone, Debug, PartialEq)]
pub struct Blueprint {
    pub label: String,
    pub traits: Vec<TraitKind>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub mass: Option<f32>,
}

impl Blueprint {
    pub fn new(label: impl Into<String>, traits: impl Into<Vec<TraitKind>>) -> Self {
        Self {
            label: label.into(),
            traits: traits.into(),
            width: None,
            height: None,
            mass: None,
        }
    }

    /// Set the size of bodies built from this blueprint
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Set the mass of bodies built from this blueprint
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = Some(mass);
        self
    }

    /// The player prefab
    pub fn player(tile: f32) -> Self {
        Self::new("player", [TraitKind::RigidBody, TraitKind::Collider, TraitKind::Player])
            .with_size(tile * 0.65, tile * 1.2)
            .with_mass(100.0)
    }

    /// A slime that turns at walls
    pub fn green_slime(tile: f32) -> Self {
        Self::new("slime", [TraitKind::RigidBody, TraitKind::Collider, TraitKind::GreenSlime])
            .with_size(tile * 0.75, tile * 0.65)
            .with_mass(100.0)
    }

    /// A slime that turns at walls and ledges
    pub fn blue_slime(tile: f32) -> Self {
        Self::new("slime", [TraitKind::RigidBody, TraitKind::Collider, TraitKind::BlueSlime])
            .with_size(tile * 0.75, tile * 0.65)
            .with_mass(100.0)
    }

    /// Check trait composition without building anything
    pub fn validate(&self) -> Result<(), BlueprintError> {
        let mut seen = HashSet::new();
        let mut behavior: Option<TraitKind> = None;
        for &kind in &self.traits {
            if !seen.insert(kind) {
                return Err(BlueprintError::DuplicateTrait {
                    blueprint: self.label.clone(),
                    duplicate: kind,
                });
            }
            if kind.is_behavior() {
                if let Some(first) = behavior {
                    return Err(BlueprintError::ConflictingBehavior {
                        blueprint: self.label.clone(),
                        first,
                        second: kind,
                    });
                }
                behavior = Some(kind);
            }
        }

        for required in [TraitKind::RigidBody, TraitKind::Collider] {
            if !seen.contains(&required) {
                return Err(BlueprintError::MissingTrait {
                    blueprint: self.label.clone(),
                    missing: required,
                });
            }
        }
        Ok(())
    }
}

/// Per-spawn overrides
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BodyOptions {
    pub position: Vec2,
    pub label: Option<String>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub mass: Option<f32>,
    pub facing: Option<Facing>,
}

impl BodyOptions {
    /// Spawn centered at `position`
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Spawn with feet on `ground_y`, centered horizontally on `x`
    ///
    /// The final height is only known once traits have run, so the position
    /// is fixed up during spawning.
    pub fn standing_on(x: f32, ground_y: f32) -> StandingOptions {
        StandingOptions {
            x,
            ground_y,
            options: Self::default(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = Some(mass);
        self
    }

    pub fn with_facing(mut self, facing: Facing) -> Self {
        self.facing = Some(facing);
        self
    }
}

/// Options that place a body by its feet rather than its center
#[derive(Clone, Debug, PartialEq)]
pub struct StandingOptions {
    pub x: f32,
    pub ground_y: f32,
    pub options: BodyOptions,
}

/// Tuning the trait initializers read
#[derive(Clone, Copy, Debug)]
pub struct SpawnConfig<'a> {
    pub tile_size: f32,
    pub player: &'a PlayerConfig,
    pub slime: &'a SlimeConfig,
    pub weapon: &'a WeaponConfig,
}

/// Fields collected while walking the trait list
#[derive(Default)]
struct Draft {
    label: Option<String>,
    width: Option<f32>,
    height: Option<f32>,
    mass: Option<f32>,
    facing: Option<Facing>,
}

/// Build a body and its behaviour from a blueprint
pub fn spawn(
    blueprint: &Blueprint,
    options: BodyOptions,
    config: &SpawnConfig<'_>,
) -> Result<(Body, Behavior), BlueprintError> {
    blueprint.validate()?;

    let mut draft = Draft {
        label: options.label,
        width: options.width,
        height: options.height,
        mass: options.mass,
        facing: options.facing,
    };
    draft.label.get_or_insert_with(|| blueprint.label.clone());
    if let Some(w) = blueprint.width {
        draft.width.get_or_insert(w);
    }
    if let Some(h) = blueprint.height {
        draft.height.get_or_insert(h);
    }
    if let Some(m) = blueprint.mass {
        draft.mass.get_or_insert(m);
    }

    for kind in &blueprint.traits {
        match kind {
            TraitKind::RigidBody => {
                draft.mass.get_or_insert(1.0);
            }
            TraitKind::Collider => {
                draft.width.get_or_insert(config.tile_size);
                draft.height.get_or_insert(config.tile_size);
            }
            TraitKind::Player | TraitKind::GreenSlime | TraitKind::BlueSlime => {
                draft.facing.get_or_insert(Facing::Right);
            }
        }
    }

    // Required traits guarantee these are set
    let width = draft.width.unwrap_or(config.tile_size);
    let height = draft.height.unwrap_or(config.tile_size);
    let label = draft.label.unwrap_or_default();

    let body = Body::new(label, options.position, width, height)
        .with_mass(draft.mass.unwrap_or(1.0))
        .with_facing(draft.facing.unwrap_or_default());

    let behavior = blueprint
        .traits
        .iter()
        .find(|kind| kind.is_behavior())
        .map(|kind| match kind {
            TraitKind::Player => Behavior::Player(PlayerState::new(height, config.player, config.weapon)),
            TraitKind::GreenSlime => Behavior::GreenSlime(SlimeState::new(config.slime)),
            _ => Behavior::BlueSlime(SlimeState::new(config.slime)),
        })
        .unwrap_or(Behavior::Prop);

    Ok((body, behavior))
}

/// Like [`spawn`], with the body's feet placed on `ground_y`
pub fn spawn_standing(
    blueprint: &Blueprint,
    standing: StandingOptions,
    config: &SpawnConfig<'_>,
) -> Result<(Body, Behavior), BlueprintError> {
    let (mut body, behavior) = spawn(blueprint, standing.options, config)?;
    body.teleport(Vec2::new(standing.x, standing.ground_y - body.height / 2.0));
    Ok((body, behavior))
}
