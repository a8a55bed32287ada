//! Character behaviours and the per-frame context they run with

use plat2d_physics::{BodyFlags, BodyKey, PhysicsWorld, ResolveError};
use rand::Rng;

use crate::control::{FrameInput, InputConfig};
use crate::enemy::{SlimeConfig, SlimeKind, SlimeState};
use crate::player::{PlayerConfig, PlayerState};
use crate::viewport::Viewport;
use crate::weapon::Shot;

/// Shared, read-only inputs for one frame
#[derive(Clone, Copy)]
pub struct FrameContext<'a> {
    pub input: &'a FrameInput,
    pub viewport: &'a dyn Viewport,
    /// Milliseconds since the last frame
    pub dt_ms: f32,
    /// Downward acceleration added every frame
    pub gravity: f32,
    pub input_config: &'a InputConfig,
    pub player: &'a PlayerConfig,
    pub slime: &'a SlimeConfig,
}

/// What one behaviour update produced
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Update {
    pub shot: Option<Shot>,
    pub unconverged: Vec<ResolveError>,
}

/// The logic attached to a body
#[derive(Clone, Debug, PartialEq)]
pub enum Behavior {
    Player(PlayerState),
    GreenSlime(SlimeState),
    BlueSlime(SlimeState),
    /// Falls and collides, nothing else (crates and the like)
    Prop,
}

impl Behavior {
    pub fn name(&self) -> &'static str {
        match self {
            Behavior::Player(_) => "player",
            Behavior::GreenSlime(_) => "green slime",
            Behavior::BlueSlime(_) => "blue slime",
            Behavior::Prop => "prop",
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self, Behavior::Player(_))
    }

    /// True if a weapon hit kills this body
    pub fn takes_hits(&self) -> bool {
        matches!(self, Behavior::GreenSlime(_) | Behavior::BlueSlime(_))
    }

    /// Run one frame for the body at `key`
    pub fn update<R: Rng>(
        &mut self,
        key: BodyKey,
        physics: &mut PhysicsWorld,
        ctx: &FrameContext<'_>,
        rng: &mut R,
    ) -> Update {
        match self {
            Behavior::Player(state) => state.update(key, physics, ctx, rng),
            Behavior::GreenSlime(state) => state.update(key, physics, ctx, SlimeKind::Green),
            Behavior::BlueSlime(state) => state.update(key, physics, ctx, SlimeKind::Blue),
            Behavior::Prop => update_prop(key, physics, ctx),
        }
    }
}

fn update_prop(key: BodyKey, physics: &mut PhysicsWorld, ctx: &FrameContext<'_>) -> Update {
    let dying = match physics.get_body_mut(key) {
        Some(body) => {
            body.acceleration.y += ctx.gravity;
            body.flags.contains(BodyFlags::DYING)
        }
        None => return Update::default(),
    };

    let mut update = Update::default();
    if !dying {
        update.unconverged = physics.step_body(key);
    }
    if let Some(body) = physics.get_body_mut(key) {
        body.update_falling();
    }
    update
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::Unbounded;
    use crate::weapon::WeaponConfig;
    use plat2d_math::Vec2;
    use plat2d_physics::{Block, Body};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_behavior_queries() {
        let player = Behavior::Player(PlayerState::new(48.0, &PlayerConfig::default(), &WeaponConfig::default()));
        let slime = Behavior::BlueSlime(SlimeState::new(&SlimeConfig::default()));

        assert!(player.is_player());
        assert!(!player.takes_hits());
        assert!(slime.takes_hits());
        assert!(!Behavior::Prop.takes_hits());
        assert_eq!(slime.name(), "blue slime");
    }

    #[test]
    fn test_prop_falls_and_lands() {
        let mut physics = PhysicsWorld::new();
        physics.add_collider(Block::new(Vec2::new(0.0, 162.0), 400.0, 76.0, true));
        let key = physics.add_body(Body::new("crate", Vec2::new(0.0, 50.0), 20.0, 20.0));

        let input = FrameInput::default();
        let (input_config, player, slime) = (InputConfig::default(), PlayerConfig::default(), SlimeConfig::default());
        let ctx = FrameContext {
            input: &input,
            viewport: &Unbounded,
            dt_ms: 16.0,
            gravity: 1.4,
            input_config: &input_config,
            player: &player,
            slime: &slime,
        };
        let mut rng = StdRng::seed_from_u64(0);
        let mut prop = Behavior::Prop;

        prop.update(key, &mut physics, &ctx, &mut rng);
        assert!(physics.get_body(key).unwrap().flags.contains(BodyFlags::FALLING));

        for _ in 0..60 {
            prop.update(key, &mut physics, &ctx, &mut rng);
        }
        let body = physics.get_body(key).unwrap();
        assert!(body.flags.contains(BodyFlags::GROUNDED));
        assert_eq!(body.foot(), 124.0);
    }
}
