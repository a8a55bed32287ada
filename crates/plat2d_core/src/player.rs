//! Player character: walking, running, crouching, jumping and shooting

use log::debug;
use plat2d_physics::{Body, BodyFlags, BodyKey, Facing, PhysicsWorld};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::behavior::{FrameContext, Update};
use crate::control::FrameInput;
use crate::weapon::{Weapon, WeaponConfig};

/// Player tuning
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub walk_speed: f32,
    pub walk_max_speed: f32,
    pub run_speed: f32,
    pub run_max_speed: f32,
    /// Acceleration while airborne; the speed cap is left as it was
    pub air_speed: f32,
    /// Upward impulse on the first jump frame
    pub jump_force: f32,
    /// Impulse multiplier for each further frame the button is held
    pub jump_damping: f32,
    /// Crouched height as a fraction of standing height
    pub duck_ratio: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            walk_speed: 0.75,
            walk_max_speed: 3.0,
            run_speed: 1.0,
            run_max_speed: 5.0,
            air_speed: 0.6,
            jump_force: 6.0,
            jump_damping: 0.95,
            duck_ratio: 0.67,
        }
    }
}

/// Variable-height jump state
#[derive(Clone, Debug, PartialEq)]
pub struct Jump {
    /// Jump was pressed and not yet released on the ground
    pub pressed: bool,
    /// Impulse for the next held frame
    pub force: f32,
}

/// Everything the player remembers between frames
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerState {
    pub speed: f32,
    pub max_speed: f32,
    pub running: bool,
    pub jump: Jump,
    pub normal_height: f32,
    pub duck_height: f32,
    pub weapon: Weapon,
}

impl PlayerState {
    /// Fresh state for a body standing `height` tall
    pub fn new(height: f32, config: &PlayerConfig, weapon: &WeaponConfig) -> Self {
        Self {
            speed: 1.0,
            max_speed: 4.0,
            running: false,
            jump: Jump {
                pressed: false,
                force: config.jump_force,
            },
            normal_height: height,
            duck_height: height * config.duck_ratio,
            weapon: Weapon::new(weapon),
        }
    }

    fn pick_speed(&mut self, flags: BodyFlags, config: &PlayerConfig) {
        if !flags.contains(BodyFlags::GROUNDED) {
            self.speed = config.air_speed;
        } else if self.running {
            self.speed = config.run_speed;
            self.max_speed = config.run_max_speed;
        } else {
            self.speed = config.walk_speed;
            self.max_speed = config.walk_max_speed;
        }
    }

    /// Turn input into acceleration, flags and size before physics runs
    pub fn control(&mut self, body: &mut Body, ctx: &FrameContext<'_>) {
        let input = ctx.input;
        self.pick_speed(body.flags, ctx.player);

        if ctx.input_config.wants_crouch(&input.intent) {
            body.flags.insert(BodyFlags::CROUCHING);
            body.flags.remove(BodyFlags::JUMPING);
        } else {
            body.flags.remove(BodyFlags::CROUCHING);
        }

        if let Some(dir) = ctx.input_config.move_direction(&input.intent) {
            body.acceleration.x += self.speed * dir;
            if !body.flags.contains(BodyFlags::ON_LEDGE) {
                body.facing = if dir > 0.0 { Facing::Right } else { Facing::Left };
            }
        }

        if body.flags.intersects(BodyFlags::CROUCHING | BodyFlags::JUMPING) {
            body.flags.remove(BodyFlags::ON_LEDGE);
        }

        body.acceleration.y += ctx.gravity;
        self.update_jump(body, input, ctx);
        self.update_height(body);
    }

    fn update_jump(&mut self, body: &mut Body, input: &FrameInput, ctx: &FrameContext<'_>) {
        let held = input.buttons.jump;
        let supported = body.flags.intersects(BodyFlags::GROUNDED | BodyFlags::ON_LEDGE);
        if held {
            if supported && !body.flags.contains(BodyFlags::CROUCHING) && !self.jump.pressed {
                body.flags.insert(BodyFlags::JUMPING);
                body.flags.remove(BodyFlags::ON_LEDGE);
                self.jump.pressed = true;
            }
        } else if supported {
            self.jump.pressed = false;
        }

        if !body.flags.contains(BodyFlags::JUMPING) {
            self.jump.force = ctx.player.jump_force;
        } else if held && self.jump.force > ctx.gravity {
            body.velocity.y -= self.jump.force;
            self.jump.force *= ctx.player.jump_damping;
        } else {
            body.flags.remove(BodyFlags::JUMPING);
        }
    }

    fn update_height(&mut self, body: &mut Body) {
        if body.flags.contains(BodyFlags::CROUCHING) {
            body.height = self.duck_height;
        } else {
            // Keep the feet where they were when standing back up
            if body.height == self.duck_height {
                body.position.y -= (self.normal_height - self.duck_height) / 2.0;
            }
            body.height = self.normal_height;
        }
    }

    /// Full player frame: control, physics, then weapon and speed cap
    pub fn update<R: Rng>(
        &mut self,
        key: BodyKey,
        physics: &mut PhysicsWorld,
        ctx: &FrameContext<'_>,
        rng: &mut R,
    ) -> Update {
        let action = ctx.input.buttons.action;
        let mut update = Update::default();
        let dying = match physics.get_body_mut(key) {
            Some(body) => {
                self.control(body, ctx);
                body.flags.contains(BodyFlags::DYING)
            }
            None => return update,
        };

        if !dying {
            update.unconverged = physics.step_body(key);
        }

        let firing = match physics.get_body_mut(key) {
            Some(body) => {
                body.update_falling();
                self.running = action;
                action && body.velocity.x.abs() < 1.0 && !body.flags.contains(BodyFlags::ON_LEDGE)
            }
            None => return update,
        };

        if firing {
            if let Some(body) = physics.get_body_mut(key) {
                body.flags.insert(BodyFlags::ATTACKING);
            }
            update.shot = self.weapon.trigger(key, physics, ctx.viewport, rng, ctx.dt_ms);
            if let Some(shot) = &update.shot {
                debug!("shot hit {} bodies", shot.hits.len());
            }
        } else {
            self.weapon.holster();
            if let Some(body) = physics.get_body_mut(key) {
                body.flags.remove(BodyFlags::ATTACKING);
            }
        }

        if let Some(body) = physics.get_body_mut(key) {
            body.clamp_speed(self.max_speed);
        }
        update
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{Buttons, ControlIntent, InputConfig};
    use crate::enemy::SlimeConfig;
    use crate::viewport::Unbounded;
    use plat2d_math::Vec2;
    use plat2d_physics::Block;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const GRAVITY: f32 = 1.4;

    struct Rig {
        physics: PhysicsWorld,
        key: BodyKey,
        state: PlayerState,
        player: PlayerConfig,
        input: InputConfig,
        slime: SlimeConfig,
        rng: StdRng,
    }

    impl Rig {
        /// Player 32x48 standing on a wide floor whose top is y = 124
        fn on_floor() -> Self {
            let mut physics = PhysicsWorld::new();
            physics.add_collider(Block::new(Vec2::new(0.0, 162.0), 2000.0, 76.0, true));
            let key = physics.add_body(Body::new("player", Vec2::new(0.0, 100.0), 32.0, 48.0));
            let player = PlayerConfig::default();
            let state = PlayerState::new(48.0, &player, &WeaponConfig::default());
            let mut rig = Self {
                physics,
                key,
                state,
                player,
                input: InputConfig::default(),
                slime: SlimeConfig::default(),
                rng: StdRng::seed_from_u64(0),
            };
            rig.frame(FrameInput::default());
            rig
        }

        fn frame(&mut self, input: FrameInput) -> Update {
            let ctx = FrameContext {
                input: &input,
                viewport: &Unbounded,
                dt_ms: 16.0,
                gravity: GRAVITY,
                input_config: &self.input,
                player: &self.player,
                slime: &self.slime,
            };
            self.state.update(self.key, &mut self.physics, &ctx, &mut self.rng)
        }

        fn body(&self) -> &Body {
            self.physics.get_body(self.key).unwrap()
        }
    }

    fn held(x: f32, y: f32, jump: bool, action: bool) -> FrameInput {
        FrameInput::new(ControlIntent::new(x, y), Buttons { jump, action })
    }

    #[test]
    fn test_settles_on_floor() {
        let rig = Rig::on_floor();
        assert!(rig.body().flags.contains(BodyFlags::GROUNDED));
        assert!(!rig.body().flags.contains(BodyFlags::FALLING));
        assert_eq!(rig.body().foot(), 124.0);
    }

    #[test]
    fn test_walk_speed_is_capped() {
        let mut rig = Rig::on_floor();
        for _ in 0..60 {
            rig.frame(held(1.0, 0.0, false, false));
            assert!(rig.body().velocity.x.abs() <= rig.state.max_speed);
        }
        assert_eq!(rig.state.max_speed, 3.0);
        assert_eq!(rig.body().facing, Facing::Right);
        assert!(rig.body().position.x > 0.0);
    }

    #[test]
    fn test_running_raises_cap() {
        let mut rig = Rig::on_floor();
        for _ in 0..60 {
            rig.frame(held(-1.0, 0.0, false, true));
        }
        assert!(rig.state.running);
        assert_eq!(rig.state.max_speed, 5.0);
        assert_eq!(rig.body().facing, Facing::Left);
        // Moving too fast to shoot
        assert!(!rig.body().flags.contains(BodyFlags::ATTACKING));
    }

    #[test]
    fn test_jump_rises_then_lands() {
        let mut rig = Rig::on_floor();
        rig.frame(held(0.0, 0.0, true, false));
        assert!(rig.body().flags.contains(BodyFlags::JUMPING));
        assert!(rig.body().position.y < 100.0);

        let mut top = rig.body().position.y;
        for _ in 0..120 {
            rig.frame(held(0.0, 0.0, true, false));
            top = top.min(rig.body().position.y);
        }
        assert!(top < 60.0);
        // Holding the button does not re-trigger after landing
        assert!(rig.body().flags.contains(BodyFlags::GROUNDED));
        assert!(!rig.body().flags.contains(BodyFlags::JUMPING));
        assert!(rig.state.jump.pressed);

        // Release then press again jumps
        rig.frame(held(0.0, 0.0, false, false));
        assert!(!rig.state.jump.pressed);
        rig.frame(held(0.0, 0.0, true, false));
        assert!(rig.body().flags.contains(BodyFlags::JUMPING));
    }

    #[test]
    fn test_short_hop_when_released() {
        let mut tall = Rig::on_floor();
        let mut short = Rig::on_floor();
        let mut tall_top = f32::MAX;
        let mut short_top = f32::MAX;
        for frame in 0..40 {
            tall.frame(held(0.0, 0.0, true, false));
            short.frame(held(0.0, 0.0, frame < 2, false));
            tall_top = tall_top.min(tall.body().position.y);
            short_top = short_top.min(short.body().position.y);
        }
        assert!(short_top > tall_top);
    }

    #[test]
    fn test_crouch_shrinks_and_restores() {
        let mut rig = Rig::on_floor();
        for _ in 0..10 {
            rig.frame(held(0.0, 1.0, false, false));
        }
        assert!(rig.body().flags.contains(BodyFlags::CROUCHING));
        assert!((rig.body().height - 48.0 * 0.67).abs() < 0.0001);
        // Dropped onto the floor with the shorter box
        assert!(rig.body().flags.contains(BodyFlags::GROUNDED));
        assert!((rig.body().foot() - 124.0).abs() < 0.0001);

        rig.frame(held(0.0, 0.0, false, false));
        assert!(!rig.body().flags.contains(BodyFlags::CROUCHING));
        assert_eq!(rig.body().height, 48.0);
        assert!((rig.body().foot() - 124.0).abs() < 0.0001);
    }

    #[test]
    fn test_crouch_blocks_jump() {
        let mut rig = Rig::on_floor();
        rig.frame(held(0.0, 1.0, true, false));
        assert!(!rig.body().flags.contains(BodyFlags::JUMPING));
    }

    #[test]
    fn test_fires_when_standing_still() {
        let mut rig = Rig::on_floor();
        let update = rig.frame(held(0.0, 0.0, false, true));
        assert!(rig.body().flags.contains(BodyFlags::ATTACKING));
        let shot = update.shot.unwrap();
        assert_eq!(shot.shooter, rig.key);

        // Cool-down holds the next frame back
        assert!(rig.frame(held(0.0, 0.0, false, true)).shot.is_none());

        rig.frame(FrameInput::default());
        assert!(!rig.body().flags.contains(BodyFlags::ATTACKING));
        assert_eq!(rig.state.weapon.timer, rig.state.weapon.cooldown());
    }

    #[test]
    fn test_airborne_speed() {
        let mut rig = Rig::on_floor();
        rig.physics.get_body_mut(rig.key).unwrap().teleport(Vec2::new(0.0, -500.0));
        rig.frame(FrameInput::default());
        rig.frame(held(1.0, 0.0, false, false));
        assert_eq!(rig.state.speed, 0.6);
        assert!(rig.body().flags.contains(BodyFlags::FALLING));
    }

    #[test]
    fn test_dying_skips_physics() {
        let mut rig = Rig::on_floor();
        rig.physics.get_body_mut(rig.key).unwrap().flags.insert(BodyFlags::DYING);
        let before = rig.body().position;
        rig.frame(held(1.0, 0.0, false, false));
        assert_eq!(rig.body().position, before);
    }
}
