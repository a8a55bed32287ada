//! LevelBuilder - Declarative level construction
//!
//! Provides a fluent API for laying out colliders and characters.

use plat2d_core::{
    Block, Blueprint, BlueprintError, BodyOptions, Collider, GameWorld, OneWay, Rope, Slope, Vec2, WorldConfig,
};

/// Builder for platformer levels
///
/// Characters are queued and spawned by [`LevelBuilder::build`], with the
/// player last so it moves first every frame.
///
/// # Example
/// ```ignore
/// let world = LevelBuilder::new(WorldConfig::default())
///     .add_floor(0.0, 960.0, 480.0)
///     .add_blue_slime(600.0, 480.0)
///     .add_player(100.0, 480.0)
///     .build()?;
/// ```
pub struct LevelBuilder {
    world: GameWorld,
    tile: f32,
    enemies: Vec<(Blueprint, Vec2)>,
    player_start: Option<Vec2>,
}

impl LevelBuilder {
    /// Create a new level builder
    pub fn new(config: WorldConfig) -> Self {
        let tile = config.tile_size;
        Self {
            world: GameWorld::new(config),
            tile,
            enemies: Vec::new(),
            player_start: None,
        }
    }

    /// Add any collider
    pub fn add_collider(mut self, collider: impl Into<Collider>) -> Self {
        self.world.add_collider(collider);
        self
    }

    /// Add a one-tile-thick floor spanning `left..right` with its top at `top`
    pub fn add_floor(self, left: f32, right: f32, top: f32) -> Self {
        let center = Vec2::new((left + right) / 2.0, top + self.tile / 2.0);
        let width = right - left;
        let tile = self.tile;
        self.add_collider(Block::new(center, width, tile, true))
    }

    /// Add a one-tile-wide wall from `top` down to `bottom`
    ///
    /// Walls have no walkable top, so they cannot be ledge-grabbed.
    pub fn add_wall(self, x: f32, top: f32, bottom: f32) -> Self {
        let center = Vec2::new(x, (top + bottom) / 2.0);
        let tile = self.tile;
        self.add_collider(Block::new(center, tile, bottom - top, false))
    }

    /// Add a walkable ramp between two points, solid underneath
    ///
    /// The endpoints may come in either order. The higher one starts the
    /// hypotenuse so the slope resolves as a floor.
    pub fn add_ramp(self, from: Vec2, to: Vec2) -> Self {
        let (high, low) = if from.y <= to.y { (from, to) } else { (to, from) };
        let center = (high + low) / 2.0;
        self.add_collider(Slope::new(center, low.x - high.x, low.y - high.y, true))
    }

    /// Add a rope strung between two points
    pub fn add_rope(self, from: Vec2, to: Vec2) -> Self {
        let center = (from + to) / 2.0;
        self.add_collider(Rope::new(center, to.x - from.x, to.y - from.y))
    }

    /// Add a jump-through platform spanning `left..right` at height `y`
    pub fn add_one_way(self, left: f32, right: f32, y: f32) -> Self {
        self.add_collider(OneWay::new(Vec2::new((left + right) / 2.0, y), right - left))
    }

    /// Queue a slime that turns at walls
    pub fn add_green_slime(mut self, x: f32, ground_y: f32) -> Self {
        self.enemies.push((Blueprint::green_slime(self.tile), Vec2::new(x, ground_y)));
        self
    }

    /// Queue a slime that turns at walls and ledges
    pub fn add_blue_slime(mut self, x: f32, ground_y: f32) -> Self {
        self.enemies.push((Blueprint::blue_slime(self.tile), Vec2::new(x, ground_y)));
        self
    }

    /// Place the player with its feet at `ground_y`
    pub fn add_player(mut self, x: f32, ground_y: f32) -> Self {
        self.player_start = Some(Vec2::new(x, ground_y));
        self
    }

    /// Get the player's starting foot position (if a player was added)
    pub fn player_start(&self) -> Option<Vec2> {
        self.player_start
    }

    /// Spawn everything queued and return the world
    pub fn build(mut self) -> Result<GameWorld, BlueprintError> {
        for (blueprint, at) in &self.enemies {
            self.world
                .spawn_standing(blueprint, BodyOptions::standing_on(at.x, at.y))?;
        }
        if let Some(at) = self.player_start {
            self.world
                .spawn_standing(&Blueprint::player(self.tile), BodyOptions::standing_on(at.x, at.y))?;
        }
        Ok(self.world)
    }
}

impl Default for LevelBuilder {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plat2d_core::{Behavior, Body, BodyFlags};

    #[test]
    fn test_empty_level() {
        let world = LevelBuilder::default().build().unwrap();
        assert_eq!(world.physics().body_count(), 0);
        assert!(world.physics().colliders().is_empty());
    }

    #[test]
    fn test_floor_geometry() {
        let world = LevelBuilder::default().add_floor(0.0, 480.0, 300.0).build().unwrap();

        let colliders = world.physics().colliders();
        assert_eq!(colliders.len(), 1);
        match colliders[0] {
            Collider::Block(block) => {
                let hit_box = block.hit_box();
                assert_eq!(hit_box.top(), 300.0);
                assert_eq!(hit_box.left(), 0.0);
                assert_eq!(hit_box.right(), 480.0);
                assert!(block.has_top);
            }
            other => panic!("expected a block, got {}", other.kind_name()),
        }
    }

    #[test]
    fn test_walls_have_no_top() {
        let world = LevelBuilder::default().add_wall(96.0, 0.0, 300.0).build().unwrap();
        match world.physics().colliders()[0] {
            Collider::Block(block) => {
                assert!(!block.has_top);
                assert_eq!(block.height, 300.0);
            }
            other => panic!("expected a block, got {}", other.kind_name()),
        }
    }

    #[test]
    fn test_ramp_rope_and_one_way() {
        let world = LevelBuilder::default()
            .add_ramp(Vec2::new(0.0, 100.0), Vec2::new(100.0, 0.0))
            .add_rope(Vec2::new(100.0, 0.0), Vec2::new(200.0, 0.0))
            .add_one_way(200.0, 300.0, 50.0)
            .build()
            .unwrap();

        let kinds: Vec<_> = world.physics().colliders().iter().map(|c| c.kind_name()).collect();
        assert_eq!(kinds, vec!["slope", "rope", "one-way"]);

        match world.physics().colliders()[0] {
            Collider::Slope(slope) => {
                let hyp = slope.hypotenuse();
                assert_eq!(hyp.a, Vec2::new(100.0, 0.0));
                assert_eq!(hyp.b, Vec2::new(0.0, 100.0));
                assert!(slope.is_floor());
            }
            other => panic!("expected a slope, got {}", other.kind_name()),
        }
    }

    #[test]
    fn test_ramp_is_floor_either_way_round() {
        for (from, to) in [
            (Vec2::new(0.0, 100.0), Vec2::new(100.0, 0.0)),
            (Vec2::new(100.0, 0.0), Vec2::new(0.0, 100.0)),
            (Vec2::new(0.0, 0.0), Vec2::new(100.0, 100.0)),
        ] {
            let world = LevelBuilder::default().add_ramp(from, to).build().unwrap();
            match world.physics().colliders()[0] {
                Collider::Slope(slope) => assert!(slope.is_floor()),
                other => panic!("expected a slope, got {}", other.kind_name()),
            }
        }
    }

    #[test]
    fn test_body_lands_on_ramp() {
        let mut world = LevelBuilder::default()
            .add_ramp(Vec2::new(0.0, 100.0), Vec2::new(100.0, 0.0))
            .build()
            .unwrap();
        // The ramp surface is at y = 50 under x = 50
        let body = Body::new("crate", Vec2::new(50.0, 40.0), 10.0, 20.0).with_velocity(Vec2::new(0.0, 8.0));
        let key = world.physics_mut().add_body(body);

        let errors = world.physics_mut().step_body(key);

        assert!(errors.is_empty());
        let body = world.body(key).unwrap();
        assert!(body.flags.contains(BodyFlags::GROUNDED | BodyFlags::ON_SLOPE));
        assert!(!body.flags.contains(BodyFlags::BLOCKED));
        assert_eq!(body.position.x, 50.0);
        assert!(body.foot() <= 50.0);
    }

    #[test]
    fn test_player_spawns_last() {
        let builder = LevelBuilder::default()
            .add_floor(-500.0, 500.0, 124.0)
            .add_player(0.0, 124.0)
            .add_green_slime(200.0, 124.0)
            .add_blue_slime(-200.0, 124.0);
        assert_eq!(builder.player_start(), Some(Vec2::new(0.0, 124.0)));

        let world = builder.build().unwrap();
        let actors = world.actors();
        assert_eq!(actors.len(), 3);
        assert!(matches!(actors[0].behavior, Behavior::GreenSlime(_)));
        assert!(matches!(actors[1].behavior, Behavior::BlueSlime(_)));
        assert!(actors[2].behavior.is_player());

        let player = world.body(actors[2].key).unwrap();
        assert!((player.foot() - 124.0).abs() < 0.0001);
    }
}
