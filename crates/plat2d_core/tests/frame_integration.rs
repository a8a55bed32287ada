//! Whole-frame tests driving a small level through `GameWorld::step`

use plat2d_core::{
    Block, Blueprint, BodyFlags, BodyOptions, Buttons, ControlIntent, Facing, FrameInput, GameWorld, TraitKind,
    Unbounded, Vec2, ViewRect, TILE_SIZE,
};

const FLOOR_TOP: f32 = 124.0;

fn level() -> GameWorld {
    let mut world = GameWorld::default();
    world.add_collider(Block::new(Vec2::new(0.0, 162.0), 4000.0, 76.0, true));
    world
}

fn idle() -> FrameInput {
    FrameInput::default()
}

fn holding(intent: ControlIntent, buttons: Buttons) -> FrameInput {
    FrameInput::new(intent, buttons)
}

#[test]
fn test_body_lands_on_block() {
    let mut world = GameWorld::default();
    // x in [50, 150], y in [124, 200]
    world.add_collider(Block::new(Vec2::new(100.0, 162.0), 100.0, 76.0, true));
    let crate_bp = Blueprint::new("crate", [TraitKind::RigidBody, TraitKind::Collider]);
    let key = world
        .spawn(&crate_bp, BodyOptions::at(Vec2::new(100.0, 100.0)).with_size(32.0, 48.0))
        .unwrap();

    world.step(&idle(), &Unbounded, 16.0);

    let body = world.body(key).unwrap();
    assert!(body.flags.contains(BodyFlags::GROUNDED));
    assert_eq!(body.hit_box().bottom(), FLOOR_TOP);
    assert_eq!(body.position.y, 100.0);
}

#[test]
fn test_player_walks_right() {
    let mut world = level();
    let player = world
        .spawn_standing(&Blueprint::player(TILE_SIZE), BodyOptions::standing_on(0.0, FLOOR_TOP))
        .unwrap();
    world.step(&idle(), &Unbounded, 16.0);

    let walk = holding(ControlIntent::new(1.0, 0.0), Buttons::default());
    for _ in 0..60 {
        world.step(&walk, &Unbounded, 16.0);
        let body = world.body(player).unwrap();
        assert!(body.velocity.x <= 3.0 + 0.0001);
        assert!((body.foot() - FLOOR_TOP).abs() < 0.001);
    }

    let body = world.body(player).unwrap();
    assert!(body.position.x > 100.0);
    assert_eq!(body.facing, Facing::Right);
    assert!(!body.flags.contains(BodyFlags::FALLING));
}

#[test]
fn test_player_jumps_and_lands() {
    let mut world = level();
    let player = world
        .spawn_standing(&Blueprint::player(TILE_SIZE), BodyOptions::standing_on(0.0, FLOOR_TOP))
        .unwrap();
    world.step(&idle(), &Unbounded, 16.0);
    let start = world.body(player).unwrap().position.y;

    let jump = holding(
        ControlIntent::IDLE,
        Buttons {
            jump: true,
            ..Default::default()
        },
    );
    for _ in 0..5 {
        world.step(&jump, &Unbounded, 16.0);
    }
    let body = world.body(player).unwrap();
    assert!(body.position.y < start - 10.0);
    assert!(body.flags.contains(BodyFlags::JUMPING));
    assert!(!body.flags.contains(BodyFlags::GROUNDED));

    for _ in 0..150 {
        world.step(&idle(), &Unbounded, 16.0);
    }
    let body = world.body(player).unwrap();
    assert!(body.flags.contains(BodyFlags::GROUNDED));
    assert!((body.foot() - FLOOR_TOP).abs() < 0.001);
}

#[test]
fn test_off_screen_slime_waits() {
    let mut world = level();
    let slime = world
        .spawn_standing(&Blueprint::blue_slime(TILE_SIZE), BodyOptions::standing_on(1500.0, FLOOR_TOP))
        .unwrap();
    let player = world
        .spawn_standing(&Blueprint::player(TILE_SIZE), BodyOptions::standing_on(0.0, FLOOR_TOP))
        .unwrap();
    let before = world.body(slime).unwrap().position;

    for _ in 0..30 {
        let focus = world.body(player).unwrap().position;
        world.step(&idle(), &ViewRect::centered(focus, 640.0, 480.0), 16.0);
    }

    assert_eq!(world.body(slime).unwrap().position, before);
}

#[test]
fn test_ray_ends_at_view_edge() {
    let mut world = level();
    world
        .spawn_standing(&Blueprint::player(TILE_SIZE), BodyOptions::standing_on(0.0, FLOOR_TOP))
        .unwrap();
    let fire = holding(
        ControlIntent::IDLE,
        Buttons {
            action: true,
            ..Default::default()
        },
    );

    let view = ViewRect::centered(Vec2::new(0.0, 100.0), 640.0, 480.0);
    let report = world.step(&fire, &view, 16.0);

    assert_eq!(report.shots.len(), 1);
    let ray = report.shots[0].ray;
    assert!(report.shots[0].hits.is_empty());
    assert!(ray.b.x > ray.a.x);
    assert!(ray.b.x <= 321.0);
    assert!(ray.b.x > 300.0);
}

#[test]
fn test_patrolling_slimes_stay_put_on_wide_floor() {
    let mut world = level();
    let green = world
        .spawn_standing(&Blueprint::green_slime(TILE_SIZE), BodyOptions::standing_on(-300.0, FLOOR_TOP))
        .unwrap();
    let blue = world
        .spawn_standing(&Blueprint::blue_slime(TILE_SIZE), BodyOptions::standing_on(300.0, FLOOR_TOP))
        .unwrap();

    for _ in 0..100 {
        let report = world.step(&idle(), &Unbounded, 16.0);
        assert!(report.unconverged.is_empty());
        assert!(report.removed.is_empty());
    }

    for key in [green, blue] {
        let body = world.body(key).unwrap();
        assert!(body.flags.contains(BodyFlags::GROUNDED));
        assert!(body.velocity.x > 0.0);
        assert!(body.velocity.x <= 2.0);
    }
    assert_eq!(world.actors().len(), 2);
}
