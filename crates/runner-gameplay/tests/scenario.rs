//! Frame-level scenarios driven through the public API.

use runner_gameplay::prelude::*;

const GROUND: f32 = 328.5;

fn setup(seed: u64) -> (Player, GameContext) {
    let config = GameConfig::default();
    let mut ctx = GameContext::with_seed(&config, seed);
    let player = Player::new(&config.player, &mut ctx);
    (player, ctx)
}

fn enemy_box(x: f32, y: f32) -> Enemy {
    Enemy::with_size(EnemyKind::Ground, Vec2::new(x, y), Vec2::new(40.0, 40.0))
}

#[test]
fn test_running_into_enemy_is_hit() {
    let (mut player, mut ctx) = setup(11);
    player.set_position(Vec2::new(400.0, GROUND));
    player.set_state(PlayerState::Running, SCROLL_RUN, &mut ctx);
    ctx.add_enemy(enemy_box(420.0, GROUND));
    ctx.drain_events();

    player.update(&Input::new(), 16.0, &mut ctx);

    assert!(ctx.enemies()[0].is_marked_for_deletion());
    assert_eq!(ctx.effects().len(), 1);
    assert_eq!(ctx.effects()[0].center(), Vec2::new(440.0, GROUND + 20.0));
    assert_eq!(player.state(), PlayerState::Hit);
    assert_eq!(ctx.speed(), 0.0);
    assert_eq!(player.speed(), 0.0);
    assert_eq!(ctx.score(), 0);

    let events = ctx.drain_events();
    assert!(events.iter().any(|e| matches!(e, GameEvent::PlayerHit { .. })));
    assert!(events.contains(&GameEvent::StateChanged {
        from: PlayerState::Running,
        to: PlayerState::Hit,
    }));
}

#[test]
fn test_rolling_into_enemy_scores() {
    let (mut player, mut ctx) = setup(12);
    player.set_position(Vec2::new(400.0, GROUND));
    player.set_state(PlayerState::Rolling, SCROLL_ROLL, &mut ctx);
    ctx.add_enemy(enemy_box(420.0, GROUND));

    let hold_roll = Input::from_actions([Action::MoveDown]);
    player.update(&hold_roll, 16.0, &mut ctx);

    assert_eq!(ctx.score(), 1);
    assert!(ctx.enemies()[0].is_marked_for_deletion());
    assert_eq!(ctx.effects()[0].center(), Vec2::new(440.0, GROUND + 20.0));
    assert_eq!(player.state(), PlayerState::Rolling);
    assert_eq!(ctx.speed(), ctx.max_speed() * SCROLL_ROLL);
}

#[test]
fn test_collision_hit_overrides_held_keys() {
    let (mut player, mut ctx) = setup(14);
    player.set_position(Vec2::new(400.0, GROUND));
    player.set_state(PlayerState::Running, SCROLL_RUN, &mut ctx);
    ctx.add_enemy(enemy_box(420.0, GROUND));
    ctx.add_enemy(enemy_box(450.0, GROUND + 10.0));
    ctx.drain_events();

    let run_and_jump = Input::from_actions([Action::MoveRight, Action::Jump]);
    player.update(&run_and_jump, 16.0, &mut ctx);

    assert_eq!(player.state(), PlayerState::Hit);
    assert_eq!(player.position(), Vec2::new(400.0, GROUND));
    assert_eq!(player.speed(), 0.0);
    assert_eq!(ctx.speed(), 0.0);

    assert!(ctx.enemies().iter().all(Enemy::is_marked_for_deletion));
    assert_eq!(ctx.effects().len(), 2);
    assert_eq!(ctx.score(), 0);

    let hits = ctx
        .drain_events()
        .iter()
        .filter(|e| matches!(e, GameEvent::PlayerHit { .. }))
        .count();
    assert_eq!(hits, 2);
}

#[test]
fn test_flagged_enemy_is_not_hit_twice() {
    let (mut player, mut ctx) = setup(13);
    player.set_position(Vec2::new(400.0, GROUND));
    player.set_state(PlayerState::Running, SCROLL_RUN, &mut ctx);
    ctx.add_enemy(enemy_box(420.0, GROUND));

    player.update(&Input::new(), 16.0, &mut ctx);
    player.update(&Input::new(), 16.0, &mut ctx);

    assert_eq!(ctx.effects().len(), 1);
}

#[test]
fn test_session_level_run() {
    let mut session = Session::try_new(&GameConfig::default(), 21).unwrap();
    let run = Input::from_actions([Action::MoveRight]);
    let roll = Input::from_actions([Action::MoveRight, Action::MoveDown]);

    session.update(&run, 16.0);
    session.update(&roll, 16.0);
    let x = session.player().position().x;
    session.spawn_enemy(enemy_box(x + 30.0, GROUND + 10.0));

    for _ in 0..5 {
        session.update(&roll, 16.0);
    }

    assert_eq!(session.score(), 1);
    assert!(session.context().enemies().is_empty());
    assert_eq!(session.frame(), 7);
}
