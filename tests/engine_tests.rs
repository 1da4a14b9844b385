//! Engine behaviour through the facade: generated levels, AI and full matches

use std::collections::HashSet;

use tui_bomber::core::{Actor, GameEvent, GameState, LevelLayout, Phase};
use tui_bomber::types::{Coordinate, Direction, EnemyId, POINTS_FOR_ENEMY, SPAWN};

fn loaded(seed: u32) -> GameState {
    let mut game = GameState::new(seed);
    game.start_level(1).unwrap();
    let _ = game.drain_events();
    game
}

#[test]
fn test_same_seed_same_match() {
    let mut a = GameState::new(99);
    let mut b = GameState::new(99);
    a.start_level(1).unwrap();
    b.start_level(1).unwrap();

    for _ in 0..25 {
        a.move_enemies();
        b.move_enemies();
    }
    let a_events: Vec<GameEvent> = a.drain_events().collect();
    let b_events: Vec<GameEvent> = b.drain_events().collect();
    assert_eq!(a_events, b_events);
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_enemy_ai_invariants_on_generated_levels() {
    for seed in 1..=30 {
        let mut game = loaded(seed);
        for _ in 0..60 {
            if game.phase() != Phase::LevelActive {
                break;
            }
            game.move_enemies();

            let grid = game.grid().unwrap();
            let mut seen = HashSet::new();
            for (id, enemy) in game.enemies() {
                let p = enemy.position;
                assert!(!p.in_spawn_corner(), "seed {}: {:?} entered safe zone", seed, id);
                assert!(grid.is_walkable(p), "seed {}: {:?} on terrain at {}", seed, id, p);
                assert!(seen.insert(p), "seed {}: two enemies on {}", seed, p);
            }
        }
    }
}

#[test]
fn test_enemy_moves_one_tile_at_a_time() {
    let mut game = loaded(5);
    for _ in 0..40 {
        game.move_enemies();
    }
    for event in game.drain_events() {
        if let GameEvent::PositionChanged {
            actor: Actor::Enemy(_),
            from,
            to,
            direction,
            ..
        } = event
        {
            assert_eq!(from.step(direction, 1), to);
        }
    }
}

#[test]
fn test_rejected_actions_emit_nothing() {
    let mut game = loaded(3);
    assert!(!game.release_bomb());
    assert!(!game.move_player(Direction::Up));
    assert!(!game.move_player(Direction::Left));
    assert_eq!(game.drain_events().count(), 0);
    assert_eq!(game.player().position, SPAWN);
}

#[test]
fn test_clear_a_scripted_level() {
    use Direction::*;

    // One enemy with two hit points guards the corridor; the door waits at (5, 3)
    let layout = LevelLayout::bare(15, 9)
        .with_enemy(Coordinate::new(7, 1), 2)
        .with_exit_door(Coordinate::new(5, 3));
    let mut game = GameState::new(11);
    game.load_layout(1, layout);
    let _ = game.drain_events();

    let walk = |game: &mut GameState, path: &[Direction]| {
        for &d in path {
            assert!(game.move_player(d), "blocked moving {:?}", d);
        }
    };

    for round in 0..2 {
        walk(&mut game, &[Right, Right, Right, Right, Right]);
        assert!(game.release_bomb());
        walk(&mut game, &[Left, Left]);
        game.explode_bomb();
        let batch: Vec<GameEvent> = game.drain_events().collect();

        if round == 0 {
            assert!(batch.contains(&GameEvent::EnemyWounded { enemy: EnemyId(0) }));
        } else {
            assert!(batch.contains(&GameEvent::EnemyDead { enemy: EnemyId(0) }));
            assert_eq!(batch.last(), Some(&GameEvent::DoorOpened));
        }
        walk(&mut game, &[Left, Left, Left]);
    }
    assert_eq!(game.score(), POINTS_FOR_ENEMY);

    walk(&mut game, &[Right, Right, Right, Right, Down, Down]);
    assert_eq!(game.phase(), Phase::LevelCleared);
    assert_eq!(game.drain_events().last(), Some(GameEvent::Victory));

    game.next_level().unwrap();
    assert_eq!(game.level_number(), 2);
    assert_eq!(game.score(), POINTS_FOR_ENEMY);
    assert!(game.enemies().iter().all(|(_, e)| e.hp == 2));
}

#[test]
#[should_panic(expected = "reset_match")]
fn test_start_level_after_game_over_panics() {
    let layout = LevelLayout::bare(15, 9).with_enemy(Coordinate::new(2, 1), 1);
    let mut game = GameState::new(1);
    game.load_layout(1, layout);

    // Stepping onto the enemy three times ends the match
    for _ in 0..3 {
        game.move_player(Direction::Right);
    }
    assert_eq!(game.phase(), Phase::GameOver);
    let _ = game.start_level(1);
}
