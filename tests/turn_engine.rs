//! Integration tests for the turn loop: input events through actions, enemy
//! turns, visibility and rendering.

use delve::{
    parse_key_token, render_frame, DelveResult, DungeonMap, Engine, EngineConfig, Entity,
    InputEvent, KeyCode, MessagePanel, MonsterKind, Position, TextDisplay, Tile, TurnOutcome,
};

/// Two rooms, x 1..5 and x 13..18 over rows 1..5, joined by a corridor
/// along row 3.
fn two_room_map() -> DelveResult<DungeonMap> {
    let mut map = DungeonMap::new(20, 8);
    for y in 1..5 {
        for x in 1..5 {
            map.set_tile(x, y, Tile::FLOOR)?;
        }
        for x in 13..18 {
            map.set_tile(x, y, Tile::FLOOR)?;
        }
    }
    for x in 5..13 {
        map.set_tile(x, 3, Tile::FLOOR)?;
    }
    Ok(map)
}

fn engine_at(position: Position, fov_radius: u32) -> DelveResult<Engine> {
    let mut map = two_room_map()?;
    let player = map.add_entity(Entity::player(position));
    Engine::from_map(
        map,
        player,
        EngineConfig {
            fov_radius,
            ..EngineConfig::default()
        },
    )
}

fn press(engine: &mut Engine, token: &str) -> DelveResult<TurnOutcome> {
    engine.handle_event(&parse_key_token(token))
}

#[test]
fn test_walk_down_corridor_updates_view() -> DelveResult<()> {
    let mut engine = engine_at(Position::new(2, 3), 4)?;
    assert!(!engine.map().is_visible(14, 3));

    for _ in 0..8 {
        assert_eq!(press(&mut engine, "right")?, TurnOutcome::Completed);
    }

    assert_eq!(engine.player().unwrap().position, Position::new(10, 3));
    assert_eq!(engine.turn_number(), 8);
    assert!(engine.map().is_visible(14, 3));
    // left room is out of range now but stays remembered
    assert!(!engine.map().is_visible(2, 3));
    assert!(engine.map().is_explored(2, 3));

    Ok(())
}

#[test]
fn test_explored_never_shrinks() -> DelveResult<()> {
    let mut engine = engine_at(Position::new(2, 3), 3)?;
    let mut previous = engine.map().explored().to_vec();

    for token in ["right", "right", "right", "right", "left", "up", "down", "right"] {
        press(&mut engine, token)?;
        let explored = engine.map().explored();
        for (before, after) in previous.iter().zip(explored) {
            assert!(!before || *after);
        }
        previous = explored.to_vec();
    }

    Ok(())
}

#[test]
fn test_unrecognized_key_changes_nothing() -> DelveResult<()> {
    let mut engine = engine_at(Position::new(2, 2), 8)?;
    let frame_before = TextDisplay::new().render(engine.map());
    let visible_before = engine.map().visible().to_vec();
    let explored_before = engine.map().explored().to_vec();

    for token in ["x", "pageup", "k"] {
        assert_eq!(press(&mut engine, token)?, TurnOutcome::Ignored);
    }

    assert_eq!(engine.map().visible(), visible_before.as_slice());
    assert_eq!(engine.map().explored(), explored_before.as_slice());
    assert_eq!(TextDisplay::new().render(engine.map()), frame_before);
    assert!(engine.messages().is_empty());
    assert_eq!(engine.turn_number(), 0);

    Ok(())
}

#[test]
fn test_bump_attack_then_enemy_turns() -> DelveResult<()> {
    let mut map = two_room_map()?;
    let player = map.add_entity(Entity::player(Position::new(2, 2)));
    map.add_entity(Entity::monster(MonsterKind::Troll, Position::new(3, 2)));
    map.add_entity(Entity::monster(MonsterKind::Orc, Position::new(15, 4)));
    let mut engine = Engine::from_map(map, player, EngineConfig::default())?;

    assert_eq!(press(&mut engine, "right")?, TurnOutcome::Completed);

    assert_eq!(engine.player().unwrap().position, Position::new(2, 2));
    let messages: Vec<&String> = engine.messages().iter().collect();
    assert_eq!(
        messages,
        vec![
            "You kick the Troll, much to its annoyance!",
            "The Troll wonders when it will get to take a real turn.",
            "The Orc wonders when it will get to take a real turn.",
        ]
    );

    Ok(())
}

#[test]
fn test_quit_event_and_escape_key() -> DelveResult<()> {
    let mut engine = engine_at(Position::new(2, 2), 8)?;
    assert_eq!(engine.handle_event(&InputEvent::Quit)?, TurnOutcome::Quit);

    let mut engine = engine_at(Position::new(2, 2), 8)?;
    assert_eq!(
        engine.handle_event(&InputEvent::KeyDown(KeyCode::Escape))?,
        TurnOutcome::Quit
    );
    assert_eq!(engine.turn_number(), 0);

    Ok(())
}

#[test]
fn test_walls_block_movement() -> DelveResult<()> {
    let mut engine = engine_at(Position::new(1, 1), 8)?;

    for token in ["up", "left"] {
        assert_eq!(press(&mut engine, token)?, TurnOutcome::Completed);
        assert_eq!(engine.player().unwrap().position, Position::new(1, 1));
    }
    assert_eq!(engine.turn_number(), 2);

    Ok(())
}

#[test]
fn test_rendered_frame_shows_player_and_messages() -> DelveResult<()> {
    let mut map = two_room_map()?;
    let player = map.add_entity(Entity::player(Position::new(2, 2)));
    map.add_entity(Entity::monster(MonsterKind::Orc, Position::new(3, 2)));
    map.add_entity(Entity::monster(MonsterKind::Troll, Position::new(15, 2)));
    let mut engine = Engine::from_map(map, player, EngineConfig::default())?;

    press(&mut engine, "right")?;
    let frame = render_frame(&engine, &TextDisplay::new(), &MessagePanel::new(1, 80));
    let lines: Vec<&str> = frame.lines().collect();

    assert_eq!(lines.len(), 9);
    assert_eq!(&lines[2][..6], "#.@o.#");
    // the troll's room is out of sight
    assert!(!lines[2].contains('T'));
    assert_eq!(lines[8], "The Troll wonders when it will get to take a real turn.");

    Ok(())
}
