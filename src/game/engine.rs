//! # Turn Engine
//!
//! Owns the dungeon map for a session and runs one full turn per input
//! event: player action, enemy turns, then a field-of-view recompute. Turns
//! are synchronous and never interleave; rendering reads the map only after
//! `handle_event` returns.

use crate::game::{
    compute_fov, Action, ActionOutcome, DungeonMap, Entity, EntityId, RenderSnapshot,
};
use crate::generation::GeneratedDungeon;
use crate::input::{InputEvent, InputHandler};
use crate::{config, DelveError, DelveResult};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Turn engine parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Field-of-view radius in cells
    pub fov_radius: u32,
    /// Number of messages the log retains
    pub message_capacity: usize,
}

impl EngineConfig {
    /// Rejects settings the engine cannot run with.
    pub fn validate(&self) -> DelveResult<()> {
        if self.message_capacity == 0 {
            return Err(DelveError::InvalidConfig(
                "message_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fov_radius: config::DEFAULT_FOV_RADIUS,
            message_capacity: config::DEFAULT_MESSAGE_CAPACITY,
        }
    }
}

/// Bounded, oldest-first log of narrative messages.
#[derive(Debug, Clone)]
pub struct MessageLog {
    messages: VecDeque<String>,
    capacity: usize,
}

impl MessageLog {
    /// Creates an empty log holding at most `capacity` messages.
    pub fn new(capacity: usize) -> Self {
        Self {
            messages: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a message, evicting the oldest when full.
    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!("{}", message);
        if self.messages.len() == self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }

    /// Iterates oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.messages.iter()
    }

    /// The newest `count` messages, oldest first.
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &String> {
        self.messages.iter().skip(self.messages.len().saturating_sub(count))
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// What a single input event did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The event mapped to no action; nothing advanced
    Ignored,
    /// A full turn ran
    Completed,
    /// The player asked to leave; no further turns should run
    Quit,
}

/// The session: map, player reference and turn sequencing.
#[derive(Debug)]
pub struct Engine {
    map: DungeonMap,
    player_id: EntityId,
    input_handler: InputHandler,
    config: EngineConfig,
    messages: MessageLog,
    turn_number: u64,
}

impl Engine {
    /// Starts a session on a freshly generated dungeon.
    pub fn new(dungeon: GeneratedDungeon, config: EngineConfig) -> DelveResult<Self> {
        Self::from_map(dungeon.map, dungeon.player_id, config)
    }

    /// Starts a session on an existing map whose entities include the player.
    ///
    /// Visibility is computed immediately so the first frame shows the
    /// player's surroundings.
    pub fn from_map(
        map: DungeonMap,
        player_id: EntityId,
        config: EngineConfig,
    ) -> DelveResult<Self> {
        config.validate()?;
        if map.entity(player_id).is_none() {
            return Err(DelveError::InvalidState(format!(
                "Player {} is not on the map",
                player_id
            )));
        }

        let mut engine = Self {
            map,
            player_id,
            input_handler: InputHandler::new(),
            messages: MessageLog::new(config.message_capacity),
            config,
            turn_number: 0,
        };
        engine.update_fov()?;

        Ok(engine)
    }

    /// Runs one turn for an input event.
    ///
    /// Unrecognized events change nothing. Escape ends the session before
    /// any enemy turn or visibility update.
    pub fn handle_event(&mut self, event: &InputEvent) -> DelveResult<TurnOutcome> {
        let Some(action) = self.input_handler.event_to_action(event, self.player_id) else {
            debug!("Ignoring unbound input {:?}", event);
            return Ok(TurnOutcome::Ignored);
        };

        self.perform_player_action(action)
    }

    /// Performs a player action and the rest of the turn.
    pub fn perform_player_action(&mut self, action: Action) -> DelveResult<TurnOutcome> {
        let outcome = action.perform(&mut self.map)?;
        debug!("Turn {}: {:?} -> {:?}", self.turn_number + 1, action.kind, outcome);

        if outcome == ActionOutcome::Quit {
            info!("Player quit after {} turns", self.turn_number);
            return Ok(TurnOutcome::Quit);
        }
        if let Some(message) = outcome.message() {
            self.messages.push(message);
        }

        self.handle_enemy_turns();
        self.update_fov()?;
        self.turn_number += 1;

        Ok(TurnOutcome::Completed)
    }

    /// Gives every non-player entity its (placeholder) turn.
    pub fn handle_enemy_turns(&mut self) {
        let lines: Vec<String> = self
            .map
            .entities_except(self.player_id)
            .map(|entity| {
                format!(
                    "The {} wonders when it will get to take a real turn.",
                    entity.name
                )
            })
            .collect();

        for line in lines {
            self.messages.push(line);
        }
    }

    /// Replaces `visible` with the view from the player and folds it into `explored`.
    pub fn update_fov(&mut self) -> DelveResult<()> {
        let origin = self
            .player()
            .ok_or_else(|| DelveError::InvalidState("No player found".to_string()))?
            .position;
        let visible = compute_fov(&self.map, origin, self.config.fov_radius)?;
        self.map.replace_visible(visible)
    }

    /// The player entity, if it is still on the map.
    pub fn player(&self) -> Option<&Entity> {
        self.map.entity(self.player_id)
    }

    pub fn player_id(&self) -> EntityId {
        self.player_id
    }

    pub fn map(&self) -> &DungeonMap {
        &self.map
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    /// Number of completed turns.
    pub fn turn_number(&self) -> u64 {
        self.turn_number
    }

    /// Tile appearance for every cell, for the presentation layer.
    pub fn render_snapshot(&self) -> RenderSnapshot {
        self.map.render_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{MonsterKind, Position, Tile};
    use crate::input::KeyCode;

    /// A 9x9 floor area inside a wall border, player in the middle.
    fn engine_with_room() -> Engine {
        let mut map = DungeonMap::new(11, 11);
        for y in 1..10 {
            for x in 1..10 {
                map.set_tile(x, y, Tile::FLOOR).unwrap();
            }
        }
        let player = map.add_entity(Entity::player(Position::new(5, 5)));
        Engine::from_map(map, player, EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_message_log_evicts_oldest() {
        let mut log = MessageLog::new(2);
        log.push("one");
        log.push("two");
        log.push("three");

        let all: Vec<&String> = log.iter().collect();
        assert_eq!(all, vec!["two", "three"]);
        assert_eq!(log.recent(1).collect::<Vec<_>>(), vec!["three"]);
        assert_eq!(log.recent(10).count(), 2);
    }

    #[test]
    fn test_engine_rejects_zero_message_capacity() {
        let mut map = DungeonMap::new(3, 3);
        map.set_tile(1, 1, Tile::FLOOR).unwrap();
        let player = map.add_entity(Entity::player(Position::new(1, 1)));
        let config = EngineConfig {
            message_capacity: 0,
            ..EngineConfig::default()
        };
        assert!(Engine::from_map(map, player, config).is_err());
    }

    #[test]
    fn test_engine_requires_player_on_map() {
        let map = DungeonMap::new(3, 3);
        let result = Engine::from_map(map, crate::game::new_entity_id(), EngineConfig::default());
        assert!(matches!(result, Err(DelveError::InvalidState(_))));
    }

    #[test]
    fn test_initial_fov_computed() {
        let engine = engine_with_room();
        assert!(engine.map().is_visible(5, 5));
        assert!(engine.map().is_explored(1, 1));
        assert_eq!(engine.turn_number(), 0);
    }

    #[test]
    fn test_arrow_key_moves_player() {
        let mut engine = engine_with_room();
        let outcome = engine.handle_event(&InputEvent::KeyDown(KeyCode::Right)).unwrap();

        assert_eq!(outcome, TurnOutcome::Completed);
        assert_eq!(engine.player().unwrap().position, Position::new(6, 5));
        assert_eq!(engine.turn_number(), 1);
    }

    #[test]
    fn test_unbound_key_is_ignored() {
        let mut engine = engine_with_room();
        engine.map.add_entity(Entity::monster(MonsterKind::Orc, Position::new(2, 2)));
        let visible_before = engine.map().visible().to_vec();

        let outcome = engine.handle_event(&InputEvent::KeyDown(KeyCode::Char('x'))).unwrap();

        assert_eq!(outcome, TurnOutcome::Ignored);
        assert_eq!(engine.map().visible(), visible_before.as_slice());
        assert!(engine.messages().is_empty());
        assert_eq!(engine.turn_number(), 0);
    }

    #[test]
    fn test_escape_quits_without_enemy_turns() {
        let mut engine = engine_with_room();
        engine.map.add_entity(Entity::monster(MonsterKind::Orc, Position::new(2, 2)));

        let outcome = engine.handle_event(&InputEvent::KeyDown(KeyCode::Escape)).unwrap();

        assert_eq!(outcome, TurnOutcome::Quit);
        assert!(engine.messages().is_empty());
        assert_eq!(engine.turn_number(), 0);
    }

    #[test]
    fn test_enemy_turns_emit_one_message_each() {
        let mut engine = engine_with_room();
        engine.map.add_entity(Entity::monster(MonsterKind::Orc, Position::new(2, 2)));
        engine.map.add_entity(Entity::monster(MonsterKind::Troll, Position::new(8, 8)));

        engine.handle_event(&InputEvent::KeyDown(KeyCode::Up)).unwrap();

        let messages: Vec<&String> = engine.messages().iter().collect();
        assert_eq!(
            messages,
            vec![
                "The Orc wonders when it will get to take a real turn.",
                "The Troll wonders when it will get to take a real turn."
            ]
        );
    }

    #[test]
    fn test_bump_attack_logs_before_enemy_turns() {
        let mut engine = engine_with_room();
        engine.map.add_entity(Entity::monster(MonsterKind::Orc, Position::new(5, 4)));

        engine.handle_event(&InputEvent::KeyDown(KeyCode::Up)).unwrap();

        assert_eq!(engine.player().unwrap().position, Position::new(5, 5));
        let messages: Vec<&String> = engine.messages().iter().collect();
        assert_eq!(messages[0], "You kick the Orc, much to its annoyance!");
        assert_eq!(messages.len(), 2);
    }

    #[test]
    fn test_blocked_move_still_completes_turn() {
        let mut map = DungeonMap::new(3, 3);
        map.set_tile(1, 1, Tile::FLOOR).unwrap();
        let player = map.add_entity(Entity::player(Position::new(1, 1)));
        let mut engine = Engine::from_map(map, player, EngineConfig::default()).unwrap();

        let outcome = engine.handle_event(&InputEvent::KeyDown(KeyCode::Left)).unwrap();
        assert_eq!(outcome, TurnOutcome::Completed);
        assert_eq!(engine.player().unwrap().position, Position::new(1, 1));
        assert_eq!(engine.turn_number(), 1);
    }
}
