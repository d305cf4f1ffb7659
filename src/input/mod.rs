//! # Input Module
//!
//! Discrete input events and the fixed key bindings that turn them into
//! player actions.

pub mod commands;

pub use commands::*;

use crate::game::{Action, Direction, EntityId};
use serde::{Deserialize, Serialize};

/// Keys the engine can receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    Up,
    Down,
    Left,
    Right,
    Escape,
    /// A printable key
    Char(char),
    /// Anything without a dedicated variant
    Other,
}

/// One event from the input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputEvent {
    /// A key was pressed
    KeyDown(KeyCode),
    /// The input source is closing (window closed, end of input)
    Quit,
}

/// Input handler for turning events into player actions.
///
/// Only the four arrow keys and escape are bound. Arrow keys produce bump
/// actions so the action layer decides between moving and attacking.
#[derive(Debug, Clone, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{ActionKind, InputEvent, InputHandler, KeyCode};
    ///
    /// let handler = InputHandler::new();
    /// let player = delve::new_entity_id();
    ///
    /// let action = handler.event_to_action(&InputEvent::KeyDown(KeyCode::Up), player).unwrap();
    /// assert_eq!(action.kind, ActionKind::Bump { dx: 0, dy: -1 });
    /// let q = InputEvent::KeyDown(KeyCode::Char('q'));
    /// assert!(handler.event_to_action(&q, player).is_none());
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// Direction bound to a key, if any.
    pub fn direction_for(key: KeyCode) -> Option<Direction> {
        match key {
            KeyCode::Up => Some(Direction::North),
            KeyCode::Down => Some(Direction::South),
            KeyCode::Left => Some(Direction::West),
            KeyCode::Right => Some(Direction::East),
            _ => None,
        }
    }

    /// Maps an event to the action `player` should take.
    ///
    /// Returns None for events with no binding.
    pub fn event_to_action(&self, event: &InputEvent, player: EntityId) -> Option<Action> {
        match *event {
            InputEvent::Quit | InputEvent::KeyDown(KeyCode::Escape) => Some(Action::escape(player)),
            InputEvent::KeyDown(key) => Self::direction_for(key).map(|direction| {
                let delta = direction.to_delta();
                Action::bump(player, delta.x, delta.y)
            }),
        }
    }
}
