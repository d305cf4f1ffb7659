//! # Action System
//!
//! A closed set of one-turn commands. Every action is bound to the entity
//! performing it and is resolved against the dungeon map by a single
//! `perform` call. Guard failures are outcomes, not errors: a blocked move
//! simply declines, a swing at empty air does nothing.

use crate::game::{DungeonMap, EntityId, Position};
use crate::{DelveError, DelveResult};
use log::debug;

/// What an action tries to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Step by `(dx, dy)` if the destination is in bounds, walkable and empty
    Move { dx: i32, dy: i32 },
    /// Attack whatever stands at `(dx, dy)` from the actor
    MeleeAttack { dx: i32, dy: i32 },
    /// Attack if the destination is occupied, otherwise move
    Bump { dx: i32, dy: i32 },
    /// End the session
    Escape,
}

/// The result of performing an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The actor moved
    Moved { from: Position, to: Position },
    /// The actor hit another entity
    Attacked { target: EntityId, message: String },
    /// A guard failed; nothing changed
    Declined,
    /// The session should end now
    Quit,
}

impl ActionOutcome {
    /// Flavor text produced by this outcome, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            ActionOutcome::Attacked { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// An action bound to its acting entity.
///
/// # Examples
///
/// ```
/// use delve::{Action, ActionOutcome, DungeonMap, Entity, Position, Tile};
///
/// let mut map = DungeonMap::new(3, 1);
/// map.set_tile(0, 0, Tile::FLOOR).unwrap();
/// map.set_tile(1, 0, Tile::FLOOR).unwrap();
/// let player = map.add_entity(Entity::player(Position::new(0, 0)));
///
/// let outcome = Action::bump(player, 1, 0).perform(&mut map).unwrap();
/// assert!(matches!(outcome, ActionOutcome::Moved { .. }));
///
/// // (2, 0) is a wall: the move declines silently.
/// let outcome = Action::bump(player, 1, 0).perform(&mut map).unwrap();
/// assert_eq!(outcome, ActionOutcome::Declined);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    pub actor: EntityId,
    pub kind: ActionKind,
}

impl Action {
    /// Creates an action.
    pub fn new(actor: EntityId, kind: ActionKind) -> Self {
        Self { actor, kind }
    }

    /// Bump in a direction; the only directional action built from input.
    pub fn bump(actor: EntityId, dx: i32, dy: i32) -> Self {
        Self::new(actor, ActionKind::Bump { dx, dy })
    }

    /// Plain movement.
    pub fn movement(actor: EntityId, dx: i32, dy: i32) -> Self {
        Self::new(actor, ActionKind::Move { dx, dy })
    }

    /// Melee attack.
    pub fn melee(actor: EntityId, dx: i32, dy: i32) -> Self {
        Self::new(actor, ActionKind::MeleeAttack { dx, dy })
    }

    /// Escape.
    pub fn escape(actor: EntityId) -> Self {
        Self::new(actor, ActionKind::Escape)
    }

    /// Resolves this action against the map.
    ///
    /// Errors only when the actor is not on the map.
    pub fn perform(&self, map: &mut DungeonMap) -> DelveResult<ActionOutcome> {
        match self.kind {
            ActionKind::Escape => Ok(ActionOutcome::Quit),
            ActionKind::Bump { dx, dy } => self.perform_bump(map, dx, dy),
            ActionKind::MeleeAttack { dx, dy } => self.perform_melee(map, dx, dy),
            ActionKind::Move { dx, dy } => self.perform_move(map, dx, dy),
        }
    }

    fn destination(&self, map: &DungeonMap, dx: i32, dy: i32) -> DelveResult<Position> {
        map.entity(self.actor)
            .map(|actor| actor.position.offset(dx, dy))
            .ok_or_else(|| {
                DelveError::InvalidState(format!("Acting entity {} is not on the map", self.actor))
            })
    }

    fn perform_bump(&self, map: &mut DungeonMap, dx: i32, dy: i32) -> DelveResult<ActionOutcome> {
        let dest = self.destination(map, dx, dy)?;

        if map.is_occupied(dest) {
            self.perform_melee(map, dx, dy)
        } else {
            self.perform_move(map, dx, dy)
        }
    }

    fn perform_melee(&self, map: &mut DungeonMap, dx: i32, dy: i32) -> DelveResult<ActionOutcome> {
        let dest = self.destination(map, dx, dy)?;

        let Some(target) = map.blocking_entity_at(dest.x, dest.y) else {
            return Ok(ActionOutcome::Declined);
        };

        let message = format!("You kick the {}, much to its annoyance!", target.name);
        debug!("{} attacks {} at {:?}", self.actor, target.id, dest);

        Ok(ActionOutcome::Attacked {
            target: target.id,
            message,
        })
    }

    fn perform_move(&self, map: &mut DungeonMap, dx: i32, dy: i32) -> DelveResult<ActionOutcome> {
        let dest = self.destination(map, dx, dy)?;

        if !map.in_bounds(dest.x, dest.y) {
            return Ok(ActionOutcome::Declined);
        }
        if !map.is_walkable(dest.x, dest.y)? {
            return Ok(ActionOutcome::Declined);
        }
        if map.is_occupied(dest) {
            return Ok(ActionOutcome::Declined);
        }

        let actor = map.entity_mut(self.actor).ok_or_else(|| {
            DelveError::InvalidState(format!("Acting entity {} is not on the map", self.actor))
        })?;
        let from = actor.position;
        actor.move_by(dx, dy);

        Ok(ActionOutcome::Moved {
            from,
            to: actor.position,
        })
    }
}
