//! # Entity Model
//!
//! Placeable actors: the player and the monsters spawned by generation.

use crate::game::{new_entity_id, EntityId, Position, Rgb};
use serde::{Deserialize, Serialize};

/// Monster archetypes placed by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterKind {
    /// Weak, common monster
    Orc,
    /// Strong, rarer monster
    Troll,
}

impl MonsterKind {
    /// Display glyph.
    pub fn glyph(self) -> char {
        match self {
            MonsterKind::Orc => 'o',
            MonsterKind::Troll => 'T',
        }
    }

    /// Display colour.
    pub fn color(self) -> Rgb {
        match self {
            MonsterKind::Orc => Rgb(63, 127, 63),
            MonsterKind::Troll => Rgb(0, 127, 0),
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            MonsterKind::Orc => "Orc",
            MonsterKind::Troll => "Troll",
        }
    }
}

/// Any actor that occupies a cell.
///
/// Identity is the `id`, never the field values: two orcs on the same
/// cell are still two entities.
///
/// # Examples
///
/// ```
/// use delve::{Entity, Position};
///
/// let mut player = Entity::player(Position::new(3, 4));
/// player.move_by(1, -1);
/// assert_eq!(player.position, Position::new(4, 3));
/// assert_eq!(player.glyph, '@');
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub position: Position,
    pub glyph: char,
    pub color: Rgb,
    pub name: String,
}

impl Entity {
    /// Creates an entity with a fresh id.
    pub fn new(position: Position, glyph: char, color: Rgb, name: impl Into<String>) -> Self {
        Self {
            id: new_entity_id(),
            position,
            glyph,
            color,
            name: name.into(),
        }
    }

    /// The player character.
    pub fn player(position: Position) -> Self {
        Self::new(position, '@', Rgb::WHITE, "Player")
    }

    /// A monster of the given kind.
    pub fn monster(kind: MonsterKind, position: Position) -> Self {
        Self::new(position, kind.glyph(), kind.color(), kind.name())
    }

    /// Shifts the entity by a delta. No validation happens here.
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.position = self.position.offset(dx, dy);
    }

    /// Places the entity at an absolute coordinate.
    pub fn place(&mut self, x: i32, y: i32) {
        self.position = Position::new(x, y);
    }

    /// Returns true if the entity stands on `(x, y)`.
    pub fn is_at(&self, x: i32, y: i32) -> bool {
        self.position.x == x && self.position.y == y
    }
}
