//! # Encounter Generation
//!
//! Scatters monsters through a freshly carved room.

use crate::game::{DungeonMap, Entity, MonsterKind, Position};
use crate::generation::RectangularRoom;
use crate::DelveResult;
use log::debug;
use rand::{rngs::StdRng, Rng};

/// Chance that a spawned monster is the weak kind.
pub const WEAK_MONSTER_CHANCE: f64 = 0.8;

/// Rolls the kind of a single monster.
pub fn roll_monster_kind(rng: &mut StdRng) -> MonsterKind {
    if rng.gen_bool(WEAK_MONSTER_CHANCE) {
        MonsterKind::Orc
    } else {
        MonsterKind::Troll
    }
}

/// Places between zero and `max_monsters` monsters inside `room`.
///
/// Each candidate cell is drawn from the room's floor; a candidate that lands
/// on an occupied cell is dropped rather than redrawn. Returns how many
/// monsters were actually placed.
pub fn place_entities(
    room: &RectangularRoom,
    map: &mut DungeonMap,
    max_monsters: u32,
    rng: &mut StdRng,
) -> DelveResult<usize> {
    if room.inner_x().is_empty() || room.inner_y().is_empty() {
        return Ok(0);
    }

    let count = rng.gen_range(0..=max_monsters);
    let mut placed = 0;

    for _ in 0..count {
        let x = rng.gen_range(room.x1 + 1..=room.x2 - 1);
        let y = rng.gen_range(room.y1 + 1..=room.y2 - 1);
        let position = Position::new(x, y);

        if map.is_occupied(position) {
            debug!("Skipping monster at occupied {:?}", position);
            continue;
        }

        let kind = roll_monster_kind(rng);
        map.add_entity(Entity::monster(kind, position));
        placed += 1;
    }

    Ok(placed)
}
