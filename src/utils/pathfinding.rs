//! # Reachability
//!
//! Flood fills over walkable tiles, used to check that generated rooms are
//! connected.

use crate::game::{DungeonMap, Position};
use ::pathfinding::prelude::bfs_reach;
use std::collections::HashSet;

/// Every walkable cell reachable from `start` by cardinal steps.
///
/// Empty when `start` itself is not walkable or not on the map.
pub fn reachable_from(map: &DungeonMap, start: Position) -> HashSet<Position> {
    if !map.is_walkable(start.x, start.y).unwrap_or(false) {
        return HashSet::new();
    }

    bfs_reach(start, |pos| {
        pos.cardinal_adjacent_positions()
            .into_iter()
            .filter(|next| map.is_walkable(next.x, next.y).unwrap_or(false))
            .collect::<Vec<_>>()
    })
    .collect()
}

/// True if `to` can be walked to from `from`.
pub fn is_reachable(map: &DungeonMap, from: Position, to: Position) -> bool {
    reachable_from(map, from).contains(&to)
}
