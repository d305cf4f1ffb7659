//! # Dungeon Generation
//!
//! Room-and-corridor layout generation.
//!
//! The generator makes a fixed number of placement attempts. Each attempt
//! samples a rectangle and keeps it only if it clears every room accepted so
//! far. Accepted rooms are carved, joined to the previous room by an L-shaped
//! tunnel, and stocked with monsters. The player starts in the first room.

use crate::game::{DungeonMap, Entity, Position, Tile};
use crate::generation::{
    place_entities, utils, GeneratedDungeon, GenerationConfig, Generator, RectangularRoom,
};
use crate::utils::{bresenham_line, reachable_from};
use crate::{DelveError, DelveResult};
use log::{debug, info};
use rand::{rngs::StdRng, Rng};

/// Which leg of an L-shaped tunnel is dug first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bend {
    /// Along the start row, then along the end column
    HorizontalFirst,
    /// Along the start column, then along the end row
    VerticalFirst,
}

impl Bend {
    /// Picks a bend with equal odds.
    pub fn choose(rng: &mut StdRng) -> Self {
        if rng.gen_bool(0.5) {
            Bend::HorizontalFirst
        } else {
            Bend::VerticalFirst
        }
    }

    /// The cell where the two legs meet.
    pub fn corner(self, start: Position, end: Position) -> Position {
        match self {
            Bend::HorizontalFirst => Position::new(end.x, start.y),
            Bend::VerticalFirst => Position::new(start.x, end.y),
        }
    }
}

/// Cells of the L-shaped tunnel from `start` to `end`, in digging order.
///
/// Both endpoints are included and the corner appears once.
///
/// # Examples
///
/// ```
/// use delve::{tunnel_between, Bend, Position};
///
/// let path = tunnel_between(Position::new(1, 1), Position::new(3, 2), Bend::VerticalFirst);
/// assert_eq!(
///     path,
///     vec![
///         Position::new(1, 1),
///         Position::new(1, 2),
///         Position::new(2, 2),
///         Position::new(3, 2),
///     ]
/// );
/// ```
pub fn tunnel_between(start: Position, end: Position, bend: Bend) -> Vec<Position> {
    let corner = bend.corner(start, end);
    let mut path = bresenham_line(start, corner);
    path.extend(bresenham_line(corner, end).into_iter().skip(1));
    path
}

/// Carves a tunnel into the map as floor.
pub fn carve_tunnel(
    map: &mut DungeonMap,
    start: Position,
    end: Position,
    bend: Bend,
) -> DelveResult<()> {
    for pos in tunnel_between(start, end, bend) {
        map.set_tile(pos.x, pos.y, Tile::FLOOR)?;
    }
    Ok(())
}

/// Primary dungeon generator using the room-and-corridor algorithm.
///
/// # Examples
///
/// ```
/// use delve::{GenerationConfig, Generator, RoomCorridorGenerator};
///
/// let config = GenerationConfig::for_testing(3);
/// let mut rng = delve::generation::utils::create_rng(&config);
/// let dungeon = RoomCorridorGenerator::new().generate(&config, &mut rng).unwrap();
///
/// let player = dungeon.map.entity(dungeon.player_id).unwrap();
/// assert_eq!(player.position, dungeon.rooms[0].center());
/// ```
#[derive(Debug, Clone)]
pub struct RoomCorridorGenerator {
    /// Whether to check that every room is reachable from the start
    pub ensure_connectivity: bool,
}

impl RoomCorridorGenerator {
    /// Creates a generator with connectivity checking enabled.
    pub fn new() -> Self {
        Self {
            ensure_connectivity: true,
        }
    }

    /// Samples a room that fits inside the map.
    fn room_candidate(&self, config: &GenerationConfig, rng: &mut StdRng) -> RectangularRoom {
        let width = rng.gen_range(config.room_min_size..=config.room_max_size) as i32;
        let height = rng.gen_range(config.room_min_size..=config.room_max_size) as i32;

        let x = rng.gen_range(0..=(config.map_width as i32 - width - 1));
        let y = rng.gen_range(0..=(config.map_height as i32 - height - 1));

        RectangularRoom::new(x, y, width, height)
    }

    /// Checks that every room center can be walked to from the first room.
    fn validate_connectivity(
        &self,
        map: &DungeonMap,
        rooms: &[RectangularRoom],
    ) -> DelveResult<()> {
        let Some(first) = rooms.first() else {
            return Ok(());
        };
        if !self.ensure_connectivity {
            return Ok(());
        }

        let reachable = reachable_from(map, first.center());
        for (index, room) in rooms.iter().enumerate() {
            if !reachable.contains(&room.center()) {
                return Err(DelveError::GenerationFailed(format!(
                    "Room {} at {:?} is not connected to the start",
                    index,
                    room.center()
                )));
            }
        }

        Ok(())
    }
}

impl Generator<GeneratedDungeon> for RoomCorridorGenerator {
    fn generate(
        &self,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> DelveResult<GeneratedDungeon> {
        config.validate()?;

        let mut map = DungeonMap::new(config.map_width, config.map_height);
        let mut rooms: Vec<RectangularRoom> = Vec::new();
        let mut player_id = None;

        for attempt in 0..config.max_rooms {
            let room = self.room_candidate(config, rng);

            if rooms.iter().any(|other| room.intersects(other)) {
                debug!("Attempt {}: {:?} overlaps an existing room", attempt, room);
                continue;
            }

            map.carve_inner(&room)?;

            match rooms.last() {
                None => {
                    player_id = Some(map.add_entity(Entity::player(room.center())));
                }
                Some(previous) => {
                    carve_tunnel(&mut map, previous.center(), room.center(), Bend::choose(rng))?;
                }
            }

            place_entities(&room, &mut map, config.max_monsters_per_room, rng)?;
            rooms.push(room);
        }

        let player_id = player_id.ok_or_else(|| {
            DelveError::GenerationFailed(format!(
                "No rooms were placed in {} attempts",
                config.max_rooms
            ))
        })?;

        self.validate_connectivity(&map, &rooms)?;

        let dungeon = GeneratedDungeon {
            map,
            player_id,
            rooms,
        };
        self.validate(&dungeon, config)?;

        info!(
            "Generated {}x{} dungeon (seed {}): {} rooms, {} monsters",
            config.map_width,
            config.map_height,
            config.seed,
            dungeon.rooms.len(),
            dungeon.map.entities().len() - 1
        );

        Ok(dungeon)
    }

    fn validate(&self, dungeon: &GeneratedDungeon, _config: &GenerationConfig) -> DelveResult<()> {
        utils::validate_map(&dungeon.map)?;

        let player = dungeon.map.entity(dungeon.player_id).ok_or_else(|| {
            DelveError::GenerationFailed("Player was not placed on the map".to_string())
        })?;
        if !dungeon.map.is_walkable(player.position.x, player.position.y)? {
            return Err(DelveError::GenerationFailed(format!(
                "Player starts inside a wall at {:?}",
                player.position
            )));
        }

        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "RoomCorridorGenerator"
    }
}

impl Default for RoomCorridorGenerator {
    fn default() -> Self {
        Self::new()
    }
}
