//! # Generation Module
//!
//! Procedural dungeon generation: rectangular rooms, L-shaped tunnels between
//! consecutive rooms, and monsters scattered through each room.
//!
//! All randomness flows through an explicit [`StdRng`] so a seed reproduces
//! the same dungeon.

pub mod dungeon;
pub mod encounters;

pub use dungeon::*;
pub use encounters::*;

use crate::game::{DungeonMap, EntityId, Position};
use crate::{config, DelveError, DelveResult};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Configuration for procedural generation.
///
/// Room sizes include the wall ring, so a room of size 6 carves a 5x5 floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Map width in tiles
    pub map_width: u32,
    /// Map height in tiles
    pub map_height: u32,
    /// Number of room placement attempts
    pub max_rooms: u32,
    /// Minimum room edge
    pub room_min_size: u32,
    /// Maximum room edge
    pub room_max_size: u32,
    /// Upper bound on monsters spawned in a single room
    pub max_monsters_per_room: u32,
}

impl GenerationConfig {
    /// Creates a configuration with the default dungeon shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(42);
    /// assert_eq!(config.seed, 42);
    /// assert!(config.room_max_size >= config.room_min_size);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            map_width: config::DEFAULT_MAP_WIDTH,
            map_height: config::DEFAULT_MAP_HEIGHT,
            max_rooms: config::DEFAULT_MAX_ROOMS,
            room_min_size: config::DEFAULT_ROOM_MIN_SIZE,
            room_max_size: config::DEFAULT_ROOM_MAX_SIZE,
            max_monsters_per_room: config::DEFAULT_MAX_MONSTERS_PER_ROOM,
        }
    }

    /// Creates a configuration for testing with a smaller map.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            map_width: 40,
            map_height: 30,
            max_rooms: 8,
            room_min_size: 4,
            room_max_size: 8,
            max_monsters_per_room: 2,
        }
    }

    /// Rejects parameter combinations that cannot place a room.
    pub fn validate(&self) -> DelveResult<()> {
        if self.room_min_size < 2 {
            return Err(DelveError::InvalidConfig(format!(
                "room_min_size must be at least 2, got {}",
                self.room_min_size
            )));
        }
        if self.room_min_size > self.room_max_size {
            return Err(DelveError::InvalidConfig(format!(
                "room_min_size {} exceeds room_max_size {}",
                self.room_min_size, self.room_max_size
            )));
        }
        let max = config::MAX_MAP_DIMENSION;
        if self.map_width > max || self.map_height > max {
            return Err(DelveError::InvalidConfig(format!(
                "a {}x{} map exceeds the {} tile limit per side",
                self.map_width, self.map_height, max
            )));
        }
        if self.map_width <= self.room_max_size || self.map_height <= self.room_max_size {
            return Err(DelveError::InvalidConfig(format!(
                "a {}x{} map cannot hold rooms of size {}",
                self.map_width, self.map_height, self.room_max_size
            )));
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Axis-aligned room given by two corners. Only used while generating.
///
/// # Examples
///
/// ```
/// use delve::{Position, RectangularRoom};
///
/// let room = RectangularRoom::new(2, 3, 6, 4);
/// assert_eq!((room.x2, room.y2), (8, 7));
/// assert_eq!(room.center(), Position::new(5, 5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RectangularRoom {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl RectangularRoom {
    /// Creates a room from its top-left corner and size.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    /// Center cell, rounding toward the first corner.
    pub fn center(&self) -> Position {
        Position::new((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    /// Column range of the carved floor.
    pub fn inner_x(&self) -> std::ops::Range<i32> {
        (self.x1 + 1)..self.x2
    }

    /// Row range of the carved floor.
    pub fn inner_y(&self) -> std::ops::Range<i32> {
        (self.y1 + 1)..self.y2
    }

    /// Every cell of the carved floor, row by row.
    pub fn inner_positions(&self) -> impl Iterator<Item = Position> {
        let xs = self.inner_x();
        self.inner_y()
            .flat_map(move |y| xs.clone().map(move |x| Position::new(x, y)))
    }

    /// True if `pos` lies in the carved floor.
    pub fn inner_contains(&self, pos: Position) -> bool {
        self.inner_x().contains(&pos.x) && self.inner_y().contains(&pos.y)
    }

    /// Inclusive bounding-box overlap; rooms that share an edge intersect.
    pub fn intersects(&self, other: &RectangularRoom) -> bool {
        self.x1 <= other.x2 && self.x2 >= other.x1 && self.y1 <= other.y2 && self.y2 >= other.y1
    }
}

/// The output of a dungeon generator.
#[derive(Debug, Clone)]
pub struct GeneratedDungeon {
    /// The carved and populated map
    pub map: DungeonMap,
    /// The player entity placed on `map`
    pub player_id: EntityId,
    /// Accepted rooms in placement order
    pub rooms: Vec<RectangularRoom>,
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> DelveResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> DelveResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use rand::SeedableRng;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }

    /// Validates that a map has somewhere to stand.
    pub fn validate_map(map: &DungeonMap) -> DelveResult<()> {
        if map.floor_count() == 0 {
            return Err(DelveError::GenerationFailed(
                "Map has no floor tiles".to_string(),
            ));
        }
        Ok(())
    }
}
