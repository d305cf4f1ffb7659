//! # Delve
//!
//! A turn-based dungeon-crawler engine: procedural room-and-corridor dungeons,
//! shadow-casting field of view, and a small action layer that turns player
//! input into validated world mutations.
//!
//! ## Architecture Overview
//!
//! - **Tile Catalog**: immutable floor/wall archetypes with lit, dark and shroud appearances
//! - **Dungeon Map**: tile grid, visibility/exploration bitmaps and the entities on the level
//! - **Generation System**: rectangular rooms joined by L-shaped tunnels, monsters per room
//! - **Action System**: bump, move, melee and escape commands resolved against the map
//! - **Turn Engine**: input event → player action → enemy turns → FOV recompute
//!
//! Presentation is kept outside the core: the map exposes a render snapshot and
//! [`TextDisplay`] turns it into plain text for the headless driver.
//!
//! ```
//! use delve::{Engine, EngineConfig, GenerationConfig, Generator, RoomCorridorGenerator};
//!
//! let config = GenerationConfig::for_testing(7);
//! let mut rng = delve::generation::utils::create_rng(&config);
//! let dungeon = RoomCorridorGenerator::new().generate(&config, &mut rng).unwrap();
//! let engine = Engine::new(dungeon, EngineConfig::default()).unwrap();
//! let start = engine.player().unwrap().position;
//! assert!(engine.map().is_visible(start.x, start.y));
//! ```

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod utils;

pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;

pub use game::{
    // From actions
    Action,
    ActionKind,
    ActionOutcome,
    // From engine
    Engine,
    EngineConfig,
    MessageLog,
    TurnOutcome,
    // From entities
    Entity,
    MonsterKind,
    // From map
    DungeonMap,
    RenderCell,
    RenderSnapshot,
    // From tiles
    Appearance,
    Rgb,
    Tile,
};

pub use generation::{
    Bend, GeneratedDungeon, GenerationConfig, Generator, RectangularRoom, RoomCorridorGenerator,
};

pub use rendering::{MessagePanel, TextDisplay};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Core error type for the Delve engine.
#[derive(thiserror::Error, Debug)]
pub enum DelveError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Engine state is invalid
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Configuration values cannot produce a dungeon
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A coordinate query fell outside the map
    #[error("Position ({x}, {y}) is out of bounds")]
    OutOfBounds { x: i32, y: i32 },

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Delve codebase.
pub type DelveResult<T> = Result<T, DelveError>;

/// Version information for the engine.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration constants.
pub mod config {
    /// Default map width in tiles
    pub const DEFAULT_MAP_WIDTH: u32 = 80;

    /// Default map height in tiles
    pub const DEFAULT_MAP_HEIGHT: u32 = 45;

    /// Largest accepted map width or height
    pub const MAX_MAP_DIMENSION: u32 = 1024;

    /// Default number of room placement attempts
    pub const DEFAULT_MAX_ROOMS: u32 = 30;

    /// Default smallest room edge, walls included
    pub const DEFAULT_ROOM_MIN_SIZE: u32 = 6;

    /// Default largest room edge, walls included
    pub const DEFAULT_ROOM_MAX_SIZE: u32 = 10;

    /// Default upper bound on monsters spawned per room
    pub const DEFAULT_MAX_MONSTERS_PER_ROOM: u32 = 2;

    /// Default field-of-view radius in cells
    pub const DEFAULT_FOV_RADIUS: u32 = 8;

    /// Default number of messages retained by the message log
    pub const DEFAULT_MESSAGE_CAPACITY: usize = 100;
}

/// Top-level configuration document.
///
/// Loaded from JSON; any section or field left out falls back to its default.
///
/// ```
/// use delve::DelveConfig;
///
/// let config = DelveConfig::from_json(r#"{ "engine": { "fov_radius": 5 } }"#).unwrap();
/// assert_eq!(config.engine.fov_radius, 5);
/// assert_eq!(config.generation.max_rooms, 30);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelveConfig {
    /// Dungeon generation parameters
    pub generation: GenerationConfig,
    /// Turn engine parameters
    pub engine: EngineConfig,
}

impl DelveConfig {
    /// Parses a configuration document and validates it.
    pub fn from_json(json: &str) -> DelveResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a configuration file.
    pub fn load(path: impl AsRef<Path>) -> DelveResult<Self> {
        let path = path.as_ref();
        log::debug!("Loading configuration from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json(&self) -> DelveResult<String> {
        serde_json::to_string_pretty(self).map_err(DelveError::from)
    }

    /// Checks every section.
    pub fn validate(&self) -> DelveResult<()> {
        self.generation.validate()?;
        self.engine.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = DelveConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.engine.fov_radius, config::DEFAULT_FOV_RADIUS);
        assert_eq!(config.generation.map_width, config::DEFAULT_MAP_WIDTH);
    }

    #[test]
    fn test_config_json_round_trip() {
        let mut config = DelveConfig::default();
        config.generation.seed = 99;
        config.engine.fov_radius = 3;

        let json = config.to_json().unwrap();
        let loaded = DelveConfig::from_json(&json).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_rejects_bad_room_sizes() {
        let json = r#"{ "generation": { "room_min_size": 9, "room_max_size": 4 } }"#;
        let err = DelveConfig::from_json(json).unwrap_err();
        assert!(matches!(err, DelveError::InvalidConfig(_)));
    }

    #[test]
    fn test_config_rejects_oversized_map() {
        for json in [
            r#"{ "generation": { "map_width": 3000000000 } }"#,
            r#"{ "generation": { "map_height": 1025 } }"#,
        ] {
            let err = DelveConfig::from_json(json).unwrap_err();
            assert!(matches!(err, DelveError::InvalidConfig(_)), "{}", json);
        }
    }

    #[test]
    fn test_config_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"generation": {{"seed": 5, "max_rooms": 4}}, "engine": {{"fov_radius": 6}}}}"#
        )
        .unwrap();

        let config = DelveConfig::load(file.path()).unwrap();
        assert_eq!(config.generation.seed, 5);
        assert_eq!(config.generation.max_rooms, 4);
        assert_eq!(config.engine.fov_radius, 6);
    }

    #[test]
    fn test_config_load_missing_file() {
        let err = DelveConfig::load("/nonexistent/delve.json").unwrap_err();
        assert!(matches!(err, DelveError::Io(_)));
    }

    #[test]
    fn test_config_malformed_json() {
        let err = DelveConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, DelveError::Serde(_)));
    }
}
