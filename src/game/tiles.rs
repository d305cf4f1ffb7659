//! # Tile Catalog
//!
//! Static tile archetypes. A tile is a plain `Copy` value: the map stores one
//! per cell, so every cell always resolves to exactly one archetype.

use serde::{Deserialize, Serialize};

/// An RGB colour triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
}

/// How a cell is drawn: a glyph with foreground and background colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Appearance {
    pub glyph: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Appearance {
    /// Creates a new appearance.
    pub const fn new(glyph: char, fg: Rgb, bg: Rgb) -> Self {
        Self { glyph, fg, bg }
    }
}

/// Tile archetype.
///
/// # Examples
///
/// ```
/// use delve::Tile;
///
/// assert!(Tile::FLOOR.walkable);
/// assert!(!Tile::WALL.transparent);
/// assert_ne!(Tile::FLOOR.light, Tile::FLOOR.dark);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    /// Whether entities may stand on this tile
    pub walkable: bool,
    /// Whether this tile lets sight through
    pub transparent: bool,
    /// Appearance when explored but not currently in view
    pub dark: Appearance,
    /// Appearance when currently in view
    pub light: Appearance,
}

impl Tile {
    /// Open floor.
    pub const FLOOR: Tile = Tile {
        walkable: true,
        transparent: true,
        dark: Appearance::new(' ', Rgb::WHITE, Rgb(50, 50, 150)),
        light: Appearance::new(' ', Rgb::WHITE, Rgb(200, 180, 50)),
    };

    /// Solid rock.
    pub const WALL: Tile = Tile {
        walkable: false,
        transparent: false,
        dark: Appearance::new(' ', Rgb::WHITE, Rgb(0, 0, 100)),
        light: Appearance::new(' ', Rgb::WHITE, Rgb(130, 110, 50)),
    };

    /// Returns true if this tile is the floor archetype.
    pub fn is_floor(&self) -> bool {
        *self == Tile::FLOOR
    }
}

impl Default for Tile {
    fn default() -> Self {
        Tile::WALL
    }
}

/// Drawn for cells that have never been seen.
pub const SHROUD: Appearance = Appearance::new(' ', Rgb::WHITE, Rgb::BLACK);
