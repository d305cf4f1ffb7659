//! # Display Management
//!
//! Renders the dungeon map as text, one character per cell.
//!
//! Cells in view use the bright glyph for their tile, remembered cells a
//! dimmer glyph, and unexplored cells are blank. Entities are drawn on top of
//! the cell they stand on, but only while that cell is in view. With color
//! enabled each cell also carries the background from the map's render
//! snapshot as a 24-bit ANSI escape.

use crate::game::{Appearance, DungeonMap, Position, Rgb, Tile};

/// Glyph for a floor cell in view.
pub const FLOOR_LIT: char = '.';
/// Glyph for a wall cell in view.
pub const WALL_LIT: char = '#';
/// Glyph for a remembered floor cell.
pub const FLOOR_DARK: char = ',';
/// Glyph for a remembered wall cell.
pub const WALL_DARK: char = '%';
/// Glyph for a cell never seen.
pub const UNSEEN: char = ' ';

/// Text renderer for a dungeon map.
///
/// # Examples
///
/// ```
/// use delve::{DungeonMap, Entity, Position, TextDisplay, Tile};
///
/// let mut map = DungeonMap::new(3, 1);
/// map.set_tile(1, 0, Tile::FLOOR).unwrap();
/// map.add_entity(Entity::player(Position::new(1, 0)));
/// map.replace_visible(vec![true, true, false]).unwrap();
///
/// assert_eq!(TextDisplay::new().render(&map), "#@ \n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextDisplay {
    /// Emit ANSI 24-bit color escapes
    pub color: bool,
}

impl TextDisplay {
    /// Creates a plain-text display.
    pub fn new() -> Self {
        Self { color: false }
    }

    /// Creates a display that colors every cell.
    pub fn with_color() -> Self {
        Self { color: true }
    }

    /// Glyph for a tile given whether it is in view.
    pub fn tile_glyph(tile: &Tile, visible: bool) -> char {
        match (tile.is_floor(), visible) {
            (true, true) => FLOOR_LIT,
            (false, true) => WALL_LIT,
            (true, false) => FLOOR_DARK,
            (false, false) => WALL_DARK,
        }
    }

    /// Glyph for a snapshot cell drawn over `tile`, and whether that cell
    /// is lit.
    fn cell_glyph(tile: &Tile, cell: &Appearance) -> (char, bool) {
        if *cell == tile.light {
            (Self::tile_glyph(tile, true), true)
        } else if *cell == tile.dark {
            (Self::tile_glyph(tile, false), false)
        } else {
            (UNSEEN, false)
        }
    }

    /// Renders the whole map, one line per row, each line ending in `\n`.
    pub fn render(&self, map: &DungeonMap) -> String {
        let width = map.width() as usize;
        let snapshot = map.render_snapshot();

        let mut glyphs = Vec::with_capacity(snapshot.cells.len());
        let mut lit = Vec::with_capacity(snapshot.cells.len());
        for (tile, cell) in map.tiles().iter().zip(&snapshot.cells) {
            let (glyph, in_view) = Self::cell_glyph(tile, cell);
            glyphs.push(glyph);
            lit.push(in_view);
        }

        let mut foregrounds: Vec<Rgb> = snapshot.cells.iter().map(|cell| cell.fg).collect();
        for entity in map.entities() {
            let Position { x, y } = entity.position;
            if !map.in_bounds(x, y) {
                continue;
            }
            let idx = y as usize * width + x as usize;
            if lit[idx] {
                glyphs[idx] = entity.glyph;
                foregrounds[idx] = entity.color;
            }
        }

        let mut out = String::with_capacity(glyphs.len() * if self.color { 40 } else { 1 } + width);
        for (row, cells) in snapshot.rows().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let idx = row * width + col;
                if self.color {
                    push_color(&mut out, foregrounds[idx], cell.bg);
                }
                out.push(glyphs[idx]);
            }
            if self.color {
                out.push_str(RESET);
            }
            out.push('\n');
        }

        out
    }
}

const RESET: &str = "\x1b[0m";

fn push_color(out: &mut String, fg: Rgb, bg: Rgb) {
    out.push_str(&format!(
        "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m",
        fg.0, fg.1, fg.2, bg.0, bg.1, bg.2
    ));
}
