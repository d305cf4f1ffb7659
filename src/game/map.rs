//! # Dungeon Map
//!
//! The tile grid of one dungeon, its visibility and exploration state, and the
//! entities standing on it. Grids are stored row-major.

use crate::game::{Appearance, Entity, EntityId, Position, Tile, SHROUD};
use crate::generation::RectangularRoom;
use crate::{DelveError, DelveResult};

/// What the presentation layer draws for a single cell.
pub type RenderCell = Appearance;

/// A read-only picture of the map, one [`RenderCell`] per tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSnapshot {
    pub width: u32,
    pub height: u32,
    pub cells: Vec<RenderCell>,
}

impl RenderSnapshot {
    /// Returns the cell at `(x, y)`, or None outside the snapshot.
    pub fn get(&self, x: i32, y: i32) -> Option<&RenderCell> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        self.cells.get(y as usize * self.width as usize + x as usize)
    }

    /// Iterates over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[RenderCell]> {
        self.cells.chunks(self.width.max(1) as usize)
    }
}

/// A single dungeon level.
///
/// # Examples
///
/// ```
/// use delve::{DungeonMap, Tile};
///
/// let mut map = DungeonMap::new(10, 5);
/// assert!(map.in_bounds(9, 4));
/// assert!(!map.in_bounds(10, 0));
/// assert!(!map.is_walkable(2, 2).unwrap());
///
/// map.set_tile(2, 2, Tile::FLOOR).unwrap();
/// assert!(map.is_walkable(2, 2).unwrap());
/// assert!(map.is_walkable(-1, 0).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct DungeonMap {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
    visible: Vec<bool>,
    explored: Vec<bool>,
    entities: Vec<Entity>,
}

impl DungeonMap {
    /// Creates a map of solid wall with nothing seen and no entities.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            tiles: vec![Tile::WALL; len],
            visible: vec![false; len],
            explored: vec![false; len],
            entities: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// True iff `0 <= x < width` and `0 <= y < height`.
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        0 <= x && x < self.width as i32 && 0 <= y && y < self.height as i32
    }

    fn index(&self, x: i32, y: i32) -> DelveResult<usize> {
        if self.in_bounds(x, y) {
            Ok(y as usize * self.width as usize + x as usize)
        } else {
            Err(DelveError::OutOfBounds { x, y })
        }
    }

    /// Returns the tile at `(x, y)`.
    pub fn tile(&self, x: i32, y: i32) -> DelveResult<&Tile> {
        let idx = self.index(x, y)?;
        Ok(&self.tiles[idx])
    }

    /// Replaces the tile at `(x, y)`.
    pub fn set_tile(&mut self, x: i32, y: i32, tile: Tile) -> DelveResult<()> {
        let idx = self.index(x, y)?;
        self.tiles[idx] = tile;
        Ok(())
    }

    /// Walkable flag of the tile at `(x, y)`.
    ///
    /// Callers bounds-check first; an out-of-bounds query is an error, not `false`.
    pub fn is_walkable(&self, x: i32, y: i32) -> DelveResult<bool> {
        Ok(self.tile(x, y)?.walkable)
    }

    /// Transparent flag of the tile at `(x, y)`.
    pub fn is_transparent(&self, x: i32, y: i32) -> DelveResult<bool> {
        Ok(self.tile(x, y)?.transparent)
    }

    /// Whether `(x, y)` is currently in view. False outside the map.
    pub fn is_visible(&self, x: i32, y: i32) -> bool {
        self.index(x, y).map(|idx| self.visible[idx]).unwrap_or(false)
    }

    /// Whether `(x, y)` has ever been in view. False outside the map.
    pub fn is_explored(&self, x: i32, y: i32) -> bool {
        self.index(x, y).map(|idx| self.explored[idx]).unwrap_or(false)
    }

    /// Tile grid, row-major.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Current visibility bitmap, row-major.
    pub fn visible(&self) -> &[bool] {
        &self.visible
    }

    /// Exploration bitmap, row-major.
    pub fn explored(&self) -> &[bool] {
        &self.explored
    }

    /// Replaces `visible` wholesale and ORs it into `explored`.
    pub fn replace_visible(&mut self, visible: Vec<bool>) -> DelveResult<()> {
        if visible.len() != self.visible.len() {
            return Err(DelveError::InvalidState(format!(
                "Visibility grid has {} cells, map has {}",
                visible.len(),
                self.visible.len()
            )));
        }

        for (explored, &seen) in self.explored.iter_mut().zip(&visible) {
            *explored |= seen;
        }
        self.visible = visible;

        Ok(())
    }

    /// Sets every cell of the room's inner rectangle to floor.
    pub fn carve_inner(&mut self, room: &RectangularRoom) -> DelveResult<()> {
        for pos in room.inner_positions() {
            self.set_tile(pos.x, pos.y, Tile::FLOOR)?;
        }
        Ok(())
    }

    /// Number of floor tiles on the map.
    pub fn floor_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_floor()).count()
    }

    /// Adds an entity and returns its id.
    pub fn add_entity(&mut self, entity: Entity) -> EntityId {
        let id = entity.id;
        self.entities.push(entity);
        id
    }

    /// All entities in insertion order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Every entity other than `excluded`, in insertion order.
    pub fn entities_except(&self, excluded: EntityId) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(move |entity| entity.id != excluded)
    }

    /// Looks up an entity by id.
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    /// Looks up an entity by id, mutably.
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|entity| entity.id == id)
    }

    /// First entity standing on `(x, y)`, if any.
    pub fn blocking_entity_at(&self, x: i32, y: i32) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.is_at(x, y))
    }

    /// True if any entity stands on `pos`.
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.blocking_entity_at(pos.x, pos.y).is_some()
    }

    /// Derives what each cell looks like.
    ///
    /// Visible cells use the lit appearance, explored cells the dark one, and
    /// everything else is shroud.
    pub fn render_snapshot(&self) -> RenderSnapshot {
        let cells = self
            .tiles
            .iter()
            .zip(self.visible.iter().zip(&self.explored))
            .map(|(tile, (&visible, &explored))| {
                if visible {
                    tile.light
                } else if explored {
                    tile.dark
                } else {
                    SHROUD
                }
            })
            .collect();

        RenderSnapshot {
            width: self.width,
            height: self.height,
            cells,
        }
    }
}
