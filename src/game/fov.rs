//! # Field of View
//!
//! Recursive shadow-casting over the map's `transparent` flags. Each of the
//! eight octants is scanned row by row outward from the origin; opaque cells
//! start a shadow that later rows inherit. Opaque cells bounding the lit area
//! are themselves visible, so room walls show up around the player.

use crate::game::{DungeonMap, Position};
use crate::{DelveError, DelveResult};

/// Octant transforms as `(xx, xy, yx, yy)`.
const OCTANTS: [(i32, i32, i32, i32); 8] = [
    (1, 0, 0, 1),
    (0, 1, 1, 0),
    (0, -1, 1, 0),
    (-1, 0, 0, 1),
    (-1, 0, 0, -1),
    (0, -1, -1, 0),
    (0, 1, -1, 0),
    (1, 0, 0, -1),
];

/// Computes the cells visible from `origin` within `radius`.
///
/// Returns a row-major grid the same shape as the map. The radius is
/// circular: a cell at offset `(dx, dy)` can only be lit when
/// `dx² + dy² <= radius²`. Radii larger than the map are clamped to
/// `width + height`, which already reaches every cell.
///
/// # Examples
///
/// ```
/// use delve::{compute_fov, DungeonMap, Position, Tile};
///
/// let mut map = DungeonMap::new(5, 5);
/// map.set_tile(2, 2, Tile::FLOOR).unwrap();
/// let visible = compute_fov(&map, Position::new(2, 2), 8).unwrap();
///
/// // The single floor cell and the eight walls around it.
/// assert_eq!(visible.iter().filter(|&&v| v).count(), 9);
/// ```
pub fn compute_fov(map: &DungeonMap, origin: Position, radius: u32) -> DelveResult<Vec<bool>> {
    if !map.in_bounds(origin.x, origin.y) {
        return Err(DelveError::OutOfBounds {
            x: origin.x,
            y: origin.y,
        });
    }

    let reach = i64::from(map.width()) + i64::from(map.height());
    let radius = i64::from(radius).min(reach);

    let mut caster = ShadowCaster {
        map,
        origin,
        radius: radius as i32,
        radius_sq: radius * radius,
        visible: vec![false; map.width() as usize * map.height() as usize],
    };
    caster.light(origin.x, origin.y);

    for &octant in OCTANTS.iter() {
        caster.cast(1, 1.0, 0.0, octant);
    }

    Ok(caster.visible)
}

struct ShadowCaster<'a> {
    map: &'a DungeonMap,
    origin: Position,
    radius: i32,
    radius_sq: i64,
    visible: Vec<bool>,
}

impl ShadowCaster<'_> {
    fn light(&mut self, x: i32, y: i32) {
        if self.map.in_bounds(x, y) {
            let idx = y as usize * self.map.width() as usize + x as usize;
            self.visible[idx] = true;
        }
    }

    fn is_opaque(&self, x: i32, y: i32) -> bool {
        !self.map.is_transparent(x, y).unwrap_or(false)
    }

    /// Scans one octant from `row` outward between slopes `start` and `end`.
    fn cast(&mut self, row: i32, mut start: f64, end: f64, octant: (i32, i32, i32, i32)) {
        if start < end {
            return;
        }

        let (xx, xy, yx, yy) = octant;
        let mut new_start = 0.0;

        for distance in row..=self.radius {
            let dy = -distance;
            let mut blocked = false;

            for dx in -distance..=0 {
                let left_slope = (dx as f64 - 0.5) / (dy as f64 + 0.5);
                let right_slope = (dx as f64 + 0.5) / (dy as f64 - 0.5);

                if start < right_slope {
                    continue;
                }
                if end > left_slope {
                    break;
                }

                let x = self.origin.x + dx * xx + dy * xy;
                let y = self.origin.y + dx * yx + dy * yy;

                let (ddx, ddy) = (i64::from(dx), i64::from(dy));
                if ddx * ddx + ddy * ddy <= self.radius_sq {
                    self.light(x, y);
                }

                let opaque = self.is_opaque(x, y);
                if blocked {
                    if opaque {
                        new_start = right_slope;
                    } else {
                        blocked = false;
                        start = new_start;
                    }
                } else if opaque && distance < self.radius {
                    blocked = true;
                    self.cast(distance + 1, start, left_slope, octant);
                    new_start = right_slope;
                }
            }

            if blocked {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Tile;

    fn open_map(width: u32, height: u32) -> DungeonMap {
        let mut map = DungeonMap::new(width, height);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                map.set_tile(x, y, Tile::FLOOR).unwrap();
            }
        }
        map
    }

    fn is_lit(map: &DungeonMap, visible: &[bool], x: i32, y: i32) -> bool {
        visible[y as usize * map.width() as usize + x as usize]
    }

    #[test]
    fn test_origin_always_visible() {
        let map = DungeonMap::new(3, 3);
        let visible = compute_fov(&map, Position::new(1, 1), 0).unwrap();
        assert!(is_lit(&map, &visible, 1, 1));
        assert_eq!(visible.iter().filter(|&&v| v).count(), 1);
    }

    #[test]
    fn test_out_of_bounds_origin_errors() {
        let map = DungeonMap::new(3, 3);
        assert!(compute_fov(&map, Position::new(3, 0), 4).is_err());
    }

    #[test]
    fn test_open_field_is_circular() {
        let map = open_map(21, 21);
        let radius = 4;
        let visible = compute_fov(&map, Position::new(10, 10), radius).unwrap();

        for y in 0..21 {
            for x in 0..21 {
                let dist_sq = (x - 10) * (x - 10) + (y - 10) * (y - 10);
                assert_eq!(
                    is_lit(&map, &visible, x, y),
                    dist_sq <= (radius * radius) as i32,
                    "cell ({}, {})",
                    x,
                    y
                );
            }
        }
    }

    #[test]
    fn test_wall_blocks_sight_behind_it() {
        let mut map = open_map(11, 3);
        map.set_tile(5, 1, Tile::WALL).unwrap();
        let visible = compute_fov(&map, Position::new(2, 1), 8).unwrap();

        assert!(is_lit(&map, &visible, 4, 1));
        assert!(is_lit(&map, &visible, 5, 1)); // the wall itself is lit
        assert!(!is_lit(&map, &visible, 6, 1));
        assert!(!is_lit(&map, &visible, 9, 1));
    }

    #[test]
    fn test_enclosed_room_sees_walls_not_beyond() {
        let mut map = DungeonMap::new(12, 12);
        for y in 3..8 {
            for x in 3..8 {
                map.set_tile(x, y, Tile::FLOOR).unwrap();
            }
        }
        let visible = compute_fov(&map, Position::new(5, 5), 8).unwrap();

        for y in 2..9 {
            for x in 2..9 {
                assert!(is_lit(&map, &visible, x, y), "cell ({}, {})", x, y);
            }
        }
        assert!(!is_lit(&map, &visible, 1, 5));
        assert!(!is_lit(&map, &visible, 5, 9));
        assert_eq!(visible.iter().filter(|&&v| v).count(), 49);
    }

    #[test]
    fn test_huge_radius_clamped_to_map() {
        let map = open_map(9, 7);
        for radius in [50_000, u32::MAX] {
            let visible = compute_fov(&map, Position::new(4, 3), radius).unwrap();
            assert!(visible.iter().all(|&v| v), "radius {}", radius);
        }
    }

    #[test]
    fn test_fov_near_map_edge() {
        let map = open_map(5, 5);
        let visible = compute_fov(&map, Position::new(0, 0), 3).unwrap();
        assert!(is_lit(&map, &visible, 3, 0));
        assert!(is_lit(&map, &visible, 2, 2));
        assert!(!is_lit(&map, &visible, 3, 3));
    }
}
