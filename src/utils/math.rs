//! # Grid Mathematics
//!
//! Line rasterization on the integer grid.

use crate::game::Position;

/// Rasterizes the line from `start` to `end` with Bresenham's algorithm.
///
/// Both endpoints are included, in order from `start` to `end`.
///
/// # Examples
///
/// ```
/// use delve::{utils::bresenham_line, Position};
///
/// let line = bresenham_line(Position::new(0, 0), Position::new(3, 0));
/// assert_eq!(line.len(), 4);
/// assert_eq!(line[3], Position::new(3, 0));
/// ```
pub fn bresenham_line(start: Position, end: Position) -> Vec<Position> {
    let dx = (end.x - start.x).abs();
    let dy = -(end.y - start.y).abs();
    let step_x = if start.x < end.x { 1 } else { -1 };
    let step_y = if start.y < end.y { 1 } else { -1 };

    let mut points = Vec::with_capacity(dx.max(-dy) as usize + 1);
    let mut current = start;
    let mut err = dx + dy;

    loop {
        points.push(current);
        if current == end {
            break;
        }
        let doubled = 2 * err;
        if doubled >= dy {
            err += dy;
            current.x += step_x;
        }
        if doubled <= dx {
            err += dx;
            current.y += step_y;
        }
    }

    points
}
