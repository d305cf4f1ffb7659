//! # Utilities Module
//!
//! Grid line rasterization and reachability checks shared by generation.

pub mod math;
pub mod pathfinding;

pub use self::math::*;
pub use self::pathfinding::*;
