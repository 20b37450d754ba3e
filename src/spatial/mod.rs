//! Grid and pathfinding

pub mod grid;
pub mod pathfinding;

pub use grid::{Grid, Tile, TileKind, DIG_GOLD, GOLD_SEAM_VALUE, GRID_HEIGHT, GRID_WIDTH};
pub use pathfinding::{distance, find_nearest_reachable, find_path, has_path, heuristic, next_step};
