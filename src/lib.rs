//! # gridworld_astar
//!
//! Shortest paths on a 4-connected occupancy grid using a best-first tree-expansion
//! search guided by the [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry).
//!
//! The search grows a tree rooted at the start cell. Every step expands the current best
//! leaf into its walkable neighbours (up, down, left, right), marks those cells as explored
//! grid-wide and then selects the leaf with the lowest `g + h` cost over the whole tree.
//! Once that leaf sits on the goal, the path is recovered by walking parent links back to
//! the start and marking each cell on the grid.
//!
//! ```
//! use gridworld_astar::{cell, GridLayout, Pathfinder, SearchConfig};
//! use grid_util::Rect;
//!
//! let layout = GridLayout::new(3, 3)
//!     .with_obstacle(Rect::new(1, 1, 1, 1))
//!     .with_start(cell(0, 0))
//!     .with_goal(cell(2, 2));
//! let solution = Pathfinder::solve(&layout, &SearchConfig::default()).unwrap();
//! assert_eq!(solution.path.len(), 5);
//! ```
pub mod cell;
pub mod error;
pub mod frontier;
pub mod layout;
pub mod node;
pub mod occupancy_grid;
pub mod search;

use grid_util::point::Point;
use grid_util::Rect;
use itertools::Itertools;

pub use cell::CellState;
pub use error::{ConfigurationError, SearchError};
pub use frontier::{ordered::OrderedFrontier, tree_scan::TreeScan, Frontier, FrontierKind};
pub use layout::{DeadEndCost, GridLayout, SearchConfig};
pub use node::{NodeId, SearchNode, SearchTree};
pub use occupancy_grid::OccupancyGrid;
pub use search::{
    grow_tree, reconstruct_path, run_search, Pathfinder, SearchOutcome, SearchState, Solution,
};

/// Dead-end cost used by the original gridworld program. Only valid for grids whose
/// largest live cost stays below it, see [DeadEndCost].
pub const LEGACY_DEAD_END_COST: i32 = 1000;
/// A cell has at most four axis-aligned neighbours.
pub const N_SMALLVEC_SIZE: usize = 4;

/// Builds the [Point] for a `(row, col)` pair. Columns map to `x` and rows to `y`.
pub fn cell(row: i32, col: i32) -> Point {
    Point::new(col, row)
}

/// Builds the [Rect] covering `rows x cols` cells whose top-left cell is `(row, col)`.
pub fn region(row: i32, col: i32, rows: i32, cols: i32) -> Rect {
    Rect::new(col, row, cols, rows)
}

/// Heuristic cost between two cells: the Manhattan distance.
pub fn manhattan(pos: &Point, goal: &Point) -> i32 {
    pos.manhattan_distance(goal)
}

/// Checks that every consecutive pair of cells differs by exactly one unit along exactly
/// one axis.
pub fn is_contiguous(path: &[Point]) -> bool {
    path.iter()
        .tuple_windows()
        .all(|(a, b)| manhattan(a, b) == 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_maps_row_to_y() {
        let p = cell(6, 3);
        assert_eq!(p.x, 3);
        assert_eq!(p.y, 6);
    }

    #[test]
    fn manhattan_ignores_direction() {
        assert_eq!(manhattan(&cell(6, 3), &cell(9, 6)), 6);
        assert_eq!(manhattan(&cell(9, 6), &cell(6, 3)), 6);
        assert_eq!(manhattan(&cell(2, 2), &cell(2, 2)), 0);
    }

    #[test]
    fn contiguity_rejects_diagonal_and_jumps() {
        assert!(is_contiguous(&[cell(0, 0), cell(0, 1), cell(1, 1)]));
        assert!(!is_contiguous(&[cell(0, 0), cell(1, 1)]));
        assert!(!is_contiguous(&[cell(0, 0), cell(0, 2)]));
        assert!(!is_contiguous(&[cell(0, 0), cell(0, 0)]));
        assert!(is_contiguous(&[cell(4, 4)]));
    }
}
