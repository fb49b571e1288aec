use core::fmt;
use grid_util::grid::{SimpleValueGrid, ValueGrid};
use grid_util::point::Point;
use grid_util::Rect;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::{CellState, N_SMALLVEC_SIZE};

/// [OccupancyGrid] stores one [CellState] per cell of a `rows x cols` grid and is the only
/// state the search shares with its collaborators. It also maintains connected components
/// over non-obstacle cells in a [UnionFind] so reachability can be checked up front.
///
/// Points use `x` for the column and `y` for the row, so `width` is the column count.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    pub grid: SimpleValueGrid<CellState>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl OccupancyGrid {
    /// Creates a grid of `rows x cols` open cells.
    pub fn with_size(rows: usize, cols: usize) -> OccupancyGrid {
        OccupancyGrid::new(cols, rows, CellState::Open)
    }
    pub fn rows(&self) -> usize {
        self.grid.height()
    }
    pub fn cols(&self) -> usize {
        self.grid.width()
    }
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.grid.index_in_bounds(x, y)
    }
    pub fn contains(&self, pos: &Point) -> bool {
        self.in_bounds(pos.x, pos.y)
    }
    /// State of the cell at `pos`, which must be in bounds.
    pub fn state(&self, pos: &Point) -> CellState {
        self.grid.get_point(*pos)
    }
    /// State of the cell at `pos`, or [None] when outside the grid.
    pub fn try_state(&self, pos: &Point) -> Option<CellState> {
        self.contains(pos).then(|| self.state(pos))
    }
    /// Overwrites the state at `pos`, keeping the components up to date.
    pub fn mark(&mut self, pos: &Point, state: CellState) {
        self.set(pos.x, pos.y, state);
    }
    /// Marks every cell in `rect` as an obstacle. Cells outside the grid are ignored.
    pub fn block_rect(&mut self, rect: &Rect) {
        for y in rect.y..rect.y + rect.h {
            for x in rect.x..rect.x + rect.w {
                if self.in_bounds(x, y) {
                    self.set(x, y, CellState::Obstacle);
                }
            }
        }
    }

    /// True iff `pos` lies within the grid and its cell is [CellState::Open] or
    /// [CellState::Goal]. This is the only gate for expansion targets.
    pub fn is_occupiable(&self, pos: &Point) -> bool {
        self.contains(pos) && self.state(pos).is_occupiable()
    }
    fn occupiable(&self, pos: Point) -> Option<Point> {
        self.is_occupiable(&pos).then_some(pos)
    }
    pub fn up(&self, pos: &Point) -> Option<Point> {
        self.occupiable(Point::new(pos.x, pos.y - 1))
    }
    pub fn down(&self, pos: &Point) -> Option<Point> {
        self.occupiable(Point::new(pos.x, pos.y + 1))
    }
    pub fn left(&self, pos: &Point) -> Option<Point> {
        self.occupiable(Point::new(pos.x - 1, pos.y))
    }
    pub fn right(&self, pos: &Point) -> Option<Point> {
        self.occupiable(Point::new(pos.x + 1, pos.y))
    }
    /// Occupiable neighbours of `pos` in up, down, left, right order. The order decides
    /// tie-breaks between equally cheap leaves.
    pub fn occupiable_neighbours(&self, pos: &Point) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
        [self.up(pos), self.down(pos), self.left(pos), self.right(pos)]
            .into_iter()
            .flatten()
            .collect()
    }

    /// Number of cells currently in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells_in(state).len()
    }
    /// All cells currently in `state`, row by row.
    pub fn cells_in(&self, state: CellState) -> Vec<Point> {
        (0..self.rows() as i32)
            .flat_map(|y| (0..self.cols() as i32).map(move |x| Point::new(x, y)))
            .filter(|p| self.state(p) == state)
            .collect()
    }
    /// Rows of [CellState::code] values for display collaborators.
    pub fn codes(&self) -> Vec<Vec<i8>> {
        (0..self.rows() as i32)
            .map(|y| {
                (0..self.cols() as i32)
                    .map(|x| self.grid.get(x, y).code())
                    .collect()
            })
            .collect()
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }
    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.contains(start) && self.contains(goal) {
            let start_ix = self.get_ix_point(start);
            let goal_ix = self.get_ix_point(goal);
            !self.components.equiv(start_ix, goal_ix)
        } else {
            true
        }
    }
    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }
    /// Generates a new [UnionFind] structure and links up 4-connected non-obstacle cells.
    pub fn generate_components(&mut self) {
        let w = self.grid.width;
        let h = self.grid.height;
        self.components = UnionFind::new(w * h);
        self.components_dirty = false;
        for x in 0..w as i32 {
            for y in 0..h as i32 {
                if self.grid.get(x, y) == CellState::Obstacle {
                    continue;
                }
                let point = Point::new(x, y);
                let parent_ix = self.grid.get_ix_point(&point);
                let linked = [Point::new(x, y + 1), Point::new(x + 1, y)]
                    .into_iter()
                    .filter(|p| self.contains(p) && self.state(p) != CellState::Obstacle)
                    .map(|p| self.grid.get_ix_point(&p))
                    .collect::<SmallVec<[usize; 2]>>();
                for ix in linked {
                    self.components.union(parent_ix, ix);
                }
            }
        }
    }
}

impl fmt::Display for OccupancyGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.rows() as i32 {
            for x in 0..self.cols() as i32 {
                write!(f, "{}", self.grid.get(x, y))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl ValueGrid<CellState> for OccupancyGrid {
    fn new(width: usize, height: usize, default_value: CellState) -> Self {
        let mut base_grid = OccupancyGrid {
            grid: SimpleValueGrid::new(width, height, default_value),
            components: UnionFind::new(width * height),
            components_dirty: false,
        };
        base_grid.generate_components();
        base_grid
    }
    fn get(&self, x: i32, y: i32) -> CellState {
        self.grid.get(x, y)
    }
    /// Updates a position on the grid. Placing or removing an obstacle flags the components
    /// as dirty; every other transition leaves connectivity untouched.
    fn set(&mut self, x: i32, y: i32, state: CellState) {
        let was_obstacle = self.grid.get(x, y) == CellState::Obstacle;
        if was_obstacle != (state == CellState::Obstacle) {
            self.components_dirty = true;
        }
        self.grid.set(x, y, state);
    }
    fn width(&self) -> usize {
        self.grid.width()
    }
    fn height(&self) -> usize {
        self.grid.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell;

    #[test]
    fn size_maps_rows_to_height() {
        let grid = OccupancyGrid::with_size(2, 5);
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 5);
        assert!(grid.contains(&cell(1, 4)));
        assert!(!grid.contains(&cell(2, 0)));
        assert!(!grid.contains(&cell(0, 5)));
        assert!(!grid.contains(&cell(-1, 0)));
    }

    #[test]
    fn occupiable_respects_bounds_and_state() {
        let mut grid = OccupancyGrid::with_size(3, 3);
        grid.mark(&cell(0, 1), CellState::Obstacle);
        grid.mark(&cell(1, 0), CellState::Explored);
        grid.mark(&cell(2, 2), CellState::Goal);
        grid.mark(&cell(1, 1), CellState::OnPath);
        assert!(!grid.is_occupiable(&cell(0, 1)));
        assert!(!grid.is_occupiable(&cell(1, 0)));
        assert!(!grid.is_occupiable(&cell(1, 1)));
        assert!(!grid.is_occupiable(&cell(-1, 2)));
        assert!(!grid.is_occupiable(&cell(3, 0)));
        assert!(grid.is_occupiable(&cell(2, 2)));
        assert!(grid.is_occupiable(&cell(0, 0)));
    }

    /// Neighbours come back in up, down, left, right order.
    #[test]
    fn neighbour_order() {
        let grid = OccupancyGrid::with_size(3, 3);
        let centre = cell(1, 1);
        let neighbours = grid.occupiable_neighbours(&centre);
        assert_eq!(
            neighbours.as_slice(),
            &[cell(0, 1), cell(2, 1), cell(1, 0), cell(1, 2)]
        );
        assert_eq!(grid.up(&centre), Some(cell(0, 1)));
        assert_eq!(grid.down(&centre), Some(cell(2, 1)));
        assert_eq!(grid.left(&centre), Some(cell(1, 0)));
        assert_eq!(grid.right(&centre), Some(cell(1, 2)));
    }

    #[test]
    fn corner_has_two_neighbours() {
        let grid = OccupancyGrid::with_size(3, 3);
        let neighbours = grid.occupiable_neighbours(&cell(0, 0));
        assert_eq!(neighbours.as_slice(), &[cell(1, 0), cell(0, 1)]);
    }

    #[test]
    fn block_rect_clips_to_grid() {
        let mut grid = OccupancyGrid::with_size(4, 4);
        grid.block_rect(&Rect::new(2, 1, 5, 2));
        assert_eq!(grid.count(CellState::Obstacle), 4);
        assert_eq!(grid.state(&cell(1, 2)), CellState::Obstacle);
        assert_eq!(grid.state(&cell(2, 3)), CellState::Obstacle);
        assert_eq!(grid.state(&cell(0, 2)), CellState::Open);
    }

    #[test]
    fn components_split_by_wall() {
        // |.#.|
        // |.#.|
        let mut grid = OccupancyGrid::with_size(2, 3);
        grid.block_rect(&Rect::new(1, 0, 1, 2));
        assert!(grid.components_dirty);
        grid.update();
        assert!(!grid.components_dirty);
        assert!(grid.reachable(&cell(0, 0), &cell(1, 0)));
        assert!(grid.unreachable(&cell(0, 0), &cell(0, 2)));
        assert!(grid.unreachable(&cell(0, 0), &cell(5, 5)));
    }

    #[test]
    fn search_markers_keep_components_clean() {
        let mut grid = OccupancyGrid::with_size(2, 2);
        grid.mark(&cell(0, 1), CellState::Explored);
        grid.mark(&cell(1, 1), CellState::Goal);
        assert!(!grid.components_dirty);
    }

    #[test]
    fn display_uses_symbols() {
        let mut grid = OccupancyGrid::with_size(2, 3);
        grid.mark(&cell(0, 1), CellState::Obstacle);
        grid.mark(&cell(1, 2), CellState::Goal);
        grid.mark(&cell(1, 0), CellState::OnPath);
        assert_eq!(grid.to_string(), ".#.\n*.G\n");
        assert_eq!(grid.codes(), vec![vec![1, 0, 1], vec![-2, 1, -1]]);
    }
}
