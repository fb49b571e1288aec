//! Grid layouts and search settings.
//!
//! A [GridLayout] describes the search space before it exists: dimensions, obstacle
//! rectangles, start and goal. [GridLayout::build] validates it and produces the
//! [OccupancyGrid] the search runs on. [SearchConfig] selects the frontier strategy, the
//! dead-end cost and the termination guards.
use grid_util::point::Point;
use grid_util::Rect;
use log::info;

use crate::{
    cell, region, CellState, ConfigurationError, FrontierKind, OccupancyGrid, SearchError,
    LEGACY_DEAD_END_COST,
};

/// Dimensions, obstacles and endpoints of a grid to search.
#[derive(Clone, Debug)]
pub struct GridLayout {
    pub rows: usize,
    pub cols: usize,
    pub obstacles: Vec<Rect>,
    pub start: Option<Point>,
    pub goal: Option<Point>,
}

impl GridLayout {
    pub fn new(rows: usize, cols: usize) -> GridLayout {
        GridLayout {
            rows,
            cols,
            obstacles: Vec::new(),
            start: None,
            goal: None,
        }
    }

    /// The 10x10 reference world: a wall down column 1 (rows 1-6), a wall along row 7
    /// (columns 1-6) and a short wall in column 7 (rows 6-7). Start (6, 3), goal (9, 6).
    pub fn gridworld() -> GridLayout {
        GridLayout::new(10, 10)
            .with_obstacle(region(1, 1, 6, 1))
            .with_obstacle(region(7, 1, 1, 6))
            .with_obstacle(region(6, 7, 2, 1))
            .with_start(cell(6, 3))
            .with_goal(cell(9, 6))
    }

    pub fn with_obstacle(mut self, rect: Rect) -> GridLayout {
        self.obstacles.push(rect);
        self
    }
    pub fn with_obstacle_cell(self, pos: Point) -> GridLayout {
        self.with_obstacle(Rect::new(pos.x, pos.y, 1, 1))
    }
    pub fn with_start(mut self, start: Point) -> GridLayout {
        self.start = Some(start);
        self
    }
    pub fn with_goal(mut self, goal: Point) -> GridLayout {
        self.goal = Some(goal);
        self
    }

    fn contains(&self, pos: &Point) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.cols && (pos.y as usize) < self.rows
    }
    fn covered(&self, pos: &Point) -> bool {
        self.obstacles.iter().any(|r| {
            pos.x >= r.x && pos.x < r.x + r.w && pos.y >= r.y && pos.y < r.y + r.h
        })
    }
    fn rect_fits(&self, r: &Rect) -> bool {
        r.w >= 1
            && r.h >= 1
            && self.contains(&Point::new(r.x, r.y))
            && self.contains(&Point::new(r.x + r.w - 1, r.y + r.h - 1))
    }

    /// Checks dimensions, obstacles and endpoints, returning `(start, goal)`.
    pub fn validate(&self) -> Result<(Point, Point), ConfigurationError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigurationError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if let Some(r) = self.obstacles.iter().find(|r| !self.rect_fits(r)) {
            return Err(ConfigurationError::ObstacleOutOfBounds {
                x: r.x,
                y: r.y,
                w: r.w,
                h: r.h,
            });
        }
        let start = self.start.ok_or(ConfigurationError::MissingStart)?;
        let goal = self.goal.ok_or(ConfigurationError::MissingGoal)?;
        if !self.contains(&start) {
            return Err(ConfigurationError::StartOutOfBounds { start });
        }
        if !self.contains(&goal) {
            return Err(ConfigurationError::GoalOutOfBounds { goal });
        }
        if start == goal {
            return Err(ConfigurationError::StartIsGoal { cell: start });
        }
        if self.covered(&start) {
            return Err(ConfigurationError::StartOnObstacle { start });
        }
        if self.covered(&goal) {
            return Err(ConfigurationError::GoalOnObstacle { goal });
        }
        Ok((start, goal))
    }

    /// Validates the layout and lays it out on a fresh grid: obstacles, the goal marker and
    /// the start marker ([CellState::OnPath]). Components are generated before returning.
    pub fn build(&self) -> Result<(OccupancyGrid, Point, Point), ConfigurationError> {
        let (start, goal) = self.validate()?;
        let mut grid = OccupancyGrid::with_size(self.rows, self.cols);
        for rect in &self.obstacles {
            grid.block_rect(rect);
        }
        grid.mark(&goal, CellState::Goal);
        grid.mark(&start, CellState::OnPath);
        grid.update();
        info!(
            "Built {}x{} grid with {} obstacle cells",
            self.rows,
            self.cols,
            grid.count(CellState::Obstacle)
        );
        Ok((grid, start, goal))
    }
}

/// Cost assigned to a node whose expansion found no occupiable neighbour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeadEndCost {
    /// `rows * cols + rows + cols`, strictly above any live `g + h` on the grid.
    #[default]
    Derived,
    /// The fixed [LEGACY_DEAD_END_COST]. Rejected on grids where a live node could cost more.
    Legacy,
}

impl DeadEndCost {
    /// Largest `g + h` a live node can have: a simple path visits each cell at most once and
    /// the Manhattan distance is bounded by the grid's span.
    pub fn max_live_cost(rows: usize, cols: usize) -> i64 {
        let (rows, cols) = (rows as i64, cols as i64);
        (rows * cols - 1) + (rows + cols - 2)
    }

    /// The concrete dead-end cost for a `rows x cols` grid.
    pub fn resolve(self, rows: usize, cols: usize) -> Result<i32, SearchError> {
        let max_live_cost = Self::max_live_cost(rows, cols);
        let cost = match self {
            DeadEndCost::Derived => max_live_cost + 3,
            DeadEndCost::Legacy => LEGACY_DEAD_END_COST as i64,
        };
        // Dead ends still add their heuristic on top, which must fit in i32 as well.
        let headroom = (rows + cols) as i64;
        if cost + headroom > i32::MAX as i64 {
            return Err(SearchError::CostOverflow {
                dead_end_cost: None,
                max_live_cost,
            });
        }
        if cost <= max_live_cost {
            return Err(SearchError::CostOverflow {
                dead_end_cost: Some(cost as i32),
                max_live_cost,
            });
        }
        Ok(cost as i32)
    }
}

/// Settings for a search run. The default reproduces the reference selection rule with
/// frontier-exhaustion detection and no expansion cap.
#[derive(Clone, Debug, Default)]
pub struct SearchConfig {
    pub frontier: FrontierKind,
    pub dead_end_cost: DeadEndCost,
    /// Stop with [SearchError::ExpansionLimit] after this many expansions.
    pub max_expansions: Option<usize>,
    /// Reject start/goal pairs in different components before growing the tree.
    pub precheck_reachability: bool,
}

impl SearchConfig {
    pub fn with_frontier(mut self, frontier: FrontierKind) -> SearchConfig {
        self.frontier = frontier;
        self
    }
    pub fn with_dead_end_cost(mut self, dead_end_cost: DeadEndCost) -> SearchConfig {
        self.dead_end_cost = dead_end_cost;
        self
    }
    pub fn with_max_expansions(mut self, limit: usize) -> SearchConfig {
        self.max_expansions = Some(limit);
        self
    }
    pub fn with_precheck(mut self, precheck_reachability: bool) -> SearchConfig {
        self.precheck_reachability = precheck_reachability;
        self
    }
}
