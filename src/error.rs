//! Typed search errors.
//!
//! [ConfigurationError] covers layouts rejected before any node is created. [SearchError]
//! wraps it together with the ways a running search can end without reaching the goal.

use core::fmt;
use grid_util::point::Point;

/// A grid layout that cannot be searched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Rows or columns is zero.
    EmptyGrid { rows: usize, cols: usize },
    /// The start cell was never set.
    MissingStart,
    /// The goal cell was never set.
    MissingGoal,
    /// The start cell lies outside the grid.
    StartOutOfBounds { start: Point },
    /// The goal cell lies outside the grid.
    GoalOutOfBounds { goal: Point },
    /// The start cell is covered by an obstacle.
    StartOnObstacle { start: Point },
    /// The goal cell is covered by an obstacle.
    GoalOnObstacle { goal: Point },
    /// Start and goal are the same cell.
    StartIsGoal { cell: Point },
    /// An obstacle rectangle is empty or reaches outside the grid.
    ObstacleOutOfBounds { x: i32, y: i32, w: i32, h: i32 },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { rows, cols } => {
                write!(f, "grid must have at least one row and column, got {rows}x{cols}")
            }
            Self::MissingStart => write!(f, "no start cell given"),
            Self::MissingGoal => write!(f, "no goal cell given"),
            Self::StartOutOfBounds { start } => write!(f, "start {start} lies outside the grid"),
            Self::GoalOutOfBounds { goal } => write!(f, "goal {goal} lies outside the grid"),
            Self::StartOnObstacle { start } => write!(f, "start {start} is on an obstacle"),
            Self::GoalOnObstacle { goal } => write!(f, "goal {goal} is on an obstacle"),
            Self::StartIsGoal { cell } => write!(f, "start and goal are both {cell}"),
            Self::ObstacleOutOfBounds { x, y, w, h } => write!(
                f,
                "obstacle at ({x}, {y}) of size {w}x{h} does not fit the grid"
            ),
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// Terminal failure of a search. There is no partial result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The layout was rejected before searching.
    Configuration(ConfigurationError),
    /// Every remaining leaf is a dead end, or start and goal lie in different components.
    Unreachable { expansions: usize },
    /// The configured expansion cap was hit before the goal was selected.
    ExpansionLimit { limit: usize },
    /// The dead-end cost does not exceed every cost a live node can reach on this grid.
    CostOverflow { dead_end_cost: Option<i32>, max_live_cost: i64 },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(e) => write!(f, "invalid grid layout: {e}"),
            Self::Unreachable { expansions } => {
                write!(f, "goal is unreachable (after {expansions} expansions)")
            }
            Self::ExpansionLimit { limit } => {
                write!(f, "expansion limit of {limit} reached before the goal")
            }
            Self::CostOverflow {
                dead_end_cost: Some(cost),
                max_live_cost,
            } => write!(
                f,
                "dead-end cost {cost} does not exceed the largest live cost {max_live_cost}"
            ),
            Self::CostOverflow {
                dead_end_cost: None,
                max_live_cost,
            } => write!(
                f,
                "no dead-end cost above the largest live cost {max_live_cost} fits in i32"
            ),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Configuration(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigurationError> for SearchError {
    fn from(e: ConfigurationError) -> Self {
        Self::Configuration(e)
    }
}
