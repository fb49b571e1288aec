//! The search driver: tree growth, the main loop and path reconstruction.
use grid_util::point::Point;
use log::{debug, info, warn};
use smallvec::SmallVec;

use crate::frontier::{ordered::OrderedFrontier, tree_scan::TreeScan, Frontier, FrontierKind};
use crate::node::{NodeId, SearchTree};
use crate::{
    manhattan, CellState, ConfigurationError, GridLayout, OccupancyGrid, SearchConfig,
    SearchError, N_SMALLVEC_SIZE,
};

/// Driver state. `Searching` holds the leaf to expand next, `Done` the leaf on the goal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchState {
    Searching(NodeId),
    Done(NodeId),
}

/// Result of [run_search]: the grown tree, the node that reached the goal and the cells
/// expanded, in order.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    pub tree: SearchTree,
    pub terminal: NodeId,
    pub expansions: Vec<Point>,
}

/// Expands `id` into its occupiable neighbours, marking each as [CellState::Explored].
/// A node without any neighbour becomes a dead end with `g_cost = dead_end_cost`.
pub fn grow_tree(
    tree: &mut SearchTree,
    id: NodeId,
    grid: &mut OccupancyGrid,
    goal: &Point,
    dead_end_cost: i32,
) -> SmallVec<[NodeId; N_SMALLVEC_SIZE]> {
    let position = tree[id].position;
    let children = grid
        .occupiable_neighbours(&position)
        .into_iter()
        .map(|p| {
            grid.mark(&p, CellState::Explored);
            tree.add_child(id, p, manhattan(&p, goal))
        })
        .collect::<SmallVec<[NodeId; N_SMALLVEC_SIZE]>>();
    if children.is_empty() {
        debug!("{} is a dead end", position);
        tree.mark_dead_end(id, dead_end_cost);
    } else {
        tree.mark_expanded(id);
    }
    children
}

fn check_endpoints(
    grid: &OccupancyGrid,
    start: &Point,
    goal: &Point,
) -> Result<(), ConfigurationError> {
    match grid.try_state(start) {
        None => return Err(ConfigurationError::StartOutOfBounds { start: *start }),
        Some(CellState::Obstacle) => {
            return Err(ConfigurationError::StartOnObstacle { start: *start })
        }
        _ => {}
    }
    match grid.try_state(goal) {
        None => return Err(ConfigurationError::GoalOutOfBounds { goal: *goal }),
        Some(CellState::Obstacle) => return Err(ConfigurationError::GoalOnObstacle { goal: *goal }),
        _ => {}
    }
    if start == goal {
        return Err(ConfigurationError::StartIsGoal { cell: *start });
    }
    Ok(())
}

/// Runs the search on `grid` with the strategies chosen in `config`. The grid is left with
/// every generated cell marked [CellState::Explored].
pub fn run_search(
    grid: &mut OccupancyGrid,
    start: Point,
    goal: Point,
    config: &SearchConfig,
) -> Result<SearchOutcome, SearchError> {
    check_endpoints(grid, &start, &goal)?;
    let dead_end_cost = config.dead_end_cost.resolve(grid.rows(), grid.cols())?;
    if config.precheck_reachability {
        grid.update();
        if grid.unreachable(&start, &goal) {
            info!("{} is not reachable from {}", goal, start);
            return Err(SearchError::Unreachable { expansions: 0 });
        }
        info!("{} is reachable from {}, computing path", goal, start);
    }
    match config.frontier {
        FrontierKind::TreeScan => run_search_with(
            grid,
            start,
            goal,
            TreeScan::new(),
            dead_end_cost,
            config.max_expansions,
        ),
        FrontierKind::Ordered => run_search_with(
            grid,
            start,
            goal,
            OrderedFrontier::new(),
            dead_end_cost,
            config.max_expansions,
        ),
    }
}

/// The main loop over an explicit [Frontier]. Expands the current leaf, selects the next
/// one and stops once the selected leaf sits on `goal`.
///
/// The loop gives up with [SearchError::Unreachable] when the selected leaf is a dead end,
/// which only happens once no live leaf is left, and with [SearchError::ExpansionLimit]
/// after `max_expansions` expansions. `dead_end_cost` must come from [DeadEndCost::resolve]
/// for this grid.
///
/// [DeadEndCost::resolve]: crate::DeadEndCost::resolve
pub(crate) fn run_search_with<F: Frontier>(
    grid: &mut OccupancyGrid,
    start: Point,
    goal: Point,
    mut frontier: F,
    dead_end_cost: i32,
    max_expansions: Option<usize>,
) -> Result<SearchOutcome, SearchError> {
    info!("Searching from {} to {}", start, goal);
    // The start must never be generated again as somebody's child.
    grid.mark(&start, CellState::OnPath);
    let mut tree = SearchTree::new(start, manhattan(&start, &goal));
    let mut expansions: Vec<Point> = Vec::new();
    frontier.insert(&tree, tree.root());
    let mut state = next_state(&mut frontier, &tree, &goal, expansions.len())?;
    loop {
        match state {
            SearchState::Done(terminal) => {
                info!(
                    "Reached {} after {} expansions, {} nodes generated",
                    goal,
                    expansions.len(),
                    tree.len()
                );
                return Ok(SearchOutcome {
                    tree,
                    terminal,
                    expansions,
                });
            }
            SearchState::Searching(current) => {
                if tree[current].is_dead_end() {
                    warn!(
                        "No live leaves left after {} expansions, {} is unreachable",
                        expansions.len(),
                        goal
                    );
                    return Err(SearchError::Unreachable {
                        expansions: expansions.len(),
                    });
                }
                if let Some(limit) = max_expansions {
                    if expansions.len() >= limit {
                        warn!("Expansion limit of {} reached", limit);
                        return Err(SearchError::ExpansionLimit { limit });
                    }
                }
                let children = grow_tree(&mut tree, current, grid, &goal, dead_end_cost);
                debug!(
                    "Expanded {} (cost {}) into {} children",
                    tree[current].position,
                    tree[current].cost(),
                    children.len()
                );
                expansions.push(tree[current].position);
                if children.is_empty() {
                    frontier.insert(&tree, current);
                }
                for child in children {
                    frontier.insert(&tree, child);
                }
                state = next_state(&mut frontier, &tree, &goal, expansions.len())?;
            }
        }
    }
}

fn next_state<F: Frontier>(
    frontier: &mut F,
    tree: &SearchTree,
    goal: &Point,
    expansions: usize,
) -> Result<SearchState, SearchError> {
    let best = frontier
        .select(tree)
        .ok_or(SearchError::Unreachable { expansions })?;
    if tree[best].position == *goal {
        Ok(SearchState::Done(best))
    } else {
        Ok(SearchState::Searching(best))
    }
}

/// Walks parent links from `terminal` to the root, marking every cell on the way as
/// [CellState::OnPath]. Returns the cells from start to goal.
pub fn reconstruct_path(tree: &SearchTree, terminal: NodeId, grid: &mut OccupancyGrid) -> Vec<Point> {
    let path = tree.path_to(terminal);
    for position in &path {
        grid.mark(position, CellState::OnPath);
    }
    path
}

/// A solved layout: the final grid for display, the path from start to goal, the goal
/// node's `g_cost`, the expansion order and the search tree that produced them.
#[derive(Clone, Debug)]
pub struct Solution {
    pub grid: OccupancyGrid,
    pub path: Vec<Point>,
    pub goal_cost: i32,
    pub expansions: Vec<Point>,
    pub tree: SearchTree,
}

/// Builds, searches and reconstructs in one call.
pub struct Pathfinder;

impl Pathfinder {
    pub fn solve(layout: &GridLayout, config: &SearchConfig) -> Result<Solution, SearchError> {
        let (mut grid, start, goal) = layout.build()?;
        let outcome = run_search(&mut grid, start, goal, config)?;
        let path = reconstruct_path(&outcome.tree, outcome.terminal, &mut grid);
        Ok(Solution {
            goal_cost: outcome.tree[outcome.terminal].g_cost,
            grid,
            path,
            expansions: outcome.expansions,
            tree: outcome.tree,
        })
    }
}
