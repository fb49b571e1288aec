use gridworld_astar::{
    cell, is_contiguous, CellState, FrontierKind, GridLayout, Pathfinder, SearchConfig,
};

fn solve(frontier: FrontierKind) -> gridworld_astar::Solution {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = SearchConfig::default().with_frontier(frontier);
    Pathfinder::solve(&GridLayout::gridworld(), &config).unwrap()
}

/// The reference world: the path has to leave the start pocket to the right, go around the
/// short column-7 wall through column 8 and come back along row 9.
#[test]
fn reference_world_is_solved() {
    let solution = solve(FrontierKind::TreeScan);
    let expected = vec![
        cell(6, 3),
        cell(6, 4),
        cell(6, 5),
        cell(6, 6),
        cell(5, 6),
        cell(5, 7),
        cell(5, 8),
        cell(6, 8),
        cell(7, 8),
        cell(8, 8),
        cell(9, 8),
        cell(9, 7),
        cell(9, 6),
    ];
    assert_eq!(solution.path, expected);
    assert_eq!(solution.goal_cost, 12);
    assert_eq!(solution.path.len() - 1, solution.goal_cost as usize);
    assert_eq!(solution.expansions.len(), 27);
    assert!(is_contiguous(&solution.path));
    assert!(solution.path.contains(&cell(8, 8)));
    assert!(solution.path.iter().any(|p| p.x == 8));
    assert_eq!(solution.grid.state(&cell(9, 6)), CellState::OnPath);
    assert_eq!(solution.grid.count(CellState::OnPath), solution.path.len());
    assert_eq!(solution.grid.count(CellState::Obstacle), 14);
}

#[test]
fn reference_world_final_grid() {
    let solution = solve(FrontierKind::TreeScan);
    let expected = "\
..........
.#........
.#.xxxx...
.#xxxxxx..
.#xxxxxxx.
.#xxxx***x
.#x****#*x
.#######*x
.......x*x
......***x
";
    assert_eq!(solution.grid.to_string(), expected);
}

#[test]
fn expansion_order_is_deterministic() {
    let first = solve(FrontierKind::TreeScan);
    let second = solve(FrontierKind::TreeScan);
    assert_eq!(first.expansions, second.expansions);
    assert_eq!(first.path, second.path);
    assert_eq!(first.expansions[..5], [
        cell(6, 3),
        cell(6, 4),
        cell(6, 5),
        cell(6, 6),
        cell(5, 3)
    ]);
}

#[test]
fn frontiers_agree_on_reference_world() {
    let scan = solve(FrontierKind::TreeScan);
    let ordered = solve(FrontierKind::Ordered);
    assert_eq!(scan.expansions, ordered.expansions);
    assert_eq!(scan.path, ordered.path);
    assert_eq!(scan.grid.codes(), ordered.grid.codes());
}
