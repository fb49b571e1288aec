use gridworld_astar::{FrontierKind, GridLayout, Pathfinder, SearchConfig};

// Solves the reference 10x10 world:
// ..........
// .#........
// .#........
// .#........
// .#........
// .#........
// .#.S...#..
// .#######..
// ..........
// ......G...
// where
// - # marks an obstacle
// - S marks the start
// - G marks the goal
//
// In the printed result x marks explored cells and * the path.
// Set RUST_LOG=debug to follow every expansion.

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let layout = GridLayout::gridworld();
    let config = SearchConfig::default().with_frontier(FrontierKind::TreeScan);
    match Pathfinder::solve(&layout, &config) {
        Ok(solution) => {
            println!("{}", solution.grid);
            println!(
                "Path of {} steps after {} expansions:",
                solution.goal_cost,
                solution.expansions.len()
            );
            for p in solution.path {
                println!("({}, {})", p.y, p.x);
            }
        }
        Err(e) => eprintln!("No path: {e}"),
    }
}
