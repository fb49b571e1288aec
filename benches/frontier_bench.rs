use criterion::{criterion_group, criterion_main, Criterion};
use gridworld_astar::{cell, region, FrontierKind, GridLayout, Pathfinder, SearchConfig};
use std::hint::black_box;

fn open_layout(n: i32) -> GridLayout {
    // A single wall across the middle with a gap at the right edge.
    GridLayout::new(n as usize, n as usize)
        .with_obstacle(region(n / 2, 0, 1, n - 1))
        .with_start(cell(0, 0))
        .with_goal(cell(n - 1, 0))
}

fn frontier_bench(c: &mut Criterion) {
    let layouts = [
        ("gridworld 10x10", GridLayout::gridworld()),
        ("wall 32x32", open_layout(32)),
    ];
    for (name, layout) in &layouts {
        for frontier in [FrontierKind::TreeScan, FrontierKind::Ordered] {
            let config = SearchConfig::default().with_frontier(frontier);
            c.bench_function(format!("{name}, {frontier:?}").as_str(), |b| {
                b.iter(|| black_box(Pathfinder::solve(layout, &config)))
            });
        }
    }
}

criterion_group!(benches, frontier_bench);
criterion_main!(benches);
