use grid_search::{path_cost, Grid, GridCell, Mode, Pathfinder, Topology};
use grid_util::point::Point;

// Runs every search mode on the same grid. The middle row is a costly road and a wall splits
// the grid, leaving the road as the only gap. Modes that weigh movement costs leave the road
// on both sides of the gap, the others follow it straight to the goal.
//
// A raised heuristic_factor scales the heuristic of A*, which then favours nodes close to
// the goal over cheap ones. This is called Weighted A*: it explores fewer nodes but the
// path it finds is no longer guaranteed to be the cheapest.

fn main() {
    const N: i32 = 9;
    let mut grid = Grid::new(
        N as usize,
        5,
        Topology::Square8,
        GridCell::factory(|p| match (p.x, p.y) {
            (4, 0..=1) | (4, 3..=4) => 0.0,
            (1..=7, 2) => 6.0,
            _ => 1.0,
        }),
    )
    .unwrap();
    println!("{}", grid);
    let start = Point::new(0, 2);
    let end = Point::new(N - 1, 2);

    let mut pathfinder = Pathfinder::new();
    for mode in [
        Mode::BreadthFirstSearch,
        Mode::Dijkstra,
        Mode::GreedyBestFirstSearch,
        Mode::AStar,
    ] {
        let path = pathfinder.init(&mut grid, start, end, mode).unwrap();
        println!(
            "{:?}: {} nodes, cost {}, {} explored",
            mode,
            path.len(),
            path_cost(&grid, &path).unwrap(),
            pathfinder.stats().explored
        );
    }

    let mut weighted = Pathfinder::with_heuristic_factor(3.0);
    let path = weighted.init(&mut grid, start, end, Mode::AStar).unwrap();
    println!(
        "Weighted A*: {} nodes, cost {}, {} explored",
        path.len(),
        path_cost(&grid, &path).unwrap(),
        weighted.stats().explored
    );
    println!("Path:");
    for p in path {
        println!("{:?}", p);
    }
}
