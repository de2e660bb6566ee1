//! Hand-built grids where the modes are known to behave differently.
use grid_search::{
    path_cost, Grid, GridCell, GraphBuilder, Mode, PathNode, Pathfinder, PathfinderState,
    Topology,
};
use grid_util::point::Point;

/// A 5x3 grid whose middle row is expensive between start and goal:
/// |.....|
/// |S555G|
/// |.....|
fn toll_road() -> Grid<GridCell> {
    Grid::new(
        5,
        3,
        Topology::Square4,
        GridCell::factory(|p| if p.y == 1 && (1..=3).contains(&p.x) { 5.0 } else { 1.0 }),
    )
    .unwrap()
}

fn start() -> Point {
    Point::new(0, 1)
}

fn goal() -> Point {
    Point::new(4, 1)
}

#[test]
fn dijkstra_takes_the_detour() {
    let mut grid = toll_road();
    let path = Pathfinder::new()
        .init(&mut grid, start(), goal(), Mode::Dijkstra)
        .unwrap();
    assert_eq!(path.len(), 7);
    assert_eq!(path_cost(&grid, &path).unwrap(), 12.0);
}

#[test]
fn admissible_astar_matches_dijkstra() {
    let mut grid = toll_road();
    let path = Pathfinder::new()
        .init(&mut grid, start(), goal(), Mode::AStar)
        .unwrap();
    assert_eq!(path_cost(&grid, &path).unwrap(), 12.0);
    assert_eq!(grid.get_point(goal()).unwrap().distance_travelled(), 12.0);
}

#[test]
fn overestimating_heuristic_takes_the_toll_road() {
    let mut grid = toll_road();
    let path = Pathfinder::with_heuristic_factor(10.0)
        .init(&mut grid, start(), goal(), Mode::AStar)
        .unwrap();
    assert_eq!(path, (0..5).map(|x| Point::new(x, 1)).collect::<Vec<_>>());
    assert_eq!(path_cost(&grid, &path).unwrap(), 20.0);
}

#[test]
fn greedy_search_ignores_movement_costs() {
    let mut grid = toll_road();
    let path = Pathfinder::new()
        .init(&mut grid, start(), goal(), Mode::GreedyBestFirstSearch)
        .unwrap();
    assert_eq!(path, (0..5).map(|x| Point::new(x, 1)).collect::<Vec<_>>());
    assert!(path_cost(&grid, &path).unwrap() >= 12.0);
}

#[test]
fn bfs_minimises_moves() {
    let mut grid = toll_road();
    let path = Pathfinder::new()
        .init(&mut grid, start(), goal(), Mode::BreadthFirstSearch)
        .unwrap();
    assert_eq!(path.len(), 5);
}

#[test]
fn hexagonal_paths_follow_offset_rows() {
    // Odd rows are shifted right, so (1, 1) touches (1, 0), (2, 0), (1, 2) and (2, 2).
    let mut grid = Grid::new(3, 3, Topology::Hexagonal, GridCell::factory(|_| 1.0)).unwrap();
    let path = Pathfinder::new()
        .init(&mut grid, Point::new(1, 0), Point::new(2, 2), Mode::AStar)
        .unwrap();
    assert_eq!(path, vec![Point::new(1, 0), Point::new(1, 1), Point::new(2, 2)]);
}

#[test]
fn unreachable_goal_in_graph() {
    // |..#.|
    // |S.#G|
    let mut grid = Grid::new(
        4,
        2,
        Topology::Square8,
        GridCell::factory(|p| if p.x == 2 { 0.0 } else { 1.0 }),
    )
    .unwrap();
    assert!(!grid.reachable(&Point::new(0, 0), &Point::new(3, 0)));
    let mut graph = GraphBuilder::build(&mut grid).unwrap();
    let mut pathfinder = Pathfinder::new();
    let path = pathfinder
        .init(&mut graph, Point::new(0, 0), Point::new(3, 0), Mode::Dijkstra)
        .unwrap();
    assert!(path.is_empty());
    assert_eq!(pathfinder.state(), PathfinderState::Failed);
    assert_eq!(pathfinder.stats().explored, 4);
}

#[test]
fn subscribers_see_cost_changes_between_searches() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let mut grid = toll_road();
    let changed = Rc::new(RefCell::new(Vec::new()));
    let log = changed.clone();
    grid.subscribe(move |p| log.borrow_mut().push(p));

    let mut pathfinder = Pathfinder::new();
    let before = pathfinder.init(&mut grid, start(), goal(), Mode::Dijkstra).unwrap();
    assert!(!before.contains(&Point::new(2, 1)));

    for x in 1..=3 {
        grid.set(x, 1, GridCell::new(Point::new(x, 1), 1.0)).unwrap();
    }
    assert_eq!(changed.borrow().len(), 3);
    let after = pathfinder.init(&mut grid, start(), goal(), Mode::Dijkstra).unwrap();
    assert_eq!(after.len(), 5);
    assert_eq!(path_cost(&grid, &after).unwrap(), 8.0);
}
