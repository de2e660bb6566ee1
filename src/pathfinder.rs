//! The search engine.
//!
//! A [Pathfinder] runs one search at a time over a grid of [PathNode]s. The four modes share
//! a single expansion loop and differ only in which neighbours they skip and how they
//! assign frontier priorities:
//!
//! | Mode | Skips | `distance_travelled` | Priority |
//! |---|---|---|---|
//! | [Mode::BreadthFirstSearch] | explored or queued | always overwritten | explored count |
//! | [Mode::Dijkstra] | explored | only if strictly lower | distance, on first queueing |
//! | [Mode::GreedyBestFirstSearch] | explored or queued | always overwritten | heuristic only |
//! | [Mode::AStar] | explored | only if strictly lower | distance + heuristic, on first queueing |
//!
//! BFS and greedy best-first keep their classic semantics and ignore cheaper routes to
//! nodes that are already queued. The search ends as soon as the goal enters the frontier.
use core::cmp::Ordering;
use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::IndexSet;
use itertools::Itertools;
use log::{debug, trace, warn};

use crate::error::{GridError, SearchError};
use crate::grid::Grid;
use crate::node::PathNode;
use crate::priority_queue::PriorityQueue;
use crate::DEFAULT_HEURISTIC_FACTOR;

type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    BreadthFirstSearch,
    Dijkstra,
    GreedyBestFirstSearch,
    #[default]
    AStar,
}

impl Mode {
    /// Whether neighbours already in the frontier are skipped.
    fn skips_queued(&self) -> bool {
        matches!(self, Mode::BreadthFirstSearch | Mode::GreedyBestFirstSearch)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PathfinderState {
    #[default]
    Idle,
    Running,
    Succeeded,
    Failed,
}

/// Counters describing the last run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Number of nodes taken off the frontier.
    pub iterations: usize,
    /// Size of the explored set when the run ended.
    pub explored: usize,
    /// Nodes still queued when the run ended.
    pub frontier: usize,
}

/// A queued node. Equality is the node's identity (its point); ordering is its priority at
/// the time it was queued, which no mode changes while the node stays queued.
#[derive(Clone, Copy, Debug)]
struct FrontierEntry {
    priority: f32,
    point: Point,
}

impl FrontierEntry {
    fn at(point: Point) -> FrontierEntry {
        FrontierEntry {
            priority: 0.0,
            point,
        }
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.point == other.point
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.priority.partial_cmp(&other.priority)
    }
}

/// Single-threaded search engine. Node state is mutated in place, so two runs must never
/// share a graph at the same time; give every concurrent search its own graph.
#[derive(Clone, Debug)]
pub struct Pathfinder {
    /// Scale applied to the topology distance used as heuristic by
    /// [Mode::GreedyBestFirstSearch] and [Mode::AStar]. `0.0` turns A* into Dijkstra;
    /// values above `1.0` overestimate and give up A*'s optimality.
    pub heuristic_factor: f32,
    mode: Mode,
    state: PathfinderState,
    frontier: PriorityQueue<FrontierEntry>,
    explored: FxIndexSet<Point>,
    stats: SearchStats,
}

impl Default for Pathfinder {
    fn default() -> Pathfinder {
        Pathfinder {
            heuristic_factor: DEFAULT_HEURISTIC_FACTOR,
            mode: Mode::default(),
            state: PathfinderState::Idle,
            frontier: PriorityQueue::new(),
            explored: FxIndexSet::default(),
            stats: SearchStats::default(),
        }
    }
}

impl Pathfinder {
    pub fn new() -> Pathfinder {
        Pathfinder::default()
    }

    pub fn with_heuristic_factor(heuristic_factor: f32) -> Pathfinder {
        Pathfinder {
            heuristic_factor,
            ..Pathfinder::default()
        }
    }

    pub fn state(&self) -> PathfinderState {
        self.state
    }

    /// Mode of the last run.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Explored points of the last run in expansion order.
    pub fn explored(&self) -> impl Iterator<Item = &Point> {
        self.explored.iter()
    }

    /// Searches `graph` for a path from `start` to `goal`.
    ///
    /// Returns the path including both endpoints, or an empty path if the goal is
    /// unreachable. Requests with a start or goal outside the graph, an untraversable goal,
    /// or `start == goal` are rejected before any node is touched. Otherwise the search
    /// state of every node is reset first, so reruns on the same graph are independent.
    pub fn init<N: PathNode>(
        &mut self,
        graph: &mut Grid<N>,
        start: Point,
        goal: Point,
        mode: Mode,
    ) -> Result<Vec<Point>, SearchError> {
        if let Err(err) = validate(graph, start, goal) {
            warn!("Pathfinder rejected request: {}", err);
            return Err(err);
        }

        graph.reset_search_state();
        self.mode = mode;
        self.frontier.clear();
        self.explored.clear();
        self.stats = SearchStats::default();
        self.state = PathfinderState::Running;

        let start_node = graph.get_point_mut(start)?;
        start_node.search_mut().distance_travelled = 0.0;
        start_node.search_mut().priority = 0.0;
        self.frontier.enqueue(FrontierEntry::at(start));

        let goal_entry = FrontierEntry::at(goal);
        let path = loop {
            if self.frontier.is_empty() {
                break None;
            }
            let current = self.frontier.dequeue()?.point;
            self.stats.iterations += 1;
            self.explored.insert(current);
            self.expand(graph, current, goal)?;
            if self.frontier.contains(&goal_entry) {
                break Some(backtrack(graph, goal));
            }
        };

        self.stats.explored = self.explored.len();
        self.stats.frontier = self.frontier.len();
        let path = match path {
            Some(path) => {
                self.state = PathfinderState::Succeeded;
                path
            }
            None => {
                self.state = PathfinderState::Failed;
                Vec::new()
            }
        };
        debug!(
            "{:?} from {} to {}: {:?} after {} iterations, {} explored, path of {} nodes",
            mode,
            start,
            goal,
            self.state,
            self.stats.iterations,
            self.stats.explored,
            path.len()
        );
        Ok(path)
    }

    fn heuristic<N: PathNode>(&self, graph: &Grid<N>, point: &Point, goal: &Point) -> f32 {
        graph.distance(point, goal) * self.heuristic_factor
    }

    /// Relaxes every traversable neighbour of `current` according to the active mode.
    fn expand<N: PathNode>(
        &mut self,
        graph: &mut Grid<N>,
        current: Point,
        goal: Point,
    ) -> Result<(), SearchError> {
        let current_distance = graph.get_point(current)?.distance_travelled();
        trace!("Expanding {} at distance {}", current, current_distance);
        for neighbour in graph.traversable_neighbours(&current) {
            if self.explored.contains(&neighbour) {
                continue;
            }
            let queued = self.frontier.contains(&FrontierEntry::at(neighbour));
            if queued && self.mode.skips_queued() {
                continue;
            }
            let step = graph.distance(&current, &neighbour);
            let heuristic = self.heuristic(graph, &neighbour, &goal);
            let explored_count = self.explored.len() as f32;
            let node = graph.get_point_mut(neighbour)?;
            let new_distance = step + current_distance + node.movement_cost();
            let search = node.search_mut();

            let priority = match self.mode {
                Mode::BreadthFirstSearch | Mode::GreedyBestFirstSearch => {
                    search.distance_travelled = new_distance;
                    search.predecessor = Some(current);
                    if self.mode == Mode::BreadthFirstSearch {
                        explored_count
                    } else {
                        heuristic
                    }
                }
                Mode::Dijkstra | Mode::AStar => {
                    // An unvisited node accepts any distance, even one that overflowed.
                    if search.distance_travelled == f32::INFINITY
                        || new_distance < search.distance_travelled
                    {
                        search.distance_travelled = new_distance;
                        search.predecessor = Some(current);
                    }
                    if queued {
                        continue;
                    }
                    if self.mode == Mode::AStar {
                        search.distance_travelled + heuristic
                    } else {
                        search.distance_travelled
                    }
                }
            };
            search.priority = priority;
            self.frontier.enqueue(FrontierEntry {
                priority,
                point: neighbour,
            });
        }
        Ok(())
    }
}

fn validate<N: PathNode>(graph: &Grid<N>, start: Point, goal: Point) -> Result<(), SearchError> {
    if !graph.point_in_bounds(start) {
        return Err(SearchError::StartMissing(start));
    }
    let goal_node = graph
        .get_point(goal)
        .map_err(|_| SearchError::GoalMissing(goal))?;
    if !goal_node.traversable() {
        return Err(SearchError::GoalNotTraversable(goal));
    }
    if start == goal {
        return Err(SearchError::StartIsGoal(goal));
    }
    Ok(())
}

/// Follows predecessor links back from `goal` and returns the path in travel order.
fn backtrack<N: PathNode>(graph: &Grid<N>, goal: Point) -> Vec<Point> {
    let mut path = std::iter::successors(Some(goal), |p| {
        graph.get_point(*p).ok().and_then(|node| node.predecessor())
    })
    .collect::<Vec<_>>();
    path.reverse();
    path
}

/// Cost of following `path`: every move costs the topology distance between the two cells
/// plus the movement cost of the cell entered. For a path returned by
/// [Pathfinder::init] this is the goal's `distance_travelled`.
pub fn path_cost<N: PathNode>(graph: &Grid<N>, path: &[Point]) -> Result<f32, GridError> {
    path.iter()
        .tuple_windows()
        .map(|(a, b)| -> Result<f32, GridError> {
            Ok(graph.distance(a, b) + graph.get_point(*b)?.movement_cost())
        })
        .sum()
}
