//! # grid_search
//!
//! Grid-based spatial indexing and single-source path search. A [Grid] stores one value
//! per cell and knows its [Topology]: 4- or 8-connected square cells, or
//! [offset hexagons](https://www.redblobgames.com/grids/hexagons/#coordinates-offset).
//! Cells implementing [PathNode] can be searched by a [Pathfinder] with one of four
//! classical strategies ([Mode]): breadth-first search,
//! [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm),
//! greedy best-first search or [A*](https://en.wikipedia.org/wiki/A*_search_algorithm).
//!
//! ```
//! use grid_search::{Grid, GridCell, Mode, Pathfinder, Topology};
//! use grid_util::point::Point;
//!
//! // |  G|
//! // | # |
//! // |S  |
//! let mut grid = Grid::new(3, 3, Topology::Square4, GridCell::factory(|p| {
//!     if p == Point::new(1, 1) { 0.0 } else { 1.0 }
//! }))
//! .unwrap();
//! let path = Pathfinder::new()
//!     .init(&mut grid, Point::new(0, 0), Point::new(2, 2), Mode::AStar)
//!     .unwrap();
//! assert_eq!(path.len(), 5);
//! ```
//!
//! Search state is kept on the nodes and overwritten by every run; a graph must not be
//! searched by two runs at once.
pub mod cell;
pub mod error;
pub mod graph;
pub mod grid;
pub mod node;
pub mod pathfinder;
pub mod priority_queue;
pub mod topology;

pub use cell::GridCell;
pub use error::{GridError, QueueError, SearchError};
pub use graph::{Graph, GraphBuilder};
pub use grid::Grid;
pub use node::{PathNode, SearchState};
pub use pathfinder::{path_cost, Mode, Pathfinder, PathfinderState, SearchStats};
pub use priority_queue::PriorityQueue;
pub use topology::{Layout, Topology};

/// Cost of a move to an edge-adjacent cell.
pub const STRAIGHT_COST: f32 = 1.0;
/// Cost of a diagonal move on 8-connected square grids.
pub const DIAGONAL_COST: f32 = 1.4;
/// Heuristic scale of a new [Pathfinder]; `1.0` keeps A* admissible.
pub const DEFAULT_HEURISTIC_FACTOR: f32 = 1.0;
/// Inline capacity of neighbour buffers; no topology has more than eight neighbours.
pub const N_SMALLVEC_SIZE: usize = 8;
