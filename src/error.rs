//! Error types for grid access, the frontier queue and search requests.
use grid_util::point::Point;

/// Errors raised by [Grid](crate::grid::Grid) construction and accessors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    /// Coordinate access outside `[0, width) x [0, height)`. Never clamped.
    #[error("({x}, {y}) is outside of the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    /// A grid needs at least one cell in each dimension.
    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyDimensions { width: usize, height: usize },

    /// Dense storage was handed the wrong number of cells.
    #[error("expected {expected} cells, got {actual}")]
    CellCountMismatch { expected: usize, actual: usize },
}

/// Errors raised by [PriorityQueue](crate::priority_queue::PriorityQueue).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    /// `dequeue` or `peek` on an empty queue.
    #[error("priority queue is empty")]
    Empty,
}

/// Rejected search requests. No search is performed and node state is left untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// The start coordinate holds no node of the graph.
    #[error("start {0} is not a node of the graph")]
    StartMissing(Point),

    /// The goal coordinate holds no node of the graph.
    #[error("goal {0} is not a node of the graph")]
    GoalMissing(Point),

    /// The goal has a movement cost of zero and can never be entered.
    #[error("goal {0} is not traversable")]
    GoalNotTraversable(Point),

    /// Start and goal are the same node.
    #[error("start and goal are both {0}")]
    StartIsGoal(Point),

    /// The frontier was misused; the engine checks its length before every dequeue.
    #[error("frontier error: {0}")]
    Frontier(#[from] QueueError),

    /// A node lookup during expansion failed; neighbours are always in bounds.
    #[error("graph lookup failed: {0}")]
    Grid(#[from] GridError),
}
