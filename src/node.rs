//! The capabilities a cell needs to take part in a search.
//!
//! Search bookkeeping lives on the nodes themselves: [SearchState] is scratch space that a
//! [Pathfinder](crate::pathfinder::Pathfinder) overwrites in place, so it is only meaningful
//! during or right after a run and is cleared by [PathNode::reset] before every new one.
use grid_util::point::Point;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::grid::Grid;
use crate::N_SMALLVEC_SIZE;

/// Per-run search fields of a node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchState {
    /// Accumulated cost from the start, `INFINITY` until reached.
    pub distance_travelled: f32,
    /// Frontier ordering key; its meaning depends on the search mode.
    pub priority: f32,
    /// Coordinates of the node this one was reached from. A lookup key into the owning
    /// grid, never an owning reference.
    pub predecessor: Option<Point>,
}

impl SearchState {
    pub fn reset(&mut self) {
        self.predecessor = None;
        self.distance_travelled = f32::INFINITY;
    }
}

impl Default for SearchState {
    fn default() -> SearchState {
        SearchState {
            distance_travelled: f32::INFINITY,
            priority: 0.0,
            predecessor: None,
        }
    }
}

/// A searchable grid cell. Two nodes are the same node iff their points are equal.
pub trait PathNode {
    /// Grid coordinates of the node, fixed once placed.
    fn point(&self) -> Point;
    /// Cost of entering this node.
    fn movement_cost(&self) -> f32;
    fn search(&self) -> &SearchState;
    fn search_mut(&mut self) -> &mut SearchState;

    /// A node with zero movement cost can never be entered.
    fn traversable(&self) -> bool {
        self.movement_cost() != 0.0
    }
    fn distance_travelled(&self) -> f32 {
        self.search().distance_travelled
    }
    fn priority(&self) -> f32 {
        self.search().priority
    }
    fn predecessor(&self) -> Option<Point> {
        self.search().predecessor
    }
    fn reset(&mut self) {
        self.search_mut().reset();
    }
}

impl<N: PathNode + ?Sized> PathNode for &mut N {
    fn point(&self) -> Point {
        (**self).point()
    }
    fn movement_cost(&self) -> f32 {
        (**self).movement_cost()
    }
    fn search(&self) -> &SearchState {
        (**self).search()
    }
    fn search_mut(&mut self) -> &mut SearchState {
        (**self).search_mut()
    }
    fn traversable(&self) -> bool {
        (**self).traversable()
    }
    fn reset(&mut self) {
        (**self).reset()
    }
}

impl<N: PathNode> Grid<N> {
    /// Neighbours of a node that can be entered, in the topology's direction order.
    /// Recomputed on every call so it always reflects current movement costs.
    pub fn traversable_neighbours(&self, point: &Point) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
        self.neighbours(point)
            .into_iter()
            .filter(|p| self.get_point(*p).map_or(false, |n| n.traversable()))
            .collect()
    }

    /// Reverse lookup of a node's coordinates. Nodes carry their own position, so this is
    /// a constant time check that the node is the one stored there.
    pub fn position_of(&self, node: &N) -> Option<Point> {
        let point = node.point();
        match self.get_point(point) {
            Ok(stored) if stored.point() == point => Some(point),
            _ => None,
        }
    }

    /// Clears the search state of every node.
    pub fn reset_search_state(&mut self) {
        for node in self.iter_mut() {
            node.reset();
        }
    }

    /// Generates a [UnionFind] structure over cell indices linking traversable cells to their
    /// traversable neighbours.
    pub fn components(&self) -> UnionFind<usize> {
        let layout = *self.layout();
        let mut components = UnionFind::new(layout.len());
        for (ix, node) in self.iter().enumerate() {
            if !node.traversable() {
                continue;
            }
            let point = layout.point(ix);
            for n in self.traversable_neighbours(&point) {
                if let Some(n_ix) = layout.index(n.x, n.y) {
                    components.union(ix, n_ix);
                }
            }
        }
        components
    }

    /// Checks whether a search from `start` can reach `goal`. The start itself does not
    /// need to be traversable: a search leaves it through its traversable neighbours.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        let (Ok(start_node), Ok(goal_node)) = (self.get_point(*start), self.get_point(*goal))
        else {
            return false;
        };
        if !goal_node.traversable() {
            return false;
        }
        if start == goal {
            return true;
        }
        let layout = self.layout();
        let ix = |p: &Point| layout.index(p.x, p.y);
        let (Some(start_ix), Some(goal_ix)) = (ix(start), ix(goal)) else {
            return false;
        };
        let components = self.components();
        if start_node.traversable() && components.equiv(start_ix, goal_ix) {
            return true;
        }
        self.traversable_neighbours(start)
            .iter()
            .filter_map(ix)
            .any(|n_ix| components.equiv(n_ix, goal_ix))
    }
}
