use core::fmt;
use core::hash::{Hash, Hasher};
use grid_util::point::Point;

use crate::node::{PathNode, SearchState};
use crate::topology::Layout;

/// A plain searchable cell: a position, a movement cost and the search scratch fields.
#[derive(Clone, Debug)]
pub struct GridCell {
    point: Point,
    movement_cost: f32,
    search: SearchState,
}

impl GridCell {
    pub fn new(point: Point, movement_cost: f32) -> GridCell {
        GridCell {
            point,
            movement_cost,
            search: SearchState::default(),
        }
    }

    /// Cell factory for [Grid::new](crate::grid::Grid::new) taking the movement cost of
    /// every coordinate from `cost`.
    pub fn factory<F>(mut cost: F) -> impl FnMut(&Layout, Point) -> GridCell
    where
        F: FnMut(Point) -> f32,
    {
        move |_, point| GridCell::new(point, cost(point))
    }

    pub fn set_movement_cost(&mut self, movement_cost: f32) {
        self.movement_cost = movement_cost;
    }
}

impl PathNode for GridCell {
    fn point(&self) -> Point {
        self.point
    }
    fn movement_cost(&self) -> f32 {
        self.movement_cost
    }
    fn search(&self) -> &SearchState {
        &self.search
    }
    fn search_mut(&mut self) -> &mut SearchState {
        &mut self.search
    }
}

impl PartialEq for GridCell {
    fn eq(&self, other: &Self) -> bool {
        self.point == other.point
    }
}

impl Eq for GridCell {}

impl Hash for GridCell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.point.hash(state);
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} @ {}", self.movement_cost, self.point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::topology::Topology;

    #[test]
    fn equality_is_positional() {
        let mut a = GridCell::new(Point::new(1, 2), 1.0);
        let b = GridCell::new(Point::new(1, 2), 5.0);
        a.search_mut().distance_travelled = 3.0;
        assert_eq!(a, b);
        assert_ne!(a, GridCell::new(Point::new(2, 1), 1.0));
    }

    #[test]
    fn zero_cost_is_not_traversable() {
        let mut cell = GridCell::new(Point::new(0, 0), 0.0);
        assert!(!cell.traversable());
        cell.set_movement_cost(0.5);
        assert!(cell.traversable());
    }

    #[test]
    fn factory_places_cells() {
        let grid = Grid::new(
            3,
            2,
            Topology::Square4,
            GridCell::factory(|p| (p.x + p.y) as f32),
        )
        .unwrap();
        let cell = grid.get(2, 1).unwrap();
        assert_eq!(cell.point(), Point::new(2, 1));
        assert_eq!(cell.movement_cost(), 3.0);
        assert!(!grid.get(0, 0).unwrap().traversable());
        assert_eq!(cell.distance_travelled(), f32::INFINITY);
    }
}
