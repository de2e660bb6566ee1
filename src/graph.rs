use crate::error::GridError;
use crate::grid::Grid;
use crate::node::PathNode;

/// A grid of references to search nodes, decoupled from the concrete cell type.
pub type Graph<'a> = Grid<&'a mut dyn PathNode>;

/// Lifts a grid of concrete cells into a [Graph].
pub struct GraphBuilder;

impl GraphBuilder {
    /// The returned graph aliases the cells of `grid`: no node state is copied, and what a
    /// search writes into the graph is visible on `grid` once the graph is dropped. Width,
    /// height, topology and world offset are preserved; subscribers are not.
    pub fn build<T: PathNode>(grid: &mut Grid<T>) -> Result<Graph<'_>, GridError> {
        let (width, height, topology) = (grid.width(), grid.height(), grid.topology());
        let offset = grid.world_offset();
        let nodes = grid
            .iter_mut()
            .map(|cell| cell as &mut dyn PathNode)
            .collect::<Vec<_>>();
        let mut graph = Grid::from_cells(width, height, topology, nodes)?;
        graph.set_world_offset(offset);
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::GridCell;
    use crate::topology::Topology;
    use grid_util::point::Point;

    #[test]
    fn graph_preserves_shape_and_identity() {
        let mut grid = Grid::new(4, 3, Topology::Hexagonal, GridCell::factory(|_| 2.0)).unwrap();
        grid.set_world_offset([1.0, 0.0, -2.0]);
        let graph = GraphBuilder::build(&mut grid).unwrap();
        assert_eq!(graph.width(), 4);
        assert_eq!(graph.height(), 3);
        assert_eq!(graph.topology(), Topology::Hexagonal);
        assert_eq!(graph.world_offset(), [1.0, 0.0, -2.0]);
        for p in graph.points() {
            assert_eq!(graph.get_point(p).unwrap().point(), p);
        }
    }

    #[test]
    fn graph_aliases_cells() {
        let mut grid = Grid::new(2, 2, Topology::Square4, GridCell::factory(|_| 1.0)).unwrap();
        {
            let mut graph = GraphBuilder::build(&mut grid).unwrap();
            let node = graph.get_mut(1, 1).unwrap();
            node.search_mut().distance_travelled = 7.0;
            node.search_mut().predecessor = Some(Point::new(0, 1));
        }
        let cell = grid.get(1, 1).unwrap();
        assert_eq!(cell.distance_travelled(), 7.0);
        assert_eq!(cell.predecessor(), Some(Point::new(0, 1)));
    }
}
