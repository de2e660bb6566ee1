use core::fmt;
use grid_util::point::Point;
use smallvec::SmallVec;

use crate::error::GridError;
use crate::node::PathNode;
use crate::topology::{Layout, Topology};
use crate::N_SMALLVEC_SIZE;

type Subscriber = Box<dyn FnMut(Point)>;

/// Dense 2D storage of cell values with bounds checking and topology services.
///
/// Every coordinate in `[0, width) x [0, height)` holds exactly one value, stored
/// row-major. All accessors go through [within_bounds](Self::within_bounds) and fail with
/// [GridError::OutOfBounds] instead of clamping.
pub struct Grid<T> {
    layout: Layout,
    cells: Vec<T>,
    world_offset: [f32; 3],
    subscribers: Vec<Subscriber>,
}

impl<T> Grid<T> {
    /// Builds a grid by calling `factory` exactly once per coordinate, row by row
    /// starting at `y = 0`.
    pub fn new<F>(
        width: usize,
        height: usize,
        topology: Topology,
        mut factory: F,
    ) -> Result<Grid<T>, GridError>
    where
        F: FnMut(&Layout, Point) -> T,
    {
        let layout = checked_layout(width, height, topology)?;
        let cells = (0..layout.len())
            .map(|ix| factory(&layout, layout.point(ix)))
            .collect();
        Ok(Grid {
            layout,
            cells,
            world_offset: [0.0; 3],
            subscribers: Vec::new(),
        })
    }

    /// Wraps already constructed cells, given in row-major order.
    pub fn from_cells(
        width: usize,
        height: usize,
        topology: Topology,
        cells: Vec<T>,
    ) -> Result<Grid<T>, GridError> {
        let layout = checked_layout(width, height, topology)?;
        if cells.len() != layout.len() {
            return Err(GridError::CellCountMismatch {
                expected: layout.len(),
                actual: cells.len(),
            });
        }
        Ok(Grid {
            layout,
            cells,
            world_offset: [0.0; 3],
            subscribers: Vec::new(),
        })
    }

    pub fn width(&self) -> usize {
        self.layout.width
    }
    pub fn height(&self) -> usize {
        self.layout.height
    }
    pub fn topology(&self) -> Topology {
        self.layout.topology
    }
    pub fn layout(&self) -> &Layout {
        &self.layout
    }
    pub fn len(&self) -> usize {
        self.cells.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn within_bounds(&self, x: i32, y: i32) -> bool {
        self.layout.within_bounds(x, y)
    }
    pub fn point_in_bounds(&self, point: Point) -> bool {
        self.within_bounds(point.x, point.y)
    }

    fn checked_ix(&self, x: i32, y: i32) -> Result<usize, GridError> {
        self.layout.index(x, y).ok_or(GridError::OutOfBounds {
            x,
            y,
            width: self.layout.width,
            height: self.layout.height,
        })
    }

    pub fn get(&self, x: i32, y: i32) -> Result<&T, GridError> {
        let ix = self.checked_ix(x, y)?;
        Ok(&self.cells[ix])
    }
    pub fn get_mut(&mut self, x: i32, y: i32) -> Result<&mut T, GridError> {
        let ix = self.checked_ix(x, y)?;
        Ok(&mut self.cells[ix])
    }
    pub fn get_point(&self, point: Point) -> Result<&T, GridError> {
        self.get(point.x, point.y)
    }
    pub fn get_point_mut(&mut self, point: Point) -> Result<&mut T, GridError> {
        self.get_mut(point.x, point.y)
    }

    /// Replaces the value at a coordinate, returning the old one, and notifies every
    /// subscriber of the change.
    pub fn set(&mut self, x: i32, y: i32, value: T) -> Result<T, GridError> {
        let ix = self.checked_ix(x, y)?;
        let old = std::mem::replace(&mut self.cells[ix], value);
        let point = Point::new(x, y);
        for subscriber in self.subscribers.iter_mut() {
            subscriber(point);
        }
        Ok(old)
    }
    pub fn set_point(&mut self, point: Point, value: T) -> Result<T, GridError> {
        self.set(point.x, point.y, value)
    }

    /// Registers a callback invoked with the coordinate of every value replaced through
    /// [set](Self::set). Nothing in the crate depends on these notifications.
    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: FnMut(Point) + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
    }
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// In-bounds neighbours of a coordinate in the topology's direction order.
    pub fn neighbours(&self, point: &Point) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
        self.layout.neighbour_points(point)
    }

    /// Topology-specific estimate between two cells, see [Topology::distance].
    pub fn distance(&self, p1: &Point, p2: &Point) -> f32 {
        self.layout.distance(p1, p2)
    }

    /// World placement metadata for renderers. The grid itself never reads it.
    pub fn world_offset(&self) -> [f32; 3] {
        self.world_offset
    }
    pub fn set_world_offset(&mut self, offset: [f32; 3]) {
        self.world_offset = offset;
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.cells.len()).map(|ix| self.layout.point(ix))
    }
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.cells.iter()
    }
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.cells.iter_mut()
    }
}

fn checked_layout(width: usize, height: usize, topology: Topology) -> Result<Layout, GridError> {
    if width == 0 || height == 0 {
        return Err(GridError::EmptyDimensions { width, height });
    }
    Ok(Layout::new(width, height, topology))
}

impl<T: fmt::Debug> fmt::Debug for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("layout", &self.layout)
            .field("world_offset", &self.world_offset)
            .field("subscribers", &self.subscribers.len())
            .field("cells", &self.cells)
            .finish()
    }
}

/// Text map with the highest row first, `#` marking cells that cannot be entered.
impl<N: PathNode> fmt::Display for Grid<N> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in (0..self.height() as i32).rev() {
            for x in 0..self.width() as i32 {
                let c = match self.get(x, y) {
                    Ok(n) if n.traversable() => '.',
                    _ => '#',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
