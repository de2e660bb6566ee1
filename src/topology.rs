use grid_util::point::Point;
use smallvec::SmallVec;

use crate::{DIAGONAL_COST, N_SMALLVEC_SIZE, STRAIGHT_COST};

const SQUARE_4: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const DIAGONALS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// The neighbour-adjacency and distance scheme of a grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Topology {
    /// Square cells connected through their four edges.
    Square4,
    /// Square cells connected through edges and corners.
    #[default]
    Square8,
    /// Pointy-top hexagons in offset rows, odd rows shifted half a cell towards +x.
    Hexagonal,
}

impl Topology {
    /// Direction offsets for a cell in row `y`. Only hexagonal grids depend on the row.
    pub fn directions(&self, y: i32) -> SmallVec<[(i32, i32); N_SMALLVEC_SIZE]> {
        match self {
            Topology::Square4 => SQUARE_4.into_iter().collect(),
            Topology::Square8 => SQUARE_4.into_iter().chain(DIAGONALS).collect(),
            Topology::Hexagonal => {
                let p = y.rem_euclid(2);
                [
                    (-1, 0),
                    (1, 0),
                    (p, 1),
                    (p - 1, 1),
                    (p, -1),
                    (p - 1, -1),
                ]
                .into_iter()
                .collect()
            }
        }
    }

    /// Estimated cost of moving between two cells. Ignores obstacles and per-cell
    /// movement costs; between adjacent cells it is the step cost of the move.
    pub fn distance(&self, p1: &Point, p2: &Point) -> f32 {
        match self {
            Topology::Square4 => {
                ((p1.x - p2.x).abs() + (p1.y - p2.y).abs()) as f32 * STRAIGHT_COST
            }
            Topology::Square8 => {
                let delta_x = (p1.x - p2.x).abs();
                let delta_y = (p1.y - p2.y).abs();
                let diagonal_steps = delta_x.min(delta_y);
                let straight_steps = delta_x.max(delta_y) - diagonal_steps;
                DIAGONAL_COST * diagonal_steps as f32 + STRAIGHT_COST * straight_steps as f32
            }
            Topology::Hexagonal => {
                let (q1, r1, s1) = offset_to_cube(p1);
                let (q2, r2, s2) = offset_to_cube(p2);
                (q1 - q2).abs().max((r1 - r2).abs()).max((s1 - s2).abs()) as f32 * STRAIGHT_COST
            }
        }
    }
}

/// Converts an odd-row offset coordinate into cube coordinates `(q, r, s)`.
fn offset_to_cube(p: &Point) -> (i32, i32, i32) {
    // p.y - (p.y & 1) is always even, so the division is exact for negative rows too.
    let q = p.x - (p.y - (p.y & 1)) / 2;
    let r = p.y;
    (q, r, -q - r)
}

/// The shape of a grid: its dimensions and topology.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Layout {
    pub width: usize,
    pub height: usize,
    pub topology: Topology,
}

impl Layout {
    pub fn new(width: usize, height: usize, topology: Topology) -> Layout {
        Layout {
            width,
            height,
            topology,
        }
    }

    /// The single source of truth for bounds.
    pub fn within_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row-major storage index of an in-bounds coordinate.
    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.within_bounds(x, y).then(|| y as usize * self.width + x as usize)
    }

    /// Inverse of [index](Self::index).
    pub fn point(&self, ix: usize) -> Point {
        Point::new((ix % self.width) as i32, (ix / self.width) as i32)
    }

    /// In-bounds neighbours in direction order. Candidates beyond the edge are dropped.
    pub fn neighbour_points(&self, point: &Point) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
        self.topology
            .directions(point.y)
            .into_iter()
            .map(|(dx, dy)| Point::new(point.x + dx, point.y + dy))
            .filter(|p| self.within_bounds(p.x, p.y))
            .collect()
    }

    pub fn distance(&self, p1: &Point, p2: &Point) -> f32 {
        self.topology.distance(p1, p2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_direction_sets() {
        assert_eq!(Topology::Square4.directions(0).len(), 4);
        let eight = Topology::Square8.directions(3);
        assert_eq!(eight.len(), 8);
        assert_eq!(&eight[..4], &SQUARE_4[..]);
    }

    #[test]
    fn hex_directions_follow_row_parity() {
        let even = Topology::Hexagonal.directions(2);
        let odd = Topology::Hexagonal.directions(3);
        assert!(even.contains(&(-1, 1)) && even.contains(&(0, -1)));
        assert!(!even.contains(&(1, 1)));
        assert!(odd.contains(&(1, 1)) && odd.contains(&(1, -1)));
        assert!(!odd.contains(&(-1, 1)));
    }

    #[test]
    fn octile_distance() {
        let d = Topology::Square8.distance(&Point::new(0, 0), &Point::new(3, 1));
        assert!((d - 3.4).abs() < 1e-5);
        let adjacent = Topology::Square8.distance(&Point::new(2, 2), &Point::new(3, 3));
        assert!((adjacent - DIAGONAL_COST).abs() < 1e-6);
    }

    #[test]
    fn manhattan_distance_on_four_grid() {
        let d = Topology::Square4.distance(&Point::new(0, 0), &Point::new(3, 1));
        assert_eq!(d, 4.0);
        assert_eq!(Topology::Square4.distance(&Point::new(1, 1), &Point::new(1, 2)), 1.0);
    }

    /// Every hexagonal neighbour is at distance one.
    #[test]
    fn hex_neighbours_are_one_step_away() {
        let layout = Layout::new(6, 6, Topology::Hexagonal);
        for y in 0..6 {
            for x in 0..6 {
                let p = Point::new(x, y);
                for n in layout.neighbour_points(&p) {
                    assert_eq!(layout.distance(&p, &n), 1.0, "{p} -> {n}");
                }
            }
        }
    }

    #[test]
    fn hex_distance_across_rows() {
        let hex = Topology::Hexagonal;
        assert_eq!(hex.distance(&Point::new(0, 0), &Point::new(0, 4)), 4.0);
        assert_eq!(hex.distance(&Point::new(0, 0), &Point::new(2, 4)), 4.0);
        assert_eq!(hex.distance(&Point::new(0, 0), &Point::new(3, 4)), 5.0);
        assert_eq!(hex.distance(&Point::new(0, 0), &Point::new(4, 0)), 4.0);
    }

    #[test]
    fn neighbours_are_clipped_at_the_edge() {
        let layout = Layout::new(3, 3, Topology::Square8);
        assert_eq!(layout.neighbour_points(&Point::new(0, 0)).len(), 3);
        assert_eq!(layout.neighbour_points(&Point::new(1, 1)).len(), 8);
        assert_eq!(layout.neighbour_points(&Point::new(2, 1)).len(), 5);
    }

    #[test]
    fn index_round_trip() {
        let layout = Layout::new(4, 3, Topology::Square4);
        assert_eq!(layout.index(3, 2), Some(11));
        assert_eq!(layout.point(11), Point::new(3, 2));
        assert_eq!(layout.index(4, 0), None);
        assert_eq!(layout.index(-1, 0), None);
    }
}
