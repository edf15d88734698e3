//! Geometry of the triangular tiling.
//!
//! A triangular lattice is easiest to work with in oblique coordinates, whose basis vectors are
//! `(1, 0)` and `(1/2, √3/2)` scaled by the cell size. In those coordinates every unit cell is a
//! rhombus made of one upward and one downward triangle, and snapping reduces to flooring plus a
//! lookup on the fractional part.

use serde::{Deserialize, Serialize};
use strum::{Display, VariantArray};

pub(crate) const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Nudge applied before flooring in [`classify_position`], so points computed to sit exactly on a
/// cell boundary do not land in the neighboring cell.
const CLASSIFY_EPSILON: f64 = 0.001;

/// A point in the plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

/// A point in oblique lattice coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Oblique {
    /// Coordinate along `(1, 0)`.
    pub x: f64,
    /// Coordinate along `(1/2, √3/2)`.
    pub y: f64,
}

/// A position in space; the depth coordinate never takes part in grid arithmetic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
    /// Depth, passed through untouched.
    pub z: f64,
}

impl Point {
    /// A point at `(x, y)`.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Position {
    /// A position at `(x, y, z)`.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The planar part of this position.
    pub fn planar(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Where a point lies within a unit cell of the lattice.
#[derive(Copy, Clone, Display, VariantArray, Eq, PartialEq, Hash, Debug)]
pub enum GridPositionState {
    /// Nearest to a lattice vertex.
    Vertex,
    /// Inside an upward triangle, away from its corners.
    UpwardCenter,
    /// Inside a downward triangle, away from its corners.
    DownwardCenter,
}

impl GridPositionState {
    /// Offset from the lower-left cell vertex, in cell units, of the point this state snaps to.
    ///
    /// Vertices report the offset of the vertex they are nearest to.
    fn offset(dx: f64, dy: f64) -> (Self, (f64, f64)) {
        // first match wins; the tests are only disjoint for exact arithmetic
        if dx + dy < 1. / 3. {
            (Self::Vertex, (0., 0.))
        } else if dx + dy > 5. / 3. {
            (Self::Vertex, (1., 1.))
        } else if dx < 1. / 3. && dy > 2. / 3. {
            (Self::Vertex, (0., 1.))
        } else if dx > 2. / 3. && dy < 1. / 3. {
            (Self::Vertex, (1., 0.))
        } else if dx + dy < 1. {
            (Self::UpwardCenter, (1. / 3., 1. / 3.))
        } else {
            (Self::DownwardCenter, (2. / 3., 2. / 3.))
        }
    }
}

/// Convert a cartesian point to oblique coordinates, in the same length unit.
pub fn cartesian_to_oblique(p: Point) -> Oblique {
    Oblique {
        x: p.x - p.y / SQRT_3,
        y: p.y * 2. / SQRT_3,
    }
}

/// Convert oblique coordinates back to a cartesian point; inverse of [`cartesian_to_oblique`].
pub fn oblique_to_cartesian(o: Oblique) -> Point {
    Point {
        x: o.x + o.y * 0.5,
        y: o.y * SQRT_3 / 2.,
    }
}

/// Snap `pos` to the nearest lattice vertex or triangle centroid.
pub fn snap_to_grid(pos: Position, cell_size: f64) -> Position {
    let oblique = cartesian_to_oblique(pos.planar());
    let (nx, ny) = (oblique.x / cell_size, oblique.y / cell_size);
    let (x_floor, y_floor) = (nx.floor(), ny.floor());

    let (_, (x_offset, y_offset)) = GridPositionState::offset(nx - x_floor, ny - y_floor);

    let snapped = oblique_to_cartesian(Oblique {
        x: (x_floor + x_offset) * cell_size,
        y: (y_floor + y_offset) * cell_size,
    });

    Position::new(snapped.x, snapped.y, pos.z)
}

/// Classify where `pos` lies within its lattice cell.
///
/// Used to read a tile's orientation off a placement position.
pub fn classify_position(pos: Position, cell_size: f64) -> GridPositionState {
    let oblique = cartesian_to_oblique(pos.planar());
    let (nx, ny) = (oblique.x / cell_size, oblique.y / cell_size);
    let (x_floor, y_floor) = ((nx + CLASSIFY_EPSILON).floor(), (ny + CLASSIFY_EPSILON).floor());

    GridPositionState::offset(nx - x_floor, ny - y_floor).0
}

/// Grid configuration shared by placement and editor tooling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Edge length of one triangle.
    pub cell_size: f64,
    /// Half-extent of the lattice drawn by editor overlays, in cells.
    pub grid_size: i32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            cell_size: 2.,
            grid_size: 20,
        }
    }
}

impl GridSettings {
    /// [`snap_to_grid`] with the configured cell size.
    pub fn snap(&self, pos: Position) -> Position {
        snap_to_grid(pos, self.cell_size)
    }

    /// [`classify_position`] with the configured cell size.
    pub fn classify(&self, pos: Position) -> GridPositionState {
        classify_position(pos, self.cell_size)
    }

    /// Every lattice vertex within `grid_size` cells of the origin along both oblique axes.
    pub fn vertices(&self) -> impl Iterator<Item = Point> + '_ {
        let range = -self.grid_size..=self.grid_size;
        range.clone()
            .flat_map(move |j| range.clone().map(move |i| (i, j)))
            .map(|(i, j)| oblique_to_cartesian(Oblique {
                x: i as f64 * self.cell_size,
                y: j as f64 * self.cell_size,
            }))
    }
}
