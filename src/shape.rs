//! Triangle orientation and the three directions a triangle can share an edge in.

use serde::{Deserialize, Serialize};
use strum::{Display, VariantArray};

use crate::location::Location;

/// A single step between cells of a [`CellMatrix`](crate::CellMatrix).
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum TriangleStep {
    /// Next column.
    Right,
    /// Previous column.
    Left,
    /// Towards matrix row 0, the top of the layout.
    Up,
    /// Away from matrix row 0.
    Down,
}

impl TriangleStep {
    /// Attempt the step from `location` in the direction specified by `self` and return the resultant [`Location`].
    pub fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Right => location.offset_by((1, 0)),
            Self::Left => location.offset_by((-1, 0)),
            Self::Up => location.offset_by((0, -1)),
            Self::Down => location.offset_by((0, 1)),
        }
    }

    /// Directions which lead from a tile to a higher-indexed one.
    ///
    /// Tiles are indexed from the bottom row upwards, left to right, so these are right and up.
    pub const FORWARD_VARIANTS: &'static [Self] = &[Self::Right, Self::Up];

    /// Invert the direction specified by `self`.
    pub fn invert(&self) -> Self {
        match self {
            Self::Right => Self::Left,
            Self::Left => Self::Right,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    /// Convert this step to a forward direction, if it is not already one.
    pub fn ensure_forward(&self) -> Self {
        match Self::FORWARD_VARIANTS.contains(self) {
            true => *self,
            false => self.invert(),
        }
    }
}

/// Which way a triangle points.
#[derive(Copy, Clone, Display, VariantArray, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum Orientation {
    /// △, the horizontal edge is at the bottom.
    Upward,
    /// ▽, the horizontal edge is at the top.
    Downward,
}

impl Orientation {
    /// The orientation of the triangle at `location`.
    ///
    /// Orientation alternates along rows and columns; `top_left_downward` pins the triangle at
    /// matrix position `(0, 0)`.
    pub fn at(location: Location, top_left_downward: bool) -> Self {
        let even = (location.0 + location.1) % 2 == 0;
        if even == top_left_downward { Self::Downward } else { Self::Upward }
    }

    /// The step crossing this triangle's horizontal edge.
    pub fn base_step(&self) -> TriangleStep {
        match self {
            Self::Upward => TriangleStep::Down,
            Self::Downward => TriangleStep::Up,
        }
    }

    /// Whether this is [`Orientation::Upward`].
    pub fn is_upward(&self) -> bool {
        *self == Self::Upward
    }
}

/// A neighbor slot of a [`Tile`](crate::Tile).
///
/// The discriminant is the slot index in [`Tile::neighbors`](crate::Tile::neighbors).
#[derive(Copy, Clone, Display, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum Side {
    /// Shared with the next tile in the row.
    Right = 0,
    /// Shared with the previous tile in the row.
    Left = 1,
    /// The horizontal edge: the top of a downward triangle, the bottom of an upward one.
    Base = 2,
}

impl Side {
    /// Index of this side in a neighbor array.
    pub fn slot(&self) -> usize {
        *self as usize
    }

    /// The step leaving a triangle of the given orientation through this side.
    pub fn step(&self, orientation: Orientation) -> TriangleStep {
        match self {
            Self::Right => TriangleStep::Right,
            Self::Left => TriangleStep::Left,
            Self::Base => orientation.base_step(),
        }
    }
}
