//! Fitting a compiled board into a rectangle and placing every tile in it.
//!
//! The placement layer receives one [`TilePlacement`] per tile, in tile index order, and needs
//! nothing else from the core to instantiate the board's visuals.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::board::TileIndex;
use crate::cell::CellState;
use crate::grid::{Point, Position, SQRT_3};
use crate::pattern::CellMatrix;
use crate::shape::Orientation;

/// Size of one triangle and where the board starts inside the fitting rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardScale {
    /// Offset of the board from the lower-left corner of the rectangle.
    pub origin: Point,
    /// Edge length of one triangle.
    pub tile_unit: f64,
}

impl BoardScale {
    /// Scale a board of `extent` (in tile units) to fit `max_width` by `max_height`, centred
    /// along whichever axis has room to spare.
    pub fn fit(extent: (f64, f64), max_width: f64, max_height: f64) -> Self {
        let (board_width, board_height) = extent;
        debug!("board extent in tile units: {} x {}", board_width, board_height);

        if board_width / board_height > max_width / max_height {
            let tile_unit = max_width / board_width;
            Self {
                origin: Point::new(0., (max_height - board_height * tile_unit) / 2.),
                tile_unit,
            }
        } else {
            let tile_unit = max_height / board_height;
            Self {
                origin: Point::new((max_width - board_width * tile_unit) / 2., 0.),
                tile_unit,
            }
        }
    }
}

/// Extent of a matrix in tile units, `(width, height)`.
///
/// Neighboring triangles in a row overlap by half an edge, and every row is one triangle height.
pub fn board_extent(matrix: &CellMatrix) -> (f64, f64) {
    (matrix.width() as f64 * 0.5 + 0.5, matrix.height() as f64 * SQRT_3 / 2.)
}

/// Everything the placement layer needs to instantiate one tile.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TilePlacement {
    /// Tile index on the compiled board.
    pub index: TileIndex,
    /// Which way the triangle points.
    pub orientation: Orientation,
    /// Initial face.
    pub front: bool,
    /// Sprite scale; half the tile unit.
    pub scale: f64,
    /// Centroid of the triangle.
    pub position: Position,
}

/// Place every tile of `matrix` inside a `max_width` by `max_height` rectangle centred on `center`.
pub fn placements(matrix: &CellMatrix, center: Position, max_width: f64, max_height: f64) -> Vec<TilePlacement> {
    let scale = BoardScale::fit(board_extent(matrix), max_width, max_height);
    let unit = scale.tile_unit;
    let corner = Point::new(
        center.x - max_width / 2. + scale.origin.x,
        center.y - max_height / 2. + scale.origin.y,
    );
    let rows = matrix.height() as f64;

    matrix.occupied()
        .enumerate()
        .map(|(index, (location, cell))| {
            let orientation = matrix.orientation_at(location);
            let centroid_height = match orientation {
                Orientation::Upward => 1. / 3.,
                Orientation::Downward => 2. / 3.,
            };

            TilePlacement {
                index,
                orientation,
                front: cell == CellState::Front,
                scale: unit / 2.,
                position: Position::new(
                    corner.x + unit * (location.0 as f64 + 1.) / 2.,
                    corner.y + unit * SQRT_3 / 2. * (rows - location.1 as f64 - 1. + centroid_height),
                    center.z,
                ),
            }
        })
        .collect()
}
