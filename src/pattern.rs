//! Cell matrices: the rectangular character patterns stages are written in.

use std::fmt::{Display, Formatter};

use ndarray::{Array1, Array2};
use thiserror::Error;

use crate::cell::{parse_row, CellState};
use crate::location::{Dimension, Location};
use crate::shape::Orientation;

/// Reasons a pattern cannot be turned into a [`CellMatrix`].
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum PatternError {
    /// A pattern string holds a character outside `0`, `1` and `2`.
    #[error("invalid pattern character {found:?} at row {row}, column {column}")]
    InvalidCharacter {
        /// Pattern row, 0 being the first string.
        row: usize,
        /// Character position within the row.
        column: usize,
        /// The offending character.
        found: char,
    },
    /// Row count or row width disagrees with the declared dimensions.
    #[error("pattern is {found_height} rows of widths {found_widths:?}, expected {height} rows of width {width}")]
    ShapeMismatch {
        /// Declared number of rows.
        height: usize,
        /// Declared row width.
        width: usize,
        /// Number of rows found.
        found_height: usize,
        /// Width of every row found.
        found_widths: Vec<usize>,
    },
}

/// A rectangular grid of [`CellState`]s plus the tiling parity.
///
/// Row 0 is the top row of the visual layout, as in the pattern strings.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CellMatrix {
    pub(crate) cells: Array2<CellState>,
    pub(crate) top_left_downward: bool,
}

impl CellMatrix {
    /// An all-empty matrix with the specified dimensions, in `(width, height)` order.
    pub fn empty(dims: (Dimension, Dimension), top_left_downward: bool) -> Self {
        Self {
            cells: Array2::from_elem((dims.1.get(), dims.0.get()), CellState::Empty),
            top_left_downward,
        }
    }

    /// Parse pattern strings, first string being the top row.
    ///
    /// Fails on the first character outside the pattern alphabet, or on ragged or empty input.
    pub fn parse<S: AsRef<str>>(rows: &[S], top_left_downward: bool) -> Result<Self, PatternError> {
        let parsed: Vec<Vec<CellState>> = rows.iter()
            .enumerate()
            .map(|(i, row)| parse_row(i, row.as_ref()))
            .collect::<Result<_, _>>()?;

        let width = parsed.first().map_or(0, Vec::len);
        Self::from_parsed(parsed, width, rows.len(), top_left_downward)
    }

    /// Parse pattern strings which must match the declared dimensions exactly.
    pub fn parse_with_dims<S: AsRef<str>>(
        rows: &[S],
        width: usize,
        height: usize,
        top_left_downward: bool,
    ) -> Result<Self, PatternError> {
        let parsed: Vec<Vec<CellState>> = rows.iter()
            .enumerate()
            .map(|(i, row)| parse_row(i, row.as_ref()))
            .collect::<Result<_, _>>()?;

        Self::from_parsed(parsed, width, height, top_left_downward)
    }

    fn from_parsed(
        parsed: Vec<Vec<CellState>>,
        width: usize,
        height: usize,
        top_left_downward: bool,
    ) -> Result<Self, PatternError> {
        let shape_mismatch = || PatternError::ShapeMismatch {
            height,
            width,
            found_height: parsed.len(),
            found_widths: parsed.iter().map(Vec::len).collect(),
        };

        if width == 0 || height == 0 || parsed.len() != height || parsed.iter().any(|row| row.len() != width) {
            return Err(shape_mismatch());
        }

        let cells = Array2::from_shape_vec((height, width), parsed.concat())
            .map_err(|_| shape_mismatch())?;

        Ok(Self { cells, top_left_downward })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Whether the triangle at matrix position `(0, 0)` points down.
    pub fn top_left_downward(&self) -> bool {
        self.top_left_downward
    }

    /// The state at `location`, or [`None`] outside the matrix.
    pub fn get(&self, location: Location) -> Option<CellState> {
        self.cells.get(location.as_index()).copied()
    }

    /// The orientation of the triangle at `location`, whether or not a tile is there.
    pub fn orientation_at(&self, location: Location) -> Orientation {
        Orientation::at(location, self.top_left_downward)
    }

    /// Number of occupied cells, i.e. the size of the compiled board.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_occupied()).count()
    }

    /// Occupied cells in tile index order.
    ///
    /// The bottom row comes first, each row left to right. Board compilation and target
    /// derivation both enumerate through here, which keeps their bit orders aligned.
    pub fn occupied(&self) -> impl Iterator<Item = (Location, CellState)> + '_ {
        (0..self.height()).rev()
            .flat_map(move |y| (0..self.width()).map(move |x| Location(x, y)))
            .filter_map(|location| match self.get(location) {
                Some(cell) if cell.is_occupied() => Some((location, cell)),
                _ => None,
            })
    }

    /// The face bits of this matrix in tile index order; `true` is front.
    ///
    /// Comparing these against a [`Board`](crate::Board) is meaningful when the board was
    /// compiled from a matrix with the [same occupancy](Self::same_occupancy).
    pub fn bits(&self) -> Array1<bool> {
        self.occupied()
            .map(|(_, cell)| cell == CellState::Front)
            .collect()
    }

    /// Whether both matrices have the same shape and tiles in the same places.
    pub fn same_occupancy(&self, other: &CellMatrix) -> bool {
        self.cells.dim() == other.cells.dim()
            && self.cells.iter()
                .zip(other.cells.iter())
                .all(|(a, b)| a.is_occupied() == b.is_occupied())
    }

    /// Pattern strings for this matrix, top row first.
    pub fn to_rows(&self) -> Vec<String> {
        self.cells.rows()
            .into_iter()
            .map(|row| row.iter().map(CellState::as_char).collect())
            .collect()
    }
}

impl Display for CellMatrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.to_rows() {
            writeln!(f, "{}", row)?;
        }

        Ok(())
    }
}
