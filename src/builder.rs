//! Building boards cell by cell.

use std::num::NonZero;

use ndarray::AssignElem;
use thiserror::Error;

use crate::board::Board;
use crate::cell::CellState;
use crate::location::{Dimension, Location};
use crate::pattern::{CellMatrix, PatternError};

/// Reasons a builder may become invalid while building.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum BuilderInvalidReason {
    /// An edit addressed a location outside the dimensions of the builder.
    #[error("edit outside the bounds of the matrix")]
    FeatureOutOfBounds,
    /// The pattern the builder was started from did not parse.
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

/// A builder for [`Board`]s, editing a [`CellMatrix`] cell by cell before compiling it.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
/// Once invalid, every further edit does nothing and [`build`](Self::build) reports why.
#[derive(Clone, Debug)]
pub struct BoardBuilder {
    matrix: CellMatrix,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::with_dims((NonZero::new(7).unwrap(), NonZero::new(4).unwrap()))
    }
}

impl BoardBuilder {
    /// Construct an empty builder with the specified dimensions, specified in `(width, height)` order.
    ///
    /// The top left triangle points down until [`top_left_downward`](Self::top_left_downward) says otherwise.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            matrix: CellMatrix::empty(dims, true),
            invalid_reasons: Default::default(),
        }
    }

    /// Start from pattern strings, top row first.
    ///
    /// A pattern which does not parse leaves the builder invalid.
    pub fn from_rows<S: AsRef<str>>(rows: &[S], top_left_downward: bool) -> Self {
        match CellMatrix::parse(rows, top_left_downward) {
            Ok(matrix) => Self { matrix, invalid_reasons: Default::default() },
            Err(err) => {
                let mut builder = Self::with_dims((NonZero::<usize>::MIN, NonZero::<usize>::MIN));
                builder.invalid_reasons.push(err.into());
                builder
            }
        }
    }

    /// Start from an existing matrix.
    pub fn from_matrix(matrix: CellMatrix) -> Self {
        Self { matrix, invalid_reasons: Default::default() }
    }

    /// Set the tiling parity.
    pub fn top_left_downward(&mut self, top_left_downward: bool) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        self.matrix.top_left_downward = top_left_downward;
        self
    }

    #[inline]
    fn in_bounds(&self, location: Location) -> bool {
        location.0 < self.matrix.width() && location.1 < self.matrix.height()
    }

    fn edit(&mut self, location: Location, edit: impl FnOnce(CellState) -> CellState) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if !self.in_bounds(location) {
            self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds);
            return self;
        }

        let cell = &mut self.matrix.cells[location.as_index()];
        let edited = edit(*cell);
        cell.assign_elem(edited);
        self
    }

    /// Place a tile, or clear the cell with [`CellState::Empty`].
    ///
    /// May cause the builder to enter a [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds) invalid state if `location` is out of bounds.
    pub fn set_cell(&mut self, location: Location, state: CellState) -> &mut Self {
        self.edit(location, |_| state)
    }

    /// Turn the tile at `location` over. An empty cell stays empty.
    ///
    /// May cause the builder to enter a [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds) invalid state if `location` is out of bounds.
    pub fn invert_cell(&mut self, location: Location) -> &mut Self {
        self.edit(location, |cell| cell.inverted())
    }

    /// Drop a location from the board, regardless of what was placed there.
    ///
    /// May cause the builder to enter a [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds) invalid state if `location` is out of bounds.
    pub fn drop_location(&mut self, location: Location) -> &mut Self {
        self.edit(location, |_| CellState::Empty)
    }

    /// Check the validity of this builder.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// The matrix built so far.
    pub fn matrix(&self) -> Result<&CellMatrix, &Vec<BuilderInvalidReason>> {
        match self.is_valid() {
            None => Ok(&self.matrix),
            Some(reasons) => Err(reasons),
        }
    }

    /// Compile the matrix built so far into a [`Board`].
    /// If the builder is invalid for any reason, a reference to a [`Vec`] of [`BuilderInvalidReason`] will indicate why.
    pub fn build(&self) -> Result<Board, &Vec<BuilderInvalidReason>> {
        self.matrix().map(Board::from)
    }
}
