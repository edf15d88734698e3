use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use strum::VariantArray;

use crate::pattern::PatternError;

/// The state of one position in a [`CellMatrix`](crate::CellMatrix).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, VariantArray, Serialize, Deserialize)]
pub enum CellState {
    /// No tile here.
    #[default]
    Empty,
    /// A tile showing its front face.
    Front,
    /// A tile showing its back face.
    Back,
}

impl CellState {
    /// The character used for this state in stage patterns.
    pub fn as_char(&self) -> char {
        match self {
            CellState::Empty => '0',
            CellState::Front => '1',
            CellState::Back => '2',
        }
    }

    /// The state of an occupied cell showing `front`.
    pub fn from_face(front: bool) -> Self {
        if front { CellState::Front } else { CellState::Back }
    }

    /// Whether a tile exists here.
    pub fn is_occupied(&self) -> bool {
        *self != CellState::Empty
    }

    /// Turn the tile over. Empty cells stay empty.
    pub fn inverted(&self) -> Self {
        match self {
            CellState::Empty => CellState::Empty,
            CellState::Front => CellState::Back,
            CellState::Back => CellState::Front,
        }
    }
}

impl TryFrom<char> for CellState {
    type Error = char;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        CellState::VARIANTS.iter()
            .find(|state| state.as_char() == value)
            .copied()
            .ok_or(value)
    }
}

impl Display for CellState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Parse one pattern row, reporting the first character outside the `0`/`1`/`2` alphabet.
pub(crate) fn parse_row(row_index: usize, row: &str) -> Result<Vec<CellState>, PatternError> {
    row.chars()
        .enumerate()
        .map(|(column, c)| CellState::try_from(c).map_err(|found| PatternError::InvalidCharacter {
            row: row_index,
            column,
            found,
        }))
        .collect()
}
