use std::num::NonZero;

/// One axis of a [`Location`].
pub type Coord = usize;
/// A matrix extent; boards are never zero-sized.
pub type Dimension = NonZero<Coord>;

/// A cell position in a [`CellMatrix`](crate::CellMatrix): column, then matrix row.
///
/// Row 0 is the top row of the visual layout.
#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
// x, y
pub struct Location(pub Coord, pub Coord);

impl Location {
    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.1, self.0)
    }

    /// Offset this location by `(dx, dy)`, wrapping on underflow.
    ///
    /// A wrapped location is far out of bounds for any real matrix, so lookups through it miss.
    pub fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }
}
