use std::fmt::{Display, Formatter};

use log::{debug, trace};
use ndarray::{Array1, Array2, ArrayView1};
use petgraph::graphmap::UnGraphMap;
use strum::VariantArray;
use thiserror::Error;
use unordered_pair::UnorderedPair;

use crate::cell::CellState;
use crate::location::Location;
use crate::pattern::CellMatrix;
use crate::shape::{Orientation, Side, TriangleStep};

/// Dense tile index, `0..size`.
pub type TileIndex = usize;

/// Reasons a [`Board`] operation may be refused. The board is left untouched in every case.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum BoardError {
    /// The tile index is not below the board size.
    #[error("tile {index} is out of range for a board of {size} tiles")]
    IndexOutOfRange {
        /// Requested index.
        index: TileIndex,
        /// Tile count of the board.
        size: usize,
    },
    /// A bit vector does not have one bit per tile.
    #[error("expected {expected} bits, got {found}")]
    LengthMismatch {
        /// Tile count of the board.
        expected: usize,
        /// Length of the given bit vector.
        found: usize,
    },
}

/// One occupied triangle of a [`Board`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Tile {
    /// Dense index of this tile; also its bit in [`Board::state`].
    pub index: TileIndex,
    /// Position in the matrix the board was compiled from.
    pub location: Location,
    /// Which way the triangle points.
    pub orientation: Orientation,
    /// The face shown when the board was compiled.
    ///
    /// Flips do not update this; [`Board::state`] holds the live faces.
    pub initially_front: bool,
    /// Neighbor tiles, indexed by [`Side::slot`]: right, left, then across the horizontal edge.
    pub neighbors: [Option<TileIndex>; 3],
}

impl Tile {
    /// Whether the triangle points up.
    pub fn is_upward(&self) -> bool {
        self.orientation.is_upward()
    }

    /// The neighbor across `side`, if a tile is there.
    pub fn neighbor(&self, side: Side) -> Option<TileIndex> {
        self.neighbors[side.slot()]
    }
}

/// A compiled board: indexed tiles, their adjacency and the live face of every tile.
///
/// Boards are compiled from a [`CellMatrix`] with [`From`], or through a
/// [`BoardBuilder`](crate::builder::BoardBuilder).
#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) tiles: Vec<Tile>,
    pub(crate) state: Array1<bool>,
    // edge weights are the step from the lower indexed tile
    pub(crate) graph: UnGraphMap<TileIndex, TriangleStep>,
    // width, height
    pub(crate) dims: (usize, usize),
}

impl From<&CellMatrix> for Board {
    fn from(matrix: &CellMatrix) -> Self {
        let size = matrix.occupied_count();
        let mut indices: Array2<Option<TileIndex>> = Array2::from_elem(matrix.cells.raw_dim(), None);
        let mut tiles = Vec::with_capacity(size);

        for (index, (location, cell)) in matrix.occupied().enumerate() {
            indices[location.as_index()] = Some(index);
            tiles.push(Tile {
                index,
                location,
                orientation: matrix.orientation_at(location),
                initially_front: cell == CellState::Front,
                neighbors: [None; 3],
            });
        }

        // every triangle has at most three neighbors, each edge shared by two
        let mut graph = UnGraphMap::with_capacity(size, size * 3 / 2);
        for tile in &tiles {
            graph.add_node(tile.index);
        }

        for tile in tiles.iter_mut() {
            for side in Side::VARIANTS {
                let step = side.step(tile.orientation);
                let neighbor = indices.get(step.attempt_from(tile.location).as_index())
                    .copied()
                    .flatten();

                tile.neighbors[side.slot()] = neighbor;
                if let Some(other) = neighbor {
                    graph.add_edge(tile.index, other, step.ensure_forward());
                }
            }
        }

        let state: Array1<bool> = tiles.iter().map(|tile| tile.initially_front).collect();
        debug!("compiled {}x{} matrix into {} tiles with {} edges", matrix.width(), matrix.height(), size, graph.edge_count());

        Self {
            tiles,
            state,
            graph,
            dims: (matrix.width(), matrix.height()),
        }
    }
}

impl Board {
    /// Number of tiles.
    pub fn size(&self) -> usize {
        self.tiles.len()
    }

    /// All tiles, in index order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// The tile at `index`, if any.
    pub fn tile(&self, index: TileIndex) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// The tile compiled from the matrix cell at `location`, if any.
    pub fn tile_at(&self, location: Location) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.location == location)
    }

    /// The live face of every tile, in index order; `true` is front.
    pub fn state(&self) -> ArrayView1<'_, bool> {
        self.state.view()
    }

    /// The live face of one tile.
    pub fn is_front(&self, index: TileIndex) -> Option<bool> {
        self.state.get(index).copied()
    }

    /// Matrix dimensions this board was compiled from, in `(width, height)` order.
    pub fn dims(&self) -> (usize, usize) {
        self.dims
    }

    /// The undirected adjacency graph over tile indices.
    ///
    /// Edge weights are the step leading from the lower indexed endpoint to the higher one.
    pub fn graph(&self) -> &UnGraphMap<TileIndex, TriangleStep> {
        &self.graph
    }

    /// Every pair of edge-sharing tiles, once.
    pub fn edges(&self) -> impl Iterator<Item = UnorderedPair<TileIndex>> + '_ {
        self.graph.all_edges().map(|(a, b, _)| UnorderedPair(a, b))
    }

    /// Neighbors of a tile in slot order. Empty for an out-of-range index.
    pub fn neighbors_of(&self, index: TileIndex) -> impl Iterator<Item = TileIndex> + '_ {
        self.tiles.get(index)
            .into_iter()
            .flat_map(|tile| tile.neighbors.iter().flatten().copied())
    }

    #[inline]
    fn check_index(&self, index: TileIndex) -> Result<(), BoardError> {
        if index < self.size() {
            Ok(())
        } else {
            Err(BoardError::IndexOutOfRange { index, size: self.size() })
        }
    }

    /// Turn one tile over.
    pub fn flip_tile(&mut self, index: TileIndex) -> Result<(), BoardError> {
        self.check_index(index)?;
        self.state[index] = !self.state[index];
        Ok(())
    }

    /// Set the face of one tile.
    pub fn set_tile_state(&mut self, index: TileIndex, front: bool) -> Result<(), BoardError> {
        self.check_index(index)?;
        self.state[index] = front;
        Ok(())
    }

    /// Turn over a tile together with every neighbor it has.
    ///
    /// Presses commute, and pressing the same tile twice restores the board.
    pub fn press(&mut self, index: TileIndex) -> Result<(), BoardError> {
        self.check_index(index)?;
        self.state[index] = !self.state[index];
        for neighbor in self.tiles[index].neighbors.into_iter().flatten() {
            self.state[neighbor] = !self.state[neighbor];
        }

        trace!("pressed tile {}: {}", index, self.state_string());
        Ok(())
    }

    /// Whether the live faces equal `target` bit for bit.
    ///
    /// A target of the wrong length never matches.
    pub fn matches_pattern(&self, target: ArrayView1<bool>) -> bool {
        target.len() == self.size() && self.state.iter().zip(target.iter()).all(|(a, b)| a == b)
    }

    /// Replace every face at once.
    pub fn reset_to(&mut self, bits: ArrayView1<bool>) -> Result<(), BoardError> {
        if bits.len() != self.size() {
            return Err(BoardError::LengthMismatch { expected: self.size(), found: bits.len() });
        }

        self.state.assign(&bits);
        Ok(())
    }

    /// Restore the faces the board was compiled with.
    pub fn reset(&mut self) {
        for tile in &self.tiles {
            self.state[tile.index] = tile.initially_front;
        }
    }

    /// The live faces as `0`/`1` characters, tile 0 first.
    pub fn state_string(&self) -> String {
        self.state.iter().map(|front| if *front { '1' } else { '0' }).collect()
    }

    /// The live board as pattern strings, top row first.
    pub fn to_rows(&self) -> Vec<String> {
        let (width, height) = self.dims;
        let mut cells = Array2::from_elem((height, width), CellState::Empty);
        for tile in &self.tiles {
            cells[tile.location.as_index()] = CellState::from_face(self.state[tile.index]);
        }

        cells.rows()
            .into_iter()
            .map(|row| row.iter().map(CellState::as_char).collect())
            .collect()
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.to_rows() {
            writeln!(f, "{}", row)?;
        }

        Ok(())
    }
}
