#![warn(missing_docs)]

//! # `triflip`
//!
//! The board model of a tile-flipping puzzle played on a triangular grid.
//!
//! A stage is written as rows of `0` (no tile), `1` (tile showing its front) and `2` (tile showing
//! its back) plus a flag saying whether the top left triangle points down. Parse the rows into a
//! [`CellMatrix`], or assemble one with a [`BoardBuilder`](builder::BoardBuilder), and compile it
//! into a [`Board`]: dense tile indices, each tile's orientation and three neighbor slots, and the
//! live face of every tile as a bit vector. Play happens through [`Board::press`], which turns a
//! tile and its neighbors over, and completion is a bit-for-bit [`Board::matches_pattern`]
//! against [`CellMatrix::bits`] of the target pattern.
//!
//! Around that core:
//! - [`grid`] converts between cartesian and oblique lattice coordinates and snaps points to
//!   triangle centroids and vertices.
//! - [`layout`] fits a board into a rectangle and positions every tile.
//! - [`stage`] holds stage definitions, their validation and the play session.
//! - [`generator`] builds random stages that are solvable by construction, and [`challenge`]
//!   strings them into a scored run.
//! - [`PressSolver`](solver::PressSolver) finds (minimal) press sets with a SAT solver.
//!
//! # Internals
//! Tiles are indexed bottom row first, each row left to right. Compilation and target derivation
//! both enumerate through [`CellMatrix::occupied`], so a target's bits line up with the tiles of a
//! board compiled from any pattern with the same occupancy.
//!
//! Orientation alternates between neighboring cells. A downward triangle shares its horizontal
//! edge with the cell above it and an upward one with the cell below, so adjacency is symmetric
//! by construction and is also kept as an undirected [`petgraph`] graph on the board.

pub use board::{Board, BoardError, Tile, TileIndex};
pub use builder::BoardBuilder;
pub use cell::CellState;
pub use location::Location;
pub use pattern::{CellMatrix, PatternError};
pub use shape::{Orientation, Side};

pub(crate) mod board;
mod tests;
pub(crate) mod location;
pub(crate) mod logic;
pub mod shape;
pub(crate) mod cell;
pub(crate) mod pattern;
pub mod builder;
pub mod grid;
pub mod layout;
pub mod solver;
pub mod stage;
pub mod generator;
pub mod challenge;
#[cfg(feature = "wasm")]
pub mod wasm;
