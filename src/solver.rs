//! Finding presses that bring a board to a target state.

use std::collections::BTreeSet;

use itertools::Itertools;
use log::debug;
use ndarray::ArrayView1;
use thiserror::Error;
use varisat::{CnfFormula, Lit, Solver, Var};

use crate::board::{Board, TileIndex};
use crate::logic::{at_most, xor_equals};

/// Reasons a [`PressSolver`] may fail.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum SolverFailure {
    /// The target does not have one bit per tile.
    #[error("target has {found} bits for a board of {expected} tiles")]
    LengthMismatch {
        /// Tile count of the board.
        expected: usize,
        /// Length of the target.
        found: usize,
    },
    /// No set of presses reaches the target.
    #[error("target is unreachable by presses")]
    Inconsistent,
    /// The SAT solver gave up without a verdict.
    /// This should probably never happen.
    #[error("SAT solver returned no model")]
    NoModel,
}

/// Finds the tiles to [`press`](Board::press) to bring a board to a target state.
///
/// # Logical setup
/// Let `p_i` be "tile `i` is pressed". Presses commute and pressing twice undoes itself, so only
/// the set of pressed tiles matters. Tile `t` ends up turned over iff an odd number of the
/// presses touching it, its own and its neighbors', were made. So for each tile:
///
/// `p_t ⊕ p_n1 ⊕ ... = state_t ⊕ target_t`
///
/// Each such XOR is expanded into CNF by forbidding every assignment of the wrong parity.
/// Minimization adds an at-most-`k` counter over all `p_i` and lowers `k` until unsatisfiable.
pub struct PressSolver<'a> {
    board: &'a Board,
}

impl<'a> From<&'a Board> for PressSolver<'a> {
    fn from(board: &'a Board) -> Self {
        Self { board }
    }
}

impl PressSolver<'_> {
    #[inline]
    fn press_var(&self, index: TileIndex) -> Var {
        Var::from_index(index)
    }

    fn press_clauses(&self, target: ArrayView1<bool>) -> Result<Vec<Vec<Lit>>, SolverFailure> {
        if target.len() != self.board.size() {
            return Err(SolverFailure::LengthMismatch { expected: self.board.size(), found: target.len() });
        }

        Ok(self.board.tiles()
            .iter()
            .flat_map(|tile| {
                let touching = std::iter::once(tile.index)
                    .chain(self.board.neighbors_of(tile.index))
                    .map(|index| self.press_var(index))
                    .collect_vec();
                xor_equals(&touching, self.board.state[tile.index] != target[tile.index])
            })
            .collect_vec())
    }

    fn run(&self, clauses: Vec<Vec<Lit>>) -> Result<Option<Vec<TileIndex>>, SolverFailure> {
        let mut solver = Solver::new();
        solver.add_formula(&CnfFormula::from(clauses));
        if !solver.solve().map_err(|_| SolverFailure::NoModel)? {
            return Ok(None);
        }

        let model = solver.model().ok_or(SolverFailure::NoModel)?;
        Ok(Some(model.into_iter()
            .filter(|lit| lit.is_positive())
            .map(|lit| lit.var().index())
            // counter registers live above the press variables
            .filter(|index| *index < self.board.size())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect_vec()))
    }

    /// Some set of presses reaching `target`, in ascending tile order.
    pub fn solve(&self, target: ArrayView1<bool>) -> Result<Vec<TileIndex>, SolverFailure> {
        let clauses = self.press_clauses(target)?;
        self.run(clauses)?.ok_or(SolverFailure::Inconsistent)
    }

    /// A smallest set of presses reaching `target`, in ascending tile order.
    pub fn solve_minimal(&self, target: ArrayView1<bool>) -> Result<Vec<TileIndex>, SolverFailure> {
        let clauses = self.press_clauses(target)?;
        let mut best = self.run(clauses.clone())?.ok_or(SolverFailure::Inconsistent)?;
        let press_vars = (0..self.board.size()).map(|index| self.press_var(index)).collect_vec();

        while !best.is_empty() {
            let mut bounded = clauses.clone();
            bounded.extend(at_most(&press_vars, best.len() - 1, self.board.size()));

            match self.run(bounded)? {
                Some(fewer) => best = fewer,
                None => break,
            }
        }

        debug!("minimal solution presses {} of {} tiles", best.len(), self.board.size());
        Ok(best)
    }
}

impl Board {
    /// A smallest set of presses bringing this board to `target`; see [`PressSolver::solve_minimal`].
    pub fn presses_to(&self, target: ArrayView1<bool>) -> Result<Vec<TileIndex>, SolverFailure> {
        PressSolver::from(self).solve_minimal(target)
    }

    /// Whether some sequence of presses brings this board to `target`.
    pub fn can_reach(&self, target: ArrayView1<bool>) -> bool {
        PressSolver::from(self).solve(target).is_ok()
    }
}
