#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! The contract shared by every solver in this crate.

use crate::grid::Grid;

/// The outcome of a solve attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Solution {
    /// Whether a complete assignment was found.
    pub solved: bool,
    /// Number of candidate placements tried during the search, including
    /// abandoned branches. Zero when the puzzle was resolved without search.
    pub guesses: usize,
    /// The completed grid, or all zeroes when the puzzle is unsolvable.
    pub grid: Grid,
}

impl Solution {
    pub(crate) const fn found(guesses: usize, grid: Grid) -> Self {
        Self {
            solved: true,
            guesses,
            grid,
        }
    }

    pub(crate) const fn exhausted(guesses: usize) -> Self {
        Self {
            solved: false,
            guesses,
            grid: Grid::new([[0; 9]; 9]),
        }
    }
}

/// A Sudoku solver. Implementations own their working state; one instance
/// performs one solve.
///
/// Input grids are assumed syntactically valid (values in `0..=9`); Sudoku
/// legality of the clues is not a precondition, and contradictory clues
/// surface as an unsolved [`Solution`] rather than an error.
pub trait Solver {
    /// Creates a solver for the given puzzle.
    fn new(puzzle: Grid) -> Self
    where
        Self: Sized;

    /// Runs the search to completion.
    fn solve(&mut self) -> Solution {
        self.solve_with(&mut || false)
    }

    /// Runs the search, polling `cancel` before each candidate placement.
    /// When `cancel` returns `true` the search unwinds through its normal
    /// failure path and the puzzle is reported unsolved; the poll itself
    /// never alters the order in which candidates are tried.
    fn solve_with(&mut self, cancel: &mut dyn FnMut() -> bool) -> Solution;
}
