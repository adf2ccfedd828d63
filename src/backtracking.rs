#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Plain backtracking over grid cells.
//!
//! The simplest of the three solvers: scan for the first blank cell, try the
//! values 1 through 9 in order, keep any value that does not clash with its
//! row, column or box, and recurse. A dead end clears the cell and resumes
//! with the next value. No propagation, no heuristics.

use crate::grid::{BOX_SIZE, Grid, SIZE};
use crate::solver::{Solution, Solver};

/// The cell-by-cell backtracking solver.
#[derive(Debug, Clone)]
pub struct BacktrackingSolver {
    grid: Grid,
    guesses: usize,
    /// Set when the givens contradict each other.
    infeasible: bool,
}

impl Solver for BacktrackingSolver {
    fn new(puzzle: Grid) -> Self {
        let infeasible = !clues_consistent(puzzle);
        Self {
            grid: puzzle,
            guesses: 0,
            infeasible,
        }
    }

    fn solve_with(&mut self, cancel: &mut dyn FnMut() -> bool) -> Solution {
        if self.infeasible {
            return Solution::exhausted(0);
        }

        if self.backtrack(cancel) {
            Solution::found(self.guesses, self.grid)
        } else {
            Solution::exhausted(self.guesses)
        }
    }
}

impl BacktrackingSolver {
    fn backtrack(&mut self, cancel: &mut dyn FnMut() -> bool) -> bool {
        let Some((row, col)) = self.first_blank() else {
            return true;
        };

        for value in 1..=SIZE as u8 {
            if cancel() {
                return false;
            }
            if fits(&self.grid, row, col, value) {
                self.guesses += 1;
                self.grid.set(row, col, value);
                if self.backtrack(cancel) {
                    return true;
                }
                self.grid.set(row, col, 0);
            }
        }
        false
    }

    fn first_blank(&self) -> Option<(usize, usize)> {
        (0..SIZE)
            .flat_map(|row| (0..SIZE).map(move |col| (row, col)))
            .find(|&(row, col)| self.grid.get(row, col) == 0)
    }
}

/// Whether `value` clashes with nothing in the cell's row, column or box.
fn fits(grid: &Grid, row: usize, col: usize, value: u8) -> bool {
    for i in 0..SIZE {
        if grid.get(row, i) == value || grid.get(i, col) == value {
            return false;
        }
    }

    let top = row - row % BOX_SIZE;
    let left = col - col % BOX_SIZE;
    for r in top..top + BOX_SIZE {
        for c in left..left + BOX_SIZE {
            if grid.get(r, c) == value {
                return false;
            }
        }
    }
    true
}

/// Checks that every clue is legal with respect to the others: each filled
/// cell, taken out of the grid, must still fit where it stands.
fn clues_consistent(mut grid: Grid) -> bool {
    for row in 0..SIZE {
        for col in 0..SIZE {
            let value = grid.get(row, col);
            if value == 0 {
                continue;
            }
            grid.set(row, col, 0);
            let ok = fits(&grid, row, col, value);
            grid.set(row, col, value);
            if !ok {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::tests::EXAMPLE_SOLUTION;
    use crate::grid::EXAMPLE;

    #[test]
    fn solves_the_example() {
        let puzzle = Grid::new(EXAMPLE);
        let solution = BacktrackingSolver::new(puzzle).solve();
        assert!(solution.solved);
        assert_eq!(solution.grid, Grid::new(EXAMPLE_SOLUTION));
        assert!(solution.guesses > 0);
    }

    #[test]
    fn full_valid_grid_needs_no_guesses() {
        let puzzle = Grid::new(EXAMPLE_SOLUTION);
        let solution = BacktrackingSolver::new(puzzle).solve();
        assert!(solution.solved);
        assert_eq!(solution.guesses, 0);
        assert_eq!(solution.grid, puzzle);
    }

    #[test]
    fn duplicate_clue_in_row_is_unsolvable() {
        let mut puzzle = Grid::new(EXAMPLE);
        puzzle.set(0, 2, 5);
        let solution = BacktrackingSolver::new(puzzle).solve();
        assert!(!solution.solved);
        assert_eq!(solution.guesses, 0);
        assert_eq!(solution.grid, Grid::default());
    }

    #[test]
    fn cancel_abandons_the_search() {
        let puzzle = Grid::new(EXAMPLE);
        let solution = BacktrackingSolver::new(puzzle).solve_with(&mut || true);
        assert!(!solution.solved);
        assert_eq!(solution.grid, Grid::default());
    }

    #[test]
    fn matches_the_dlx_solver() {
        use crate::dlx::DlxSolver;
        let puzzle = Grid::new(EXAMPLE);
        let a = BacktrackingSolver::new(puzzle).solve();
        let b = DlxSolver::new(puzzle).solve();
        assert_eq!(a.grid, b.grid);
    }
}
