#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Exact-cover Sudoku solving with Algorithm X and dancing links.
//!
//! The puzzle is modelled as an exact cover problem: choose 81 candidate rows
//! (one `(row, col, value)` triple per cell) such that each of the 324
//! constraint columns is covered exactly once. The solver builds the sparse
//! constraint network up front, immediately covers the rows of all prefilled
//! cells, and then runs a recursive depth-first search that always branches on
//! the constraint with the fewest remaining candidates.
//!
//! See Knuth, *Dancing Links*, <https://arxiv.org/abs/cs/0011047>.

mod network;

use crate::grid::{CELLS, Grid};
use crate::solver::{Solution, Solver};
use network::Network;

/// The dancing-links solver.
///
/// The network is built once per instance and mutated in place during the
/// search; covers are undone in LIFO order on backtracking, so a failed branch
/// always restores the exact prior state. On success the covered state is left
/// as is and the chosen entries are projected back into a grid.
#[derive(Debug, Clone)]
pub struct DlxSolver {
    network: Network,
    /// One chosen entry per cell: givens first, then search choices.
    chosen: [usize; CELLS],
    /// Number of slots filled by givens.
    filled: usize,
    guesses: usize,
    /// Set when the givens contradict each other.
    infeasible: bool,
}

impl Solver for DlxSolver {
    /// Builds the network and applies the givens. A given whose candidate row
    /// was already eliminated by an earlier given marks the puzzle infeasible
    /// on the spot; search is then skipped entirely.
    fn new(puzzle: Grid) -> Self {
        let (network, givens) = Network::build(&puzzle);
        let mut solver = Self {
            network,
            chosen: [0; CELLS],
            filled: 0,
            guesses: 0,
            infeasible: false,
        };

        for entry in givens {
            if !solver.network.row_is_live(entry) {
                solver.infeasible = true;
                break;
            }
            solver.chosen[solver.filled] = entry;
            solver.filled += 1;
            solver.network.cover_row(entry);
        }
        solver
    }

    fn solve_with(&mut self, cancel: &mut dyn FnMut() -> bool) -> Solution {
        if self.infeasible {
            return Solution::exhausted(0);
        }

        if self.search(self.filled, cancel) {
            Solution::found(self.guesses, self.project())
        } else {
            Solution::exhausted(self.guesses)
        }
    }
}

impl DlxSolver {
    /// Algorithm X. `depth` is the next free slot of the solution sequence;
    /// every recursive call shrinks the active header ring, so the search
    /// always terminates.
    fn search(&mut self, depth: usize, cancel: &mut dyn FnMut() -> bool) -> bool {
        let Some(header) = self.network.select_column() else {
            // Only the root remains: every constraint is satisfied.
            return true;
        };

        self.network.cover(header);

        let mut entry = self.network.down(header);
        while entry != header {
            if cancel() {
                break;
            }

            self.chosen[depth] = entry;
            self.guesses += 1;

            self.network.cover_siblings(entry);
            if self.search(depth + 1, cancel) {
                // Success propagates without undoing: the network stays in
                // the covered state matching the accepted solution.
                return true;
            }
            self.network.uncover_siblings(entry);

            entry = self.network.down(entry);
        }

        self.network.uncover(header);
        false
    }

    /// Projects the 81 chosen candidates into an output grid.
    fn project(&self) -> Grid {
        debug_assert_eq!(self.chosen.len(), CELLS);
        let mut grid = Grid::default();
        for &entry in &self.chosen {
            let candidate = self.network.candidate(entry);
            grid.set(candidate.row, candidate.col, candidate.value);
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::tests::{EXAMPLE_SOLUTION, HARD_SEVENTEEN_SOLUTION};
    use crate::grid::{EXAMPLE, HARD_SEVENTEEN};

    #[test]
    fn solves_the_example() {
        let puzzle = Grid::new(EXAMPLE);
        let solution = DlxSolver::new(puzzle).solve();
        assert!(solution.solved);
        assert_eq!(solution.grid, Grid::new(EXAMPLE_SOLUTION));
        assert!(solution.grid.solves(&puzzle));
    }

    #[test]
    fn solves_the_seventeen_clue_benchmark() {
        let puzzle = Grid::new(HARD_SEVENTEEN);
        let solution = DlxSolver::new(puzzle).solve();
        assert!(solution.solved);
        assert_eq!(solution.grid, Grid::new(HARD_SEVENTEEN_SOLUTION));
        assert!(solution.grid.solves(&puzzle));
    }

    #[test]
    fn full_valid_grid_needs_no_guesses() {
        let puzzle = Grid::new(EXAMPLE_SOLUTION);
        let solution = DlxSolver::new(puzzle).solve();
        assert!(solution.solved);
        assert_eq!(solution.guesses, 0);
        assert_eq!(solution.grid, puzzle);
    }

    #[test]
    fn duplicate_clue_in_row_is_unsolvable() {
        let mut puzzle = Grid::new(EXAMPLE);
        // (0, 0) already holds 5; plant another 5 in the same row.
        puzzle.set(0, 2, 5);
        let solution = DlxSolver::new(puzzle).solve();
        assert!(!solution.solved);
        assert_eq!(solution.grid, Grid::default());
    }

    #[test]
    fn duplicate_clue_in_box_is_unsolvable() {
        let mut puzzle = Grid::new(EXAMPLE);
        puzzle.set(1, 1, 3);
        let solution = DlxSolver::new(puzzle).solve();
        assert!(!solution.solved);
        assert_eq!(solution.grid, Grid::default());
    }

    #[test]
    fn search_detects_deeper_contradictions() {
        // Pairwise-consistent clues that still admit no completion: box 0
        // forces (2, 2) to be 9, but the 9 at (2, 5) already owns row 2.
        let puzzle: Grid = "123|...|...\n\
                            456|...|...\n\
                            78.|..9|...\n\
                            ---+---+---\n\
                            ...|...|...\n\
                            ...|...|...\n\
                            ...|...|...\n\
                            ---+---+---\n\
                            ...|...|...\n\
                            ...|...|...\n\
                            ...|...|...\n"
            .parse()
            .unwrap();
        let solution = DlxSolver::new(puzzle).solve();
        assert!(!solution.solved);
        assert_eq!(solution.grid, Grid::default());
    }

    #[test]
    fn repeated_solves_are_deterministic() {
        let puzzle = Grid::new(HARD_SEVENTEEN);
        let first = DlxSolver::new(puzzle).solve();
        let second = DlxSolver::new(puzzle).solve();
        assert_eq!(first.guesses, second.guesses);
        assert_eq!(first.grid, second.grid);
    }

    #[test]
    fn cancel_abandons_the_search() {
        let puzzle = Grid::new(EXAMPLE);
        let solution = DlxSolver::new(puzzle).solve_with(&mut || true);
        assert!(!solution.solved);
        assert_eq!(solution.guesses, 0);
        assert_eq!(solution.grid, Grid::default());
    }

    #[test]
    fn cancel_does_not_disturb_prefilled_resolution() {
        // A fully prefilled grid is resolved during construction; even an
        // always-true cancel hook sees no candidate trials to veto.
        let puzzle = Grid::new(EXAMPLE_SOLUTION);
        let solution = DlxSolver::new(puzzle).solve_with(&mut || true);
        assert!(solution.solved);
        assert_eq!(solution.guesses, 0);
        assert_eq!(solution.grid, puzzle);
    }
}
