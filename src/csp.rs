#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Constraint-propagation backtracking (AC-3 / MAC).
//!
//! Every cell is a decision variable with a domain of feasible values and 20
//! neighbours (the cells sharing its row, column or box). Construction runs
//! the AC-3 arc-consistency algorithm over all arcs; during search, assigning
//! a variable re-establishes arc consistency among its neighbours (MAC) and
//! every pruning is recorded so a failed branch can put the values back.
//!
//! The next variable to guess is chosen by the minimum-remaining-values
//! heuristic, with ties broken by the degree heuristic (most unassigned
//! neighbours). Both are expressed as one ordering key, not dispatch.
//!
//! See Russell & Norvig, *Artificial Intelligence: A Modern Approach*,
//! 3rd ed., chapter 6.

use crate::grid::{BOX_SIZE, Grid, SIZE};
use crate::solver::{Solution, Solver};
use rustc_hash::FxHashSet;
use std::cmp::Reverse;
use std::collections::VecDeque;

/// A pruned value: `(variable, value removed from its domain)`. Undoing an
/// inference re-inserts the value.
type Inference = (usize, u8);

/// One decision variable per grid cell.
#[derive(Debug, Clone)]
struct CellVar {
    row: usize,
    col: usize,
    /// Values still feasible for this cell. `FxHashSet` iterates in a
    /// deterministic order, so guess counts are reproducible across runs.
    domain: FxHashSet<u8>,
    /// Indices of the cells sharing a row, column or box with this one.
    neighbors: FxHashSet<usize>,
}

/// The constraint-satisfaction solver.
#[derive(Debug, Clone)]
pub struct CspSolver {
    cells: Vec<CellVar>,
    /// Blank-cell indices, kept sorted ascending by guessing priority so the
    /// best candidate is popped off the back.
    unassigned: Vec<usize>,
    guesses: usize,
    /// Set when the construction-time AC-3 pass finds an inconsistency.
    infeasible: bool,
}

impl Solver for CspSolver {
    fn new(puzzle: Grid) -> Self {
        let mut cells = Vec::with_capacity(SIZE * SIZE);
        let mut unassigned = Vec::new();
        for row in 0..SIZE {
            for col in 0..SIZE {
                let clue = puzzle.get(row, col);
                let domain: FxHashSet<u8> = if clue == 0 {
                    unassigned.push(row * SIZE + col);
                    (1..=SIZE as u8).collect()
                } else {
                    std::iter::once(clue).collect()
                };
                cells.push(CellVar {
                    row,
                    col,
                    domain,
                    neighbors: neighbors_of(row, col),
                });
            }
        }

        let mut solver = Self {
            cells,
            unassigned,
            guesses: 0,
            infeasible: false,
        };

        // Propagate the clues: one AC-3 pass over every arc.
        let queue: VecDeque<(usize, usize)> = (0..solver.cells.len())
            .flat_map(|cell| {
                solver.cells[cell]
                    .neighbors
                    .iter()
                    .map(move |&neighbor| (cell, neighbor))
                    .collect::<Vec<_>>()
            })
            .collect();
        if solver.ac3(queue).is_none() {
            solver.infeasible = true;
        }
        solver
    }

    fn solve_with(&mut self, cancel: &mut dyn FnMut() -> bool) -> Solution {
        if self.infeasible {
            return Solution::exhausted(0);
        }

        if self.backtrack(cancel) {
            Solution::found(self.guesses, self.decode())
        } else {
            Solution::exhausted(self.guesses)
        }
    }
}

impl CspSolver {
    /// Backtracking with maintained arc consistency. Pops the
    /// highest-priority unassigned variable, tries each value of its domain,
    /// and undoes the MAC inferences of every failed branch.
    fn backtrack(&mut self, cancel: &mut dyn FnMut() -> bool) -> bool {
        let Some(var) = self.unassigned.pop() else {
            return true;
        };
        let old_domain = self.cells[var].domain.clone();

        for &value in &old_domain {
            if cancel() {
                break;
            }
            self.guesses += 1;

            self.cells[var].domain = std::iter::once(value).collect();

            if let Some(inferences) = self.mac(var) {
                if self.backtrack(cancel) {
                    return true;
                }
                self.undo(inferences);
            }
        }

        self.cells[var].domain = old_domain;
        self.unassigned.push(var);
        false
    }

    /// Maintaining arc consistency: after `var` is assigned, revise its
    /// still-unassigned neighbours against it.
    fn mac(&mut self, var: usize) -> Option<Vec<Inference>> {
        let queue: VecDeque<(usize, usize)> = self.cells[var]
            .neighbors
            .iter()
            .filter(|&&neighbor| self.cells[neighbor].domain.len() > 1)
            .map(|&neighbor| (neighbor, var))
            .collect();
        self.ac3(queue)
    }

    /// AC-3. For each arc `(xi, xj)` with `xj` assigned, removes `xj`'s value
    /// from `xi`'s domain and requeues `xi`'s other neighbours. Returns the
    /// inferences made, or `None` (with all of them already undone) if some
    /// domain was emptied.
    fn ac3(&mut self, mut queue: VecDeque<(usize, usize)>) -> Option<Vec<Inference>> {
        let mut inferences = Vec::new();

        while let Some((xi, xj)) = queue.pop_front() {
            if self.cells[xj].domain.len() != 1 {
                continue;
            }
            let Some(&value) = self.cells[xj].domain.iter().next() else {
                continue;
            };
            if !self.cells[xi].domain.remove(&value) {
                continue;
            }
            inferences.push((xi, value));

            if self.cells[xi].domain.is_empty() {
                self.undo(inferences);
                return None;
            }

            for &xk in &self.cells[xi].neighbors {
                if xk != xj {
                    queue.push_back((xk, xi));
                }
            }
        }

        self.sort_unassigned();
        Some(inferences)
    }

    fn undo(&mut self, inferences: Vec<Inference>) {
        for (cell, value) in inferences {
            self.cells[cell].domain.insert(value);
        }
    }

    /// Re-sorts the unassigned variables so that the back of the vector holds
    /// the variable with the smallest domain, ties broken by the most
    /// unassigned neighbours.
    fn sort_unassigned(&mut self) {
        let mut order = std::mem::take(&mut self.unassigned);
        order.sort_by(|&a, &b| self.guess_priority(b).cmp(&self.guess_priority(a)));
        self.unassigned = order;
    }

    /// MRV + degree ordering key; smaller means guessed sooner.
    fn guess_priority(&self, var: usize) -> (usize, Reverse<usize>) {
        let degree = self.cells[var]
            .neighbors
            .iter()
            .filter(|&&neighbor| self.cells[neighbor].domain.len() > 1)
            .count();
        (self.cells[var].domain.len(), Reverse(degree))
    }

    /// Projects the (now singleton) domains into an output grid.
    fn decode(&self) -> Grid {
        let mut grid = Grid::default();
        for cell in &self.cells {
            debug_assert_eq!(cell.domain.len(), 1, "unresolved domain after solve");
            let value = cell.domain.iter().next().copied().unwrap_or(0);
            grid.set(cell.row, cell.col, value);
        }
        grid
    }
}

/// The 20 cells constraining `(row, col)`: same row, same column, same box.
fn neighbors_of(row: usize, col: usize) -> FxHashSet<usize> {
    let mut neighbors = FxHashSet::default();
    for i in 0..SIZE {
        if i != col {
            neighbors.insert(row * SIZE + i);
        }
        if i != row {
            neighbors.insert(i * SIZE + col);
        }
    }
    let top = row - row % BOX_SIZE;
    let left = col - col % BOX_SIZE;
    for r in top..top + BOX_SIZE {
        for c in left..left + BOX_SIZE {
            if r != row || c != col {
                neighbors.insert(r * SIZE + c);
            }
        }
    }
    neighbors
}
