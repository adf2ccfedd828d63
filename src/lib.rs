#![deny(missing_docs)]
//! This crate provides solvers for 9x9 Sudoku puzzles, each modelling the puzzle
//! differently: exact cover via dancing links, plain backtracking, and constraint
//! propagation backed by arc consistency. All solvers share one contract so they
//! can be swapped and compared as black boxes.


/// The `backtracking` module implements the plain depth-first solver, which fills blank
/// cells one at a time and undoes placements that lead to dead ends.
pub mod backtracking;

/// The `csp` module implements the constraint-propagation solver, which maintains arc
/// consistency (AC-3) while backtracking over per-cell value domains.
pub mod csp;

/// The `dlx` module implements the exact-cover solver, which runs Knuth's Algorithm X
/// over a dancing-links constraint network.
pub mod dlx;

/// The `grid` module provides the 9x9 grid representation, parsing and validation.
pub mod grid;

/// The `solver` module defines the contract shared by every solver: one puzzle in,
/// one `Solution` record out.
pub mod solver;
