//! # Sudoku Solver
//!
//! A command-line Sudoku solver with three interchangeable algorithms:
//!
//! 1.  **DLX**: Knuth's Algorithm X over a dancing-links network. The puzzle
//!     is modelled as an exact cover problem over 324 constraint columns.
//! 2.  **Backtracking**: plain cell-by-cell depth-first search.
//! 3.  **CSP**: backtracking with AC-3 constraint propagation and
//!     minimum-remaining-values variable ordering.
//!
//! All three report the same outcome shape: whether the puzzle was solved,
//! how many candidate guesses the search tried, and the completed grid.
//!
//! ## Usage
//!
//! ```sh
//! sudoku_solver [GLOBAL_OPTIONS] [SUBCOMMAND]
//! ```
//!
//! ### Global Argument
//!
//! -   `path`: If provided without a subcommand, it's treated as a path to a
//!     puzzle file to be solved.
//!
//!     ```sh
//!     sudoku_solver <path_to_puzzle_file>
//!     ```
//!
//! ### Subcommands
//!
//! 1.  **`file`**: Solve a single puzzle file.
//!     ```sh
//!     sudoku_solver file --path <path_to_puzzle_file> [OPTIONS]
//!     ```
//!
//! 2.  **`text`**: Solve a puzzle provided as plain text.
//!     ```sh
//!     sudoku_solver text --input "<81 cells>" [OPTIONS]
//!     ```
//!
//! 3.  **`dir`**: Solve every `.sudoku` file under a directory.
//!     ```sh
//!     sudoku_solver dir --path <path_to_directory> [OPTIONS]
//!     ```
//!
//! 4.  **`compare`**: Run all three solvers on one puzzle.
//!     ```sh
//!     sudoku_solver compare --path <path_to_puzzle_file> [OPTIONS]
//!     ```
//!
//! 5.  **`completions`**: Generate shell completion scripts.
//!
//! ### Common Options
//!
//! -   `-d, --debug`: Enable debug output (default: `false`).
//! -   `-v, --verify`: Verify the solution against the rules and the clues (default: `true`).
//! -   `-s, --stats`: Print statistics (default: `true`).
//! -   `-p, --print-grid`: Print the solved grid (default: `true`).
//! -   `--solver <KIND>`: `dlx`, `backtracking` or `csp` (default: `dlx`).
//! -   `--timeout-ms <MS>`: Abandon the search after this many milliseconds.
//!
//! ## Puzzle format
//!
//! Nine rows of nine cells. Digits `1`-`9` are clues; `0`, `.` or `_` mark
//! blanks. Whitespace and the separators `|`, `+`, `-` are ignored, as are
//! lines starting with `#`.

use crate::command_line::cli::{Cli, Commands, compare, solve_dir, solve_file, solve_text};
use clap::{CommandFactory, Parser};
use std::io;

mod backtracking;
mod command_line;
mod csp;
mod dlx;
mod grid;
mod solver;

/// Global allocator using `tikv-jemallocator` for potentially better
/// performance and memory usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Main entry point of the solver application.
///
/// Parses command-line arguments, dispatches to the appropriate command
/// handler, and manages the overall execution flow.
fn main() {
    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    // Handle the case where a path is provided globally without a subcommand.
    // This defaults to solving a single puzzle file.
    if let Some(path) = cli.path.clone() {
        if cli.command.is_none() {
            return solve_file(&path, &cli.common);
        }
    }

    match cli.command {
        Some(Commands::File { path, common }) => solve_file(&path, &common),
        Some(Commands::Text { input, common }) => solve_text(&input, &common),
        Some(Commands::Dir { path, common }) => solve_dir(&path, &common),
        Some(Commands::Compare { path, common }) => compare(&path, &common),
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "sudoku_solver", &mut io::stdout());
            Ok(())
        }
        None => Err("No command provided. Use --help for more information.".to_string()),
    }
}
