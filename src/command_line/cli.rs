#![allow(clippy::cast_precision_loss)]

use crate::backtracking::BacktrackingSolver;
use crate::csp::CspSolver;
use crate::dlx::DlxSolver;
use crate::grid::{Grid, load_grid_file};
use crate::solver::{Solution, Solver};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};

/// Defines the command-line interface for the sudoku solver application.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "sudoku_solver", version, about = "A configurable Sudoku solver")]
pub(crate) struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// it's treated as the path to a puzzle file to solve.
    #[arg(global = true)]
    pub path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `file`, `text`, `dir`, `compare`).
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands for the solver.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a single puzzle file.
    File {
        /// Path to the puzzle file. Nine rows of nine characters; digits are
        /// clues, `0`, `.` or `_` are blanks, `#` lines are comments.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a puzzle provided as plain text.
    Text {
        /// Literal puzzle input as a string of 81 cells, e.g.
        /// "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79".
        #[arg(short, long)]
        input: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every `.sudoku` file under a directory.
    Dir {
        /// Path to the directory to walk.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Run all three solvers on one puzzle and report them side by side.
    Compare {
        /// Path to the puzzle file.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct CommonOptions {
    /// Enable debug output, providing more verbose logging during the solving process.
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Enable verification of the found solution. If a grid comes back, it's
    /// checked against the Sudoku rules and the original clues.
    #[arg(short, long, default_value_t = true)]
    pub(crate) verify: bool,

    /// Enable printing of performance and problem statistics after solving.
    #[arg(short, long, default_value_t = true)]
    pub(crate) stats: bool,

    /// Enable printing of the solved grid.
    #[arg(short, long, default_value_t = true)]
    pub(crate) print_grid: bool,

    /// Specifies the solving algorithm to use.
    #[arg(long, default_value_t = SolverKind::Dlx)]
    pub(crate) solver: SolverKind,

    /// Abandon the search after this many milliseconds. An abandoned search
    /// reports the puzzle as unsolved.
    #[arg(long)]
    pub(crate) timeout_ms: Option<u64>,
}

/// The solving algorithms selectable from the command line.
#[derive(ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SolverKind {
    /// Algorithm X over dancing links.
    #[default]
    Dlx,
    /// Plain cell-by-cell backtracking.
    Backtracking,
    /// Constraint propagation with AC-3.
    Csp,
}

impl std::fmt::Display for SolverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dlx => write!(f, "dlx"),
            Self::Backtracking => write!(f, "backtracking"),
            Self::Csp => write!(f, "csp"),
        }
    }
}

/// Solves a single puzzle file.
///
/// # Errors
///
/// If the file does not exist or does not parse as a grid.
pub(crate) fn solve_file(path: &PathBuf, common: &CommonOptions) -> Result<(), String> {
    let time = Instant::now();
    let puzzle = load_grid_file(path)?;
    let parse_time = time.elapsed();

    solve_and_report(puzzle, common, Some(path), parse_time);
    Ok(())
}

/// Solves a puzzle given as literal text on the command line.
///
/// # Errors
///
/// If the text does not parse as a grid.
pub(crate) fn solve_text(input: &str, common: &CommonOptions) -> Result<(), String> {
    let time = Instant::now();
    let puzzle: Grid = input.parse()?;
    let parse_time = time.elapsed();

    solve_and_report(puzzle, common, None, parse_time);
    Ok(())
}

/// Solves every `.sudoku` file under a directory.
///
/// # Errors
///
/// If the path is not a directory, or any puzzle file fails to parse.
pub(crate) fn solve_dir(path: &PathBuf, common: &CommonOptions) -> Result<(), String> {
    if !path.is_dir() {
        return Err(format!("Provided path is not a directory: {}", path.display()));
    }

    for entry in walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path().to_path_buf();
        if !file_path.is_file() {
            continue;
        }

        if file_path.extension().is_none_or(|ext| ext != "sudoku") {
            eprintln!("Skipping non-puzzle file: {}", file_path.display());
            continue;
        }

        solve_file(&file_path, common)?;
    }

    Ok(())
}

/// Runs all three solvers on the same puzzle and prints one table per solver.
///
/// # Errors
///
/// If the file does not exist or does not parse as a grid.
pub(crate) fn compare(path: &PathBuf, common: &CommonOptions) -> Result<(), String> {
    let time = Instant::now();
    let puzzle = load_grid_file(path)?;
    let parse_time = time.elapsed();

    for kind in [SolverKind::Dlx, SolverKind::Backtracking, SolverKind::Csp] {
        let mut options = common.clone();
        options.solver = kind;
        solve_and_report(puzzle, &options, Some(path), parse_time);
    }
    Ok(())
}

/// Verifies a solved grid against the Sudoku rules and the original clues.
///
/// Prints whether the verification was successful. If verification fails, it
/// panics. An unsolved puzzle prints "UNSOLVABLE".
///
/// # Panics
///
/// If the solver returned a grid that fails verification.
pub(crate) fn verify_solution(puzzle: &Grid, solution: &Solution) {
    if solution.solved {
        let ok = solution.grid.solves(puzzle);
        println!("Verified: {ok:?}");
        assert!(ok, "Solution failed verification!");
    } else {
        println!("UNSOLVABLE");
    }
}

/// Solves a puzzle with the configured solver.
///
/// # Returns
/// A tuple containing:
/// * `Solution`: The outcome, including the guess count.
/// * `Duration`: The time taken to solve the puzzle.
pub(crate) fn solve(
    puzzle: Grid,
    label: Option<&PathBuf>,
    common: &CommonOptions,
) -> (Solution, Duration) {
    if let Some(name) = label {
        println!("Solving: {}", name.display());
    }

    if common.debug {
        println!("Puzzle:\n{puzzle}");
        println!("Clues: {}", puzzle.clue_count());
        println!("Solver: {}", common.solver);
    }

    solve_impl(puzzle, common)
}

/// Dispatches to the chosen solver, wiring up the timeout hook if requested.
pub(crate) fn solve_impl(puzzle: Grid, common: &CommonOptions) -> (Solution, Duration) {
    epoch::advance().unwrap();

    let deadline = common
        .timeout_ms
        .map(|ms| Instant::now() + Duration::from_millis(ms));
    let mut cancel = move || deadline.is_some_and(|d| Instant::now() >= d);

    let time = Instant::now();

    let solution = match common.solver {
        SolverKind::Dlx => DlxSolver::new(puzzle).solve_with(&mut cancel),
        SolverKind::Backtracking => BacktrackingSolver::new(puzzle).solve_with(&mut cancel),
        SolverKind::Csp => CspSolver::new(puzzle).solve_with(&mut cancel),
    };

    let elapsed = time.elapsed();

    if common.debug {
        println!("Solved: {}", solution.solved);
        println!("Time: {elapsed:?}");
    }

    (solution, elapsed)
}

/// Solves a puzzle and reports results including stats and verification.
///
/// This function is a convenience wrapper around `solve`, `verify_solution`,
/// and `print_stats`.
pub(crate) fn solve_and_report(
    puzzle: Grid,
    common: &CommonOptions,
    label: Option<&PathBuf>,
    parse_time: Duration,
) {
    epoch::advance().unwrap();

    let (solution, elapsed) = solve(puzzle, label, common);

    epoch::advance().unwrap();

    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();

    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    if common.verify {
        verify_solution(&puzzle, &solution);
    }

    if common.stats {
        print_stats(
            parse_time,
            elapsed,
            &puzzle,
            &solution,
            common.solver,
            allocated_mib,
            resident_mib,
        );
    }

    if common.print_grid && solution.solved {
        println!("Solution:\n{}", solution.grid);
    }
}

/// Helper function to print a single statistic line in a formatted table row.
pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
pub(crate) fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
pub(crate) fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    puzzle: &Grid,
    solution: &Solution,
    solver: SolverKind,
    allocated: f64,
    resident: f64,
) {
    let elapsed_secs = elapsed.as_secs_f64();

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Clues", puzzle.clue_count());
    stat_line("Blanks", 81 - puzzle.clue_count());
    stat_line("Solver", solver);

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Guesses", solution.guesses, elapsed_secs);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");

    if solution.solved {
        println!("\nSOLVED");
    } else {
        println!("\nUNSOLVABLE");
    }
}
