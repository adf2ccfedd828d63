#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! The 9x9 Sudoku grid: construction, parsing, rendering and validation.
//!
//! A [`Grid`] stores one `u8` per cell, `0` for a blank and `1..=9` for a value.
//! Parsing accepts the common textual puzzle formats: 81 cells written with the
//! digits `1..9` for clues and `0`, `.` or `_` for blanks, with whitespace and
//! ruler characters (`|`, `+`, `-`) ignored and `#` lines treated as comments.
//!
//! Grids only check *syntactic* validity (values in range by construction);
//! Sudoku legality of clues is the solvers' concern.

use itertools::Itertools;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Side length of the grid.
pub const SIZE: usize = 9;

/// Side length of one 3x3 box.
pub const BOX_SIZE: usize = 3;

/// Number of cells in the grid.
pub const CELLS: usize = SIZE * SIZE;

/// The classic example puzzle (the one on Wikipedia's Sudoku article).
pub const EXAMPLE: [[u8; SIZE]; SIZE] = [
    [5, 3, 0, 0, 7, 0, 0, 0, 0],
    [6, 0, 0, 1, 9, 5, 0, 0, 0],
    [0, 9, 8, 0, 0, 0, 0, 6, 0],
    [8, 0, 0, 0, 6, 0, 0, 0, 3],
    [4, 0, 0, 8, 0, 3, 0, 0, 1],
    [7, 0, 0, 0, 2, 0, 0, 0, 6],
    [0, 6, 0, 0, 0, 0, 2, 8, 0],
    [0, 0, 0, 4, 1, 9, 0, 0, 5],
    [0, 0, 0, 0, 8, 0, 0, 7, 9],
];

/// A published 17-clue puzzle (the minimum possible number of clues) with a
/// known unique solution. Used as the hard benchmark input.
pub const HARD_SEVENTEEN: [[u8; SIZE]; SIZE] = [
    [0, 0, 0, 0, 0, 0, 0, 1, 0],
    [4, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 2, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 5, 0, 4, 0, 7],
    [0, 0, 8, 0, 0, 0, 3, 0, 0],
    [0, 0, 1, 0, 9, 0, 0, 0, 0],
    [3, 0, 0, 4, 0, 0, 2, 0, 0],
    [0, 5, 0, 1, 0, 0, 0, 0, 0],
    [0, 0, 0, 8, 0, 6, 0, 0, 0],
];

/// A 9x9 Sudoku grid with `0` marking blank cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Grid([[u8; SIZE]; SIZE]);

impl Grid {
    /// Creates a grid from a cell array. Values must already be in `0..=9`.
    #[must_use]
    pub const fn new(cells: [[u8; SIZE]; SIZE]) -> Self {
        Self(cells)
    }

    /// Returns the value at `(row, col)`, `0` for a blank.
    #[must_use]
    pub const fn get(&self, row: usize, col: usize) -> u8 {
        self.0[row][col]
    }

    /// Sets the value at `(row, col)`; `0` clears the cell.
    pub const fn set(&mut self, row: usize, col: usize, value: u8) {
        self.0[row][col] = value;
    }

    /// Returns the index (`0..9`, row-major) of the 3x3 box containing `(row, col)`.
    #[must_use]
    pub const fn box_of(row: usize, col: usize) -> usize {
        (row / BOX_SIZE) * BOX_SIZE + col / BOX_SIZE
    }

    /// Returns the number of prefilled cells.
    #[must_use]
    pub fn clue_count(&self) -> usize {
        self.0.iter().flatten().filter(|&&v| v != 0).count()
    }

    /// Returns `true` if no cell is blank.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.0.iter().flatten().all(|&v| v != 0)
    }

    /// Returns `true` if the grid is a completed, valid Sudoku: every row,
    /// column and 3x3 box contains the digits 1 through 9 exactly once.
    #[must_use]
    pub fn is_valid_solution(&self) -> bool {
        let mut rows = [0u16; SIZE];
        let mut cols = [0u16; SIZE];
        let mut boxes = [0u16; SIZE];

        for row in 0..SIZE {
            for col in 0..SIZE {
                let value = self.0[row][col];
                if value == 0 {
                    return false;
                }
                let bit = 1u16 << value;
                let boxi = Self::box_of(row, col);
                if rows[row] & bit != 0 || cols[col] & bit != 0 || boxes[boxi] & bit != 0 {
                    return false;
                }
                rows[row] |= bit;
                cols[col] |= bit;
                boxes[boxi] |= bit;
            }
        }
        true
    }

    /// Returns `true` if this grid is a valid completion of `puzzle`: a valid
    /// solution that agrees with every clue of the puzzle.
    #[must_use]
    pub fn solves(&self, puzzle: &Self) -> bool {
        self.is_valid_solution()
            && (0..SIZE).all(|row| {
                (0..SIZE).all(|col| {
                    let clue = puzzle.get(row, col);
                    clue == 0 || clue == self.get(row, col)
                })
            })
    }

    /// Iterates over the rows of the grid.
    pub fn rows(&self) -> impl Iterator<Item = &[u8; SIZE]> {
        self.0.iter()
    }
}

impl From<[[u8; SIZE]; SIZE]> for Grid {
    fn from(cells: [[u8; SIZE]; SIZE]) -> Self {
        Self::new(cells)
    }
}

impl From<Grid> for [[u8; SIZE]; SIZE] {
    fn from(grid: Grid) -> Self {
        grid.0
    }
}

impl FromStr for Grid {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells: Vec<u8> = s
            .lines()
            .filter(|line| !line.trim_start().starts_with('#'))
            .flat_map(str::chars)
            .filter_map(|ch| match ch {
                '0' | '.' | '_' => Some(Ok(0)),
                '1'..='9' => Some(Ok(ch as u8 - b'0')),
                c if c.is_whitespace() || matches!(c, '|' | '+' | '-') => None,
                c => Some(Err(format!("unexpected character {c:?} in puzzle"))),
            })
            .try_collect()?;

        if cells.len() != CELLS {
            return Err(format!("expected {CELLS} cells, found {}", cells.len()));
        }

        let mut grid = Self::default();
        for (i, value) in cells.into_iter().enumerate() {
            grid.set(i / SIZE, i % SIZE, value);
        }
        Ok(grid)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row_index, row) in self.0.iter().enumerate() {
            if row_index > 0 && row_index % BOX_SIZE == 0 {
                writeln!(f, "------+-------+------")?;
            }
            let line = row
                .chunks(BOX_SIZE)
                .map(|chunk| {
                    chunk
                        .iter()
                        .map(|&v| if v == 0 { '.' } else { (b'0' + v) as char })
                        .join(" ")
                })
                .join(" | ");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Reads and parses a puzzle file.
///
/// # Errors
///
/// If the file cannot be read or does not contain a well-formed puzzle.
pub fn load_grid_file(path: &Path) -> Result<Grid, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("unable to read {}: {e}", path.display()))?;
    text.parse()
        .map_err(|e| format!("{}: {e}", path.display()))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// The unique solution of [`EXAMPLE`].
    pub(crate) const EXAMPLE_SOLUTION: [[u8; SIZE]; SIZE] = [
        [5, 3, 4, 6, 7, 8, 9, 1, 2],
        [6, 7, 2, 1, 9, 5, 3, 4, 8],
        [1, 9, 8, 3, 4, 2, 5, 6, 7],
        [8, 5, 9, 7, 6, 1, 4, 2, 3],
        [4, 2, 6, 8, 5, 3, 7, 9, 1],
        [7, 1, 3, 9, 2, 4, 8, 5, 6],
        [9, 6, 1, 5, 3, 7, 2, 8, 4],
        [2, 8, 7, 4, 1, 9, 6, 3, 5],
        [3, 4, 5, 2, 8, 6, 1, 7, 9],
    ];

    /// The unique solution of [`HARD_SEVENTEEN`].
    pub(crate) const HARD_SEVENTEEN_SOLUTION: [[u8; SIZE]; SIZE] = [
        [6, 9, 3, 7, 8, 4, 5, 1, 2],
        [4, 8, 7, 5, 1, 2, 9, 3, 6],
        [1, 2, 5, 9, 6, 3, 8, 7, 4],
        [9, 3, 2, 6, 5, 1, 4, 8, 7],
        [5, 6, 8, 2, 4, 7, 3, 9, 1],
        [7, 4, 1, 3, 9, 8, 6, 2, 5],
        [3, 1, 9, 4, 7, 5, 2, 6, 8],
        [8, 5, 6, 1, 2, 9, 7, 4, 3],
        [2, 7, 4, 8, 3, 6, 1, 5, 9],
    ];

    #[test]
    fn parses_plain_digits() {
        let text = EXAMPLE
            .iter()
            .map(|row| row.iter().map(u8::to_string).collect::<String>())
            .join("\n");
        let grid: Grid = text.parse().unwrap();
        assert_eq!(grid, Grid::new(EXAMPLE));
    }

    #[test]
    fn parses_dots_comments_and_rulers() {
        let text = "# clue-free corners\n\
                    5 3 . | . 7 . | . . .\n\
                    6 . . | 1 9 5 | . . .\n\
                    . 9 8 | . . . | . 6 .\n\
                    ------+-------+------\n\
                    8 . . | . 6 . | . . 3\n\
                    4 . . | 8 . 3 | . . 1\n\
                    7 . . | . 2 . | . . 6\n\
                    ------+-------+------\n\
                    . 6 . | . . . | 2 8 .\n\
                    . . . | 4 1 9 | . . 5\n\
                    . . . | . 8 . | . 7 9\n";
        let grid: Grid = text.parse().unwrap();
        assert_eq!(grid, Grid::new(EXAMPLE));
    }

    #[test]
    fn display_round_trips() {
        let grid = Grid::new(EXAMPLE);
        let reparsed: Grid = grid.to_string().parse().unwrap();
        assert_eq!(reparsed, grid);
    }

    #[test]
    fn rejects_bad_characters() {
        assert!("x".repeat(81).parse::<Grid>().is_err());
    }

    #[test]
    fn rejects_wrong_cell_count() {
        assert!("1".repeat(80).parse::<Grid>().is_err());
        assert!("1".repeat(82).parse::<Grid>().is_err());
    }

    #[test]
    fn box_indices() {
        assert_eq!(Grid::box_of(0, 0), 0);
        assert_eq!(Grid::box_of(0, 8), 2);
        assert_eq!(Grid::box_of(4, 4), 4);
        assert_eq!(Grid::box_of(8, 0), 6);
        assert_eq!(Grid::box_of(8, 8), 8);
    }

    #[test]
    fn counts_clues() {
        assert_eq!(Grid::new(EXAMPLE).clue_count(), 30);
        assert_eq!(Grid::new(HARD_SEVENTEEN).clue_count(), 17);
        assert_eq!(Grid::default().clue_count(), 0);
    }

    #[test]
    fn validates_solutions() {
        let solution = Grid::new(EXAMPLE_SOLUTION);
        assert!(solution.is_valid_solution());
        assert!(solution.solves(&Grid::new(EXAMPLE)));

        // Clue disagreement is rejected even when the grid itself is valid.
        let mut other_puzzle = Grid::new(EXAMPLE);
        other_puzzle.set(0, 2, 9);
        assert!(!solution.solves(&other_puzzle));

        // A duplicated value invalidates the grid.
        let mut broken = solution;
        broken.set(0, 0, broken.get(0, 1));
        assert!(!broken.is_valid_solution());

        // Incomplete grids are not solutions.
        assert!(!Grid::new(EXAMPLE).is_valid_solution());
    }

    #[test]
    fn fixtures_are_consistent() {
        assert!(Grid::new(EXAMPLE_SOLUTION).solves(&Grid::new(EXAMPLE)));
        assert!(Grid::new(HARD_SEVENTEEN_SOLUTION).solves(&Grid::new(HARD_SEVENTEEN)));
    }
}
