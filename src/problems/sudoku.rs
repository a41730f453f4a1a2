//! Sudoku as a binary CSP.
//!
//! 81 variables with domain `1..=9`; variable `k` is row `k / 9`, column
//! `k % 9`. Row, column, and 3x3-box peers are pairwise constrained to
//! differ, with each constraint stored once toward the higher index.

use crate::error::CspError;
use crate::model::{BinaryCsp, ConstraintTable};

/// A grid of givens in row-major order; `0` marks a blank cell.
pub type Grid = [u8; 81];

// Sample games from websudoku.com.
#[rustfmt::skip]
const EASY: Grid = [
    0, 9, 3, 7, 8, 1, 4, 0, 5,
    8, 1, 0, 4, 5, 0, 6, 0, 7,
    0, 0, 0, 0, 0, 0, 0, 1, 0,
    3, 0, 0, 0, 4, 7, 0, 0, 0,
    0, 0, 1, 0, 0, 0, 9, 0, 0,
    0, 0, 0, 5, 9, 0, 0, 0, 1,
    0, 7, 0, 0, 0, 0, 0, 0, 0,
    9, 0, 6, 0, 7, 8, 0, 5, 4,
    1, 0, 5, 2, 6, 4, 8, 7, 0,
];

#[rustfmt::skip]
const MEDIUM: Grid = [
    0, 3, 4, 2, 7, 1, 5, 6, 0,
    0, 0, 0, 0, 0, 0, 3, 0, 1,
    0, 9, 6, 0, 0, 8, 0, 2, 0,
    0, 7, 0, 0, 2, 4, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 1, 5, 0, 0, 3, 0,
    0, 4, 0, 3, 0, 0, 6, 9, 0,
    6, 0, 3, 0, 0, 0, 0, 0, 0,
    0, 1, 7, 6, 8, 2, 4, 5, 0,
];

#[rustfmt::skip]
const HARD: Grid = [
    0, 8, 0, 9, 0, 0, 6, 0, 0,
    0, 0, 1, 0, 0, 0, 4, 0, 0,
    0, 4, 0, 0, 0, 5, 0, 0, 7,
    0, 0, 4, 0, 9, 0, 0, 0, 5,
    5, 3, 0, 0, 2, 0, 0, 7, 4,
    2, 0, 0, 0, 8, 0, 1, 0, 0,
    4, 0, 0, 8, 0, 0, 0, 2, 0,
    0, 0, 3, 0, 0, 0, 7, 0, 0,
    0, 0, 9, 0, 0, 1, 0, 6, 0,
];

#[rustfmt::skip]
const EVIL: Grid = [
    3, 0, 6, 0, 1, 0, 0, 0, 0,
    0, 0, 0, 8, 0, 6, 0, 7, 3,
    0, 0, 0, 0, 0, 0, 0, 1, 0,
    4, 0, 0, 0, 0, 1, 0, 0, 0,
    0, 5, 1, 0, 9, 0, 4, 8, 0,
    0, 0, 0, 2, 0, 0, 0, 0, 9,
    0, 1, 0, 0, 0, 0, 0, 0, 0,
    6, 2, 0, 4, 0, 7, 0, 0, 0,
    0, 0, 0, 0, 3, 0, 8, 0, 5,
];

/// Builds a Sudoku problem from a grid of givens.
///
/// Givens are seeded through [`BinaryCsp::assign`] with propagation off,
/// collapsing their domains to the given digit.
///
/// # Errors
///
/// [`CspError::ValueNotInDomain`] if a given is not in `1..=9`.
pub fn sudoku(givens: &Grid) -> Result<BinaryCsp<u8>, CspError> {
    let mut table = ConstraintTable::new();
    let neq = |a: &u8, b: &u8| a != b;
    for var in 0..81 {
        let row = var / 9;
        let col = var % 9;
        for x in (col + 1)..9 {
            table.insert(var, 9 * row + x, neq);
        }
        for y in (row + 1)..9 {
            table.insert(var, 9 * y + col, neq);
        }
        for y in 3 * (row / 3)..3 * (row / 3) + 3 {
            for x in 3 * (col / 3)..3 * (col / 3) + 3 {
                let other = 9 * y + x;
                if other > var {
                    table.insert(var, other, neq);
                }
            }
        }
    }

    let mut problem = BinaryCsp::new(vec![(1..=9).collect(); 81], table);
    for (var, &given) in givens.iter().enumerate() {
        if given != 0 {
            problem.assign(var, given)?;
        }
    }
    Ok(problem)
}

/// Builds one of the bundled puzzles: `"easy"`, `"medium"`, `"hard"`, or
/// `"evil"`.
///
/// # Errors
///
/// [`CspError::UnknownPuzzle`] for any other name.
pub fn bundled_sudoku(name: &str) -> Result<BinaryCsp<u8>, CspError> {
    match name {
        "easy" => sudoku(&EASY),
        "medium" => sudoku(&MEDIUM),
        "hard" => sudoku(&HARD),
        "evil" => sudoku(&EVIL),
        other => Err(CspError::UnknownPuzzle(other.to_owned())),
    }
}

/// Renders a (possibly partial) Sudoku assignment as a text grid, `_`
/// marking unassigned cells.
pub fn render_sudoku(assignment: &[Option<u8>]) -> String {
    let mut out = String::new();
    out.push(' ');
    out.push_str(&vec!["_"; 9].join(" "));
    out.push('\n');
    for row in assignment.chunks(9) {
        out.push('|');
        for cell in row {
            match cell {
                Some(digit) => out.push_str(&digit.to_string()),
                None => out.push('_'),
            }
            out.push('|');
        }
        out.push('\n');
    }
    out
}
