//! N-Queens as a binary CSP.

use crate::model::{BinaryCsp, ConstraintTable};

/// Builds an `n`-queens problem with an empty assignment and full domains.
///
/// Variable `i` is row `i`; its value is that row's queen column, with
/// domain `0..n`. Every pair of rows is constrained to differ in column
/// and to not lie on a shared diagonal (columns must not differ by the
/// same amount as the row indices).
pub fn nqueens(n: usize) -> BinaryCsp<usize> {
    let mut table = ConstraintTable::new();
    for var1 in 0..n {
        for var2 in (var1 + 1)..n {
            let separation = var2 - var1;
            table.insert(var1, var2, move |a: &usize, b: &usize| {
                a != b && a.abs_diff(*b) != separation
            });
        }
    }
    BinaryCsp::new(vec![(0..n).collect(); n], table)
}

/// Renders a queens assignment as a text board, one row per variable.
///
/// Boards larger than 25 columns fall back to the raw column list.
pub fn render_queens(columns: &[usize]) -> String {
    let n = columns.len();
    if n > 25 {
        return format!("{columns:?}");
    }
    let mut out = String::new();
    out.push(' ');
    out.push_str(&vec!["_"; n].join(" "));
    out.push('\n');
    for &col in columns {
        out.push('|');
        for c in 0..n {
            out.push(if c == col { 'Q' } else { '_' });
            out.push('|');
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structure() {
        let p = nqueens(4);
        assert_eq!(p.num_vars(), 4);
        assert!(p.domains().iter().all(|d| d == &[0, 1, 2, 3]));
        // One constraint per pair of rows.
        assert_eq!(p.constraints().len(), 6);
    }

    #[test]
    fn test_attacks() {
        let p = nqueens(4);
        // Same column.
        assert!(p.conflicted(0, Some(&2), 3, Some(&2)));
        // Diagonal: rows 2 apart, columns 2 apart.
        assert!(p.conflicted(0, Some(&0), 2, Some(&2)));
        assert!(p.conflicted(2, Some(&2), 0, Some(&0)));
        // Knight-distance placements are fine.
        assert!(!p.conflicted(0, Some(&0), 2, Some(&1)));
    }

    #[test]
    fn test_known_solution_satisfies() {
        let mut p = nqueens(4);
        for (row, col) in [1usize, 3, 0, 2].into_iter().enumerate() {
            p.assign(row, col).unwrap();
        }
        assert!(p.is_solution());
    }

    #[test]
    fn test_render() {
        let board = render_queens(&[1, 3, 0, 2]);
        assert_eq!(board, " _ _ _ _\n|_|Q|_|_|\n|_|_|_|Q|\n|Q|_|_|_|\n|_|_|Q|_|\n");
    }

    #[test]
    fn test_render_large_board_falls_back_to_list() {
        let columns: Vec<usize> = (0..30).collect();
        assert!(render_queens(&columns).starts_with("[0, 1,"));
    }
}
