//! Small map-coloring instance for demos and tests.

use crate::model::{BinaryCsp, ConstraintTable};

/// A 5-node map-coloring problem over the colors `r`, `g`, `b`.
///
/// Adjacent nodes (edges 0-1, 0-2, 0-3, 1-4, 2-4) must take different
/// colors. The instance is satisfiable.
pub fn demo_map() -> BinaryCsp<char> {
    let mut table = ConstraintTable::new();
    for (a, b) in [(0, 1), (0, 2), (0, 3), (1, 4), (2, 4)] {
        table.insert(a, b, |x: &char, y: &char| x != y);
    }
    BinaryCsp::new(vec![vec!['r', 'g', 'b']; 5], table)
}
