//! Problem suppliers: concrete puzzle families encoded as binary CSPs.
//!
//! These are pure data producers — they build domains and constraint
//! tables (plus text renderers for human-readable output) and carry no
//! algorithmic responsibility. The search algorithms depend only on the
//! [`BinaryCsp`](crate::model::BinaryCsp) contract, never on how a
//! problem was constructed.

mod coloring;
mod nqueens;
mod sudoku;

pub use coloring::demo_map;
pub use nqueens::{nqueens, render_queens};
pub use sudoku::{bundled_sudoku, render_sudoku, sudoku, Grid};
