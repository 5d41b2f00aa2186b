//! Sudoku engine: immutable board snapshots plus an MRV-guided
//! backtracking solver.
//!
//! The [`Board`] is a value type; placing a digit produces a successor
//! snapshot and never touches the source, so sibling search branches can
//! never alias each other's state. The [`Solver`] walks the assignment
//! space depth first, always branching on the empty cell with the fewest
//! remaining candidates, and reports an unsolvable puzzle as ordinary data
//! (`None`), never as an error.
//!
//! ```
//! use sudoku_engine::{Board, Solver};
//!
//! let mut grid = [[None; 9]; 9];
//! grid[0][0] = Some(5);
//! let board = Board::from_givens(grid)?;
//!
//! if let Some(solved) = Solver::new().solve(&board) {
//!     assert!(solved.is_solved());
//! }
//! # Ok::<(), sudoku_engine::PuzzleError>(())
//! ```

mod board;
mod error;
mod solver;

pub use board::{Board, CandidateSet, Position};
pub use error::PuzzleError;
pub use solver::Solver;
