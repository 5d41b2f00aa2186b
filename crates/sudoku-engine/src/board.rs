//! Immutable board snapshots.
//!
//! A `Board` is one node in the search space: a 9x9 grid of optional digits,
//! a mask of fixed (given) cells, and a candidate table recomputed once per
//! snapshot. Producing a successor never mutates the source board; every
//! state transition goes through [`Board::with_move`].

use crate::error::PuzzleError;
use serde::{Deserialize, Serialize};

/// A (row, col) coordinate on the 9x9 grid, both components in `[0, 9)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Create a position. Panics if either coordinate is out of range.
    pub fn new(row: usize, col: usize) -> Self {
        assert!(row < 9 && col < 9, "position ({row}, {col}) out of range");
        Self { row, col }
    }

    /// All 81 positions in row-major order (top-left to bottom-right).
    pub fn all() -> impl Iterator<Item = Position> {
        (0..81).map(|i| Position::new(i / 9, i % 9))
    }

    /// Index of the containing 3x3 box, 0..9 in row-major box order.
    pub fn box_index(self) -> usize {
        (self.row / 3) * 3 + self.col / 3
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Set of digits 1..=9 as a u16 bitmask (bit 0 = digit 1).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSet(u16);

impl CandidateSet {
    pub const EMPTY: Self = Self(0);
    pub const ALL: Self = Self(0b1_1111_1111);

    fn bit(digit: u8) -> u16 {
        debug_assert!((1..=9).contains(&digit));
        1 << (digit - 1)
    }

    pub fn insert(&mut self, digit: u8) {
        self.0 |= Self::bit(digit);
    }

    pub fn remove(&mut self, digit: u8) {
        self.0 &= !Self::bit(digit);
    }

    pub fn contains(self, digit: u8) -> bool {
        self.0 & Self::bit(digit) != 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Digits in ascending order. The solver's branch ordering contract
    /// depends on this being 1 -> 9.
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (1..=9).filter(move |&d| self.contains(d))
    }
}

type Grid = [[Option<u8>; 9]; 9];
type FixedMask = [[bool; 9]; 9];

/// One immutable grid state plus its per-snapshot candidate cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BoardRepr", into = "BoardRepr")]
pub struct Board {
    grid: Grid,
    fixed: FixedMask,
    candidates: [[CandidateSet; 9]; 9],
}

/// Wire form of a board: the candidate table is derived state and is rebuilt
/// on deserialization rather than trusted from the input.
#[derive(Serialize, Deserialize)]
struct BoardRepr {
    grid: Grid,
    fixed: FixedMask,
}

impl From<BoardRepr> for Board {
    fn from(repr: BoardRepr) -> Self {
        Board::from_parts(repr.grid, repr.fixed)
    }
}

impl From<Board> for BoardRepr {
    fn from(board: Board) -> Self {
        BoardRepr {
            grid: board.grid,
            fixed: board.fixed,
        }
    }
}

impl Board {
    /// Construct a board from an explicit grid and the set of fixed positions.
    ///
    /// Every fixed position must hold a digit, and every digit must be in
    /// 1..=9; anything else is an invalid puzzle.
    pub fn new(grid: Grid, fixed: &[Position]) -> Result<Self, PuzzleError> {
        for pos in Position::all() {
            if let Some(digit) = grid[pos.row][pos.col] {
                if !(1..=9).contains(&digit) {
                    return Err(PuzzleError::DigitOutOfRange {
                        row: pos.row,
                        col: pos.col,
                        digit,
                    });
                }
            }
        }

        let mut mask = [[false; 9]; 9];
        for &pos in fixed {
            if grid[pos.row][pos.col].is_none() {
                return Err(PuzzleError::EmptyFixedCell {
                    row: pos.row,
                    col: pos.col,
                });
            }
            mask[pos.row][pos.col] = true;
        }

        Ok(Self::from_parts(grid, mask))
    }

    /// Construct a board where every pre-filled cell is fixed. This is how
    /// a puzzle definition normally arrives: the givens are the filled cells.
    pub fn from_givens(grid: Grid) -> Result<Self, PuzzleError> {
        let fixed: Vec<Position> = Position::all()
            .filter(|pos| grid[pos.row][pos.col].is_some())
            .collect();
        Self::new(grid, &fixed)
    }

    fn from_parts(grid: Grid, fixed: FixedMask) -> Self {
        let mut board = Self {
            grid,
            fixed,
            candidates: [[CandidateSet::EMPTY; 9]; 9],
        };
        board.recalculate_candidates();
        board
    }

    /// Rebuild the candidate cache for every empty cell. Runs once per
    /// snapshot; filled and fixed cells keep an empty entry.
    fn recalculate_candidates(&mut self) {
        for pos in Position::all() {
            self.candidates[pos.row][pos.col] = if self.grid[pos.row][pos.col].is_none() {
                self.compute_candidates(pos)
            } else {
                CandidateSet::EMPTY
            };
        }
    }

    /// Digits not already present in the cell's row, column, or box.
    fn compute_candidates(&self, pos: Position) -> CandidateSet {
        let mut set = CandidateSet::ALL;
        for i in 0..9 {
            if let Some(d) = self.grid[pos.row][i] {
                set.remove(d);
            }
            if let Some(d) = self.grid[i][pos.col] {
                set.remove(d);
            }
        }
        let box_row = (pos.row / 3) * 3;
        let box_col = (pos.col / 3) * 3;
        for r in box_row..box_row + 3 {
            for c in box_col..box_col + 3 {
                if let Some(d) = self.grid[r][c] {
                    set.remove(d);
                }
            }
        }
        set
    }

    /// The digit at a position, if any.
    pub fn get(&self, pos: Position) -> Option<u8> {
        self.grid[pos.row][pos.col]
    }

    /// Whether the position was part of the original puzzle definition.
    pub fn is_fixed(&self, pos: Position) -> bool {
        self.fixed[pos.row][pos.col]
    }

    /// True iff no cell is empty and no constraint group has a duplicate.
    /// The conflict check is defense in depth; a correctly pruned search
    /// never reaches a complete board with conflicts.
    pub fn is_solved(&self) -> bool {
        let full = Position::all().all(|pos| self.grid[pos.row][pos.col].is_some());
        full && self.conflict_count() == 0
    }

    /// Count duplicate occurrences across all 27 constraint groups (9 rows,
    /// 9 columns, 9 boxes). A value appearing k > 1 times in one group
    /// contributes k - 1 conflicts for that group.
    pub fn conflict_count(&self) -> usize {
        let mut conflicts = 0;
        for group in 0..9 {
            conflicts += self.duplicates_in(Self::row_cells(group));
            conflicts += self.duplicates_in(Self::col_cells(group));
            conflicts += self.duplicates_in(Self::box_cells(group));
        }
        conflicts
    }

    fn duplicates_in(&self, cells: impl Iterator<Item = Position>) -> usize {
        let mut seen = [false; 10];
        let mut repeats = 0;
        for pos in cells {
            if let Some(d) = self.grid[pos.row][pos.col] {
                if seen[d as usize] {
                    repeats += 1;
                } else {
                    seen[d as usize] = true;
                }
            }
        }
        repeats
    }

    fn row_cells(row: usize) -> impl Iterator<Item = Position> {
        (0..9).map(move |col| Position::new(row, col))
    }

    fn col_cells(col: usize) -> impl Iterator<Item = Position> {
        (0..9).map(move |row| Position::new(row, col))
    }

    fn box_cells(box_idx: usize) -> impl Iterator<Item = Position> {
        let base_row = (box_idx / 3) * 3;
        let base_col = (box_idx % 3) * 3;
        (0..9).map(move |i| Position::new(base_row + i / 3, base_col + i % 3))
    }

    /// Legal digits for a non-fixed cell, from the per-snapshot cache.
    /// Panics if called on a fixed cell; that is a caller bug, not a state.
    pub fn candidates_at(&self, pos: Position) -> CandidateSet {
        assert!(
            !self.fixed[pos.row][pos.col],
            "candidates queried for fixed cell {pos}"
        );
        self.candidates[pos.row][pos.col]
    }

    /// All empty positions in row-major order. The order is load-bearing:
    /// it is the tie-break for [`Board::minimum_candidate_cell`].
    pub fn empty_cells(&self) -> Vec<Position> {
        Position::all()
            .filter(|pos| self.grid[pos.row][pos.col].is_none())
            .collect()
    }

    /// The empty cell with the fewest candidates (MRV). Ties go to the
    /// earlier row-major position. `None` when the board has no empty cell.
    pub fn minimum_candidate_cell(&self) -> Option<Position> {
        self.empty_cells()
            .into_iter()
            .min_by_key(|&pos| self.candidates_at(pos).len())
    }

    /// A new board identical to this one except for one placed digit.
    /// The receiver is left untouched; the target cell must not be fixed.
    pub fn with_move(&self, pos: Position, digit: u8) -> Board {
        assert!(
            !self.fixed[pos.row][pos.col],
            "attempted move on fixed cell {pos}"
        );
        assert!((1..=9).contains(&digit), "digit {digit} out of range");
        let mut grid = self.grid;
        grid[pos.row][pos.col] = Some(digit);
        Self::from_parts(grid, self.fixed)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..9 {
            if row % 3 == 0 {
                writeln!(f, "=========================")?;
            }
            write!(f, "| ")?;
            for col in 0..9 {
                match self.grid[row][col] {
                    Some(d) => write!(f, "{d}")?,
                    None => write!(f, ".")?,
                }
                if col % 3 == 2 {
                    write!(f, " | ")?;
                } else {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "=========================")
    }
}
