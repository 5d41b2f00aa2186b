//! Depth-first backtracking search guided by the MRV heuristic.
//!
//! Each recursive step picks the empty cell with the fewest candidates,
//! tries its digits in ascending order, and discards any tentative board
//! that leaves some empty cell with no legal digit. Every branch owns its
//! own snapshot, so backtracking is just dropping the child board.

use crate::board::{Board, Position};

/// Unit struct solver; all state is per-call.
pub struct Solver;

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    /// Create a new solver.
    pub fn new() -> Self {
        Self
    }

    /// Solve the puzzle, returning the solved board if the search succeeds.
    /// `None` means the search tree was exhausted: the puzzle has no
    /// solution reachable from this state.
    pub fn solve(&self, board: &Board) -> Option<Board> {
        self.solve_observed(board, |_| {})
    }

    /// Like [`Solver::solve`], but invokes `observe` once per tentative
    /// move with the candidate board, before the dead-branch check. The
    /// observer is a side channel for animation or logging; control flow
    /// never depends on it.
    pub fn solve_observed<F>(&self, board: &Board, mut observe: F) -> Option<Board>
    where
        F: FnMut(&Board),
    {
        if board.is_solved() {
            return Some(board.clone());
        }
        // Seed the search from the globally most constrained cell.
        let start = board.minimum_candidate_cell()?;
        solve_from(board, start, &mut observe)
    }
}

/// Explore one search node: try every candidate digit for `pos`, recursing
/// into the most constrained cell of each surviving child board.
fn solve_from<F>(board: &Board, pos: Position, observe: &mut F) -> Option<Board>
where
    F: FnMut(&Board),
{
    for digit in board.candidates_at(pos).iter() {
        let next = board.with_move(pos, digit);
        observe(&next);

        if has_dead_cell(&next) {
            continue;
        }
        if next.is_solved() {
            return Some(next);
        }
        match next.minimum_candidate_cell() {
            Some(follow) => {
                if let Some(solved) = solve_from(&next, follow, observe) {
                    return Some(solved);
                }
            }
            // Complete but conflicted (possible only when the givens
            // themselves conflict): a dead end, try the next digit.
            None => {}
        }
    }
    None
}

/// Full re-scan of every empty cell for an exhausted candidate set. This is
/// the search's only pruning beyond MRV ordering, and it deliberately scans
/// the whole board rather than just the peers of the last move.
fn has_dead_cell(board: &Board) -> bool {
    board
        .empty_cells()
        .into_iter()
        .any(|pos| board.candidates_at(pos).is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Classic puzzle with a known unique solution; also the built-in
    /// default of the CLI.
    const CLASSIC: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
    const CLASSIC_SOLUTION: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    /// Requires heavy backtracking (Arto Inkala's puzzle).
    const INKALA: &str =
        "800000000003600000070090200050007000000045700000100030001000068008500010090000400";

    fn board_from_str(s: &str) -> Board {
        assert_eq!(s.len(), 81);
        let mut grid = [[None; 9]; 9];
        for (i, ch) in s.chars().enumerate() {
            if let Some(d) = ch.to_digit(10).filter(|&d| d != 0) {
                grid[i / 9][i % 9] = Some(d as u8);
            }
        }
        Board::from_givens(grid).unwrap()
    }

    #[test]
    fn solves_the_classic_puzzle_to_its_unique_solution() {
        let board = board_from_str(CLASSIC);
        let solved = Solver::new().solve(&board).expect("puzzle is solvable");

        assert!(solved.is_solved());
        assert!(solved.empty_cells().is_empty());
        assert_eq!(solved.conflict_count(), 0);

        let expected = board_from_str(CLASSIC_SOLUTION);
        for pos in Position::all() {
            assert_eq!(solved.get(pos), expected.get(pos), "mismatch at {pos}");
        }
    }

    #[test]
    fn solved_board_preserves_the_givens() {
        let board = board_from_str(CLASSIC);
        let solved = Solver::new().solve(&board).unwrap();
        for pos in Position::all() {
            if board.is_fixed(pos) {
                assert!(solved.is_fixed(pos));
                assert_eq!(solved.get(pos), board.get(pos), "given changed at {pos}");
            }
        }
    }

    #[test]
    fn single_empty_cell_is_filled_in_one_step() {
        let mut s = CLASSIC_SOLUTION.to_string();
        // Blank (0, 2); its unique legal digit is 4.
        s.replace_range(2..3, "0");
        let board = board_from_str(&s);

        let mut frames = 0;
        let solved = Solver::new()
            .solve_observed(&board, |_| frames += 1)
            .expect("one forced move");

        assert_eq!(frames, 1);
        assert_eq!(solved.get(Position::new(0, 2)), Some(4));
        assert!(solved.is_solved());
    }

    #[test]
    fn conflicting_givens_are_counted_and_never_solved() {
        // Row 0 holds two fixed 5s in different boxes and columns.
        let mut grid = [[None; 9]; 9];
        grid[0][0] = Some(5);
        grid[0][5] = Some(5);
        let board = Board::from_givens(grid).unwrap();

        assert!(board.conflict_count() >= 1);
        assert!(!board.is_solved());
    }

    #[test]
    fn unsolvable_from_the_start_returns_none_quickly() {
        // Row 0 holds 1..=8; a 9 below in column 8 starves cell (0, 8).
        let mut grid = [[None; 9]; 9];
        for (col, digit) in (0..8).zip(1..=8) {
            grid[0][col] = Some(digit);
        }
        grid[4][8] = Some(9);
        let board = Board::from_givens(grid).unwrap();

        assert!(board
            .candidates_at(Position::new(0, 8))
            .is_empty());
        assert_eq!(Solver::new().solve(&board), None);
    }

    #[test]
    fn already_solved_board_returns_without_observing() {
        let board = board_from_str(CLASSIC_SOLUTION);
        let mut frames = 0;
        let solved = Solver::new().solve_observed(&board, |_| frames += 1);
        assert_eq!(frames, 0);
        assert_eq!(solved, Some(board));
    }

    #[test]
    fn search_is_deterministic() {
        let board = board_from_str(CLASSIC);
        let solver = Solver::new();

        let mut frames_a = 0u64;
        let a = solver.solve_observed(&board, |_| frames_a += 1).unwrap();
        let mut frames_b = 0u64;
        let b = solver.solve_observed(&board, |_| frames_b += 1).unwrap();

        assert_eq!(a, b);
        assert_eq!(frames_a, frames_b);
    }

    #[test]
    fn every_tentative_move_is_observed_and_dead_branches_never_deepen() {
        let board = board_from_str(INKALA);
        let mut trail: Vec<(usize, bool)> = Vec::new();

        let solved = Solver::new()
            .solve_observed(&board, |tentative| {
                trail.push((tentative.empty_cells().len(), has_dead_cell(tentative)));
            })
            .expect("puzzle is solvable");
        assert!(solved.is_solved());

        // A frame flagged dead is pruned: the frame after it sits at the
        // same depth or shallower, never one cell deeper.
        let mut saw_dead = false;
        for pair in trail.windows(2) {
            let (empties, dead) = pair[0];
            if dead {
                saw_dead = true;
                assert!(pair[1].0 >= empties, "recursed into a dead branch");
            }
        }
        assert!(saw_dead, "expected backtracking on this puzzle");
    }
}
