//! Puzzle input. The engine consumes a semantic grid; turning an
//! 81-character string into one is this crate's job.

use anyhow::{bail, ensure, Result};
use sudoku_engine::Board;

/// The built-in puzzle: the classic newspaper grid with 30 givens.
pub const DEFAULT_PUZZLE: &str =
    "530070000600195000098000060800060003400803001700020006060000280000419005000080079";

/// Parse a puzzle string: 81 cells in row-major order, where '1'..'9' are
/// givens and '.', '0', or ' ' mark empty cells. Line breaks are ignored so
/// multi-line grids paste cleanly.
pub fn parse(input: &str) -> Result<Board> {
    let cells: Vec<char> = input.chars().filter(|c| !matches!(c, '\n' | '\r')).collect();
    ensure!(
        cells.len() == 81,
        "puzzle must have exactly 81 cells, got {}",
        cells.len()
    );

    let mut grid = [[None; 9]; 9];
    for (i, ch) in cells.into_iter().enumerate() {
        grid[i / 9][i % 9] = match ch {
            '.' | '0' | ' ' => None,
            '1'..='9' => Some(ch as u8 - b'0'),
            other => bail!("invalid cell {:?} at position {}", other, i),
        };
    }

    Ok(Board::from_givens(grid)?)
}

/// The board the program solves when no puzzle argument is given.
pub fn default_board() -> Board {
    parse(DEFAULT_PUZZLE).expect("built-in puzzle is well-formed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sudoku_engine::Position;

    #[test]
    fn parses_the_default_puzzle() {
        let board = default_board();
        assert_eq!(board.get(Position::new(0, 0)), Some(5));
        assert_eq!(board.get(Position::new(0, 2)), None);
        assert!(board.is_fixed(Position::new(0, 0)));
        assert_eq!(board.conflict_count(), 0);
        assert_eq!(board.empty_cells().len(), 51);
    }

    #[test]
    fn accepts_dots_zeros_and_spaces_as_empty() {
        let dots = ".".repeat(81);
        let zeros = "0".repeat(81);
        let spaces = " ".repeat(81);
        for input in [dots, zeros, spaces] {
            let board = parse(&input).unwrap();
            assert_eq!(board.empty_cells().len(), 81);
        }
    }

    #[test]
    fn ignores_line_breaks() {
        let mut lines = String::new();
        for chunk in DEFAULT_PUZZLE.as_bytes().chunks(9) {
            lines.push_str(std::str::from_utf8(chunk).unwrap());
            lines.push('\n');
        }
        let board = parse(&lines).unwrap();
        assert_eq!(board.empty_cells().len(), 51);
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(parse("530").is_err());
    }

    #[test]
    fn rejects_invalid_characters() {
        let mut bad = DEFAULT_PUZZLE.to_string();
        bad.replace_range(10..11, "x");
        let err = parse(&bad).unwrap_err();
        assert!(err.to_string().contains("invalid cell"));
    }
}
