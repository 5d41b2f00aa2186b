use thiserror::Error;

/// Construction-time puzzle errors. These are configuration problems and are
/// always fatal to the construction call; nothing in the crate retries them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    /// A position declared fixed holds no digit.
    #[error("invalid puzzle: fixed cell ({row}, {col}) holds no digit")]
    EmptyFixedCell { row: usize, col: usize },

    /// A grid cell holds a digit outside 1..=9.
    #[error("invalid puzzle: cell ({row}, {col}) holds {digit}, expected 1-9")]
    DigitOutOfRange { row: usize, col: usize, digit: u8 },
}
