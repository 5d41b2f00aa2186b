//! Styled grid output. Givens print bold and colored so they stand apart
//! from the solver's tentative digits, mirroring the board frame used by
//! the engine's plain `Display`.

use crossterm::{
    execute,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};
use std::io::{self, Write};
use sudoku_engine::{Board, Position};

const FRAME: &str = "=========================";

pub fn print_board(board: &Board) -> io::Result<()> {
    let mut stdout = io::stdout();
    for row in 0..9 {
        if row % 3 == 0 {
            execute!(stdout, Print(FRAME), Print("\n"))?;
        }
        execute!(stdout, Print("| "))?;
        for col in 0..9 {
            let pos = Position::new(row, col);
            match board.get(pos) {
                Some(d) if board.is_fixed(pos) => execute!(
                    stdout,
                    SetAttribute(Attribute::Bold),
                    SetForegroundColor(Color::Cyan),
                    Print(d),
                    SetAttribute(Attribute::Reset),
                    ResetColor
                )?,
                Some(d) => execute!(stdout, Print(d))?,
                None => execute!(stdout, Print(' '))?,
            }
            if col % 3 == 2 {
                execute!(stdout, Print(" | "))?;
            } else {
                execute!(stdout, Print(' '))?;
            }
        }
        execute!(stdout, Print("\n"))?;
    }
    execute!(stdout, Print(FRAME), Print("\n"))?;
    stdout.flush()
}
