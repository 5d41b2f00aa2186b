mod puzzle;
mod render;

use clap::Parser;
use std::time::{Duration, Instant};
use sudoku_engine::Solver;

/// Animated MRV backtracking Sudoku solver.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Puzzle as 81 row-major cells; '.', '0', or ' ' mark empty cells.
    /// Omit to solve the built-in puzzle.
    puzzle: Option<String>,

    /// Pause between animation frames, in milliseconds
    #[arg(long, default_value_t = 150)]
    delay_ms: u64,

    /// Print only the starting grid and the result, skipping the animation
    #[arg(long)]
    no_animate: bool,

    /// Print only the outcome line
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let board = match &cli.puzzle {
        Some(s) => puzzle::parse(s)?,
        None => puzzle::default_board(),
    };
    log::debug!(
        "starting with {} givens, {} empty cells, delay {}ms",
        81 - board.empty_cells().len(),
        board.empty_cells().len(),
        cli.delay_ms
    );

    if !cli.quiet {
        render::print_board(&board)?;
    }

    let animate = !cli.quiet && !cli.no_animate;
    let delay = Duration::from_millis(cli.delay_ms);
    let started = Instant::now();
    let mut moves = 0u64;

    let solution = Solver::new().solve_observed(&board, |tentative| {
        moves += 1;
        if animate {
            let _ = render::print_board(tentative);
            std::thread::sleep(delay);
        }
    });

    log::info!(
        "explored {} tentative moves in {:.2?}",
        moves,
        started.elapsed()
    );

    match solution {
        Some(solved) => {
            if !cli.quiet {
                render::print_board(&solved)?;
            }
            println!("Puzzle solved! B)");
            Ok(())
        }
        None => {
            println!("Failed to solve.");
            std::process::exit(1);
        }
    }
}
