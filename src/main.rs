mod config;
mod food;
mod game;
mod render;
mod snake;
mod term;

use std::fs::File;

use anyhow::Context;
use log::{info, LevelFilter};
use simplelog::WriteLogger;

use crate::config::GameConfig;
use crate::game::{GameEnd, SnakeGame};
use crate::term::TermManager;

pub type GridInt = u16;
/// (row, column) in grid space. Row 0/height and column 0/width are the border.
pub type Coords = (GridInt, GridInt);

const LOG_FILE: &str = "snake.log";

fn main() -> anyhow::Result<()> {
    // stdout belongs to the game, so logs go to a file
    match File::create(LOG_FILE) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(LevelFilter::Info, simplelog::Config::default(), file) {
                eprintln!("Could not start logging: {}", e);
            }
        }
        Err(e) => eprintln!("Could not create {}: {}", LOG_FILE, e),
    }

    let config = GameConfig::default();
    let mut game = SnakeGame::new(config);

    let end = {
        let mut term = TermManager::new();
        term.setup().context("Failed to set up the terminal")?;
        let end = game.play(&mut term);
        term.restore().context("Failed to restore the terminal")?;
        end.context("Terminal I/O failed during the game")?
    };

    match end {
        GameEnd::Crashed { cause, score } => {
            info!("Game over ({}), score {}", cause, score);
            println!();
            println!("\t\t\t  GAME OVER!");
            println!("\t\t\t  Score: {}", score);
        }
        GameEnd::Quit => info!("Player quit"),
    }

    Ok(())
}
