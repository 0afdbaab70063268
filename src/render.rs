//! Builds the text of one full frame. Drawing has no effect on game state.

use crate::config::GameConfig;
use crate::food::Food;
use crate::snake::Snake;
use crate::Coords;

// Two columns per cell keeps the grid roughly square
const BORDER_CELL: &str = "##";
const SNAKE_CELL: &str = "[]";
const FOOD_CELL: &str = "@@";
const EMPTY_CELL: &str = "  ";

// Raw mode does not translate \n into a carriage return
const NEWLINE: &str = "\r\n";

const HEADER: &[&str] = &[
    "",
    "\tGame over on collision with yourself or the borders!",
    "\tUse WASD or the arrow keys to move, Q to quit.",
];

pub fn frame(config: &GameConfig, snake: &Snake, food: &Food) -> String {
    let cells = (config.height as usize + 1) * (config.width as usize + 1);
    let mut out = String::with_capacity(cells * 2 + 256);

    for line in HEADER {
        out.push_str(line);
        out.push_str(NEWLINE);
    }

    for row in 0..=config.height {
        for col in 0..=config.width {
            out.push_str(cell(config, snake, food, (row, col)));
        }
        out.push_str(NEWLINE);
    }

    out.push_str(&format!("Score: {}", snake.len() - 1));
    out.push_str(NEWLINE);
    out
}

/// Border beats snake, snake beats food.
fn cell(config: &GameConfig, snake: &Snake, food: &Food, pos: Coords) -> &'static str {
    let (row, col) = pos;

    if row == 0 || col == 0 || row == config.height || col == config.width {
        BORDER_CELL
    } else if snake.body().contains(&pos) {
        SNAKE_CELL
    } else if food.items().contains(&pos) {
        FOOD_CELL
    } else {
        EMPTY_CELL
    }
}
