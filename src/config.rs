//! Compile-time game settings.

use std::time::Duration;

use crate::{Coords, GridInt};

/// Index of the bottom border row. Playable rows are `1..GRID_HEIGHT`.
pub const GRID_HEIGHT: GridInt = 20;
/// Index of the right border column. Playable columns are `1..GRID_WIDTH`.
pub const GRID_WIDTH: GridInt = 30;
pub const FOOD_COUNT: usize = 5;
pub const TICK_PERIOD_MS: u64 = 125;

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub height: GridInt,
    pub width: GridInt,
    pub food_count: usize,
    pub tick_period: Duration,
}

impl GameConfig {
    /// Upper bound on the snake's length: every cell of the grid, border included.
    pub fn cell_count(&self) -> usize {
        self.height as usize * self.width as usize
    }

    pub fn center(&self) -> Coords {
        (self.height / 2, self.width / 2)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            height: GRID_HEIGHT,
            width: GRID_WIDTH,
            food_count: FOOD_COUNT,
            tick_period: Duration::from_millis(TICK_PERIOD_MS),
        }
    }
}
