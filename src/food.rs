use rand::Rng;

use crate::{Coords, GridInt};

/// A uniformly random interior cell: row in `1..height`, column in `1..width`.
/// Occupied cells are not avoided.
pub fn place_food<R: Rng>(rng: &mut R, height: GridInt, width: GridInt) -> Coords {
    (rng.gen_range(1..height), rng.gen_range(1..width))
}

/// Fixed-size set of food items. Items may share a cell with each other or the snake.
pub struct Food {
    items: Vec<Coords>,
}

impl Food {
    pub fn new<R: Rng>(rng: &mut R, count: usize, height: GridInt, width: GridInt) -> Self {
        let items = (0..count).map(|_| place_food(rng, height, width)).collect();
        Food { items }
    }

    pub fn items(&self) -> &[Coords] {
        &self.items
    }

    /// Relocates every item sitting on `pos`. Returns how many were eaten.
    pub fn eat_at<R: Rng>(&mut self, pos: Coords, rng: &mut R, height: GridInt, width: GridInt) -> usize {
        let mut eaten = 0;

        for item in self.items.iter_mut().filter(|item| **item == pos) {
            *item = place_food(rng, height, width);
            eaten += 1;
        }

        eaten
    }

    #[cfg(test)]
    pub fn set(&mut self, index: usize, pos: Coords) {
        self.items[index] = pos;
    }
}
