use std::collections::VecDeque;

use crate::Coords;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

/// Result of a single move: where the head went and which cell the tail gave up.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub new_head: Coords,
    pub old_tail: Coords,
}

pub struct Snake {
    // Index 0 is the head
    body: VecDeque<Coords>,
    direction: Option<Direction>,
}

impl Snake {
    /// A length-1 snake that waits for its first direction before moving.
    pub fn new(pos: Coords, max_len: usize) -> Self {
        let mut body = VecDeque::with_capacity(max_len);
        body.push_back(pos);
        Snake { body, direction: None }
    }

    pub fn body(&self) -> &VecDeque<Coords> {
        &self.body
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub(crate) fn len(&self) -> usize {
        self.body.len()
    }

    pub fn get_direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Accepts `new_direction` unless it reverses the current one.
    /// Returns whether the direction was taken.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        match self.direction {
            Some(current) if current == new_direction.opposite() => false,
            _ => {
                self.direction = Some(new_direction);
                true
            }
        }
    }

    /// Every segment takes the place of the one ahead of it and the head moves one
    /// cell. Returns `None` while no direction has been accepted yet.
    pub fn move_step(&mut self) -> Option<Step> {
        let direction = self.direction?;
        let (row, col) = self.head();

        let new_head = match direction {
            Up => (row.saturating_sub(1), col),
            Down => (row + 1, col),
            Left => (row, col.saturating_sub(1)),
            Right => (row, col + 1),
        };

        self.body.push_front(new_head);
        let old_tail = self.body.pop_back().unwrap_or(new_head);

        Some(Step { new_head, old_tail })
    }

    /// Adds a segment on the cell the tail just left.
    pub fn grow(&mut self, old_tail: Coords) {
        self.body.push_back(old_tail);
    }

    pub fn hits_itself(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|pos| *pos == head)
    }
}
