use std::{fmt, io, thread::sleep, time::Instant};

use crate::config::GameConfig;
use crate::food::Food;
use crate::render;
use crate::snake::{Snake, Direction::{*, self}};
use crate::term::TermManager;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, info};
use rand::{rngs::ThreadRng, Rng};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Quit,
}

impl Command {
    pub fn from_char(ch: char) -> Option<Command> {
        match ch.to_ascii_lowercase() {
            'w' => Some(Command::Turn(Up)),
            'a' => Some(Command::Turn(Left)),
            's' => Some(Command::Turn(Down)),
            'd' => Some(Command::Turn(Right)),
            'q' => Some(Command::Quit),
            _ => None,
        }
    }

    pub fn from_key_event(ev: &KeyEvent) -> Option<Command> {
        if ev.kind != KeyEventKind::Press {
            return None;
        }

        match ev.code {
            _ if is_ctrl_c(ev) => Some(Command::Quit),
            KeyCode::Char(ch) => Command::from_char(ch),
            KeyCode::Up => Some(Command::Turn(Up)),
            KeyCode::Left => Some(Command::Turn(Left)),
            KeyCode::Down => Some(Command::Turn(Down)),
            KeyCode::Right => Some(Command::Turn(Right)),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Crash {
    Border,
    Itself,
}

impl fmt::Display for Crash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Crash::Border => write!(f, "hit the border"),
            Crash::Itself => write!(f, "ran into itself"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameEnd {
    Quit,
    Crashed { cause: Crash, score: usize },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Running,
    Over(GameEnd),
}

pub struct SnakeGame<R = ThreadRng> {
    config: GameConfig,
    snake: Snake,
    food: Food,
    rng: R,
}

impl SnakeGame<ThreadRng> {
    pub fn new(config: GameConfig) -> Self {
        SnakeGame::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> SnakeGame<R> {
    pub fn with_rng(config: GameConfig, mut rng: R) -> Self {
        let snake = Snake::new(config.center(), config.cell_count());
        let food = Food::new(&mut rng, config.food_count, config.height, config.width);
        SnakeGame { config, snake, food, rng }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn score(&self) -> usize {
        self.snake.len() - 1
    }

    /// Runs the fixed-rate loop until the player quits or the snake crashes.
    pub fn play(&mut self, term: &mut TermManager) -> io::Result<GameEnd> {
        info!(
            "New game on a {}x{} grid, {} food, {:?} per tick",
            self.config.height, self.config.width, self.config.food_count, self.config.tick_period
        );

        loop {
            let tick_start = Instant::now();

            let command = term.poll_key()?.and_then(|ev| Command::from_key_event(&ev));

            let outcome = self.step(command);
            if outcome == TickOutcome::Over(GameEnd::Quit) {
                return Ok(GameEnd::Quit);
            }

            // A crash still gets its last frame drawn
            term.draw_frame(&render::frame(&self.config, self.snake(), self.food()))?;
            if let TickOutcome::Over(end) = outcome {
                return Ok(end);
            }

            sleep(self.config.tick_period.saturating_sub(tick_start.elapsed()));
        }
    }

    /// Advances the game by one tick.
    pub fn step(&mut self, command: Option<Command>) -> TickOutcome {
        match command {
            Some(Command::Quit) => return TickOutcome::Over(GameEnd::Quit),
            Some(Command::Turn(dir)) => {
                if !self.snake.set_direction(dir) {
                    debug!("Ignored {:?} while heading {:?}", dir, self.snake.get_direction());
                }
            }
            None => {}
        }

        // Nothing moves until the first direction key
        let step = match self.snake.move_step() {
            Some(step) => step,
            None => return TickOutcome::Running,
        };

        let (row, col) = step.new_head;
        if row == 0 || col == 0 || row >= self.config.height || col >= self.config.width {
            return self.crash(Crash::Border);
        }

        let (height, width) = (self.config.height, self.config.width);
        let eaten = self.food.eat_at(step.new_head, &mut self.rng, height, width);
        for _ in 0..eaten {
            self.snake.grow(step.old_tail);
        }
        if eaten > 0 {
            debug!("Ate {} food at {:?}, length now {}", eaten, step.new_head, self.snake.len());
        }

        if self.snake.hits_itself() {
            return self.crash(Crash::Itself);
        }

        TickOutcome::Running
    }

    fn crash(&self, cause: Crash) -> TickOutcome {
        info!("Snake {} at {:?}", cause, self.snake.head());
        TickOutcome::Over(GameEnd::Crashed { cause, score: self.score() })
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers, .. } if modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::food::place_food;
    use rand::{rngs::StdRng, SeedableRng};

    const SEED: u64 = 0x5EED_5A4E;

    /// A default-sized game with every food item parked in the top-left corner.
    fn new_game() -> SnakeGame<StdRng> {
        let mut game = SnakeGame::with_rng(GameConfig::default(), StdRng::seed_from_u64(SEED));
        for i in 0..game.food.items().len() {
            game.food.set(i, (1, 1));
        }
        game
    }

    fn press(game: &mut SnakeGame<StdRng>, keys: &str) -> TickOutcome {
        let mut outcome = TickOutcome::Running;
        for ch in keys.chars() {
            outcome = game.step(Command::from_char(ch));
        }
        outcome
    }

    #[test]
    fn starts_at_center_with_zero_score() {
        let game = new_game();
        assert_eq!(game.snake().head(), (10, 15));
        assert_eq!(game.snake().len(), 1);
        assert_eq!(game.score(), 0);
        assert_eq!(game.food().items().len(), 5);
    }

    #[test]
    fn initial_food_is_inside_the_border() {
        for seed in 0..50 {
            let game = SnakeGame::with_rng(GameConfig::default(), StdRng::seed_from_u64(seed));
            for &(row, col) in game.food().items() {
                assert!(row >= 1 && row <= 19 && col >= 1 && col <= 29);
            }
        }
    }

    #[test]
    fn stays_put_until_a_direction_is_pressed() {
        let mut game = new_game();
        for _ in 0..5 {
            assert_eq!(game.step(None), TickOutcome::Running);
        }
        assert_eq!(game.snake().head(), (10, 15));
        assert_eq!(game.step(Command::from_char('x')), TickOutcome::Running);
        assert_eq!(game.snake().head(), (10, 15));
    }

    #[test]
    fn three_rights_move_three_cells() {
        let mut game = new_game();
        assert_eq!(press(&mut game, "ddd"), TickOutcome::Running);
        assert_eq!(game.snake().head(), (10, 18));
        assert_eq!(game.snake().len(), 1);
    }

    #[test]
    fn keeps_direction_without_input() {
        let mut game = new_game();
        press(&mut game, "s");
        game.step(None);
        game.step(None);
        assert_eq!(game.snake().head(), (13, 15));
    }

    #[test]
    fn immediate_reversal_is_ignored() {
        let mut game = new_game();
        press(&mut game, "da");
        assert_eq!(game.snake().get_direction(), Some(Right));
        assert_eq!(game.snake().head(), (10, 17));

        press(&mut game, "wsa");
        assert_eq!(game.snake().get_direction(), Some(Left));
        assert_eq!(game.snake().head(), (8, 16));
    }

    #[test]
    fn head_moves_one_cell_along_one_axis() {
        let mut game = new_game();
        let mut keys = StdRng::seed_from_u64(SEED);
        let (mut row, mut col) = game.snake().head();
        press(&mut game, "w");
        loop {
            let (new_row, new_col) = game.snake().head();
            let dist = (new_row as i32 - row as i32).abs() + (new_col as i32 - col as i32).abs();
            assert_eq!(dist, 1);
            row = new_row;
            col = new_col;

            let key = ['w', 'a', 's', 'd', '.'][keys.gen_range(0..5)];
            if game.step(Command::from_char(key)) != TickOutcome::Running {
                break;
            }
        }
    }

    #[test]
    fn border_ends_the_game_exactly_on_the_border() {
        let mut game = new_game();
        for _ in 0..9 {
            assert_eq!(press(&mut game, "w"), TickOutcome::Running);
        }
        assert_eq!(game.snake().head(), (1, 15));
        assert_eq!(
            game.step(None),
            TickOutcome::Over(GameEnd::Crashed { cause: Crash::Border, score: 0 })
        );
        assert_eq!(game.snake().head(), (0, 15));
    }

    #[test]
    fn right_and_bottom_borders() {
        let mut game = new_game();
        press(&mut game, "ddddddddddddd");
        assert_eq!(game.snake().head(), (10, 28));
        assert_eq!(press(&mut game, "d"), TickOutcome::Running);
        assert!(matches!(press(&mut game, "d"), TickOutcome::Over(GameEnd::Crashed { cause: Crash::Border, .. })));

        let mut game = new_game();
        press(&mut game, "sssssssss");
        assert_eq!(game.snake().head(), (19, 15));
        assert!(matches!(press(&mut game, "s"), TickOutcome::Over(GameEnd::Crashed { cause: Crash::Border, .. })));
    }

    #[test]
    fn eating_grows_by_one_and_relocates_that_food() {
        let mut game = new_game();
        game.food.set(2, (10, 16));

        let expected = place_food(&mut game.rng.clone(), 20, 30);
        assert_eq!(press(&mut game, "d"), TickOutcome::Running);

        assert_eq!(game.snake().len(), 2);
        assert_eq!(game.score(), 1);
        assert_eq!(game.food().items()[2], expected);
        assert_eq!(game.food().items()[0], (1, 1));
        assert_eq!(game.snake().body().iter().copied().collect::<Vec<_>>(), vec![(10, 16), (10, 15)]);
    }

    #[test]
    fn stacked_food_is_all_eaten() {
        let mut game = new_game();
        game.food.set(0, (9, 15));
        game.food.set(4, (9, 15));
        press(&mut game, "w");
        assert_eq!(game.snake().len(), 3);
        assert_eq!(game.score(), 2);
    }

    #[test]
    fn reversal_is_ignored_with_a_long_body() {
        let mut game = new_game();
        game.food.set(0, (10, 16));
        game.food.set(1, (10, 17));
        press(&mut game, "dd");
        assert!(game.snake().len() >= 3);
        assert_eq!(press(&mut game, "a"), TickOutcome::Running);
        assert_eq!(game.snake().head(), (10, 18));
    }

    #[test]
    fn running_into_the_body_ends_the_game() {
        let mut game = new_game();
        for (i, col) in (16..=19).enumerate() {
            game.food.set(i, (10, col));
        }
        assert_eq!(press(&mut game, "ddddsa"), TickOutcome::Running);
        assert!(matches!(
            press(&mut game, "w"),
            TickOutcome::Over(GameEnd::Crashed { cause: Crash::Itself, .. })
        ));
    }

    #[test]
    fn quit_stops_the_game() {
        let mut game = new_game();
        press(&mut game, "dd");
        assert_eq!(game.step(Command::from_char('q')), TickOutcome::Over(GameEnd::Quit));
        assert_eq!(game.snake().head(), (10, 17));
    }

    #[test]
    fn key_events_map_to_commands() {
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(Command::from_key_event(&key(KeyCode::Char('w'))), Some(Command::Turn(Up)));
        assert_eq!(Command::from_key_event(&key(KeyCode::Char('D'))), Some(Command::Turn(Right)));
        assert_eq!(Command::from_key_event(&key(KeyCode::Left)), Some(Command::Turn(Left)));
        assert_eq!(Command::from_key_event(&key(KeyCode::Down)), Some(Command::Turn(Down)));
        assert_eq!(Command::from_key_event(&key(KeyCode::Char('q'))), Some(Command::Quit));
        assert_eq!(Command::from_key_event(&key(KeyCode::Char('x'))), None);
        assert_eq!(Command::from_key_event(&key(KeyCode::Enter)), None);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(Command::from_key_event(&ctrl_c), Some(Command::Quit));

        let mut release = key(KeyCode::Char('w'));
        release.kind = KeyEventKind::Release;
        assert_eq!(Command::from_key_event(&release), None);
    }
}
