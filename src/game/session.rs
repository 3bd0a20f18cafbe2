use std::collections::HashSet;
use std::time::Duration;

use rand::rngs::ThreadRng;
use rand::Rng;

use super::{
    config::GameConfig,
    direction::Direction,
    food::place_food,
    grid::{Cell, Grid},
    snake::{Segment, Snake},
};
use crate::error::GameError;
use crate::leaderboard::Leaderboard;

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Snake left the grid
    Wall,
    /// Snake ran into itself
    SelfCollision,
    /// Snake covers every cell, nowhere left for food
    BoardFull,
}

/// Session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No game started yet
    Idle,
    Running,
    GameOver(EndReason),
}

/// Result of one movement step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// Session is not running, nothing moved
    Ignored,
    /// Snake moved onto an empty cell
    Moved,
    /// Snake ate the food; `interval` is the tick interval from now on
    Ate { interval: Duration },
    /// Step ended the game
    Ended(EndReason),
}

/// Result of a direction change request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnResult {
    /// Session is not running
    Ignored,
    /// Request was the reverse of the current heading
    Rejected,
    /// Already heading that way
    Unchanged,
    /// Heading changed and the snake took an extra step
    Turned(StepResult),
}

/// What the front end shows once a game is over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverSignal {
    /// Score earns a leaderboard place; ask for a name before submitting
    NewHighScore { score: u32 },
    Final { score: u32 },
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Segments oldest-first, head last
    pub segments: Vec<Segment>,
    pub food: Option<Cell>,
    pub score: u32,
    pub tick_interval: Duration,
    pub columns: i32,
    pub rows: i32,
    pub phase: Phase,
}

/// One game session: owns the snake, food, score and speed.
///
/// `tick` and `set_direction` each apply one complete state transition, so
/// a timer tick and a key-triggered move can never interleave.
pub struct Session<R = ThreadRng> {
    config: GameConfig,
    grid: Grid,
    rng: R,
    phase: Phase,
    snake: Snake,
    food: Option<Cell>,
    direction: Direction,
    score: u32,
    tick_interval: Duration,
}

impl Session<ThreadRng> {
    /// Create an idle session with the given configuration
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> Session<R> {
    /// Create an idle session drawing food positions from `rng`
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, GameError> {
        let grid = config.validate()?;
        let snake = Snake::new(config.start_cell, Direction::Right, config.initial_snake_length);
        let tick_interval = config.start_interval();

        Ok(Self {
            config,
            grid,
            rng,
            phase: Phase::Idle,
            snake,
            food: None,
            direction: Direction::Right,
            score: 0,
            tick_interval,
        })
    }

    /// Reset to a fresh game and start running, from any phase
    pub fn start_new_game(&mut self) {
        self.score = 0;
        self.direction = Direction::Right;
        self.tick_interval = self.config.start_interval();
        self.snake = Snake::new(
            self.config.start_cell,
            self.direction,
            self.config.initial_snake_length,
        );
        // A validated config always leaves a free cell next to a fresh snake
        self.food = self.spawn_food().ok();
        self.phase = Phase::Running;

        tracing::info!(
            columns = self.grid.columns(),
            rows = self.grid.rows(),
            "new game started"
        );
    }

    /// Advance one tick along the current heading
    pub fn tick(&mut self) -> StepResult {
        if self.phase != Phase::Running {
            return StepResult::Ignored;
        }
        self.step()
    }

    /// Request a new heading.
    ///
    /// An accepted turn moves the snake immediately, on top of the regular
    /// ticks.
    pub fn set_direction(&mut self, direction: Direction) -> TurnResult {
        if self.phase != Phase::Running {
            return TurnResult::Ignored;
        }
        if self.direction.is_opposite(direction) {
            return TurnResult::Rejected;
        }
        if self.direction == direction {
            return TurnResult::Unchanged;
        }

        self.direction = direction;
        TurnResult::Turned(self.step())
    }

    /// Move once, then resolve food, walls and self collision in that order
    fn step(&mut self) -> StepResult {
        let head = self.snake.advance(self.direction);

        if self.food == Some(head) {
            self.score += 1;
            self.snake.grow();
            self.tick_interval = self.config.next_interval(self.tick_interval);

            tracing::debug!(score = self.score, interval = ?self.tick_interval, "food eaten");

            return match self.spawn_food() {
                Ok(cell) => {
                    self.food = Some(cell);
                    StepResult::Ate {
                        interval: self.tick_interval,
                    }
                }
                Err(_) => {
                    self.food = None;
                    self.end(EndReason::BoardFull)
                }
            };
        }

        if !self.grid.contains(head) {
            return self.end(EndReason::Wall);
        }

        if self.snake.collides_with_body(head) {
            return self.end(EndReason::SelfCollision);
        }

        StepResult::Moved
    }

    fn end(&mut self, reason: EndReason) -> StepResult {
        self.phase = Phase::GameOver(reason);
        tracing::info!(score = self.score, ?reason, "game over");
        StepResult::Ended(reason)
    }

    fn spawn_food(&mut self) -> Result<Cell, GameError> {
        let occupied: HashSet<Cell> = self.snake.segments().map(|s| s.cell).collect();
        place_food(&mut self.rng, &self.grid, &occupied)
    }

    /// How the game-over screen should proceed, once the game has ended
    pub fn game_over_signal(&self, leaderboard: &Leaderboard) -> Option<GameOverSignal> {
        if !matches!(self.phase, Phase::GameOver(_)) {
            return None;
        }

        let score = self.score;
        Some(if leaderboard.qualifies(score) {
            GameOverSignal::NewHighScore { score }
        } else {
            GameOverSignal::Final { score }
        })
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            segments: self.snake.segments().copied().collect(),
            food: self.food,
            score: self.score,
            tick_interval: self.tick_interval,
            columns: self.grid.columns(),
            rows: self.grid.rows(),
            phase: self.phase,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
