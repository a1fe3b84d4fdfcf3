use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{GameConfig, SelfCollision};
use crate::food::quantized_position;
use crate::input::{Direction, Key, direction_change_is_valid};
use crate::snake::{Cell, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    /// Waiting for the first key press.
    Idle,
    Running,
    /// Stopped by a collision; only a fresh game leaves this state.
    Terminated,
}

/// Why a game stopped.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Termination {
    Wall,
    SelfCollision,
}

/// Immutable snapshot of one game.
///
/// Engine operations take a snapshot and return the next one; the shell
/// keeps the latest value and draws from it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Cell,
    pub score: u32,
    pub status: GameStatus,
    pub termination: Option<Termination>,
    pub tick_count: u64,
}

impl GameState {
    /// State before the first game: no snake, food at the origin.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            snake: Snake::empty(),
            food: Cell { x: 0, y: 0 },
            score: 0,
            status: GameStatus::Idle,
            termination: None,
            tick_count: 0,
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::empty()
    }
}

/// Applies the game rules to state snapshots.
#[derive(Debug, Clone)]
pub struct Engine {
    config: GameConfig,
    rng: StdRng,
}

impl Engine {
    /// Creates an engine, seeding food placement from `config.seed` when set.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    /// Creates a deterministic engine for tests and reproducible runs.
    #[must_use]
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Sets up a new game unless `state` already has a snake.
    #[must_use]
    pub fn init_game(&self, state: &GameState) -> GameState {
        if !state.snake.is_empty() {
            return state.clone();
        }

        let start = self.config.start_cell();
        GameState {
            snake: Snake::stacked(
                start,
                usize::from(self.config.start_node_count),
                Direction::Down,
            ),
            food: self.config.start_food(),
            ..GameState::empty()
        }
    }

    /// Moves the food to a fresh cell on the food lattice.
    #[must_use]
    pub fn place_food(&mut self, state: &GameState) -> GameState {
        let mut next = state.clone();
        next.food = quantized_position(&mut self.rng, self.config.grid());
        next
    }

    /// Adds one tail segment and one point.
    #[must_use]
    pub fn grow_snake(&self, state: &GameState) -> GameState {
        let mut next = state.clone();
        if next.snake.grow_tail() {
            next.score += 1;
        }
        next
    }

    /// Applies a key press.
    ///
    /// Arrow keys turn the snake unless they would reverse it. Any key
    /// starts an idle game. Terminated and uninitialised games ignore input.
    #[must_use]
    pub fn set_direction(&self, state: &GameState, key: &Key) -> GameState {
        if state.status == GameStatus::Terminated || state.snake.is_empty() {
            return state.clone();
        }

        let mut next = state.clone();
        if let Some(requested) = key.direction() {
            let current = next.snake.direction();
            if direction_change_is_valid(current, requested) {
                if requested != current {
                    debug!("direction {current:?} -> {requested:?}");
                }
                next.snake.set_direction(requested);
            }
        }

        if next.status == GameStatus::Idle {
            info!("game started");
            next.status = GameStatus::Running;
        }
        next
    }

    /// Advances a running game by one tick.
    ///
    /// Food, wall and body checks all look at the head before it moves, so
    /// a head that stepped off the grid is only caught on the next tick.
    #[must_use]
    pub fn advance_tick(&mut self, state: &GameState) -> GameState {
        if !state.is_running() {
            return state.clone();
        }
        let Some(head) = state.snake.head() else {
            return state.clone();
        };

        let mut next = state.clone();

        if head == next.food {
            next = self.grow_snake(&next);
            next = self.place_food(&next);
            debug!(
                "food eaten at ({}, {}), score {}, next food at ({}, {})",
                head.x, head.y, next.score, next.food.x, next.food.y
            );
        }

        if !head.is_within(self.config.grid()) {
            return terminate(next, Termination::Wall);
        }

        if self.hits_body(&next) {
            return terminate(next, Termination::SelfCollision);
        }

        next.snake.slither();
        next.tick_count += 1;
        next
    }

    fn hits_body(&self, state: &GameState) -> bool {
        match self.config.self_collision {
            SelfCollision::Legacy => false,
            // A fresh snake is stacked on one cell until its first move.
            SelfCollision::Coordinates => {
                state.tick_count > 0 && state.snake.head_overlaps_body()
            }
        }
    }
}

fn terminate(mut state: GameState, reason: Termination) -> GameState {
    info!(
        "game over ({reason:?}) after {} ticks, score {}",
        state.tick_count, state.score
    );
    state.status = GameStatus::Terminated;
    state.termination = Some(reason);
    state
}
