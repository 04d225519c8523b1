use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};

use super::{
    action::Direction,
    config::{GameConfig, Level},
    input_queue::{EnqueueOutcome, InputQueue},
    obstacles::ObstacleSet,
    state::{CollisionType, GameMode, GameState, Position, Snake},
};

/// Above this share of occupied cells food is picked from the free cells
/// directly instead of by random draws
const REJECTION_FILL_LIMIT: f64 = 0.8;
/// Random draws attempted before falling back to enumerating free cells
const MAX_REJECTION_DRAWS: usize = 64;

/// Outcome of a single tick, for the renderer and the tick loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickResult {
    pub mode: GameMode,
    pub score: u32,
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Set on the tick that ended the game by collision
    pub collision: Option<CollisionType>,
    /// The snake filled every free cell, so no food could be placed
    pub board_cleared: bool,
}

/// The simulation engine. Owns the whole game state and the pending input.
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    state: GameState,
    input: InputQueue,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        let mut engine = Self {
            state: fresh_state(&config),
            input: InputQueue::for_grid(config.grid_width, config.grid_height),
            config,
            rng,
        };
        engine.state.food = engine.spawn_food();
        engine
    }

    /// Continue from an existing state
    pub fn from_state(config: GameConfig, state: GameState, rng: R) -> Self {
        Self {
            input: InputQueue::for_grid(state.grid_width, state.grid_height),
            config,
            state,
            rng,
        }
    }

    /// Start a new game: single-segment snake at the start cell heading
    /// right, score zero, obstacles rebuilt for the grid, fresh food.
    pub fn reset(&mut self, config: GameConfig) {
        info!(
            level = %config.level,
            width = config.grid_width,
            height = config.grid_height,
            "Starting new game"
        );
        self.state = fresh_state(&config);
        self.input = InputQueue::for_grid(config.grid_width, config.grid_height);
        self.config = config;
        self.state.food = self.spawn_food();
    }

    /// Reset with the current configuration
    pub fn restart(&mut self) {
        self.reset(self.config.clone());
    }

    /// Switch level. Always a full reset.
    pub fn select_level(&mut self, level: Level) {
        self.reset(self.config.clone().with_level(level));
    }

    /// Adopt new grid dimensions.
    ///
    /// Snake and food positions cannot be carried over to a different grid,
    /// so a change of size resets the game. Returns false if the size is
    /// unchanged.
    pub fn resize(&mut self, width: usize, height: usize) -> bool {
        if width == self.config.grid_width && height == self.config.grid_height {
            return false;
        }
        info!(width, height, "Grid resized, resetting");
        self.reset(self.config.clone().with_grid(width, height));
        true
    }

    /// Advance the game by one cell. Does nothing unless running.
    pub fn tick(&mut self) -> TickResult {
        if self.state.mode != GameMode::Running {
            return self.result(false, None);
        }

        let current = self.state.snake.direction;
        if let Some(next) = self.input.dequeue() {
            if self.state.snake.len() > 1 && current.is_opposite(next) {
                trace!(?current, ?next, "Dropping reversal");
            } else {
                self.state.snake.direction = next;
            }
        }

        let new_head = self
            .state
            .snake
            .head()
            .moved_in_direction(self.state.snake.direction);

        if let Some(collision) = self.check_collision(new_head) {
            self.state.mode = GameMode::Over;
            info!(
                ?collision,
                score = self.state.score,
                steps = self.state.steps,
                "Game over"
            );
            return self.result(false, Some(collision));
        }

        let ate_food = self.state.food == Some(new_head);
        self.state.snake.move_snake(ate_food);
        self.state.steps += 1;

        if ate_food {
            self.state.score += self.config.level.score_per_food();
            self.state.food = self.spawn_food();
            debug!(
                score = self.state.score,
                length = self.state.snake.len(),
                "Food eaten"
            );

            if self.state.food.is_none() {
                self.state.mode = GameMode::Over;
                info!(score = self.state.score, "Board cleared");
                return TickResult {
                    board_cleared: true,
                    ..self.result(true, None)
                };
            }
        }

        self.result(ate_food, None)
    }

    /// Pick a random free cell for the food.
    ///
    /// Draws uniformly and rejects occupied cells while the board is sparse;
    /// on crowded boards, or once the draws run out, it chooses among the
    /// enumerated free cells. `None` means the board is full.
    pub fn spawn_food(&mut self) -> Option<Position> {
        let total = self.state.cell_count();
        if total == 0 {
            return None;
        }

        let occupied = self.state.snake.len() + self.state.obstacles.len();
        if occupied as f64 <= total as f64 * REJECTION_FILL_LIMIT {
            for _ in 0..MAX_REJECTION_DRAWS {
                let candidate = Position::new(
                    self.rng.gen_range(0..self.state.grid_width) as i32,
                    self.rng.gen_range(0..self.state.grid_height) as i32,
                );
                if self.state.is_free(candidate) {
                    return Some(candidate);
                }
            }
            debug!("Food draws exhausted, enumerating free cells");
        }

        self.state.free_cells().choose(&mut self.rng)
    }

    /// Running -> Paused. Ignored in any other mode.
    pub fn pause(&mut self) -> GameMode {
        if self.state.mode == GameMode::Running {
            self.state.mode = GameMode::Paused;
            info!("Paused");
        }
        self.state.mode
    }

    /// Paused -> Running. Ignored in any other mode.
    pub fn resume(&mut self) -> GameMode {
        if self.state.mode == GameMode::Paused {
            self.state.mode = GameMode::Running;
            info!("Resumed");
        }
        self.state.mode
    }

    pub fn toggle_pause(&mut self) -> GameMode {
        match self.state.mode {
            GameMode::Running => self.pause(),
            GameMode::Paused => self.resume(),
            GameMode::Over => GameMode::Over,
        }
    }

    /// Buffer a direction change for a later tick
    pub fn queue_direction(&mut self, dir: Direction) -> EnqueueOutcome {
        let outcome = self
            .input
            .enqueue(dir, self.state.snake.direction, self.state.snake.len());
        if outcome != EnqueueOutcome::Queued {
            trace!(?dir, ?outcome, "Direction not queued");
        }
        outcome
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn mode(&self) -> GameMode {
        self.state.mode
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn pending_directions(&self) -> usize {
        self.input.len()
    }

    /// Check if the new head position causes a collision.
    /// Runs against the body before the move, tail included.
    fn check_collision(&self, pos: Position) -> Option<CollisionType> {
        if !self.state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if self.state.obstacles.contains(pos) {
            return Some(CollisionType::Obstacle);
        }

        if self.state.snake.contains(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    fn result(&self, ate_food: bool, collision: Option<CollisionType>) -> TickResult {
        TickResult {
            mode: self.state.mode,
            score: self.state.score,
            ate_food,
            collision,
            board_cleared: false,
        }
    }
}

/// State at the start of a game, without food
fn fresh_state(config: &GameConfig) -> GameState {
    let obstacles = ObstacleSet::for_grid(config.obstacles, config.grid_width, config.grid_height);
    let start = start_cell(config.grid_width, config.grid_height, &obstacles);
    let snake = Snake::new(start, Direction::Right, 1);

    GameState::new(
        snake,
        None,
        obstacles,
        config.grid_width,
        config.grid_height,
    )
}

/// Grid center, or the first free cell right of it when the center wall
/// covers the center
fn start_cell(width: usize, height: usize, obstacles: &ObstacleSet) -> Position {
    let center = Position::new((width / 2) as i32, (height / 2) as i32);
    (center.x..width as i32)
        .map(|x| Position::new(x, center.y))
        .find(|&pos| !obstacles.contains(pos))
        .unwrap_or(center)
}
