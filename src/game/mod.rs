//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The engine owns the whole state; callers drive it with `tick()` and read it back
//! through `state()`.

pub mod action;
pub mod config;
pub mod engine;
pub mod input_queue;
pub mod obstacles;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::{CELL_SIZE, CellSize, GameConfig, Level, ObstacleLayout, fit_grid};
pub use engine::{GameEngine, TickResult};
pub use input_queue::{EnqueueOutcome, InputQueue};
pub use obstacles::ObstacleSet;
pub use state::{CollisionType, GameMode, GameState, Position, Snake};
