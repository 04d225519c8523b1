//! Snake Mania - grid snake with walls, levels and a terminal UI
//!
//! This library provides:
//! - Core game logic (game module): simulation engine, input queue, obstacles
//! - A fixed-period tick scheduler (scheduler module)
//! - Key handling, TUI rendering and session metrics
//! - The interactive play mode (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod scheduler;
pub mod settings;
