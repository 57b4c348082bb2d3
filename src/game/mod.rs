//! Core game logic module for Snake
//!
//! This module contains the board and the snake state machine without any I/O
//! or rendering dependencies. A driver advances it with [`SnakeEngine::step`]
//! at a fixed cadence and steers it with [`SnakeEngine::redirect`].

pub mod config;
pub mod direction;
pub mod engine;
pub mod grid;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{SnakeEngine, StepOutcome};
pub use grid::{BOARD_HEIGHT, BOARD_WIDTH, CellCode, GridStore, Position};
