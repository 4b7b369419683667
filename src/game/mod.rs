//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal front end drives it through [`Session`], tests drive it directly.

pub mod action;
pub mod config;
pub mod engine;
pub mod mode;
pub mod session;
pub mod spawn;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::GameConfig;
pub use engine::{EndReason, GameEngine, StepInfo, StepResult};
pub use mode::GameMode;
pub use session::{GameObserver, Phase, Session, TickOutcome};
pub use spawn::{SpawnError, Spawner};
pub use state::{GameState, Position, Scoreboard, Snake, Snapshot};
