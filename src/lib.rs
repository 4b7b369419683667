//! Mode Snake - Snake with five rule sets
//!
//! This library provides:
//! - Core game logic and the menu/game state machine (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Session statistics (metrics module)
//! - The terminal front end with its tick scheduler (app module)

pub mod app;
pub mod game;
pub mod input;
pub mod metrics;
pub mod render;
