use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::action::Direction;
use super::state::Position;

/// Configuration for the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width and height of the square game grid
    pub grid_size: usize,
    /// Cell the single-segment snake starts on
    pub start_position: Position,
    /// Direction of the very first game; later games inherit the last one
    pub initial_direction: Direction,
    /// Milliseconds between ticks at the start of a session
    pub initial_tick_ms: u64,
    /// Tick interval multiplier applied per food eaten in speed mode
    pub speed_factor: f64,
    /// Number of food cells in portal mode
    pub portal_food_count: usize,
    /// Fixed RNG seed, random when unset
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            start_position: Position::new(10, 10),
            initial_direction: Direction::Right,
            initial_tick_ms: 500,
            speed_factor: 0.9,
            portal_food_count: 2,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a configuration with a fixed RNG seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    pub fn with_tick_ms(mut self, tick_ms: u64) -> Self {
        self.initial_tick_ms = tick_ms;
        self
    }

    pub fn initial_tick_interval(&self) -> Duration {
        Duration::from_millis(self.initial_tick_ms)
    }

    pub fn cell_count(&self) -> usize {
        self.grid_size * self.grid_size
    }
}
