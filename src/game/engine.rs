use log::{debug, info, warn};
use std::fmt;
use std::time::Duration;

use super::{
    action::Direction,
    config::GameConfig,
    mode::GameMode,
    spawn::{SpawnError, Spawner},
    state::{GameState, Snake},
};

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Head left the grid in a mode without wrap-around
    OutOfBounds,
    /// Head ran into the snake's own body
    SelfCollision,
    /// Head ran into a wall cell
    Wall,
    /// No free cell was left for the food
    BoardFull,
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            EndReason::OutOfBounds => "Hit the edge",
            EndReason::SelfCollision => "Bit yourself",
            EndReason::Wall => "Hit a wall",
            EndReason::BoardFull => "Board full",
        };
        f.write_str(text)
    }
}

/// Information about a step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Whether the head jumped to the other portal food cell
    pub teleported: bool,
    /// Why the game ended, if it did
    pub end_reason: Option<EndReason>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game has terminated
    pub terminated: bool,
    /// New tick interval the scheduler has to switch to
    pub new_interval: Option<Duration>,
    /// Additional information about the step
    pub info: StepInfo,
}

/// The game engine that handles all game logic
///
/// The engine outlives single games: the tick interval and the direction carry
/// over from one game to the next.
pub struct GameEngine {
    config: GameConfig,
    spawner: Spawner,
    direction: Direction,
    pending_direction: Option<Direction>,
    tick_interval: Duration,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            spawner: Spawner::new(config.seed),
            direction: config.initial_direction,
            pending_direction: None,
            tick_interval: config.initial_tick_interval(),
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Direction applied on the last tick
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Direction queued for the next tick
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn reset_tick_interval(&mut self) {
        self.tick_interval = self.config.initial_tick_interval();
    }

    /// Set up a fresh board for `mode`
    ///
    /// The snake is a single cell at the start position and keeps the
    /// direction it had when the previous game ended.
    pub fn new_game(&mut self, mode: GameMode) -> Result<GameState, SpawnError> {
        let snake = Snake::new(self.config.start_position);
        let mut state = GameState::new(snake, Vec::new(), mode, self.config.grid_size);
        self.pending_direction = None;
        self.spawner
            .spawn_food(&mut state, mode.food_count(self.config.portal_food_count))?;
        debug!("new {:?} game, food at {:?}", mode, state.food);
        Ok(state)
    }

    /// Queue a direction change for the next tick
    ///
    /// A reversal of the current direction is ignored. Returns whether the
    /// request was accepted.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.direction.is_opposite(direction) {
            return false;
        }
        self.pending_direction = Some(direction);
        true
    }

    /// Execute one step of the game
    pub fn step(&mut self, state: &mut GameState) -> StepResult {
        if !state.is_alive {
            return StepResult {
                terminated: true,
                new_interval: None,
                info: StepInfo::default(),
            };
        }

        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }

        // Calculate new head position; wrap-around modes fold it back right away
        let mut new_head = state.snake.head().moved_in_direction(self.direction);
        if state.mode.wraps_edges() && !state.is_in_bounds(new_head) {
            new_head = new_head.wrapped(state.grid_size);
        }

        state.snake.push_head(new_head);
        state.steps += 1;

        let mut info = StepInfo::default();
        let mut new_interval = None;

        if let Some(index) = state.food.iter().position(|food| *food == new_head) {
            state.score += 1;
            state.food.remove(index);
            info.ate_food = true;
            debug!("ate food at {:?}, score {}", new_head, state.score);

            match self.apply_eat_effect(state, &mut info) {
                Ok(interval) => new_interval = interval,
                Err(err) => {
                    warn!("ending game: {err}");
                    info.end_reason = Some(EndReason::BoardFull);
                }
            }
        } else {
            state.snake.pop_tail();
        }

        if info.end_reason.is_none() {
            info.end_reason = self.check_collision(state);
        }

        if let Some(reason) = info.end_reason {
            state.is_alive = false;
            info!(
                "{:?} game over after {} steps: {reason}, score {}",
                state.mode, state.steps, state.score
            );
        }

        StepResult {
            terminated: !state.is_alive,
            new_interval,
            info,
        }
    }

    /// Mode-specific consequences of eating; returns a changed tick interval
    fn apply_eat_effect(
        &mut self,
        state: &mut GameState,
        info: &mut StepInfo,
    ) -> Result<Option<Duration>, SpawnError> {
        let food_count = state.mode.food_count(self.config.portal_food_count);
        let mut new_interval = None;

        match state.mode {
            GameMode::Classic | GameMode::NoDie => {}
            GameMode::Speed => {
                self.tick_interval = scale_interval(self.tick_interval, self.config.speed_factor);
                new_interval = Some(self.tick_interval);
                debug!("tick interval now {:?}", self.tick_interval);
            }
            GameMode::Portal => {
                if let Some(&exit) = state.food.first() {
                    state.snake.relocate_head(exit);
                    info.teleported = true;
                    debug!("teleported to {:?}", exit);
                }
            }
            GameMode::Walls => {
                // A missing wall is not fatal, the food spawn decides
                match self.spawner.spawn_wall(state) {
                    Ok(wall) => debug!("wall spawned at {:?}", wall),
                    Err(err) => warn!("skipping wall: {err}"),
                }
            }
        }

        self.spawner.spawn_food(state, food_count)?;
        Ok(new_interval)
    }

    /// Out of bounds, then self, then walls
    fn check_collision(&self, state: &GameState) -> Option<EndReason> {
        let head = state.snake.head();

        if !state.is_in_bounds(head) {
            return Some(EndReason::OutOfBounds);
        }

        if state.mode.self_collision_is_lethal() && state.snake.collides_with_body(head) {
            return Some(EndReason::SelfCollision);
        }

        if state.walls.contains(&head) {
            return Some(EndReason::Wall);
        }

        None
    }
}

/// Scale an interval, rounded to whole nanoseconds
fn scale_interval(interval: Duration, factor: f64) -> Duration {
    Duration::from_nanos((interval.as_nanos() as f64 * factor).round() as u64)
}
