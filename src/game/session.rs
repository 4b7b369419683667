//! Menu / playing / game-over state machine around the engine.
//!
//! The session owns everything that lives longer than one game (best score,
//! selected mode, engine) and reports to a [`GameObserver`], which stands in
//! for the renderer, the score display and the game-over notice.

use log::{error, info};
use std::time::Duration;

use super::{
    action::Direction,
    config::GameConfig,
    engine::{EndReason, GameEngine},
    mode::GameMode,
    state::{GameState, Scoreboard, Snapshot},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Menu,
    Playing,
    GameOver,
    Exited,
}

/// Receiver of everything the session produces for the outside world
pub trait GameObserver {
    /// A tick finished; draw this
    fn on_frame(&mut self, _snapshot: &Snapshot) {}

    /// Score changed (game start or food eaten)
    fn on_score(&mut self, _scores: Scoreboard) {}

    fn on_game_over(&mut self, _reason: EndReason, _scores: Scoreboard) {}

    fn on_phase(&mut self, _phase: Phase) {}
}

impl GameObserver for () {}

/// What the scheduler has to do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No game running, nothing happened
    Idle,
    Continue,
    /// Keep going at a new period
    Reschedule(Duration),
    /// Stop ticking
    GameOver(EndReason),
}

pub struct Session<O: GameObserver> {
    engine: GameEngine,
    state: Option<GameState>,
    scores: Scoreboard,
    mode: GameMode,
    phase: Phase,
    last_end: Option<EndReason>,
    observer: O,
}

impl<O: GameObserver> Session<O> {
    pub fn new(config: GameConfig, observer: O) -> Self {
        Self {
            engine: GameEngine::new(config),
            state: None,
            scores: Scoreboard::new(),
            mode: GameMode::default(),
            phase: Phase::Menu,
            last_end: None,
            observer,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn scores(&self) -> Scoreboard {
        self.scores
    }

    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn tick_interval(&self) -> Duration {
        self.engine.tick_interval()
    }

    pub fn last_end(&self) -> Option<EndReason> {
        self.last_end
    }

    pub fn snapshot(&self) -> Option<Snapshot> {
        self.state.as_ref().map(GameState::snapshot)
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Choose the rule set for the next game; only honoured in the menu
    ///
    /// Picking a mode also restores the initial tick interval.
    pub fn select_mode(&mut self, mode: GameMode) -> bool {
        if self.phase != Phase::Menu {
            return false;
        }
        self.mode = mode;
        self.engine.reset_tick_interval();
        info!("selected {:?} mode", mode);
        true
    }

    /// Start a game from the menu or the game-over screen
    ///
    /// Returns the period the scheduler has to tick at.
    pub fn start_game(&mut self) -> Option<Duration> {
        if !matches!(self.phase, Phase::Menu | Phase::GameOver) {
            return None;
        }

        self.scores.reset_current();
        self.observer.on_score(self.scores);
        self.last_end = None;

        match self.engine.new_game(self.mode) {
            Ok(state) => {
                self.observer.on_frame(&state.snapshot());
                self.state = Some(state);
                self.set_phase(Phase::Playing);
                info!(
                    "started {:?} game at {:?} per tick",
                    self.mode,
                    self.engine.tick_interval()
                );
                Some(self.engine.tick_interval())
            }
            Err(err) => {
                error!("cannot start game: {err}");
                self.end_game(EndReason::BoardFull);
                None
            }
        }
    }

    /// Steer the snake; ignored unless a game is running
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        self.engine.set_direction(direction)
    }

    /// Advance the running game by one tick
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Playing {
            return TickOutcome::Idle;
        }
        let Some(state) = self.state.as_mut() else {
            return TickOutcome::Idle;
        };

        let result = self.engine.step(state);

        if result.info.ate_food {
            self.scores.record(state.score);
            self.observer.on_score(self.scores);
        }
        self.observer.on_frame(&state.snapshot());

        if let Some(reason) = result.info.end_reason {
            self.end_game(reason);
            return TickOutcome::GameOver(reason);
        }

        match result.new_interval {
            Some(interval) => TickOutcome::Reschedule(interval),
            None => TickOutcome::Continue,
        }
    }

    fn end_game(&mut self, reason: EndReason) {
        self.last_end = Some(reason);
        self.set_phase(Phase::GameOver);
        self.observer.on_game_over(reason, self.scores);
    }

    /// Leave the running or finished game and clear the board
    pub fn return_to_menu(&mut self) -> bool {
        if !matches!(self.phase, Phase::Playing | Phase::GameOver) {
            return false;
        }
        self.state = None;
        self.set_phase(Phase::Menu);
        true
    }

    /// End the session for good
    pub fn exit(&mut self) {
        self.state = None;
        self.set_phase(Phase::Exited);
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            self.phase = phase;
            self.observer.on_phase(phase);
        }
    }
}
