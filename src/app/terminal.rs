use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{debug, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use super::scheduler::TickScheduler;
use crate::game::{
    Direction, EndReason, GameConfig, GameMode, GameObserver, Phase, Scoreboard, Session,
    Snapshot, TickOutcome,
};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Renderer, View};

/// Observer side of the terminal: keeps what the next frame shows
#[derive(Default)]
pub struct Screen {
    pub snapshot: Snapshot,
    pub scores: Scoreboard,
    pub last_end: Option<EndReason>,
    pub metrics: GameMetrics,
}

impl GameObserver for Screen {
    fn on_frame(&mut self, snapshot: &Snapshot) {
        self.metrics.on_snake_length(snapshot.snake.len());
        self.snapshot = snapshot.clone();
    }

    fn on_score(&mut self, scores: Scoreboard) {
        self.scores = scores;
    }

    fn on_game_over(&mut self, reason: EndReason, scores: Scoreboard) {
        self.last_end = Some(reason);
        self.scores = scores;
        self.metrics.on_game_over();
    }

    fn on_phase(&mut self, phase: Phase) {
        debug!("phase -> {:?}", phase);
        match phase {
            Phase::Playing => {
                self.last_end = None;
                self.metrics.on_game_start();
            }
            Phase::Menu => self.snapshot = Snapshot::default(),
            Phase::GameOver | Phase::Exited => {}
        }
    }
}

pub struct TerminalApp {
    session: Session<Screen>,
    scheduler: TickScheduler,
    renderer: Renderer,
    input_handler: InputHandler,
}

impl TerminalApp {
    pub fn new(config: GameConfig, initial_mode: GameMode) -> Self {
        let mut session = Session::new(config, Screen::default());
        session.select_mode(initial_mode);

        Self {
            session,
            scheduler: TickScheduler::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.exit(),
                    }
                }

                // Game logic tick
                _ = self.scheduler.tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.session.observer_mut().metrics.update();
                    let screen = self.session.observer();
                    let view = View {
                        phase: self.session.phase(),
                        selected_mode: self.session.mode(),
                        snapshot: &screen.snapshot,
                        scores: screen.scores,
                        last_end: screen.last_end,
                        tick_interval: self.session.tick_interval(),
                        grid_size: self.session.engine().config().grid_size,
                        metrics: &screen.metrics,
                    };
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &view);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.exit();
                }
            }

            if self.session.phase() == Phase::Exited {
                break;
            }
        }

        info!(
            "leaving after {} games, best score {}",
            self.session.observer().metrics.games_played,
            self.session.scores().best
        );
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            let action = self.input_handler.handle_key_event(key);
            self.handle_action(action);
        }
    }

    fn handle_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Turn(direction) => match self.session.phase() {
                // Arrows move the mode cursor while in the menu
                Phase::Menu => match direction {
                    Direction::Up => self.cycle_mode(GameMode::previous),
                    Direction::Down => self.cycle_mode(GameMode::next),
                    Direction::Left | Direction::Right => {}
                },
                _ => {
                    self.session.set_direction(direction);
                }
            },
            KeyAction::Start => {
                if let Some(period) = self.session.start_game() {
                    self.scheduler.start(period);
                }
            }
            KeyAction::ReturnToMenu => {
                if self.session.return_to_menu() {
                    self.scheduler.stop();
                }
            }
            KeyAction::SelectMode(mode) => {
                self.session.select_mode(mode);
            }
            KeyAction::NextMode => self.cycle_mode(GameMode::next),
            KeyAction::PreviousMode => self.cycle_mode(GameMode::previous),
            KeyAction::Exit => self.exit(),
            KeyAction::None => {}
        }
    }

    fn cycle_mode(&mut self, step: fn(&GameMode) -> GameMode) {
        let mode = step(&self.session.mode());
        self.session.select_mode(mode);
    }

    fn update_game(&mut self) {
        match self.session.tick() {
            TickOutcome::Reschedule(period) => self.scheduler.reschedule(period),
            TickOutcome::GameOver(_) | TickOutcome::Idle => self.scheduler.stop(),
            TickOutcome::Continue => {}
        }
    }

    fn exit(&mut self) {
        self.scheduler.stop();
        self.session.exit();
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Position;

    fn app() -> TerminalApp {
        TerminalApp::new(GameConfig::seeded(9), GameMode::Classic)
    }

    #[test]
    fn test_app_initialization() {
        let app = TerminalApp::new(GameConfig::seeded(9), GameMode::Walls);
        assert_eq!(app.session.phase(), Phase::Menu);
        assert_eq!(app.session.mode(), GameMode::Walls);
        assert!(!app.scheduler.is_running());
    }

    #[test]
    fn test_menu_arrows_cycle_modes() {
        let mut app = app();
        app.handle_action(KeyAction::Turn(Direction::Down));
        assert_eq!(app.session.mode(), GameMode::Speed);
        app.handle_action(KeyAction::Turn(Direction::Up));
        app.handle_action(KeyAction::Turn(Direction::Up));
        assert_eq!(app.session.mode(), GameMode::Walls);
        app.handle_action(KeyAction::SelectMode(GameMode::Portal));
        assert_eq!(app.session.mode(), GameMode::Portal);
    }

    #[tokio::test]
    async fn test_start_and_return_to_menu_drive_scheduler() {
        let mut app = app();
        app.handle_action(KeyAction::Start);
        assert_eq!(app.session.phase(), Phase::Playing);
        assert_eq!(app.scheduler.period(), Some(Duration::from_millis(500)));
        assert_eq!(app.session.observer().metrics.games_played, 0);

        // Mode keys are ignored mid-game
        app.handle_action(KeyAction::SelectMode(GameMode::Speed));
        assert_eq!(app.session.mode(), GameMode::Classic);

        app.handle_action(KeyAction::ReturnToMenu);
        assert_eq!(app.session.phase(), Phase::Menu);
        assert!(!app.scheduler.is_running());
        assert!(app.session.observer().snapshot.snake.is_empty());
    }

    #[tokio::test]
    async fn test_game_over_stops_scheduler() {
        let mut app = app();
        app.handle_action(KeyAction::Start);
        app.handle_action(KeyAction::Turn(Direction::Up));

        // Run straight up from (10,10) into the top edge
        for _ in 0..11 {
            app.update_game();
        }

        assert_eq!(app.session.phase(), Phase::GameOver);
        assert!(!app.scheduler.is_running());
        let display = app.session.observer();
        assert_eq!(display.last_end, Some(EndReason::OutOfBounds));
        assert_eq!(display.metrics.games_played, 1);
        assert_eq!(display.snapshot.head(), Some(Position::new(10, -1)));
    }

    #[tokio::test]
    async fn test_exit_ends_session() {
        let mut app = app();
        app.handle_action(KeyAction::Start);
        app.handle_action(KeyAction::Exit);
        assert_eq!(app.session.phase(), Phase::Exited);
        assert!(!app.scheduler.is_running());
    }
}
