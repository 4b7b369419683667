use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use std::time::Duration;

use crate::game::{EndReason, GameMode, Phase, Position, Scoreboard, Snapshot};
use crate::metrics::GameMetrics;

const BACKGROUND: Color = Color::Rgb(0x34, 0x49, 0x5e);
const SNAKE: Color = Color::Rgb(0x2e, 0xcc, 0x71);
const SNAKE_HEAD: Color = Color::Rgb(0x27, 0xae, 0x60);
const FOOD: Color = Color::Rgb(0xe7, 0x4c, 0x3c);
const WALL: Color = Color::Rgb(0x7f, 0x8c, 0x8d);

/// One square of the board; every cell is drawn two columns wide
const CELL: &str = "  ";

/// Everything a frame needs, borrowed from the app
pub struct View<'a> {
    pub phase: Phase,
    pub selected_mode: GameMode,
    pub snapshot: &'a Snapshot,
    pub scores: Scoreboard,
    pub last_end: Option<EndReason>,
    pub tick_interval: Duration,
    pub grid_size: usize,
    pub metrics: &'a GameMetrics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Empty,
    Head,
    Body,
    Food,
    Wall,
}

impl CellKind {
    fn color(&self) -> Color {
        match self {
            CellKind::Empty => BACKGROUND,
            CellKind::Head => SNAKE_HEAD,
            CellKind::Body => SNAKE,
            CellKind::Food => FOOD,
            CellKind::Wall => WALL,
        }
    }
}

/// What occupies `pos` in the snapshot; the snake is drawn above food and walls
pub fn cell_kind(snapshot: &Snapshot, pos: Position) -> CellKind {
    if snapshot.head() == Some(pos) {
        CellKind::Head
    } else if snapshot.snake.contains(&pos) {
        CellKind::Body
    } else if snapshot.food.contains(&pos) {
        CellKind::Food
    } else if snapshot.walls.contains(&pos) {
        CellKind::Wall
    } else {
        CellKind::Empty
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, view: &View) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(view), chunks[0]);

        let grid_width = (view.grid_size * CELL.len()) as u16 + 2;
        let grid_height = view.grid_size as u16 + 2;
        let board_area = centered(chunks[1], grid_width, grid_height);

        match view.phase {
            Phase::Menu | Phase::Exited => {
                let menu_area = centered(chunks[1], 64, 12);
                frame.render_widget(self.render_menu(view), menu_area);
            }
            Phase::Playing => {
                frame.render_widget(self.render_grid(view), board_area);
            }
            Phase::GameOver => {
                let game_over_area = centered(chunks[1], 50, 9);
                frame.render_widget(self.render_grid(view), board_area);
                frame.render_widget(self.render_game_over(view), game_over_area);
            }
        }

        frame.render_widget(self.render_controls(view.phase), chunks[2]);
    }

    fn render_grid(&self, view: &View) -> Paragraph<'_> {
        let mut lines = Vec::with_capacity(view.grid_size);

        for y in 0..view.grid_size {
            let spans: Vec<Span> = (0..view.grid_size)
                .map(|x| {
                    let kind = cell_kind(view.snapshot, Position::new(x as i32, y as i32));
                    Span::styled(CELL, Style::default().bg(kind.color()))
                })
                .collect();
            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" {} ", view.snapshot.mode.label())),
        )
    }

    fn render_stats(&self, view: &View) -> Paragraph<'_> {
        let mut spans = vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                view.scores.current.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(view.scores.best.to_string(), Style::default().fg(Color::White)),
        ];

        if matches!(view.phase, Phase::Playing | Phase::GameOver) {
            spans.extend([
                Span::raw("    "),
                Span::styled("Tick: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!("{}ms", view.tick_interval.as_millis()),
                    Style::default().fg(Color::White),
                ),
                Span::raw("    "),
                Span::styled("Time: ", Style::default().fg(Color::Yellow)),
                Span::styled(view.metrics.format_time(), Style::default().fg(Color::White)),
            ]);
        }

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }

    fn render_menu(&self, view: &View) -> Paragraph<'_> {
        let mut text = vec![
            Line::from(vec![Span::styled(
                "SNAKE",
                Style::default().fg(SNAKE).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
        ];

        for (index, mode) in GameMode::ALL.iter().enumerate() {
            let selected = *mode == view.selected_mode;
            let marker = if selected { "> " } else { "  " };
            let style = if selected {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            text.push(Line::from(vec![Span::styled(
                format!("{marker}{} {:<8} {}", index + 1, mode.label(), mode.description()),
                style,
            )]));
        }

        text.extend([
            Line::from(""),
            Line::from(vec![
                Span::styled("Best score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    view.scores.best.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("Games: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    view.metrics.games_played.to_string(),
                    Style::default().fg(Color::White),
                ),
                Span::raw("    "),
                Span::styled("Longest: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    view.metrics.longest_snake.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
        ]);

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(" Select mode "),
        )
    }

    fn render_game_over(&self, view: &View) -> Paragraph<'_> {
        let reason = view
            .last_end
            .map(|reason| reason.to_string())
            .unwrap_or_default();

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(vec![Span::styled(reason, Style::default().fg(Color::Gray))]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    view.scores.current.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled("Best: ", Style::default().fg(Color::Yellow)),
                Span::styled(view.scores.best.to_string(), Style::default().fg(Color::White)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to play again or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "M",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" for the menu", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, phase: Phase) -> Paragraph<'_> {
        let spans = match phase {
            Phase::Playing => vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("M", Style::default().fg(Color::Cyan)),
                Span::raw(" menu | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ],
            _ => vec![
                Span::styled("1-5", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("↑↓", Style::default().fg(Color::Cyan)),
                Span::raw(" pick mode | "),
                Span::styled("Enter", Style::default().fg(Color::Green)),
                Span::raw(" to play | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ],
        };

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A `width` x `height` rectangle in the middle of `area`, clipped to it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
