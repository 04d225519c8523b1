use std::collections::HashSet;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{GameMode, GameState, Level, Position};
use crate::metrics::GameMetrics;

/// Rows taken by the header, the footer and the board border
const CHROME_ROWS: u16 = 3 + 3 + 2;
/// Columns taken by the board border
const CHROME_COLUMNS: u16 = 2;

const BRICK: Color = Color::Rgb(139, 69, 19);

/// What occupies a grid cell, in drawing priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Head,
    Body,
    Food,
    Obstacle,
    Empty,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Terminal columns and rows left for the board on a screen of `area`
    pub fn board_surface(area: Rect) -> (u16, u16) {
        (
            area.width.saturating_sub(CHROME_COLUMNS),
            area.height.saturating_sub(CHROME_ROWS),
        )
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        level: Level,
        metrics: &GameMetrics,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(state, level, metrics);
        frame.render_widget(stats, chunks[0]);

        if state.mode == GameMode::Over {
            let game_over = self.render_game_over(state, metrics);
            frame.render_widget(game_over, chunks[1]);
        } else {
            let grid = self.render_grid(state);
            frame.render_widget(grid, chunks[1]);
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    /// Classify every cell of the grid, row by row
    pub fn classify_cells(state: &GameState) -> Vec<Vec<CellKind>> {
        let head = state.snake.head();
        let body: HashSet<Position> = state.snake.segments().collect();

        (0..state.grid_height as i32)
            .map(|y| {
                (0..state.grid_width as i32)
                    .map(|x| {
                        let pos = Position::new(x, y);
                        if pos == head {
                            CellKind::Head
                        } else if body.contains(&pos) {
                            CellKind::Body
                        } else if state.food == Some(pos) {
                            CellKind::Food
                        } else if state.obstacles.contains(pos) {
                            CellKind::Obstacle
                        } else {
                            CellKind::Empty
                        }
                    })
                    .collect()
            })
            .collect()
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let lines: Vec<Line> = Self::classify_cells(state)
            .into_iter()
            .map(|row| Line::from(row.into_iter().map(cell_span).collect::<Vec<_>>()))
            .collect();

        let (title, border_color) = if state.mode == GameMode::Paused {
            (" Snake - PAUSED ", Color::Yellow)
        } else {
            (" Snake ", Color::White)
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border_color))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(
        &self,
        state: &GameState,
        level: Level,
        metrics: &GameMetrics,
    ) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);
        let mode_color = match state.mode {
            GameMode::Running => Color::Green,
            GameMode::Paused => Color::Yellow,
            GameMode::Over => Color::Red,
        };

        let text = vec![Line::from(vec![
            Span::styled("Level: ", label),
            Span::styled(level.name(), value.add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled("Mode: ", label),
            Span::styled(state.mode.name(), Style::default().fg(mode_color)),
            Span::raw("  "),
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled("High: ", label),
            Span::styled(metrics.high_score.to_string(), value),
            Span::raw("  "),
            Span::styled("Steps: ", label),
            Span::styled(state.steps.to_string(), value),
            Span::raw("  "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let headline = if state.food.is_none() {
            Span::styled(
                "BOARD CLEARED",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )
        };
        let bold_white = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let text = vec![
            Line::from(""),
            Line::from(vec![headline]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(state.score.to_string(), bold_white),
            ]),
            Line::from(vec![
                Span::styled("Games Played: ", Style::default().fg(Color::Yellow)),
                Span::styled(metrics.games_played.to_string(), bold_white),
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
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let key = Style::default().fg(Color::Cyan);
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", key),
            Span::raw(" or "),
            Span::styled("WASD", key),
            Span::raw(" to move | "),
            Span::styled("Space", key),
            Span::raw(" pause | "),
            Span::styled("1-3/L", key),
            Span::raw(" level | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn cell_span(kind: CellKind) -> Span<'static> {
    match kind {
        CellKind::Head => Span::styled(
            "■ ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        CellKind::Body => Span::styled("□ ", Style::default().fg(Color::Green)),
        CellKind::Food => Span::styled(
            "● ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        CellKind::Obstacle => Span::styled("▓▓", Style::default().fg(BRICK)),
        CellKind::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
    }
}
