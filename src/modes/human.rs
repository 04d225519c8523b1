use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;
use tracing::info;

use crate::game::{GameConfig, GameEngine, GameMode, Level, fit_grid};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;
use crate::scheduler::TickScheduler;

/// How the grid dimensions are chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridSizing {
    /// Dimensions given up front; terminal resizes are ignored
    Fixed { width: usize, height: usize },
    /// Square grid fitted to the terminal, refitted on every resize
    FitToSurface,
}

pub struct HumanMode {
    engine: GameEngine,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    sizing: GridSizing,
    scheduler: TickScheduler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, sizing: GridSizing) -> Self {
        Self {
            engine: GameEngine::new(config),
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            sizing,
            scheduler: TickScheduler::new(),
            should_quit: false,
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

        let size = terminal.size().context("Failed to read terminal size")?;
        self.fit_to_surface(size.width, size.height);

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

        self.start_game();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick, only while the scheduler runs
                _ = self.scheduler.tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let level = self.engine.config().level;
                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.engine.state(), level, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return;
                }

                let action = self.input_handler.handle_key_event(key, self.engine.mode());
                self.apply(action);
            }
            Event::Resize(columns, rows) => self.fit_to_surface(columns, rows),
            _ => {}
        }
    }

    fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Turn(dir) => {
                self.engine.queue_direction(dir);
            }
            KeyAction::TogglePause => self.toggle_pause(),
            KeyAction::Confirm | KeyAction::Restart => self.reset_game(),
            KeyAction::SelectLevel(level) => self.select_level(level),
            KeyAction::CycleLevel => self.select_level(self.engine.config().level.next()),
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) {
        let result = self.engine.tick();

        if result.mode == GameMode::Over {
            self.scheduler.stop();
            self.metrics.on_game_over(result.score);
        }
    }

    fn toggle_pause(&mut self) {
        match self.engine.toggle_pause() {
            GameMode::Paused => {
                self.scheduler.stop();
                self.metrics.on_pause();
            }
            GameMode::Running => {
                self.scheduler.start(self.engine.config().level.tick_interval());
                self.metrics.on_resume();
            }
            GameMode::Over => {}
        }
    }

    fn select_level(&mut self, level: Level) {
        if level == self.engine.config().level {
            return;
        }
        info!(%level, "Level selected");
        self.engine.select_level(level);
        self.start_game();
    }

    fn reset_game(&mut self) {
        self.engine.restart();
        self.start_game();
    }

    /// Refit the grid to a terminal of `columns` x `rows`. A changed size
    /// starts a new game.
    fn fit_to_surface(&mut self, columns: u16, rows: u16) {
        if self.sizing != GridSizing::FitToSurface {
            return;
        }

        let (surface_columns, surface_rows) =
            Renderer::board_surface(Rect::new(0, 0, columns, rows));
        let config = self.engine.config();
        let (width, height) = fit_grid(
            surface_columns,
            surface_rows,
            config.level.cell_size(),
            config.obstacles,
        );

        if self.engine.resize(width, height) {
            self.start_game();
        }
    }

    /// Fresh clock and a ticking scheduler for the engine's current game
    fn start_game(&mut self) {
        self.metrics.on_game_start();
        self.scheduler.start(self.engine.config().level.tick_interval());
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
    use crate::game::{Direction, ObstacleLayout};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn fixed_mode() -> HumanMode {
        HumanMode::new(
            GameConfig::default(),
            GridSizing::Fixed {
                width: 20,
                height: 20,
            },
        )
    }

    #[test]
    fn test_game_initialization() {
        let mode = fixed_mode();
        assert_eq!(mode.engine.mode(), GameMode::Running);
        assert_eq!(mode.engine.score(), 0);
        assert!(!mode.scheduler.is_running());
    }

    #[tokio::test]
    async fn test_pause_stops_scheduler() {
        let mut mode = fixed_mode();
        mode.start_game();

        mode.handle_event(key(KeyCode::Char(' ')));
        assert_eq!(mode.engine.mode(), GameMode::Paused);
        assert!(!mode.scheduler.is_running());

        mode.handle_event(key(KeyCode::Char(' ')));
        assert_eq!(mode.engine.mode(), GameMode::Running);
        assert_eq!(mode.scheduler.period(), Some(Level::Easy.tick_interval()));
    }

    #[tokio::test]
    async fn test_game_over_stops_scheduler_and_confirm_restarts() {
        let mut mode = fixed_mode();
        mode.start_game();

        // Head starts at (11, 10) heading right; the edge is 9 cells away
        for _ in 0..9 {
            mode.update_game();
        }
        assert_eq!(mode.engine.mode(), GameMode::Over);
        assert!(!mode.scheduler.is_running());
        assert_eq!(mode.metrics.games_played, 1);

        mode.handle_event(key(KeyCode::Up));
        assert_eq!(mode.engine.pending_directions(), 0);

        mode.handle_event(key(KeyCode::Enter));
        assert_eq!(mode.engine.mode(), GameMode::Running);
        assert!(mode.scheduler.is_running());
    }

    #[tokio::test]
    async fn test_level_selection_resets_with_new_interval() {
        let mut mode = fixed_mode();
        mode.start_game();
        mode.update_game();

        mode.handle_event(key(KeyCode::Char('3')));
        assert_eq!(mode.engine.config().level, Level::Hard);
        assert_eq!(mode.engine.state().steps, 0);
        assert_eq!(mode.scheduler.period(), Some(Level::Hard.tick_interval()));

        mode.handle_event(key(KeyCode::Char('l')));
        assert_eq!(mode.engine.config().level, Level::Easy);
    }

    #[tokio::test]
    async fn test_turn_keys_queue_directions() {
        let mut mode = fixed_mode();
        mode.handle_event(key(KeyCode::Down));
        assert_eq!(mode.engine.pending_directions(), 1);

        mode.update_game();
        assert_eq!(mode.engine.state().snake.direction, Direction::Down);
    }

    #[tokio::test]
    async fn test_resize_refits_grid() {
        let mut mode = HumanMode::new(
            GameConfig::default().with_obstacles(ObstacleLayout::Walls),
            GridSizing::FitToSurface,
        );

        mode.handle_event(Event::Resize(100, 48));
        // 98 / 2 = 49 across, 40 down, 85% of 40
        assert_eq!(mode.engine.state().grid_width, 34);
        assert_eq!(mode.engine.state().grid_height, 34);
        assert!(mode.scheduler.is_running());
    }

    #[tokio::test]
    async fn test_fixed_grid_ignores_resize() {
        let mut mode = fixed_mode();
        mode.handle_event(Event::Resize(200, 80));
        assert_eq!(mode.engine.state().grid_width, 20);
    }
}
