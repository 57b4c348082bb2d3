use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::{debug, error, info};

use crate::game::{GameConfig, SnakeEngine, StepOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::modes::StepClock;
use crate::render::Renderer;

/// Keyboard-driven play in the terminal
pub struct HumanMode {
    engine: SnakeEngine,
    clock: StepClock,
    frame_interval: Duration,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        let engine: SnakeEngine = match config.seed {
            Some(seed) => SnakeEngine::seeded(seed),
            None => SnakeEngine::new(),
        };

        Self {
            engine,
            clock: StepClock::new(config.step_interval(), Instant::now()),
            frame_interval: config.frame_interval(),
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
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

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal);

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut render_timer = interval(self.frame_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Catch up on game steps, then draw
                _ = render_timer.tick() => {
                    self.advance(Instant::now());
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.engine, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!(round = self.metrics.round, "Quitting");
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };

        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Steer(direction) => {
                if !self.engine.redirect(direction) {
                    debug!(?direction, "Ignored turn into the snake's own neck");
                }
            }
            KeyAction::Restart => {
                info!(length = self.engine.body_len(), "Round restarted by player");
                self.engine.initialize();
                self.metrics.on_round_start();
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    /// Run every game step due at `now`; returns how many ran
    fn advance(&mut self, now: Instant) -> u32 {
        let steps = self.clock.due_steps(now);
        for _ in 0..steps {
            self.step_game();
        }
        steps
    }

    fn step_game(&mut self) {
        let length = self.engine.body_len();

        match self.engine.step() {
            StepOutcome::Collided => {
                info!(length, round = self.metrics.round, "Snake hit itself, new round");
                self.metrics.on_round_start();
            }
            StepOutcome::Won => {
                info!(length, round = self.metrics.round, "Board filled, new round");
                self.metrics.on_round_start();
            }
            StepOutcome::Ate => {
                debug!(length, "Ate food");
            }
            StepOutcome::Moved => {}
        }

        self.metrics.record_length(self.engine.body_len());
    }

    fn cleanup_terminal(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) {
        if let Err(err) = disable_raw_mode() {
            error!(?err, "Failed to disable raw mode");
        }
        if let Err(err) = execute!(terminal.backend_mut(), LeaveAlternateScreen) {
            error!(?err, "Failed to leave alternate screen");
        }
        if let Err(err) = terminal.show_cursor() {
            error!(?err, "Failed to show cursor");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{BOARD_HEIGHT, BOARD_WIDTH, Direction, Position};
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    const CENTER: Position = Position {
        x: BOARD_WIDTH / 2,
        y: BOARD_HEIGHT / 2,
    };

    fn seeded_mode() -> HumanMode {
        HumanMode::new(GameConfig {
            seed: Some(21),
            ..Default::default()
        })
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_game_initialization() {
        let mode = seeded_mode();
        assert_eq!(mode.engine.head_position(), CENTER);
        assert_eq!(mode.engine.food_count(), 4);
        assert_eq!(mode.metrics.round, 1);
        assert!(!mode.should_quit);
    }

    #[test]
    fn test_arrow_key_redirects() {
        let mut mode = seeded_mode();
        mode.handle_event(key(KeyCode::Up));
        assert_eq!(mode.engine.pending_direction(), Direction::Up);

        // Reversing against the last move is ignored
        let mut mode = seeded_mode();
        mode.handle_event(key(KeyCode::Left));
        assert_eq!(mode.engine.pending_direction(), Direction::Right);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut mode = seeded_mode();
        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Up,
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        mode.handle_event(Event::Key(release));
        assert_eq!(mode.engine.pending_direction(), Direction::Right);
    }

    #[test]
    fn test_restart_key() {
        let mut mode = seeded_mode();
        mode.engine.redirect(Direction::Down);
        for _ in 0..5 {
            mode.step_game();
        }

        mode.handle_event(key(KeyCode::Char('r')));

        assert_eq!(mode.engine.head_position(), CENTER);
        assert_eq!(mode.engine.body_len(), 1);
        assert_eq!(mode.metrics.round, 2);
    }

    #[test]
    fn test_quit_key() {
        let mut mode = seeded_mode();
        mode.handle_event(key(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }

    #[test]
    fn test_advance_runs_due_steps() {
        let mut mode = seeded_mode();
        let start = Instant::now();
        mode.clock = StepClock::new(Duration::from_millis(125), start);

        assert_eq!(mode.advance(start + Duration::from_millis(100)), 0);
        assert_eq!(mode.engine.head_position(), CENTER);

        assert_eq!(mode.advance(start + Duration::from_millis(260)), 2);
        assert_eq!(
            mode.engine.head_position(),
            Position::new(CENTER.x + 2, CENTER.y)
        );
        assert!(mode.metrics.longest_snake >= 3);
    }
}
