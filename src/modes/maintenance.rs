//! The maintenance screen
//!
//! Hosts the snake game in a terminal event loop and polls the injected
//! settings provider; when the provider reports maintenance mode turned
//! off, the screen exits so the surrounding application can take over
//! again.

use anyhow::{Context, Result};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stdout, stdout};
use std::time::Duration;
use tokio::time::interval;

use crate::game::{GameConfig, GameEngine, GameState, GameStatus, IntentSlot};
use crate::input::{Command, InputHandler};
use crate::metrics::{HighScoreStore, HighScoreTable, SessionMetrics};
use crate::render::Renderer;
use crate::settings::SettingsProvider;

/// Why the screen was left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The player asked to quit
    UserQuit,
    /// The settings provider reported maintenance mode turned off
    MaintenanceOver,
}

pub struct MaintenanceMode {
    engine: GameEngine,
    state: GameState,
    metrics: SessionMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    settings: Box<dyn SettingsProvider>,
    scores: Option<HighScoreStore>,
    intent: IntentSlot,
    exit: Option<ExitReason>,
}

impl MaintenanceMode {
    pub fn new(
        config: GameConfig,
        settings: Box<dyn SettingsProvider>,
        scores: Option<HighScoreStore>,
    ) -> Self {
        let mut engine = GameEngine::new(config);
        let state = engine.initial_state();

        let high_score = match &scores {
            Some(store) => match store.load() {
                Ok(table) => table.best,
                Err(err) => {
                    log::warn!("Failed to load high scores, starting fresh: {err:#}");
                    0
                }
            },
            None => 0,
        };

        Self {
            engine,
            state,
            metrics: SessionMetrics::with_high_score(high_score),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            settings,
            scores,
            intent: IntentSlot::new(),
            exit: None,
        }
    }

    pub async fn run(&mut self) -> Result<ExitReason> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run the event loop with cleanup on every exit path
        let result = self.run_event_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<ExitReason> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.engine.config().tick_interval());

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        // The first poll fires right away, so a screen launched after the
        // maintenance window closed exits immediately.
        let mut poll_timer = interval(self.engine.config().settings_poll_interval());

        loop {
            tokio::select! {
                // Terminal events (keyboard + mouse)
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    if self.state.status == GameStatus::Playing {
                        self.advance_game();
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // System-settings poll
                _ = poll_timer.tick() => {
                    self.poll_settings();
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.exit = Some(ExitReason::UserQuit);
                }
            }

            if let Some(reason) = self.exit {
                return Ok(reason);
            }
        }
    }

    fn handle_event(&mut self, event: Event) {
        let min_swipe = self.engine.config().min_swipe_distance;
        let command = match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.input_handler.handle_key_event(key)
            }
            Event::Mouse(mouse) => self.input_handler.handle_mouse_event(mouse, min_swipe),
            _ => Command::None,
        };

        match command {
            Command::Steer(direction) => {
                // Latest intent wins; the tick validates it on consumption.
                self.intent.submit(direction);
            }
            Command::Start => {
                if self.state.status != GameStatus::Playing {
                    self.start_game();
                }
            }
            Command::Restart => {
                self.start_game();
            }
            Command::Quit => {
                self.exit = Some(ExitReason::UserQuit);
            }
            Command::None => {}
        }
    }

    fn advance_game(&mut self) {
        let intent = self.intent.take();
        let outcome = self.engine.tick(&mut self.state, intent);

        if outcome.collision.is_some() {
            let new_best = self.metrics.on_game_over(self.state.score);
            if new_best {
                self.persist_high_score();
            }
        }
    }

    fn start_game(&mut self) {
        self.engine.start(&mut self.state);
        self.metrics.on_game_start();
        self.intent.clear();
    }

    fn poll_settings(&mut self) {
        match self.settings.fetch_system_settings() {
            Ok(settings) if !settings.maintenance_mode_enabled => {
                log::info!("Maintenance mode turned off, leaving the screen");
                self.exit = Some(ExitReason::MaintenanceOver);
            }
            Ok(_) => {}
            Err(err) => {
                // Treated as "no change": the screen stays up and the poll
                // keeps running.
                log::warn!("System settings poll failed: {err:#}");
            }
        }
    }

    fn persist_high_score(&mut self) {
        if let Some(store) = &self.scores {
            let table = HighScoreTable {
                best: self.metrics.high_score,
            };
            if let Err(err) = store.save(&table) {
                log::warn!("Failed to save high score: {err:#}");
            }
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
