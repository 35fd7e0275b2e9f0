use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use tracing::info;

use crate::config::UiConfig;
use crate::game::{Engine, MoveError, COLS};

pub struct App {
    engine: Engine,
    selected_column: usize,
    start_column: usize,
    poll_interval: Duration,
    /// When the falling piece takes its next step.
    next_step: Option<Instant>,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(engine: Engine, config: &UiConfig) -> Self {
        App {
            engine,
            selected_column: config.start_column,
            start_column: config.start_column,
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            next_step: None,
            should_quit: false,
            message: None,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn selected_column(&self) -> usize {
        self.selected_column
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal.draw(|f| self.render(f)).map_err(Into::<io::Error>::into)?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
            self.tick(Instant::now());
        }
        Ok(())
    }

    /// Advance the falling piece once its step delay has passed.
    pub fn tick(&mut self, now: Instant) {
        if self.engine.falling().is_none() {
            self.next_step = None;
            return;
        }

        let due = *self
            .next_step
            .get_or_insert_with(|| now + self.engine.step_delay());
        if now >= due {
            self.engine.advance();
            self.next_step = self
                .engine
                .falling()
                .map(|_| now + self.engine.step_delay());
        }
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        let timeout = match self.next_step {
            Some(at) => at
                .saturating_duration_since(Instant::now())
                .min(self.poll_interval),
            None => self.poll_interval,
        };

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                if self.selected_column > 1 {
                    self.selected_column -= 1;
                }
            }
            KeyCode::Right => {
                if self.selected_column < COLS {
                    self.selected_column += 1;
                }
            }
            KeyCode::Char(c @ '1'..='7') => {
                self.selected_column = c as usize - '0' as usize;
                self.drop_piece();
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('r') => {
                self.engine.reset_game();
                self.next_step = None;
                self.selected_column = self.start_column;
                self.message = Some("New game started!".to_string());
            }
            _ => {}
        }
    }

    /// Drop piece in selected column
    fn drop_piece(&mut self) {
        match self.engine.on_column_chosen(self.selected_column) {
            Ok(()) => {
                info!(column = self.selected_column, "human drop");
                self.next_step = Some(Instant::now() + self.engine.step_delay());
            }
            Err(MoveError::ColumnFull(_)) => {
                self.message = Some("Column is full!".to_string());
            }
            Err(MoveError::GameOver) => {
                self.message = Some("Game over! Press 'r' to restart.".to_string());
            }
            // Input while a piece is falling or during the computer's turn.
            Err(_) => {}
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(
            frame,
            &self.engine.snapshot(),
            self.selected_column,
            &self.message,
            self.engine.agent_name(),
        );
    }
}
