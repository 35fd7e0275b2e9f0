//! Turn cycle between the human and the computer, including the step-wise
//! fall of each dropped piece.
//!
//! A drop is started by [`Engine::on_column_chosen`] and then driven one
//! step at a time by [`Engine::advance`]. The driver is expected to wait
//! [`Engine::step_delay`] before each call; [`Engine::settle`] does that with
//! a [`Pacer`]. While a piece is falling every new drop request is rejected.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::board::{Board, Direction, Position};
use super::player::Player;
use super::snapshot::{Observer, Snapshot};
use super::state::{GameOutcome, GameState, MoveError, PositionError, Score};
use super::win::check_win;
use crate::ai::{Agent, RandomAgent};
use crate::config::EngineConfig;

pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(150);

/// Waits between the occupy and clear edges of a fall step.
pub trait Pacer {
    fn wait(&mut self, delay: Duration);
}

/// Blocks the current thread for the full delay.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn wait(&mut self, delay: Duration) {
        std::thread::sleep(delay);
    }
}

/// Returns immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Pacer for NoDelay {
    fn wait(&mut self, _delay: Duration) {}
}

/// A piece on its way down. It is only drawn, never stored on the board,
/// until it comes to rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fall {
    player: Player,
    column: usize,
    cursor: Position,
    visible: bool,
}

impl Fall {
    pub fn player(&self) -> Player {
        self.player
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn position(&self) -> Position {
        self.cursor
    }

    /// False between the clear edge of one step and the occupy edge of the next.
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

pub struct Engine {
    state: GameState,
    score: Score,
    fall: Option<Fall>,
    agent: Box<dyn Agent>,
    observers: Vec<Box<dyn Observer>>,
    step_delay: Duration,
}

impl Engine {
    pub fn new(agent: Box<dyn Agent>) -> Self {
        Engine {
            state: GameState::initial(),
            score: Score::default(),
            fall: None,
            agent,
            observers: Vec::new(),
            step_delay: DEFAULT_STEP_DELAY,
        }
    }

    /// Engine with a random computer player, seeded if the config says so.
    pub fn from_config(config: &EngineConfig) -> Self {
        let agent = match config.seed {
            Some(seed) => RandomAgent::from_seed(seed),
            None => RandomAgent::new(),
        };
        Engine::new(Box::new(agent)).with_step_delay(Duration::from_millis(config.step_delay_ms))
    }

    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    /// Start the current game from a prepared position with the human to
    /// move.
    ///
    /// A position that already holds a line of four is taken as finished,
    /// and so is a full board; neither touches the score. Boards with a
    /// piece resting on an empty cell, or with lines for both players, are
    /// refused.
    pub fn with_board(mut self, board: Board) -> Result<Self, PositionError> {
        if let Some(pos) = board.floating_piece() {
            return Err(PositionError::FloatingPiece {
                row: pos.row(),
                col: pos.col(),
            });
        }

        let outcome = match (
            check_win(&board, Player::Human),
            check_win(&board, Player::Computer),
        ) {
            (true, true) => return Err(PositionError::BothPlayersWon),
            (true, false) => Some(GameOutcome::Winner(Player::Human)),
            (false, true) => Some(GameOutcome::Winner(Player::Computer)),
            (false, false) if board.is_full() => Some(GameOutcome::Draw),
            (false, false) => None,
        };

        self.fall = None;
        self.state = GameState::initial();
        *self.state.board_mut() = board;
        if let Some(outcome) = outcome {
            self.state.set_outcome(outcome);
        }
        debug!(pieces = board.piece_count(), ?outcome, "loaded prepared position");
        Ok(self)
    }

    pub fn add_observer(&mut self, observer: impl Observer + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn step_delay(&self) -> Duration {
        self.step_delay
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn board(&self) -> &Board {
        self.state.board()
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.state.outcome()
    }

    pub fn winner(&self) -> Option<Player> {
        self.state.outcome().and_then(GameOutcome::winner)
    }

    pub fn is_human_turn(&self) -> bool {
        !self.state.is_terminal() && self.state.turn() == Player::Human
    }

    pub fn is_drop_in_progress(&self) -> bool {
        self.state.is_drop_in_progress()
    }

    pub fn falling(&self) -> Option<&Fall> {
        self.fall.as_ref()
    }

    pub fn agent_name(&self) -> &str {
        self.agent.name()
    }

    /// Inbound event from the column selectors.
    ///
    /// A rejected request leaves the engine untouched. The error only says
    /// why; callers are free to ignore it.
    pub fn on_column_chosen(&mut self, header: usize) -> Result<(), MoveError> {
        let top = self
            .state
            .validate_drop(header, Player::Human)
            .inspect_err(|err| debug!(header, %err, "ignoring column choice"))?;
        self.start_fall(top, Player::Human);
        Ok(())
    }

    /// Perform the next fall step: clear the piece from its current cell,
    /// then either move it one cell down or let it come to rest.
    ///
    /// Resting the human piece without a win immediately starts the
    /// computer's drop. Does nothing when no piece is falling.
    pub fn advance(&mut self) {
        let Some(mut fall) = self.fall else {
            return;
        };

        self.fall = Some(Fall {
            visible: false,
            ..fall
        });
        self.notify();

        let below = fall
            .cursor
            .step(Direction::Down)
            .filter(|&pos| self.state.board().get(pos).is_empty());

        match below {
            Some(next) => {
                fall.cursor = next;
                fall.visible = true;
                self.fall = Some(fall);
                self.notify();
            }
            None => {
                self.fall = None;
                self.commit(fall.player, fall.cursor);
            }
        }
    }

    /// Drive every pending fall step to completion, waiting the step delay
    /// before each one.
    pub fn settle(&mut self, pacer: &mut impl Pacer) {
        while self.fall.is_some() {
            pacer.wait(self.step_delay);
            self.advance();
        }
    }

    /// Choose a column and play out the human drop and the computer reply.
    pub fn play(&mut self, header: usize, pacer: &mut impl Pacer) -> Result<(), MoveError> {
        self.on_column_chosen(header)?;
        self.settle(pacer);
        Ok(())
    }

    /// Start a new game. The score is kept.
    pub fn reset_game(&mut self) {
        if let Some(fall) = self.fall.take() {
            debug!(column = fall.column, player = ?fall.player, "abandoning falling piece");
        }
        self.state = GameState::initial();
        info!(
            wins = self.score.wins,
            losses = self.score.losses,
            draws = self.score.draws,
            "new game"
        );
        self.notify();
    }

    pub fn snapshot(&self) -> Snapshot {
        let mut cells: Vec<_> = self.state.board().cells().collect();
        if let Some(fall) = self.fall.filter(|f| f.visible) {
            cells[fall.cursor.index() - 1].occupant = fall.player.to_occupant();
        }

        Snapshot {
            cells,
            headers: self.state.board().headers().iter().map(|h| h.index).collect(),
            winner: self.winner(),
            outcome: self.outcome(),
            is_human_turn: self.is_human_turn(),
            is_drop_in_progress: self.is_drop_in_progress(),
            wins: self.score.wins,
            losses: self.score.losses,
            draws: self.score.draws,
        }
    }

    fn start_fall(&mut self, top: Position, player: Player) {
        self.state.set_drop_in_progress(true);
        self.fall = Some(Fall {
            player,
            column: top.col(),
            cursor: top,
            visible: true,
        });
        self.notify();
    }

    fn commit(&mut self, player: Player, pos: Position) {
        self.state.board_mut().set(pos, player.to_occupant());
        self.state.set_drop_in_progress(false);
        debug!(
            player = ?player,
            row = pos.row(),
            column = pos.col(),
            index = pos.index(),
            "piece placed"
        );

        if check_win(self.state.board(), player) {
            self.end_game(GameOutcome::Winner(player));
            return;
        }
        if self.state.board().is_full() {
            self.end_game(GameOutcome::Draw);
            return;
        }

        self.state.set_turn(player.other());
        self.notify();

        // The board has room here, so the computer always has a column.
        if player == Player::Human {
            if let Some(top) = self.computer_column() {
                self.start_fall(top, Player::Computer);
            }
        }
    }

    /// Top cell of the agent's pick, or of the leftmost column with room
    /// when the agent picks a full column or none at all.
    fn computer_column(&mut self) -> Option<Position> {
        let board = self.state.board();
        let column = match self.agent.select_column(board) {
            Some(col) if !board.is_column_full(col) => col,
            other => {
                if let Some(col) = other {
                    warn!(column = col, agent = self.agent.name(), "agent chose a full column");
                }
                board.legal_columns().first().copied()?
            }
        };
        Position::new(1, column)
    }

    fn end_game(&mut self, outcome: GameOutcome) {
        self.state.set_outcome(outcome);
        self.state.set_drop_in_progress(false);
        self.score.record(outcome);
        info!(
            ?outcome,
            wins = self.score.wins,
            losses = self.score.losses,
            draws = self.score.draws,
            "game over"
        );
        self.notify();
    }

    fn notify(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for observer in &mut self.observers {
            observer.notify(&snapshot);
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new(Box::new(RandomAgent::new()))
    }
}
