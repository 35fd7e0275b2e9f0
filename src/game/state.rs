use serde::Serialize;

use super::board::{Board, Position};
use super::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

impl GameOutcome {
    pub fn winner(self) -> Option<Player> {
        match self {
            GameOutcome::Winner(player) => Some(player),
            GameOutcome::Draw => None,
        }
    }
}

/// Why a drop request was ignored. None of these change any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {0} does not exist")]
    InvalidColumn(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("it is not {0:?}'s turn")]
    NotYourTurn(Player),

    #[error("a piece is still falling")]
    DropInProgress,

    #[error("the game is over")]
    GameOver,
}

/// Why a prepared position was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    #[error("piece at row {row}, column {col} has an empty cell beneath it")]
    FloatingPiece { row: usize, col: usize },

    #[error("both players already have four in a row")]
    BothPlayersWon,
}

/// Cumulative results for the session. Only reset by building a new engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Score {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl Score {
    /// Count a finished game from the human's point of view.
    pub fn record(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Winner(Player::Human) => self.wins += 1,
            GameOutcome::Winner(Player::Computer) => self.losses += 1,
            GameOutcome::Draw => self.draws += 1,
        }
    }

    pub fn games_played(&self) -> u32 {
        self.wins + self.losses + self.draws
    }
}

/// Per-game state. Rebuilt from scratch on every reset.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    board: Board,
    turn: Player,
    drop_in_progress: bool,
    outcome: Option<GameOutcome>,
}

impl GameState {
    /// Create initial game state. The human always moves first.
    pub fn initial() -> Self {
        GameState {
            board: Board::new(),
            turn: Player::Human,
            drop_in_progress: false,
            outcome: None,
        }
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn turn(&self) -> Player {
        self.turn
    }

    pub(crate) fn set_turn(&mut self, player: Player) {
        self.turn = player;
    }

    pub fn is_drop_in_progress(&self) -> bool {
        self.drop_in_progress
    }

    pub(crate) fn set_drop_in_progress(&mut self, falling: bool) {
        self.drop_in_progress = falling;
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub(crate) fn set_outcome(&mut self, outcome: GameOutcome) {
        self.outcome = Some(outcome);
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Check that `player` may start a drop in the column under `header`
    /// and return the top cell the piece enters at.
    pub fn validate_drop(&self, header: usize, player: Player) -> Result<Position, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if self.drop_in_progress {
            return Err(MoveError::DropInProgress);
        }
        if self.turn != player {
            return Err(MoveError::NotYourTurn(player));
        }
        let top = Position::new(1, header).ok_or(MoveError::InvalidColumn(header))?;
        if self.board.is_column_full(header) {
            return Err(MoveError::ColumnFull(header));
        }
        Ok(top)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
