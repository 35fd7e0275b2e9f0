//! Read-only view of the engine handed to presentation code.

use serde::Serialize;

use super::board::{Cell, Position};
use super::player::Player;
use super::state::{GameOutcome, Score};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// All 42 playable cells in index order, including a falling piece.
    pub cells: Vec<Cell>,
    pub headers: Vec<usize>,
    pub winner: Option<Player>,
    pub outcome: Option<GameOutcome>,
    pub is_human_turn: bool,
    pub is_drop_in_progress: bool,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl Snapshot {
    pub fn score(&self) -> Score {
        Score {
            wins: self.wins,
            losses: self.losses,
            draws: self.draws,
        }
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.cells.get(pos.index() - 1)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Render hook. Called on every occupy and clear edge of a fall, on each
/// committed piece, at game end and after a reset.
pub trait Observer {
    fn notify(&mut self, snapshot: &Snapshot);
}

impl<F> Observer for F
where
    F: FnMut(&Snapshot),
{
    fn notify(&mut self, snapshot: &Snapshot) {
        self(snapshot)
    }
}
