use serde::Serialize;

use super::board::Occupant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Human,
    Computer,
}

impl Player {
    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::Human => Player::Computer,
            Player::Computer => Player::Human,
        }
    }

    /// Convert player to the occupant it leaves in a cell
    pub fn to_occupant(self) -> Occupant {
        match self {
            Player::Human => Occupant::Human,
            Player::Computer => Occupant::Computer,
        }
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::Human => "You",
            Player::Computer => "Computer",
        }
    }
}
