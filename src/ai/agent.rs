use crate::game::Board;

/// Picks the computer's column.
pub trait Agent {
    /// Select a header (1..=7) for the next drop, or `None` if no column
    /// has room.
    fn select_column(&mut self, board: &Board) -> Option<usize>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
