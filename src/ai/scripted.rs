use std::collections::VecDeque;

use super::agent::Agent;
use crate::game::Board;

/// Plays a fixed list of columns in order, then has no opinion.
///
/// Columns are returned as given, full or not; the engine decides what to
/// do with a pick that has no room. Useful for replaying a known game.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAgent {
    moves: VecDeque<usize>,
}

impl ScriptedAgent {
    pub fn new(moves: impl IntoIterator<Item = usize>) -> Self {
        ScriptedAgent {
            moves: moves.into_iter().collect(),
        }
    }

    pub fn boxed(moves: &[usize]) -> Box<dyn Agent> {
        Box::new(ScriptedAgent::new(moves.iter().copied()))
    }

    /// Moves not yet played.
    pub fn remaining(&self) -> usize {
        self.moves.len()
    }
}

impl Agent for ScriptedAgent {
    fn select_column(&mut self, _board: &Board) -> Option<usize> {
        self.moves.pop_front()
    }

    fn name(&self) -> &str {
        "Scripted"
    }
}
