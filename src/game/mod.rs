//! Core Connect Four game logic: board, players, win detection and the
//! engine that runs the human/computer turn cycle.

mod board;
mod engine;
mod player;
mod snapshot;
mod state;
mod win;

pub use board::{Board, Cell, Direction, HeaderCell, Occupant, Position, CELL_COUNT, COLS, ROWS};
pub use engine::{Engine, Fall, NoDelay, Pacer, ThreadPacer, DEFAULT_STEP_DELAY};
pub use player::Player;
pub use snapshot::{Observer, Snapshot};
pub use state::{GameOutcome, GameState, MoveError, PositionError, Score};
pub use win::{check_win, winning_line, CONNECT};
