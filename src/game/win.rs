use super::board::{Board, Direction, Position};
use super::player::Player;

/// Pieces needed in a line to win.
pub const CONNECT: usize = 4;

/// Check whether `player` has four in a row anywhere on the board.
///
/// Every occupied cell is tried as the start of a run in all eight
/// directions. Steps are taken in (row, column) space so runs never wrap
/// across a row or off a board edge.
pub fn check_win(board: &Board, player: Player) -> bool {
    winning_line(board, player).is_some()
}

/// The first winning run found for `player`, starting cell first.
pub fn winning_line(board: &Board, player: Player) -> Option<[Position; CONNECT]> {
    let occupant = player.to_occupant();

    board
        .cells()
        .filter(|cell| cell.occupant == occupant)
        .filter_map(|cell| Position::from_index(cell.index))
        .find_map(|start| {
            Direction::ALL
                .iter()
                .find_map(|&direction| run_from(board, start, direction, player))
        })
}

fn run_from(
    board: &Board,
    start: Position,
    direction: Direction,
    player: Player,
) -> Option<[Position; CONNECT]> {
    let occupant = player.to_occupant();
    let mut line = [start; CONNECT];

    for i in 1..CONNECT {
        let next = line[i - 1].step(direction)?;
        if board.get(next) != occupant {
            return None;
        }
        line[i] = next;
    }

    Some(line)
}
