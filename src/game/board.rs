use serde::Serialize;

use super::player::Player;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;
pub const CELL_COUNT: usize = ROWS * COLS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Occupant {
    #[default]
    Empty,
    Human,
    Computer,
}

impl Occupant {
    pub fn is_empty(self) -> bool {
        self == Occupant::Empty
    }

    pub fn player(self) -> Option<Player> {
        match self {
            Occupant::Empty => None,
            Occupant::Human => Some(Player::Human),
            Occupant::Computer => Some(Player::Computer),
        }
    }
}

/// One of the eight unit steps on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    /// (row, column) delta. Rows grow downwards.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::UpLeft => (-1, -1),
            Direction::UpRight => (-1, 1),
            Direction::DownLeft => (1, -1),
            Direction::DownRight => (1, 1),
        }
    }
}

/// A grid coordinate. Both components are 1-based; row 1 is the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    row: usize,
    col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Option<Self> {
        if (1..=ROWS).contains(&row) && (1..=COLS).contains(&col) {
            Some(Position { row, col })
        } else {
            None
        }
    }

    /// Position of the playable cell with the given 1-based row-major index.
    pub fn from_index(index: usize) -> Option<Self> {
        if !(1..=CELL_COUNT).contains(&index) {
            return None;
        }
        Some(Position {
            row: (index - 1) / COLS + 1,
            col: (index - 1) % COLS + 1,
        })
    }

    pub fn row(self) -> usize {
        self.row
    }

    pub fn col(self) -> usize {
        self.col
    }

    pub fn index(self) -> usize {
        (self.row - 1) * COLS + self.col
    }

    pub fn is_bottom_row(self) -> bool {
        self.row == ROWS
    }

    /// Move one step in `direction`, or `None` when that leaves the grid.
    pub fn step(self, direction: Direction) -> Option<Position> {
        let (dr, dc) = direction.delta();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        Position::new(row, col)
    }
}

/// A playable cell as seen from outside the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub index: usize,
    pub occupant: Occupant,
}

/// Column selector above the grid. Header `i` maps to playable cell `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeaderCell {
    pub index: usize,
}

/// The 6x7 grid, stored row-major so every lookup is a direct index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [Occupant; CELL_COUNT],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [Occupant::Empty; CELL_COUNT],
        }
    }

    pub fn get(&self, pos: Position) -> Occupant {
        self.cells[pos.index() - 1]
    }

    pub fn set(&mut self, pos: Position, occupant: Occupant) {
        self.cells[pos.index() - 1] = occupant;
    }

    /// Cell with the given 1-based index, if it is on the board.
    pub fn cell(&self, index: usize) -> Option<Cell> {
        let pos = Position::from_index(index)?;
        Some(Cell {
            index,
            occupant: self.get(pos),
        })
    }

    /// All 42 playable cells in index order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().enumerate().map(|(i, &occupant)| Cell {
            index: i + 1,
            occupant,
        })
    }

    pub fn headers(&self) -> [HeaderCell; COLS] {
        std::array::from_fn(|i| HeaderCell { index: i + 1 })
    }

    /// The cell directly beneath `index`, or `None` from the bottom row.
    pub fn cell_below(&self, index: usize) -> Option<Cell> {
        let pos = Position::from_index(index)?;
        self.cell(pos.step(Direction::Down)?.index())
    }

    /// The cell at `index + delta`, or `None` outside 1..=42.
    ///
    /// Pure index arithmetic: a horizontal or diagonal delta can land on
    /// another row. Use [`Position::step`] for adjacency.
    pub fn cell_at(&self, index: usize, delta: isize) -> Option<Cell> {
        self.cell(index.checked_add_signed(delta)?)
    }

    /// Top-row cell of the column selected by `header` (1..=7).
    pub fn top_cell_of_column(&self, header: usize) -> Option<Cell> {
        if !(1..=COLS).contains(&header) {
            return None;
        }
        self.cell(header)
    }

    /// Check if a column is full. Out-of-range headers count as full.
    pub fn is_column_full(&self, header: usize) -> bool {
        self.top_cell_of_column(header)
            .map_or(true, |cell| !cell.occupant.is_empty())
    }

    /// Number of pieces stacked in a column.
    pub fn column_height(&self, header: usize) -> usize {
        (1..=ROWS)
            .filter_map(|row| Position::new(row, header))
            .filter(|&pos| !self.get(pos).is_empty())
            .count()
    }

    /// Headers whose column still has room, in ascending order.
    pub fn legal_columns(&self) -> Vec<usize> {
        (1..=COLS).filter(|&h| !self.is_column_full(h)).collect()
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (1..=COLS).all(|h| self.is_column_full(h))
    }

    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|o| !o.is_empty()).count()
    }

    /// First piece (in index order) with an empty cell directly beneath it.
    pub fn floating_piece(&self) -> Option<Position> {
        self.cells()
            .filter(|cell| !cell.occupant.is_empty())
            .find(|cell| {
                self.cell_below(cell.index)
                    .is_some_and(|below| below.occupant.is_empty())
            })
            .and_then(|cell| Position::from_index(cell.index))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
