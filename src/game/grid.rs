use super::direction::Direction;

/// Board width in cells
pub const BOARD_WIDTH: usize = 24;
/// Board height in cells
pub const BOARD_HEIGHT: usize = 18;

/// A cell coordinate on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Move one cell in a direction, wrapping around the edges of a
    /// `width` x `height` board
    pub fn moved_in_direction(&self, direction: Direction, width: usize, height: usize) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: wrap_around(self.x, dx, width),
            y: wrap_around(self.y, dy, height),
        }
    }
}

fn wrap_around(value: usize, delta: isize, max: usize) -> usize {
    (value as isize + delta).rem_euclid(max as isize) as usize
}

/// What occupies a cell.
///
/// Body codes also record the direction the snake was moving when it
/// entered the cell, which is the direction the tail follows when it
/// retracts out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum CellCode {
    #[default]
    Empty = 0,
    BodyRight = 1,
    BodyUp = 2,
    BodyLeft = 3,
    BodyDown = 4,
    Food = 5,
}

impl CellCode {
    /// The movement stored in a body cell, `None` for empty and food cells
    pub fn direction(&self) -> Option<Direction> {
        match self {
            CellCode::BodyRight => Some(Direction::Right),
            CellCode::BodyUp => Some(Direction::Up),
            CellCode::BodyLeft => Some(Direction::Left),
            CellCode::BodyDown => Some(Direction::Down),
            CellCode::Empty | CellCode::Food => None,
        }
    }

    pub fn is_body(&self) -> bool {
        self.direction().is_some()
    }

    pub fn is_empty(&self) -> bool {
        *self == CellCode::Empty
    }
}

/// Fixed-size board of cell codes, indexed by `(x, y)`.
///
/// Coordinates must be in range; an out-of-range access is a caller bug and
/// panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridStore<const W: usize = BOARD_WIDTH, const H: usize = BOARD_HEIGHT> {
    cells: [[CellCode; W]; H],
}

impl<const W: usize, const H: usize> GridStore<W, H> {
    pub fn new() -> Self {
        Self {
            cells: [[CellCode::Empty; W]; H],
        }
    }

    pub fn width(&self) -> usize {
        W
    }

    pub fn height(&self) -> usize {
        H
    }

    pub fn get(&self, x: usize, y: usize) -> CellCode {
        self.cells[y][x]
    }

    pub fn set(&mut self, x: usize, y: usize, code: CellCode) {
        self.cells[y][x] = code;
    }

    pub fn get_at(&self, pos: Position) -> CellCode {
        self.get(pos.x, pos.y)
    }

    pub fn set_at(&mut self, pos: Position, code: CellCode) {
        self.set(pos.x, pos.y, code);
    }

    pub fn clear(&mut self) {
        self.cells = [[CellCode::Empty; W]; H];
    }

    /// All cells with their coordinates, row by row
    pub fn cells(&self) -> impl Iterator<Item = (Position, CellCode)> + '_ {
        self.cells.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, code)| (Position::new(x, y), *code))
        })
    }

    pub fn count_non_empty(&self) -> usize {
        self.cells().filter(|(_, code)| !code.is_empty()).count()
    }
}

impl<const W: usize, const H: usize> Default for GridStore<W, H> {
    fn default() -> Self {
        Self::new()
    }
}
