use super::{
    direction::Direction,
    grid::{BOARD_HEIGHT, BOARD_WIDTH, CellCode, GridStore, Position},
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Tail retractions skipped after a reset; the snake stretches out from a
/// single cell over its first moves
pub const INITIAL_GROWTH_DELAY: u32 = 4;
/// Food items dropped on the board by a reset
pub const INITIAL_FOOD_COUNT: usize = 4;
const INITIAL_OCCUPIED_CELLS: usize = 3;

/// What a single step did to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The snake moved onto an empty cell
    Moved,
    /// The snake ate food and will grow by one segment
    Ate,
    /// The snake ran into itself and the game was reset
    Collided,
    /// The board filled up and the game was reset
    Won,
}

impl StepOutcome {
    /// Whether the engine started a new round during this step
    pub fn is_reset(&self) -> bool {
        matches!(self, StepOutcome::Collided | StepOutcome::Won)
    }
}

/// The snake state machine.
///
/// The body is not stored as a list: every body cell on the grid holds the
/// direction the snake moved when leaving it, so the tail can follow the
/// same path the head took.
#[derive(Debug, Clone)]
pub struct SnakeEngine<R = StdRng, const W: usize = BOARD_WIDTH, const H: usize = BOARD_HEIGHT> {
    grid: GridStore<W, H>,
    head: Position,
    tail: Position,
    pending_direction: Direction,
    growth_delay: u32,
    occupied_cells: usize,
    rng: R,
}

impl SnakeEngine {
    /// Create an engine on the standard board with an entropy-seeded RNG
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for SnakeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> SnakeEngine<StdRng, W, H> {
    /// Create an engine whose food placement is fully determined by `seed`
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng, const W: usize, const H: usize> SnakeEngine<R, W, H> {
    /// Create an engine drawing food positions from `rng`, already initialized
    pub fn with_rng(rng: R) -> Self {
        // The occupied-cell counter starts above the real cell count; on a
        // smaller board the win check is never hit and food placement spins.
        const {
            assert!(
                W * H >= INITIAL_OCCUPIED_CELLS + INITIAL_FOOD_COUNT,
                "board too small"
            )
        };

        let center = Position::new(W / 2, H / 2);
        let mut engine = Self {
            grid: GridStore::new(),
            head: center,
            tail: center,
            pending_direction: Direction::Right,
            growth_delay: INITIAL_GROWTH_DELAY,
            occupied_cells: 0,
            rng,
        };
        engine.initialize();
        engine
    }

    /// Reset to the start state: a single body cell in the center heading
    /// right, plus four food items.
    ///
    /// The occupied-cell counter starts at 3 and is bumped once per food item,
    /// so it reads 7 while only 5 cells are filled.
    pub fn initialize(&mut self) {
        self.grid.clear();

        let center = Position::new(W / 2, H / 2);
        self.head = center;
        self.tail = center;
        self.pending_direction = Direction::Right;
        self.growth_delay = INITIAL_GROWTH_DELAY;
        self.occupied_cells = INITIAL_OCCUPIED_CELLS;
        self.grid.set_at(center, CellCode::BodyRight);

        for _ in 0..INITIAL_FOOD_COUNT {
            self.place_food();
            self.occupied_cells += 1;
        }
    }

    /// Queue a direction for the next step.
    ///
    /// A turn straight back against the head's last movement is ignored.
    /// Returns whether the direction was accepted.
    pub fn redirect(&mut self, direction: Direction) -> bool {
        let head_code = self.grid.get_at(self.head);
        if head_code.direction() == Some(direction.opposite()) {
            return false;
        }

        self.pending_direction = direction;
        true
    }

    /// Advance the game by one tick
    pub fn step(&mut self) -> StepOutcome {
        self.growth_delay -= 1;
        if self.growth_delay == 0 {
            self.growth_delay = 1;
            self.retract_tail();
        }

        let previous_head = self.head;
        self.head = self
            .head
            .moved_in_direction(self.pending_direction, W, H);

        let target = self.grid.get_at(self.head);
        if target.is_body() {
            self.initialize();
            return StepOutcome::Collided;
        }

        let body_code = self.pending_direction.body_code();
        self.grid.set_at(previous_head, body_code);
        self.grid.set_at(self.head, body_code);

        if target != CellCode::Food {
            return StepOutcome::Moved;
        }

        if self.is_board_full() {
            self.initialize();
            return StepOutcome::Won;
        }

        self.place_food();
        self.growth_delay += 1;
        self.occupied_cells += 1;
        StepOutcome::Ate
    }

    fn retract_tail(&mut self) {
        let code = self.grid.get_at(self.tail);
        self.grid.set_at(self.tail, CellCode::Empty);

        if let Some(direction) = code.direction() {
            self.tail = self.tail.moved_in_direction(direction, W, H);
        }
    }

    /// Drop food on a uniformly random empty cell. Callers guarantee one exists.
    fn place_food(&mut self) {
        loop {
            let pos = Position::new(self.rng.gen_range(0..W), self.rng.gen_range(0..H));
            if self.grid.get_at(pos).is_empty() {
                self.grid.set_at(pos, CellCode::Food);
                return;
            }
        }
    }

    fn is_board_full(&self) -> bool {
        self.occupied_cells == W * H
    }

    pub fn cell_at(&self, x: usize, y: usize) -> CellCode {
        self.grid.get(x, y)
    }

    pub fn head_position(&self) -> Position {
        self.head
    }

    pub fn tail_position(&self) -> Position {
        self.tail
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn growth_delay(&self) -> u32 {
        self.growth_delay
    }

    pub fn occupied_cells(&self) -> usize {
        self.occupied_cells
    }

    /// Number of cells currently covered by the snake
    pub fn body_len(&self) -> usize {
        self.grid.cells().filter(|(_, code)| code.is_body()).count()
    }

    pub fn food_count(&self) -> usize {
        self.grid
            .cells()
            .filter(|(_, code)| *code == CellCode::Food)
            .count()
    }

    pub fn grid(&self) -> &GridStore<W, H> {
        &self.grid
    }

    pub fn width(&self) -> usize {
        W
    }

    pub fn height(&self) -> usize {
        H
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut GridStore<W, H> {
        &mut self.grid
    }
}
