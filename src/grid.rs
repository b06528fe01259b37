use std::collections::{HashSet, VecDeque};
use std::fmt::{self, Write as _};

use rand::rngs::SmallRng;
use rand::seq::index;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::board::Board;
use crate::cell::{Cell, CellState};
use crate::channel::{Listener, Signal};
use crate::error::{GridError, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GridState {
    #[default]
    Gaming,
    GameOver,
    Won,
}

impl GridState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gaming => "gaming",
            Self::GameOver => "gameover",
            Self::Won => "won",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::GameOver | Self::Won)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    NoOp,
    Opened,
    SteppedOnMine,
    Won,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

/// The board, its cell view-instances and the game-level state machine.
pub struct Grid {
    width: usize,
    height: usize,
    total_mines: usize,
    board: Board,
    cells: Vec<Vec<Cell>>,
    cells_closed: usize,
    state: GridState,
    cheat: bool,
    rng: SmallRng,
}

impl Grid {
    /// Builds a grid with mines placed from an entropy-seeded generator.
    pub fn new(width: usize, height: usize, total_mines: usize) -> Result<Self> {
        Self::with_rng(width, height, total_mines, SmallRng::from_entropy())
    }

    /// Same as [`Grid::new`] but with a reproducible layout. Resets draw from the same stream.
    pub fn with_seed(width: usize, height: usize, total_mines: usize, seed: u64) -> Result<Self> {
        Self::with_rng(width, height, total_mines, SmallRng::seed_from_u64(seed))
    }

    /// Builds a grid with mines exactly at `mines`. A later reset goes back to random placement.
    pub fn with_mines(width: usize, height: usize, mines: &[(usize, usize)]) -> Result<Self> {
        check_config(width, height, 0)?;
        let mut grid = Self::empty(width, height, 0, SmallRng::from_entropy());
        for &(x, y) in mines {
            if x >= width || y >= height {
                return Err(GridError::InvalidCoords { x, y });
            }
            grid.board.plant(x, y);
        }
        grid.total_mines = grid.board.mine_count();
        grid.build_cells();
        Ok(grid)
    }

    fn with_rng(width: usize, height: usize, total_mines: usize, rng: SmallRng) -> Result<Self> {
        check_config(width, height, total_mines)?;
        let mut grid = Self::empty(width, height, total_mines, rng);
        grid.build_world();
        Ok(grid)
    }

    fn empty(width: usize, height: usize, total_mines: usize, rng: SmallRng) -> Self {
        Self {
            width,
            height,
            total_mines,
            board: Board::new(width, height),
            cells: Vec::new(),
            cells_closed: width * height,
            state: GridState::Gaming,
            cheat: false,
            rng,
        }
    }

    fn build_world(&mut self) {
        self.cells_closed = self.width * self.height;
        self.build_grid();
        self.add_random_mines();
        self.build_cells();
        debug!(width = self.width, height = self.height, mines = self.total_mines, "grid built");
    }

    fn build_grid(&mut self) {
        self.board = Board::new(self.width, self.height);
    }

    /// Uniform sampling without replacement, so a full board terminates too.
    fn add_random_mines(&mut self) {
        let total = self.board.total_cells();
        for i in index::sample(&mut self.rng, total, self.total_mines) {
            self.board.plant(i % self.width, i / self.width);
        }
    }

    fn build_cells(&mut self) {
        self.cells_closed = self.width * self.height;
        self.cells = self
            .board
            .rows()
            .map(|row| row.iter().copied().map(Cell::new).collect())
            .collect();
    }

    /// Throws away the board and every cell and starts a fresh game. The cheat flag survives.
    pub fn reset(&mut self) {
        self.state = GridState::Gaming;
        self.build_world();
        debug!(cheat = self.cheat, "grid reset");
    }

    pub fn toggle_cheat(&mut self) -> bool {
        self.cheat = !self.cheat;
        self.cheat
    }

    /// Wins the game when the flagged mines account for every mine on the board.
    pub fn validate(&mut self) -> bool {
        if self.state != GridState::Gaming {
            return false;
        }
        let marked_correct = self
            .cells
            .iter()
            .flatten()
            .filter(|cell| cell.state() == CellState::Maybe && cell.is_mine())
            .count();
        debug!(marked_correct, total = self.total_mines, "validating flags");
        if marked_correct == self.total_mines {
            self.set_state(GridState::Won);
            return true;
        }
        false
    }

    pub fn click(&mut self, x: usize, y: usize) -> ClickOutcome {
        if self.state.is_terminal() {
            return ClickOutcome::NoOp;
        }
        let Some(to) = self.cell(x, y).and_then(Cell::on_click) else {
            return ClickOutcome::NoOp;
        };
        self.set_cell_state(x, y, to);
        match self.state {
            GridState::GameOver => ClickOutcome::SteppedOnMine,
            GridState::Won => ClickOutcome::Won,
            GridState::Gaming => ClickOutcome::Opened,
        }
    }

    pub fn context_menu(&mut self, x: usize, y: usize) -> MarkOutcome {
        if self.state.is_terminal() {
            return MarkOutcome::NoChange;
        }
        let Some(to) = self.cell(x, y).and_then(Cell::on_context_menu) else {
            return MarkOutcome::NoChange;
        };
        self.set_cell_state(x, y, to);
        match to {
            CellState::Maybe => MarkOutcome::Flagged,
            _ => MarkOutcome::Unflagged,
        }
    }

    /// Applies a cell state change and everything it sets off. Opening a cell with no mines
    /// around queues its neighbours instead of recursing, so the cascade runs in constant stack.
    fn set_cell_state(&mut self, x: usize, y: usize, to: CellState) {
        let mut pending = VecDeque::from([(x, y, to)]);
        let mut queued = HashSet::from([(x, y)]);
        let mut opened = 0usize;

        while let Some((x, y, to)) = pending.pop_front() {
            let Some(cell) = self.cells.get_mut(y).and_then(|row| row.get_mut(x)) else {
                continue;
            };
            if !cell.set_state(to) {
                continue;
            }

            match to {
                CellState::Mine => {
                    info!(x, y, "stepped on a mine");
                    self.set_state(GridState::GameOver);
                }
                CellState::Open => {
                    self.cells_closed = self.cells_closed.saturating_sub(1);
                    opened += 1;
                    let mines_around = cell.count_mines_around(&self.board);
                    cell.show_label(mines_around);
                    if mines_around == 0 {
                        let cells = &self.cells;
                        pending.extend(
                            self.board
                                .neighbors(x, y)
                                .filter(|&(nx, ny)| cells[ny][nx].state() != CellState::Open)
                                .filter(|&pos| queued.insert(pos))
                                .map(|(nx, ny)| (nx, ny, CellState::Open)),
                        );
                    }
                    if self.cells_closed == self.total_mines {
                        self.set_state(GridState::Won);
                    }
                }
                CellState::Closed | CellState::Maybe => {}
            }
        }

        if opened > 1 {
            debug!(opened, closed = self.cells_closed, "cascade finished");
        }
    }

    fn set_state(&mut self, to: GridState) {
        if self.state == to || self.state.is_terminal() {
            return;
        }
        self.state = to;
        match to {
            GridState::GameOver => {
                info!("game over");
                for cell in self.cells.iter_mut().flatten().filter(|cell| cell.is_mine()) {
                    cell.set_state(CellState::Mine);
                }
            }
            GridState::Won => info!(closed = self.cells_closed, "game won"),
            GridState::Gaming => {}
        }
    }

    pub fn render_text(&self, one_based: bool) -> String {
        let base = usize::from(one_based);
        let header: String = (0..self.width).map(|x| format!("{:>2} ", x + base)).collect();
        let mut s = format!("    {header}\n   {}\n", "-".repeat(self.width * 3 + 1));
        for (y, row) in self.cells.iter().enumerate() {
            let glyphs: String = row.iter().map(|cell| format!("{}  ", self.glyph(cell))).collect();
            let _ = writeln!(s, "{:>2} | {glyphs}", y + base);
        }
        s
    }

    /// Character used for a cell in text front ends.
    pub fn glyph(&self, cell: &Cell) -> char {
        match cell.state() {
            CellState::Open => match cell.label() {
                Some(n) => char::from_digit(u32::from(n), 10).unwrap_or('?'),
                None => ' ',
            },
            CellState::Mine => '*',
            CellState::Maybe => '?',
            CellState::Closed if self.cheat && cell.is_mine() => 'x',
            CellState::Closed => '.',
        }
    }
}

fn check_config(width: usize, height: usize, total_mines: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(GridError::EmptyGrid { width, height });
    }
    let cells = width
        .checked_mul(height)
        .ok_or(GridError::TooLarge { width, height })?;
    if total_mines > cells {
        return Err(GridError::TooManyMines { mines: total_mines, cells });
    }
    Ok(())
}

impl Listener<Signal> for Grid {
    fn on_signal(&mut self, signal: Signal) {
        match signal {
            Signal::Reset => self.reset(),
            Signal::Cheat => {
                self.toggle_cheat();
            }
            Signal::Validate => {
                self.validate();
            }
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_text(true))
    }
}

impl Grid {
    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }
    pub fn total_mines(&self) -> usize { self.total_mines }
    pub fn cells_closed(&self) -> usize { self.cells_closed }
    pub fn state(&self) -> GridState { self.state }
    pub fn is_cheating(&self) -> bool { self.cheat }
    pub fn board(&self) -> &Board { &self.board }
    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        self.cells.get(y).and_then(|row| row.get(x))
    }
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.iter().map(Vec::as_slice)
    }
}
