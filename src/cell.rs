use crate::board::{Board, CellRecord};

/// Visual state of a cell. Exactly one holds at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    #[default]
    Closed,
    Open,
    Maybe,
    Mine,
}

impl CellState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Open => "open",
            Self::Maybe => "maybe",
            Self::Mine => "mine",
        }
    }
}

/// View-instance for one board position.
///
/// A cell keeps a copy of its record as init params and owns only its visual state and label.
/// Anything that needs other cells goes through the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    params: CellRecord,
    state: CellState,
    label: Option<u8>,
}

impl Cell {
    pub fn new(params: CellRecord) -> Self {
        Self { params, state: CellState::Closed, label: None }
    }

    pub fn x(&self) -> usize { self.params.x }
    pub fn y(&self) -> usize { self.params.y }
    pub fn is_mine(&self) -> bool { self.params.mine }
    pub fn params(&self) -> &CellRecord { &self.params }
    pub fn state(&self) -> CellState { self.state }

    /// Adjacent mine count, shown only once the cell is open and touches a mine.
    pub fn label(&self) -> Option<u8> { self.label }

    /// Transition requested by a left click.
    pub fn on_click(&self) -> Option<CellState> {
        match self.state {
            CellState::Closed if self.params.mine => Some(CellState::Mine),
            CellState::Closed => Some(CellState::Open),
            _ => None,
        }
    }

    /// Transition requested by a right click: flags toggle, open cells stay put.
    pub fn on_context_menu(&self) -> Option<CellState> {
        match self.state {
            CellState::Closed => Some(CellState::Maybe),
            CellState::Maybe => Some(CellState::Closed),
            CellState::Open | CellState::Mine => None,
        }
    }

    /// Returns whether the state actually changed; setting the current state is a no-op.
    pub(crate) fn set_state(&mut self, to: CellState) -> bool {
        if self.state == to {
            return false;
        }
        self.state = to;
        true
    }

    pub(crate) fn show_label(&mut self, mines_around: u8) {
        self.label = (mines_around > 0).then_some(mines_around);
    }

    pub fn count_mines_around(&self, board: &Board) -> u8 {
        let count = board
            .neighbors(self.params.x, self.params.y)
            .filter(|&(x, y)| board.is_mine(x, y))
            .count();
        // at most 8 neighbours
        count as u8
    }
}
