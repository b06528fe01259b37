use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Grid dimensions must be positive, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },
    #[error("Grid of {width}x{height} cells is too large")]
    TooLarge { width: usize, height: usize },
    #[error("Too many mines: {mines} requested but the grid only has {cells} cells")]
    TooManyMines { mines: usize, cells: usize },
    #[error("Invalid coordinates ({x}, {y})")]
    InvalidCoords { x: usize, y: usize },
}

pub type Result<T> = core::result::Result<T, GridError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown signal '{0}'")]
pub struct UnknownSignal(pub String);
