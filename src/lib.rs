//! Minesweeper for a page: a grid/cell game engine plus the small collaborators it
//! needs around it, a view-tree renderer and a named signal channel.

pub mod board;
pub mod cell;
pub mod channel;
pub mod error;
pub mod grid;
pub mod menu;
pub mod page;
pub mod tui;
pub mod view;

pub use board::{Board, CellRecord};
pub use cell::{Cell, CellState};
pub use channel::{Channel, Channels, Listener, Signal, CELLS_CHANNEL};
pub use error::{GridError, Result, UnknownSignal};
pub use grid::{ClickOutcome, Grid, GridState, MarkOutcome};
pub use menu::{Control, Menu};
pub use page::{EventResponse, Page, UiEvent};
pub use view::{HtmlRenderer, ModValue, Node, View, ViewRenderer};
