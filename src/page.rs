use tracing::trace;

use crate::channel::{Channels, Signal, CELLS_CHANNEL};
use crate::grid::{ClickOutcome, Grid, MarkOutcome};
use crate::menu::{Control, Menu};
use crate::view::{HtmlRenderer, Node, View, ViewRenderer};

/// Primitive input delivered by whatever front end hosts the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiEvent {
    Click { x: usize, y: usize },
    ContextMenu { x: usize, y: usize },
    Control(Control),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventResponse {
    /// The host should suppress its native handling (the browser context menu).
    pub prevent_default: bool,
    /// Visible state changed and the page should be re-rendered.
    pub changed: bool,
}

/// Wires the menu and the grid together over the cells channel and binds input to them.
pub struct Page<R = HtmlRenderer> {
    title: String,
    grid: Grid,
    menu: Menu,
    channels: Channels<Signal>,
    renderer: R,
}

impl<R: ViewRenderer> Page<R> {
    pub fn new(grid: Grid, renderer: R) -> Self {
        Self {
            title: "Minesweeper".to_owned(),
            grid,
            menu: Menu::new(),
            channels: Channels::new(),
            renderer,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn grid(&self) -> &Grid { &self.grid }
    pub fn menu(&self) -> &Menu { &self.menu }

    pub fn handle(&mut self, event: UiEvent) -> EventResponse {
        trace!(?event, "ui event");
        match event {
            UiEvent::Click { x, y } => EventResponse {
                prevent_default: false,
                changed: self.grid.click(x, y) != ClickOutcome::NoOp,
            },
            UiEvent::ContextMenu { x, y } => EventResponse {
                prevent_default: true,
                changed: self.grid.context_menu(x, y) != MarkOutcome::NoChange,
            },
            UiEvent::Control(control) => {
                let before = (self.grid.state(), self.grid.is_cheating());
                self.menu.on_control(control, self.channels.channel(CELLS_CHANNEL));
                self.dispatch();
                let after = (self.grid.state(), self.grid.is_cheating());
                EventResponse {
                    prevent_default: true,
                    changed: control == Control::Reset || before != after,
                }
            }
        }
    }

    /// Delivers queued cells-channel signals to the grid.
    pub fn dispatch(&mut self) -> usize {
        self.channels.channel(CELLS_CHANNEL).dispatch(&mut self.grid)
    }

    pub fn render(&self) -> String {
        self.renderer.render_page(&self.title, &self.view())
    }
}

impl<R> View for Page<R> {
    fn view(&self) -> Node {
        Node::block("page")
            .tag("body")
            .child(self.menu.view())
            .child(self.grid.view())
    }
}
