use std::str::FromStr;

use crate::channel::{Channel, Signal};
use crate::error::UnknownSignal;
use crate::view::{Node, View};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Reset,
    Cheat,
    Validate,
}

impl Control {
    pub const ALL: [Control; 3] = [Control::Reset, Control::Cheat, Control::Validate];

    pub const fn signal(self) -> Signal {
        match self {
            Self::Reset => Signal::Reset,
            Self::Cheat => Signal::Cheat,
            Self::Validate => Signal::Validate,
        }
    }

    const fn caption(self) -> &'static str {
        match self {
            Self::Reset => "Reset",
            Self::Cheat => "Show mines",
            Self::Validate => "Validate",
        }
    }
}

impl FromStr for Control {
    type Err = UnknownSignal;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let signal: Signal = s.parse()?;
        Ok(match signal {
            Signal::Reset => Self::Reset,
            Signal::Cheat => Self::Cheat,
            Signal::Validate => Self::Validate,
        })
    }
}

/// The on-page menu. Publishes one signal per control on the cells channel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Menu {
    cheat: bool,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_cheating(&self) -> bool { self.cheat }

    pub fn on_control(&mut self, control: Control, channel: &mut Channel<Signal>) {
        if control == Control::Cheat {
            self.cheat = !self.cheat;
        }
        channel.trigger(control.signal());
    }
}

impl View for Menu {
    fn view(&self) -> Node {
        let links = Control::ALL.into_iter().map(|control| {
            Node::elem("menu", control.signal().name())
                .tag("a")
                .attr("href", "#")
                .text(control.caption())
        });
        Node::block("menu").flag("cheat", self.cheat).js(&serde_json::json!({})).children(links)
    }
}
