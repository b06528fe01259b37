//! Named publish/subscribe channels for cross-component signals.
//!
//! Publishers queue signals with [`Channel::trigger`]; the owner of the channels
//! delivers them to a [`Listener`] with [`Channel::dispatch`]. Everything runs on
//! the caller's thread, in trigger order.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::str::FromStr;

use tracing::trace;

use crate::error::UnknownSignal;

/// Channel shared by the menu and the grid.
pub const CELLS_CHANNEL: &str = "cells";

/// Payload-less signals carried on the cells channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Signal {
    Reset,
    Cheat,
    Validate,
}

impl Signal {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Reset => "reset",
            Self::Cheat => "cheat",
            Self::Validate => "validate",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Signal {
    type Err = UnknownSignal;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reset" => Ok(Self::Reset),
            "cheat" => Ok(Self::Cheat),
            "validate" => Ok(Self::Validate),
            other => Err(UnknownSignal(other.to_owned())),
        }
    }
}

pub trait Listener<S> {
    fn on_signal(&mut self, signal: S);
}

#[derive(Debug)]
pub struct Channel<S> {
    name: String,
    queue: VecDeque<S>,
}

impl<S: fmt::Debug> Channel<S> {
    fn new(name: &str) -> Self {
        Self { name: name.to_owned(), queue: VecDeque::new() }
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn pending(&self) -> usize { self.queue.len() }

    pub fn trigger(&mut self, signal: S) {
        trace!(channel = %self.name, ?signal, "trigger");
        self.queue.push_back(signal);
    }

    /// Delivers every queued signal in order and returns how many were delivered.
    pub fn dispatch<L: Listener<S> + ?Sized>(&mut self, listener: &mut L) -> usize {
        let mut delivered = 0;
        while let Some(signal) = self.queue.pop_front() {
            listener.on_signal(signal);
            delivered += 1;
        }
        delivered
    }
}

/// Registry of named channels. Owned by whoever wires components together; not a global.
#[derive(Debug)]
pub struct Channels<S> {
    channels: HashMap<String, Channel<S>>,
}

impl<S> Default for Channels<S> {
    fn default() -> Self {
        Self { channels: HashMap::new() }
    }
}

impl<S: fmt::Debug> Channels<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the channel called `name`, creating it on first use.
    pub fn channel(&mut self, name: &str) -> &mut Channel<S> {
        self.channels
            .entry(name.to_owned())
            .or_insert_with(|| Channel::new(name))
    }
}
