//! Non-blocking key sources.
//!
//! The frame loop asks its source for at most one key per iteration and
//! never waits for input.

use std::collections::VecDeque;
use std::time::Duration;

use cellgrid_core::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::trace;

use crate::KeyEvent;

/// A source of key events that never blocks.
pub trait InputSource {
    /// Returns the next pending key press, or `None` when nothing is queued.
    fn poll_key(&mut self) -> Result<Option<KeyEvent>>;
}

impl<S: InputSource + ?Sized> InputSource for Box<S> {
    fn poll_key(&mut self) -> Result<Option<KeyEvent>> {
        (**self).poll_key()
    }
}

/// Reads key presses from the terminal through crossterm.
///
/// Raw mode is the backend's concern; this type only drains the event queue.
/// Non-key events and key releases are discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermInput;

impl CrosstermInput {
    /// Creates a terminal input source.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for CrosstermInput {
    fn poll_key(&mut self) -> Result<Option<KeyEvent>> {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    return Ok(Some(key.into()));
                }
                other => trace!(event = ?other, "discarded input event"),
            }
        }
        Ok(None)
    }
}

/// An in-memory key queue.
#[derive(Debug, Default, Clone)]
pub struct QueueInput {
    keys: VecDeque<KeyEvent>,
}

impl QueueInput {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a key to the queue.
    pub fn push(&mut self, key: KeyEvent) {
        self.keys.push_back(key);
    }

    /// Returns the number of queued keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if no keys are queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl FromIterator<KeyEvent> for QueueInput {
    fn from_iter<T: IntoIterator<Item = KeyEvent>>(iter: T) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

impl InputSource for QueueInput {
    fn poll_key(&mut self) -> Result<Option<KeyEvent>> {
        Ok(self.keys.pop_front())
    }
}
