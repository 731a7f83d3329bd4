//! TUI event handling with crossterm.
//!
//! Key presses are read from the terminal and resolved to [`Action`]s
//! through the active [`KeyBindings`]. Unbound keys, mouse events and
//! resizes produce no action.

use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};
use thiserror::Error;

use super::keybindings::KeyBindings;
use super::Action;

/// Error reading terminal events.
#[derive(Debug, Error)]
pub enum EventError {
    /// Polling or reading from the terminal failed.
    #[error("failed to read terminal event: {0}")]
    Io(#[from] std::io::Error),
}

/// Translates terminal input to actions.
#[derive(Debug, Clone, Default)]
pub struct EventHandler {
    bindings: KeyBindings,
}

impl EventHandler {
    /// Create a handler with the default (Universal) bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handler with custom bindings.
    #[must_use]
    pub fn with_bindings(bindings: KeyBindings) -> Self {
        Self { bindings }
    }

    /// The bindings in use.
    #[must_use]
    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Wait up to `timeout` for an event and translate it.
    ///
    /// Returns `Ok(None)` on timeout or for events without an action.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::Io`] if the terminal cannot be read.
    pub fn poll(&self, timeout: Duration) -> Result<Option<Action>, EventError> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        Ok(self.translate(&event::read()?))
    }

    /// Translate a single terminal event.
    #[must_use]
    pub fn translate(&self, event: &Event) -> Option<Action> {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Resize(width, height) => {
                log::trace!("Terminal resized to {}x{}", width, height);
                None
            }
            _ => None,
        }
    }

    fn handle_key(&self, key: &KeyEvent) -> Option<Action> {
        let action = self.bindings.resolve(key);
        if action.is_none() {
            log::trace!("Unbound key: {:?}", key.code);
        }
        action
    }
}
