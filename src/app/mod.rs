//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering
//!
//! Side effects (file I/O, background scans) run after each update, keyed
//! off the message, so the transitions themselves stay pure and testable.

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{
    MenuId, MenuState, Model, PathAction, PathPrompt, ScanPhase, SearchState, ToastLevel,
};
pub use update::{Message, update};

use std::path::PathBuf;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    file_path: Option<PathBuf>,
    watch_enabled: bool,
    regex_default: bool,
}

impl App {
    /// Create a new application, optionally opening a file.
    pub const fn new(file_path: Option<PathBuf>) -> Self {
        Self {
            file_path,
            watch_enabled: true,
            regex_default: false,
        }
    }

    /// Enable or disable on-disk change watching.
    pub const fn with_watch(mut self, enabled: bool) -> Self {
        self.watch_enabled = enabled;
        self
    }

    /// Start with regex pattern matching enabled.
    pub const fn with_regex(mut self, enabled: bool) -> Self {
        self.regex_default = enabled;
        self
    }
}
