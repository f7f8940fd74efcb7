//! Actions returned by screen event handlers.

use crossterm::event::KeyEvent;

use crate::model::SubmissionRecord;

use super::app::Screen;

/// An action that a screen handler returns to the [`App`](super::App).
///
/// The `App` interprets these to start submissions and move between screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No state change needed.
    None,
    /// Navigate to the given screen.
    Navigate(Screen),
    /// Send a validated record to the backend.
    Submit(SubmissionRecord),
    /// Close the confirmation dialog and return to a fresh form.
    Dismiss,
}

/// Common behavior for all screen state types.
pub trait ScreenState {
    /// Process a key event and return an [`Action`] for the `App` to apply.
    fn handle_key(&mut self, key: KeyEvent) -> Action;
}
