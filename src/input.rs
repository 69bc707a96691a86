//! Input handling for the terminal monitor.
//!
//! Maps key events to pipeline commands. The mapping is the whole control
//! surface: every command the controller accepts has a key here.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Command resulting from user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Toggle the tick cadence between Running and Idle.
    Toggle,
    /// Clear window, ledger, and tick counter.
    Reset,
    /// Run a classification pass over the ledger.
    Classify,
    /// Export the ledger to CSV.
    Export,
    /// Raise the detection threshold one step.
    ThresholdUp,
    /// Lower the detection threshold one step.
    ThresholdDown,
    /// Toggle the help overlay.
    Help,
    /// No action.
    None,
}

/// Translates key events into [`Action`]s.
#[derive(Debug, Clone, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Handles a key event and returns the corresponding action.
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> Action {
        // Ctrl+C always quits, raw mode swallows the signal.
        if event.modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('c') = event.code {
                return Action::Quit;
            }
            return Action::None;
        }

        match event.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,

            KeyCode::Char(' ') => Action::Toggle,
            KeyCode::Char('r') => Action::Reset,
            KeyCode::Char('c') => Action::Classify,
            KeyCode::Char('e') => Action::Export,

            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => Action::ThresholdUp,
            KeyCode::Char('-') | KeyCode::Down => Action::ThresholdDown,

            KeyCode::Char('?') | KeyCode::F(1) => Action::Help,

            _ => Action::None,
        }
    }
}
