//! Terminal setup and teardown.
//!
//! [`TerminalGuard`] switches the terminal into raw mode on the alternate
//! screen with focus reporting, and restores it when dropped, including on
//! early return through `?`.

use std::io::{self, stdout};

use crossterm::{
    ExecutableCommand,
    event::{DisableFocusChange, EnableFocusChange},
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    },
};
use thiserror::Error;

/// Terminal frontend errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Drawing a frame failed.
    #[error("draw failed: {0}")]
    Draw(String),
}

/// Restores the terminal on drop.
#[derive(Debug)]
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    /// Enter raw mode and the alternate screen, and enable focus events.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal rejects any of the modes. Modes
    /// already entered are restored.
    pub fn enter() -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        let guard = Self { _private: () };
        stdout().execute(EnterAlternateScreen)?;
        stdout().execute(EnableFocusChange)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = stdout().execute(DisableFocusChange);
        let _ = stdout().execute(LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Set the terminal window title.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn set_title(title: &str) -> io::Result<()> {
    stdout().execute(SetTitle(title)).map(|_| ())
}
