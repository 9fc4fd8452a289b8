//! Scoped ownership of the user's terminal.

use std::io::{self, Stdout, Write, stdout};

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{Terminal, backend::CrosstermBackend};

/// Switches the terminal to a drawing screen and switches it back on drop.
///
/// Dropping happens on every exit path, unwinding included, so the user's
/// shell is never left on the alternate screen with a hidden cursor.
#[derive(Debug)]
pub struct TerminalSession<W: Write = Stdout> {
    out: W,
    restored: bool,
}

impl TerminalSession {
    /// Enter the alternate screen on stdout and hide the cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal rejects the escape sequences; in that
    /// case anything already switched is switched back.
    pub fn acquire() -> io::Result<Self> {
        Self::acquire_on(stdout())
    }

    /// A ratatui terminal drawing to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal size cannot be queried.
    pub fn terminal(&self) -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
        Terminal::new(CrosstermBackend::new(stdout()))
    }
}

impl<W: Write> TerminalSession<W> {
    /// Enter the alternate screen on `out` and hide the cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if writing the escape sequences fails. The restore
    /// sequences are still attempted before returning.
    pub fn acquire_on(out: W) -> io::Result<Self> {
        let mut session = Self {
            out,
            restored: false,
        };
        if let Err(e) = execute!(session.out, EnterAlternateScreen, Hide) {
            session.release();
            return Err(e);
        }
        Ok(session)
    }

    /// Whether the terminal has been given back.
    #[must_use]
    pub const fn is_restored(&self) -> bool {
        self.restored
    }

    /// Restore the terminal now. Later calls and the drop are no-ops.
    pub fn release(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;

        if let Err(e) = execute!(self.out, Show, LeaveAlternateScreen) {
            tracing::warn!("failed to restore terminal: {e}");
        }
    }
}

impl<W: Write> Drop for TerminalSession<W> {
    fn drop(&mut self) {
        self.release();
    }
}
