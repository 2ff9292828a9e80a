//! Terminal abstraction used by every prompt
//!
//! Prompts never talk to the terminal directly. They read keys and paint
//! frames through [`Terminal`], which has two implementations:
//! - `tty`: the real terminal, backed by `console::Term`
//! - `scripted`: queued keys and recorded frames for tests and automation

use console::Key;
use log::warn;
use std::io;
use std::ops::{Deref, DerefMut};

pub mod scripted;
pub mod tty;

pub use self::tty::ConsoleTerminal;
pub use self::scripted::ScriptedTerminal;

/// Key reading and frame painting.
pub trait Terminal {
    /// Blocks until the next key press.
    fn read_key(&mut self) -> io::Result<Key>;

    /// Replaces the frame painted since the last [`Terminal::commit`].
    fn paint(&mut self, frame: &str) -> io::Result<()>;

    /// Leaves the current frame on screen; the next paint starts below it.
    fn commit(&mut self);

    /// Removes the frame painted since the last commit.
    fn erase(&mut self) -> io::Result<()>;

    /// Writes text as-is, outside of frame tracking.
    fn write_raw(&mut self, text: &str) -> io::Result<()>;

    fn hide_cursor(&mut self) -> io::Result<()>;

    fn show_cursor(&mut self) -> io::Result<()>;

    /// Width in columns.
    fn width(&self) -> usize;

    /// Whether a user can answer prompts on this terminal.
    fn is_interactive(&self) -> bool;

    /// A second handle that can paint from another thread, if supported.
    fn detach(&self) -> Option<Box<dyn Terminal + Send>>;
}

/// Hides the cursor while interactive input is collected and shows it again
/// when dropped, whatever way the prompt ends.
pub(crate) struct CursorGuard<'a> {
    terminal: &'a mut dyn Terminal,
}

impl<'a> CursorGuard<'a> {
    pub(crate) fn acquire(terminal: &'a mut dyn Terminal) -> io::Result<Self> {
        terminal.hide_cursor()?;
        Ok(Self { terminal })
    }
}

impl<'a> Deref for CursorGuard<'a> {
    type Target = dyn Terminal + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.terminal
    }
}

impl<'a> DerefMut for CursorGuard<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.terminal
    }
}

impl Drop for CursorGuard<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.terminal.show_cursor() {
            warn!("Failed to restore the cursor: {err}");
        }
    }
}

/// Number of terminal rows `text` occupies once wrapped at `width` columns.
pub(crate) fn line_count(text: &str, width: usize) -> usize {
    let width = width.max(1);
    text.split('\n')
        .map(|line| {
            let columns = ::console::measure_text_width(line);
            columns.div_ceil(width).max(1)
        })
        .sum()
}
