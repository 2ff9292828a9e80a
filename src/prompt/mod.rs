//! Prompt objects and the loop that drives them
//!
//! Every prompt kind is a small state machine:
//! - `Prompt`: knows its kind and can snapshot itself into a [`Frame`]
//! - `Interactive`: additionally consumes keys and yields a typed value
//!
//! [`run`] drives an interactive prompt: resolve the renderer from the theme
//! registry, paint, read a key, repeat until the answer is accepted or the
//! user cancels. Passive prompts are painted once by [`display`].

use crate::{
    error::{Error, Result},
    kind::PromptKind,
    render::{Frame, PromptState},
    terminal::{CursorGuard, Terminal},
    theme::ThemeRegistry,
};
use console::Key;
use log::debug;
use std::io;
use std::time::Duration;

pub mod confirm;
pub mod display;
pub mod input;
pub mod progress;
pub mod search;
pub mod select;
pub mod spinner;
pub mod text;

pub use confirm::{ConfirmPrompt, PausePrompt};
pub use display::{Clear, Note, Table};
pub use progress::Progress;
pub use search::{MultiSearchPrompt, SearchPrompt, SuggestPrompt};
pub use select::{MultiSelectPrompt, SelectPrompt};
pub use spinner::Spinner;
pub use text::{PasswordPrompt, TextPrompt, TextareaPrompt};

/// Everything a prompt needs while it runs.
pub struct Context<'a> {
    pub(crate) registry: &'a ThemeRegistry,
    pub(crate) terminal: &'a mut dyn Terminal,
    pub(crate) interactive: bool,
    pub(crate) spinner_interval: Duration,
}

impl Context<'_> {
    /// Resolves the renderer for the frame's kind and paints the result.
    pub(crate) fn paint(&mut self, frame: &Frame<'_>) -> Result<()> {
        paint(self.registry, &mut *self.terminal, frame)
    }
}

fn paint(registry: &ThemeRegistry, terminal: &mut dyn Terminal, frame: &Frame<'_>) -> Result<()> {
    let renderer = registry.resolve_renderer(frame.kind)?;
    let output = renderer.render(frame)?;
    terminal.paint(&output)?;
    Ok(())
}

/// State and validation message shared by interactive prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub state: PromptState,
    pub error: Option<String>,
}

impl Default for Status {
    fn default() -> Self {
        Self { state: PromptState::Initial, error: None }
    }
}

impl Status {
    fn activate(&mut self) {
        self.state = PromptState::Active;
        self.error = None;
    }

    fn reject(&mut self, message: String) {
        self.state = PromptState::Error;
        self.error = Some(message);
    }

    fn finish(&mut self, state: PromptState) {
        self.state = state;
        self.error = None;
    }
}

/// What a key press did to a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Submit,
    Cancel,
}

pub trait Prompt {
    fn kind(&self) -> PromptKind;

    fn frame(&self, width: usize) -> Frame<'_>;
}

pub trait Interactive: Prompt {
    type Output;

    fn status_mut(&mut self) -> &mut Status;

    fn handle_key(&mut self, key: &Key) -> Step;

    /// The rejection message for the current value, if any.
    fn validate(&self) -> Option<String>;

    /// The current value. Only meaningful once [`Interactive::validate`] passes.
    fn value(&self) -> Self::Output;
}

/// Collects an answer for one interactive prompt.
///
/// Without a user the current (default) value is validated and returned
/// directly, and a rejection becomes [`Error::ValidationError`].
pub fn run<P: Interactive>(prompt: &mut P, ctx: &mut Context<'_>) -> Result<P::Output> {
    if !ctx.interactive {
        return match prompt.validate() {
            Some(message) => Err(Error::ValidationError(message)),
            None => Ok(prompt.value()),
        };
    }

    let registry = ctx.registry;
    let mut terminal = CursorGuard::acquire(&mut *ctx.terminal)?;
    let width = terminal.width();

    loop {
        paint(registry, &mut *terminal, &prompt.frame(width))?;

        let step = match terminal.read_key() {
            Ok(Key::CtrlC) => Step::Cancel,
            Ok(key) => prompt.handle_key(&key),
            Err(err) if err.kind() == io::ErrorKind::Interrupted => Step::Cancel,
            Err(err) => return Err(err.into()),
        };

        match step {
            Step::Continue => prompt.status_mut().activate(),
            Step::Submit => match prompt.validate() {
                Some(message) => {
                    debug!("Rejected {} answer: {message}", prompt.kind());
                    prompt.status_mut().reject(message);
                }
                None => {
                    prompt.status_mut().finish(PromptState::Submit);
                    paint(registry, &mut *terminal, &prompt.frame(width))?;
                    terminal.commit();
                    return Ok(prompt.value());
                }
            },
            Step::Cancel => {
                debug!("{} prompt cancelled", prompt.kind());
                prompt.status_mut().finish(PromptState::Cancel);
                paint(registry, &mut *terminal, &prompt.frame(width))?;
                terminal.commit();
                return Err(Error::Cancelled);
            }
        }
    }
}

/// Paints a passive prompt once and leaves it on screen.
pub fn display<P: Prompt>(prompt: &P, ctx: &mut Context<'_>) -> Result<()> {
    let width = ctx.terminal.width();
    ctx.paint(&prompt.frame(width))?;
    ctx.terminal.commit();
    Ok(())
}

/// Visible slice of a long option list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Window {
    pub first: usize,
}

impl Window {
    /// Scrolls just enough to keep `highlighted` visible.
    pub fn follow(&mut self, highlighted: Option<usize>, scroll: usize, total: usize) {
        if total <= scroll {
            self.first = 0;
            return;
        }
        if let Some(index) = highlighted {
            if index < self.first {
                self.first = index;
            } else if index >= self.first + scroll {
                self.first = index + 1 - scroll;
            }
        }
        self.first = self.first.min(total - scroll);
    }

    pub fn range(&self, scroll: usize, total: usize) -> std::ops::Range<usize> {
        let first = self.first.min(total);
        first..(first + scroll).min(total)
    }
}

/// Moves a highlight through `total` entries, wrapping at both ends.
pub(crate) fn cycle(current: usize, total: usize, forward: bool) -> usize {
    if total == 0 {
        return 0;
    }
    if forward {
        (current + 1) % total
    } else {
        (current + total - 1) % total
    }
}

/// Like [`cycle`], but passes through "nothing highlighted" between the ends.
pub(crate) fn cycle_optional(current: Option<usize>, total: usize, forward: bool) -> Option<usize> {
    if total == 0 {
        return None;
    }
    match (current, forward) {
        (None, true) => Some(0),
        (None, false) => Some(total - 1),
        (Some(index), true) if index + 1 < total => Some(index + 1),
        (Some(index), false) if index > 0 => Some(index - 1),
        (Some(_), _) => None,
    }
}

pub(crate) fn is_previous(key: &Key) -> bool {
    matches!(key, Key::ArrowUp | Key::ArrowLeft | Key::BackTab | Key::Char('k'))
}

pub(crate) fn is_next(key: &Key) -> bool {
    matches!(key, Key::ArrowDown | Key::ArrowRight | Key::Tab | Key::Char('j'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_follows_highlight() {
        let mut window = Window::default();
        window.follow(Some(6), 5, 10);
        assert_eq!(window.range(5, 10), 2..7);
        window.follow(Some(1), 5, 10);
        assert_eq!(window.range(5, 10), 1..6);
        window.follow(Some(9), 5, 10);
        assert_eq!(window.range(5, 10), 5..10);
    }

    #[test]
    fn test_window_short_lists_never_scroll() {
        let mut window = Window { first: 3 };
        window.follow(Some(2), 5, 3);
        assert_eq!(window.range(5, 3), 0..3);
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(cycle(2, 3, true), 0);
        assert_eq!(cycle(0, 3, false), 2);
        assert_eq!(cycle(0, 0, true), 0);
    }

    #[test]
    fn test_cycle_optional_passes_through_none() {
        assert_eq!(cycle_optional(None, 2, true), Some(0));
        assert_eq!(cycle_optional(Some(1), 2, true), None);
        assert_eq!(cycle_optional(None, 2, false), Some(1));
        assert_eq!(cycle_optional(Some(0), 2, false), None);
        assert_eq!(cycle_optional(None, 0, true), None);
    }

    #[test]
    fn test_status_transitions() {
        let mut status = Status::default();
        status.reject("Required.".into());
        assert_eq!(status.state, PromptState::Error);
        status.activate();
        assert_eq!(status, Status { state: PromptState::Active, error: None });
    }
}
