//! Spinner shown while a callback runs.
//!
//! The callback runs on the calling thread. A repaint thread owns a detached
//! terminal handle and the resolved renderer, and advances the animation on a
//! timer until it is told to stop. The stop flag lives in a guard, so the
//! thread is stopped and joined even when the callback panics.

use super::{Context, Prompt};
use crate::{
    constants::SPINNER_FRAMES,
    error::Result,
    kind::PromptKind,
    render::{Body, Frame, PromptState, Renderer},
    terminal::{CursorGuard, Terminal},
};
use log::{debug, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Spinner {
    message: String,
    tick: usize,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        Self { message: message.to_string(), tick: 0 }
    }

    fn advance(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Runs `callback` while the spinner animates and returns its value as is.
    pub fn spin<R>(self, ctx: &mut Context<'_>, callback: impl FnOnce() -> R) -> Result<R> {
        let detached = if ctx.interactive { ctx.terminal.detach() } else { None };
        let Some(mut detached) = detached else {
            debug!("Painting a static spinner frame");
            let width = ctx.terminal.width();
            ctx.paint(&self.frame(width))?;
            let result = callback();
            ctx.terminal.erase()?;
            return Ok(result);
        };

        let renderer = ctx.registry.resolve_renderer(PromptKind::Spinner)?;
        let interval = ctx.spinner_interval;
        let _cursor = CursorGuard::acquire(&mut *ctx.terminal)?;

        // Painted before the callback starts, so short callbacks still show a frame.
        let width = detached.width();
        detached.paint(&renderer.render(&self.frame(width))?)?;

        let stop = Arc::new(AtomicBool::new(false));
        let handle = {
            let stop = Arc::clone(&stop);
            thread::spawn(move || animate(self, renderer, detached, interval, &stop))
        };
        let animation = Animation { stop, handle: Some(handle) };
        let result = callback();
        drop(animation);
        Ok(result)
    }
}

/// Repaints until `stop` is set, then erases the spinner. Returns the number
/// of frames painted.
fn animate(
    mut spinner: Spinner,
    renderer: Arc<dyn Renderer>,
    mut terminal: Box<dyn Terminal + Send>,
    interval: Duration,
    stop: &AtomicBool,
) -> usize {
    let width = terminal.width();
    let mut painted = 0;
    loop {
        thread::park_timeout(interval);
        if stop.load(Ordering::Acquire) {
            break;
        }
        spinner.advance();
        let result = renderer
            .render(&spinner.frame(width))
            .and_then(|output| terminal.paint(&output).map_err(Into::into));
        if let Err(err) = result {
            warn!("Stopping spinner animation: {err}");
            break;
        }
        painted += 1;
    }
    if let Err(err) = terminal.erase() {
        warn!("Failed to erase the spinner: {err}");
    }
    painted
}

/// Stops and joins the repaint thread when dropped.
struct Animation {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<usize>>,
}

impl Drop for Animation {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            handle.thread().unpark();
            match handle.join() {
                Ok(painted) => debug!("Spinner repainted {painted} times"),
                Err(_) => warn!("Spinner thread panicked"),
            }
        }
    }
}

impl Prompt for Spinner {
    fn kind(&self) -> PromptKind {
        PromptKind::Spinner
    }

    fn frame(&self, width: usize) -> Frame<'_> {
        Frame {
            kind: self.kind(),
            state: PromptState::Active,
            label: "",
            hint: "",
            error: None,
            width,
            body: Body::Spinner {
                frame: SPINNER_FRAMES[self.tick % SPINNER_FRAMES.len()],
                message: &self.message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::ScriptedTerminal;
    use crate::theme::ThemeRegistry;

    fn context<'a>(
        registry: &'a ThemeRegistry,
        terminal: &'a mut ScriptedTerminal,
        interactive: bool,
    ) -> Context<'a> {
        Context { registry, terminal, interactive, spinner_interval: Duration::from_millis(5) }
    }

    #[test]
    fn test_spin_returns_callback_value_and_cleans_up() {
        let registry = ThemeRegistry::new();
        let mut terminal = ScriptedTerminal::new();
        let probe = terminal.clone();
        let mut ctx = context(&registry, &mut terminal, true);

        let value = Spinner::new("Working").spin(&mut ctx, || {
            thread::sleep(Duration::from_millis(30));
            42
        });

        assert_eq!(value.unwrap(), 42);
        assert!(!probe.frames().is_empty());
        assert!(probe.frames()[0].contains("Working"));
        assert!(probe.screen().is_empty());
        assert!(!probe.cursor_hidden());
    }

    #[test]
    fn test_spin_without_user_paints_one_frame() {
        let registry = ThemeRegistry::new();
        let mut terminal = ScriptedTerminal::non_interactive();
        let probe = terminal.clone();
        let mut ctx = context(&registry, &mut terminal, false);

        let value = Spinner::new("Working").spin(&mut ctx, || "done").unwrap();

        assert_eq!(value, "done");
        assert_eq!(probe.frames().len(), 1);
    }

    #[test]
    fn test_frames_cycle() {
        let mut spinner = Spinner::new("x");
        for _ in 0..SPINNER_FRAMES.len() {
            spinner.advance();
        }
        assert!(matches!(spinner.frame(80).body, Body::Spinner { frame, .. } if frame == SPINNER_FRAMES[0]));
    }
}
