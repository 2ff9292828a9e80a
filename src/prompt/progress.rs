use super::{Context, Prompt};
use crate::{
    error::Result,
    kind::PromptKind,
    render::{Body, Frame, PromptState},
    request::ProgressRequest,
};
use log::trace;

/// Live progress bar.
///
/// Call [`Progress::start`], then [`Progress::advance`] as work completes and
/// [`Progress::finish`] at the end. Without a user only the finished bar is
/// painted.
pub struct Progress<'a> {
    ctx: Context<'a>,
    label: String,
    hint: String,
    total: usize,
    current: usize,
    state: PromptState,
}

impl<'a> Progress<'a> {
    pub(crate) fn new(ctx: Context<'a>, request: ProgressRequest, total: usize) -> Self {
        Self {
            ctx,
            label: request.label,
            hint: request.hint,
            total,
            current: 0,
            state: PromptState::Initial,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Completion in whole percent. An empty bar counts as complete.
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            100
        } else {
            self.current * 100 / self.total
        }
    }

    fn render(&self) -> Result<String> {
        let renderer = self.ctx.registry.resolve_renderer(PromptKind::Progress)?;
        renderer.render(&self.frame(self.ctx.terminal.width()))
    }

    fn repaint(&mut self) -> Result<()> {
        if !self.ctx.interactive || self.state == PromptState::Initial {
            return Ok(());
        }
        let output = self.render()?;
        self.ctx.terminal.paint(&output)?;
        Ok(())
    }

    pub fn start(&mut self) -> Result<()> {
        self.state = PromptState::Active;
        self.repaint()
    }

    /// Moves the bar forward by `step`, never past the total.
    pub fn advance(&mut self, step: usize) -> Result<()> {
        self.current = (self.current + step).min(self.total);
        trace!("Progress {}/{}", self.current, self.total);
        self.repaint()
    }

    pub fn set_label(&mut self, label: &str) -> Result<()> {
        self.label = label.to_string();
        self.repaint()
    }

    pub fn set_hint(&mut self, hint: &str) -> Result<()> {
        self.hint = hint.to_string();
        self.repaint()
    }

    /// Completes the bar and leaves it on screen.
    pub fn finish(&mut self) -> Result<()> {
        self.current = self.total;
        self.state = PromptState::Submit;
        let output = self.render()?;
        self.ctx.terminal.paint(&output)?;
        self.ctx.terminal.commit();
        Ok(())
    }

    /// Runs `callback` for every step in order, advancing after each one.
    pub(crate) fn map<T, R>(
        mut self,
        steps: Vec<T>,
        mut callback: impl FnMut(T, &mut Progress<'a>) -> R,
    ) -> Result<Vec<R>> {
        self.start()?;
        let mut results = Vec::with_capacity(steps.len());
        for step in steps {
            results.push(callback(step, &mut self));
            self.advance(1)?;
        }
        self.finish()?;
        Ok(results)
    }
}

impl Prompt for Progress<'_> {
    fn kind(&self) -> PromptKind {
        PromptKind::Progress
    }

    fn frame(&self, width: usize) -> Frame<'_> {
        Frame {
            kind: self.kind(),
            state: self.state,
            label: &self.label,
            hint: &self.hint,
            error: None,
            width,
            body: Body::Progress {
                current: self.current,
                total: self.total,
                percent: self.percent(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::ScriptedTerminal;
    use crate::theme::ThemeRegistry;
    use std::time::Duration;

    #[test]
    fn test_progress_counts_and_clamps() {
        let registry = ThemeRegistry::new();
        let mut terminal = ScriptedTerminal::new();
        let probe = terminal.clone();
        let ctx = Context {
            registry: &registry,
            terminal: &mut terminal,
            interactive: true,
            spinner_interval: Duration::from_millis(75),
        };
        let mut progress = Progress::new(ctx, ProgressRequest::new("Copying"), 4);
        progress.start().unwrap();
        progress.advance(1).unwrap();
        assert_eq!(progress.percent(), 25);
        progress.advance(10).unwrap();
        assert_eq!(progress.current(), 4);
        progress.set_label("Copied").unwrap();
        progress.finish().unwrap();
        assert_eq!(probe.frames().len(), 5);
        assert_eq!(probe.screen().len(), 1);
    }

    #[test]
    fn test_empty_progress_is_complete() {
        let registry = ThemeRegistry::new();
        let mut terminal = ScriptedTerminal::non_interactive();
        let probe = terminal.clone();
        let ctx = Context {
            registry: &registry,
            terminal: &mut terminal,
            interactive: false,
            spinner_interval: Duration::from_millis(75),
        };
        let progress = Progress::new(ctx, ProgressRequest::new("Nothing"), 0);
        assert_eq!(progress.percent(), 100);
        let results = progress.map(Vec::<u8>::new(), |step, _| step).unwrap();
        assert!(results.is_empty());
        assert_eq!(probe.frames().len(), 1);
    }
}
