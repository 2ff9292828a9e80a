//! The prompt invocation facade
//!
//! [`Prompts`] has one method per prompt kind. Each method takes the request
//! record of its kind, builds the matching prompt object, runs it against the
//! facade's terminal and theme registry, and returns a typed answer with the
//! request's transform applied.

use crate::{
    config::Settings,
    constants::{REQUIRED_MESSAGE, SPINNER_INTERVAL_MS},
    error::{Error, Result},
    form::FormBuilder,
    prompt::{
        display, run, Clear, ConfirmPrompt, Context, MultiSearchPrompt, MultiSelectPrompt, Note,
        PasswordPrompt, PausePrompt, Progress, SearchPrompt, SelectPrompt, Spinner, SuggestPrompt,
        Table, TextPrompt, TextareaPrompt,
    },
    render::NoteTag,
    request::{
        ConfirmRequest, MultiSearchRequest, MultiSelectRequest, OptionKey, PasswordRequest,
        PauseRequest, ProgressRequest, SearchRequest, SelectRequest, SuggestRequest, TextRequest,
        TextareaRequest,
    },
    terminal::{ConsoleTerminal, Terminal},
    theme::{Theme, ThemeFile, ThemeRegistry},
    validation::Transform,
};
use log::{debug, info};
use std::path::Path;
use std::time::Duration;

fn apply<T>(transform: Option<Transform<T>>, value: T) -> T {
    match transform {
        Some(transform) => transform(value),
        None => value,
    }
}

pub struct Prompts {
    registry: ThemeRegistry,
    terminal: Box<dyn Terminal>,
    interactive: bool,
    spinner_interval: Duration,
}

impl Prompts {
    /// Prompts on stderr with the default theme.
    pub fn new() -> Self {
        Self::with_terminal(ConsoleTerminal::default())
    }

    pub fn with_terminal(terminal: impl Terminal + 'static) -> Self {
        let interactive = terminal.is_interactive();
        Self {
            registry: ThemeRegistry::new(),
            terminal: Box::new(terminal),
            interactive,
            spinner_interval: Duration::from_millis(SPINNER_INTERVAL_MS),
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::with_settings(ConsoleTerminal::default(), settings)
    }

    /// Registers the configured theme files, then activates the configured theme.
    pub fn with_settings(terminal: impl Terminal + 'static, settings: &Settings) -> Result<Self> {
        let mut prompts = Self::with_terminal(terminal);
        prompts.registry.set_strict(settings.strict_themes);
        for path in &settings.theme_files {
            prompts.add_theme_file(path)?;
        }
        prompts.registry.set_theme(&settings.theme)?;
        if let Some(interactive) = settings.interactive {
            prompts.interactive = interactive;
        }
        prompts.spinner_interval = settings.spinner_interval();
        Ok(prompts)
    }

    pub fn registry(&self) -> &ThemeRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ThemeRegistry {
        &mut self.registry
    }

    /// Name of the active theme.
    pub fn theme(&self) -> &str {
        self.registry.theme()
    }

    pub fn set_theme(&mut self, name: &str) -> Result<&str> {
        self.registry.set_theme(name)
    }

    pub fn add_theme(&mut self, theme: Theme) -> Result<()> {
        self.registry.add_theme(theme)
    }

    /// Loads, compiles and registers a template theme file.
    pub fn add_theme_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let theme = ThemeFile::load(path)?.into_theme()?;
        info!("Registering theme '{}'", theme.name());
        self.registry.add_theme(theme)
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Without interaction prompts answer with their validated defaults.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    fn context(&mut self) -> Context<'_> {
        Context {
            registry: &self.registry,
            terminal: self.terminal.as_mut(),
            interactive: self.interactive,
            spinner_interval: self.spinner_interval,
        }
    }

    pub fn text(&mut self, mut request: TextRequest) -> Result<String> {
        let transform = request.transform.take();
        let value = run(&mut TextPrompt::new(request), &mut self.context())?;
        Ok(apply(transform, value))
    }

    /// Multi line entry. Enter inserts a newline and Ctrl-D submits.
    pub fn textarea(&mut self, mut request: TextareaRequest) -> Result<String> {
        let transform = request.transform.take();
        let value = run(&mut TextareaPrompt::new(request), &mut self.context())?;
        Ok(apply(transform, value))
    }

    pub fn password(&mut self, mut request: PasswordRequest) -> Result<String> {
        let transform = request.transform.take();
        let value = run(&mut PasswordPrompt::new(request), &mut self.context())?;
        Ok(apply(transform, value))
    }

    pub fn select(&mut self, mut request: SelectRequest) -> Result<OptionKey> {
        let transform = request.transform.take();
        let value = run(&mut SelectPrompt::new(request)?, &mut self.context())?;
        Ok(apply(transform, value))
    }

    /// Chosen keys in option order.
    pub fn multiselect(&mut self, mut request: MultiSelectRequest) -> Result<Vec<OptionKey>> {
        let transform = request.transform.take();
        let value = run(&mut MultiSelectPrompt::new(request)?, &mut self.context())?;
        Ok(apply(transform, value))
    }

    pub fn confirm(&mut self, mut request: ConfirmRequest) -> Result<bool> {
        let transform = request.transform.take();
        let value = run(&mut ConfirmPrompt::new(request), &mut self.context())?;
        Ok(apply(transform, value))
    }

    /// `true` on Enter, `false` on Escape or when nobody can answer.
    pub fn pause(&mut self, request: PauseRequest) -> Result<bool> {
        run(&mut PausePrompt::new(request), &mut self.context())
    }

    pub fn suggest(&mut self, mut request: SuggestRequest) -> Result<String> {
        let transform = request.transform.take();
        let value = run(&mut SuggestPrompt::new(request), &mut self.context())?;
        Ok(apply(transform, value))
    }

    pub fn search(&mut self, mut request: SearchRequest) -> Result<OptionKey> {
        let transform = request.transform.take();
        let value = run(&mut SearchPrompt::new(request), &mut self.context())?
            .ok_or_else(|| Error::ValidationError(REQUIRED_MESSAGE.to_string()))?;
        Ok(apply(transform, value))
    }

    /// Chosen keys in the order they were picked.
    pub fn multisearch(&mut self, mut request: MultiSearchRequest) -> Result<Vec<OptionKey>> {
        let transform = request.transform.take();
        let value = run(&mut MultiSearchPrompt::new(request), &mut self.context())?;
        Ok(apply(transform, value))
    }

    /// Runs `callback` while a spinner animates and returns its value unchanged.
    pub fn spin<R>(&mut self, message: &str, callback: impl FnOnce() -> R) -> Result<R> {
        Spinner::new(message).spin(&mut self.context(), callback)
    }

    pub fn note_tagged(&mut self, message: &str, tag: NoteTag) -> Result<()> {
        display(&Note::new(message, tag), &mut self.context())
    }

    pub fn note(&mut self, message: &str) -> Result<()> {
        self.note_tagged(message, NoteTag::Note)
    }

    pub fn info(&mut self, message: &str) -> Result<()> {
        self.note_tagged(message, NoteTag::Info)
    }

    pub fn warning(&mut self, message: &str) -> Result<()> {
        self.note_tagged(message, NoteTag::Warning)
    }

    pub fn error(&mut self, message: &str) -> Result<()> {
        self.note_tagged(message, NoteTag::Error)
    }

    pub fn alert(&mut self, message: &str) -> Result<()> {
        self.note_tagged(message, NoteTag::Alert)
    }

    pub fn intro(&mut self, message: &str) -> Result<()> {
        self.note_tagged(message, NoteTag::Intro)
    }

    pub fn outro(&mut self, message: &str) -> Result<()> {
        self.note_tagged(message, NoteTag::Outro)
    }

    /// Displays rows as given; short rows are padded with empty cells.
    pub fn table<H, C, R>(&mut self, headers: H, rows: impl IntoIterator<Item = R>) -> Result<()>
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator<Item = C>,
        C: Into<String>,
    {
        let table = Table::new(
            headers.into_iter().map(Into::into).collect(),
            rows.into_iter().map(|row| row.into_iter().map(Into::into).collect()).collect(),
        );
        display(&table, &mut self.context())
    }

    /// A progress bar the caller advances. Nothing is painted before `start`.
    pub fn progress(&mut self, request: ProgressRequest, total: usize) -> Progress<'_> {
        Progress::new(self.context(), request, total)
    }

    /// Calls `callback` on every step in order while a progress bar advances,
    /// and returns the results in step order.
    pub fn progress_map<T, R>(
        &mut self,
        request: ProgressRequest,
        steps: impl IntoIterator<Item = T>,
        callback: impl FnMut(T, &mut Progress<'_>) -> R,
    ) -> Result<Vec<R>> {
        let steps: Vec<T> = steps.into_iter().collect();
        debug!("Running {} progress steps", steps.len());
        let total = steps.len();
        Progress::new(self.context(), request, total).map(steps, callback)
    }

    pub fn clear(&mut self) -> Result<()> {
        Clear.run(&mut self.context())
    }

    /// Starts a multi step form; run it with [`FormBuilder::submit`].
    pub fn form(&self) -> FormBuilder {
        FormBuilder::new()
    }
}

impl Default for Prompts {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::ScriptedTerminal;
    use console::Key;

    #[test]
    fn test_settings_configure_the_facade() {
        let settings = Settings { interactive: Some(false), ..Settings::default() };
        let prompts = Prompts::with_settings(ScriptedTerminal::new(), &settings).unwrap();
        assert!(!prompts.is_interactive());
        assert_eq!(prompts.theme(), "default");
    }

    #[test]
    fn test_settings_with_unknown_theme_fail() {
        let settings = Settings { theme: "neon".to_string(), ..Settings::default() };
        let err = Prompts::with_settings(ScriptedTerminal::new(), &settings).err().unwrap();
        assert!(matches!(err, Error::ThemeNotFound(_)));
    }

    #[test]
    fn test_transform_applies_after_acceptance() {
        let terminal = ScriptedTerminal::new().type_text("ada").press(Key::Enter);
        let mut prompts = Prompts::with_terminal(terminal);
        let request = TextRequest::new("Name")
            .validate(|value| (value != "ada").then(|| "lowercase expected".to_string()))
            .transform(|value| value.to_uppercase());
        assert_eq!(prompts.text(request).unwrap(), "ADA");
    }

    #[test]
    fn test_pause_without_user_declines() {
        let mut prompts = Prompts::with_terminal(ScriptedTerminal::non_interactive());
        assert!(!prompts.pause(PauseRequest::default()).unwrap());
    }
}
