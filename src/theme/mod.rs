//! Named themes and renderer resolution
//!
//! A [`Theme`] maps prompt kinds to renderers. The [`ThemeRegistry`] owns every
//! registered theme plus the name of the active one, and resolves the renderer
//! a prompt should use:
//! 1. the active theme's renderer for the kind, if it has one
//! 2. otherwise the `"default"` theme's renderer, which always exists

use crate::{
    constants::DEFAULT_THEME,
    error::{Error, Result},
    kind::PromptKind,
    render::Renderer,
};
use log::{debug, trace};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub mod default;
pub mod template;

pub use template::{TemplateRenderer, ThemeFile};

/// Shared handle to a renderer.
pub type RendererRef = Arc<dyn Renderer>;

/// A named set of renderers, at most one per prompt kind.
#[derive(Clone)]
pub struct Theme {
    name: String,
    renderers: HashMap<PromptKind, RendererRef>,
}

impl Theme {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), renderers: HashMap::new() }
    }

    /// Builder style [`Theme::insert`].
    pub fn with_renderer(mut self, kind: PromptKind, renderer: impl Renderer + 'static) -> Self {
        self.insert(kind, Arc::new(renderer));
        self
    }

    /// Sets the renderer for `kind`, replacing any previous one.
    pub fn insert(&mut self, kind: PromptKind, renderer: RendererRef) {
        self.renderers.insert(kind, renderer);
    }

    pub fn from_renderers(
        name: &str,
        renderers: impl IntoIterator<Item = (PromptKind, RendererRef)>,
    ) -> Self {
        Self { name: name.to_string(), renderers: renderers.into_iter().collect() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, kind: PromptKind) -> Option<&RendererRef> {
        self.renderers.get(&kind)
    }

    pub fn contains(&self, kind: PromptKind) -> bool {
        self.renderers.contains_key(&kind)
    }

    /// Kinds this theme leaves to the default theme, in declaration order.
    pub fn missing_kinds(&self) -> Vec<PromptKind> {
        PromptKind::ALL.into_iter().filter(|kind| !self.contains(*kind)).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_kinds().is_empty()
    }
}

impl fmt::Debug for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<&str> = self.renderers.keys().map(PromptKind::as_str).collect();
        kinds.sort_unstable();
        f.debug_struct("Theme").field("name", &self.name).field("kinds", &kinds).finish()
    }
}

/// Owns the registered themes and the active theme name.
///
/// The `"default"` theme is installed on construction and can never be
/// replaced, so resolution always has somewhere to fall back to.
#[derive(Debug)]
pub struct ThemeRegistry {
    active: String,
    themes: HashMap<String, Theme>,
    /// Reject themes that do not cover every kind instead of falling back.
    strict: bool,
}

impl ThemeRegistry {
    pub fn new() -> Self {
        let mut themes = HashMap::new();
        themes.insert(DEFAULT_THEME.to_string(), default::theme());
        Self { active: DEFAULT_THEME.to_string(), themes, strict: false }
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Name of the active theme.
    pub fn theme(&self) -> &str {
        &self.active
    }

    /// Activates a registered theme. The active theme is left unchanged on error.
    pub fn set_theme(&mut self, name: &str) -> Result<&str> {
        if !self.themes.contains_key(name) {
            return Err(Error::ThemeNotFound(name.to_string()));
        }
        if self.active != name {
            debug!("Switching prompt theme from '{}' to '{name}'", self.active);
            self.active = name.to_string();
        }
        Ok(&self.active)
    }

    /// Registers a theme, replacing any theme of the same name in full.
    pub fn add_theme(&mut self, theme: Theme) -> Result<()> {
        if theme.name() == DEFAULT_THEME {
            return Err(Error::DefaultThemeOverride);
        }

        let missing = theme.missing_kinds();
        if self.strict && !missing.is_empty() {
            let kinds = missing.iter().map(PromptKind::as_str).collect::<Vec<_>>().join(", ");
            return Err(Error::IncompleteTheme { theme: theme.name().to_string(), kinds });
        }
        if !missing.is_empty() {
            debug!(
                "Theme '{}' falls back to the default theme for {} kind(s)",
                theme.name(),
                missing.len()
            );
        }

        self.themes.insert(theme.name().to_string(), theme);
        Ok(())
    }

    /// Renderer for `kind` under the active theme, falling back to the default
    /// theme for kinds the active theme does not cover.
    pub fn resolve_renderer(&self, kind: PromptKind) -> Result<RendererRef> {
        if let Some(renderer) = self.themes.get(&self.active).and_then(|theme| theme.get(kind)) {
            return Ok(Arc::clone(renderer));
        }

        trace!("Theme '{}' has no {kind} renderer, using the default theme", self.active);
        self.themes
            .get(DEFAULT_THEME)
            .and_then(|theme| theme.get(kind))
            .map(Arc::clone)
            .ok_or(Error::RendererMissing(kind))
    }

    pub fn get(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.themes.contains_key(name)
    }

    /// Registered theme names, sorted.
    pub fn themes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.themes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
