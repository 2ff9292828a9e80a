//! Themes described by data files
//!
//! A theme file names the theme and maps prompt kinds to MiniJinja templates:
//!
//! ```yaml
//! name: plain
//! renderers:
//!   text: "{{ label }}: {{ value }}"
//!   note: "[{{ tag | upper }}] {{ message | style('yellow.bold') }}"
//! ```
//!
//! Templates receive the serialized frame as their context. Every template is
//! compiled when the file is loaded, so mistakes surface before any prompt
//! runs. Kinds a file leaves out fall back to the default theme.

use super::{RendererRef, Theme};
use crate::{
    error::{Error, Result},
    kind::PromptKind,
    render::{Frame, Renderer},
};
use console::Style;
use indexmap::IndexMap;
use log::{debug, warn};
use minijinja::Environment;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

const STYLE_WORDS: &[&str] = &[
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white", "bright", "bold",
    "dim", "italic", "underlined", "blink", "blink_fast", "reverse", "hidden", "strikethrough",
];

/// Applies a dotted `console` style such as `red.bold` or `on_blue.white`.
pub fn style_filter(value: String, spec: &str) -> String {
    for word in spec.split('.').filter(|word| !word.is_empty()) {
        let known = STYLE_WORDS.contains(&word.trim_start_matches("on_"))
            || word.trim_start_matches("on_").parse::<u8>().is_ok();
        if !known {
            warn!("Unknown style '{word}' in '{spec}'");
        }
    }
    Style::from_dotted_str(spec).apply_to(value).to_string()
}

/// On-disk description of a template theme.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeFile {
    pub name: String,
    #[serde(default)]
    pub renderers: IndexMap<PromptKind, String>,
}

impl ThemeFile {
    /// Loads a theme file, picking the format from its extension.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file_error = |reason: String| Error::ThemeFileError {
            path: path.display().to_string(),
            reason,
        };

        let content = std::fs::read_to_string(path).map_err(|err| file_error(err.to_string()))?;
        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default();
        let theme = match extension {
            "json" => serde_json::from_str(&content).map_err(|err| file_error(err.to_string()))?,
            "yaml" | "yml" => {
                serde_yaml::from_str(&content).map_err(|err| file_error(err.to_string()))?
            }
            other => {
                return Err(file_error(format!(
                    "unsupported extension '{other}', expected json, yaml or yml"
                )))
            }
        };

        debug!("Loaded theme file {}", path.display());
        Ok(theme)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Compiles every template into a [`Theme`].
    pub fn into_theme(self) -> Result<Theme> {
        let mut env = Environment::new();
        env.add_filter("style", style_filter);
        let kinds: Vec<PromptKind> = self.renderers.keys().copied().collect();
        for (kind, source) in self.renderers {
            env.add_template_owned(kind.as_str(), source)?;
        }

        let env = Arc::new(env);
        let renderers = kinds.into_iter().map(|kind| {
            let renderer: RendererRef =
                Arc::new(TemplateRenderer { env: Arc::clone(&env), template: kind.as_str() });
            (kind, renderer)
        });
        Ok(Theme::from_renderers(&self.name, renderers))
    }
}

/// Renders frames with one template of a compiled theme file.
pub struct TemplateRenderer {
    env: Arc<Environment<'static>>,
    template: &'static str,
}

impl Renderer for TemplateRenderer {
    fn render(&self, frame: &Frame<'_>) -> Result<String> {
        let template = self.env.get_template(self.template)?;
        Ok(template.render(frame)?)
    }
}
