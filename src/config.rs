//! Facade settings
//!
//! Settings can be read from a JSON or YAML file, from `PROMPTER_*`
//! environment variables, or built in code. Every field has a default, so an
//! empty file is a valid configuration.

use crate::constants::{env, DEFAULT_THEME, SPINNER_INTERVAL_MS};
use crate::error::{Error, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Theme activated on startup.
    #[serde(default = "get_default_theme")]
    pub theme: String,
    /// Forces interactive mode on or off. Detected from the terminal when unset.
    #[serde(default)]
    pub interactive: Option<bool>,
    /// Reject themes that do not cover every prompt kind.
    #[serde(default)]
    pub strict_themes: bool,
    #[serde(default = "get_default_spinner_interval_ms")]
    pub spinner_interval_ms: u64,
    /// Template theme files registered on startup.
    #[serde(default)]
    pub theme_files: Vec<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: get_default_theme(),
            interactive: None,
            strict_themes: false,
            spinner_interval_ms: get_default_spinner_interval_ms(),
            theme_files: Vec::new(),
        }
    }
}

impl Settings {
    /// Loads settings from a `.json`, `.yaml` or `.yml` file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let settings = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            Some("yaml" | "yml") => serde_yaml::from_str(&content)?,
            _ => {
                return Err(Error::Other(anyhow::anyhow!(
                    "Unsupported settings file '{}', expected json, yaml or yml",
                    path.display()
                )))
            }
        };
        debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Default settings overridden by the process environment.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        settings.apply_vars(|name| std::env::var(name).ok());
        settings
    }

    /// Overrides fields from variables returned by `lookup`.
    pub fn apply_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(theme) = lookup(env::THEME).filter(|theme| !theme.is_empty()) {
            self.theme = theme;
        }
        if let Some(value) = lookup(env::NO_INTERACTION) {
            match parse_flag(&value) {
                Some(no_interaction) => self.interactive = Some(!no_interaction),
                None => warn!("Ignoring {}={value}: expected a boolean", env::NO_INTERACTION),
            }
        }
        if let Some(value) = lookup(env::STRICT_THEMES) {
            match parse_flag(&value) {
                Some(strict) => self.strict_themes = strict,
                None => warn!("Ignoring {}={value}: expected a boolean", env::STRICT_THEMES),
            }
        }
    }

    pub fn spinner_interval(&self) -> Duration {
        Duration::from_millis(self.spinner_interval_ms.max(1))
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

fn get_default_theme() -> String {
    DEFAULT_THEME.to_string()
}

fn get_default_spinner_interval_ms() -> u64 {
    SPINNER_INTERVAL_MS
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_empty_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prompter.yaml");
        std::fs::write(&path, "{}").unwrap();
        assert_eq!(Settings::load(&path).unwrap(), Settings::default());
    }

    #[test]
    fn test_load_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prompter.json");
        std::fs::write(&path, r#"{"theme": "dark", "interactive": false, "spinner_interval_ms": 40}"#)
            .unwrap();
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.theme, "dark");
        assert_eq!(settings.interactive, Some(false));
        assert_eq!(settings.spinner_interval(), Duration::from_millis(40));
    }

    #[test]
    fn test_unsupported_settings_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prompter.ini");
        std::fs::write(&path, "").unwrap();
        assert!(Settings::load(&path).is_err());
    }

    #[test]
    fn test_environment_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (env::THEME, "dark"),
            (env::NO_INTERACTION, "1"),
            (env::STRICT_THEMES, "maybe"),
        ]);
        let mut settings = Settings::default();
        settings.apply_vars(|name| vars.get(name).map(|value| value.to_string()));
        assert_eq!(settings.theme, "dark");
        assert_eq!(settings.interactive, Some(false));
        assert!(!settings.strict_themes);
    }

    #[test]
    fn test_from_env_reads_process_variables() {
        std::env::set_var(env::STRICT_THEMES, "yes");
        let settings = Settings::from_env();
        std::env::remove_var(env::STRICT_THEMES);

        assert!(settings.strict_themes);
        assert_eq!(settings.spinner_interval_ms, SPINNER_INTERVAL_MS);
    }
}
