use crate::kind::PromptKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Prompt theme [{0}] not found.")]
    ThemeNotFound(String),

    #[error("The default theme cannot be overridden.")]
    DefaultThemeOverride,

    /// The default theme has no renderer for a kind. Never a user error.
    #[error("No renderer registered for prompt kind '{0}'.")]
    RendererMissing(PromptKind),

    #[error("Theme '{theme}' is missing renderers for: {kinds}.")]
    IncompleteTheme { theme: String, kinds: String },

    #[error("Prompt '{label}' requires at least one option.")]
    NoOptions { label: String },

    #[error("Failed to load theme file '{path}'. Original error: {reason}")]
    ThemeFileError { path: String, reason: String },

    #[error("Failed to render. Original error: {0}")]
    MinijinjaError(#[from] minijinja::Error),

    #[error("Failed to parse JSON. Original error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to parse YAML. Original error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid pattern. Original error: {0}")]
    RegexError(#[from] regex::Error),

    /// A candidate value was rejected and there is no user to ask again.
    #[error("Validation error: {0}.")]
    ValidationError(String),

    #[error("Prompt cancelled by user.")]
    Cancelled,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Setup defects: raised before any terminal interaction and never retried.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::ThemeNotFound(_)
                | Error::DefaultThemeOverride
                | Error::RendererMissing(_)
                | Error::IncompleteTheme { .. }
                | Error::NoOptions { .. }
                | Error::ThemeFileError { .. }
                | Error::MinijinjaError(_)
                | Error::RegexError(_)
        )
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::ValidationError(_))
    }
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// Cancellation exits with the conventional interrupt status instead of a
/// generic failure.
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    let code = if err.is_cancelled() {
        crate::constants::exit_codes::CANCELLED
    } else {
        crate::constants::exit_codes::FAILURE
    };
    std::process::exit(code);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_errors_are_classified() {
        assert!(Error::ThemeNotFound("x".into()).is_configuration());
        assert!(Error::DefaultThemeOverride.is_configuration());
        assert!(Error::RendererMissing(PromptKind::Text).is_configuration());
        assert!(!Error::Cancelled.is_configuration());
        assert!(!Error::ValidationError("bad".into()).is_configuration());
    }

    #[test]
    fn test_cancellation_is_distinct_from_validation() {
        let cancelled = Error::Cancelled;
        let rejected = Error::ValidationError("Required.".into());
        assert!(cancelled.is_cancelled() && !cancelled.is_validation());
        assert!(rejected.is_validation() && !rejected.is_cancelled());
    }

    #[test]
    fn test_theme_not_found_message() {
        let err = Error::ThemeNotFound("dark".into());
        assert_eq!(err.to_string(), "Prompt theme [dark] not found.");
    }
}
