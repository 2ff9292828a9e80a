/// Argument parsing and the demo flow of the `prompter-demo` binary.
pub mod cli;

/// Facade settings loaded from files or the environment.
pub mod config;

/// Constants used throughout prompter.
pub mod constants;

/// Defines custom error types.
pub mod error;

/// One entry point per prompt kind.
pub mod facade;

/// Multi step forms built from other prompts.
pub mod form;

/// The closed set of prompt kinds.
pub mod kind;

/// Prompt objects and the loop that runs them.
pub mod prompt;

/// Renderer contract and frame snapshots.
pub mod render;

/// Per-kind request records.
pub mod request;

/// Key reading and frame painting.
pub mod terminal;

/// Named themes and renderer resolution.
pub mod theme;

/// Answer validators
pub mod validation;

pub use error::{Error, Result};
pub use facade::Prompts;
pub use form::{Answer, Answers, FormBuilder};
pub use kind::PromptKind;
pub use render::{Body, Frame, Item, NoteTag, PromptState, Renderer};
pub use request::{
    options, options_from_labels, ConfirmRequest, MultiSearchRequest, MultiSelectRequest,
    OptionKey, Options, PasswordRequest, PauseRequest, ProgressRequest, SearchRequest,
    SelectRequest, SuggestRequest, TextRequest, TextareaRequest,
};
pub use theme::{Theme, ThemeFile, ThemeRegistry};
pub use validation::Required;
