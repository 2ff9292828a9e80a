//! Renderer contract and the frame snapshot renderers paint.
//!
//! A [`Frame`] is an immutable, serializable view of one prompt's current
//! state. Renderers turn a frame into text and never mutate anything, so the
//! same frame can be painted any number of times.

use crate::{error::Result, kind::PromptKind, request::OptionKey};
use serde::Serialize;
use std::fmt::Display;

/// Produces one visual frame for a prompt kind.
pub trait Renderer: Send + Sync {
    fn render(&self, frame: &Frame<'_>) -> Result<String>;
}

impl<F> Renderer for F
where
    F: Fn(&Frame<'_>) -> String + Send + Sync,
{
    fn render(&self, frame: &Frame<'_>) -> Result<String> {
        Ok(self(frame))
    }
}

/// Lifecycle state of a prompt as seen by its renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptState {
    Initial,
    Active,
    Error,
    Submit,
    Cancel,
}

/// Styling tag of a passive message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteTag {
    Note,
    Info,
    Warning,
    Error,
    Alert,
    Intro,
    Outro,
}

impl Display for NoteTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NoteTag::Note => "note",
            NoteTag::Info => "info",
            NoteTag::Warning => "warning",
            NoteTag::Error => "error",
            NoteTag::Alert => "alert",
            NoteTag::Intro => "intro",
            NoteTag::Outro => "outro",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Frame<'a> {
    pub kind: PromptKind,
    pub state: PromptState,
    pub label: &'a str,
    pub hint: &'a str,
    pub error: Option<&'a str>,
    /// Terminal width in columns.
    pub width: usize,
    #[serde(flatten)]
    pub body: Body<'a>,
}

/// Kind specific part of a [`Frame`].
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "body", rename_all = "snake_case")]
pub enum Body<'a> {
    /// Single line entry. `value` is already masked for passwords.
    Input { value: String, placeholder: &'a str, cursor: usize },
    Textarea {
        lines: Vec<String>,
        cursor_line: usize,
        cursor_column: usize,
        rows: usize,
        placeholder: &'a str,
    },
    /// Option lists. `items` only holds the visible window starting at `first`.
    Choices {
        query: Option<&'a str>,
        placeholder: &'a str,
        items: Vec<Item<'a>>,
        first: usize,
        total: usize,
        scroll: usize,
        /// Labels of every chosen option, visible or not.
        chosen: Vec<&'a str>,
    },
    Confirm { value: bool, yes: &'a str, no: &'a str },
    Message { message: &'a str },
    Note { message: &'a str, tag: NoteTag },
    Spinner { frame: &'a str, message: &'a str },
    Table { headers: &'a [String], rows: &'a [Vec<String>] },
    Progress { current: usize, total: usize, percent: usize },
    Clear,
}

#[derive(Debug, Clone, Serialize)]
pub struct Item<'a> {
    pub key: Option<&'a OptionKey>,
    pub label: &'a str,
    pub active: bool,
    pub selected: bool,
}

impl Frame<'_> {
    /// Whether the prompt is finished and the frame is the last one painted.
    pub fn is_final(&self) -> bool {
        matches!(self.state, PromptState::Submit | PromptState::Cancel)
    }
}
