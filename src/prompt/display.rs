//! Passive prompts: painted once, never read input.

use super::{Context, Prompt};
use crate::{
    error::Result,
    kind::PromptKind,
    render::{Body, Frame, NoteTag, PromptState},
};

fn passive_frame<'a>(kind: PromptKind, width: usize, body: Body<'a>) -> Frame<'a> {
    Frame { kind, state: PromptState::Submit, label: "", hint: "", error: None, width, body }
}

/// Tagged message: note, info, warning, error, alert, intro or outro.
#[derive(Debug, Clone)]
pub struct Note {
    pub message: String,
    pub tag: NoteTag,
}

impl Note {
    pub fn new(message: &str, tag: NoteTag) -> Self {
        Self { message: message.to_string(), tag }
    }
}

impl Prompt for Note {
    fn kind(&self) -> PromptKind {
        PromptKind::Note
    }

    fn frame(&self, width: usize) -> Frame<'_> {
        passive_frame(self.kind(), width, Body::Note { message: &self.message, tag: self.tag })
    }
}

#[derive(Debug, Clone, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }
}

impl Prompt for Table {
    fn kind(&self) -> PromptKind {
        PromptKind::Table
    }

    fn frame(&self, width: usize) -> Frame<'_> {
        passive_frame(self.kind(), width, Body::Table { headers: &self.headers, rows: &self.rows })
    }
}

/// Clears the screen.
#[derive(Debug, Clone, Copy, Default)]
pub struct Clear;

impl Prompt for Clear {
    fn kind(&self) -> PromptKind {
        PromptKind::Clear
    }

    fn frame(&self, width: usize) -> Frame<'_> {
        passive_frame(self.kind(), width, Body::Clear)
    }
}

impl Clear {
    /// Written raw: a clear sequence is not a frame that later paints replace.
    pub fn run(&self, ctx: &mut Context<'_>) -> Result<()> {
        let width = ctx.terminal.width();
        let renderer = ctx.registry.resolve_renderer(self.kind())?;
        let output = renderer.render(&self.frame(width))?;
        ctx.terminal.commit();
        ctx.terminal.write_raw(&output)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passive_frames_are_final() {
        let note = Note::new("Saved", NoteTag::Info);
        let frame = note.frame(80);
        assert!(frame.is_final());
        assert!(matches!(frame.body, Body::Note { message: "Saved", tag: NoteTag::Info }));
    }

    #[test]
    fn test_table_frame_keeps_rows_as_given() {
        let table = Table::new(
            vec!["Name".into(), "Role".into()],
            vec![vec!["Ada".into(), "Engineer".into()], vec!["Alan".into()]],
        );
        match table.frame(80).body {
            Body::Table { headers, rows } => {
                assert_eq!(headers.len(), 2);
                assert_eq!(rows[1], vec!["Alan".to_string()]);
            }
            other => panic!("unexpected body {other:?}"),
        }
    }
}
