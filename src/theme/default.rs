//! The builtin `"default"` theme.
//!
//! Every prompt is drawn as a block hanging off a vertical bar:
//!
//! ```text
//! ◆  What is your name?
//! │  Ada
//! └  Used on the login screen
//! ```
//!
//! The leading symbol and the bar color follow the prompt state.

use super::{RendererRef, Theme};
use crate::{
    constants::DEFAULT_THEME,
    kind::PromptKind,
    render::{Body, Frame, Item, NoteTag, PromptState},
};
use console::{measure_text_width, pad_str, Alignment, Style};
use std::sync::Arc;

type RenderFn = fn(&Frame<'_>) -> String;

/// Builds the complete default theme.
pub fn theme() -> Theme {
    Theme::from_renderers(
        DEFAULT_THEME,
        PromptKind::ALL.into_iter().map(|kind| (kind, renderer_for(kind))),
    )
}

/// Default renderer of a kind. The match is exhaustive, so adding a kind
/// without teaching the default theme to draw it does not compile.
pub fn renderer_for(kind: PromptKind) -> RendererRef {
    let render: RenderFn = match kind {
        PromptKind::Text | PromptKind::Password => render_input,
        PromptKind::Textarea => render_textarea,
        PromptKind::Select | PromptKind::MultiSelect => render_choices,
        PromptKind::Suggest | PromptKind::Search | PromptKind::MultiSearch => render_search,
        PromptKind::Confirm => render_confirm,
        PromptKind::Pause => render_pause,
        PromptKind::Spinner => render_spinner,
        PromptKind::Note => render_note,
        PromptKind::Table => render_table,
        PromptKind::Progress => render_progress,
        PromptKind::Clear => render_clear,
    };
    Arc::new(render)
}

fn state_style(state: PromptState) -> Style {
    match state {
        PromptState::Initial | PromptState::Active => Style::new().cyan(),
        PromptState::Error => Style::new().yellow(),
        PromptState::Submit => Style::new().green(),
        PromptState::Cancel => Style::new().red(),
    }
}

fn symbol(state: PromptState) -> &'static str {
    match state {
        PromptState::Initial | PromptState::Active => "◆",
        PromptState::Error => "▲",
        PromptState::Submit => "◇",
        PromptState::Cancel => "■",
    }
}

fn dim() -> Style {
    Style::new().dim()
}

/// Accumulates the lines of one block.
struct Block {
    state: PromptState,
    lines: Vec<String>,
}

impl Block {
    fn new(frame: &Frame<'_>) -> Self {
        let mut block = Self { state: frame.state, lines: vec![dim().apply_to("│").to_string()] };
        let head = state_style(frame.state).apply_to(symbol(frame.state));
        block.lines.push(format!("{head}  {}", frame.label));
        block
    }

    fn bar(&self) -> String {
        let style = if matches!(self.state, PromptState::Submit) { dim() } else { state_style(self.state) };
        style.apply_to("│").to_string()
    }

    fn line(&mut self, content: impl std::fmt::Display) {
        let bar = self.bar();
        self.lines.push(format!("{bar}  {content}"));
    }

    /// Closes the block with the error, the hint, or nothing for final states.
    fn finish(mut self, frame: &Frame<'_>) -> String {
        let style = state_style(self.state);
        match (frame.state, frame.error) {
            (PromptState::Error, Some(error)) => {
                self.lines.push(format!("{}  {}", style.apply_to("└"), style.apply_to(error)));
            }
            (PromptState::Submit | PromptState::Cancel, _) => {}
            _ if frame.hint.is_empty() => self.lines.push(style.apply_to("└").to_string()),
            _ => {
                let hint = dim().apply_to(frame.hint);
                self.lines.push(format!("{}  {hint}", style.apply_to("└")));
            }
        }
        self.lines.join("\n")
    }
}

/// `value` with an inverted cell at `cursor`.
fn with_cursor(value: &str, cursor: usize) -> String {
    let mut out = String::new();
    let mut chars = value.chars();
    out.extend(chars.by_ref().take(cursor));
    let under = chars.next().map_or_else(|| " ".to_string(), |ch| ch.to_string());
    out.push_str(&Style::new().reverse().apply_to(under).to_string());
    out.extend(chars);
    out
}

fn editable(value: &str, placeholder: &str, cursor: usize) -> String {
    if value.is_empty() && !placeholder.is_empty() {
        let mut chars = placeholder.chars();
        let first = chars.next().map(String::from).unwrap_or_default();
        let rest: String = chars.collect();
        format!("{}{}", Style::new().reverse().apply_to(first), dim().apply_to(rest))
    } else {
        with_cursor(value, cursor)
    }
}

/// The answer line of a finished prompt.
fn answer(state: PromptState, value: &str) -> String {
    match state {
        PromptState::Cancel => dim().strikethrough().apply_to(value).to_string(),
        _ => dim().apply_to(value).to_string(),
    }
}

fn render_input(frame: &Frame<'_>) -> String {
    let Body::Input { value, placeholder, cursor } = &frame.body else {
        return render_fallback(frame);
    };
    let mut block = Block::new(frame);
    if frame.is_final() {
        if !value.is_empty() {
            block.line(answer(frame.state, value));
        }
    } else {
        block.line(editable(value, placeholder, *cursor));
    }
    block.finish(frame)
}

fn render_textarea(frame: &Frame<'_>) -> String {
    let Body::Textarea { lines, cursor_line, cursor_column, rows, placeholder } = &frame.body
    else {
        return render_fallback(frame);
    };
    let mut block = Block::new(frame);
    if frame.is_final() {
        for line in lines.iter().filter(|line| !line.is_empty()) {
            block.line(answer(frame.state, line));
        }
        return block.finish(frame);
    }

    if lines.len() == 1 && lines[0].is_empty() {
        block.line(editable("", placeholder, 0));
        for _ in 1..*rows {
            block.line("");
        }
        return block.finish(frame);
    }

    let rows = (*rows).max(1);
    let first = cursor_line.saturating_sub(rows - 1);
    for (index, line) in lines.iter().enumerate().skip(first).take(rows) {
        if index == *cursor_line {
            block.line(with_cursor(line, *cursor_column));
        } else {
            block.line(line);
        }
    }
    for _ in lines.len().saturating_sub(first)..rows {
        block.line("");
    }
    block.finish(frame)
}

fn option_line(frame: &Frame<'_>, item: &Item<'_>) -> String {
    let multiple = matches!(frame.kind, PromptKind::MultiSelect | PromptKind::MultiSearch);
    let mark = match (multiple, item.selected) {
        (true, true) => Style::new().green().apply_to("◼"),
        (true, false) => dim().apply_to("◻"),
        (false, true) => Style::new().green().apply_to("●"),
        (false, false) => dim().apply_to("○"),
    };
    let label = if item.active {
        Style::new().cyan().apply_to(item.label)
    } else {
        dim().apply_to(item.label)
    };
    let pointer = if item.active { Style::new().cyan().apply_to("›") } else { Style::new().apply_to(" ") };
    format!("{pointer} {mark} {label}")
}

fn option_lines(block: &mut Block, frame: &Frame<'_>, items: &[Item<'_>], first: usize, total: usize) {
    if first > 0 {
        block.line(dim().apply_to("  ..."));
    }
    for item in items {
        block.line(option_line(frame, item));
    }
    if first + items.len() < total {
        block.line(dim().apply_to("  ..."));
    }
}

fn render_choices(frame: &Frame<'_>) -> String {
    let Body::Choices { items, first, total, chosen, .. } = &frame.body else {
        return render_fallback(frame);
    };
    let mut block = Block::new(frame);
    if frame.is_final() {
        if !chosen.is_empty() {
            block.line(answer(frame.state, &chosen.join(", ")));
        }
    } else {
        option_lines(&mut block, frame, items, *first, *total);
    }
    block.finish(frame)
}

fn render_search(frame: &Frame<'_>) -> String {
    let Body::Choices { query, placeholder, items, first, total, chosen, .. } = &frame.body else {
        return render_fallback(frame);
    };
    let query = query.unwrap_or_default();
    let mut block = Block::new(frame);
    if frame.is_final() {
        let value = match frame.kind {
            PromptKind::Suggest => query.to_string(),
            _ => chosen.join(", "),
        };
        if !value.is_empty() {
            block.line(answer(frame.state, &value));
        }
        return block.finish(frame);
    }

    block.line(editable(query, placeholder, query.chars().count()));
    if *total == 0 && frame.kind != PromptKind::Suggest {
        block.line(dim().apply_to("  No results."));
    }
    option_lines(&mut block, frame, items, *first, *total);
    if frame.kind == PromptKind::MultiSearch && !chosen.is_empty() {
        block.line(dim().apply_to(format!("  {} selected", chosen.len())));
    }
    block.finish(frame)
}

fn render_confirm(frame: &Frame<'_>) -> String {
    let Body::Confirm { value, yes, no } = &frame.body else {
        return render_fallback(frame);
    };
    let mut block = Block::new(frame);
    if frame.is_final() {
        block.line(answer(frame.state, if *value { yes } else { no }));
    } else {
        let option = |label: &str, on: bool| {
            if on {
                format!("{} {label}", Style::new().green().apply_to("●"))
            } else {
                dim().apply_to(format!("○ {label}")).to_string()
            }
        };
        block.line(format!("{} / {}", option(yes, *value), option(no, !*value)));
    }
    block.finish(frame)
}

fn render_pause(frame: &Frame<'_>) -> String {
    let Body::Message { message } = &frame.body else {
        return render_fallback(frame);
    };
    let head = state_style(frame.state).apply_to(symbol(frame.state));
    let message = if frame.is_final() { dim().apply_to(*message) } else { Style::new().apply_to(*message) };
    format!("{}\n{head}  {message}", dim().apply_to("│"))
}

fn render_spinner(frame: &Frame<'_>) -> String {
    let Body::Spinner { frame: glyph, message } = &frame.body else {
        return render_fallback(frame);
    };
    format!("{}\n{}  {message}", dim().apply_to("│"), Style::new().magenta().apply_to(glyph))
}

fn render_note(frame: &Frame<'_>) -> String {
    let Body::Note { message, tag } = &frame.body else {
        return render_fallback(frame);
    };
    let bar = dim().apply_to("│");
    let (mark, style) = match tag {
        NoteTag::Intro => {
            return format!("{}  {}", dim().apply_to("┌"), Style::new().reverse().apply_to(format!(" {message} ")));
        }
        NoteTag::Outro => {
            return format!("{bar}\n{}  {message}\n", dim().apply_to("└"));
        }
        NoteTag::Note => ("●", dim()),
        NoteTag::Info => ("●", Style::new().blue()),
        NoteTag::Warning => ("▲", Style::new().yellow()),
        NoteTag::Error => ("■", Style::new().red()),
        NoteTag::Alert => ("▲", Style::new().red().bold()),
    };

    let mut lines = vec![bar.to_string()];
    for (index, line) in message.lines().enumerate() {
        let lead = if index == 0 { style.apply_to(mark).to_string() } else { bar.to_string() };
        let text = if matches!(tag, NoteTag::Note) { line.to_string() } else { style.apply_to(line).to_string() };
        lines.push(format!("{lead}  {text}"));
    }
    lines.join("\n")
}

fn render_table(frame: &Frame<'_>) -> String {
    let Body::Table { headers, rows } = &frame.body else {
        return render_fallback(frame);
    };
    let columns = rows.iter().map(Vec::len).chain([headers.len()]).max().unwrap_or(0);
    if columns == 0 {
        return String::new();
    }

    let mut widths = vec![0; columns];
    for row in std::iter::once(*headers).chain(rows.iter().map(Vec::as_slice)) {
        for (index, cell) in row.iter().enumerate() {
            widths[index] = widths[index].max(measure_text_width(cell));
        }
    }

    let rule = |left: &str, middle: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|width| "─".repeat(width + 2)).collect();
        dim().apply_to(format!("{left}{}{right}", segments.join(middle))).to_string()
    };
    let row_line = |cells: &[String], style: &Style| {
        let bar = dim().apply_to("│").to_string();
        let mut line = bar.clone();
        for (index, width) in widths.iter().enumerate() {
            let cell = cells.get(index).map(String::as_str).unwrap_or_default();
            let padded = pad_str(cell, *width, Alignment::Left, None);
            line.push_str(&format!(" {} {bar}", style.apply_to(padded)));
        }
        line
    };

    let mut lines = vec![rule("┌", "┬", "┐")];
    if !headers.is_empty() {
        lines.push(row_line(headers, &Style::new().bold()));
        lines.push(rule("├", "┼", "┤"));
    }
    for row in rows.iter() {
        lines.push(row_line(row, &Style::new()));
    }
    lines.push(rule("└", "┴", "┘"));
    lines.join("\n")
}

fn render_progress(frame: &Frame<'_>) -> String {
    let Body::Progress { current, total, percent } = &frame.body else {
        return render_fallback(frame);
    };
    let size = frame.width.saturating_sub(20).clamp(10, 40);
    let filled = size * (*percent).min(100) / 100;
    let style = state_style(frame.state);
    let bar = format!(
        "{}{}",
        style.apply_to("█".repeat(filled)),
        dim().apply_to("░".repeat(size - filled))
    );

    let mut block = Block::new(frame);
    block.line(format!("{bar} {current}/{total}"));
    block.finish(frame)
}

fn render_clear(_frame: &Frame<'_>) -> String {
    "\x1b[H\x1b[J".to_string()
}

/// Used when a frame body does not belong to the kind it was dispatched for.
fn render_fallback(frame: &Frame<'_>) -> String {
    Block::new(frame).finish(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::OptionKey;

    fn plain(frame: &Frame<'_>) -> String {
        let output = renderer_for(frame.kind).render(frame).unwrap();
        console::strip_ansi_codes(&output).to_string()
    }

    fn frame<'a>(kind: PromptKind, state: PromptState, body: Body<'a>) -> Frame<'a> {
        Frame { kind, state, label: "Name", hint: "", error: None, width: 80, body }
    }

    #[test]
    fn test_theme_covers_every_kind() {
        let theme = theme();
        assert_eq!(theme.name(), DEFAULT_THEME);
        assert!(theme.missing_kinds().is_empty());
    }

    #[test]
    fn test_input_states() {
        let body = || Body::Input { value: "Ada".to_string(), placeholder: "", cursor: 3 };
        let active = plain(&frame(PromptKind::Text, PromptState::Active, body()));
        assert_eq!(active, "│\n◆  Name\n│  Ada \n└");

        let submitted = plain(&frame(PromptKind::Text, PromptState::Submit, body()));
        assert_eq!(submitted, "│\n◇  Name\n│  Ada");

        let mut rejected = frame(PromptKind::Text, PromptState::Error, body());
        rejected.error = Some("Too short");
        assert!(plain(&rejected).ends_with("└  Too short"));
    }

    #[test]
    fn test_hint_is_shown_while_active() {
        let mut active = frame(
            PromptKind::Text,
            PromptState::Initial,
            Body::Input { value: String::new(), placeholder: "E.g. Ada", cursor: 0 },
        );
        active.hint = "Your first name";
        let output = plain(&active);
        assert!(output.contains("E.g. Ada"));
        assert!(output.ends_with("└  Your first name"));
    }

    #[test]
    fn test_choices_show_scroll_markers() {
        let keys = [OptionKey::Int(1), OptionKey::Int(2)];
        let items = vec![
            Item { key: Some(&keys[0]), label: "One", active: true, selected: false },
            Item { key: Some(&keys[1]), label: "Two", active: false, selected: true },
        ];
        let body = Body::Choices {
            query: None,
            placeholder: "",
            items,
            first: 1,
            total: 5,
            scroll: 2,
            chosen: vec!["Two"],
        };
        let output = plain(&frame(PromptKind::MultiSelect, PromptState::Active, body));
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[2], "│    ...");
        assert_eq!(lines[3], "│  › ◻ One");
        assert_eq!(lines[4], "│    ◼ Two");
        assert_eq!(lines[5], "│    ...");
    }

    #[test]
    fn test_table_columns_are_aligned() {
        let headers = vec!["Name".to_string(), "Role".to_string()];
        let rows = vec![vec!["Ada".to_string(), "Engineer".to_string()], vec!["Alan".to_string()]];
        let output = plain(&frame(
            PromptKind::Table,
            PromptState::Submit,
            Body::Table { headers: &headers, rows: &rows },
        ));
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "┌──────┬──────────┐");
        assert_eq!(lines[1], "│ Name │ Role     │");
        assert_eq!(lines[3], "│ Ada  │ Engineer │");
        assert_eq!(lines[4], "│ Alan │          │");
        assert_eq!(lines[5], "└──────┴──────────┘");
    }

    #[test]
    fn test_progress_bar() {
        let output = plain(&frame(
            PromptKind::Progress,
            PromptState::Active,
            Body::Progress { current: 1, total: 2, percent: 50 },
        ));
        assert!(output.contains("1/2"));
        assert!(output.contains(&"█".repeat(20)));
    }

    #[test]
    fn test_note_tags() {
        let note = |tag| {
            plain(&frame(PromptKind::Note, PromptState::Submit, Body::Note { message: "Hi", tag }))
        };
        assert_eq!(note(NoteTag::Warning), "│\n▲  Hi");
        assert_eq!(note(NoteTag::Intro), "┌   Hi ");
        assert_eq!(note(NoteTag::Outro), "│\n└  Hi\n");
    }

    #[test]
    fn test_renderers_are_pure() {
        let f = frame(
            PromptKind::Confirm,
            PromptState::Active,
            Body::Confirm { value: false, yes: "Yes", no: "No" },
        );
        assert_eq!(plain(&f), plain(&f));
        assert!(plain(&f).contains("○ Yes / ● No"));
    }
}
