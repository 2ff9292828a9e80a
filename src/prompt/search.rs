//! Prompts that filter a list while the user types.
//!
//! The option source is queried once per change of the typed text; arrow keys
//! only move the highlight over the last results.

use super::{cycle_optional, input::LineInput, Interactive, Prompt, Status, Step, Window};
use crate::{
    constants::REQUIRED_MESSAGE,
    kind::PromptKind,
    render::{Body, Frame, Item},
    request::{MultiSearchRequest, OptionKey, Options, SearchRequest, SuggestRequest},
    validation::check,
};
use console::Key;
use indexmap::IndexMap;

fn is_up(key: &Key) -> bool {
    matches!(key, Key::ArrowUp | Key::BackTab)
}

fn is_down(key: &Key) -> bool {
    matches!(key, Key::ArrowDown)
}

/// Visible option items of a query result.
fn option_items<'a>(
    matches: &'a Options,
    window: &Window,
    scroll: usize,
    highlighted: Option<usize>,
    is_selected: impl Fn(&OptionKey) -> bool,
) -> (usize, Vec<Item<'a>>) {
    let range = window.range(scroll, matches.len());
    let first = range.start;
    let items = matches
        .iter()
        .enumerate()
        .skip(range.start)
        .take(range.len())
        .map(|(index, (key, label))| Item {
            key: Some(key),
            label,
            active: highlighted == Some(index),
            selected: is_selected(key),
        })
        .collect();
    (first, items)
}

/// Free text entry with completions.
pub struct SuggestPrompt {
    request: SuggestRequest,
    input: LineInput,
    matches: Vec<String>,
    highlighted: Option<usize>,
    window: Window,
    status: Status,
}

impl SuggestPrompt {
    pub fn new(request: SuggestRequest) -> Self {
        let input = LineInput::new(&request.default);
        let matches = request.options.matching(input.as_str());
        Self {
            request,
            input,
            matches,
            highlighted: None,
            window: Window::default(),
            status: Status::default(),
        }
    }

    fn refresh(&mut self) {
        self.matches = self.request.options.matching(self.input.as_str());
        self.highlighted = None;
        self.window = Window::default();
    }

    fn move_highlight(&mut self, forward: bool) {
        self.highlighted = cycle_optional(self.highlighted, self.matches.len(), forward);
        self.window.follow(self.highlighted, self.request.scroll, self.matches.len());
    }

    /// Copies the highlighted completion into the input.
    fn complete(&mut self) {
        if let Some(choice) = self.highlighted.and_then(|index| self.matches.get(index)).cloned() {
            self.input.set(&choice);
            self.refresh();
        }
    }
}

impl Prompt for SuggestPrompt {
    fn kind(&self) -> PromptKind {
        PromptKind::Suggest
    }

    fn frame(&self, width: usize) -> Frame<'_> {
        let total = self.matches.len();
        let range = self.window.range(self.request.scroll, total);
        let items = self
            .matches
            .iter()
            .enumerate()
            .skip(range.start)
            .take(range.len())
            .map(|(index, label)| Item {
                key: None,
                label,
                active: self.highlighted == Some(index),
                selected: false,
            })
            .collect();

        Frame {
            kind: self.kind(),
            state: self.status.state,
            label: &self.request.label,
            hint: &self.request.hint,
            error: self.status.error.as_deref(),
            width,
            body: Body::Choices {
                query: Some(self.input.as_str()),
                placeholder: &self.request.placeholder,
                items,
                first: range.start,
                total,
                scroll: self.request.scroll,
                chosen: Vec::new(),
            },
        }
    }
}

impl Interactive for SuggestPrompt {
    type Output = String;

    fn status_mut(&mut self) -> &mut Status {
        &mut self.status
    }

    fn handle_key(&mut self, key: &Key) -> Step {
        match key {
            Key::Enter => {
                self.complete();
                return Step::Submit;
            }
            Key::Tab => self.complete(),
            key if is_up(key) => self.move_highlight(false),
            key if is_down(key) => self.move_highlight(true),
            key => {
                if self.input.handle(key) {
                    self.refresh();
                }
            }
        }
        Step::Continue
    }

    fn validate(&self) -> Option<String> {
        let value = self.value();
        check(&value, value.is_empty(), &self.request.required, self.request.validate.as_ref())
    }

    fn value(&self) -> String {
        self.input.as_str().to_string()
    }
}

/// Pick one option out of query results.
pub struct SearchPrompt {
    request: SearchRequest,
    input: LineInput,
    matches: Options,
    highlighted: Option<usize>,
    window: Window,
    status: Status,
}

impl SearchPrompt {
    pub fn new(request: SearchRequest) -> Self {
        let matches = (request.options)("");
        Self {
            request,
            input: LineInput::default(),
            matches,
            highlighted: None,
            window: Window::default(),
            status: Status::default(),
        }
    }

    fn refresh(&mut self) {
        self.matches = (self.request.options)(self.input.as_str());
        self.highlighted = None;
        self.window = Window::default();
    }

    fn move_highlight(&mut self, forward: bool) {
        self.highlighted = cycle_optional(self.highlighted, self.matches.len(), forward);
        self.window.follow(self.highlighted, self.request.scroll, self.matches.len());
    }

    fn highlighted_option(&self) -> Option<(&OptionKey, &String)> {
        self.highlighted.and_then(|index| self.matches.get_index(index))
    }
}

impl Prompt for SearchPrompt {
    fn kind(&self) -> PromptKind {
        PromptKind::Search
    }

    fn frame(&self, width: usize) -> Frame<'_> {
        let (first, items) = option_items(
            &self.matches,
            &self.window,
            self.request.scroll,
            self.highlighted,
            |_| false,
        );
        let chosen = self.highlighted_option().map(|(_, label)| vec![label.as_str()]);

        Frame {
            kind: self.kind(),
            state: self.status.state,
            label: &self.request.label,
            hint: &self.request.hint,
            error: self.status.error.as_deref(),
            width,
            body: Body::Choices {
                query: Some(self.input.as_str()),
                placeholder: &self.request.placeholder,
                items,
                first,
                total: self.matches.len(),
                scroll: self.request.scroll,
                chosen: chosen.unwrap_or_default(),
            },
        }
    }
}

impl Interactive for SearchPrompt {
    /// `None` only when nothing was highlighted, which validation rejects.
    type Output = Option<OptionKey>;

    fn status_mut(&mut self) -> &mut Status {
        &mut self.status
    }

    fn handle_key(&mut self, key: &Key) -> Step {
        match key {
            Key::Enter => return Step::Submit,
            key if is_up(key) => self.move_highlight(false),
            key if is_down(key) || *key == Key::Tab => self.move_highlight(true),
            key => {
                if self.input.handle(key) {
                    self.refresh();
                }
            }
        }
        Step::Continue
    }

    fn validate(&self) -> Option<String> {
        match self.highlighted_option() {
            Some((key, _)) => check(key, false, &self.request.required, self.request.validate.as_ref()),
            None => Some(self.request.required.message().unwrap_or(REQUIRED_MESSAGE).to_string()),
        }
    }

    fn value(&self) -> Option<OptionKey> {
        self.highlighted_option().map(|(key, _)| key.clone())
    }
}

/// Pick several options out of query results. Choices survive query changes
/// and are returned in the order they were made.
pub struct MultiSearchPrompt {
    request: MultiSearchRequest,
    input: LineInput,
    matches: Options,
    chosen: IndexMap<OptionKey, String>,
    highlighted: Option<usize>,
    window: Window,
    status: Status,
}

impl MultiSearchPrompt {
    pub fn new(request: MultiSearchRequest) -> Self {
        let matches = (request.options)("");
        Self {
            request,
            input: LineInput::default(),
            matches,
            chosen: IndexMap::new(),
            highlighted: None,
            window: Window::default(),
            status: Status::default(),
        }
    }

    fn refresh(&mut self) {
        self.matches = (self.request.options)(self.input.as_str());
        self.highlighted = None;
        self.window = Window::default();
    }

    fn move_highlight(&mut self, forward: bool) {
        self.highlighted = cycle_optional(self.highlighted, self.matches.len(), forward);
        self.window.follow(self.highlighted, self.request.scroll, self.matches.len());
    }

    fn toggle(&mut self, index: usize) {
        if let Some((key, label)) = self.matches.get_index(index) {
            if self.chosen.shift_remove(key).is_none() {
                self.chosen.insert(key.clone(), label.clone());
            }
        }
    }
}

impl Prompt for MultiSearchPrompt {
    fn kind(&self) -> PromptKind {
        PromptKind::MultiSearch
    }

    fn frame(&self, width: usize) -> Frame<'_> {
        let (first, items) = option_items(
            &self.matches,
            &self.window,
            self.request.scroll,
            self.highlighted,
            |key| self.chosen.contains_key(key),
        );

        Frame {
            kind: self.kind(),
            state: self.status.state,
            label: &self.request.label,
            hint: &self.request.hint,
            error: self.status.error.as_deref(),
            width,
            body: Body::Choices {
                query: Some(self.input.as_str()),
                placeholder: &self.request.placeholder,
                items,
                first,
                total: self.matches.len(),
                scroll: self.request.scroll,
                chosen: self.chosen.values().map(String::as_str).collect(),
            },
        }
    }
}

impl Interactive for MultiSearchPrompt {
    type Output = Vec<OptionKey>;

    fn status_mut(&mut self) -> &mut Status {
        &mut self.status
    }

    fn handle_key(&mut self, key: &Key) -> Step {
        match (key, self.highlighted) {
            (Key::Enter, _) => return Step::Submit,
            (Key::Char(' '), Some(index)) => self.toggle(index),
            (key, _) if is_up(key) => self.move_highlight(false),
            (key, _) if is_down(key) || *key == Key::Tab => self.move_highlight(true),
            (key, _) => {
                if self.input.handle(key) {
                    self.refresh();
                }
            }
        }
        Step::Continue
    }

    fn validate(&self) -> Option<String> {
        let value = self.value();
        check(&value, value.is_empty(), &self.request.required, self.request.validate.as_ref())
    }

    fn value(&self) -> Vec<OptionKey> {
        self.chosen.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::options;
    use std::cell::Cell;
    use std::rc::Rc;

    fn colors(query: &str) -> Options {
        options(
            [(1, "Red"), (2, "Green"), (3, "Blue")]
                .into_iter()
                .filter(|(_, label)| label.to_lowercase().contains(&query.to_lowercase())),
        )
    }

    fn type_text<P: Interactive>(prompt: &mut P, text: &str) {
        for ch in text.chars() {
            prompt.handle_key(&Key::Char(ch));
        }
    }

    #[test]
    fn test_suggest_completes_highlighted_entry() {
        let request = SuggestRequest::new("Fruit").options(["Apple", "Apricot", "Banana"]);
        let mut prompt = SuggestPrompt::new(request);
        type_text(&mut prompt, "ap");
        prompt.handle_key(&Key::ArrowDown);
        prompt.handle_key(&Key::ArrowDown);
        assert_eq!(prompt.handle_key(&Key::Enter), Step::Submit);
        assert_eq!(prompt.value(), "Apricot");
    }

    #[test]
    fn test_suggest_keeps_free_text() {
        let mut prompt = SuggestPrompt::new(SuggestRequest::new("Fruit").options(["Apple"]));
        type_text(&mut prompt, "Kiwi");
        prompt.handle_key(&Key::Enter);
        assert_eq!(prompt.value(), "Kiwi");
    }

    #[test]
    fn test_provider_called_once_per_query_change() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let request = SearchRequest::new("Color", move |query| {
            counter.set(counter.get() + 1);
            colors(query)
        });
        let mut prompt = SearchPrompt::new(request);
        assert_eq!(calls.get(), 1);
        type_text(&mut prompt, "re");
        assert_eq!(calls.get(), 3);
        prompt.handle_key(&Key::ArrowDown);
        prompt.handle_key(&Key::ArrowUp);
        let _ = prompt.frame(80);
        let _ = prompt.frame(80);
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_search_requires_a_pick() {
        let mut prompt = SearchPrompt::new(SearchRequest::new("Color", colors));
        assert_eq!(prompt.validate().as_deref(), Some(REQUIRED_MESSAGE));
        type_text(&mut prompt, "gr");
        prompt.handle_key(&Key::ArrowDown);
        assert_eq!(prompt.validate(), None);
        assert_eq!(prompt.value(), Some(OptionKey::Int(2)));
    }

    #[test]
    fn test_multisearch_returns_selection_order() {
        let mut prompt = MultiSearchPrompt::new(MultiSearchRequest::new("Colors", colors));
        prompt.handle_key(&Key::ArrowDown);
        prompt.handle_key(&Key::ArrowDown);
        prompt.handle_key(&Key::ArrowDown);
        prompt.handle_key(&Key::Char(' '));
        type_text(&mut prompt, "red");
        prompt.handle_key(&Key::ArrowDown);
        prompt.handle_key(&Key::Char(' '));
        assert_eq!(prompt.value(), vec![OptionKey::Int(3), OptionKey::Int(1)]);
    }

    #[test]
    fn test_multisearch_space_types_without_highlight() {
        let mut prompt = MultiSearchPrompt::new(MultiSearchRequest::new("Colors", colors));
        type_text(&mut prompt, "a b");
        assert!(prompt.value().is_empty());
        match prompt.frame(80).body {
            Body::Choices { query, .. } => assert_eq!(query, Some("a b")),
            other => panic!("unexpected body {other:?}"),
        }
    }
}
