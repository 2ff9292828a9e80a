use super::{cycle, is_next, is_previous, Interactive, Prompt, Status, Step, Window};
use crate::{
    error::{Error, Result},
    kind::PromptKind,
    render::{Body, Frame, Item},
    request::{MultiSelectRequest, OptionKey, SelectRequest},
    validation::check,
};
use console::Key;

pub struct SelectPrompt {
    request: SelectRequest,
    highlighted: usize,
    window: Window,
    status: Status,
}

impl SelectPrompt {
    /// Fails with [`Error::NoOptions`] when there is nothing to pick from.
    pub fn new(request: SelectRequest) -> Result<Self> {
        if request.options.is_empty() {
            return Err(Error::NoOptions { label: request.label });
        }

        let highlighted = request
            .default
            .as_ref()
            .and_then(|key| request.options.get_index_of(key))
            .unwrap_or(0);
        let mut window = Window::default();
        window.follow(Some(highlighted), request.scroll, request.options.len());

        Ok(Self { request, highlighted, window, status: Status::default() })
    }

    fn highlight(&mut self, index: usize) {
        self.highlighted = index;
        self.window.follow(Some(index), self.request.scroll, self.request.options.len());
    }

    fn key(&self) -> Option<&OptionKey> {
        self.request.options.get_index(self.highlighted).map(|(key, _)| key)
    }
}

impl Prompt for SelectPrompt {
    fn kind(&self) -> PromptKind {
        PromptKind::Select
    }

    fn frame(&self, width: usize) -> Frame<'_> {
        let total = self.request.options.len();
        let range = self.window.range(self.request.scroll, total);
        let items = self
            .request
            .options
            .iter()
            .enumerate()
            .skip(range.start)
            .take(range.len())
            .map(|(index, (key, label))| Item {
                key: Some(key),
                label,
                active: index == self.highlighted,
                selected: index == self.highlighted,
            })
            .collect();
        let chosen = self
            .request
            .options
            .get_index(self.highlighted)
            .map(|(_, label)| vec![label.as_str()])
            .unwrap_or_default();

        Frame {
            kind: self.kind(),
            state: self.status.state,
            label: &self.request.label,
            hint: &self.request.hint,
            error: self.status.error.as_deref(),
            width,
            body: Body::Choices {
                query: None,
                placeholder: "",
                items,
                first: range.start,
                total,
                scroll: self.request.scroll,
                chosen,
            },
        }
    }
}

impl Interactive for SelectPrompt {
    type Output = OptionKey;

    fn status_mut(&mut self) -> &mut Status {
        &mut self.status
    }

    fn handle_key(&mut self, key: &Key) -> Step {
        let total = self.request.options.len();
        match key {
            Key::Enter => return Step::Submit,
            Key::Home => self.highlight(0),
            Key::End => self.highlight(total.saturating_sub(1)),
            key if is_previous(key) => self.highlight(cycle(self.highlighted, total, false)),
            key if is_next(key) => self.highlight(cycle(self.highlighted, total, true)),
            _ => {}
        }
        Step::Continue
    }

    fn validate(&self) -> Option<String> {
        match self.key() {
            Some(key) => check(key, false, &self.request.required, self.request.validate.as_ref()),
            None => self.request.required.message().map(str::to_string),
        }
    }

    fn value(&self) -> OptionKey {
        // `new` guarantees at least one option.
        self.key().cloned().unwrap_or(OptionKey::Int(0))
    }
}

pub struct MultiSelectPrompt {
    request: MultiSelectRequest,
    selected: Vec<bool>,
    highlighted: usize,
    window: Window,
    status: Status,
}

impl MultiSelectPrompt {
    pub fn new(request: MultiSelectRequest) -> Result<Self> {
        if request.options.is_empty() {
            return Err(Error::NoOptions { label: request.label });
        }

        let selected = request.options.keys().map(|key| request.default.contains(key)).collect();
        Ok(Self {
            request,
            selected,
            highlighted: 0,
            window: Window::default(),
            status: Status::default(),
        })
    }

    fn highlight(&mut self, index: usize) {
        self.highlighted = index;
        self.window.follow(Some(index), self.request.scroll, self.request.options.len());
    }

    fn toggle_all(&mut self) {
        let all = self.selected.iter().all(|selected| *selected);
        self.selected.iter_mut().for_each(|selected| *selected = !all);
    }
}

impl Prompt for MultiSelectPrompt {
    fn kind(&self) -> PromptKind {
        PromptKind::MultiSelect
    }

    fn frame(&self, width: usize) -> Frame<'_> {
        let total = self.request.options.len();
        let range = self.window.range(self.request.scroll, total);
        let items = self
            .request
            .options
            .iter()
            .enumerate()
            .skip(range.start)
            .take(range.len())
            .map(|(index, (key, label))| Item {
                key: Some(key),
                label,
                active: index == self.highlighted,
                selected: self.selected[index],
            })
            .collect();
        let chosen = self
            .request
            .options
            .values()
            .zip(&self.selected)
            .filter(|(_, selected)| **selected)
            .map(|(label, _)| label.as_str())
            .collect();

        Frame {
            kind: self.kind(),
            state: self.status.state,
            label: &self.request.label,
            hint: &self.request.hint,
            error: self.status.error.as_deref(),
            width,
            body: Body::Choices {
                query: None,
                placeholder: "",
                items,
                first: range.start,
                total,
                scroll: self.request.scroll,
                chosen,
            },
        }
    }
}

impl Interactive for MultiSelectPrompt {
    type Output = Vec<OptionKey>;

    fn status_mut(&mut self) -> &mut Status {
        &mut self.status
    }

    fn handle_key(&mut self, key: &Key) -> Step {
        let total = self.request.options.len();
        match key {
            Key::Enter => return Step::Submit,
            Key::Char(' ') => {
                if let Some(selected) = self.selected.get_mut(self.highlighted) {
                    *selected = !*selected;
                }
            }
            Key::Char('a') => self.toggle_all(),
            Key::Home => self.highlight(0),
            Key::End => self.highlight(total.saturating_sub(1)),
            key if is_previous(key) => self.highlight(cycle(self.highlighted, total, false)),
            key if is_next(key) => self.highlight(cycle(self.highlighted, total, true)),
            _ => {}
        }
        Step::Continue
    }

    fn validate(&self) -> Option<String> {
        let value = self.value();
        check(&value, value.is_empty(), &self.request.required, self.request.validate.as_ref())
    }

    fn value(&self) -> Vec<OptionKey> {
        self.request
            .options
            .keys()
            .zip(&self.selected)
            .filter(|(_, selected)| **selected)
            .map(|(key, _)| key.clone())
            .collect()
    }
}
