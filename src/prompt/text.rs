use super::{input::LineInput, Interactive, Prompt, Status, Step};
use crate::{
    kind::PromptKind,
    render::{Body, Frame},
    request::{PasswordRequest, TextRequest, TextareaRequest},
    validation::check,
};
use console::Key;

const MASK: char = '•';

/// Ctrl-D, which finishes multi line input.
const END_OF_INPUT: char = '\u{4}';

pub struct TextPrompt {
    request: TextRequest,
    input: LineInput,
    status: Status,
}

impl TextPrompt {
    pub fn new(request: TextRequest) -> Self {
        let input = LineInput::new(&request.default);
        Self { request, input, status: Status::default() }
    }
}

impl Prompt for TextPrompt {
    fn kind(&self) -> PromptKind {
        PromptKind::Text
    }

    fn frame(&self, width: usize) -> Frame<'_> {
        Frame {
            kind: self.kind(),
            state: self.status.state,
            label: &self.request.label,
            hint: &self.request.hint,
            error: self.status.error.as_deref(),
            width,
            body: Body::Input {
                value: self.input.as_str().to_string(),
                placeholder: &self.request.placeholder,
                cursor: self.input.cursor(),
            },
        }
    }
}

impl Interactive for TextPrompt {
    type Output = String;

    fn status_mut(&mut self) -> &mut Status {
        &mut self.status
    }

    fn handle_key(&mut self, key: &Key) -> Step {
        match key {
            Key::Enter => Step::Submit,
            key => {
                self.input.handle(key);
                Step::Continue
            }
        }
    }

    fn validate(&self) -> Option<String> {
        let value = self.value();
        check(&value, value.is_empty(), &self.request.required, self.request.validate.as_ref())
    }

    fn value(&self) -> String {
        self.input.as_str().to_string()
    }
}

pub struct PasswordPrompt {
    request: PasswordRequest,
    input: LineInput,
    status: Status,
}

impl PasswordPrompt {
    pub fn new(request: PasswordRequest) -> Self {
        Self { request, input: LineInput::default(), status: Status::default() }
    }
}

impl Prompt for PasswordPrompt {
    fn kind(&self) -> PromptKind {
        PromptKind::Password
    }

    fn frame(&self, width: usize) -> Frame<'_> {
        Frame {
            kind: self.kind(),
            state: self.status.state,
            label: &self.request.label,
            hint: &self.request.hint,
            error: self.status.error.as_deref(),
            width,
            body: Body::Input {
                value: std::iter::repeat_n(MASK, self.input.len()).collect(),
                placeholder: &self.request.placeholder,
                cursor: self.input.cursor(),
            },
        }
    }
}

impl Interactive for PasswordPrompt {
    type Output = String;

    fn status_mut(&mut self) -> &mut Status {
        &mut self.status
    }

    fn handle_key(&mut self, key: &Key) -> Step {
        match key {
            Key::Enter => Step::Submit,
            key => {
                self.input.handle(key);
                Step::Continue
            }
        }
    }

    fn validate(&self) -> Option<String> {
        let value = self.value();
        check(&value, value.is_empty(), &self.request.required, self.request.validate.as_ref())
    }

    fn value(&self) -> String {
        self.input.as_str().to_string()
    }
}

pub struct TextareaPrompt {
    request: TextareaRequest,
    input: LineInput,
    status: Status,
}

impl TextareaPrompt {
    pub fn new(request: TextareaRequest) -> Self {
        let input = LineInput::new(&request.default);
        Self { request, input, status: Status::default() }
    }
}

impl Prompt for TextareaPrompt {
    fn kind(&self) -> PromptKind {
        PromptKind::Textarea
    }

    fn frame(&self, width: usize) -> Frame<'_> {
        let (cursor_line, cursor_column) = self.input.position();
        Frame {
            kind: self.kind(),
            state: self.status.state,
            label: &self.request.label,
            hint: &self.request.hint,
            error: self.status.error.as_deref(),
            width,
            body: Body::Textarea {
                lines: self.input.as_str().split('\n').map(str::to_string).collect(),
                cursor_line,
                cursor_column,
                rows: self.request.rows,
                placeholder: &self.request.placeholder,
            },
        }
    }
}

impl Interactive for TextareaPrompt {
    type Output = String;

    fn status_mut(&mut self) -> &mut Status {
        &mut self.status
    }

    fn handle_key(&mut self, key: &Key) -> Step {
        match key {
            Key::Char(END_OF_INPUT) => Step::Submit,
            Key::Enter => {
                self.input.insert('\n');
                Step::Continue
            }
            Key::ArrowUp => {
                self.input.move_vertically(false);
                Step::Continue
            }
            Key::ArrowDown => {
                self.input.move_vertically(true);
                Step::Continue
            }
            key => {
                self.input.handle(key);
                Step::Continue
            }
        }
    }

    fn validate(&self) -> Option<String> {
        let value = self.value();
        check(
            &value,
            value.trim().is_empty(),
            &self.request.required,
            self.request.validate.as_ref(),
        )
    }

    fn value(&self) -> String {
        self.input.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::PromptState;
    use crate::validation::Required;

    fn feed<P: Interactive>(prompt: &mut P, keys: &[Key]) -> Step {
        let mut step = Step::Continue;
        for key in keys {
            step = prompt.handle_key(key);
        }
        step
    }

    #[test]
    fn test_text_starts_with_default() {
        let mut prompt = TextPrompt::new(TextRequest::new("Name").default_value("Ada"));
        assert_eq!(feed(&mut prompt, &[Key::Char('!'), Key::Enter]), Step::Submit);
        assert_eq!(prompt.value(), "Ada!");
    }

    #[test]
    fn test_text_required_rejects_empty() {
        let prompt = TextPrompt::new(TextRequest::new("Name").required(true));
        assert_eq!(prompt.validate().as_deref(), Some("Required."));
    }

    #[test]
    fn test_password_is_masked_in_frame() {
        let mut prompt = PasswordPrompt::new(PasswordRequest::new("Secret"));
        feed(&mut prompt, &[Key::Char('a'), Key::Char('b')]);
        match prompt.frame(80).body {
            Body::Input { value, .. } => assert_eq!(value, "••"),
            other => panic!("unexpected body {other:?}"),
        }
        assert_eq!(prompt.value(), "ab");
    }

    #[test]
    fn test_textarea_enter_inserts_newline_and_ctrl_d_submits() {
        let mut prompt = TextareaPrompt::new(TextareaRequest::new("Bio"));
        let step = feed(
            &mut prompt,
            &[Key::Char('a'), Key::Enter, Key::Char('b'), Key::Char(END_OF_INPUT)],
        );
        assert_eq!(step, Step::Submit);
        assert_eq!(prompt.value(), "a\nb");
        match prompt.frame(80).body {
            Body::Textarea { lines, cursor_line, cursor_column, rows, .. } => {
                assert_eq!(lines, vec!["a".to_string(), "b".to_string()]);
                assert_eq!((cursor_line, cursor_column, rows), (1, 1, 5));
            }
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn test_textarea_blank_counts_as_empty() {
        let request = TextareaRequest::new("Bio").default_value(" \n ").required("Say something");
        let prompt = TextareaPrompt::new(request);
        assert_eq!(prompt.validate().as_deref(), Some("Say something"));
        assert_eq!(prompt.frame(80).state, PromptState::Initial);
        assert_eq!(Required::No, TextareaRequest::default().required);
    }
}
