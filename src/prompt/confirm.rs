use super::{Interactive, Prompt, Status, Step};
use crate::{
    kind::PromptKind,
    render::{Body, Frame},
    request::{ConfirmRequest, PauseRequest},
    validation::check,
};
use console::Key;

pub struct ConfirmPrompt {
    request: ConfirmRequest,
    value: bool,
    status: Status,
}

impl ConfirmPrompt {
    pub fn new(request: ConfirmRequest) -> Self {
        let value = request.default;
        Self { request, value, status: Status::default() }
    }

    fn answer_for(&self, ch: char) -> Option<bool> {
        let starts = |label: &str| {
            label.chars().next().is_some_and(|first| first.eq_ignore_ascii_case(&ch))
        };
        match ch.to_ascii_lowercase() {
            'y' => Some(true),
            'n' => Some(false),
            _ if starts(&self.request.yes) => Some(true),
            _ if starts(&self.request.no) => Some(false),
            _ => None,
        }
    }
}

impl Prompt for ConfirmPrompt {
    fn kind(&self) -> PromptKind {
        PromptKind::Confirm
    }

    fn frame(&self, width: usize) -> Frame<'_> {
        Frame {
            kind: self.kind(),
            state: self.status.state,
            label: &self.request.label,
            hint: &self.request.hint,
            error: self.status.error.as_deref(),
            width,
            body: Body::Confirm { value: self.value, yes: &self.request.yes, no: &self.request.no },
        }
    }
}

impl Interactive for ConfirmPrompt {
    type Output = bool;

    fn status_mut(&mut self) -> &mut Status {
        &mut self.status
    }

    fn handle_key(&mut self, key: &Key) -> Step {
        match key {
            Key::Enter => return Step::Submit,
            Key::ArrowLeft | Key::ArrowRight | Key::ArrowUp | Key::ArrowDown | Key::Tab => {
                self.value = !self.value
            }
            Key::Char(ch) => {
                if let Some(answer) = self.answer_for(*ch) {
                    self.value = answer;
                }
            }
            _ => {}
        }
        Step::Continue
    }

    fn validate(&self) -> Option<String> {
        check(&self.value, !self.value, &self.request.required, self.request.validate.as_ref())
    }

    fn value(&self) -> bool {
        self.value
    }
}

/// Waits for Enter (continue) or Escape (decline).
pub struct PausePrompt {
    request: PauseRequest,
    value: bool,
    status: Status,
}

impl PausePrompt {
    pub fn new(request: PauseRequest) -> Self {
        Self { request, value: false, status: Status::default() }
    }
}

impl Prompt for PausePrompt {
    fn kind(&self) -> PromptKind {
        PromptKind::Pause
    }

    fn frame(&self, width: usize) -> Frame<'_> {
        Frame {
            kind: self.kind(),
            state: self.status.state,
            label: "",
            hint: "",
            error: self.status.error.as_deref(),
            width,
            body: Body::Message { message: &self.request.message },
        }
    }
}

impl Interactive for PausePrompt {
    type Output = bool;

    fn status_mut(&mut self) -> &mut Status {
        &mut self.status
    }

    fn handle_key(&mut self, key: &Key) -> Step {
        match key {
            Key::Enter => {
                self.value = true;
                Step::Submit
            }
            Key::Escape => {
                self.value = false;
                Step::Submit
            }
            _ => Step::Continue,
        }
    }

    fn validate(&self) -> Option<String> {
        None
    }

    fn value(&self) -> bool {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_keys() {
        let mut prompt = ConfirmPrompt::new(ConfirmRequest::new("Sure?"));
        assert!(prompt.value());
        prompt.handle_key(&Key::Char('n'));
        assert!(!prompt.value());
        prompt.handle_key(&Key::ArrowLeft);
        assert!(prompt.value());
        assert_eq!(prompt.handle_key(&Key::Enter), Step::Submit);
    }

    #[test]
    fn test_confirm_custom_label_initials() {
        let request = ConfirmRequest::new("Deploy?").labels("Ship it", "Abort").default_value(false);
        let mut prompt = ConfirmPrompt::new(request);
        prompt.handle_key(&Key::Char('S'));
        assert!(prompt.value());
        prompt.handle_key(&Key::Char('a'));
        assert!(!prompt.value());
    }

    #[test]
    fn test_required_confirm_rejects_no() {
        let request = ConfirmRequest::new("Accept terms?").default_value(false).required(true);
        let mut prompt = ConfirmPrompt::new(request);
        assert_eq!(prompt.validate().as_deref(), Some("Required."));
        prompt.handle_key(&Key::Char('y'));
        assert_eq!(prompt.validate(), None);
    }

    #[test]
    fn test_pause_enter_and_escape() {
        let mut prompt = PausePrompt::new(PauseRequest::default());
        assert!(!prompt.value());
        assert_eq!(prompt.handle_key(&Key::Char('x')), Step::Continue);
        assert_eq!(prompt.handle_key(&Key::Enter), Step::Submit);
        assert!(prompt.value());
        assert_eq!(prompt.handle_key(&Key::Escape), Step::Submit);
        assert!(!prompt.value());
    }
}
