//! Multi step forms
//!
//! A form is an ordered list of named steps run against one [`Prompts`]
//! facade. Each step sees the answers collected so far, and any error,
//! including cancellation, aborts the whole form.

use crate::{
    error::Result,
    facade::Prompts,
    request::{
        ConfirmRequest, MultiSearchRequest, MultiSelectRequest, OptionKey, PasswordRequest,
        SearchRequest, SelectRequest, SuggestRequest, TextRequest, TextareaRequest,
    },
};
use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

/// Answer of one form step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Answer {
    Text(String),
    Bool(bool),
    Key(OptionKey),
    Keys(Vec<OptionKey>),
    None,
}

impl Answer {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Answer::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Answer::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_key(&self) -> Option<&OptionKey> {
        match self {
            Answer::Key(key) => Some(key),
            _ => None,
        }
    }

    pub fn as_keys(&self) -> Option<&[OptionKey]> {
        match self {
            Answer::Keys(keys) => Some(keys.as_slice()),
            _ => None,
        }
    }
}

/// Step name to answer, in step order.
pub type Answers = IndexMap<String, Answer>;

type StepFn = Box<dyn FnOnce(&mut Prompts, &Answers) -> Result<Answer>>;

struct FormStep {
    /// Display-only steps have no name and record no answer.
    name: Option<String>,
    run: StepFn,
}

#[derive(Default)]
pub struct FormBuilder {
    steps: Vec<FormStep>,
}

impl FormBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a custom step. It can read earlier answers and call any prompt.
    pub fn add(
        mut self,
        name: &str,
        step: impl FnOnce(&mut Prompts, &Answers) -> Result<Answer> + 'static,
    ) -> Self {
        self.steps.push(FormStep { name: Some(name.to_string()), run: Box::new(step) });
        self
    }

    /// Displays a note between steps.
    pub fn note(mut self, message: &str) -> Self {
        let message = message.to_string();
        self.steps.push(FormStep {
            name: None,
            run: Box::new(move |prompts: &mut Prompts, _: &Answers| {
                prompts.note(&message).map(|_| Answer::None)
            }),
        });
        self
    }

    pub fn text(self, name: &str, request: TextRequest) -> Self {
        self.add(name, |prompts, _| prompts.text(request).map(Answer::Text))
    }

    pub fn textarea(self, name: &str, request: TextareaRequest) -> Self {
        self.add(name, |prompts, _| prompts.textarea(request).map(Answer::Text))
    }

    pub fn password(self, name: &str, request: PasswordRequest) -> Self {
        self.add(name, |prompts, _| prompts.password(request).map(Answer::Text))
    }

    pub fn select(self, name: &str, request: SelectRequest) -> Self {
        self.add(name, |prompts, _| prompts.select(request).map(Answer::Key))
    }

    pub fn multiselect(self, name: &str, request: MultiSelectRequest) -> Self {
        self.add(name, |prompts, _| prompts.multiselect(request).map(Answer::Keys))
    }

    pub fn confirm(self, name: &str, request: ConfirmRequest) -> Self {
        self.add(name, |prompts, _| prompts.confirm(request).map(Answer::Bool))
    }

    pub fn suggest(self, name: &str, request: SuggestRequest) -> Self {
        self.add(name, |prompts, _| prompts.suggest(request).map(Answer::Text))
    }

    pub fn search(self, name: &str, request: SearchRequest) -> Self {
        self.add(name, |prompts, _| prompts.search(request).map(Answer::Key))
    }

    pub fn multisearch(self, name: &str, request: MultiSearchRequest) -> Self {
        self.add(name, |prompts, _| prompts.multisearch(request).map(Answer::Keys))
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Runs every step in order and collects the named answers.
    pub fn submit(self, prompts: &mut Prompts) -> Result<Answers> {
        let mut answers = Answers::new();
        for step in self.steps {
            let answer = (step.run)(prompts, &answers)?;
            if let Some(name) = step.name {
                debug!("Form step '{name}' answered");
                answers.insert(name, answer);
            }
        }
        Ok(answers)
    }
}
