//! Per-kind configuration records.
//!
//! Each prompt kind has one request type. Every field carries an explicit
//! default, and the chainable setters only exist for convenience: the fields
//! are public and can be filled with struct update syntax as well.

use crate::{
    constants::{
        DEFAULT_ROWS, DEFAULT_SCROLL, MULTISELECT_HINT, NO_LABEL, PAUSE_MESSAGE,
        YES_LABEL,
    },
    validation::{Required, Transform, Validator},
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Key of a selectable option.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionKey {
    Int(i64),
    Str(String),
}

impl From<i64> for OptionKey {
    fn from(value: i64) -> Self {
        OptionKey::Int(value)
    }
}

impl From<i32> for OptionKey {
    fn from(value: i32) -> Self {
        OptionKey::Int(i64::from(value))
    }
}

impl From<&str> for OptionKey {
    fn from(value: &str) -> Self {
        OptionKey::Str(value.to_string())
    }
}

impl From<String> for OptionKey {
    fn from(value: String) -> Self {
        OptionKey::Str(value)
    }
}

impl Display for OptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionKey::Int(value) => write!(f, "{value}"),
            OptionKey::Str(value) => write!(f, "{value}"),
        }
    }
}

/// Ordered key to label mapping.
pub type Options = IndexMap<OptionKey, String>;

/// Builds [`Options`] from `(key, label)` pairs, keeping their order.
pub fn options<K, L>(pairs: impl IntoIterator<Item = (K, L)>) -> Options
where
    K: Into<OptionKey>,
    L: Into<String>,
{
    pairs.into_iter().map(|(key, label)| (key.into(), label.into())).collect()
}

/// Builds [`Options`] whose keys are the labels themselves.
pub fn options_from_labels<L: Into<String>>(labels: impl IntoIterator<Item = L>) -> Options {
    labels
        .into_iter()
        .map(|label| {
            let label = label.into();
            (OptionKey::Str(label.clone()), label)
        })
        .collect()
}

/// Query driven option source for search prompts.
pub type OptionsProvider = Box<dyn Fn(&str) -> Options>;

/// Completion source of a suggest prompt.
pub enum Suggestions {
    /// Filtered case-insensitively by the typed text.
    List(Vec<String>),
    /// Called again with the typed text whenever it changes.
    Provider(Box<dyn Fn(&str) -> Vec<String>>),
}

impl Suggestions {
    pub(crate) fn matching(&self, query: &str) -> Vec<String> {
        match self {
            Suggestions::List(items) => {
                let needle = query.to_lowercase();
                items
                    .iter()
                    .filter(|item| item.to_lowercase().contains(&needle))
                    .cloned()
                    .collect()
            }
            Suggestions::Provider(provider) => provider(query),
        }
    }
}

impl Default for Suggestions {
    fn default() -> Self {
        Suggestions::List(Vec::new())
    }
}

macro_rules! common_setters {
    ($value:ty) => {
        pub fn required(mut self, required: impl Into<Required>) -> Self {
            self.required = required.into();
            self
        }

        pub fn validate(mut self, validate: impl Fn(&$value) -> Option<String> + 'static) -> Self {
            self.validate = Some(Box::new(validate));
            self
        }

        /// Uses a prebuilt validator, such as [`crate::validation::matches`].
        pub fn validator(mut self, validator: Validator<$value>) -> Self {
            self.validate = Some(validator);
            self
        }

        pub fn hint(mut self, hint: &str) -> Self {
            self.hint = hint.to_string();
            self
        }

        pub fn transform(mut self, transform: impl Fn($value) -> $value + 'static) -> Self {
            self.transform = Some(Box::new(transform));
            self
        }
    };
}

/// Single line text entry.
#[derive(Default)]
pub struct TextRequest {
    pub label: String,
    pub placeholder: String,
    pub default: String,
    pub required: Required,
    pub validate: Option<Validator<String>>,
    pub hint: String,
    pub transform: Option<Transform<String>>,
}

impl TextRequest {
    pub fn new(label: &str) -> Self {
        Self { label: label.to_string(), ..Default::default() }
    }

    pub fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn default_value(mut self, default: &str) -> Self {
        self.default = default.to_string();
        self
    }

    common_setters!(String);
}

/// Multi line text entry.
pub struct TextareaRequest {
    pub label: String,
    pub placeholder: String,
    pub default: String,
    pub required: Required,
    pub validate: Option<Validator<String>>,
    pub hint: String,
    pub rows: usize,
    pub transform: Option<Transform<String>>,
}

impl Default for TextareaRequest {
    fn default() -> Self {
        Self {
            label: String::new(),
            placeholder: String::new(),
            default: String::new(),
            required: Required::No,
            validate: None,
            hint: String::new(),
            rows: DEFAULT_ROWS,
            transform: None,
        }
    }
}

impl TextareaRequest {
    pub fn new(label: &str) -> Self {
        Self { label: label.to_string(), ..Default::default() }
    }

    pub fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn default_value(mut self, default: &str) -> Self {
        self.default = default.to_string();
        self
    }

    pub fn rows(mut self, rows: usize) -> Self {
        self.rows = rows.max(1);
        self
    }

    common_setters!(String);
}

/// Hidden text entry.
#[derive(Default)]
pub struct PasswordRequest {
    pub label: String,
    pub placeholder: String,
    pub required: Required,
    pub validate: Option<Validator<String>>,
    pub hint: String,
    pub transform: Option<Transform<String>>,
}

impl PasswordRequest {
    pub fn new(label: &str) -> Self {
        Self { label: label.to_string(), ..Default::default() }
    }

    pub fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    common_setters!(String);
}

/// Pick exactly one option.
pub struct SelectRequest {
    pub label: String,
    pub options: Options,
    pub default: Option<OptionKey>,
    pub scroll: usize,
    pub validate: Option<Validator<OptionKey>>,
    pub hint: String,
    pub required: Required,
    pub transform: Option<Transform<OptionKey>>,
}

impl Default for SelectRequest {
    fn default() -> Self {
        Self {
            label: String::new(),
            options: Options::new(),
            default: None,
            scroll: DEFAULT_SCROLL,
            validate: None,
            hint: String::new(),
            required: Required::Yes,
            transform: None,
        }
    }
}

impl SelectRequest {
    pub fn new<K, L>(label: &str, pairs: impl IntoIterator<Item = (K, L)>) -> Self
    where
        K: Into<OptionKey>,
        L: Into<String>,
    {
        Self { label: label.to_string(), options: options(pairs), ..Default::default() }
    }

    pub fn default_value(mut self, key: impl Into<OptionKey>) -> Self {
        self.default = Some(key.into());
        self
    }

    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll.max(1);
        self
    }

    common_setters!(OptionKey);
}

/// Pick any number of options.
pub struct MultiSelectRequest {
    pub label: String,
    pub options: Options,
    pub default: Vec<OptionKey>,
    pub scroll: usize,
    pub required: Required,
    pub validate: Option<Validator<Vec<OptionKey>>>,
    pub hint: String,
    pub transform: Option<Transform<Vec<OptionKey>>>,
}

impl Default for MultiSelectRequest {
    fn default() -> Self {
        Self {
            label: String::new(),
            options: Options::new(),
            default: Vec::new(),
            scroll: DEFAULT_SCROLL,
            required: Required::No,
            validate: None,
            hint: MULTISELECT_HINT.to_string(),
            transform: None,
        }
    }
}

impl MultiSelectRequest {
    pub fn new<K, L>(label: &str, pairs: impl IntoIterator<Item = (K, L)>) -> Self
    where
        K: Into<OptionKey>,
        L: Into<String>,
    {
        Self { label: label.to_string(), options: options(pairs), ..Default::default() }
    }

    pub fn default_value<K: Into<OptionKey>>(mut self, keys: impl IntoIterator<Item = K>) -> Self {
        self.default = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll.max(1);
        self
    }

    common_setters!(Vec<OptionKey>);
}

/// Yes or no.
pub struct ConfirmRequest {
    pub label: String,
    pub default: bool,
    pub yes: String,
    pub no: String,
    /// When required, only "yes" is accepted.
    pub required: Required,
    pub validate: Option<Validator<bool>>,
    pub hint: String,
    pub transform: Option<Transform<bool>>,
}

impl Default for ConfirmRequest {
    fn default() -> Self {
        Self {
            label: String::new(),
            default: true,
            yes: YES_LABEL.to_string(),
            no: NO_LABEL.to_string(),
            required: Required::No,
            validate: None,
            hint: String::new(),
            transform: None,
        }
    }
}

impl ConfirmRequest {
    pub fn new(label: &str) -> Self {
        Self { label: label.to_string(), ..Default::default() }
    }

    pub fn default_value(mut self, default: bool) -> Self {
        self.default = default;
        self
    }

    pub fn labels(mut self, yes: &str, no: &str) -> Self {
        self.yes = yes.to_string();
        self.no = no.to_string();
        self
    }

    common_setters!(bool);
}

pub struct PauseRequest {
    pub message: String,
}

impl Default for PauseRequest {
    fn default() -> Self {
        Self { message: PAUSE_MESSAGE.to_string() }
    }
}

impl PauseRequest {
    pub fn new(message: &str) -> Self {
        Self { message: message.to_string() }
    }
}

/// Free text with completions.
pub struct SuggestRequest {
    pub label: String,
    pub options: Suggestions,
    pub placeholder: String,
    pub default: String,
    pub scroll: usize,
    pub required: Required,
    pub validate: Option<Validator<String>>,
    pub hint: String,
    pub transform: Option<Transform<String>>,
}

impl Default for SuggestRequest {
    fn default() -> Self {
        Self {
            label: String::new(),
            options: Suggestions::default(),
            placeholder: String::new(),
            default: String::new(),
            scroll: DEFAULT_SCROLL,
            required: Required::No,
            validate: None,
            hint: String::new(),
            transform: None,
        }
    }
}

impl SuggestRequest {
    pub fn new(label: &str) -> Self {
        Self { label: label.to_string(), ..Default::default() }
    }

    pub fn options<S: Into<String>>(mut self, items: impl IntoIterator<Item = S>) -> Self {
        self.options = Suggestions::List(items.into_iter().map(Into::into).collect());
        self
    }

    pub fn provider(mut self, provider: impl Fn(&str) -> Vec<String> + 'static) -> Self {
        self.options = Suggestions::Provider(Box::new(provider));
        self
    }

    pub fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn default_value(mut self, default: &str) -> Self {
        self.default = default.to_string();
        self
    }

    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll.max(1);
        self
    }

    common_setters!(String);
}

/// Pick one option out of query results.
pub struct SearchRequest {
    pub label: String,
    pub options: OptionsProvider,
    pub placeholder: String,
    pub scroll: usize,
    pub validate: Option<Validator<OptionKey>>,
    pub hint: String,
    /// A search always needs a pick; this only changes the rejection message.
    pub required: Required,
    pub transform: Option<Transform<OptionKey>>,
}

impl SearchRequest {
    pub fn new(label: &str, options: impl Fn(&str) -> Options + 'static) -> Self {
        Self {
            label: label.to_string(),
            options: Box::new(options),
            placeholder: String::new(),
            scroll: DEFAULT_SCROLL,
            validate: None,
            hint: String::new(),
            required: Required::Yes,
            transform: None,
        }
    }

    pub fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll.max(1);
        self
    }

    common_setters!(OptionKey);
}

/// Pick several options out of query results.
pub struct MultiSearchRequest {
    pub label: String,
    pub options: OptionsProvider,
    pub placeholder: String,
    pub scroll: usize,
    pub required: Required,
    pub validate: Option<Validator<Vec<OptionKey>>>,
    pub hint: String,
    pub transform: Option<Transform<Vec<OptionKey>>>,
}

impl MultiSearchRequest {
    pub fn new(label: &str, options: impl Fn(&str) -> Options + 'static) -> Self {
        Self {
            label: label.to_string(),
            options: Box::new(options),
            placeholder: String::new(),
            scroll: DEFAULT_SCROLL,
            required: Required::No,
            validate: None,
            hint: MULTISELECT_HINT.to_string(),
            transform: None,
        }
    }

    pub fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll.max(1);
        self
    }

    common_setters!(Vec<OptionKey>);
}

#[derive(Debug, Clone, Default)]
pub struct ProgressRequest {
    pub label: String,
    pub hint: String,
}

impl ProgressRequest {
    pub fn new(label: &str) -> Self {
        Self { label: label.to_string(), hint: String::new() }
    }

    pub fn hint(mut self, hint: &str) -> Self {
        self.hint = hint.to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_keep_insertion_order() {
        let opts = options([(2, "B"), (1, "A"), (3, "C")]);
        let keys: Vec<_> = opts.keys().cloned().collect();
        assert_eq!(keys, vec![OptionKey::Int(2), OptionKey::Int(1), OptionKey::Int(3)]);
    }

    #[test]
    fn test_options_from_labels_uses_label_as_key() {
        let opts = options_from_labels(["red", "green"]);
        assert_eq!(opts.get(&OptionKey::from("green")).map(String::as_str), Some("green"));
    }

    #[test]
    fn test_option_key_serializes_untagged() {
        assert_eq!(serde_json::to_string(&OptionKey::Int(7)).unwrap(), "7");
        assert_eq!(serde_json::to_string(&OptionKey::from("a")).unwrap(), "\"a\"");
    }

    #[test]
    fn test_request_defaults() {
        let select = SelectRequest::new("Pick", [(1, "A")]);
        assert_eq!(select.scroll, DEFAULT_SCROLL);
        assert_eq!(select.required, Required::Yes);

        let multi = MultiSelectRequest::new("Pick", [("a", "A")]);
        assert_eq!(multi.hint, MULTISELECT_HINT);
        assert_eq!(multi.required, Required::No);

        let confirm = ConfirmRequest::new("Sure?");
        assert!(confirm.default);
        assert_eq!((confirm.yes.as_str(), confirm.no.as_str()), ("Yes", "No"));

        assert_eq!(TextareaRequest::new("Bio").rows, DEFAULT_ROWS);
        assert_eq!(PauseRequest::default().message, PAUSE_MESSAGE);
    }

    #[test]
    fn test_static_suggestions_filter_case_insensitively() {
        let suggestions = Suggestions::List(vec!["Apple".into(), "Banana".into(), "Grape".into()]);
        assert_eq!(suggestions.matching("AP"), vec!["Apple".to_string(), "Grape".to_string()]);
        assert_eq!(suggestions.matching("").len(), 3);
    }
}
