//! Answer validators

use crate::{constants::REQUIRED_MESSAGE, error::Result};
use regex::Regex;

/// Checks a candidate value. `Some(message)` rejects it and asks again.
pub type Validator<T> = Box<dyn Fn(&T) -> Option<String>>;

/// Applied to the accepted value right before it is returned.
pub type Transform<T> = Box<dyn Fn(T) -> T>;

/// Whether an empty answer is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Required {
    #[default]
    No,
    Yes,
    /// Required, with a custom rejection message.
    Message(String),
}

impl Required {
    /// The rejection message for an empty answer, if one is required.
    pub fn message(&self) -> Option<&str> {
        match self {
            Required::No => None,
            Required::Yes => Some(REQUIRED_MESSAGE),
            Required::Message(message) => Some(message),
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, Required::No)
    }
}

impl From<bool> for Required {
    fn from(value: bool) -> Self {
        if value {
            Required::Yes
        } else {
            Required::No
        }
    }
}

impl From<&str> for Required {
    fn from(message: &str) -> Self {
        Required::Message(message.to_string())
    }
}

impl From<String> for Required {
    fn from(message: String) -> Self {
        Required::Message(message)
    }
}

/// Runs the required check, then the caller's validator.
pub(crate) fn check<T>(
    value: &T,
    is_empty: bool,
    required: &Required,
    validate: Option<&Validator<T>>,
) -> Option<String> {
    if is_empty {
        if let Some(message) = required.message() {
            return Some(message.to_string());
        }
    }

    validate.and_then(|validator| validator(value))
}

/// Rejects answers that do not match `pattern`.
pub fn matches(pattern: &str, message: &str) -> Result<Validator<String>> {
    let re = Regex::new(pattern)?;
    let message = message.to_string();
    Ok(Box::new(move |value: &String| {
        if re.is_match(value) {
            None
        } else {
            Some(message.clone())
        }
    }))
}

/// Rejects answers shorter than `len` characters.
pub fn min_length(len: usize, message: &str) -> Validator<String> {
    let message = message.to_string();
    Box::new(move |value: &String| {
        if value.chars().count() < len {
            Some(message.clone())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_from_bool_and_message() {
        assert_eq!(Required::from(false).message(), None);
        assert_eq!(Required::from(true).message(), Some(REQUIRED_MESSAGE));
        assert_eq!(Required::from("Name please").message(), Some("Name please"));
    }

    #[test]
    fn test_check_required_before_validator() {
        let validator: Validator<String> = Box::new(|_| Some("never".to_string()));
        let result = check(&String::new(), true, &Required::Yes, Some(&validator));
        assert_eq!(result.as_deref(), Some(REQUIRED_MESSAGE));
    }

    #[test]
    fn test_check_runs_validator_on_optional_empty_value() {
        let validator: Validator<String> = Box::new(|_| Some("custom".to_string()));
        let result = check(&String::new(), true, &Required::No, Some(&validator));
        assert_eq!(result.as_deref(), Some("custom"));
        assert_eq!(check(&String::new(), true, &Required::No, None), None);
    }

    #[test]
    fn test_matches_validator() {
        let validator = matches(r"^[a-z]+$", "Lowercase only").unwrap();
        assert_eq!(validator(&"ada".to_string()), None);
        assert_eq!(validator(&"Ada".to_string()).as_deref(), Some("Lowercase only"));
    }

    #[test]
    fn test_matches_invalid_pattern() {
        assert!(matches(r"([unclosed", "x").is_err());
    }

    #[test]
    fn test_min_length_counts_chars() {
        let validator = min_length(3, "Too short");
        assert_eq!(validator(&"äöü".to_string()), None);
        assert_eq!(validator(&"ab".to_string()).as_deref(), Some("Too short"));
    }
}
