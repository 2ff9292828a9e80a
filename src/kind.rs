use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Every prompt variant a theme can paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptKind {
    Text,
    Textarea,
    Password,
    Select,
    MultiSelect,
    Confirm,
    Pause,
    Suggest,
    Search,
    MultiSearch,
    Spinner,
    /// Tagged messages: note, info, warning, error, alert, intro and outro.
    Note,
    Table,
    Progress,
    Clear,
}

impl PromptKind {
    pub const ALL: [PromptKind; 15] = [
        PromptKind::Text,
        PromptKind::Textarea,
        PromptKind::Password,
        PromptKind::Select,
        PromptKind::MultiSelect,
        PromptKind::Confirm,
        PromptKind::Pause,
        PromptKind::Suggest,
        PromptKind::Search,
        PromptKind::MultiSearch,
        PromptKind::Spinner,
        PromptKind::Note,
        PromptKind::Table,
        PromptKind::Progress,
        PromptKind::Clear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PromptKind::Text => "text",
            PromptKind::Textarea => "textarea",
            PromptKind::Password => "password",
            PromptKind::Select => "select",
            PromptKind::MultiSelect => "multiselect",
            PromptKind::Confirm => "confirm",
            PromptKind::Pause => "pause",
            PromptKind::Suggest => "suggest",
            PromptKind::Search => "search",
            PromptKind::MultiSearch => "multisearch",
            PromptKind::Spinner => "spinner",
            PromptKind::Note => "note",
            PromptKind::Table => "table",
            PromptKind::Progress => "progress",
            PromptKind::Clear => "clear",
        }
    }

    /// Whether the kind collects input, as opposed to only displaying output.
    pub fn is_interactive(&self) -> bool {
        !matches!(
            self,
            PromptKind::Spinner
                | PromptKind::Note
                | PromptKind::Table
                | PromptKind::Progress
                | PromptKind::Clear
        )
    }
}

impl Display for PromptKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_names_match_display() {
        for kind in PromptKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
        }
    }

    #[test]
    fn test_passive_kinds() {
        let passive: Vec<_> =
            PromptKind::ALL.iter().filter(|kind| !kind.is_interactive()).collect();
        assert_eq!(passive.len(), 5);
        assert!(PromptKind::Search.is_interactive());
    }
}
