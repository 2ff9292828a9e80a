//! Theme registration, activation and renderer fallback through the facade.

use console::Key;
use prompter::config::Settings;
use prompter::terminal::ScriptedTerminal;
use prompter::{ConfirmRequest, Error, Frame, PromptKind, Prompts, TextRequest, Theme};
use std::fs;
use tempfile::TempDir;
use test_log::test;

fn plain_text_theme() -> Theme {
    Theme::new("plain")
        .with_renderer(PromptKind::Text, |frame: &Frame<'_>| format!("plain> {}", frame.label))
}

#[test]
fn test_partial_theme_falls_back_to_default() {
    let terminal = ScriptedTerminal::new()
        .press(Key::Enter)
        .press(Key::Char('y'))
        .press(Key::Enter);
    let mut prompts = Prompts::with_terminal(terminal.clone());
    prompts.add_theme(plain_text_theme()).unwrap();
    prompts.set_theme("plain").unwrap();

    prompts.text(TextRequest::new("Name")).unwrap();
    assert!(prompts.confirm(ConfirmRequest::new("Continue?")).unwrap());

    let screen = terminal.screen();
    assert_eq!(screen[0], "plain> Name");
    assert!(screen[1].contains("Continue?"));
    assert!(screen[1].contains("Yes"));
}

#[test]
fn test_unknown_theme_keeps_active_theme() {
    let mut prompts = Prompts::with_terminal(ScriptedTerminal::new());

    let err = prompts.set_theme("neon").unwrap_err();

    assert!(matches!(err, Error::ThemeNotFound(ref name) if name == "neon"));
    assert!(err.is_configuration());
    assert_eq!(prompts.theme(), "default");
}

#[test]
fn test_default_theme_cannot_be_replaced() {
    let mut prompts = Prompts::with_terminal(ScriptedTerminal::new());

    let err = prompts.add_theme(Theme::new("default")).unwrap_err();

    assert!(matches!(err, Error::DefaultThemeOverride));
}

#[test]
fn test_strict_settings_reject_partial_theme_files() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("partial.json");
    fs::write(&path, r#"{"name": "partial", "renderers": {"text": "{{ label }}"}}"#).unwrap();
    let settings = Settings {
        strict_themes: true,
        theme_files: vec![path],
        ..Settings::default()
    };

    let err = Prompts::with_settings(ScriptedTerminal::new(), &settings).err().unwrap();

    match err {
        Error::IncompleteTheme { theme, kinds } => {
            assert_eq!(theme, "partial");
            assert!(kinds.starts_with("textarea, password"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_registering_twice_replaces_the_theme() {
    let terminal = ScriptedTerminal::new().press(Key::Enter);
    let mut prompts = Prompts::with_terminal(terminal.clone());
    prompts.add_theme(plain_text_theme()).unwrap();
    prompts
        .add_theme(
            Theme::new("plain")
                .with_renderer(PromptKind::Text, |frame: &Frame<'_>| format!("v2 {}", frame.label)),
        )
        .unwrap();
    prompts.set_theme("plain").unwrap();

    prompts.text(TextRequest::new("Name")).unwrap();

    assert_eq!(terminal.last_frame().as_deref(), Some("v2 Name"));
    assert_eq!(prompts.registry().themes(), vec!["default", "plain"]);
}

#[test]
fn test_template_theme_file_renders_frames() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plain.yaml");
    fs::write(
        &path,
        concat!(
            "name: plain\n",
            "renderers:\n",
            "  text: \"{{ label }}: {{ value }}{% if state == 'submit' %} ok{% endif %}\"\n",
            "  note: \"[{{ tag }}] {{ message | style('bold') }}\"\n",
        ),
    )
    .unwrap();

    let terminal = ScriptedTerminal::new().type_text("Ada").press(Key::Enter);
    let mut prompts = Prompts::with_terminal(terminal.clone());
    prompts.add_theme_file(&path).unwrap();
    prompts.set_theme("plain").unwrap();

    assert_eq!(prompts.text(TextRequest::new("Name")).unwrap(), "Ada");
    prompts.info("Saved").unwrap();

    assert_eq!(terminal.screen(), vec!["Name: Ada ok".to_string(), "[info] Saved".to_string()]);
}

#[test]
fn test_theme_file_with_unknown_extension_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plain.toml");
    fs::write(&path, "name = 'plain'").unwrap();
    let mut prompts = Prompts::with_terminal(ScriptedTerminal::new());

    let err = prompts.add_theme_file(&path).unwrap_err();

    assert!(matches!(err, Error::ThemeFileError { .. }));
    assert!(!prompts.registry().contains("plain"));
}

#[test]
fn test_broken_template_fails_at_registration() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, r#"{"name": "broken", "renderers": {"text": "{{ label "}}"#).unwrap();
    let mut prompts = Prompts::with_terminal(ScriptedTerminal::new());

    let err = prompts.add_theme_file(&path).unwrap_err();

    assert!(matches!(err, Error::MinijinjaError(_)));
}
