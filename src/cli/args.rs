use crate::constants::verbosity;
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::fmt::Display;
use std::path::PathBuf;

/// Groups of prompts the demo walks through.
#[derive(Debug, Clone, ValueEnum, Copy, PartialEq)]
#[value(rename_all = "lowercase")]
pub enum Showcase {
    /// Every group below, in order.
    All,
    /// Text, textarea, password and confirm.
    Input,
    /// Select, multiselect, suggest, search and multisearch.
    Lists,
    /// Notes, tables, spinner and progress.
    Output,
    /// A small sign up form.
    Form,
}

impl Display for Showcase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Showcase::All => "all",
            Showcase::Input => "input",
            Showcase::Lists => "lists",
            Showcase::Output => "output",
            Showcase::Form => "form",
        };
        write!(f, "{s}")
    }
}

/// Tour of the themed terminal prompts.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Prompts to show.
    #[arg(value_enum, default_value_t = Showcase::All)]
    pub showcase: Showcase,

    /// Theme to activate.
    #[arg(short, long)]
    pub theme: Option<String>,

    /// Template theme files to register (JSON or YAML). Repeatable.
    #[arg(long = "theme-file", value_name = "PATH")]
    pub theme_files: Vec<PathBuf>,

    /// Settings file (JSON or YAML).
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Reject themes that do not cover every prompt kind.
    #[arg(long = "strict-themes")]
    pub strict_themes: bool,

    /// Answer every prompt with its default.
    #[arg(long = "non-interactive")]
    pub non_interactive: bool,

    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

pub fn get_args() -> Args {
    Args::parse()
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_verbose_flags_to_log_filters() {
        assert_eq!(get_log_level_from_verbose(verbosity::OFF), LevelFilter::Error);
        assert_eq!(get_log_level_from_verbose(verbosity::INFO), LevelFilter::Info);
        assert_eq!(get_log_level_from_verbose(verbosity::DEBUG), LevelFilter::Debug);
        assert_eq!(get_log_level_from_verbose(verbosity::TRACE), LevelFilter::Trace);
        assert_eq!(get_log_level_from_verbose(verbosity::TRACE + 1), LevelFilter::Trace);
    }

    #[test]
    fn parses_defaults() {
        let args = Args::parse_from(["prompter-demo"]);
        assert_eq!(args.showcase, Showcase::All);
        assert!(args.theme.is_none());
        assert!(!args.non_interactive);
    }

    #[test]
    fn parses_full_feature_flags() {
        let args = Args::parse_from([
            "prompter-demo",
            "lists",
            "--theme",
            "plain",
            "--theme-file",
            "plain.yaml",
            "--theme-file",
            "other.json",
            "--strict-themes",
            "--non-interactive",
            "-vv",
        ]);
        assert_eq!(args.showcase, Showcase::Lists);
        assert_eq!(args.theme.as_deref(), Some("plain"));
        assert_eq!(args.theme_files, vec![PathBuf::from("plain.yaml"), PathBuf::from("other.json")]);
        assert!(args.strict_themes);
        assert!(args.non_interactive);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn display_showcase_variants() {
        assert_eq!(Showcase::Output.to_string(), "output");
        assert_eq!(Showcase::Form.to_string(), "form");
    }
}
