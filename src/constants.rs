//! Constants used throughout prompter

/// Name of the builtin theme that can never be replaced
pub const DEFAULT_THEME: &str = "default";

/// Message shown when a required prompt is submitted empty
pub const REQUIRED_MESSAGE: &str = "Required.";

/// Number of options visible at once in list prompts
pub const DEFAULT_SCROLL: usize = 5;

/// Number of visible lines in a textarea
pub const DEFAULT_ROWS: usize = 5;

/// Hint shown under multiple selection prompts
pub const MULTISELECT_HINT: &str = "Use the space bar to select options.";

/// Message shown by a pause prompt
pub const PAUSE_MESSAGE: &str = "Press enter to continue...";

/// Default confirmation labels
pub const YES_LABEL: &str = "Yes";
pub const NO_LABEL: &str = "No";

/// Delay between two spinner repaints
pub const SPINNER_INTERVAL_MS: u64 = 75;

/// Spinner animation frames
pub const SPINNER_FRAMES: &[&str] = &["⠂", "⠒", "⠐", "⠰", "⠠", "⠤", "⠄", "⠆"];

/// Width assumed when the terminal cannot report one
pub const FALLBACK_WIDTH: usize = 80;

/// Environment variables read by `Settings::from_env`
pub mod env {
    pub const THEME: &str = "PROMPTER_THEME";
    pub const NO_INTERACTION: &str = "PROMPTER_NO_INTERACTION";
    pub const STRICT_THEMES: &str = "PROMPTER_STRICT_THEMES";
}

/// Exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
    pub const CANCELLED: i32 = 130;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
