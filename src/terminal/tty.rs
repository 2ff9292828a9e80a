use super::{line_count, Terminal};
use crate::constants::FALLBACK_WIDTH;
use console::{Key, Term};
use std::io;

/// The user's terminal. Prompts are painted on stderr by default so that
/// stdout stays free for the program's own output.
#[derive(Debug, Clone)]
pub struct ConsoleTerminal {
    term: Term,
    /// Rows occupied by the uncommitted frame.
    lines: usize,
}

impl ConsoleTerminal {
    pub fn stderr() -> Self {
        Self { term: Term::stderr(), lines: 0 }
    }

    pub fn stdout() -> Self {
        Self { term: Term::stdout(), lines: 0 }
    }

    /// Wraps an existing `console` terminal, such as a read/write pair.
    pub fn from_term(term: Term) -> Self {
        Self { term, lines: 0 }
    }
}

impl Default for ConsoleTerminal {
    fn default() -> Self {
        Self::stderr()
    }
}

impl Terminal for ConsoleTerminal {
    fn read_key(&mut self) -> io::Result<Key> {
        // Without a tty `console` reports `Key::Unknown` forever.
        if !self.term.is_term() {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "no terminal to read keys from",
            ));
        }
        // Raw reads hand Ctrl-C back as a key instead of raising SIGINT.
        self.term.read_key_raw()
    }

    fn paint(&mut self, frame: &str) -> io::Result<()> {
        // Without a tty there is nothing to move back over; frames stack up.
        if self.lines > 0 && self.term.is_term() {
            self.term.clear_last_lines(self.lines)?;
        }
        let text = frame.trim_end_matches('\n');
        self.term.write_line(text)?;
        self.term.flush()?;
        self.lines = line_count(text, self.width());
        Ok(())
    }

    fn commit(&mut self) {
        self.lines = 0;
    }

    fn erase(&mut self) -> io::Result<()> {
        if self.lines > 0 && self.term.is_term() {
            self.term.clear_last_lines(self.lines)?;
        }
        self.lines = 0;
        Ok(())
    }

    fn write_raw(&mut self, text: &str) -> io::Result<()> {
        self.term.write_str(text)?;
        self.term.flush()
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        self.term.hide_cursor()
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        self.term.show_cursor()
    }

    fn width(&self) -> usize {
        match self.term.size().1 {
            0 => FALLBACK_WIDTH,
            columns => usize::from(columns),
        }
    }

    fn is_interactive(&self) -> bool {
        self.term.is_term()
    }

    fn detach(&self) -> Option<Box<dyn Terminal + Send>> {
        Some(Box::new(Self { term: self.term.clone(), lines: 0 }))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::{config::Settings, error::Error, facade::Prompts, request::TextRequest};

    fn detached_term() -> Term {
        let read = tempfile::tempfile().unwrap();
        let write = tempfile::tempfile().unwrap();
        Term::read_write_pair(read, write)
    }

    #[test]
    fn test_reading_keys_without_tty_fails() {
        let mut terminal = ConsoleTerminal::from_term(detached_term());
        assert!(!terminal.is_interactive());
        let err = terminal.read_key().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_forced_interaction_without_tty_returns_instead_of_spinning() {
        let mut settings = Settings::default();
        settings.apply_vars(|name| (name == "PROMPTER_NO_INTERACTION").then(|| "0".to_string()));
        assert_eq!(settings.interactive, Some(true));

        let terminal = ConsoleTerminal::from_term(detached_term());
        let mut prompts = Prompts::with_settings(terminal, &settings).unwrap();
        assert!(prompts.is_interactive());

        let err = prompts.text(TextRequest::new("Name")).unwrap_err();
        assert!(matches!(err, Error::IoError(ref source) if source.kind() == io::ErrorKind::UnexpectedEof));
    }
}
