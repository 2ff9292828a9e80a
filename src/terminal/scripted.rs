//! Terminal that answers prompts from a predefined key script
//!
//! Useful for automation, testing, or any environment without a user. Every
//! painted frame is recorded with its styling stripped, so tests can assert on
//! exactly what a theme produced.

use super::Terminal;
use crate::constants::FALLBACK_WIDTH;
use console::Key;
use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug)]
struct Script {
    keys: VecDeque<io::Result<Key>>,
    frames: Vec<String>,
    committed: Vec<String>,
    current: Option<String>,
    raw: String,
    cursor_hidden: bool,
    interactive: bool,
    width: usize,
}

/// Clones share the same script, so a clone kept by a test observes what the
/// prompts did with the original.
#[derive(Debug, Clone)]
pub struct ScriptedTerminal {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTerminal {
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(Script {
                keys: VecDeque::new(),
                frames: Vec::new(),
                committed: Vec::new(),
                current: None,
                raw: String::new(),
                cursor_hidden: false,
                interactive: true,
                width: FALLBACK_WIDTH,
            })),
        }
    }

    /// A terminal no user is attached to.
    pub fn non_interactive() -> Self {
        let terminal = Self::new();
        terminal.lock().interactive = false;
        terminal
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Queues a key press.
    pub fn press(self, key: Key) -> Self {
        self.lock().keys.push_back(Ok(key));
        self
    }

    /// Queues a read interrupted by a signal, as Ctrl-C delivers on some terminals.
    pub fn interrupt(self) -> Self {
        self.lock().keys.push_back(Err(io::Error::from(io::ErrorKind::Interrupted)));
        self
    }

    /// Queues one key press per character.
    pub fn type_text(self, text: &str) -> Self {
        self.lock().keys.extend(text.chars().map(|ch| Ok(Key::Char(ch))));
        self
    }

    pub fn keys(self, keys: impl IntoIterator<Item = Key>) -> Self {
        self.lock().keys.extend(keys.into_iter().map(Ok));
        self
    }

    pub fn with_width(self, width: usize) -> Self {
        self.lock().width = width;
        self
    }

    /// Every frame painted so far, in order.
    pub fn frames(&self) -> Vec<String> {
        self.lock().frames.clone()
    }

    pub fn last_frame(&self) -> Option<String> {
        self.lock().frames.last().cloned()
    }

    /// What is left on screen: committed frames, then the current one.
    pub fn screen(&self) -> Vec<String> {
        let script = self.lock();
        let mut screen = script.committed.clone();
        screen.extend(script.current.clone());
        screen
    }

    /// Text written outside of frames.
    pub fn raw_output(&self) -> String {
        self.lock().raw.clone()
    }

    pub fn cursor_hidden(&self) -> bool {
        self.lock().cursor_hidden
    }

    pub fn remaining_keys(&self) -> usize {
        self.lock().keys.len()
    }
}

impl Default for ScriptedTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal for ScriptedTerminal {
    fn read_key(&mut self) -> io::Result<Key> {
        self.lock().keys.pop_front().unwrap_or_else(|| {
            Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted keys left"))
        })
    }

    fn paint(&mut self, frame: &str) -> io::Result<()> {
        let plain = console::strip_ansi_codes(frame).trim_end_matches('\n').to_string();
        let mut script = self.lock();
        script.frames.push(plain.clone());
        script.current = Some(plain);
        Ok(())
    }

    fn commit(&mut self) {
        let mut script = self.lock();
        if let Some(frame) = script.current.take() {
            script.committed.push(frame);
        }
    }

    fn erase(&mut self) -> io::Result<()> {
        self.lock().current = None;
        Ok(())
    }

    fn write_raw(&mut self, text: &str) -> io::Result<()> {
        self.lock().raw.push_str(text);
        Ok(())
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        self.lock().cursor_hidden = true;
        Ok(())
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        self.lock().cursor_hidden = false;
        Ok(())
    }

    fn width(&self) -> usize {
        self.lock().width
    }

    fn is_interactive(&self) -> bool {
        self.lock().interactive
    }

    fn detach(&self) -> Option<Box<dyn Terminal + Send>> {
        Some(Box::new(self.clone()))
    }
}
