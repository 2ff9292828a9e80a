use console::Key;

/// Editable text with a cursor counted in characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct LineInput {
    value: String,
    cursor: usize,
}

impl LineInput {
    pub fn new(value: &str) -> Self {
        Self { value: value.to_string(), cursor: value.chars().count() }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn set(&mut self, value: &str) {
        *self = Self::new(value);
    }

    fn byte_index(&self, position: usize) -> usize {
        self.value.char_indices().nth(position).map_or(self.value.len(), |(index, _)| index)
    }

    pub fn insert(&mut self, ch: char) {
        let index = self.byte_index(self.cursor);
        self.value.insert(index, ch);
        self.cursor += 1;
    }

    /// Applies an editing key. Returns `true` when the text changed.
    pub fn handle(&mut self, key: &Key) -> bool {
        match key {
            Key::Char(ch) if !ch.is_control() => {
                self.insert(*ch);
                true
            }
            Key::Backspace if self.cursor > 0 => {
                let index = self.byte_index(self.cursor - 1);
                self.value.remove(index);
                self.cursor -= 1;
                true
            }
            Key::Del if self.cursor < self.len() => {
                let index = self.byte_index(self.cursor);
                self.value.remove(index);
                true
            }
            Key::ArrowLeft => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            Key::ArrowRight => {
                self.cursor = (self.cursor + 1).min(self.len());
                false
            }
            Key::Home => {
                self.cursor = self.line_start();
                false
            }
            Key::End => {
                self.cursor = self.line_end();
                false
            }
            _ => false,
        }
    }

    /// Line and column of the cursor, both zero based.
    pub fn position(&self) -> (usize, usize) {
        let mut line = 0;
        let mut column = 0;
        for ch in self.value.chars().take(self.cursor) {
            if ch == '\n' {
                line += 1;
                column = 0;
            } else {
                column += 1;
            }
        }
        (line, column)
    }

    fn line_start(&self) -> usize {
        let chars: Vec<char> = self.value.chars().collect();
        let mut start = self.cursor.min(chars.len());
        while start > 0 && chars.get(start - 1) != Some(&'\n') {
            start -= 1;
        }
        start
    }

    fn line_end(&self) -> usize {
        let chars: Vec<char> = self.value.chars().collect();
        let mut end = self.cursor.min(chars.len());
        while end < chars.len() && chars.get(end) != Some(&'\n') {
            end += 1;
        }
        end
    }

    /// Moves the cursor one line up or down, keeping the column when possible.
    pub fn move_vertically(&mut self, down: bool) {
        let (line, column) = self.position();
        let lines: Vec<&str> = self.value.split('\n').collect();
        let target = if down {
            if line + 1 >= lines.len() {
                return;
            }
            line + 1
        } else {
            match line.checked_sub(1) {
                Some(target) => target,
                None => return,
            }
        };

        let before: usize = lines.iter().take(target).map(|l| l.chars().count() + 1).sum();
        let width = lines.get(target).map_or(0, |l| l.chars().count());
        self.cursor = before + column.min(width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> LineInput {
        let mut input = LineInput::default();
        for ch in text.chars() {
            input.handle(&Key::Char(ch));
        }
        input
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut input = typed("Adaa");
        assert!(input.handle(&Key::Backspace));
        assert_eq!(input.as_str(), "Ada");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn test_insert_in_the_middle_with_multibyte_chars() {
        let mut input = typed("ñu");
        input.handle(&Key::ArrowLeft);
        input.handle(&Key::Char('é'));
        assert_eq!(input.as_str(), "ñéu");
        input.handle(&Key::Home);
        assert!(input.handle(&Key::Del));
        assert_eq!(input.as_str(), "éu");
    }

    #[test]
    fn test_control_chars_are_ignored() {
        let mut input = typed("a");
        assert!(!input.handle(&Key::Char('\u{4}')));
        assert_eq!(input.as_str(), "a");
    }

    #[test]
    fn test_vertical_movement_keeps_column() {
        let mut input = LineInput::new("abcd\nxy\nlong line");
        assert_eq!(input.position(), (2, 9));
        input.move_vertically(false);
        assert_eq!(input.position(), (1, 2));
        input.move_vertically(false);
        assert_eq!(input.position(), (0, 2));
        input.move_vertically(false);
        assert_eq!(input.position(), (0, 2));
    }
}
