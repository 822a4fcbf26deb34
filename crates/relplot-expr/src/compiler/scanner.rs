//! Character cursor over expression text.

/// Byte-offset cursor that never splits a UTF-8 character.
#[derive(Debug, Clone)]
pub(crate) struct Scanner<'src> {
    text: &'src str,
    pos: usize,
}

impl<'src> Scanner<'src> {
    pub fn new(text: &'src str) -> Self {
        Self { text, pos: 0 }
    }

    pub fn text(&self) -> &'src str {
        self.text
    }

    /// Current byte offset.
    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    /// Move to `pos`, which must lie on a character boundary at or after the
    /// current position.
    pub fn seek(&mut self, pos: usize) {
        debug_assert!(pos >= self.pos && self.text.is_char_boundary(pos));
        self.pos = pos;
    }

    pub fn bump(&mut self) {
        if let Some(ch) = self.peek() {
            self.pos += ch.len_utf8();
        }
    }

    pub fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    /// Whether the character right at `pos` is `ch`.
    pub fn is_at(&self, pos: usize, ch: char) -> bool {
        self.text[pos..].starts_with(ch)
    }

    /// Consume a decimal literal `digits[.digits]` and return its text.
    ///
    /// Must be called with an ASCII digit under the cursor.
    pub fn number(&mut self) -> &'src str {
        let start = self.pos;
        let bytes = self.text.as_bytes();
        let mut end = start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end < bytes.len() && bytes[end] == b'.' {
            end += 1;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
        }
        self.pos = end;
        &self.text[start..end]
    }
}
