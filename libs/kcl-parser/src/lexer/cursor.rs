//! Byte-offset cursor over the source text. Offsets are the only position
//! the lexer records; editors derive lines and columns from them.

pub struct Cursor<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn first(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    pub fn second(&self) -> Option<char> {
        self.remaining().chars().nth(1)
    }

    pub fn remaining(&self) -> &'a str {
        self.source.get(self.pos..).unwrap_or_default()
    }

    pub fn bump(&mut self) -> Option<char> {
        let c = self.first()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    pub fn eat_while(&mut self, mut predicate: impl FnMut(char) -> bool) {
        while self.first().is_some_and(&mut predicate) {
            self.bump();
        }
    }

    /// Consumes `prefix` if the remaining text starts with it.
    pub fn eat_prefix(&mut self, prefix: &str) -> bool {
        let found = self.remaining().starts_with(prefix);
        if found {
            self.pos += prefix.len();
        }
        found
    }

    /// Text consumed since offset `start`.
    pub fn text_since(&self, start: usize) -> &'a str {
        self.source.get(start..self.pos).unwrap_or_default()
    }
}
