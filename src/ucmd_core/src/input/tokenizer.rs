/// Splits a completed line into delimiter-separated tokens.
///
/// Any byte in the delimiter set separates tokens. Runs of delimiters collapse,
/// so no empty tokens are produced. Once the line is exhausted every further
/// call to [`next_token`](Self::next_token) returns `None`.
///
/// # Example
/// ```ignore
/// let mut tok = Tokenizer::new(b"SET   x y", b" ");
/// assert_eq!(tok.next_token(), Some(&b"SET"[..]));
/// assert_eq!(tok.next_token(), Some(&b"x"[..]));
/// assert_eq!(tok.next_token(), Some(&b"y"[..]));
/// assert_eq!(tok.next_token(), None);
/// ```
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    line: &'a [u8],
    delimiters: &'a [u8],
    position: usize,
}

impl<'a> Tokenizer<'a> {
    pub const fn new(line: &'a [u8], delimiters: &'a [u8]) -> Self {
        Self {
            line,
            delimiters,
            position: 0,
        }
    }

    /// Returns the next token, or `None` when the line has no tokens left.
    pub fn next_token(&mut self) -> Option<&'a [u8]> {
        self.skip_delimiters();
        if self.position >= self.line.len() {
            return None;
        }

        let start = self.position;
        while self.position < self.line.len() && !self.is_delimiter(self.line[self.position]) {
            self.position += 1;
        }
        let token = &self.line[start..self.position];

        // Step over the delimiter that ended the token.
        if self.position < self.line.len() {
            self.position += 1;
        }
        Some(token)
    }

    /// Returns everything not yet tokenized, leading delimiters skipped, and
    /// exhausts the tokenizer.
    pub fn remainder(&mut self) -> Option<&'a [u8]> {
        self.skip_delimiters();
        if self.position >= self.line.len() {
            return None;
        }
        let rest = &self.line[self.position..];
        self.position = self.line.len();
        Some(rest)
    }

    pub fn is_exhausted(&self) -> bool {
        self.line[self.position.min(self.line.len())..]
            .iter()
            .all(|&b| self.is_delimiter(b))
    }

    fn skip_delimiters(&mut self) {
        while self.position < self.line.len() && self.is_delimiter(self.line[self.position]) {
            self.position += 1;
        }
    }

    fn is_delimiter(&self, byte: u8) -> bool {
        self.delimiters.contains(&byte)
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}
