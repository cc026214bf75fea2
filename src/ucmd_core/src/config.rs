//! Runtime configuration of a [`Dispatcher`](crate::Dispatcher).
//!
//! The terminator and delimiter set are fixed for the lifetime of the
//! dispatcher. Buffer size and registry capacity are const generics on the
//! dispatcher itself.

use crate::error::{Error, Result};

/// Default end-of-line sequence.
pub const DEFAULT_TERMINATOR: &[u8] = b"\r\n";

/// Default token delimiters.
pub const DEFAULT_DELIMITERS: &[u8] = b" ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    terminator: &'static [u8],
    delimiters: &'static [u8],
}

impl Config {
    /// CR LF terminator, space delimiter.
    pub const fn new() -> Self {
        Self {
            terminator: DEFAULT_TERMINATOR,
            delimiters: DEFAULT_DELIMITERS,
        }
    }

    pub const fn with_terminator(mut self, terminator: &'static [u8]) -> Self {
        self.terminator = terminator;
        self
    }

    /// Any byte in `delimiters` separates tokens. An empty set makes the whole
    /// line a single token.
    pub const fn with_delimiters(mut self, delimiters: &'static [u8]) -> Self {
        self.delimiters = delimiters;
        self
    }

    pub const fn terminator(&self) -> &'static [u8] {
        self.terminator
    }

    pub const fn delimiters(&self) -> &'static [u8] {
        self.delimiters
    }

    /// The byte written between name and payload by framed writes.
    ///
    /// Falls back to a space when the delimiter set is empty.
    pub fn primary_delimiter(&self) -> u8 {
        self.delimiters.first().copied().unwrap_or(b' ')
    }

    /// Checks the configuration can actually terminate a line.
    pub fn validate(&self) -> Result<()> {
        if self.terminator.is_empty() {
            return Err(Error::EmptyTerminator);
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
