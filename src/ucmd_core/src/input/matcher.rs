//! Terminator detection, one byte at a time.
//!
//! The matcher only remembers how many bytes of the terminator have been seen
//! in a row. A byte that breaks the run restarts matching from zero; it is not
//! re-tested as the start of a new run. With a CR LF terminator the input
//! `"\r\r\n"` therefore never matches, and overlapping patterns such as a
//! terminator `"aa"` fed `"aaa"` match only once.

/// Result of feeding one byte to a [`TerminatorMatcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MatchState {
    /// The terminator is not complete yet.
    Continue,
    /// The byte just fed was the last byte of the terminator.
    Matched,
}

#[derive(Debug, Clone)]
pub struct TerminatorMatcher<'t> {
    terminator: &'t [u8],
    position: usize,
}

impl<'t> TerminatorMatcher<'t> {
    /// `terminator` must not be empty; an empty one never matches.
    pub const fn new(terminator: &'t [u8]) -> Self {
        Self {
            terminator,
            position: 0,
        }
    }

    /// Feeds one byte.
    ///
    /// After reporting [`MatchState::Matched`] the position is back at zero,
    /// ready for the next line.
    pub fn advance(&mut self, byte: u8) -> MatchState {
        match self.terminator.get(self.position) {
            Some(&expected) if expected == byte => {
                self.position += 1;
                if self.position == self.terminator.len() {
                    self.position = 0;
                    MatchState::Matched
                } else {
                    MatchState::Continue
                }
            }
            _ => {
                self.position = 0;
                MatchState::Continue
            }
        }
    }

    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Number of terminator bytes matched so far.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn terminator(&self) -> &'t [u8] {
        self.terminator
    }
}
