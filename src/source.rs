//! The source cursor a pattern is matched against.
//!
//! All positions are **character** (not byte) indices into the input.

/// A read-only character sequence with a mutable read position.
///
/// The position always satisfies `0 <= position <= len()`. One `Source` is
/// owned by a single match attempt; patterns themselves hold no per-match
/// state.
#[derive(Debug, Clone)]
pub struct Source<'a> {
    chars: &'a [char],
    position: usize,
}

impl<'a> Source<'a> {
    /// Create a cursor at the start of `chars`.
    pub fn new(chars: &'a [char]) -> Self {
        Self { chars, position: 0 }
    }

    /// Create a cursor at `position`, clamped to the end of the input.
    pub fn at(chars: &'a [char], position: usize) -> Self {
        Self {
            chars,
            position: position.min(chars.len()),
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Move the cursor to `position`, clamped to the end of the input.
    ///
    /// This is how callers rewind a cursor before re-attempting a match.
    pub fn seek(&mut self, position: usize) {
        self.position = position.min(self.chars.len());
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// True when the cursor sits at the end of the input.
    pub fn is_eof(&self) -> bool {
        self.position == self.chars.len()
    }

    /// Number of characters left after the cursor.
    pub fn remaining(&self) -> usize {
        self.chars.len() - self.position
    }

    /// The character under the cursor, if any.
    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    /// The next `n` characters, or `None` if fewer remain.
    pub fn peek_n(&self, n: usize) -> Option<&'a [char]> {
        self.chars.get(self.position..self.position + n)
    }

    /// The whole underlying input.
    pub fn chars(&self) -> &'a [char] {
        self.chars
    }

    /// `len` characters starting at `start`.
    ///
    /// Panics if the range lies outside the input; the engine only slices
    /// spans it has already walked over.
    pub fn slice(&self, start: usize, len: usize) -> &'a [char] {
        &self.chars[start..start + len]
    }

    /// Advance by `n` characters, stopping at the end of the input.
    pub(crate) fn advance(&mut self, n: usize) {
        self.seek(self.position + n);
    }
}
