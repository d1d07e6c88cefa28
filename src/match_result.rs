//! The outcome of a single consume or neglect step.

use crate::error::MatchError;

/// A named record of the text matched by a capturing sub-pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    pub name: String,
    /// Character offset of the captured text in the input.
    pub offset: usize,
    pub text: String,
}

impl Capture {
    pub fn new(name: impl Into<String>, offset: usize, text: &[char]) -> Self {
        Self {
            name: name.into(),
            offset,
            text: text.iter().collect(),
        }
    }

    /// Number of characters captured.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// The result of a match attempt.
///
/// `length` counts characters consumed from the cursor position at entry and
/// is only meaningful on success. A result succeeded iff `error` is `None`.
/// Captures are kept in the order their capturing nodes completed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    length: usize,
    error: Option<MatchError>,
    captures: Vec<Capture>,
}

impl MatchResult {
    /// A successful step of `length` characters with no captures.
    pub fn success(length: usize) -> Self {
        Self {
            length,
            error: None,
            captures: Vec::new(),
        }
    }

    pub fn failure(error: MatchError) -> Self {
        Self {
            length: 0,
            error: Some(error),
            captures: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn error(&self) -> Option<&MatchError> {
        self.error.as_ref()
    }

    pub fn captures(&self) -> &[Capture] {
        &self.captures
    }

    pub fn into_captures(self) -> Vec<Capture> {
        self.captures
    }

    /// The first capture recorded under `name`.
    pub fn capture(&self, name: &str) -> Option<&Capture> {
        self.captures.iter().find(|c| c.name == name)
    }

    /// Convert into a `Result`, yielding `(length, captures)` on success.
    pub fn into_result(self) -> Result<(usize, Vec<Capture>), MatchError> {
        match self.error {
            None => Ok((self.length, self.captures)),
            Some(err) => Err(err),
        }
    }

    /// Fold a following successful step into this one.
    pub(crate) fn extend(&mut self, next: MatchResult) {
        self.length += next.length;
        self.captures.extend(next.captures);
    }

    pub(crate) fn push_capture(&mut self, capture: Capture) {
        self.captures.push(capture);
    }

    pub(crate) fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }
}
