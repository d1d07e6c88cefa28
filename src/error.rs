//! Match-time error taxonomy.
//!
//! These are data carried by a [`MatchResult`](crate::MatchResult), never
//! panics or `Err` returns: a failed match is an ordinary outcome.

use thiserror::Error;

/// Why a consume or neglect step failed.
///
/// Each variant holds the rendered notation of the pattern involved, so
/// messages read like `expected "abc"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// The end of the source was reached while more input was required.
    #[error("end of source reached while expecting {expected}")]
    EndOfSource { expected: String },
    /// Input was present but did not match.
    #[error("expected {expected}")]
    ConsumeFailed { expected: String },
    /// Input was present and matched the pattern being neglected.
    #[error("found {neglected} where it was to be neglected")]
    NeglectFailed { neglected: String },
}

impl MatchError {
    pub fn end_of_source(expected: impl ToString) -> Self {
        Self::EndOfSource {
            expected: expected.to_string(),
        }
    }

    pub fn consume_failed(expected: impl ToString) -> Self {
        Self::ConsumeFailed {
            expected: expected.to_string(),
        }
    }

    pub fn neglect_failed(neglected: impl ToString) -> Self {
        Self::NeglectFailed {
            neglected: neglected.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_embed_the_pattern() {
        assert_eq!(
            MatchError::end_of_source("\"abc\"").to_string(),
            "end of source reached while expecting \"abc\""
        );
        assert_eq!(
            MatchError::consume_failed("<digit>").to_string(),
            "expected <digit>"
        );
        assert_eq!(
            MatchError::neglect_failed("\"x\"").to_string(),
            "found \"x\" where it was to be neglected"
        );
    }
}
