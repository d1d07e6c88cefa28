//! Pattern trees and the consume/neglect matching engine.
//!
//! A [`Pattern`] is an immutable tree of nodes. Every node can **consume**
//! (match itself at the cursor) or **neglect** (match something it would
//! reject, at the cursor). [`Pattern::negate`] simply swaps the two.
//!
//! # Notation
//!
//! Patterns render to, and [`parse`] reads, this notation:
//!
//! | Token              | Node                                          |
//! |--------------------|-----------------------------------------------|
//! | `"text"`           | Literal (exact case)                          |
//! | `'text'`           | Literal (case-insensitive)                    |
//! | `<digit>`          | Checker for a named class                     |
//! | `<letter\|digit>`  | Checker accepting either class                |
//! | `X Y`              | Concatenator                                  |
//! | `X \| Y`           | Alternator (left wins)                        |
//! | `~X`               | Optor (zero or one)                           |
//! | `*X`               | Spanner (zero or more)                        |
//! | `nX`               | Repeater (exactly n)                          |
//! | `!X`               | Negator                                       |
//! | `name:X`           | Capturer                                      |
//! | `[F, T]`           | Ranger from F through T                       |
//! | `[F, T, E]`        | EscapedRanger with escape E                   |
//! | `{F, T}`           | NestedRanger                                  |
//! | `(X)`              | Grouping                                      |

use std::fmt;
use std::sync::Arc;

pub mod build;
pub mod char_class;
mod engine;
pub mod parser;
mod range;
mod render;
pub mod search;


pub use parser::{ParseError, parse};
pub use search::{Hit, find_all, find_backward, find_forward, match_at};

/// How a [`Literal`] compares characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Comparison {
    #[default]
    CaseSensitive,
    CaseInsensitive,
}

impl Comparison {
    pub fn chars_eq(self, a: char, b: char) -> bool {
        match self {
            Comparison::CaseSensitive => a == b,
            Comparison::CaseInsensitive => a == b || a.to_lowercase().eq(b.to_lowercase()),
        }
    }

    pub fn slices_eq(self, a: &[char], b: &[char]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| self.chars_eq(x, y))
    }
}

/// A fixed string matched under a [`Comparison`].
#[derive(Debug, Clone)]
pub struct Literal {
    pub(crate) text: Vec<char>,
    pub(crate) comparison: Comparison,
}

impl Literal {
    pub fn new(text: &str, comparison: Comparison) -> Self {
        Self {
            text: text.chars().collect(),
            comparison,
        }
    }

    pub fn text(&self) -> String {
        self.text.iter().collect()
    }

    pub fn comparison(&self) -> Comparison {
        self.comparison
    }

    /// Width in characters.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Shared character predicate.
pub type Predicate = Arc<dyn Fn(char) -> bool + Send + Sync>;

/// A single-character test.
///
/// The optional name is what the checker renders as in diagnostics, and it
/// is also its identity: two named checkers are equal whenever their names
/// are, whatever their predicates. A checker built with
/// [`Pattern::checker`] under a class name such as `"digit"` therefore
/// equals the `<digit>` class. Pick a distinct name, or use
/// [`Pattern::predicate`], for a test that should compare unequal.
#[derive(Clone)]
pub struct Checker {
    pub(crate) name: Option<String>,
    pub(crate) predicate: Predicate,
}

impl Checker {
    pub fn new(name: Option<String>, predicate: Predicate) -> Self {
        Self { name, predicate }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn check(&self, ch: char) -> bool {
        (self.predicate)(ch)
    }
}

impl fmt::Debug for Checker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checker")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A node of a pattern tree.
///
/// Trees are built through the façade in [`build`] and never mutated
/// afterwards, so one tree may be matched from many threads at once, each
/// with its own [`Source`](crate::Source).
#[derive(Debug, Clone)]
pub enum Pattern {
    Literal(Literal),
    Checker(Checker),
    Concatenator {
        left: Box<Pattern>,
        right: Box<Pattern>,
    },
    Alternator {
        left: Box<Pattern>,
        right: Box<Pattern>,
    },
    Optor(Box<Pattern>),
    Spanner(Box<Pattern>),
    Repeater {
        inner: Box<Pattern>,
        count: usize,
    },
    Negator(Box<Pattern>),
    Ranger {
        from: Box<Pattern>,
        to: Box<Pattern>,
    },
    EscapedRanger {
        from: Box<Pattern>,
        to: Box<Pattern>,
        escape: Box<Pattern>,
    },
    NestedRanger {
        from: Box<Pattern>,
        to: Box<Pattern>,
    },
    Capturer {
        inner: Box<Pattern>,
        name: String,
    },
}
