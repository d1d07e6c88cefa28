//! Structural equality and notation rendering for pattern trees.

use std::fmt;
use std::sync::Arc;

use super::{Checker, Comparison, Literal, Pattern};

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        self.comparison == other.comparison && self.comparison.slices_eq(&self.text, &other.text)
    }
}

/// Named checkers compare by name only; anonymous ones only equal themselves.
impl PartialEq for Checker {
    fn eq(&self, other: &Self) -> bool {
        match (&self.name, &other.name) {
            (Some(a), Some(b)) => a == b,
            (None, None) => Arc::ptr_eq(&self.predicate, &other.predicate),
            _ => false,
        }
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        use Pattern::*;
        match (self, other) {
            (Literal(a), Literal(b)) => a == b,
            (Checker(a), Checker(b)) => a == b,
            (Concatenator { left: l1, right: r1 }, Concatenator { left: l2, right: r2 })
            | (Alternator { left: l1, right: r1 }, Alternator { left: l2, right: r2 })
            | (Ranger { from: l1, to: r1 }, Ranger { from: l2, to: r2 })
            | (NestedRanger { from: l1, to: r1 }, NestedRanger { from: l2, to: r2 }) => {
                l1 == l2 && r1 == r2
            }
            (Optor(a), Optor(b)) | (Spanner(a), Spanner(b)) | (Negator(a), Negator(b)) => a == b,
            (Repeater { inner: a, count: n }, Repeater { inner: b, count: m }) => n == m && a == b,
            (
                EscapedRanger {
                    from: f1,
                    to: t1,
                    escape: e1,
                },
                EscapedRanger {
                    from: f2,
                    to: t2,
                    escape: e2,
                },
            ) => f1 == f2 && t1 == t2 && e1 == e2,
            (Capturer { inner: a, name: n }, Capturer { inner: b, name: m }) => n == m && a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quote = match self.comparison {
            Comparison::CaseSensitive => '"',
            Comparison::CaseInsensitive => '\'',
        };
        write!(f, "{quote}")?;
        for &ch in &self.text {
            if ch == quote || ch == '\\' {
                write!(f, "\\")?;
            }
            write!(f, "{ch}")?;
        }
        write!(f, "{quote}")
    }
}

impl fmt::Display for Checker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.name.as_deref().unwrap_or("?"))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Literal(lit) => write!(f, "{lit}"),
            Pattern::Checker(checker) => write!(f, "{checker}"),
            Pattern::Concatenator { left, right } => {
                // Sequences parse left-associatively.
                write_grouped(f, left, matches!(**left, Pattern::Alternator { .. }))?;
                write!(f, " ")?;
                write_grouped(
                    f,
                    right,
                    matches!(
                        **right,
                        Pattern::Alternator { .. } | Pattern::Concatenator { .. }
                    ),
                )
            }
            Pattern::Alternator { left, right } => {
                write!(f, "{left} | ")?;
                write_grouped(f, right, matches!(**right, Pattern::Alternator { .. }))
            }
            Pattern::Optor(inner) => {
                write!(f, "~")?;
                write_operand(f, inner)
            }
            Pattern::Spanner(inner) => {
                write!(f, "*")?;
                write_operand(f, inner)
            }
            Pattern::Negator(inner) => {
                write!(f, "!")?;
                write_operand(f, inner)
            }
            Pattern::Repeater { inner, count } => {
                write!(f, "{count}")?;
                write_grouped(
                    f,
                    inner,
                    is_compound(inner) || matches!(**inner, Pattern::Repeater { .. }),
                )
            }
            Pattern::Capturer { inner, name } => {
                write!(f, "{name}:")?;
                write_operand(f, inner)
            }
            Pattern::Ranger { from, to } => write!(f, "[{from}, {to}]"),
            Pattern::EscapedRanger { from, to, escape } => {
                write!(f, "[{from}, {to}, {escape}]")
            }
            Pattern::NestedRanger { from, to } => write!(f, "{{{from}, {to}}}"),
        }
    }
}

fn is_compound(pattern: &Pattern) -> bool {
    matches!(
        pattern,
        Pattern::Concatenator { .. } | Pattern::Alternator { .. }
    )
}

fn write_operand(f: &mut fmt::Formatter<'_>, pattern: &Pattern) -> fmt::Result {
    write_grouped(f, pattern, is_compound(pattern))
}

fn write_grouped(f: &mut fmt::Formatter<'_>, pattern: &Pattern, group: bool) -> fmt::Result {
    if group {
        write!(f, "({pattern})")
    } else {
        write!(f, "{pattern}")
    }
}
