//! Consume, neglect and header checks for every node kind.
//!
//! Every failing step leaves the cursor where it found it. On success the
//! result's `length` always equals the cursor's advance.

use crate::error::MatchError;
use crate::match_result::{Capture, MatchResult};
use crate::source::Source;

use super::range;
use super::{Checker, Literal, Pattern};

impl Pattern {
    /// Match this pattern at the cursor, advancing past it on success.
    pub fn consume(&self, source: &mut Source) -> MatchResult {
        match self {
            Pattern::Literal(lit) => consume_literal(self, lit, source),
            Pattern::Checker(checker) => consume_checker(self, checker, source),
            Pattern::Concatenator { left, right } => {
                let start = source.position();
                let mut result = left.consume(source);
                if result.is_failure() {
                    source.seek(start);
                    return result;
                }
                let next = right.consume(source);
                if next.is_failure() {
                    source.seek(start);
                    return next;
                }
                result.extend(next);
                result
            }
            Pattern::Alternator { left, right } => {
                let start = source.position();
                if left.is_consume_header(source) {
                    let result = left.consume(source);
                    if result.is_success() {
                        return result;
                    }
                    source.seek(start);
                }
                let result = right.consume(source);
                if result.is_failure() {
                    source.seek(start);
                }
                result
            }
            Pattern::Optor(inner) => {
                let start = source.position();
                let result = inner.consume(source);
                if result.is_success() {
                    result
                } else {
                    source.seek(start);
                    MatchResult::success(0)
                }
            }
            Pattern::Spanner(inner) => {
                let mut total = MatchResult::success(0);
                loop {
                    let step_start = source.position();
                    let step = inner.consume(source);
                    if step.is_failure() {
                        source.seek(step_start);
                        break;
                    }
                    let progressed = step.length() > 0;
                    total.extend(step);
                    if !progressed {
                        break;
                    }
                }
                total
            }
            Pattern::Repeater { inner, count } => {
                let start = source.position();
                let mut total = MatchResult::success(0);
                for _ in 0..*count {
                    let step = inner.consume(source);
                    if step.is_failure() {
                        source.seek(start);
                        return step;
                    }
                    total.extend(step);
                }
                total
            }
            Pattern::Negator(inner) => inner.neglect(source),
            Pattern::Ranger { from, to } => range::consume_range(from, to, source),
            Pattern::EscapedRanger { from, to, escape } => {
                range::consume_escaped_range(from, to, escape, source)
            }
            Pattern::NestedRanger { from, to } => range::consume_nested_range(from, to, source),
            Pattern::Capturer { inner, name } => {
                let start = source.position();
                let result = inner.consume(source);
                captured(result, name, start, source)
            }
        }
    }

    /// Match anything this pattern would reject at the cursor.
    ///
    /// Fixed-width leaves neglect by consuming the same width of unequal
    /// input. [`Pattern::Negator`] neglects by consuming its inner pattern.
    /// Every other combinator falls back to "consume fails here": the
    /// attempt is rolled back and a single character is taken instead.
    pub fn neglect(&self, source: &mut Source) -> MatchResult {
        match self {
            Pattern::Literal(lit) => neglect_literal(self, lit, source),
            Pattern::Checker(checker) => neglect_checker(self, checker, source),
            Pattern::Negator(inner) => inner.consume(source),
            Pattern::Capturer { inner, name } => {
                let start = source.position();
                let result = inner.neglect(source);
                captured(result, name, start, source)
            }
            _ => self.neglect_by_consume(source),
        }
    }

    /// Cheap test of whether [`consume`](Self::consume) could succeed here.
    ///
    /// Only looks at the next character. A `false` is definite; a `true` only
    /// means a full attempt is worth making.
    pub fn is_consume_header(&self, source: &Source) -> bool {
        match self {
            Pattern::Literal(lit) => match lit.text.first() {
                None => true,
                Some(&first) => source
                    .peek()
                    .is_some_and(|ch| lit.comparison.chars_eq(first, ch)),
            },
            Pattern::Checker(checker) => source.peek().is_some_and(|ch| checker.check(ch)),
            Pattern::Concatenator { left, right } => {
                left.is_consume_header(source)
                    || (left.is_nullable() && right.is_consume_header(source))
            }
            Pattern::Alternator { left, right } => {
                left.is_consume_header(source) || right.is_consume_header(source)
            }
            Pattern::Optor(_) | Pattern::Spanner(_) => true,
            Pattern::Repeater { inner, count } => *count == 0 || inner.is_consume_header(source),
            Pattern::Negator(inner) => inner.is_neglect_header(source),
            Pattern::Ranger { from, .. }
            | Pattern::EscapedRanger { from, .. }
            | Pattern::NestedRanger { from, .. } => {
                from.is_nullable() || from.is_consume_header(source)
            }
            Pattern::Capturer { inner, .. } => inner.is_consume_header(source),
        }
    }

    /// Cheap test of whether [`neglect`](Self::neglect) could succeed here.
    pub fn is_neglect_header(&self, source: &Source) -> bool {
        match self {
            Pattern::Literal(lit) => match lit.text.as_slice() {
                [] => false,
                [single] => source
                    .peek()
                    .is_some_and(|ch| !lit.comparison.chars_eq(*single, ch)),
                text => source.remaining() >= text.len(),
            },
            Pattern::Checker(checker) => source.peek().is_some_and(|ch| !checker.check(ch)),
            Pattern::Negator(inner) => inner.is_consume_header(source),
            Pattern::Capturer { inner, .. } => inner.is_neglect_header(source),
            _ => !source.is_eof(),
        }
    }

    /// True if [`consume`](Self::consume) can succeed without advancing.
    pub fn is_nullable(&self) -> bool {
        match self {
            Pattern::Literal(lit) => lit.is_empty(),
            Pattern::Checker(_) => false,
            Pattern::Concatenator { left, right } => left.is_nullable() && right.is_nullable(),
            Pattern::Alternator { left, right } => left.is_nullable() || right.is_nullable(),
            Pattern::Optor(_) | Pattern::Spanner(_) => true,
            Pattern::Repeater { inner, count } => *count == 0 || inner.is_nullable(),
            Pattern::Negator(inner) => inner.is_neglect_nullable(),
            Pattern::Ranger { from, to }
            | Pattern::EscapedRanger { from, to, .. }
            | Pattern::NestedRanger { from, to } => from.is_nullable() && to.is_nullable(),
            Pattern::Capturer { inner, .. } => inner.is_nullable(),
        }
    }

    fn is_neglect_nullable(&self) -> bool {
        match self {
            Pattern::Negator(inner) => inner.is_nullable(),
            Pattern::Capturer { inner, .. } => inner.is_neglect_nullable(),
            _ => false,
        }
    }

    /// Consume against the whole of `text`, starting at its first character.
    pub fn consume_str(&self, text: &str) -> MatchResult {
        let chars: Vec<char> = text.chars().collect();
        self.consume(&mut Source::new(&chars))
    }

    /// Neglect against the whole of `text`, starting at its first character.
    pub fn neglect_str(&self, text: &str) -> MatchResult {
        let chars: Vec<char> = text.chars().collect();
        self.neglect(&mut Source::new(&chars))
    }

    fn neglect_by_consume(&self, source: &mut Source) -> MatchResult {
        let start = source.position();
        let attempt = self.consume(source);
        source.seek(start);
        if attempt.is_success() {
            MatchResult::failure(MatchError::neglect_failed(self))
        } else if source.is_eof() {
            MatchResult::failure(MatchError::end_of_source(self))
        } else {
            source.advance(1);
            MatchResult::success(1)
        }
    }
}

fn consume_literal(node: &Pattern, lit: &Literal, source: &mut Source) -> MatchResult {
    let Some(ahead) = source.peek_n(lit.len()) else {
        return MatchResult::failure(MatchError::end_of_source(node));
    };
    if lit.comparison.slices_eq(&lit.text, ahead) {
        source.advance(lit.len());
        MatchResult::success(lit.len())
    } else {
        MatchResult::failure(MatchError::consume_failed(node))
    }
}

fn neglect_literal(node: &Pattern, lit: &Literal, source: &mut Source) -> MatchResult {
    let Some(ahead) = source.peek_n(lit.len()) else {
        return MatchResult::failure(MatchError::end_of_source(node));
    };
    if lit.comparison.slices_eq(&lit.text, ahead) {
        MatchResult::failure(MatchError::neglect_failed(node))
    } else {
        source.advance(lit.len());
        MatchResult::success(lit.len())
    }
}

fn consume_checker(node: &Pattern, checker: &Checker, source: &mut Source) -> MatchResult {
    match source.peek() {
        None => MatchResult::failure(MatchError::end_of_source(node)),
        Some(ch) if checker.check(ch) => {
            source.advance(1);
            MatchResult::success(1)
        }
        Some(_) => MatchResult::failure(MatchError::consume_failed(node)),
    }
}

fn neglect_checker(node: &Pattern, checker: &Checker, source: &mut Source) -> MatchResult {
    match source.peek() {
        None => MatchResult::failure(MatchError::end_of_source(node)),
        Some(ch) if !checker.check(ch) => {
            source.advance(1);
            MatchResult::success(1)
        }
        Some(_) => MatchResult::failure(MatchError::neglect_failed(node)),
    }
}

/// Record the text a successful step walked over, after any inner captures.
fn captured(mut result: MatchResult, name: &str, start: usize, source: &Source) -> MatchResult {
    if result.is_success() {
        let text = source.slice(start, result.length());
        result.push_capture(Capture::new(name, start, text));
    }
    result
}
