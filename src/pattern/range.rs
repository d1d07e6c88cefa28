//! Delimited ranges: read from an opening pattern through a closing one.
//!
//! All three scans advance one character at a time and re-test the closing
//! pattern at every position, so they are quadratic in the worst case.

use crate::error::MatchError;
use crate::match_result::MatchResult;
use crate::source::Source;

use super::Pattern;

/// `from`, then everything up to and including the first `to`.
pub(super) fn consume_range(from: &Pattern, to: &Pattern, source: &mut Source) -> MatchResult {
    let start = source.position();
    let mut result = from.consume(source);
    if result.is_failure() {
        source.seek(start);
        return result;
    }
    loop {
        if let Some(closing) = attempt(to, source) {
            result.extend(closing);
            return result.with_length(source.position() - start);
        }
        if source.is_eof() {
            return unterminated(to, start, source);
        }
        source.advance(1);
    }
}

/// Like [`consume_range`], but wherever `escape` matches, the escape and the
/// character after it are skipped without testing `to`.
pub(super) fn consume_escaped_range(
    from: &Pattern,
    to: &Pattern,
    escape: &Pattern,
    source: &mut Source,
) -> MatchResult {
    let start = source.position();
    let mut result = from.consume(source);
    if result.is_failure() {
        source.seek(start);
        return result;
    }
    loop {
        if let Some(escaped) = attempt(escape, source) {
            result.extend(escaped);
            if source.is_eof() {
                return unterminated(to, start, source);
            }
            source.advance(1);
            continue;
        }
        if let Some(closing) = attempt(to, source) {
            result.extend(closing);
            return result.with_length(source.position() - start);
        }
        if source.is_eof() {
            return unterminated(to, start, source);
        }
        source.advance(1);
    }
}

/// Like [`consume_range`], but each further `from` opens a nested level that
/// needs its own `to` before the range closes.
pub(super) fn consume_nested_range(
    from: &Pattern,
    to: &Pattern,
    source: &mut Source,
) -> MatchResult {
    let start = source.position();
    let mut result = from.consume(source);
    if result.is_failure() {
        source.seek(start);
        return result;
    }
    let mut depth = 1usize;
    loop {
        if let Some(closing) = attempt(to, source) {
            result.extend(closing);
            depth -= 1;
            if depth == 0 {
                return result.with_length(source.position() - start);
            }
            continue;
        }
        // A zero-width opener would nest forever without moving.
        if let Some(opening) = attempt(from, source).filter(|r| r.length() > 0) {
            result.extend(opening);
            depth += 1;
            continue;
        }
        if source.is_eof() {
            return unterminated(to, start, source);
        }
        source.advance(1);
    }
}

/// Try `pattern` at the cursor; on failure the cursor is left untouched.
fn attempt(pattern: &Pattern, source: &mut Source) -> Option<MatchResult> {
    if !pattern.is_consume_header(source) {
        return None;
    }
    let start = source.position();
    let result = pattern.consume(source);
    if result.is_success() {
        Some(result)
    } else {
        source.seek(start);
        None
    }
}

fn unterminated(to: &Pattern, start: usize, source: &mut Source) -> MatchResult {
    source.seek(start);
    MatchResult::failure(MatchError::end_of_source(to))
}
