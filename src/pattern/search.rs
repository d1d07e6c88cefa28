//! Search helpers: run a pattern at many offsets of an input.
//!
//! All offsets are **character** (not byte) indices into the input.

use tracing::trace;

use crate::match_result::Capture;
use crate::source::Source;

use super::Pattern;

/// A successful match found by a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    /// Offset where the match begins.
    pub start: usize,
    /// Offset just past the match.
    pub end: usize,
    pub captures: Vec<Capture>,
}

impl Hit {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The matched text.
    pub fn text(&self, input: &[char]) -> String {
        input[self.start..self.end].iter().collect()
    }
}

/// Test whether a match begins exactly at `offset`.
pub fn match_at(pattern: &Pattern, input: &[char], offset: usize) -> Option<Hit> {
    if offset > input.len() {
        return None;
    }
    let mut source = Source::at(input, offset);
    // Offsets the header rules out are skipped without a full attempt.
    if !pattern.is_consume_header(&source) {
        return None;
    }
    let result = pattern.consume(&mut source);
    if result.is_failure() {
        return None;
    }
    let end = offset + result.length();
    trace!(offset, end, "hit");
    Some(Hit {
        start: offset,
        end,
        captures: result.into_captures(),
    })
}

/// Find the leftmost match beginning at or after `start`.
pub fn find_forward(pattern: &Pattern, input: &[char], start: usize) -> Option<Hit> {
    trace!(start, len = input.len(), "forward search");
    (start..=input.len()).find_map(|offset| match_at(pattern, input, offset))
}

/// Find the rightmost match beginning at or before `start`.
pub fn find_backward(pattern: &Pattern, input: &[char], start: usize) -> Option<Hit> {
    let upper = start.min(input.len());
    trace!(start = upper, len = input.len(), "backward search");
    (0..=upper)
        .rev()
        .find_map(|offset| match_at(pattern, input, offset))
}

/// All non-overlapping matches beginning at or after `start`, left to right.
///
/// After an empty match the scan resumes one character further on.
pub fn find_all(pattern: &Pattern, input: &[char], start: usize) -> Vec<Hit> {
    let mut hits = Vec::new();
    let mut offset = start;
    while offset <= input.len() {
        match find_forward(pattern, input, offset) {
            Some(hit) => {
                offset = if hit.is_empty() { hit.end + 1 } else { hit.end };
                hits.push(hit);
            }
            None => break,
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::parse;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn fwd(pattern: &str, line: &str, start: usize) -> Option<(usize, usize)> {
        let p = parse(pattern).unwrap();
        find_forward(&p, &chars(line), start).map(|h| (h.start, h.end))
    }

    fn bwd(pattern: &str, line: &str, start: usize) -> Option<(usize, usize)> {
        let p = parse(pattern).unwrap();
        find_backward(&p, &chars(line), start).map(|h| (h.start, h.end))
    }

    fn mat(pattern: &str, line: &str, col: usize) -> Option<(usize, usize)> {
        let p = parse(pattern).unwrap();
        match_at(&p, &chars(line), col).map(|h| (h.start, h.end))
    }

    // --- Forward search ---

    #[test]
    fn literal_not_at_start() {
        assert_eq!(fwd(r#""world""#, "hello world", 0), Some((6, 11)));
    }

    #[test]
    fn literal_no_match() {
        assert_eq!(fwd(r#""xyz""#, "hello world", 0), None);
    }

    #[test]
    fn case_insensitive_literal() {
        assert_eq!(fwd("'WORLD'", "hello world", 0), Some((6, 11)));
    }

    #[test]
    fn first_digit() {
        assert_eq!(fwd("<digit>", "abc123", 0), Some((3, 4)));
    }

    #[test]
    fn respects_start() {
        assert_eq!(fwd("<letter>", "ab", 1), Some((1, 2)));
        assert_eq!(fwd("<letter>", "ab", 2), None);
    }

    #[test]
    fn span_matches_empty_at_start() {
        assert_eq!(fwd("*<digit>", "abc", 0), Some((0, 0)));
    }

    #[test]
    fn start_past_end_finds_nothing() {
        assert_eq!(fwd(r#""a""#, "a", 5), None);
    }

    // --- match_at ---

    #[test]
    fn match_at_success() {
        assert_eq!(mat("<letter>", "abc", 0), Some((0, 1)));
    }

    #[test]
    fn match_at_wrong_pos() {
        assert_eq!(mat("<digit>", "abc", 0), None);
    }

    #[test]
    fn match_at_correct_pos() {
        assert_eq!(mat("<digit>", "abc123", 3), Some((3, 4)));
    }

    // --- Backward search ---

    #[test]
    fn backward_finds_last() {
        assert_eq!(bwd("<letter>", "abcde", 4), Some((4, 5)));
    }

    #[test]
    fn backward_respects_start() {
        assert_eq!(bwd("<letter>", "abcde", 2), Some((2, 3)));
    }

    #[test]
    fn backward_clamps_start() {
        assert_eq!(bwd(r#""e""#, "abcde", 100), Some((4, 5)));
    }

    // --- find_all ---

    #[test]
    fn find_all_is_non_overlapping() {
        let p = parse(r#""aa""#).unwrap();
        let hits = find_all(&p, &chars("aaaaa"), 0);
        let spans: Vec<(usize, usize)> = hits.iter().map(|h| (h.start, h.end)).collect();
        assert_eq!(spans, [(0, 2), (2, 4)]);
    }

    #[test]
    fn find_all_steps_past_empty_hits() {
        let p = parse("*<digit>").unwrap();
        let input = chars("1a22");
        let hits = find_all(&p, &input, 0);
        let texts: Vec<String> = hits.iter().map(|h| h.text(&input)).collect();
        assert_eq!(texts, ["1", "", "22", ""]);
    }

    #[test]
    fn find_all_collects_captures() {
        let p = parse(r#"key: (<letter> *<letter>) "=" value: *<digit>"#).unwrap();
        let input = chars("a=1 bc=22");
        let hits = find_all(&p, &input, 0);
        let pairs: Vec<(String, String)> = hits
            .iter()
            .map(|h| (h.captures[0].text.clone(), h.captures[1].text.clone()))
            .collect();
        assert_eq!(
            pairs,
            [
                ("a".to_string(), "1".to_string()),
                ("bc".to_string(), "22".to_string())
            ]
        );
    }
}
