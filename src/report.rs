//! Human-readable rendering of search results against a text.
//!
//! Offsets produced by the engine are character indices; a report maps them
//! to 1-based `line:column` pairs using a [`Rope`] of the input.

use crossterm::style::{Color, Stylize};
use itertools::Itertools;
use ropey::Rope;

use crate::error::MatchError;
use crate::match_result::Capture;
use crate::pattern::Hit;

/// The text being searched, plus how to print positions in it.
pub struct Report {
    rope: Rope,
    color: bool,
}

impl Report {
    pub fn new(text: &str, color: bool) -> Self {
        Self {
            rope: Rope::from_str(text),
            color,
        }
    }

    /// The input as characters, the form the engine matches against.
    pub fn chars(&self) -> Vec<char> {
        self.rope.chars().collect()
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// 1-based line and column of the character at `offset`.
    ///
    /// Offsets past the end are clamped to the end of the text.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.rope.len_chars());
        let line = self.rope.char_to_line(offset);
        let column = offset - self.rope.line_to_char(line);
        (line + 1, column + 1)
    }

    /// `line:col: "text"`, followed by any captures.
    pub fn hit(&self, hit: &Hit) -> String {
        let text = self.rope.slice(hit.start..hit.end).to_string();
        let mut line = format!(
            "{}: {}",
            self.location(hit.start),
            self.paint(format!("{text:?}"), Color::Green)
        );
        if !hit.captures.is_empty() {
            line.push(' ');
            line.push_str(&self.captures(&hit.captures));
        }
        line
    }

    /// `line:col: message` for a step that failed at `offset`.
    pub fn failure(&self, offset: usize, error: &MatchError) -> String {
        format!(
            "{}: {}",
            self.location(offset),
            self.paint(error.to_string(), Color::Red)
        )
    }

    fn captures(&self, captures: &[Capture]) -> String {
        captures
            .iter()
            .map(|c| {
                format!(
                    "{}={:?}",
                    self.paint(c.name.clone(), Color::Cyan),
                    c.text
                )
            })
            .join(" ")
    }

    fn location(&self, offset: usize) -> String {
        let (line, column) = self.line_col(offset);
        self.paint(format!("{line}:{column}"), Color::Yellow)
    }

    fn paint(&self, text: String, color: Color) -> String {
        if self.color {
            text.with(color).to_string()
        } else {
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(start: usize, end: usize) -> Hit {
        Hit {
            start,
            end,
            captures: Vec::new(),
        }
    }

    #[test]
    fn line_col_is_one_based() {
        let report = Report::new("ab\ncd\n", false);
        assert_eq!(report.line_col(0), (1, 1));
        assert_eq!(report.line_col(1), (1, 2));
        assert_eq!(report.line_col(3), (2, 1));
        assert_eq!(report.line_col(4), (2, 2));
    }

    #[test]
    fn line_col_clamps_past_end() {
        let report = Report::new("ab", false);
        assert_eq!(report.line_col(99), (1, 3));
    }

    #[test]
    fn line_col_counts_characters_not_bytes() {
        let report = Report::new("héllo wörld", false);
        assert_eq!(report.line_col(6), (1, 7));
    }

    #[test]
    fn plain_hit() {
        let report = Report::new("hello world", false);
        assert_eq!(report.hit(&hit(6, 11)), r#"1:7: "world""#);
    }

    #[test]
    fn hit_with_captures() {
        let report = Report::new("a=1", false);
        let mut h = hit(0, 3);
        h.captures = vec![
            Capture::new("key", 0, &['a']),
            Capture::new("value", 2, &['1']),
        ];
        assert_eq!(report.hit(&h), r#"1:1: "a=1" key="a" value="1""#);
    }

    #[test]
    fn hit_text_escapes_newlines() {
        let report = Report::new("a\nb", false);
        assert_eq!(report.hit(&hit(0, 3)), r#"1:1: "a\nb""#);
    }

    #[test]
    fn failure_names_the_location() {
        let report = Report::new("x\nyz", false);
        let error = MatchError::consume_failed("<digit>");
        assert_eq!(report.failure(2, &error), "2:1: expected <digit>");
    }

    #[test]
    fn colour_adds_escape_codes() {
        let report = Report::new("abc", true);
        let line = report.hit(&hit(0, 1));
        if std::env::var_os("NO_COLOR").is_none() {
            assert!(line.contains("\u{1b}["));
        }
        assert!(line.contains("\"a\""));
    }

    #[test]
    fn chars_round_trip_the_input() {
        let report = Report::new("héllo\r\n", false);
        assert_eq!(report.chars(), "héllo\r\n".chars().collect::<Vec<_>>());
        assert_eq!(report.len_chars(), 7);
    }
}
