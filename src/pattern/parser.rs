//! Recursive descent parser for the pattern notation.
//!
//! Nodes are built through the [`build`](super::build) façade, so parsed
//! trees carry the same checker folding as hand-built ones.

use std::iter::Peekable;
use std::str::Chars;

use itertools::Itertools;
use tracing::debug;

use super::Pattern;
use super::char_class;

/// Errors that can occur while parsing a pattern string.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    UnexpectedChar(char),
    UnexpectedEnd,
    InvalidNumber,
    UnclosedGroup,
    UnclosedString,
    UnclosedClass,
    UnclosedRange,
    UnknownClass(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedChar(c) => write!(f, "Unexpected character in pattern: {c:?}"),
            Self::UnexpectedEnd => write!(f, "Unexpected end of pattern"),
            Self::InvalidNumber => write!(f, "Invalid repeat count in pattern"),
            Self::UnclosedGroup => write!(f, "Unclosed group '(' in pattern"),
            Self::UnclosedString => write!(f, "Unclosed string literal in pattern"),
            Self::UnclosedClass => write!(f, "Unclosed character class '<' in pattern"),
            Self::UnclosedRange => write!(f, "Unclosed range in pattern"),
            Self::UnknownClass(name) => write!(
                f,
                "Unknown character class <{name}>; known classes: {}",
                char_class::names().iter().join(", ")
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a pattern string into a [`Pattern`].
pub fn parse(input: &str) -> Result<Pattern, ParseError> {
    let mut parser = Parser {
        chars: input.chars().peekable(),
    };
    let pattern = parser.parse_alternation()?;
    parser.skip_space();
    match parser.chars.next() {
        None => {
            debug!(input, pattern = %pattern, "parsed pattern");
            Ok(pattern)
        }
        Some(c) => Err(ParseError::UnexpectedChar(c)),
    }
}

struct Parser<'a> {
    chars: Peekable<Chars<'a>>,
}

impl Parser<'_> {
    fn parse_alternation(&mut self) -> Result<Pattern, ParseError> {
        let mut pattern = self.parse_sequence()?;
        loop {
            self.skip_space();
            if self.chars.peek() == Some(&'|') {
                self.chars.next(); // consume '|'
                pattern = pattern.alternate(self.parse_sequence()?);
            } else {
                return Ok(pattern);
            }
        }
    }

    /// One or more juxtaposed unary terms.
    fn parse_sequence(&mut self) -> Result<Pattern, ParseError> {
        let mut pattern: Option<Pattern> = None;
        loop {
            self.skip_space();
            match self.chars.peek() {
                None | Some('|') | Some(')') | Some(']') | Some('}') | Some(',') => break,
                _ => {
                    let term = self.parse_unary()?;
                    pattern = Some(match pattern {
                        Some(left) => left.concatenate(term),
                        None => term,
                    });
                }
            }
        }
        match (pattern, self.chars.peek()) {
            (Some(pattern), _) => Ok(pattern),
            (None, None) => Err(ParseError::UnexpectedEnd),
            (None, Some(&c)) => Err(ParseError::UnexpectedChar(c)),
        }
    }

    /// A primary with any number of prefix operators.
    fn parse_unary(&mut self) -> Result<Pattern, ParseError> {
        self.skip_space();
        match self.chars.peek() {
            Some('!') => {
                self.chars.next();
                Ok(self.parse_unary()?.negate())
            }
            Some('~') => {
                self.chars.next();
                Ok(self.parse_unary()?.optional())
            }
            Some('*') => {
                self.chars.next();
                Ok(self.parse_unary()?.span())
            }
            Some(c) if c.is_ascii_digit() => {
                let count = self.parse_number()?;
                Ok(self.parse_unary()?.repeat(count))
            }
            Some(&c) if is_ident_start(c) => {
                let name = self.parse_ident();
                self.skip_space();
                match self.chars.next() {
                    Some(':') => Ok(self.parse_unary()?.capture(name)),
                    Some(c) => Err(ParseError::UnexpectedChar(c)),
                    None => Err(ParseError::UnexpectedEnd),
                }
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> Result<Pattern, ParseError> {
        match self.chars.peek() {
            None => Err(ParseError::UnexpectedEnd),
            Some('"') | Some('\'') => self.parse_string(),
            Some('<') => self.parse_class(),
            Some('(') => {
                self.chars.next();
                let pattern = self.parse_alternation()?;
                self.skip_space();
                match self.chars.next() {
                    Some(')') => Ok(pattern),
                    _ => Err(ParseError::UnclosedGroup),
                }
            }
            Some('[') => {
                self.chars.next();
                let from = self.parse_alternation()?;
                self.expect_separator()?;
                let to = self.parse_alternation()?;
                self.skip_space();
                match self.chars.next() {
                    Some(']') => Ok(Pattern::range(from, to)),
                    Some(',') => {
                        let escape = self.parse_alternation()?;
                        self.skip_space();
                        match self.chars.next() {
                            Some(']') => Ok(Pattern::escaped_range(from, to, escape)),
                            _ => Err(ParseError::UnclosedRange),
                        }
                    }
                    _ => Err(ParseError::UnclosedRange),
                }
            }
            Some('{') => {
                self.chars.next();
                let from = self.parse_alternation()?;
                self.expect_separator()?;
                let to = self.parse_alternation()?;
                self.skip_space();
                match self.chars.next() {
                    Some('}') => Ok(Pattern::nested_range(from, to)),
                    _ => Err(ParseError::UnclosedRange),
                }
            }
            Some(&c) => Err(ParseError::UnexpectedChar(c)),
        }
    }

    fn expect_separator(&mut self) -> Result<(), ParseError> {
        self.skip_space();
        match self.chars.next() {
            Some(',') => Ok(()),
            _ => Err(ParseError::UnclosedRange),
        }
    }

    /// Parse a `"..."` or `'...'` literal; single quotes ignore case.
    ///
    /// A backslash takes the next character literally.
    fn parse_string(&mut self) -> Result<Pattern, ParseError> {
        let delim = self.chars.next().ok_or(ParseError::UnexpectedEnd)?;
        let mut text = String::new();
        loop {
            match self.chars.next() {
                Some(c) if c == delim => break,
                Some('\\') => match self.chars.next() {
                    Some(c) => text.push(c),
                    None => return Err(ParseError::UnclosedString),
                },
                Some(c) => text.push(c),
                None => return Err(ParseError::UnclosedString),
            }
        }
        if delim == '\'' {
            Ok(Pattern::literal_ignore_case(&text))
        } else {
            Ok(Pattern::literal(&text))
        }
    }

    /// Parse `<name>` or `<name|name|...>`.
    fn parse_class(&mut self) -> Result<Pattern, ParseError> {
        self.chars.next(); // consume '<'
        let mut body = String::new();
        loop {
            match self.chars.next() {
                Some('>') => break,
                Some(c) => body.push(c),
                None => return Err(ParseError::UnclosedClass),
            }
        }
        let mut pattern: Option<Pattern> = None;
        for name in body.split('|').map(str::trim) {
            let checker = char_class::checker(name)
                .ok_or_else(|| ParseError::UnknownClass(name.to_string()))?;
            pattern = Some(match pattern {
                Some(left) => left.alternate(checker),
                None => checker,
            });
        }
        pattern.ok_or(ParseError::UnclosedClass)
    }

    fn parse_number(&mut self) -> Result<usize, ParseError> {
        let mut s = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_digit() {
                s.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        if s.is_empty() {
            return Err(ParseError::InvalidNumber);
        }
        s.parse::<usize>().map_err(|_| ParseError::InvalidNumber)
    }

    fn parse_ident(&mut self) -> String {
        let mut name = String::new();
        while let Some(&c) = self.chars.peek() {
            if is_ident_continue(c) {
                name.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        name
    }

    fn skip_space(&mut self) {
        while matches!(self.chars.peek(), Some(c) if c.is_whitespace()) {
            self.chars.next();
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(s: &str) -> Pattern {
        parse(s).expect("parse should succeed")
    }
    fn parse_err(s: &str) -> ParseError {
        parse(s).expect_err("parse should fail")
    }
    fn class(name: &str) -> Pattern {
        char_class::checker(name).expect("known class")
    }

    // --- Literals ---

    #[test]
    fn double_quote_literal() {
        assert_eq!(parse_ok(r#""hello""#), Pattern::literal("hello"));
    }

    #[test]
    fn single_quote_literal_ignores_case() {
        assert_eq!(parse_ok("'hello'"), Pattern::literal_ignore_case("HELLO"));
    }

    #[test]
    fn backslash_escapes_in_literal() {
        assert_eq!(parse_ok(r#""a\"b\\""#), Pattern::literal(r#"a"b\"#));
    }

    #[test]
    fn juxtaposed_literals_concatenate() {
        assert_eq!(
            parse_ok(r#""ab" "cd""#),
            Pattern::literal("ab").concatenate("cd")
        );
    }

    #[test]
    fn negated_sequence_neglects_one_character() {
        let p = parse_ok(r#"!("a" "b")"#);
        assert_eq!(p.consume_str("x").length(), 1);
        assert!(p.consume_str("ab").is_failure());
    }

    // --- Classes ---

    #[test]
    fn named_class() {
        assert_eq!(parse_ok("<digit>"), class("digit"));
    }

    #[test]
    fn class_union_folds_into_one_checker() {
        let p = parse_ok("<letter | digit>");
        assert_eq!(p, class("letter").alternate(class("digit")));
        assert_eq!(p.to_string(), "<letter|digit>");
    }

    // --- Operators ---

    #[test]
    fn prefix_operators() {
        let x = || Pattern::literal("x");
        assert_eq!(parse_ok(r#"!"x""#), x().negate());
        assert_eq!(parse_ok(r#"~"x""#), x().optional());
        assert_eq!(parse_ok(r#"*<digit>"#), class("digit").span());
        assert_eq!(parse_ok(r#"3<digit>"#), class("digit").repeat(3));
        assert_eq!(parse_ok(r#"!~*"x""#), x().span().optional().negate());
    }

    #[test]
    fn capture_prefix() {
        assert_eq!(
            parse_ok("num: *<digit>"),
            class("digit").span().capture("num")
        );
    }

    #[test]
    fn alternation_binds_loosest() {
        let p = parse_ok(r#""a" <digit> | "b""#);
        assert_eq!(
            p,
            Pattern::literal("a")
                .concatenate(class("digit"))
                .alternate("b")
        );
    }

    #[test]
    fn grouping() {
        let p = parse_ok(r#"*("a" | "b")"#);
        assert_eq!(p, Pattern::literal("a").alternate("b").span());
    }

    // --- Ranges ---

    #[test]
    fn plain_range() {
        assert_eq!(parse_ok(r#"["/*", "*/"]"#), Pattern::range("/*", "*/"));
    }

    #[test]
    fn escaped_range() {
        assert_eq!(
            parse_ok(r#"["\"", "\"", "\\"]"#),
            Pattern::escaped_range('"', '"', '\\')
        );
    }

    #[test]
    fn nested_range() {
        assert_eq!(parse_ok(r#"{"(", ")"}"#), Pattern::nested_range('(', ')'));
    }

    // --- Rendering round trip ---

    #[test]
    fn display_parses_back() {
        for src in [
            r#""abc""#,
            "'abc'",
            r#"!"x" <digit>"#,
            r#"("a" | "b") "c""#,
            r#""a" | "b" | "c""#,
            r#"3(2<digit>)"#,
            r#"word: *<letter|digit>"#,
            r#"["\"", "\"", "\\"] ~{"(", ")"}"#,
        ] {
            let p = parse_ok(src);
            assert_eq!(parse_ok(&p.to_string()), p, "round trip of {src}");
        }
    }

    // --- Errors ---

    #[test]
    fn empty_pattern_is_error() {
        assert_eq!(parse_err(""), ParseError::UnexpectedEnd);
    }

    #[test]
    fn unclosed_string() {
        assert_eq!(parse_err(r#""abc"#), ParseError::UnclosedString);
    }

    #[test]
    fn unclosed_group() {
        assert_eq!(parse_err(r#"("a""#), ParseError::UnclosedGroup);
    }

    #[test]
    fn unclosed_class() {
        assert_eq!(parse_err("<digit"), ParseError::UnclosedClass);
    }

    #[test]
    fn unknown_class() {
        assert_eq!(
            parse_err("<vowel>"),
            ParseError::UnknownClass("vowel".to_string())
        );
    }

    #[test]
    fn range_needs_two_parts() {
        assert_eq!(parse_err(r#"["a"]"#), ParseError::UnclosedRange);
        assert_eq!(parse_err(r#"{"a", "b""#), ParseError::UnclosedRange);
    }

    #[test]
    fn capture_needs_colon() {
        assert_eq!(parse_err(r#"name "x""#), ParseError::UnexpectedChar('"'));
    }

    #[test]
    fn trailing_garbage() {
        assert_eq!(parse_err(r#""a")"#), ParseError::UnexpectedChar(')'));
    }

    #[test]
    fn repeat_count_overflow() {
        assert_eq!(
            parse_err(r#"99999999999999999999999"x""#),
            ParseError::InvalidNumber
        );
    }

    #[test]
    fn largest_repeat_count_parses() {
        let p = parse_ok(&format!(r#"{}"a""#, usize::MAX));
        assert!(matches!(p, Pattern::Repeater { count, .. } if count == usize::MAX));
        assert!(p.consume_str("aaa").is_failure());
        assert!(parse(r#"1000000000000"ab""#).is_ok());
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            ParseError::UnclosedString.to_string(),
            "Unclosed string literal in pattern"
        );
        assert!(
            ParseError::UnknownClass("vowel".into())
                .to_string()
                .contains("digit")
        );
    }
}
