//! Builder façade: constructors and combinator operators for [`Pattern`].
//!
//! Alternating two checkers yields one checker accepting either; in both
//! modes it accepts the same text as the [`Pattern::Alternator`] it replaces.
//!
//! Literals are never folded. A joined or repeated literal neglects a whole
//! text width at once, while the [`Pattern::Concatenator`] or
//! [`Pattern::Repeater`] it would replace neglects a single character.

use std::ops::{BitAnd, BitOr, Not};
use std::sync::Arc;

use super::{Checker, Comparison, Literal, Pattern};

impl Pattern {
    /// Case-sensitive literal.
    pub fn literal(text: &str) -> Self {
        Pattern::Literal(Literal::new(text, Comparison::CaseSensitive))
    }

    /// Literal compared without regard to case.
    pub fn literal_ignore_case(text: &str) -> Self {
        Pattern::Literal(Literal::new(text, Comparison::CaseInsensitive))
    }

    /// A named single-character test. The name appears in diagnostics.
    pub fn checker<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(char) -> bool + Send + Sync + 'static,
    {
        Pattern::Checker(Checker::new(Some(name.into()), Arc::new(predicate)))
    }

    /// An anonymous single-character test.
    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(char) -> bool + Send + Sync + 'static,
    {
        Pattern::Checker(Checker::new(None, Arc::new(predicate)))
    }

    /// `self` followed directly by `right`.
    pub fn concatenate(self, right: impl Into<Pattern>) -> Self {
        Pattern::Concatenator {
            left: Box::new(self),
            right: Box::new(right.into()),
        }
    }

    /// Ordered choice: `self` if it matches, otherwise `right`.
    pub fn alternate(self, right: impl Into<Pattern>) -> Self {
        match (self, right.into()) {
            (Pattern::Checker(left), Pattern::Checker(right)) => {
                let name = match (&left.name, &right.name) {
                    (Some(a), Some(b)) => Some(format!("{a}|{b}")),
                    _ => None,
                };
                let (l, r) = (left.predicate, right.predicate);
                Pattern::Checker(Checker::new(name, Arc::new(move |ch: char| l(ch) || r(ch))))
            }
            (left, right) => Pattern::Alternator {
                left: Box::new(left),
                right: Box::new(right),
            },
        }
    }

    /// Swap consume and neglect.
    pub fn negate(self) -> Self {
        Pattern::Negator(Box::new(self))
    }

    /// Zero or one occurrence.
    pub fn optional(self) -> Self {
        Pattern::Optor(Box::new(self))
    }

    /// Zero or more occurrences, greedily.
    pub fn span(self) -> Self {
        Pattern::Spanner(Box::new(self))
    }

    /// Exactly `count` occurrences.
    pub fn repeat(self, count: usize) -> Self {
        Pattern::Repeater {
            inner: Box::new(self),
            count,
        }
    }

    /// Record the text matched by `self` under `name`.
    pub fn capture(self, name: impl Into<String>) -> Self {
        Pattern::Capturer {
            inner: Box::new(self),
            name: name.into(),
        }
    }

    /// `from`, then everything through the first `to`.
    pub fn range(from: impl Into<Pattern>, to: impl Into<Pattern>) -> Self {
        Pattern::Ranger {
            from: Box::new(from.into()),
            to: Box::new(to.into()),
        }
    }

    /// A range in which `escape` protects the following character from
    /// closing it.
    pub fn escaped_range(
        from: impl Into<Pattern>,
        to: impl Into<Pattern>,
        escape: impl Into<Pattern>,
    ) -> Self {
        Pattern::EscapedRanger {
            from: Box::new(from.into()),
            to: Box::new(to.into()),
            escape: Box::new(escape.into()),
        }
    }

    /// A range that balances nested `from`/`to` pairs.
    pub fn nested_range(from: impl Into<Pattern>, to: impl Into<Pattern>) -> Self {
        Pattern::NestedRanger {
            from: Box::new(from.into()),
            to: Box::new(to.into()),
        }
    }
}

impl From<&str> for Pattern {
    fn from(text: &str) -> Self {
        Pattern::literal(text)
    }
}

impl From<String> for Pattern {
    fn from(text: String) -> Self {
        Pattern::literal(&text)
    }
}

impl From<char> for Pattern {
    fn from(ch: char) -> Self {
        Pattern::Literal(Literal {
            text: vec![ch],
            comparison: Comparison::CaseSensitive,
        })
    }
}

impl<R: Into<Pattern>> BitOr<R> for Pattern {
    type Output = Pattern;

    fn bitor(self, right: R) -> Pattern {
        self.alternate(right)
    }
}

impl<R: Into<Pattern>> BitAnd<R> for Pattern {
    type Output = Pattern;

    fn bitand(self, right: R) -> Pattern {
        self.concatenate(right)
    }
}

impl Not for Pattern {
    type Output = Pattern;

    fn not(self) -> Pattern {
        self.negate()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::match_result::MatchResult;
    use crate::source::Source;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn consume_and_neglect(p: &Pattern, input: &str) -> [(MatchResult, usize); 2] {
        let input = chars(input);
        let mut consumed = Source::new(&input);
        let consume = p.consume(&mut consumed);
        let mut neglected = Source::new(&input);
        let neglect = p.neglect(&mut neglected);
        [(consume, consumed.position()), (neglect, neglected.position())]
    }

    #[test]
    fn adjacent_literals_stay_separate() {
        let p = Pattern::literal("ab").concatenate("cd");
        assert_eq!(
            p,
            Pattern::Concatenator {
                left: Box::new(Pattern::literal("ab")),
                right: Box::new(Pattern::literal("cd")),
            }
        );
        assert_eq!(p.to_string(), r#""ab" "cd""#);
    }

    #[test]
    fn repeated_literal_builds_repeater() {
        let p = Pattern::literal("ab").repeat(3);
        assert!(matches!(p, Pattern::Repeater { count: 3, .. }));
        assert_eq!(p.to_string(), r#"3"ab""#);
    }

    #[rstest]
    #[case::short("x")]
    #[case::unequal("xy")]
    #[case::equal("ab")]
    #[case::empty("")]
    fn built_sequence_matches_like_its_nodes(#[case] input: &str) {
        let built = Pattern::literal("a").concatenate("b");
        let by_hand = Pattern::Concatenator {
            left: Box::new(Pattern::literal("a")),
            right: Box::new(Pattern::literal("b")),
        };
        assert_eq!(consume_and_neglect(&built, input), consume_and_neglect(&by_hand, input));
        let (negated, by_hand) = (built.negate(), by_hand.negate());
        assert_eq!(consume_and_neglect(&negated, input), consume_and_neglect(&by_hand, input));
    }

    #[rstest]
    #[case::short("x")]
    #[case::unequal("ab")]
    #[case::equal("aa")]
    fn built_repeat_matches_like_its_nodes(#[case] input: &str) {
        let built = Pattern::literal("a").repeat(2).negate();
        let by_hand = Pattern::Negator(Box::new(Pattern::Repeater {
            inner: Box::new(Pattern::literal("a")),
            count: 2,
        }));
        assert_eq!(consume_and_neglect(&built, input), consume_and_neglect(&by_hand, input));
    }

    #[test]
    fn negated_repeat_takes_one_character() {
        let p = Pattern::literal("a").repeat(2).negate();
        let [(consume, pos), _] = consume_and_neglect(&p, "ab");
        assert_eq!(consume.length(), 1);
        assert_eq!(pos, 1);
    }

    #[test]
    fn huge_repeat_count_allocates_nothing() {
        let p = Pattern::literal("ab").repeat(usize::MAX);
        assert!(matches!(p, Pattern::Repeater { count: usize::MAX, .. }));
        assert!(p.consume_str("ababab").is_failure());
    }

    #[test]
    fn repeated_checker_builds_repeater() {
        let p = Pattern::checker("x", |c| c == 'x').repeat(2);
        assert!(matches!(p, Pattern::Repeater { count: 2, .. }));
    }

    #[test]
    fn alternated_checkers_fold_into_one() {
        let p = Pattern::checker("digit", |c| c.is_ascii_digit())
            .alternate(Pattern::checker("dot", |c| c == '.'));
        let Pattern::Checker(checker) = &p else {
            panic!("expected a checker, got {p:?}");
        };
        assert_eq!(checker.name(), Some("digit|dot"));
        assert!(checker.check('7'));
        assert!(checker.check('.'));
        assert!(!checker.check('x'));
    }

    #[test]
    fn operators_build_combinators() {
        let p = (Pattern::literal("Hi") | "Bye") & "!";
        assert_eq!(
            p,
            Pattern::literal("Hi").alternate("Bye").concatenate("!")
        );
        assert_eq!(!Pattern::literal("x"), Pattern::literal("x").negate());
    }
}
