//! Composable backtracking text patterns.
//!
//! A [`Pattern`] is an immutable tree of nodes. Matching walks the tree
//! against a [`Source`] cursor in one of two modes: *consume* accepts text the
//! pattern describes, *neglect* accepts text it does not. [`Pattern::negate`]
//! swaps the two, so "anything but a comma" is just `!","`.
//!
//! # Example
//!
//! ```rust
//! use skein::{Pattern, parse};
//!
//! // Built with combinators...
//! let greeting = (Pattern::literal("Hi") | "Bye") & "! ";
//! let twice = greeting.repeat(2);
//! assert_eq!(twice.consume_str("Hi! Bye! ").length(), 9);
//!
//! // ...or from notation.
//! let pair = parse(r#"key: *<letter> "=" value: *<digit>"#).unwrap();
//! let result = pair.consume_str("width=80");
//! assert_eq!(result.capture("key").unwrap().text, "width");
//! assert_eq!(result.capture("value").unwrap().text, "80");
//! ```

mod error;
mod match_result;
pub mod pattern;
pub mod report;
mod source;

pub use error::MatchError;
pub use match_result::{Capture, MatchResult};
pub use pattern::{
    Checker, Comparison, Hit, Literal, ParseError, Pattern, Predicate, find_all, find_backward,
    find_forward, match_at, parse,
};
pub use report::Report;
pub use source::Source;
