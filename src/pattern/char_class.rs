//! Named character classes usable as [`Checker`](super::Checker) nodes.
//!
//! Unicode category tables are left to the standard library's `char`
//! predicates; this module only names them.

use std::sync::Arc;

use phf::{Map, phf_map};

use super::{Checker, Pattern};

type ClassFn = fn(char) -> bool;

const CLASS_MAP: Map<&'static str, ClassFn> = phf_map! {
    "any" => is_any as ClassFn,
    "letter" => char::is_alphabetic as ClassFn,
    "upper" => char::is_uppercase as ClassFn,
    "lower" => char::is_lowercase as ClassFn,
    "digit" => is_digit as ClassFn,
    "alnum" => char::is_alphanumeric as ClassFn,
    "whitespace" => char::is_whitespace as ClassFn,
    "punct" => is_punct as ClassFn,
    "symbol" => is_symbol as ClassFn,
    "control" => char::is_control as ClassFn,
    "hex" => is_hex as ClassFn,
};

fn is_any(_: char) -> bool {
    true
}

fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

fn is_hex(ch: char) -> bool {
    ch.is_ascii_hexdigit()
}

fn is_punct(ch: char) -> bool {
    "!\"#%&'()*,-./:;?@[\\]_{}".contains(ch)
}

fn is_symbol(ch: char) -> bool {
    "$+<=>^`|~".contains(ch)
}

/// Test whether `ch` belongs to the class called `name`.
///
/// Returns `None` for an unknown class name.
pub fn class_matches(name: &str, ch: char) -> Option<bool> {
    CLASS_MAP.get(name).map(|f| f(ch))
}

/// A checker pattern for the class called `name`.
pub fn checker(name: &str) -> Option<Pattern> {
    let f = *CLASS_MAP.get(name)?;
    Some(Pattern::Checker(Checker::new(
        Some(name.to_string()),
        Arc::new(f),
    )))
}

/// All class names, sorted.
pub fn names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = CLASS_MAP.keys().copied().collect();
    names.sort_unstable();
    names
}
