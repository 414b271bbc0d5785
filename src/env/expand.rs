//! Shell-style variable expansion

use regex::{Captures, Regex};
use std::sync::LazyLock;

// Alternatives in priority order: `${name}`, a malformed `${` or `${}`, a
// one-character special name (`$1`, `$$`, `$-`), a run of name characters.
static REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:\{([^}]+)\}|\{\}?|([*#$@!?0-9-])|([A-Za-z_][A-Za-z0-9_]*))")
        .expect("reference pattern is valid")
});

/// Replace `${name}` and `$name` references in `template` using `mapping`.
///
/// Follows shell conventions:
///
/// - `${...}` passes everything up to the closing brace as the name
/// - a bare name runs over ASCII letters, digits and underscores
/// - a digit or one of `*#$@!?-` after `$` is a one-character name, so `$1x`
///   looks up `1` and keeps `x`
/// - malformed braces (`${}`, an unterminated `${`) are dropped
/// - any other `$`, including one at the end of input, is copied unchanged
///
/// # Example
/// ```
/// let home = |name: &str| if name == "HOME" { "/home/app".to_string() } else { String::new() };
/// assert_eq!(envfill::env::expand("${HOME}/.cache", &home), "/home/app/.cache");
/// assert_eq!(envfill::env::expand("$HOME and $MISSING", &home), "/home/app and ");
/// ```
pub fn expand(template: &str, mapping: &dyn Fn(&str) -> String) -> String {
    if !template.contains('$') {
        return template.to_string();
    }
    REFERENCE
        .replace_all(template, |caps: &Captures<'_>| {
            match caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)) {
                Some(name) => mapping(name.as_str()),
                None => String::new(),
            }
        })
        .into_owned()
}
