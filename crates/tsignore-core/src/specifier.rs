//! Helpers for module specifier literals as they appear in source text.
//!
//! Specifiers are handled in their quoted form (`'foo'`, `"foo"`); the bare
//! module name is only produced when results are reported.

/// The comment line inserted above every suppressed import.
pub const SUPPRESSION_MARKER: &str = "// @ts-ignore";

/// Strips one pair of matching surrounding quotes, if present.
#[must_use]
pub fn strip_quotes(literal: &str) -> &str {
    let bytes = literal.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && matches!(first, b'\'' | b'"' | b'`') {
            return &literal[1..literal.len() - 1];
        }
    }
    literal
}

/// Relative specifiers point into the same project and are never suppressed.
#[must_use]
pub fn is_relative(literal: &str) -> bool {
    strip_quotes(literal).starts_with('.')
}

/// True when the specifier equals an allowed module or is a sub-path of one.
///
/// The sub-path boundary is `/`: `foo` allows `foo` and `foo/bar`, not `foobar`.
#[must_use]
pub fn is_allowed(literal: &str, allowed: &[String]) -> bool {
    let name = strip_quotes(literal);
    allowed.iter().any(|prefix| {
        name.strip_prefix(prefix.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}
