//! Textual probes used before (and instead of) a full parse.

use memchr::memmem;

/// Conservative pre-filter for the fast path: a callable that can observe
/// extra positional arguments must spell `...` or `arguments` somewhere in
/// its text. Hits may be false positives (string literals, comments); those
/// only cost a fall-through to full analysis, never a wrong verdict.
pub(crate) fn maybe_variadic(source: &str) -> bool {
    memmem::find(source.as_bytes(), b"...").is_some()
        || memmem::find(source.as_bytes(), b"arguments").is_some()
}

/// Opaque native-implementation marker: `function () { [native code] }`,
/// with arbitrary whitespace between tokens.
pub(crate) fn is_native_impl(source: &str) -> bool {
    let mut rest = source.trim_start();
    for token in ["function", "(", ")", "{", "[native code]", "}"] {
        rest = match rest.strip_prefix(token) {
            Some(after) => after.trim_start(),
            None => return false,
        };
    }
    rest.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variadic_probe_matches_spread_and_arguments() {
        assert!(maybe_variadic("(...args) => args"));
        assert!(maybe_variadic("function () { return arguments; }"));
        // False positives are acceptable; they only disable the fast path.
        assert!(maybe_variadic("() => '...'"));
        assert!(maybe_variadic("() => 'arguments'"));
        assert!(!maybe_variadic("function (a, b) { return a + b; }"));
    }

    #[test]
    fn native_marker() {
        assert!(is_native_impl("function () { [native code] }"));
        assert!(is_native_impl("function(){[native code]}"));
        assert!(is_native_impl("  function  (  )  {  [native code]  }  "));
        assert!(!is_native_impl("function f() { [native code] }"));
        assert!(!is_native_impl("function () { return 1; }"));
        assert!(!is_native_impl("function () { [nativecode] }"));
    }
}
