//! End-to-end verdict tests over the supported callable forms.

use maxarity::{
    Arity, ArityError, CallableDescriptor, EcmaVersion, GuessOptions, HostCapabilities,
    guess_function_max_arity, guess_max_arity,
};

fn default_options() -> GuessOptions {
    GuessOptions::default()
}

/// Host profile that disables the textual fast path, forcing classification,
/// parse, and scope analysis.
fn full_analysis_options() -> GuessOptions {
    GuessOptions {
        host: HostCapabilities {
            can_read_function_source: true,
            can_infer_function_spread: false,
        },
        ..GuessOptions::default()
    }
}

/// Check the verdict under the default host and again with the fast path
/// disabled; both pipelines must agree.
fn check(source: &str, declared: u32, expected: Arity) {
    let callable = CallableDescriptor::new(declared, source);
    assert_eq!(
        guess_max_arity(&callable, &default_options()).unwrap(),
        expected,
        "default host: {source}"
    );
    assert_eq!(
        guess_max_arity(&callable, &full_analysis_options()).unwrap(),
        expected,
        "full analysis: {source}"
    );
}

#[test]
fn detects_basic_function_parameters() {
    check("() => {}", 0, Arity::Finite(0));
    check("function () {}", 0, Arity::Finite(0));
    check("function t() {}", 0, Arity::Finite(0));
    check("async function () {}", 0, Arity::Finite(0));
    check("async function t() {}", 0, Arity::Finite(0));

    check("(a) => {}", 1, Arity::Finite(1));
    check("function (a) {}", 1, Arity::Finite(1));
    check("function t(a) {}", 1, Arity::Finite(1));
    check("async function (a) {}", 1, Arity::Finite(1));
    check("async function async(a) {}", 1, Arity::Finite(1));

    check("(a, b) => {}", 2, Arity::Finite(2));
    check("function (a, b) {}", 2, Arity::Finite(2));
    check("function t(a, b) {}", 2, Arity::Finite(2));
    check("async function t(a, b) {}", 2, Arity::Finite(2));

    check("function (a, b, c) {}", 3, Arity::Finite(3));
}

#[test]
fn understands_method_syntax() {
    check("t() {}", 0, Arity::Finite(0));
    check("async t() {}", 0, Arity::Finite(0));
    check("async async() {}", 0, Arity::Finite(0));

    check("t(a) {}", 1, Arity::Finite(1));
    check("async t(a) {}", 1, Arity::Finite(1));
    check("async async(a) {}", 1, Arity::Finite(1));
}

#[test]
fn understands_many_method_spellings() {
    // Methods named `function`, `async`, and computed names, in plain,
    // generator, async, and async-generator variants.
    check("function() { return '...'; }", 0, Arity::Finite(0));
    check("*function() { yield '...'; }", 0, Arity::Finite(0));
    check("async() { return '...'; }", 0, Arity::Finite(0));
    check("*async() { yield '...'; }", 0, Arity::Finite(0));
    check("[name]() { return '...'; }", 0, Arity::Finite(0));
    check("*[name]() { yield '...'; }", 0, Arity::Finite(0));
    check("async function() { return '...'; }", 0, Arity::Finite(0));
    check("async *function() { yield '...'; }", 0, Arity::Finite(0));
    check("async async() { return '...'; }", 0, Arity::Finite(0));
    check("async *async() { yield '...'; }", 0, Arity::Finite(0));
    check("async [name]() { return '...'; }", 0, Arity::Finite(0));
    check("async *[name]() { yield '...'; }", 0, Arity::Finite(0));
}

#[test]
fn substring_occurrences_do_not_fool_full_analysis() {
    // `...` and `arguments` inside string literals or comments defeat the
    // textual fast path but must not change the verdict.
    check("() => { return '...'; }", 0, Arity::Finite(0));
    check("() => { return 'arguments'; }", 0, Arity::Finite(0));
    check("a() { return '...'; }", 0, Arity::Finite(0));
    check("a() { return 'arguments'; }", 0, Arity::Finite(0));
    check("function () { /* arguments */ }", 0, Arity::Finite(0));
    check("function (a) { // arguments\n return a; }", 1, Arity::Finite(1));
}

#[test]
fn arguments_reference_is_unbounded() {
    check("function () { return arguments; }", 0, Arity::Unbounded);
    check("function (a, b, c) { return arguments; }", 3, Arity::Unbounded);
    check("a() { return arguments; }", 0, Arity::Unbounded);
    check("a(a, b, c) { return arguments; }", 3, Arity::Unbounded);
    check("function () { return arguments[0]; }", 0, Arity::Unbounded);
    // A shorthand property reads the binding too.
    check("function () { return { arguments }; }", 0, Arity::Unbounded);
}

#[test]
fn referenced_rest_parameter_is_unbounded() {
    check("(...args) => args", 0, Arity::Unbounded);
    check("(a, b, c, ...args) => args", 3, Arity::Unbounded);
    check("a(...args) { return args; }", 0, Arity::Unbounded);
    check("a(a, b, c, ...args) { return args; }", 3, Arity::Unbounded);
    check("function (...args) { return args.length; }", 0, Arity::Unbounded);
    // Referenced anywhere counts, including inside a nested closure.
    check(
        "function (...args) { return () => args; }",
        0,
        Arity::Unbounded,
    );
}

#[test]
fn unreferenced_rest_parameter_keeps_declared_count() {
    check("function (a, b, c, ...rest) {}", 3, Arity::Finite(3));
    check("(...args) => {}", 0, Arity::Finite(0));
    check("(a, ...rest) => a", 1, Arity::Finite(1));
}

#[test]
fn redefinition_shadows_the_implicit_binding() {
    // Parameter, destructured parameter field, and locals all hide the
    // implicit binding; uses resolve to the explicit one.
    check(
        "function (arguments) { return arguments; }",
        1,
        Arity::Finite(1),
    );
    check(
        "function ({ arguments }) { return arguments; }",
        1,
        Arity::Finite(1),
    );
    check(
        "function (a, { b: arguments }) { return arguments; }",
        2,
        Arity::Finite(2),
    );
    check(
        "function () { var arguments; return arguments; }",
        0,
        Arity::Finite(0),
    );
    check(
        "function () { return arguments; var arguments; }",
        0,
        Arity::Finite(0),
    );
    check(
        "function () { let arguments = 1; return arguments; }",
        0,
        Arity::Finite(0),
    );
}

#[test]
fn interior_arguments_belongs_to_the_inner_function() {
    check(
        "function (unused) { (function () { return arguments; })(); }",
        1,
        Arity::Finite(1),
    );
    check(
        "function () { var f = function () { return arguments[0]; }; return f; }",
        0,
        Arity::Finite(0),
    );
    // Methods nested in the body host their own implicit binding.
    check(
        "function (a) { return { m() { return arguments; } }; }",
        1,
        Arity::Finite(1),
    );
}

#[test]
fn arrow_escapes_escalate_to_the_enclosing_function() {
    // The lightweight literal cannot host the binding itself; the reference
    // inside it reads the enclosing function's arguments.
    check(
        "function () { return () => arguments; }",
        0,
        Arity::Unbounded,
    );
    check(
        "function (a) { return () => () => arguments[0]; }",
        1,
        Arity::Unbounded,
    );
    // But the arrow analyzed on its own is bounded by its parameters.
    check("() => {}", 0, Arity::Finite(0));
    check("(a) => a", 1, Arity::Finite(1));
}

#[test]
fn bodies_with_richer_statements_analyze_correctly() {
    check(
        "function (n) { for (let i = 0; i < n; i++) { n += i; } return n; }",
        1,
        Arity::Finite(1),
    );
    check(
        "function (xs) { for (const x of xs) { if (x) { return x; } } return null; }",
        1,
        Arity::Finite(1),
    );
    check(
        "function (a) { try { throw a; } catch (e) { return e; } finally { a = 0; } }",
        1,
        Arity::Finite(1),
    );
    check(
        "function (s) { switch (s) { case 1: return arguments; default: return 0; } }",
        1,
        Arity::Unbounded,
    );
    check(
        "function (t) { return `got ${arguments.length} args`; }",
        1,
        Arity::Unbounded,
    );
    check(
        "function (a = arguments) { return a; }",
        0,
        Arity::Unbounded,
    );
}

#[test]
fn opaque_sources_are_unbounded() {
    let native = CallableDescriptor::new(2, "function () { [native code] }");
    assert_eq!(
        guess_max_arity(&native, &default_options()).unwrap(),
        Arity::Unbounded
    );

    let unavailable = CallableDescriptor::opaque(3);
    assert_eq!(
        guess_max_arity(&unavailable, &default_options()).unwrap(),
        Arity::Unbounded
    );

    let blind_host = GuessOptions {
        host: HostCapabilities {
            can_read_function_source: false,
            can_infer_function_spread: true,
        },
        ..GuessOptions::default()
    };
    let plain = CallableDescriptor::new(1, "function (a) {}");
    assert_eq!(
        guess_max_arity(&plain, &blind_host).unwrap(),
        Arity::Unbounded
    );
}

#[test]
fn fast_path_trusts_the_reported_count() {
    // Without spread or `arguments` in the text, the declared count is
    // returned without parsing - even when it disagrees with the source.
    let skewed = CallableDescriptor::new(5, "function (a) {}");
    assert_eq!(
        guess_max_arity(&skewed, &default_options()).unwrap(),
        Arity::Finite(5)
    );
    // The full pipeline treats the same disagreement as fatal.
    assert!(matches!(
        guess_max_arity(&skewed, &full_analysis_options()),
        Err(ArityError::InconsistentParameterCount {
            parsed: 1,
            reported: 5
        })
    ));
}

#[test]
fn statement_shaped_text_is_rejected() {
    for source in ["do {} while (0)", "++x", "async += 1"] {
        let callable = CallableDescriptor::new(0, source);
        assert!(
            matches!(
                guess_max_arity(&callable, &full_analysis_options()),
                Err(ArityError::Classify(_))
            ),
            "expected classification failure for {source:?}"
        );
    }
    let number = CallableDescriptor::new(0, "123");
    assert!(matches!(
        guess_max_arity(&number, &full_analysis_options()),
        Err(ArityError::Classify(_))
    ));
}

#[test]
fn malformed_text_is_a_fatal_parse_error() {
    let truncated = CallableDescriptor::new(0, "function (");
    assert!(matches!(
        guess_max_arity(&truncated, &full_analysis_options()),
        Err(ArityError::Parse(_))
    ));

    // A bare identifier arrow classifies as a method name and then fails to
    // parse inside the synthetic wrapper.
    let bare_arrow = CallableDescriptor::new(1, "x => x");
    assert!(matches!(
        guess_max_arity(&bare_arrow, &full_analysis_options()),
        Err(ArityError::Parse(_))
    ));
    // The fast path still resolves it from the reported count.
    assert_eq!(
        guess_max_arity(&bare_arrow, &default_options()).unwrap(),
        Arity::Finite(1)
    );
}

#[test]
fn destructured_rest_parameter_is_unsupported() {
    let callable = CallableDescriptor::new(0, "function (...[a, b]) { return a + b; }");
    assert!(matches!(
        guess_max_arity(&callable, &full_analysis_options()),
        Err(ArityError::RestPatternUnsupported { .. })
    ));
}

#[test]
fn grammar_version_gates_logical_assignment() {
    let source = "function () { let a; a ||= arguments; return a; }";
    let callable = CallableDescriptor::new(0, source);

    let es2020 = GuessOptions {
        ecma_version: EcmaVersion::Es2020,
        ..GuessOptions::default()
    };
    assert!(matches!(
        guess_max_arity(&callable, &es2020),
        Err(ArityError::Parse(_))
    ));

    let es2021 = GuessOptions {
        ecma_version: EcmaVersion::Es2021,
        ..GuessOptions::default()
    };
    assert_eq!(
        guess_max_arity(&callable, &es2021).unwrap(),
        Arity::Unbounded
    );
}

#[test]
fn alias_export_matches() {
    let callable = CallableDescriptor::new(2, "function (a, b) {}");
    assert_eq!(
        guess_function_max_arity(&callable, &default_options()).unwrap(),
        Arity::Finite(2)
    );
}
