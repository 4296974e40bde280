//! Grammar context classifier decision table tests.

use maxarity_parser::{CallableContext, ClassifyError, guess_callable_context};
use maxarity_scanner::{ScanError, ScannerState};

fn classify(source: &str) -> Result<CallableContext, ClassifyError> {
    let mut scanner = ScannerState::screened(source);
    guess_callable_context(&mut scanner)
}

#[test]
fn function_literals_are_expressions() {
    assert_eq!(classify("() => {}").unwrap(), CallableContext::Expression);
    assert_eq!(
        classify("(a, b) => a + b").unwrap(),
        CallableContext::Expression
    );
    assert_eq!(
        classify("function () {}").unwrap(),
        CallableContext::Expression
    );
    assert_eq!(
        classify("function t(a) {}").unwrap(),
        CallableContext::Expression
    );
    assert_eq!(
        classify("async function () {}").unwrap(),
        CallableContext::Expression
    );
    // Could be a method named `function`, but it parses as an expression
    // either way.
    assert_eq!(
        classify("async function t() {}").unwrap(),
        CallableContext::Expression
    );
}

#[test]
fn shorthand_definitions_are_methods() {
    assert_eq!(classify("t() {}").unwrap(), CallableContext::Method);
    assert_eq!(classify("t(a, b) {}").unwrap(), CallableContext::Method);
    assert_eq!(classify("*t() {}").unwrap(), CallableContext::Method);
    assert_eq!(classify("[name]() {}").unwrap(), CallableContext::Method);
    assert_eq!(classify("get() {}").unwrap(), CallableContext::Method);
    assert_eq!(classify("get x() {}").unwrap(), CallableContext::Method);
}

#[test]
fn async_prefix_disambiguation() {
    // `async` as the method name.
    assert_eq!(classify("async() {}").unwrap(), CallableContext::Method);
    // `async` tagging a method name.
    assert_eq!(classify("async t() {}").unwrap(), CallableContext::Method);
    assert_eq!(classify("async async() {}").unwrap(), CallableContext::Method);
    assert_eq!(classify("async *t() {}").unwrap(), CallableContext::Method);
    assert_eq!(classify("async [x]() {}").unwrap(), CallableContext::Method);
}

#[test]
fn unrecognized_shapes_are_rejected() {
    assert!(matches!(
        classify("123"),
        Err(ClassifyError::UnexpectedToken { .. })
    ));
    assert!(matches!(
        classify("if (x) {}"),
        Err(ClassifyError::UnexpectedToken { .. })
    ));
    assert!(matches!(
        classify(""),
        Err(ClassifyError::UnexpectedToken { .. })
    ));
    // `async name` must be followed by `(`.
    assert!(matches!(
        classify("async t = 1"),
        Err(ClassifyError::Scan(ScanError::ForbiddenToken { .. }))
    ));
    assert!(matches!(
        classify("async t u"),
        Err(ClassifyError::UnexpectedToken { .. })
    ));
}

#[test]
fn statement_prefixes_abort_via_the_screened_scanner() {
    for source in ["do {} while (0)", "for (;;) {}", "while (1) {}", "++x", "--x"] {
        assert!(
            matches!(
                classify(source),
                Err(ClassifyError::Scan(ScanError::ForbiddenToken { .. }))
            ),
            "expected screened rejection for {source:?}"
        );
    }
    assert!(matches!(
        classify("async += 1"),
        Err(ClassifyError::Scan(ScanError::ForbiddenToken { .. }))
    ));
}
