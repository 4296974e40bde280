//! Grammar context classifier.
//!
//! Decides, from a short prefix of screened tokens, whether candidate text is
//! a function-literal expression or a property/method shorthand. The same
//! leading shapes (`(`, a bare name, `*`, `[`) are ambiguous between a
//! parenthesized-parameter function literal and a method name; a fixed
//! two-to-three token decision table resolves them without backtracking.

use std::fmt;

use maxarity_scanner::{ScanError, ScannerState, SyntaxKind};

/// How the candidate text must be parsed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CallableContext {
    /// A function literal; parse the text standalone.
    Expression,
    /// A method shorthand; parse only wrapped in a synthetic object literal.
    Method,
}

/// The leading token shape is incompatible with any bare callable definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    Scan(ScanError),
    UnexpectedToken { kind: SyntaxKind, pos: usize },
}

impl From<ScanError> for ClassifyError {
    fn from(err: ScanError) -> ClassifyError {
        ClassifyError::Scan(err)
    }
}

impl fmt::Display for ClassifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifyError::Scan(err) => write!(f, "{err}"),
            ClassifyError::UnexpectedToken { kind, pos } => {
                write!(f, "unexpected token `{}` at {pos}", kind.label())
            }
        }
    }
}

impl std::error::Error for ClassifyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClassifyError::Scan(err) => Some(err),
            ClassifyError::UnexpectedToken { .. } => None,
        }
    }
}

/// A "name" for classification purposes: a plain identifier or a contextual
/// keyword. Reserved words are not method-name material here, matching the
/// tokenizer-level view of the grammar.
fn is_name(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::Identifier || kind.is_contextual_keyword()
}

/// Classify callable source text by its leading tokens.
///
/// The scanner should be a screened one (see [`ScannerState::screened`]) so
/// that statement-shaped text (loops, assignments, increments) aborts the
/// classification instead of being misread as a method name.
pub fn guess_callable_context(
    scanner: &mut ScannerState<'_>,
) -> Result<CallableContext, ClassifyError> {
    // Comments are not tokens, so they need no special handling here.
    let first = scanner.scan()?;
    if first == SyntaxKind::AsyncKeyword {
        // `async() {}`, `async name() {}`, `async function () {}`, ...
        return classify_after_async(scanner);
    }
    match first {
        // e.g. `() => {}`, `function () {}`
        SyntaxKind::OpenParenToken | SyntaxKind::FunctionKeyword => Ok(CallableContext::Expression),
        // e.g. `[name]() {}`, `*name() {}`, `name() {}`
        SyntaxKind::OpenBracketToken | SyntaxKind::AsteriskToken => Ok(CallableContext::Method),
        k if is_name(k) => Ok(CallableContext::Method),
        kind => Err(ClassifyError::UnexpectedToken {
            kind,
            pos: scanner.token_start(),
        }),
    }
}

fn classify_after_async(scanner: &mut ScannerState<'_>) -> Result<CallableContext, ClassifyError> {
    let second = scanner.scan()?;
    match second {
        // e.g. `async [name]() {}`
        SyntaxKind::OpenBracketToken
        // e.g. `async *name() {}`
        | SyntaxKind::AsteriskToken
        // e.g. `async() {}`
        | SyntaxKind::OpenParenToken => Ok(CallableContext::Method),
        // Technically this could also be a method named `function`, but it
        // parses as a valid expression either way, so treat it as one.
        SyntaxKind::FunctionKeyword => Ok(CallableContext::Expression),
        // We have scanned `async <name>` where <name> is not `function`; an
        // open paren must follow for this to be a method definition.
        k if is_name(k) => {
            if scanner.scan()? == SyntaxKind::OpenParenToken {
                Ok(CallableContext::Method)
            } else {
                Err(ClassifyError::UnexpectedToken {
                    kind: scanner.token(),
                    pos: scanner.token_start(),
                })
            }
        }
        kind => Err(ClassifyError::UnexpectedToken {
            kind,
            pos: scanner.token_start(),
        }),
    }
}
