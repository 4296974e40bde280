//! Scanner-clone lookahead utilities.

use maxarity_scanner::{ScannerState, SyntaxKind};

/// Kind of the token after the current one. Scan errors surface later in the
/// real parse; lookahead treats them as `Unknown`.
pub(crate) fn look_ahead_kind(scanner: &ScannerState<'_>) -> SyntaxKind {
    let mut probe = scanner.clone();
    probe.scan().unwrap_or(SyntaxKind::Unknown)
}

pub(crate) fn look_ahead_is(scanner: &ScannerState<'_>, kind: SyntaxKind) -> bool {
    look_ahead_kind(scanner) == kind
}

/// Scan a balanced paren group (the opening `(` already consumed) and report
/// whether `=>` follows it.
fn paren_group_then_arrow(probe: &mut ScannerState<'_>) -> bool {
    let mut depth = 1usize;
    loop {
        match probe.scan() {
            Ok(SyntaxKind::OpenParenToken) => depth += 1,
            Ok(SyntaxKind::CloseParenToken) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(SyntaxKind::EndOfFileToken) | Err(_) => return false,
            Ok(_) => {}
        }
    }
    matches!(probe.scan(), Ok(SyntaxKind::EqualsGreaterThanToken))
}

/// With `(` as the current token, check for an arrow parameter list.
pub(crate) fn look_ahead_is_paren_arrow(scanner: &ScannerState<'_>) -> bool {
    let mut probe = scanner.clone();
    paren_group_then_arrow(&mut probe)
}

/// With `async` as the current token, check for an async arrow head
/// (`async (params) =>` or `async ident =>`, no line break after `async`).
pub(crate) fn look_ahead_is_async_arrow(scanner: &ScannerState<'_>) -> bool {
    let mut probe = scanner.clone();
    let Ok(kind) = probe.scan() else {
        return false;
    };
    if probe.has_preceding_line_break() {
        return false;
    }
    match kind {
        SyntaxKind::OpenParenToken => paren_group_then_arrow(&mut probe),
        SyntaxKind::Identifier => {
            matches!(probe.scan(), Ok(SyntaxKind::EqualsGreaterThanToken))
        }
        k if k.is_contextual_keyword() => {
            matches!(probe.scan(), Ok(SyntaxKind::EqualsGreaterThanToken))
        }
        _ => false,
    }
}
