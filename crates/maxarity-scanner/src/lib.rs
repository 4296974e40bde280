//! ECMAScript scanner/tokenizer for the maxarity analyzer.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `ScannerState` - Tokenizer state machine
//! - `ScanError` - Lexical failure taxonomy
//!
//! The scanner is a lazy pull tokenizer: each call to [`ScannerState::scan`]
//! produces the next token. A *screened* scanner additionally rejects token
//! kinds that cannot occur in the prefix of a bare callable definition (loop
//! keywords, assignment operators, `++`/`--`); the grammar context classifier
//! runs on a screened scanner so that statement-shaped text aborts early.

pub mod scanner;
pub mod syntax_kind;

pub use scanner::{ScanError, ScannerState};
pub use syntax_kind::SyntaxKind;
