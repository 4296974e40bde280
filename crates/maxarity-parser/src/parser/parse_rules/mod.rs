//! Parsing rule helpers.
//!
//! Arrow-function heads are the one place the grammar needs unbounded
//! lookahead: a parenthesized parameter list is indistinguishable from a
//! parenthesized expression until the closing `)` and the `=>` after it.
//! The helpers here clone the scanner, scan ahead, and discard the clone -
//! the parser itself never backtracks.

mod utils;

pub(crate) use self::utils::{
    look_ahead_is, look_ahead_is_async_arrow, look_ahead_is_paren_arrow, look_ahead_kind,
};
