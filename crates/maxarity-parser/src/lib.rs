//! Callable parser and AST types for the maxarity analyzer.
//!
//! This crate hosts two of the pipeline stages:
//! - the grammar context classifier ([`parser::context`]), which decides
//!   whether candidate text is a function-literal expression or an
//!   object-literal method shorthand, and
//! - the source parser adapter ([`parser::parse_callable`]), which parses the
//!   text into a [`parser::node::NodeArena`] rooted at a callable-definition
//!   node (wrapping method text in a synthetic object literal first).
//!
//! The AST is arena-indexed: thin [`parser::node::Node`] records plus typed
//! side pools, with parent links assigned bottom-up at node creation.

pub mod parser;

pub use parser::base::{NodeIndex, NodeList};
pub use parser::context::{CallableContext, ClassifyError, guess_callable_context};
pub use parser::state::ParseError;
pub use parser::{CallableError, ParsedCallable, parse_callable};
