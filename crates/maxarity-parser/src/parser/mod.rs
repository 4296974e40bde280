//! Parser module: classifier, parser state, arena AST, and the callable
//! parse adapter.

pub mod base;
pub mod context;
pub mod node;
pub mod node_access;
pub mod node_arena;
mod parse_rules;
pub mod state;
mod state_class_members;
mod state_statements;
pub mod syntax_kind_ext;

use std::fmt;

use maxarity_common::EcmaVersion;
use maxarity_scanner::ScannerState;
use tracing::debug;

use self::base::NodeIndex;
use self::context::{CallableContext, ClassifyError, guess_callable_context};
use self::node::NodeArena;
use self::state::{ParseError, ParserState};

/// Result of the parser adapter: an arena plus the callable-definition root.
pub struct ParsedCallable {
    pub arena: NodeArena,
    pub root: NodeIndex,
}

/// Classification or parse failure while turning text into a callable tree.
#[derive(Debug)]
pub enum CallableError {
    Classify(ClassifyError),
    Parse(ParseError),
}

impl From<ClassifyError> for CallableError {
    fn from(err: ClassifyError) -> CallableError {
        CallableError::Classify(err)
    }
}

impl From<ParseError> for CallableError {
    fn from(err: ParseError) -> CallableError {
        CallableError::Parse(err)
    }
}

impl fmt::Display for CallableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallableError::Classify(err) => write!(f, "classification failed: {err}"),
            CallableError::Parse(err) => write!(f, "parse failed: {err}"),
        }
    }
}

impl std::error::Error for CallableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CallableError::Classify(err) => Some(err),
            CallableError::Parse(err) => Some(err),
        }
    }
}

/// Parse callable source text into a tree rooted at a callable-definition
/// node.
///
/// Classification runs on a screened scanner; the parse itself then either
/// consumes the text directly as an expression, or wraps it as the sole
/// property of a synthetic object literal and extracts the method node.
pub fn parse_callable(source: &str, ecma: EcmaVersion) -> Result<ParsedCallable, CallableError> {
    let mut scanner = ScannerState::screened(source);
    let ctx = guess_callable_context(&mut scanner)?;
    debug!(context = ?ctx, "classified callable source");
    match ctx {
        CallableContext::Expression => {
            let mut parser = ParserState::new(source, ecma);
            parser.prime()?;
            let root = parser.parse_assignment_expression()?;
            let arena = parser.into_arena();
            if !is_callable_root(&arena, root) {
                return Err(ParseError::NotACallable.into());
            }
            Ok(ParsedCallable { arena, root })
        }
        CallableContext::Method => {
            let wrapped = format!("({{{source}}})");
            let mut parser = ParserState::new(&wrapped, ecma);
            parser.prime()?;
            let expr = parser.parse_assignment_expression()?;
            let arena = parser.into_arena();
            let root =
                extract_method_root(&arena, expr).ok_or(CallableError::Parse(ParseError::NotACallable))?;
            Ok(ParsedCallable { arena, root })
        }
    }
}

fn is_callable_root(arena: &NodeArena, root: NodeIndex) -> bool {
    arena
        .get(root)
        .is_some_and(|node| syntax_kind_ext::is_function_like(node.kind))
}

/// Unwrap `({ <method> })` down to the method node.
fn extract_method_root(arena: &NodeArena, expr: NodeIndex) -> Option<NodeIndex> {
    let paren = arena.get(expr)?;
    if paren.kind != syntax_kind_ext::PARENTHESIZED_EXPRESSION {
        return None;
    }
    let object = arena.get(arena.get_wrapped_expr(paren)?.expression)?;
    let properties = &arena.get_list(object)?.elements;
    if properties.len() != 1 {
        return None;
    }
    let member = properties.nodes[0];
    if syntax_kind_ext::is_function_like(arena.get(member)?.kind) {
        Some(member)
    } else {
        None
    }
}
