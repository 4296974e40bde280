//! The arity decision engine.
//!
//! Orchestrates the pipeline: eligibility pre-check, textual fast path,
//! classification and parse, scope-graph crawl, and the reference
//! classification that yields a finite arity or the unbounded verdict.

use maxarity_binder::{BinderState, ScopeId, bind_callable};
use maxarity_parser::parser::node::{FunctionData, FunctionFlags, NodeArena};
use maxarity_parser::parser::syntax_kind_ext;
use maxarity_parser::{NodeIndex, ParseError, ParsedCallable, parse_callable};
use tracing::debug;

use crate::arity::Arity;
use crate::callable::{Callable, GuessOptions};
use crate::error::ArityError;
use crate::probe;

/// Guess the maximum number of positional arguments that can affect the
/// callable's behavior.
///
/// Unanalyzable sources (no reflection, native implementations) resolve to
/// [`Arity::Unbounded`]; malformed source text and internal inconsistencies
/// are fatal errors.
pub fn guess_max_arity(
    callable: &dyn Callable,
    options: &GuessOptions,
) -> Result<Arity, ArityError> {
    if !options.host.can_read_function_source {
        debug!("host cannot reflect callable source; assuming unbounded");
        return Ok(Arity::Unbounded);
    }
    let Some(source) = callable.source_text() else {
        return Ok(Arity::Unbounded);
    };
    if probe::is_native_impl(source) {
        return Ok(Arity::Unbounded);
    }

    let declared = callable.declared_length();
    // There is no substitute for spread or `arguments` if the caller wants
    // to exceed the declared count, so their absence proves the bound.
    if options.host.can_infer_function_spread && !probe::maybe_variadic(source) {
        debug!(declared, "fast path: source text shows no variadic capture");
        return Ok(Arity::Finite(declared));
    }

    let parsed = parse_callable(source, options.ecma_version)?;
    analyze(&parsed, declared)
}

fn analyze(parsed: &ParsedCallable, declared: u32) -> Result<Arity, ArityError> {
    let arena = &parsed.arena;
    let func = arena
        .get_function_at(parsed.root)
        .ok_or(ArityError::Parse(ParseError::NotACallable))?;

    // Trailing rest-capture parameter, if any.
    let mut rest_name: Option<&str> = None;
    if let Some(&last_idx) = func.parameters.nodes.last()
        && let Some(param) = arena.get_parameter_at(last_idx)
        && param.dot_dot_dot
    {
        match arena.identifier_text_at(param.name) {
            Some(name) => rest_name = Some(name),
            None => {
                let pos = arena.get(param.name).map_or(0, |node| node.pos);
                return Err(ArityError::RestPatternUnsupported { pos });
            }
        }
    }

    let is_arrow = func.flags.contains(FunctionFlags::ARROW);
    // An arrow without a rest parameter cannot host the implicit binding
    // and cannot capture trailing arguments; its declared count stands.
    if is_arrow && rest_name.is_none() {
        return assert_fn_length(func, declared, false);
    }

    let (binder, root_scope) = bind_callable(parsed);
    debug_assert_eq!(arena.parent_of(func.body), parsed.root);

    if !is_arrow && has_live_arguments_reference(arena, &binder, root_scope, parsed.root)? {
        debug!("implicit arguments binding is read in the callable's own body");
        return Ok(Arity::Unbounded);
    }

    if let Some(rest) = rest_name
        && let Some(binding) = binder.binding_in_scope(root_scope, rest)
        && binding.is_referenced()
    {
        debug!(rest, "rest-capture parameter is referenced");
        return Ok(Arity::Unbounded);
    }

    assert_fn_length(func, declared, rest_name.is_some())
}

/// Whether the un-shadowed implicit `arguments` binding has a reference
/// whose nearest enclosing non-arrow callable is the analyzed root.
/// References belonging to nested function scopes read those functions'
/// own bindings and do not make the root unbounded.
fn has_live_arguments_reference(
    arena: &NodeArena,
    binder: &BinderState,
    root_scope: ScopeId,
    root: NodeIndex,
) -> Result<bool, ArityError> {
    let Some(binding) = binder.binding_in_scope(root_scope, "arguments") else {
        return Ok(false);
    };
    // Redefinition hides the implicit binding from every reference.
    if !binding.is_implicit() {
        return Ok(false);
    }
    for &site in &binding.references {
        if nearest_non_arrow_callable(arena, site)? == root {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Walk parent links to the nearest enclosing callable that can host the
/// implicit binding. Arrows never legitimize a reference; they defer to the
/// enclosing function, which is lexical (not dynamic) capture.
fn nearest_non_arrow_callable(arena: &NodeArena, from: NodeIndex) -> Result<NodeIndex, ArityError> {
    let mut current = arena.parent_of(from);
    while current.is_some() {
        if let Some(node) = arena.get(current)
            && syntax_kind_ext::is_function_like(node.kind)
            && node.kind != syntax_kind_ext::ARROW_FUNCTION
        {
            return Ok(current);
        }
        current = arena.parent_of(current);
    }
    Err(ArityError::MissingEnclosingCallable)
}

/// The parsed parameter list (rest excluded) must agree with the
/// runtime-reported declared count; a mismatch means the classifier or
/// parser disagreed with the runtime about what was parsed.
fn assert_fn_length(
    func: &FunctionData,
    declared: u32,
    has_rest: bool,
) -> Result<Arity, ArityError> {
    let parsed = func.parameters.nodes.len() as u32 - u32::from(has_rest);
    if parsed != declared {
        return Err(ArityError::InconsistentParameterCount {
            parsed,
            reported: declared,
        });
    }
    Ok(Arity::Finite(declared))
}
