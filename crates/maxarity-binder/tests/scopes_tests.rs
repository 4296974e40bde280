//! Scope graph tests: declarations, the injected implicit binding,
//! shadowing, and reference attribution.

use maxarity_binder::{BinderState, ScopeId, bind_callable};
use maxarity_common::EcmaVersion;
use maxarity_parser::parse_callable;

fn bind(source: &str) -> (BinderState, ScopeId) {
    let parsed = parse_callable(source, EcmaVersion::default())
        .unwrap_or_else(|err| panic!("parse failed for {source:?}: {err}"));
    bind_callable(&parsed)
}

#[test]
fn parameters_are_declared_in_the_callable_scope() {
    let (binder, root) = bind("function (a, b) { return a; }");
    let a = binder.binding_in_scope(root, "a").expect("a bound");
    assert!(a.declaration.is_some());
    assert_eq!(a.references.len(), 1);
    let b = binder.binding_in_scope(root, "b").expect("b bound");
    assert!(b.references.is_empty());
}

#[test]
fn function_scopes_pre_register_the_implicit_arguments_binding() {
    let (binder, root) = bind("function (a) { return a; }");
    let arguments = binder
        .binding_in_scope(root, "arguments")
        .expect("implicit binding present");
    assert!(arguments.is_implicit());
    assert!(!arguments.is_referenced());

    let (binder, root) = bind("function () { return arguments; }");
    let arguments = binder.binding_in_scope(root, "arguments").unwrap();
    assert!(arguments.is_implicit());
    assert_eq!(arguments.references.len(), 1);
}

#[test]
fn arrow_scopes_host_no_implicit_binding() {
    let (binder, root) = bind("(a, ...rest) => rest");
    assert!(binder.binding_in_scope(root, "arguments").is_none());
    let rest = binder.binding_in_scope(root, "rest").expect("rest bound");
    assert!(rest.is_referenced());
}

#[test]
fn explicit_declarations_overwrite_the_implicit_binding() {
    // Parameter.
    let (binder, root) = bind("function (arguments) { return arguments; }");
    let binding = binder.binding_in_scope(root, "arguments").unwrap();
    assert!(!binding.is_implicit());
    assert_eq!(binding.references.len(), 1);

    // Destructured parameter field, including renames.
    let (binder, root) = bind("function ({ arguments }) { return arguments; }");
    assert!(!binder.binding_in_scope(root, "arguments").unwrap().is_implicit());
    let (binder, root) = bind("function ({ a: arguments }) { return arguments; }");
    assert!(!binder.binding_in_scope(root, "arguments").unwrap().is_implicit());

    // Hoisted var, even when the reference precedes the declaration.
    let (binder, root) = bind("function () { return arguments; var arguments; }");
    let binding = binder.binding_in_scope(root, "arguments").unwrap();
    assert!(!binding.is_implicit());
    assert_eq!(binding.references.len(), 1);

    // Lexical declaration in the body.
    let (binder, root) = bind("function () { let arguments = 1; return arguments; }");
    assert!(!binder.binding_in_scope(root, "arguments").unwrap().is_implicit());
}

#[test]
fn nested_functions_own_their_arguments_references() {
    let (binder, root) = bind("function () { return function () { return arguments; }; }");
    // The nested function's reference resolves to its own implicit binding,
    // not the outer one.
    let outer = binder.binding_in_scope(root, "arguments").unwrap();
    assert!(outer.is_implicit());
    assert!(!outer.is_referenced());
}

#[test]
fn arrow_references_resolve_to_the_enclosing_function() {
    let (binder, root) = bind("function () { return () => arguments; }");
    let outer = binder.binding_in_scope(root, "arguments").unwrap();
    assert!(outer.is_implicit());
    assert_eq!(outer.references.len(), 1);
}

#[test]
fn rest_parameter_references_count_across_nested_scopes() {
    let (binder, root) = bind("function (...args) { return () => args; }");
    let args = binder.binding_in_scope(root, "args").unwrap();
    assert_eq!(args.references.len(), 1);

    let (binder, root) = bind("function (a, b, c, ...rest) {}");
    let rest = binder.binding_in_scope(root, "rest").unwrap();
    assert!(!rest.is_referenced());
}

#[test]
fn block_scoped_declarations_stay_out_of_the_root_scope() {
    let (binder, root) = bind("function () { { let x = 1; } try {} catch (e) { e; } }");
    assert!(binder.binding_in_scope(root, "x").is_none());
    assert!(binder.binding_in_scope(root, "e").is_none());
}

#[test]
fn var_declarations_hoist_out_of_blocks() {
    let (binder, root) = bind("function () { if (1) { var deep = 2; } }");
    assert!(binder.binding_in_scope(root, "deep").is_some());
}

#[test]
fn named_function_expressions_bind_their_own_name() {
    let (binder, root) = bind("function me() { return me; }");
    let me = binder.binding_in_scope(root, "me").expect("name bound");
    assert_eq!(me.references.len(), 1);
}

#[test]
fn string_and_comment_occurrences_are_not_references() {
    let (binder, root) = bind("function () { return 'arguments'; /* arguments */ }");
    let binding = binder.binding_in_scope(root, "arguments").unwrap();
    assert!(binding.is_implicit());
    assert!(!binding.is_referenced());
}

#[test]
fn property_names_are_not_references() {
    let (binder, root) = bind("function (o) { return o.arguments + { arguments: 1 }.arguments; }");
    let binding = binder.binding_in_scope(root, "arguments").unwrap();
    assert!(!binding.is_referenced());

    // Shorthand properties, by contrast, are live references.
    let (binder, root) = bind("function () { return { arguments }; }");
    let binding = binder.binding_in_scope(root, "arguments").unwrap();
    assert_eq!(binding.references.len(), 1);
}
