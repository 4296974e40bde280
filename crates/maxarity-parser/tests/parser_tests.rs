//! Parser adapter tests: callable roots, parameter shapes, parent links,
//! and fatal failures.

use maxarity_common::EcmaVersion;
use maxarity_parser::parser::node::FunctionFlags;
use maxarity_parser::parser::syntax_kind_ext;
use maxarity_parser::{CallableError, ParsedCallable, parse_callable};

fn parse(source: &str) -> ParsedCallable {
    parse_callable(source, EcmaVersion::default())
        .unwrap_or_else(|err| panic!("parse failed for {source:?}: {err}"))
}

fn root_kind(parsed: &ParsedCallable) -> u16 {
    parsed.arena.get(parsed.root).expect("root node").kind
}

#[test]
fn parses_function_expressions() {
    let parsed = parse("function (a, b) { return a + b; }");
    assert_eq!(root_kind(&parsed), syntax_kind_ext::FUNCTION_EXPRESSION);
    let func = parsed.arena.get_function_at(parsed.root).unwrap();
    assert_eq!(func.parameters.len(), 2);
    assert!(func.name.is_none());
    assert!(func.flags.is_empty());
}

#[test]
fn parses_named_async_generators() {
    let parsed = parse("async function *gen(a) { yield a; }");
    let func = parsed.arena.get_function_at(parsed.root).unwrap();
    assert!(func.flags.contains(FunctionFlags::ASYNC));
    assert!(func.flags.contains(FunctionFlags::GENERATOR));
    assert_eq!(parsed.arena.identifier_text_at(func.name), Some("gen"));
}

#[test]
fn parses_arrow_functions() {
    let parsed = parse("(a, b, c) => a");
    assert_eq!(root_kind(&parsed), syntax_kind_ext::ARROW_FUNCTION);
    let func = parsed.arena.get_function_at(parsed.root).unwrap();
    assert_eq!(func.parameters.len(), 3);
    assert!(func.flags.contains(FunctionFlags::ARROW));

    let parsed = parse("async (a) => { return a; }");
    let func = parsed.arena.get_function_at(parsed.root).unwrap();
    assert!(func.flags.contains(FunctionFlags::ARROW));
    assert!(func.flags.contains(FunctionFlags::ASYNC));
}

#[test]
fn extracts_method_shorthand_from_the_synthetic_wrapper() {
    let parsed = parse("t(a) {}");
    assert_eq!(root_kind(&parsed), syntax_kind_ext::METHOD_DECLARATION);
    let func = parsed.arena.get_function_at(parsed.root).unwrap();
    assert_eq!(func.parameters.len(), 1);
    assert_eq!(parsed.arena.identifier_text_at(func.name), Some("t"));

    let parsed = parse("async t(a, b) {}");
    let func = parsed.arena.get_function_at(parsed.root).unwrap();
    assert!(func.flags.contains(FunctionFlags::ASYNC));
    assert_eq!(func.parameters.len(), 2);

    let parsed = parse("*function() { yield 1; }");
    let func = parsed.arena.get_function_at(parsed.root).unwrap();
    assert!(func.flags.contains(FunctionFlags::GENERATOR));
    assert_eq!(parsed.arena.identifier_text_at(func.name), Some("function"));

    let parsed = parse("get x() { return 1; }");
    assert_eq!(root_kind(&parsed), syntax_kind_ext::GET_ACCESSOR);
}

#[test]
fn recognizes_rest_and_destructured_parameters() {
    let parsed = parse("function (a, { b, c: d } = {}, [e], ...rest) {}");
    let func = parsed.arena.get_function_at(parsed.root).unwrap();
    assert_eq!(func.parameters.len(), 4);
    let last = *func.parameters.nodes.last().unwrap();
    let rest = parsed.arena.get_parameter_at(last).unwrap();
    assert!(rest.dot_dot_dot);
    assert_eq!(parsed.arena.identifier_text_at(rest.name), Some("rest"));

    let first = parsed.arena.get_parameter_at(func.parameters.nodes[0]).unwrap();
    assert!(!first.dot_dot_dot);
}

#[test]
fn assigns_parent_links_bottom_up() {
    let parsed = parse("function () { return arguments; }");
    let func = parsed.arena.get_function_at(parsed.root).unwrap();
    // The body's structural parent is the callable-definition node.
    assert_eq!(parsed.arena.parent_of(func.body), parsed.root);
    let block = parsed.arena.get_block_at(func.body).unwrap();
    for &stmt in &block.statements.nodes {
        assert_eq!(parsed.arena.parent_of(stmt), func.body);
    }
}

#[test]
fn parses_rich_statement_bodies() {
    parse("function (n) { for (let i = 0; i < n; i++) { n += i; } return n; }");
    parse("function (xs) { for (const x of xs) { if (x) break; } }");
    parse("function (o) { for (const k in o) { delete o[k]; } }");
    parse("function (a) { try { throw a; } catch { return 0; } finally {} }");
    parse("function (s) { switch (s) { case 1: return 1; default: return 0; } }");
    parse("function (a) { label: while (a--) { continue label; } }");
    parse("function (t) { return `got ${t} and ${t + 1}`; }");
    parse("function (re) { return /a[/]b/g.test(re); }");
    parse("function () { class C extends Object { constructor() { super(); } m(x) { return x; } } return C; }");
    parse("function (a) { return a?.b?.[0]?.(); }");
    parse("function (a) { return typeof a === 'object' ? { ...a } : [...a]; }");
    parse("async function (p) { const v = await p; return v ?? 0; }");
    parse("function () { return new Map([[1, 2]]); }");
}

#[test]
fn malformed_sources_fail_to_parse() {
    assert!(matches!(
        parse_callable("function (", EcmaVersion::default()),
        Err(CallableError::Parse(_))
    ));
    assert!(matches!(
        parse_callable("function () {", EcmaVersion::default()),
        Err(CallableError::Parse(_))
    ));
    // Classified as a method, but the wrapper contents are not a method.
    assert!(matches!(
        parse_callable("x => x", EcmaVersion::default()),
        Err(CallableError::Parse(_))
    ));
    // A parenthesized expression is not a callable definition.
    assert!(matches!(
        parse_callable("(a)", EcmaVersion::default()),
        Err(CallableError::Parse(_))
    ));
}

#[test]
fn logical_assignment_requires_es2021() {
    let source = "function () { let a; a ??= 1; return a; }";
    assert!(matches!(
        parse_callable(source, EcmaVersion::Es2020),
        Err(CallableError::Parse(_))
    ));
    assert!(parse_callable(source, EcmaVersion::Es2021).is_ok());
}
