//! Expression and type parsing tests.

use crate::parser::syntax_kind_ext::*;
use crate::parser::{NodeAccess, NodeArena, NodeIndex};
use crate::tests::{find_all, find_first, parse, parse_ok, text_of};
use looplint_scanner::SyntaxKind;

/// Parse `var _ = <expr>` and return the initializer expression.
fn parse_value(expression: &str) -> (NodeArena, NodeIndex, String) {
    let source = format!("package p\n\nvar _ = {expression}\n");
    let (arena, root) = parse_ok(&source);
    let spec = find_first(&arena, root, VALUE_SPEC);
    let value = arena
        .get_value_spec(arena.get(spec).expect("spec"))
        .expect("value spec")
        .values
        .nodes[0];
    (arena, value, source)
}

#[test]
fn test_binary_precedence() {
    let (arena, value, _) = parse_value("a + b*c == d || e && f");
    let top = arena
        .get_binary_expr(arena.get(value).expect("binary"))
        .expect("binary data");
    assert_eq!(top.operator, SyntaxKind::BarBarToken as u16);

    let comparison = arena
        .get_binary_expr(arena.get(top.left).expect("left"))
        .expect("comparison");
    assert_eq!(comparison.operator, SyntaxKind::EqualsEqualsToken as u16);

    let sum = arena
        .get_binary_expr(arena.get(comparison.left).expect("sum"))
        .expect("sum data");
    assert_eq!(sum.operator, SyntaxKind::PlusToken as u16);
    let product = arena
        .get_binary_expr(arena.get(sum.right).expect("product"))
        .expect("product data");
    assert_eq!(product.operator, SyntaxKind::AsteriskToken as u16);
}

#[test]
fn test_selector_call_chain() {
    let (arena, value, source) = parse_value("ginkgo.It(\"runs\", func() {}).Label(x...)");
    assert_eq!(arena.kind(value), Some(CALL_EXPRESSION));
    let outer = arena
        .get_call_expr(arena.get(value).expect("call"))
        .expect("call data");
    assert!(outer.has_ellipsis);
    assert!(text_of(&arena, &source, outer.expression).ends_with(".Label"));

    let calls = find_all(&arena, value, CALL_EXPRESSION);
    assert_eq!(calls.len(), 2);
    let inner = arena
        .get_call_expr(arena.get(calls[1]).expect("call"))
        .expect("call data");
    let callee = arena
        .get_selector_expr(arena.get(inner.expression).expect("selector"))
        .expect("selector data");
    assert_eq!(arena.get_identifier_text(callee.expression), Some("ginkgo"));
    assert_eq!(arena.get_identifier_text(callee.name), Some("It"));
    assert_eq!(arena.kind(inner.arguments.nodes[1]), Some(FUNCTION_LITERAL));
}

#[test]
fn test_index_slice_and_type_assertion() {
    let (arena, value, _) = parse_value("m[k][1:2:3].(fmt.Stringer)");
    assert_eq!(arena.kind(value), Some(TYPE_ASSERTION_EXPRESSION));
    let slice = find_first(&arena, value, SLICE_EXPRESSION);
    let data = arena
        .get_slice_expr(arena.get(slice).expect("slice"))
        .expect("slice data");
    assert!(data.low.is_some() && data.high.is_some() && data.max.is_some());
    assert_eq!(arena.kind(data.expression), Some(INDEX_EXPRESSION));

    let (arena, value, _) = parse_value("xs[:n]");
    let data = arena
        .get_slice_expr(arena.get(value).expect("slice"))
        .expect("slice data");
    assert!(data.low.is_none());
    assert!(data.max.is_none());
}

#[test]
fn test_generic_instantiation_call() {
    let (arena, value, _) = parse_value("Map[int, string](xs, f)");
    let call = arena
        .get_call_expr(arena.get(value).expect("call"))
        .expect("call data");
    let index = arena
        .get_index_expr(arena.get(call.expression).expect("index"))
        .expect("index data");
    assert_eq!(index.indices.len(), 2);
}

#[test]
fn test_composite_literals() {
    let (arena, value, _) = parse_value("map[string]T{\"a\": {X: 1}, \"b\": {}}");
    assert_eq!(arena.kind(value), Some(COMPOSITE_LITERAL));
    let literal = arena
        .get_composite_literal(arena.get(value).expect("literal"))
        .expect("literal data");
    assert_eq!(arena.kind(literal.type_node), Some(MAP_TYPE));
    assert_eq!(literal.elements.len(), 2);
    assert!(
        literal
            .elements
            .iter()
            .all(|element| arena.kind(element) == Some(KEY_VALUE_EXPRESSION))
    );

    let (arena, value, _) = parse_value("&pkg.Config{Name: name,\n}");
    let unary = arena
        .get_unary_expr(arena.get(value).expect("unary"))
        .expect("unary data");
    assert_eq!(unary.operator, SyntaxKind::AmpersandToken as u16);
    assert_eq!(arena.kind(unary.operand), Some(COMPOSITE_LITERAL));

    let (arena, value, _) = parse_value("[...]int{1, 2}");
    let array = find_first(&arena, value, ARRAY_TYPE);
    let data = arena
        .get_array_type(arena.get(array).expect("array"))
        .expect("array data");
    assert_eq!(arena.kind(data.length), Some(ELLIPSIS_LENGTH));
}

#[test]
fn test_function_literal_parameter_grouping() {
    let (arena, value, _) = parse_value("func(a, b int, t *testing.T) (err error) { return }");
    let data = arena
        .get_function(arena.get(value).expect("func"))
        .expect("function data");
    assert_eq!(data.parameters.len(), 2);
    let first = arena
        .get_field(arena.get(data.parameters.nodes[0]).expect("param"))
        .expect("field data");
    let names: Vec<&str> = first
        .names
        .iter()
        .filter_map(|name| arena.get_identifier_text(name))
        .collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(data.results.len(), 1);
}

#[test]
fn test_unnamed_parameters() {
    let (arena, value, _) = parse_value("func(int, []string, pkg.T, ...any) {}");
    let data = arena
        .get_function(arena.get(value).expect("func"))
        .expect("function data");
    assert_eq!(data.parameters.len(), 4);
    for parameter in data.parameters.iter() {
        let field = arena
            .get_field(arena.get(parameter).expect("param"))
            .expect("field data");
        assert!(field.names.is_empty());
    }
}

#[test]
fn test_function_type_without_body() {
    let (arena, value, _) = parse_value("(func(string) error)(nil)");
    assert_eq!(arena.kind(value), Some(CALL_EXPRESSION));
    assert!(find_first(&arena, value, FUNCTION_TYPE).is_some());
    assert!(find_first(&arena, value, FUNCTION_LITERAL).is_none());
}

#[test]
fn test_channel_receive_and_types() {
    let (arena, value, _) = parse_value("<-ch");
    let unary = arena
        .get_unary_expr(arena.get(value).expect("unary"))
        .expect("unary data");
    assert_eq!(unary.operator, SyntaxKind::LessThanMinusToken as u16);

    let (arena, value, _) = parse_value("make(<-chan int, 1)");
    let chan = find_first(&arena, value, CHAN_TYPE);
    assert!(chan.is_some());
}

#[test]
fn test_mixed_named_and_unnamed_parameters_are_reported() {
    let (_, _, diagnostics) = parse("package p\n\nfunc f(a int, string) {}\n");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "mixed named and unnamed parameters");
}

#[test]
fn test_missing_operand_is_reported() {
    let (arena, root, diagnostics) = parse("package p\n\nvar x = 1 +\n");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "expected operand, found EOF");
    assert!(find_first(&arena, root, BAD_EXPRESSION).is_some());
}
