//! Statement parsing tests.

use crate::parser::syntax_kind_ext::*;
use crate::parser::{NodeAccess, NodeIndex};
use crate::tests::{find_all, find_first, parse, parse_ok, text_of};
use looplint_scanner::SyntaxKind;

fn in_function(body: &str) -> String {
    format!("package p\n\nfunc f() {{\n{body}\n}}\n")
}

#[test]
fn test_three_clause_for_loop() {
    let source = in_function("for i := 0; i < 10; i++ {\n\tuse(i)\n}");
    let (arena, root) = parse_ok(&source);
    let loop_node = find_first(&arena, root, FOR_STATEMENT);
    let data = arena
        .get_for_statement(arena.get(loop_node).expect("for"))
        .expect("for data");
    assert_eq!(arena.kind(data.init), Some(ASSIGNMENT_STATEMENT));
    assert_eq!(arena.kind(data.condition), Some(BINARY_EXPRESSION));
    assert_eq!(arena.kind(data.post), Some(INC_DEC_STATEMENT));
    assert_eq!(arena.kind(data.body), Some(BLOCK));

    let init = arena
        .get_assignment(arena.get(data.init).expect("init"))
        .expect("assignment");
    assert_eq!(init.operator, SyntaxKind::ColonEqualsToken as u16);
    assert_eq!(text_of(&arena, &source, loop_node).lines().next(), Some("for i := 0; i < 10; i++ {"));
}

#[test]
fn test_condition_only_and_infinite_loops() {
    let source = in_function("for ok {\n}\nfor {\n\tbreak\n}\nfor ;; {\n}");
    let (arena, root) = parse_ok(&source);
    let loops = find_all(&arena, root, FOR_STATEMENT);
    assert_eq!(loops.len(), 3);

    let first = arena
        .get_for_statement(arena.get(loops[0]).expect("for"))
        .expect("for data");
    assert!(first.init.is_none());
    assert_eq!(arena.get_identifier_text(first.condition), Some("ok"));

    for &index in &loops[1..] {
        let data = arena
            .get_for_statement(arena.get(index).expect("for"))
            .expect("for data");
        assert!(data.init.is_none() && data.condition.is_none() && data.post.is_none());
    }
}

#[test]
fn test_range_clauses() {
    let source = in_function(
        "for k, v := range m {\n}\nfor _, tc = range cases {\n}\nfor range ch {\n}\nfor i := range 10 {\n}",
    );
    let (arena, root) = parse_ok(&source);
    let loops = find_all(&arena, root, RANGE_STATEMENT);
    assert_eq!(loops.len(), 4);

    let data = |index: NodeIndex| {
        arena
            .get_range_statement(arena.get(index).expect("range"))
            .expect("range data")
    };

    let first = data(loops[0]);
    assert_eq!(arena.get_identifier_text(first.key), Some("k"));
    assert_eq!(arena.get_identifier_text(first.value), Some("v"));
    assert_eq!(first.operator, SyntaxKind::ColonEqualsToken as u16);
    assert_eq!(arena.get_identifier_text(first.expression), Some("m"));

    let second = data(loops[1]);
    assert_eq!(second.operator, SyntaxKind::EqualsToken as u16);
    assert_eq!(arena.get_identifier_text(second.key), Some("_"));

    let third = data(loops[2]);
    assert!(third.key.is_none() && third.value.is_none());
    assert_eq!(third.operator, SyntaxKind::Unknown as u16);

    let fourth = data(loops[3]);
    assert!(fourth.value.is_none());
    assert_eq!(arena.get_literal_text(fourth.expression), Some("10"));
}

#[test]
fn test_range_over_composite_literal_in_header() {
    let source = in_function(
        "for _, tc := range []struct {\n\tname string\n}{{name: \"a\"}, {\"b\"}} {\n\t_ = tc\n}",
    );
    let (arena, root) = parse_ok(&source);
    let loop_node = find_first(&arena, root, RANGE_STATEMENT);
    let data = arena
        .get_range_statement(arena.get(loop_node).expect("range"))
        .expect("range data");
    assert_eq!(arena.kind(data.expression), Some(COMPOSITE_LITERAL));
    assert_eq!(find_all(&arena, data.expression, COMPOSITE_LITERAL).len(), 3);
    assert_eq!(find_all(&arena, data.body, ASSIGNMENT_STATEMENT).len(), 1);
}

#[test]
fn test_bare_type_name_in_header_is_not_a_composite_literal() {
    let source = in_function("for x == T {\n\tbreak\n}\nif v := (T{}); v.ok {\n}");
    let (arena, root) = parse_ok(&source);
    let loop_node = find_first(&arena, root, FOR_STATEMENT);
    let data = arena
        .get_for_statement(arena.get(loop_node).expect("for"))
        .expect("for data");
    assert_eq!(arena.kind(data.condition), Some(BINARY_EXPRESSION));
    assert_eq!(find_all(&arena, data.body, BRANCH_STATEMENT).len(), 1);
    assert_eq!(find_all(&arena, root, COMPOSITE_LITERAL).len(), 1);
}

#[test]
fn test_if_else_chain() {
    let source = in_function("if err := run(); err != nil {\n} else if ok {\n} else {\n}");
    let (arena, root) = parse_ok(&source);
    let ifs = find_all(&arena, root, IF_STATEMENT);
    assert_eq!(ifs.len(), 2);
    let outer = arena
        .get_if_statement(arena.get(ifs[0]).expect("if"))
        .expect("if data");
    assert_eq!(arena.kind(outer.init), Some(ASSIGNMENT_STATEMENT));
    assert_eq!(arena.kind(outer.condition), Some(BINARY_EXPRESSION));
    assert_eq!(outer.else_branch, ifs[1]);
    let inner = arena
        .get_if_statement(arena.get(ifs[1]).expect("if"))
        .expect("if data");
    assert_eq!(arena.kind(inner.else_branch), Some(BLOCK));
}

#[test]
fn test_switch_and_type_switch() {
    let source = in_function(
        "switch x := f(); x {\ncase 1, 2:\n\ty()\ncase 3:\ndefault:\n}\nswitch v := i.(type) {\ncase int, *T:\n\t_ = v\n}",
    );
    let (arena, root) = parse_ok(&source);
    let switch = find_first(&arena, root, SWITCH_STATEMENT);
    let data = arena
        .get_switch_statement(arena.get(switch).expect("switch"))
        .expect("switch data");
    assert_eq!(arena.kind(data.init), Some(ASSIGNMENT_STATEMENT));
    assert_eq!(arena.get_identifier_text(data.tag), Some("x"));
    assert_eq!(data.clauses.len(), 3);
    let first_clause = arena
        .get_case_clause(arena.get(data.clauses.nodes[0]).expect("clause"))
        .expect("clause data");
    assert_eq!(first_clause.expressions.len(), 2);
    assert_eq!(first_clause.statements.len(), 1);
    let default_clause = arena
        .get_case_clause(arena.get(data.clauses.nodes[2]).expect("clause"))
        .expect("clause data");
    assert!(default_clause.is_default);

    let type_switch = find_first(&arena, root, TYPE_SWITCH_STATEMENT);
    let data = arena
        .get_switch_statement(arena.get(type_switch).expect("switch"))
        .expect("switch data");
    assert_eq!(arena.kind(data.tag), Some(ASSIGNMENT_STATEMENT));
}

#[test]
fn test_select_statement() {
    let source = in_function(
        "select {\ncase v := <-ch:\n\t_ = v\ncase out <- 1:\ncase <-done:\n\treturn\ndefault:\n}",
    );
    let (arena, root) = parse_ok(&source);
    let clauses = find_all(&arena, root, COMM_CLAUSE);
    assert_eq!(clauses.len(), 4);
    let kinds: Vec<Option<u16>> = clauses
        .iter()
        .map(|&clause| {
            let data = arena
                .get_case_clause(arena.get(clause).expect("clause"))
                .expect("clause data");
            arena.kind(data.comm)
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            Some(ASSIGNMENT_STATEMENT),
            Some(SEND_STATEMENT),
            Some(EXPRESSION_STATEMENT),
            None
        ]
    );
}

#[test]
fn test_labeled_loop_with_branch() {
    let source = in_function("outer:\n\tfor {\n\t\tcontinue outer\n\t}\ndone:\n}\nfunc g() {");
    let (arena, root, _) = parse(&source);
    let labeled = find_all(&arena, root, LABELED_STATEMENT);
    assert_eq!(labeled.len(), 2);
    let data = arena
        .get_labeled_statement(arena.get(labeled[0]).expect("labeled"))
        .expect("labeled data");
    assert_eq!(arena.get_identifier_text(data.label), Some("outer"));
    assert_eq!(arena.kind(data.statement), Some(FOR_STATEMENT));

    let branch = find_first(&arena, root, BRANCH_STATEMENT);
    let branch_data = arena
        .get_branch_statement(arena.get(branch).expect("branch"))
        .expect("branch data");
    assert_eq!(branch_data.keyword, SyntaxKind::ContinueKeyword as u16);
    assert_eq!(arena.get_identifier_text(branch_data.label), Some("outer"));
}

#[test]
fn test_subtest_call_with_function_literal() {
    let source = in_function(
        "for _, tc := range cases {\n\tt.Run(tc.name, func(t *testing.T) {\n\t\tt.Parallel()\n\t\tcheck(tc)\n\t})\n}",
    );
    let (arena, root) = parse_ok(&source);
    let calls = find_all(&arena, root, CALL_EXPRESSION);
    assert_eq!(calls.len(), 3);
    let run = arena
        .get_call_expr(arena.get(calls[0]).expect("call"))
        .expect("call data");
    assert_eq!(arena.kind(run.expression), Some(SELECTOR_EXPRESSION));
    assert_eq!(run.arguments.len(), 2);
    assert_eq!(arena.kind(run.arguments.nodes[1]), Some(FUNCTION_LITERAL));

    let closure = arena
        .get_function(arena.get(run.arguments.nodes[1]).expect("closure"))
        .expect("function data");
    assert_eq!(closure.parameters.len(), 1);
    let parameter = arena
        .get_field(arena.get(closure.parameters.nodes[0]).expect("param"))
        .expect("field data");
    assert_eq!(arena.get_identifier_text(parameter.names.nodes[0]), Some("t"));
    assert_eq!(text_of(&arena, &source, parameter.type_node), "*testing.T");
}

#[test]
fn test_go_defer_and_declaration_statements() {
    let source = in_function("var wg sync.WaitGroup\ndefer wg.Wait()\ngo func() {}()\nconst n = 1");
    let (arena, root) = parse_ok(&source);
    assert_eq!(find_all(&arena, root, DECLARATION_STATEMENT).len(), 2);
    assert_eq!(find_all(&arena, root, DEFER_STATEMENT).len(), 1);
    assert_eq!(find_all(&arena, root, GO_STATEMENT).len(), 1);
    assert_eq!(find_all(&arena, root, FUNCTION_LITERAL).len(), 1);
}

#[test]
fn test_missing_brace_is_reported_and_parsing_continues() {
    let source = "package p\n\nfunc f() {\n\tif x \n\t\ty()\n\t}\n}\n\nfunc g() {}\n";
    let (arena, root, diagnostics) = parse(source);
    assert!(!diagnostics.is_empty());
    let names: Vec<&str> = find_all(&arena, root, FUNCTION_DECLARATION)
        .into_iter()
        .filter_map(|index| {
            let data = arena.get_function(arena.get(index)?)?;
            arena.get_identifier_text(data.name)
        })
        .collect();
    assert!(names.contains(&"g"));
}
