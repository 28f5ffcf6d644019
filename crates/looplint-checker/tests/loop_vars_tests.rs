//! Loop discovery and loop variable extraction.

use crate::loop_scanner::{collect_loops, enclosing_function_declaration, is_in_test_function};
use crate::loop_vars::{extract_loop_variables, loop_body};
use crate::test_utils::parse_and_bind;
use looplint_parser::parser::syntax_kind_ext::*;
use looplint_parser::{NodeAccess, NodeArena, NodeIndex};

fn names(arena: &NodeArena, binder: &looplint_binder::BinderState, loop_idx: NodeIndex) -> Vec<String> {
    extract_loop_variables(arena, binder, loop_idx)
        .expect("extraction succeeds")
        .iter()
        .map(|&id| binder.get_symbol(id).unwrap().escaped_name.clone())
        .collect()
}

#[test]
fn test_loops_are_collected_in_preorder() {
    let source = r#"package p

func f(xs []int) {
	for _, a := range xs {
		for b := 0; b < a; b++ {
		}
	}
	for {
	}
	func() {
		for range xs {
		}
	}()
}
"#;
    let (arena, root, _) = parse_and_bind(source);
    let loops = collect_loops(&arena, root);
    let kinds: Vec<u16> = loops.iter().filter_map(|&idx| arena.kind(idx)).collect();
    assert_eq!(
        kinds,
        vec![RANGE_STATEMENT, FOR_STATEMENT, FOR_STATEMENT, RANGE_STATEMENT]
    );
    let positions: Vec<u32> = loops
        .iter()
        .filter_map(|&idx| arena.pos_end(idx).map(|(pos, _)| pos))
        .collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted);
}

#[test]
fn test_range_key_and_value() {
    let source = r#"package p

func f(m map[string]int) {
	for k, v := range m {
	}
	for _, v := range m {
	}
	for k := range m {
	}
	for range m {
	}
}
"#;
    let (arena, root, binder) = parse_and_bind(source);
    let loops = collect_loops(&arena, root);
    assert_eq!(names(&arena, &binder, loops[0]), vec!["k", "v"]);
    assert_eq!(names(&arena, &binder, loops[1]), vec!["v"]);
    assert_eq!(names(&arena, &binder, loops[2]), vec!["k"]);
    assert!(names(&arena, &binder, loops[3]).is_empty());
}

#[test]
fn test_counting_loop_shapes() {
    let source = r#"package p

func next() int { return 0 }

func f() {
	for i, j := 0, 10; i < j; i, j = i+1, j-1 {
	}
	var n int
	for n = 0; n < 3; n++ {
	}
	for n < 3 {
		n++
	}
	for next(); n < 3; n++ {
	}
	for n += 1; n < 3; n++ {
	}
}
"#;
    let (arena, root, binder) = parse_and_bind(source);
    let loops = collect_loops(&arena, root);
    assert_eq!(names(&arena, &binder, loops[0]), vec!["i", "j"]);
    assert_eq!(names(&arena, &binder, loops[1]), vec!["n"]);
    assert!(names(&arena, &binder, loops[2]).is_empty());
    assert!(names(&arena, &binder, loops[3]).is_empty());
    assert!(names(&arena, &binder, loops[4]).is_empty());
}

#[test]
fn test_range_with_assignment_targets() {
    let source = r#"package p

type holder struct{ key string }

func f(m map[string]int, h *holder) {
	var total int
	for h.key, total = range m {
	}
	counts := map[string]int{}
	for k := range m {
		for counts[k] = range []int{1} {
		}
	}
	_ = total
}
"#;
    let (arena, root, binder) = parse_and_bind(source);
    let loops = collect_loops(&arena, root);
    assert_eq!(names(&arena, &binder, loops[0]), vec!["key", "total"]);
    // Index expressions bind nothing.
    assert!(names(&arena, &binder, loops[2]).is_empty());
}

#[test]
fn test_loop_body_is_block() {
    let source = r#"package p

func f() {
	for i := 0; i < 1; i++ {
	}
}
"#;
    let (arena, root, _) = parse_and_bind(source);
    let loop_idx = collect_loops(&arena, root)[0];
    let body = loop_body(&arena, loop_idx).expect("loop has a body");
    assert_eq!(arena.kind(body), Some(BLOCK));
    assert!(loop_body(&arena, body).is_err());
}

#[test]
fn test_enclosing_test_function() {
    let source = r#"package p

import "testing"

type suite struct{}

func (suite) TestMethod(t *testing.T) {
	for range []int{} {
	}
}

func TestTop(t *testing.T) {
	func() {
		for range []int{} {
		}
	}()
}

func helper() {
	for range []int{} {
	}
}

var _ = func() int {
	for range []int{} {
	}
	return 0
}()
"#;
    let (arena, root, _) = parse_and_bind(source);
    let loops = collect_loops(&arena, root);
    let in_test: Vec<bool> = loops
        .iter()
        .map(|&idx| is_in_test_function(&arena, idx))
        .collect();
    assert_eq!(in_test, vec![false, true, false, false]);
    assert!(enclosing_function_declaration(&arena, loops[3]).is_none());
    assert!(enclosing_function_declaration(&arena, loops[1]).is_some());
}
