//! `t.Run` + `t.Parallel()` capture tests.

use crate::test_utils::*;

#[test]
fn test_loop_without_subtest_is_clean() {
    let source = r#"package p

import "testing"

func TestX(t *testing.T) {
	for _, v := range []int{1, 2} {
		go func() { println(v) }()
	}
	for i := 0; i < 3; i++ {
		defer func() { println(i) }()
	}
}
"#;
    assert!(lint(source).is_empty());
}

#[test]
fn test_run_without_parallel_is_clean() {
    let source = r#"package p

import "testing"

func TestX(t *testing.T) {
	for _, tc := range []string{"a", "b"} {
		t.Run(tc, func(t *testing.T) {
			if tc == "" {
				t.Fatal(tc)
			}
			t.Log(tc, tc)
		})
	}
}
"#;
    assert!(lint(source).is_empty());
}

#[test]
fn test_reference_after_parallel_is_reported() {
    let source = r#"package p

import "testing"

func use(v int) {}

func TestX(t *testing.T) {
	items := []int{1, 2}
	for i, v := range items {
		t.Run("name", func(t *testing.T) {
			t.Parallel()
			use(v)
		})
		_ = i
	}
}
"#;
    let diagnostics = lint(source);
    assert_eq!(diagnostics.len(), 1, "{diagnostics:?}");
    let diag = &diagnostics[0];
    assert_eq!(diag.code, PARALLEL);
    assert_eq!(diag.message_text, parallel_message("v"));
    assert_eq!(diag.start, offset_of(source, "use(v)", 0) + 4);
    assert_eq!(diag.length, 1);
    assert_eq!(diag.file, "loop_test.go");
}

#[test]
fn test_references_before_parallel_are_not_reported() {
    let source = r#"package p

import "testing"

func TestX(t *testing.T) {
	for _, tc := range []string{"a"} {
		t.Run(tc, func(t *testing.T) {
			name := tc
			t.Parallel()
			t.Log(name, tc)
			t.Log(tc)
		})
	}
}
"#;
    let diagnostics = lint(source);
    assert_eq!(codes(&diagnostics), vec![PARALLEL, PARALLEL]);
    assert_eq!(diagnostics[0].start, offset_of(source, "tc)", 0));
    assert_eq!(diagnostics[1].start, offset_of(source, "tc)", 1));
    // The first argument of Run is outside the closure.
    assert!(diagnostics.iter().all(|d| d.start > offset_of(source, "t.Parallel()", 0)));
}

#[test]
fn test_shadowing_copy_is_not_reported() {
    let source = r#"package p

import "testing"

func use(v int) {}

func TestX(t *testing.T) {
	items := []int{1, 2}
	for i, v := range items {
		_ = i
		t.Run("name", func(t *testing.T) {
			v := v
			t.Parallel()
			use(v)
		})
	}
}
"#;
    assert!(lint(source).is_empty());
}

#[test]
fn test_outer_copy_is_not_reported() {
    let source = r#"package p

import "testing"

func TestX(t *testing.T) {
	for _, tc := range []string{"a"} {
		tc := tc
		t.Run(tc, func(t *testing.T) {
			t.Parallel()
			t.Log(tc)
		})
	}
}
"#;
    assert!(lint(source).is_empty());
}

#[test]
fn test_key_and_value_tracked_independently() {
    let source = r#"package p

import "testing"

func TestX(t *testing.T) {
	for name, want := range map[string]int{"a": 1} {
		t.Run(name, func(t *testing.T) {
			t.Parallel()
			if len(name) != want {
				t.Error(name, want)
			}
		})
	}
}
"#;
    let diagnostics = lint(source);
    let messages: Vec<&str> = diagnostics.iter().map(|d| d.message_text.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            parallel_message("name"),
            parallel_message("want"),
            parallel_message("name"),
            parallel_message("want"),
        ]
    );
}

#[test]
fn test_counting_loop_variable() {
    let source = r#"package p

import "testing"

func TestX(t *testing.T) {
	for i := 0; i < 3; i++ {
		t.Run("n", func(t *testing.T) {
			t.Parallel()
			t.Log(i)
		})
	}
}
"#;
    let diagnostics = lint(source);
    assert_eq!(codes(&diagnostics), vec![PARALLEL]);
    assert_eq!(diagnostics[0].message_text, parallel_message("i"));
}

#[test]
fn test_counting_loop_with_plain_assignment_init() {
    let source = r#"package p

import "testing"

func TestX(t *testing.T) {
	var i int
	for i = 0; i < 3; i++ {
		t.Run("n", func(t *testing.T) {
			t.Parallel()
			t.Log(i)
		})
	}
}
"#;
    assert_eq!(codes(&lint(source)), vec![PARALLEL]);
}

#[test]
fn test_selector_initializer_resolves_through_field() {
    let source = r#"package p

import "testing"

type state struct{ i int }

func TestX(t *testing.T) {
	s := &state{}
	for s.i = 0; s.i < 3; s.i++ {
		t.Run("n", func(t *testing.T) {
			t.Parallel()
			t.Log(s.i)
		})
	}
}
"#;
    let diagnostics = lint(source);
    assert_eq!(codes(&diagnostics), vec![PARALLEL]);
    assert_eq!(diagnostics[0].message_text, parallel_message("i"));
    assert_eq!(diagnostics[0].start, offset_of(source, "s.i)", 0) + 2);
}

#[test]
fn test_run_on_benchmark_receiver_is_ignored() {
    let source = r#"package p

import "testing"

func BenchmarkX(b *testing.B) {
	for _, n := range []int{1, 2} {
		b.Run("n", func(b *testing.B) {
			b.Parallel()
			_ = n
		})
	}
}
"#;
    assert!(lint(source).is_empty());
}

#[test]
fn test_run_on_unrelated_type_is_ignored() {
    let source = r#"package p

import "testing"

type runner struct{}

func (runner) Run(name string, fn func(t *testing.T)) {}

func TestX(t *testing.T) {
	r := runner{}
	for _, n := range []int{1, 2} {
		r.Run("n", func(t *testing.T) {
			t.Parallel()
			_ = n
		})
	}
}
"#;
    assert!(lint(source).is_empty());
}

#[test]
fn test_outer_parallel_call_is_not_the_marker() {
    let source = r#"package p

import "testing"

func TestX(t *testing.T) {
	outer := t
	for _, n := range []int{1, 2} {
		t.Run("n", func(st *testing.T) {
			outer.Parallel()
			st.Log(n)
		})
	}
}
"#;
    assert!(lint(source).is_empty());
}

#[test]
fn test_parallel_with_arguments_is_not_the_marker() {
    let source = r#"package p

import "testing"

func TestX(t *testing.T) {
	for _, n := range []int{1, 2} {
		t.Run("n", func(t *testing.T) {
			t.Parallel(true)
			t.Log(n)
		})
	}
}
"#;
    assert!(lint(source).is_empty());
}

#[test]
fn test_unnamed_closure_parameter_has_no_marker() {
    let source = r#"package p

import "testing"

func TestX(t *testing.T) {
	for _, n := range []int{1, 2} {
		t.Run("n", func(*testing.T) {
			t.Parallel()
			t.Log(n)
		})
	}
}
"#;
    assert!(lint(source).is_empty());
}

#[test]
fn test_closure_from_variable_is_not_checked() {
    let source = r#"package p

import "testing"

func TestX(t *testing.T) {
	for _, n := range []int{1, 2} {
		body := func(t *testing.T) {
			t.Parallel()
			t.Log(n)
		}
		t.Run("n", body)
	}
}
"#;
    assert!(lint(source).is_empty());
}

#[test]
fn test_only_first_run_call_is_checked() {
    let source = r#"package p

import "testing"

func TestX(t *testing.T) {
	for _, n := range []int{1, 2} {
		t.Run("first", func(t *testing.T) {
			t.Log(n)
		})
		t.Run("second", func(t *testing.T) {
			t.Parallel()
			t.Log(n)
		})
	}
}
"#;
    assert!(lint(source).is_empty());
}

#[test]
fn test_single_argument_run_is_not_a_fault() {
    let source = r#"package p

import (
	"testing"

	. "github.com/onsi/ginkgo/v2"
)

func TestX(t *testing.T) {
	for _, tc := range []string{"a"} {
		t.Run("name")
		It("spec", func() {
			_ = tc
		})
	}
}
"#;
    let diagnostics = lint(source);
    assert_eq!(codes(&diagnostics), vec![GINKGO]);
    assert_eq!(diagnostics[0].message_text, ginkgo_message("tc"));
}

#[test]
fn test_nested_loops_report_against_their_own_variables() {
    let source = r#"package p

import "testing"

func TestX(t *testing.T) {
	for _, outer := range []int{1} {
		for _, inner := range []int{2} {
			t.Run("n", func(t *testing.T) {
				t.Parallel()
				t.Log(outer, inner)
			})
		}
	}
}
"#;
    let diagnostics = lint(source);
    // The outer loop's Run search reaches into the inner loop's body.
    let messages: Vec<&str> = diagnostics.iter().map(|d| d.message_text.as_str()).collect();
    assert_eq!(
        messages,
        vec![parallel_message("outer"), parallel_message("inner")]
    );
}

#[test]
fn test_loop_in_helper_is_checked_by_default() {
    let source = r#"package p

import "testing"

func runAll(t *testing.T, cases []string) {
	for _, tc := range cases {
		t.Run(tc, func(t *testing.T) {
			t.Parallel()
			t.Log(tc)
		})
	}
}
"#;
    assert_eq!(codes(&lint(source)), vec![PARALLEL]);
}
