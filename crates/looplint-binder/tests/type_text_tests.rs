use crate::binder_tests::{bind, idents};

/// Declared type of the first resolved `name`. The package clause name is
/// never bound, so a variable may share it.
fn declared_type(source: &str, name: &str) -> Option<String> {
    let (arena, root, binder) = bind(source);
    let id = idents(&arena, root, name)
        .into_iter()
        .find_map(|node| binder.get_node_symbol(node))?;
    binder.get_symbol(id)?.declared_type.clone()
}

#[test]
fn test_composite_type_text() {
    let source = r#"package p

import (
	"context"
	"net/http"
)

var (
	a map[string][]*http.Request
	b chan<- int
	c <-chan struct{}
	d func(context.Context, ...string) (int, error)
	e [4]byte
	f interface{}
	g func(x, y int) bool
	h struct {
		name string
		int
	}
	i interface{ Run(string) error }
)
"#;
    assert_eq!(
        declared_type(source, "a").as_deref(),
        Some("map[string][]*net/http.Request")
    );
    assert_eq!(declared_type(source, "b").as_deref(), Some("chan<- int"));
    assert_eq!(declared_type(source, "c").as_deref(), Some("<-chan struct{}"));
    assert_eq!(
        declared_type(source, "d").as_deref(),
        Some("func(context.Context, ...string) (int, error)")
    );
    assert_eq!(declared_type(source, "e").as_deref(), Some("[4]byte"));
    assert_eq!(declared_type(source, "f").as_deref(), Some("interface{}"));
    assert_eq!(declared_type(source, "g").as_deref(), Some("func(int, int) bool"));
    assert_eq!(
        declared_type(source, "h").as_deref(),
        Some("struct{name string; int}")
    );
    assert_eq!(
        declared_type(source, "i").as_deref(),
        Some("interface{Run(string) error}")
    );
}

#[test]
fn test_untyped_var_infers_from_initializer() {
    let source = r#"package p

import "testing"

var shared = &testing.T{}
var copied = shared
var count = 3
"#;
    assert_eq!(declared_type(source, "shared").as_deref(), Some("*testing.T"));
    assert_eq!(declared_type(source, "copied").as_deref(), Some("*testing.T"));
    assert_eq!(declared_type(source, "count"), None);
}

#[test]
fn test_local_var_declaration_type() {
    let source = r#"package p

import "testing"

func f() {
	var t *testing.T
	var tb testing.TB = t
	_, _ = t, tb
}
"#;
    assert_eq!(declared_type(source, "t").as_deref(), Some("*testing.T"));
    assert_eq!(declared_type(source, "tb").as_deref(), Some("testing.TB"));
}

#[test]
fn test_generic_instantiation_text() {
    let source = r#"package p

type Pair[K comparable, V any] struct {
	key K
	value V
}

func f(p Pair[string, int], q *Pair[int, []byte]) {}
"#;
    assert_eq!(declared_type(source, "p").as_deref(), Some("Pair[string, int]"));
    assert_eq!(declared_type(source, "q").as_deref(), Some("*Pair[int, []byte]"));
}

#[test]
fn test_package_clause_name_is_not_bound() {
    let source = r#"package p

type Pair[K comparable, V any] struct{}

func f(p Pair[string, int]) {}
"#;
    let (arena, root, binder) = bind(source);
    let occurrences = idents(&arena, root, "p");
    assert_eq!(occurrences.len(), 2);
    assert_eq!(binder.get_node_symbol(occurrences[0]), None);
    assert!(binder.get_node_symbol(occurrences[1]).is_some());
}
