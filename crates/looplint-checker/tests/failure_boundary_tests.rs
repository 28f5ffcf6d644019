//! A fault while checking one loop becomes a single diagnostic for that loop.

use crate::context::LintOptions;
use crate::error::LintFault;
use crate::provider::SymbolProvider;
use crate::state::{LoopLintState, containing_panics};
use crate::test_utils::*;
use looplint_binder::{BinderState, SymbolId};
use looplint_common::Diagnostic;
use looplint_parser::parser::syntax_kind_ext::BLOCK;
use looplint_parser::{NodeAccess, NodeArena, NodeIndex};

/// Delegates to the binder but panics when asked to resolve `trigger`.
struct FaultingProvider<'b> {
    inner: &'b BinderState,
    trigger: &'static str,
}

impl SymbolProvider for FaultingProvider<'_> {
    fn symbol_of(&self, arena: &NodeArena, ident: NodeIndex) -> Option<SymbolId> {
        if arena.get_identifier_text(ident) == Some(self.trigger) {
            // Uncontained panics would reach the default hook and stderr.
            assert!(containing_panics(), "panic outside a guarded loop check");
            panic!("cannot resolve {}", self.trigger);
        }
        self.inner.symbol_of(arena, ident)
    }

    fn declared_type(&self, symbol: SymbolId) -> Option<&str> {
        self.inner.declared_type(symbol)
    }

    fn package_path(&self, symbol: SymbolId) -> Option<&str> {
        self.inner.package_path(symbol)
    }
}

fn lint_faulting(source: &str, trigger: &'static str) -> Vec<Diagnostic> {
    let (arena, root, binder) = parse_and_bind(source);
    let provider = FaultingProvider {
        inner: &binder,
        trigger,
    };
    let mut state = LoopLintState::new(
        &arena,
        &provider,
        "loop_test.go".to_string(),
        LintOptions::default(),
    );
    state.check_source_file(root);
    state.into_diagnostics()
}

const TWO_LOOPS: &str = r#"package p

import "testing"

func TestX(t *testing.T) {
	boom := 0
	for _, first := range []int{1} {
		t.Run("a", func(t *testing.T) {
			t.Parallel()
			t.Log(first)
			t.Log(boom)
		})
	}
	for _, second := range []int{2} {
		t.Run("b", func(t *testing.T) {
			t.Parallel()
			t.Log(second)
		})
	}
}
"#;

#[test]
fn test_fault_discards_partial_findings_of_the_loop() {
    let diagnostics = lint_faulting(TWO_LOOPS, "boom");
    assert_eq!(codes(&diagnostics), vec![PANICKED, PARALLEL]);

    let fault = &diagnostics[0];
    assert_eq!(fault.message_text, "panic: cannot resolve boom");
    assert_eq!(fault.start, offset_of(TWO_LOOPS, "for", 0));
    assert_eq!(fault.length, 3);

    assert_eq!(diagnostics[1].message_text, parallel_message("second"));
}

#[test]
fn test_same_file_without_fault_reports_both_loops() {
    let diagnostics = lint(TWO_LOOPS);
    let messages: Vec<&str> = diagnostics.iter().map(|d| d.message_text.as_str()).collect();
    assert_eq!(
        messages,
        vec![parallel_message("first"), parallel_message("second")]
    );
}

#[test]
fn test_panic_containment_ends_with_the_loop_check() {
    assert!(!containing_panics());
    let diagnostics = lint_faulting(TWO_LOOPS, "boom");
    assert_eq!(codes(&diagnostics), vec![PANICKED, PARALLEL]);
    assert!(!containing_panics());

    // Panics after a check still reach the regular hook and unwind normally.
    let outside = std::panic::catch_unwind(|| panic!("outside"));
    assert!(outside.is_err());
    assert!(!containing_panics());
}

#[test]
fn test_fault_in_loop_header_is_contained() {
    let source = r#"package p

func f() {
	for boom := 0; boom < 1; boom++ {
	}
	for i := 0; i < 1; i++ {
	}
}
"#;
    let diagnostics = lint_faulting(source, "boom");
    assert_eq!(codes(&diagnostics), vec![PANICKED]);
    assert_eq!(diagnostics[0].start, offset_of(source, "for", 0));
}

#[test]
fn test_one_fault_per_loop() {
    let source = r#"package p

import . "github.com/onsi/ginkgo/v2"

var _ = Describe("suite", func() {
	for _, boom := range []int{1} {
		It("a", func() {})
	}
	for _, x := range []int{1} {
		for _, boom := range []int{2} {
			_ = x
		}
	}
})
"#;
    let diagnostics = lint_faulting(source, "boom");
    let starts: Vec<u32> = diagnostics.iter().map(|d| d.start).collect();
    assert_eq!(codes(&diagnostics), vec![PANICKED, PANICKED]);
    assert_eq!(
        starts,
        vec![offset_of(source, "for", 0), offset_of(source, "for", 2)]
    );
}

#[test]
fn test_fault_messages() {
    let missing = LintFault::missing("for statement", NodeIndex(7));
    assert_eq!(missing.to_string(), "for statement has no data for node 7");

    let unexpected = LintFault::unexpected("loop statement", BLOCK);
    assert!(unexpected.to_string().starts_with("expected loop statement, found "));

    let static_payload: Box<dyn std::any::Any + Send> = Box::new("index out of range");
    assert_eq!(
        LintFault::from_panic(static_payload.as_ref()),
        LintFault::Panic("index out of range".to_string())
    );
    let owned_payload: Box<dyn std::any::Any + Send> = Box::new(String::from("owned"));
    assert_eq!(LintFault::from_panic(owned_payload.as_ref()).to_string(), "owned");
    let opaque_payload: Box<dyn std::any::Any + Send> = Box::new(42_u8);
    assert_eq!(
        LintFault::from_panic(opaque_payload.as_ref()).to_string(),
        "unknown panic"
    );
}
