use crate::context::LintOptions;
use crate::test_utils::*;

fn test_functions_only() -> LintOptions {
    LintOptions {
        test_functions_only: true,
    }
}

const MIXED_SCOPES: &str = r#"package p

import (
	"testing"

	. "github.com/onsi/ginkgo/v2"
)

type suite struct{}

func runAll(t *testing.T, cases []string) {
	for _, helperCase := range cases {
		t.Run(helperCase, func(t *testing.T) {
			t.Parallel()
			t.Log(helperCase)
		})
	}
}

func (suite) TestMethod(t *testing.T) {
	for _, methodCase := range []string{"m"} {
		t.Run(methodCase, func(t *testing.T) {
			t.Parallel()
			t.Log(methodCase)
		})
	}
}

func TestTop(t *testing.T) {
	check := func() {
		for _, topCase := range []string{"t"} {
			t.Run(topCase, func(t *testing.T) {
				t.Parallel()
				t.Log(topCase)
			})
		}
	}
	check()
}

var _ = Describe("suite", func() {
	for _, specCase := range []string{"s"} {
		It(specCase, func() {
			_ = specCase
		})
	}
})
"#;

#[test]
fn test_default_checks_every_loop() {
    let diagnostics = lint(MIXED_SCOPES);
    let messages: Vec<&str> = diagnostics.iter().map(|d| d.message_text.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            parallel_message("helperCase"),
            parallel_message("methodCase"),
            parallel_message("topCase"),
            ginkgo_message("specCase"),
        ]
    );
}

#[test]
fn test_functions_only_keeps_loops_in_top_level_tests() {
    let diagnostics = lint_with(MIXED_SCOPES, &test_functions_only());
    assert_eq!(codes(&diagnostics), vec![PARALLEL]);
    assert_eq!(diagnostics[0].message_text, parallel_message("topCase"));
}

#[test]
fn test_functions_only_does_not_change_findings_inside_tests() {
    let source = r#"package p

import "testing"

func TestX(t *testing.T) {
	for i := 0; i < 2; i++ {
		t.Run("n", func(t *testing.T) {
			t.Parallel()
			t.Log(i)
		})
	}
}
"#;
    assert_eq!(lint(source), lint_with(source, &test_functions_only()));
}

#[test]
fn test_options_default_is_broad_scan() {
    assert!(!LintOptions::default().test_functions_only);
}
