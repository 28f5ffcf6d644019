//! Ginkgo `It` capture tests.

use crate::test_utils::*;

#[test]
fn test_dot_imported_it_reports_every_reference() {
    let source = r#"package p

import (
	. "github.com/onsi/ginkgo/v2"
	. "github.com/onsi/gomega"
)

type testCase struct{ want int }

var _ = Describe("suite", func() {
	cases := []testCase{{want: 1}}
	for _, tc := range cases {
		It("desc", func() {
			Expect(tc.want).To(Equal(1))
			Expect(tc).NotTo(BeNil())
		})
	}
})
"#;
    let diagnostics = lint(source);
    assert_eq!(codes(&diagnostics), vec![GINKGO, GINKGO]);
    assert_eq!(diagnostics[0].message_text, ginkgo_message("tc"));
    assert_eq!(diagnostics[0].start, offset_of(source, "tc.want", 0));
    assert_eq!(diagnostics[1].start, offset_of(source, "tc)", 0));
}

#[test]
fn test_qualified_ginkgo_it() {
    let source = r#"package p

import "github.com/onsi/ginkgo/v2"

var _ = ginkgo.Describe("suite", func() {
	for _, name := range []string{"a", "b"} {
		ginkgo.It(name, func() {
			println(name)
		})
	}
})
"#;
    let diagnostics = lint(source);
    assert_eq!(codes(&diagnostics), vec![GINKGO]);
    // The description argument is evaluated during the loop.
    assert_eq!(diagnostics[0].start, offset_of(source, "name)", 0));
}

#[test]
fn test_aliased_legacy_ginkgo_import() {
    let source = r#"package p

import g "github.com/onsi/ginkgo"

var _ = g.Describe("suite", func() {
	for i := 0; i < 2; i++ {
		g.It("spec", func() {
			println(i)
		})
	}
})
"#;
    let diagnostics = lint(source);
    assert_eq!(codes(&diagnostics), vec![GINKGO]);
    assert_eq!(diagnostics[0].message_text, ginkgo_message("i"));
}

#[test]
fn test_position_does_not_matter_for_specs() {
    let source = r#"package p

import . "github.com/onsi/ginkgo/v2"

var _ = Describe("suite", func() {
	for _, tc := range []int{1} {
		It("spec", func() {
			first := tc
			GinkgoT().Parallel()
			println(first, tc)
		})
	}
})
"#;
    assert_eq!(codes(&lint(source)), vec![GINKGO, GINKGO]);
}

#[test]
fn test_unrelated_it_function_is_ignored() {
    let source = r#"package p

func It(name string, body func()) {}

func register() {
	for _, tc := range []int{1} {
		It("spec", func() {
			println(tc)
		})
	}
}
"#;
    assert!(lint(source).is_empty());
}

#[test]
fn test_it_from_other_package_is_ignored() {
    let source = r#"package p

import spec "example.com/spec"

func register() {
	for _, tc := range []int{1} {
		spec.It("spec", func() {
			println(tc)
		})
	}
}
"#;
    assert!(lint(source).is_empty());
}

#[test]
fn test_shadowed_spec_variable_is_not_reported() {
    let source = r#"package p

import . "github.com/onsi/ginkgo/v2"

var _ = Describe("suite", func() {
	for _, tc := range []int{1} {
		tc := tc
		It("spec", func() {
			println(tc)
		})
	}
})
"#;
    assert!(lint(source).is_empty());
}

#[test]
fn test_it_without_closure_argument() {
    let source = r#"package p

import . "github.com/onsi/ginkgo/v2"

func body() {}

var _ = Describe("suite", func() {
	for _, tc := range []int{1} {
		It("spec", body)
		_ = tc
	}
})
"#;
    assert!(lint(source).is_empty());
}

#[test]
fn test_spec_and_subtest_in_same_loop() {
    let source = r#"package p

import (
	"testing"

	"github.com/onsi/ginkgo/v2"
)

func TestMixed(t *testing.T) {
	for _, tc := range []string{"a"} {
		t.Run(tc, func(t *testing.T) {
			t.Parallel()
			t.Log(tc)
		})
		ginkgo.It(tc, func() {
			println(tc)
		})
	}
}
"#;
    let diagnostics = lint(source);
    assert_eq!(codes(&diagnostics), vec![PARALLEL, GINKGO]);
}
