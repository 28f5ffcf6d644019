use crate::reporter::Reporter;
use looplint_common::Diagnostic;
use looplint_common::diagnostics::diagnostic_codes;
use rustc_hash::FxHashMap;
use serde_json::Value;

const SOURCE: &str = "package p\n\nfunc f() {\n\tuse(tc)\n}\n";

fn reporter(color: bool) -> Reporter {
    let mut sources = FxHashMap::default();
    sources.insert("p/a_test.go".to_string(), SOURCE.to_string());
    Reporter::with_sources(color, sources)
}

fn capture_at(offset: u32) -> Diagnostic {
    Diagnostic::from_code(
        "p/a_test.go".to_string(),
        offset,
        2,
        diagnostic_codes::LOOP_VARIABLE_CAPTURED_IN_PARALLEL_TEST,
        &["tc"],
    )
}

#[test]
fn test_text_output_uses_one_based_line_and_column() {
    let offset = SOURCE.find("tc)").expect("needle") as u32;
    let output = reporter(false).render(&[capture_at(offset)]);
    assert!(output.starts_with("p/a_test.go:4:6: loop variable `tc` used directly"));
    assert!(output.ends_with('\n'));
    assert_eq!(output.lines().count(), 1);
}

#[test]
fn test_syntax_errors_are_labelled() {
    let diag = Diagnostic::from_code(
        "p/a_test.go".to_string(),
        0,
        1,
        diagnostic_codes::EXPECTED_TOKEN,
        &["'}'"],
    );
    let output = reporter(false).format_diagnostic(&diag);
    assert!(output.starts_with("p/a_test.go:1:1: syntax error: "));
}

#[test]
fn test_pretty_output_includes_snippet() {
    let offset = SOURCE.find("tc)").expect("needle") as u32;
    let output = reporter(true).format_diagnostic(&capture_at(offset));
    assert!(output.contains("use(tc)"));
    assert!(output.contains("^^"));
}

#[test]
fn test_unknown_file_falls_back_to_name() {
    let mut diag = capture_at(0);
    diag.file = "missing/nowhere.go".to_string();
    let output = Reporter::new(false).format_diagnostic(&diag);
    assert!(output.starts_with("missing/nowhere.go: "));
}

#[test]
fn test_json_output_shape() {
    let offset = SOURCE.find("tc)").expect("needle") as u32;
    let json = reporter(false)
        .render_json(&[capture_at(offset)])
        .expect("serializes");
    let value: Value = serde_json::from_str(&json).expect("valid json");
    let findings = &value["p/a_test.go"]["gotestlooplint"];
    assert_eq!(findings.as_array().map(Vec::len), Some(1));
    assert_eq!(findings[0]["posn"], "p/a_test.go:4:6");
    assert!(
        findings[0]["message"]
            .as_str()
            .is_some_and(|message| message.starts_with("loop variable `tc`"))
    );
}

#[test]
fn test_json_output_for_no_findings_is_empty_object() {
    let json = reporter(false).render_json(&[]).expect("serializes");
    assert_eq!(json, "{}");
}
