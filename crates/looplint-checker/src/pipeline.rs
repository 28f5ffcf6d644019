//! Parse, bind and check one file.

use crate::context::LintOptions;
use crate::state::LoopLintState;
use looplint_binder::BinderState;
use looplint_common::Diagnostic;
use looplint_parser::ParserState;

/// Lint one Go source file.
///
/// A file with syntax errors yields those errors and is not checked further.
#[tracing::instrument(level = "debug", skip(source, options), fields(bytes = source.len()))]
pub fn lint_source(file_name: &str, source: &str, options: &LintOptions) -> Vec<Diagnostic> {
    let mut parser = ParserState::new(file_name.to_string(), source.to_string());
    let root = parser.parse_source_file();
    let parse_diagnostics = parser.get_diagnostics();
    if !parse_diagnostics.is_empty() {
        tracing::debug!(errors = parse_diagnostics.len(), "syntax errors, skipping checks");
        return parse_diagnostics
            .into_iter()
            .map(|diag| {
                Diagnostic::error(
                    file_name.to_string(),
                    diag.start,
                    diag.length,
                    diag.message,
                    diag.code,
                )
            })
            .collect();
    }

    let arena = parser.into_arena();
    let mut binder = BinderState::new();
    binder.bind_source_file(&arena, root);

    let mut checker = LoopLintState::new(&arena, &binder, file_name.to_string(), options.clone());
    checker.check_source_file(root);
    checker.into_diagnostics()
}
