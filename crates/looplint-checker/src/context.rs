//! Per-file checker context and options.

use crate::provider::SymbolProvider;
use looplint_common::Diagnostic;
use looplint_parser::NodeArena;

/// Rule options.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LintOptions {
    /// Only check loops whose enclosing function declaration is a top-level
    /// `Test...` function. Loops anywhere else (helpers, methods, package
    /// level `var _ = Describe(...)` blocks) are skipped.
    pub test_functions_only: bool,
}

/// Shared state for checking one file.
pub struct CheckerContext<'a> {
    pub arena: &'a NodeArena,
    pub provider: &'a dyn SymbolProvider,
    pub file_name: String,
    pub options: LintOptions,
    /// Findings in discovery order.
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> CheckerContext<'a> {
    pub fn new(
        arena: &'a NodeArena,
        provider: &'a dyn SymbolProvider,
        file_name: String,
        options: LintOptions,
    ) -> CheckerContext<'a> {
        CheckerContext {
            arena,
            provider,
            file_name,
            options,
            diagnostics: Vec::new(),
        }
    }
}
