//! Per-file driver of the rule.

use crate::call_matchers::{closure_argument, find_spec_call, find_subtest_call};
use crate::capture::{CapturePattern, PositionFilter, check_captures};
use crate::context::{CheckerContext, LintOptions};
use crate::error::LintFault;
use crate::loop_scanner;
use crate::loop_vars::{LoopVariableSet, extract_loop_variables, loop_body};
use crate::parallel_marker::find_parallel_marker;
use crate::provider::SymbolProvider;
use looplint_common::Diagnostic;
use looplint_parser::{NodeArena, NodeIndex};
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

thread_local! {
    static CONTAINING_PANICS: Cell<bool> = const { Cell::new(false) };
}

static QUIET_PANIC_HOOK: Once = Once::new();

/// Whether the current thread is inside a guarded loop check.
pub(crate) fn containing_panics() -> bool {
    CONTAINING_PANICS.with(Cell::get)
}

/// Panics inside a guarded loop check become diagnostics, so the hook only
/// traces them. Panics anywhere else go to the previously installed hook.
fn install_quiet_panic_hook() {
    QUIET_PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if containing_panics() {
                tracing::debug!(%info, "contained panic in loop check");
                return;
            }
            previous(info);
        }));
    });
}

pub struct LoopLintState<'a> {
    pub ctx: CheckerContext<'a>,
}

impl<'a> LoopLintState<'a> {
    pub fn new(
        arena: &'a NodeArena,
        provider: &'a dyn SymbolProvider,
        file_name: String,
        options: LintOptions,
    ) -> LoopLintState<'a> {
        LoopLintState {
            ctx: CheckerContext::new(arena, provider, file_name, options),
        }
    }

    /// Check every loop under `root`, appending findings to
    /// `self.ctx.diagnostics`.
    pub fn check_source_file(&mut self, root: NodeIndex) {
        let _span = tracing::debug_span!("check_source_file", file = %self.ctx.file_name).entered();
        let loops = loop_scanner::collect_loops(self.ctx.arena, root);
        tracing::debug!(loops = loops.len(), "collected loops");

        for loop_idx in loops {
            if self.ctx.options.test_functions_only
                && !loop_scanner::is_in_test_function(self.ctx.arena, loop_idx)
            {
                tracing::trace!(loop_idx = loop_idx.0, "skipping loop outside test function");
                continue;
            }
            self.check_loop_guarded(loop_idx);
        }
    }

    /// A loop contributes either all of its findings or a single fault
    /// diagnostic, never a mix.
    fn check_loop_guarded(&mut self, loop_idx: NodeIndex) {
        install_quiet_panic_hook();
        let was_containing = CONTAINING_PANICS.replace(true);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.check_loop(loop_idx)));
        CONTAINING_PANICS.set(was_containing);
        let result = match outcome {
            Ok(result) => result,
            Err(payload) => Err(LintFault::from_panic(payload.as_ref())),
        };
        match result {
            Ok(findings) => self.ctx.diagnostics.extend(findings),
            Err(fault) => {
                tracing::debug!(loop_idx = loop_idx.0, %fault, "loop check faulted");
                self.report_fault(loop_idx, &fault);
            }
        }
    }

    fn check_loop(&self, loop_idx: NodeIndex) -> Result<Vec<Diagnostic>, LintFault> {
        let arena = self.ctx.arena;
        let loop_vars = extract_loop_variables(arena, self.ctx.provider, loop_idx)?;
        let body = loop_body(arena, loop_idx)?;
        tracing::trace!(loop_idx = loop_idx.0, variables = loop_vars.len(), "checking loop");

        let mut findings = Vec::new();
        self.check_parallel_subtest(body, &loop_vars, &mut findings)?;
        self.check_spec_registration(body, &loop_vars, &mut findings)?;
        Ok(findings)
    }

    fn check_parallel_subtest(
        &self,
        body: NodeIndex,
        loop_vars: &LoopVariableSet,
        findings: &mut Vec<Diagnostic>,
    ) -> Result<(), LintFault> {
        let arena = self.ctx.arena;
        let provider = self.ctx.provider;
        let Some(call) = find_subtest_call(arena, provider, body)? else {
            return Ok(());
        };
        let Some(closure) = closure_argument(arena, call)? else {
            return Ok(());
        };
        // Without Parallel() the subtest finishes before the next iteration.
        let Some(marker) = find_parallel_marker(arena, provider, closure)? else {
            return Ok(());
        };
        let captured = check_captures(
            arena,
            provider,
            closure,
            loop_vars,
            PositionFilter::After(marker),
        )?;
        findings.extend(
            captured
                .iter()
                .map(|reference| self.capture_diagnostic(CapturePattern::ParallelSubtest, reference)),
        );
        Ok(())
    }

    fn check_spec_registration(
        &self,
        body: NodeIndex,
        loop_vars: &LoopVariableSet,
        findings: &mut Vec<Diagnostic>,
    ) -> Result<(), LintFault> {
        let arena = self.ctx.arena;
        let provider = self.ctx.provider;
        let Some(call) = find_spec_call(arena, provider, body)? else {
            return Ok(());
        };
        let Some(closure) = closure_argument(arena, call)? else {
            return Ok(());
        };
        let captured = check_captures(arena, provider, closure, loop_vars, PositionFilter::None)?;
        findings.extend(
            captured
                .iter()
                .map(|reference| self.capture_diagnostic(CapturePattern::SpecRegistration, reference)),
        );
        Ok(())
    }

    pub fn get_diagnostics(&self) -> &[Diagnostic] {
        &self.ctx.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.ctx.diagnostics
    }
}
