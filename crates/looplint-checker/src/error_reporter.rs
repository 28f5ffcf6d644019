//! Diagnostic construction for findings and faults.

use crate::capture::{CapturePattern, CapturedReference};
use crate::error::LintFault;
use crate::state::LoopLintState;
use looplint_common::Diagnostic;
use looplint_common::diagnostics::diagnostic_codes;
use looplint_parser::{NodeAccess, NodeIndex};

impl LoopLintState<'_> {
    /// The name fills both placeholders of the template.
    pub(crate) fn capture_diagnostic(
        &self,
        pattern: CapturePattern,
        reference: &CapturedReference,
    ) -> Diagnostic {
        let name = reference.name.as_str();
        Diagnostic::from_code(
            self.ctx.file_name.clone(),
            reference.pos,
            reference.end.saturating_sub(reference.pos),
            pattern.code(),
            &[name],
        )
    }

    /// One `panic: ...` diagnostic spanning the loop keyword.
    pub(crate) fn report_fault(&mut self, loop_idx: NodeIndex, fault: &LintFault) {
        let start = self
            .ctx
            .arena
            .pos_end(loop_idx)
            .map_or(0, |(pos, _)| pos);
        let message = fault.to_string();
        self.ctx.diagnostics.push(Diagnostic::from_code(
            self.ctx.file_name.clone(),
            start,
            "for".len() as u32,
            diagnostic_codes::LOOP_CHECK_PANICKED,
            &[message.as_str()],
        ));
    }
}
