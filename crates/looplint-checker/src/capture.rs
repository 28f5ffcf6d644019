//! Capture checking: loop variables referenced inside a closure.

use crate::error::LintFault;
use crate::loop_vars::LoopVariableSet;
use crate::provider::SymbolProvider;
use crate::walk::{WalkControl, try_walk_preorder};
use looplint_common::diagnostics::diagnostic_codes;
use looplint_parser::parser::syntax_kind_ext::IDENTIFIER;
use looplint_parser::{NodeAccess, NodeArena, NodeIndex};

/// Which hazard a closure was matched for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CapturePattern {
    ParallelSubtest,
    SpecRegistration,
}

impl CapturePattern {
    pub fn code(self) -> u32 {
        match self {
            CapturePattern::ParallelSubtest => {
                diagnostic_codes::LOOP_VARIABLE_CAPTURED_IN_PARALLEL_TEST
            }
            CapturePattern::SpecRegistration => diagnostic_codes::LOOP_VARIABLE_CAPTURED_IN_GINKGO_IT,
        }
    }
}

/// Which part of the closure counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PositionFilter {
    None,
    /// Only nodes starting after this offset; everything up to and including
    /// the marker call runs before the closure yields.
    After(u32),
}

impl PositionFilter {
    #[inline]
    fn admits(self, pos: u32) -> bool {
        match self {
            PositionFilter::None => true,
            PositionFilter::After(marker) => pos > marker,
        }
    }
}

/// One identifier that refers to a loop variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedReference {
    pub ident: NodeIndex,
    pub name: String,
    pub pos: u32,
    pub end: u32,
}

/// Every identifier in `closure` (document order) that the provider resolves
/// to one of `loop_vars`.
///
/// A node rejected by `filter` is not itself checked, but its children still
/// are.
pub fn check_captures(
    arena: &NodeArena,
    provider: &dyn SymbolProvider,
    closure: NodeIndex,
    loop_vars: &LoopVariableSet,
    filter: PositionFilter,
) -> Result<Vec<CapturedReference>, LintFault> {
    let mut captured = Vec::new();
    if loop_vars.is_empty() {
        return Ok(captured);
    }
    try_walk_preorder(arena, closure, |idx, node| {
        if !filter.admits(node.pos) || node.kind != IDENTIFIER {
            return Ok(WalkControl::Continue);
        }
        let is_loop_variable = provider
            .symbol_of(arena, idx)
            .is_some_and(|symbol| loop_vars.contains(&symbol));
        if !is_loop_variable {
            return Ok(WalkControl::Continue);
        }
        let name = arena
            .get_identifier_text(idx)
            .ok_or_else(|| LintFault::missing("identifier", idx))?;
        captured.push(CapturedReference {
            ident: idx,
            name: name.to_string(),
            pos: node.pos,
            end: node.end,
        });
        Ok(WalkControl::SkipChildren)
    })?;
    Ok(captured)
}
