//! Locating `t.Parallel()` inside a subtest closure.

use crate::PARALLEL_METHOD;
use crate::call_matchers::{CalleeRef, classify_callee};
use crate::error::LintFault;
use crate::provider::SymbolProvider;
use crate::walk::{WalkControl, try_walk_preorder};
use looplint_binder::SymbolId;
use looplint_parser::parser::syntax_kind_ext::*;
use looplint_parser::{NodeAccess, NodeArena, NodeIndex};

/// Start offset of the first `param.Parallel()` in `closure`'s body, where
/// `param` is the closure's own first parameter.
///
/// Calls on any other receiver, including the enclosing test's `t`, do not
/// count. `None` if the closure has no named first parameter or never calls
/// `Parallel()` on it.
pub fn find_parallel_marker(
    arena: &NodeArena,
    provider: &dyn SymbolProvider,
    closure: NodeIndex,
) -> Result<Option<u32>, LintFault> {
    let func = arena
        .get(closure)
        .and_then(|n| arena.get_function(n))
        .ok_or_else(|| LintFault::missing("function literal", closure))?;
    let Some(param) = first_parameter_symbol(arena, provider, &func.parameters) else {
        return Ok(None);
    };

    let mut marker = None;
    try_walk_preorder(arena, func.body, |idx, node| {
        if node.kind != CALL_EXPRESSION {
            return Ok(WalkControl::Continue);
        }
        let call = arena
            .get_call_expr(node)
            .ok_or_else(|| LintFault::missing("call expression", idx))?;
        if let Some(CalleeRef::Qualified {
            qualifier, name, ..
        }) = classify_callee(arena, call)
            && name == PARALLEL_METHOD
            && call.arguments.is_empty()
            && arena.kind(qualifier) == Some(IDENTIFIER)
            && provider.symbol_of(arena, qualifier) == Some(param)
        {
            marker = Some(node.pos);
            return Ok(WalkControl::Stop);
        }
        Ok(WalkControl::Continue)
    })?;
    Ok(marker)
}

fn first_parameter_symbol(
    arena: &NodeArena,
    provider: &dyn SymbolProvider,
    parameters: &looplint_parser::NodeList,
) -> Option<SymbolId> {
    let first = parameters.get(0)?;
    let field = arena.get(first).and_then(|n| arena.get_field(n))?;
    let name = field.names.get(0)?;
    if arena.get_identifier_text(name)? == "_" {
        return None;
    }
    provider.symbol_of(arena, name)
}
