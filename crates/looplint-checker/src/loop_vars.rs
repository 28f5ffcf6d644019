//! Loop variable extraction.

use crate::error::LintFault;
use crate::provider::SymbolProvider;
use looplint_binder::SymbolId;
use looplint_parser::parser::syntax_kind_ext::*;
use looplint_parser::{NodeAccess, NodeArena, NodeIndex};
use looplint_scanner::SyntaxKind;
use smallvec::SmallVec;

/// Symbols bound by one loop header.
pub type LoopVariableSet = SmallVec<[SymbolId; 2]>;

/// Variables bound by a loop header: the assigned names of a three-clause
/// loop's init statement, or the key and value of a range clause.
///
/// Blank identifiers and names the provider cannot resolve are skipped, and
/// header shapes other than those above bind nothing.
pub fn extract_loop_variables(
    arena: &NodeArena,
    provider: &dyn SymbolProvider,
    loop_idx: NodeIndex,
) -> Result<LoopVariableSet, LintFault> {
    let node = arena
        .get(loop_idx)
        .ok_or_else(|| LintFault::missing("loop", loop_idx))?;
    let mut variables = LoopVariableSet::new();

    match node.kind {
        FOR_STATEMENT => {
            let data = arena
                .get_for_statement(node)
                .ok_or_else(|| LintFault::missing("for statement", loop_idx))?;
            let Some(init) = arena.get(data.init) else {
                return Ok(variables);
            };
            if init.kind != ASSIGNMENT_STATEMENT {
                return Ok(variables);
            }
            let assign = arena
                .get_assignment(init)
                .ok_or_else(|| LintFault::missing("assignment", data.init))?;
            let binds = assign.operator == SyntaxKind::ColonEqualsToken as u16
                || assign.operator == SyntaxKind::EqualsToken as u16;
            if !binds {
                return Ok(variables);
            }
            for target in assign.left.iter() {
                push_binding(arena, provider, target, &mut variables);
            }
        }
        RANGE_STATEMENT => {
            let data = arena
                .get_range_statement(node)
                .ok_or_else(|| LintFault::missing("range statement", loop_idx))?;
            push_binding(arena, provider, data.key, &mut variables);
            push_binding(arena, provider, data.value, &mut variables);
        }
        other => return Err(LintFault::unexpected("loop statement", other)),
    }

    Ok(variables)
}

fn push_binding(
    arena: &NodeArena,
    provider: &dyn SymbolProvider,
    target: NodeIndex,
    variables: &mut LoopVariableSet,
) {
    if let Some(symbol) = binding_symbol(arena, provider, target)
        && !variables.contains(&symbol)
    {
        variables.push(symbol);
    }
}

/// `x` resolves directly; `s.x` resolves through its trailing name.
fn binding_symbol(
    arena: &NodeArena,
    provider: &dyn SymbolProvider,
    target: NodeIndex,
) -> Option<SymbolId> {
    let node = arena.get(target)?;
    let ident = match node.kind {
        IDENTIFIER => target,
        SELECTOR_EXPRESSION => arena.get_selector_expr(node)?.name,
        _ => return None,
    };
    if arena.get_identifier_text(ident)? == "_" {
        return None;
    }
    provider.symbol_of(arena, ident)
}

/// Body block of a loop.
pub fn loop_body(arena: &NodeArena, loop_idx: NodeIndex) -> Result<NodeIndex, LintFault> {
    let node = arena
        .get(loop_idx)
        .ok_or_else(|| LintFault::missing("loop", loop_idx))?;
    match node.kind {
        FOR_STATEMENT => arena
            .get_for_statement(node)
            .map(|data| data.body)
            .ok_or_else(|| LintFault::missing("for statement", loop_idx)),
        RANGE_STATEMENT => arena
            .get_range_statement(node)
            .map(|data| data.body)
            .ok_or_else(|| LintFault::missing("range statement", loop_idx)),
        other => Err(LintFault::unexpected("loop statement", other)),
    }
}
