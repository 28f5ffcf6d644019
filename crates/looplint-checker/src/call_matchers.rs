//! Recognition of `t.Run(...)` subtests and Ginkgo `It(...)` specs.

use crate::error::LintFault;
use crate::provider::SymbolProvider;
use crate::walk::{WalkControl, try_walk_preorder};
use crate::{RUN_METHOD, SPEC_FRAMEWORK_PACKAGES, SPEC_REGISTRATION_NAME, TESTING_T_TYPE};
use looplint_parser::parser::node::CallExprData;
use looplint_parser::parser::syntax_kind_ext::*;
use looplint_parser::{NodeAccess, NodeArena, NodeIndex};

/// Argument slot holding the closure for both `t.Run` and `It`.
const CLOSURE_ARGUMENT_INDEX: usize = 1;

/// Shape of a call's callee.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalleeRef<'a> {
    /// `name(...)`
    Bare { ident: NodeIndex, name: &'a str },
    /// `qualifier.name(...)`; the qualifier can be any expression.
    Qualified {
        qualifier: NodeIndex,
        name_ident: NodeIndex,
        name: &'a str,
    },
}

impl<'a> CalleeRef<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            CalleeRef::Bare { name, .. } | CalleeRef::Qualified { name, .. } => name,
        }
    }

    /// The identifier naming the called function.
    pub fn name_ident(&self) -> NodeIndex {
        match self {
            CalleeRef::Bare { ident, .. } => *ident,
            CalleeRef::Qualified { name_ident, .. } => *name_ident,
        }
    }
}

/// Classify a call's callee; `None` for anything but `f(...)` and `x.f(...)`.
pub fn classify_callee<'a>(arena: &'a NodeArena, call: &CallExprData) -> Option<CalleeRef<'a>> {
    let callee = arena.get(call.expression)?;
    match callee.kind {
        IDENTIFIER => Some(CalleeRef::Bare {
            ident: call.expression,
            name: arena.get_identifier_text(call.expression)?,
        }),
        SELECTOR_EXPRESSION => {
            let selector = arena.get_selector_expr(callee)?;
            Some(CalleeRef::Qualified {
                qualifier: selector.expression,
                name_ident: selector.name,
                name: arena.get_identifier_text(selector.name)?,
            })
        }
        _ => None,
    }
}

/// First call under `root` (pre-order) accepted by `matches`.
fn find_first_call<F>(
    arena: &NodeArena,
    root: NodeIndex,
    mut matches: F,
) -> Result<Option<NodeIndex>, LintFault>
where
    F: FnMut(&CallExprData) -> bool,
{
    let mut found = None;
    try_walk_preorder(arena, root, |idx, node| {
        if node.kind != CALL_EXPRESSION {
            return Ok(WalkControl::Continue);
        }
        let call = arena
            .get_call_expr(node)
            .ok_or_else(|| LintFault::missing("call expression", idx))?;
        if matches(call) {
            found = Some(idx);
            return Ok(WalkControl::Stop);
        }
        Ok(WalkControl::Continue)
    })?;
    Ok(found)
}

/// First `x.Run(...)` under `root` whose receiver `x` is an identifier
/// declared as `*testing.T`.
pub fn find_subtest_call(
    arena: &NodeArena,
    provider: &dyn SymbolProvider,
    root: NodeIndex,
) -> Result<Option<NodeIndex>, LintFault> {
    find_first_call(arena, root, |call| {
        let Some(CalleeRef::Qualified {
            qualifier, name, ..
        }) = classify_callee(arena, call)
        else {
            return false;
        };
        name == RUN_METHOD
            && arena.kind(qualifier) == Some(IDENTIFIER)
            && provider
                .symbol_of(arena, qualifier)
                .and_then(|symbol| provider.declared_type(symbol))
                == Some(TESTING_T_TYPE)
    })
}

/// First `It(...)` or `pkg.It(...)` under `root` whose `It` comes from
/// Ginkgo.
pub fn find_spec_call(
    arena: &NodeArena,
    provider: &dyn SymbolProvider,
    root: NodeIndex,
) -> Result<Option<NodeIndex>, LintFault> {
    find_first_call(arena, root, |call| {
        let Some(callee) = classify_callee(arena, call) else {
            return false;
        };
        callee.name() == SPEC_REGISTRATION_NAME
            && provider
                .symbol_of(arena, callee.name_ident())
                .and_then(|symbol| provider.package_path(symbol))
                .is_some_and(|path| SPEC_FRAMEWORK_PACKAGES.contains(&path))
    })
}

/// Function literal passed as the second argument of `call`. A missing
/// argument or any other expression in that slot means no closure.
pub fn closure_argument(arena: &NodeArena, call: NodeIndex) -> Result<Option<NodeIndex>, LintFault> {
    let data = arena
        .get(call)
        .and_then(|n| arena.get_call_expr(n))
        .ok_or_else(|| LintFault::missing("call expression", call))?;
    Ok(data
        .arguments
        .get(CLOSURE_ARGUMENT_INDEX)
        .filter(|&argument| arena.kind(argument) == Some(FUNCTION_LITERAL)))
}
