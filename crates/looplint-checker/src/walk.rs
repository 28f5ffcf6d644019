//! Pre-order tree walk with early exit.

use crate::error::LintFault;
use looplint_parser::parser::node::Node;
use looplint_parser::{NodeAccess, NodeArena, NodeIndex};
use std::convert::Infallible;

/// What the walker does after visiting a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkControl {
    Continue,
    /// Do not visit this node's children.
    SkipChildren,
    /// Abandon the whole walk.
    Stop,
}

/// Visit `root` and its descendants in document order. Returns `true` if the
/// visitor stopped the walk.
pub fn walk_preorder<F>(arena: &NodeArena, root: NodeIndex, mut visit: F) -> bool
where
    F: FnMut(NodeIndex, &Node) -> WalkControl,
{
    match walk_impl::<Infallible, _>(arena, root, |idx, node| Ok(visit(idx, node))) {
        Ok(stopped) => stopped,
        Err(never) => match never {},
    }
}

/// Like `walk_preorder`, for visitors that can fault.
pub fn try_walk_preorder<F>(arena: &NodeArena, root: NodeIndex, visit: F) -> Result<bool, LintFault>
where
    F: FnMut(NodeIndex, &Node) -> Result<WalkControl, LintFault>,
{
    walk_impl(arena, root, visit)
}

fn walk_impl<E, F>(arena: &NodeArena, root: NodeIndex, mut visit: F) -> Result<bool, E>
where
    F: FnMut(NodeIndex, &Node) -> Result<WalkControl, E>,
{
    let mut stack = vec![root];
    while let Some(idx) = stack.pop() {
        let Some(node) = arena.get(idx) else {
            continue;
        };
        match visit(idx, node)? {
            WalkControl::Stop => return Ok(true),
            WalkControl::SkipChildren => continue,
            WalkControl::Continue => {}
        }
        stack.extend(arena.get_children(idx).into_iter().rev());
    }
    Ok(false)
}
