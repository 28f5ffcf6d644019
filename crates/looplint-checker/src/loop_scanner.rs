//! Loop discovery.

use crate::walk::{WalkControl, walk_preorder};
use looplint_common::limits::MAX_TREE_WALK_ITERATIONS;
use looplint_parser::parser::syntax_kind_ext::{FUNCTION_DECLARATION, is_loop_kind};
use looplint_parser::{NodeAccess, NodeArena, NodeIndex};

/// Every `for` and `range` statement under `root`, in pre-order.
pub fn collect_loops(arena: &NodeArena, root: NodeIndex) -> Vec<NodeIndex> {
    let mut loops = Vec::new();
    walk_preorder(arena, root, |idx, node| {
        if is_loop_kind(node.kind) {
            loops.push(idx);
        }
        WalkControl::Continue
    });
    loops
}

/// Nearest enclosing function declaration, looking through function
/// literals. NONE for package-level code.
pub fn enclosing_function_declaration(arena: &NodeArena, idx: NodeIndex) -> NodeIndex {
    let mut current = arena.get_parent(idx);
    for _ in 0..MAX_TREE_WALK_ITERATIONS {
        match arena.kind(current) {
            None => return NodeIndex::NONE,
            Some(FUNCTION_DECLARATION) => return current,
            Some(_) => current = arena.get_parent(current),
        }
    }
    NodeIndex::NONE
}

/// `func TestXxx(...)` without a receiver.
pub fn is_test_function(arena: &NodeArena, decl: NodeIndex) -> bool {
    let Some(func) = arena.get(decl).and_then(|n| arena.get_function(n)) else {
        return false;
    };
    func.receiver.is_empty()
        && arena
            .get_identifier_text(func.name)
            .is_some_and(|name| name.starts_with("Test"))
}

pub fn is_in_test_function(arena: &NodeArena, loop_idx: NodeIndex) -> bool {
    is_test_function(arena, enclosing_function_declaration(arena, loop_idx))
}
