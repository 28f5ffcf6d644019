//! Centralized limits and thresholds.
//!
//! Shared constants for recursion depths and walk counts. Keeping them in one
//! place avoids slightly different copies drifting apart between the parser,
//! binder and checker.

/// Maximum nesting depth the parser accepts before bailing out.
///
/// Each nested expression, block or type adds frames to the recursive-descent
/// parser. Past this depth the parser reports a diagnostic and stops
/// descending instead of overflowing the stack.
///
/// ```go
/// x := ((((((((((((((((((((((1))))))))))))))))))))))  // ... thousands deep
/// ```
pub const MAX_PARSER_RECURSION_DEPTH: u32 = 1_000;

/// Maximum number of parent hops when walking up the tree.
///
/// Used when looking for the enclosing function of a node. A well-formed tree
/// never gets close; the bound only protects against corrupted parent links.
pub const MAX_TREE_WALK_ITERATIONS: usize = 10_000;
