//! Go parser and AST types for the gotestlooplint analyzer.
//!
//! This crate provides:
//! - `NodeArena` - thin 16-byte node headers plus typed data pools
//! - `NodeIndex` / `NodeList` - handles into the arena
//! - `NodeAccess` - kind/position/children queries used by tree walkers
//! - `ParserState` - recursive-descent parser for Go source files

pub mod parser;
pub use parser::{NodeAccess, NodeArena, NodeIndex, NodeList, ParseDiagnostic, ParserState};

#[cfg(test)]
#[path = "../tests/tests.rs"]
mod tests;
#[cfg(test)]
#[path = "../tests/state_statement_tests.rs"]
mod state_statement_tests;
#[cfg(test)]
#[path = "../tests/state_expression_tests.rs"]
mod state_expression_tests;
