//! Parser module: AST storage, node access and the recursive-descent parser.

pub mod base;
pub use base::{NodeIndex, NodeList, TextRange};

pub mod syntax_kind_ext;

pub mod node;
pub use node::{Node, NodeArena};

mod node_arena;

pub mod node_access;
pub use node_access::NodeAccess;

pub mod state;
pub use state::{ParseDiagnostic, ParserState};

mod state_expressions;
mod state_statements;
mod state_types;
