//! Internal faults of the per-loop check.

use looplint_parser::NodeIndex;
use looplint_parser::parser::syntax_kind_ext::kind_name;
use thiserror::Error;

/// A tree shape the rule cannot make sense of. Faults never escape the
/// checker: each is turned into one `panic: ...` diagnostic at the loop
/// being checked.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LintFault {
    #[error("{what} has no data for node {node}")]
    MissingNode { what: &'static str, node: u32 },

    #[error("expected {expected}, found {found}")]
    UnexpectedNode {
        expected: &'static str,
        found: &'static str,
    },

    #[error("{0}")]
    Panic(String),
}

impl LintFault {
    pub fn missing(what: &'static str, node: NodeIndex) -> LintFault {
        LintFault::MissingNode { what, node: node.0 }
    }

    pub fn unexpected(expected: &'static str, found_kind: u16) -> LintFault {
        LintFault::UnexpectedNode {
            expected,
            found: kind_name(found_kind),
        }
    }

    /// Build a fault from a `catch_unwind` payload.
    pub fn from_panic(payload: &(dyn std::any::Any + Send)) -> LintFault {
        let message = if let Some(text) = payload.downcast_ref::<&str>() {
            (*text).to_string()
        } else if let Some(text) = payload.downcast_ref::<String>() {
            text.clone()
        } else {
            "unknown panic".to_string()
        };
        LintFault::Panic(message)
    }
}
