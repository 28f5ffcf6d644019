//! Go scanner/tokenizer for the gotestlooplint analyzer.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types (operators, punctuation, literals, keywords)
//! - `ScannerState` - Tokenizer state machine with automatic semicolon insertion
//! - `unquote_string` - Decoding of interpreted and raw string literals

pub mod syntax_kind;
pub use syntax_kind::{SyntaxKind, keyword_kind};

pub mod scanner_impl;
pub use scanner_impl::{ScannerDiagnostic, ScannerSnapshot, ScannerState, unquote_string};

#[cfg(test)]
#[path = "../tests/scanner_tests.rs"]
mod scanner_tests;
