//! Common types and utilities for the gotestlooplint analyzer.
//!
//! This crate provides foundational types used across all looplint crates:
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`, message templates)
//! - Position/Range types and `LineMap` for offset <-> line/column conversion
//! - Centralized limits for recursion and tree walks

// Diagnostic types and the message table
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, format_message};

// Position/Range types for line/column source locations
pub mod position;
pub use position::{LineMap, Position, Range};

// Centralized limits and thresholds
pub mod limits;

#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod diagnostics_tests;
#[cfg(test)]
#[path = "../tests/position_tests.rs"]
mod position_tests;
