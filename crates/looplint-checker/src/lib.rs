//! The gotestlooplint rule.
//!
//! For every `for` and `range` loop in a file, the checker looks for two
//! patterns in the loop body:
//! - a `t.Run(name, func(t *testing.T) { t.Parallel(); ... })` subtest, where
//!   references to loop variables after the `Parallel()` call race with the
//!   next iteration;
//! - a Ginkgo `It(name, func() { ... })` spec registration, whose body always
//!   runs after the loop has finished.
//!
//! Loop variables are compared by symbol identity, so a shadowing copy such as
//! `tc := tc` is never reported.
//!
//! The checker reads names and types through the `SymbolProvider` trait;
//! `looplint_binder::BinderState` is the reference implementation.

pub mod call_matchers;
pub mod capture;
pub mod context;
pub mod error;
mod error_reporter;
pub mod loop_scanner;
pub mod loop_vars;
pub mod parallel_marker;
pub mod pipeline;
pub mod provider;
pub mod state;
pub mod walk;

pub use context::{CheckerContext, LintOptions};
pub use error::LintFault;
pub use pipeline::lint_source;
pub use provider::SymbolProvider;
pub use state::LoopLintState;

/// Declared type a `Run` receiver must have.
pub const TESTING_T_TYPE: &str = "*testing.T";
pub const RUN_METHOD: &str = "Run";
pub const PARALLEL_METHOD: &str = "Parallel";
pub const SPEC_REGISTRATION_NAME: &str = "It";
/// Packages whose `It` registers a deferred spec.
pub const SPEC_FRAMEWORK_PACKAGES: [&str; 2] =
    ["github.com/onsi/ginkgo/v2", "github.com/onsi/ginkgo"];

#[cfg(test)]
#[path = "../tests/test_utils.rs"]
mod test_utils;
#[cfg(test)]
#[path = "../tests/parallel_subtest_tests.rs"]
mod parallel_subtest_tests;
#[cfg(test)]
#[path = "../tests/spec_registration_tests.rs"]
mod spec_registration_tests;
#[cfg(test)]
#[path = "../tests/loop_vars_tests.rs"]
mod loop_vars_tests;
#[cfg(test)]
#[path = "../tests/failure_boundary_tests.rs"]
mod failure_boundary_tests;
#[cfg(test)]
#[path = "../tests/options_tests.rs"]
mod options_tests;
