//! Diagnostic message table.

use super::{DiagnosticCategory, DiagnosticMessage};

pub mod diagnostic_codes {
    pub const LOOP_VARIABLE_CAPTURED_IN_PARALLEL_TEST: u32 = 1001;
    pub const LOOP_VARIABLE_CAPTURED_IN_GINKGO_IT: u32 = 1002;
    pub const LOOP_CHECK_PANICKED: u32 = 1003;

    pub const UNEXPECTED_TOKEN: u32 = 2001;
    pub const EXPECTED_TOKEN: u32 = 2002;
    pub const UNTERMINATED_LITERAL: u32 = 2003;
    pub const INVALID_CHARACTER: u32 = 2004;
    pub const NESTING_TOO_DEEP: u32 = 2005;
    pub const MIXED_NAMED_PARAMETERS: u32 = 2006;
    pub const INVALID_IMPORT_PATH: u32 = 2007;
}

pub mod diagnostic_messages {
    pub const LOOP_VARIABLE_CAPTURED_IN_PARALLEL_TEST: &str = "loop variable `{0}` used directly inside parallel test closure. This could lead to tests not running as expected. Try aliasing `{0}` to a variable outside the closure";
    pub const LOOP_VARIABLE_CAPTURED_IN_GINKGO_IT: &str = "loop variable `{0}` used directly inside ginkgo It closure. This could lead to tests not running as expected. Try aliasing `{0}` to a variable outside the closure";
    pub const LOOP_CHECK_PANICKED: &str = "panic: {0}";

    pub const UNEXPECTED_TOKEN: &str = "unexpected {0}";
    pub const EXPECTED_TOKEN: &str = "expected {0}, found {1}";
    pub const UNTERMINATED_LITERAL: &str = "{0} not terminated";
    pub const INVALID_CHARACTER: &str = "invalid character {0}";
    pub const NESTING_TOO_DEEP: &str = "nesting too deep";
    pub const MIXED_NAMED_PARAMETERS: &str = "mixed named and unnamed parameters";
    pub const INVALID_IMPORT_PATH: &str = "invalid import path: {0}";
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::LOOP_VARIABLE_CAPTURED_IN_PARALLEL_TEST,
        category: DiagnosticCategory::Warning,
        message: diagnostic_messages::LOOP_VARIABLE_CAPTURED_IN_PARALLEL_TEST,
    },
    DiagnosticMessage {
        code: diagnostic_codes::LOOP_VARIABLE_CAPTURED_IN_GINKGO_IT,
        category: DiagnosticCategory::Warning,
        message: diagnostic_messages::LOOP_VARIABLE_CAPTURED_IN_GINKGO_IT,
    },
    DiagnosticMessage {
        code: diagnostic_codes::LOOP_CHECK_PANICKED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::LOOP_CHECK_PANICKED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNEXPECTED_TOKEN,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::UNEXPECTED_TOKEN,
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPECTED_TOKEN,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::EXPECTED_TOKEN,
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNTERMINATED_LITERAL,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::UNTERMINATED_LITERAL,
    },
    DiagnosticMessage {
        code: diagnostic_codes::INVALID_CHARACTER,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::INVALID_CHARACTER,
    },
    DiagnosticMessage {
        code: diagnostic_codes::NESTING_TOO_DEEP,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::NESTING_TOO_DEEP,
    },
    DiagnosticMessage {
        code: diagnostic_codes::MIXED_NAMED_PARAMETERS,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::MIXED_NAMED_PARAMETERS,
    },
    DiagnosticMessage {
        code: diagnostic_codes::INVALID_IMPORT_PATH,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::INVALID_IMPORT_PATH,
    },
];
