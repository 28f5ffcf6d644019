//! Parser state: token plumbing, diagnostics and file-level declarations.
//!
//! Statement, expression and type productions live in `state_statements`,
//! `state_expressions` and `state_types`.

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::syntax_kind_ext::*;
use looplint_common::diagnostics::{diagnostic_codes, diagnostic_messages, format_message};
use looplint_common::limits::MAX_PARSER_RECURSION_DEPTH;
use looplint_scanner::{ScannerState, SyntaxKind, unquote_string};
use serde::Serialize;
use tracing::{debug, trace};

/// A syntax error found while parsing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParseDiagnostic {
    pub start: u32,
    pub length: u32,
    pub message: String,
    pub code: u32,
}

/// Recursive-descent parser for one Go source file.
pub struct ParserState {
    pub(crate) scanner: ScannerState,
    pub arena: NodeArena,
    pub(crate) file_name: String,
    pub(crate) current_token: SyntaxKind,
    pub(crate) parse_diagnostics: Vec<ParseDiagnostic>,
    /// Expression nesting level. Negative inside `if`/`for`/`switch`
    /// headers, where `T {` opens the statement body instead of a
    /// composite literal.
    pub(crate) expr_level: i32,
    pub(crate) recursion_depth: u32,
    pub(crate) prev_token_end: u32,
    nesting_reported: bool,
}

impl ParserState {
    pub fn new(file_name: String, source_text: String) -> ParserState {
        let capacity = source_text.len() / 6;
        ParserState {
            scanner: ScannerState::new(source_text),
            arena: NodeArena::with_capacity(capacity),
            file_name,
            current_token: SyntaxKind::Unknown,
            parse_diagnostics: Vec::new(),
            expr_level: 0,
            recursion_depth: 0,
            prev_token_end: 0,
            nesting_reported: false,
        }
    }

    pub fn get_arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    pub fn get_file_name(&self) -> &str {
        &self.file_name
    }

    pub fn get_source_text(&self) -> &str {
        self.scanner.source_text()
    }

    /// Parse diagnostics followed by scanner diagnostics, ordered by position.
    pub fn get_diagnostics(&self) -> Vec<ParseDiagnostic> {
        let mut diagnostics = self.parse_diagnostics.clone();
        diagnostics.extend(
            self.scanner
                .get_scanner_diagnostics()
                .iter()
                .map(|d| ParseDiagnostic {
                    start: d.pos as u32,
                    length: d.length as u32,
                    message: d.message.clone(),
                    code: d.code,
                }),
        );
        diagnostics.sort_by_key(|d| d.start);
        diagnostics
    }

    // =========================================================================
    // Token helpers
    // =========================================================================

    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.current_token
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.current_token == kind
    }

    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        self.scanner.get_token_start()
    }

    pub(crate) fn token_text(&self) -> &str {
        self.scanner.get_token_text()
    }

    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        self.prev_token_end = self.scanner.get_token_end();
        self.current_token = self.scanner.scan();
        trace!(token = ?self.current_token, pos = self.token_pos(), "next token");
        self.current_token
    }

    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or report "expected X, found Y" without consuming.
    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            self.error_expected(kind.describe());
            false
        }
    }

    /// Statement terminator. A closing `)` or `}` may stand in for it.
    pub(crate) fn expect_semicolon(&mut self) {
        match self.token() {
            SyntaxKind::SemicolonToken => {
                self.next_token();
            }
            SyntaxKind::CloseParenToken | SyntaxKind::CloseBraceToken => {}
            _ => {
                self.error_expected("';'");
                self.skip_to_statement_end();
            }
        }
    }

    fn skip_to_statement_end(&mut self) {
        while !matches!(
            self.token(),
            SyntaxKind::SemicolonToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::EndOfFileToken
        ) {
            self.next_token();
        }
        self.parse_optional(SyntaxKind::SemicolonToken);
    }

    /// Description of the current token for "found X" messages.
    pub(crate) fn describe_current(&self) -> String {
        match self.token() {
            SyntaxKind::SemicolonToken if self.scanner.is_automatic_semicolon() => {
                "newline".to_string()
            }
            kind if kind == SyntaxKind::Identifier || kind.is_literal() => {
                self.token_text().to_string()
            }
            kind => kind.describe().to_string(),
        }
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    pub(crate) fn parse_error_at(&mut self, start: u32, length: u32, message: String, code: u32) {
        // One error per position; later ones at the same spot are cascades.
        if self
            .parse_diagnostics
            .last()
            .is_some_and(|last| last.start == start)
        {
            return;
        }
        debug!(file = %self.file_name, start, %message, "syntax error");
        self.parse_diagnostics.push(ParseDiagnostic {
            start,
            length,
            message,
            code,
        });
    }

    pub(crate) fn error_expected(&mut self, expected: &str) {
        let found = self.describe_current();
        let start = self.token_pos();
        let length = self.scanner.get_token_end().saturating_sub(start);
        let message = format_message(diagnostic_messages::EXPECTED_TOKEN, &[expected, &found]);
        self.parse_error_at(start, length, message, diagnostic_codes::EXPECTED_TOKEN);
    }

    pub(crate) fn error_unexpected(&mut self) {
        let found = self.describe_current();
        let start = self.token_pos();
        let length = self.scanner.get_token_end().saturating_sub(start);
        let message = format_message(diagnostic_messages::UNEXPECTED_TOKEN, &[&found]);
        self.parse_error_at(start, length, message, diagnostic_codes::UNEXPECTED_TOKEN);
    }

    /// Track recursion depth. Returns false once the limit is reached.
    pub(crate) fn enter_recursion(&mut self) -> bool {
        if self.recursion_depth >= MAX_PARSER_RECURSION_DEPTH {
            if !self.nesting_reported {
                self.nesting_reported = true;
                let start = self.token_pos();
                self.parse_error_at(
                    start,
                    0,
                    diagnostic_messages::NESTING_TOO_DEEP.to_string(),
                    diagnostic_codes::NESTING_TOO_DEEP,
                );
            }
            return false;
        }
        self.recursion_depth += 1;
        true
    }

    #[inline]
    pub(crate) fn exit_recursion(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }

    // =========================================================================
    // Leaves
    // =========================================================================

    /// Parse an identifier. On error a `_` placeholder is returned and the
    /// current token is left in place.
    pub(crate) fn parse_identifier(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        if self.is_token(SyntaxKind::Identifier) {
            let text = self.token_text().to_string();
            self.next_token();
            self.arena.add_identifier(pos, self.prev_token_end, text)
        } else {
            self.error_expected("name");
            self.arena.add_identifier(pos, pos, "_".to_string())
        }
    }

    pub(crate) fn parse_identifier_list(&mut self) -> NodeList {
        let mut names = vec![self.parse_identifier()];
        while self.parse_optional(SyntaxKind::CommaToken) {
            names.push(self.parse_identifier());
        }
        NodeList::with_nodes(names)
    }

    pub(crate) fn parse_literal(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let kind = self.token() as u16;
        let text = self.token_text().to_string();
        self.next_token();
        self.arena.add_literal(kind, pos, self.prev_token_end, text)
    }

    pub(crate) fn bad_expression(&mut self, pos: u32) -> NodeIndex {
        let end = self.prev_token_end.max(pos);
        self.arena.add_token(BAD_EXPRESSION, pos, end)
    }

    // =========================================================================
    // Source file
    // =========================================================================

    /// Parse the whole file and return the `SOURCE_FILE` root.
    pub fn parse_source_file(&mut self) -> NodeIndex {
        self.next_token();

        let mut package_name = NodeIndex::NONE;
        if self.parse_expected(SyntaxKind::PackageKeyword) {
            package_name = self.parse_identifier();
            self.expect_semicolon();
        }

        let mut imports = Vec::new();
        while self.is_token(SyntaxKind::ImportKeyword) {
            imports.push(self.parse_declaration(IMPORT_DECLARATION));
            self.expect_semicolon();
        }

        let mut declarations = Vec::new();
        while !self.is_token(SyntaxKind::EndOfFileToken) {
            let start = self.token_pos();
            let decl = self.parse_top_level_declaration();
            if decl.is_some() {
                declarations.push(decl);
            }
            if self.token_pos() == start && !self.is_token(SyntaxKind::EndOfFileToken) {
                self.next_token();
            }
        }

        let text = self.scanner.source_text_arc();
        let end = text.len() as u32;
        let root = self.arena.add_source_file(
            SOURCE_FILE,
            0,
            end,
            SourceFileData {
                file_name: self.file_name.clone(),
                text,
                package_name,
                imports: NodeList::with_nodes(imports),
                declarations: NodeList::with_nodes(declarations),
            },
        );
        debug!(
            file = %self.file_name,
            nodes = self.arena.len(),
            errors = self.parse_diagnostics.len(),
            "parsed source file"
        );
        root
    }

    fn parse_top_level_declaration(&mut self) -> NodeIndex {
        let decl = match self.token() {
            SyntaxKind::FuncKeyword => self.parse_function_declaration(),
            SyntaxKind::VarKeyword => self.parse_declaration(VAR_DECLARATION),
            SyntaxKind::ConstKeyword => self.parse_declaration(CONST_DECLARATION),
            SyntaxKind::TypeKeyword => self.parse_declaration(TYPE_DECLARATION),
            SyntaxKind::ImportKeyword => self.parse_declaration(IMPORT_DECLARATION),
            SyntaxKind::SemicolonToken => {
                self.next_token();
                return NodeIndex::NONE;
            }
            _ => {
                self.error_expected("declaration");
                self.skip_to_declaration_start();
                return NodeIndex::NONE;
            }
        };
        self.expect_semicolon();
        decl
    }

    fn skip_to_declaration_start(&mut self) {
        loop {
            self.next_token();
            if matches!(
                self.token(),
                SyntaxKind::FuncKeyword
                    | SyntaxKind::VarKeyword
                    | SyntaxKind::ConstKeyword
                    | SyntaxKind::TypeKeyword
                    | SyntaxKind::ImportKeyword
                    | SyntaxKind::EndOfFileToken
            ) {
                break;
            }
        }
    }

    /// `import`/`var`/`const`/`type`, either a single spec or a
    /// parenthesized group.
    pub(crate) fn parse_declaration(&mut self, kind: u16) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();

        let mut specs = Vec::new();
        if self.parse_optional(SyntaxKind::OpenParenToken) {
            while !matches!(
                self.token(),
                SyntaxKind::CloseParenToken | SyntaxKind::EndOfFileToken
            ) {
                let start = self.token_pos();
                specs.push(self.parse_spec(kind));
                self.expect_semicolon();
                if self.token_pos() == start {
                    self.next_token();
                }
            }
            self.parse_expected(SyntaxKind::CloseParenToken);
        } else {
            specs.push(self.parse_spec(kind));
        }

        self.arena.add_declaration(
            kind,
            pos,
            self.prev_token_end,
            DeclarationData {
                specs: NodeList::with_nodes(specs),
            },
        )
    }

    fn parse_spec(&mut self, kind: u16) -> NodeIndex {
        match kind {
            IMPORT_DECLARATION => self.parse_import_spec(),
            TYPE_DECLARATION => self.parse_type_spec(),
            _ => self.parse_value_spec(),
        }
    }

    fn parse_import_spec(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let name = match self.token() {
            SyntaxKind::Identifier => self.parse_identifier(),
            SyntaxKind::DotToken => {
                self.next_token();
                self.arena
                    .add_identifier(pos, self.prev_token_end, ".".to_string())
            }
            _ => NodeIndex::NONE,
        };

        let path = if self.is_token(SyntaxKind::StringLiteral) {
            if unquote_string(self.token_text()).is_none_or(|p| p.is_empty()) {
                let start = self.token_pos();
                let length = self.scanner.get_token_end().saturating_sub(start);
                let message =
                    format_message(diagnostic_messages::INVALID_IMPORT_PATH, &[self.token_text()]);
                self.parse_error_at(start, length, message, diagnostic_codes::INVALID_IMPORT_PATH);
            }
            self.parse_literal()
        } else {
            self.error_expected("import path");
            NodeIndex::NONE
        };

        self.arena.add_import_spec(
            IMPORT_SPEC,
            pos,
            self.prev_token_end,
            ImportSpecData { name, path },
        )
    }

    fn parse_value_spec(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let names = self.parse_identifier_list();
        let mut type_node = NodeIndex::NONE;
        if !matches!(
            self.token(),
            SyntaxKind::EqualsToken
                | SyntaxKind::SemicolonToken
                | SyntaxKind::CloseParenToken
        ) {
            type_node = self.parse_type();
        }
        let mut values = Vec::new();
        if self.parse_optional(SyntaxKind::EqualsToken) {
            values = self.parse_expression_list();
        }
        self.arena.add_value_spec(
            VALUE_SPEC,
            pos,
            self.prev_token_end,
            ValueSpecData {
                names,
                type_node,
                values: NodeList::with_nodes(values),
            },
        )
    }

    fn parse_type_spec(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let name = self.parse_identifier();
        let mut type_parameters = NodeList::new();
        if self.is_token(SyntaxKind::OpenBracketToken) && self.look_ahead_is_type_parameter_list()
        {
            type_parameters = self.parse_type_parameters();
        }
        let is_alias = self.parse_optional(SyntaxKind::EqualsToken);
        let type_node = self.parse_type();
        self.arena.add_type_spec(
            TYPE_SPEC,
            pos,
            self.prev_token_end,
            TypeSpecData {
                name,
                type_parameters,
                is_alias,
                type_node,
            },
        )
    }

    /// At `[` after a type name: `[T any]` opens type parameters while
    /// `[N]int` and `[]int` start an array or slice type.
    fn look_ahead_is_type_parameter_list(&mut self) -> bool {
        let snapshot = self.scanner.save_state();
        let current = self.current_token;
        let prev_end = self.prev_token_end;

        self.next_token();
        let mut is_type_params = false;
        if self.is_token(SyntaxKind::Identifier) {
            self.next_token();
            is_type_params = !matches!(
                self.token(),
                SyntaxKind::CloseBracketToken
                    | SyntaxKind::PlusToken
                    | SyntaxKind::MinusToken
                    | SyntaxKind::SlashToken
                    | SyntaxKind::PercentToken
                    | SyntaxKind::LessThanLessThanToken
                    | SyntaxKind::GreaterThanGreaterThanToken
                    | SyntaxKind::DotToken
                    | SyntaxKind::OpenParenToken
            );
        }

        self.scanner.restore_state(snapshot);
        self.current_token = current;
        self.prev_token_end = prev_end;
        is_type_params
    }

    fn parse_function_declaration(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();

        let mut data = FunctionData::default();
        if self.is_token(SyntaxKind::OpenParenToken) {
            data.receiver = self.parse_parameters();
        }
        data.name = self.parse_identifier();
        if self.is_token(SyntaxKind::OpenBracketToken) {
            data.type_parameters = self.parse_type_parameters();
        }
        data.parameters = self.parse_parameters();
        data.results = self.parse_results();
        if self.is_token(SyntaxKind::OpenBraceToken) {
            data.body = self.parse_function_body();
        }

        self.arena
            .add_function(FUNCTION_DECLARATION, pos, self.prev_token_end, data)
    }
}
