//! Statement productions: blocks, simple statements and control flow.

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::node_access::NodeAccess;
use super::state::ParserState;
use super::syntax_kind_ext::*;
use looplint_common::diagnostics::{diagnostic_codes, diagnostic_messages, format_message};
use looplint_scanner::SyntaxKind;

/// What a simple statement may turn into, depending on its context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SimpleMode {
    Basic,
    LabelOk,
    RangeOk,
}

/// A parsed simple statement. A range clause has no node of its own
/// until the enclosing `for` has parsed its body.
pub(crate) enum SimpleStatement {
    Statement(NodeIndex),
    Range {
        pos: u32,
        key: NodeIndex,
        value: NodeIndex,
        operator: u16,
        expression: NodeIndex,
    },
}

impl ParserState {
    pub(crate) fn parse_function_body(&mut self) -> NodeIndex {
        let saved_level = self.expr_level;
        self.expr_level = 0;
        let body = self.parse_block();
        self.expr_level = saved_level;
        body
    }

    pub(crate) fn parse_block(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let statements = self.parse_statement_list();
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.arena.add_block(
            BLOCK,
            pos,
            self.prev_token_end,
            BlockData { statements },
        )
    }

    fn at_statement_list_end(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::CaseKeyword
                | SyntaxKind::DefaultKeyword
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::EndOfFileToken
        )
    }

    fn parse_statement_list(&mut self) -> NodeList {
        let mut statements = Vec::new();
        while !self.at_statement_list_end() {
            let start = self.token_pos();
            let statement = self.parse_statement();
            if statement.is_some() {
                statements.push(statement);
            }
            if self.token_pos() == start && !self.at_statement_list_end() {
                self.next_token();
            }
        }
        NodeList::with_nodes(statements)
    }

    pub(crate) fn parse_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        if !self.enter_recursion() {
            return NodeIndex::NONE;
        }

        let statement = match self.token() {
            SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword | SyntaxKind::TypeKeyword => {
                let kind = match self.token() {
                    SyntaxKind::VarKeyword => VAR_DECLARATION,
                    SyntaxKind::ConstKeyword => CONST_DECLARATION,
                    _ => TYPE_DECLARATION,
                };
                let expression = self.parse_declaration(kind);
                let statement = self.arena.add_wrapper(
                    DECLARATION_STATEMENT,
                    pos,
                    self.prev_token_end,
                    WrapperData { expression },
                );
                self.expect_semicolon();
                statement
            }
            SyntaxKind::GoKeyword | SyntaxKind::DeferKeyword => {
                let kind = if self.is_token(SyntaxKind::GoKeyword) {
                    GO_STATEMENT
                } else {
                    DEFER_STATEMENT
                };
                self.next_token();
                let expression = self.parse_expression();
                let statement = self.arena.add_wrapper(
                    kind,
                    pos,
                    self.prev_token_end,
                    WrapperData { expression },
                );
                self.expect_semicolon();
                statement
            }
            SyntaxKind::ReturnKeyword => {
                self.next_token();
                let mut results = Vec::new();
                if !matches!(
                    self.token(),
                    SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken
                ) {
                    results = self.parse_expression_list();
                }
                let statement = self.arena.add_return_statement(
                    RETURN_STATEMENT,
                    pos,
                    self.prev_token_end,
                    ReturnData {
                        results: NodeList::with_nodes(results),
                    },
                );
                self.expect_semicolon();
                statement
            }
            SyntaxKind::BreakKeyword
            | SyntaxKind::ContinueKeyword
            | SyntaxKind::GotoKeyword
            | SyntaxKind::FallthroughKeyword => {
                let keyword = self.token();
                self.next_token();
                let label = if keyword != SyntaxKind::FallthroughKeyword
                    && self.is_token(SyntaxKind::Identifier)
                {
                    self.parse_identifier()
                } else {
                    NodeIndex::NONE
                };
                let statement = self.arena.add_branch_statement(
                    BRANCH_STATEMENT,
                    pos,
                    self.prev_token_end,
                    BranchData {
                        keyword: keyword as u16,
                        label,
                    },
                );
                self.expect_semicolon();
                statement
            }
            SyntaxKind::OpenBraceToken => {
                let block = self.parse_block();
                self.expect_semicolon();
                block
            }
            SyntaxKind::IfKeyword => {
                let statement = self.parse_if_statement();
                self.expect_semicolon();
                statement
            }
            SyntaxKind::SwitchKeyword => {
                let statement = self.parse_switch_statement();
                self.expect_semicolon();
                statement
            }
            SyntaxKind::SelectKeyword => {
                let statement = self.parse_select_statement();
                self.expect_semicolon();
                statement
            }
            SyntaxKind::ForKeyword => {
                let statement = self.parse_for_statement();
                self.expect_semicolon();
                statement
            }
            SyntaxKind::SemicolonToken => {
                self.next_token();
                self.arena.add_token(EMPTY_STATEMENT, pos, pos)
            }
            kind if Self::is_simple_statement_start(kind) => {
                let statement = self.parse_simple_statement(SimpleMode::LabelOk);
                let statement = self.simple_statement_node(statement);
                if self.arena.kind(statement) != Some(LABELED_STATEMENT) {
                    self.expect_semicolon();
                }
                statement
            }
            _ => {
                self.error_expected("statement");
                NodeIndex::NONE
            }
        };

        self.exit_recursion();
        statement
    }

    fn is_simple_statement_start(kind: SyntaxKind) -> bool {
        kind.is_literal()
            || matches!(
                kind,
                SyntaxKind::Identifier
                    | SyntaxKind::OpenParenToken
                    | SyntaxKind::OpenBracketToken
                    | SyntaxKind::FuncKeyword
                    | SyntaxKind::StructKeyword
                    | SyntaxKind::MapKeyword
                    | SyntaxKind::ChanKeyword
                    | SyntaxKind::InterfaceKeyword
                    | SyntaxKind::AsteriskToken
                    | SyntaxKind::AmpersandToken
                    | SyntaxKind::PlusToken
                    | SyntaxKind::MinusToken
                    | SyntaxKind::ExclamationToken
                    | SyntaxKind::CaretToken
                    | SyntaxKind::TildeToken
                    | SyntaxKind::LessThanMinusToken
            )
    }

    /// Expression, send, inc/dec, assignment, short variable declaration,
    /// labeled statement or (in a `for` header) range clause.
    pub(crate) fn parse_simple_statement(&mut self, mode: SimpleMode) -> SimpleStatement {
        let pos = self.token_pos();

        if mode == SimpleMode::RangeOk && self.parse_optional(SyntaxKind::RangeKeyword) {
            let expression = self.parse_expression();
            return SimpleStatement::Range {
                pos,
                key: NodeIndex::NONE,
                value: NodeIndex::NONE,
                operator: SyntaxKind::Unknown as u16,
                expression,
            };
        }

        let left = self.parse_expression_list();

        let operator = self.token();
        if operator.is_assignment_operator() {
            self.next_token();
            let is_define_or_assign =
                operator == SyntaxKind::ColonEqualsToken || operator == SyntaxKind::EqualsToken;
            if mode == SimpleMode::RangeOk
                && is_define_or_assign
                && self.parse_optional(SyntaxKind::RangeKeyword)
            {
                let expression = self.parse_expression();
                if left.len() > 2 {
                    self.report_expected_at(left[2], "at most 2 expressions", "more");
                }
                return SimpleStatement::Range {
                    pos,
                    key: left[0],
                    value: left.get(1).copied().unwrap_or(NodeIndex::NONE),
                    operator: operator as u16,
                    expression,
                };
            }
            let right = self.parse_expression_list();
            return SimpleStatement::Statement(self.arena.add_assignment(
                ASSIGNMENT_STATEMENT,
                pos,
                self.prev_token_end,
                AssignmentData {
                    left: NodeList::with_nodes(left),
                    operator: operator as u16,
                    right: NodeList::with_nodes(right),
                },
            ));
        }

        if left.len() > 1 {
            self.error_expected("':=' or '='");
        }
        let expression = left[0];

        let statement = match self.token() {
            SyntaxKind::ColonToken
                if mode == SimpleMode::LabelOk
                    && self.arena.kind(expression) == Some(IDENTIFIER) =>
            {
                self.next_token();
                let statement = if self.is_token(SyntaxKind::CloseBraceToken) {
                    let empty_pos = self.token_pos();
                    self.arena.add_token(EMPTY_STATEMENT, empty_pos, empty_pos)
                } else {
                    self.parse_statement()
                };
                self.arena.add_labeled_statement(
                    LABELED_STATEMENT,
                    pos,
                    self.prev_token_end,
                    LabeledData {
                        label: expression,
                        statement,
                    },
                )
            }
            SyntaxKind::LessThanMinusToken => {
                self.next_token();
                let value = self.parse_expression();
                self.arena.add_binary_expr(
                    SEND_STATEMENT,
                    pos,
                    self.prev_token_end,
                    BinaryExprData {
                        left: expression,
                        operator: SyntaxKind::LessThanMinusToken as u16,
                        right: value,
                    },
                )
            }
            SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken => {
                let operator = self.token() as u16;
                self.next_token();
                self.arena.add_unary_expr(
                    INC_DEC_STATEMENT,
                    pos,
                    self.prev_token_end,
                    UnaryExprData {
                        operator,
                        operand: expression,
                    },
                )
            }
            _ => self.arena.add_wrapper(
                EXPRESSION_STATEMENT,
                pos,
                self.prev_token_end,
                WrapperData { expression },
            ),
        };
        SimpleStatement::Statement(statement)
    }

    fn simple_statement_node(&mut self, statement: SimpleStatement) -> NodeIndex {
        match statement {
            SimpleStatement::Statement(node) => node,
            SimpleStatement::Range { pos, .. } => {
                self.error_unexpected();
                self.bad_expression(pos)
            }
        }
    }

    /// Turn a header statement into the expression it must be.
    fn statement_to_expression(&mut self, statement: NodeIndex, expected: &str) -> NodeIndex {
        let Some(node) = self.arena.get(statement) else {
            return NodeIndex::NONE;
        };
        if node.kind == EXPRESSION_STATEMENT {
            if let Some(wrapper) = self.arena.get_wrapper(node) {
                return wrapper.expression;
            }
        }
        let pos = node.pos;
        self.report_expected_at(statement, expected, "simple statement");
        self.arena.add_token(BAD_EXPRESSION, pos, pos)
    }

    fn report_expected_at(&mut self, at: NodeIndex, expected: &str, found: &str) {
        let (pos, end) = self.node_span(at);
        let message = format_message(diagnostic_messages::EXPECTED_TOKEN, &[expected, found]);
        self.parse_error_at(
            pos,
            end.saturating_sub(pos),
            message,
            diagnostic_codes::EXPECTED_TOKEN,
        );
    }

    // =========================================================================
    // Control flow
    // =========================================================================

    fn parse_if_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();

        let saved_level = self.expr_level;
        self.expr_level = -1;

        let mut init = NodeIndex::NONE;
        let mut condition = NodeIndex::NONE;
        if self.is_token(SyntaxKind::OpenBraceToken) {
            self.error_expected("condition");
        } else {
            let mut first = NodeIndex::NONE;
            if !self.is_token(SyntaxKind::SemicolonToken) {
                let statement = self.parse_simple_statement(SimpleMode::Basic);
                first = self.simple_statement_node(statement);
            }
            if self.parse_optional(SyntaxKind::SemicolonToken) {
                init = first;
                if self.is_token(SyntaxKind::OpenBraceToken) {
                    self.error_expected("condition");
                } else {
                    let statement = self.parse_simple_statement(SimpleMode::Basic);
                    let statement = self.simple_statement_node(statement);
                    condition = self.statement_to_expression(statement, "boolean expression");
                }
            } else {
                condition = self.statement_to_expression(first, "boolean expression");
            }
        }
        self.expr_level = saved_level;

        let then_block = self.parse_block();
        let mut else_branch = NodeIndex::NONE;
        if self.parse_optional(SyntaxKind::ElseKeyword) {
            else_branch = match self.token() {
                SyntaxKind::IfKeyword => self.parse_if_statement(),
                SyntaxKind::OpenBraceToken => self.parse_block(),
                _ => {
                    self.error_expected("if statement or block");
                    NodeIndex::NONE
                }
            };
        }

        self.arena.add_if_statement(
            IF_STATEMENT,
            pos,
            self.prev_token_end,
            IfData {
                init,
                condition,
                then_block,
                else_branch,
            },
        )
    }

    /// Three-clause loops, condition-only loops, infinite loops and range loops.
    fn parse_for_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();

        let saved_level = self.expr_level;
        self.expr_level = -1;

        let mut init = NodeIndex::NONE;
        let mut condition = NodeIndex::NONE;
        let mut post = NodeIndex::NONE;
        let mut range = None;

        if !self.is_token(SyntaxKind::OpenBraceToken) {
            let mut second = NodeIndex::NONE;
            if !self.is_token(SyntaxKind::SemicolonToken) {
                match self.parse_simple_statement(SimpleMode::RangeOk) {
                    SimpleStatement::Statement(node) => second = node,
                    clause @ SimpleStatement::Range { .. } => range = Some(clause),
                }
            }
            if range.is_none() && self.parse_optional(SyntaxKind::SemicolonToken) {
                init = second;
                second = NodeIndex::NONE;
                if !self.is_token(SyntaxKind::SemicolonToken) {
                    let statement = self.parse_simple_statement(SimpleMode::Basic);
                    second = self.simple_statement_node(statement);
                }
                self.parse_expected(SyntaxKind::SemicolonToken);
                if !self.is_token(SyntaxKind::OpenBraceToken) {
                    let statement = self.parse_simple_statement(SimpleMode::Basic);
                    post = self.simple_statement_node(statement);
                }
            }
            if second.is_some() {
                condition = self.statement_to_expression(second, "boolean or range expression");
            }
        }
        self.expr_level = saved_level;

        let body = self.parse_block();
        let end = self.prev_token_end;

        if let Some(SimpleStatement::Range {
            key,
            value,
            operator,
            expression,
            ..
        }) = range
        {
            return self.arena.add_range_statement(
                RANGE_STATEMENT,
                pos,
                end,
                RangeData {
                    key,
                    value,
                    operator,
                    expression,
                    body,
                },
            );
        }

        self.arena.add_for_statement(
            FOR_STATEMENT,
            pos,
            end,
            ForData {
                init,
                condition,
                post,
                body,
            },
        )
    }

    fn parse_switch_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();

        let saved_level = self.expr_level;
        self.expr_level = -1;

        let mut init = NodeIndex::NONE;
        let mut tag = NodeIndex::NONE;
        if !self.is_token(SyntaxKind::OpenBraceToken) {
            if !self.is_token(SyntaxKind::SemicolonToken) {
                let statement = self.parse_simple_statement(SimpleMode::Basic);
                tag = self.simple_statement_node(statement);
            }
            if self.parse_optional(SyntaxKind::SemicolonToken) {
                init = tag;
                tag = NodeIndex::NONE;
                if !self.is_token(SyntaxKind::OpenBraceToken) {
                    let statement = self.parse_simple_statement(SimpleMode::Basic);
                    tag = self.simple_statement_node(statement);
                }
            }
        }
        self.expr_level = saved_level;

        let is_type_switch = self.is_type_switch_guard(tag);
        if !is_type_switch && tag.is_some() {
            tag = self.statement_to_expression(tag, "switch expression");
        }

        self.parse_expected(SyntaxKind::OpenBraceToken);
        let mut clauses = Vec::new();
        while matches!(
            self.token(),
            SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword
        ) {
            clauses.push(self.parse_case_clause(CASE_CLAUSE));
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);

        let kind = if is_type_switch {
            TYPE_SWITCH_STATEMENT
        } else {
            SWITCH_STATEMENT
        };
        self.arena.add_switch_statement(
            kind,
            pos,
            self.prev_token_end,
            SwitchData {
                init,
                tag,
                clauses: NodeList::with_nodes(clauses),
            },
        )
    }

    /// `x.(type)` or `v := x.(type)`.
    fn is_type_switch_guard(&self, statement: NodeIndex) -> bool {
        let Some(node) = self.arena.get(statement) else {
            return false;
        };
        let expression = match node.kind {
            EXPRESSION_STATEMENT => self.arena.get_wrapper(node).map(|w| w.expression),
            ASSIGNMENT_STATEMENT => self.arena.get_assignment(node).and_then(|assign| {
                (assign.operator == SyntaxKind::ColonEqualsToken as u16
                    && assign.left.len() == 1
                    && assign.right.len() == 1)
                    .then(|| assign.right.nodes[0])
            }),
            _ => None,
        };
        expression
            .and_then(|index| self.arena.get(index))
            .and_then(|node| self.arena.get_type_assertion(node))
            .is_some_and(|assertion| assertion.type_node.is_none())
    }

    fn parse_select_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let mut clauses = Vec::new();
        while matches!(
            self.token(),
            SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword
        ) {
            clauses.push(self.parse_case_clause(COMM_CLAUSE));
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.arena.add_switch_statement(
            SELECT_STATEMENT,
            pos,
            self.prev_token_end,
            SwitchData {
                init: NodeIndex::NONE,
                tag: NodeIndex::NONE,
                clauses: NodeList::with_nodes(clauses),
            },
        )
    }

    /// `case list:` / `default:` followed by statements. In a select the
    /// case holds one send or receive statement.
    fn parse_case_clause(&mut self, kind: u16) -> NodeIndex {
        let pos = self.token_pos();
        let mut expressions = Vec::new();
        let mut comm = NodeIndex::NONE;
        let is_default = self.is_token(SyntaxKind::DefaultKeyword);
        self.next_token();

        if !is_default {
            if kind == COMM_CLAUSE {
                let statement = self.parse_simple_statement(SimpleMode::Basic);
                comm = self.simple_statement_node(statement);
            } else {
                expressions = self.parse_expression_list();
            }
        }
        self.parse_expected(SyntaxKind::ColonToken);
        let statements = self.parse_statement_list();

        self.arena.add_case_clause(
            kind,
            pos,
            self.prev_token_end,
            CaseClauseData {
                expressions: NodeList::with_nodes(expressions),
                comm,
                is_default,
                statements,
            },
        )
    }
}
