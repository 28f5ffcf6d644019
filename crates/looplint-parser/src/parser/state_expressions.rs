//! Expression productions.

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::node_access::NodeAccess;
use super::state::ParserState;
use super::syntax_kind_ext::*;
use looplint_scanner::SyntaxKind;

impl ParserState {
    pub(crate) fn parse_expression(&mut self) -> NodeIndex {
        self.parse_binary_expression(1)
    }

    pub(crate) fn parse_expression_list(&mut self) -> Vec<NodeIndex> {
        let mut list = vec![self.parse_expression()];
        while self.parse_optional(SyntaxKind::CommaToken) {
            list.push(self.parse_expression());
        }
        list
    }

    /// Precedence climbing over Go's five binary precedence levels.
    fn parse_binary_expression(&mut self, min_precedence: u8) -> NodeIndex {
        let pos = self.token_pos();
        if !self.enter_recursion() {
            return self.bad_expression(pos);
        }

        let mut left = self.parse_unary_expression();
        loop {
            let operator = self.token();
            let precedence = operator.binary_precedence();
            if precedence == 0 || precedence < min_precedence {
                break;
            }
            self.next_token();
            let right = self.parse_binary_expression(precedence + 1);
            left = self.arena.add_binary_expr(
                BINARY_EXPRESSION,
                pos,
                self.prev_token_end,
                BinaryExprData {
                    left,
                    operator: operator as u16,
                    right,
                },
            );
        }

        self.exit_recursion();
        left
    }

    fn parse_unary_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        if !self.enter_recursion() {
            return self.bad_expression(pos);
        }

        let result = match self.token() {
            SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::CaretToken
            | SyntaxKind::AmpersandToken
            | SyntaxKind::TildeToken => {
                let operator = self.token() as u16;
                self.next_token();
                let operand = self.parse_unary_expression();
                self.arena.add_unary_expr(
                    UNARY_EXPRESSION,
                    pos,
                    self.prev_token_end,
                    UnaryExprData { operator, operand },
                )
            }
            SyntaxKind::LessThanMinusToken => {
                self.next_token();
                if self.parse_optional(SyntaxKind::ChanKeyword) {
                    let element = self.parse_type();
                    self.arena.add_chan_type(
                        CHAN_TYPE,
                        pos,
                        self.prev_token_end,
                        ChanTypeData {
                            direction: ChanDirection::Receive,
                            element,
                        },
                    )
                } else {
                    let operand = self.parse_unary_expression();
                    self.arena.add_unary_expr(
                        UNARY_EXPRESSION,
                        pos,
                        self.prev_token_end,
                        UnaryExprData {
                            operator: SyntaxKind::LessThanMinusToken as u16,
                            operand,
                        },
                    )
                }
            }
            SyntaxKind::AsteriskToken => {
                self.next_token();
                let operand = self.parse_unary_expression();
                self.arena.add_unary_expr(
                    STAR_EXPRESSION,
                    pos,
                    self.prev_token_end,
                    UnaryExprData {
                        operator: SyntaxKind::AsteriskToken as u16,
                        operand,
                    },
                )
            }
            _ => self.parse_primary_expression(),
        };

        self.exit_recursion();
        result
    }

    /// Operand followed by any number of selectors, index/slice suffixes,
    /// type assertions, calls and composite literal bodies.
    fn parse_primary_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let mut expression = self.parse_operand();

        loop {
            match self.token() {
                SyntaxKind::DotToken => {
                    self.next_token();
                    match self.token() {
                        SyntaxKind::Identifier => {
                            let name = self.parse_identifier();
                            expression = self.arena.add_selector_expr(
                                SELECTOR_EXPRESSION,
                                pos,
                                self.prev_token_end,
                                SelectorData { expression, name },
                            );
                        }
                        SyntaxKind::OpenParenToken => {
                            self.next_token();
                            let type_node = if self.parse_optional(SyntaxKind::TypeKeyword) {
                                NodeIndex::NONE
                            } else {
                                self.parse_type()
                            };
                            self.parse_expected(SyntaxKind::CloseParenToken);
                            expression = self.arena.add_type_assertion(
                                TYPE_ASSERTION_EXPRESSION,
                                pos,
                                self.prev_token_end,
                                TypeAssertionData {
                                    expression,
                                    type_node,
                                },
                            );
                        }
                        _ => {
                            self.error_expected("selector or type assertion");
                            return self.bad_expression(pos);
                        }
                    }
                }
                SyntaxKind::OpenBracketToken => {
                    expression = self.parse_index_or_slice(pos, expression);
                }
                SyntaxKind::OpenParenToken => {
                    expression = self.parse_call_expression(pos, expression);
                }
                SyntaxKind::OpenBraceToken => {
                    if self.is_literal_type(expression)
                        && (self.expr_level >= 0 || !self.is_type_name(expression))
                    {
                        expression = self.parse_composite_literal(pos, expression);
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }

        expression
    }

    fn parse_operand(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        match self.token() {
            SyntaxKind::Identifier => self.parse_identifier(),
            kind if kind.is_literal() => self.parse_literal(),
            SyntaxKind::OpenParenToken => {
                self.next_token();
                self.expr_level += 1;
                let expression = self.parse_expression();
                self.expr_level -= 1;
                self.parse_expected(SyntaxKind::CloseParenToken);
                self.arena.add_wrapper(
                    PARENTHESIZED_EXPRESSION,
                    pos,
                    self.prev_token_end,
                    WrapperData { expression },
                )
            }
            SyntaxKind::FuncKeyword => self.parse_function_type_or_literal(),
            SyntaxKind::OpenBracketToken
            | SyntaxKind::MapKeyword
            | SyntaxKind::ChanKeyword
            | SyntaxKind::StructKeyword
            | SyntaxKind::InterfaceKeyword => self.parse_type(),
            _ => {
                self.error_expected("operand");
                if !matches!(
                    self.token(),
                    SyntaxKind::SemicolonToken
                        | SyntaxKind::CloseParenToken
                        | SyntaxKind::CloseBraceToken
                        | SyntaxKind::CloseBracketToken
                        | SyntaxKind::OpenBraceToken
                        | SyntaxKind::CommaToken
                        | SyntaxKind::ColonToken
                        | SyntaxKind::EndOfFileToken
                ) {
                    self.next_token();
                }
                self.bad_expression(pos)
            }
        }
    }

    /// `func(...) ...` followed by a body is a function literal; without one
    /// it is a function type.
    fn parse_function_type_or_literal(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let parameters = self.parse_parameters();
        let results = self.parse_results();

        if !self.is_token(SyntaxKind::OpenBraceToken) {
            return self.arena.add_function(
                FUNCTION_TYPE,
                pos,
                self.prev_token_end,
                FunctionData {
                    parameters,
                    results,
                    ..FunctionData::default()
                },
            );
        }

        let body = self.parse_function_body();
        self.arena.add_function(
            FUNCTION_LITERAL,
            pos,
            self.prev_token_end,
            FunctionData {
                parameters,
                results,
                body,
                ..FunctionData::default()
            },
        )
    }

    fn parse_call_expression(&mut self, pos: u32, expression: NodeIndex) -> NodeIndex {
        self.next_token();
        self.expr_level += 1;

        let mut arguments = Vec::new();
        let mut has_ellipsis = false;
        while !matches!(
            self.token(),
            SyntaxKind::CloseParenToken | SyntaxKind::EndOfFileToken
        ) {
            arguments.push(self.parse_expression());
            if self.parse_optional(SyntaxKind::DotDotDotToken) {
                has_ellipsis = true;
            }
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }

        self.expr_level -= 1;
        self.parse_expected(SyntaxKind::CloseParenToken);

        self.arena.add_call_expr(
            CALL_EXPRESSION,
            pos,
            self.prev_token_end,
            CallExprData {
                expression,
                arguments: NodeList::with_nodes(arguments),
                has_ellipsis,
            },
        )
    }

    /// `x[i]`, `x[lo:hi:max]` or a generic instantiation `f[A, B]`.
    fn parse_index_or_slice(&mut self, pos: u32, expression: NodeIndex) -> NodeIndex {
        self.next_token();
        self.expr_level += 1;

        let mut parts = [NodeIndex::NONE; 3];
        if !self.is_token(SyntaxKind::ColonToken) {
            parts[0] = self.parse_expression();
        }

        let mut colons = 0;
        while colons < 2 && self.parse_optional(SyntaxKind::ColonToken) {
            colons += 1;
            if !matches!(
                self.token(),
                SyntaxKind::ColonToken
                    | SyntaxKind::CloseBracketToken
                    | SyntaxKind::EndOfFileToken
            ) {
                parts[colons] = self.parse_expression();
            }
        }

        let mut indices = vec![parts[0]];
        if colons == 0 {
            while self.parse_optional(SyntaxKind::CommaToken) {
                if self.is_token(SyntaxKind::CloseBracketToken) {
                    break;
                }
                indices.push(self.parse_expression());
            }
        }

        self.expr_level -= 1;
        self.parse_expected(SyntaxKind::CloseBracketToken);

        if colons > 0 {
            self.arena.add_slice_expr(
                SLICE_EXPRESSION,
                pos,
                self.prev_token_end,
                SliceData {
                    expression,
                    low: parts[0],
                    high: parts[1],
                    max: parts[2],
                },
            )
        } else {
            self.arena.add_index_expr(
                INDEX_EXPRESSION,
                pos,
                self.prev_token_end,
                IndexData {
                    expression,
                    indices: NodeList::with_nodes(indices),
                },
            )
        }
    }

    fn parse_composite_literal(&mut self, pos: u32, type_node: NodeIndex) -> NodeIndex {
        self.next_token();
        self.expr_level += 1;

        let mut elements = Vec::new();
        while !matches!(
            self.token(),
            SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) {
            elements.push(self.parse_element());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }

        self.expr_level -= 1;
        self.parse_expected(SyntaxKind::CloseBraceToken);

        self.arena.add_composite_literal(
            COMPOSITE_LITERAL,
            pos,
            self.prev_token_end,
            CompositeLiteralData {
                type_node,
                elements: NodeList::with_nodes(elements),
            },
        )
    }

    fn parse_element(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let key = self.parse_element_value();
        if !self.parse_optional(SyntaxKind::ColonToken) {
            return key;
        }
        let value = self.parse_element_value();
        self.arena.add_binary_expr(
            KEY_VALUE_EXPRESSION,
            pos,
            self.prev_token_end,
            BinaryExprData {
                left: key,
                operator: SyntaxKind::ColonToken as u16,
                right: value,
            },
        )
    }

    /// Element value; a bare `{` is a literal whose type is elided.
    fn parse_element_value(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::OpenBraceToken) {
            let pos = self.token_pos();
            return self.parse_composite_literal(pos, NodeIndex::NONE);
        }
        self.parse_expression()
    }

    /// Expressions that may be followed by a composite literal body.
    fn is_literal_type(&self, index: NodeIndex) -> bool {
        match self.arena.kind(index) {
            Some(BAD_EXPRESSION | IDENTIFIER | ARRAY_TYPE | STRUCT_TYPE | MAP_TYPE) => true,
            Some(SELECTOR_EXPRESSION | INDEX_EXPRESSION) => self.is_type_name(index),
            _ => false,
        }
    }

    /// `T`, `pkg.T` and their instantiations. A bad expression counts too,
    /// so a broken `if` header does not swallow its body.
    fn is_type_name(&self, index: NodeIndex) -> bool {
        let Some(node) = self.arena.get(index) else {
            return false;
        };
        match node.kind {
            IDENTIFIER | BAD_EXPRESSION => true,
            SELECTOR_EXPRESSION => self
                .arena
                .get_selector_expr(node)
                .is_some_and(|sel| self.arena.kind(sel.expression) == Some(IDENTIFIER)),
            INDEX_EXPRESSION => self
                .arena
                .get_index_expr(node)
                .is_some_and(|idx| self.is_type_name(idx.expression)),
            _ => false,
        }
    }
}
