//! Type productions: named, composite and function types, parameter lists,
//! struct fields and interface elements.

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::node_access::NodeAccess;
use super::state::ParserState;
use super::syntax_kind_ext::*;
use looplint_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use looplint_scanner::SyntaxKind;

impl ParserState {
    /// Tokens that can begin a type.
    pub(crate) fn is_type_start(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::Identifier
                | SyntaxKind::AsteriskToken
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::OpenParenToken
                | SyntaxKind::MapKeyword
                | SyntaxKind::ChanKeyword
                | SyntaxKind::FuncKeyword
                | SyntaxKind::StructKeyword
                | SyntaxKind::InterfaceKeyword
                | SyntaxKind::LessThanMinusToken
        )
    }

    pub(crate) fn parse_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        if !self.enter_recursion() {
            return self.bad_expression(pos);
        }
        let result = self.parse_type_worker(pos);
        self.exit_recursion();
        result
    }

    fn parse_type_worker(&mut self, pos: u32) -> NodeIndex {
        match self.token() {
            SyntaxKind::Identifier => {
                let name = self.parse_identifier();
                self.parse_type_name_rest(name)
            }
            SyntaxKind::OpenBracketToken => self.parse_array_type(),
            SyntaxKind::AsteriskToken => {
                self.next_token();
                let operand = self.parse_type();
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
            SyntaxKind::MapKeyword => self.parse_map_type(),
            SyntaxKind::ChanKeyword | SyntaxKind::LessThanMinusToken => self.parse_chan_type(),
            SyntaxKind::FuncKeyword => {
                self.next_token();
                self.parse_signature(pos)
            }
            SyntaxKind::StructKeyword => self.parse_struct_type(),
            SyntaxKind::InterfaceKeyword => self.parse_interface_type(),
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let expression = self.parse_type();
                self.parse_expected(SyntaxKind::CloseParenToken);
                self.arena.add_wrapper(
                    PARENTHESIZED_EXPRESSION,
                    pos,
                    self.prev_token_end,
                    WrapperData { expression },
                )
            }
            _ => {
                self.error_expected("type");
                self.bad_expression(pos)
            }
        }
    }

    /// Continue a type that started with `name`: `pkg.T` and `T[args]`.
    pub(crate) fn parse_type_name_rest(&mut self, name: NodeIndex) -> NodeIndex {
        let pos = self.arena.get(name).map_or(self.token_pos(), |n| n.pos);
        let mut result = name;
        if self.parse_optional(SyntaxKind::DotToken) {
            let selector = self.parse_identifier();
            result = self.arena.add_selector_expr(
                SELECTOR_EXPRESSION,
                pos,
                self.prev_token_end,
                SelectorData {
                    expression: result,
                    name: selector,
                },
            );
        }
        if self.is_token(SyntaxKind::OpenBracketToken) {
            self.next_token();
            let indices = self.parse_type_list(SyntaxKind::CloseBracketToken);
            self.parse_expected(SyntaxKind::CloseBracketToken);
            result = self.arena.add_index_expr(
                INDEX_EXPRESSION,
                pos,
                self.prev_token_end,
                IndexData {
                    expression: result,
                    indices,
                },
            );
        }
        result
    }

    fn parse_type_list(&mut self, close: SyntaxKind) -> NodeList {
        let mut types = Vec::new();
        while !self.is_token(close) && !self.is_token(SyntaxKind::EndOfFileToken) {
            types.push(self.parse_type());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        NodeList::with_nodes(types)
    }

    fn parse_array_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();

        let length = match self.token() {
            SyntaxKind::CloseBracketToken => NodeIndex::NONE,
            SyntaxKind::DotDotDotToken => {
                let ellipsis_pos = self.token_pos();
                self.next_token();
                self.arena
                    .add_token(ELLIPSIS_LENGTH, ellipsis_pos, self.prev_token_end)
            }
            _ => {
                self.expr_level += 1;
                let length = self.parse_expression();
                self.expr_level -= 1;
                length
            }
        };
        self.parse_expected(SyntaxKind::CloseBracketToken);
        let element = self.parse_type();

        self.arena.add_array_type(
            ARRAY_TYPE,
            pos,
            self.prev_token_end,
            ArrayTypeData { length, element },
        )
    }

    fn parse_map_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let key = self.parse_type();
        self.parse_expected(SyntaxKind::CloseBracketToken);
        let value = self.parse_type();
        self.arena.add_map_type(
            MAP_TYPE,
            pos,
            self.prev_token_end,
            MapTypeData { key, value },
        )
    }

    /// `chan T`, `chan<- T` or `<-chan T`.
    pub(crate) fn parse_chan_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let direction = if self.parse_optional(SyntaxKind::LessThanMinusToken) {
            self.parse_expected(SyntaxKind::ChanKeyword);
            ChanDirection::Receive
        } else {
            self.next_token();
            if self.parse_optional(SyntaxKind::LessThanMinusToken) {
                ChanDirection::Send
            } else {
                ChanDirection::Both
            }
        };
        let element = self.parse_type();
        self.arena.add_chan_type(
            CHAN_TYPE,
            pos,
            self.prev_token_end,
            ChanTypeData { direction, element },
        )
    }

    /// Parameters and results after `func`, producing a `FUNCTION_TYPE`.
    pub(crate) fn parse_signature(&mut self, pos: u32) -> NodeIndex {
        let parameters = self.parse_parameters();
        let results = self.parse_results();
        self.arena.add_function(
            FUNCTION_TYPE,
            pos,
            self.prev_token_end,
            FunctionData {
                parameters,
                results,
                ..FunctionData::default()
            },
        )
    }

    // =========================================================================
    // Parameter lists
    // =========================================================================

    pub(crate) fn parse_parameters(&mut self) -> NodeList {
        if !self.parse_expected(SyntaxKind::OpenParenToken) {
            return NodeList::new();
        }
        self.parse_parameter_list(SyntaxKind::CloseParenToken, false)
    }

    pub(crate) fn parse_type_parameters(&mut self) -> NodeList {
        self.next_token();
        self.parse_parameter_list(SyntaxKind::CloseBracketToken, true)
    }

    /// Result list: parenthesized parameters, a single type, or nothing.
    pub(crate) fn parse_results(&mut self) -> NodeList {
        if self.is_token(SyntaxKind::OpenParenToken) {
            return self.parse_parameters();
        }
        if !Self::is_type_start(self.token()) {
            return NodeList::new();
        }
        let type_node = self.parse_type();
        let (pos, end) = self.node_span(type_node);
        let parameter = self.arena.add_field(
            PARAMETER,
            pos,
            end,
            FieldData {
                names: NodeList::new(),
                type_node,
                tag: NodeIndex::NONE,
            },
        );
        NodeList::with_nodes(vec![parameter])
    }

    /// Parse entries up to `close`, then group them the way Go does:
    /// once any entry is `name Type`, bare entries are names that share the
    /// next type; otherwise every entry is an unnamed type.
    fn parse_parameter_list(&mut self, close: SyntaxKind, type_parameters: bool) -> NodeList {
        let mut entries: Vec<(NodeIndex, NodeIndex)> = Vec::new();
        let mut named = false;

        while !self.is_token(close) && !self.is_token(SyntaxKind::EndOfFileToken) {
            if self.is_token(SyntaxKind::Identifier) {
                let name = self.parse_identifier();
                let token = self.token();
                if token == SyntaxKind::CommaToken || token == close {
                    entries.push((NodeIndex::NONE, name));
                } else if token == SyntaxKind::DotToken
                    || (token == SyntaxKind::OpenBracketToken
                        && !type_parameters
                        && !self.look_ahead_is_array_after_name())
                {
                    let type_node = self.parse_type_name_rest(name);
                    entries.push((NodeIndex::NONE, type_node));
                } else {
                    named = true;
                    let type_node = self.parse_parameter_type(type_parameters);
                    entries.push((name, type_node));
                }
            } else {
                let type_node = self.parse_parameter_type(type_parameters);
                entries.push((NodeIndex::NONE, type_node));
            }
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(close);

        if named || type_parameters {
            self.group_named_parameters(entries)
        } else {
            let parameters = entries
                .into_iter()
                .map(|(_, type_node)| {
                    let (pos, end) = self.node_span(type_node);
                    self.arena.add_field(
                        PARAMETER,
                        pos,
                        end,
                        FieldData {
                            names: NodeList::new(),
                            type_node,
                            tag: NodeIndex::NONE,
                        },
                    )
                })
                .collect();
            NodeList::with_nodes(parameters)
        }
    }

    fn group_named_parameters(&mut self, entries: Vec<(NodeIndex, NodeIndex)>) -> NodeList {
        let mut parameters = Vec::new();
        let mut pending: Vec<NodeIndex> = Vec::new();

        for (name, type_node) in entries {
            if name.is_none() {
                // A bare entry in a named list must be a name waiting for a type.
                if self.arena.kind(type_node) == Some(IDENTIFIER) {
                    pending.push(type_node);
                } else {
                    self.report_mixed_parameters(type_node);
                }
                continue;
            }
            pending.push(name);
            let pos = self.node_span(pending[0]).0;
            let end = self.node_span(type_node).1;
            parameters.push(self.arena.add_field(
                PARAMETER,
                pos,
                end,
                FieldData {
                    names: NodeList::with_nodes(std::mem::take(&mut pending)),
                    type_node,
                    tag: NodeIndex::NONE,
                },
            ));
        }

        if let Some(&dangling) = pending.first() {
            self.report_mixed_parameters(dangling);
        }
        NodeList::with_nodes(parameters)
    }

    fn report_mixed_parameters(&mut self, at: NodeIndex) {
        let (pos, end) = self.node_span(at);
        self.parse_error_at(
            pos,
            end.saturating_sub(pos),
            diagnostic_messages::MIXED_NAMED_PARAMETERS.to_string(),
            diagnostic_codes::MIXED_NAMED_PARAMETERS,
        );
    }

    fn parse_parameter_type(&mut self, type_parameters: bool) -> NodeIndex {
        if type_parameters {
            return self.parse_constraint();
        }
        if self.is_token(SyntaxKind::DotDotDotToken) {
            let pos = self.token_pos();
            self.next_token();
            let expression = self.parse_type();
            return self.arena.add_wrapper(
                VARIADIC_TYPE,
                pos,
                self.prev_token_end,
                WrapperData { expression },
            );
        }
        self.parse_type()
    }

    /// Type constraint: `~T`, unions `A | B`, or any plain type.
    fn parse_constraint(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let mut left = self.parse_constraint_term();
        while self.parse_optional(SyntaxKind::BarToken) {
            let right = self.parse_constraint_term();
            left = self.arena.add_binary_expr(
                BINARY_EXPRESSION,
                pos,
                self.prev_token_end,
                BinaryExprData {
                    left,
                    operator: SyntaxKind::BarToken as u16,
                    right,
                },
            );
        }
        left
    }

    fn parse_constraint_term(&mut self) -> NodeIndex {
        if !self.is_token(SyntaxKind::TildeToken) {
            return self.parse_type();
        }
        let pos = self.token_pos();
        self.next_token();
        let operand = self.parse_type();
        self.arena.add_unary_expr(
            UNARY_EXPRESSION,
            pos,
            self.prev_token_end,
            UnaryExprData {
                operator: SyntaxKind::TildeToken as u16,
                operand,
            },
        )
    }

    /// At `[` after a name: `name [N]T` declares an array-typed entry while
    /// `T[int]` instantiates a generic type.
    fn look_ahead_is_array_after_name(&mut self) -> bool {
        let snapshot = self.scanner.save_state();
        let current = self.current_token;
        let prev_end = self.prev_token_end;

        let mut depth = 0u32;
        loop {
            match self.token() {
                SyntaxKind::OpenBracketToken => depth += 1,
                SyntaxKind::CloseBracketToken => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.next_token();
                        break;
                    }
                }
                SyntaxKind::EndOfFileToken => break,
                _ => {}
            }
            self.next_token();
        }
        let is_array = Self::is_type_start(self.token());

        self.scanner.restore_state(snapshot);
        self.current_token = current;
        self.prev_token_end = prev_end;
        is_array
    }

    // =========================================================================
    // Struct and interface types
    // =========================================================================

    fn parse_struct_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenBraceToken);

        let mut members = Vec::new();
        while !matches!(
            self.token(),
            SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) {
            let start = self.token_pos();
            members.push(self.parse_field());
            self.expect_semicolon();
            if self.token_pos() == start {
                self.next_token();
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);

        self.arena.add_type_members(
            STRUCT_TYPE,
            pos,
            self.prev_token_end,
            TypeMembersData {
                members: NodeList::with_nodes(members),
            },
        )
    }

    fn parse_field(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let mut names = Vec::new();

        let type_node = if self.is_token(SyntaxKind::Identifier) {
            let name = self.parse_identifier();
            match self.token() {
                SyntaxKind::DotToken => self.parse_type_name_rest(name),
                SyntaxKind::StringLiteral
                | SyntaxKind::SemicolonToken
                | SyntaxKind::CloseBraceToken => name,
                SyntaxKind::OpenBracketToken if !self.look_ahead_is_array_after_name() => {
                    self.parse_type_name_rest(name)
                }
                _ => {
                    names.push(name);
                    while self.parse_optional(SyntaxKind::CommaToken) {
                        names.push(self.parse_identifier());
                    }
                    self.parse_type()
                }
            }
        } else {
            // Embedded `*T` or a syntax error reported by parse_type.
            self.parse_type()
        };

        let tag = if self.is_token(SyntaxKind::StringLiteral) {
            self.parse_literal()
        } else {
            NodeIndex::NONE
        };

        self.arena.add_field(
            FIELD,
            pos,
            self.prev_token_end,
            FieldData {
                names: NodeList::with_nodes(names),
                type_node,
                tag,
            },
        )
    }

    fn parse_interface_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenBraceToken);

        let mut members = Vec::new();
        while !matches!(
            self.token(),
            SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) {
            let start = self.token_pos();
            members.push(self.parse_interface_element());
            self.expect_semicolon();
            if self.token_pos() == start {
                self.next_token();
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);

        self.arena.add_type_members(
            INTERFACE_TYPE,
            pos,
            self.prev_token_end,
            TypeMembersData {
                members: NodeList::with_nodes(members),
            },
        )
    }

    /// Method `Name(params) results`, embedded interface or type union.
    fn parse_interface_element(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let mut names = Vec::new();

        let type_node = if self.is_token(SyntaxKind::Identifier) {
            let name = self.parse_identifier();
            if self.is_token(SyntaxKind::OpenParenToken) {
                names.push(name);
                let signature_pos = self.token_pos();
                self.parse_signature(signature_pos)
            } else {
                let embedded = self.parse_type_name_rest(name);
                self.parse_union_rest(pos, embedded)
            }
        } else {
            self.parse_constraint()
        };

        self.arena.add_field(
            METHOD_SPEC,
            pos,
            self.prev_token_end,
            FieldData {
                names: NodeList::with_nodes(names),
                type_node,
                tag: NodeIndex::NONE,
            },
        )
    }

    fn parse_union_rest(&mut self, pos: u32, mut left: NodeIndex) -> NodeIndex {
        while self.parse_optional(SyntaxKind::BarToken) {
            let right = self.parse_constraint_term();
            left = self.arena.add_binary_expr(
                BINARY_EXPRESSION,
                pos,
                self.prev_token_end,
                BinaryExprData {
                    left,
                    operator: SyntaxKind::BarToken as u16,
                    right,
                },
            );
        }
        left
    }

    pub(crate) fn node_span(&self, index: NodeIndex) -> (u32, u32) {
        self.arena
            .get(index)
            .map_or((self.prev_token_end, self.prev_token_end), |n| {
                (n.pos, n.end)
            })
    }
}
