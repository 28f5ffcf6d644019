//! Statement and expression walks: scope entry/exit per Go block and
//! identifier resolution.

use crate::state::BinderState;
use crate::{ContainerKind, symbol_flags};
use looplint_parser::parser::syntax_kind_ext::*;
use looplint_parser::{NodeAccess, NodeArena, NodeIndex, NodeList};
use looplint_scanner::SyntaxKind;

impl BinderState {
    pub(crate) fn bind_node(&mut self, arena: &NodeArena, idx: NodeIndex) {
        let Some(node) = arena.get(idx) else {
            return;
        };

        match node.kind {
            IDENTIFIER => {
                self.resolve_identifier_use(arena, idx);
            }
            BLOCK => {
                self.enter_scope(ContainerKind::Block, idx);
                if let Some(block) = arena.get_block(node) {
                    self.bind_list(arena, &block.statements);
                }
                self.exit_scope();
            }
            FUNCTION_LITERAL | FUNCTION_DECLARATION => self.bind_function_like(arena, idx),
            DECLARATION_STATEMENT => {
                if let Some(wrapper) = arena.get_wrapper(node) {
                    self.bind_local_declaration(arena, wrapper.expression);
                }
            }
            ASSIGNMENT_STATEMENT => self.bind_assignment(arena, idx),
            IF_STATEMENT => {
                let Some(data) = arena.get_if_statement(node) else {
                    return;
                };
                self.enter_scope(ContainerKind::Block, idx);
                self.bind_node(arena, data.init);
                self.bind_node(arena, data.condition);
                self.bind_node(arena, data.then_block);
                self.bind_node(arena, data.else_branch);
                self.exit_scope();
            }
            FOR_STATEMENT => {
                let Some(data) = arena.get_for_statement(node) else {
                    return;
                };
                self.enter_scope(ContainerKind::Block, idx);
                self.bind_node(arena, data.init);
                self.bind_node(arena, data.condition);
                self.bind_node(arena, data.post);
                self.bind_node(arena, data.body);
                self.exit_scope();
            }
            RANGE_STATEMENT => self.bind_range(arena, idx),
            SWITCH_STATEMENT | SELECT_STATEMENT => {
                let Some(data) = arena.get_switch_statement(node) else {
                    return;
                };
                self.enter_scope(ContainerKind::Block, idx);
                self.bind_node(arena, data.init);
                self.bind_node(arena, data.tag);
                for clause in data.clauses.iter() {
                    self.bind_case_clause(arena, clause, None);
                }
                self.exit_scope();
            }
            TYPE_SWITCH_STATEMENT => self.bind_type_switch(arena, idx),
            LABELED_STATEMENT => {
                if let Some(data) = arena.get_labeled_statement(node) {
                    self.bind_node(arena, data.statement);
                }
            }
            // Labels live in their own namespace.
            BRANCH_STATEMENT => {}
            SELECTOR_EXPRESSION => self.bind_selector(arena, idx),
            COMPOSITE_LITERAL => self.bind_composite_literal(arena, idx),
            PARAMETER | FIELD | METHOD_SPEC => {
                // Field and method names are not scope entries.
                if let Some(field) = arena.get_field(node) {
                    self.bind_node(arena, field.type_node);
                }
            }
            FUNCTION_TYPE => {
                if let Some(func) = arena.get_function(node) {
                    self.bind_list(arena, &func.type_parameters);
                    self.bind_list(arena, &func.parameters);
                    self.bind_list(arena, &func.results);
                }
            }
            _ => {
                for child in arena.get_children(idx) {
                    self.bind_node(arena, child);
                }
            }
        }
    }

    fn bind_list(&mut self, arena: &NodeArena, list: &NodeList) {
        for idx in list.iter() {
            self.bind_node(arena, idx);
        }
    }

    /// Resolve an identifier in expression position and record the result.
    pub(crate) fn resolve_identifier_use(
        &mut self,
        arena: &NodeArena,
        idx: NodeIndex,
    ) -> Option<crate::SymbolId> {
        let name = arena.get_identifier_text(idx)?;
        if name == "_" {
            return None;
        }
        let id = self.resolve_name(name)?;
        self.record(idx, id);
        Some(id)
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn bind_assignment(&mut self, arena: &NodeArena, idx: NodeIndex) {
        let Some(data) = arena.get(idx).and_then(|n| arena.get_assignment(n)) else {
            return;
        };
        // The right-hand side is resolved before any new name is declared,
        // so `t := t` refers to the outer `t`.
        self.bind_list(arena, &data.right);

        if data.operator != SyntaxKind::ColonEqualsToken as u16 {
            self.bind_list(arena, &data.left);
            return;
        }

        let one_to_one = data.left.len() == data.right.len();
        for (position, target) in data.left.iter().enumerate() {
            let Some(name) = arena.get_identifier_text(target) else {
                self.bind_node(arena, target);
                continue;
            };
            if name == "_" {
                continue;
            }
            // `a, err := ...` reuses an `err` already declared in this scope.
            if let Some(existing) = self.declared_in_current_scope(name) {
                self.record(target, existing);
                continue;
            }
            let declared_type = if one_to_one {
                data.right
                    .get(position)
                    .and_then(|value| self.infer_expression_type(arena, value))
            } else {
                None
            };
            self.declare_symbol(name, symbol_flags::VARIABLE, target, declared_type);
        }
    }

    fn bind_range(&mut self, arena: &NodeArena, idx: NodeIndex) {
        let Some(data) = arena.get(idx).and_then(|n| arena.get_range_statement(n)) else {
            return;
        };
        self.enter_scope(ContainerKind::Block, idx);
        self.bind_node(arena, data.expression);
        if data.operator == SyntaxKind::ColonEqualsToken as u16 {
            for target in [data.key, data.value] {
                if let Some(name) = arena.get_identifier_text(target) {
                    self.declare_symbol(name, symbol_flags::VARIABLE, target, None);
                }
            }
        } else {
            self.bind_node(arena, data.key);
            self.bind_node(arena, data.value);
        }
        self.bind_node(arena, data.body);
        self.exit_scope();
    }

    /// `switch v := x.(type)` declares `v` afresh in every clause.
    fn bind_type_switch(&mut self, arena: &NodeArena, idx: NodeIndex) {
        let Some(data) = arena.get(idx).and_then(|n| arena.get_switch_statement(n)) else {
            return;
        };
        self.enter_scope(ContainerKind::Block, idx);
        self.bind_node(arena, data.init);

        let mut guard_name = None;
        let tag = arena.get(data.tag);
        match tag.map(|n| n.kind) {
            Some(ASSIGNMENT_STATEMENT) => {
                if let Some(assign) = tag.and_then(|n| arena.get_assignment(n)) {
                    self.bind_list(arena, &assign.right);
                    if let Some(target) = assign.left.get(0)
                        && let Some(name) = arena.get_identifier_text(target)
                        && name != "_"
                    {
                        guard_name = Some(name.to_string());
                        self.declare_symbol(name, symbol_flags::VARIABLE, target, None);
                    }
                }
            }
            _ => self.bind_node(arena, data.tag),
        }

        for clause in data.clauses.iter() {
            self.bind_case_clause(arena, clause, guard_name.as_deref());
        }
        self.exit_scope();
    }

    fn bind_case_clause(&mut self, arena: &NodeArena, clause: NodeIndex, guard: Option<&str>) {
        let Some(data) = arena.get(clause).and_then(|n| arena.get_case_clause(n)) else {
            return;
        };
        self.enter_scope(ContainerKind::Block, clause);
        self.bind_list(arena, &data.expressions);
        self.bind_node(arena, data.comm);
        if let Some(name) = guard {
            // A single-type case narrows the guard to that type.
            let declared_type = if data.expressions.len() == 1 {
                data.expressions
                    .get(0)
                    .and_then(|type_node| self.type_text(arena, type_node))
            } else {
                None
            };
            if let Some(id) =
                self.declare_symbol(name, symbol_flags::VARIABLE, NodeIndex::NONE, declared_type)
                && let Some(symbol) = self.symbols.get_mut(id)
            {
                symbol.declarations.clear();
                symbol.declarations.push(clause);
            }
        }
        self.bind_list(arena, &data.statements);
        self.exit_scope();
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// `X.Sel`: a package-qualified name when X names an import, otherwise a
    /// member of whatever X resolves to.
    fn bind_selector(&mut self, arena: &NodeArena, idx: NodeIndex) {
        let Some(data) = arena.get(idx).and_then(|n| arena.get_selector_expr(n)) else {
            return;
        };
        let Some(member_name) = arena.get_identifier_text(data.name) else {
            self.bind_node(arena, data.expression);
            return;
        };

        let base = match arena.kind(data.expression) {
            Some(IDENTIFIER) => self.resolve_identifier_use(arena, data.expression),
            Some(SELECTOR_EXPRESSION) => {
                self.bind_node(arena, data.expression);
                arena
                    .get(data.expression)
                    .and_then(|n| arena.get_selector_expr(n))
                    .and_then(|inner| self.get_node_symbol(inner.name))
            }
            _ => {
                self.bind_node(arena, data.expression);
                None
            }
        };
        let Some(base) = base else {
            return;
        };

        let package_path = self
            .symbols
            .get(base)
            .filter(|symbol| symbol.has_flag(symbol_flags::PACKAGE_NAME))
            .and_then(|symbol| symbol.package_path.clone());
        let member = match package_path {
            Some(path) => self.package_member(&path, member_name),
            None => self.value_member(base, member_name),
        };
        self.record(data.name, member);
    }

    /// Keys of struct literals are field names and stay unresolved; only map
    /// literal keys are expressions.
    fn bind_composite_literal(&mut self, arena: &NodeArena, idx: NodeIndex) {
        let Some(data) = arena.get(idx).and_then(|n| arena.get_composite_literal(n)) else {
            return;
        };
        self.bind_node(arena, data.type_node);
        let keys_are_expressions = arena.kind(data.type_node) == Some(MAP_TYPE);
        for element in data.elements.iter() {
            let key_value = arena
                .get(element)
                .filter(|n| n.kind == KEY_VALUE_EXPRESSION)
                .and_then(|n| arena.get_binary_expr(n));
            match key_value {
                Some(pair) => {
                    if keys_are_expressions || arena.kind(pair.left) != Some(IDENTIFIER) {
                        self.bind_node(arena, pair.left);
                    }
                    self.bind_node(arena, pair.right);
                }
                None => self.bind_node(arena, element),
            }
        }
    }
}
