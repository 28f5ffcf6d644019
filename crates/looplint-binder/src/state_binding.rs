//! Declaration binding: imports, top-level declarations, value and type
//! specs, and function signatures.

use crate::known_packages;
use crate::state::BinderState;
use crate::{ContainerKind, symbol_flags};
use looplint_parser::parser::node::{FieldData, FunctionData, ValueSpecData};
use looplint_parser::parser::syntax_kind_ext::*;
use looplint_parser::{NodeAccess, NodeArena, NodeIndex, NodeList};
use looplint_scanner::unquote_string;

impl BinderState {
    /// Phase 1: the package clause, imports and every top-level name.
    pub(crate) fn collect_file_declarations(&mut self, arena: &NodeArena, root: NodeIndex) {
        let Some(node) = arena.get(root) else {
            return;
        };
        let Some(source) = arena.get_source_file(node) else {
            return;
        };

        if let Some(name) = arena.get_identifier_text(source.package_name) {
            self.package_name = name.to_string();
        }

        for import_decl in source.imports.iter() {
            let Some(decl) = arena.get(import_decl).and_then(|n| arena.get_declaration(n)) else {
                continue;
            };
            for spec in decl.specs.iter() {
                self.bind_import_spec(arena, spec);
            }
        }

        for decl in source.declarations.iter() {
            self.collect_top_level_declaration(arena, decl);
        }
    }

    fn bind_import_spec(&mut self, arena: &NodeArena, spec: NodeIndex) {
        let Some(data) = arena.get(spec).and_then(|n| arena.get_import_spec(n)) else {
            return;
        };
        let Some(path) = arena
            .get_literal_text(data.path)
            .and_then(unquote_string)
        else {
            return;
        };

        let explicit = arena.get_identifier_text(data.name);
        match explicit {
            Some(".") => {
                tracing::trace!(path = %path, "dot import");
                self.dot_imports.push(path);
            }
            Some("_") => {}
            _ => {
                let local_name = explicit
                    .unwrap_or_else(|| known_packages::default_package_name(&path))
                    .to_string();
                let id = self
                    .symbols
                    .alloc(symbol_flags::PACKAGE_NAME, local_name.clone());
                if let Some(symbol) = self.symbols.get_mut(id) {
                    symbol.declarations.push(spec);
                    symbol.package_path = Some(path);
                }
                self.file_scope.set(local_name, id);
                self.record(data.name, id);
            }
        }
    }

    fn collect_top_level_declaration(&mut self, arena: &NodeArena, decl: NodeIndex) {
        let Some(node) = arena.get(decl) else {
            return;
        };
        match node.kind {
            FUNCTION_DECLARATION => {
                let Some(func) = arena.get_function(node) else {
                    return;
                };
                // Methods are reached through selectors, never by bare name.
                if !func.receiver.is_empty() {
                    return;
                }
                if let Some(name) = arena.get_identifier_text(func.name) {
                    self.declare_symbol(name, symbol_flags::FUNCTION, func.name, None);
                }
            }
            VAR_DECLARATION | CONST_DECLARATION => {
                let flags = if node.kind == VAR_DECLARATION {
                    symbol_flags::VARIABLE
                } else {
                    symbol_flags::CONSTANT
                };
                let Some(data) = arena.get_declaration(node) else {
                    return;
                };
                for spec in data.specs.iter() {
                    if let Some(value_spec) = arena.get(spec).and_then(|n| arena.get_value_spec(n)) {
                        self.declare_value_spec_names(arena, value_spec, flags);
                    }
                }
            }
            TYPE_DECLARATION => {
                let Some(data) = arena.get_declaration(node) else {
                    return;
                };
                for spec in data.specs.iter() {
                    if let Some(type_spec) = arena.get(spec).and_then(|n| arena.get_type_spec(n))
                        && let Some(name) = arena.get_identifier_text(type_spec.name)
                    {
                        self.declare_symbol(name, symbol_flags::TYPE, type_spec.name, None);
                    }
                }
            }
            _ => {}
        }
    }

    /// Phase 2: walk initializers, type expressions and function bodies.
    pub(crate) fn bind_file_bodies(&mut self, arena: &NodeArena, root: NodeIndex) {
        let Some(source) = arena.get(root).and_then(|n| arena.get_source_file(n)) else {
            return;
        };
        for decl in source.declarations.iter() {
            let Some(node) = arena.get(decl) else {
                continue;
            };
            match node.kind {
                FUNCTION_DECLARATION => self.bind_function_like(arena, decl),
                VAR_DECLARATION | CONST_DECLARATION | TYPE_DECLARATION => {
                    let Some(data) = arena.get_declaration(node) else {
                        continue;
                    };
                    for spec in data.specs.iter() {
                        self.bind_top_level_spec(arena, spec);
                    }
                }
                _ => self.bind_node(arena, decl),
            }
        }
    }

    /// Names were declared in phase 1; only the right-hand sides remain.
    fn bind_top_level_spec(&mut self, arena: &NodeArena, spec: NodeIndex) {
        let Some(node) = arena.get(spec) else {
            return;
        };
        if let Some(value_spec) = arena.get_value_spec(node) {
            self.bind_node(arena, value_spec.type_node);
            for value in value_spec.values.iter() {
                self.bind_node(arena, value);
            }
            // Declared types of untyped-spec names depend on resolved values.
            if value_spec.type_node.is_none() {
                self.infer_spec_types(arena, value_spec);
            }
        } else if let Some(type_spec) = arena.get_type_spec(node) {
            self.enter_scope(ContainerKind::Block, spec);
            self.declare_type_parameters(arena, &type_spec.type_parameters);
            self.bind_node(arena, type_spec.type_node);
            self.exit_scope();
        }
    }

    fn declare_value_spec_names(&mut self, arena: &NodeArena, spec: &ValueSpecData, flags: u32) {
        let declared_type = self.type_text(arena, spec.type_node);
        for name_node in spec.names.iter() {
            if let Some(name) = arena.get_identifier_text(name_node) {
                self.declare_symbol(name, flags, name_node, declared_type.clone());
            }
        }
    }

    fn infer_spec_types(&mut self, arena: &NodeArena, spec: &ValueSpecData) {
        if spec.names.len() != spec.values.len() {
            return;
        }
        for (name_node, value) in spec.names.iter().zip(spec.values.iter()) {
            let inferred = self.infer_expression_type(arena, value);
            if let Some(id) = self.get_node_symbol(name_node)
                && let Some(symbol) = self.symbols.get_mut(id)
                && symbol.declared_type.is_none()
            {
                symbol.declared_type = inferred;
            }
        }
    }

    /// Local `var`/`const`/`type` declaration inside a function body.
    pub(crate) fn bind_local_declaration(&mut self, arena: &NodeArena, decl: NodeIndex) {
        let Some(node) = arena.get(decl) else {
            return;
        };
        let Some(data) = arena.get_declaration(node) else {
            return;
        };
        match node.kind {
            VAR_DECLARATION | CONST_DECLARATION => {
                let flags = if node.kind == VAR_DECLARATION {
                    symbol_flags::VARIABLE
                } else {
                    symbol_flags::CONSTANT
                };
                for spec in data.specs.iter() {
                    let Some(value_spec) = arena.get(spec).and_then(|n| arena.get_value_spec(n))
                    else {
                        continue;
                    };
                    // A local name is in scope only after its spec.
                    self.bind_node(arena, value_spec.type_node);
                    for value in value_spec.values.iter() {
                        self.bind_node(arena, value);
                    }
                    self.declare_value_spec_names(arena, value_spec, flags);
                    if value_spec.type_node.is_none() {
                        self.infer_spec_types(arena, value_spec);
                    }
                }
            }
            TYPE_DECLARATION => {
                for spec in data.specs.iter() {
                    let Some(type_spec) = arena.get(spec).and_then(|n| arena.get_type_spec(n))
                    else {
                        continue;
                    };
                    // A local type is in scope inside its own definition.
                    if let Some(name) = arena.get_identifier_text(type_spec.name) {
                        self.declare_symbol(name, symbol_flags::TYPE, type_spec.name, None);
                    }
                    self.enter_scope(ContainerKind::Block, spec);
                    self.declare_type_parameters(arena, &type_spec.type_parameters);
                    self.bind_node(arena, type_spec.type_node);
                    self.exit_scope();
                }
            }
            _ => {}
        }
    }

    // =========================================================================
    // Functions
    // =========================================================================

    /// Function declarations and literals: one function scope holding type
    /// parameters, the receiver, parameters, results and the body's
    /// top-level statements.
    pub(crate) fn bind_function_like(&mut self, arena: &NodeArena, func_node: NodeIndex) {
        let Some(func) = arena.get(func_node).and_then(|n| arena.get_function(n)) else {
            return;
        };
        self.enter_scope(ContainerKind::Function, func_node);
        self.bind_signature(arena, func);
        if let Some(body) = arena.get(func.body).and_then(|n| arena.get_block(n)) {
            for statement in body.statements.iter() {
                self.bind_node(arena, statement);
            }
        }
        self.exit_scope();
    }

    fn bind_signature(&mut self, arena: &NodeArena, func: &FunctionData) {
        self.declare_type_parameters(arena, &func.type_parameters);
        // Receiver type parameters (`func (l *List[T]) ...`) are declared by
        // the receiver type's index expression.
        for receiver in func.receiver.iter() {
            self.declare_receiver_type_parameters(arena, receiver);
        }
        self.declare_parameter_list(arena, &func.receiver, true);
        self.declare_parameter_list(arena, &func.parameters, false);
        self.declare_parameter_list(arena, &func.results, false);
    }

    fn declare_type_parameters(&mut self, arena: &NodeArena, list: &NodeList) {
        // All type parameter names are in scope for every constraint.
        for param in list.iter() {
            if let Some(field) = arena.get(param).and_then(|n| arena.get_field(n)) {
                for name_node in field.names.iter() {
                    if let Some(name) = arena.get_identifier_text(name_node) {
                        self.declare_symbol(name, symbol_flags::TYPE, name_node, None);
                    }
                }
            }
        }
        for param in list.iter() {
            if let Some(field) = arena.get(param).and_then(|n| arena.get_field(n)) {
                self.bind_node(arena, field.type_node);
            }
        }
    }

    fn declare_receiver_type_parameters(&mut self, arena: &NodeArena, receiver: NodeIndex) {
        let Some(field) = arena.get(receiver).and_then(|n| arena.get_field(n)) else {
            return;
        };
        let type_node = strip_pointer(arena, field.type_node);
        let Some(index) = arena.get(type_node).and_then(|n| arena.get_index_expr(n)) else {
            return;
        };
        for param in index.indices.iter() {
            if let Some(name) = arena.get_identifier_text(param) {
                self.declare_symbol(name, symbol_flags::TYPE, param, None);
            }
        }
    }

    /// Parameter types are resolved before any parameter name is declared.
    fn declare_parameter_list(&mut self, arena: &NodeArena, list: &NodeList, is_receiver: bool) {
        let fields: Vec<&FieldData> = list
            .iter()
            .filter_map(|param| arena.get(param).and_then(|n| arena.get_field(n)))
            .collect();
        for field in &fields {
            if is_receiver {
                self.bind_receiver_type(arena, field.type_node);
            } else {
                self.bind_node(arena, field.type_node);
            }
        }
        for field in fields {
            let declared_type = self.type_text(arena, field.type_node);
            for name_node in field.names.iter() {
                if let Some(name) = arena.get_identifier_text(name_node) {
                    self.declare_symbol(
                        name,
                        symbol_flags::PARAMETER | symbol_flags::VARIABLE,
                        name_node,
                        declared_type.clone(),
                    );
                }
            }
        }
    }

    /// `List[T]` in a receiver names type parameters rather than
    /// instantiating, so only the base type name is resolved.
    fn bind_receiver_type(&mut self, arena: &NodeArena, type_node: NodeIndex) {
        let base = strip_pointer(arena, type_node);
        match arena.get(base).and_then(|n| arena.get_index_expr(n)) {
            Some(index) => self.bind_node(arena, index.expression),
            None => self.bind_node(arena, type_node),
        }
    }
}

fn strip_pointer(arena: &NodeArena, type_node: NodeIndex) -> NodeIndex {
    arena
        .get(type_node)
        .filter(|n| n.kind == STAR_EXPRESSION)
        .and_then(|n| arena.get_unary_expr(n))
        .map_or(type_node, |data| data.operand)
}
