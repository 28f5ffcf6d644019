//! Typed accessors (get_* methods) and the `NodeAccess` query trait.

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::syntax_kind_ext::*;

/// Defines a typed accessor that returns the payload of `node` when its
/// kind is one of the listed kinds.
macro_rules! define_get {
    ($(#[$meta:meta])* $fn_name:ident, $pool:ident, $data:ty, [$($kind:ident),+ $(,)?]) => {
        $(#[$meta])*
        #[inline]
        pub fn $fn_name(&self, node: &Node) -> Option<&$data> {
            if node.has_data() && matches!(node.kind, $($kind)|+) {
                self.$pool.get(node.data_index as usize)
            } else {
                None
            }
        }
    };
}

impl NodeArena {
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            return None;
        }
        self.nodes.get(index.0 as usize)
    }

    #[inline]
    pub fn get_extended(&self, index: NodeIndex) -> Option<&ExtendedNodeInfo> {
        if index.is_none() {
            return None;
        }
        self.extended_info.get(index.0 as usize)
    }

    #[inline]
    pub fn get_identifier(&self, node: &Node) -> Option<&IdentifierData> {
        if node.has_data() && node.kind == IDENTIFIER {
            self.identifiers.get(node.data_index as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get_literal(&self, node: &Node) -> Option<&LiteralData> {
        if node.has_data() && is_literal_kind(node.kind) {
            self.literals.get(node.data_index as usize)
        } else {
            None
        }
    }

    define_get!(get_source_file, source_files, SourceFileData, [SOURCE_FILE]);
    define_get!(
        get_declaration,
        declarations,
        DeclarationData,
        [IMPORT_DECLARATION, VAR_DECLARATION, CONST_DECLARATION, TYPE_DECLARATION]
    );
    define_get!(get_import_spec, import_specs, ImportSpecData, [IMPORT_SPEC]);
    define_get!(get_value_spec, value_specs, ValueSpecData, [VALUE_SPEC]);
    define_get!(get_type_spec, type_specs, TypeSpecData, [TYPE_SPEC]);
    define_get!(
        /// Function declaration, function literal or function type.
        get_function,
        functions,
        FunctionData,
        [FUNCTION_DECLARATION, FUNCTION_LITERAL, FUNCTION_TYPE]
    );
    define_get!(get_field, fields, FieldData, [PARAMETER, FIELD, METHOD_SPEC]);
    define_get!(get_block, blocks, BlockData, [BLOCK]);
    define_get!(
        get_wrapper,
        wrappers,
        WrapperData,
        [
            EXPRESSION_STATEMENT,
            GO_STATEMENT,
            DEFER_STATEMENT,
            DECLARATION_STATEMENT,
            PARENTHESIZED_EXPRESSION,
            VARIADIC_TYPE,
        ]
    );
    define_get!(get_assignment, assignments, AssignmentData, [ASSIGNMENT_STATEMENT]);
    define_get!(
        get_unary_expr,
        unary_exprs,
        UnaryExprData,
        [UNARY_EXPRESSION, STAR_EXPRESSION, INC_DEC_STATEMENT]
    );
    define_get!(
        get_binary_expr,
        binary_exprs,
        BinaryExprData,
        [BINARY_EXPRESSION, SEND_STATEMENT, KEY_VALUE_EXPRESSION]
    );
    define_get!(get_if_statement, if_statements, IfData, [IF_STATEMENT]);
    define_get!(get_for_statement, for_statements, ForData, [FOR_STATEMENT]);
    define_get!(get_range_statement, range_statements, RangeData, [RANGE_STATEMENT]);
    define_get!(
        get_switch_statement,
        switch_statements,
        SwitchData,
        [SWITCH_STATEMENT, TYPE_SWITCH_STATEMENT, SELECT_STATEMENT]
    );
    define_get!(get_case_clause, case_clauses, CaseClauseData, [CASE_CLAUSE, COMM_CLAUSE]);
    define_get!(get_return_statement, return_statements, ReturnData, [RETURN_STATEMENT]);
    define_get!(get_branch_statement, branch_statements, BranchData, [BRANCH_STATEMENT]);
    define_get!(get_labeled_statement, labeled_statements, LabeledData, [LABELED_STATEMENT]);
    define_get!(get_call_expr, call_exprs, CallExprData, [CALL_EXPRESSION]);
    define_get!(get_selector_expr, selector_exprs, SelectorData, [SELECTOR_EXPRESSION]);
    define_get!(get_index_expr, index_exprs, IndexData, [INDEX_EXPRESSION]);
    define_get!(get_slice_expr, slice_exprs, SliceData, [SLICE_EXPRESSION]);
    define_get!(
        get_type_assertion,
        type_assertions,
        TypeAssertionData,
        [TYPE_ASSERTION_EXPRESSION]
    );
    define_get!(
        get_composite_literal,
        composite_literals,
        CompositeLiteralData,
        [COMPOSITE_LITERAL]
    );
    define_get!(get_array_type, array_types, ArrayTypeData, [ARRAY_TYPE]);
    define_get!(get_map_type, map_types, MapTypeData, [MAP_TYPE]);
    define_get!(get_chan_type, chan_types, ChanTypeData, [CHAN_TYPE]);
    define_get!(
        get_type_members,
        type_members,
        TypeMembersData,
        [STRUCT_TYPE, INTERFACE_TYPE]
    );
}

/// Read-only queries over a parsed tree.
pub trait NodeAccess {
    /// Get the node kind
    fn kind(&self, index: NodeIndex) -> Option<u16>;

    /// Get the source position range
    fn pos_end(&self, index: NodeIndex) -> Option<(u32, u32)>;

    /// Check if a node exists
    fn exists(&self, index: NodeIndex) -> bool {
        !index.is_none() && self.kind(index).is_some()
    }

    /// Get identifier text (if this is an identifier node)
    fn get_identifier_text(&self, index: NodeIndex) -> Option<&str>;

    /// Get literal text as written (if this is a literal node)
    fn get_literal_text(&self, index: NodeIndex) -> Option<&str>;

    /// Get the parent link, NONE for the root
    fn get_parent(&self, index: NodeIndex) -> NodeIndex;

    /// Get children of a node in source order
    fn get_children(&self, index: NodeIndex) -> Vec<NodeIndex>;
}

impl NodeAccess for NodeArena {
    fn kind(&self, index: NodeIndex) -> Option<u16> {
        self.get(index).map(|n| n.kind)
    }

    fn pos_end(&self, index: NodeIndex) -> Option<(u32, u32)> {
        self.get(index).map(|n| (n.pos, n.end))
    }

    fn get_identifier_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        self.get_identifier(node).map(|data| data.text.as_str())
    }

    fn get_literal_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        self.get_literal(node).map(|data| data.text.as_str())
    }

    fn get_parent(&self, index: NodeIndex) -> NodeIndex {
        self.get_extended(index)
            .map_or(NodeIndex::NONE, |info| info.parent)
    }

    fn get_children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let Some(node) = self.get(index) else {
            return Vec::new();
        };

        let add_opt = |children: &mut Vec<NodeIndex>, idx: NodeIndex| {
            if idx.is_some() {
                children.push(idx);
            }
        };
        let add_list = |children: &mut Vec<NodeIndex>, list: &NodeList| {
            children.extend(list.iter().filter(|idx| idx.is_some()));
        };

        let mut children = Vec::new();

        match node.kind {
            SOURCE_FILE => {
                if let Some(data) = self.get_source_file(node) {
                    add_opt(&mut children, data.package_name);
                    add_list(&mut children, &data.imports);
                    add_list(&mut children, &data.declarations);
                }
            }
            IMPORT_DECLARATION | VAR_DECLARATION | CONST_DECLARATION | TYPE_DECLARATION => {
                if let Some(data) = self.get_declaration(node) {
                    add_list(&mut children, &data.specs);
                }
            }
            IMPORT_SPEC => {
                if let Some(data) = self.get_import_spec(node) {
                    add_opt(&mut children, data.name);
                    add_opt(&mut children, data.path);
                }
            }
            VALUE_SPEC => {
                if let Some(data) = self.get_value_spec(node) {
                    add_list(&mut children, &data.names);
                    add_opt(&mut children, data.type_node);
                    add_list(&mut children, &data.values);
                }
            }
            TYPE_SPEC => {
                if let Some(data) = self.get_type_spec(node) {
                    add_opt(&mut children, data.name);
                    add_list(&mut children, &data.type_parameters);
                    add_opt(&mut children, data.type_node);
                }
            }
            FUNCTION_DECLARATION | FUNCTION_LITERAL | FUNCTION_TYPE => {
                if let Some(data) = self.get_function(node) {
                    add_list(&mut children, &data.receiver);
                    add_opt(&mut children, data.name);
                    add_list(&mut children, &data.type_parameters);
                    add_list(&mut children, &data.parameters);
                    add_list(&mut children, &data.results);
                    add_opt(&mut children, data.body);
                }
            }
            PARAMETER | FIELD | METHOD_SPEC => {
                if let Some(data) = self.get_field(node) {
                    add_list(&mut children, &data.names);
                    add_opt(&mut children, data.type_node);
                    add_opt(&mut children, data.tag);
                }
            }
            BLOCK => {
                if let Some(data) = self.get_block(node) {
                    add_list(&mut children, &data.statements);
                }
            }
            EXPRESSION_STATEMENT
            | GO_STATEMENT
            | DEFER_STATEMENT
            | DECLARATION_STATEMENT
            | PARENTHESIZED_EXPRESSION
            | VARIADIC_TYPE => {
                if let Some(data) = self.get_wrapper(node) {
                    add_opt(&mut children, data.expression);
                }
            }
            ASSIGNMENT_STATEMENT => {
                if let Some(data) = self.get_assignment(node) {
                    add_list(&mut children, &data.left);
                    add_list(&mut children, &data.right);
                }
            }
            UNARY_EXPRESSION | STAR_EXPRESSION | INC_DEC_STATEMENT => {
                if let Some(data) = self.get_unary_expr(node) {
                    add_opt(&mut children, data.operand);
                }
            }
            BINARY_EXPRESSION | SEND_STATEMENT | KEY_VALUE_EXPRESSION => {
                if let Some(data) = self.get_binary_expr(node) {
                    add_opt(&mut children, data.left);
                    add_opt(&mut children, data.right);
                }
            }
            IF_STATEMENT => {
                if let Some(data) = self.get_if_statement(node) {
                    add_opt(&mut children, data.init);
                    add_opt(&mut children, data.condition);
                    add_opt(&mut children, data.then_block);
                    add_opt(&mut children, data.else_branch);
                }
            }
            FOR_STATEMENT => {
                if let Some(data) = self.get_for_statement(node) {
                    add_opt(&mut children, data.init);
                    add_opt(&mut children, data.condition);
                    add_opt(&mut children, data.post);
                    add_opt(&mut children, data.body);
                }
            }
            RANGE_STATEMENT => {
                if let Some(data) = self.get_range_statement(node) {
                    add_opt(&mut children, data.key);
                    add_opt(&mut children, data.value);
                    add_opt(&mut children, data.expression);
                    add_opt(&mut children, data.body);
                }
            }
            SWITCH_STATEMENT | TYPE_SWITCH_STATEMENT | SELECT_STATEMENT => {
                if let Some(data) = self.get_switch_statement(node) {
                    add_opt(&mut children, data.init);
                    add_opt(&mut children, data.tag);
                    add_list(&mut children, &data.clauses);
                }
            }
            CASE_CLAUSE | COMM_CLAUSE => {
                if let Some(data) = self.get_case_clause(node) {
                    add_list(&mut children, &data.expressions);
                    add_opt(&mut children, data.comm);
                    add_list(&mut children, &data.statements);
                }
            }
            RETURN_STATEMENT => {
                if let Some(data) = self.get_return_statement(node) {
                    add_list(&mut children, &data.results);
                }
            }
            BRANCH_STATEMENT => {
                if let Some(data) = self.get_branch_statement(node) {
                    add_opt(&mut children, data.label);
                }
            }
            LABELED_STATEMENT => {
                if let Some(data) = self.get_labeled_statement(node) {
                    add_opt(&mut children, data.label);
                    add_opt(&mut children, data.statement);
                }
            }
            CALL_EXPRESSION => {
                if let Some(data) = self.get_call_expr(node) {
                    add_opt(&mut children, data.expression);
                    add_list(&mut children, &data.arguments);
                }
            }
            SELECTOR_EXPRESSION => {
                if let Some(data) = self.get_selector_expr(node) {
                    add_opt(&mut children, data.expression);
                    add_opt(&mut children, data.name);
                }
            }
            INDEX_EXPRESSION => {
                if let Some(data) = self.get_index_expr(node) {
                    add_opt(&mut children, data.expression);
                    add_list(&mut children, &data.indices);
                }
            }
            SLICE_EXPRESSION => {
                if let Some(data) = self.get_slice_expr(node) {
                    add_opt(&mut children, data.expression);
                    add_opt(&mut children, data.low);
                    add_opt(&mut children, data.high);
                    add_opt(&mut children, data.max);
                }
            }
            TYPE_ASSERTION_EXPRESSION => {
                if let Some(data) = self.get_type_assertion(node) {
                    add_opt(&mut children, data.expression);
                    add_opt(&mut children, data.type_node);
                }
            }
            COMPOSITE_LITERAL => {
                if let Some(data) = self.get_composite_literal(node) {
                    add_opt(&mut children, data.type_node);
                    add_list(&mut children, &data.elements);
                }
            }
            ARRAY_TYPE => {
                if let Some(data) = self.get_array_type(node) {
                    add_opt(&mut children, data.length);
                    add_opt(&mut children, data.element);
                }
            }
            MAP_TYPE => {
                if let Some(data) = self.get_map_type(node) {
                    add_opt(&mut children, data.key);
                    add_opt(&mut children, data.value);
                }
            }
            CHAN_TYPE => {
                if let Some(data) = self.get_chan_type(node) {
                    add_opt(&mut children, data.element);
                }
            }
            STRUCT_TYPE | INTERFACE_TYPE => {
                if let Some(data) = self.get_type_members(node) {
                    add_list(&mut children, &data.members);
                }
            }
            // Identifiers, literals, empty statements, bad expressions
            _ => {}
        }

        children
    }
}
