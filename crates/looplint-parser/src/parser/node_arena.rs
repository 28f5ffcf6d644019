//! NodeArena creation methods (add_* methods).

use super::base::NodeIndex;
use super::node::*;
use super::node_access::NodeAccess;

/// Defines an `add_*` method that pushes a payload into its pool and links
/// the new node as parent of its children.
macro_rules! define_add {
    ($(#[$meta:meta])* $fn_name:ident, $pool:ident, $data:ty) => {
        $(#[$meta])*
        pub fn $fn_name(&mut self, kind: u16, pos: u32, end: u32, data: $data) -> NodeIndex {
            let data_index = self.$pool.len() as u32;
            self.$pool.push(data);
            let index = self.push_node(Node::with_data(kind, pos, end, data_index));
            self.link_children(index);
            index
        }
    };
}

impl NodeArena {
    /// Maximum pre-allocation to avoid capacity overflow in huge files.
    const MAX_NODE_PREALLOC: usize = 5_000_000;

    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    /// Create an arena sized from the source length.
    /// Go sources average roughly one node per six bytes.
    pub fn with_capacity(capacity: usize) -> NodeArena {
        let safe_capacity = capacity.min(Self::MAX_NODE_PREALLOC);
        let mut arena = NodeArena::default();
        arena.nodes = Vec::with_capacity(safe_capacity);
        arena.extended_info = Vec::with_capacity(safe_capacity);
        arena.identifiers = Vec::with_capacity(safe_capacity / 3);
        arena.literals = Vec::with_capacity(safe_capacity / 10);
        arena.call_exprs = Vec::with_capacity(safe_capacity / 10);
        arena.selector_exprs = Vec::with_capacity(safe_capacity / 10);
        arena.source_files = Vec::with_capacity(1);
        arena
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push_node(&mut self, node: Node) -> NodeIndex {
        let index = self.nodes.len() as u32;
        self.nodes.push(node);
        self.extended_info.push(ExtendedNodeInfo::default());
        NodeIndex(index)
    }

    fn link_children(&mut self, parent: NodeIndex) {
        for child in self.get_children(parent) {
            self.set_parent(child, parent);
        }
    }

    #[inline]
    fn set_parent(&mut self, child: NodeIndex, parent: NodeIndex) {
        if let Some(info) = self.extended_info.get_mut(child.0 as usize) {
            info.parent = parent;
        }
    }

    /// Add a node without a payload (empty statements, bad expressions).
    pub fn add_token(&mut self, kind: u16, pos: u32, end: u32) -> NodeIndex {
        self.push_node(Node::new(kind, pos, end))
    }

    pub fn add_identifier(&mut self, pos: u32, end: u32, text: String) -> NodeIndex {
        let data_index = self.identifiers.len() as u32;
        self.identifiers.push(IdentifierData { text });
        self.push_node(Node::with_data(
            super::syntax_kind_ext::IDENTIFIER,
            pos,
            end,
            data_index,
        ))
    }

    pub fn add_literal(&mut self, kind: u16, pos: u32, end: u32, text: String) -> NodeIndex {
        let data_index = self.literals.len() as u32;
        self.literals.push(LiteralData { text });
        self.push_node(Node::with_data(kind, pos, end, data_index))
    }

    define_add!(add_source_file, source_files, SourceFileData);
    define_add!(
        /// Import, var, const and type declarations.
        add_declaration, declarations, DeclarationData
    );
    define_add!(add_import_spec, import_specs, ImportSpecData);
    define_add!(add_value_spec, value_specs, ValueSpecData);
    define_add!(add_type_spec, type_specs, TypeSpecData);
    define_add!(
        /// Function declarations, literals and types.
        add_function, functions, FunctionData
    );
    define_add!(add_field, fields, FieldData);
    define_add!(add_block, blocks, BlockData);
    define_add!(add_wrapper, wrappers, WrapperData);
    define_add!(add_assignment, assignments, AssignmentData);
    define_add!(add_unary_expr, unary_exprs, UnaryExprData);
    define_add!(add_binary_expr, binary_exprs, BinaryExprData);
    define_add!(add_if_statement, if_statements, IfData);
    define_add!(add_for_statement, for_statements, ForData);
    define_add!(add_range_statement, range_statements, RangeData);
    define_add!(
        /// Expression switches, type switches and selects.
        add_switch_statement, switch_statements, SwitchData
    );
    define_add!(add_case_clause, case_clauses, CaseClauseData);
    define_add!(add_return_statement, return_statements, ReturnData);
    define_add!(add_branch_statement, branch_statements, BranchData);
    define_add!(add_labeled_statement, labeled_statements, LabeledData);
    define_add!(add_call_expr, call_exprs, CallExprData);
    define_add!(add_selector_expr, selector_exprs, SelectorData);
    define_add!(add_index_expr, index_exprs, IndexData);
    define_add!(add_slice_expr, slice_exprs, SliceData);
    define_add!(add_type_assertion, type_assertions, TypeAssertionData);
    define_add!(add_composite_literal, composite_literals, CompositeLiteralData);
    define_add!(add_array_type, array_types, ArrayTypeData);
    define_add!(add_map_type, map_types, MapTypeData);
    define_add!(add_chan_type, chan_types, ChanTypeData);
    define_add!(
        /// Struct and interface bodies.
        add_type_members, type_members, TypeMembersData
    );

    /// Widen a node's end after trailing tokens were consumed.
    pub fn set_end(&mut self, index: NodeIndex, end: u32) {
        if let Some(node) = self.nodes.get_mut(index.0 as usize) {
            node.end = end;
        }
    }
}
