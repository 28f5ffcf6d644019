//! Thin node headers and typed data pools.
//!
//! Every node is a 16-byte `Node` header. Kind-specific payloads live in
//! per-kind pools on `NodeArena`, addressed by `Node::data_index`.

use super::base::{NodeIndex, NodeList};
use serde::Serialize;
use std::sync::Arc;

/// Marker for nodes that carry no pool payload.
pub const NO_DATA: u32 = u32::MAX;

/// 16-byte node header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Node {
    pub kind: u16,
    pub flags: u16,
    pub pos: u32,
    pub end: u32,
    pub data_index: u32,
}

impl Node {
    #[inline]
    pub fn new(kind: u16, pos: u32, end: u32) -> Node {
        Node {
            kind,
            flags: 0,
            pos,
            end,
            data_index: NO_DATA,
        }
    }

    #[inline]
    pub fn with_data(kind: u16, pos: u32, end: u32, data_index: u32) -> Node {
        Node {
            kind,
            flags: 0,
            pos,
            end,
            data_index,
        }
    }

    #[inline]
    pub fn has_data(&self) -> bool {
        self.data_index != NO_DATA
    }
}

/// Side table entry kept parallel to `NodeArena::nodes`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtendedNodeInfo {
    pub parent: NodeIndex,
}

impl Default for ExtendedNodeInfo {
    fn default() -> ExtendedNodeInfo {
        ExtendedNodeInfo {
            parent: NodeIndex::NONE,
        }
    }
}

// =============================================================================
// Payloads
// =============================================================================

#[derive(Clone, Debug, Serialize)]
pub struct IdentifierData {
    pub text: String,
}

/// Literal token text exactly as written, including quotes.
#[derive(Clone, Debug, Serialize)]
pub struct LiteralData {
    pub text: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct SourceFileData {
    pub file_name: String,
    #[serde(skip)]
    pub text: Arc<str>,
    pub package_name: NodeIndex,
    pub imports: NodeList,
    pub declarations: NodeList,
}

/// `import`, `var`, `const` and `type` declarations, grouped or not.
#[derive(Clone, Debug, Serialize)]
pub struct DeclarationData {
    pub specs: NodeList,
}

/// `name "path"`. A dot import has an identifier named `.`.
#[derive(Clone, Debug, Serialize)]
pub struct ImportSpecData {
    pub name: NodeIndex,
    pub path: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ValueSpecData {
    pub names: NodeList,
    pub type_node: NodeIndex,
    pub values: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct TypeSpecData {
    pub name: NodeIndex,
    pub type_parameters: NodeList,
    pub is_alias: bool,
    pub type_node: NodeIndex,
}

/// Shared by function declarations, function literals and function types.
#[derive(Clone, Debug, Default, Serialize)]
pub struct FunctionData {
    pub receiver: NodeList,
    pub name: NodeIndex,
    pub type_parameters: NodeList,
    pub parameters: NodeList,
    pub results: NodeList,
    pub body: NodeIndex,
}

/// Parameters, struct fields and interface elements.
#[derive(Clone, Debug, Serialize)]
pub struct FieldData {
    pub names: NodeList,
    pub type_node: NodeIndex,
    pub tag: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct BlockData {
    pub statements: NodeList,
}

/// Single-expression wrappers: expression/go/defer statements, parentheses,
/// variadic types and declaration statements.
#[derive(Clone, Debug, Serialize)]
pub struct WrapperData {
    pub expression: NodeIndex,
}

/// `lhs op rhs` where `op` is `=`, `:=` or a compound assignment.
#[derive(Clone, Debug, Serialize)]
pub struct AssignmentData {
    pub left: NodeList,
    pub operator: u16,
    pub right: NodeList,
}

/// Unary, star and inc/dec nodes.
#[derive(Clone, Debug, Serialize)]
pub struct UnaryExprData {
    pub operator: u16,
    pub operand: NodeIndex,
}

/// Binary expressions, sends and key/value pairs.
#[derive(Clone, Debug, Serialize)]
pub struct BinaryExprData {
    pub left: NodeIndex,
    pub operator: u16,
    pub right: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct IfData {
    pub init: NodeIndex,
    pub condition: NodeIndex,
    pub then_block: NodeIndex,
    pub else_branch: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ForData {
    pub init: NodeIndex,
    pub condition: NodeIndex,
    pub post: NodeIndex,
    pub body: NodeIndex,
}

/// `for key, value := range expression { body }`.
/// `operator` is `SyntaxKind::Unknown` when the clause has no key.
#[derive(Clone, Debug, Serialize)]
pub struct RangeData {
    pub key: NodeIndex,
    pub value: NodeIndex,
    pub operator: u16,
    pub expression: NodeIndex,
    pub body: NodeIndex,
}

/// Expression switches, type switches and selects.
#[derive(Clone, Debug, Serialize)]
pub struct SwitchData {
    pub init: NodeIndex,
    pub tag: NodeIndex,
    pub clauses: NodeList,
}

/// `case`/`default` clause of a switch or select.
#[derive(Clone, Debug, Serialize)]
pub struct CaseClauseData {
    pub expressions: NodeList,
    pub comm: NodeIndex,
    pub is_default: bool,
    pub statements: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct ReturnData {
    pub results: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct BranchData {
    pub keyword: u16,
    pub label: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct LabeledData {
    pub label: NodeIndex,
    pub statement: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct CallExprData {
    pub expression: NodeIndex,
    pub arguments: NodeList,
    pub has_ellipsis: bool,
}

/// `expression.name`.
#[derive(Clone, Debug, Serialize)]
pub struct SelectorData {
    pub expression: NodeIndex,
    pub name: NodeIndex,
}

/// Index expressions and generic instantiations.
#[derive(Clone, Debug, Serialize)]
pub struct IndexData {
    pub expression: NodeIndex,
    pub indices: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct SliceData {
    pub expression: NodeIndex,
    pub low: NodeIndex,
    pub high: NodeIndex,
    pub max: NodeIndex,
}

/// `x.(T)`; `type_node` is NONE for the `x.(type)` switch guard.
#[derive(Clone, Debug, Serialize)]
pub struct TypeAssertionData {
    pub expression: NodeIndex,
    pub type_node: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct CompositeLiteralData {
    pub type_node: NodeIndex,
    pub elements: NodeList,
}

/// Array and slice types; a slice has no length.
#[derive(Clone, Debug, Serialize)]
pub struct ArrayTypeData {
    pub length: NodeIndex,
    pub element: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct MapTypeData {
    pub key: NodeIndex,
    pub value: NodeIndex,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ChanDirection {
    Both,
    Send,
    Receive,
}

#[derive(Clone, Debug, Serialize)]
pub struct ChanTypeData {
    pub direction: ChanDirection,
    pub element: NodeIndex,
}

/// Struct fields or interface elements.
#[derive(Clone, Debug, Serialize)]
pub struct TypeMembersData {
    pub members: NodeList,
}

// =============================================================================
// Arena
// =============================================================================

/// Storage for every node of one parsed file.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    pub nodes: Vec<Node>,
    pub extended_info: Vec<ExtendedNodeInfo>,

    pub identifiers: Vec<IdentifierData>,
    pub literals: Vec<LiteralData>,
    pub source_files: Vec<SourceFileData>,
    pub declarations: Vec<DeclarationData>,
    pub import_specs: Vec<ImportSpecData>,
    pub value_specs: Vec<ValueSpecData>,
    pub type_specs: Vec<TypeSpecData>,
    pub functions: Vec<FunctionData>,
    pub fields: Vec<FieldData>,
    pub blocks: Vec<BlockData>,
    pub wrappers: Vec<WrapperData>,
    pub assignments: Vec<AssignmentData>,
    pub unary_exprs: Vec<UnaryExprData>,
    pub binary_exprs: Vec<BinaryExprData>,
    pub if_statements: Vec<IfData>,
    pub for_statements: Vec<ForData>,
    pub range_statements: Vec<RangeData>,
    pub switch_statements: Vec<SwitchData>,
    pub case_clauses: Vec<CaseClauseData>,
    pub return_statements: Vec<ReturnData>,
    pub branch_statements: Vec<BranchData>,
    pub labeled_statements: Vec<LabeledData>,
    pub call_exprs: Vec<CallExprData>,
    pub selector_exprs: Vec<SelectorData>,
    pub index_exprs: Vec<IndexData>,
    pub slice_exprs: Vec<SliceData>,
    pub type_assertions: Vec<TypeAssertionData>,
    pub composite_literals: Vec<CompositeLiteralData>,
    pub array_types: Vec<ArrayTypeData>,
    pub map_types: Vec<MapTypeData>,
    pub chan_types: Vec<ChanTypeData>,
    pub type_members: Vec<TypeMembersData>,
}
