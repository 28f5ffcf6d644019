//! Node kinds produced by the parser.
//!
//! Token kinds from `looplint_scanner::SyntaxKind` occupy `0..SyntaxKind::Count`.
//! Identifier and literal nodes keep their token kind; every composite node
//! kind below starts above the token range.

use looplint_scanner::SyntaxKind;

const BASE: u16 = SyntaxKind::Count as u16;

// File and declarations
pub const SOURCE_FILE: u16 = BASE + 1;
pub const IMPORT_DECLARATION: u16 = BASE + 2;
pub const IMPORT_SPEC: u16 = BASE + 3;
pub const FUNCTION_DECLARATION: u16 = BASE + 4;
pub const VAR_DECLARATION: u16 = BASE + 5;
pub const CONST_DECLARATION: u16 = BASE + 6;
pub const TYPE_DECLARATION: u16 = BASE + 7;
pub const VALUE_SPEC: u16 = BASE + 8;
pub const TYPE_SPEC: u16 = BASE + 9;
pub const PARAMETER: u16 = BASE + 10;
pub const FIELD: u16 = BASE + 11;
pub const METHOD_SPEC: u16 = BASE + 12;

// Statements
pub const BLOCK: u16 = BASE + 20;
pub const EXPRESSION_STATEMENT: u16 = BASE + 21;
pub const ASSIGNMENT_STATEMENT: u16 = BASE + 22;
pub const INC_DEC_STATEMENT: u16 = BASE + 23;
pub const SEND_STATEMENT: u16 = BASE + 24;
pub const IF_STATEMENT: u16 = BASE + 25;
pub const FOR_STATEMENT: u16 = BASE + 26;
pub const RANGE_STATEMENT: u16 = BASE + 27;
pub const SWITCH_STATEMENT: u16 = BASE + 28;
pub const TYPE_SWITCH_STATEMENT: u16 = BASE + 29;
pub const SELECT_STATEMENT: u16 = BASE + 30;
pub const CASE_CLAUSE: u16 = BASE + 31;
pub const COMM_CLAUSE: u16 = BASE + 32;
pub const RETURN_STATEMENT: u16 = BASE + 33;
pub const BRANCH_STATEMENT: u16 = BASE + 34;
pub const LABELED_STATEMENT: u16 = BASE + 35;
pub const GO_STATEMENT: u16 = BASE + 36;
pub const DEFER_STATEMENT: u16 = BASE + 37;
pub const DECLARATION_STATEMENT: u16 = BASE + 38;
pub const EMPTY_STATEMENT: u16 = BASE + 39;

// Expressions
pub const CALL_EXPRESSION: u16 = BASE + 50;
pub const SELECTOR_EXPRESSION: u16 = BASE + 51;
pub const INDEX_EXPRESSION: u16 = BASE + 52;
pub const SLICE_EXPRESSION: u16 = BASE + 53;
pub const TYPE_ASSERTION_EXPRESSION: u16 = BASE + 54;
pub const UNARY_EXPRESSION: u16 = BASE + 55;
pub const STAR_EXPRESSION: u16 = BASE + 56;
pub const BINARY_EXPRESSION: u16 = BASE + 57;
pub const PARENTHESIZED_EXPRESSION: u16 = BASE + 58;
pub const COMPOSITE_LITERAL: u16 = BASE + 59;
pub const KEY_VALUE_EXPRESSION: u16 = BASE + 60;
pub const FUNCTION_LITERAL: u16 = BASE + 61;
pub const BAD_EXPRESSION: u16 = BASE + 62;

// Types
pub const ARRAY_TYPE: u16 = BASE + 70;
pub const MAP_TYPE: u16 = BASE + 71;
pub const CHAN_TYPE: u16 = BASE + 72;
pub const FUNCTION_TYPE: u16 = BASE + 73;
pub const STRUCT_TYPE: u16 = BASE + 74;
pub const INTERFACE_TYPE: u16 = BASE + 75;
pub const VARIADIC_TYPE: u16 = BASE + 76;
pub const ELLIPSIS_LENGTH: u16 = BASE + 77;

pub const IDENTIFIER: u16 = SyntaxKind::Identifier as u16;

/// Whether `kind` is one of the literal token kinds used for literal nodes.
pub fn is_literal_kind(kind: u16) -> bool {
    kind == SyntaxKind::IntLiteral as u16
        || kind == SyntaxKind::FloatLiteral as u16
        || kind == SyntaxKind::ImaginaryLiteral as u16
        || kind == SyntaxKind::RuneLiteral as u16
        || kind == SyntaxKind::StringLiteral as u16
}

/// Statement kinds that loop over a body.
pub fn is_loop_kind(kind: u16) -> bool {
    kind == FOR_STATEMENT || kind == RANGE_STATEMENT
}

/// Debug name for a node kind.
pub fn kind_name(kind: u16) -> &'static str {
    match kind {
        IDENTIFIER => "Identifier",
        k if is_literal_kind(k) => "BasicLiteral",
        SOURCE_FILE => "SourceFile",
        IMPORT_DECLARATION => "ImportDeclaration",
        IMPORT_SPEC => "ImportSpec",
        FUNCTION_DECLARATION => "FunctionDeclaration",
        VAR_DECLARATION => "VarDeclaration",
        CONST_DECLARATION => "ConstDeclaration",
        TYPE_DECLARATION => "TypeDeclaration",
        VALUE_SPEC => "ValueSpec",
        TYPE_SPEC => "TypeSpec",
        PARAMETER => "Parameter",
        FIELD => "Field",
        METHOD_SPEC => "MethodSpec",
        BLOCK => "Block",
        EXPRESSION_STATEMENT => "ExpressionStatement",
        ASSIGNMENT_STATEMENT => "AssignmentStatement",
        INC_DEC_STATEMENT => "IncDecStatement",
        SEND_STATEMENT => "SendStatement",
        IF_STATEMENT => "IfStatement",
        FOR_STATEMENT => "ForStatement",
        RANGE_STATEMENT => "RangeStatement",
        SWITCH_STATEMENT => "SwitchStatement",
        TYPE_SWITCH_STATEMENT => "TypeSwitchStatement",
        SELECT_STATEMENT => "SelectStatement",
        CASE_CLAUSE => "CaseClause",
        COMM_CLAUSE => "CommClause",
        RETURN_STATEMENT => "ReturnStatement",
        BRANCH_STATEMENT => "BranchStatement",
        LABELED_STATEMENT => "LabeledStatement",
        GO_STATEMENT => "GoStatement",
        DEFER_STATEMENT => "DeferStatement",
        DECLARATION_STATEMENT => "DeclarationStatement",
        EMPTY_STATEMENT => "EmptyStatement",
        CALL_EXPRESSION => "CallExpression",
        SELECTOR_EXPRESSION => "SelectorExpression",
        INDEX_EXPRESSION => "IndexExpression",
        SLICE_EXPRESSION => "SliceExpression",
        TYPE_ASSERTION_EXPRESSION => "TypeAssertionExpression",
        UNARY_EXPRESSION => "UnaryExpression",
        STAR_EXPRESSION => "StarExpression",
        BINARY_EXPRESSION => "BinaryExpression",
        PARENTHESIZED_EXPRESSION => "ParenthesizedExpression",
        COMPOSITE_LITERAL => "CompositeLiteral",
        KEY_VALUE_EXPRESSION => "KeyValueExpression",
        FUNCTION_LITERAL => "FunctionLiteral",
        BAD_EXPRESSION => "BadExpression",
        ARRAY_TYPE => "ArrayType",
        MAP_TYPE => "MapType",
        CHAN_TYPE => "ChanType",
        FUNCTION_TYPE => "FunctionType",
        STRUCT_TYPE => "StructType",
        INTERFACE_TYPE => "InterfaceType",
        VARIADIC_TYPE => "VariadicType",
        ELLIPSIS_LENGTH => "EllipsisLength",
        _ => "Unknown",
    }
}
