//! Token kinds produced by the scanner.
//!
//! Node kinds built by the parser live above `SyntaxKind::Count` in
//! `looplint_parser::parser::syntax_kind_ext`, so a single `u16` kind space
//! covers both tokens and nodes.

use serde::Serialize;

#[repr(u16)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SyntaxKind {
    Unknown = 0,
    EndOfFileToken,

    // Literals
    Identifier,
    IntLiteral,
    FloatLiteral,
    ImaginaryLiteral,
    RuneLiteral,
    StringLiteral,

    // Arithmetic and bitwise operators
    PlusToken,
    MinusToken,
    AsteriskToken,
    SlashToken,
    PercentToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    LessThanLessThanToken,
    GreaterThanGreaterThanToken,
    AmpersandCaretToken,

    // Compound assignment
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,
    AmpersandEqualsToken,
    BarEqualsToken,
    CaretEqualsToken,
    LessThanLessThanEqualsToken,
    GreaterThanGreaterThanEqualsToken,
    AmpersandCaretEqualsToken,

    // Logical, comparison, misc operators
    AmpersandAmpersandToken,
    BarBarToken,
    LessThanMinusToken,
    PlusPlusToken,
    MinusMinusToken,
    EqualsEqualsToken,
    LessThanToken,
    GreaterThanToken,
    EqualsToken,
    ExclamationToken,
    TildeToken,
    ExclamationEqualsToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    ColonEqualsToken,
    DotDotDotToken,

    // Punctuation
    OpenParenToken,
    OpenBracketToken,
    OpenBraceToken,
    CommaToken,
    DotToken,
    CloseParenToken,
    CloseBracketToken,
    CloseBraceToken,
    SemicolonToken,
    ColonToken,

    // Keywords
    BreakKeyword,
    CaseKeyword,
    ChanKeyword,
    ConstKeyword,
    ContinueKeyword,
    DefaultKeyword,
    DeferKeyword,
    ElseKeyword,
    FallthroughKeyword,
    ForKeyword,
    FuncKeyword,
    GoKeyword,
    GotoKeyword,
    IfKeyword,
    ImportKeyword,
    InterfaceKeyword,
    MapKeyword,
    PackageKeyword,
    RangeKeyword,
    ReturnKeyword,
    SelectKeyword,
    StructKeyword,
    SwitchKeyword,
    TypeKeyword,
    VarKeyword,

    /// Number of token kinds. Node kinds start above this value.
    Count,
}

impl SyntaxKind {
    pub const FIRST_KEYWORD: SyntaxKind = SyntaxKind::BreakKeyword;
    pub const LAST_KEYWORD: SyntaxKind = SyntaxKind::VarKeyword;

    #[inline]
    pub fn is_keyword(self) -> bool {
        self >= Self::FIRST_KEYWORD && self <= Self::LAST_KEYWORD
    }

    #[inline]
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            SyntaxKind::IntLiteral
                | SyntaxKind::FloatLiteral
                | SyntaxKind::ImaginaryLiteral
                | SyntaxKind::RuneLiteral
                | SyntaxKind::StringLiteral
        )
    }

    /// Assignment operators: `=`, `:=` and every `op=` form.
    pub fn is_assignment_operator(self) -> bool {
        matches!(
            self,
            SyntaxKind::EqualsToken
                | SyntaxKind::ColonEqualsToken
                | SyntaxKind::PlusEqualsToken
                | SyntaxKind::MinusEqualsToken
                | SyntaxKind::AsteriskEqualsToken
                | SyntaxKind::SlashEqualsToken
                | SyntaxKind::PercentEqualsToken
                | SyntaxKind::AmpersandEqualsToken
                | SyntaxKind::BarEqualsToken
                | SyntaxKind::CaretEqualsToken
                | SyntaxKind::LessThanLessThanEqualsToken
                | SyntaxKind::GreaterThanGreaterThanEqualsToken
                | SyntaxKind::AmpersandCaretEqualsToken
        )
    }

    /// Binary operator precedence, or 0 for tokens that are not binary operators.
    pub fn binary_precedence(self) -> u8 {
        match self {
            SyntaxKind::BarBarToken => 1,
            SyntaxKind::AmpersandAmpersandToken => 2,
            SyntaxKind::EqualsEqualsToken
            | SyntaxKind::ExclamationEqualsToken
            | SyntaxKind::LessThanToken
            | SyntaxKind::LessThanEqualsToken
            | SyntaxKind::GreaterThanToken
            | SyntaxKind::GreaterThanEqualsToken => 3,
            SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::BarToken
            | SyntaxKind::CaretToken => 4,
            SyntaxKind::AsteriskToken
            | SyntaxKind::SlashToken
            | SyntaxKind::PercentToken
            | SyntaxKind::LessThanLessThanToken
            | SyntaxKind::GreaterThanGreaterThanToken
            | SyntaxKind::AmpersandToken
            | SyntaxKind::AmpersandCaretToken => 5,
            _ => 0,
        }
    }

    /// Human-readable description used in syntax error messages.
    pub fn describe(self) -> &'static str {
        match self {
            SyntaxKind::Unknown => "unknown token",
            SyntaxKind::EndOfFileToken => "EOF",
            SyntaxKind::Identifier => "name",
            SyntaxKind::IntLiteral
            | SyntaxKind::FloatLiteral
            | SyntaxKind::ImaginaryLiteral
            | SyntaxKind::RuneLiteral
            | SyntaxKind::StringLiteral => "literal",
            SyntaxKind::PlusToken => "'+'",
            SyntaxKind::MinusToken => "'-'",
            SyntaxKind::AsteriskToken => "'*'",
            SyntaxKind::SlashToken => "'/'",
            SyntaxKind::PercentToken => "'%'",
            SyntaxKind::AmpersandToken => "'&'",
            SyntaxKind::BarToken => "'|'",
            SyntaxKind::CaretToken => "'^'",
            SyntaxKind::LessThanLessThanToken => "'<<'",
            SyntaxKind::GreaterThanGreaterThanToken => "'>>'",
            SyntaxKind::AmpersandCaretToken => "'&^'",
            SyntaxKind::PlusEqualsToken => "'+='",
            SyntaxKind::MinusEqualsToken => "'-='",
            SyntaxKind::AsteriskEqualsToken => "'*='",
            SyntaxKind::SlashEqualsToken => "'/='",
            SyntaxKind::PercentEqualsToken => "'%='",
            SyntaxKind::AmpersandEqualsToken => "'&='",
            SyntaxKind::BarEqualsToken => "'|='",
            SyntaxKind::CaretEqualsToken => "'^='",
            SyntaxKind::LessThanLessThanEqualsToken => "'<<='",
            SyntaxKind::GreaterThanGreaterThanEqualsToken => "'>>='",
            SyntaxKind::AmpersandCaretEqualsToken => "'&^='",
            SyntaxKind::AmpersandAmpersandToken => "'&&'",
            SyntaxKind::BarBarToken => "'||'",
            SyntaxKind::LessThanMinusToken => "'<-'",
            SyntaxKind::PlusPlusToken => "'++'",
            SyntaxKind::MinusMinusToken => "'--'",
            SyntaxKind::EqualsEqualsToken => "'=='",
            SyntaxKind::LessThanToken => "'<'",
            SyntaxKind::GreaterThanToken => "'>'",
            SyntaxKind::EqualsToken => "'='",
            SyntaxKind::ExclamationToken => "'!'",
            SyntaxKind::TildeToken => "'~'",
            SyntaxKind::ExclamationEqualsToken => "'!='",
            SyntaxKind::LessThanEqualsToken => "'<='",
            SyntaxKind::GreaterThanEqualsToken => "'>='",
            SyntaxKind::ColonEqualsToken => "':='",
            SyntaxKind::DotDotDotToken => "'...'",
            SyntaxKind::OpenParenToken => "'('",
            SyntaxKind::OpenBracketToken => "'['",
            SyntaxKind::OpenBraceToken => "'{'",
            SyntaxKind::CommaToken => "','",
            SyntaxKind::DotToken => "'.'",
            SyntaxKind::CloseParenToken => "')'",
            SyntaxKind::CloseBracketToken => "']'",
            SyntaxKind::CloseBraceToken => "'}'",
            SyntaxKind::SemicolonToken => "';'",
            SyntaxKind::ColonToken => "':'",
            SyntaxKind::BreakKeyword => "keyword break",
            SyntaxKind::CaseKeyword => "keyword case",
            SyntaxKind::ChanKeyword => "keyword chan",
            SyntaxKind::ConstKeyword => "keyword const",
            SyntaxKind::ContinueKeyword => "keyword continue",
            SyntaxKind::DefaultKeyword => "keyword default",
            SyntaxKind::DeferKeyword => "keyword defer",
            SyntaxKind::ElseKeyword => "keyword else",
            SyntaxKind::FallthroughKeyword => "keyword fallthrough",
            SyntaxKind::ForKeyword => "keyword for",
            SyntaxKind::FuncKeyword => "keyword func",
            SyntaxKind::GoKeyword => "keyword go",
            SyntaxKind::GotoKeyword => "keyword goto",
            SyntaxKind::IfKeyword => "keyword if",
            SyntaxKind::ImportKeyword => "keyword import",
            SyntaxKind::InterfaceKeyword => "keyword interface",
            SyntaxKind::MapKeyword => "keyword map",
            SyntaxKind::PackageKeyword => "keyword package",
            SyntaxKind::RangeKeyword => "keyword range",
            SyntaxKind::ReturnKeyword => "keyword return",
            SyntaxKind::SelectKeyword => "keyword select",
            SyntaxKind::StructKeyword => "keyword struct",
            SyntaxKind::SwitchKeyword => "keyword switch",
            SyntaxKind::TypeKeyword => "keyword type",
            SyntaxKind::VarKeyword => "keyword var",
            SyntaxKind::Count => "unknown token",
        }
    }
}

/// Map identifier text to its keyword kind, if it is one of Go's 25 keywords.
pub fn keyword_kind(text: &str) -> Option<SyntaxKind> {
    let kind = match text {
        "break" => SyntaxKind::BreakKeyword,
        "case" => SyntaxKind::CaseKeyword,
        "chan" => SyntaxKind::ChanKeyword,
        "const" => SyntaxKind::ConstKeyword,
        "continue" => SyntaxKind::ContinueKeyword,
        "default" => SyntaxKind::DefaultKeyword,
        "defer" => SyntaxKind::DeferKeyword,
        "else" => SyntaxKind::ElseKeyword,
        "fallthrough" => SyntaxKind::FallthroughKeyword,
        "for" => SyntaxKind::ForKeyword,
        "func" => SyntaxKind::FuncKeyword,
        "go" => SyntaxKind::GoKeyword,
        "goto" => SyntaxKind::GotoKeyword,
        "if" => SyntaxKind::IfKeyword,
        "import" => SyntaxKind::ImportKeyword,
        "interface" => SyntaxKind::InterfaceKeyword,
        "map" => SyntaxKind::MapKeyword,
        "package" => SyntaxKind::PackageKeyword,
        "range" => SyntaxKind::RangeKeyword,
        "return" => SyntaxKind::ReturnKeyword,
        "select" => SyntaxKind::SelectKeyword,
        "struct" => SyntaxKind::StructKeyword,
        "switch" => SyntaxKind::SwitchKeyword,
        "type" => SyntaxKind::TypeKeyword,
        "var" => SyntaxKind::VarKeyword,
        _ => return None,
    };
    Some(kind)
}
