//! Rendering of type expressions to text.
//!
//! Qualified names are rendered with the import path of their package,
//! the way Go's `types.TypeString` prints them: a parameter declared as
//! `t *testing.T` renders as `*testing.T`, and `x *foo.Bar` with
//! `import foo "example.com/lib/foo"` as `*example.com/lib/foo.Bar`.

use crate::state::BinderState;
use crate::symbol_flags;
use looplint_parser::parser::node::ChanDirection;
use looplint_parser::parser::syntax_kind_ext::*;
use looplint_parser::{NodeAccess, NodeArena, NodeIndex, NodeList};
use looplint_scanner::SyntaxKind;

impl BinderState {
    /// Text of the type expression at `idx`, or `None` if it contains
    /// anything that is not a type.
    pub fn type_text(&self, arena: &NodeArena, idx: NodeIndex) -> Option<String> {
        let node = arena.get(idx)?;
        match node.kind {
            IDENTIFIER => arena.get_identifier_text(idx).map(str::to_string),
            SELECTOR_EXPRESSION => {
                let data = arena.get_selector_expr(node)?;
                let qualifier = arena.get_identifier_text(data.expression)?;
                let name = arena.get_identifier_text(data.name)?;
                let path = self
                    .lookup(qualifier)
                    .and_then(|id| self.symbols.get(id))
                    .filter(|symbol| symbol.has_flag(symbol_flags::PACKAGE_NAME))
                    .and_then(|symbol| symbol.package_path.as_deref())
                    .unwrap_or(qualifier);
                Some(format!("{path}.{name}"))
            }
            STAR_EXPRESSION => {
                let data = arena.get_unary_expr(node)?;
                Some(format!("*{}", self.type_text(arena, data.operand)?))
            }
            PARENTHESIZED_EXPRESSION => {
                let data = arena.get_wrapper(node)?;
                self.type_text(arena, data.expression)
            }
            VARIADIC_TYPE => {
                let data = arena.get_wrapper(node)?;
                Some(format!("...{}", self.type_text(arena, data.expression)?))
            }
            ARRAY_TYPE => {
                let data = arena.get_array_type(node)?;
                let element = self.type_text(arena, data.element)?;
                match arena.kind(data.length) {
                    None => Some(format!("[]{element}")),
                    Some(ELLIPSIS_LENGTH) => Some(format!("[...]{element}")),
                    Some(_) => {
                        let length = arena
                            .get_literal_text(data.length)
                            .map(str::to_string)
                            .or_else(|| self.type_text(arena, data.length))?;
                        Some(format!("[{length}]{element}"))
                    }
                }
            }
            MAP_TYPE => {
                let data = arena.get_map_type(node)?;
                Some(format!(
                    "map[{}]{}",
                    self.type_text(arena, data.key)?,
                    self.type_text(arena, data.value)?
                ))
            }
            CHAN_TYPE => {
                let data = arena.get_chan_type(node)?;
                let element = self.type_text(arena, data.element)?;
                Some(match data.direction {
                    ChanDirection::Both => format!("chan {element}"),
                    ChanDirection::Send => format!("chan<- {element}"),
                    ChanDirection::Receive => format!("<-chan {element}"),
                })
            }
            FUNCTION_TYPE => {
                let data = arena.get_function(node)?;
                Some(format!("func{}", self.signature_text(arena, &data.parameters, &data.results)?))
            }
            STRUCT_TYPE => {
                let data = arena.get_type_members(node)?;
                let mut fields = Vec::new();
                for member in data.members.iter() {
                    let field = arena.get(member).and_then(|n| arena.get_field(n))?;
                    let type_text = self.type_text(arena, field.type_node)?;
                    for name in field.names.iter() {
                        fields.push(format!("{} {type_text}", arena.get_identifier_text(name)?));
                    }
                    if field.names.is_empty() {
                        fields.push(type_text);
                    }
                }
                Some(format!("struct{{{}}}", fields.join("; ")))
            }
            INTERFACE_TYPE => {
                let data = arena.get_type_members(node)?;
                let mut elements = Vec::new();
                for member in data.members.iter() {
                    let element = arena.get(member).and_then(|n| arena.get_field(n))?;
                    match element.names.get(0) {
                        Some(name) => {
                            let signature = arena
                                .get(element.type_node)
                                .and_then(|n| arena.get_function(n))?;
                            elements.push(format!(
                                "{}{}",
                                arena.get_identifier_text(name)?,
                                self.signature_text(arena, &signature.parameters, &signature.results)?
                            ));
                        }
                        None => elements.push(self.type_text(arena, element.type_node)?),
                    }
                }
                Some(format!("interface{{{}}}", elements.join("; ")))
            }
            INDEX_EXPRESSION => {
                let data = arena.get_index_expr(node)?;
                let base = self.type_text(arena, data.expression)?;
                let arguments = self.type_list_text(arena, &data.indices)?;
                Some(format!("{base}[{}]", arguments.join(", ")))
            }
            UNARY_EXPRESSION => {
                let data = arena.get_unary_expr(node)?;
                (data.operator == SyntaxKind::TildeToken as u16)
                    .then(|| self.type_text(arena, data.operand))
                    .flatten()
                    .map(|operand| format!("~{operand}"))
            }
            BINARY_EXPRESSION => {
                let data = arena.get_binary_expr(node)?;
                if data.operator != SyntaxKind::BarToken as u16 {
                    return None;
                }
                Some(format!(
                    "{} | {}",
                    self.type_text(arena, data.left)?,
                    self.type_text(arena, data.right)?
                ))
            }
            _ => None,
        }
    }

    fn type_list_text(&self, arena: &NodeArena, list: &NodeList) -> Option<Vec<String>> {
        list.iter()
            .map(|idx| self.type_text(arena, idx))
            .collect()
    }

    /// `(params) results`, one entry per declared name.
    fn signature_text(
        &self,
        arena: &NodeArena,
        parameters: &NodeList,
        results: &NodeList,
    ) -> Option<String> {
        let parameters = self.parameter_types(arena, parameters)?;
        let results = self.parameter_types(arena, results)?;
        let results = match results.len() {
            0 => String::new(),
            1 => format!(" {}", results[0]),
            _ => format!(" ({})", results.join(", ")),
        };
        Some(format!("({}){results}", parameters.join(", ")))
    }

    fn parameter_types(&self, arena: &NodeArena, list: &NodeList) -> Option<Vec<String>> {
        let mut types = Vec::new();
        for param in list.iter() {
            let field = arena.get(param).and_then(|n| arena.get_field(n))?;
            let type_text = self.type_text(arena, field.type_node)?;
            for _ in 0..field.names.len().max(1) {
                types.push(type_text.clone());
            }
        }
        Some(types)
    }

    /// Type of a short-variable or untyped `var` initializer, when it can be
    /// read off the expression: another variable, `T{...}` or `&T{...}`.
    pub(crate) fn infer_expression_type(&self, arena: &NodeArena, idx: NodeIndex) -> Option<String> {
        let node = arena.get(idx)?;
        match node.kind {
            IDENTIFIER => {
                let symbol = self.symbols.get(self.get_node_symbol(idx)?)?;
                if symbol.has_flag(symbol_flags::TYPE | symbol_flags::PACKAGE_NAME) {
                    return None;
                }
                symbol.declared_type.clone()
            }
            PARENTHESIZED_EXPRESSION => {
                let data = arena.get_wrapper(node)?;
                self.infer_expression_type(arena, data.expression)
            }
            COMPOSITE_LITERAL => {
                let data = arena.get_composite_literal(node)?;
                self.type_text(arena, data.type_node)
            }
            UNARY_EXPRESSION => {
                let data = arena.get_unary_expr(node)?;
                if data.operator != SyntaxKind::AmpersandToken as u16 {
                    return None;
                }
                let operand = arena.get(data.operand)?;
                let literal = match operand.kind {
                    COMPOSITE_LITERAL => arena.get_composite_literal(operand)?,
                    PARENTHESIZED_EXPRESSION => {
                        let inner = arena.get_wrapper(operand)?.expression;
                        arena.get(inner).and_then(|n| arena.get_composite_literal(n))?
                    }
                    _ => return None,
                };
                Some(format!("*{}", self.type_text(arena, literal.type_node)?))
            }
            STAR_EXPRESSION => {
                let data = arena.get_unary_expr(node)?;
                let pointer = self.infer_expression_type(arena, data.operand)?;
                pointer.strip_prefix('*').map(str::to_string)
            }
            _ => None,
        }
    }
}
