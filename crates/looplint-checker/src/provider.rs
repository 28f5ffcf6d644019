//! The narrow view of name resolution the rule depends on.

use looplint_binder::{BinderState, SymbolId};
use looplint_parser::{NodeArena, NodeIndex};

/// Identifier to symbol, symbol to declared type, symbol to package path.
///
/// The rule never compares names; it only compares the `SymbolId`s returned
/// here, so two identifiers are "the same variable" exactly when the provider
/// says so.
pub trait SymbolProvider {
    /// Symbol an identifier declares or refers to.
    fn symbol_of(&self, arena: &NodeArena, ident: NodeIndex) -> Option<SymbolId>;

    /// Declared type of a symbol rendered as Go source, e.g. `*testing.T`.
    fn declared_type(&self, symbol: SymbolId) -> Option<&str>;

    /// Import path of the package that declares a symbol.
    fn package_path(&self, symbol: SymbolId) -> Option<&str>;
}

impl SymbolProvider for BinderState {
    fn symbol_of(&self, _arena: &NodeArena, ident: NodeIndex) -> Option<SymbolId> {
        self.get_node_symbol(ident)
    }

    fn declared_type(&self, symbol: SymbolId) -> Option<&str> {
        self.get_symbol(symbol)?.declared_type.as_deref()
    }

    fn package_path(&self, symbol: SymbolId) -> Option<&str> {
        self.get_symbol(symbol)?.package_path.as_deref()
    }
}
