//! Binder for the gotestlooplint analyzer.
//!
//! Walks a parsed Go file, builds lexical scopes and records, for every
//! identifier it can resolve, the `SymbolId` of the declaration it refers to.
//! Symbols also carry the textual declared type and the declaring package
//! path, which is all the loop-capture rule needs from a type checker.

use looplint_parser::NodeIndex;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

pub mod known_packages;
pub mod state;
mod state_binding;
mod state_node_binding;
mod type_text;

pub use state::BinderState;

/// Index of a symbol in a `SymbolArena`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u32);

impl SymbolId {
    pub const NONE: SymbolId = SymbolId(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == u32::MAX
    }
}

pub mod symbol_flags {
    pub const NONE: u32 = 0;
    pub const VARIABLE: u32 = 1 << 0;
    pub const CONSTANT: u32 = 1 << 1;
    pub const FUNCTION: u32 = 1 << 2;
    pub const TYPE: u32 = 1 << 3;
    pub const PARAMETER: u32 = 1 << 4;
    pub const PACKAGE_NAME: u32 = 1 << 5;
    /// Exported name of another package, reached as `pkg.Name` or through
    /// a dot import.
    pub const PACKAGE_MEMBER: u32 = 1 << 6;
    /// Field or method reached as `value.Name`.
    pub const MEMBER: u32 = 1 << 7;
    pub const BUILTIN: u32 = 1 << 8;

    pub const VALUE: u32 = VARIABLE | CONSTANT | FUNCTION | PARAMETER;
}

#[derive(Clone, Debug)]
pub struct Symbol {
    pub flags: u32,
    pub escaped_name: String,
    pub declarations: SmallVec<[NodeIndex; 1]>,
    /// Declared type rendered as Go source with import paths as
    /// qualifiers, e.g. `*testing.T`.
    pub declared_type: Option<String>,
    /// Import path of the declaring package; `None` for the current
    /// package and for builtins.
    pub package_path: Option<String>,
    /// Owner of a `MEMBER` symbol.
    pub parent: SymbolId,
}

impl Symbol {
    pub fn new(flags: u32, escaped_name: String) -> Symbol {
        Symbol {
            flags,
            escaped_name,
            declarations: SmallVec::new(),
            declared_type: None,
            package_path: None,
            parent: SymbolId::NONE,
        }
    }

    #[inline]
    pub fn has_flag(&self, flag: u32) -> bool {
        self.flags & flag != 0
    }
}

/// Storage for every symbol created while binding one file.
#[derive(Clone, Debug, Default)]
pub struct SymbolArena {
    symbols: Vec<Symbol>,
}

impl SymbolArena {
    pub fn new() -> SymbolArena {
        SymbolArena::default()
    }

    pub fn alloc(&mut self, flags: u32, name: String) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(Symbol::new(flags, name));
        id
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        if id.is_none() {
            return None;
        }
        self.symbols.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        if id.is_none() {
            return None;
        }
        self.symbols.get_mut(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(index, symbol)| (SymbolId(index as u32), symbol))
    }
}

/// Name to symbol map for one scope.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    table: FxHashMap<String, SymbolId>,
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        SymbolTable::default()
    }

    pub fn get(&self, name: &str) -> Option<SymbolId> {
        self.table.get(name).copied()
    }

    pub fn set(&mut self, name: String, id: SymbolId) {
        self.table.insert(name, id);
    }

    pub fn has(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SymbolId)> {
        self.table.iter()
    }
}

/// What opened a scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContainerKind {
    Function,
    Block,
}

/// One entry of the active scope chain.
#[derive(Clone, Debug)]
pub struct ScopeContext {
    pub container_kind: ContainerKind,
    pub container_node: NodeIndex,
    pub locals: SymbolTable,
}

impl ScopeContext {
    pub fn new(container_kind: ContainerKind, container_node: NodeIndex) -> ScopeContext {
        ScopeContext {
            container_kind,
            container_node,
            locals: SymbolTable::new(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/binder_tests.rs"]
mod binder_tests;
#[cfg(test)]
#[path = "../tests/type_text_tests.rs"]
mod type_text_tests;
