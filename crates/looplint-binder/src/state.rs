//! Binder state: symbol storage, the scope chain and identifier resolution.
//!
//! Binding runs in two phases over one file:
//! 1. Imports go into the file scope and every top-level declaration into
//!    the package scope, so package-level names resolve regardless of order.
//! 2. Function bodies and initializers are walked with a scope chain that
//!    mirrors Go's block structure; each identifier use is recorded in
//!    `node_symbols`.
//!
//! Lookup order is local scopes (innermost first), file scope, package scope,
//! then the universe scope of predeclared names.

use crate::known_packages;
use crate::{ContainerKind, ScopeContext, Symbol, SymbolArena, SymbolId, SymbolTable, symbol_flags};
use looplint_parser::{NodeArena, NodeIndex};
use rustc_hash::FxHashMap;

const PREDECLARED_TYPES: &[&str] = &[
    "any",
    "bool",
    "byte",
    "comparable",
    "complex64",
    "complex128",
    "error",
    "float32",
    "float64",
    "int",
    "int8",
    "int16",
    "int32",
    "int64",
    "rune",
    "string",
    "uint",
    "uint8",
    "uint16",
    "uint32",
    "uint64",
    "uintptr",
];

const PREDECLARED_FUNCTIONS: &[&str] = &[
    "append", "cap", "clear", "close", "complex", "copy", "delete", "imag", "len", "make", "max",
    "min", "new", "panic", "print", "println", "real", "recover",
];

const PREDECLARED_CONSTANTS: &[(&str, &str)] = &[
    ("true", "untyped bool"),
    ("false", "untyped bool"),
    ("iota", "untyped int"),
    ("nil", "untyped nil"),
];

pub struct BinderState {
    pub symbols: SymbolArena,
    /// Identifier node index to the symbol it declares or refers to.
    pub node_symbols: FxHashMap<u32, SymbolId>,
    pub(crate) scope_chain: Vec<ScopeContext>,
    pub(crate) file_scope: SymbolTable,
    pub(crate) package_scope: SymbolTable,
    pub(crate) universe: SymbolTable,
    /// Import paths of `import . "path"` specs, in source order.
    pub(crate) dot_imports: Vec<String>,
    pub(crate) package_members: FxHashMap<(String, String), SymbolId>,
    pub(crate) value_members: FxHashMap<(SymbolId, String), SymbolId>,
    pub(crate) package_name: String,
}

impl BinderState {
    pub fn new() -> BinderState {
        let mut state = BinderState {
            symbols: SymbolArena::new(),
            node_symbols: FxHashMap::default(),
            scope_chain: Vec::new(),
            file_scope: SymbolTable::new(),
            package_scope: SymbolTable::new(),
            universe: SymbolTable::new(),
            dot_imports: Vec::new(),
            package_members: FxHashMap::default(),
            value_members: FxHashMap::default(),
            package_name: String::new(),
        };
        state.declare_universe();
        state
    }

    fn declare_universe(&mut self) {
        for name in PREDECLARED_TYPES {
            let id = self
                .symbols
                .alloc(symbol_flags::TYPE | symbol_flags::BUILTIN, (*name).to_string());
            self.universe.set((*name).to_string(), id);
        }
        for name in PREDECLARED_FUNCTIONS {
            let id = self
                .symbols
                .alloc(symbol_flags::FUNCTION | symbol_flags::BUILTIN, (*name).to_string());
            self.universe.set((*name).to_string(), id);
        }
        for (name, type_text) in PREDECLARED_CONSTANTS {
            let id = self
                .symbols
                .alloc(symbol_flags::CONSTANT | symbol_flags::BUILTIN, (*name).to_string());
            if let Some(symbol) = self.symbols.get_mut(id) {
                symbol.declared_type = Some((*type_text).to_string());
            }
            self.universe.set((*name).to_string(), id);
        }
    }

    /// Bind one parsed file rooted at `root`.
    #[tracing::instrument(level = "debug", skip(self, arena))]
    pub fn bind_source_file(&mut self, arena: &NodeArena, root: NodeIndex) {
        self.collect_file_declarations(arena, root);
        self.bind_file_bodies(arena, root);
        tracing::debug!(
            symbols = self.symbols.len(),
            resolved = self.node_symbols.len(),
            package = %self.package_name,
            "bound source file"
        );
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn get_node_symbol(&self, node: NodeIndex) -> Option<SymbolId> {
        self.node_symbols.get(&node.0).copied()
    }

    pub fn get_symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    pub fn get_symbols(&self) -> &SymbolArena {
        &self.symbols
    }

    /// Name from the `package` clause.
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn dot_imports(&self) -> &[String] {
        &self.dot_imports
    }

    /// Look up a name in the file and package scopes only.
    pub fn file_level_symbol(&self, name: &str) -> Option<SymbolId> {
        self.file_scope
            .get(name)
            .or_else(|| self.package_scope.get(name))
    }

    // =========================================================================
    // Scope chain
    // =========================================================================

    pub(crate) fn enter_scope(&mut self, container_kind: ContainerKind, container_node: NodeIndex) {
        self.scope_chain
            .push(ScopeContext::new(container_kind, container_node));
    }

    pub(crate) fn exit_scope(&mut self) {
        self.scope_chain.pop();
    }

    /// Whether `name` is declared in the innermost local scope.
    pub(crate) fn declared_in_current_scope(&self, name: &str) -> Option<SymbolId> {
        self.scope_chain
            .last()
            .and_then(|scope| scope.locals.get(name))
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<SymbolId> {
        for scope in self.scope_chain.iter().rev() {
            if let Some(id) = scope.locals.get(name) {
                return Some(id);
            }
        }
        self.file_scope
            .get(name)
            .or_else(|| self.package_scope.get(name))
            .or_else(|| self.universe.get(name))
    }

    /// Resolve a name through the scope chain, falling back to the file's
    /// dot imports.
    pub(crate) fn resolve_name(&mut self, name: &str) -> Option<SymbolId> {
        if let Some(id) = self.lookup(name) {
            return Some(id);
        }
        let path = self
            .dot_imports
            .iter()
            .find(|path| known_packages::exports_name(path, name))
            .or_else(|| self.dot_imports.first())?
            .clone();
        Some(self.package_member(&path, name))
    }

    // =========================================================================
    // Symbol creation
    // =========================================================================

    /// Declare `name` in the innermost local scope (or the package scope when
    /// no local scope is open) and record `decl` as its declaring identifier.
    /// The blank identifier is never declared.
    pub(crate) fn declare_symbol(
        &mut self,
        name: &str,
        flags: u32,
        decl: NodeIndex,
        declared_type: Option<String>,
    ) -> Option<SymbolId> {
        if name == "_" {
            return None;
        }
        let id = self.symbols.alloc(flags, name.to_string());
        if let Some(symbol) = self.symbols.get_mut(id) {
            symbol.declarations.push(decl);
            symbol.declared_type = declared_type;
        }
        match self.scope_chain.last_mut() {
            Some(scope) => scope.locals.set(name.to_string(), id),
            None => self.package_scope.set(name.to_string(), id),
        }
        if decl.is_some() {
            self.node_symbols.insert(decl.0, id);
        }
        tracing::trace!(name, flags, symbol = id.0, "declared symbol");
        Some(id)
    }

    /// Interned symbol for exported `name` of the package at `path`.
    pub(crate) fn package_member(&mut self, path: &str, name: &str) -> SymbolId {
        let key = (path.to_string(), name.to_string());
        if let Some(&id) = self.package_members.get(&key) {
            return id;
        }
        let id = self
            .symbols
            .alloc(symbol_flags::PACKAGE_MEMBER, name.to_string());
        if let Some(symbol) = self.symbols.get_mut(id) {
            symbol.package_path = Some(path.to_string());
        }
        self.package_members.insert(key, id);
        id
    }

    /// Interned symbol for field or method `name` of the value `base`.
    pub(crate) fn value_member(&mut self, base: SymbolId, name: &str) -> SymbolId {
        let key = (base, name.to_string());
        if let Some(&id) = self.value_members.get(&key) {
            return id;
        }
        let id = self.symbols.alloc(symbol_flags::MEMBER, name.to_string());
        if let Some(symbol) = self.symbols.get_mut(id) {
            symbol.parent = base;
        }
        self.value_members.insert(key, id);
        id
    }

    pub(crate) fn record(&mut self, node: NodeIndex, id: SymbolId) {
        if node.is_some() {
            self.node_symbols.insert(node.0, id);
        }
    }
}

impl Default for BinderState {
    fn default() -> BinderState {
        BinderState::new()
    }
}
