//! Symbol table and scope management.
//!
//! Tracks every declared class, method and variable, and the lexical scope it was declared in. Scopes form a tree
//! (global → class → function → block) stored in an arena; children and parents refer to each other by [`ScopeId`].
//!
//! The table is filled while parsing and is read-only afterwards.

use std::collections::HashMap;

use crate::ast::{ClassId, FunctionRef, Modifier, Span, Type};

/// Unique identifier for symbols
pub type SymbolId = usize;

/// Unique identifier for scopes
pub type ScopeId = usize;

/// The global scope is always the first one allocated.
pub const GLOBAL_SCOPE: ScopeId = 0;

/// Types every program can refer to without declaring them.
pub const BUILTIN_TYPES: &[&str] = &[
    "byte", "short", "int", "long", "float", "double", "char", "boolean", "String", "Object", "void",
];

/// Symbol table managing all named entities
#[derive(Debug, Clone)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    scopes: Vec<Scope>,
    current_scope: ScopeId,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        let mut table = Self {
            symbols: Vec::new(),
            scopes: vec![Scope::new(None, ScopeKind::Global)],
            current_scope: GLOBAL_SCOPE,
        };

        table.add_builtins();
        table
    }

    fn add_builtins(&mut self) {
        for name in BUILTIN_TYPES {
            self.define(Symbol {
                name: (*name).to_string(),
                kind: SymbolKind::Type(TypeTarget::Builtin),
                span: Span::default(),
                scope: GLOBAL_SCOPE,
            });
        }
    }

    /// Enter a new child scope of the current one and return its id
    pub fn enter_scope(&mut self, kind: ScopeKind) -> ScopeId {
        let id = self.scopes.len();
        self.scopes.push(Scope::new(Some(self.current_scope), kind));
        self.scopes[self.current_scope].children.push(id);
        self.current_scope = id;
        id
    }

    /// Exit the current scope
    pub fn exit_scope(&mut self) {
        if let Some(parent) = self.scopes[self.current_scope].parent {
            self.current_scope = parent;
        }
    }

    pub fn current_scope(&self) -> ScopeId {
        self.current_scope
    }

    /// Define a new symbol in the current scope.
    ///
    /// The first definition of a name in a scope and namespace wins; a redefinition is recorded in the symbol arena
    /// but not made visible by name. A field and a method may share a name.
    pub fn define(&mut self, mut symbol: Symbol) -> SymbolId {
        symbol.scope = self.current_scope;
        let id = self.symbols.len();
        let scope = &mut self.scopes[self.current_scope];
        let slot = scope
            .symbols
            .entry(symbol.name.clone())
            .or_default()
            .slot_mut(symbol.kind.namespace());
        if slot.is_none() {
            *slot = Some(id);
            scope.declared.push(id);
        }
        self.symbols.push(symbol);
        id
    }

    /// Look up a symbol by name in the current scope chain
    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        self.lookup_from(self.current_scope, name)
    }

    /// Look up a symbol only in the current scope (no parent lookup)
    pub fn lookup_local(&self, name: &str) -> Option<SymbolId> {
        self.lookup_local_in(self.current_scope, name)
    }

    /// Look up a symbol by walking outward from `scope`. The innermost scope declaring the name wins; within it see
    /// [`NameSlots::preferred`].
    pub fn lookup_from(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        self.ancestors(scope)
            .find_map(|s| self.scopes[s].symbols.get(name).and_then(NameSlots::preferred))
    }

    /// Look up a symbol declared directly in `scope`.
    pub fn lookup_local_in(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        self.scopes.get(scope)?.symbols.get(name).and_then(NameSlots::preferred)
    }

    /// Like [`Self::lookup_from`], restricted to one namespace.
    pub fn lookup_namespace_from(&self, scope: ScopeId, namespace: Namespace, name: &str) -> Option<SymbolId> {
        self.ancestors(scope)
            .find_map(|s| self.scopes[s].symbols.get(name).and_then(|slots| slots.get(namespace)))
    }

    /// Like [`Self::lookup_local_in`], restricted to one namespace.
    pub fn lookup_namespace_local_in(&self, scope: ScopeId, namespace: Namespace, name: &str) -> Option<SymbolId> {
        self.scopes.get(scope)?.symbols.get(name)?.get(namespace)
    }

    /// `scope` followed by each of its ancestors up to the global scope. Empty for an unknown id.
    pub fn ancestors(&self, scope: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        let start = (scope < self.scopes.len()).then_some(scope);
        std::iter::successors(start, move |s| self.scopes[*s].parent)
    }

    /// Get a symbol by ID
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    /// Get a scope by ID
    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id)
    }

    /// Symbols visible by name in `scope`, in declaration order.
    pub fn declared_in(&self, scope: ScopeId) -> impl Iterator<Item = &Symbol> + '_ {
        self.scopes
            .get(scope)
            .into_iter()
            .flat_map(|s| s.declared.iter())
            .filter_map(|id| self.symbols.get(*id))
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }
}

/// A scope containing symbol definitions
#[derive(Debug, Clone)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    pub kind: ScopeKind,
    pub symbols: HashMap<String, NameSlots>,
    /// Visible symbols in declaration order
    pub declared: Vec<SymbolId>,
    pub children: Vec<ScopeId>,
}

impl Scope {
    pub fn new(parent: Option<ScopeId>, kind: ScopeKind) -> Self {
        Self {
            parent,
            kind,
            symbols: HashMap::new(),
            declared: Vec::new(),
            children: Vec::new(),
        }
    }
}

/// Variables, methods and types named alike do not hide each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Variable,
    Method,
    Type,
}

/// The symbols one name denotes in a scope, at most one per namespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NameSlots {
    pub variable: Option<SymbolId>,
    pub method: Option<SymbolId>,
    pub ty: Option<SymbolId>,
}

impl NameSlots {
    pub fn get(&self, namespace: Namespace) -> Option<SymbolId> {
        match namespace {
            Namespace::Variable => self.variable,
            Namespace::Method => self.method,
            Namespace::Type => self.ty,
        }
    }

    fn slot_mut(&mut self, namespace: Namespace) -> &mut Option<SymbolId> {
        match namespace {
            Namespace::Variable => &mut self.variable,
            Namespace::Method => &mut self.method,
            Namespace::Type => &mut self.ty,
        }
    }

    /// A variable obscures a type of the same name, and a type obscures a method.
    pub fn preferred(&self) -> Option<SymbolId> {
        self.variable.or(self.ty).or(self.method)
    }
}

/// Kind of scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Global,
    Class,
    Function,
    Block,
}

/// A symbol in the symbol table
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub span: Span,
    pub scope: ScopeId,
}

/// Kind of symbol
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolKind {
    /// Field or local variable
    Variable(VariableInfo),
    /// Method (constructors are not registered)
    Method(FunctionRef),
    /// Class, interface, builtin or skipped type declaration
    Type(TypeTarget),
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableInfo {
    pub ty: Type,
    pub modifiers: Vec<Modifier>,
}

impl SymbolKind {
    pub fn namespace(&self) -> Namespace {
        match self {
            SymbolKind::Variable(_) => Namespace::Variable,
            SymbolKind::Method(_) => Namespace::Method,
            SymbolKind::Type(_) => Namespace::Type,
        }
    }
}

/// What a type symbol names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTarget {
    /// Language builtin (`int`, `String`, `Object`, ...)
    Builtin,
    /// Modelled class or interface
    Class(ClassId),
    /// Enum, record or annotation type: recognised but not modelled
    Opaque,
}
