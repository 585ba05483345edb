//! Abstract Syntax Tree definitions.
//!
//! Declarations are stored in per-program arenas: classes live in [`Program::classes`] and refer to each other by
//! [`ClassId`]; lexical scopes live in the program's [`SymbolTable`] and are referenced by [`ScopeId`]. Nothing in the
//! tree owns its parent.
//!
//! All offsets are byte offsets into the original source text. Scope offsets satisfy `begin <= end` and point at the
//! opening and closing brace of the scope respectively.

use std::fmt;

use crate::diagnostics::ParseError;
use crate::lang::operators::{self, OperatorId};
use crate::symbols::{ScopeId, SymbolTable};

/// Source location span (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Index of a class in [`Program::classes`].
pub type ClassId = usize;

/// Identifier (owned string)
pub type Ident = String;

// ============================================================================
// Program
// ============================================================================

/// A parsed program: compilation units plus the arenas they index into.
#[derive(Debug, Clone)]
pub struct Program {
    pub units: Vec<CompilationUnit>,
    /// Arena of every modelled class and interface, top-level and nested.
    pub classes: Vec<ClassDecl>,
    pub symbols: SymbolTable,
    /// Recoverable syntax errors that escaped a declaration and were skipped.
    pub diagnostics: Vec<ParseError>,
}

impl Program {
    pub fn class(&self, id: ClassId) -> Option<&ClassDecl> {
        self.classes.get(id)
    }

    pub fn class_mut(&mut self, id: ClassId) -> Option<&mut ClassDecl> {
        self.classes.get_mut(id)
    }

    /// Resolve a [`FunctionRef`] to its declaration.
    pub fn function(&self, func: FunctionRef) -> Option<&FunctionDecl> {
        match self.classes.get(func.class)?.body.members.get(func.index)? {
            Member::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Top-level type declarations in source order, across all units.
    pub fn top_level_classes(&self) -> impl Iterator<Item = ClassId> + '_ {
        self.units.iter().flat_map(|u| u.types.iter().copied())
    }
}

/// One source file: optional package, imports, top-level types.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompilationUnit {
    pub package: Option<String>,
    pub imports: Vec<Import>,
    pub types: Vec<ClassId>,
}

/// `import [static] a.b.C;` or `import a.b.*;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    /// Dotted path; a wildcard import ends in `*`.
    pub path: String,
    pub is_static: bool,
    pub span: Span,
}

// ============================================================================
// Declarations
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessModifier {
    Public,
    Protected,
    Private,
    /// No explicit modifier (package-private).
    #[default]
    Default,
}

/// Non-access modifiers. Ordering is only used to compare modifier sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Modifier {
    Static,
    Final,
    Abstract,
    Strictfp,
    Default,
    Transient,
    Synchronized,
    Volatile,
    Native,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Interface,
}

/// Generic type parameter: `T` or `T extends A & B`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericParam {
    pub name: Ident,
    pub bounds: Vec<ComplexType>,
}

/// `@Name`, `@Name(value)` or `@Name(key = value, ...)`
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub name: String,
    pub args: Vec<AnnotationArg>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationArg {
    pub name: Option<Ident>,
    pub value: AnnotationValue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationValue {
    Annotation(Box<Annotation>),
    Array(Vec<AnnotationValue>),
    Expr(Expr),
}

/// Class or interface declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub kind: TypeKind,
    pub access: AccessModifier,
    pub annotations: Vec<Annotation>,
    pub modifiers: Vec<Modifier>,
    pub name: Ident,
    pub generics: Vec<GenericParam>,
    pub extends: Vec<ComplexType>,
    pub implements: Vec<ComplexType>,
    pub body: TypeScope,
    /// Enclosing class for nested declarations.
    pub parent: Option<ClassId>,
    pub span: Span,
}

impl ClassDecl {
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(&Modifier::Static)
    }

    pub fn functions(&self) -> impl Iterator<Item = &FunctionDecl> {
        self.body.members.iter().filter_map(Member::as_function)
    }

    pub fn constructors(&self) -> impl Iterator<Item = &FunctionDecl> {
        self.functions().filter(|f| f.is_constructor)
    }
}

/// Body of a class: offsets of `{` and `}` plus its members.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeScope {
    pub begin: usize,
    pub end: usize,
    pub members: Vec<Member>,
    pub scope: ScopeId,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Function(FunctionDecl),
    Variable(VariableDecl),
    NestedClass(ClassId),
}

impl Member {
    pub fn as_function(&self) -> Option<&FunctionDecl> {
        match self {
            Member::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_variable(&self) -> Option<&VariableDecl> {
        match self {
            Member::Variable(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_nested_class(&self) -> Option<ClassId> {
        match self {
            Member::NestedClass(id) => Some(*id),
            _ => None,
        }
    }
}

/// Position of a function inside the class arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FunctionRef {
    pub class: ClassId,
    /// Index into the owning class's `body.members`.
    pub index: usize,
}

/// Method or constructor declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub access: AccessModifier,
    pub annotations: Vec<Annotation>,
    pub modifiers: Vec<Modifier>,
    pub generics: Vec<GenericParam>,
    /// `Type::Void` for constructors.
    pub return_type: Type,
    pub name: Ident,
    pub is_constructor: bool,
    pub params: Vec<Param>,
    pub throws: Vec<ComplexType>,
    /// `None` for abstract and interface methods declared with `;`.
    pub body: Option<FuncScope>,
    pub owner: ClassId,
    pub span: Span,
}

impl FunctionDecl {
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(&Modifier::Static)
    }
}

/// Function body offsets; the body itself is opaque to declaration matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuncScope {
    pub begin: usize,
    pub end: usize,
    pub scope: ScopeId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub annotations: Vec<String>,
    pub modifiers: Vec<Modifier>,
    pub ty: Type,
    pub name: Ident,
}

/// Field declaration. `int a, b = 1;` produces one `VariableDecl` per declarator.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecl {
    pub access: AccessModifier,
    pub annotations: Vec<Annotation>,
    pub modifiers: Vec<Modifier>,
    pub ty: Type,
    pub name: Ident,
    pub initializer: Option<Expr>,
    pub span: Span,
}

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
    Boolean,
    String,
    Var,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Primitive(PrimitiveType),
    Void,
    Array(ArrayType),
    Complex(ComplexType),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayType {
    pub base: Box<Type>,
    pub dims: usize,
    pub varargs: bool,
}

/// Named reference type: `java.util.Map<K, V>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexType {
    /// Dotted name.
    pub name: String,
    /// `None` when no `<...>` was written; `Some(vec![])` for the diamond `<>`.
    pub generic_args: Option<Vec<GenericArg>>,
}

impl ComplexType {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            generic_args: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenericArg {
    Type(Type),
    Wildcard(WildcardBound),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WildcardBound {
    Unbounded,
    Extends(Vec<ComplexType>),
    Super(ComplexType),
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Binary {
        lhs: Box<Expr>,
        op: OperatorId,
        rhs: Box<Expr>,
    },
    Unary {
        op: OperatorId,
        operand: Box<Expr>,
    },
    Postfix {
        op: OperatorId,
        operand: Box<Expr>,
    },
    InstanceOf {
        expr: Box<Expr>,
        ty: Type,
    },
    Term(Term),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Lit(Literal),
    Paren(Box<Expr>),
    Ident(Ident),
    ArrayRef { array: Ident, index: Box<Expr> },
    Cast { ty: Type, expr: Box<Expr> },
    /// A construct outside the modelled grammar (lambda, call chain, `new`, ternary, ...) that was skipped.
    Swallowed(Span),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Long(i64),
    Float(f64),
    Double(f64),
    Char(String),
    Str(String),
    Bool(bool),
    Null,
    /// Array initializer `{a, b, ...}`.
    Array(Vec<Expr>),
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for AccessModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessModifier::Public => write!(f, "public"),
            AccessModifier::Protected => write!(f, "protected"),
            AccessModifier::Private => write!(f, "private"),
            AccessModifier::Default => Ok(()),
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Modifier::Static => "static",
            Modifier::Final => "final",
            Modifier::Abstract => "abstract",
            Modifier::Strictfp => "strictfp",
            Modifier::Default => "default",
            Modifier::Transient => "transient",
            Modifier::Synchronized => "synchronized",
            Modifier::Volatile => "volatile",
            Modifier::Native => "native",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PrimitiveType::Byte => "byte",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
            PrimitiveType::Char => "char",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::String => "String",
            PrimitiveType::Var => "var",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Primitive(p) => write!(f, "{}", p),
            Type::Void => write!(f, "void"),
            Type::Array(a) => {
                write!(f, "{}", a.base)?;
                if a.varargs {
                    write!(f, "...")
                } else {
                    (0..a.dims).try_for_each(|_| write!(f, "[]"))
                }
            }
            Type::Complex(c) => write!(f, "{}", c),
        }
    }
}

impl fmt::Display for ComplexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(args) = &self.generic_args {
            write!(f, "<")?;
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", arg)?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

impl fmt::Display for GenericArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenericArg::Type(t) => write!(f, "{}", t),
            GenericArg::Wildcard(WildcardBound::Unbounded) => write!(f, "?"),
            GenericArg::Wildcard(WildcardBound::Extends(bounds)) => {
                write!(f, "? extends ")?;
                for (i, b) in bounds.iter().enumerate() {
                    if i > 0 {
                        write!(f, " & ")?;
                    }
                    write!(f, "{}", b)?;
                }
                Ok(())
            }
            GenericArg::Wildcard(WildcardBound::Super(b)) => write!(f, "? super {}", b),
        }
    }
}

impl fmt::Display for FunctionDecl {
    /// Signature only, e.g. `public static void main(String[] args)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.access != AccessModifier::Default {
            write!(f, "{} ", self.access)?;
        }
        for m in &self.modifiers {
            write!(f, "{} ", m)?;
        }
        if !self.generics.is_empty() {
            let names: Vec<&str> = self.generics.iter().map(|g| g.name.as_str()).collect();
            write!(f, "<{}> ", names.join(", "))?;
        }
        if !self.is_constructor {
            write!(f, "{} ", self.return_type)?;
        }
        write!(f, "{}(", self.name)?;
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} {}", p.ty, p.name)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Binary { lhs, op, rhs } => write!(f, "({} {} {})", lhs, operators::as_str(*op), rhs),
            Expr::Unary { op, operand } => write!(f, "({}{})", operators::as_str(*op), operand),
            Expr::Postfix { op, operand } => write!(f, "({}{})", operand, operators::as_str(*op)),
            Expr::InstanceOf { expr, ty } => write!(f, "({} instanceof {})", expr, ty),
            Expr::Term(t) => match t {
                Term::Lit(lit) => write!(f, "{}", lit),
                Term::Paren(e) => write!(f, "{}", e),
                Term::Ident(name) => write!(f, "{}", name),
                Term::ArrayRef { array, index } => write!(f, "{}[{}]", array, index),
                Term::Cast { ty, expr } => write!(f, "(({}) {})", ty, expr),
                Term::Swallowed(_) => write!(f, "<skipped>"),
            },
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(v) => write!(f, "{}", v),
            Literal::Long(v) => write!(f, "{}L", v),
            Literal::Float(v) => write!(f, "{}f", v),
            Literal::Double(v) => write!(f, "{}", v),
            Literal::Char(s) => write!(f, "'{}'", s),
            Literal::Str(s) => write!(f, "\"{}\"", s),
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Null => write!(f, "null"),
            Literal::Array(items) => {
                write!(f, "{{")?;
                for (i, e) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", e)?;
                }
                write!(f, "}}")
            }
        }
    }
}
