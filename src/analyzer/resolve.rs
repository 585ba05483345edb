//! Qualified call resolution.
//!
//! Turns a dotted path such as `["Outer", "Inner", "run"]` into an expression that calls the method from the given
//! scope. Static members chain through their type names (`Outer.Inner.run`); instance members and non-static nested
//! classes need an instance, built with a default constructor (`new Outer().new Inner().run`).
//!
//! Resolution walks the path one segment at a time. The first segment is looked up outward from the starting scope;
//! every later segment must be declared directly in the class named by the previous one. The last segment names a
//! method, so a method shadowed by a field of the same name is still found.

use javelin_syntax::ast::{ClassDecl, ClassId, FunctionDecl, FunctionRef, Modifier, Program, TypeKind};
use javelin_syntax::symbols::{Namespace, ScopeId, SymbolKind, TypeTarget};

use super::error::ResolveError;

/// A class together with the expressions that reach it from the call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ClassCursor {
    pub(crate) class: ClassId,
    /// Dotted type name used for static access and for `new`
    pub(crate) type_path: String,
    /// Instance of the enclosing class, for non-static nested classes
    pub(crate) enclosing_instance: Option<String>,
}

pub(crate) struct Resolver<'a> {
    program: &'a Program,
}

impl<'a> Resolver<'a> {
    pub(crate) fn new(program: &'a Program) -> Self {
        Self { program }
    }

    pub(crate) fn resolve(&self, scope: ScopeId, path: &[&str]) -> Result<String, ResolveError> {
        let (first, rest) = path.split_first().ok_or(ResolveError::EmptyPath)?;
        let symbols = &self.program.symbols;
        let found = if rest.is_empty() {
            symbols
                .lookup_namespace_from(scope, Namespace::Method, first)
                .or_else(|| symbols.lookup_from(scope, first))
        } else {
            symbols.lookup_from(scope, first)
        };
        let symbol = found
            .and_then(|id| symbols.get(id))
            .ok_or(ResolveError::SymbolNotFound)?;

        let mut cursor = match symbol.kind {
            SymbolKind::Method(func) if rest.is_empty() => return self.bare_call(func),
            SymbolKind::Method(_) => return Err(ResolveError::MethodHasChildren),
            SymbolKind::Type(TypeTarget::Class(class)) => self.cursor_for(class, first)?,
            SymbolKind::Type(TypeTarget::Builtin | TypeTarget::Opaque) | SymbolKind::Variable(_) => {
                return Err(ResolveError::Unresolvable);
            }
        };

        for (i, segment) in rest.iter().enumerate() {
            let is_last = i + 1 == rest.len();
            let decl = self.class(cursor.class)?;
            let found = if is_last {
                symbols
                    .lookup_namespace_local_in(decl.body.scope, Namespace::Method, segment)
                    .or_else(|| symbols.lookup_local_in(decl.body.scope, segment))
            } else {
                symbols.lookup_local_in(decl.body.scope, segment)
            };
            let symbol = found
                .and_then(|id| symbols.get(id))
                .ok_or(ResolveError::SymbolNotFound)?;
            match symbol.kind {
                SymbolKind::Method(func) => {
                    if !is_last {
                        return Err(ResolveError::MethodHasChildren);
                    }
                    let function = self.program.function(func).ok_or(ResolveError::SymbolNotFound)?;
                    return self.call(&cursor, function);
                }
                SymbolKind::Type(TypeTarget::Class(nested)) => {
                    cursor = self.enter(&cursor, nested, segment)?;
                }
                SymbolKind::Type(TypeTarget::Builtin | TypeTarget::Opaque) | SymbolKind::Variable(_) => {
                    return Err(ResolveError::Unresolvable);
                }
            }
        }
        Err(ResolveError::IncompletePath)
    }

    /// A method named without a qualifier. Static methods are called by name; instance methods need an instance of
    /// their owner.
    pub(crate) fn bare_call(&self, func: FunctionRef) -> Result<String, ResolveError> {
        let function = self.program.function(func).ok_or(ResolveError::SymbolNotFound)?;
        if function.is_static() {
            return Ok(function.name.clone());
        }
        let owner = self.class(func.class)?;
        let cursor = self.cursor_for(func.class, &owner.name)?;
        self.call(&cursor, function)
    }

    /// Cursor for `class` when it is referred to as `written` from the call site.
    ///
    /// A non-static nested class needs its enclosing instances, so it is reached through its fully qualified name
    /// starting at the outermost class.
    pub(crate) fn cursor_for(&self, class: ClassId, written: &str) -> Result<ClassCursor, ResolveError> {
        if !self.is_inner(class) {
            return Ok(ClassCursor {
                class,
                type_path: written.to_string(),
                enclosing_instance: None,
            });
        }
        let mut chain = vec![class];
        let mut current = class;
        while let Some(parent) = self.program.class(current).and_then(|c| c.parent) {
            chain.push(parent);
            current = parent;
        }
        let mut classes = chain.into_iter().rev();
        let outermost = classes.next().ok_or(ResolveError::SymbolNotFound)?;
        let mut cursor = ClassCursor {
            class: outermost,
            type_path: self.class(outermost)?.name.clone(),
            enclosing_instance: None,
        };
        for nested in classes {
            let name = self.class(nested)?.name.clone();
            cursor = self.enter(&cursor, nested, &name)?;
        }
        Ok(cursor)
    }

    /// Step from `cursor` into its nested class `nested`, written as `segment`.
    pub(crate) fn enter(
        &self,
        cursor: &ClassCursor,
        nested: ClassId,
        segment: &str,
    ) -> Result<ClassCursor, ResolveError> {
        let enclosing_instance = if self.is_inner(nested) {
            Some(self.instance(cursor).ok_or(ResolveError::NestedClassRequiresDefaultConstructor)?)
        } else {
            None
        };
        Ok(ClassCursor {
            class: nested,
            type_path: format!("{}.{}", cursor.type_path, segment),
            enclosing_instance,
        })
    }

    /// Call expression for `function` declared in the cursor's class.
    pub(crate) fn call(&self, cursor: &ClassCursor, function: &FunctionDecl) -> Result<String, ResolveError> {
        if function.is_static() {
            return Ok(format!("{}.{}", cursor.type_path, function.name));
        }
        let receiver = self
            .instance(cursor)
            .ok_or(ResolveError::InstanceMethodRequiresDefaultConstructor)?;
        Ok(format!("{}.{}", receiver, function.name))
    }

    /// Expression creating an instance of the cursor's class, if it has a usable default constructor.
    fn instance(&self, cursor: &ClassCursor) -> Option<String> {
        let decl = self.program.class(cursor.class)?;
        if !has_default_constructor(decl) {
            return None;
        }
        Some(match &cursor.enclosing_instance {
            Some(outer) => format!("{}.new {}()", outer, decl.name),
            None => format!("new {}()", cursor.type_path),
        })
    }

    /// A nested class that needs an enclosing instance. Types nested in interfaces are implicitly static.
    fn is_inner(&self, class: ClassId) -> bool {
        let Some(decl) = self.program.class(class) else {
            return false;
        };
        decl.kind == TypeKind::Class
            && !decl.is_static()
            && decl
                .parent
                .and_then(|p| self.program.class(p))
                .is_some_and(|p| p.kind == TypeKind::Class)
    }

    fn class(&self, id: ClassId) -> Result<&'a ClassDecl, ResolveError> {
        self.program.class(id).ok_or(ResolveError::SymbolNotFound)
    }
}

/// Whether `new C()` is possible: a concrete class with no constructors or a parameterless one.
pub fn has_default_constructor(class: &ClassDecl) -> bool {
    class.kind == TypeKind::Class
        && !class.modifiers.contains(&Modifier::Abstract)
        && (class.constructors().next().is_none() || class.constructors().any(|c| c.params.is_empty()))
}
