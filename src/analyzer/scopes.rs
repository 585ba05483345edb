//! Scope enumeration: variables and functions visible from a scope.

use std::collections::{BTreeMap, HashSet};

use javelin_syntax::ast::{ClassId, FunctionRef, Member, Program};
use javelin_syntax::symbols::{ScopeId, Symbol, SymbolKind, TypeTarget};

use super::resolve::Resolver;

/// A function reachable from a scope and the expression that calls it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct VisibleFunction {
    /// Callable expression, e.g. `helper`, `Util.sum` or `new Test().run`
    pub path: String,
    pub function: FunctionRef,
}

/// Every variable visible from `scope`, innermost first.
///
/// Each level contributes its declarations in source order; a name already seen in an inner level hides the outer one.
pub(crate) fn variables_visible_from(program: &Program, scope: ScopeId) -> Vec<&Symbol> {
    let symbols = &program.symbols;
    let mut seen = HashSet::new();
    let mut visible = Vec::new();
    for symbol in symbols.ancestors(scope).flat_map(move |level| symbols.declared_in(level)) {
        if matches!(symbol.kind, SymbolKind::Variable(_)) && seen.insert(symbol.name.as_str()) {
            visible.push(symbol);
        }
    }
    visible
}

/// Every function callable from `scope`, keyed and sorted by its access path.
///
/// A static method visible by name contributes its bare name; an instance method is called through a new instance of
/// its owner. Every class visible by name contributes the methods reachable through it, including those of nested
/// classes whose owners can be instantiated. When two functions share a path, the one found in the innermost scope
/// wins.
pub(crate) fn functions_visible_from(program: &Program, scope: ScopeId) -> Vec<VisibleFunction> {
    let symbols = &program.symbols;
    let resolver = Resolver::new(program);
    let mut found: BTreeMap<String, FunctionRef> = BTreeMap::new();

    for level in symbols.ancestors(scope) {
        for symbol in symbols.declared_in(level) {
            match symbol.kind {
                SymbolKind::Method(func) => {
                    if let Ok(path) = resolver.bare_call(func) {
                        found.entry(path).or_insert(func);
                    }
                }
                SymbolKind::Type(TypeTarget::Class(class)) => {
                    collect_through_class(program, &resolver, class, &symbol.name, &mut found);
                }
                SymbolKind::Type(_) | SymbolKind::Variable(_) => {}
            }
        }
    }

    found
        .into_iter()
        .map(|(path, function)| VisibleFunction { path, function })
        .collect()
}

fn collect_through_class(
    program: &Program,
    resolver: &Resolver<'_>,
    class: ClassId,
    written: &str,
    found: &mut BTreeMap<String, FunctionRef>,
) {
    let Ok(root) = resolver.cursor_for(class, written) else {
        return;
    };
    let mut pending = vec![root];
    while let Some(cursor) = pending.pop() {
        let Some(decl) = program.class(cursor.class) else {
            continue;
        };
        for (index, member) in decl.body.members.iter().enumerate() {
            match member {
                Member::Function(function) if !function.is_constructor => {
                    if let Ok(path) = resolver.call(&cursor, function) {
                        found.entry(path).or_insert(FunctionRef {
                            class: cursor.class,
                            index,
                        });
                    }
                }
                Member::NestedClass(nested) => {
                    let Some(name) = program.class(*nested).map(|c| c.name.as_str()) else {
                        continue;
                    };
                    if let Ok(next) = resolver.enter(&cursor, *nested, name) {
                        pending.push(next);
                    }
                }
                Member::Function(_) | Member::Variable(_) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use javelin_syntax::symbols::GLOBAL_SCOPE;
    use javelin_syntax::{lexer, parser};

    fn program(source: &str) -> Program {
        parser::parse(&lexer::lex(source)).unwrap()
    }

    fn body_scope(program: &Program, class: ClassId, index: usize) -> ScopeId {
        program.function(FunctionRef { class, index }).unwrap().body.unwrap().scope
    }

    fn paths(functions: &[VisibleFunction]) -> Vec<&str> {
        functions.iter().map(|f| f.path.as_str()).collect()
    }

    #[test]
    fn test_variables_walk_outward() {
        let program = program("class A { int field; void f(int p) { int local; { int inner; } } }");
        let scope = body_scope(&program, 0, 1);
        let names: Vec<&str> = variables_visible_from(&program, scope)
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["p", "local", "field"]);
    }

    #[test]
    fn test_inner_variable_hides_outer() {
        let program = program("class A { int x; void f() { long x; } }");
        let scope = body_scope(&program, 0, 1);
        let visible = variables_visible_from(&program, scope);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].scope, scope);
    }

    #[test]
    fn test_functions_from_inside_a_class() {
        let program = program(
            "public class Test { void foo() {} static int bar() { return 1; } \
             public static void main(String[] args) { } }",
        );
        let scope = body_scope(&program, 0, 2);
        let visible = functions_visible_from(&program, scope);
        assert_eq!(
            paths(&visible),
            vec!["Test.bar", "Test.main", "bar", "main", "new Test().foo"]
        );
    }

    #[test]
    fn test_functions_reach_through_nested_classes() {
        let program = program(
            "class Outer { static class Util { static int sum() { return 0; } } \
             class Inner { void run() {} } }",
        );
        let visible = functions_visible_from(&program, GLOBAL_SCOPE);
        assert_eq!(paths(&visible), vec!["Outer.Util.sum", "new Outer().new Inner().run"]);
    }

    #[test]
    fn test_unreachable_functions_are_omitted() {
        let program = program("class Outer { Outer(int x) {} class Inner { void run() {} } void own() {} }");
        assert!(functions_visible_from(&program, GLOBAL_SCOPE).is_empty());
    }

    #[test]
    fn test_bare_instance_methods_need_an_owner_instance() {
        let program = program("class A { A(int x) {} void own() {} static void shared() {} void f() { } }");
        let scope = body_scope(&program, 0, 3);
        let visible = functions_visible_from(&program, scope);
        assert_eq!(paths(&visible), vec!["A.shared", "shared"]);
    }

    #[test]
    fn test_function_refs_point_at_declarations() {
        let program = program("class A { int x; static void f() {} }");
        let visible = functions_visible_from(&program, GLOBAL_SCOPE);
        assert_eq!(visible.len(), 1);
        assert_eq!(program.function(visible[0].function).unwrap().name, "f");
    }
}
