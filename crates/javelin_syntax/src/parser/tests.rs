#[cfg(test)]
/// Parser unit tests.
///
/// These tests focus on the declaration model, the scope tree, the resource ceilings, and the parser's recovery
/// behaviour on malformed members.
mod tests {
    use super::*;
    use crate::lexer;
    use crate::symbols::GLOBAL_SCOPE;

    fn parse_str(source: &str) -> Result<Program, ParseError> {
        let tokens = lexer::lex(source);
        parse(&tokens)
    }

    fn expr_str(source: &str) -> Result<Expr, ParseError> {
        let tokens = lexer::lex(source);
        parse_expression(&tokens, ParseLimits::default())
    }

    fn only_class(program: &Program) -> &ClassDecl {
        assert_eq!(program.units[0].types.len(), 1, "expected exactly one top-level type");
        &program.classes[program.units[0].types[0]]
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    #[test]
    fn test_parse_class_with_main() {
        let source = "public class Main { public static void main(String[] args) { int x = 1; } }";
        let program = parse_str(source).unwrap();
        let class = only_class(&program);
        assert_eq!(class.name, "Main");
        assert_eq!(class.access, AccessModifier::Public);
        assert_eq!(class.body.begin, source.find('{').unwrap());
        assert_eq!(class.body.end, source.rfind('}').unwrap());

        let main = class.functions().next().unwrap();
        assert_eq!(main.name, "main");
        assert_eq!(main.modifiers, vec![Modifier::Static]);
        assert_eq!(main.return_type, Type::Void);
        assert_eq!(main.params.len(), 1);
        assert_eq!(
            main.params[0].ty,
            Type::Array(ArrayType {
                base: Box::new(Type::Primitive(PrimitiveType::String)),
                dims: 1,
                varargs: false,
            })
        );
        assert!(program.diagnostics.is_empty());
    }

    #[test]
    fn test_package_and_imports() {
        let source = "package a.b; import java.util.*; import static java.lang.Math.max; class T {}";
        let program = parse_str(source).unwrap();
        let unit = &program.units[0];
        assert_eq!(unit.package.as_deref(), Some("a.b"));
        assert_eq!(unit.imports.len(), 2);
        assert_eq!(unit.imports[0].path, "java.util.*");
        assert!(unit.imports[1].is_static);
        assert_eq!(unit.imports[1].path, "java.lang.Math.max");
    }

    #[test]
    fn test_class_header() {
        let source = "abstract class Box<T extends Comparable<T> & Serializable, U> extends Base implements A, B, { }";
        let program = parse_str(source).unwrap();
        let class = only_class(&program);
        assert_eq!(class.modifiers, vec![Modifier::Abstract]);
        assert_eq!(class.generics.len(), 2);
        assert_eq!(class.generics[0].bounds.len(), 2);
        assert_eq!(class.extends[0].name, "Base");
        assert_eq!(class.implements.len(), 2);
    }

    #[test]
    fn test_interface_extends_many() {
        let program = parse_str("interface I extends A, B { void run(); default int x() { return 1; } }").unwrap();
        let iface = only_class(&program);
        assert_eq!(iface.kind, TypeKind::Interface);
        assert_eq!(iface.extends.len(), 2);
        let run = iface.functions().next().unwrap();
        assert!(run.body.is_none());
    }

    #[test]
    fn test_constructor_detection() {
        let program = parse_str("class Point { Point(int x, int y) {} Point copy() { return null; } }").unwrap();
        let class = only_class(&program);
        let functions: Vec<_> = class.functions().collect();
        assert!(functions[0].is_constructor);
        assert_eq!(functions[0].return_type, Type::Void);
        assert!(!functions[1].is_constructor);
        assert_eq!(functions[1].return_type, Type::Complex(ComplexType::named("Point")));
    }

    #[test]
    fn test_constructors_are_not_registered_as_methods() {
        let program = parse_str("class Point { Point() {} void move() {} }").unwrap();
        let class = only_class(&program);
        let scope = class.body.scope;
        assert!(program.symbols.lookup_local_in(scope, "Point").is_none());
        let id = program.symbols.lookup_local_in(scope, "move").unwrap();
        assert_eq!(
            program.symbols.get(id).unwrap().kind,
            SymbolKind::Method(FunctionRef { class: 0, index: 1 })
        );
    }

    #[test]
    fn test_fields_with_multiple_declarators() {
        let program = parse_str("class T { private static final int a = 1, b, c[] = {1, 2,}; }").unwrap();
        let class = only_class(&program);
        let vars: Vec<_> = class.body.members.iter().filter_map(Member::as_variable).collect();
        assert_eq!(vars.len(), 3);
        assert_eq!(vars[0].access, AccessModifier::Private);
        assert_eq!(vars[0].modifiers, vec![Modifier::Static, Modifier::Final]);
        assert!(vars[1].initializer.is_none());
        assert!(matches!(vars[2].ty, Type::Array(ArrayType { dims: 1, .. })));
        assert!(matches!(
            vars[2].initializer,
            Some(Expr::Term(Term::Lit(Literal::Array(ref items)))) if items.len() == 2
        ));
    }

    #[test]
    fn test_nested_classes_and_parent_links() {
        let program = parse_str("public class Outer { static class Inner { class Deep {} } }").unwrap();
        let outer = only_class(&program);
        let inner_id = outer.body.members[0].as_nested_class().unwrap();
        let inner = &program.classes[inner_id];
        assert_eq!(inner.name, "Inner");
        assert!(inner.is_static());
        assert_eq!(inner.parent, Some(program.units[0].types[0]));
        let deep = &program.classes[inner.body.members[0].as_nested_class().unwrap()];
        assert_eq!(deep.parent, Some(inner_id));
    }

    #[test]
    fn test_generic_method_and_varargs() {
        let program = parse_str("class T { public <K, V extends Number> Map<K, List<V>> f(String... xs) throws IOException, E { return null; } }").unwrap();
        let f = only_class(&program).functions().next().unwrap();
        assert_eq!(f.generics.len(), 2);
        assert_eq!(f.return_type.to_string(), "Map<K, List<V>>");
        assert!(matches!(&f.params[0].ty, Type::Array(a) if a.varargs));
        assert_eq!(f.throws.len(), 2);
    }

    #[test]
    fn test_signature_rendering() {
        let program = parse_str(
            "class T { protected static synchronized <E extends Comparable<E>> int[] sort(final List<? super E> xs, int... k) { return null; } }",
        )
        .unwrap();
        let f = only_class(&program).functions().next().unwrap();
        insta::assert_snapshot!(f.to_string(), @"protected static synchronized <E> int[] sort(List<? super E> xs, int... k)");
    }

    #[test]
    fn test_shift_tokens_close_nested_generics() {
        let program = parse_str("class T { Map<String, Map<String, List<Integer>>> m; List<List<String>> l; }").unwrap();
        let vars: Vec<_> = only_class(&program).body.members.iter().filter_map(Member::as_variable).collect();
        assert_eq!(vars.len(), 2);
        assert_eq!(vars[0].ty.to_string(), "Map<String, Map<String, List<Integer>>>");
        assert_eq!(vars[1].name, "l");
    }

    #[test]
    fn test_wildcards() {
        let program = parse_str("class T { List<? extends A & B> a; List<? super C> b; List<?> c; List<> d; }").unwrap();
        let vars: Vec<_> = only_class(&program).body.members.iter().filter_map(Member::as_variable).collect();
        let args = |i: usize| match &vars[i].ty {
            Type::Complex(c) => c.generic_args.clone().unwrap(),
            other => panic!("expected complex type, got {other:?}"),
        };
        assert!(matches!(&args(0)[0], GenericArg::Wildcard(WildcardBound::Extends(b)) if b.len() == 2));
        assert!(matches!(&args(1)[0], GenericArg::Wildcard(WildcardBound::Super(_))));
        assert_eq!(args(2)[0], GenericArg::Wildcard(WildcardBound::Unbounded));
        assert!(args(3).is_empty());
    }

    #[test]
    fn test_annotations_on_members() {
        let source = r#"class T { @Deprecated @SuppressWarnings({"a", "b"}) @Info(name = "x", meta = @Meta(1)) void f() {} }"#;
        let program = parse_str(source).unwrap();
        let f = only_class(&program).functions().next().unwrap();
        assert_eq!(f.annotations.len(), 3);
        assert!(matches!(&f.annotations[1].args[0].value, AnnotationValue::Array(items) if items.len() == 2));
        assert_eq!(f.annotations[2].args[0].name.as_deref(), Some("name"));
        assert!(matches!(f.annotations[2].args[1].value, AnnotationValue::Annotation(_)));
    }

    #[test]
    fn test_enum_record_and_annotation_types_are_skipped() {
        let source = "enum Color { RED, GREEN; void f() {} } record P(int x) {} @interface A { int v() default 1; } public class Main {}";
        let program = parse_str(source).unwrap();
        assert_eq!(program.units[0].types.len(), 1);
        assert_eq!(program.classes[program.units[0].types[0]].name, "Main");
        for name in ["Color", "P", "A"] {
            let id = program.symbols.lookup_local_in(GLOBAL_SCOPE, name).unwrap();
            assert_eq!(program.symbols.get(id).unwrap().kind, SymbolKind::Type(TypeTarget::Opaque));
        }
    }

    #[test]
    fn test_initializer_blocks_are_skipped() {
        let program = parse_str("class T { static { int a = 1; } { int b = 2; } int c = 3; }").unwrap();
        let class = only_class(&program);
        assert_eq!(class.body.members.len(), 1);
        assert!(program.diagnostics.is_empty());
    }

    // ========================================================================
    // Scopes and symbols
    // ========================================================================

    #[test]
    fn test_body_scopes_and_locals() {
        let source = "class T { int f; void m(int p) { int a = 1; { String b; } for (int i = 0; i < 3; i++) { int c; } } }";
        let program = parse_str(source).unwrap();
        let class = only_class(&program);
        let m = class.functions().next().unwrap();
        let body = m.body.unwrap();
        assert_eq!(&source[body.begin..=body.begin], "{");
        assert_eq!(&source[body.end..=body.end], "}");

        let symbols = &program.symbols;
        let fn_scope = symbols.scope(body.scope).unwrap();
        assert_eq!(fn_scope.kind, ScopeKind::Function);
        assert_eq!(fn_scope.parent, Some(class.body.scope));
        assert!(symbols.lookup_local_in(body.scope, "p").is_some());
        assert!(symbols.lookup_local_in(body.scope, "a").is_some());
        assert_eq!(fn_scope.children.len(), 2);
        let inner = fn_scope.children[0];
        assert!(symbols.lookup_local_in(inner, "b").is_some());
        assert!(symbols.lookup_from(inner, "f").is_some());
        assert!(symbols.lookup_from(inner, "T").is_some());
    }

    #[test]
    fn test_statements_that_are_not_declarations() {
        let source = "class T { void m() { x = 5; foo(bar); a.b.c(); i++; return; if (x) { int y; } else { int z; } } }";
        let program = parse_str(source).unwrap();
        assert!(program.diagnostics.is_empty(), "{:?}", program.diagnostics);
        let body = only_class(&program).functions().next().unwrap().body.unwrap();
        for name in ["x", "foo", "a"] {
            assert!(program.symbols.lookup_local_in(body.scope, name).is_none());
        }
        assert_eq!(program.symbols.scope(body.scope).unwrap().children.len(), 2);
    }

    #[test]
    fn test_lambda_and_switch_bodies_become_scopes() {
        let source = "class T { void m() { run(() -> { int a; }); int r = switch (k) { case 1 -> 2; default -> 3; }; } }";
        let program = parse_str(source).unwrap();
        assert!(program.diagnostics.is_empty(), "{:?}", program.diagnostics);
        let body = only_class(&program).functions().next().unwrap().body.unwrap();
        assert!(program.symbols.lookup_local_in(body.scope, "r").is_some());
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    #[test]
    fn test_precedence_climbing() {
        let expr = expr_str("1 + 2 * 3 - 4").unwrap();
        assert_eq!(expr.to_string(), "((1 + (2 * 3)) - 4)");
    }

    #[test]
    fn test_unary_postfix_and_instanceof() {
        assert_eq!(expr_str("-x++").unwrap().to_string(), "(-(x++))");
        assert!(matches!(expr_str("o instanceof String s && ok").unwrap(), Expr::Binary { op: OperatorId::AmpAmp, .. }));
        assert!(matches!(expr_str("a[i + 1]").unwrap(), Expr::Term(Term::ArrayRef { .. })));
    }

    #[test]
    fn test_casts() {
        assert!(matches!(expr_str("(int) x").unwrap(), Expr::Term(Term::Cast { .. })));
        assert!(matches!(expr_str("(int) -x").unwrap(), Expr::Term(Term::Cast { .. })));
        assert!(matches!(expr_str("(List<String>) obj").unwrap(), Expr::Term(Term::Cast { .. })));
        // A non-primitive followed by `-` is a subtraction.
        assert!(matches!(expr_str("(a) - b").unwrap(), Expr::Binary { op: OperatorId::Minus, .. }));
        assert!(matches!(expr_str("(a)").unwrap(), Expr::Term(Term::Paren(_))));
    }

    #[test]
    fn test_field_declarator_spans() {
        let source = "class T { static int a = 1, b; }";
        let program = parse_str(source).unwrap();
        let spans: Vec<&str> = only_class(&program)
            .body
            .members
            .iter()
            .filter_map(Member::as_variable)
            .map(|v| &source[v.span.start..v.span.end])
            .collect();
        assert_eq!(spans, vec!["static int a = 1", "static int a = 1, b"]);
    }

    #[test]
    fn test_operator_chain_ceiling() {
        let limits = ParseLimits::default().with_max_operator_chain(3);
        let tokens = lexer::lex("a + b * c - d");
        assert!(parse_expression(&tokens, limits).is_ok());
        let tokens = lexer::lex("a + b + c + d + e");
        let err = parse_expression(&tokens, limits).unwrap_err();
        assert!(matches!(err, ParseError::LimitExceeded { limit: Limit::OperatorChain, max: 3, .. }));
        // Folds inside parentheses count towards the enclosing chain.
        let tokens = lexer::lex("a + b + (c + d + e)");
        assert!(parse_expression(&tokens, limits).is_err());
        let tokens = lexer::lex("(a + b) * (c + d)");
        assert!(parse_expression(&tokens, limits).is_ok());
    }

    #[test]
    fn test_declared_variable_in_parens_is_not_a_cast() {
        let program = parse_str("class T { int a = 1; int b = (a) + 1; }").unwrap();
        let vars: Vec<_> = only_class(&program).body.members.iter().filter_map(Member::as_variable).collect();
        assert!(matches!(vars[1].initializer, Some(Expr::Binary { .. })));
    }

    #[test]
    fn test_swallowed_constructs() {
        for source in ["foo(1, 2)", "a.b.c", "new int[]{1, 2}", "x -> x + 1", "(a, b) -> a", "String::valueOf", "c ? 1 : 2"] {
            let expr = expr_str(source).unwrap();
            assert!(matches!(expr, Expr::Term(Term::Swallowed(_))), "{source} parsed as {expr:?}");
        }
    }

    #[test]
    fn test_trailing_tokens_are_rejected() {
        assert!(expr_str("1 2").is_err());
        assert!(expr_str("1;").is_ok());
    }

    // ========================================================================
    // Recovery
    // ========================================================================

    #[test]
    fn test_recovers_from_bad_member() {
        let source = "public class T { int a = 1; garbage 1 @#$ ; int b = 2; (,) void f() {} }";
        let program = parse_str(source).unwrap();
        let class = only_class(&program);
        let names: Vec<_> = class
            .body
            .members
            .iter()
            .map(|m| match m {
                Member::Variable(v) => v.name.clone(),
                Member::Function(f) => f.name.clone(),
                Member::NestedClass(id) => program.classes[*id].name.clone(),
            })
            .collect();
        assert_eq!(names, vec!["a", "b", "f"]);
        assert!(!program.diagnostics.is_empty());
    }

    #[test]
    fn test_empty_parameter_comma_is_an_error() {
        let program = parse_str("class T { void f(,) {} }").unwrap();
        assert!(only_class(&program).functions().next().is_none());
        assert!(matches!(program.diagnostics[0], ParseError::Syntax { .. }));
    }

    #[test]
    fn test_duplicate_access_modifier() {
        let program = parse_str("class T { public public int x = 1; }").unwrap();
        assert!(program.diagnostics[0].to_string().contains("duplicate access modifier"));
        assert_eq!(only_class(&program).body.members.len(), 1);
    }

    #[test]
    fn test_unterminated_class_is_not_attached() {
        let program = parse_str("public class T { void f() {").unwrap();
        assert!(program.units[0].types.is_empty());
        assert!(!program.diagnostics.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let program = parse_str("").unwrap();
        assert!(program.units[0].types.is_empty());
        assert!(parse(&[]).is_ok());
    }

    // ========================================================================
    // Limits
    // ========================================================================

    fn nested_parens(n: usize) -> String {
        format!("{}1{}", "(".repeat(n), ")".repeat(n))
    }

    #[test]
    fn test_depth_boundary_in_expressions() {
        assert!(expr_str(&nested_parens(99)).is_ok());
        let err = expr_str(&nested_parens(100)).unwrap_err();
        assert!(matches!(err, ParseError::LimitExceeded { limit: Limit::Depth, max: 100, .. }));
    }

    #[test]
    fn test_depth_boundary_in_fields() {
        let field = |n: usize| format!("class T {{ int x = {}; }}", nested_parens(n));
        assert!(parse_str(&field(99)).is_ok());
        assert!(parse_str(&field(101)).unwrap_err().is_limit());
    }

    #[test]
    fn test_custom_depth_limit() {
        let tokens = lexer::lex(&nested_parens(5));
        let limits = ParseLimits::default().with_max_depth(5);
        assert!(parse_expression(&tokens, limits).unwrap_err().is_limit());
        assert!(parse_expression(&tokens, ParseLimits::default().with_max_depth(6)).is_ok());
    }

    #[test]
    fn test_deeply_nested_classes_hit_depth_limit() {
        let source = format!("{}{}", "class A { ".repeat(150), "}".repeat(150));
        assert!(matches!(
            parse_str(&source),
            Err(ParseError::LimitExceeded { limit: Limit::Depth, .. })
        ));
    }

    #[test]
    fn test_generic_param_ceiling() {
        let params = (0..101).map(|i| format!("T{i}")).collect::<Vec<_>>().join(", ");
        let err = parse_str(&format!("class C<{params}> {{}}")).unwrap_err();
        assert!(matches!(err, ParseError::LimitExceeded { limit: Limit::GenericParams, .. }));
    }

    #[test]
    fn test_array_dimension_ceiling() {
        let ok = format!("class T {{ int{} a; }}", "[]".repeat(255));
        assert!(parse_str(&ok).is_ok());
        let too_many = format!("class T {{ int{} a; }}", "[]".repeat(256));
        assert!(matches!(
            parse_str(&too_many),
            Err(ParseError::LimitExceeded { limit: Limit::ArrayDimensions, .. })
        ));
    }

    #[test]
    fn test_qualified_name_ceiling() {
        let name = (0..51).map(|i| format!("p{i}")).collect::<Vec<_>>().join(".");
        let err = parse_str(&format!("class T {{ {name} x; }}")).unwrap_err();
        assert!(matches!(err, ParseError::LimitExceeded { limit: Limit::QualifiedNameParts, .. }));
    }

    #[test]
    fn test_array_literal_ceiling() {
        let tokens = lexer::lex("class T { int[] a = {1, 2, 3, 4}; }");
        let limits = ParseLimits::default().with_max_array_literal_elements(3);
        let err = parse_with_limits(&tokens, limits).unwrap_err();
        assert!(matches!(err, ParseError::LimitExceeded { limit: Limit::ArrayLiteralElements, .. }));
    }

    #[test]
    fn test_operation_ceiling() {
        let tokens = lexer::lex("class T { void f() { ; ; ; ; ; ; ; ; ; ; } }");
        let limits = ParseLimits::default().with_max_parse_operations(5);
        let err = parse_with_limits(&tokens, limits).unwrap_err();
        assert!(matches!(err, ParseError::LimitExceeded { limit: Limit::ParseOperations, .. }));
    }

    #[test]
    fn test_swallow_ceiling() {
        let call = format!("foo({})", "1, ".repeat(50));
        let tokens = lexer::lex(&call);
        let limits = ParseLimits::default().with_max_swallow_tokens(20);
        let err = parse_expression(&tokens, limits).unwrap_err();
        assert!(matches!(err, ParseError::LimitExceeded { limit: Limit::SwallowTokens, .. }));
    }

    #[test]
    fn test_member_lookahead_ceiling() {
        let tokens = lexer::lex(&format!("class T {{ {} x = 1; }}", "int ".repeat(20)));
        let limits = ParseLimits::default().with_max_member_lookahead(10);
        let err = parse_with_limits(&tokens, limits).unwrap_err();
        assert!(matches!(err, ParseError::LimitExceeded { limit: Limit::MemberLookahead, .. }));
    }

    #[test]
    fn test_depth_counter_is_restored_after_errors() {
        // Many sibling failures must not accumulate depth.
        let members = "int x = (((1); ".repeat(200);
        let program = parse_str(&format!("class T {{ {members} int ok = 1; }}")).unwrap();
        assert!(only_class(&program).body.members.iter().any(|m| matches!(m, Member::Variable(v) if v.name == "ok")));
    }
}
