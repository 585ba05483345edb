//! Adversarial inputs.
//!
//! Every case runs the full pipeline (lex, parse, analyze) and must come back with either a result or one of the
//! analyzer's error values. A stack overflow or hang fails the whole test binary.

use javelin::analyzer::{AnalysisError, Analyzer};
use javelin::diagnostics::{Limit, ParseError};

/// Run the whole pipeline, discarding the result.
fn run(source: &str) -> Result<(), AnalysisError> {
    let mut analyzer = Analyzer::new(source)?;
    analyzer.analyze_user_code()?;
    Ok(())
}

fn is_limit(result: &Result<(), AnalysisError>, expected: Limit) -> bool {
    matches!(result, Err(AnalysisError::Parse(ParseError::LimitExceeded { limit, .. })) if *limit == expected)
}

fn in_main(body: &str) -> String {
    format!("public class Test {{ public static void main(String[] args) {{ {} }} }}", body)
}

fn in_field(init: &str) -> String {
    format!("public class Test {{ int x = {}; }}", init)
}

// =============================================================================
// Depth
// =============================================================================

#[test]
fn test_depth_boundary_is_exact() {
    let parens = |n: usize| format!("{}1{}", "(".repeat(n), ")".repeat(n));
    assert!(run(&in_field(&parens(99))).is_ok());
    assert!(is_limit(&run(&in_field(&parens(100))), Limit::Depth));
}

#[test]
fn test_deep_parentheses() {
    let source = in_main(&format!("int x = {}1{};", "(".repeat(50_000), ")".repeat(50_000)));
    assert!(is_limit(&run(&source), Limit::Depth));
}

#[test]
fn test_unclosed_parentheses() {
    let source = in_main(&format!("int x = {}", "(".repeat(20_000)));
    assert!(run(&source).is_err());
}

#[test]
fn test_deep_unary_negation() {
    let source = in_field(&format!("{}1", "- ".repeat(10_000)));
    assert!(is_limit(&run(&source), Limit::Depth));
}

#[test]
fn test_deep_logical_not() {
    let source = in_main(&format!("boolean b = {}true;", "!".repeat(10_000)));
    assert!(is_limit(&run(&source), Limit::Depth));
}

#[test]
fn test_deep_casts() {
    let source = in_field(&format!("{}1", "(int) ".repeat(5_000)));
    assert!(is_limit(&run(&source), Limit::Depth));
}

#[test]
fn test_deep_generics() {
    let source = format!(
        "public class Test {{ {}String{} x; }}",
        "List<".repeat(1_000),
        ">".repeat(1_000)
    );
    assert!(is_limit(&run(&source), Limit::Depth));
}

#[test]
fn test_deep_generics_with_shift_tokens() {
    let source = format!("public class Test {{ {}int{} x; }}", "A<".repeat(3_000), ">>".repeat(1_500));
    assert!(run(&source).is_err());
}

#[test]
fn test_deep_class_nesting() {
    let source = format!("public class Test {{ {}{} }}", "static class A { ".repeat(5_000), "}".repeat(5_000));
    assert!(is_limit(&run(&source), Limit::Depth));
}

#[test]
fn test_deep_blocks() {
    let source = in_main(&format!("{}{}", "{".repeat(10_000), "}".repeat(10_000)));
    assert!(is_limit(&run(&source), Limit::Depth));
}

#[test]
fn test_deep_array_initializers() {
    let source = in_field(&format!("{}1{}", "{".repeat(10_000), "}".repeat(10_000)));
    assert!(is_limit(&run(&source), Limit::Depth));
}

#[test]
fn test_deep_lambdas() {
    let source = in_main(&format!("Runnable r = {}null{};", "() -> { return ".repeat(2_000), "; }".repeat(2_000)));
    assert!(run(&source).is_err());
}

#[test]
fn test_deep_annotations() {
    let source = format!(
        "public class Test {{ {}{} int x; }}",
        "@A(".repeat(5_000),
        ")".repeat(5_000)
    );
    assert!(is_limit(&run(&source), Limit::Depth));
}

// =============================================================================
// Element and iteration ceilings
// =============================================================================

#[test]
fn test_array_dimension_ceiling() {
    let source = format!("public class Test {{ int{} x; }}", "[]".repeat(1_000));
    assert!(is_limit(&run(&source), Limit::ArrayDimensions));
}

#[test]
fn test_generic_parameter_ceiling() {
    let params = (0..5_000).map(|i| format!("T{}", i)).collect::<Vec<_>>().join(",");
    let source = format!("public class Test<{}> {{ }}", params);
    assert!(is_limit(&run(&source), Limit::GenericParams));
}

#[test]
fn test_qualified_name_ceiling() {
    let source = format!("import {}; public class Test {{ }}", vec!["a"; 10_000].join("."));
    assert!(is_limit(&run(&source), Limit::QualifiedNameParts));
}

#[test]
fn test_array_literal_ceiling() {
    let source = in_field(&format!("{{{}}}", "1,".repeat(20_000)));
    assert!(is_limit(&run(&source), Limit::ArrayLiteralElements));
}

#[test]
fn test_long_skipped_expression() {
    let source = in_field(&format!("foo({})", "x, ".repeat(20_000)));
    assert!(is_limit(&run(&source), Limit::SwallowTokens));
}

// =============================================================================
// Volume
// =============================================================================

#[test]
fn test_many_statements() {
    let source = in_main(&"x++; ".repeat(10_000));
    assert!(run(&source).is_ok());
}

fn chain(terms: usize) -> String {
    vec!["1"; terms].join(" + ")
}

#[test]
fn test_operator_chain_boundary_is_exact() {
    assert!(run(&in_field(&chain(1_001))).is_ok());
    assert!(is_limit(&run(&in_field(&chain(1_002))), Limit::OperatorChain));
}

#[test]
fn test_long_binary_chain() {
    assert!(is_limit(&run(&in_field(&chain(50_000))), Limit::OperatorChain));
    assert!(is_limit(&run(&in_main(&format!("int x = {};", chain(50_000)))), Limit::OperatorChain));
}

#[test]
fn test_nested_chains_share_one_ceiling() {
    let inner = format!("({})", chain(600));
    let source = in_field(&format!("{} + {}", chain(600), inner));
    assert!(is_limit(&run(&source), Limit::OperatorChain));
}

#[test]
fn test_long_instanceof_chain() {
    let source = in_field(&format!("o{}", " instanceof Object".repeat(5_000)));
    assert!(is_limit(&run(&source), Limit::OperatorChain));
}

#[test]
fn test_many_members() {
    let fields: String = (0..5_000).map(|i| format!("int f{}; ", i)).collect();
    let source = format!("public class Test {{ {} }}", fields);
    assert!(run(&source).is_ok());
}

#[test]
fn test_many_classes() {
    let source: String = (0..5_000).map(|i| format!("class C{} {{ }} ", i)).collect();
    assert_eq!(run(&source), Err(AnalysisError::NoEntryPoint));
}

#[test]
fn test_huge_identifier() {
    let source = format!("public class {} {{ }}", "a".repeat(100_000));
    assert!(run(&source).is_ok());
}

#[test]
fn test_huge_string_literal() {
    let source = in_field(&format!("\"{}\"", "x".repeat(100_000)));
    assert!(run(&source).is_ok());
}

#[test]
fn test_unterminated_string() {
    let source = format!("public class Test {{ String s = \"{}", "x".repeat(10_000));
    assert!(run(&source).is_err());
}

#[test]
fn test_unterminated_comment() {
    let source = format!("public class Test {{ /* {}", "/* ".repeat(10_000));
    assert!(run(&source).is_err());
}

// =============================================================================
// Malformed structure
// =============================================================================

#[test]
fn test_unbalanced_braces() {
    for source in [
        "public class Test {",
        "public class Test }",
        "public class Test { void f() { }",
        "public class Test { } }}}}",
        "}}}} public class Test { }",
        "{{{{",
        "public class Test { void f() { { { } }",
    ] {
        let _ = run(source);
    }
}

#[test]
fn test_brace_soup() {
    let source: String = (0..10_000).map(|i| ["{", "}", "(", ")", "[", "]", "<", ">"][i % 8]).collect();
    let _ = run(&source);
    let source = format!("public class Test {{ void f() {{ {} }} }}", source);
    let _ = run(&source);
}

#[test]
fn test_operator_soup() {
    let source = in_main(&"+-*/%&|^!~<>=?:".repeat(2_000));
    let _ = run(&source);
    let source = in_field(&"+-*/%&|^!~<>=?:".repeat(2_000));
    let _ = run(&source);
}

#[test]
fn test_dangling_commas_and_empty_generics() {
    for source in [
        "public class Test<> { }",
        "public class Test<T,> { }",
        "public class Test { Map<,> m; }",
        "public class Test { void f(,) { } }",
        "public class Test { void f(int a,) { } }",
        "public class Test implements A, { }",
        "public class Test { int a,, b; }",
        "public class Test { int[] a = {,}; }",
        "public class Test { List<> x = new ArrayList<>(); }",
    ] {
        let _ = run(source);
    }
}

#[test]
fn test_keyword_soup() {
    let source = "public static final class interface extends implements void int new return ".repeat(1_000);
    let _ = run(&source);
}

#[test]
fn test_member_without_terminator() {
    let source = format!("public class Test {{ {}", "int ".repeat(20_000));
    assert!(run(&source).is_err());
}

// =============================================================================
// Unusual characters
// =============================================================================

#[test]
fn test_null_bytes() {
    let source = "public class Te\0st { public static void main(String[] args) { int a\0 = 1; } }";
    let _ = run(source);
    let _ = run(&"\0".repeat(10_000));
}

#[test]
fn test_byte_order_marks() {
    let source = "\u{feff}public class Test { }";
    assert!(run(source).is_ok());
    let source = format!("public class Test {{ {} }}", "\u{feff}".repeat(10_000));
    assert!(run(&source).is_ok());
}

#[test]
fn test_bidi_override_in_identifiers() {
    let source = "public class Te\u{202e}st { int a\u{2066}b = 1; }";
    let mut analyzer = Analyzer::new(source).unwrap();
    let result = analyzer.analyze_user_code().unwrap();
    assert_eq!(result.entry_point_class, "Te\u{202e}st");
}

#[test]
fn test_multibyte_text_keeps_offsets_on_char_boundaries() {
    let source = "public class Ünïcödé { String s = \"日本語\"; }";
    let mut analyzer = Analyzer::new(source).unwrap();
    let result = analyzer.analyze_user_code().unwrap();
    assert_eq!(&analyzer.source()[result.body.begin..=result.body.end], "{}");
}

#[test]
fn test_random_control_characters() {
    let source: String = (0..10_000u32).filter_map(|i| char::from_u32(i % 32)).collect();
    let _ = run(&source);
}

#[test]
fn test_unicode_escapes() {
    let _ = run("public class \\u0054est { }");
    let _ = run(&"\\u".repeat(10_000));
    let _ = run(&"\\uuuuuuuu".repeat(1_000));
}

// =============================================================================
// Independence
// =============================================================================

/// Run the pipeline on a thread with a 2 MiB stack, the size async runtimes and test harnesses give their workers.
fn run_on_small_stack(source: String) -> Result<(), AnalysisError> {
    std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(move || run(&source))
        .unwrap()
        .join()
        .unwrap()
}

#[test]
fn test_small_stack_survives_adversarial_input() {
    let deepest_chain = format!("{}{}{}", "(".repeat(98), chain(1_001), ")".repeat(98));
    assert!(run_on_small_stack(in_field(&deepest_chain)).is_ok());

    let parens = format!("{}1{}", "(".repeat(99), ")".repeat(99));
    assert!(run_on_small_stack(in_field(&parens)).is_ok());

    let result = run_on_small_stack(in_field(&chain(50_000)));
    assert!(is_limit(&result, Limit::OperatorChain));

    let result = run_on_small_stack(in_main(&format!("int x = {}1;", "- ".repeat(50_000))));
    assert!(is_limit(&result, Limit::Depth));
}

#[test]
fn test_small_stack_near_operation_budget() {
    let statements: String = (0..90).map(|i| format!("int x{} = {}; ", i, chain(1_000))).collect();
    assert!(run_on_small_stack(in_main(&statements)).is_ok());

    let statements: String = (0..120).map(|i| format!("int x{} = {}; ", i, chain(1_000))).collect();
    let result = run_on_small_stack(in_main(&statements));
    assert!(is_limit(&result, Limit::ParseOperations));
}

#[test]
fn test_concurrent_analyzers() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            std::thread::spawn(move || {
                let source = format!("public class T{} {{ int x = {}1{}; }}", i, "(".repeat(90), ")".repeat(90));
                let mut analyzer = Analyzer::new(source).unwrap();
                analyzer.analyze_user_code().unwrap().entry_point_class
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("T{}", i));
    }
}
