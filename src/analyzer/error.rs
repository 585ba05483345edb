//! Analysis failures and call-resolution reasons.

// Spurious warnings from miette derive macro expansion
#![allow(unused_assignments)]

use javelin_syntax::diagnostics::ParseError;
use miette::Diagnostic;
use thiserror::Error;

/// A failed analysis pass.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum AnalysisError {
    /// The submission declares no public top-level class to host `main`.
    #[error("no entry point: the code declares no public class")]
    #[diagnostic(
        code(javelin::no_entry_point),
        help("declare a `public class` containing `public static void main(String[] args)`")
    )]
    NoEntryPoint,

    /// The submission hit a parse ceiling.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    /// The template hit a parse ceiling.
    #[error("template failed to parse")]
    #[diagnostic(code(javelin::template))]
    Template(#[source] ParseError),
}

/// Why a qualified call path could not be turned into a callable expression.
///
/// These are expected outcomes for arbitrary submissions and are returned as values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Diagnostic)]
pub enum ResolveError {
    #[error("no symbols to resolve")]
    #[diagnostic(code(javelin::resolve::empty_path))]
    EmptyPath,

    #[error("symbol not found")]
    #[diagnostic(code(javelin::resolve::not_found))]
    SymbolNotFound,

    #[error("type path incomplete, expected method")]
    #[diagnostic(code(javelin::resolve::incomplete))]
    IncompletePath,

    #[error("method cannot have child symbols")]
    #[diagnostic(code(javelin::resolve::method_has_children))]
    MethodHasChildren,

    /// The path names a variable, a builtin or an unmodelled type.
    #[error("unable to resolve symbol")]
    #[diagnostic(code(javelin::resolve::unresolvable))]
    Unresolvable,

    #[error("instance method requires default constructor")]
    #[diagnostic(
        code(javelin::resolve::default_constructor),
        help("declare no constructors, or add one taking no parameters")
    )]
    InstanceMethodRequiresDefaultConstructor,

    #[error("non-static nested class requires default constructor on parent")]
    #[diagnostic(
        code(javelin::resolve::nested_default_constructor),
        help("make the nested class `static`, or give its enclosing class a constructor taking no parameters")
    )]
    NestedClassRequiresDefaultConstructor,
}

#[cfg(test)]
mod tests {
    use super::*;
    use javelin_syntax::ast::Span;
    use javelin_syntax::diagnostics::Limit;

    #[test]
    fn test_parse_error_is_transparent() {
        let inner = ParseError::limit(Limit::Depth, 100, Span::new(3, 4));
        let err = AnalysisError::from(inner.clone());
        assert_eq!(err.to_string(), inner.to_string());
    }

    #[test]
    fn test_resolve_messages() {
        assert_eq!(ResolveError::EmptyPath.to_string(), "no symbols to resolve");
        assert_eq!(
            ResolveError::InstanceMethodRequiresDefaultConstructor.to_string(),
            "instance method requires default constructor"
        );
    }
}
