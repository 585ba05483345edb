//! Semantic analysis over a parsed submission.
//!
//! The [`Analyzer`] owns one submission (and optionally its template) for the duration of a request. It answers the
//! questions callers need before the code is compiled or run:
//!
//! - where the entry point is, synthesizing one if the public class lacks it ([`Analyzer::analyze_user_code`])
//! - whether the submission has the declarations its template requires
//! - which expression calls a dotted path such as `Util.sum` ([`Analyzer::resolve_function_call`])
//! - which variables and functions are visible from a scope ([`Analyzer::variables_visible_from`],
//!   [`Analyzer::functions_visible_from`])
//!
//! ## Notes
//!
//! - Each analyzer is independent: nothing is cached or shared between instances, so separate requests can be
//!   analyzed on separate threads.
//! - Source text is never modified while parsing. Synthesizing `main` is a single text insertion followed by an
//!   offset adjustment, after which [`Analyzer::source`] returns the extended text.
//!
//! ## Examples
//!
//! ```rust
//! use javelin::analyzer::Analyzer;
//!
//! let mut analyzer = Analyzer::new("public class Test { }").unwrap();
//! let result = analyzer.analyze_user_code().unwrap();
//! assert_eq!(result.entry_point_class, "Test");
//! assert!(result.synthesized);
//! assert!(analyzer.source().contains("public static void main(String[] args){}"));
//! ```

mod entrypoint;
mod error;
mod resolve;
mod result;
mod scopes;
mod template;

pub use entrypoint::{MAIN_METHOD, baseline_main};
pub use error::{AnalysisError, ResolveError};
pub use resolve::has_default_constructor;
pub use result::{BodyOffsets, CodeAnalysisResult};
pub use scopes::VisibleFunction;
pub use template::{MatchMode, functions_match, types_match};

use javelin_syntax::ast::{FunctionRef, Program};
use javelin_syntax::symbols::{ScopeId, Symbol};
use javelin_syntax::{lexer, parser};

use crate::config::{AnalyzerConfig, ExecutionStyle};
use entrypoint::EntryLocation;
use resolve::Resolver;
use template::TemplateMatcher;

/// Analysis session for one submission.
#[derive(Debug, Clone)]
pub struct Analyzer {
    source: String,
    program: Program,
    template: Option<Program>,
    config: AnalyzerConfig,
    /// The `main` inserted by an earlier [`Analyzer::analyze_user_code`] call
    synthesized: Option<FunctionRef>,
}

impl Analyzer {
    /// Parse `source` with the default configuration.
    ///
    /// ## Errors
    /// Returns [`AnalysisError::Parse`] if a parse ceiling is hit.
    pub fn new(source: impl Into<String>) -> Result<Self, AnalysisError> {
        Self::with_config(source, None, AnalyzerConfig::default())
    }

    /// Parse `source` and the `template` it will be validated against, in [`ExecutionStyle::Submission`].
    pub fn with_template(source: impl Into<String>, template: &str) -> Result<Self, AnalysisError> {
        Self::with_config(
            source,
            Some(template),
            AnalyzerConfig::default().with_style(ExecutionStyle::Submission),
        )
    }

    /// Parse `source` and an optional `template` with explicit configuration.
    ///
    /// ## Errors
    /// Returns [`AnalysisError::Parse`] or [`AnalysisError::Template`] if either text hits a parse ceiling.
    #[tracing::instrument(skip_all, fields(source_len = tracing::field::Empty))]
    pub fn with_config(
        source: impl Into<String>,
        template: Option<&str>,
        config: AnalyzerConfig,
    ) -> Result<Self, AnalysisError> {
        let source = source.into();
        tracing::Span::current().record("source_len", source.len());

        let program = parser::parse_with_limits(&lexer::lex(&source), config.limits)?;
        let template = template
            .map(|text| parser::parse_with_limits(&lexer::lex(text), config.limits))
            .transpose()
            .map_err(AnalysisError::Template)?;

        if !program.diagnostics.is_empty() {
            tracing::debug!(count = program.diagnostics.len(), "submission parsed with recovered errors");
        }
        Ok(Self {
            source,
            program,
            template,
            config,
            synthesized: None,
        })
    }

    /// Locate (or synthesize) the entry point and validate against the template.
    ///
    /// Validation only runs in [`ExecutionStyle::Submission`] with a template present; otherwise it passes. Calling
    /// this again returns the same result without inserting a second `main`.
    ///
    /// ## Errors
    /// Returns [`AnalysisError::NoEntryPoint`] if the submission has no public top-level class.
    #[tracing::instrument(skip_all, fields(style = %self.config.style))]
    pub fn analyze_user_code(&mut self) -> Result<CodeAnalysisResult, AnalysisError> {
        let entry = match entrypoint::find_entry(&self.program).ok_or(AnalysisError::NoEntryPoint)? {
            EntryLocation::Declared(func) => func,
            EntryLocation::Missing(class) => {
                let func = entrypoint::synthesize_main(&mut self.program, &mut self.source, class)
                    .ok_or(AnalysisError::NoEntryPoint)?;
                self.synthesized = Some(func);
                func
            }
        };

        let passed_validation = self.validate(entry);
        let class = self.program.class(entry.class).ok_or(AnalysisError::NoEntryPoint)?;
        let entry_point = self.program.function(entry).ok_or(AnalysisError::NoEntryPoint)?;
        let body = entry_point.body.ok_or(AnalysisError::NoEntryPoint)?;

        tracing::debug!(class = %class.name, passed_validation, "analysis complete");
        Ok(CodeAnalysisResult {
            entry_point: entry_point.clone(),
            entry_point_class: class.name.clone(),
            passed_validation,
            body: BodyOffsets::new(body.begin, body.end),
            entry_scope: body.scope,
            synthesized: self.synthesized == Some(entry),
        })
    }

    fn validate(&self, entry: FunctionRef) -> bool {
        match (self.config.style, &self.template) {
            (ExecutionStyle::Submission, Some(template)) => {
                let template_entry = entrypoint::find_entry(template).map(|location| match location {
                    EntryLocation::Declared(func) => func.class,
                    EntryLocation::Missing(class) => class,
                });
                TemplateMatcher::new(template, &self.program).validate(template_entry, entry.class)
            }
            _ => true,
        }
    }

    /// Resolve a dotted call path starting from `scope`.
    ///
    /// Returns the expression that performs the call, e.g. `Util.sum` or `new Test().run`.
    ///
    /// ## Errors
    /// Returns a [`ResolveError`] reason when the path cannot be called from `scope`.
    pub fn resolve_function_call(&self, scope: ScopeId, path: &[&str]) -> Result<String, ResolveError> {
        Resolver::new(&self.program).resolve(scope, path)
    }

    /// Variables visible from `scope`, innermost first.
    pub fn variables_visible_from(&self, scope: ScopeId) -> Vec<&Symbol> {
        scopes::variables_visible_from(&self.program, scope)
    }

    /// Functions callable from `scope`, sorted by access path.
    pub fn functions_visible_from(&self, scope: ScopeId) -> Vec<VisibleFunction> {
        scopes::functions_visible_from(&self.program, scope)
    }

    /// Submission text, including a synthesized `main` if one was inserted.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn template(&self) -> Option<&Program> {
        self.template.as_ref()
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use javelin_syntax::limits::ParseLimits;

    #[test]
    fn test_declared_main_is_found() {
        let source = "public class Test { public static void main(String[] args) { int x = 1; } }";
        let mut analyzer = Analyzer::new(source).unwrap();
        let result = analyzer.analyze_user_code().unwrap();
        assert_eq!(result.entry_point_class, "Test");
        assert!(!result.synthesized);
        assert_eq!(result.body.inner(analyzer.source()), Some(" int x = 1; "));
        assert_eq!(analyzer.source(), source);
    }

    #[test]
    fn test_repeated_analysis_does_not_synthesize_twice() {
        let mut analyzer = Analyzer::new("public class Test { }").unwrap();
        let first = analyzer.analyze_user_code().unwrap();
        let len = analyzer.source().len();
        let second = analyzer.analyze_user_code().unwrap();
        assert_eq!(first, second);
        assert_eq!(analyzer.source().len(), len);
    }

    #[test]
    fn test_execution_style_skips_validation() {
        let config = AnalyzerConfig::new().with_style(ExecutionStyle::Execution);
        let mut analyzer =
            Analyzer::with_config("public class A { }", Some("public class A { void foo() {} }"), config).unwrap();
        assert!(analyzer.analyze_user_code().unwrap().passed_validation);
    }

    #[test]
    fn test_template_parse_failure_is_reported() {
        let config = AnalyzerConfig::new().with_limits(ParseLimits::new().with_max_depth(3));
        let template = "public class A { int x = ((((((1)))))); }";
        let err = Analyzer::with_config("public class A { }", Some(template), config).unwrap_err();
        assert!(matches!(err, AnalysisError::Template(_)));
    }

    #[test]
    fn test_resolution_from_entry_scope() {
        let source = "public class Test { static class Util { static int sum() { return 0; } } \
                      public static void main(String[] args) { } }";
        let mut analyzer = Analyzer::new(source).unwrap();
        let result = analyzer.analyze_user_code().unwrap();
        assert_eq!(
            analyzer.resolve_function_call(result.entry_scope, &["Util", "sum"]),
            Ok("Util.sum".to_string())
        );
    }
}
