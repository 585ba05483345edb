//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;

use javelin_syntax::symbols::SymbolKind;
use javelin_syntax::{lexer, parser};
use miette::{Diagnostic, NamedSource, Report};
use serde_json::json;

use crate::analyzer::{AnalysisError, Analyzer, CodeAnalysisResult};
use crate::config::{AnalyzerConfig, ExecutionStyle};

use super::{CliError, CliResult, ExitCode};

/// Maximum source file size (100 MB)
///
/// Files larger than this are rejected to prevent out-of-memory conditions
/// during analysis.
const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// Read a source file with size validation.
pub fn read_source(file_path: &str) -> CliResult<String> {
    // Check file size before reading
    let metadata =
        fs::metadata(file_path).map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", file_path, e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            file_path,
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(file_path).map_err(|e| CliError::failure(format!("Error reading file '{}': {}", file_path, e)))
}

/// Render a diagnostic against its source text.
fn render<E>(error: E, file_path: &str, source: &str) -> String
where
    E: Diagnostic + Send + Sync + 'static,
{
    let report = Report::new(error).with_source_code(NamedSource::new(file_path, source.to_string()));
    format!("{:?}", report)
}

/// Options for the `analyze` subcommand.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    pub template: Option<String>,
    /// Defaults to submission when a template is given, execution otherwise
    pub style: Option<ExecutionStyle>,
    pub json: bool,
    pub print_source: bool,
}

/// Read and analyze a submission, rendering failures against the offending text.
fn analyze(
    file_path: &str,
    template_path: Option<&str>,
    style: ExecutionStyle,
) -> CliResult<(Analyzer, CodeAnalysisResult)> {
    let source = read_source(file_path)?;
    let template = template_path.map(read_source).transpose()?;
    let config = AnalyzerConfig::new().with_style(style);

    let mut analyzer = match Analyzer::with_config(source.as_str(), template.as_deref(), config) {
        Ok(analyzer) => analyzer,
        Err(AnalysisError::Template(e)) => {
            let template_path = template_path.unwrap_or("<template>");
            let template_source = template.as_deref().unwrap_or_default();
            return Err(CliError::failure(render(e, template_path, template_source)));
        }
        Err(e) => return Err(CliError::failure(render(e, file_path, &source))),
    };
    for diagnostic in &analyzer.program().diagnostics {
        tracing::warn!(file = file_path, offset = diagnostic.span().start, "{}", diagnostic);
    }
    let result = analyzer
        .analyze_user_code()
        .map_err(|e| CliError::failure(render(e, file_path, &source)))?;
    Ok((analyzer, result))
}

/// Locate the entry point and report it.
pub fn analyze_file(file_path: &str, options: &AnalyzeOptions) -> CliResult<ExitCode> {
    let style = options.style.unwrap_or(if options.template.is_some() {
        ExecutionStyle::Submission
    } else {
        ExecutionStyle::Execution
    });
    let (analyzer, result) = analyze(file_path, options.template.as_deref(), style)?;

    if options.json {
        let report = json!({
            "entry_point": result.entry_point.name,
            "entry_point_class": result.entry_point_class,
            "signature": result.entry_point.to_string(),
            "passed_validation": result.passed_validation,
            "synthesized": result.synthesized,
            "body": { "begin": result.body.begin, "end": result.body.end },
            "source": options.print_source.then(|| analyzer.source()),
        });
        let text = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::failure(format!("Error serializing result: {}", e)))?;
        println!("{}", text);
        return Ok(ExitCode::SUCCESS);
    }

    let origin = if result.synthesized { " (synthesized)" } else { "" };
    println!("entry point: {}.{}{}", result.entry_point_class, result.entry_point.name, origin);
    println!("signature:   {}", result.entry_point);
    println!("body:        {}..{}", result.body.begin, result.body.end);
    println!("validation:  {}", if result.passed_validation { "passed" } else { "failed" });
    if options.print_source {
        println!();
        println!("{}", analyzer.source());
    }
    Ok(ExitCode::SUCCESS)
}

/// Resolve a dotted call path from the entry point body.
pub fn resolve_path(file_path: &str, path: &str) -> CliResult<ExitCode> {
    let (analyzer, result) = analyze(file_path, None, ExecutionStyle::Execution)?;
    let segments: Vec<&str> = path.split('.').map(str::trim).filter(|s| !s.is_empty()).collect();
    match analyzer.resolve_function_call(result.entry_scope, &segments) {
        Ok(expression) => {
            println!("{}", expression);
            Ok(ExitCode::SUCCESS)
        }
        Err(reason) => Err(CliError::failure(format!("Error resolving '{}': {}", path, reason))),
    }
}

/// List variables and/or functions visible from the entry point body.
pub fn scope_file(file_path: &str, variables: bool, functions: bool, as_json: bool) -> CliResult<ExitCode> {
    let (analyzer, result) = analyze(file_path, None, ExecutionStyle::Execution)?;
    let (variables, functions) = if variables || functions {
        (variables, functions)
    } else {
        (true, true)
    };

    let visible_variables: Vec<(String, String)> = if variables {
        analyzer
            .variables_visible_from(result.entry_scope)
            .into_iter()
            .filter_map(|symbol| match &symbol.kind {
                SymbolKind::Variable(info) => Some((symbol.name.clone(), info.ty.to_string())),
                _ => None,
            })
            .collect()
    } else {
        Vec::new()
    };
    let visible_functions: Vec<(String, String)> = if functions {
        analyzer
            .functions_visible_from(result.entry_scope)
            .into_iter()
            .filter_map(|visible| {
                let decl = analyzer.program().function(visible.function)?;
                Some((visible.path, decl.to_string()))
            })
            .collect()
    } else {
        Vec::new()
    };

    if as_json {
        let report = json!({
            "variables": visible_variables
                .iter()
                .map(|(name, ty)| json!({ "name": name, "type": ty }))
                .collect::<Vec<_>>(),
            "functions": visible_functions
                .iter()
                .map(|(path, signature)| json!({ "path": path, "signature": signature }))
                .collect::<Vec<_>>(),
        });
        let text = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::failure(format!("Error serializing scope: {}", e)))?;
        println!("{}", text);
        return Ok(ExitCode::SUCCESS);
    }

    if variables {
        println!("variables:");
        for (name, ty) in &visible_variables {
            println!("  {} {}", ty, name);
        }
    }
    if functions {
        println!("functions:");
        for (path, signature) in &visible_functions {
            println!("  {:<32} {}", path, signature);
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Tokenize and display tokens.
pub fn lex_file(file_path: &str) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    for tok in &lexer::lex(&source) {
        println!("{:?}", tok);
    }
    Ok(ExitCode::SUCCESS)
}

/// Parse and display AST.
pub fn parse_file(file_path: &str) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let tokens = lexer::lex(&source);
    match parser::parse(&tokens) {
        Ok(ast) => {
            for diagnostic in &ast.diagnostics {
                eprintln!("{}", render(diagnostic.clone(), file_path, &source));
            }
            println!("{:#?}", ast);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => Err(CliError::failure(render(e, file_path, &source))),
    }
}
