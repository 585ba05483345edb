//! CLI module for the Javelin analyzer
//!
//! This module provides the command-line interface for the analysis engine.
//!
//! ## Commands
//!
//! - `analyze <file>` - Locate (or synthesize) the entry point, optionally validating against a template
//! - `resolve <file> <path>` - Resolve a dotted call path from the entry point body
//! - `scope <file>` - List variables and functions visible from the entry point body
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use crate::config::ExecutionStyle;
use commands::AnalyzeOptions;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Code analysis for a restricted Java-like language
#[derive(Parser, Debug)]
#[command(name = "javelin")]
#[command(version = VERSION)]
#[command(about = "Entry point discovery, template validation and call resolution", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// File to analyze (default action when no subcommand given)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    // Debug/development flags
    /// Tokenize only (debug)
    #[arg(long = "lex", value_name = "FILE", conflicts_with = "file")]
    pub lex_file: Option<PathBuf>,

    /// Parse only (debug)
    #[arg(long = "parse", value_name = "FILE", conflicts_with = "file")]
    pub parse_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Locate the entry point and validate against a template
    Analyze {
        /// Submission source file
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Template the submission must match
        #[arg(short, long, value_name = "TEMPLATE")]
        template: Option<PathBuf>,
        /// `execution` skips validation, `submission` validates (default: submission when a template is given)
        #[arg(long, value_name = "STYLE")]
        style: Option<ExecutionStyle>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        /// Print the source, including a synthesized entry point
        #[arg(long)]
        print_source: bool,
    },
    /// Resolve a dotted call path (e.g. `Util.sum`) from the entry point body
    Resolve {
        /// Source file
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Dotted path to resolve
        #[arg(value_name = "PATH")]
        path: String,
    },
    /// List variables and functions visible from the entry point body
    Scope {
        /// Source file
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// List variables
        #[arg(long)]
        variables: bool,
        /// List functions
        #[arg(long)]
        functions: bool,
        /// Print the lists as JSON
        #[arg(long)]
        json: bool,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    // Handle debug flags first
    if let Some(file) = cli.lex_file {
        return commands::lex_file(&file.to_string_lossy());
    }
    if let Some(file) = cli.parse_file {
        return commands::parse_file(&file.to_string_lossy());
    }

    // Handle subcommands
    match cli.command {
        Some(Command::Analyze {
            file,
            template,
            style,
            json,
            print_source,
        }) => {
            let options = AnalyzeOptions {
                template: template.map(|p| p.to_string_lossy().to_string()),
                style,
                json,
                print_source,
            };
            commands::analyze_file(&file.to_string_lossy(), &options)
        }
        Some(Command::Resolve { file, path }) => commands::resolve_path(&file.to_string_lossy(), &path),
        Some(Command::Scope {
            file,
            variables,
            functions,
            json,
        }) => commands::scope_file(&file.to_string_lossy(), variables, functions, json),
        None => {
            // Default: analyze the file if provided
            if let Some(file) = cli.file {
                commands::analyze_file(&file.to_string_lossy(), &AnalyzeOptions::default())
            } else {
                // No command and no file - show help
                Err(CliError::new("", ExitCode::FAILURE))
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
