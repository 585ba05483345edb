#![forbid(unsafe_code)]
//! Javelin: a code analysis engine for a restricted Java-like language.
//!
//! Submitted code is analyzed structurally before it is ever compiled or run: where the entry point is, whether the
//! code has the declarations its template requires, and which expression calls a given method. The syntax frontend
//! lives in [`javelin_syntax`]; this crate adds the [`analyzer`], its [`config`], and the `javelin` CLI.
//!
//! ## Panic Policy
//!
//! Input is untrusted text from anonymous users, so this codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`. Resource exhaustion in the parser is a
//!   [`ParseError::LimitExceeded`](diagnostics::ParseError::LimitExceeded), never a stack overflow.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod analyzer;
pub mod cli;
pub mod config;

pub use javelin_syntax::ast;
pub use javelin_syntax::diagnostics;
pub use javelin_syntax::lexer;
pub use javelin_syntax::limits;
pub use javelin_syntax::parser;
pub use javelin_syntax::symbols;

pub use analyzer::{AnalysisError, Analyzer, BodyOffsets, CodeAnalysisResult, ResolveError, VisibleFunction};
pub use config::{AnalyzerConfig, ExecutionStyle};
