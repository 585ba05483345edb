#![forbid(unsafe_code)]
//! Syntax frontend for the Javelin analysis engine: lexer, parser, AST, scopes, diagnostics.
//!
//! The accepted language is a restricted Java-like grammar. Class and member declarations are modelled in detail;
//! method bodies are parsed shallowly (nested blocks and local declarations only) and anything outside the modelled
//! grammar is skipped structurally.
//!
//! ## Notes
//! - This crate is "syntax-only": it does not do entry point discovery, template matching or call resolution. Those
//!   live in the `javelin` crate.
//! - Input is untrusted. Every recursive rule is depth-guarded and every unbounded loop is capped by a
//!   [`limits::ParseLimits`] ceiling; exceeding one yields [`diagnostics::ParseError::LimitExceeded`].
//!
//! ## Examples
//! ```rust
//! use javelin_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("public class Main { int x = 1; }");
//! let program = parser::parse(&tokens).unwrap();
//! assert_eq!(program.classes.len(), 1);
//! ```

pub mod ast;
pub mod diagnostics;
pub mod lang;
pub mod lexer;
pub mod limits;
pub mod parser;
pub mod symbols;
pub mod token_helpers;
