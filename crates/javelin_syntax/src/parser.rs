//! Recursive-descent parser for the Java-like source grammar.
//!
//! Converts a token stream into a [`Program`]: class and member declarations in detail, method bodies as a tree of
//! statement scopes with local variable declarations, and everything else (lambdas, calls, `new`, `switch`,
//! ternaries) skipped structurally.
//!
//! Every recursive rule runs through a depth guard and every unbounded loop is capped by a [`ParseLimits`] ceiling.
//! Hitting either yields [`ParseError::LimitExceeded`], which aborts the parse. Ordinary syntax errors are recovered
//! from at member and statement boundaries.
//!
//! ## Examples
//!
//! ```rust
//! use javelin_syntax::{lexer, parser};
//!
//! let source = "public class Main { public static void main(String[] args) { int x = 1; } }";
//! let tokens = lexer::lex(source);
//! let program = parser::parse(&tokens).unwrap();
//! assert_eq!(program.classes[0].name, "Main");
//! ```

use crate::ast::*;
use crate::diagnostics::{Limit, ParseError};
use crate::lang::keywords::{self, KeywordCategory, KeywordId};
use crate::lang::operators::{self, OperatorId};
use crate::lang::punctuation::PunctuationId;
use crate::lexer::{Token, TokenKind};
use crate::limits::ParseLimits;
use crate::symbols::{Namespace, ScopeId, ScopeKind, Symbol, SymbolKind, SymbolTable, TypeTarget, VariableInfo};

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/decl.rs");
include!("parser/types.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/annotations.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
