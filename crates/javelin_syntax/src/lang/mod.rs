//! Registry-backed language vocabulary.
//!
//! Each module exposes a stable id enum plus a const metadata table. The lexer and parser only ever compare ids, never
//! spellings.

pub mod keywords;
pub mod operators;
pub mod punctuation;
