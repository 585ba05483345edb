//! Operator vocabulary.
//!
//! This module defines the operator set along with binary precedence and prefix/postfix fixity. The parser's
//! precedence climber reads precedence from here rather than hard-coding it.
//!
//! ## Notes
//! - Precedence is a relative ordering where higher binds tighter; `0` is reserved for "not a binary operator".
//! - `instanceof` is a keyword, not an operator; the parser gives it [`RELATIONAL_PRECEDENCE`].
//!
//! ## Examples
//! ```rust
//! use javelin_syntax::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::from_str("+"), Some(OperatorId::Plus));
//! assert!(operators::binary_precedence(OperatorId::Star) > operators::binary_precedence(OperatorId::Plus));
//! ```

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    PlusPlus,
    MinusMinus,

    // Shifts
    Shl,
    Shr,
    UShr,

    // Comparison
    Lt,
    LtEq,
    Gt,
    GtEq,
    EqEq,
    NotEq,

    // Bitwise / logical
    Amp,
    Caret,
    Pipe,
    AmpAmp,
    PipePipe,
    Bang,
    Tilde,

    // Assignment
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    AmpEq,
    PipeEq,
    CaretEq,
    ShlEq,
    ShrEq,
    UShrEq,
}

/// Whether an operator may appear in prefix or postfix position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    /// Binary only.
    Infix,
    /// Prefix unary (`!x`, `-x`); `-` and `+` are also infix.
    Prefix,
    /// Prefix or postfix (`++`, `--`).
    Affix,
    /// Assignment operators; never part of a modelled expression.
    Assign,
}

/// Metadata for an operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spelling: &'static str,
    /// Binary precedence, `0` when the operator is not binary.
    pub precedence: u8,
    pub fixity: Fixity,
}

pub const MULTIPLICATIVE_PRECEDENCE: u8 = 10;
pub const ADDITIVE_PRECEDENCE: u8 = 9;
pub const SHIFT_PRECEDENCE: u8 = 8;
pub const RELATIONAL_PRECEDENCE: u8 = 7;
pub const EQUALITY_PRECEDENCE: u8 = 6;
pub const BIT_AND_PRECEDENCE: u8 = 5;
pub const BIT_XOR_PRECEDENCE: u8 = 4;
pub const BIT_OR_PRECEDENCE: u8 = 3;
pub const LOGICAL_AND_PRECEDENCE: u8 = 2;
pub const LOGICAL_OR_PRECEDENCE: u8 = 1;

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    op(OperatorId::Plus, "+", ADDITIVE_PRECEDENCE, Fixity::Prefix),
    op(OperatorId::Minus, "-", ADDITIVE_PRECEDENCE, Fixity::Prefix),
    op(OperatorId::Star, "*", MULTIPLICATIVE_PRECEDENCE, Fixity::Infix),
    op(OperatorId::Slash, "/", MULTIPLICATIVE_PRECEDENCE, Fixity::Infix),
    op(OperatorId::Percent, "%", MULTIPLICATIVE_PRECEDENCE, Fixity::Infix),
    op(OperatorId::PlusPlus, "++", 0, Fixity::Affix),
    op(OperatorId::MinusMinus, "--", 0, Fixity::Affix),
    op(OperatorId::Shl, "<<", SHIFT_PRECEDENCE, Fixity::Infix),
    op(OperatorId::Shr, ">>", SHIFT_PRECEDENCE, Fixity::Infix),
    op(OperatorId::UShr, ">>>", SHIFT_PRECEDENCE, Fixity::Infix),
    op(OperatorId::Lt, "<", RELATIONAL_PRECEDENCE, Fixity::Infix),
    op(OperatorId::LtEq, "<=", RELATIONAL_PRECEDENCE, Fixity::Infix),
    op(OperatorId::Gt, ">", RELATIONAL_PRECEDENCE, Fixity::Infix),
    op(OperatorId::GtEq, ">=", RELATIONAL_PRECEDENCE, Fixity::Infix),
    op(OperatorId::EqEq, "==", EQUALITY_PRECEDENCE, Fixity::Infix),
    op(OperatorId::NotEq, "!=", EQUALITY_PRECEDENCE, Fixity::Infix),
    op(OperatorId::Amp, "&", BIT_AND_PRECEDENCE, Fixity::Infix),
    op(OperatorId::Caret, "^", BIT_XOR_PRECEDENCE, Fixity::Infix),
    op(OperatorId::Pipe, "|", BIT_OR_PRECEDENCE, Fixity::Infix),
    op(OperatorId::AmpAmp, "&&", LOGICAL_AND_PRECEDENCE, Fixity::Infix),
    op(OperatorId::PipePipe, "||", LOGICAL_OR_PRECEDENCE, Fixity::Infix),
    op(OperatorId::Bang, "!", 0, Fixity::Prefix),
    op(OperatorId::Tilde, "~", 0, Fixity::Prefix),
    op(OperatorId::Eq, "=", 0, Fixity::Assign),
    op(OperatorId::PlusEq, "+=", 0, Fixity::Assign),
    op(OperatorId::MinusEq, "-=", 0, Fixity::Assign),
    op(OperatorId::StarEq, "*=", 0, Fixity::Assign),
    op(OperatorId::SlashEq, "/=", 0, Fixity::Assign),
    op(OperatorId::PercentEq, "%=", 0, Fixity::Assign),
    op(OperatorId::AmpEq, "&=", 0, Fixity::Assign),
    op(OperatorId::PipeEq, "|=", 0, Fixity::Assign),
    op(OperatorId::CaretEq, "^=", 0, Fixity::Assign),
    op(OperatorId::ShlEq, "<<=", 0, Fixity::Assign),
    op(OperatorId::ShrEq, ">>=", 0, Fixity::Assign),
    op(OperatorId::UShrEq, ">>>=", 0, Fixity::Assign),
];

/// Full metadata for `id`, if registered.
pub fn info_for(id: OperatorId) -> Option<&'static OperatorInfo> {
    OPERATORS.iter().find(|o| o.id == id)
}

/// Spelling of `id`.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).map_or("", |o| o.spelling)
}

/// Binary precedence of `id`, or `None` if it is not a binary operator.
pub fn binary_precedence(id: OperatorId) -> Option<u8> {
    info_for(id).map(|o| o.precedence).filter(|p| *p > 0)
}

/// Return `true` if `id` can start a unary expression.
pub fn is_prefix(id: OperatorId) -> bool {
    info_for(id).is_some_and(|o| matches!(o.fixity, Fixity::Prefix | Fixity::Affix))
}

/// Resolve an operator spelling to its identifier.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.spelling == spelling).map(|o| o.id)
}

// --- helpers -----------------------------------------------------------------

const fn op(id: OperatorId, spelling: &'static str, precedence: u8, fixity: Fixity) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        precedence,
        fixity,
    }
}
