//! Reserved keyword vocabulary.
//!
//! This module is the single source of truth for reserved words: a stable identifier ([`KeywordId`]) plus a const
//! metadata table ([`KEYWORDS`]) recording canonical spellings and categories.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - `switch` and `record` are contextual and deliberately absent; the parser recognises them as identifiers.
//!
//! ## Examples
//! ```rust
//! use javelin_syntax::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("static"), Some(KeywordId::Static));
//! assert_eq!(keywords::as_str(KeywordId::Static), "static");
//! ```

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Access
    Public,
    Protected,
    Private,

    // Primitive types
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
    Boolean,
    String,
    Var,
    Void,

    // Modifiers
    Static,
    Final,
    Abstract,
    Strictfp,
    Default,
    Transient,
    Synchronized,
    Volatile,
    Native,

    // Declarations
    Class,
    Interface,
    Enum,
    Extends,
    Implements,
    Import,
    Package,
    Throws,

    // Statements / expressions
    Return,
    Throw,
    Try,
    Catch,
    Finally,
    New,
    This,
    Super,
    Instanceof,
    Assert,

    // Literals
    True,
    False,
    Null,
}

/// High-level grouping, used by the parser to classify a keyword without enumerating it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    Access,
    PrimitiveType,
    Modifier,
    Declaration,
    Statement,
    Literal,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
}

/// Registry of all keywords.
///
/// ## Notes
/// - The ordering is not semantically meaningful, but is grouped for readability.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Access
    info(KeywordId::Public, "public", KeywordCategory::Access),
    info(KeywordId::Protected, "protected", KeywordCategory::Access),
    info(KeywordId::Private, "private", KeywordCategory::Access),
    // Primitive types
    info(KeywordId::Byte, "byte", KeywordCategory::PrimitiveType),
    info(KeywordId::Short, "short", KeywordCategory::PrimitiveType),
    info(KeywordId::Int, "int", KeywordCategory::PrimitiveType),
    info(KeywordId::Long, "long", KeywordCategory::PrimitiveType),
    info(KeywordId::Float, "float", KeywordCategory::PrimitiveType),
    info(KeywordId::Double, "double", KeywordCategory::PrimitiveType),
    info(KeywordId::Char, "char", KeywordCategory::PrimitiveType),
    info(KeywordId::Boolean, "boolean", KeywordCategory::PrimitiveType),
    info(KeywordId::String, "String", KeywordCategory::PrimitiveType),
    info(KeywordId::Var, "var", KeywordCategory::PrimitiveType),
    info(KeywordId::Void, "void", KeywordCategory::PrimitiveType),
    // Modifiers
    info(KeywordId::Static, "static", KeywordCategory::Modifier),
    info(KeywordId::Final, "final", KeywordCategory::Modifier),
    info(KeywordId::Abstract, "abstract", KeywordCategory::Modifier),
    info(KeywordId::Strictfp, "strictfp", KeywordCategory::Modifier),
    info(KeywordId::Default, "default", KeywordCategory::Modifier),
    info(KeywordId::Transient, "transient", KeywordCategory::Modifier),
    info(KeywordId::Synchronized, "synchronized", KeywordCategory::Modifier),
    info(KeywordId::Volatile, "volatile", KeywordCategory::Modifier),
    info(KeywordId::Native, "native", KeywordCategory::Modifier),
    // Declarations
    info(KeywordId::Class, "class", KeywordCategory::Declaration),
    info(KeywordId::Interface, "interface", KeywordCategory::Declaration),
    info(KeywordId::Enum, "enum", KeywordCategory::Declaration),
    info(KeywordId::Extends, "extends", KeywordCategory::Declaration),
    info(KeywordId::Implements, "implements", KeywordCategory::Declaration),
    info(KeywordId::Import, "import", KeywordCategory::Declaration),
    info(KeywordId::Package, "package", KeywordCategory::Declaration),
    info(KeywordId::Throws, "throws", KeywordCategory::Declaration),
    // Statements / expressions
    info(KeywordId::Return, "return", KeywordCategory::Statement),
    info(KeywordId::Throw, "throw", KeywordCategory::Statement),
    info(KeywordId::Try, "try", KeywordCategory::Statement),
    info(KeywordId::Catch, "catch", KeywordCategory::Statement),
    info(KeywordId::Finally, "finally", KeywordCategory::Statement),
    info(KeywordId::New, "new", KeywordCategory::Statement),
    info(KeywordId::This, "this", KeywordCategory::Statement),
    info(KeywordId::Super, "super", KeywordCategory::Statement),
    info(KeywordId::Instanceof, "instanceof", KeywordCategory::Statement),
    info(KeywordId::Assert, "assert", KeywordCategory::Statement),
    // Literals
    info(KeywordId::True, "true", KeywordCategory::Literal),
    info(KeywordId::False, "false", KeywordCategory::Literal),
    info(KeywordId::Null, "null", KeywordCategory::Literal),
];

/// Full metadata for `id`, if registered.
pub fn info_for(id: KeywordId) -> Option<&'static KeywordInfo> {
    KEYWORDS.iter().find(|k| k.id == id)
}

/// Canonical spelling.
///
/// ## Returns
/// - The canonical spelling for `id`, or `""` if the registry lacks an entry (covered by tests).
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).map_or("", |k| k.canonical)
}

/// Category of `id`.
pub fn category(id: KeywordId) -> Option<KeywordCategory> {
    info_for(id).map(|k| k.category)
}

/// Lookup by spelling.
///
/// ## Returns
/// - `Some(KeywordId)` if the spelling is reserved.
/// - `None` otherwise.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

// --- helpers -----------------------------------------------------------------

const fn info(id: KeywordId, canonical: &'static str, category: KeywordCategory) -> KeywordInfo {
    KeywordInfo { id, canonical, category }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_round_trips_every_spelling() {
        for k in KEYWORDS {
            assert_eq!(from_str(k.canonical), Some(k.id), "spelling {:?}", k.canonical);
            assert_eq!(as_str(k.id), k.canonical);
        }
    }

    #[test]
    fn test_contextual_words_are_not_reserved() {
        assert_eq!(from_str("switch"), None);
        assert_eq!(from_str("record"), None);
        assert_eq!(from_str("Static"), None);
    }

    #[test]
    fn test_categories() {
        assert_eq!(category(KeywordId::Public), Some(KeywordCategory::Access));
        assert_eq!(category(KeywordId::String), Some(KeywordCategory::PrimitiveType));
        assert_eq!(category(KeywordId::Native), Some(KeywordCategory::Modifier));
    }
}
