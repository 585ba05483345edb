//! Lexer for the Java-like source grammar.
//!
//! Handles tokenization including:
//! - Keywords, identifiers (with `\uXXXX` escapes) and Unicode format characters inside identifiers
//! - Numeric, character and string literals
//! - Operators and punctuation (`>>>=`, `::`, `->`, `...`, etc.)
//! - Line comments and nested block comments
//!
//! The lexer never fails. Characters it does not recognise are skipped and unterminated literals or comments run to
//! the end of input. Scanning is a single forward pass, so cost is linear in the input length.
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)
//! - `strings` - String/char literal scanning
//! - `numbers` - Numeric literal scanning

mod numbers;
mod strings;
pub mod tokens;

pub use tokens::{Token, TokenKind, keyword_id};

use crate::ast::Span;
use crate::lang::operators::OperatorId;
use crate::lang::punctuation::PunctuationId;

// ============================================================================
// LEXER STATE
// ============================================================================

/// Lexer for source text.
///
/// Token spans are byte offsets into the text passed to [`Lexer::new`]; no normalisation (line endings, BOM removal)
/// is applied beforehand.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire source code.
    ///
    /// The token stream always ends with an `Eof` token.
    pub fn tokenize(mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.scan_token();
        }

        self.tokens.push(Token::new(
            TokenKind::Eof,
            Span::new(self.current_pos, self.current_pos),
        ));
        self.tokens
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.source[self.current_pos..].chars();
        iter.next(); // skip current
        iter.next()
    }

    fn rest(&self) -> &'a str {
        &self.source[self.current_pos..]
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.current_pos = pos + c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        // Skip whitespace and stray format characters
        while let Some(c) = self.peek() {
            if c.is_whitespace() || is_format_char(c) {
                self.advance();
            } else {
                break;
            }
        }

        let start = self.current_pos;

        let Some(c) = self.advance() else {
            return;
        };

        match c {
            '(' => self.add_punct(PunctuationId::LParen, start),
            ')' => self.add_punct(PunctuationId::RParen, start),
            '[' => self.add_punct(PunctuationId::LBracket, start),
            ']' => self.add_punct(PunctuationId::RBracket, start),
            '{' => self.add_punct(PunctuationId::LBrace, start),
            '}' => self.add_punct(PunctuationId::RBrace, start),
            ';' => self.add_punct(PunctuationId::Semicolon, start),
            ',' => self.add_punct(PunctuationId::Comma, start),
            '?' => self.add_punct(PunctuationId::Question, start),
            '@' => self.add_punct(PunctuationId::At, start),
            '~' => self.add_op(OperatorId::Tilde, start),
            ':' => {
                if self.match_char(':') {
                    self.add_punct(PunctuationId::ColonColon, start);
                } else {
                    self.add_punct(PunctuationId::Colon, start);
                }
            }
            '.' => {
                if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.scan_number(start, c);
                } else if self.rest().starts_with("..") {
                    self.advance();
                    self.advance();
                    self.add_punct(PunctuationId::Ellipsis, start);
                } else {
                    self.add_punct(PunctuationId::Dot, start);
                }
            }

            // Operators
            '=' => self.operator(start, OperatorId::Eq, &[('=', OperatorId::EqEq)]),
            '!' => self.operator(start, OperatorId::Bang, &[('=', OperatorId::NotEq)]),
            '*' => self.operator(start, OperatorId::Star, &[('=', OperatorId::StarEq)]),
            '%' => self.operator(start, OperatorId::Percent, &[('=', OperatorId::PercentEq)]),
            '^' => self.operator(start, OperatorId::Caret, &[('=', OperatorId::CaretEq)]),
            '+' => self.operator(
                start,
                OperatorId::Plus,
                &[('+', OperatorId::PlusPlus), ('=', OperatorId::PlusEq)],
            ),
            '&' => self.operator(
                start,
                OperatorId::Amp,
                &[('&', OperatorId::AmpAmp), ('=', OperatorId::AmpEq)],
            ),
            '|' => self.operator(
                start,
                OperatorId::Pipe,
                &[('|', OperatorId::PipePipe), ('=', OperatorId::PipeEq)],
            ),
            '-' => {
                if self.match_char('>') {
                    self.add_punct(PunctuationId::Arrow, start);
                } else {
                    self.operator(
                        start,
                        OperatorId::Minus,
                        &[('-', OperatorId::MinusMinus), ('=', OperatorId::MinusEq)],
                    );
                }
            }
            '<' => {
                if self.match_char('<') {
                    self.operator(start, OperatorId::Shl, &[('=', OperatorId::ShlEq)]);
                } else {
                    self.operator(start, OperatorId::Lt, &[('=', OperatorId::LtEq)]);
                }
            }
            '>' => self.scan_greater(start),
            '/' => self.scan_slash(start),

            // Literals
            '"' => self.scan_string(start),
            '\'' => self.scan_char(start),
            '0'..='9' => self.scan_number(start, c),

            // Identifiers and keywords
            '\\' => {
                if let Some((decoded, len)) = self.unicode_escape_at(start) {
                    self.skip_bytes(len - 1);
                    if is_ident_start(decoded) {
                        self.scan_identifier(start, decoded);
                    }
                }
            }
            _ if is_ident_start(c) => self.scan_identifier(start, c),

            // Anything else is not part of the grammar
            _ => {}
        }
    }

    // ========================================================================
    // Operator helpers
    // ========================================================================

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn add_token(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token::new(kind, Span::new(start, self.current_pos)));
    }

    fn add_op(&mut self, id: OperatorId, start: usize) {
        self.add_token(TokenKind::Operator(id), start);
    }

    fn add_punct(&mut self, id: PunctuationId, start: usize) {
        self.add_token(TokenKind::Punctuation(id), start);
    }

    /// Try to match compound operator, fallback to simple.
    fn operator(&mut self, start: usize, simple: OperatorId, compounds: &[(char, OperatorId)]) {
        for (c, id) in compounds {
            if self.match_char(*c) {
                self.add_op(*id, start);
                return;
            }
        }
        self.add_op(simple, start);
    }

    /// Scan `>`, `>=`, `>>`, `>>=`, `>>>`, `>>>=`.
    ///
    /// The parser splits `>>` and `>>>` back into single `>` when closing generic argument lists.
    fn scan_greater(&mut self, start: usize) {
        if self.match_char('>') {
            if self.match_char('>') {
                self.operator(start, OperatorId::UShr, &[('=', OperatorId::UShrEq)]);
            } else {
                self.operator(start, OperatorId::Shr, &[('=', OperatorId::ShrEq)]);
            }
        } else {
            self.operator(start, OperatorId::Gt, &[('=', OperatorId::GtEq)]);
        }
    }

    /// Scan `/`, `/=`, or skip a comment.
    fn scan_slash(&mut self, start: usize) {
        if self.match_char('/') {
            while let Some(c) = self.peek() {
                if c == '\n' {
                    break;
                }
                self.advance();
            }
        } else if self.match_char('*') {
            self.skip_block_comment();
        } else if self.match_char('=') {
            self.add_op(OperatorId::SlashEq, start);
        } else {
            self.add_op(OperatorId::Slash, start);
        }
    }

    /// Skip a block comment whose opening `/*` was consumed. Block comments nest; an unterminated comment runs to
    /// the end of input.
    fn skip_block_comment(&mut self) {
        let mut depth = 1usize;
        while let Some(c) = self.advance() {
            match c {
                '/' if self.peek() == Some('*') => {
                    self.advance();
                    depth += 1;
                }
                '*' if self.peek() == Some('/') => {
                    self.advance();
                    depth -= 1;
                    if depth == 0 {
                        return;
                    }
                }
                _ => {}
            }
        }
    }

    // ========================================================================
    // Identifier scanning
    // ========================================================================

    fn scan_identifier(&mut self, start: usize, first: char) {
        let mut name = String::new();
        name.push(first);

        loop {
            match self.peek() {
                Some(c) if is_ident_continue(c) => {
                    self.advance();
                    name.push(c);
                }
                Some('\\') => match self.unicode_escape_at(self.current_pos) {
                    Some((decoded, len)) if is_ident_continue(decoded) => {
                        self.skip_bytes(len);
                        name.push(decoded);
                    }
                    _ => break,
                },
                _ => break,
            }
        }

        // Look up identifier spelling in the reserved-word registry
        if let Some(id) = keyword_id(&name) {
            self.add_token(TokenKind::Keyword(id), start);
        } else {
            self.add_token(TokenKind::Ident(name), start);
        }
    }

    /// Decode a `\uXXXX` escape (one or more `u`) starting at byte `at`.
    ///
    /// Returns the decoded character and the escape's length in bytes.
    fn unicode_escape_at(&self, at: usize) -> Option<(char, usize)> {
        let rest = self.source.get(at..)?.strip_prefix('\\')?;
        let u_count = rest.bytes().take_while(|b| *b == b'u').count();
        if u_count == 0 {
            return None;
        }
        let hex = rest.get(u_count..u_count + 4)?;
        let code = u32::from_str_radix(hex, 16).ok()?;
        let decoded = char::from_u32(code)?;
        Some((decoded, 1 + u_count + 4))
    }

    /// Advance over `len` bytes of ASCII text.
    fn skip_bytes(&mut self, len: usize) {
        let target = self.current_pos + len;
        while self.current_pos < target && self.advance().is_some() {}
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can start an identifier.
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$' || (!c.is_ascii() && c.is_alphabetic())
}

/// Check if a character can continue an identifier.
///
/// NUL and Unicode format characters (BOM, bidi controls, zero-width joiners) are accepted so that they never split
/// or terminate a declaration name.
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$' || c == '\0' || is_format_char(c) || (!c.is_ascii() && c.is_alphanumeric())
}

/// Unicode "Cf" characters that show up in pasted source: BOM, zero-width and bidi controls.
fn is_format_char(c: char) -> bool {
    matches!(
        c,
        '\u{00AD}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{206F}'
            | '\u{FEFF}'
    )
}

/// Convenience function to lex a source string.
///
/// This is a shorthand for `Lexer::new(source).tokenize()`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::keywords::{self, KeywordId};
    use crate::lang::operators;
    use crate::lang::punctuation;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_keyword_registry_parity() {
        for k in keywords::KEYWORDS {
            let tokens = lex(k.canonical);
            assert_eq!(tokens.len(), 2, "expected token + EOF for keyword {:?}", k.id);
            assert!(tokens[0].kind.is_keyword(k.id));
        }
    }

    #[test]
    fn test_operator_registry_parity() {
        for o in operators::OPERATORS {
            let tokens = lex(o.spelling);
            assert_eq!(tokens.len(), 2, "expected token + EOF for operator {:?}", o.spelling);
            assert!(tokens[0].kind.is_operator(o.id), "{:?} lexed as {:?}", o.spelling, tokens[0].kind);
        }
    }

    #[test]
    fn test_punctuation_registry_parity() {
        for p in punctuation::PUNCTUATION {
            let tokens = lex(p.canonical);
            assert_eq!(tokens.len(), 2, "expected token + EOF for punctuation {:?}", p.canonical);
            assert!(tokens[0].kind.is_punctuation(p.id));
        }
    }

    #[test]
    fn test_class_header() {
        let tokens = kinds("public class Main {");
        assert!(matches!(tokens[0], TokenKind::Keyword(KeywordId::Public)));
        assert!(matches!(tokens[1], TokenKind::Keyword(KeywordId::Class)));
        assert!(matches!(&tokens[2], TokenKind::Ident(s) if s == "Main"));
        assert!(matches!(tokens[3], TokenKind::Punctuation(PunctuationId::LBrace)));
        assert!(matches!(tokens[4], TokenKind::Eof));
    }

    #[test]
    fn test_spans_are_byte_offsets_into_original_text() {
        let source = "\u{FEFF}int\r\n  x;";
        let tokens = lex(source);
        assert_eq!(tokens[0].span, Span::new(3, 6));
        assert_eq!(&source[tokens[1].span.start..tokens[1].span.end], "x");
        assert_eq!(tokens.last().map(|t| t.span.start), Some(source.len()));
    }

    #[test]
    fn test_shift_operators_are_maximal_munch() {
        let tokens = kinds(">>>= >> > >=");
        assert!(tokens[0].is_operator(OperatorId::UShrEq));
        assert!(tokens[1].is_operator(OperatorId::Shr));
        assert!(tokens[2].is_operator(OperatorId::Gt));
        assert!(tokens[3].is_operator(OperatorId::GtEq));
    }

    #[test]
    fn test_comments_are_discarded() {
        let tokens = kinds("a // b\n/* c /* d */ e */ f");
        assert_eq!(tokens.len(), 3);
        assert!(matches!(&tokens[1], TokenKind::Ident(s) if s == "f"));
    }

    #[test]
    fn test_unterminated_block_comment_runs_to_end() {
        let tokens = kinds("a /* /* */ b");
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_null_bytes_and_format_characters_in_identifiers() {
        let tokens = kinds("x\0\0 y\u{202E}z \u{FEFF}w");
        assert!(matches!(&tokens[0], TokenKind::Ident(s) if s == "x\0\0"));
        assert!(matches!(&tokens[1], TokenKind::Ident(s) if s == "y\u{202E}z"));
        assert!(matches!(&tokens[2], TokenKind::Ident(s) if s == "w"));
    }

    #[test]
    fn test_unicode_escape_identifier() {
        let tokens = lex(r"int \u0061\u0062\uu0063 = 1;");
        assert!(matches!(&tokens[1].kind, TokenKind::Ident(s) if s == "abc"));
        assert_eq!(tokens[1].span, Span::new(4, 23));
    }

    #[test]
    fn test_non_ascii_identifier() {
        let tokens = kinds("String café = \"x\";");
        assert!(matches!(&tokens[1], TokenKind::Ident(s) if s == "café"));
    }

    #[test]
    fn test_unknown_characters_are_skipped() {
        let tokens = kinds("a # b");
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_ellipsis_and_method_reference() {
        let tokens = kinds("String... s; Foo::bar");
        assert!(tokens[1].is_punctuation(PunctuationId::Ellipsis));
        assert!(tokens[5].is_punctuation(PunctuationId::ColonColon));
    }

    #[test]
    fn test_lexing_large_input_is_linear() {
        let source = "\"\"".repeat(50_000);
        let tokens = lex(&source);
        assert_eq!(tokens.len(), 50_001);
    }
}
