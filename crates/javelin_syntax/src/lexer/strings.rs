//! String and character literal scanning.
//!
//! A literal ends at the first unescaped closing quote. An unterminated literal runs to the end of input rather than
//! producing an error; the parser sees it as a single literal token followed by `Eof`.

use super::{Lexer, TokenKind};

impl<'a> Lexer<'a> {
    pub(super) fn scan_string(&mut self, start: usize) {
        let value = self.scan_quoted('"');
        self.add_token(TokenKind::String(value), start);
    }

    pub(super) fn scan_char(&mut self, start: usize) {
        let value = self.scan_quoted('\'');
        self.add_token(TokenKind::Char(value), start);
    }

    /// Consume literal contents up to and including the closing `quote`, decoding escapes.
    fn scan_quoted(&mut self, quote: char) -> String {
        let mut value = String::new();
        while let Some(c) = self.advance() {
            match c {
                _ if c == quote => break,
                '\\' => {
                    if let Some(decoded) = self.scan_escape() {
                        value.push(decoded);
                    }
                }
                _ => value.push(c),
            }
        }
        value
    }

    /// Decode the escape after a consumed backslash.
    fn scan_escape(&mut self) -> Option<char> {
        if self.peek() == Some('u') {
            let escape_start = self.current_pos - 1;
            if let Some((decoded, len)) = self.unicode_escape_at(escape_start) {
                self.skip_bytes(len - 1);
                return Some(decoded);
            }
        }
        let c = self.advance()?;
        Some(match c {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'b' => '\u{0008}',
            'f' => '\u{000C}',
            's' => ' ',
            '0'..='7' => {
                // Octal escape: up to three digits, value at most 0o377
                let mut code = c.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match self.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) if code * 8 + d <= 0o377 => {
                            self.advance();
                            code = code * 8 + d;
                        }
                        _ => break,
                    }
                }
                char::from_u32(code).unwrap_or('\0')
            }
            other => other,
        })
    }
}
