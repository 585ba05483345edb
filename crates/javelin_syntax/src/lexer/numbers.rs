//! Numeric literal scanning.
//!
//! Integer values use wrapping arithmetic: an out-of-range literal still produces a token, it just does not carry a
//! meaningful value. Nothing downstream evaluates literals.

use super::{Lexer, TokenKind};

impl<'a> Lexer<'a> {
    /// Scan a numeric literal whose first character (`first`, a digit or `.`) was consumed.
    pub(super) fn scan_number(&mut self, start: usize, first: char) {
        if first == '0' {
            match self.peek() {
                Some('x' | 'X') => {
                    self.advance();
                    self.scan_radix_integer(start, 16);
                    return;
                }
                Some('b' | 'B') => {
                    self.advance();
                    self.scan_radix_integer(start, 2);
                    return;
                }
                _ => {}
            }
        }

        let mut is_float = first == '.';
        self.consume_digits();

        if !is_float && self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            self.consume_digits();
            is_float = true;
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            let next = self.peek_next();
            let has_exponent = match next {
                Some(c) if c.is_ascii_digit() => true,
                Some('+' | '-') => self.rest().as_bytes().get(2).is_some_and(u8::is_ascii_digit),
                _ => false,
            };
            if has_exponent {
                self.advance();
                if matches!(self.peek(), Some('+' | '-')) {
                    self.advance();
                }
                self.consume_digits();
                is_float = true;
            }
        }

        let text: String = self.source[start..self.current_pos].chars().filter(|c| *c != '_').collect();

        match self.peek() {
            Some('f' | 'F') => {
                self.advance();
                let value = text.parse::<f64>().unwrap_or_default();
                self.add_token(TokenKind::Float(value), start);
            }
            Some('d' | 'D') => {
                self.advance();
                let value = text.parse::<f64>().unwrap_or_default();
                self.add_token(TokenKind::Double(value), start);
            }
            _ if is_float => {
                let value = text.parse::<f64>().unwrap_or_default();
                self.add_token(TokenKind::Double(value), start);
            }
            suffix => {
                // A leading zero means octal
                let radix = if text.len() > 1 && text.starts_with('0') { 8 } else { 10 };
                let value = wrapping_value(&text, radix);
                if matches!(suffix, Some('l' | 'L')) {
                    self.advance();
                    self.add_token(TokenKind::Long(value), start);
                } else {
                    self.add_token(TokenKind::Int(value), start);
                }
            }
        }
    }

    /// Scan the digits of a `0x`/`0b` literal after its prefix.
    fn scan_radix_integer(&mut self, start: usize, radix: u32) {
        let digits_start = self.current_pos;
        while let Some(c) = self.peek() {
            if c.is_digit(radix) || c == '_' {
                self.advance();
            } else {
                break;
            }
        }
        let value = wrapping_value(&self.source[digits_start..self.current_pos], radix);
        if matches!(self.peek(), Some('l' | 'L')) {
            self.advance();
            self.add_token(TokenKind::Long(value), start);
        } else {
            self.add_token(TokenKind::Int(value), start);
        }
    }

    fn consume_digits(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }
    }
}

/// Accumulate digits with wrapping arithmetic, ignoring separators and digits invalid for `radix`.
fn wrapping_value(digits: &str, radix: u32) -> i64 {
    digits
        .chars()
        .filter_map(|c| c.to_digit(radix))
        .fold(0i64, |acc, d| acc.wrapping_mul(i64::from(radix)).wrapping_add(i64::from(d)))
}

#[cfg(test)]
mod tests {
    use crate::lexer::{TokenKind, lex};

    fn first(source: &str) -> TokenKind {
        lex(source).remove(0).kind
    }

    #[test]
    fn test_decimal_and_separators() {
        assert_eq!(first("42"), TokenKind::Int(42));
        assert_eq!(first("1_000_000"), TokenKind::Int(1_000_000));
        assert_eq!(first("7L"), TokenKind::Long(7));
    }

    #[test]
    fn test_radix_literals() {
        assert_eq!(first("0xFF"), TokenKind::Int(255));
        assert_eq!(first("0b101"), TokenKind::Int(5));
        assert_eq!(first("017"), TokenKind::Int(15));
    }

    #[test]
    #[allow(clippy::approx_constant)]
    fn test_floating_point() {
        assert!(matches!(first("3.14"), TokenKind::Double(v) if (v - 3.14).abs() < 1e-9));
        assert!(matches!(first("2.5f"), TokenKind::Float(v) if (v - 2.5).abs() < 1e-9));
        assert!(matches!(first("1e10"), TokenKind::Double(_)));
        assert!(matches!(first(".5"), TokenKind::Double(v) if (v - 0.5).abs() < 1e-9));
    }

    #[test]
    fn test_overflow_wraps_instead_of_failing() {
        let tokens = lex("99999999999999999999999999");
        assert_eq!(tokens.len(), 2);
        assert!(matches!(tokens[0].kind, TokenKind::Int(_)));
    }

    #[test]
    fn test_member_access_on_integer_is_not_a_fraction() {
        let tokens = lex("1.foo");
        assert_eq!(tokens[0].kind, TokenKind::Int(1));
        assert!(matches!(&tokens[2].kind, TokenKind::Ident(s) if s == "foo"));
    }
}
