//! The artifact of a full analysis pass.

use javelin_syntax::ast::FunctionDecl;
use javelin_syntax::symbols::ScopeId;

/// Entry point of a submission plus what callers need to splice code into it.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeAnalysisResult {
    /// The `main` method, either declared by the submission or synthesized into it
    pub entry_point: FunctionDecl,
    /// Name of the class hosting `main`
    pub entry_point_class: String,
    /// Template validation outcome; always `true` when no validation was requested
    pub passed_validation: bool,
    /// Byte offsets of the braces around the `main` body
    pub body: BodyOffsets,
    /// Scope of the `main` body, for resolution and enumeration
    pub entry_scope: ScopeId,
    /// Whether `main` was inserted by the analyzer
    pub synthesized: bool,
}

/// Offsets of the `{` and `}` delimiting a method body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyOffsets {
    pub begin: usize,
    pub end: usize,
}

impl BodyOffsets {
    pub fn new(begin: usize, end: usize) -> Self {
        Self { begin, end }
    }

    /// Insert `text` right after the opening brace and widen the body to cover it.
    ///
    /// Returns `false` (leaving `source` untouched) when the offsets do not fall on character boundaries of `source`.
    pub fn insert_at_start(&mut self, source: &mut String, text: &str) -> bool {
        let at = self.begin + 1;
        if !self.fits(source, at) {
            return false;
        }
        source.insert_str(at, text);
        self.end += text.len();
        true
    }

    /// Insert `text` right before the closing brace and widen the body to cover it.
    pub fn insert_at_end(&mut self, source: &mut String, text: &str) -> bool {
        let at = self.end;
        if !self.fits(source, at) {
            return false;
        }
        source.insert_str(at, text);
        self.end += text.len();
        true
    }

    /// Text strictly between the braces.
    pub fn inner<'s>(&self, source: &'s str) -> Option<&'s str> {
        source.get(self.begin + 1..self.end)
    }

    fn fits(&self, source: &str, at: usize) -> bool {
        self.begin < self.end && self.end < source.len() && source.is_char_boundary(at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_at_start_and_end() {
        let mut source = String::from("void f(){x();}");
        let mut body = BodyOffsets::new(8, 13);
        assert!(body.insert_at_start(&mut source, "a();"));
        assert_eq!(source, "void f(){a();x();}");
        assert_eq!(body, BodyOffsets::new(8, 17));
        assert!(body.insert_at_end(&mut source, "b();"));
        assert_eq!(source, "void f(){a();x();b();}");
        assert_eq!(body.inner(&source), Some("a();x();b();"));
        assert_eq!(&source[body.end..=body.end], "}");
    }

    #[test]
    fn test_empty_body_insertion() {
        let mut source = String::from("{}");
        let mut body = BodyOffsets::new(0, 1);
        assert!(body.insert_at_end(&mut source, "go();"));
        assert_eq!(source, "{go();}");
        assert_eq!(body.end, 6);
    }

    #[test]
    fn test_out_of_range_offsets_are_rejected() {
        let mut source = String::from("{}");
        let mut body = BodyOffsets::new(0, 9);
        assert!(!body.insert_at_start(&mut source, "x"));
        assert_eq!(source, "{}");
    }
}
