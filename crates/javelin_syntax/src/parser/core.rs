/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type and its top-level `parse()` entrypoint.
/// It also contains a few small internal helper types shared across the other
/// parser chunks.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single “god file”.
type PResult<T> = Result<T, ParseError>;

/// Saved cursor for speculative parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Checkpoint {
    pos: usize,
    pending_gt: usize,
}

/// Access modifier, annotations and modifiers preceding a declaration.
#[derive(Debug, Default)]
struct DeclPrefix {
    access: Option<AccessModifier>,
    annotations: Vec<Annotation>,
    modifiers: Vec<Modifier>,
    start: usize,
}

impl DeclPrefix {
    fn access(&self) -> AccessModifier {
        self.access.unwrap_or_default()
    }
}

/// What a class member turned out to be after lookahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MemberShape {
    Function,
    Variable,
    NestedType,
    SkippedType,
    InitializerBlock,
}

/// Parser state.
///
/// ## Notes
/// - One `Parser` is created per parse call. The depth, chain and operation counters live here, so concurrent parses share
///   nothing.
/// - Classes are allocated in `classes` as soon as their header is parsed so nested declarations can refer to their
///   owner by id.
/// - Most parsing helpers are implemented on `Parser` but split across multiple files.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    /// Chevrons still unconsumed in the current `>>`/`>>>` token while closing generic lists.
    pending_gt: usize,
    depth: usize,
    /// Operator nodes on the path from the outermost expression being parsed to the cursor
    chain: usize,
    operations: usize,
    limits: ParseLimits,
    classes: Vec<ClassDecl>,
    symbols: SymbolTable,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by `javelin_syntax::lexer`.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self::with_limits(tokens, ParseLimits::default())
    }

    /// Create a parser with explicit resource ceilings.
    pub fn with_limits(tokens: &'a [Token], limits: ParseLimits) -> Self {
        Self {
            tokens,
            pos: 0,
            pending_gt: 0,
            depth: 0,
            chain: 0,
            operations: 0,
            limits,
            classes: Vec::new(),
            symbols: SymbolTable::new(),
            errors: Vec::new(),
        }
    }

    /// Parse the entire token stream into a [`Program`].
    ///
    /// ## Errors
    /// Returns [`ParseError::LimitExceeded`] if a resource ceiling is hit. Syntax errors are recovered from and
    /// reported in [`Program::diagnostics`].
    pub fn parse(mut self) -> Result<Program, ParseError> {
        match self.compilation_unit() {
            Ok(unit) => Ok(Program {
                units: vec![unit],
                classes: self.classes,
                symbols: self.symbols,
                diagnostics: self.errors,
            }),
            Err(e) => {
                tracing::warn!(error = %e, position = self.pos, "parse aborted");
                Err(e)
            }
        }
    }

    /// Parse a single expression.
    pub fn parse_expression(mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_expr()?;
        self.match_punct(PunctuationId::Semicolon);
        if !self.is_at_end() {
            return Err(self.error_here("unexpected tokens after expression"));
        }
        Ok(expr)
    }
}
