/// Parse a token stream into a [`Program`] with the default [`ParseLimits`].
///
/// This is the main public entrypoint for parsing.
///
/// ## Parameters
/// - `tokens`: Token stream produced by `javelin_syntax::lexer`.
///
/// ## Errors
/// Returns [`ParseError::LimitExceeded`] if a resource ceiling is hit. Recoverable syntax errors are collected in
/// [`Program::diagnostics`] instead.
pub fn parse(tokens: &[Token]) -> Result<Program, ParseError> {
    parse_with_limits(tokens, ParseLimits::default())
}

/// Parse a token stream with explicit resource ceilings.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse_with_limits(tokens: &[Token], limits: ParseLimits) -> Result<Program, ParseError> {
    Parser::with_limits(tokens, limits).parse()
}

/// Parse a single expression (optionally followed by `;`).
///
/// ## Errors
/// Returns a syntax error if the tokens are not exactly one expression, or a limit error if a ceiling is hit.
pub fn parse_expression(tokens: &[Token], limits: ParseLimits) -> Result<Expr, ParseError> {
    Parser::with_limits(tokens, limits).parse_expression()
}
