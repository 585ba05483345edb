/// Token-stream helpers, guards and error recovery.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek`, `advance`), including splitting `>>`/`>>>` when closing generics
/// - Matching / expecting keywords, operators, and punctuation
/// - Checkpoints for speculative parsing
/// - The depth guard and the operation counter
/// - Error recovery (`recover`, `skip_balanced_braces`)
static EOF_TOKEN: Token = Token {
    kind: TokenKind::Eof,
    span: Span { start: 0, end: 0 },
};

static SPLIT_GT_TOKEN: Token = Token {
    kind: TokenKind::Operator(OperatorId::Gt),
    span: Span { start: 0, end: 0 },
};

impl<'a> Parser<'a> {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Return `true` if the current token is [`TokenKind::Eof`] or the stream is exhausted.
    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    /// Return the current token without consuming it.
    ///
    /// While a `>>`/`>>>` token is being split, the current token is a single `>`.
    fn peek(&self) -> &Token {
        if self.pending_gt > 0 {
            return &SPLIT_GT_TOKEN;
        }
        self.raw_token(self.pos)
    }

    /// Return the token `offset` positions ahead without consuming anything.
    fn peek_at(&self, offset: usize) -> &Token {
        if offset == 0 {
            return self.peek();
        }
        self.raw_token(self.pos + offset)
    }

    fn raw_token(&self, index: usize) -> &Token {
        self.tokens
            .get(index)
            .or_else(|| self.tokens.last())
            .unwrap_or(&EOF_TOKEN)
    }

    /// Advance to the next token and return the token we just consumed.
    fn advance(&mut self) -> &Token {
        let index = self.pos;
        if self.pending_gt > 0 {
            self.pending_gt -= 1;
            if self.pending_gt == 0 {
                self.pos += 1;
            }
            return &SPLIT_GT_TOKEN;
        }
        if !self.is_at_end() {
            self.pos += 1;
        }
        self.raw_token(index)
    }

    /// Return `true` if the current token is the given keyword.
    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek().kind.is_keyword(id)
    }

    /// Return `true` if the current token is the given punctuation.
    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek().kind.is_punctuation(id)
    }

    /// Return `true` if the current token is the given operator.
    fn check_op(&self, id: OperatorId) -> bool {
        self.peek().kind.is_operator(id)
    }

    fn check_ident(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Ident(_))
    }

    fn match_keyword(&mut self, id: KeywordId) -> bool {
        if self.check_keyword(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_op(&mut self, id: OperatorId) -> bool {
        if self.check_op(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, id: KeywordId, msg: &str) -> PResult<&Token> {
        if self.check_keyword(id) {
            Ok(self.advance())
        } else {
            Err(self.error_here(msg))
        }
    }

    fn expect_punct(&mut self, id: PunctuationId, msg: &str) -> PResult<&Token> {
        if self.check_punct(id) {
            Ok(self.advance())
        } else {
            Err(self.error_here(msg))
        }
    }

    fn expect_op(&mut self, id: OperatorId, msg: &str) -> PResult<&Token> {
        if self.check_op(id) {
            Ok(self.advance())
        } else {
            Err(self.error_here(msg))
        }
    }

    /// Consume an identifier and return its name and span.
    fn expect_ident(&mut self, msg: &str) -> PResult<(Ident, Span)> {
        match &self.peek().kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                let span = self.advance().span;
                Ok((name, span))
            }
            _ => Err(self.error_here(msg)),
        }
    }

    /// Consume one closing chevron, splitting `>>` and `>>>` tokens as needed.
    fn eat_close_chevron(&mut self) -> bool {
        if self.pending_gt > 0 {
            self.advance();
            return true;
        }
        match self.peek().operator_id() {
            Some(OperatorId::Gt) => {
                self.advance();
                true
            }
            Some(OperatorId::Shr) => {
                self.pending_gt = 1;
                true
            }
            Some(OperatorId::UShr) => {
                self.pending_gt = 2;
                true
            }
            _ => false,
        }
    }

    fn current_span(&self) -> Span {
        if self.pending_gt > 0 {
            return self.raw_token(self.pos).span;
        }
        self.peek().span
    }

    /// End offset of the most recently consumed token.
    fn previous_end(&self) -> usize {
        match self.pos.checked_sub(1) {
            Some(index) => self.raw_token(index).span.end,
            None => 0,
        }
    }

    fn error_here(&self, msg: &str) -> ParseError {
        ParseError::syntax(format!("{}, found {:?}", msg, self.peek().kind), self.current_span())
    }

    fn limit_error(&self, limit: Limit, max: usize) -> ParseError {
        ParseError::limit(limit, max, self.current_span())
    }

    // ========================================================================
    // Speculation
    // ========================================================================

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            pending_gt: self.pending_gt,
        }
    }

    fn rollback(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.pos;
        self.pending_gt = checkpoint.pending_gt;
    }

    // ========================================================================
    // Guards
    // ========================================================================

    /// Run a recursive rule one nesting level deeper.
    ///
    /// The depth is restored on every exit path, so a failed rule leaves the counter where it found it.
    fn guarded<T>(&mut self, rule: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        if self.depth >= self.limits.max_depth {
            return Err(self.limit_error(Limit::Depth, self.limits.max_depth));
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    /// Count one unit of parse work against the operation ceiling.
    fn tick(&mut self) -> PResult<()> {
        self.operations += 1;
        if self.operations > self.limits.max_parse_operations {
            return Err(self.limit_error(Limit::ParseOperations, self.limits.max_parse_operations));
        }
        Ok(())
    }

    // ========================================================================
    // Recovery
    // ========================================================================

    /// Record a syntax error and continue, or propagate a limit failure.
    fn recover(&mut self, err: ParseError) -> PResult<()> {
        if err.is_limit() {
            return Err(err);
        }
        tracing::debug!(error = %err, "recovering from syntax error");
        self.errors.push(err);
        Ok(())
    }

    /// Consume a `{ ... }` group with all nested braces. Stops quietly at end of input.
    fn skip_balanced_braces(&mut self) {
        let mut depth = 0usize;
        while !self.is_at_end() {
            match self.advance().punctuation_id() {
                Some(PunctuationId::LBrace) => depth += 1,
                Some(PunctuationId::RBrace) => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return;
                    }
                }
                _ => {}
            }
        }
    }

    /// Consume tokens up to and including the next `;`, stopping early at a brace.
    fn skip_past_semicolon(&mut self) {
        while !self.is_at_end() && !self.check_punct(PunctuationId::LBrace) && !self.check_punct(PunctuationId::RBrace) {
            if self.advance().kind.is_punctuation(PunctuationId::Semicolon) {
                return;
            }
        }
    }

    fn define_variable(&mut self, name: Ident, ty: Type, modifiers: Vec<Modifier>, span: Span) {
        self.symbols.define(Symbol {
            name,
            kind: SymbolKind::Variable(VariableInfo { ty, modifiers }),
            span,
            scope: self.symbols.current_scope(),
        });
    }
}
