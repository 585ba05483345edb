/// Expression parsing.
///
/// Binary operators are parsed by precedence climbing over the operator registry. Only the arithmetic core is
/// modelled (literals, names, array indexing, casts, unary and binary operators, `instanceof`); calls, member access,
/// lambdas, method references, `new`, `switch` and ternaries are swallowed into a [`Term::Swallowed`] span.
impl<'a> Parser<'a> {
    // ========================================================================
    // Binary operators
    // ========================================================================

    /// Parse a complete expression.
    fn parse_expr(&mut self) -> PResult<Expr> {
        self.expression(0)
    }

    /// Precedence climbing: parse operators binding at least as tightly as `min_precedence`.
    fn expression(&mut self, min_precedence: u8) -> PResult<Expr> {
        self.guarded(|p| {
            let chain = p.chain;
            let result = p.climb(min_precedence);
            p.chain = chain;
            result
        })
    }

    /// Operator loop of [`Self::expression`]. Every fold nests the tree one level deeper on the left, so it is counted
    /// against the chain ceiling before its right operand is parsed.
    fn climb(&mut self, min_precedence: u8) -> PResult<Expr> {
        let start = self.current_span().start;
        let mut lhs = self.unary()?;
        loop {
            if self.check_punct(PunctuationId::Question) || self.at_assignment() {
                let span = self.swallow_until_expression_end(start)?;
                return Ok(Expr::Term(Term::Swallowed(span)));
            }
            if self.check_keyword(KeywordId::Instanceof) {
                if operators::RELATIONAL_PRECEDENCE < min_precedence {
                    break;
                }
                self.extend_chain()?;
                self.advance();
                self.match_keyword(KeywordId::Final);
                let ty = self.parse_type()?;
                // Pattern binding: `o instanceof String s`
                if self.check_ident() {
                    self.advance();
                }
                lhs = Expr::InstanceOf {
                    expr: Box::new(lhs),
                    ty,
                };
                continue;
            }
            let Some(op) = self.peek().operator_id() else {
                break;
            };
            let Some(precedence) = operators::binary_precedence(op) else {
                break;
            };
            if precedence < min_precedence {
                break;
            }
            self.extend_chain()?;
            self.advance();
            let rhs = self.expression(precedence + 1)?;
            lhs = Expr::Binary {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn extend_chain(&mut self) -> PResult<()> {
        if self.chain >= self.limits.max_operator_chain {
            return Err(self.limit_error(Limit::OperatorChain, self.limits.max_operator_chain));
        }
        self.chain += 1;
        Ok(())
    }

    fn at_assignment(&self) -> bool {
        self.peek()
            .operator_id()
            .and_then(operators::info_for)
            .is_some_and(|info| info.fixity == operators::Fixity::Assign)
    }

    // ========================================================================
    // Unary operators
    // ========================================================================

    fn unary(&mut self) -> PResult<Expr> {
        self.tick()?;
        match self.peek().operator_id() {
            Some(OperatorId::Plus) => {
                self.advance();
                self.guarded(|p| p.unary())
            }
            Some(op) if operators::is_prefix(op) => {
                self.advance();
                let operand = self.guarded(|p| p.unary())?;
                Ok(Expr::Unary {
                    op,
                    operand: Box::new(operand),
                })
            }
            _ => self.term(),
        }
    }

    // ========================================================================
    // Terms
    // ========================================================================

    fn term(&mut self) -> PResult<Expr> {
        let start = self.current_span().start;
        if self.peek().kind.is_literal() {
            return self.literal(start);
        }
        match &self.peek().kind {
            TokenKind::Punctuation(PunctuationId::LParen) => self.paren_or_cast(start),
            TokenKind::Ident(name) if name == "switch" => self.swallowed(start),
            TokenKind::Ident(_) | TokenKind::Keyword(KeywordId::This | KeywordId::Super | KeywordId::String) => {
                self.name_term(start)
            }
            _ => self.swallowed(start),
        }
    }

    fn literal(&mut self, start: usize) -> PResult<Expr> {
        let token = self.advance().clone();
        let literal = match token.kind {
            TokenKind::Int(v) => Literal::Int(v),
            TokenKind::Long(v) => Literal::Long(v),
            TokenKind::Float(v) => Literal::Float(v),
            TokenKind::Double(v) => Literal::Double(v),
            TokenKind::Char(s) => Literal::Char(s),
            TokenKind::String(s) => Literal::Str(s),
            TokenKind::Keyword(KeywordId::True) => Literal::Bool(true),
            TokenKind::Keyword(KeywordId::False) => Literal::Bool(false),
            TokenKind::Keyword(KeywordId::Null) => Literal::Null,
            other => return Err(ParseError::syntax(format!("expected literal, found {:?}", other), token.span)),
        };
        if self.at_postfix_chain() {
            return self.swallowed(start);
        }
        Ok(Expr::Term(Term::Lit(literal)))
    }

    /// Identifier, `this`, `super` or `String` in operand position.
    fn name_term(&mut self, start: usize) -> PResult<Expr> {
        let next = self.peek_at(1).punctuation_id();
        if matches!(
            next,
            Some(PunctuationId::Arrow | PunctuationId::ColonColon | PunctuationId::LParen | PunctuationId::Dot)
        ) {
            return self.swallowed(start);
        }

        let name = match &self.advance().kind {
            TokenKind::Ident(name) => name.clone(),
            TokenKind::Keyword(id) => keywords::as_str(*id).to_string(),
            _ => Ident::new(),
        };
        let term = if self.match_punct(PunctuationId::LBracket) {
            let index = self.parse_expr()?;
            self.expect_punct(PunctuationId::RBracket, "expected `]` after array index")?;
            if self.at_postfix_chain() {
                return self.swallowed(start);
            }
            Term::ArrayRef {
                array: name,
                index: Box::new(index),
            }
        } else {
            Term::Ident(name)
        };

        let expr = Expr::Term(term);
        match self.peek().operator_id() {
            Some(op @ (OperatorId::PlusPlus | OperatorId::MinusMinus)) => {
                self.advance();
                Ok(Expr::Postfix {
                    op,
                    operand: Box::new(expr),
                })
            }
            _ => Ok(expr),
        }
    }

    /// Member access, indexing or a method reference continuing the current operand.
    fn at_postfix_chain(&self) -> bool {
        matches!(
            self.peek().punctuation_id(),
            Some(PunctuationId::Dot | PunctuationId::LBracket | PunctuationId::ColonColon)
        )
    }

    // ========================================================================
    // Parentheses, casts and lambdas
    // ========================================================================

    fn paren_or_cast(&mut self, start: usize) -> PResult<Expr> {
        if self.lambda_ahead() {
            return self.swallowed(start);
        }
        if let Some(cast) = self.try_cast()? {
            return Ok(cast);
        }
        self.expect_punct(PunctuationId::LParen, "expected `(`")?;
        let inner = self.parse_expr()?;
        self.expect_punct(PunctuationId::RParen, "expected `)` to close parenthesized expression")?;
        if self.at_postfix_chain() {
            return self.swallowed(start);
        }
        Ok(Expr::Term(Term::Paren(Box::new(inner))))
    }

    /// Bounded scan for `->` or `::` after the parenthesized group at the cursor.
    ///
    /// Exhausting the lookahead budget means "not a lambda".
    fn lambda_ahead(&self) -> bool {
        let mut depth = 0isize;
        for offset in 0..self.limits.max_lambda_lookahead {
            match &self.peek_at(offset).kind {
                TokenKind::Eof => return false,
                TokenKind::Punctuation(punct) => match punct {
                    PunctuationId::LParen => depth += 1,
                    PunctuationId::RParen => depth -= 1,
                    PunctuationId::Arrow | PunctuationId::ColonColon if depth <= 0 => return true,
                    PunctuationId::Semicolon | PunctuationId::Comma | PunctuationId::LBrace | PunctuationId::RBrace
                        if depth <= 0 =>
                    {
                        return false;
                    }
                    _ => {}
                },
                _ => {}
            }
        }
        false
    }

    /// Try `(Type) operand`. Rolls back and returns `None` when the parentheses do not hold a cast.
    fn try_cast(&mut self) -> PResult<Option<Expr>> {
        let checkpoint = self.checkpoint();
        self.advance();
        if !self.at_type_start() {
            self.rollback(checkpoint);
            return Ok(None);
        }
        let ty = match self.parse_type() {
            Ok(ty) => ty,
            Err(e) if e.is_limit() => return Err(e),
            Err(_) => {
                self.rollback(checkpoint);
                return Ok(None);
            }
        };
        if ty == Type::Void
            || self.names_variable(&ty)
            || !self.match_punct(PunctuationId::RParen)
            || !self.can_start_cast_operand(&ty)
        {
            self.rollback(checkpoint);
            return Ok(None);
        }
        let operand = self.guarded(|p| p.unary())?;
        Ok(Some(Expr::Term(Term::Cast {
            ty,
            expr: Box::new(operand),
        })))
    }

    /// `(x)` where `x` is a declared variable is a parenthesized expression, not a cast.
    fn names_variable(&self, ty: &Type) -> bool {
        let Type::Complex(complex) = ty else {
            return false;
        };
        complex.generic_args.is_none()
            && self
                .symbols
                .lookup_namespace_from(self.symbols.current_scope(), Namespace::Variable, &complex.name)
                .is_some()
    }

    /// Whether the token after `(Type)` can be the cast operand.
    ///
    /// `(a) - b` is a subtraction unless `a` is a primitive type.
    fn can_start_cast_operand(&self, ty: &Type) -> bool {
        match &self.peek().kind {
            TokenKind::Eof => false,
            TokenKind::Punctuation(punct) => *punct == PunctuationId::LParen,
            TokenKind::Operator(op) => match op {
                OperatorId::Plus | OperatorId::Minus | OperatorId::PlusPlus | OperatorId::MinusMinus => {
                    matches!(ty, Type::Primitive(_))
                }
                OperatorId::Bang | OperatorId::Tilde => true,
                _ => false,
            },
            TokenKind::Keyword(KeywordId::Instanceof) => false,
            _ => true,
        }
    }

    // ========================================================================
    // Swallowing
    // ========================================================================

    fn swallowed(&mut self, start: usize) -> PResult<Expr> {
        let span = self.swallow_until_expression_end(start)?;
        Ok(Expr::Term(Term::Swallowed(span)))
    }

    /// Skip tokens until the end of the enclosing expression: `;` or `,` outside brackets, an unmatched `)` or `]`,
    /// a `}` or end of input. Braces met on the way are parsed as statement scopes (lambda bodies, anonymous classes,
    /// `switch` blocks).
    fn swallow_until_expression_end(&mut self, start: usize) -> PResult<Span> {
        let mut depth = 0usize;
        let mut consumed = 0usize;
        let mut end = start;
        loop {
            if consumed >= self.limits.max_swallow_tokens {
                return Err(self.limit_error(Limit::SwallowTokens, self.limits.max_swallow_tokens));
            }
            if self.is_at_end() {
                break;
            }
            match self.peek().punctuation_id() {
                Some(PunctuationId::LParen | PunctuationId::LBracket) => depth += 1,
                Some(PunctuationId::RParen | PunctuationId::RBracket) => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                Some(PunctuationId::LBrace) => {
                    let (_, close, _) = self.statement_scope(ScopeKind::Block)?;
                    end = close + 1;
                    consumed += 1;
                    continue;
                }
                Some(PunctuationId::RBrace) => break,
                Some(PunctuationId::Semicolon | PunctuationId::Comma) if depth == 0 => break,
                _ => {}
            }
            end = self.advance().span.end;
            consumed += 1;
        }
        Ok(Span::new(start, end.max(start)))
    }
}
