/// Statement scopes.
///
/// Method bodies are parsed shallowly: every `{ ... }` becomes a scope in the symbol table, local variable
/// declarations are registered in it, and every other statement is skipped up to its `;` or the next brace.
impl<'a> Parser<'a> {
    /// `{ ... }` as a new scope of `kind`. Returns the offsets of both braces and the scope id.
    fn statement_scope(&mut self, kind: ScopeKind) -> PResult<(usize, usize, ScopeId)> {
        self.guarded(|p| {
            let begin = p.expect_punct(PunctuationId::LBrace, "expected `{`")?.span.start;
            let scope = p.symbols.enter_scope(kind);
            let end = p.scope_statements();
            p.symbols.exit_scope();
            Ok((begin, end?, scope))
        })
    }

    /// Statements up to and including the closing `}` of the current scope. Returns the `}` offset.
    fn scope_statements(&mut self) -> PResult<usize> {
        loop {
            if self.check_punct(PunctuationId::RBrace) {
                return Ok(self.advance().span.start);
            }
            if self.is_at_end() {
                return Err(self.error_here("unterminated block"));
            }
            self.tick()?;
            self.statement()?;
        }
    }

    fn statement(&mut self) -> PResult<()> {
        if self.check_punct(PunctuationId::LBrace) {
            self.statement_scope(ScopeKind::Block)?;
            return Ok(());
        }
        if self.match_punct(PunctuationId::Semicolon) {
            return Ok(());
        }
        if self.at_local_declaration_start() {
            let checkpoint = self.checkpoint();
            match self.local_variable_declaration() {
                Ok(()) => return Ok(()),
                Err(e) if e.is_limit() => return Err(e),
                Err(_) => self.rollback(checkpoint),
            }
        }
        self.skip_statement();
        Ok(())
    }

    fn at_local_declaration_start(&self) -> bool {
        self.check_keyword(KeywordId::Final) || (self.at_type_start() && !self.check_keyword(KeywordId::Void))
    }

    /// `[final] T a [= init], b;`
    ///
    /// Fails without side effects unless a declarator name is followed by `=`, `,` or `;`. A declarator whose
    /// initializer fails stays registered.
    fn local_variable_declaration(&mut self) -> PResult<()> {
        let mut modifiers = Vec::new();
        while self.match_keyword(KeywordId::Final) {
            if !modifiers.contains(&Modifier::Final) {
                modifiers.push(Modifier::Final);
            }
        }
        let ty = self.parse_type()?;
        loop {
            let (name, span) = self.expect_ident("expected variable name")?;
            let ty = self.trailing_dims(ty.clone())?;
            let at_declarator_end = self.check_op(OperatorId::Eq)
                || self.check_punct(PunctuationId::Comma)
                || self.check_punct(PunctuationId::Semicolon);
            if !at_declarator_end {
                return Err(self.error_here("expected `=`, `,` or `;` after variable name"));
            }
            self.define_variable(name, ty, modifiers.clone(), span);
            if self.match_op(OperatorId::Eq) {
                self.variable_initializer()?;
            }
            if self.match_punct(PunctuationId::Comma) {
                continue;
            }
            self.expect_punct(PunctuationId::Semicolon, "expected `;` after variable declaration")?;
            return Ok(());
        }
    }

    /// Skip one unmodelled statement: up to and including `;` outside parentheses, or up to (not including) a brace.
    fn skip_statement(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.peek().punctuation_id() {
                _ if self.is_at_end() => return,
                Some(PunctuationId::LBrace | PunctuationId::RBrace) => return,
                Some(PunctuationId::LParen | PunctuationId::LBracket) => depth += 1,
                Some(PunctuationId::RParen | PunctuationId::RBracket) => depth = depth.saturating_sub(1),
                Some(PunctuationId::Semicolon) if depth == 0 => {
                    self.advance();
                    return;
                }
                _ => {}
            }
            self.advance();
        }
    }
}
