/// Declaration parsing: compilation units, classes, interfaces and their members.
///
/// Classes are allocated in the arena as soon as their header parses, so member functions can carry a stable
/// [`FunctionRef`] and nested classes a parent id. A class is attached to its parent (or to the compilation unit)
/// only once its body has parsed completely.
impl<'a> Parser<'a> {
    // ========================================================================
    // Compilation unit
    // ========================================================================

    fn compilation_unit(&mut self) -> PResult<CompilationUnit> {
        let mut unit = CompilationUnit::default();

        if self.match_keyword(KeywordId::Package) {
            match self.qualified_name(false) {
                Ok(name) => {
                    unit.package = Some(name);
                    if let Err(e) = self.expect_punct(PunctuationId::Semicolon, "expected `;` after package name") {
                        self.recover(e)?;
                    }
                }
                Err(e) => {
                    self.recover(e)?;
                    self.skip_past_semicolon();
                }
            }
        }

        while self.check_keyword(KeywordId::Import) {
            match self.import() {
                Ok(import) => unit.imports.push(import),
                Err(e) => {
                    self.recover(e)?;
                    self.skip_past_semicolon();
                }
            }
        }

        while !self.is_at_end() {
            self.tick()?;
            let start = self.checkpoint();
            match self.type_definition(None) {
                Ok(Some(id)) => unit.types.push(id),
                Ok(None) => {}
                Err(e) => self.recover(e)?,
            }
            if self.checkpoint() == start {
                self.advance();
            }
        }

        Ok(unit)
    }

    /// `import [static] a.b.C;` or `import a.b.*;`
    fn import(&mut self) -> PResult<Import> {
        let start = self.expect_keyword(KeywordId::Import, "expected `import`")?.span.start;
        let is_static = self.match_keyword(KeywordId::Static);
        let path = self.qualified_name(true)?;
        let end = self.expect_punct(PunctuationId::Semicolon, "expected `;` after import")?.span.end;
        Ok(Import {
            path,
            is_static,
            span: Span::new(start, end),
        })
    }

    /// Dotted name `a.b.c`, optionally ending in `.*`.
    fn qualified_name(&mut self, allow_wildcard: bool) -> PResult<String> {
        let (mut name, _) = self.expect_ident("expected name")?;
        let mut parts = 1;
        while self.check_punct(PunctuationId::Dot) {
            let next = &self.peek_at(1).kind;
            if allow_wildcard && next.is_operator(OperatorId::Star) {
                self.advance();
                self.advance();
                name.push_str(".*");
                break;
            }
            if !matches!(next, TokenKind::Ident(_)) {
                break;
            }
            if parts >= self.limits.max_qualified_name_parts {
                return Err(self.limit_error(Limit::QualifiedNameParts, self.limits.max_qualified_name_parts));
            }
            self.advance();
            let (part, _) = self.expect_ident("expected name after `.`")?;
            name.push('.');
            name.push_str(&part);
            parts += 1;
        }
        Ok(name)
    }

    // ========================================================================
    // Type definitions
    // ========================================================================

    /// Parse one type definition at the top level or inside a class body.
    ///
    /// ## Returns
    /// - `Some(id)` for a class or interface.
    /// - `None` for an enum, record or annotation type, which is skipped.
    fn type_definition(&mut self, parent: Option<ClassId>) -> PResult<Option<ClassId>> {
        let prefix = self.decl_prefix()?;
        self.type_definition_after_prefix(prefix, parent)
    }

    fn type_definition_after_prefix(&mut self, prefix: DeclPrefix, parent: Option<ClassId>) -> PResult<Option<ClassId>> {
        if self.check_keyword(KeywordId::Class) || self.check_keyword(KeywordId::Interface) {
            return self.class_declaration(prefix, parent).map(Some);
        }
        if self.at_skipped_type() {
            self.skip_type_declaration()?;
            return Ok(None);
        }
        Err(self.error_here("expected class or interface declaration"))
    }

    /// Access modifier, annotations and modifiers in any order.
    fn decl_prefix(&mut self) -> PResult<DeclPrefix> {
        let mut prefix = DeclPrefix {
            start: self.current_span().start,
            ..DeclPrefix::default()
        };
        loop {
            if let Some(access) = self.access_modifier() {
                if prefix.access.is_some() {
                    return Err(self.error_here("duplicate access modifier"));
                }
                self.advance();
                prefix.access = Some(access);
            } else if self.check_punct(PunctuationId::At) && !self.peek_at(1).kind.is_keyword(KeywordId::Interface) {
                let annotation = self.annotation()?;
                prefix.annotations.push(annotation);
            } else if let Some(modifier) = self.modifier() {
                if prefix.modifiers.contains(&modifier) {
                    return Err(self.error_here("duplicate modifier"));
                }
                self.advance();
                prefix.modifiers.push(modifier);
            } else {
                return Ok(prefix);
            }
        }
    }

    fn access_modifier(&self) -> Option<AccessModifier> {
        match self.peek().keyword_id()? {
            KeywordId::Public => Some(AccessModifier::Public),
            KeywordId::Protected => Some(AccessModifier::Protected),
            KeywordId::Private => Some(AccessModifier::Private),
            _ => None,
        }
    }

    fn modifier(&self) -> Option<Modifier> {
        match self.peek().keyword_id()? {
            KeywordId::Static => Some(Modifier::Static),
            KeywordId::Final => Some(Modifier::Final),
            KeywordId::Abstract => Some(Modifier::Abstract),
            KeywordId::Strictfp => Some(Modifier::Strictfp),
            KeywordId::Default => Some(Modifier::Default),
            KeywordId::Transient => Some(Modifier::Transient),
            KeywordId::Synchronized => Some(Modifier::Synchronized),
            KeywordId::Volatile => Some(Modifier::Volatile),
            KeywordId::Native => Some(Modifier::Native),
            _ => None,
        }
    }

    /// Reject modifiers that do not apply to the declaration being parsed.
    fn check_modifiers(&self, modifiers: &[Modifier], allowed: &[Modifier], what: &str) -> PResult<()> {
        match modifiers.iter().find(|m| !allowed.contains(m)) {
            Some(m) => Err(ParseError::syntax(
                format!("modifier `{}` is not allowed on {}", m, what),
                self.current_span(),
            )),
            None => Ok(()),
        }
    }

    /// `enum`, `record Name` or `@interface`.
    fn at_skipped_type(&self) -> bool {
        let kind = &self.peek().kind;
        kind.is_keyword(KeywordId::Enum)
            || (kind.is_punctuation(PunctuationId::At) && self.peek_at(1).kind.is_keyword(KeywordId::Interface))
            || (matches!(kind, TokenKind::Ident(name) if name == "record")
                && matches!(self.peek_at(1).kind, TokenKind::Ident(_)))
    }

    /// Skip an enum, record or annotation type, registering its name as an opaque type.
    fn skip_type_declaration(&mut self) -> PResult<()> {
        self.match_punct(PunctuationId::At);
        self.advance();
        if let TokenKind::Ident(name) = &self.peek().kind {
            let name = name.clone();
            let span = self.advance().span;
            self.symbols.define(Symbol {
                name,
                kind: SymbolKind::Type(TypeTarget::Opaque),
                span,
                scope: self.symbols.current_scope(),
            });
        }
        while !self.check_punct(PunctuationId::LBrace) {
            if self.is_at_end() || self.check_punct(PunctuationId::RBrace) || self.check_punct(PunctuationId::Semicolon) {
                return Err(self.error_here("expected `{` to open type body"));
            }
            self.advance();
        }
        self.skip_balanced_braces();
        Ok(())
    }

    // ========================================================================
    // Classes
    // ========================================================================

    fn class_declaration(&mut self, prefix: DeclPrefix, parent: Option<ClassId>) -> PResult<ClassId> {
        let kind = if self.match_keyword(KeywordId::Class) {
            TypeKind::Class
        } else {
            self.expect_keyword(KeywordId::Interface, "expected `class` or `interface`")?;
            TypeKind::Interface
        };
        let (name, name_span) = self.expect_ident("expected type name")?;
        let generics = if self.check_op(OperatorId::Lt) {
            self.generic_params()?
        } else {
            Vec::new()
        };

        let mut extends = Vec::new();
        let mut implements = Vec::new();
        if self.match_keyword(KeywordId::Extends) {
            extends = self.type_list(kind == TypeKind::Interface)?;
        }
        if kind == TypeKind::Class && self.match_keyword(KeywordId::Implements) {
            implements = self.type_list(true)?;
        }

        let allowed: &[Modifier] = if parent.is_some() {
            &[Modifier::Static, Modifier::Final, Modifier::Abstract, Modifier::Strictfp]
        } else {
            &[Modifier::Final, Modifier::Abstract, Modifier::Strictfp]
        };
        self.check_modifiers(&prefix.modifiers, allowed, "a type declaration")?;

        let begin = self
            .expect_punct(PunctuationId::LBrace, "expected `{` to open type body")?
            .span
            .start;

        // The type is visible in its enclosing scope before its body parses.
        let id = self.classes.len();
        self.symbols.define(Symbol {
            name: name.clone(),
            kind: SymbolKind::Type(TypeTarget::Class(id)),
            span: name_span,
            scope: self.symbols.current_scope(),
        });
        let scope = self.symbols.enter_scope(ScopeKind::Class);
        self.classes.push(ClassDecl {
            kind,
            access: prefix.access(),
            annotations: prefix.annotations,
            modifiers: prefix.modifiers,
            name,
            generics,
            extends,
            implements,
            body: TypeScope {
                begin,
                end: begin,
                members: Vec::new(),
                scope,
            },
            parent,
            span: Span::new(prefix.start, begin),
        });

        let body = self.class_body(id);
        self.symbols.exit_scope();
        let end = body?;

        let class = &mut self.classes[id];
        class.body.end = end;
        class.span.end = end + 1;
        tracing::trace!(class = %class.name, members = class.body.members.len(), "parsed type");
        Ok(id)
    }

    /// Members up to and including the closing `}`. Returns the offset of the `}`.
    fn class_body(&mut self, owner: ClassId) -> PResult<usize> {
        loop {
            if self.check_punct(PunctuationId::RBrace) {
                return Ok(self.advance().span.start);
            }
            if self.is_at_end() {
                return Err(self.error_here("unterminated type body"));
            }
            self.tick()?;
            let start = self.checkpoint();
            if let Err(e) = self.type_member(owner) {
                self.recover(e)?;
                if self.checkpoint() == start {
                    self.advance();
                }
            }
        }
    }

    /// `extends A, B` / `implements A, B` / `throws A, B`. A trailing comma before `{` is tolerated.
    fn type_list(&mut self, allow_many: bool) -> PResult<Vec<ComplexType>> {
        let mut types = vec![self.complex_type()?];
        while allow_many && self.match_punct(PunctuationId::Comma) {
            if self.check_punct(PunctuationId::LBrace) {
                break;
            }
            types.push(self.complex_type()?);
        }
        Ok(types)
    }

    // ========================================================================
    // Members
    // ========================================================================

    fn type_member(&mut self, owner: ClassId) -> PResult<()> {
        if self.match_punct(PunctuationId::Semicolon) {
            return Ok(());
        }
        if self.check_punct(PunctuationId::LBrace)
            || (self.check_keyword(KeywordId::Static) && self.peek_at(1).kind.is_punctuation(PunctuationId::LBrace))
        {
            self.match_keyword(KeywordId::Static);
            self.skip_balanced_braces();
            return Ok(());
        }

        let prefix = self.decl_prefix()?;
        match self.classify_member()? {
            MemberShape::Function => {
                let function = self.function_declaration(prefix, owner)?;
                let index = self.classes[owner].body.members.len();
                if !function.is_constructor {
                    self.symbols.define(Symbol {
                        name: function.name.clone(),
                        kind: SymbolKind::Method(FunctionRef { class: owner, index }),
                        span: function.span,
                        scope: self.symbols.current_scope(),
                    });
                }
                self.classes[owner].body.members.push(Member::Function(function));
            }
            MemberShape::Variable => self.field_declaration(prefix, owner)?,
            MemberShape::NestedType | MemberShape::SkippedType => {
                let nested = self.guarded(|p| p.type_definition_after_prefix(prefix, Some(owner)))?;
                if let Some(id) = nested {
                    self.classes[owner].body.members.push(Member::NestedClass(id));
                }
            }
            MemberShape::InitializerBlock => self.skip_balanced_braces(),
        }
        Ok(())
    }

    /// Decide what the upcoming member is by scanning ahead without consuming.
    fn classify_member(&self) -> PResult<MemberShape> {
        if self.check_keyword(KeywordId::Class) || self.check_keyword(KeywordId::Interface) {
            return Ok(MemberShape::NestedType);
        }
        if self.at_skipped_type() {
            return Ok(MemberShape::SkippedType);
        }
        if self.check_punct(PunctuationId::LBrace) {
            return Ok(MemberShape::InitializerBlock);
        }

        let mut angle = 0usize;
        for offset in 0..self.limits.max_member_lookahead {
            match &self.peek_at(offset).kind {
                TokenKind::Ident(_) if angle == 0 && self.peek_at(offset + 1).kind.is_punctuation(PunctuationId::LParen) => {
                    return Ok(MemberShape::Function);
                }
                TokenKind::Operator(OperatorId::Lt) => angle += 1,
                TokenKind::Operator(OperatorId::Gt) => angle = angle.saturating_sub(1),
                TokenKind::Operator(OperatorId::Shr) => angle = angle.saturating_sub(2),
                TokenKind::Operator(OperatorId::UShr) => angle = angle.saturating_sub(3),
                TokenKind::Operator(OperatorId::Eq) => return Ok(MemberShape::Variable),
                TokenKind::Punctuation(PunctuationId::Semicolon) => return Ok(MemberShape::Variable),
                TokenKind::Punctuation(PunctuationId::Comma) if angle == 0 => return Ok(MemberShape::Variable),
                TokenKind::Punctuation(PunctuationId::LBrace | PunctuationId::RBrace) | TokenKind::Eof => {
                    return Err(self.error_here("expected member declaration"));
                }
                _ => {}
            }
        }
        Err(self.limit_error(Limit::MemberLookahead, self.limits.max_member_lookahead))
    }

    // ========================================================================
    // Functions
    // ========================================================================

    fn function_declaration(&mut self, prefix: DeclPrefix, owner: ClassId) -> PResult<FunctionDecl> {
        let generics = if self.check_op(OperatorId::Lt) {
            self.generic_params()?
        } else {
            Vec::new()
        };

        let is_constructor = matches!(&self.peek().kind, TokenKind::Ident(name) if *name == self.classes[owner].name)
            && self.peek_at(1).kind.is_punctuation(PunctuationId::LParen);
        let (return_type, name) = if is_constructor {
            let (name, _) = self.expect_ident("expected constructor name")?;
            (Type::Void, name)
        } else {
            let ty = self.parse_type()?;
            let (name, _) = self.expect_ident("expected method name")?;
            (ty, name)
        };

        let params = self.parameters()?;
        let throws = if self.match_keyword(KeywordId::Throws) {
            self.type_list(true)?
        } else {
            Vec::new()
        };

        if is_constructor {
            self.check_modifiers(&prefix.modifiers, &[], "a constructor")?;
        } else {
            self.check_modifiers(
                &prefix.modifiers,
                &[
                    Modifier::Static,
                    Modifier::Final,
                    Modifier::Abstract,
                    Modifier::Strictfp,
                    Modifier::Default,
                    Modifier::Synchronized,
                    Modifier::Native,
                ],
                "a method",
            )?;
        }

        let body = if self.match_punct(PunctuationId::Semicolon) {
            None
        } else if self.check_punct(PunctuationId::LBrace) {
            Some(self.function_body(&params)?)
        } else {
            return Err(self.error_here("expected `{` or `;` after method signature"));
        };

        Ok(FunctionDecl {
            access: prefix.access(),
            annotations: prefix.annotations,
            modifiers: prefix.modifiers,
            generics,
            return_type,
            name,
            is_constructor,
            params,
            throws,
            body,
            owner,
            span: Span::new(prefix.start, self.previous_end()),
        })
    }

    /// `(T a, final U... b)`
    fn parameters(&mut self) -> PResult<Vec<Param>> {
        self.expect_punct(PunctuationId::LParen, "expected `(` to open parameter list")?;
        let mut params = Vec::new();
        if self.match_punct(PunctuationId::RParen) {
            return Ok(params);
        }
        loop {
            let mut annotations = Vec::new();
            let mut modifiers = Vec::new();
            loop {
                if self.check_punct(PunctuationId::At) {
                    annotations.push(self.annotation()?.name);
                } else if self.match_keyword(KeywordId::Final) {
                    modifiers.push(Modifier::Final);
                } else {
                    break;
                }
            }
            let ty = self.parse_type()?;
            if ty == Type::Void {
                return Err(self.error_here("parameter cannot have type `void`"));
            }
            let (name, _) = self.expect_ident("expected parameter name")?;
            let ty = self.trailing_dims(ty)?;
            params.push(Param {
                annotations,
                modifiers,
                ty,
                name,
            });
            if self.match_punct(PunctuationId::Comma) {
                continue;
            }
            self.expect_punct(PunctuationId::RParen, "expected `,` or `)` in parameter list")?;
            return Ok(params);
        }
    }

    /// Method body. Parameters are declared in the function scope.
    fn function_body(&mut self, params: &[Param]) -> PResult<FuncScope> {
        self.guarded(|p| {
            let begin = p.expect_punct(PunctuationId::LBrace, "expected `{`")?.span.start;
            let scope = p.symbols.enter_scope(ScopeKind::Function);
            for param in params {
                p.define_variable(param.name.clone(), param.ty.clone(), param.modifiers.clone(), Span::default());
            }
            let end = p.scope_statements();
            p.symbols.exit_scope();
            Ok(FuncScope {
                begin,
                end: end?,
                scope,
            })
        })
    }

    // ========================================================================
    // Fields
    // ========================================================================

    /// `T a, b = 1;` pushes one variable member per declarator.
    fn field_declaration(&mut self, prefix: DeclPrefix, owner: ClassId) -> PResult<()> {
        self.check_modifiers(
            &prefix.modifiers,
            &[Modifier::Static, Modifier::Final, Modifier::Transient, Modifier::Volatile],
            "a field",
        )?;
        let ty = self.parse_type()?;
        if ty == Type::Void {
            return Err(self.error_here("field cannot have type `void`"));
        }
        loop {
            let (name, name_span) = self.expect_ident("expected field name")?;
            let ty = self.trailing_dims(ty.clone())?;
            let initializer = if self.match_op(OperatorId::Eq) {
                Some(self.variable_initializer()?)
            } else {
                None
            };
            self.define_variable(name.clone(), ty.clone(), prefix.modifiers.clone(), name_span);
            let end = self.previous_end();
            self.classes[owner].body.members.push(Member::Variable(VariableDecl {
                access: prefix.access(),
                annotations: prefix.annotations.clone(),
                modifiers: prefix.modifiers.clone(),
                ty,
                name,
                initializer,
                span: Span::new(prefix.start, end),
            }));
            if self.match_punct(PunctuationId::Comma) {
                continue;
            }
            self.expect_punct(PunctuationId::Semicolon, "expected `;` after field declaration")?;
            return Ok(());
        }
    }

    /// Array initializer or expression after `=`.
    fn variable_initializer(&mut self) -> PResult<Expr> {
        if self.check_punct(PunctuationId::LBrace) {
            self.array_literal()
        } else {
            self.parse_expr()
        }
    }

    /// `{a, {b, c}, d,}` with nesting and a trailing comma.
    fn array_literal(&mut self) -> PResult<Expr> {
        self.guarded(|p| {
            p.expect_punct(PunctuationId::LBrace, "expected `{` to open array initializer")?;
            let mut items = Vec::new();
            loop {
                if p.match_punct(PunctuationId::RBrace) {
                    break;
                }
                if items.len() >= p.limits.max_array_literal_elements {
                    return Err(p.limit_error(Limit::ArrayLiteralElements, p.limits.max_array_literal_elements));
                }
                items.push(p.variable_initializer()?);
                if p.match_punct(PunctuationId::Comma) {
                    continue;
                }
                p.expect_punct(PunctuationId::RBrace, "expected `,` or `}` in array initializer")?;
                break;
            }
            Ok(Expr::Term(Term::Lit(Literal::Array(items))))
        })
    }
}
