/// Type parsing: primitive and reference types, generic arguments and parameters, array dimensions.
///
/// Closing chevrons go through `eat_close_chevron`, which splits `>>` and `>>>` so that
/// `Map<String, List<Integer>>` closes both lists.
impl<'a> Parser<'a> {
    /// Return `true` if the current token can begin a type.
    fn at_type_start(&self) -> bool {
        self.check_ident() || self.peek().kind.is_keyword_in(KeywordCategory::PrimitiveType)
    }

    fn primitive_type(&self) -> Option<PrimitiveType> {
        match self.peek().keyword_id()? {
            KeywordId::Byte => Some(PrimitiveType::Byte),
            KeywordId::Short => Some(PrimitiveType::Short),
            KeywordId::Int => Some(PrimitiveType::Int),
            KeywordId::Long => Some(PrimitiveType::Long),
            KeywordId::Float => Some(PrimitiveType::Float),
            KeywordId::Double => Some(PrimitiveType::Double),
            KeywordId::Char => Some(PrimitiveType::Char),
            KeywordId::Boolean => Some(PrimitiveType::Boolean),
            KeywordId::String => Some(PrimitiveType::String),
            KeywordId::Var => Some(PrimitiveType::Var),
            _ => None,
        }
    }

    /// Parse a full type including array dimensions and varargs.
    fn parse_type(&mut self) -> PResult<Type> {
        let base = if let Some(primitive) = self.primitive_type() {
            self.advance();
            Type::Primitive(primitive)
        } else if self.match_keyword(KeywordId::Void) {
            Type::Void
        } else if self.check_ident() {
            Type::Complex(self.complex_type()?)
        } else {
            return Err(self.error_here("expected type"));
        };

        let dims = self.array_dims(0)?;
        if self.match_punct(PunctuationId::Ellipsis) {
            return Ok(Type::Array(ArrayType {
                base: Box::new(base),
                dims: dims + 1,
                varargs: true,
            }));
        }
        if dims == 0 {
            return Ok(base);
        }
        Ok(Type::Array(ArrayType {
            base: Box::new(base),
            dims,
            varargs: false,
        }))
    }

    /// Apply C-style dimensions written after a declarator name: `int a[]`.
    fn trailing_dims(&mut self, ty: Type) -> PResult<Type> {
        if !self.check_punct(PunctuationId::LBracket) {
            return Ok(ty);
        }
        match ty {
            Type::Array(mut array) => {
                array.dims = self.array_dims(array.dims)?;
                Ok(Type::Array(array))
            }
            base => {
                let dims = self.array_dims(0)?;
                Ok(Type::Array(ArrayType {
                    base: Box::new(base),
                    dims,
                    varargs: false,
                }))
            }
        }
    }

    /// Count `[]` pairs on top of `dims` existing ones.
    fn array_dims(&mut self, mut dims: usize) -> PResult<usize> {
        while self.check_punct(PunctuationId::LBracket) && self.peek_at(1).kind.is_punctuation(PunctuationId::RBracket) {
            if dims >= self.limits.max_array_dimensions {
                return Err(self.limit_error(Limit::ArrayDimensions, self.limits.max_array_dimensions));
            }
            self.advance();
            self.advance();
            dims += 1;
        }
        Ok(dims)
    }

    /// Dotted reference type with optional generic arguments.
    fn complex_type(&mut self) -> PResult<ComplexType> {
        self.guarded(|p| {
            let name = p.qualified_name(false)?;
            let generic_args = if p.check_op(OperatorId::Lt) {
                Some(p.generic_args()?)
            } else {
                None
            };
            Ok(ComplexType { name, generic_args })
        })
    }

    /// `<A, ? extends B, ? super C>`. `<>` and a trailing comma are tolerated.
    fn generic_args(&mut self) -> PResult<Vec<GenericArg>> {
        self.expect_op(OperatorId::Lt, "expected `<`")?;
        let mut args = Vec::new();
        if self.eat_close_chevron() {
            return Ok(args);
        }
        loop {
            if args.len() >= self.limits.max_generic_params {
                return Err(self.limit_error(Limit::GenericParams, self.limits.max_generic_params));
            }
            let arg = if self.match_punct(PunctuationId::Question) {
                GenericArg::Wildcard(self.wildcard_bound()?)
            } else {
                GenericArg::Type(self.parse_type()?)
            };
            args.push(arg);
            if self.match_punct(PunctuationId::Comma) {
                if self.eat_close_chevron() {
                    return Ok(args);
                }
                continue;
            }
            if self.eat_close_chevron() {
                return Ok(args);
            }
            return Err(self.error_here("expected `,` or `>` in generic arguments"));
        }
    }

    fn wildcard_bound(&mut self) -> PResult<WildcardBound> {
        if self.match_keyword(KeywordId::Extends) {
            Ok(WildcardBound::Extends(self.type_bounds()?))
        } else if self.match_keyword(KeywordId::Super) {
            Ok(WildcardBound::Super(self.complex_type()?))
        } else {
            Ok(WildcardBound::Unbounded)
        }
    }

    /// `A & B & C` after `extends`.
    fn type_bounds(&mut self) -> PResult<Vec<ComplexType>> {
        let mut bounds = Vec::new();
        loop {
            if bounds.len() >= self.limits.max_generic_params {
                return Err(self.limit_error(Limit::GenericParams, self.limits.max_generic_params));
            }
            bounds.push(self.complex_type()?);
            if !self.match_op(OperatorId::Amp) {
                return Ok(bounds);
            }
        }
    }

    /// Generic parameter declarations: `<T, U extends A & B>`.
    fn generic_params(&mut self) -> PResult<Vec<GenericParam>> {
        self.guarded(|p| {
            p.expect_op(OperatorId::Lt, "expected `<`")?;
            let mut params = Vec::new();
            if p.eat_close_chevron() {
                return Ok(params);
            }
            loop {
                if params.len() >= p.limits.max_generic_params {
                    return Err(p.limit_error(Limit::GenericParams, p.limits.max_generic_params));
                }
                let (name, _) = p.expect_ident("expected type parameter name")?;
                let bounds = if p.match_keyword(KeywordId::Extends) {
                    p.type_bounds()?
                } else {
                    Vec::new()
                };
                params.push(GenericParam { name, bounds });
                if p.match_punct(PunctuationId::Comma) {
                    if p.eat_close_chevron() {
                        return Ok(params);
                    }
                    continue;
                }
                if p.eat_close_chevron() {
                    return Ok(params);
                }
                return Err(p.error_here("expected `,` or `>` in type parameters"));
            }
        })
    }
}
