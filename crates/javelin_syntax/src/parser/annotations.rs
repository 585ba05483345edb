/// Annotation parsing.
///
/// `@Name`, `@Name(value)`, `@Name(key = value, ...)`. Values may be nested annotations, `{...}` arrays or
/// expressions. Nesting runs through the depth guard and argument counts are capped.
impl<'a> Parser<'a> {
    fn annotation(&mut self) -> PResult<Annotation> {
        self.guarded(|p| {
            let start = p.expect_punct(PunctuationId::At, "expected `@`")?.span.start;
            let name = p.qualified_name(false)?;
            let mut args = Vec::new();
            if p.match_punct(PunctuationId::LParen) && !p.match_punct(PunctuationId::RParen) {
                loop {
                    if args.len() >= p.limits.max_annotation_values {
                        return Err(p.limit_error(Limit::AnnotationValues, p.limits.max_annotation_values));
                    }
                    let key = match &p.peek().kind {
                        TokenKind::Ident(key) if p.peek_at(1).kind.is_operator(OperatorId::Eq) => {
                            let key = key.clone();
                            p.advance();
                            p.advance();
                            Some(key)
                        }
                        _ => None,
                    };
                    let value = p.annotation_value()?;
                    args.push(AnnotationArg { name: key, value });
                    if p.match_punct(PunctuationId::Comma) {
                        continue;
                    }
                    p.expect_punct(PunctuationId::RParen, "expected `,` or `)` after annotation argument")?;
                    break;
                }
            }
            Ok(Annotation {
                name,
                args,
                span: Span::new(start, p.previous_end()),
            })
        })
    }

    fn annotation_value(&mut self) -> PResult<AnnotationValue> {
        if self.check_punct(PunctuationId::At) {
            Ok(AnnotationValue::Annotation(Box::new(self.annotation()?)))
        } else if self.check_punct(PunctuationId::LBrace) {
            self.annotation_array()
        } else {
            Ok(AnnotationValue::Expr(self.parse_expr()?))
        }
    }

    /// `{a, b, c}` with an optional trailing comma.
    fn annotation_array(&mut self) -> PResult<AnnotationValue> {
        self.guarded(|p| {
            p.expect_punct(PunctuationId::LBrace, "expected `{`")?;
            let mut items = Vec::new();
            loop {
                if p.match_punct(PunctuationId::RBrace) {
                    break;
                }
                if items.len() >= p.limits.max_annotation_array_elements {
                    return Err(p.limit_error(Limit::AnnotationArrayElements, p.limits.max_annotation_array_elements));
                }
                items.push(p.annotation_value()?);
                if p.match_punct(PunctuationId::Comma) {
                    continue;
                }
                p.expect_punct(PunctuationId::RBrace, "expected `,` or `}` in annotation array")?;
                break;
            }
            Ok(AnnotationValue::Array(items))
        })
    }
}
