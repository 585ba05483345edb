//! Structural matching of a submission against its template.
//!
//! Every declaration in the template must have a structural counterpart somewhere in the corresponding submission
//! class. There is no partial credit: one missing member fails the whole comparison.
//!
//! ## Notes
//! - Classes compare in [`MatchMode::Strict`] except the template's entry-point class, which compares in
//!   [`MatchMode::Lax`] against the submission's entry-point class so learners may rename it.
//! - A raw complex type in the template (`List`) accepts any generic arguments in the submission; the reverse does
//!   not hold.

use javelin_syntax::ast::{
    ArrayType, ClassDecl, ClassId, ComplexType, FunctionDecl, GenericArg, Member, Modifier, Param, Program, Type,
    VariableDecl, WildcardBound,
};

/// How strictly two classes must agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Names must be identical.
    Strict,
    /// Class names and generic parameter names may differ.
    Lax,
}

/// A template program paired with the submission it is checked against.
pub(crate) struct TemplateMatcher<'a> {
    template: &'a Program,
    submission: &'a Program,
}

impl<'a> TemplateMatcher<'a> {
    pub(crate) fn new(template: &'a Program, submission: &'a Program) -> Self {
        Self { template, submission }
    }

    /// Check every top-level template class against the submission.
    ///
    /// `template_entry` and `submission_entry` are the entry-point classes of each side; they are paired in lax mode.
    pub(crate) fn validate(&self, template_entry: Option<ClassId>, submission_entry: ClassId) -> bool {
        self.template.top_level_classes().all(|expected| {
            if Some(expected) == template_entry {
                self.classes_match(expected, submission_entry, MatchMode::Lax)
            } else {
                self.submission
                    .top_level_classes()
                    .any(|actual| self.classes_match(expected, actual, MatchMode::Strict))
            }
        })
    }

    /// Header and members of `expected` (template) against `actual` (submission).
    pub(crate) fn classes_match(&self, expected: ClassId, actual: ClassId, mode: MatchMode) -> bool {
        let (Some(expected), Some(actual)) = (self.template.class(expected), self.submission.class(actual)) else {
            return false;
        };
        headers_match(expected, actual, mode)
            && expected
                .body
                .members
                .iter()
                .all(|member| actual.body.members.iter().any(|candidate| self.members_match(member, candidate)))
    }

    fn members_match(&self, expected: &Member, actual: &Member) -> bool {
        match (expected, actual) {
            (Member::Function(e), Member::Function(a)) => functions_match(e, a),
            (Member::Variable(e), Member::Variable(a)) => variables_match(e, a),
            (Member::NestedClass(e), Member::NestedClass(a)) => self.classes_match(*e, *a, MatchMode::Strict),
            _ => false,
        }
    }
}

fn headers_match(expected: &ClassDecl, actual: &ClassDecl, mode: MatchMode) -> bool {
    if expected.kind != actual.kind
        || expected.access != actual.access
        || expected.generics.len() != actual.generics.len()
        || !same_modifiers(&expected.modifiers, &actual.modifiers)
    {
        return false;
    }
    match mode {
        MatchMode::Lax => true,
        MatchMode::Strict => {
            expected.name == actual.name
                && expected
                    .generics
                    .iter()
                    .zip(&actual.generics)
                    .all(|(e, a)| e.name == a.name)
        }
    }
}

/// Signature equality. Constructor names are not compared: they follow the (possibly renamed) class.
pub fn functions_match(expected: &FunctionDecl, actual: &FunctionDecl) -> bool {
    expected.access == actual.access
        && expected.is_constructor == actual.is_constructor
        && (expected.is_constructor || expected.name == actual.name)
        && same_modifiers(&expected.modifiers, &actual.modifiers)
        && expected.generics == actual.generics
        && types_match(&expected.return_type, &actual.return_type)
        && expected.params.len() == actual.params.len()
        && expected.params.iter().zip(&actual.params).all(|(e, a)| params_match(e, a))
}

fn params_match(expected: &Param, actual: &Param) -> bool {
    expected.name == actual.name
        && same_modifiers(&expected.modifiers, &actual.modifiers)
        && types_match(&expected.ty, &actual.ty)
}

fn variables_match(expected: &VariableDecl, actual: &VariableDecl) -> bool {
    expected.access == actual.access
        && expected.name == actual.name
        && same_modifiers(&expected.modifiers, &actual.modifiers)
        && types_match(&expected.ty, &actual.ty)
}

/// Order-independent modifier comparison.
fn same_modifiers(expected: &[Modifier], actual: &[Modifier]) -> bool {
    let mut expected = expected.to_vec();
    let mut actual = actual.to_vec();
    expected.sort_unstable();
    expected.dedup();
    actual.sort_unstable();
    actual.dedup();
    expected == actual
}

/// Structural type equality, with raw template types accepting any generic arguments.
pub fn types_match(expected: &Type, actual: &Type) -> bool {
    match (expected, actual) {
        (Type::Primitive(e), Type::Primitive(a)) => e == a,
        (Type::Void, Type::Void) => true,
        (Type::Array(e), Type::Array(a)) => arrays_match(e, a),
        (Type::Complex(e), Type::Complex(a)) => complex_match(e, a),
        _ => false,
    }
}

fn arrays_match(expected: &ArrayType, actual: &ArrayType) -> bool {
    expected.dims == actual.dims && expected.varargs == actual.varargs && types_match(&expected.base, &actual.base)
}

fn complex_match(expected: &ComplexType, actual: &ComplexType) -> bool {
    if expected.name != actual.name {
        return false;
    }
    match (&expected.generic_args, &actual.generic_args) {
        (None, _) => true,
        (Some(_), None) => false,
        (Some(e), Some(a)) => e.len() == a.len() && e.iter().zip(a).all(|(e, a)| generic_args_match(e, a)),
    }
}

fn generic_args_match(expected: &GenericArg, actual: &GenericArg) -> bool {
    match (expected, actual) {
        (GenericArg::Type(e), GenericArg::Type(a)) => types_match(e, a),
        (GenericArg::Wildcard(e), GenericArg::Wildcard(a)) => match (e, a) {
            (WildcardBound::Unbounded, WildcardBound::Unbounded) => true,
            (WildcardBound::Extends(e), WildcardBound::Extends(a)) => {
                e.len() == a.len() && e.iter().zip(a).all(|(e, a)| complex_match(e, a))
            }
            (WildcardBound::Super(e), WildcardBound::Super(a)) => complex_match(e, a),
            _ => false,
        },
        _ => false,
    }
}
