//! Entry point discovery and synthesis.
//!
//! The entry point is the first public top-level class declaring `public static void main(String[] args)`. When no
//! public class declares it, the first public class gets one: [`MAIN_METHOD`] is inserted before its closing brace
//! and every declaration offset at or after the insertion point moves by the inserted length.

use javelin_syntax::ast::{
    AccessModifier, ArrayType, ClassId, FuncScope, FunctionDecl, FunctionRef, Member, Modifier, Param, PrimitiveType,
    Program, Span, Type, TypeKind,
};

use super::template::functions_match;

/// Text inserted into a class that lacks an entry point.
pub const MAIN_METHOD: &str = "public static void main(String[] args){}";

/// The signature every entry point must match.
pub fn baseline_main() -> FunctionDecl {
    FunctionDecl {
        access: AccessModifier::Public,
        annotations: Vec::new(),
        modifiers: vec![Modifier::Static],
        generics: Vec::new(),
        return_type: Type::Void,
        name: "main".to_string(),
        is_constructor: false,
        params: vec![Param {
            annotations: Vec::new(),
            modifiers: Vec::new(),
            ty: Type::Array(ArrayType {
                base: Box::new(Type::Primitive(PrimitiveType::String)),
                dims: 1,
                varargs: false,
            }),
            name: "args".to_string(),
        }],
        throws: Vec::new(),
        body: None,
        owner: 0,
        span: Span::default(),
    }
}

/// Where the entry point lives, or where it must be synthesized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntryLocation {
    Declared(FunctionRef),
    Missing(ClassId),
}

/// Locate the entry point. `None` when the program has no public top-level class.
pub(crate) fn find_entry(program: &Program) -> Option<EntryLocation> {
    let baseline = baseline_main();
    let public: Vec<ClassId> = program
        .top_level_classes()
        .filter(|id| {
            program
                .class(*id)
                .is_some_and(|c| c.kind == TypeKind::Class && c.access == AccessModifier::Public)
        })
        .collect();

    public
        .iter()
        .find_map(|id| find_main(program, *id, &baseline))
        .map(EntryLocation::Declared)
        .or_else(|| public.first().map(|id| EntryLocation::Missing(*id)))
}

/// First member of `class` matching `baseline` that has a body.
fn find_main(program: &Program, class: ClassId, baseline: &FunctionDecl) -> Option<FunctionRef> {
    let decl = program.class(class)?;
    decl.body.members.iter().enumerate().find_map(|(index, member)| match member {
        Member::Function(f) if f.body.is_some() && functions_match(baseline, f) => Some(FunctionRef { class, index }),
        _ => None,
    })
}

/// Insert [`MAIN_METHOD`] before the closing brace of `class` and register it as the class's last member.
///
/// Returns `None` without touching anything if `class` does not exist or its closing brace does not lie inside
/// `source`.
pub(crate) fn synthesize_main(program: &mut Program, source: &mut String, class: ClassId) -> Option<FunctionRef> {
    let insert_at = program.class(class)?.body.end;
    if insert_at >= source.len() || !source.is_char_boundary(insert_at) {
        return None;
    }
    let len = MAIN_METHOD.len();
    source.insert_str(insert_at, MAIN_METHOD);
    shift_offsets(program, insert_at, len);

    let decl = program.class_mut(class)?;
    let index = decl.body.members.len();
    decl.body.members.push(Member::Function(FunctionDecl {
        body: Some(FuncScope {
            begin: insert_at + len - 2,
            end: insert_at + len - 1,
            scope: decl.body.scope,
        }),
        owner: class,
        span: Span::new(insert_at, insert_at + len),
        ..baseline_main()
    }));
    tracing::debug!(class = %decl.name, offset = insert_at, "synthesized entry point");
    Some(FunctionRef { class, index })
}

/// Move every declaration offset at or after `at` by `by` bytes.
fn shift_offsets(program: &mut Program, at: usize, by: usize) {
    let shift = |offset: &mut usize| {
        if *offset >= at {
            *offset += by;
        }
    };
    let shift_span = |span: &mut Span| {
        shift(&mut span.start);
        shift(&mut span.end);
    };
    for class in &mut program.classes {
        shift(&mut class.body.begin);
        shift(&mut class.body.end);
        shift_span(&mut class.span);
        for member in &mut class.body.members {
            match member {
                Member::Function(f) => {
                    shift_span(&mut f.span);
                    if let Some(body) = &mut f.body {
                        shift(&mut body.begin);
                        shift(&mut body.end);
                    }
                }
                Member::Variable(v) => shift_span(&mut v.span),
                Member::NestedClass(_) => {}
            }
        }
    }
}
