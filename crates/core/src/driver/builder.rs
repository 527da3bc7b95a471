//! One declaration tree per mirrored class.

use super::context::GenerationContext;
use super::members::body_members;
use super::overrides::OverrideResolver;
use super::types::{TypeMapper, default_value, form_type_name, has_not_null_annotation, to_string_default};
use super::mangle::is_to_string;
use super::visibility::is_class_generated;
use crate::naming::{add_backticks_if_needed, decimal_width, synthetic_parameter_name};
use crate::tree::{
    Annotation, Block, Declaration, Expression, FunctionDecl, Literal, Modifier, Name, ParameterDecl, TypeDecl,
    TypeKind, VariableDecl,
};
use mirrorgen_java::{ClassId, ClassKind, FieldId, JavaType, MemberRef, MethodId, Modifier as JavaModifier};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

pub const JAVA_MIRROR_ANNOTATION: &str = "JavaMirror";
pub const FOREIGN_NAME_ANNOTATION: &str = "ForeignName";
pub const JAVA_HAS_DEFAULT_ANNOTATION: &str = "JavaHasDefault";
const INIT: &str = "init";

/// Emitted name of one member and whether it differs from the Java name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedName {
    pub name: String,
    pub renamed: bool,
}

pub struct MirrorBuilder<'c, 'a> {
    ctx: &'c GenerationContext<'a>,
    resolver: OverrideResolver<'a>,
    types: TypeMapper<'c, 'a>,
}

impl<'c, 'a> MirrorBuilder<'c, 'a> {
    pub fn new(ctx: &'c GenerationContext<'a>) -> Self {
        Self {
            ctx,
            resolver: OverrideResolver::new(ctx.symbols),
            types: TypeMapper::new(ctx),
        }
    }

    fn annotation_mode(&self) -> bool {
        self.ctx.config.annotation_mode()
    }

    fn definition_mode(&self) -> bool {
        self.ctx.config.is_definition()
    }

    /// The type declaration mirroring `class`.
    pub fn build_class(&self, class: ClassId) -> Declaration {
        let symbols = self.ctx.symbols;
        let model = symbols.class(class);

        let kind = match model.kind {
            ClassKind::Class => TypeKind::Class,
            ClassKind::Interface => TypeKind::Interface,
            ClassKind::Annotation => TypeKind::Annotation,
        };
        let mut decl = TypeDecl::new(kind, Name::ident(self.ctx.class_identifier(class)));
        decl.supers = self.supertypes(class);

        if self.annotation_mode() {
            decl.annotations.push(
                Annotation::new(JAVA_MIRROR_ANNOTATION)
                    .with_argument(Expression::Literal(Literal::Str(form_type_name(symbols, class)))),
            );
        }

        if !model.is_final() && !model.is_interface() && !model.has(JavaModifier::Abstract) {
            decl.modifiers.push(Modifier::Open);
        }
        if model.has(JavaModifier::Public) {
            decl.modifiers.push(Modifier::Public);
        }
        if model.has(JavaModifier::Protected) {
            decl.modifiers.push(Modifier::Protected);
        }
        if model.has(JavaModifier::Abstract) && !model.is_interface() {
            decl.modifiers.push(Modifier::Abstract);
        }

        decl.declarations = self.body(class);
        Declaration::Type(decl)
    }

    fn supertypes(&self, class: ClassId) -> Vec<Name> {
        let symbols = self.ctx.symbols;
        let object = symbols.object_class();
        let is_interface = symbols.is_interface(class);
        let at_depth_bound = self.ctx.depth_of(class) == Some(self.ctx.max_depth());

        symbols
            .direct_supertypes(class)
            .into_iter()
            .filter(|sup| {
                if *sup == object {
                    return self.definition_mode() && !is_interface;
                }
                if at_depth_bound && !self.ctx.is_reached(*sup) {
                    return false;
                }
                is_class_generated(symbols, *sup)
            })
            .map(|sup| {
                self.types
                    .name(&JavaType::class(symbols.class(sup).name.clone()), false)
                    .unwrap_option()
            })
            .collect()
    }

    fn body(&self, class: ClassId) -> Vec<Declaration> {
        let symbols = self.ctx.symbols;
        let model = symbols.class(class);
        let members = body_members(self.ctx, class);
        let names = self.assign_names(&members);

        let mut declarations = Vec::with_capacity(members.len() + 1);
        let mut has_no_arg_init = false;

        for (member, emitted) in members.iter().copied().zip(names) {
            match member {
                MemberRef::Method(id) => {
                    let method = symbols.method(id);
                    if method.is_constructor() && method.parameters.is_empty() {
                        has_no_arg_init = true;
                    }
                    if let Some(reason) = self.untranslatable(id) {
                        warn!("Skipping a member of {}: {}", model.name, reason);
                        declarations.push(Declaration::Invalid(reason));
                        continue;
                    }

                    let mut decl = self.translate_method(class, id, emitted.name);
                    if self.annotation_mode() {
                        if emitted.renamed && self.resolver.is_renamed_in_this_class(class, id) {
                            decl.annotations.push(foreign_name(&method.name));
                        }
                        let has_default = (method.is_default() && !method.is_static())
                            || (method.is_abstract() && self.resolver.overrides_non_abstract_method(id));
                        if model.is_interface() && has_default {
                            decl.annotations.push(Annotation::new(JAVA_HAS_DEFAULT_ANNOTATION));
                        }
                    }
                    declarations.push(Declaration::Function(decl));
                }
                MemberRef::Field(id) => {
                    let mut decl = self.translate_field(class, id, emitted.name);
                    if self.annotation_mode() && emitted.renamed {
                        decl.annotations.push(foreign_name(&symbols.field(id).name));
                    }
                    declarations.push(Declaration::Variable(decl));
                }
            }
        }

        let needs_init = if self.definition_mode() {
            !has_no_arg_init || model.has_outer_instance
        } else {
            !has_no_arg_init
        };
        if !model.is_interface() && needs_init {
            debug!("Adding a no-argument constructor to {}", model.name);
            declarations.push(Declaration::Function(self.synthetic_init(class)));
        }

        declarations
    }

    /// Emitted names for a class body, with a `_n` suffix on any member
    /// that would clash with an earlier one. Fields clash by name with
    /// anything; methods clash with methods of the same erased parameters.
    pub fn assign_names(&self, members: &[MemberRef]) -> Vec<EmittedName> {
        let symbols = self.ctx.symbols;
        let mut fields: HashSet<String> = HashSet::new();
        let mut methods: HashMap<String, Vec<Vec<JavaType>>> = HashMap::new();
        let mut result = Vec::with_capacity(members.len());

        for member in members.iter().copied() {
            let (base, renamed) = match self.ctx.rename_of(member) {
                Some(rename) => (rename.to_string(), true),
                None => (self.default_name(member), false),
            };

            let emitted = match member {
                MemberRef::Method(id) if symbols.method(id).is_constructor() => EmittedName { name: base, renamed },
                MemberRef::Method(id) => {
                    let signature: Vec<JavaType> = symbols.method(id).parameter_types().cloned().collect();
                    let taken = |name: &str| {
                        fields.contains(name)
                            || methods.get(name).is_some_and(|sigs| sigs.contains(&signature))
                    };
                    let emitted = unique_name(base, renamed, taken);
                    methods.entry(emitted.name.clone()).or_default().push(signature);
                    emitted
                }
                MemberRef::Field(_) => {
                    let taken = |name: &str| fields.contains(name) || methods.contains_key(name);
                    let emitted = unique_name(base, renamed, taken);
                    fields.insert(emitted.name.clone());
                    emitted
                }
            };
            result.push(emitted);
        }
        result
    }

    fn default_name(&self, member: MemberRef) -> String {
        let symbols = self.ctx.symbols;
        match member {
            MemberRef::Method(id) if symbols.method(id).is_constructor() => INIT.to_string(),
            _ => add_backticks_if_needed(symbols.member_name(member)),
        }
    }

    fn not_null(&self, annotations: &[String]) -> bool {
        self.ctx.config.not_null_annotations && has_not_null_annotation(annotations)
    }

    /// Why `id` has no faithful declaration, if it has none. An inner-class
    /// constructor needs the enclosing class for its hidden first parameter.
    fn untranslatable(&self, id: MethodId) -> Option<String> {
        let symbols = self.ctx.symbols;
        let method = symbols.method(id);
        let owner = symbols.class(method.owner);
        if method.is_constructor() && owner.has_outer_instance && !owner.is_static() && owner.enclosing.is_none() {
            return Some(format!(
                "constructor of {} takes an enclosing instance but the class has no enclosing class",
                owner.name
            ));
        }
        None
    }

    /// Enclosing-instance type of an inner class's constructors.
    fn outer_instance_type(&self, class: ClassId, not_null: bool) -> Option<Name> {
        let model = self.ctx.symbols.class(class);
        if !model.has_outer_instance || model.is_static() {
            return None;
        }
        let enclosing = self.ctx.symbols.class(model.enclosing?);
        Some(self.types.name(&JavaType::class(enclosing.name.clone()), not_null))
    }

    pub fn translate_method(&self, class: ClassId, id: MethodId, name: String) -> FunctionDecl {
        let symbols = self.ctx.symbols;
        let method = symbols.method(id);
        let implementation = self.resolver.implementation(id, method.owner).unwrap_or(id);
        let modifiers = &symbols.method(implementation).modifiers;
        let in_interface = symbols.is_interface(class);
        let inherited = method.owner != class;

        let mut decl = FunctionDecl::new(name, method.is_constructor());

        let mut parameters: Vec<(Option<&str>, Name)> = Vec::with_capacity(method.parameters.len() + 1);
        if method.is_constructor() {
            if let Some(outer) = self.outer_instance_type(method.owner, true) {
                parameters.push((None, outer));
            }
        }
        for parameter in &method.parameters {
            let ty = self.types.name(&parameter.ty, self.not_null(&parameter.annotations));
            parameters.push((parameter.name.as_deref(), ty));
        }
        let width = decimal_width(parameters.len().saturating_sub(1));
        for (index, (declared, ty)) in parameters.into_iter().enumerate() {
            let name = match declared {
                Some(declared) => add_backticks_if_needed(declared),
                None => synthetic_parameter_name(index, width),
            };
            decl.parameters.push(ParameterDecl::new(name, ty));
        }

        if modifiers.contains(&JavaModifier::Public) && !in_interface {
            decl.modifiers.push(Modifier::Public);
        }
        if modifiers.contains(&JavaModifier::Protected) {
            decl.modifiers.push(Modifier::Protected);
        }

        let is_abstract = modifiers.contains(&JavaModifier::Abstract)
            && (!inherited || self.resolver.is_still_unimplemented(implementation, class))
            && !self.resolver.overrides_non_abstract_method(implementation);

        if !self.definition_mode() && is_abstract && !in_interface {
            decl.modifiers.push(Modifier::Abstract);
        }
        if self.definition_mode() && !is_abstract {
            decl.body = Some(Block::multiline(vec![]));
        }

        if !method.is_constructor() {
            if modifiers.contains(&JavaModifier::Static) {
                decl.modifiers.push(Modifier::Static);
            } else if !symbols.class(method.owner).is_final()
                && !modifiers.contains(&JavaModifier::Final)
                && !in_interface
            {
                decl.modifiers.push(Modifier::Open);
            }

            let to_string = is_to_string(method);
            let returns = self.types.name(&method.return_type, self.not_null(&method.annotations));
            decl.return_type = Some(if to_string { returns.unwrap_option() } else { returns });

            if let Some(body) = decl.body.as_mut() {
                if !method.return_type.is_void() {
                    body.expressions.push(if to_string {
                        to_string_default()
                    } else {
                        default_value(&method.return_type)
                    });
                }
            }
        }

        decl
    }

    pub fn translate_field(&self, class: ClassId, id: FieldId, name: String) -> VariableDecl {
        let field = self.ctx.symbols.field(id);
        let definition = self.definition_mode();

        let mut modifiers = Vec::new();
        if field.has(JavaModifier::Public) {
            modifiers.push(Modifier::Public);
        }
        if field.has(JavaModifier::Protected) {
            modifiers.push(Modifier::Protected);
        }
        if field.is_static() {
            modifiers.push(Modifier::Static);
        }

        let not_null = !definition && self.not_null(&field.annotations);
        VariableDecl {
            annotations: vec![],
            modifiers,
            name,
            is_let: field.is_final(),
            is_prop: self.ctx.symbols.is_interface(class),
            ty: Some(self.types.name(&field.ty, not_null)),
            initializer: definition.then(|| default_value(&field.ty)),
        }
    }

    /// `public init()`, taking the enclosing instance in declaration mode
    /// when the class needs one.
    fn synthetic_init(&self, class: ClassId) -> FunctionDecl {
        let mut decl = FunctionDecl::new(INIT, true);
        decl.modifiers.push(Modifier::Public);
        if self.definition_mode() {
            decl.body = Some(Block::multiline(vec![]));
        } else if let Some(outer) = self.outer_instance_type(class, false) {
            decl.parameters.push(ParameterDecl::new(synthetic_parameter_name(0, 1), outer));
        }
        decl
    }
}

fn foreign_name(original: &str) -> Annotation {
    Annotation::new(FOREIGN_NAME_ANNOTATION).with_argument(Expression::Literal(Literal::Str(original.to_string())))
}

fn unique_name(base: String, renamed: bool, taken: impl Fn(&str) -> bool) -> EmittedName {
    if !taken(&base) {
        return EmittedName { name: base, renamed };
    }
    let raw = base.trim_matches('`');
    let name = (1..)
        .map(|n| format!("{raw}_{n}"))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| format!("{raw}_"));
    EmittedName { name, renamed: true }
}
