//! Java erased types to mirror-language type names.

use super::context::GenerationContext;
use crate::naming::{QualifiedName, add_backticks_if_needed, add_underscores_if_needed};
use crate::tree::{Expression, Literal, Name};
use mirrorgen_java::{ClassId, JavaType, PrimitiveType, SymbolProvider};

/// Annotations that mark a parameter, return value or field as never null.
pub const NOT_NULL_ANNOTATIONS: &[&str] = &[
    "android.support.annotation.NonNull",
    "androidx.annotation.NonNull",
    "androidx.annotation.RecentlyNonNull",
    "com.android.annotations.NonNull",
    "edu.umd.cs.findbugs.annotations.NonNull",
    "jakarta.annotation.Nonnull",
    "javax.annotation.Nonnull",
    "lombok.NonNull",
    "org.checkerframework.checker.nullness.compatqual.NonNullDecl",
    "org.checkerframework.checker.nullness.compatqual.NonNullType",
    "org.checkerframework.checker.nullness.qual.NonNull",
    "org.eclipse.jdt.annotation.NonNull",
    "org.jetbrains.annotations.NotNull",
    "org.jspecify.annotations.NonNull",
];

pub fn has_not_null_annotation(annotations: &[String]) -> bool {
    annotations
        .iter()
        .any(|annotation| NOT_NULL_ANNOTATIONS.contains(&annotation.as_str()))
}

pub const JOBJECT: &str = "JObject";
pub const JSTRING: &str = "JString";
pub const JARRAY: &str = "JArray";
const JAVA_LANG: &str = "java.lang";

fn java_lang(identifier: &str) -> Option<QualifiedName> {
    QualifiedName::split(&format!("{JAVA_LANG}.{identifier}")).ok()
}

fn primitive_name(primitive: PrimitiveType) -> &'static str {
    match primitive {
        PrimitiveType::Boolean => "Bool",
        PrimitiveType::Byte => "Int8",
        PrimitiveType::Short => "Int16",
        PrimitiveType::Int => "Int32",
        PrimitiveType::Long => "Int64",
        PrimitiveType::Char => "UInt16",
        PrimitiveType::Float => "Float32",
        PrimitiveType::Double => "Float64",
    }
}

/// Maps erased Java types to names, resolving mangled and imported classes.
pub struct TypeMapper<'c, 'a> {
    ctx: &'c GenerationContext<'a>,
}

impl<'c, 'a> TypeMapper<'c, 'a> {
    pub fn new(ctx: &'c GenerationContext<'a>) -> Self {
        Self { ctx }
    }

    /// The mirror type for `ty`. Reference types are optional unless
    /// `not_null` is set.
    pub fn name(&self, ty: &JavaType, not_null: bool) -> Name {
        let name = self.nullable_name(ty);
        if not_null { name.unwrap_option() } else { name }
    }

    fn nullable_name(&self, ty: &JavaType) -> Name {
        match ty {
            JavaType::Void => Name::ident("Unit"),
            JavaType::Primitive(primitive) => Name::ident(primitive_name(*primitive)),
            JavaType::Array(element) => {
                let mut array = Name::option(Name::generic(JARRAY, vec![self.nullable_name(element)]));
                if let Some(import) = java_lang(JARRAY) {
                    array = array.with_import(import);
                }
                array
            }
            JavaType::Class(binary_name) => Name::option(self.class_name(binary_name)),
        }
    }

    /// The identifier a class is referenced by, with the import it needs.
    fn class_name(&self, binary_name: &str) -> Name {
        let symbols = self.ctx.symbols;
        let class = symbols.find_class(binary_name);

        if class == Some(symbols.object_class()) {
            return with_optional_import(Name::ident(JOBJECT), java_lang(JOBJECT));
        }
        if class == Some(symbols.string_class()) {
            return with_optional_import(Name::ident(JSTRING), java_lang(JSTRING));
        }

        if let Some(mapped) = self.ctx.config.import_renames.get(binary_name) {
            let simple = mapped.rsplit('.').next().unwrap_or(mapped);
            let import = QualifiedName::parse(mapped).filter(|q| q.package_segments().is_some());
            return with_optional_import(Name::ident(add_underscores_if_needed(simple)), import);
        }

        match class {
            Some(id) => {
                let identifier = self.ctx.class_identifier(id);
                let import = self.class_import(id, &identifier);
                with_optional_import(Name::ident(identifier), import)
            }
            None => {
                let flat = binary_name.rsplit('.').next().unwrap_or(binary_name);
                Name::ident(add_backticks_if_needed(flat))
            }
        }
    }

    /// Mirrors spread across Java packages import each other by package.
    fn class_import(&self, class: ClassId, identifier: &str) -> Option<QualifiedName> {
        if self.ctx.config.one_package {
            return None;
        }
        let package = self.ctx.symbols.class(class).package();
        if package.is_empty() {
            return None;
        }
        QualifiedName::split(package).ok()?.member(identifier).ok()
    }
}

fn with_optional_import(name: Name, import: Option<QualifiedName>) -> Name {
    match import {
        Some(import) => name.with_import(import),
        None => name,
    }
}

/// Placeholder value of a type in synthesized bodies.
pub fn default_value(ty: &JavaType) -> Expression {
    match ty {
        JavaType::Primitive(PrimitiveType::Boolean) => Expression::Literal(Literal::Bool(false)),
        JavaType::Primitive(PrimitiveType::Float | PrimitiveType::Double) => {
            Expression::Literal(Literal::Numeric("0.0".into()))
        }
        JavaType::Primitive(_) => Expression::Literal(Literal::Numeric("0".into())),
        _ => Expression::Name(Name::ident("None")),
    }
}

/// Placeholder result of a mirrored `toString()`.
pub fn to_string_default() -> Expression {
    Expression::Name(Name::ident(format!("{JSTRING}()")))
}

/// Java-facing name of a class: package, then enclosing classes joined by
/// `$`, with any `$` inside a component escaped as `\$`.
pub fn form_type_name(symbols: &dyn SymbolProvider, class: ClassId) -> String {
    let mut components = Vec::new();
    let mut current = Some(class);
    let mut outermost = class;
    while let Some(id) = current {
        components.push(symbols.class(id).simple_name.replace('$', "\\$"));
        outermost = id;
        current = symbols.class(id).enclosing;
    }
    components.reverse();
    let nested = components.join("$");

    let package = symbols.class(outermost).package();
    if package.is_empty() {
        nested
    } else {
        format!("{package}.{nested}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationConfig;
    use crate::emit::Printer;
    use mirrorgen_java::{ClassProvider, UniverseBuilder};

    fn render(name: &Name) -> String {
        Printer.emit(name).text().to_string()
    }

    #[test]
    fn maps_primitives_arrays_and_root_types() {
        let universe = UniverseBuilder::new()
            .class("a.Item", |c| c.public())
            .build()
            .unwrap();
        let config = GenerationConfig::default();
        let ctx = GenerationContext::new(&universe, &config);
        let mapper = TypeMapper::new(&ctx);

        let ty = |s: &str| JavaType::parse(s).unwrap();
        assert_eq!(render(&mapper.name(&ty("char"), false)), "UInt16");
        assert_eq!(render(&mapper.name(&ty("void"), false)), "Unit");
        assert_eq!(render(&mapper.name(&ty("java.lang.Object"), false)), "?JObject");
        assert_eq!(render(&mapper.name(&ty("java.lang.String"), true)), "JString");
        assert_eq!(render(&mapper.name(&ty("int[]"), false)), "?JArray<Int32>");
        assert_eq!(render(&mapper.name(&ty("a.Item[][]"), false)), "?JArray<?JArray<?Item>>");

        let item = mapper.name(&ty("a.Item"), true);
        assert_eq!(render(&item), "Item");
        assert_eq!(item.imports[0].as_str(), "a.Item");
    }

    #[test]
    fn import_renames_replace_the_identifier() {
        let universe = UniverseBuilder::new()
            .class("a.Outer$Inner", |c| c.public())
            .build()
            .unwrap();
        let mut config = GenerationConfig::default();
        config
            .import_renames
            .insert("a.Outer$Inner".into(), "lib.pkg.Outer_Inner".into());
        let ctx = GenerationContext::new(&universe, &config);
        let name = TypeMapper::new(&ctx).name(&JavaType::class("a.Outer$Inner"), false);
        assert_eq!(render(&name), "?Outer_Inner");
        let inner = name.unwrap_option();
        assert_eq!(inner.imports[0].as_str(), "lib.pkg.Outer_Inner");
    }

    #[test]
    fn default_values_follow_the_type() {
        let render_expr = |e: &Expression| Printer.emit(e).text().to_string();
        assert_eq!(render_expr(&default_value(&JavaType::parse("boolean").unwrap())), "false");
        assert_eq!(render_expr(&default_value(&JavaType::parse("long").unwrap())), "0");
        assert_eq!(render_expr(&default_value(&JavaType::parse("float").unwrap())), "0.0");
        assert_eq!(render_expr(&default_value(&JavaType::parse("a.B").unwrap())), "None");
        assert_eq!(render_expr(&to_string_default()), "JString()");
    }

    #[test]
    fn type_names_join_nesting_with_dollar() {
        let universe = UniverseBuilder::new()
            .class("a.b.Outer", |c| c.public())
            .class("a.b.Outer$Inner", |c| c.public().nested_in("a.b.Outer"))
            .class("Top", |c| c.public())
            .build()
            .unwrap();
        let inner = universe.find_class("a.b.Outer$Inner").unwrap();
        assert_eq!(form_type_name(&universe, inner), "a.b.Outer$Inner");
        let top = universe.find_class("Top").unwrap();
        assert_eq!(form_type_name(&universe, top), "Top");
    }
}
