//! Member renaming and program-wide class-name mangling.

use super::context::GenerationContext;
use super::hiding::collect_hidden_members;
use super::overrides::OverrideResolver;
use crate::config::GenerationConfig;
use crate::naming::{add_underscores_if_needed, is_std_core_name, mangle_class_name};
use indexmap::{IndexMap, IndexSet};
use mirrorgen_java::{ClassId, JavaType, MemberRef, MethodModel, Modifier, PrimitiveType, STRING, SymbolProvider};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

pub const STATIC_SUFFIX: &str = "Static";
pub const HASH_CODE_RENAME: &str = "hashCode32";
pub const TO_STRING_RENAME: &str = "toJString";

fn is_hash_code(method: &MethodModel) -> bool {
    method.has(Modifier::Public)
        && method.name == "hashCode"
        && method.parameters.is_empty()
        && method.return_type == JavaType::Primitive(PrimitiveType::Int)
}

pub fn is_to_string(method: &MethodModel) -> bool {
    method.has(Modifier::Public)
        && method.name == "toString"
        && method.parameters.is_empty()
        && method.return_type.class_name() == Some(STRING)
        && matches!(method.return_type, JavaType::Class(_))
}

/// Same-named members of `class` and all its ancestors, ancestors first.
fn same_named_in_hierarchy(symbols: &dyn SymbolProvider, name: &str, class: ClassId, out: &mut IndexSet<MemberRef>) {
    for supertype in symbols.direct_supertypes(class) {
        same_named_in_hierarchy(symbols, name, supertype, out);
    }
    out.extend(symbols.members_named(class, name));
}

/// Records renames for every name of `class` that clashes across its
/// ancestor-plus-self member set.
///
/// * Two or more same-named fields each become `name_Owner`.
/// * Public `hashCode()`/`toString()` get fixed replacement names.
/// * A method group that is not purely instance methods renames its
///   static members with a `Static` suffix, plus the mangled return type
///   when a static method hides one with a different return type.
pub fn rename_clashes(ctx: &mut GenerationContext<'_>, class: ClassId) {
    let symbols = ctx.symbols;
    let resolver = OverrideResolver::new(symbols);

    let mut groups: IndexMap<&str, IndexSet<MemberRef>> = IndexMap::new();
    for member in symbols.class(class).members.iter().copied() {
        if member.as_method().is_some_and(|m| symbols.method(m).is_constructor()) {
            continue;
        }
        let name = symbols.member_name(member);
        if groups.contains_key(name) {
            continue;
        }
        let mut group = IndexSet::new();
        same_named_in_hierarchy(symbols, name, class, &mut group);
        groups.insert(name, group);
    }

    for (name, group) in groups {
        let fields: Vec<MemberRef> = group.iter().copied().filter(|m| m.as_field().is_some()).collect();
        if fields.len() > 1 {
            for field in fields {
                let owner = symbols.class(symbols.member_owner(field));
                let renamed = format!(
                    "{}_{}",
                    add_underscores_if_needed(name),
                    add_underscores_if_needed(&owner.simple_name)
                );
                debug!("Renaming field {}.{} to {}", owner.name, name, renamed);
                ctx.set_rename(field, renamed);
            }
        }

        let methods: Vec<MemberRef> = group
            .iter()
            .copied()
            .filter(|m| m.as_method().is_some_and(|id| !symbols.method(id).is_constructor()))
            .collect();

        for member in &methods {
            let Some(id) = member.as_method() else { continue };
            let method = symbols.method(id);
            if is_hash_code(method) {
                ctx.set_rename(*member, HASH_CODE_RENAME.to_string());
            } else if is_to_string(method) {
                ctx.set_rename(*member, TO_STRING_RENAME.to_string());
            }
        }

        if methods.len() <= 1 {
            continue;
        }
        let all_instance = methods.iter().all(|m| !symbols.member_is_static(*m));
        if all_instance {
            continue;
        }
        let all_static = methods.iter().all(|m| symbols.member_is_static(*m));
        let static_name = format!("{name}{STATIC_SUFFIX}");

        for member in methods {
            let Some(id) = member.as_method() else { continue };
            let method = symbols.method(id);
            if !method.is_static() {
                continue;
            }

            let mangle_static = !all_static
                || ctx.rename_of(member).is_some_and(|existing| existing.starts_with(&static_name));
            if mangle_static {
                ctx.set_rename(member, static_name.clone());
            }

            let conflicting_return = collect_hidden_members(&resolver, member).iter().any(|hidden| {
                hidden
                    .as_method()
                    .is_some_and(|h| symbols.method(h).return_type != method.return_type)
            });
            if !conflicting_return {
                continue;
            }
            let JavaType::Class(return_class) = &method.return_type else {
                continue;
            };

            let suffix = mangle_class_name(return_class);
            let renamed = if mangle_static {
                format!("{static_name}_{suffix}")
            } else {
                format!("{name}_{suffix}")
            };
            debug!(
                "Renaming static {}.{} hiding an incompatible return type to {}",
                symbols.class(method.owner).name,
                name,
                renamed
            );
            ctx.set_rename(member, renamed);
        }
    }
}

/// Classes that must be emitted under their flattened binary name.
///
/// Only applies when every mirror shares one package. A simple name is
/// mangled when several classes share it, when it differs from another
/// only by case, or when the mirror language's core library declares it.
pub fn compute_mangle_set(
    symbols: &dyn SymbolProvider,
    visited: &IndexSet<ClassId>,
    config: &GenerationConfig,
) -> HashSet<ClassId> {
    let mut mangled = HashSet::new();
    if !config.one_package {
        return mangled;
    }

    let object = symbols.object_class();
    let string = symbols.string_class();
    let mut groups: IndexMap<&str, Vec<ClassId>> = IndexMap::new();
    for class in visited.iter().copied() {
        if class == object || class == string {
            continue;
        }
        groups.entry(symbols.class(class).flat_name()).or_default().push(class);
    }

    let mut case_folded: HashMap<String, usize> = HashMap::new();
    for key in groups.keys() {
        *case_folded.entry(key.to_lowercase()).or_default() += 1;
    }

    for (name, classes) in &groups {
        let case_clash = case_folded.get(&name.to_lowercase()).copied().unwrap_or(0) > 1;
        if classes.len() > 1 || case_clash || is_std_core_name(name) {
            warn!("Clashing class name is `{}`", name);
            mangled.extend(classes.iter().copied());
        }
    }
    mangled
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirrorgen_java::{ClassProvider, UniverseBuilder};

    #[test]
    fn only_one_package_mode_mangles() {
        let universe = UniverseBuilder::new()
            .class("a.Widget", |c| c.public())
            .class("b.Widget", |c| c.public())
            .build()
            .unwrap();
        let visited: IndexSet<ClassId> = ["a.Widget", "b.Widget"]
            .iter()
            .filter_map(|n| universe.find_class(n))
            .collect();

        let config = GenerationConfig::default();
        assert!(compute_mangle_set(&universe, &visited, &config).is_empty());

        let config = GenerationConfig {
            one_package: true,
            ..GenerationConfig::default()
        };
        assert_eq!(compute_mangle_set(&universe, &visited, &config).len(), 2);
    }

    #[test]
    fn case_and_core_library_clashes_are_mangled() {
        let universe = UniverseBuilder::new()
            .class("a.Reader", |c| c.public())
            .class("b.READER", |c| c.public())
            .class("c.Option", |c| c.public())
            .class("d.Plain", |c| c.public())
            .build()
            .unwrap();
        let visited: IndexSet<ClassId> = universe
            .classes()
            .filter(|c| !c.name.starts_with("java."))
            .map(|c| c.id)
            .collect();
        let config = GenerationConfig {
            one_package: true,
            ..GenerationConfig::default()
        };
        let mangled = compute_mangle_set(&universe, &visited, &config);
        let names: HashSet<&str> = mangled.iter().map(|c| universe.class(*c).name.as_str()).collect();
        assert_eq!(names, HashSet::from(["a.Reader", "b.READER", "c.Option"]));
    }
}
