//! Member selection for one class body.

use super::context::GenerationContext;
use super::defaults::DefaultMethodMerger;
use super::overrides::OverrideResolver;
use super::visibility::{has_visible_deps, is_member_generated};
use indexmap::IndexSet;
use mirrorgen_java::{ClassId, MemberRef, MethodId};
use tracing::debug;

/// True when `member` must be dropped because the depth bound cut off
/// part of what it needs.
///
/// An abstract interface method is dropped when some reached concrete
/// class implements the interface without overriding it. At the depth
/// bound, a member is dropped when its signature names an unreached class.
pub fn has_exceeded_max_depth_path(ctx: &GenerationContext<'_>, member: MemberRef, depth: Option<usize>) -> bool {
    if !ctx.is_depth_limited() {
        return false;
    }
    let Some(depth) = depth else {
        return false;
    };
    let symbols = ctx.symbols;
    let resolver = OverrideResolver::new(symbols);

    if let MemberRef::Method(id) = member {
        let method = symbols.method(id);
        if symbols.is_interface(method.owner) && !method.is_default() && !method.is_static() {
            let unimplemented = ctx.reached_classes().any(|class| {
                let model = symbols.class(class);
                !model.is_abstract()
                    && !model.is_interface()
                    && symbols.closure(class).contains(&method.owner)
                    && !resolver.is_method_overridden_in_class(class, id)
            });
            if unimplemented {
                return true;
            }
        }
    }

    if depth == ctx.max_depth() {
        return symbols
            .signature_types(member)
            .into_iter()
            .filter_map(|ty| symbols.erased_class(ty))
            .any(|class| !ctx.is_reached(class));
    }
    false
}

/// Own members of `class` that appear in its mirror, in declaration order.
///
/// Each method is replaced by the method it resolves to: the root
/// definition for static methods, the overridden same-class method for
/// bridges and covariant overrides. Duplicates collapse.
pub fn class_members(ctx: &GenerationContext<'_>, class: ClassId) -> Vec<MemberRef> {
    let symbols = ctx.symbols;
    let resolver = OverrideResolver::new(symbols);
    let model = symbols.class(class);
    let depth = ctx.depth_of(class);
    let in_interface = model.is_interface();

    let mut members = Vec::new();
    let mut visited_methods: IndexSet<MethodId> = IndexSet::new();

    for member in model.members.iter().copied() {
        if !is_member_generated(symbols, member) {
            continue;
        }
        match member {
            MemberRef::Method(id) => {
                if ctx.config.interface_object_workaround
                    && in_interface
                    && resolver.overrides_object_method(id)
                {
                    continue;
                }
                if !has_visible_deps(symbols, member) {
                    continue;
                }

                let method = symbols.method(id);
                let resolved = if method.is_static() {
                    resolver.find_root_method(id, class)
                } else {
                    resolver.implementation_of_super(id, class)
                };

                if method.is_bridge() && resolved == id && resolver.is_package_private_overridden(resolved, class) {
                    visited_methods.insert(resolved);
                    continue;
                }

                if has_exceeded_max_depth_path(ctx, MemberRef::Method(resolved), depth) {
                    continue;
                }
                if !has_visible_deps(symbols, MemberRef::Method(resolved)) {
                    continue;
                }
                if visited_methods.insert(resolved) {
                    members.push(MemberRef::Method(resolved));
                }
            }
            MemberRef::Field(id) => {
                if in_interface && symbols.field(id).is_final() {
                    continue;
                }
                if has_exceeded_max_depth_path(ctx, member, depth) {
                    continue;
                }
                if !has_visible_deps(symbols, member) {
                    continue;
                }
                members.push(member);
            }
        }
    }

    members
}

/// Own members plus the default methods the class must declare: the merged
/// set, then any default inherited through two direct interfaces at once.
/// The latter get a stub even when an ancestor class already declares them.
pub fn body_members(ctx: &GenerationContext<'_>, class: ClassId) -> Vec<MemberRef> {
    let symbols = ctx.symbols;
    let mut members = class_members(ctx, class);
    let depth = ctx.depth_of(class);
    let merger = DefaultMethodMerger::new(OverrideResolver::new(symbols));

    let merged = merger.merged_default_methods(class);
    let diamonds: Vec<MethodId> = merger
        .diamond_default_methods(class)
        .into_iter()
        .filter(|id| {
            let method = symbols.method(*id);
            !method.is_static()
                && !merged.iter().any(|other| {
                    let other = symbols.method(*other);
                    other.name == method.name && other.has_same_args(method)
                })
        })
        .collect();
    if !diamonds.is_empty() {
        debug!(
            "{} inherits {} default method(s) through more than one interface",
            symbols.class(class).name,
            diamonds.len()
        );
    }

    for method in merged.into_iter().chain(diamonds) {
        let member = MemberRef::Method(method);
        if members.contains(&member)
            || !is_member_generated(symbols, member)
            || !has_visible_deps(symbols, member)
            || has_exceeded_max_depth_path(ctx, member, depth)
        {
            continue;
        }
        members.push(member);
    }
    members
}
