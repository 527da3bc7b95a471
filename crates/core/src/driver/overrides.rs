//! Override relation and override chains over the erased hierarchy.

use super::visibility::{has_visible_deps, is_class_generated, is_package_private};
use mirrorgen_java::{ClassId, JavaType, MemberRef, MethodId, SymbolProvider};
use std::collections::VecDeque;

/// One inheritance path from a class up to a root definition, closest
/// level first. Each level holds the methods declared there that the
/// subject method overrides.
pub type OverrideChain = VecDeque<Vec<MethodId>>;

#[derive(Clone, Copy)]
pub struct OverrideResolver<'a> {
    symbols: &'a dyn SymbolProvider,
}

impl<'a> OverrideResolver<'a> {
    pub fn new(symbols: &'a dyn SymbolProvider) -> Self {
        Self { symbols }
    }

    pub fn symbols(&self) -> &'a dyn SymbolProvider {
        self.symbols
    }

    /// Reflexive override test between two methods.
    ///
    /// Constructors and static methods never override. Otherwise `child`
    /// must be declared in a subtype of `parent`'s owner, `parent` must be
    /// overridable from there, the erased parameter lists must match and
    /// the return type must be substitutable.
    pub fn overrides(&self, child: MethodId, parent: MethodId) -> bool {
        if child == parent {
            return true;
        }
        let c = self.symbols.method(child);
        let p = self.symbols.method(parent);
        if c.name != p.name || c.is_constructor() || p.is_constructor() {
            return false;
        }
        if c.is_static() || p.is_static() {
            return false;
        }
        if !self.symbols.is_subclass(c.owner, p.owner) {
            return false;
        }
        if !self.is_overridable_from(parent, c.owner) {
            return false;
        }
        c.has_same_args(p) && self.is_return_substitutable(&c.return_type, &p.return_type)
    }

    /// [`Self::overrides`] restricted to methods whose signatures are visible.
    pub fn overrides_with_filter(&self, child: MethodId, parent: MethodId) -> bool {
        has_visible_deps(self.symbols, MemberRef::Method(child))
            && has_visible_deps(self.symbols, MemberRef::Method(parent))
            && self.overrides(child, parent)
    }

    fn is_overridable_from(&self, method: MethodId, class: ClassId) -> bool {
        let method = self.symbols.method(method);
        if method.has(mirrorgen_java::Modifier::Private) {
            return false;
        }
        if method.is_package_private() {
            return self.symbols.class(method.owner).package() == self.symbols.class(class).package();
        }
        true
    }

    fn is_return_substitutable(&self, child: &JavaType, parent: &JavaType) -> bool {
        if child == parent {
            return true;
        }
        match (child, parent) {
            (JavaType::Void | JavaType::Primitive(_), _) | (_, JavaType::Void | JavaType::Primitive(_)) => {
                false
            }
            (_, JavaType::Class(name)) if self.is_object(name) => true,
            (JavaType::Array(c), JavaType::Array(p)) => {
                !c.is_primitive_or_void() && !p.is_primitive_or_void() && self.is_return_substitutable(c, p)
            }
            (JavaType::Class(c), JavaType::Class(p)) => {
                match (self.symbols.find_class(c), self.symbols.find_class(p)) {
                    (Some(c), Some(p)) => self.symbols.is_subclass(c, p),
                    _ => false,
                }
            }
            _ => false,
        }
    }

    fn is_object(&self, name: &str) -> bool {
        self.symbols.find_class(name) == Some(self.symbols.object_class())
    }

    /// True when `method` overrides a method of `java.lang.Object`.
    pub fn overrides_object_method(&self, method: MethodId) -> bool {
        let name = &self.symbols.method(method).name;
        self.symbols
            .methods_named(self.symbols.object_class(), name)
            .into_iter()
            .any(|object_method| object_method != method && self.overrides(method, object_method))
    }

    /// Methods declared in `class` that `method` overrides.
    fn find_overridden_in(&self, method: MethodId, class: ClassId) -> Vec<MethodId> {
        let name = &self.symbols.method(method).name;
        self.symbols
            .methods_named(class, name)
            .into_iter()
            .filter(|candidate| self.overrides(method, *candidate))
            .collect()
    }

    /// Every path from `class` to a root definition of `method`.
    ///
    /// Empty only when neither `class` nor any of its ancestors declares a
    /// method that `method` overrides.
    pub fn build_chains(&self, method: MethodId, class: ClassId) -> Vec<OverrideChain> {
        let current = self.find_overridden_in(method, class);
        let subject = match current.as_slice() {
            [single] => *single,
            _ => method,
        };

        let supertypes = self.symbols.direct_supertypes(class);
        let skip_object = self.symbols.is_interface(class) && supertypes.len() != 1;
        let object = self.symbols.object_class();

        let mut chains = Vec::new();
        for supertype in supertypes {
            if skip_object && supertype == object {
                continue;
            }
            chains.extend(self.build_chains(subject, supertype));
        }

        if !current.is_empty() {
            if chains.is_empty() {
                chains.push(OverrideChain::new());
            }
            for chain in &mut chains {
                chain.push_front(current.clone());
            }
        }
        chains
    }

    /// A root definition of `method`, preferring one whose owner and
    /// signature are visible. Falls back to `method` itself.
    pub fn find_root_method(&self, method: MethodId, class: ClassId) -> MethodId {
        for chain in self.build_chains(method, class) {
            let Some(last) = chain.back() else { continue };
            let eligible = last.iter().copied().find(|root| {
                has_visible_deps(self.symbols, MemberRef::Method(*root))
                    && is_class_generated(self.symbols, self.symbols.method(*root).owner)
            });
            if let Some(root) = eligible {
                return root;
            }
        }
        method
    }

    /// Any root definition of `method`, ignoring visibility.
    pub fn find_any_root_method(&self, method: MethodId, class: ClassId) -> MethodId {
        self.build_chains(method, class)
            .first()
            .and_then(|chain| chain.back())
            .and_then(|level| level.first())
            .copied()
            .unwrap_or(method)
    }

    /// True when a concrete, visible implementation exists anywhere in
    /// `method`'s own override chains. Bridges do not count.
    pub fn overrides_non_abstract_method(&self, method: MethodId) -> bool {
        let owner = self.symbols.method(method).owner;
        self.build_chains(method, owner).iter().any(|chain| {
            chain.iter().flatten().any(|candidate| {
                let candidate = self.symbols.method(*candidate);
                !candidate.is_bridge()
                    && !candidate.is_abstract()
                    && is_class_generated(self.symbols, candidate.owner)
            })
        })
    }

    /// Some method declared in `class` overrides `method`.
    pub fn is_method_overridden_in_class(&self, class: ClassId, method: MethodId) -> bool {
        let name = &self.symbols.method(method).name;
        self.symbols
            .methods_named(class, name)
            .into_iter()
            .any(|child| self.overrides_with_filter(child, method))
    }

    /// Walks the same-named methods of `scope`, moving to each one that
    /// the current result overrides.
    pub fn implementation_of_super(&self, method: MethodId, scope: ClassId) -> MethodId {
        let name = &self.symbols.method(method).name;
        let mut result = method;
        for candidate in self.symbols.methods_named(scope, name) {
            if candidate != result && self.overrides_with_filter(result, candidate) {
                result = candidate;
            }
        }
        result
    }

    /// The implementation of `method` seen from `origin`: the first
    /// overrider found walking the superclass chain, preferring a concrete
    /// one within each class.
    pub fn implementation(&self, method: MethodId, origin: ClassId) -> Option<MethodId> {
        let name = &self.symbols.method(method).name;
        let mut current = Some(origin);
        while let Some(class) = current {
            let mut best = None;
            for candidate in self.symbols.methods_named(class, name) {
                if self.overrides(candidate, method) {
                    best = Some(candidate);
                    if !self.symbols.method(candidate).is_abstract() {
                        break;
                    }
                }
            }
            if best.is_some() {
                return best;
            }
            current = self.superclass_of(class);
        }
        None
    }

    fn superclass_of(&self, class: ClassId) -> Option<ClassId> {
        let model = self.symbols.class(class);
        if model.is_interface() {
            let object = self.symbols.object_class();
            (class != object).then_some(object)
        } else {
            model.superclass
        }
    }

    /// True when no class or default method seen from `class` implements
    /// the abstract `method`.
    pub fn is_still_unimplemented(&self, method: MethodId, class: ClassId) -> bool {
        let implemented = self
            .implementation(method, class)
            .filter(|found| *found != method)
            .or_else(|| self.default_candidate(method, class));
        implemented.is_none()
    }

    /// A default method in the closure of `class` that implements `method`.
    fn default_candidate(&self, method: MethodId, class: ClassId) -> Option<MethodId> {
        let name = &self.symbols.method(method).name;
        self.symbols
            .closure(class)
            .into_iter()
            .filter(|ancestor| self.symbols.is_interface(*ancestor))
            .flat_map(|ancestor| self.symbols.methods_named(ancestor, name))
            .find(|candidate| {
                *candidate != method
                    && self.symbols.method(*candidate).is_default()
                    && self.overrides_with_filter(*candidate, method)
            })
    }

    fn is_renamed_in_chain(&self, method: MethodId, chain: &OverrideChain, in_interface: bool) -> bool {
        if in_interface && chain.len() >= 2 {
            let object = self.symbols.object_class();
            let mut levels = chain.iter().rev();
            if let (Some(last), Some(before_last)) = (levels.next(), levels.next()) {
                let object_root = last.iter().any(|root| self.symbols.method(*root).owner == object);
                let interface_member = before_last.iter().any(|candidate| {
                    *candidate == method && self.symbols.is_interface(self.symbols.method(*candidate).owner)
                });
                if object_root && interface_member {
                    return true;
                }
            }
        }

        chain.back().is_some_and(|roots| {
            roots.iter().any(|root| {
                *root == method
                    && is_class_generated(self.symbols, self.symbols.method(*root).owner)
                    && has_visible_deps(self.symbols, MemberRef::Method(*root))
            })
        })
    }

    /// True when `method` is the root definition as seen from `class`, so a
    /// foreign-name annotation belongs on it there.
    pub fn is_renamed_in_this_class(&self, class: ClassId, method: MethodId) -> bool {
        let in_interface = self.symbols.is_interface(class);
        self.build_chains(method, class)
            .iter()
            .any(|chain| self.is_renamed_in_chain(method, chain, in_interface))
    }

    /// Follows `method` through the closure of `class` and reports whether
    /// its final implementation lives in a package-private class.
    pub fn is_package_private_overridden(&self, method: MethodId, class: ClassId) -> bool {
        let result = self
            .symbols
            .closure(class)
            .into_iter()
            .fold(method, |result, scope| self.implementation_of_super(result, scope));
        is_package_private(self.symbols, self.symbols.method(result).owner)
    }
}
