//! Interface default-method resolution per class.

use super::overrides::OverrideResolver;
use super::visibility::is_class_generated;
use indexmap::IndexSet;
use mirrorgen_java::{ClassId, MethodId, SymbolProvider};
use std::collections::HashSet;

#[derive(Clone, Copy)]
pub struct DefaultMethodMerger<'a> {
    symbols: &'a dyn SymbolProvider,
    resolver: OverrideResolver<'a>,
}

impl<'a> DefaultMethodMerger<'a> {
    pub fn new(resolver: OverrideResolver<'a>) -> Self {
        Self {
            symbols: resolver.symbols(),
            resolver,
        }
    }

    /// True when an already collected method of a mirrored interface is
    /// overridden by `candidate`.
    fn is_shadowed(&self, candidate: MethodId, collected: &[MethodId]) -> bool {
        collected.iter().any(|existing| {
            self.resolver.overrides_with_filter(candidate, *existing)
                && is_class_generated(self.symbols, self.symbols.method(*existing).owner)
        })
    }

    /// Default and static methods visible on `interface`, inherited ones
    /// first, skipping any that an already collected method shadows.
    pub fn effective_default_methods(&self, interface: ClassId) -> Vec<MethodId> {
        let mut result: Vec<MethodId> = Vec::new();

        for parent in self.symbols.direct_interfaces(interface) {
            for method in self.effective_default_methods(parent) {
                if !self.is_shadowed(method, &result) {
                    result.push(method);
                }
            }
        }

        for method in self.symbols.declared_methods(interface) {
            if result.contains(&method) || self.is_shadowed(method, &result) {
                continue;
            }
            let model = self.symbols.method(method);
            if model.is_default() || model.is_static() {
                result.push(method);
            }
        }

        result
    }

    /// Default methods a class must declare itself: those reachable through
    /// its direct interfaces that no member of the class overrides, one per
    /// erased signature, minus any an ancestor class already declares.
    pub fn merged_default_methods(&self, class: ClassId) -> Vec<MethodId> {
        let mut result: Vec<MethodId> = Vec::new();

        for interface in self.symbols.direct_interfaces(class) {
            for method in self.effective_default_methods(interface) {
                let model = self.symbols.method(method);
                if !model.is_default() {
                    continue;
                }
                if self.resolver.is_method_overridden_in_class(class, method) {
                    continue;
                }
                let duplicate = result.iter().any(|existing| {
                    let existing = self.symbols.method(*existing);
                    existing.name == model.name && existing.has_same_args(model)
                });
                if !duplicate {
                    result.push(method);
                }
            }
        }

        if result.is_empty() {
            return result;
        }

        for ancestor in self.symbols.closure(class) {
            if ancestor == class
                || self.symbols.is_interface(ancestor)
                || !is_class_generated(self.symbols, ancestor)
            {
                continue;
            }
            let inherited = self.merged_default_methods(ancestor);
            if inherited.is_empty() {
                continue;
            }
            result.retain(|child| {
                !inherited
                    .iter()
                    .any(|base| self.resolver.overrides_with_filter(*child, *base))
            });
        }

        result
    }

    /// Default methods reachable through at least two direct interfaces of
    /// `class` at once and not overridden by the class.
    pub fn diamond_default_methods(&self, class: ClassId) -> IndexSet<MethodId> {
        let mut result = IndexSet::new();
        let mut visited = HashSet::new();
        let interfaces = self.symbols.direct_interfaces(class);

        for (i, left) in interfaces.iter().enumerate() {
            let left_methods = self.effective_default_methods(*left);
            for method in left_methods {
                if self.resolver.is_method_overridden_in_class(class, method) {
                    continue;
                }
                if self.symbols.method(method).is_synthetic() {
                    continue;
                }
                let shared = interfaces.iter().enumerate().any(|(j, right)| {
                    j != i
                        && right != left
                        && !visited.contains(right)
                        && self.effective_default_methods(*right).contains(&method)
                });
                if shared {
                    result.insert(method);
                }
            }
            visited.insert(*left);
        }

        result
    }
}
