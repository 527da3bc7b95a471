//! Override-set tables: the generation-time half of the override mask.
//!
//! A table fixes, for one base class, which virtual methods a subclass
//! may override and the bit each one occupies in a 64-bit mask.

use crate::config::OverrideSetRequest;
use crate::error::{MirrorError, Result};
use mirrorgen_java::{ClassId, JavaType, MethodId, SymbolProvider};
use tracing::debug;

pub const MAX_OVERRIDE_SET_SIZE: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideSlot {
    pub bit: u32,
    pub method: MethodId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideSet {
    pub base: ClassId,
    pub slots: Vec<OverrideSlot>,
}

impl OverrideSet {
    /// Resolve every requested method against the base class's own
    /// declarations, in request order.
    pub fn resolve(symbols: &dyn SymbolProvider, request: &OverrideSetRequest) -> Result<Self> {
        let base = symbols
            .find_class(&request.class)
            .ok_or_else(|| MirrorError::UnknownRoot(request.class.clone()))?;
        if symbols.is_interface(base) {
            return Err(MirrorError::InterfaceNotAllowed(request.class.clone()));
        }
        if request.methods.len() > MAX_OVERRIDE_SET_SIZE {
            return Err(MirrorError::OverrideSetTooLarge(request.class.clone()));
        }

        let mut slots = Vec::with_capacity(request.methods.len());
        for (bit, wanted) in request.methods.iter().enumerate() {
            let parameters = wanted
                .parameters
                .iter()
                .map(|p| JavaType::parse(p))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            let method = find_declared_method(symbols, base, &wanted.name, &parameters).ok_or_else(|| {
                MirrorError::MissingOverrideMember {
                    class: request.class.clone(),
                    method: wanted.name.clone(),
                    params: wanted.parameters.join(", "),
                }
            })?;
            slots.push(OverrideSlot { bit: bit as u32, method });
        }

        debug!("Override set for {} has {} slots", request.class, slots.len());
        Ok(Self { base, slots })
    }

    /// Bits set for every slot method that `class`, or a class between it
    /// and the base, redeclares. The base class itself has an empty mask.
    pub fn mask_for(&self, symbols: &dyn SymbolProvider, class: ClassId) -> Result<u64> {
        if class == self.base {
            return Ok(0);
        }
        if !symbols.is_subclass(class, self.base) {
            return Err(MirrorError::Config(format!(
                "class {} should inherit {}",
                symbols.class(class).name,
                symbols.class(self.base).name
            )));
        }

        let mut mask = 0u64;
        let mut current = Some(class);
        while let Some(c) = current.filter(|c| *c != self.base) {
            for slot in &self.slots {
                let declared = symbols.method(slot.method);
                let parameters: Vec<JavaType> = declared.parameter_types().cloned().collect();
                if find_declared_method(symbols, c, &declared.name, &parameters).is_some() {
                    mask |= 1u64 << slot.bit;
                }
            }
            current = symbols.class(c).superclass;
        }
        Ok(mask)
    }
}

fn find_declared_method(
    symbols: &dyn SymbolProvider,
    class: ClassId,
    name: &str,
    parameters: &[JavaType],
) -> Option<MethodId> {
    symbols
        .methods_named(class, name)
        .into_iter()
        .find(|m| symbols.method(*m).parameter_types().eq(parameters.iter()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OverrideMethodRequest;
    use mirrorgen_java::{ClassProvider, MemberProvider, UniverseBuilder};

    fn request(class: &str, methods: &[(&str, &[&str])]) -> OverrideSetRequest {
        OverrideSetRequest {
            class: class.to_string(),
            methods: methods
                .iter()
                .map(|(name, params)| OverrideMethodRequest {
                    name: name.to_string(),
                    parameters: params.iter().map(|p| p.to_string()).collect(),
                })
                .collect(),
        }
    }

    fn universe() -> mirrorgen_java::Universe {
        UniverseBuilder::new()
            .class("p.Base", |c| {
                c.public()
                    .method("run", "void", |m| m.public())
                    .method("size", "int", |m| m.public().param("java.lang.String"))
                    .method("close", "void", |m| m.public())
            })
            .class("p.Mid", |c| c.public().extends("p.Base").method("close", "void", |m| m.public()))
            .class("p.Leaf", |c| {
                c.public()
                    .extends("p.Mid")
                    .method("size", "int", |m| m.public().param("java.lang.String"))
            })
            .interface("p.Api", |c| c.public())
            .build()
            .unwrap()
    }

    #[test]
    fn slots_follow_request_order() {
        let u = universe();
        let set = OverrideSet::resolve(&u, &request("p.Base", &[("size", &["java.lang.String"]), ("run", &[])]))
            .unwrap();
        let names: Vec<_> = set.slots.iter().map(|s| (s.bit, u.method(s.method).name.as_str())).collect();
        assert_eq!(names, vec![(0, "size"), (1, "run")]);
    }

    #[test]
    fn configuration_errors_are_reported() {
        let u = universe();
        assert!(matches!(
            OverrideSet::resolve(&u, &request("p.Missing", &[])),
            Err(MirrorError::UnknownRoot(_))
        ));
        assert!(matches!(
            OverrideSet::resolve(&u, &request("p.Api", &[])),
            Err(MirrorError::InterfaceNotAllowed(_))
        ));
        assert!(matches!(
            OverrideSet::resolve(&u, &request("p.Base", &[("size", &["int"])])),
            Err(MirrorError::MissingOverrideMember { .. })
        ));
    }

    #[test]
    fn mask_accumulates_up_to_the_base() {
        let u = universe();
        let set = OverrideSet::resolve(
            &u,
            &request("p.Base", &[("run", &[]), ("size", &["java.lang.String"]), ("close", &[])]),
        )
        .unwrap();
        let base = u.find_class("p.Base").unwrap();
        let mid = u.find_class("p.Mid").unwrap();
        let leaf = u.find_class("p.Leaf").unwrap();
        assert_eq!(set.mask_for(&u, base).unwrap(), 0);
        assert_eq!(set.mask_for(&u, mid).unwrap(), 0b100);
        assert_eq!(set.mask_for(&u, leaf).unwrap(), 0b110);
    }
}
