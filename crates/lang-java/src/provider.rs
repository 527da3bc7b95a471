//! Trait definitions for the symbol provider.
//!
//! The mirror generator only reads resolved facts through these traits, so
//! it can run against a loaded [`crate::Universe`] or any other backing store.

use crate::model::{ClassId, ClassModel, FieldId, FieldModel, JavaType, MemberRef, MethodId, MethodModel};

/// Looks up class records.
pub trait ClassProvider: Send + Sync {
    fn class(&self, id: ClassId) -> &ClassModel;

    /// Resolve a binary name (`a.b.Outer$Inner`).
    fn find_class(&self, binary_name: &str) -> Option<ClassId>;

    /// All classes in insertion order.
    fn class_ids(&self) -> Vec<ClassId>;

    /// `java.lang.Object`.
    fn object_class(&self) -> ClassId;

    /// `java.lang.String`.
    fn string_class(&self) -> ClassId;
}

/// Looks up member records.
pub trait MemberProvider: Send + Sync {
    fn method(&self, id: MethodId) -> &MethodModel;

    fn field(&self, id: FieldId) -> &FieldModel;
}

/// Answers questions about the erased supertype graph.
pub trait HierarchyProvider: Send + Sync {
    /// Direct supertypes in declaration order. Interfaces report
    /// `java.lang.Object` first, followed by their super-interfaces.
    fn direct_supertypes(&self, id: ClassId) -> Vec<ClassId>;

    /// The class itself followed by every ancestor, breadth-first.
    fn closure(&self, id: ClassId) -> Vec<ClassId>;

    /// Reflexive subclass test.
    fn is_subclass(&self, sub: ClassId, sup: ClassId) -> bool;
}

/// The combined provider facade with derived lookups.
pub trait SymbolProvider: ClassProvider + MemberProvider + HierarchyProvider {
    fn is_interface(&self, id: ClassId) -> bool {
        self.class(id).is_interface()
    }

    fn member_name(&self, member: MemberRef) -> &str {
        match member {
            MemberRef::Method(id) => &self.method(id).name,
            MemberRef::Field(id) => &self.field(id).name,
        }
    }

    fn member_owner(&self, member: MemberRef) -> ClassId {
        match member {
            MemberRef::Method(id) => self.method(id).owner,
            MemberRef::Field(id) => self.field(id).owner,
        }
    }

    fn member_is_static(&self, member: MemberRef) -> bool {
        match member {
            MemberRef::Method(id) => self.method(id).is_static(),
            MemberRef::Field(id) => self.field(id).is_static(),
        }
    }

    /// Members declared directly in `class` with the given name.
    fn members_named(&self, class: ClassId, name: &str) -> Vec<MemberRef> {
        self.class(class)
            .members
            .iter()
            .copied()
            .filter(|m| self.member_name(*m) == name)
            .collect()
    }

    /// Methods declared directly in `class` with the given name.
    fn methods_named(&self, class: ClassId, name: &str) -> Vec<MethodId> {
        self.members_named(class, name)
            .into_iter()
            .filter_map(MemberRef::as_method)
            .collect()
    }

    fn declared_methods(&self, class: ClassId) -> Vec<MethodId> {
        self.class(class)
            .members
            .iter()
            .filter_map(|m| m.as_method())
            .collect()
    }

    /// Direct interfaces only, without the implicit `java.lang.Object`.
    fn direct_interfaces(&self, class: ClassId) -> Vec<ClassId> {
        self.class(class).interfaces.clone()
    }

    /// Class an erased type refers to, looking through arrays.
    fn erased_class(&self, ty: &JavaType) -> Option<ClassId> {
        ty.class_name().and_then(|name| self.find_class(name))
    }

    /// Erased types referenced by a member's signature.
    fn signature_types(&self, member: MemberRef) -> Vec<&JavaType> {
        match member {
            MemberRef::Method(id) => {
                let method = self.method(id);
                let mut types: Vec<&JavaType> = method.parameter_types().collect();
                if !method.is_constructor() {
                    types.push(&method.return_type);
                }
                types
            }
            MemberRef::Field(id) => vec![&self.field(id).ty],
        }
    }
}

// Blanket implementation: any type implementing all three traits is a SymbolProvider
impl<T: ClassProvider + MemberProvider + HierarchyProvider> SymbolProvider for T {}
