//! Which classes and members can appear in a mirror at all.

use mirrorgen_java::{ClassId, JavaType, MemberRef, Modifier, SymbolProvider};

/// Access the mirror language can express.
fn is_public_or_protected(modifiers: &[Modifier]) -> bool {
    modifiers.contains(&Modifier::Public) || modifiers.contains(&Modifier::Protected)
}

/// A class is mirrored only when it is public or protected.
pub fn is_class_generated(symbols: &dyn SymbolProvider, class: ClassId) -> bool {
    is_public_or_protected(&symbols.class(class).modifiers)
}

/// Public or protected, and not compiler-generated unless it is a bridge.
pub fn is_member_generated(symbols: &dyn SymbolProvider, member: MemberRef) -> bool {
    match member {
        MemberRef::Method(id) => {
            let method = symbols.method(id);
            is_public_or_protected(&method.modifiers) && (!method.is_synthetic() || method.is_bridge())
        }
        MemberRef::Field(id) => {
            let field = symbols.field(id);
            is_public_or_protected(&field.modifiers) && !field.has(Modifier::Synthetic)
        }
    }
}

/// True when `ty` names something a mirror can refer to.
pub fn is_type_visible(symbols: &dyn SymbolProvider, ty: &JavaType) -> bool {
    match ty {
        JavaType::Void | JavaType::Primitive(_) => true,
        JavaType::Array(element) => is_type_visible(symbols, element),
        JavaType::Class(name) => match symbols.find_class(name) {
            Some(id) => {
                id == symbols.object_class()
                    || id == symbols.string_class()
                    || is_class_generated(symbols, id)
            }
            None => false,
        },
    }
}

/// Every type in the member's erased signature is visible.
pub fn has_visible_deps(symbols: &dyn SymbolProvider, member: MemberRef) -> bool {
    symbols
        .signature_types(member)
        .into_iter()
        .all(|ty| is_type_visible(symbols, ty))
}

pub fn is_package_private(symbols: &dyn SymbolProvider, class: ClassId) -> bool {
    symbols.class(class).is_package_private()
}
