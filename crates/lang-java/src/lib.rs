//! Resolved Java symbol model consumed by the mirror generator.
//!
//! Classes, methods and fields live in an arena ([`Universe`]) and are
//! addressed by integer ids. The generator reads them through the
//! [`SymbolProvider`] traits.

pub mod builder;
pub mod error;
pub mod loader;
pub mod model;
pub mod provider;
pub mod schema;
pub mod types;
pub mod universe;

pub use builder::{ClassBuilder, MethodBuilder, UniverseBuilder};
pub use error::{JavaModelError, Result};
pub use loader::{load_universe, parse_universe};
pub use model::{
    ClassId, ClassKind, ClassModel, FieldId, FieldModel, JavaType, MemberRef, MethodId,
    MethodModel, Modifier, Parameter, PrimitiveType,
};
pub use provider::{ClassProvider, HierarchyProvider, MemberProvider, SymbolProvider};
pub use universe::{OBJECT, STRING, Universe};
