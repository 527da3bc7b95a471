use serde::{Deserialize, Serialize};

/// Stable identity of a class record inside a [`crate::Universe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MethodId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldId(pub u32);

impl ClassId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl MethodId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl FieldId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A declared member of a class, usable as a map or set key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum MemberRef {
    Method(MethodId),
    Field(FieldId),
}

impl MemberRef {
    pub fn as_method(self) -> Option<MethodId> {
        match self {
            MemberRef::Method(id) => Some(id),
            MemberRef::Field(_) => None,
        }
    }

    pub fn as_field(self) -> Option<FieldId> {
        match self {
            MemberRef::Field(id) => Some(id),
            MemberRef::Method(_) => None,
        }
    }
}

impl From<MethodId> for MemberRef {
    fn from(id: MethodId) -> Self {
        MemberRef::Method(id)
    }
}

impl From<FieldId> for MemberRef {
    fn from(id: FieldId) -> Self {
        MemberRef::Field(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    Annotation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Abstract,
    Final,
    Static,
    Default,
    Bridge,
    Synthetic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
}

/// An erased Java type. Class types carry the binary name (`a.b.Outer$Inner`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum JavaType {
    Void,
    Primitive(PrimitiveType),
    Class(String),
    Array(Box<JavaType>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: Option<String>,
    pub ty: JavaType,
    pub annotations: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ClassModel {
    pub id: ClassId,
    /// Binary name, e.g. `java.util.Map$Entry`.
    pub name: String,
    /// Declared simple name, e.g. `Entry`.
    pub simple_name: String,
    pub kind: ClassKind,
    pub modifiers: Vec<Modifier>,
    pub superclass: Option<ClassId>,
    pub interfaces: Vec<ClassId>,
    pub enclosing: Option<ClassId>,
    pub has_outer_instance: bool,
    /// Members in declaration order.
    pub members: Vec<MemberRef>,
}

impl ClassModel {
    pub fn has(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    pub fn is_interface(&self) -> bool {
        matches!(self.kind, ClassKind::Interface | ClassKind::Annotation)
    }

    pub fn is_abstract(&self) -> bool {
        self.is_interface() || self.has(Modifier::Abstract)
    }

    pub fn is_final(&self) -> bool {
        self.has(Modifier::Final)
    }

    pub fn is_static(&self) -> bool {
        self.has(Modifier::Static)
    }

    /// Neither public, protected nor private.
    pub fn is_package_private(&self) -> bool {
        !self.has(Modifier::Public) && !self.has(Modifier::Protected) && !self.has(Modifier::Private)
    }

    /// Package part of the binary name; empty for the unnamed package.
    pub fn package(&self) -> &str {
        self.name.rfind('.').map(|pos| &self.name[..pos]).unwrap_or("")
    }

    /// Binary name without the package, e.g. `Map$Entry`.
    pub fn flat_name(&self) -> &str {
        self.name
            .rfind('.')
            .map(|pos| &self.name[pos + 1..])
            .unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone)]
pub struct MethodModel {
    pub id: MethodId,
    pub owner: ClassId,
    /// `<init>` for constructors.
    pub name: String,
    pub modifiers: Vec<Modifier>,
    pub parameters: Vec<Parameter>,
    /// `Void` for constructors.
    pub return_type: JavaType,
    pub annotations: Vec<String>,
}

pub const CONSTRUCTOR_NAME: &str = "<init>";

impl MethodModel {
    pub fn has(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR_NAME
    }

    pub fn is_static(&self) -> bool {
        self.has(Modifier::Static)
    }

    pub fn is_abstract(&self) -> bool {
        self.has(Modifier::Abstract)
    }

    pub fn is_default(&self) -> bool {
        self.has(Modifier::Default)
    }

    pub fn is_bridge(&self) -> bool {
        self.has(Modifier::Bridge)
    }

    pub fn is_synthetic(&self) -> bool {
        self.has(Modifier::Synthetic)
    }

    pub fn is_package_private(&self) -> bool {
        !self.has(Modifier::Public) && !self.has(Modifier::Protected) && !self.has(Modifier::Private)
    }

    pub fn parameter_types(&self) -> impl Iterator<Item = &JavaType> {
        self.parameters.iter().map(|p| &p.ty)
    }

    /// Same erased parameter list as `other`.
    pub fn has_same_args(&self, other: &MethodModel) -> bool {
        self.parameters.len() == other.parameters.len()
            && self.parameter_types().eq(other.parameter_types())
    }
}

#[derive(Debug, Clone)]
pub struct FieldModel {
    pub id: FieldId,
    pub owner: ClassId,
    pub name: String,
    pub modifiers: Vec<Modifier>,
    pub ty: JavaType,
    pub annotations: Vec<String>,
}

impl FieldModel {
    pub fn has(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    pub fn is_static(&self) -> bool {
        self.has(Modifier::Static)
    }

    pub fn is_final(&self) -> bool {
        self.has(Modifier::Final)
    }
}
