//! Serialized form of a symbol universe.
//!
//! ```json
//! { "classes": [
//!     { "name": "a.Foo", "kind": "class", "modifiers": ["public"],
//!       "superclass": "a.Base", "interfaces": ["a.I"],
//!       "members": [
//!         { "kind": "constructor", "modifiers": ["public"], "parameters": [{ "type": "int" }] },
//!         { "kind": "method", "name": "run", "modifiers": ["public"], "returns": "void" },
//!         { "kind": "field", "name": "SIZE", "modifiers": ["public", "static"], "type": "int" }
//!       ] } ] }
//! ```

use crate::model::{ClassKind, JavaType, Modifier};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UniverseSchema {
    #[serde(default)]
    pub classes: Vec<ClassSchema>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSchema {
    pub name: String,
    #[serde(default)]
    pub kind: ClassKind,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    /// Binary name of the lexically enclosing class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enclosing: Option<String>,
    /// Constructors take a hidden enclosing-instance argument.
    #[serde(default)]
    pub outer_instance: bool,
    #[serde(default)]
    pub members: Vec<MemberSchema>,
}

impl ClassSchema {
    pub fn new(name: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            name: name.into(),
            kind,
            modifiers: Vec::new(),
            superclass: None,
            interfaces: Vec::new(),
            enclosing: None,
            outer_instance: false,
            members: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MemberSchema {
    Method(MethodSchema),
    Constructor(ConstructorSchema),
    Field(FieldSchema),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodSchema {
    pub name: String,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub parameters: Vec<ParameterSchema>,
    #[serde(default = "void")]
    pub returns: JavaType,
    #[serde(default)]
    pub annotations: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConstructorSchema {
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub parameters: Vec<ParameterSchema>,
    #[serde(default)]
    pub annotations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSchema {
    pub name: String,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(rename = "type")]
    pub ty: JavaType,
    #[serde(default)]
    pub annotations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub ty: JavaType,
    #[serde(default)]
    pub annotations: Vec<String>,
}

fn void() -> JavaType {
    JavaType::Void
}
