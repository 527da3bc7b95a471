//! Fluent construction of symbol universes, mostly for tests and embedding.
//!
//! ```
//! use mirrorgen_java::UniverseBuilder;
//!
//! let universe = UniverseBuilder::new()
//!     .interface("a.Greeter", |i| i.public().method("greet", "java.lang.String", |m| m.default_()))
//!     .class("a.Impl", |c| c.public().implements("a.Greeter").constructor(|m| m.public()))
//!     .build()
//!     .unwrap();
//! assert_eq!(universe.len(), 4);
//! ```

use crate::error::Result;
use crate::model::{ClassKind, JavaType, Modifier};
use crate::schema::{
    ClassSchema, ConstructorSchema, FieldSchema, MemberSchema, MethodSchema, ParameterSchema,
    UniverseSchema,
};
use crate::universe::Universe;

/// Builds a [`Universe`] class by class.
#[derive(Default)]
pub struct UniverseBuilder {
    schema: UniverseSchema,
}

impl UniverseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class(self, name: &str, f: impl FnOnce(ClassBuilder) -> ClassBuilder) -> Self {
        self.declare(name, ClassKind::Class, f)
    }

    pub fn interface(self, name: &str, f: impl FnOnce(ClassBuilder) -> ClassBuilder) -> Self {
        self.declare(name, ClassKind::Interface, f)
    }

    pub fn annotation(self, name: &str, f: impl FnOnce(ClassBuilder) -> ClassBuilder) -> Self {
        self.declare(name, ClassKind::Annotation, f)
    }

    fn declare(
        mut self,
        name: &str,
        kind: ClassKind,
        f: impl FnOnce(ClassBuilder) -> ClassBuilder,
    ) -> Self {
        let builder = f(ClassBuilder {
            schema: ClassSchema::new(name, kind),
        });
        self.schema.classes.push(builder.schema);
        self
    }

    pub fn into_schema(self) -> UniverseSchema {
        self.schema
    }

    pub fn build(self) -> Result<Universe> {
        Universe::from_schema(self.schema)
    }
}

pub struct ClassBuilder {
    schema: ClassSchema,
}

impl ClassBuilder {
    pub fn modifier(mut self, modifier: Modifier) -> Self {
        if !self.schema.modifiers.contains(&modifier) {
            self.schema.modifiers.push(modifier);
        }
        self
    }

    pub fn public(self) -> Self {
        self.modifier(Modifier::Public)
    }

    pub fn protected(self) -> Self {
        self.modifier(Modifier::Protected)
    }

    pub fn abstract_(self) -> Self {
        self.modifier(Modifier::Abstract)
    }

    pub fn final_(self) -> Self {
        self.modifier(Modifier::Final)
    }

    pub fn extends(mut self, superclass: &str) -> Self {
        self.schema.superclass = Some(superclass.to_string());
        self
    }

    pub fn implements(mut self, interface: &str) -> Self {
        self.schema.interfaces.push(interface.to_string());
        self
    }

    /// Static nested class of `outer`.
    pub fn nested_in(mut self, outer: &str) -> Self {
        self.schema.enclosing = Some(outer.to_string());
        self.modifier(Modifier::Static)
    }

    /// Inner class of `outer` requiring an enclosing instance.
    pub fn inner_of(mut self, outer: &str) -> Self {
        self.schema.enclosing = Some(outer.to_string());
        self.schema.outer_instance = true;
        self
    }

    pub fn method(
        mut self,
        name: &str,
        returns: &str,
        f: impl FnOnce(MethodBuilder) -> MethodBuilder,
    ) -> Self {
        let builder = f(MethodBuilder::new(returns));
        self.schema.members.push(MemberSchema::Method(MethodSchema {
            name: name.to_string(),
            modifiers: builder.modifiers,
            parameters: builder.parameters,
            returns: builder.returns,
            annotations: builder.annotations,
        }));
        self
    }

    pub fn constructor(mut self, f: impl FnOnce(MethodBuilder) -> MethodBuilder) -> Self {
        let builder = f(MethodBuilder::new("void"));
        self.schema
            .members
            .push(MemberSchema::Constructor(ConstructorSchema {
                modifiers: builder.modifiers,
                parameters: builder.parameters,
                annotations: builder.annotations,
            }));
        self
    }

    pub fn field(mut self, name: &str, ty: &str, modifiers: &[Modifier]) -> Self {
        self.schema.members.push(MemberSchema::Field(FieldSchema {
            name: name.to_string(),
            modifiers: modifiers.to_vec(),
            ty: parse_or_class(ty),
            annotations: vec![],
        }));
        self
    }
}

pub struct MethodBuilder {
    modifiers: Vec<Modifier>,
    parameters: Vec<ParameterSchema>,
    returns: JavaType,
    annotations: Vec<String>,
}

impl MethodBuilder {
    fn new(returns: &str) -> Self {
        Self {
            modifiers: vec![],
            parameters: vec![],
            returns: parse_or_class(returns),
            annotations: vec![],
        }
    }

    pub fn modifier(mut self, modifier: Modifier) -> Self {
        if !self.modifiers.contains(&modifier) {
            self.modifiers.push(modifier);
        }
        self
    }

    pub fn public(self) -> Self {
        self.modifier(Modifier::Public)
    }

    pub fn protected(self) -> Self {
        self.modifier(Modifier::Protected)
    }

    pub fn private(self) -> Self {
        self.modifier(Modifier::Private)
    }

    pub fn abstract_(self) -> Self {
        self.modifier(Modifier::Abstract)
    }

    pub fn static_(self) -> Self {
        self.modifier(Modifier::Static)
    }

    pub fn final_(self) -> Self {
        self.modifier(Modifier::Final)
    }

    pub fn default_(self) -> Self {
        self.modifier(Modifier::Default)
    }

    pub fn bridge(self) -> Self {
        self.modifier(Modifier::Bridge).modifier(Modifier::Synthetic)
    }

    pub fn synthetic(self) -> Self {
        self.modifier(Modifier::Synthetic)
    }

    /// Unnamed parameter, as read from a class file without debug info.
    pub fn param(mut self, ty: &str) -> Self {
        self.parameters.push(ParameterSchema {
            name: None,
            ty: parse_or_class(ty),
            annotations: vec![],
        });
        self
    }

    pub fn named_param(mut self, name: &str, ty: &str) -> Self {
        self.parameters.push(ParameterSchema {
            name: Some(name.to_string()),
            ty: parse_or_class(ty),
            annotations: vec![],
        });
        self
    }

    /// Annotates the most recently added parameter.
    pub fn param_annotation(mut self, annotation: &str) -> Self {
        if let Some(last) = self.parameters.last_mut() {
            last.annotations.push(annotation.to_string());
        }
        self
    }

    pub fn annotation(mut self, annotation: &str) -> Self {
        self.annotations.push(annotation.to_string());
        self
    }
}

fn parse_or_class(text: &str) -> JavaType {
    JavaType::parse(text).unwrap_or_else(|_| JavaType::Class(text.to_string()))
}
