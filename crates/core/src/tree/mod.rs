//! Declaration tree of the mirror language.
//!
//! Nodes are plain owned values built bottom-up; a parent owns its
//! children outright. Consumers dispatch through [`NodeRef`], a borrowed
//! view with one variant per node kind.

mod node_ref;
mod scan;

pub use node_ref::NodeRef;
pub use scan::{collect_imports, scan};

use crate::naming::QualifiedName;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    /// Java annotation types are mirrored as interfaces.
    Annotation,
    Extend,
}

impl TypeKind {
    pub fn keyword(self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Struct => "struct",
            TypeKind::Interface | TypeKind::Annotation => "interface",
            TypeKind::Extend => "extend",
        }
    }
}

/// Declaration modifiers. Variant order is the canonical print order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Modifier {
    Override,
    Public,
    Protected,
    Internal,
    Private,
    Static,
    Open,
    Abstract,
    Redef,
    Const,
    Mut,
    Unsafe,
    Required,
    Operator,
}

impl Modifier {
    pub fn text(self) -> &'static str {
        match self {
            Modifier::Override => "override",
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Internal => "internal",
            Modifier::Private => "private",
            Modifier::Static => "static",
            Modifier::Open => "open",
            Modifier::Abstract => "abstract",
            Modifier::Redef => "redef",
            Modifier::Const => "const",
            Modifier::Mut => "mut",
            Modifier::Unsafe => "unsafe",
            Modifier::Required => "required",
            Modifier::Operator => "operator",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompilationUnit {
    pub package: Option<Name>,
    pub wildcard_imports: Vec<QualifiedName>,
    pub imports: Vec<QualifiedName>,
    pub types: Vec<Declaration>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub name: Name,
    pub arguments: Vec<Expression>,
}

impl Annotation {
    pub fn new(name: &str) -> Self {
        Self {
            name: Name::ident(name),
            arguments: vec![],
        }
    }

    pub fn with_argument(mut self, argument: Expression) -> Self {
        self.arguments.push(argument);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Type(TypeDecl),
    Function(FunctionDecl),
    Variable(VariableDecl),
    /// A declaration the builder could not produce. Rendering it fails,
    /// which surfaces as a placeholder in the output.
    Invalid(String),
}

impl Declaration {
    pub fn annotations_mut(&mut self) -> Option<&mut Vec<Annotation>> {
        match self {
            Declaration::Type(d) => Some(&mut d.annotations),
            Declaration::Function(d) => Some(&mut d.annotations),
            Declaration::Variable(d) => Some(&mut d.annotations),
            Declaration::Invalid(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub annotations: Vec<Annotation>,
    pub modifiers: Vec<Modifier>,
    pub kind: TypeKind,
    pub name: Name,
    pub type_parameters: Vec<Name>,
    pub supers: Vec<Name>,
    pub constraints: Vec<GenericConstraint>,
    pub declarations: Vec<Declaration>,
}

impl TypeDecl {
    pub fn new(kind: TypeKind, name: Name) -> Self {
        Self {
            annotations: vec![],
            modifiers: vec![],
            kind,
            name,
            type_parameters: vec![],
            supers: vec![],
            constraints: vec![],
            declarations: vec![],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub annotations: Vec<Annotation>,
    pub modifiers: Vec<Modifier>,
    pub name: String,
    pub is_constructor: bool,
    pub type_parameters: Vec<Name>,
    pub parameters: Vec<ParameterDecl>,
    pub return_type: Option<Name>,
    pub constraints: Vec<GenericConstraint>,
    pub body: Option<Block>,
}

impl FunctionDecl {
    pub fn new(name: impl Into<String>, is_constructor: bool) -> Self {
        Self {
            annotations: vec![],
            modifiers: vec![],
            name: name.into(),
            is_constructor,
            type_parameters: vec![],
            parameters: vec![],
            return_type: None,
            constraints: vec![],
            body: None,
        }
    }

    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDecl {
    pub annotations: Vec<Annotation>,
    pub name: String,
    pub ty: Option<Name>,
    pub default: Option<Expression>,
}

impl ParameterDecl {
    pub fn new(name: impl Into<String>, ty: Name) -> Self {
        Self {
            annotations: vec![],
            name: name.into(),
            ty: Some(ty),
            default: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecl {
    pub annotations: Vec<Annotation>,
    pub modifiers: Vec<Modifier>,
    pub name: String,
    /// `let` rather than `var`; for properties, read-only.
    pub is_let: bool,
    /// Interface property instead of a stored variable.
    pub is_prop: bool,
    pub ty: Option<Name>,
    pub initializer: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenericConstraint {
    pub variable: Name,
    pub bounds: Vec<Name>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(Literal),
    Name(Name),
    Block(Block),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Numeric literal in its source spelling.
    Numeric(String),
    Rune(char),
    Str(String),
    Interpolated(Vec<InterpolationPart>),
    Bool(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum InterpolationPart {
    Text(String),
    Rune(char),
    Expression(Expression),
}

/// A type or value reference, carrying the qualified names it needs imported.
#[derive(Debug, Clone, PartialEq)]
pub struct Name {
    pub kind: NameKind,
    pub imports: Vec<QualifiedName>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NameKind {
    Identifier(String),
    Generic(String, Vec<Name>),
    /// `?T`
    Option(Box<Name>),
    Qualified(Box<Name>, String),
}

impl Name {
    pub fn ident(identifier: impl Into<String>) -> Self {
        Self {
            kind: NameKind::Identifier(identifier.into()),
            imports: vec![],
        }
    }

    pub fn generic(identifier: impl Into<String>, arguments: Vec<Name>) -> Self {
        Self {
            kind: NameKind::Generic(identifier.into(), arguments),
            imports: vec![],
        }
    }

    pub fn option(inner: Name) -> Self {
        Self {
            kind: NameKind::Option(Box::new(inner)),
            imports: vec![],
        }
    }

    /// `a.b.c` as nested qualified names.
    pub fn dotted(path: &str) -> Self {
        let mut segments = path.split('.');
        let first = Name::ident(segments.next().unwrap_or_default());
        segments.fold(first, |left, right| Self {
            kind: NameKind::Qualified(Box::new(left), right.to_string()),
            imports: vec![],
        })
    }

    pub fn with_import(mut self, import: QualifiedName) -> Self {
        if !self.imports.contains(&import) {
            self.imports.push(import);
        }
        self
    }

    /// The wrapped name of an option type, or the name itself.
    pub fn unwrap_option(self) -> Name {
        match self.kind {
            NameKind::Option(inner) => {
                let mut inner = *inner;
                for import in self.imports {
                    if !inner.imports.contains(&import) {
                        inner.imports.push(import);
                    }
                }
                inner
            }
            _ => self,
        }
    }

    pub fn is_option(&self) -> bool {
        matches!(self.kind, NameKind::Option(_))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub expressions: Vec<Expression>,
    /// Put even a single expression on its own line.
    pub prefer_multiline: bool,
}

impl Block {
    pub fn multiline(expressions: Vec<Expression>) -> Self {
        Self {
            expressions,
            prefer_multiline: true,
        }
    }
}
