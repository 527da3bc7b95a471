use super::{
    Annotation, Block, CompilationUnit, Declaration, Expression, GenericConstraint,
    InterpolationPart, Literal, Modifier, Name, NameKind, ParameterDecl,
};

/// Borrowed view of any tree node.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Unit(&'a CompilationUnit),
    Annotation(&'a Annotation),
    Modifier(Modifier),
    Declaration(&'a Declaration),
    Parameter(&'a ParameterDecl),
    Constraint(&'a GenericConstraint),
    Expression(&'a Expression),
    Literal(&'a Literal),
    Name(&'a Name),
    Block(&'a Block),
}

impl<'a> NodeRef<'a> {
    /// Direct children in source order.
    pub fn children(self) -> Vec<NodeRef<'a>> {
        let mut out = Vec::new();
        match self {
            NodeRef::Unit(unit) => {
                out.extend(unit.package.as_ref().map(NodeRef::Name));
                out.extend(unit.types.iter().map(NodeRef::Declaration));
            }
            NodeRef::Annotation(annotation) => {
                out.push(NodeRef::Name(&annotation.name));
                out.extend(annotation.arguments.iter().map(NodeRef::Expression));
            }
            NodeRef::Modifier(_) => {}
            NodeRef::Declaration(Declaration::Type(decl)) => {
                out.extend(decl.annotations.iter().map(NodeRef::Annotation));
                out.extend(decl.modifiers.iter().copied().map(NodeRef::Modifier));
                out.push(NodeRef::Name(&decl.name));
                out.extend(decl.type_parameters.iter().map(NodeRef::Name));
                out.extend(decl.supers.iter().map(NodeRef::Name));
                out.extend(decl.constraints.iter().map(NodeRef::Constraint));
                out.extend(decl.declarations.iter().map(NodeRef::Declaration));
            }
            NodeRef::Declaration(Declaration::Function(decl)) => {
                out.extend(decl.annotations.iter().map(NodeRef::Annotation));
                out.extend(decl.modifiers.iter().copied().map(NodeRef::Modifier));
                out.extend(decl.type_parameters.iter().map(NodeRef::Name));
                out.extend(decl.parameters.iter().map(NodeRef::Parameter));
                out.extend(decl.return_type.as_ref().map(NodeRef::Name));
                out.extend(decl.constraints.iter().map(NodeRef::Constraint));
                out.extend(decl.body.as_ref().map(NodeRef::Block));
            }
            NodeRef::Declaration(Declaration::Variable(decl)) => {
                out.extend(decl.annotations.iter().map(NodeRef::Annotation));
                out.extend(decl.modifiers.iter().copied().map(NodeRef::Modifier));
                out.extend(decl.ty.as_ref().map(NodeRef::Name));
                out.extend(decl.initializer.as_ref().map(NodeRef::Expression));
            }
            NodeRef::Declaration(Declaration::Invalid(_)) => {}
            NodeRef::Parameter(param) => {
                out.extend(param.annotations.iter().map(NodeRef::Annotation));
                out.extend(param.ty.as_ref().map(NodeRef::Name));
                out.extend(param.default.as_ref().map(NodeRef::Expression));
            }
            NodeRef::Constraint(constraint) => {
                out.push(NodeRef::Name(&constraint.variable));
                out.extend(constraint.bounds.iter().map(NodeRef::Name));
            }
            NodeRef::Expression(Expression::Literal(literal)) => out.push(NodeRef::Literal(literal)),
            NodeRef::Expression(Expression::Name(name)) => out.push(NodeRef::Name(name)),
            NodeRef::Expression(Expression::Block(block)) => out.push(NodeRef::Block(block)),
            NodeRef::Literal(Literal::Interpolated(parts)) => {
                for part in parts {
                    if let InterpolationPart::Expression(expr) = part {
                        out.push(NodeRef::Expression(expr));
                    }
                }
            }
            NodeRef::Literal(_) => {}
            NodeRef::Name(name) => match &name.kind {
                NameKind::Identifier(_) => {}
                NameKind::Generic(_, arguments) => out.extend(arguments.iter().map(NodeRef::Name)),
                NameKind::Option(inner) => out.push(NodeRef::Name(inner)),
                NameKind::Qualified(left, _) => out.push(NodeRef::Name(left)),
            },
            NodeRef::Block(block) => out.extend(block.expressions.iter().map(NodeRef::Expression)),
        }
        out
    }
}

impl<'a> From<&'a CompilationUnit> for NodeRef<'a> {
    fn from(node: &'a CompilationUnit) -> Self {
        NodeRef::Unit(node)
    }
}

impl<'a> From<&'a Declaration> for NodeRef<'a> {
    fn from(node: &'a Declaration) -> Self {
        NodeRef::Declaration(node)
    }
}

impl<'a> From<&'a Expression> for NodeRef<'a> {
    fn from(node: &'a Expression) -> Self {
        NodeRef::Expression(node)
    }
}

impl<'a> From<&'a Literal> for NodeRef<'a> {
    fn from(node: &'a Literal) -> Self {
        NodeRef::Literal(node)
    }
}

impl<'a> From<&'a Name> for NodeRef<'a> {
    fn from(node: &'a Name) -> Self {
        NodeRef::Name(node)
    }
}

impl<'a> From<&'a Block> for NodeRef<'a> {
    fn from(node: &'a Block) -> Self {
        NodeRef::Block(node)
    }
}
