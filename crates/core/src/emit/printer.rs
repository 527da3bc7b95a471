use super::error::EmitError;
use super::indented::{IndentedText, IndentedTextBuilder};
use super::template::{Arg, expand};
use crate::tree::{
    Annotation, Block, CompilationUnit, Declaration, Expression, FunctionDecl, GenericConstraint,
    InterpolationPart, Literal, Modifier, Name, NameKind, NodeRef, ParameterDecl, TypeDecl,
    TypeKind, VariableDecl,
};
use tracing::error;
use unicode_general_category::{GeneralCategory, get_general_category};

/// Text substituted for a node that failed to render.
pub const EMIT_ERROR_PLACEHOLDER: &str = "<-- Internal source code emit error -->";

/// Renders declaration trees to mirror-language source.
#[derive(Debug, Clone, Copy, Default)]
pub struct Printer;

impl Printer {
    /// Renders `node`. A fault is logged and replaced by
    /// [`EMIT_ERROR_PLACEHOLDER`] so siblings still render.
    pub fn emit<'a>(&self, node: impl Into<NodeRef<'a>>) -> IndentedText {
        match self.try_emit(node.into()) {
            Ok(text) => text,
            Err(err) => {
                error!("Failed to emit node: {}", err);
                IndentedText::span(EMIT_ERROR_PLACEHOLDER).unwrap_or_else(|_| IndentedText::empty())
            }
        }
    }

    pub fn try_emit(&self, node: NodeRef<'_>) -> Result<IndentedText, EmitError> {
        match node {
            NodeRef::Unit(unit) => self.unit(unit),
            NodeRef::Annotation(annotation) => self.annotation(annotation),
            NodeRef::Modifier(modifier) => IndentedText::span(modifier.text()),
            NodeRef::Declaration(Declaration::Type(decl)) => self.type_decl(decl),
            NodeRef::Declaration(Declaration::Function(decl)) => self.function(decl),
            NodeRef::Declaration(Declaration::Variable(decl)) => self.variable(decl),
            NodeRef::Declaration(Declaration::Invalid(reason)) => {
                Err(EmitError::InvalidNode(reason.clone()))
            }
            NodeRef::Parameter(param) => self.parameter(param),
            NodeRef::Constraint(constraint) => self.constraint(constraint),
            NodeRef::Expression(Expression::Literal(literal)) => self.literal(literal),
            NodeRef::Expression(Expression::Name(name)) => self.name(name),
            NodeRef::Expression(Expression::Block(block)) => self.block(block),
            NodeRef::Literal(literal) => self.literal(literal),
            NodeRef::Name(name) => self.name(name),
            NodeRef::Block(block) => self.block(block),
        }
    }

    fn template(&self, template: &str, args: &[Arg<'_>]) -> Result<IndentedText, EmitError> {
        expand(self, template, args)
    }

    fn unit(&self, unit: &CompilationUnit) -> Result<IndentedText, EmitError> {
        let mut parts = Vec::new();
        if let Some(package) = &unit.package {
            parts.push(Arg::Rendered(self.template("package $0$", &[Arg::node(package)])?));
        }
        if !unit.imports.is_empty() || !unit.wildcard_imports.is_empty() {
            let mut statements = Vec::new();
            for wildcard in &unit.wildcard_imports {
                statements.push(Arg::text(format!("import {}.*", wildcard)));
            }
            for import in &unit.imports {
                statements.push(Arg::text(import.generate_import()));
            }
            parts.push(Arg::Rendered(
                self.template("\n\n$0:\n$", &[Arg::Seq(statements)])?,
            ));
        }
        for decl in &unit.types {
            parts.push(Arg::Rendered(self.template("\n\n$0$", &[Arg::node(decl)])?));
        }
        self.template("$0:$", &[Arg::Seq(parts)])
    }

    fn annotation(&self, annotation: &Annotation) -> Result<IndentedText, EmitError> {
        if annotation.arguments.is_empty() {
            self.template("@$0$", &[Arg::node(&annotation.name)])
        } else {
            self.template(
                "@$0$[$1:, $]",
                &[
                    Arg::node(&annotation.name),
                    Arg::nodes(annotation.arguments.iter()),
                ],
            )
        }
    }

    fn annotations(
        &self,
        annotations: &[Annotation],
        delimiter: &str,
    ) -> Result<IndentedText, EmitError> {
        if annotations.is_empty() {
            return Ok(IndentedText::empty());
        }
        let template = format!("$0:{delimiter}${delimiter}");
        self.template(
            &template,
            &[Arg::Seq(
                annotations.iter().map(|a| Arg::Node(NodeRef::Annotation(a))).collect(),
            )],
        )
    }

    fn modifiers(&self, modifiers: &[Modifier]) -> Result<IndentedText, EmitError> {
        if modifiers.is_empty() {
            return Ok(IndentedText::empty());
        }
        let mut sorted = modifiers.to_vec();
        sorted.sort();
        sorted.dedup();
        self.template(
            "$0: $ ",
            &[Arg::Seq(sorted.into_iter().map(|m| Arg::Node(NodeRef::Modifier(m))).collect())],
        )
    }

    fn type_parameters(&self, params: &[Name]) -> Result<IndentedText, EmitError> {
        if params.is_empty() {
            return Ok(IndentedText::empty());
        }
        self.template("<$0:, $>", &[Arg::nodes(params.iter())])
    }

    fn constraints(&self, constraints: &[GenericConstraint]) -> Result<IndentedText, EmitError> {
        if constraints.is_empty() {
            return Ok(IndentedText::empty());
        }
        self.template(
            " where $0:, $",
            &[Arg::Seq(
                constraints.iter().map(|c| Arg::Node(NodeRef::Constraint(c))).collect(),
            )],
        )
    }

    fn type_decl(&self, decl: &TypeDecl) -> Result<IndentedText, EmitError> {
        let prefix_args = [
            Arg::Rendered(self.annotations(&decl.annotations, "\n")?),
            Arg::Rendered(self.modifiers(&decl.modifiers)?),
            Arg::text(decl.kind.keyword()),
            Arg::Rendered(self.type_parameters(&decl.type_parameters)?),
            Arg::node(&decl.name),
        ];
        let prefix = if decl.kind == TypeKind::Extend {
            self.template("$0$$1$$2$$3$ $4$", &prefix_args)?
        } else {
            self.template("$0$$1$$2$ $4$", &prefix_args)?
        };

        let supers = if decl.supers.is_empty() {
            IndentedText::empty()
        } else {
            self.template(" <: $0: & $", &[Arg::nodes(decl.supers.iter())])?
        };

        let mut body = Vec::with_capacity(decl.declarations.len() * 2);
        for (i, member) in decl.declarations.iter().enumerate() {
            body.push(Arg::text(if i == 0 { "\n" } else { "\n\n" }));
            body.push(Arg::node(member));
        }

        let mut out = IndentedTextBuilder::new();
        out.append(&prefix);
        out.append(&self.template(
            "$0$$1$$2$ {$+$$3:$$-$\n}",
            &[
                Arg::Rendered(self.type_parameters(&decl.type_parameters)?),
                Arg::Rendered(supers),
                Arg::Rendered(self.constraints(&decl.constraints)?),
                Arg::Seq(body),
            ],
        )?);
        Ok(out.seal())
    }

    fn function(&self, decl: &FunctionDecl) -> Result<IndentedText, EmitError> {
        let mut template = String::from("$0$$1$$2$$3$$4$");
        if decl.has_modifier(Modifier::Operator) {
            template.push(' ');
        }
        template.push_str("($5:, $)");
        if decl.return_type.is_some() {
            template.push_str(": $6$");
        }
        template.push_str("$7$");
        if decl.body.is_some() {
            template.push_str(" $8$");
        }

        let return_type = match &decl.return_type {
            Some(name) => Arg::node(name),
            None => Arg::text(""),
        };
        let body = match &decl.body {
            Some(block) => Arg::node(block),
            None => Arg::text(""),
        };

        self.template(
            &template,
            &[
                Arg::Rendered(self.annotations(&decl.annotations, "\n")?),
                Arg::Rendered(self.modifiers(&decl.modifiers)?),
                Arg::text(if decl.is_constructor { "" } else { "func " }),
                Arg::text(decl.name.as_str()),
                Arg::Rendered(self.type_parameters(&decl.type_parameters)?),
                Arg::Seq(
                    decl.parameters.iter().map(|p| Arg::Node(NodeRef::Parameter(p))).collect(),
                ),
                return_type,
                Arg::Rendered(self.constraints(&decl.constraints)?),
                body,
            ],
        )
    }

    /// `name: Type = init` with either part optional.
    fn binding(
        &self,
        name: &str,
        ty: Option<&Name>,
        initializer: Option<&Expression>,
    ) -> Result<IndentedText, EmitError> {
        match (ty, initializer) {
            (Some(ty), Some(init)) => self.template(
                "$0$: $1$ = $2$",
                &[Arg::text(name), Arg::node(ty), Arg::node(init)],
            ),
            (Some(ty), None) => self.template("$0$: $1$", &[Arg::text(name), Arg::node(ty)]),
            (None, Some(init)) => self.template("$0$ = $1$", &[Arg::text(name), Arg::node(init)]),
            (None, None) => Err(EmitError::UntypedVariable(name.to_string())),
        }
    }

    fn parameter(&self, param: &ParameterDecl) -> Result<IndentedText, EmitError> {
        self.template(
            "$0$$1$",
            &[
                Arg::Rendered(self.annotations(&param.annotations, " ")?),
                Arg::Rendered(self.binding(&param.name, param.ty.as_ref(), param.default.as_ref())?),
            ],
        )
    }

    fn variable(&self, decl: &VariableDecl) -> Result<IndentedText, EmitError> {
        let annotations = self.annotations(&decl.annotations, "\n")?;
        let modifiers = self.modifiers(&decl.modifiers)?;

        if decl.is_prop {
            let Some(ty) = &decl.ty else {
                return Err(EmitError::UntypedVariable(decl.name.clone()));
            };
            let mut pattern = String::from("$0$$1$$2$prop $3$: $4$");
            if decl.initializer.is_some() {
                pattern.push_str(" {$+$\nget() { $5$ }");
                if !decl.is_let {
                    pattern.push_str("\nset(value) { }");
                }
                pattern.push_str("$-$\n}");
            }
            let initializer = match &decl.initializer {
                Some(init) => Arg::node(init),
                None => Arg::text(""),
            };
            return self.template(
                &pattern,
                &[
                    Arg::Rendered(annotations),
                    Arg::Rendered(modifiers),
                    Arg::text(if decl.is_let { "" } else { "mut " }),
                    Arg::text(decl.name.as_str()),
                    Arg::node(ty),
                    initializer,
                ],
            );
        }

        self.template(
            "$0$$1$$2$ $3$",
            &[
                Arg::Rendered(annotations),
                Arg::Rendered(modifiers),
                Arg::text(if decl.is_let { "let" } else { "var" }),
                Arg::Rendered(self.binding(&decl.name, decl.ty.as_ref(), decl.initializer.as_ref())?),
            ],
        )
    }

    fn constraint(&self, constraint: &GenericConstraint) -> Result<IndentedText, EmitError> {
        self.template(
            "$0$ <: $1: & $",
            &[
                Arg::node(&constraint.variable),
                Arg::nodes(constraint.bounds.iter()),
            ],
        )
    }

    fn literal(&self, literal: &Literal) -> Result<IndentedText, EmitError> {
        match literal {
            Literal::Numeric(text) => IndentedText::span(text),
            Literal::Bool(value) => IndentedText::span(if *value { "true" } else { "false" }),
            Literal::Rune(c) => self.template("r'$0$'", &[Arg::text(escape_char(*c))]),
            Literal::Str(value) => self.template("\"$0$\"", &[Arg::text(escape(value))]),
            Literal::Interpolated(parts) => {
                let mut out = IndentedTextBuilder::new();
                out.append_str("\"")?;
                for part in parts {
                    match part {
                        InterpolationPart::Text(text) => out.append_str(&escape(text))?,
                        InterpolationPart::Rune(c) => out.append_str(&escape_char(*c))?,
                        InterpolationPart::Expression(expr) => {
                            out.append_str("${")?;
                            out.append(&self.emit(expr));
                            out.append_str("}")?;
                        }
                    }
                }
                out.append_str("\"")?;
                Ok(out.seal())
            }
        }
    }

    fn name(&self, name: &Name) -> Result<IndentedText, EmitError> {
        match &name.kind {
            NameKind::Identifier(identifier) => IndentedText::span(identifier),
            NameKind::Generic(identifier, arguments) => self.template(
                "$0$<$1:, $>",
                &[Arg::text(identifier.as_str()), Arg::nodes(arguments.iter())],
            ),
            NameKind::Option(inner) => self.template("?$0$", &[Arg::node(inner.as_ref())]),
            NameKind::Qualified(left, right) => self.template(
                "$0$.$1$",
                &[Arg::node(left.as_ref()), Arg::text(right.as_str())],
            ),
        }
    }

    fn block(&self, block: &Block) -> Result<IndentedText, EmitError> {
        match block.expressions.as_slice() {
            [] => IndentedText::span("{ }"),
            [single] if !block.prefer_multiline => self.template("{ $0$ }", &[Arg::node(single)]),
            expressions => {
                let mut lines = Vec::with_capacity(expressions.len() * 2);
                for expr in expressions {
                    lines.push(Arg::text("\n"));
                    lines.push(Arg::node(expr));
                }
                self.template("{$+$$0:$$-$\n}", &[Arg::Seq(lines)])
            }
        }
    }
}

/// Escapes one codepoint for a string or rune literal.
pub fn escape_char(c: char) -> String {
    match c {
        '\u{8}' => "\\b".to_string(),
        '\u{c}' => "\\f".to_string(),
        '\n' => "\\n".to_string(),
        '\r' => "\\r".to_string(),
        '\t' => "\\t".to_string(),
        '\'' => "\\'".to_string(),
        '"' => "\\\"".to_string(),
        '\\' => "\\\\".to_string(),
        c if !is_printable(c) => format!("\\u{{{:04x}}}", c as u32),
        c => c.to_string(),
    }
}

/// Unassigned, private-use and invisible codepoints are written as `\u{..}`.
fn is_printable(c: char) -> bool {
    !matches!(
        get_general_category(c),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::Unassigned
            | GeneralCategory::PrivateUse
            | GeneralCategory::Surrogate
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
    )
}

pub fn escape(value: &str) -> String {
    value.chars().map(escape_char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_quotes_newlines_and_controls() {
        assert_eq!(escape("say \"hi\"\n"), "say \\\"hi\\\"\\n");
        assert_eq!(escape("tab\there"), "tab\\there");
        assert_eq!(escape("\u{1}"), "\\u{0001}");
        assert_eq!(escape("back\\slash"), "back\\\\slash");
        assert_eq!(escape_char('\''), "\\'");
        assert_eq!(escape("ünï"), "ünï");
    }

    #[test]
    fn escapes_unassigned_and_invisible_codepoints() {
        assert_eq!(escape_char('\u{378}'), "\\u{0378}");
        assert_eq!(escape_char('\u{ffff}'), "\\u{ffff}");
        assert_eq!(escape_char('\u{200b}'), "\\u{200b}");
        assert_eq!(escape_char('\u{2028}'), "\\u{2028}");
        assert_eq!(escape_char('\u{2029}'), "\\u{2029}");
        assert_eq!(escape_char('\u{e000}'), "\\u{e000}");
        assert_eq!(escape_char('\u{10ffff}'), "\\u{10ffff}");
        assert_eq!(escape("名前 café"), "名前 café");
    }

    #[test]
    fn invalid_declarations_render_as_placeholder() {
        let decl = Declaration::Invalid("unexpected member shape".into());
        assert_eq!(Printer.emit(&decl).text(), EMIT_ERROR_PLACEHOLDER);
    }

    #[test]
    fn modifiers_print_in_canonical_order() {
        let mut func = FunctionDecl::new("run", false);
        func.modifiers = vec![Modifier::Open, Modifier::Public];
        func.return_type = Some(Name::ident("Unit"));
        let decl = Declaration::Function(func);
        assert_eq!(Printer.emit(&decl).text(), "public open func run(): Unit");
    }

    #[test]
    fn blocks_choose_their_layout() {
        let empty = Block::multiline(vec![]);
        assert_eq!(Printer.emit(&empty).text(), "{ }");

        let one = Block {
            expressions: vec![Expression::Literal(Literal::Numeric("0".into()))],
            prefer_multiline: false,
        };
        assert_eq!(Printer.emit(&one).text(), "{ 0 }");

        let multi = Block::multiline(vec![Expression::Literal(Literal::Bool(false))]);
        assert_eq!(Printer.emit(&multi).text(), "{\n    false\n}");
    }

    #[test]
    fn interpolated_strings_escape_text_parts() {
        let literal = Literal::Interpolated(vec![
            InterpolationPart::Text("a\"".into()),
            InterpolationPart::Expression(Expression::Name(Name::ident("x"))),
            InterpolationPart::Rune('\n'),
        ]);
        assert_eq!(Printer.emit(&literal).text(), "\"a\\\"${x}\\n\"");
    }
}
