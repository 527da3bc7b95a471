//! `$…$` placeholder templates.
//!
//! * `$n$` substitutes positional argument `n`;
//! * `$n:delim$` joins the sequence argument `n` with `delim`;
//! * `$+$` and `$-$` raise and lower the indent level.

use super::error::EmitError;
use super::indented::{IndentedText, IndentedTextBuilder};
use super::printer::Printer;
use crate::tree::NodeRef;
use std::borrow::Cow;

pub enum Arg<'a> {
    Text(Cow<'a, str>),
    Rendered(IndentedText),
    Node(NodeRef<'a>),
    Seq(Vec<Arg<'a>>),
}

impl<'a> Arg<'a> {
    pub fn text(text: impl Into<Cow<'a, str>>) -> Self {
        Arg::Text(text.into())
    }

    pub fn node(node: impl Into<NodeRef<'a>>) -> Self {
        Arg::Node(node.into())
    }

    pub fn nodes<T>(items: impl IntoIterator<Item = T>) -> Self
    where
        T: Into<NodeRef<'a>>,
    {
        Arg::Seq(items.into_iter().map(|item| Arg::Node(item.into())).collect())
    }
}

pub(crate) fn expand(
    printer: &Printer,
    template: &str,
    args: &[Arg<'_>],
) -> Result<IndentedText, EmitError> {
    let mut out = IndentedTextBuilder::new();
    let mut rest = template;

    while let Some(start) = rest.find('$') {
        let Some(len) = rest[start + 1..].find('$') else {
            break;
        };
        let end = start + 1 + len;
        out.append_str(&rest[..start])?;
        let placeholder = &rest[start + 1..end];
        rest = &rest[end + 1..];

        match placeholder {
            "+" => out.indent_inc(),
            "-" => out.indent_dec(),
            _ => {
                let (index, delimiter) = match placeholder.split_once(':') {
                    Some((index, delimiter)) => (index, Some(delimiter)),
                    None => (placeholder, None),
                };
                let arg = index
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| args.get(i))
                    .ok_or_else(|| EmitError::BadPlaceholder {
                        template: template.to_string(),
                        placeholder: placeholder.to_string(),
                    })?;

                match (arg, delimiter) {
                    (Arg::Seq(items), Some(delimiter)) => {
                        for (i, item) in items.iter().enumerate() {
                            if i != 0 {
                                out.append_str(delimiter)?;
                            }
                            append_scalar(printer, &mut out, item, placeholder)?;
                        }
                    }
                    (Arg::Seq(_), None) => {
                        return Err(EmitError::ExpectedScalar(placeholder.to_string()));
                    }
                    (_, Some(_)) => {
                        return Err(EmitError::ExpectedSequence(placeholder.to_string()));
                    }
                    (scalar, None) => append_scalar(printer, &mut out, scalar, placeholder)?,
                }
            }
        }
    }

    out.append_str(rest)?;
    Ok(out.seal())
}

fn append_scalar(
    printer: &Printer,
    out: &mut IndentedTextBuilder,
    arg: &Arg<'_>,
    placeholder: &str,
) -> Result<(), EmitError> {
    match arg {
        Arg::Text(text) => out.append_str(text)?,
        Arg::Rendered(text) => out.append(text),
        Arg::Node(node) => out.append(&printer.emit(*node)),
        Arg::Seq(_) => return Err(EmitError::ExpectedScalar(placeholder.to_string())),
    }
    Ok(())
}
