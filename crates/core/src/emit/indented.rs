//! Event-log text representation.
//!
//! Rendering appends events to an [`IndentedTextBuilder`]; sealing it
//! produces an immutable [`IndentedText`] that can be spliced into other
//! builders or linearized into a string.

use super::error::EmitError;
use once_cell::sync::OnceCell;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

const INDENT: &str = "    ";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Event {
    Text(String),
    NewLine,
    IndentInc,
    IndentDec,
}

#[derive(Debug, Default)]
pub struct IndentedTextBuilder {
    events: Vec<Event>,
}

impl IndentedTextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `text`, turning each `\n` into a newline event.
    pub fn append_str(&mut self, text: &str) -> Result<(), EmitError> {
        if text.contains('\r') {
            return Err(EmitError::CarriageReturn(text.to_string()));
        }
        let mut lines = text.split('\n');
        if let Some(first) = lines.next() {
            self.push_text(first);
        }
        for line in lines {
            self.events.push(Event::NewLine);
            self.push_text(line);
        }
        Ok(())
    }

    fn push_text(&mut self, text: &str) {
        if !text.is_empty() {
            self.events.push(Event::Text(text.to_string()));
        }
    }

    /// Splices a sealed text.
    pub fn append(&mut self, text: &IndentedText) {
        self.events.extend(text.events.iter().cloned());
    }

    pub fn new_line(&mut self) {
        self.events.push(Event::NewLine);
    }

    pub fn indent_inc(&mut self) {
        self.events.push(Event::IndentInc);
    }

    pub fn indent_dec(&mut self) {
        self.events.push(Event::IndentDec);
    }

    pub fn seal(self) -> IndentedText {
        IndentedText {
            events: self.events.into(),
            text: OnceCell::new(),
        }
    }
}

/// Sealed event log. Equality and hashing look at the events only.
#[derive(Debug, Clone)]
pub struct IndentedText {
    events: Arc<[Event]>,
    text: OnceCell<String>,
}

impl IndentedText {
    pub fn empty() -> Self {
        IndentedTextBuilder::new().seal()
    }

    /// A single fragment of text.
    pub fn span(text: &str) -> Result<Self, EmitError> {
        let mut builder = IndentedTextBuilder::new();
        builder.append_str(text)?;
        Ok(builder.seal())
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Linearized text. Indentation is written only right after a newline
    /// and only in front of a non-empty fragment.
    pub fn text(&self) -> &str {
        self.text.get_or_init(|| {
            let mut out = String::new();
            let mut indent = 0usize;
            for event in self.events.iter() {
                match event {
                    Event::NewLine => out.push('\n'),
                    Event::IndentInc => indent += 1,
                    Event::IndentDec => indent = indent.saturating_sub(1),
                    Event::Text(fragment) => {
                        if fragment.is_empty() {
                            continue;
                        }
                        if out.ends_with('\n') {
                            for _ in 0..indent {
                                out.push_str(INDENT);
                            }
                        }
                        out.push_str(fragment);
                    }
                }
            }
            out
        })
    }
}

impl PartialEq for IndentedText {
    fn eq(&self, other: &Self) -> bool {
        self.events == other.events
    }
}

impl Eq for IndentedText {}

impl Hash for IndentedText {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.events.hash(state);
    }
}

impl std::fmt::Display for IndentedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newlines_split_into_events() {
        let mut builder = IndentedTextBuilder::new();
        builder.append_str("a\n\nb\n").unwrap();
        assert_eq!(
            builder.seal().events(),
            &[
                Event::Text("a".into()),
                Event::NewLine,
                Event::NewLine,
                Event::Text("b".into()),
                Event::NewLine,
            ]
        );
    }

    #[test]
    fn carriage_returns_are_rejected() {
        let mut builder = IndentedTextBuilder::new();
        assert!(builder.append_str("a\r\nb").is_err());
    }

    #[test]
    fn indentation_only_precedes_text_after_newline() {
        let mut builder = IndentedTextBuilder::new();
        builder.append_str("{").unwrap();
        builder.indent_inc();
        builder.append_str("\nx").unwrap();
        builder.append_str("\n").unwrap();
        builder.indent_dec();
        builder.append_str("\n}").unwrap();
        assert_eq!(builder.seal().text(), "{\n    x\n\n}");
    }

    #[test]
    fn indentation_is_applied_to_spliced_text() {
        let inner = IndentedText::span("line1\nline2").unwrap();
        let mut builder = IndentedTextBuilder::new();
        builder.indent_inc();
        builder.new_line();
        builder.append(&inner);
        builder.indent_dec();
        assert_eq!(builder.seal().text(), "\n    line1\n    line2");
    }

    #[test]
    fn equality_ignores_the_text_cache() {
        let a = IndentedText::span("same").unwrap();
        let b = IndentedText::span("same").unwrap();
        let _ = a.text();
        assert_eq!(a, b);
        assert_ne!(a, IndentedText::span("other").unwrap());
    }
}
