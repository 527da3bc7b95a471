//! Java-syntax spelling of erased types: `int`, `java.lang.String`, `a.B$C[][]`.

use crate::error::{JavaModelError, Result};
use crate::model::{JavaType, PrimitiveType};
use std::fmt;
use std::str::FromStr;

impl PrimitiveType {
    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Char => "char",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "boolean" => Some(PrimitiveType::Boolean),
            "byte" => Some(PrimitiveType::Byte),
            "short" => Some(PrimitiveType::Short),
            "int" => Some(PrimitiveType::Int),
            "long" => Some(PrimitiveType::Long),
            "char" => Some(PrimitiveType::Char),
            "float" => Some(PrimitiveType::Float),
            "double" => Some(PrimitiveType::Double),
            _ => None,
        }
    }
}

impl JavaType {
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if let Some(element) = text.strip_suffix("[]") {
            let element = Self::parse(element)?;
            if element == JavaType::Void {
                return Err(JavaModelError::InvalidType(text.to_string()));
            }
            return Ok(JavaType::Array(Box::new(element)));
        }

        if text == "void" {
            return Ok(JavaType::Void);
        }
        if let Some(primitive) = PrimitiveType::from_keyword(text) {
            return Ok(JavaType::Primitive(primitive));
        }

        let valid = !text.is_empty()
            && text
                .split('.')
                .all(|segment| !segment.is_empty() && segment.chars().all(is_binary_name_char));
        if !valid {
            return Err(JavaModelError::InvalidType(text.to_string()));
        }

        Ok(JavaType::Class(text.to_string()))
    }

    pub fn class(name: impl Into<String>) -> Self {
        JavaType::Class(name.into())
    }

    pub fn array_of(element: JavaType) -> Self {
        JavaType::Array(Box::new(element))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, JavaType::Void)
    }

    pub fn is_primitive_or_void(&self) -> bool {
        matches!(self, JavaType::Void | JavaType::Primitive(_))
    }

    /// Innermost element type of an array, or the type itself.
    pub fn element(&self) -> &JavaType {
        let mut current = self;
        while let JavaType::Array(inner) = current {
            current = inner;
        }
        current
    }

    /// Binary name of the class this type erases to, looking through arrays.
    pub fn class_name(&self) -> Option<&str> {
        match self.element() {
            JavaType::Class(name) => Some(name),
            _ => None,
        }
    }
}

fn is_binary_name_char(c: char) -> bool {
    c == '$' || c == '_' || c.is_alphanumeric()
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JavaType::Void => f.write_str("void"),
            JavaType::Primitive(p) => f.write_str(p.keyword()),
            JavaType::Class(name) => f.write_str(name),
            JavaType::Array(element) => write!(f, "{}[]", element),
        }
    }
}

impl FromStr for JavaType {
    type Err = JavaModelError;

    fn from_str(s: &str) -> Result<Self> {
        JavaType::parse(s)
    }
}

impl TryFrom<String> for JavaType {
    type Error = JavaModelError;

    fn try_from(value: String) -> Result<Self> {
        JavaType::parse(&value)
    }
}

impl From<JavaType> for String {
    fn from(value: JavaType) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_primitives_classes_and_arrays() {
        assert_eq!(JavaType::parse("int").unwrap(), JavaType::Primitive(PrimitiveType::Int));
        assert_eq!(JavaType::parse("void").unwrap(), JavaType::Void);
        assert_eq!(
            JavaType::parse("java.util.Map$Entry").unwrap(),
            JavaType::class("java.util.Map$Entry")
        );
        assert_eq!(
            JavaType::parse("a.B[][]").unwrap(),
            JavaType::array_of(JavaType::array_of(JavaType::class("a.B")))
        );
    }

    #[test]
    fn rejects_malformed_names() {
        assert!(JavaType::parse("").is_err());
        assert!(JavaType::parse("java.util.List<String>").is_err());
        assert!(JavaType::parse("a..B").is_err());
        assert!(JavaType::parse("void[]").is_err());
    }

    #[test]
    fn element_looks_through_arrays() {
        let ty = JavaType::parse("a.B[][]").unwrap();
        assert_eq!(ty.class_name(), Some("a.B"));
        assert_eq!(JavaType::parse("int[]").unwrap().class_name(), None);
        assert_eq!(ty.to_string(), "a.B[][]");
    }
}
