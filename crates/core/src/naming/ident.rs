//! Identifier spelling rules for the mirror language.

/// Words that are keywords or built-in type names in the mirror language
/// but plain identifiers in Java.
pub const MIRROR_ONLY_KEYWORDS: &[&str] = &[
    "as", "Bool", "extend", "Float16", "Float32", "Float64", "foreign", "from", "func", "in",
    "init", "inout", "Int16", "Int32", "Int64", "Int8", "IntNative", "is", "let", "var", "macro",
    "main", "match", "mut", "Nothing", "operator", "prop", "quote", "Rune", "spawn", "struct",
    "This", "type", "UInt16", "UInt32", "UInt64", "UInt8", "UIntNative", "Unit", "unsafe",
    "where", "with",
];

pub fn is_mirror_keyword(name: &str) -> bool {
    MIRROR_ONLY_KEYWORDS.contains(&name)
}

fn should_replace(c: char, start: bool) -> bool {
    if c == '$' {
        return true;
    }
    if start {
        !(c.is_alphabetic() || c == '_')
    } else {
        !(c.is_alphanumeric() || c == '_')
    }
}

fn mangle_if_needed(name: &str, quote: char) -> String {
    let mut result = String::with_capacity(name.len() + 2);
    for c in name.chars() {
        if should_replace(c, result.is_empty()) {
            result.push('_');
        } else {
            result.push(c);
        }
    }
    if is_mirror_keyword(&result) {
        format!("{quote}{result}{quote}")
    } else {
        result
    }
}

/// Valid identifier for a declaration; keywords are wrapped in backticks.
pub fn add_backticks_if_needed(name: &str) -> String {
    mangle_if_needed(name, '`')
}

/// Valid identifier fragment; keywords are wrapped in underscores so the
/// result can be concatenated into a longer name.
pub fn add_underscores_if_needed(name: &str) -> String {
    mangle_if_needed(name, '_')
}

/// Number of decimal digits in `n`.
pub fn decimal_width(n: usize) -> usize {
    let mut width = 1;
    let mut rest = n / 10;
    while rest > 0 {
        width += 1;
        rest /= 10;
    }
    width
}

/// `p` followed by `index` zero-padded to `width` digits.
pub fn synthetic_parameter_name(index: usize, width: usize) -> String {
    format!("p{:0width$}", index, width = width)
}

/// Flattened identifier derived from a binary class name:
/// `a.b.Outer$Inner` becomes `a_b_Outer_Inner`.
pub fn mangle_class_name(binary_name: &str) -> String {
    add_underscores_if_needed(binary_name).replace('.', "_")
}
