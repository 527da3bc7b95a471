//! Interned dotted names of mirror-language entities.
//!
//! A name is `module[.package...].Name`. Names under `std.core` are always
//! visible in the mirror language and never need an import.

use crate::error::{MirrorError, Result};
use dashmap::DashMap;
use lasso::{Spur, ThreadedRodeo};
use once_cell::sync::Lazy;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Module of names that live in an unsupported legacy runtime.
pub const JAVA8_MODULE: &str = "java8";
const UNSUPPORTED_PREFIX: &str = "UNSUPPORTED";

static SEGMENTS: Lazy<ThreadedRodeo> = Lazy::new(ThreadedRodeo::new);
static INTERNED: Lazy<DashMap<Box<str>, QualifiedName>> = Lazy::new(DashMap::new);
/// Simple name to `std.core` name, filled as such names are interned.
static CORE_ROOTS: Lazy<DashMap<Box<str>, QualifiedName>> = Lazy::new(DashMap::new);

struct Inner {
    segments: Box<[Spur]>,
    text: Box<str>,
}

/// Equal dotted strings always yield the same instance, so equality is
/// pointer identity.
#[derive(Clone)]
pub struct QualifiedName(Arc<Inner>);

impl QualifiedName {
    pub fn get(segments: &[&str]) -> Result<Self> {
        if segments.is_empty() || !segments.iter().all(|s| is_valid_segment(s)) {
            return Err(MirrorError::InvalidQualifiedName(segments.join(".")));
        }
        Ok(Self::intern(segments.join(".")))
    }

    /// Splits a dotted string into segments.
    pub fn split(dotted: &str) -> Result<Self> {
        let segments: Vec<&str> = dotted.split('.').collect();
        Self::get(&segments)
    }

    /// Like [`QualifiedName::split`], but a bare simple name that was
    /// already interned under `std.core` resolves to that entry.
    pub fn parse(line: &str) -> Option<Self> {
        if line.trim().is_empty() {
            return None;
        }
        if let Some(found) = CORE_ROOTS.get(line) {
            return Some(found.clone());
        }
        Self::split(line.trim()).ok()
    }

    fn intern(text: String) -> Self {
        if let Some(existing) = INTERNED.get(text.as_str()) {
            return existing.clone();
        }
        let created = INTERNED
            .entry(text.clone().into_boxed_str())
            .or_insert_with(|| {
                let segments = text.split('.').map(|s| SEGMENTS.get_or_intern(s)).collect();
                QualifiedName(Arc::new(Inner {
                    segments,
                    text: text.clone().into_boxed_str(),
                }))
            })
            .clone();
        if created.is_from_std_core() {
            CORE_ROOTS
                .entry(created.name().into())
                .or_insert_with(|| created.clone());
        }
        created
    }

    pub fn as_str(&self) -> &str {
        &self.0.text
    }

    pub fn segments(&self) -> Vec<&'static str> {
        self.0.segments.iter().map(|s| SEGMENTS.resolve(s)).collect()
    }

    pub fn module(&self) -> &'static str {
        SEGMENTS.resolve(&self.0.segments[0])
    }

    /// Simple name: the last segment.
    pub fn name(&self) -> &'static str {
        SEGMENTS.resolve(&self.0.segments[self.0.segments.len() - 1])
    }

    /// Segments between the module and the simple name, if any.
    pub fn package_segments(&self) -> Option<Vec<&'static str>> {
        let segments = self.segments();
        if segments.len() > 2 {
            Some(segments[1..segments.len() - 1].to_vec())
        } else {
            None
        }
    }

    pub fn full_package_name(&self) -> Option<String> {
        self.package_segments().map(|p| p.join("."))
    }

    pub fn is_from_std_core(&self) -> bool {
        self.module() == "std" && self.full_package_name().as_deref() == Some("core")
    }

    pub fn requires_import(&self) -> bool {
        !self.is_from_std_core() && self.package_segments().is_some()
    }

    pub fn is_unsupported(&self) -> bool {
        self.module() == JAVA8_MODULE
    }

    /// True when this name is declared directly in `package`.
    pub fn is_from_package(&self, package: &QualifiedName) -> bool {
        let segments = self.segments();
        segments[..segments.len() - 1] == package.segments()[..]
    }

    pub fn to_string_no_module(&self) -> String {
        self.segments()[1..].join(".")
    }

    pub fn generate_import(&self) -> String {
        if self.is_unsupported() {
            format!("import {}.{}", UNSUPPORTED_PREFIX, self.to_string_no_module())
        } else {
            format!("import {}", self.as_str())
        }
    }

    pub fn member(&self, name: &str) -> Result<Self> {
        let mut segments = self.segments();
        segments.push(name);
        Self::get(&segments)
    }
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment.trim() == segment
        && !segment.contains(['.', '/', '<', '>'])
}

impl PartialEq for QualifiedName {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for QualifiedName {}

impl Hash for QualifiedName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.text.hash(state);
    }
}

impl PartialOrd for QualifiedName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QualifiedName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.text.cmp(&other.0.text)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.text)
    }
}

impl fmt::Debug for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QualifiedName({})", self.0.text)
    }
}
