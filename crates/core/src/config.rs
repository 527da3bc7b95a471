use crate::error::{MirrorError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const UNNAMED_PACKAGE: &str = "UNNAMED";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// Bodiless declarations, abstract members marked `abstract`.
    #[default]
    Declaration,
    /// Every concrete member gets a placeholder body.
    Definition,
}

/// A method requested for an override-mask table, by name and erased parameter types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideMethodRequest {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideSetRequest {
    /// Binary name of the base class.
    pub class: String,
    pub methods: Vec<OverrideMethodRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Emit every mirror into a single package named `package_name`.
    pub one_package: bool,
    /// Module name and, in one-package mode, the package name.
    pub package_name: String,
    pub mode: GenerationMode,
    /// Request `@JavaMirror`/`@ForeignName`/`@JavaHasDefault` annotations.
    pub annotations: bool,
    /// Maximum discovery depth from the roots; unbounded when absent.
    pub max_depth: Option<usize>,
    /// Map parameters, returns and fields carrying a not-null annotation to non-optional types.
    pub not_null_annotations: bool,
    /// Skip interface methods that override `java.lang.Object` methods.
    pub interface_object_workaround: bool,
    /// Binary name to replacement qualified name for classes mirrored elsewhere.
    pub import_renames: IndexMap<String, String>,
    /// Produce `binaryName qualifiedName` lines for generated classes.
    pub emit_import_config: bool,
    pub override_sets: Vec<OverrideSetRequest>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            one_package: false,
            package_name: UNNAMED_PACKAGE.to_string(),
            mode: GenerationMode::Declaration,
            annotations: false,
            max_depth: None,
            not_null_annotations: false,
            interface_object_workaround: true,
            import_renames: IndexMap::new(),
            emit_import_config: false,
            override_sets: Vec::new(),
        }
    }
}

impl GenerationConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.package_name.trim().is_empty() {
            return Err(MirrorError::Config("package name must not be empty".into()));
        }
        if self.package_name.split('.').any(|s| s.is_empty()) {
            return Err(MirrorError::Config(format!(
                "malformed package name `{}`",
                self.package_name
            )));
        }
        Ok(())
    }

    /// Annotations are implied by one-package declaration output.
    pub fn annotation_mode(&self) -> bool {
        self.annotations || (self.one_package && self.mode == GenerationMode::Declaration)
    }

    pub fn is_definition(&self) -> bool {
        self.mode == GenerationMode::Definition
    }

    /// Merge `from to` pairs from an import-config text file.
    pub fn load_import_renames(&mut self, path: &Path) -> Result<()> {
        let text = std::fs::read_to_string(path)?;
        self.import_renames.extend(parse_import_renames(&text));
        Ok(())
    }
}

/// Parses lines of two space-separated names; other lines are ignored.
pub fn parse_import_renames(text: &str) -> IndexMap<String, String> {
    text.lines()
        .filter_map(|line| {
            let parts: Vec<&str> = line.split(' ').collect();
            match parts.as_slice() {
                [from, to] if !from.is_empty() && !to.is_empty() => {
                    Some((from.to_string(), to.to_string()))
                }
                _ => None,
            }
        })
        .collect()
}
