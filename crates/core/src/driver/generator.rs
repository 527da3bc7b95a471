//! Run orchestration: roots to rendered compilation units.

use super::builder::MirrorBuilder;
use super::closure::ClosureTraversal;
use super::context::GenerationContext;
use super::mangle::compute_mangle_set;
use super::override_set::OverrideSet;
use super::visibility::is_class_generated;
use crate::config::{GenerationConfig, UNNAMED_PACKAGE};
use crate::emit::Printer;
use crate::error::{MirrorError, Result};
use crate::naming::{QualifiedName, add_underscores_if_needed, mangle_class_name};
use crate::tree::{CompilationUnit, Name, collect_imports};
use indexmap::{IndexMap, IndexSet};
use mirrorgen_java::{ClassId, SymbolProvider};
use rayon::prelude::*;
use tracing::{info, warn};

const SOURCE_DIR: &str = "src";
const FILE_EXTENSION: &str = "cj";

/// One rendered mirror.
#[derive(Debug, Clone)]
pub struct GeneratedUnit {
    pub class: ClassId,
    /// Binary name of the mirrored class.
    pub binary_name: String,
    /// Output location relative to the output root, `/`-separated.
    pub path: String,
    pub unit: CompilationUnit,
    pub text: String,
}

/// Several classes mapped to the same output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputCollision {
    pub path: String,
    pub classes: Vec<String>,
}

#[derive(Debug, Default)]
pub struct GenerationOutput {
    /// Every class the roots reach, in discovery order.
    pub visited: IndexSet<ClassId>,
    pub units: Vec<GeneratedUnit>,
    pub collisions: Vec<OutputCollision>,
    /// `binaryName qualifiedMirrorName` lines, when requested.
    pub import_config: Vec<String>,
    pub override_sets: Vec<OverrideSet>,
}

pub struct MirrorGenerator<'a> {
    symbols: &'a dyn SymbolProvider,
    config: &'a GenerationConfig,
}

impl<'a> MirrorGenerator<'a> {
    pub fn new(symbols: &'a dyn SymbolProvider, config: &'a GenerationConfig) -> Self {
        Self { symbols, config }
    }

    /// Look up root classes by binary name. Unknown or non-mirrorable
    /// roots fail the run.
    pub fn resolve_roots<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<ClassId>> {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                let class = self
                    .symbols
                    .find_class(name)
                    .ok_or_else(|| MirrorError::UnknownRoot(name.to_string()))?;
                if !is_class_generated(self.symbols, class) {
                    return Err(MirrorError::RootNotEligible(name.to_string()));
                }
                Ok(class)
            })
            .collect()
    }

    /// The visited set alone, without rendering.
    pub fn closure<S: AsRef<str>>(&self, roots: &[S]) -> Result<IndexSet<ClassId>> {
        self.config.validate()?;
        let roots = self.resolve_roots(roots)?;
        let mut ctx = GenerationContext::new(self.symbols, self.config);
        Ok(ClosureTraversal::new(&mut ctx).run(&roots))
    }

    pub fn generate<S: AsRef<str>>(&self, roots: &[S]) -> Result<GenerationOutput> {
        self.config.validate()?;
        let override_sets = self
            .config
            .override_sets
            .iter()
            .map(|request| OverrideSet::resolve(self.symbols, request))
            .collect::<Result<Vec<_>>>()?;
        let roots = self.resolve_roots(roots)?;

        let mut ctx = GenerationContext::new(self.symbols, self.config);
        let visited = ClosureTraversal::new(&mut ctx).run(&roots);
        let mangled = compute_mangle_set(self.symbols, &visited, self.config);
        ctx.set_mangled(mangled);

        let classes: Vec<ClassId> = visited.iter().copied().filter(|c| self.should_render(*c)).collect();
        let ctx = &ctx;
        let units: Vec<GeneratedUnit> = classes.par_iter().map(|class| self.render(ctx, *class)).collect();
        info!("Rendered {} compilation unit(s)", units.len());

        let collisions = find_collisions(&units);
        let import_config = if self.config.emit_import_config {
            units.iter().map(|unit| self.import_config_line(ctx, unit.class)).collect()
        } else {
            Vec::new()
        };

        Ok(GenerationOutput {
            visited,
            units,
            collisions,
            import_config,
            override_sets,
        })
    }

    fn should_render(&self, class: ClassId) -> bool {
        let model = self.symbols.class(class);
        class != self.symbols.object_class()
            && class != self.symbols.string_class()
            && is_class_generated(self.symbols, class)
            && !self.config.import_renames.contains_key(&model.name)
    }

    fn unit_package(&self, class: ClassId) -> String {
        let package = if self.config.one_package {
            self.config.package_name.as_str()
        } else {
            self.symbols.class(class).package()
        };
        if package.is_empty() {
            UNNAMED_PACKAGE.to_string()
        } else {
            package.to_string()
        }
    }

    fn wildcard_imports(&self) -> Vec<QualifiedName> {
        let mut packages: IndexSet<QualifiedName> = IndexSet::new();
        packages.extend(QualifiedName::split("java.lang").ok());
        if self.config.one_package {
            for target in self.config.import_renames.values() {
                if let Some((package, _)) = target.rsplit_once('.') {
                    packages.extend(QualifiedName::split(package).ok());
                }
            }
        }
        packages.into_iter().collect()
    }

    fn render(&self, ctx: &GenerationContext<'_>, class: ClassId) -> GeneratedUnit {
        let model = self.symbols.class(class);
        let package = self.unit_package(class);

        let mut unit = CompilationUnit {
            package: Some(Name::dotted(&package)),
            wildcard_imports: self.wildcard_imports(),
            imports: vec![],
            types: vec![MirrorBuilder::new(ctx).build_class(class)],
        };
        if !self.config.one_package {
            if let Some(qualified) = QualifiedName::parse(&package) {
                unit.imports = collect_imports(&unit, &qualified);
            }
        }

        let file = if ctx.is_mangled(class) {
            mangle_class_name(&model.name)
        } else {
            model.flat_name().to_string()
        };
        let mut path = format!("{}/{}/", self.config.package_name, SOURCE_DIR);
        if !self.config.one_package && !model.package().is_empty() {
            path.push_str(&model.package().replace('.', "/"));
            path.push('/');
        }
        path.push_str(&format!("{file}.{FILE_EXTENSION}"));

        let text = Printer.emit(&unit).text().to_string();
        GeneratedUnit {
            class,
            binary_name: model.name.clone(),
            path,
            unit,
            text,
        }
    }

    fn import_config_line(&self, ctx: &GenerationContext<'_>, class: ClassId) -> String {
        let model = self.symbols.class(class);
        let identifier = if ctx.is_mangled(class) {
            mangle_class_name(&model.name)
        } else {
            add_underscores_if_needed(model.flat_name())
        };
        format!("{} {}.{}", model.name, self.config.package_name, identifier)
    }
}

fn find_collisions(units: &[GeneratedUnit]) -> Vec<OutputCollision> {
    let mut by_path: IndexMap<&str, Vec<String>> = IndexMap::new();
    for unit in units {
        by_path.entry(unit.path.as_str()).or_default().push(unit.binary_name.clone());
    }
    by_path
        .into_iter()
        .filter(|(_, classes)| classes.len() > 1)
        .map(|(path, classes)| {
            warn!("Multiple classes write to the same file `{}`: {}", path, classes.join(", "));
            OutputCollision {
                path: path.to_string(),
                classes,
            }
        })
        .collect()
}
