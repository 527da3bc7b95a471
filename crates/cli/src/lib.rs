mod closure;
mod generate;
mod output;

use clap::{Args, Parser, Subcommand};
use mirrorgen_core::logging::{LogOptions, init_logging};
use mirrorgen_core::{GenerationConfig, GenerationMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "mirrorgen",
    version,
    about = "Generates mirror-language declarations for Java classes",
    long_about = "Mirrorgen reads a resolved Java symbol universe, computes every class a set of roots \
                  depends on, and writes one mirror declaration file per class together with the \
                  mapping that lets later runs import them."
)]
pub struct Cli {
    /// Also log to stderr, at debug level for the generator
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Directory for the rolling log files (default: ~/.mirrorgen/logs)
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate mirror files for the given root classes
    #[command(
        long_about = "Traverses the closure of the root classes, renames clashing members, and writes \
                            `<package>/src/...` files under the output directory."
    )]
    Generate {
        #[command(flatten)]
        run: RunArgs,

        /// Directory the generated tree is written to
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output: PathBuf,

        /// Write `binaryName mirrorName` lines for every generated class to this file
        #[arg(long, value_name = "FILE")]
        emit_import_config: Option<PathBuf>,
    },
    /// List the classes the given roots need mirrored, without writing anything
    Closure {
        #[command(flatten)]
        run: RunArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Serialized symbol universe (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub universe: PathBuf,

    /// Binary names of the root classes
    #[arg(value_name = "CLASS", required = true)]
    pub roots: Vec<String>,

    /// JSON generation config; flags below override its values
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Put every mirror into a single package with this name
    #[arg(long, value_name = "NAME")]
    pub one_package: Option<String>,

    /// Module name used for output paths
    #[arg(long, value_name = "NAME", conflicts_with = "one_package")]
    pub package_name: Option<String>,

    /// Emit placeholder bodies instead of bare declarations
    #[arg(long)]
    pub definitions: bool,

    /// Emit `@JavaMirror`, `@ForeignName` and `@JavaHasDefault`
    #[arg(long)]
    pub annotations: bool,

    /// Stop discovering classes this many references away from the roots
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Map not-null annotated types to non-optional types
    #[arg(long)]
    pub not_null: bool,

    /// Classes mirrored elsewhere, as `binaryName qualifiedName` lines
    #[arg(long, value_name = "FILE")]
    pub import_config: Vec<PathBuf>,
}

impl RunArgs {
    /// The generation config: the config file if given, then the flags.
    pub fn to_config(&self) -> mirrorgen_core::Result<GenerationConfig> {
        let mut config = match &self.config {
            Some(path) => GenerationConfig::from_file(path)?,
            None => GenerationConfig::default(),
        };

        if let Some(name) = &self.one_package {
            config.one_package = true;
            config.package_name = name.clone();
        }
        if let Some(name) = &self.package_name {
            config.package_name = name.clone();
        }
        if self.definitions {
            config.mode = GenerationMode::Definition;
        }
        config.annotations |= self.annotations;
        config.not_null_annotations |= self.not_null;
        if self.max_depth.is_some() {
            config.max_depth = self.max_depth;
        }
        for path in &self.import_config {
            config.load_import_renames(path)?;
        }

        config.validate()?;
        Ok(config)
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let component = match &cli.command {
        Commands::Generate { .. } => "generate",
        Commands::Closure { .. } => "closure",
    };
    let _guard = init_logging(&LogOptions {
        component: component.to_string(),
        verbose: cli.verbose,
        dir: cli.log_dir.clone(),
    })?;

    match cli.command {
        Commands::Generate {
            run,
            output,
            emit_import_config,
        } => generate::run(&run, &output, emit_import_config.as_deref()),
        Commands::Closure { run } => closure::run(&run),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn flags_map_onto_the_config() {
        let cli = parse(&[
            "mirrorgen",
            "generate",
            "--universe",
            "u.json",
            "--one-package",
            "lib",
            "--definitions",
            "--max-depth",
            "2",
            "--not-null",
            "p.A",
            "p.B",
        ]);
        let Commands::Generate { run, output, .. } = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(run.roots, vec!["p.A", "p.B"]);
        assert_eq!(output, PathBuf::from("."));

        let config = run.to_config().unwrap();
        assert!(config.one_package);
        assert_eq!(config.package_name, "lib");
        assert_eq!(config.mode, GenerationMode::Definition);
        assert_eq!(config.max_depth, Some(2));
        assert!(config.not_null_annotations);
        assert!(!config.annotation_mode());
    }

    #[test]
    fn log_flags_are_global() {
        let cli = parse(&["mirrorgen", "closure", "-u", "u.json", "p.A", "--verbose", "--log-dir", "/tmp/logs"]);
        assert!(cli.verbose);
        assert_eq!(cli.log_dir, Some(PathBuf::from("/tmp/logs")));
    }

    #[test]
    fn roots_are_required() {
        assert!(Cli::try_parse_from(["mirrorgen", "closure", "--universe", "u.json"]).is_err());
    }

    #[test]
    fn import_config_files_fill_the_rename_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("imports.txt");
        std::fs::write(&path, "q.Ext ext.pkg.Ext\nnot a mapping line\n").unwrap();

        let cli = parse(&[
            "mirrorgen",
            "closure",
            "--universe",
            "u.json",
            "--import-config",
            path.to_str().unwrap(),
            "p.A",
        ]);
        let Commands::Closure { run } = cli.command else {
            panic!("expected closure");
        };
        let config = run.to_config().unwrap();
        assert_eq!(config.import_renames.len(), 1);
        assert_eq!(config.import_renames.get("q.Ext").map(String::as_str), Some("ext.pkg.Ext"));
    }
}
