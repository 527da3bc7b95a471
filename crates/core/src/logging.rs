use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable that replaces the default filter directives.
pub const LOG_ENV: &str = "MIRRORGEN_LOG";

const CRATES: &[&str] = &["mirrorgen_core", "mirrorgen_java", "mirrorgen_cli"];

/// How one generator run logs.
#[derive(Debug, Clone)]
pub struct LogOptions {
    /// Subcommand being run; names the log file.
    pub component: String,
    /// Mirror log lines to stderr and raise the generator's crates to debug.
    pub verbose: bool,
    /// Defaults to [`log_dir`].
    pub dir: Option<PathBuf>,
}

pub fn log_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".mirrorgen/logs")
}

/// Dependencies stay at `warn`; the generator's own crates log at `info`,
/// or `debug` when verbose.
pub fn default_directives(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    let mut directives = vec!["warn".to_string()];
    directives.extend(CRATES.iter().map(|krate| format!("{krate}={level}")));
    directives.join(",")
}

/// Daily rolling file named like `mirrorgen-generate.2026-10-19.log`.
pub fn file_appender(dir: &Path, component: &str) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(format!("mirrorgen-{component}"))
        .filename_suffix("log")
        .build(dir)
}

pub fn init_logging(options: &LogOptions) -> Result<WorkerGuard, InitError> {
    let dir = options.dir.clone().unwrap_or_else(log_dir);
    let _ = std::fs::create_dir_all(&dir);

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender(&dir, &options.component)?);

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directives(options.verbose)));

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    if options.verbose {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false);
        let _ = registry.with(stderr_layer).try_init();
    } else {
        let _ = registry.try_init();
    }

    info!("Starting {} run, logging to {}", options.component, dir.display());
    Ok(guard)
}
