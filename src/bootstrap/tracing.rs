//! Tracing subscriber setup.
//!
//! - `RUST_LOG` wins; otherwise debug in debug builds and info in release.
//! - Console output goes to stderr so command output on stdout stays clean.
//! - A non-blocking file layer writes to `<log_dir>/content-stack.log` when the
//!   directory can be created.

use std::path::Path;
use std::sync::OnceLock;
use std::{fs, io};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry, EnvFilter};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

fn is_development() -> bool {
    cfg!(debug_assertions)
}

fn build_filter_directives(is_dev: bool) -> Vec<String> {
    let app_level = if is_dev { "debug" } else { "info" };
    vec![
        "warn".to_string(),
        format!("content_stack={app_level}"),
        format!("cs_app={app_level}"),
        format!("cs_core={app_level}"),
        format!("cs_infra={app_level}"),
        "hyper=warn".to_string(),
        "reqwest=warn".to_string(),
    ]
}

/// Installs the global subscriber. Call once, before any logging.
///
/// # Errors
///
/// Fails if a subscriber is already registered.
pub fn init_tracing_subscriber(log_dir: &Path) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(build_filter_directives(is_development()).join(",")));

    let console_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
        .with_level(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(BoxMakeWriter::new(io::stderr));

    let file_layer = match build_file_writer(log_dir) {
        Ok(writer) => Some(
            fmt::layer()
                .with_timer(fmt::time::ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
                .with_level(true)
                .with_file(true)
                .with_line_number(true)
                .with_target(true)
                .with_ansi(false)
                .with_writer(writer),
        ),
        Err(err) => {
            eprintln!("File logging disabled: {err:#}");
            None
        }
    };

    registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

fn build_file_writer(log_dir: &Path) -> anyhow::Result<NonBlocking> {
    if log_dir.as_os_str().is_empty() {
        anyhow::bail!("no log directory configured");
    }
    fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::never(log_dir, "content-stack.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    LOG_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Tracing log guard already initialized"))?;

    Ok(non_blocking)
}
