use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// `RUST_LOG` wins over the configured filter when it is set and valid.
pub fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Routes the diagnostic channel to `path` so it does not draw over the
/// terminal form. The guard must outlive the program's last log line.
pub fn init_file(filter: &str, path: &Path) -> Result<WorkerGuard, TryInitError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "workout-form.log".into());

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter(filter))
        .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
        .try_init()?;
    Ok(guard)
}

pub fn init_stderr(filter: &str) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter(filter))
        .with(fmt::layer().with_writer(io::stderr))
        .try_init()
}
