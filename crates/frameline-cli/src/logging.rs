use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_LOG_FILE: &str = "./logs/frameline.log";

/// Where and how verbosely to log, read from `TRACING_LEVEL` and `LOG_FILE_PATH`.
struct LogSettings {
    level: String,
    file: PathBuf,
}

impl LogSettings {
    fn from_env() -> Self {
        Self {
            level: env::var("TRACING_LEVEL").unwrap_or_else(|_| "info".to_string()),
            file: env::var_os("LOG_FILE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }

    /// Split into the appender's directory and file name.
    fn file_parts(&self) -> (&Path, &Path) {
        let dir = match self.file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let name = self
            .file
            .file_name()
            .map(Path::new)
            .unwrap_or_else(|| Path::new("frameline.log"));
        (dir, name)
    }
}

/// Report on stdout, diagnostics on stderr and in the log file.
///
/// The returned guard flushes the file writer when dropped.
pub fn init_logger() -> WorkerGuard {
    let settings = LogSettings::from_env();
    let (dir, name) = settings.file_parts();
    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));

    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .compact();
    let file = fmt::layer().with_writer(file_writer).with_ansi(false);

    tracing_subscriber::registry()
        .with(EnvFilter::new(&settings.level))
        .with(console)
        .with(file)
        .init();

    debug!(
        "Logging at '{}' to stderr and {}",
        settings.level,
        settings.file.display()
    );

    guard
}
