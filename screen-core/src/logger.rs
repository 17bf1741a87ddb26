//! Logging initialization: human-readable format (timestamp, level, target, message, fields) to
//! the console and, optionally, a log file.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{
    fmt::format::{FmtSpan, Writer},
    fmt::time::FormatTime,
    fmt::writer::{BoxMakeWriter, MakeWriterExt},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Local time in `YYYY-MM-DD HH:MM:SS` for human-readable log lines.
struct ChronoLocal;

impl FormatTime for ChronoLocal {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let t = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        write!(w, "{} ", t)
    }
}

/// Initializes the global tracing subscriber.
///
/// Output is `YYYY-MM-DD HH:MM:SS LEVEL [target] message key=value ...`, without ANSI codes so
/// the log file stays plain text. When `log_file_path` is set, output is teed to stdout and that
/// file (opened in append mode; its parent directory is created if missing).
/// Log level from `RUST_LOG` (e.g. `info`, `debug`); default `info`. Load `.env` before calling.
pub fn init_tracing(log_file_path: Option<&str>) -> anyhow::Result<()> {
    let writer = match log_file_path {
        Some(path) => BoxMakeWriter::new(io::stdout.and(Arc::new(open_log_file(path)?))),
        None => BoxMakeWriter::new(io::stdout),
    };
    install(writer)
}

/// Like [`init_tracing`] but writes only to the log file, leaving stdout to interactive output.
pub fn init_file_tracing(log_file_path: &str) -> anyhow::Result<()> {
    install(BoxMakeWriter::new(Arc::new(open_log_file(log_file_path)?)))
}

fn install(writer: BoxMakeWriter) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let event_format = tracing_subscriber::fmt::format()
        .with_timer(ChronoLocal)
        .with_level(true)
        .with_target(true)
        .with_thread_ids(false);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .event_format(event_format)
        .with_span_events(FmtSpan::NONE)
        .with_ansi(false);

    Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    Ok(())
}

fn open_log_file(path: &str) -> io::Result<fs::File> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}
