//! Tracing setup for the command-line client.
//!
//! Console output goes to stderr so command results on stdout stay
//! machine-readable. When a log directory is configured, structured JSON
//! logs are also written to a daily-rolling file there.

use okulpanel_config::LogConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Base name of the rolling JSON log file.
pub const LOG_FILE_NAME: &str = "okulpanel.json";

/// Console filter used when `RUST_LOG` is unset.
pub fn default_filter(level: &str) -> String {
    format!(
        "okulpanel={level},okulpanel_client={level},okulpanel_storage={level},okulpanel_config={level},hyper=warn,reqwest=warn,h2=warn",
        level = level
    )
}

/// Installs the global subscriber.
///
/// Returns the file writer guard when file logging is enabled; keep it alive
/// until the process exits so buffered lines are flushed.
pub fn init_logging(config: &LogConfig) -> Option<WorkerGuard> {
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(&config.level)));

    let console_layer = fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .with_filter(console_filter);

    let Some(log_dir) = config.log_dir.as_ref() else {
        let _ = tracing_subscriber::registry().with(console_layer).try_init();
        return None;
    };

    if let Err(e) = std::fs::create_dir_all(log_dir) {
        let _ = tracing_subscriber::registry().with(console_layer).try_init();
        tracing::warn!(
            log_dir = %log_dir.display(),
            error = %e,
            "Could not create log directory, file logging disabled"
        );
        return None;
    }

    let json_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_NAME);
    let (json_writer, guard) = tracing_appender::non_blocking(json_appender);

    let json_layer = fmt::layer()
        .json()
        .with_writer(json_writer)
        .with_ansi(false)
        .with_current_span(true)
        .with_span_list(true)
        .with_filter(EnvFilter::new(default_filter("info")));

    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(json_layer)
        .try_init();

    Some(guard)
}
