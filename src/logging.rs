use std::fs;

use campusdesk_config::LogConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber.
///
/// Console output goes to stderr so command output on stdout stays clean.
/// `RUST_LOG` overrides the directive derived from `config`. When a log
/// directory is configured, structured JSON is also written to a daily file;
/// keep the returned guard alive until exit so it gets flushed.
pub fn init_tracing(config: &LogConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter_directive(env!("CARGO_CRATE_NAME"))));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .compact()
        .with_filter(console_filter);

    let Some(log_dir) = &config.log_dir else {
        tracing_subscriber::registry().with(console_layer).try_init()?;
        return Ok(None);
    };

    fs::create_dir_all(log_dir)?;
    let appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "campusdesk.json");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let json_layer = fmt::layer()
        .json()
        .with_writer(writer)
        .with_current_span(true)
        .with_span_list(true)
        .with_filter(EnvFilter::new(config.filter_directive(env!("CARGO_CRATE_NAME"))));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(json_layer)
        .try_init()?;

    Ok(Some(guard))
}
