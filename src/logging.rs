use std::env;
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "warn";
const DEFAULT_LOG_FILE: &str = "./logs/tidy.log";

/// Logs go to stderr and a file so they never interleave with command output
/// on stdout. `TIDY_LOG` sets the filter, `TIDY_LOG_FILE` the file.
pub fn init_logger() -> impl Drop {
    let filter_layer = EnvFilter::try_from_env("TIDY_LOG")
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let log_file = env::var("TIDY_LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
    let (non_blocking, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never("./", log_file));

    let terminal = fmt::layer()
        .with_writer(std::io::stderr)
        .compact()
        .with_target(false)
        .without_time();
    let file = fmt::layer().with_writer(non_blocking).with_ansi(false);

    tracing_subscriber::registry()
        .with(terminal)
        .with(file)
        .with(filter_layer)
        .init();

    debug!("Tracing is configured for stderr and file logging.");

    guard
}
