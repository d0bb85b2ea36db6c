//! Logging infrastructure
//!
//! Structured logging setup for development and production.

use tracing_subscriber::EnvFilter;

/// Initialize the logger from `RUST_LOG`, defaulting to info
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Initialize the logger with an optional default level and rolling file output
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.unwrap_or("info")));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        if std::path::Path::new(dir).exists() {
            let file_appender = tracing_appender::rolling::daily(dir, "pawcart");
            subscriber.with_writer(file_appender).init();
            return;
        }
    }

    subscriber.init();
}
