use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the logging system
pub fn init_logger(verbose: bool) {
    // RUST_LOG wins; otherwise --verbose lowers the default level
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr) // Keep the transcript on stdout clean
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .compact(),
        )
        .init();
}
