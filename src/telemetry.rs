use tracing_subscriber::EnvFilter;

/// Installs the global `fmt` subscriber, writing to stderr.
///
/// `RUST_LOG` wins over `default_filter` when set. Calling this twice is
/// harmless; the second subscriber is ignored.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
