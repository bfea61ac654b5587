use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the stderr subscriber. Stdout carries tool output only.
///
/// Filtered by `RUST_LOG`, `warn` when unset. Calling it twice is harmless.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init();
}
