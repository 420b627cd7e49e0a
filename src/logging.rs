//! Tracing setup shared by the development server and the function binaries.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Install a JSON subscriber filtered by `RUST_LOG`, falling back to `log_level`.
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init_tracing(log_level: &str) {
    let filter = build_filter(log_level);

    let console_layer = fmt::layer()
        .json()
        .with_current_span(false)
        .with_target(false)
        .with_filter(filter);

    if tracing_subscriber::registry()
        .with(console_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("Tracing subscriber already installed");
    }
}

fn build_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
