use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the JSON stdout subscriber for a binary.
///
/// `RUST_LOG` wins when set; otherwise `default_directives` (e.g. `"info,sqlx=warn"`)
/// is used. Only the first call installs anything.
pub fn init_tracing(default_directives: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true).with_span_list(false))
        .try_init();
}
