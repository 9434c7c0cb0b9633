use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// Honors `RUST_LOG` when set, otherwise defaults to `casefile=info`.
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("casefile=info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
