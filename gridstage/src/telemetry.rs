use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global tracing subscriber; `RUST_LOG` controls filtering,
/// defaulting to `info`. Call once from the hosting binary.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();
}
