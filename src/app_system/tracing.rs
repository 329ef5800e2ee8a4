/// Configure tracing once at application startup for the entire process.
///
/// Filtering is environment-based: set `RUST_LOG` to control verbosity
/// (`RUST_LOG=debug`, `RUST_LOG=storefront::clients=debug`, ...). Defaults
/// to `info` when unset.
pub fn setup_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();
}
