/// Install a `tracing` subscriber driven by `RUST_LOG`.
///
/// Only binaries call this; the library never installs a subscriber itself.
pub fn init_logging() {
    // Init logging using tracing subscriber with ENV and some backup default
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eth_price=info,warn".into()),
        )
        .with_target(false)
        .without_time()
        .init();
}
