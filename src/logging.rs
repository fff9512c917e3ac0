//! Log output setup for the binary.

use std::sync::Once;

static INIT: Once = Once::new();

/// Install the global `tracing` subscriber. Filtering follows `RUST_LOG`
/// and defaults to `info`. Later calls do nothing.
pub fn init() {
    INIT.call_once(|| {
        #[cfg(not(target_arch = "wasm32"))]
        {
            use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

            let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
            // Another subscriber may already be set by an embedding host.
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_target(false))
                .try_init();
        }
    });
}
