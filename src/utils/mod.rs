pub mod build_info;
pub mod format;
pub mod time;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber, honouring `RUST_LOG`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("finance_hub=info"));

        // A host application may already have installed a subscriber.
        let _ = fmt().with_env_filter(filter).with_target(false).try_init();
    });
}
