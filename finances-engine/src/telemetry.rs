use std::sync::Once;

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVES: &str = "finances_ingest=info,finances_engine=info";

/// Install a fmt subscriber once per process. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

        // another subscriber may already be installed by the host
        let _ = fmt().with_env_filter(filter).try_init();
        tracing::debug!("finances tracing initialized");
    });
}
