use std::sync::Once;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Level used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

static INIT: Once = Once::new();

/// Install a stderr subscriber filtered by `RUST_LOG`.
///
/// stdout carries the encoded `CodeGeneratorResponse`, so logs never go
/// there. Safe to call more than once.
pub fn init_logging() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .compact(),
            )
            .try_init();
    });
}
