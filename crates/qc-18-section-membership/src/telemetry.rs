//! # Telemetry
//!
//! Opt-in log subscriber for binaries, benches and tests. The library only
//! emits `tracing` events; nothing is printed until a subscriber exists.

use crate::domain::MembershipError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a global fmt subscriber.
///
/// `RUST_LOG` takes precedence over `default_filter`. A second call fails
/// with [`MembershipError::LoggingInit`].
pub fn init_logging(default_filter: &str) -> Result<(), MembershipError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .map_err(|e| MembershipError::LoggingInit(e.to_string()))?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| MembershipError::LoggingInit(e.to_string()))?;

    tracing::info!("[qc-18] Logging initialised");
    Ok(())
}
