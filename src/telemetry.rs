//! Opt-in log output for hosts that have no subscriber of their own.
//!
//! The crate only emits `tracing` events. Hosts with an existing subscriber
//! can ignore this module entirely.

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// `sparkline_rs=info`.
///
/// Only does something with the `telemetry` feature. Returns `false` when the
/// feature is off or a global subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("sparkline_rs=info"));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
