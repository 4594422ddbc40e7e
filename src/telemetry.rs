//! Telemetry helpers for applications embedding `time-interval-engine`.
//!
//! The engine only emits `tracing` events (rejected kernel patterns, the
//! split path taken, skipped timeline bars). Consumers can either call
//! `init_default_tracing` or wire their own subscriber and filters.

/// Initializes a default `tracing` subscriber when the `telemetry` feature is enabled.
///
/// Returns `true` when initialization succeeds.
/// Returns `false` when no initialization is performed (feature disabled) or if a
/// global subscriber was already set by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter("info")
}

/// Same as [`init_default_tracing`] with an explicit fallback filter, used
/// when `RUST_LOG` is unset (e.g. `"time_interval_engine=trace"`).
#[must_use]
pub fn init_tracing_with_filter(default_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
            )
            .with_target(false)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = default_filter;
        false
    }
}
