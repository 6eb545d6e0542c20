//! Opt-in log output for hosts and tools embedding the plot.
//!
//! The crate only emits `tracing` events. Nothing is printed unless a
//! subscriber is installed, either by the host or through
//! [`init_default_tracing`] with the `telemetry` feature.

/// Environment variable read first for the log filter.
pub const LOG_ENV_VAR: &str = "CELL_SCATTER_LOG";

/// Filter used when neither `CELL_SCATTER_LOG` nor `RUST_LOG` is set:
/// loads, zooms and draws at debug level, everything else quiet.
pub const DEFAULT_LOG_FILTER: &str = "warn,cell_scatter=info,cell_scatter::api=debug";

/// Installs a compact stderr subscriber for `cell_scatter` events.
///
/// The filter comes from `CELL_SCATTER_LOG`, then `RUST_LOG`, then
/// [`DEFAULT_LOG_FILTER`]. Returns `false` without the `telemetry` feature
/// or when the host already set a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
