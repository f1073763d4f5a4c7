//! Structured logging via the `tracing` ecosystem.

use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info";

// Filter from RUST_LOG, else the given level, else info
pub fn env_filter(level: Option<&str>) -> EnvFilter {
    let filter_str = level.filter(|level| !level.is_empty()).unwrap_or(DEFAULT_FILTER);

    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str))
}

pub fn subscriber(level: Option<&str>) -> impl Subscriber + Send + Sync + use<> {
    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(console_layer)
}

/// Install the process-wide subscriber. Config loading happens before this,
/// under a scoped `subscriber` built from the command line level.
pub fn init_logging(level: Option<&str>) {
    subscriber(level).init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn env_filter_parsing() {
        for filter_str in ["info", "debug,strata_core=trace", "warn,strata_storage=debug"] {
            assert!(
                filter_str.parse::<EnvFilter>().is_ok(),
                "Failed to parse filter: {}",
                filter_str
            );
        }
        assert!("info,strata_core=loud".parse::<EnvFilter>().is_err());
    }

    #[test]
    fn configured_level_used_without_env() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        assert!(env_filter(Some("debug")).to_string().contains("debug"));
        assert!(env_filter(Some("")).to_string().contains("info"));
        assert!(env_filter(None).to_string().contains("info"));
    }

    #[test]
    fn scoped_subscriber_sees_events_before_init() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let (info_on, debug_on) = tracing::subscriber::with_default(subscriber(None), || {
            strata_core::StrataConfig::load_or_create(dir.path()).unwrap();
            (tracing::enabled!(Level::INFO), tracing::enabled!(Level::DEBUG))
        });
        assert!(info_on);
        assert!(!debug_on);

        let quiet = tracing::subscriber::with_default(subscriber(Some("warn")), || {
            tracing::enabled!(Level::INFO)
        });
        assert!(!quiet);
    }
}
