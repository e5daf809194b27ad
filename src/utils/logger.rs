//! Tracing subscriber setup shared by demos, benches and tests

use std::env;
use std::sync::Once;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

static INIT: Once = Once::new();

/// Maps a `LOGLEVEL` value to a tracing level, defaulting to INFO
pub(crate) fn parse_level(value: &str) -> Level {
    match value.to_uppercase().as_str() {
        "ERROR" => Level::ERROR,
        "WARN" => Level::WARN,
        "DEBUG" => Level::DEBUG,
        "TRACE" => Level::TRACE,
        _ => Level::INFO,
    }
}

/// Builds the filter for a `LOGLEVEL` value.
///
/// A bare level name applies to every target. Values carrying `target=level`
/// directives are handed to [`EnvFilter`] as is; malformed directives fall back to
/// the bare-level reading.
pub(crate) fn filter_for(value: &str) -> EnvFilter {
    Some(value)
        .filter(|value| value.contains('='))
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(parse_level(value).as_str().to_lowercase()))
}

/// Install a global fmt subscriber filtered by the `LOGLEVEL` environment variable.
/// Only the first call has any effect; a subscriber installed elsewhere is left in
/// place.
pub fn setup_logger() {
    INIT.call_once(|| {
        let value = env::var("LOGLEVEL").unwrap_or_else(|_| "info".to_string());
        let filter = filter_for(&value);

        let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
        if tracing::subscriber::set_global_default(subscriber).is_ok() {
            info!("Log filter set from LOGLEVEL={}", value);
        }
    });
}
