//! Log output for the plugin
//!
//! The plugin has no `main`, so the subscriber is installed lazily by the
//! first entry point call. The level filter sits behind a reload layer so the
//! `log_level` from `config.toml` can take effect once the mods folder is
//! known.

use std::sync::OnceLock;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{Registry, fmt, reload};

type LevelHandle = reload::Handle<LevelFilter, Registry>;

/// `None` when the host already installed a global subscriber
static LEVEL: OnceLock<Option<LevelHandle>> = OnceLock::new();

/// Install the plugin's subscriber (idempotent)
pub fn init() {
    LEVEL.get_or_init(|| {
        let (filter, handle) = reload::Layer::new(LevelFilter::INFO);
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .try_init()
            .ok()
            .map(|()| handle)
    });
}

/// Parse a level name from the config; `None` for unknown names
pub fn parse_level(name: &str) -> Option<LevelFilter> {
    name.trim().parse().ok()
}

/// Change the maximum log level.
///
/// Unknown level names are logged and leave the current level in place.
pub fn set_level(name: &str) {
    let Some(level) = parse_level(name) else {
        tracing::warn!("Unknown log level '{}' in config, keeping current level", name);
        return;
    };

    let Some(Some(handle)) = LEVEL.get() else {
        tracing::debug!("Log level {} not applied: subscriber is owned by the host", level);
        return;
    };

    if let Err(e) = handle.modify(|filter| *filter = level) {
        tracing::warn!("Failed to change log level: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Some(LevelFilter::DEBUG));
        assert_eq!(parse_level(" WARN "), Some(LevelFilter::WARN));
        assert_eq!(parse_level("off"), Some(LevelFilter::OFF));
        assert_eq!(parse_level("loud"), None);
    }

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
        set_level("trace");
        set_level("nonsense");
    }
}
