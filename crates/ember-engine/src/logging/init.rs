use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "ember_engine=debug,glow=warn"). When absent, `RUST_LOG` is consulted and
/// then `default_level`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub default_level: log::LevelFilter,
    pub write_style: env_logger::WriteStyle,
    /// Prefix records with a timestamp.
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: log::LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
            timestamps: true,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Subsequent calls are ignored. If another logger was installed first the
/// failure is reported through the existing logger instead of panicking.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.env_filter.as_deref() {
            builder.parse_filters(filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(config.default_level);
        }

        builder.write_style(config.write_style);
        if !config.timestamps {
            builder.format_timestamp(None);
        }

        match builder.try_init() {
            Ok(()) => log::debug!("logging initialized"),
            Err(err) => log::warn!("logger already installed: {err}"),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_info_with_timestamps() {
        let config = LoggingConfig::default();
        assert!(config.env_filter.is_none());
        assert_eq!(config.default_level, log::LevelFilter::Info);
        assert!(config.timestamps);
    }

    #[test]
    fn init_after_another_logger_does_not_panic() {
        crate::test_log::install();
        init_logging(LoggingConfig {
            env_filter: Some("warn".into()),
            ..LoggingConfig::default()
        });
        init_logging(LoggingConfig::default());
    }
}
