//! Logging configuration using tracing.
//!
//! Logs go to stderr so reports on stdout stay machine-readable.

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact single-line format
    #[default]
    Compact,
    /// JSON format (for log aggregation)
    Json,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum log level when `RUST_LOG` is unset
    pub level: String,
    /// Log format
    pub format: LogFormat,
    /// Include target (module path)
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: String::from("warn"),
            format: LogFormat::Compact,
            with_target: false,
        }
    }
}

impl LogConfig {
    /// Create a new logging configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the level from a `-v` count
    #[must_use]
    pub fn verbosity(mut self, count: u8) -> Self {
        self.level = match count {
            0 => "warn",
            1 => "info,sitetrust=debug",
            _ => "trace",
        }
        .to_string();
        self.with_target = count > 0;
        self
    }

    /// Enable JSON format
    #[must_use]
    pub fn json(mut self) -> Self {
        self.format = LogFormat::Json;
        self
    }
}

/// Install the global subscriber.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_target(config.with_target);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
        LogFormat::Compact => {
            let fmt_layer = fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_target(config.with_target);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(LogConfig::new().level, "warn");
        assert_eq!(LogConfig::new().verbosity(1).level, "info,sitetrust=debug");
        assert_eq!(LogConfig::new().verbosity(3).level, "trace");
        assert!(LogConfig::new().verbosity(1).with_target);
    }

    #[test]
    fn json_switch() {
        let config = LogConfig::new().verbosity(0).json();
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level, "warn");
    }
}
