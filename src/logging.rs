//! Logging System
//!
//! The resolver only emits `tracing` events; installing a subscriber is left to
//! the embedding program. `init_logging` is a convenience for programs and tests
//! that want the library's events without wiring `tracing-subscriber` themselves.

use crate::error::OptionsError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Filter directives, overriding the configured level and modules.
pub const ENV_KEY_LOG: &str = "GHW_LOG";
/// `text` or `json`, overriding the configured format.
pub const ENV_KEY_LOG_FORMAT: &str = "GHW_LOG_FORMAT";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr
    #[serde(default = "default_output")]
    pub output: String,

    /// Colored output (text format only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogOutput {
    Stdout,
    Stderr,
}

/// Install a global subscriber.
///
/// Priority order (highest to lowest):
/// 1. `GHW_LOG` / `GHW_LOG_FORMAT`
/// 2. `config`
/// 3. Defaults
///
/// Fails with [`OptionsError::Logging`] if a global subscriber is already set.
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), OptionsError> {
    let default_config = LoggingConfig::default();
    let config = config.unwrap_or(&default_config);

    let filter = build_env_filter(config)?;
    let format = determine_format(config)?;
    let output = parse_output(&config.output)?;

    let base_subscriber = Registry::default().with(filter);

    let result = match (format, output) {
        (LogFormat::Json, LogOutput::Stdout) => base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stdout),
            )
            .try_init(),
        (LogFormat::Json, LogOutput::Stderr) => base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        (LogFormat::Text, LogOutput::Stdout) => base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(config.color)
                    .with_writer(std::io::stdout),
            )
            .try_init(),
        (LogFormat::Text, LogOutput::Stderr) => base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(config.color)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    result.map_err(|e| OptionsError::Logging(e.to_string()))
}

/// Build environment filter from `GHW_LOG` or the config.
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, OptionsError> {
    if let Ok(filter) = EnvFilter::try_from_env(ENV_KEY_LOG) {
        return Ok(filter);
    }

    let level = config.level.as_str();
    if level == "off" {
        return Ok(EnvFilter::new("off"));
    }
    if !matches!(level, "trace" | "debug" | "info" | "warn" | "error") {
        return Err(OptionsError::Config(format!(
            "Invalid log level: {} (must be trace, debug, info, warn, error or off)",
            level
        )));
    }

    let mut filter = EnvFilter::new(level);
    for (module, module_level) in &config.modules {
        let directive = format!("{}={}", module, module_level);
        filter = filter.add_directive(
            directive
                .parse()
                .map_err(|e| OptionsError::Config(format!("Invalid log directive: {}", e)))?,
        );
    }

    Ok(filter)
}

/// Determine output format from `GHW_LOG_FORMAT` or the config.
fn determine_format(config: &LoggingConfig) -> Result<LogFormat, OptionsError> {
    if let Ok(format) = std::env::var(ENV_KEY_LOG_FORMAT) {
        if let Ok(parsed) = parse_format(&format) {
            return Ok(parsed);
        }
        tracing::warn!(format = %format, "Ignoring invalid {}", ENV_KEY_LOG_FORMAT);
    }

    parse_format(&config.format)
}

fn parse_format(format: &str) -> Result<LogFormat, OptionsError> {
    match format {
        "text" => Ok(LogFormat::Text),
        "json" => Ok(LogFormat::Json),
        _ => Err(OptionsError::Config(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            format
        ))),
    }
}

fn parse_output(output: &str) -> Result<LogOutput, OptionsError> {
    match output {
        "stdout" => Ok(LogOutput::Stdout),
        "stderr" => Ok(LogOutput::Stderr),
        _ => Err(OptionsError::Config(format!(
            "Invalid log output: {} (must be 'stdout' or 'stderr')",
            output
        ))),
    }
}
