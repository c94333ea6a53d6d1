use crate::presentation::config::ENVIRONMENT_VAR;

use super::init_tracing::default_filter;

/// Configuration for tracing initialization.
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    /// Used when `RUST_LOG` is unset.
    pub default_filter: String,
}

impl TracingConfig {
    pub fn from_settings(environment: &str, level: &str, json_format: bool) -> Self {
        let default_filter = if level.trim().is_empty() {
            default_filter()
        } else {
            level.to_string()
        };

        Self {
            environment: environment.to_string(),
            json_format,
            default_filter,
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: std::env::var(ENVIRONMENT_VAR).unwrap_or_else(|_| "local".to_string()),
            json_format: std::env::var("LOG_FORMAT")
                .map(|v| v.to_lowercase() == "json")
                .unwrap_or(false),
            default_filter: default_filter(),
        }
    }
}
