use std::fmt;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::application::services::{DEFAULT_INSTRUCTION, RelayMessages};
use crate::infrastructure::llm::DEFAULT_BASE_URL;

use super::Environment;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub upstream: UpstreamSettings,
    pub proxy: ProxySettings,
    pub relay: RelaySettings,
    pub storage: StorageSettings,
    pub retention: RetentionSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Layers `appsettings.{environment}.yaml` (optional) under `APP_*`
    /// variables, with `__` separating nested keys: `APP_UPSTREAM__API_KEY`.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let file_name = format!("appsettings.{}", environment.as_str().to_lowercase());

        Config::builder()
            .add_source(File::with_name(&file_name).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamSettings {
    pub base_url: String,
    pub api_key: String,
    pub application_id: String,
    pub timeout_secs: u64,
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            application_id: String::new(),
            timeout_secs: 120,
        }
    }
}

impl fmt::Debug for UpstreamSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamSettings")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("application_id", &self.application_id)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Event-stream pass-through target. `target_endpoint` is the full url the
/// payload is posted to.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub target_endpoint: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Default for ProxySettings {
    fn default() -> Self {
        Self {
            target_endpoint: String::new(),
            api_key: String::new(),
            timeout_secs: 60,
        }
    }
}

impl fmt::Debug for ProxySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxySettings")
            .field("target_endpoint", &self.target_endpoint)
            .field("api_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RelaySettings {
    pub instruction: String,
    pub queue_capacity: usize,
    pub messages: RelayMessages,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            instruction: DEFAULT_INSTRUCTION.to_string(),
            queue_capacity: 256,
            messages: RelayMessages::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProviderSetting {
    #[default]
    Local,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub provider: StorageProviderSetting,
    pub local_path: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            provider: StorageProviderSetting::Local,
            local_path: std::env::temp_dir()
                .join("question-relay")
                .to_string_lossy()
                .into_owned(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetentionSettings {
    /// Zero keeps records forever.
    pub ttl_secs: u64,
    pub sweep_interval_secs: u64,
}

impl RetentionSettings {
    pub fn enabled(&self) -> bool {
        self.ttl_secs > 0 && self.sweep_interval_secs > 0
    }
}

impl Default for RetentionSettings {
    fn default() -> Self {
        Self {
            ttl_secs: 86_400,
            sweep_interval_secs: 600,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    pub json: bool,
}
