mod environment;
mod scaffold_config;
mod settings;

pub use environment::{ENVIRONMENT_VAR, Environment};
pub use scaffold_config::ScaffoldConfig;
pub use settings::{
    LoggingSettings, ProxySettings, RelaySettings, RetentionSettings, ServerSettings, Settings,
    StorageProviderSetting, StorageSettings, UpstreamSettings,
};
