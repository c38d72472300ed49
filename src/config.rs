use std::path::Path;

use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    core::PrefError,
    persistence::{
        load_json_in,
        save_json_in,
    },
};

pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub telemetry: TelemetryConfig,
    pub messages: Messages,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9000".to_string(),
            request_timeout_secs: 30,
            telemetry: TelemetryConfig::default(),
            messages: Messages::default(),
        }
    }
}

/// Context stamped on interaction events from the preference screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub env: String,
    pub page_id: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self { env: "profile".to_string(), page_id: "profile-read".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub update_success: String,
    pub update_failure: String,
    pub load_failure: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            update_success: "Content preferences updated successfully".to_string(),
            update_failure: "Could not update content preferences. Please try again later."
                .to_string(),
            load_failure: "Could not load options".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads the config from `dir`, writing the defaults out on first run.
    pub fn load_or_init(dir: &Path) -> Result<Self, PrefError> {
        match load_json_in::<AppConfig>(dir, CONFIG_FILE)? {
            Some(config) => Ok(config),
            None => {
                let config = AppConfig::default();
                save_json_in(dir, &config, CONFIG_FILE)?;
                tracing::info!("Wrote default config to {}", dir.join(CONFIG_FILE).display());
                Ok(config)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_first_run_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_init(dir.path()).unwrap();

        assert_eq!(config, AppConfig::default());
        assert!(dir.path().join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{ "base_url": "https://diksha.example", "telemetry": { "env": "library" } }"#,
        )
        .unwrap();

        let config = AppConfig::load_or_init(dir.path()).unwrap();
        assert_eq!(config.base_url, "https://diksha.example");
        assert_eq!(config.telemetry.env, "library");
        assert_eq!(config.telemetry.page_id, TelemetryConfig::default().page_id);
        assert_eq!(config.request_timeout_secs, 30);
    }
}
