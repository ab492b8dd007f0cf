use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tui: TuiConfig,
    pub api: ApiConfig,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds for the event loop.
    pub tick_rate_ms: u64,
    /// Enable mouse support in the terminal.
    pub mouse_enabled: bool,
}

/// Remote model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Gemini model used for both trending discovery and analysis.
    pub model: String,
    /// Environment variable holding the API key.
    pub key_env: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tui: TuiConfig::default(),
            api: ApiConfig::default(),
        }
    }
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 100,
            mouse_enabled: false,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            key_env: "GEMINI_API_KEY".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/trendpulse/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse config at {}: {e} — using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!(
                    "No config file at {} — using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    /// Read the API key from the process environment. Called once at
    /// startup; absence is not an error here (the analysis client fails
    /// per operation).
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api.key_env)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("trendpulse").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
