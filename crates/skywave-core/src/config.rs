use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

const DEFAULT_ORACLE_BASE: &str = "https://api.anthropic.com/v1";
const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Configuration for the hosted analysis service client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Base URL of the analysis service.
    pub base_url: String,
    /// API key; read from SKYWAVE_ORACLE_API_KEY or ANTHROPIC_API_KEY.
    pub api_key: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            base_url: env::var("SKYWAVE_ORACLE_URL")
                .unwrap_or_else(|_| DEFAULT_ORACLE_BASE.to_string()),
            api_key: env::var("SKYWAVE_ORACLE_API_KEY")
                .or_else(|_| env::var("ANTHROPIC_API_KEY"))
                .unwrap_or_default(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: 60,
        }
    }
}

/// Location of the durable local state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .map(|d| d.join("skywave"))
            .unwrap_or_else(|| PathBuf::from("./skywave-data"));
        Self { data_dir }
    }
}

/// Periodic telemetry refresh behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Seconds between automatic refresh cycles.
    pub interval_secs: u64,
    /// Whether the periodic timer re-triggers refreshes at all.
    pub auto_refresh: bool,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: 300,
            auto_refresh: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    pub oracle: OracleConfig,
    pub store: StoreConfig,
    pub refresh: RefreshConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_defaults_to_five_minutes() {
        let config = RefreshConfig::default();
        assert_eq!(config.interval_secs, 300);
        assert!(config.auto_refresh);
    }

    #[test]
    fn oracle_config_has_model_default() {
        let config = OracleConfig::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(!config.base_url.is_empty());
    }
}
