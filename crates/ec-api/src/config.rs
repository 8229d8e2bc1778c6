//! API server configuration.

use serde::Deserialize;

/// Top-level API server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Listen address (e.g., "0.0.0.0").
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Optional TOML file with intake settings (EC_CONFIG env var).
    #[serde(default)]
    pub intake_config_path: Option<String>,
    /// Enable AWS Bedrock extraction fallback (BEDROCK_ENABLED env var).
    #[serde(default)]
    pub bedrock_enabled: bool,
    /// Idle time after which a session is discarded (EC_SESSION_TTL_SECS).
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_session_ttl_secs() -> u64 {
    3600
}

impl ApiConfig {
    /// Load config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: var("EC_HOST").unwrap_or(defaults.host),
            port: var("EC_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            intake_config_path: var("EC_CONFIG").filter(|p| !p.is_empty()),
            bedrock_enabled: var("BEDROCK_ENABLED")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(false),
            session_ttl_secs: var("EC_SESSION_TTL_SECS")
                .and_then(|t| t.parse().ok())
                .filter(|t| *t > 0)
                .unwrap_or(defaults.session_ttl_secs),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            intake_config_path: None,
            bedrock_enabled: false,
            session_ttl_secs: default_session_ttl_secs(),
        }
    }
}
