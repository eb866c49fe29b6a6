//! Global configuration types for Parley.
//!
//! `GlobalConfig` represents the top-level `config.toml` that controls where
//! the reply service lives, how many recent chats to show, and the request
//! timeout.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the Parley client.
///
/// Loaded from `~/.parley/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Base URL of the service exposing `/api/chat` and `/api/feedback`.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Maximum number of entries in the recent-chats list.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,

    /// Timeout applied to each reply request, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Whether delivered answers offer the up/down/comment affordance.
    #[serde(default = "default_feedback_enabled")]
    pub feedback_enabled: bool,
}

fn default_api_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_recent_limit() -> usize {
    5
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_feedback_enabled() -> bool {
    true
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            recent_limit: default_recent_limit(),
            request_timeout_secs: default_request_timeout_secs(),
            feedback_enabled: default_feedback_enabled(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_config_default_values() {
        let config = GlobalConfig::default();
        assert_eq!(config.api_base_url, "http://127.0.0.1:8000");
        assert_eq!(config.recent_limit, 5);
        assert_eq!(config.request_timeout_secs, 120);
        assert!(config.feedback_enabled);
    }

    #[test]
    fn test_global_config_deserialize_with_defaults() {
        let config: GlobalConfig = toml::from_str("").unwrap();
        assert_eq!(config.recent_limit, 5);
        assert!(config.feedback_enabled);
    }

    #[test]
    fn test_global_config_deserialize_with_values() {
        let toml_str = r#"
api_base_url = "https://chat.example.com"
recent_limit = 8
request_timeout_secs = 30
feedback_enabled = false
"#;
        let config: GlobalConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api_base_url, "https://chat.example.com");
        assert_eq!(config.recent_limit, 8);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(!config.feedback_enabled);
    }
}
