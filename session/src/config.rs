//! Session configuration.

use serde::Deserialize;

use crate::error::{SessionError, SessionResult};

/// Settings for a session, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// `tracing` filter directive.
    pub log_filter: String,
    /// Largest `limit` a list request may ask for. None leaves it unbounded.
    pub max_page_limit: Option<u32>,
    /// Salt for the secret hasher.
    pub password_salt: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            max_page_limit: None,
            password_salt: String::new(),
        }
    }
}

impl SessionConfig {
    /// Parse a configuration from TOML text. Missing keys take their defaults.
    pub fn from_toml(text: &str) -> SessionResult<Self> {
        toml::from_str(text).map_err(|e| SessionError::config(e.to_string()))
    }
}
