//! Application Configuration
//!
//! Defaults are baked in; `FARM_MALL_API_URL` overrides the backend at build
//! time and a JSON document can override any field at runtime.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculator::{CropRates, PotatoVariety, RateTable};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
pub const TOKEN_KEY: &str = "farm_mall_token";
pub const SEVEN_DAYS_SECS: u64 = 7 * 24 * 60 * 60;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
    #[error("could not parse configuration: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    /// localStorage key holding the bearer token
    pub token_storage_key: String,
    /// Cookie read by the route gate
    pub cookie_name: String,
    pub cookie_max_age_secs: u64,
    /// Minimum gap between login attempts
    pub login_debounce_ms: u64,
    pub public_paths: Vec<String>,
    pub login_path: String,
    pub rate_overrides: HashMap<PotatoVariety, CropRates>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token_storage_key: TOKEN_KEY.to_string(),
            cookie_name: TOKEN_KEY.to_string(),
            cookie_max_age_secs: SEVEN_DAYS_SECS,
            login_debounce_ms: 2_000,
            public_paths: [
                "/",
                "/auth/login",
                "/auth/register",
                "/auth/forgot-password",
                "/calculators",
                "/about",
                "/contact",
            ]
            .iter()
            .map(|p| p.to_string())
            .collect(),
            login_path: "/auth/login".to_string(),
            rate_overrides: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Defaults with the build-time API URL applied
    pub fn from_build_env() -> Self {
        let mut config = Self::default();
        if let Some(url) = option_env!("FARM_MALL_API_URL") {
            if !url.trim().is_empty() {
                config.api_base_url = url.trim().to_string();
            }
        }
        config
    }

    /// Overlay a JSON document on the defaults and validate
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::default().overlay_json(json)
    }

    /// Overlay a JSON object on this configuration; absent fields keep
    /// their current value
    pub fn overlay_json(self, json: &str) -> Result<Self, ConfigError> {
        let overlay: serde_json::Value = serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let serde_json::Value::Object(fields) = overlay else {
            return Err(ConfigError::Parse("configuration must be a JSON object".to_string()));
        };
        let mut base = serde_json::to_value(&self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        if let serde_json::Value::Object(base_fields) = &mut base {
            base_fields.extend(fields);
        }
        let config: AppConfig = serde_json::from_value(base).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("api_base_url must not be empty".to_string()));
        }
        if self.cookie_max_age_secs == 0 {
            return Err(ConfigError::Invalid("cookie_max_age_secs must be positive".to_string()));
        }
        if self.cookie_name.trim().is_empty() || self.token_storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid("token locations must be named".to_string()));
        }
        if let Some(bad) = self.public_paths.iter().find(|p| !p.starts_with('/')) {
            return Err(ConfigError::Invalid(format!("public path '{}' must start with '/'", bad)));
        }
        if !self.login_path.starts_with('/') {
            return Err(ConfigError::Invalid("login_path must start with '/'".to_string()));
        }
        Ok(())
    }

    pub fn rate_table(&self) -> RateTable {
        RateTable::new().with_overrides(&self.rate_overrides)
    }
}
