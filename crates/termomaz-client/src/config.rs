//! # Client Configuration
//!
//! Where the order-creation endpoint lives and how the screen navigates
//! after a confirmed order.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TERMOMAZ_BACKEND_URL=http://10.0.0.5:5000                          │
//! │     TERMOMAZ_CREATE_ORDER_PATH=/pos/create_order                       │
//! │     TERMOMAZ_TIMEOUT_SECS=15                                           │
//! │     TERMOMAZ_ORDER_DETAIL_PATH=/orders/{order_id}                      │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/termomaz-pos/order-entry.toml (Linux)                    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://127.0.0.1:5000, /pos/create_order, no timeout               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [backend]
//! base_url = "http://127.0.0.1:5000"
//! create_order_path = "/pos/create_order"
//! timeout_secs = 15   # omit to use the transport default
//!
//! [navigation]
//! order_detail_path = "/orders/{order_id}"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ConfigError, ConfigResult};

/// Placeholder replaced by the order id in `order_detail_path`.
pub const ORDER_ID_PLACEHOLDER: &str = "{order_id}";

// =============================================================================
// Backend Settings
// =============================================================================

/// Location of the order-creation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendSettings {
    /// Scheme, host and port of the backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the order-creation endpoint.
    #[serde(default = "default_create_order_path")]
    pub create_order_path: String,

    /// Request timeout in seconds. `None` leaves it to the transport.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_create_order_path() -> String {
    "/pos/create_order".to_string()
}

impl Default for BackendSettings {
    fn default() -> Self {
        BackendSettings {
            base_url: default_base_url(),
            create_order_path: default_create_order_path(),
            timeout_secs: None,
        }
    }
}

// =============================================================================
// Navigation Settings
// =============================================================================

/// Where the screen goes once an order is confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationSettings {
    /// Order-detail path template; must contain `{order_id}`.
    #[serde(default = "default_order_detail_path")]
    pub order_detail_path: String,
}

fn default_order_detail_path() -> String {
    format!("/orders/{}", ORDER_ID_PLACEHOLDER)
}

impl Default for NavigationSettings {
    fn default() -> Self {
        NavigationSettings {
            order_detail_path: default_order_detail_path(),
        }
    }
}

// =============================================================================
// Main Client Configuration
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub backend: BackendSettings,

    #[serde(default)]
    pub navigation: NavigationSettings,
}

impl ClientConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`order-entry.toml`)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// [`ClientConfig::load`] with overrides read through `lookup` instead
    /// of the process environment.
    pub fn load_with<F>(config_path: Option<PathBuf>, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading client config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(lookup);
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load client config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        let base = Url::parse(&self.backend.base_url)?;
        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "Backend URL must start with http:// or https://, got: {}",
                self.backend.base_url
            )));
        }

        // Endpoint paths are absolute, so a path prefix here would be dropped.
        if base.path() != "/" {
            return Err(ConfigError::InvalidUrl(format!(
                "Backend URL must not carry a path, got: {}",
                self.backend.base_url
            )));
        }

        if !self.backend.create_order_path.starts_with('/') {
            return Err(ConfigError::InvalidConfig(format!(
                "create_order_path must start with '/', got: {}",
                self.backend.create_order_path
            )));
        }

        if self.backend.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if !self
            .navigation
            .order_detail_path
            .contains(ORDER_ID_PLACEHOLDER)
        {
            return Err(ConfigError::InvalidConfig(format!(
                "order_detail_path must contain {}",
                ORDER_ID_PLACEHOLDER
            )));
        }

        Ok(())
    }

    /// Applies overrides from a key lookup (the process environment in
    /// [`ClientConfig::load`]).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("TERMOMAZ_BACKEND_URL") {
            debug!(url = %url, "Overriding backend URL from environment");
            self.backend.base_url = url;
        }

        if let Some(path) = lookup("TERMOMAZ_CREATE_ORDER_PATH") {
            self.backend.create_order_path = path;
        }

        if let Some(secs) = lookup("TERMOMAZ_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(s) => self.backend.timeout_secs = Some(s),
                Err(_) => warn!(value = %secs, "Ignoring non-numeric TERMOMAZ_TIMEOUT_SECS"),
            }
        }

        if let Some(path) = lookup("TERMOMAZ_ORDER_DETAIL_PATH") {
            self.navigation.order_detail_path = path;
        }
    }

    /// Full URL of the order-creation endpoint.
    pub fn create_order_url(&self) -> ConfigResult<Url> {
        let base = Url::parse(&self.backend.base_url)?;
        Ok(base.join(&self.backend.create_order_path)?)
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "termomaz", "termomaz-pos")
            .map(|dirs| dirs.config_dir().join("order-entry.toml"))
    }
}
