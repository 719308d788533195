//! Runtime configuration.
//!
//! [`GatewayConfig`] is built once in `main` and handed to the server; no
//! other part of the crate reads the environment.
//!
//! # Environment variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PRIVATE_APP_ACCESS_TOKEN` | *(required)* | Private app token sent as `Authorization: Bearer`. |
//! | `CUSTOM_OBJECT_TYPE_ID` | `2-145042922` | Custom object type id. |
//! | `HUBSPOT_API_BASE_URL` | `https://api.hubapi.com` | API origin. |
//! | `GATEWAY_HOST` | `0.0.0.0` | Bind host. |
//! | `GATEWAY_PORT` | `3000` | Bind port. |
//! | `GATEWAY_STATIC_DIR` | `public` | Directory served as static files. |

use std::fmt;
use std::path::PathBuf;

use crate::error::ConfigError;

pub const ACCESS_TOKEN_VAR: &str = "PRIVATE_APP_ACCESS_TOKEN";
pub const OBJECT_TYPE_ID_VAR: &str = "CUSTOM_OBJECT_TYPE_ID";
pub const API_BASE_URL_VAR: &str = "HUBSPOT_API_BASE_URL";
pub const HOST_VAR: &str = "GATEWAY_HOST";
pub const PORT_VAR: &str = "GATEWAY_PORT";
pub const STATIC_DIR_VAR: &str = "GATEWAY_STATIC_DIR";

pub const DEFAULT_OBJECT_TYPE_ID: &str = "2-145042922";
pub const DEFAULT_API_BASE_URL: &str = "https://api.hubapi.com";

/// Gateway configuration
#[derive(Clone)]
pub struct GatewayConfig {
    /// Private app access token
    pub access_token: String,
    /// Custom object type id, e.g. `2-145042922`
    pub object_type_id: String,
    /// API origin without trailing slash
    pub api_base_url: String,
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Static file root
    pub static_dir: PathBuf,
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("access_token", &"<redacted>")
            .field("object_type_id", &self.object_type_id)
            .field("api_base_url", &self.api_base_url)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("static_dir", &self.static_dir)
            .finish()
    }
}

impl GatewayConfig {
    /// Create a config with defaults for everything but the token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            object_type_id: DEFAULT_OBJECT_TYPE_ID.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: PathBuf::from("public"),
        }
    }

    /// Build from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let token = get(ACCESS_TOKEN_VAR).ok_or(ConfigError::Missing(ACCESS_TOKEN_VAR))?;
        let mut cfg = Self::new(token);

        if let Some(id) = get(OBJECT_TYPE_ID_VAR) {
            cfg = cfg.with_object_type_id(id);
        }
        if let Some(url) = get(API_BASE_URL_VAR) {
            cfg = cfg.with_api_base_url(url);
        }
        if let Some(host) = get(HOST_VAR) {
            cfg = cfg.with_host(host);
        }
        if let Some(raw) = get(PORT_VAR) {
            let port = raw.parse().map_err(|_| ConfigError::Invalid {
                key: PORT_VAR,
                value: raw.clone(),
            })?;
            cfg = cfg.with_port(port);
        }
        if let Some(dir) = get(STATIC_DIR_VAR) {
            cfg = cfg.with_static_dir(dir);
        }

        Ok(cfg)
    }

    pub fn with_object_type_id(mut self, id: impl Into<String>) -> Self {
        self.object_type_id = id.into();
        self
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = dir.into();
        self
    }

    /// URL of the custom object collection.
    pub fn collection_endpoint(&self) -> String {
        format!(
            "{}/crm/v3/objects/{}",
            self.api_base_url, self.object_type_id
        )
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
