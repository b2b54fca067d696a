/// Configuration loading
///
/// Built-in defaults are applied first; a JSON config file, when present,
/// overrides only the fields it names. Keys match case-insensitively
/// (`listenAddr`, `LISTENADDR` and `listen_addr` all set `ListenAddr`) and a
/// `null` value leaves the default in place.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use super::error::ConfigError;
use crate::utils::{
    DEFAULT_CONSUL_HOST, DEFAULT_LISTEN_ADDR, DEFAULT_NOMAD_HOST, DEFAULT_POLL_INTERVAL_SECS,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};

/// Keys understood in the config file, in their canonical spelling
const FIELDS: &[&str] = &[
    "ListenAddr",
    "PollInterval",
    "NomadHost",
    "ConsulHost",
    "RequestTimeout",
    "ConsulToken",
    "NomadToken",
];

pub const CONSUL_TOKEN_ENV: &str = "CONSUL_HTTP_TOKEN";
pub const NOMAD_TOKEN_ENV: &str = "NOMAD_TOKEN";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Configuration {
    #[serde(rename = "ListenAddr")]
    pub listen_addr: String,

    /// Seconds between health polls
    #[serde(rename = "PollInterval")]
    pub poll_interval: u64,

    #[serde(rename = "NomadHost")]
    pub nomad_host: String,

    #[serde(rename = "ConsulHost")]
    pub consul_host: String,

    /// Seconds allowed for each Consul/Nomad API call
    #[serde(rename = "RequestTimeout")]
    pub request_timeout: u64,

    /// ACL token sent as `X-Consul-Token`, falls back to `CONSUL_HTTP_TOKEN`
    #[serde(rename = "ConsulToken")]
    pub consul_token: Option<String>,

    /// ACL token sent as `X-Nomad-Token`, falls back to `NOMAD_TOKEN`
    #[serde(rename = "NomadToken")]
    pub nomad_token: Option<String>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL_SECS,
            nomad_host: DEFAULT_NOMAD_HOST.to_string(),
            consul_host: DEFAULT_CONSUL_HOST.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT_SECS,
            consul_token: None,
            nomad_token: None,
        }
    }
}

impl Configuration {
    /// Load configuration from `path`, falling back to defaults when no
    /// file exists there.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_json(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document on top of the defaults
    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        let raw: Map<String, Value> = serde_json::from_str(contents)?;
        let mut known = Map::new();

        for (key, value) in raw {
            if value.is_null() {
                continue;
            }
            if let Some(field) = canonical_field(&key) {
                known.insert(field.to_string(), value);
            }
        }

        serde_json::from_value(Value::Object(known))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval == 0 {
            return Err(ConfigError::Invalid {
                field: "PollInterval",
                reason: "must be at least 1 second".to_string(),
            });
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::Invalid {
                field: "RequestTimeout",
                reason: "must be at least 1 second".to_string(),
            });
        }

        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn consul_token(&self) -> Option<String> {
        pick_token(self.consul_token.as_deref(), env::var(CONSUL_TOKEN_ENV).ok())
    }

    pub fn nomad_token(&self) -> Option<String> {
        pick_token(self.nomad_token.as_deref(), env::var(NOMAD_TOKEN_ENV).ok())
    }
}

fn canonical_field(key: &str) -> Option<&'static str> {
    let key: String = key.chars().filter(|c| *c != '_').collect();
    FIELDS.iter().copied().find(|field| field.eq_ignore_ascii_case(&key))
}

/// Configured token wins over the environment; blank tokens count as unset
fn pick_token(configured: Option<&str>, from_env: Option<String>) -> Option<String> {
    configured
        .map(str::to_string)
        .or(from_env)
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}
