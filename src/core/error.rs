/// Error types for configuration loading and upstream API calls

use std::path::PathBuf;
use thiserror::Error;

/// Fatal configuration problems. The process must not start serving with
/// any of these.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// A failed call against the Consul or Nomad HTTP API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("{header} token is not a valid header value")]
    InvalidToken { header: &'static str },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("invalid response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    pub fn is_timeout(&self) -> bool {
        match self {
            ApiError::Request { source, .. } | ApiError::Decode { source, .. } => source.is_timeout(),
            _ => false,
        }
    }
}

/// Why a health check judged the cluster unhealthy.
#[derive(Debug, Error)]
pub enum CheckFailure {
    #[error("error querying {service} leader: {source}")]
    LeaderQuery {
        service: &'static str,
        #[source]
        source: ApiError,
    },

    #[error("{service} reported no leader")]
    NoLeader { service: &'static str },

    #[error("error getting nomad agent members: {0}")]
    MembersQuery(#[source] ApiError),

    #[error("found {found} nomad agent members, need at least {required}")]
    TooFewMembers { found: usize, required: usize },

    #[error("error getting nomad nodes: {0}")]
    NodesQuery(#[source] ApiError),

    #[error("found {found} nomad nodes, need at least {required}")]
    TooFewNodes { found: usize, required: usize },

    #[error("found no nomad jobs")]
    NoJobs,
}
