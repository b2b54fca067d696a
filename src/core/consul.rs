/// Consul health check
///
/// Consul is healthy when its status API answers and reports a leader.

use async_trait::async_trait;
use std::time::Duration;
use tracing::warn;

use super::api::ApiClient;
use super::error::{ApiError, CheckFailure};
use crate::utils::{CONSUL_LEADER_PATH, CONSUL_TOKEN_HEADER};

/// The part of the Consul API the health check relies on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConsulApi: Send + Sync {
    /// Address of the current raft leader, empty when there is none
    async fn leader(&self) -> Result<String, ApiError>;
}

pub struct ConsulClient {
    api: ApiClient,
}

impl ConsulClient {
    /// `token` is the ACL token, if the cluster has ACLs enabled
    pub fn new(address: &str, timeout: Duration, token: Option<&str>) -> Result<Self, ApiError> {
        Ok(Self {
            api: ApiClient::new(address, timeout, CONSUL_TOKEN_HEADER, token)?,
        })
    }

    pub fn base_url(&self) -> &str {
        self.api.base_url()
    }
}

#[async_trait]
impl ConsulApi for ConsulClient {
    async fn leader(&self) -> Result<String, ApiError> {
        self.api.get_json(CONSUL_LEADER_PATH).await
    }
}

/// Evaluate Consul, reporting why it is unhealthy.
pub async fn check_consul(api: &dyn ConsulApi) -> Result<(), CheckFailure> {
    let leader = api
        .leader()
        .await
        .map_err(|source| CheckFailure::LeaderQuery {
            service: "consul",
            source,
        })?;

    if leader.is_empty() {
        return Err(CheckFailure::NoLeader { service: "consul" });
    }

    Ok(())
}

/// Check that consul is healthy. Failures are logged, never raised.
pub async fn consul_is_healthy(api: &dyn ConsulApi) -> bool {
    match check_consul(api).await {
        Ok(()) => true,
        Err(e) => {
            warn!(check = "consul", "{}", e);
            false
        }
    }
}
