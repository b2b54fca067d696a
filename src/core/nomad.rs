/// Nomad health check
///
/// Checks run in order and stop at the first failure:
/// leader -> agent members -> nodes -> jobs.
///
/// The job listing is the odd one out: a query error there is only logged
/// and counted as zero jobs, so the check fails on "no jobs" rather than on
/// the error itself.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

use super::api::ApiClient;
use super::error::{ApiError, CheckFailure};
use crate::utils::{
    MIN_NOMAD_JOBS, MIN_NOMAD_MEMBERS, MIN_NOMAD_NODES, NOMAD_JOBS_PATH, NOMAD_LEADER_PATH,
    NOMAD_MEMBERS_PATH, NOMAD_NODES_PATH, NOMAD_TOKEN_HEADER,
};

/// Response of `/v1/agent/members`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerMembers {
    #[serde(rename = "ServerName", default)]
    pub server_name: String,
    #[serde(rename = "ServerRegion", default)]
    pub server_region: String,
    #[serde(rename = "ServerDC", default)]
    pub server_dc: String,
    #[serde(rename = "Members", default, deserialize_with = "null_as_empty")]
    pub members: Vec<AgentMember>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentMember {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Addr", default)]
    pub addr: String,
    #[serde(rename = "Port", default)]
    pub port: u16,
    #[serde(rename = "Status", default)]
    pub status: String,
}

/// Entry of `/v1/nodes`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeStub {
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Datacenter", default)]
    pub datacenter: String,
    #[serde(rename = "Status", default)]
    pub status: String,
}

/// Entry of `/v1/jobs`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobStub {
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Type", default)]
    pub job_type: String,
    #[serde(rename = "Status", default)]
    pub status: String,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// The part of the Nomad API the health check relies on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NomadApi: Send + Sync {
    async fn leader(&self) -> Result<String, ApiError>;
    async fn agent_members(&self) -> Result<ServerMembers, ApiError>;
    async fn nodes(&self) -> Result<Vec<NodeStub>, ApiError>;
    async fn jobs(&self) -> Result<Vec<JobStub>, ApiError>;
}

pub struct NomadClient {
    api: ApiClient,
}

impl NomadClient {
    /// `token` is the ACL token, if the cluster has ACLs enabled
    pub fn new(address: &str, timeout: Duration, token: Option<&str>) -> Result<Self, ApiError> {
        Ok(Self {
            api: ApiClient::new(address, timeout, NOMAD_TOKEN_HEADER, token)?,
        })
    }

    pub fn base_url(&self) -> &str {
        self.api.base_url()
    }
}

#[async_trait]
impl NomadApi for NomadClient {
    async fn leader(&self) -> Result<String, ApiError> {
        self.api.get_json(NOMAD_LEADER_PATH).await
    }

    async fn agent_members(&self) -> Result<ServerMembers, ApiError> {
        self.api.get_json(NOMAD_MEMBERS_PATH).await
    }

    async fn nodes(&self) -> Result<Vec<NodeStub>, ApiError> {
        self.api
            .get_json::<Option<Vec<NodeStub>>>(NOMAD_NODES_PATH)
            .await
            .map(Option::unwrap_or_default)
    }

    async fn jobs(&self) -> Result<Vec<JobStub>, ApiError> {
        self.api
            .get_json::<Option<Vec<JobStub>>>(NOMAD_JOBS_PATH)
            .await
            .map(Option::unwrap_or_default)
    }
}

/// Evaluate Nomad, reporting the first reason it is unhealthy.
pub async fn check_nomad(api: &dyn NomadApi) -> Result<(), CheckFailure> {
    let leader = api
        .leader()
        .await
        .map_err(|source| CheckFailure::LeaderQuery {
            service: "nomad",
            source,
        })?;

    if leader.is_empty() {
        return Err(CheckFailure::NoLeader { service: "nomad" });
    }

    let members = api.agent_members().await.map_err(CheckFailure::MembersQuery)?;
    if members.members.len() < MIN_NOMAD_MEMBERS {
        return Err(CheckFailure::TooFewMembers {
            found: members.members.len(),
            required: MIN_NOMAD_MEMBERS,
        });
    }

    let nodes = api.nodes().await.map_err(CheckFailure::NodesQuery)?;
    if nodes.len() < MIN_NOMAD_NODES {
        return Err(CheckFailure::TooFewNodes {
            found: nodes.len(),
            required: MIN_NOMAD_NODES,
        });
    }

    let jobs = match api.jobs().await {
        Ok(jobs) => jobs,
        Err(e) => {
            warn!(check = "nomad", "error getting nomad jobs: {}", e);
            Vec::new()
        }
    };

    if jobs.len() < MIN_NOMAD_JOBS {
        return Err(CheckFailure::NoJobs);
    }

    Ok(())
}

/// Check nomad is healthy. Failures are logged, never raised.
pub async fn nomad_is_healthy(api: &dyn NomadApi) -> bool {
    match check_nomad(api).await {
        Ok(()) => true,
        Err(e) => {
            warn!(check = "nomad", "{}", e);
            false
        }
    }
}
