/// Health aggregation for the load-balancer endpoint
///
/// The node is healthy when Consul has a leader and the Nomad cluster looks
/// like a real production cluster. The verdict lives in a [`HealthState`]
/// shared between the poller (single writer) and the HTTP handlers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::config::Configuration;
use super::consul::{consul_is_healthy, ConsulApi, ConsulClient};
use super::error::ApiError;
use super::nomad::{nomad_is_healthy, NomadApi, NomadClient};

/// Process-wide health verdict. Starts unhealthy until the first poll.
#[derive(Debug, Clone, Default)]
pub struct HealthState {
    healthy: Arc<AtomicBool>,
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_healthy(&self) -> bool {
        self.healthy.load(Ordering::Acquire)
    }

    /// Store a new verdict, returning the previous one
    pub fn publish(&self, healthy: bool) -> bool {
        self.healthy.swap(healthy, Ordering::AcqRel)
    }
}

pub struct HealthChecker {
    consul: Box<dyn ConsulApi>,
    nomad: Box<dyn NomadApi>,
}

impl HealthChecker {
    pub fn new(consul: Box<dyn ConsulApi>, nomad: Box<dyn NomadApi>) -> Self {
        Self { consul, nomad }
    }

    /// Build the Consul and Nomad clients from configuration
    pub fn from_config(config: &Configuration) -> Result<Self, ApiError> {
        let timeout = config.request_timeout();
        let consul_token = config.consul_token();
        let nomad_token = config.nomad_token();
        let consul = ConsulClient::new(&config.consul_host, timeout, consul_token.as_deref())?;
        let nomad = NomadClient::new(&config.nomad_host, timeout, nomad_token.as_deref())?;

        Ok(Self::new(Box::new(consul), Box::new(nomad)))
    }

    /// Check the overall node is healthy. Nomad is not queried when Consul
    /// is already unhealthy.
    pub async fn check_all(&self) -> bool {
        consul_is_healthy(self.consul.as_ref()).await && nomad_is_healthy(self.nomad.as_ref()).await
    }
}
