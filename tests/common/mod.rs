//! Fake Consul and Nomad HTTP APIs backed by mutable in-memory state.

#![allow(dead_code)]

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct ClusterState {
    pub consul_leader: String,
    pub nomad_leader: String,
    pub members: usize,
    pub nodes: usize,
    pub jobs: usize,
    /// When set, `/v1/jobs` answers with this status instead of a listing
    pub jobs_error: Option<StatusCode>,
    /// When set, `/v1/status/leader` answers with this status
    pub leader_error: Option<StatusCode>,
    /// Delay before answering any request
    pub delay: Duration,
    /// When set, every request must carry this token or gets a 403
    pub acl_token: Option<String>,
}

impl Default for ClusterState {
    fn default() -> Self {
        Self {
            consul_leader: "node-a".to_string(),
            nomad_leader: "node-b".to_string(),
            members: 3,
            nodes: 3,
            jobs: 2,
            jobs_error: None,
            leader_error: None,
            delay: Duration::ZERO,
            acl_token: None,
        }
    }
}

pub type SharedCluster = Arc<Mutex<ClusterState>>;

pub fn shared(state: ClusterState) -> SharedCluster {
    Arc::new(Mutex::new(state))
}

fn snapshot(cluster: &SharedCluster) -> ClusterState {
    cluster.lock().unwrap().clone()
}

fn permitted(state: &ClusterState, headers: &HeaderMap, header: &str) -> bool {
    match &state.acl_token {
        None => true,
        Some(expected) => headers
            .get(header)
            .and_then(|v| v.to_str().ok())
            .map_or(false, |token| token == expected),
    }
}

fn forbidden() -> Response {
    (StatusCode::FORBIDDEN, "Permission denied").into_response()
}

async fn consul_leader(State(cluster): State<SharedCluster>, headers: HeaderMap) -> Response {
    let state = snapshot(&cluster);
    tokio::time::sleep(state.delay).await;

    if !permitted(&state, &headers, "X-Consul-Token") {
        return forbidden();
    }

    match state.leader_error {
        Some(status) => status.into_response(),
        None => Json(json!(state.consul_leader)).into_response(),
    }
}

async fn nomad_leader(State(cluster): State<SharedCluster>) -> Response {
    let state = snapshot(&cluster);
    tokio::time::sleep(state.delay).await;

    match state.leader_error {
        Some(status) => status.into_response(),
        None => Json(json!(state.nomad_leader)).into_response(),
    }
}

async fn nomad_members(State(cluster): State<SharedCluster>, headers: HeaderMap) -> Response {
    let state = snapshot(&cluster);
    if !permitted(&state, &headers, "X-Nomad-Token") {
        return forbidden();
    }

    let members: Vec<_> = (0..state.members)
        .map(|i| {
            json!({
                "Name": format!("server-{}.global", i),
                "Addr": format!("10.0.0.{}", i + 1),
                "Port": 4648,
                "Status": "alive",
                "Tags": { "role": "nomad", "region": "global" }
            })
        })
        .collect();

    Json(json!({
        "ServerName": "server-0.global",
        "ServerRegion": "global",
        "ServerDC": "dc1",
        "Members": members
    }))
    .into_response()
}

async fn nomad_nodes(State(cluster): State<SharedCluster>, headers: HeaderMap) -> Response {
    let state = snapshot(&cluster);
    if !permitted(&state, &headers, "X-Nomad-Token") {
        return forbidden();
    }

    let nodes: Vec<_> = (0..state.nodes)
        .map(|i| {
            json!({
                "ID": format!("node-{}", i),
                "Name": format!("client-{}", i),
                "Datacenter": "dc1",
                "Status": "ready",
                "Drain": false
            })
        })
        .collect();

    Json(json!(nodes)).into_response()
}

async fn nomad_jobs(State(cluster): State<SharedCluster>, headers: HeaderMap) -> Response {
    let state = snapshot(&cluster);
    if !permitted(&state, &headers, "X-Nomad-Token") {
        return forbidden();
    }

    if let Some(status) = state.jobs_error {
        return (status, "jobs listing unavailable").into_response();
    }

    let jobs: Vec<_> = (0..state.jobs)
        .map(|i| {
            json!({
                "ID": format!("job-{}", i),
                "Name": format!("job-{}", i),
                "Type": "service",
                "Status": "running",
                "Priority": 50
            })
        })
        .collect();

    Json(json!(jobs)).into_response()
}

async fn spawn(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

/// Start a fake Consul agent, returning its `host:port`
pub async fn spawn_consul(cluster: SharedCluster) -> String {
    let app = Router::new()
        .route("/v1/status/leader", get(consul_leader))
        .with_state(cluster);

    spawn(app).await.to_string()
}

/// Start a fake Nomad agent, returning its `host:port`
pub async fn spawn_nomad(cluster: SharedCluster) -> String {
    let app = Router::new()
        .route("/v1/status/leader", get(nomad_leader))
        .route("/v1/agent/members", get(nomad_members))
        .route("/v1/nodes", get(nomad_nodes))
        .route("/v1/jobs", get(nomad_jobs))
        .with_state(cluster);

    spawn(app).await.to_string()
}

/// An address nothing is listening on
pub async fn closed_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr.to_string()
}
