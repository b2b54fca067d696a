/// Built-in defaults and upstream API paths

/// Config file looked up when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "./nomad-healthcheck.json";

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:10700";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;
pub const DEFAULT_NOMAD_HOST: &str = "localhost:4646";
pub const DEFAULT_CONSUL_HOST: &str = "localhost:8500";

/// Upper bound for a single Consul or Nomad API call
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;

/// Nomad cluster thresholds. A lone bootstrap node with nothing
/// scheduled is not a production cluster.
pub const MIN_NOMAD_MEMBERS: usize = 2;
pub const MIN_NOMAD_NODES: usize = 2;
pub const MIN_NOMAD_JOBS: usize = 1;

// Consul HTTP API
pub const CONSUL_TOKEN_HEADER: &str = "X-Consul-Token";
pub const CONSUL_LEADER_PATH: &str = "/v1/status/leader";

// Nomad HTTP API
pub const NOMAD_TOKEN_HEADER: &str = "X-Nomad-Token";
pub const NOMAD_LEADER_PATH: &str = "/v1/status/leader";
pub const NOMAD_MEMBERS_PATH: &str = "/v1/agent/members";
pub const NOMAD_NODES_PATH: &str = "/v1/nodes";
pub const NOMAD_JOBS_PATH: &str = "/v1/jobs";
