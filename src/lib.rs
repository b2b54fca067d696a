//! Load-balancer health endpoint for Nomad/Consul cluster nodes.
//!
//! A background poller asks Consul for a leader and Nomad for a leader,
//! members, nodes and jobs, then publishes a single healthy/unhealthy
//! verdict that an HTTP endpoint reports as 200 or 500.

pub mod cli;
pub mod core;
pub mod server;
pub mod utils;
