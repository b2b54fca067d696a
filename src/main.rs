use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use nomad_healthcheck::cli::{Cli, VERSION_WITH_BUILD};
use nomad_healthcheck::core::{Configuration, HealthChecker, HealthState, Poller};
use nomad_healthcheck::server;
use nomad_healthcheck::utils::format_duration;

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    info!(version = VERSION_WITH_BUILD, "Starting Nomad Healthcheck...");
    info!(path = %cli.config.display(), "Using config file");

    let config = Configuration::load(&cli.config)
        .context("Unable to read config file. Check json is correct.")?;

    info!(
        listen_addr = %config.listen_addr,
        consul = %config.consul_host,
        nomad = %config.nomad_host,
        poll_interval = %format_duration(config.poll_interval()),
        request_timeout = %format_duration(config.request_timeout()),
        consul_acl = config.consul_token().is_some(),
        nomad_acl = config.nomad_token().is_some(),
        "Configuration loaded"
    );

    let checker = HealthChecker::from_config(&config)
        .context("Failed to create Consul/Nomad clients")?;

    let state = HealthState::new();
    let poller = Poller::new(checker, state.clone(), config.poll_interval());
    tokio::spawn(poller.run());

    server::run(&config.listen_addr, state).await
}
