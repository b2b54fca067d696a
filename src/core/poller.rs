/// Periodic health polling

use std::time::Duration;
use tracing::{debug, info};

use super::health::{HealthChecker, HealthState};
use crate::utils::format_duration;

pub struct Poller {
    checker: HealthChecker,
    state: HealthState,
    interval: Duration,
}

impl Poller {
    pub fn new(checker: HealthChecker, state: HealthState, interval: Duration) -> Self {
        Self {
            checker,
            state,
            interval,
        }
    }

    /// Evaluate health once and publish the verdict
    pub async fn poll_once(&self) -> bool {
        let healthy = self.checker.check_all().await;
        let previous = self.state.publish(healthy);

        if previous != healthy {
            info!(healthy, "health verdict changed");
        } else {
            debug!(healthy, "health verdict unchanged");
        }

        healthy
    }

    /// Poll forever: check, publish, sleep. Check failures only ever show up
    /// as an unhealthy verdict.
    pub async fn run(self) {
        info!(interval = %format_duration(self.interval), "starting health poller");

        loop {
            self.poll_once().await;
            tokio::time::sleep(self.interval).await;
        }
    }
}
