use axum::extract::FromRef;

use crate::analytics::AnalyticsAggregator;
use crate::jobs::JobManager;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedJobManager = Arc<JobManager>;
pub type GuardedAnalyticsAggregator = Arc<AnalyticsAggregator>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub job_manager: GuardedJobManager,
    pub analytics: GuardedAnalyticsAggregator,
    pub hash: String,
}

impl ServerState {
    pub fn new(
        config: ServerConfig,
        job_manager: GuardedJobManager,
        analytics: GuardedAnalyticsAggregator,
    ) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            job_manager,
            analytics,
            hash: env!("GIT_HASH").to_owned(),
        }
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}

impl FromRef<ServerState> for GuardedJobManager {
    fn from_ref(input: &ServerState) -> Self {
        input.job_manager.clone()
    }
}

impl FromRef<ServerState> for GuardedAnalyticsAggregator {
    fn from_ref(input: &ServerState) -> Self {
        input.analytics.clone()
    }
}
